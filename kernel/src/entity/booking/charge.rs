use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monetary breakdown persisted on a booking. Total equals the sum of the
/// parts; all components are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChargeBreakdown {
    base_amount: Decimal,
    cleaning_fee: Decimal,
    extra_guest_fee: Decimal,
    service_fee: Decimal,
    taxes: Decimal,
    total_amount: Decimal,
}

impl ChargeBreakdown {
    pub fn new(
        base_amount: Decimal,
        cleaning_fee: Decimal,
        extra_guest_fee: Decimal,
        service_fee: Decimal,
        taxes: Decimal,
        total_amount: Decimal,
    ) -> Self {
        Self {
            base_amount,
            cleaning_fee,
            extra_guest_fee,
            service_fee,
            taxes,
            total_amount,
        }
    }

    pub fn base_amount(&self) -> Decimal {
        self.base_amount
    }

    pub fn cleaning_fee(&self) -> Decimal {
        self.cleaning_fee
    }

    pub fn extra_guest_fee(&self) -> Decimal {
        self.extra_guest_fee
    }

    pub fn service_fee(&self) -> Decimal {
        self.service_fee
    }

    pub fn taxes(&self) -> Decimal {
        self.taxes
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }
}
