use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-property fee schedule. Optional fields fall back to the defaults
/// below; these are the only place the fallbacks are defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    nightly_rate: Decimal,
    cleaning_fee: Option<Decimal>,
    extra_guest_fee: Option<Decimal>,
    service_fee_percentage: Option<Decimal>,
}

impl FeeSchedule {
    pub fn new(
        nightly_rate: Decimal,
        cleaning_fee: Option<Decimal>,
        extra_guest_fee: Option<Decimal>,
        service_fee_percentage: Option<Decimal>,
    ) -> Self {
        Self {
            nightly_rate,
            cleaning_fee,
            extra_guest_fee,
            service_fee_percentage,
        }
    }

    pub fn nightly_rate(&self) -> Decimal {
        self.nightly_rate
    }

    /// Cleaning fee, defaulting to zero when the property defines none.
    pub fn cleaning_fee(&self) -> Decimal {
        self.cleaning_fee.unwrap_or(Decimal::ZERO)
    }

    /// Flat fee charged once per guest above two, defaulting to zero.
    pub fn extra_guest_fee(&self) -> Decimal {
        self.extra_guest_fee.unwrap_or(Decimal::ZERO)
    }

    /// Marketplace service fee as a percentage of the base amount,
    /// defaulting to 14.
    pub fn service_fee_percentage(&self) -> Decimal {
        self.service_fee_percentage
            .unwrap_or_else(default_service_fee_percentage)
    }

    pub fn raw_cleaning_fee(&self) -> Option<Decimal> {
        self.cleaning_fee
    }

    pub fn raw_extra_guest_fee(&self) -> Option<Decimal> {
        self.extra_guest_fee
    }

    pub fn raw_service_fee_percentage(&self) -> Option<Decimal> {
        self.service_fee_percentage
    }
}

pub fn default_service_fee_percentage() -> Decimal {
    Decimal::from(14)
}
