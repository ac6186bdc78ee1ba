use error_stack::Report;
use rust_decimal::{Decimal, RoundingStrategy};
use time::Date;

use crate::entity::{ChargeBreakdown, FeeSchedule, MaxGuests, StayPeriod};
use crate::KernelError;

/// Lodging tax applied to the base amount. A marketplace-wide policy
/// constant, not configurable per property.
pub fn tax_rate() -> Decimal {
    // 8%
    Decimal::new(8, 2)
}

/// Number of guests included in the nightly rate before the extra-guest
/// fee applies.
pub const INCLUDED_GUESTS: i32 = 2;

/// Monetary breakdown for a prospective stay. Components are kept at full
/// precision; call [`Quote::rounded`] at the display/persistence edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub nights: i64,
    pub base_amount: Decimal,
    pub cleaning_fee: Decimal,
    pub extra_guest_fee: Decimal,
    pub service_fee: Decimal,
    pub taxes: Decimal,
    pub total_amount: Decimal,
}

impl Quote {
    /// Round every component to currency precision, half away from zero.
    pub fn rounded(&self) -> Self {
        let round = |value: Decimal| {
            value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        };
        Self {
            nights: self.nights,
            base_amount: round(self.base_amount),
            cleaning_fee: round(self.cleaning_fee),
            extra_guest_fee: round(self.extra_guest_fee),
            service_fee: round(self.service_fee),
            taxes: round(self.taxes),
            total_amount: round(self.total_amount),
        }
    }
}

impl From<Quote> for ChargeBreakdown {
    fn from(value: Quote) -> Self {
        let Quote {
            base_amount,
            cleaning_fee,
            extra_guest_fee,
            service_fee,
            taxes,
            total_amount,
            ..
        } = value.rounded();
        ChargeBreakdown::new(
            base_amount,
            cleaning_fee,
            extra_guest_fee,
            service_fee,
            taxes,
            total_amount,
        )
    }
}

/// Derive a quote for a stay. Capacity is checked before anything else;
/// the date range must cover at least one night.
pub fn compute_quote(
    fees: &FeeSchedule,
    max_guests: &MaxGuests,
    check_in: Date,
    check_out: Date,
    guests: i32,
) -> error_stack::Result<Quote, KernelError> {
    let max = *max_guests.as_ref();
    if guests > max {
        return Err(Report::new(KernelError::CapacityExceeded(max))
            .attach_printable(format!("requested {guests} guests")));
    }

    let stay = StayPeriod::new(check_in, check_out)?;
    let nights = stay.nights();

    let base_amount = Decimal::from(nights) * fees.nightly_rate();
    let cleaning_fee = fees.cleaning_fee();
    let extra_guest_fee = if guests > INCLUDED_GUESTS {
        Decimal::from(guests - INCLUDED_GUESTS) * fees.extra_guest_fee()
    } else {
        Decimal::ZERO
    };
    let service_fee = base_amount * fees.service_fee_percentage() / Decimal::from(100);
    let taxes = base_amount * tax_rate();
    let total_amount = base_amount + cleaning_fee + extra_guest_fee + service_fee + taxes;

    Ok(Quote {
        nights,
        base_amount,
        cleaning_fee,
        extra_guest_fee,
        service_fee,
        taxes,
        total_amount,
    })
}

/// Inclusive-boundary overlap between two date ranges: a conflict exists
/// when `a.check_in <= b.check_out && a.check_out >= b.check_in`. A
/// checkout-day handoff to a same-day check-in therefore conflicts.
pub fn ranges_overlap(a: &StayPeriod, b: &StayPeriod) -> bool {
    a.check_in() <= b.check_out() && a.check_out() >= b.check_in()
}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use time::macros::date;

    use super::*;
    use crate::entity::{FeeSchedule, MaxGuests, StayPeriod};
    use crate::KernelError;

    fn fees(
        nightly: Decimal,
        cleaning: Option<Decimal>,
        extra: Option<Decimal>,
        service_pct: Option<Decimal>,
    ) -> FeeSchedule {
        FeeSchedule::new(nightly, cleaning, extra, service_pct)
    }

    #[test]
    fn quote_is_the_sum_of_its_parts() {
        let fees = fees(dec!(100), Some(dec!(50)), Some(dec!(10)), Some(dec!(14)));
        let quote = compute_quote(
            &fees,
            &MaxGuests::new(6),
            date!(2025 - 06 - 01),
            date!(2025 - 06 - 05),
            2,
        )
        .unwrap();

        assert_eq!(quote.nights, 4);
        assert_eq!(quote.base_amount, dec!(400));
        assert_eq!(quote.cleaning_fee, dec!(50));
        assert_eq!(quote.extra_guest_fee, dec!(0));
        assert_eq!(quote.service_fee, dec!(56));
        assert_eq!(quote.taxes, dec!(32));
        assert_eq!(quote.total_amount, dec!(538));
        assert_eq!(
            quote.total_amount,
            quote.base_amount
                + quote.cleaning_fee
                + quote.extra_guest_fee
                + quote.service_fee
                + quote.taxes
        );
    }

    #[test]
    fn service_fee_and_taxes_derive_from_base_only() {
        let fees = fees(dec!(80), Some(dec!(40)), Some(dec!(25)), Some(dec!(10)));
        let quote = compute_quote(
            &fees,
            &MaxGuests::new(8),
            date!(2025 - 07 - 10),
            date!(2025 - 07 - 13),
            5,
        )
        .unwrap();

        let base = dec!(240);
        assert_eq!(quote.base_amount, base);
        assert_eq!(quote.service_fee, base * dec!(10) / dec!(100));
        assert_eq!(quote.taxes, base * dec!(0.08));
    }

    #[test]
    fn two_guests_pay_no_extra_guest_fee() {
        let fees = fees(dec!(100), None, Some(dec!(10)), None);
        let quote = compute_quote(
            &fees,
            &MaxGuests::new(4),
            date!(2025 - 06 - 01),
            date!(2025 - 06 - 03),
            2,
        )
        .unwrap();
        assert_eq!(quote.extra_guest_fee, dec!(0));
    }

    #[test]
    fn five_guests_pay_three_extra_guest_fees() {
        let fees = fees(dec!(100), None, Some(dec!(10)), None);
        let quote = compute_quote(
            &fees,
            &MaxGuests::new(6),
            date!(2025 - 06 - 01),
            date!(2025 - 06 - 03),
            5,
        )
        .unwrap();
        assert_eq!(quote.extra_guest_fee, dec!(30));
    }

    #[test]
    fn absent_fee_fields_default() {
        let fees = fees(dec!(100), None, None, None);
        let quote = compute_quote(
            &fees,
            &MaxGuests::new(6),
            date!(2025 - 06 - 01),
            date!(2025 - 06 - 03),
            5,
        )
        .unwrap();
        assert_eq!(quote.cleaning_fee, dec!(0));
        assert_eq!(quote.extra_guest_fee, dec!(0));
        // 14% default service fee on a 200 base
        assert_eq!(quote.service_fee, dec!(28));
    }

    #[test]
    fn same_day_checkout_is_an_invalid_range() {
        let fees = fees(dec!(100), None, None, None);
        let report = compute_quote(
            &fees,
            &MaxGuests::new(2),
            date!(2025 - 06 - 01),
            date!(2025 - 06 - 01),
            2,
        )
        .unwrap_err();
        assert!(matches!(
            report.current_context(),
            KernelError::InvalidDateRange
        ));
    }

    #[test]
    fn over_capacity_fails_before_date_validation() {
        let fees = fees(dec!(100), None, None, None);
        // Date range is also invalid; capacity must win.
        let report = compute_quote(
            &fees,
            &MaxGuests::new(4),
            date!(2025 - 06 - 01),
            date!(2025 - 06 - 01),
            5,
        )
        .unwrap_err();
        assert!(matches!(
            report.current_context(),
            KernelError::CapacityExceeded(4)
        ));
    }

    #[test]
    fn quote_is_deterministic() {
        let fees = fees(dec!(123.45), Some(dec!(67.89)), Some(dec!(9.99)), Some(dec!(12)));
        let run = || {
            compute_quote(
                &fees,
                &MaxGuests::new(8),
                date!(2025 - 09 - 01),
                date!(2025 - 09 - 11),
                7,
            )
            .unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn rounding_happens_only_at_the_edge() {
        // 3 nights at 33.33 with 14% service fee: raw service fee is
        // 13.9986, which must survive unrounded in the quote.
        let fees = fees(dec!(33.33), None, None, None);
        let quote = compute_quote(
            &fees,
            &MaxGuests::new(2),
            date!(2025 - 06 - 01),
            date!(2025 - 06 - 04),
            2,
        )
        .unwrap();
        assert_eq!(quote.service_fee, dec!(13.9986));
        assert_eq!(quote.rounded().service_fee, dec!(14.00));
    }

    fn stay(check_in: Date, check_out: Date) -> StayPeriod {
        StayPeriod::new(check_in, check_out).unwrap()
    }

    #[test]
    fn overlapping_ranges_conflict() {
        let existing = stay(date!(2025 - 06 - 01), date!(2025 - 06 - 05));
        let requested = stay(date!(2025 - 06 - 04), date!(2025 - 06 - 08));
        assert!(ranges_overlap(&existing, &requested));
    }

    #[test]
    fn same_day_turnover_conflicts_under_the_inclusive_rule() {
        let existing = stay(date!(2025 - 06 - 01), date!(2025 - 06 - 05));
        let requested = stay(date!(2025 - 06 - 05), date!(2025 - 06 - 09));
        assert!(ranges_overlap(&existing, &requested));
        assert!(ranges_overlap(&requested, &existing));
    }

    #[test]
    fn disjoint_ranges_do_not_conflict() {
        let existing = stay(date!(2025 - 06 - 01), date!(2025 - 06 - 05));
        let requested = stay(date!(2025 - 06 - 06), date!(2025 - 06 - 09));
        assert!(!ranges_overlap(&existing, &requested));
        assert!(!ranges_overlap(&requested, &existing));
    }

    #[test]
    fn contained_range_conflicts() {
        let existing = stay(date!(2025 - 06 - 01), date!(2025 - 06 - 10));
        let requested = stay(date!(2025 - 06 - 03), date!(2025 - 06 - 04));
        assert!(ranges_overlap(&existing, &requested));
    }
}
