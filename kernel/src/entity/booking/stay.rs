use error_stack::Report;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::KernelError;

/// A requested date range. Check-out must be strictly after check-in;
/// nights is the whole-day difference.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct StayPeriod {
    check_in: Date,
    check_out: Date,
    nights: i64,
}

impl StayPeriod {
    pub fn new(check_in: Date, check_out: Date) -> error_stack::Result<Self, KernelError> {
        let nights = (check_out - check_in).whole_days();
        if nights <= 0 {
            return Err(Report::new(KernelError::InvalidDateRange)
                .attach_printable(format!("check_in={check_in}, check_out={check_out}")));
        }
        Ok(Self {
            check_in,
            check_out,
            nights,
        })
    }

    pub fn check_in(&self) -> Date {
        self.check_in
    }

    pub fn check_out(&self) -> Date {
        self.check_out
    }

    pub fn nights(&self) -> i64 {
        self.nights
    }
}

#[cfg(test)]
mod test {
    use time::macros::date;

    use super::*;
    use crate::KernelError;

    #[test]
    fn counts_nights() {
        let stay = StayPeriod::new(date!(2025 - 06 - 01), date!(2025 - 06 - 05)).unwrap();
        assert_eq!(stay.nights(), 4);
    }

    #[test]
    fn zero_night_stay_is_rejected() {
        let report = StayPeriod::new(date!(2025 - 06 - 01), date!(2025 - 06 - 01)).unwrap_err();
        assert!(matches!(
            report.current_context(),
            KernelError::InvalidDateRange
        ));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let report = StayPeriod::new(date!(2025 - 06 - 05), date!(2025 - 06 - 01)).unwrap_err();
        assert!(matches!(
            report.current_context(),
            KernelError::InvalidDateRange
        ));
    }
}
