mod booking;
mod dashboard;
mod property;
mod review;
mod webhook;

pub use self::{booking::*, dashboard::*, property::*, review::*, webhook::*};

use error_stack::ResultExt;
use time::format_description::well_known::Rfc3339;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use kernel::KernelError;

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar dates cross the wire as `YYYY-MM-DD`.
pub(crate) fn parse_date(value: &str) -> error_stack::Result<Date, KernelError> {
    Date::parse(value, DATE_FORMAT)
        .change_context_lazy(|| KernelError::validation(format!("Invalid date: {value}")))
}

pub(crate) fn format_date(value: Date) -> String {
    value
        .format(DATE_FORMAT)
        .unwrap_or_else(|_| value.to_string())
}

pub(crate) fn format_timestamp(value: OffsetDateTime) -> String {
    value.format(&Rfc3339).unwrap_or_default()
}

#[cfg(test)]
mod test {
    use time::macros::date;

    use kernel::KernelError;

    use super::{format_date, parse_date};

    #[test]
    fn dates_cross_the_wire_as_iso_calendar_days() {
        assert_eq!(parse_date("2025-06-01").unwrap(), date!(2025 - 06 - 01));
        assert_eq!(format_date(date!(2025 - 06 - 01)), "2025-06-01");
    }

    #[test]
    fn malformed_dates_are_validation_failures() {
        let report = parse_date("06/01/2025").unwrap_err();
        assert!(matches!(
            report.current_context(),
            KernelError::Validation(_)
        ));
    }
}
