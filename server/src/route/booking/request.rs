use std::str::FromStr;

use error_stack::Report;
use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{BookingListScope, CancelBookingDto, CreateBookingDto};
use kernel::prelude::entity::CancelledBy;
use kernel::KernelError;

use crate::controller::TryIntake;
use crate::route::parse_date;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    property_id: Uuid,
    guest_id: Uuid,
    check_in_date: String,
    check_out_date: String,
    guests: i32,
    adults: Option<i32>,
    #[serde(default)]
    children: i32,
    #[serde(default)]
    infants: i32,
    #[serde(default)]
    pets: i32,
    special_requests: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListRequest {
    guest_id: Option<Uuid>,
    host_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CancelRequest {
    cancelled_by: String,
    cancellation_reason: Option<String>,
}

pub struct Transformer;

impl TryIntake<CreateRequest> for Transformer {
    type To = CreateBookingDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: CreateRequest) -> Result<Self::To, Self::Error> {
        Ok(CreateBookingDto {
            property_id: input.property_id,
            guest_id: input.guest_id,
            check_in: parse_date(&input.check_in_date)?,
            check_out: parse_date(&input.check_out_date)?,
            guests: input.guests,
            // Absent adults means everyone is an adult.
            adults: input.adults.unwrap_or(input.guests),
            children: input.children,
            infants: input.infants,
            pets: input.pets,
            special_requests: input.special_requests,
        })
    }
}

impl TryIntake<ListRequest> for Transformer {
    type To = BookingListScope;
    type Error = Report<KernelError>;
    fn emit(&self, input: ListRequest) -> Result<Self::To, Self::Error> {
        match (input.guest_id, input.host_id) {
            (Some(guest_id), _) => Ok(BookingListScope::Guest(guest_id)),
            (None, Some(host_id)) => Ok(BookingListScope::Host(host_id)),
            (None, None) => Err(Report::new(KernelError::validation(
                "User ID or Host ID is required",
            ))),
        }
    }
}

impl TryIntake<(Uuid, CancelRequest)> for Transformer {
    type To = CancelBookingDto;
    type Error = Report<KernelError>;
    fn emit(&self, (id, input): (Uuid, CancelRequest)) -> Result<Self::To, Self::Error> {
        let cancelled_by = CancelledBy::from_str(&input.cancelled_by)
            .map_err(|error| Report::new(KernelError::validation(error)))?;
        Ok(CancelBookingDto {
            booking_id: id,
            cancelled_by,
            reason: input.cancellation_reason,
        })
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::KernelError;

    use super::{CreateRequest, ListRequest, Transformer};
    use crate::controller::TryIntake;

    fn create_request(check_in: &str, check_out: &str) -> CreateRequest {
        CreateRequest {
            property_id: Uuid::new_v4(),
            guest_id: Uuid::new_v4(),
            check_in_date: check_in.to_string(),
            check_out_date: check_out.to_string(),
            guests: 3,
            adults: None,
            children: 0,
            infants: 0,
            pets: 0,
            special_requests: None,
        }
    }

    #[test]
    fn absent_adults_default_to_the_guest_count() {
        let dto = Transformer
            .emit(create_request("2025-06-01", "2025-06-05"))
            .unwrap();
        assert_eq!(dto.adults, 3);
    }

    #[test]
    fn malformed_dates_fail_validation() {
        let report = Transformer
            .emit(create_request("June 1st", "2025-06-05"))
            .unwrap_err();
        assert!(matches!(
            report.current_context(),
            KernelError::Validation(_)
        ));
    }

    #[test]
    fn listing_requires_a_guest_or_host() {
        let report = TryIntake::<ListRequest>::emit(
            &Transformer,
            ListRequest {
                guest_id: None,
                host_id: None,
            },
        )
        .unwrap_err();
        assert!(matches!(
            report.current_context(),
            KernelError::Validation(_)
        ));
    }
}
