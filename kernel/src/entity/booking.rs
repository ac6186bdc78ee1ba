mod cancellation;
mod charge;
mod guests;
mod id;
mod intent;
mod status;
mod stay;

pub use self::{cancellation::*, charge::*, guests::*, id::*, intent::*, status::*, stay::*};

use destructure::Destructure;
use time::OffsetDateTime;

use crate::entity::common::{CreatedAt, UpdatedAt};
use crate::entity::property::PropertyId;
use crate::entity::user::UserId;

/// A reservation linking a guest, a property and a date range, carrying
/// payment and fulfillment status. Never deleted; retained as history.
#[derive(Debug, Clone, PartialEq, Destructure)]
pub struct Booking {
    id: BookingId,
    property_id: PropertyId,
    guest_id: UserId,
    stay: StayPeriod,
    guests: GuestBreakdown,
    charge: ChargeBreakdown,
    status: BookingStatus,
    payment_status: PaymentStatus,
    payment_intent_id: Option<PaymentIntentId>,
    special_requests: Option<String>,
    cancellation: Option<Cancellation>,
    created_at: CreatedAt<Booking>,
    updated_at: UpdatedAt<Booking>,
}

impl Booking {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BookingId,
        property_id: PropertyId,
        guest_id: UserId,
        stay: StayPeriod,
        guests: GuestBreakdown,
        charge: ChargeBreakdown,
        status: BookingStatus,
        payment_status: PaymentStatus,
        payment_intent_id: Option<PaymentIntentId>,
        special_requests: Option<String>,
        cancellation: Option<Cancellation>,
        created_at: CreatedAt<Booking>,
        updated_at: UpdatedAt<Booking>,
    ) -> Self {
        Self {
            id,
            property_id,
            guest_id,
            stay,
            guests,
            charge,
            status,
            payment_status,
            payment_intent_id,
            special_requests,
            cancellation,
            created_at,
            updated_at,
        }
    }

    /// A fresh reservation request: payment not yet captured.
    #[allow(clippy::too_many_arguments)]
    pub fn pending(
        id: BookingId,
        property_id: PropertyId,
        guest_id: UserId,
        stay: StayPeriod,
        guests: GuestBreakdown,
        charge: ChargeBreakdown,
        payment_intent_id: Option<PaymentIntentId>,
        special_requests: Option<String>,
        now: OffsetDateTime,
    ) -> Self {
        Self::new(
            id,
            property_id,
            guest_id,
            stay,
            guests,
            charge,
            BookingStatus::Pending,
            PaymentStatus::Pending,
            payment_intent_id,
            special_requests,
            None,
            CreatedAt::new(now),
            UpdatedAt::new(now),
        )
    }

    /// Payment captured: the reservation is confirmed.
    pub fn mark_paid(mut self, now: OffsetDateTime) -> Self {
        self.payment_status = PaymentStatus::Paid;
        self.status = BookingStatus::Confirmed;
        self.updated_at = UpdatedAt::new(now);
        self
    }

    /// Payment capture failed: the reservation is cancelled.
    pub fn mark_payment_failed(mut self, now: OffsetDateTime) -> Self {
        self.payment_status = PaymentStatus::Failed;
        self.status = BookingStatus::Cancelled;
        self.updated_at = UpdatedAt::new(now);
        self
    }

    /// Explicit cancellation by a guest or host. There is no guard on the
    /// prior status; repeated cancellation overwrites the metadata.
    pub fn cancel(mut self, cancellation: Cancellation, now: OffsetDateTime) -> Self {
        self.status = BookingStatus::Cancelled;
        self.cancellation = Some(cancellation);
        self.updated_at = UpdatedAt::new(now);
        self
    }

    pub fn id(&self) -> &BookingId {
        &self.id
    }

    pub fn property_id(&self) -> &PropertyId {
        &self.property_id
    }

    pub fn guest_id(&self) -> &UserId {
        &self.guest_id
    }

    pub fn stay(&self) -> &StayPeriod {
        &self.stay
    }

    pub fn guests(&self) -> &GuestBreakdown {
        &self.guests
    }

    pub fn charge(&self) -> &ChargeBreakdown {
        &self.charge
    }

    pub fn status(&self) -> &BookingStatus {
        &self.status
    }

    pub fn payment_status(&self) -> &PaymentStatus {
        &self.payment_status
    }

    pub fn payment_intent_id(&self) -> Option<&PaymentIntentId> {
        self.payment_intent_id.as_ref()
    }

    pub fn special_requests(&self) -> Option<&String> {
        self.special_requests.as_ref()
    }

    pub fn cancellation(&self) -> Option<&Cancellation> {
        self.cancellation.as_ref()
    }

    pub fn created_at(&self) -> &CreatedAt<Booking> {
        &self.created_at
    }

    pub fn updated_at(&self) -> &UpdatedAt<Booking> {
        &self.updated_at
    }
}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;
    use time::macros::{date, datetime};
    use uuid::Uuid;

    use super::*;

    fn booking() -> Booking {
        Booking::pending(
            BookingId::new(Uuid::new_v4()),
            PropertyId::new(Uuid::new_v4()),
            UserId::new(Uuid::new_v4()),
            StayPeriod::new(date!(2025 - 06 - 01), date!(2025 - 06 - 05)).unwrap(),
            GuestBreakdown::new(2, 2, 0, 0, 0).unwrap(),
            ChargeBreakdown::new(
                Decimal::from(400),
                Decimal::from(50),
                Decimal::ZERO,
                Decimal::from(56),
                Decimal::from(32),
                Decimal::from(538),
            ),
            Some(PaymentIntentId::new("pi_test")),
            None,
            datetime!(2025-05-01 12:00 UTC),
        )
    }

    #[test]
    fn starts_pending() {
        let booking = booking();
        assert_eq!(booking.status(), &BookingStatus::Pending);
        assert_eq!(booking.payment_status(), &PaymentStatus::Pending);
        assert!(booking.cancellation().is_none());
    }

    #[test]
    fn payment_capture_confirms() {
        let booking = booking().mark_paid(datetime!(2025-05-01 12:05 UTC));
        assert_eq!(booking.status(), &BookingStatus::Confirmed);
        assert_eq!(booking.payment_status(), &PaymentStatus::Paid);
    }

    #[test]
    fn payment_failure_cancels() {
        let booking = booking().mark_payment_failed(datetime!(2025-05-01 12:05 UTC));
        assert_eq!(booking.status(), &BookingStatus::Cancelled);
        assert_eq!(booking.payment_status(), &PaymentStatus::Failed);
    }

    #[test]
    fn cancellation_records_actor_and_reason() {
        let now = datetime!(2025-05-02 09:00 UTC);
        let booking = booking().cancel(
            Cancellation::new(CancelledBy::Guest, Some("plans changed".into()), now),
            now,
        );
        assert_eq!(booking.status(), &BookingStatus::Cancelled);
        let cancellation = booking.cancellation().unwrap();
        assert_eq!(cancellation.cancelled_by(), &CancelledBy::Guest);
        assert_eq!(cancellation.reason(), Some(&"plans changed".to_string()));
    }

    #[test]
    fn cancelling_twice_overwrites_metadata() {
        let first = datetime!(2025-05-02 09:00 UTC);
        let second = datetime!(2025-05-03 09:00 UTC);
        let booking = booking()
            .cancel(Cancellation::new(CancelledBy::Guest, None, first), first)
            .cancel(
                Cancellation::new(CancelledBy::Host, Some("maintenance".into()), second),
                second,
            );
        let cancellation = booking.cancellation().unwrap();
        assert_eq!(cancellation.cancelled_by(), &CancelledBy::Host);
        assert_eq!(cancellation.cancelled_at(), &second);
    }
}
