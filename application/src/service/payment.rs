use time::OffsetDateTime;
use tracing::warn;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::payment::PaymentEvent;
use kernel::interface::query::{BookingQuery, DependOnBookingQuery};
use kernel::interface::update::{BookingModifier, DependOnBookingModifier};
use kernel::KernelError;

#[async_trait::async_trait]
pub trait PaymentEventService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookingQuery<Connection>
    + DependOnBookingModifier<Connection>
{
    /// Apply an authenticated payment outcome to the booking referenced
    /// by its intent id. A missing booking is logged and acknowledged,
    /// matching the processor's at-least-once delivery expectations.
    async fn apply_payment_event(
        &self,
        event: PaymentEvent,
    ) -> error_stack::Result<(), KernelError> {
        let (intent, succeeded) = match event {
            PaymentEvent::Succeeded { intent } => (intent, true),
            PaymentEvent::Failed { intent } => (intent, false),
            PaymentEvent::Ignored => return Ok(()),
        };

        let mut con = self.database_connection().transact().await?;
        let Some(booking) = self
            .booking_query()
            .find_by_payment_intent(&mut con, &intent)
            .await?
        else {
            warn!("no booking for payment intent {}", intent.as_ref());
            return Ok(());
        };

        let now = OffsetDateTime::now_utc();
        let updated = if succeeded {
            booking.mark_paid(now)
        } else {
            booking.mark_payment_failed(now)
        };
        self.booking_modifier().update(&mut con, &updated).await
    }
}

impl<Connection: 'static + Send, T> PaymentEventService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBookingQuery<Connection>
        + DependOnBookingModifier<Connection>
{
}

#[cfg(test)]
mod test {
    use time::macros::date;

    use kernel::interface::payment::PaymentEvent;
    use kernel::prelude::entity::{BookingStatus, PaymentIntentId, PaymentStatus};

    use crate::service::mock::MockApp;
    use crate::service::{PaymentEventService, ReserveBookingService};
    use crate::transfer::CreateBookingDto;

    async fn pending_booking(app: &MockApp) -> (uuid::Uuid, PaymentIntentId) {
        let created = app
            .reserve_booking(CreateBookingDto {
                property_id: app.property_id,
                guest_id: uuid::Uuid::new_v4(),
                check_in: date!(2025 - 06 - 01),
                check_out: date!(2025 - 06 - 05),
                guests: 2,
                adults: 2,
                children: 0,
                infants: 0,
                pets: 0,
                special_requests: None,
            })
            .await
            .unwrap();
        let intent = PaymentIntentId::new(created.booking.payment_intent_id.clone().unwrap());
        (created.booking.id, intent)
    }

    #[tokio::test]
    async fn successful_payment_confirms_the_booking() {
        let app = MockApp::with_property();
        let (id, intent) = pending_booking(&app).await;

        app.apply_payment_event(PaymentEvent::Succeeded { intent })
            .await
            .unwrap();

        let booking = app.bookings.get(&id).unwrap();
        assert_eq!(booking.status(), &BookingStatus::Confirmed);
        assert_eq!(booking.payment_status(), &PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn failed_payment_cancels_the_booking() {
        let app = MockApp::with_property();
        let (id, intent) = pending_booking(&app).await;

        app.apply_payment_event(PaymentEvent::Failed { intent })
            .await
            .unwrap();

        let booking = app.bookings.get(&id).unwrap();
        assert_eq!(booking.status(), &BookingStatus::Cancelled);
        assert_eq!(booking.payment_status(), &PaymentStatus::Failed);
    }

    #[tokio::test]
    async fn unknown_intent_is_acknowledged_without_changes() {
        let app = MockApp::with_property();
        let (id, _) = pending_booking(&app).await;

        app.apply_payment_event(PaymentEvent::Succeeded {
            intent: PaymentIntentId::new("pi_unknown"),
        })
        .await
        .unwrap();

        let booking = app.bookings.get(&id).unwrap();
        assert_eq!(booking.status(), &BookingStatus::Pending);
    }

    #[tokio::test]
    async fn ignored_events_are_no_ops() {
        let app = MockApp::with_property();
        let (id, _) = pending_booking(&app).await;

        app.apply_payment_event(PaymentEvent::Ignored).await.unwrap();

        let booking = app.bookings.get(&id).unwrap();
        assert_eq!(booking.status(), &BookingStatus::Pending);
    }
}
