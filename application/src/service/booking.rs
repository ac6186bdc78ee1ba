use error_stack::Report;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::payment::{DependOnPaymentGateway, IntentMetadata, PaymentGateway};
use kernel::interface::query::{
    BookingQuery, DependOnBookingQuery, DependOnPropertyQuery, PropertyQuery,
};
use kernel::interface::update::{BookingModifier, DependOnBookingModifier};
use kernel::prelude::entity::{
    Booking, BookingId, Cancellation, ChargeBreakdown, GuestBreakdown, PropertyId, SelectLimit,
    StayPeriod, UserId,
};
use kernel::prelude::pricing::{compute_quote, ranges_overlap};
use kernel::KernelError;

use crate::transfer::{
    AvailabilityDto, BookingDto, BookingListScope, CancelBookingDto, CheckAvailabilityDto,
    CreateBookingDto, CreatedBookingDto,
};

/// Upper bound on a host's booking listing.
const HOST_LIST_LIMIT: i64 = 100;

#[async_trait::async_trait]
pub trait ReserveBookingService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnPropertyQuery<Connection>
    + DependOnBookingModifier<Connection>
    + DependOnPaymentGateway
{
    /// Validate, quote, open a payment intent, then reserve atomically.
    /// The reserve step re-checks availability inside one transaction and
    /// either persists the pending booking or fails with
    /// `PropertyUnavailable`.
    async fn reserve_booking(
        &self,
        dto: CreateBookingDto,
    ) -> error_stack::Result<CreatedBookingDto, KernelError> {
        let guests = GuestBreakdown::new(dto.guests, dto.adults, dto.children, dto.infants, dto.pets)?;

        let mut con = self.database_connection().transact().await?;
        let property = self
            .property_query()
            .find_active_by_id(&mut con, &PropertyId::new(dto.property_id))
            .await?
            .ok_or_else(|| Report::new(KernelError::NotFound("Property")))?;

        let quote = compute_quote(
            property.fees(),
            property.max_guests(),
            dto.check_in,
            dto.check_out,
            guests.total(),
        )?;
        if let Some(min_stay) = property.min_stay() {
            if quote.nights < min_stay {
                return Err(Report::new(KernelError::validation(format!(
                    "Minimum stay is {min_stay} nights"
                ))));
            }
        }
        if let Some(max_stay) = property.max_stay() {
            if quote.nights > max_stay {
                return Err(Report::new(KernelError::validation(format!(
                    "Maximum stay is {max_stay} nights"
                ))));
            }
        }

        let stay = StayPeriod::new(dto.check_in, dto.check_out)?;
        let booking_id = BookingId::new(Uuid::new_v4());
        let metadata = IntentMetadata {
            booking_id: booking_id.clone(),
            property_id: property.id().clone(),
            guest_id: UserId::new(dto.guest_id),
        };
        let intent = self
            .payment_gateway()
            .create_intent(quote.rounded().total_amount, &metadata)
            .await?;

        let booking = Booking::pending(
            booking_id,
            property.id().clone(),
            UserId::new(dto.guest_id),
            stay,
            guests,
            ChargeBreakdown::from(quote),
            Some(intent.id.clone()),
            dto.special_requests,
            OffsetDateTime::now_utc(),
        );
        self.booking_modifier().reserve(&mut con, &booking).await?;

        Ok(CreatedBookingDto {
            booking: BookingDto::from(booking),
            client_secret: intent.client_secret,
        })
    }
}

impl<Connection: 'static + Send, T> ReserveBookingService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnPropertyQuery<Connection>
        + DependOnBookingModifier<Connection>
        + DependOnPaymentGateway
{
}

#[async_trait::async_trait]
pub trait CheckAvailabilityService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnPropertyQuery<Connection>
    + DependOnBookingQuery<Connection>
{
    /// Fetch the inventory-holding bookings for the property and fold
    /// them through the inclusive-boundary overlap test.
    async fn check_availability(
        &self,
        dto: CheckAvailabilityDto,
    ) -> error_stack::Result<AvailabilityDto, KernelError> {
        let requested = StayPeriod::new(dto.check_in, dto.check_out)?;

        let mut con = self.database_connection().transact().await?;
        let property_id = PropertyId::new(dto.property_id);
        self.property_query()
            .find_active_by_id(&mut con, &property_id)
            .await?
            .ok_or_else(|| Report::new(KernelError::NotFound("Property")))?;

        let existing = self
            .booking_query()
            .find_blocking_by_property(&mut con, &property_id)
            .await?;
        let conflict = existing
            .iter()
            .any(|booking| ranges_overlap(booking.stay(), &requested));
        Ok(AvailabilityDto {
            available: !conflict,
        })
    }
}

impl<Connection: 'static + Send, T> CheckAvailabilityService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnPropertyQuery<Connection>
        + DependOnBookingQuery<Connection>
{
}

#[async_trait::async_trait]
pub trait GetBookingService<Connection: 'static + Send>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection> + DependOnBookingQuery<Connection>
{
    async fn list_bookings(
        &self,
        scope: BookingListScope,
    ) -> error_stack::Result<Vec<BookingDto>, KernelError> {
        let mut con = self.database_connection().transact().await?;
        let bookings = match scope {
            BookingListScope::Guest(guest_id) => {
                self.booking_query()
                    .find_by_guest_id(&mut con, &UserId::new(guest_id))
                    .await?
            }
            BookingListScope::Host(host_id) => {
                self.booking_query()
                    .find_by_host_id(
                        &mut con,
                        &UserId::new(host_id),
                        SelectLimit::new(HOST_LIST_LIMIT),
                    )
                    .await?
            }
        };
        Ok(bookings.into_iter().map(BookingDto::from).collect())
    }
}

impl<Connection: 'static + Send, T> GetBookingService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnBookingQuery<Connection>
{
}

#[async_trait::async_trait]
pub trait CancelBookingService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookingQuery<Connection>
    + DependOnBookingModifier<Connection>
{
    /// Stamp cancellation metadata and persist. There is deliberately no
    /// guard on the prior status.
    async fn cancel_booking(
        &self,
        dto: CancelBookingDto,
    ) -> error_stack::Result<BookingDto, KernelError> {
        let mut con = self.database_connection().transact().await?;
        let booking = self
            .booking_query()
            .find_by_id(&mut con, &BookingId::new(dto.booking_id))
            .await?
            .ok_or_else(|| Report::new(KernelError::NotFound("Booking")))?;

        let now = OffsetDateTime::now_utc();
        let cancelled = booking.cancel(Cancellation::new(dto.cancelled_by, dto.reason, now), now);
        self.booking_modifier().update(&mut con, &cancelled).await?;
        Ok(BookingDto::from(cancelled))
    }
}

impl<Connection: 'static + Send, T> CancelBookingService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBookingQuery<Connection>
        + DependOnBookingModifier<Connection>
{
}
