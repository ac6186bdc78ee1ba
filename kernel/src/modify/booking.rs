use crate::entity::Booking;
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookingModifier<Connection>: 'static + Sync + Send {
    /// Atomic reserve-if-available: the availability re-check and the
    /// insert happen in one storage-side transaction. Fails with
    /// `PropertyUnavailable` when the stay overlaps a pending or
    /// confirmed booking, and never inserts in that case.
    async fn reserve(
        &self,
        con: &mut Connection,
        booking: &Booking,
    ) -> error_stack::Result<(), KernelError>;

    /// Persist the current state of an existing booking (status, payment
    /// status, cancellation metadata, updated-at).
    async fn update(
        &self,
        con: &mut Connection,
        booking: &Booking,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnBookingModifier<Connection>: 'static + Sync + Send {
    type BookingModifier: BookingModifier<Connection>;
    fn booking_modifier(&self) -> &Self::BookingModifier;
}
