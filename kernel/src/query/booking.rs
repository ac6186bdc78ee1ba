use crate::entity::{Booking, BookingId, PaymentIntentId, PropertyId, SelectLimit, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookingQuery<Connection>: 'static + Sync + Send {
    async fn find_by_id(
        &self,
        con: &mut Connection,
        id: &BookingId,
    ) -> error_stack::Result<Option<Booking>, KernelError>;

    async fn find_by_payment_intent(
        &self,
        con: &mut Connection,
        intent: &PaymentIntentId,
    ) -> error_stack::Result<Option<Booking>, KernelError>;

    /// Bookings for a property whose status still holds inventory
    /// (pending or confirmed).
    async fn find_blocking_by_property(
        &self,
        con: &mut Connection,
        property_id: &PropertyId,
    ) -> error_stack::Result<Vec<Booking>, KernelError>;

    async fn find_by_guest_id(
        &self,
        con: &mut Connection,
        guest_id: &UserId,
    ) -> error_stack::Result<Vec<Booking>, KernelError>;

    /// Bookings across every property owned by the host, newest first.
    async fn find_by_host_id(
        &self,
        con: &mut Connection,
        host_id: &UserId,
        limit: SelectLimit,
    ) -> error_stack::Result<Vec<Booking>, KernelError>;
}

pub trait DependOnBookingQuery<Connection>: 'static + Sync + Send {
    type BookingQuery: BookingQuery<Connection>;
    fn booking_query(&self) -> &Self::BookingQuery;
}
