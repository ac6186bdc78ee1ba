use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use kernel::prelude::entity::{
    Booking, BookingStatus, CancelledBy, DestructBooking, PaymentStatus,
};

#[derive(Debug, Clone)]
pub struct BookingDto {
    pub id: Uuid,
    pub property_id: Uuid,
    pub guest_id: Uuid,
    pub check_in_date: Date,
    pub check_out_date: Date,
    pub nights: i64,
    pub guests: i32,
    pub adults: i32,
    pub children: i32,
    pub infants: i32,
    pub pets: i32,
    pub base_amount: Decimal,
    pub cleaning_fee: Decimal,
    pub extra_guest_fee: Decimal,
    pub service_fee: Decimal,
    pub taxes: Decimal,
    pub total_amount: Decimal,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub payment_intent_id: Option<String>,
    pub special_requests: Option<String>,
    pub cancelled_by: Option<CancelledBy>,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<Booking> for BookingDto {
    fn from(value: Booking) -> Self {
        let DestructBooking {
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
        } = value.into_destruct();
        Self {
            id: id.into(),
            property_id: property_id.into(),
            guest_id: guest_id.into(),
            check_in_date: stay.check_in(),
            check_out_date: stay.check_out(),
            nights: stay.nights(),
            guests: guests.total(),
            adults: guests.adults(),
            children: guests.children(),
            infants: guests.infants(),
            pets: guests.pets(),
            base_amount: charge.base_amount(),
            cleaning_fee: charge.cleaning_fee(),
            extra_guest_fee: charge.extra_guest_fee(),
            service_fee: charge.service_fee(),
            taxes: charge.taxes(),
            total_amount: charge.total_amount(),
            status,
            payment_status,
            payment_intent_id: payment_intent_id.map(String::from),
            special_requests,
            cancelled_by: cancellation
                .as_ref()
                .map(|cancellation| *cancellation.cancelled_by()),
            cancellation_reason: cancellation
                .as_ref()
                .and_then(|cancellation| cancellation.reason().cloned()),
            cancelled_at: cancellation
                .as_ref()
                .map(|cancellation| *cancellation.cancelled_at()),
            created_at: created_at.into(),
            updated_at: updated_at.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateBookingDto {
    pub property_id: Uuid,
    pub guest_id: Uuid,
    pub check_in: Date,
    pub check_out: Date,
    pub guests: i32,
    pub adults: i32,
    pub children: i32,
    pub infants: i32,
    pub pets: i32,
    pub special_requests: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreatedBookingDto {
    pub booking: BookingDto,
    pub client_secret: String,
}

#[derive(Debug, Clone)]
pub struct CancelBookingDto {
    pub booking_id: Uuid,
    pub cancelled_by: CancelledBy,
    pub reason: Option<String>,
}

#[derive(Debug, Clone)]
pub enum BookingListScope {
    Guest(Uuid),
    Host(Uuid),
}

#[derive(Debug, Clone)]
pub struct CheckAvailabilityDto {
    pub property_id: Uuid,
    pub check_in: Date,
    pub check_out: Date,
}

#[derive(Debug, Clone)]
pub struct AvailabilityDto {
    pub available: bool,
}
