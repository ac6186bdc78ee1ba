use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::{BookingDto, CreatedBookingDto};
use kernel::prelude::entity::{BookingStatus, CancelledBy, PaymentStatus};

use crate::controller::Exhaust;
use crate::route::{format_date, format_timestamp};

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    id: Uuid,
    property_id: Uuid,
    guest_id: Uuid,
    check_in_date: String,
    check_out_date: String,
    nights: i64,
    guests: i32,
    adults: i32,
    children: i32,
    infants: i32,
    pets: i32,
    base_amount: Decimal,
    cleaning_fee: Decimal,
    extra_guest_fee: Decimal,
    service_fee: Decimal,
    taxes: Decimal,
    total_amount: Decimal,
    status: BookingStatus,
    payment_status: PaymentStatus,
    special_requests: Option<String>,
    cancelled_by: Option<CancelledBy>,
    cancellation_reason: Option<String>,
    cancelled_at: Option<String>,
    created_at: String,
    updated_at: String,
}

impl From<BookingDto> for BookingResponse {
    fn from(value: BookingDto) -> Self {
        Self {
            id: value.id,
            property_id: value.property_id,
            guest_id: value.guest_id,
            check_in_date: format_date(value.check_in_date),
            check_out_date: format_date(value.check_out_date),
            nights: value.nights,
            guests: value.guests,
            adults: value.adults,
            children: value.children,
            infants: value.infants,
            pets: value.pets,
            base_amount: value.base_amount,
            cleaning_fee: value.cleaning_fee,
            extra_guest_fee: value.extra_guest_fee,
            service_fee: value.service_fee,
            taxes: value.taxes,
            total_amount: value.total_amount,
            status: value.status,
            payment_status: value.payment_status,
            special_requests: value.special_requests,
            cancelled_by: value.cancelled_by,
            cancellation_reason: value.cancellation_reason,
            cancelled_at: value.cancelled_at.map(format_timestamp),
            created_at: format_timestamp(value.created_at),
            updated_at: format_timestamp(value.updated_at),
        }
    }
}

impl IntoResponse for BookingResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedBookingResponse {
    booking: BookingResponse,
    client_secret: String,
}

impl IntoResponse for CreatedBookingResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct BookingListResponse {
    bookings: Vec<BookingResponse>,
}

impl IntoResponse for BookingListResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

pub struct BookingPresenter;

impl Exhaust<BookingDto> for BookingPresenter {
    type To = BookingResponse;
    fn emit(&self, input: BookingDto) -> Self::To {
        BookingResponse::from(input)
    }
}

pub struct CreatedPresenter;

impl Exhaust<CreatedBookingDto> for CreatedPresenter {
    type To = CreatedBookingResponse;
    fn emit(&self, input: CreatedBookingDto) -> Self::To {
        CreatedBookingResponse {
            booking: BookingResponse::from(input.booking),
            client_secret: input.client_secret,
        }
    }
}

pub struct ListPresenter;

impl Exhaust<Vec<BookingDto>> for ListPresenter {
    type To = BookingListResponse;
    fn emit(&self, input: Vec<BookingDto>) -> Self::To {
        BookingListResponse {
            bookings: input.into_iter().map(BookingResponse::from).collect(),
        }
    }
}
