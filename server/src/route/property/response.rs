use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::{AvailabilityDto, PropertyDto, PropertyPageDto};

use crate::controller::Exhaust;
use crate::route::format_timestamp;

#[derive(Debug, Serialize)]
pub struct PropertyResponse {
    id: Uuid,
    host_id: Uuid,
    title: String,
    description: Option<String>,
    city: String,
    country: String,
    property_type: String,
    bedrooms: i32,
    bathrooms: i32,
    max_guests: i32,
    price_per_night: Decimal,
    cleaning_fee: Option<Decimal>,
    extra_guest_fee: Option<Decimal>,
    service_fee_percentage: Option<Decimal>,
    min_stay: Option<i64>,
    max_stay: Option<i64>,
    is_active: bool,
    is_featured: bool,
    average_rating: Decimal,
    review_count: i64,
    created_at: String,
    updated_at: String,
}

impl From<PropertyDto> for PropertyResponse {
    fn from(value: PropertyDto) -> Self {
        Self {
            id: value.id,
            host_id: value.host_id,
            title: value.title,
            description: value.description,
            city: value.city,
            country: value.country,
            property_type: value.property_type,
            bedrooms: value.bedrooms,
            bathrooms: value.bathrooms,
            max_guests: value.max_guests,
            price_per_night: value.price_per_night,
            cleaning_fee: value.cleaning_fee,
            extra_guest_fee: value.extra_guest_fee,
            service_fee_percentage: value.service_fee_percentage,
            min_stay: value.min_stay,
            max_stay: value.max_stay,
            is_active: value.is_active,
            is_featured: value.is_featured,
            average_rating: value.average_rating,
            review_count: value.review_count,
            created_at: format_timestamp(value.created_at),
            updated_at: format_timestamp(value.updated_at),
        }
    }
}

impl IntoResponse for PropertyResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    page: i64,
    limit: i64,
    total: i64,
    total_pages: i64,
}

#[derive(Debug, Serialize)]
pub struct PropertyPageResponse {
    properties: Vec<PropertyResponse>,
    pagination: Pagination,
}

impl IntoResponse for PropertyPageResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedPropertyResponse(PropertyResponse);

impl IntoResponse for CreatedPropertyResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    available: bool,
}

impl IntoResponse for AvailabilityResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

pub struct PagePresenter;

impl Exhaust<PropertyPageDto> for PagePresenter {
    type To = PropertyPageResponse;
    fn emit(&self, input: PropertyPageDto) -> Self::To {
        PropertyPageResponse {
            properties: input
                .properties
                .into_iter()
                .map(PropertyResponse::from)
                .collect(),
            pagination: Pagination {
                page: input.page,
                limit: input.limit,
                total: input.total,
                total_pages: input.total_pages,
            },
        }
    }
}

pub struct PropertyPresenter;

impl Exhaust<PropertyDto> for PropertyPresenter {
    type To = PropertyResponse;
    fn emit(&self, input: PropertyDto) -> Self::To {
        PropertyResponse::from(input)
    }
}

pub struct CreatedPresenter;

impl Exhaust<PropertyDto> for CreatedPresenter {
    type To = CreatedPropertyResponse;
    fn emit(&self, input: PropertyDto) -> Self::To {
        CreatedPropertyResponse(PropertyResponse::from(input))
    }
}

pub struct AvailabilityPresenter;

impl Exhaust<AvailabilityDto> for AvailabilityPresenter {
    type To = AvailabilityResponse;
    fn emit(&self, input: AvailabilityDto) -> Self::To {
        AvailabilityResponse {
            available: input.available,
        }
    }
}
