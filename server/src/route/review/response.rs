use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::ReviewDto;

use crate::controller::Exhaust;
use crate::route::format_timestamp;

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    id: Uuid,
    property_id: Uuid,
    reviewer_id: Uuid,
    overall_rating: i16,
    comment: Option<String>,
    created_at: String,
}

impl From<ReviewDto> for ReviewResponse {
    fn from(value: ReviewDto) -> Self {
        Self {
            id: value.id,
            property_id: value.property_id,
            reviewer_id: value.reviewer_id,
            overall_rating: value.overall_rating,
            comment: value.comment,
            created_at: format_timestamp(value.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedReviewResponse(ReviewResponse);

impl IntoResponse for CreatedReviewResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewListResponse {
    reviews: Vec<ReviewResponse>,
}

impl IntoResponse for ReviewListResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

pub struct CreatedPresenter;

impl Exhaust<ReviewDto> for CreatedPresenter {
    type To = CreatedReviewResponse;
    fn emit(&self, input: ReviewDto) -> Self::To {
        CreatedReviewResponse(ReviewResponse::from(input))
    }
}

pub struct ListPresenter;

impl Exhaust<Vec<ReviewDto>> for ListPresenter {
    type To = ReviewListResponse;
    fn emit(&self, input: Vec<ReviewDto>) -> Self::To {
        ReviewListResponse {
            reviews: input.into_iter().map(ReviewResponse::from).collect(),
        }
    }
}
