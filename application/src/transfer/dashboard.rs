use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kernel::prelude::entity::{BookingStatus, PaymentStatus};

/// Dashboard DTOs round-trip through the response cache as JSON, so they
/// derive serde in both directions. Dates are pre-formatted strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardDto {
    pub properties: Vec<PropertySummaryDto>,
    pub booking_stats: BookingStatsDto,
    pub recent_bookings: Vec<BookingSummaryDto>,
    pub review_stats: ReviewStatsDto,
    pub recent_reviews: Vec<ReviewSummaryDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySummaryDto {
    pub id: Uuid,
    pub title: String,
    pub property_type: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub max_guests: i32,
    pub price_per_night: Decimal,
    pub location: String,
    pub average_rating: Decimal,
    pub review_count: i64,
    pub status: String,
    pub is_featured: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingStatsDto {
    pub total: i64,
    pub pending: i64,
    pub confirmed: i64,
    pub cancelled: i64,
    pub completed: i64,
    pub total_earnings: Decimal,
    pub monthly_earnings: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSummaryDto {
    pub id: Uuid,
    pub property_id: Uuid,
    pub property_title: String,
    pub property_city: String,
    pub property_country: String,
    pub guest_id: Uuid,
    pub check_in_date: String,
    pub check_out_date: String,
    pub guests: i32,
    pub adults: i32,
    pub children: i32,
    pub nights: i64,
    pub total_amount: Decimal,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewStatsDto {
    pub total: i64,
    pub average_rating: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSummaryDto {
    pub id: Uuid,
    pub property_id: Uuid,
    pub property_title: String,
    pub reviewer_id: Uuid,
    pub overall_rating: i16,
    pub comment: Option<String>,
    pub created_at: String,
}
