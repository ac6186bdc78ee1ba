use rust_decimal::Decimal;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::PropertyFilter;
use kernel::prelude::entity::{DestructProperty, Property, SelectLimit};

#[derive(Debug, Clone)]
pub struct PropertyDto {
    pub id: Uuid,
    pub host_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub city: String,
    pub country: String,
    pub property_type: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub max_guests: i32,
    pub price_per_night: Decimal,
    pub cleaning_fee: Option<Decimal>,
    pub extra_guest_fee: Option<Decimal>,
    pub service_fee_percentage: Option<Decimal>,
    pub min_stay: Option<i64>,
    pub max_stay: Option<i64>,
    pub is_active: bool,
    pub is_featured: bool,
    pub average_rating: Decimal,
    pub review_count: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<Property> for PropertyDto {
    fn from(value: Property) -> Self {
        let DestructProperty {
            id,
            host_id,
            title,
            description,
            city,
            country,
            property_type,
            bedrooms,
            bathrooms,
            max_guests,
            fees,
            min_stay,
            max_stay,
            is_active,
            is_featured,
            average_rating,
            review_count,
            created_at,
            updated_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            host_id: host_id.into(),
            title: title.into(),
            description,
            city,
            country,
            property_type,
            bedrooms,
            bathrooms,
            max_guests: max_guests.into(),
            price_per_night: fees.nightly_rate(),
            cleaning_fee: fees.raw_cleaning_fee(),
            extra_guest_fee: fees.raw_extra_guest_fee(),
            service_fee_percentage: fees.raw_service_fee_percentage(),
            min_stay,
            max_stay,
            is_active,
            is_featured,
            average_rating,
            review_count,
            created_at: created_at.into(),
            updated_at: updated_at.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreatePropertyDto {
    pub host_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub city: String,
    pub country: String,
    pub property_type: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub max_guests: i32,
    pub price_per_night: Decimal,
    pub cleaning_fee: Option<Decimal>,
    pub extra_guest_fee: Option<Decimal>,
    pub service_fee_percentage: Option<Decimal>,
    pub min_stay: Option<i64>,
    pub max_stay: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct SearchPropertiesDto {
    pub filter: PropertyFilter,
    pub page: i64,
    pub limit: SelectLimit,
}

#[derive(Debug, Clone)]
pub struct PropertyPageDto {
    pub properties: Vec<PropertyDto>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}
