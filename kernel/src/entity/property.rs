mod capacity;
mod fees;
mod id;
mod title;

pub use self::{capacity::*, fees::*, id::*, title::*};

use destructure::Destructure;
use rust_decimal::Decimal;

use crate::entity::common::{CreatedAt, UpdatedAt};
use crate::entity::user::UserId;

#[derive(Debug, Clone, PartialEq, Destructure)]
pub struct Property {
    id: PropertyId,
    host_id: UserId,
    title: PropertyTitle,
    description: Option<String>,
    city: String,
    country: String,
    property_type: String,
    bedrooms: i32,
    bathrooms: i32,
    max_guests: MaxGuests,
    fees: FeeSchedule,
    min_stay: Option<i64>,
    max_stay: Option<i64>,
    is_active: bool,
    is_featured: bool,
    average_rating: Decimal,
    review_count: i64,
    created_at: CreatedAt<Property>,
    updated_at: UpdatedAt<Property>,
}

impl Property {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: PropertyId,
        host_id: UserId,
        title: PropertyTitle,
        description: Option<String>,
        city: String,
        country: String,
        property_type: String,
        bedrooms: i32,
        bathrooms: i32,
        max_guests: MaxGuests,
        fees: FeeSchedule,
        min_stay: Option<i64>,
        max_stay: Option<i64>,
        is_active: bool,
        is_featured: bool,
        average_rating: Decimal,
        review_count: i64,
        created_at: CreatedAt<Property>,
        updated_at: UpdatedAt<Property>,
    ) -> Self {
        Self {
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
        }
    }

    pub fn id(&self) -> &PropertyId {
        &self.id
    }

    pub fn host_id(&self) -> &UserId {
        &self.host_id
    }

    pub fn title(&self) -> &PropertyTitle {
        &self.title
    }

    pub fn description(&self) -> Option<&String> {
        self.description.as_ref()
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn property_type(&self) -> &str {
        &self.property_type
    }

    pub fn bedrooms(&self) -> i32 {
        self.bedrooms
    }

    pub fn bathrooms(&self) -> i32 {
        self.bathrooms
    }

    pub fn max_guests(&self) -> &MaxGuests {
        &self.max_guests
    }

    pub fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    pub fn min_stay(&self) -> Option<i64> {
        self.min_stay
    }

    pub fn max_stay(&self) -> Option<i64> {
        self.max_stay
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_featured(&self) -> bool {
        self.is_featured
    }

    pub fn average_rating(&self) -> Decimal {
        self.average_rating
    }

    pub fn review_count(&self) -> i64 {
        self.review_count
    }

    pub fn created_at(&self) -> &CreatedAt<Property> {
        &self.created_at
    }

    pub fn updated_at(&self) -> &UpdatedAt<Property> {
        &self.updated_at
    }
}
