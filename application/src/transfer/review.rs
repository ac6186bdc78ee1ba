use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{DestructReview, Review};

#[derive(Debug, Clone)]
pub struct ReviewDto {
    pub id: Uuid,
    pub property_id: Uuid,
    pub reviewer_id: Uuid,
    pub overall_rating: i16,
    pub comment: Option<String>,
    pub created_at: OffsetDateTime,
}

impl From<Review> for ReviewDto {
    fn from(value: Review) -> Self {
        let DestructReview {
            id,
            property_id,
            reviewer_id,
            rating,
            comment,
            created_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            property_id: property_id.into(),
            reviewer_id: reviewer_id.into(),
            overall_rating: rating.into(),
            comment,
            created_at: created_at.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateReviewDto {
    pub property_id: Uuid,
    pub reviewer_id: Uuid,
    pub overall_rating: i16,
    pub comment: Option<String>,
}
