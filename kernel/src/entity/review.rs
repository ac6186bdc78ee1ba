mod id;
mod rating;

pub use self::{id::*, rating::*};

use destructure::Destructure;

use crate::entity::common::CreatedAt;
use crate::entity::property::PropertyId;
use crate::entity::user::UserId;

#[derive(Debug, Clone, Eq, PartialEq, Destructure)]
pub struct Review {
    id: ReviewId,
    property_id: PropertyId,
    reviewer_id: UserId,
    rating: Rating,
    comment: Option<String>,
    created_at: CreatedAt<Review>,
}

impl Review {
    pub fn new(
        id: ReviewId,
        property_id: PropertyId,
        reviewer_id: UserId,
        rating: Rating,
        comment: Option<String>,
        created_at: CreatedAt<Review>,
    ) -> Self {
        Self {
            id,
            property_id,
            reviewer_id,
            rating,
            comment,
            created_at,
        }
    }

    pub fn id(&self) -> &ReviewId {
        &self.id
    }

    pub fn property_id(&self) -> &PropertyId {
        &self.property_id
    }

    pub fn reviewer_id(&self) -> &UserId {
        &self.reviewer_id
    }

    pub fn rating(&self) -> &Rating {
        &self.rating
    }

    pub fn comment(&self) -> Option<&String> {
        self.comment.as_ref()
    }

    pub fn created_at(&self) -> &CreatedAt<Review> {
        &self.created_at
    }
}
