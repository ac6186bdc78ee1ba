use serde::Deserialize;
use uuid::Uuid;

use application::transfer::CreateReviewDto;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct ListRequest {
    property_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    property_id: Uuid,
    reviewer_id: Uuid,
    overall_rating: i16,
    comment: Option<String>,
}

pub struct Transformer;

impl Intake<ListRequest> for Transformer {
    type To = Uuid;
    fn emit(&self, input: ListRequest) -> Self::To {
        input.property_id
    }
}

impl Intake<CreateRequest> for Transformer {
    type To = CreateReviewDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateReviewDto {
            property_id: input.property_id,
            reviewer_id: input.reviewer_id,
            overall_rating: input.overall_rating,
            comment: input.comment,
        }
    }
}
