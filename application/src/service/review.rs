use error_stack::Report;
use rust_decimal::{Decimal, RoundingStrategy};
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{
    DependOnPropertyQuery, DependOnReviewQuery, PropertyQuery, ReviewQuery,
};
use kernel::interface::update::{
    DependOnPropertyModifier, DependOnReviewModifier, PropertyModifier, ReviewModifier,
};
use kernel::prelude::entity::{CreatedAt, PropertyId, Rating, Review, ReviewId, UserId};
use kernel::KernelError;

use crate::transfer::{CreateReviewDto, ReviewDto};

/// Mean of all ratings, rounded to 2 dp for persistence, plus the count.
/// Read-all-then-recompute, not incremental.
pub fn aggregate_ratings(ratings: &[i16]) -> (Decimal, i64) {
    if ratings.is_empty() {
        return (Decimal::ZERO, 0);
    }
    let sum: i64 = ratings.iter().map(|rating| i64::from(*rating)).sum();
    let count = ratings.len() as i64;
    let average = (Decimal::from(sum) / Decimal::from(count))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    (average, count)
}

#[async_trait::async_trait]
pub trait SubmitReviewService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnPropertyQuery<Connection>
    + DependOnPropertyModifier<Connection>
    + DependOnReviewQuery<Connection>
    + DependOnReviewModifier<Connection>
{
    async fn submit_review(
        &self,
        dto: CreateReviewDto,
    ) -> error_stack::Result<ReviewDto, KernelError> {
        let rating = Rating::try_new(dto.overall_rating)?;

        let mut con = self.database_connection().transact().await?;
        let property = self
            .property_query()
            .find_by_id(&mut con, &PropertyId::new(dto.property_id))
            .await?
            .ok_or_else(|| Report::new(KernelError::NotFound("Property")))?;

        let review = Review::new(
            ReviewId::new(Uuid::new_v4()),
            property.id().clone(),
            UserId::new(dto.reviewer_id),
            rating,
            dto.comment,
            CreatedAt::new(OffsetDateTime::now_utc()),
        );
        self.review_modifier().create(&mut con, &review).await?;

        let ratings = self
            .review_query()
            .ratings_by_property_id(&mut con, property.id())
            .await?;
        let (average, count) = aggregate_ratings(&ratings);
        self.property_modifier()
            .update_rating(&mut con, property.id(), average, count)
            .await?;

        Ok(ReviewDto::from(review))
    }
}

impl<Connection: 'static + Send, T> SubmitReviewService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnPropertyQuery<Connection>
        + DependOnPropertyModifier<Connection>
        + DependOnReviewQuery<Connection>
        + DependOnReviewModifier<Connection>
{
}

#[async_trait::async_trait]
pub trait GetReviewService<Connection: 'static + Send>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection> + DependOnReviewQuery<Connection>
{
    async fn list_reviews(
        &self,
        property_id: Uuid,
    ) -> error_stack::Result<Vec<ReviewDto>, KernelError> {
        let mut con = self.database_connection().transact().await?;
        let reviews = self
            .review_query()
            .find_by_property_id(&mut con, &PropertyId::new(property_id))
            .await?;
        Ok(reviews.into_iter().map(ReviewDto::from).collect())
    }
}

impl<Connection: 'static + Send, T> GetReviewService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnReviewQuery<Connection>
{
}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use kernel::KernelError;

    use super::aggregate_ratings;
    use crate::service::mock::MockApp;
    use crate::service::SubmitReviewService;
    use crate::transfer::CreateReviewDto;

    #[test]
    fn mean_of_three_ratings() {
        let (average, count) = aggregate_ratings(&[5, 4, 3]);
        assert_eq!(average, dec!(4.00));
        assert_eq!(count, 3);
    }

    #[test]
    fn mean_rounds_to_two_decimals() {
        let (average, _) = aggregate_ratings(&[3, 3, 2]);
        assert_eq!(average, dec!(2.67));
    }

    #[test]
    fn empty_ratings_reset_the_aggregate() {
        assert_eq!(aggregate_ratings(&[]), (Decimal::ZERO, 0));
    }

    fn review(app: &MockApp, rating: i16) -> CreateReviewDto {
        CreateReviewDto {
            property_id: app.property_id,
            reviewer_id: uuid::Uuid::new_v4(),
            overall_rating: rating,
            comment: None,
        }
    }

    #[tokio::test]
    async fn submission_recomputes_the_property_aggregate() {
        let app = MockApp::with_property();
        for rating in [5, 4, 3] {
            app.submit_review(review(&app, rating)).await.unwrap();
        }

        let property = app.properties.get(&app.property_id).unwrap();
        assert_eq!(property.average_rating(), dec!(4.00));
        assert_eq!(property.review_count(), 3);
    }

    #[tokio::test]
    async fn out_of_range_rating_is_rejected() {
        let app = MockApp::with_property();
        let report = app.submit_review(review(&app, 6)).await.unwrap_err();
        assert!(matches!(
            report.current_context(),
            KernelError::Validation(_)
        ));
    }
}
