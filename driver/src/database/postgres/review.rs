use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, Postgres};
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::ReviewQuery;
use kernel::interface::update::ReviewModifier;
use kernel::prelude::entity::{
    CreatedAt, PropertyId, Rating, Review, ReviewId, SelectLimit, UserId,
};
use kernel::KernelError;

use crate::error::{ConvertError, DriverError};

pub struct PostgresReviewRepository;

#[async_trait::async_trait]
impl ReviewQuery<PoolConnection<Postgres>> for PostgresReviewRepository {
    async fn find_by_property_id(
        &self,
        con: &mut PoolConnection<Postgres>,
        property_id: &PropertyId,
    ) -> error_stack::Result<Vec<Review>, KernelError> {
        PgReviewInternal::find_by_property_id(con, property_id)
            .await
            .convert_error()
    }

    async fn ratings_by_property_id(
        &self,
        con: &mut PoolConnection<Postgres>,
        property_id: &PropertyId,
    ) -> error_stack::Result<Vec<i16>, KernelError> {
        PgReviewInternal::ratings_by_property_id(con, property_id)
            .await
            .convert_error()
    }

    async fn find_by_host_id(
        &self,
        con: &mut PoolConnection<Postgres>,
        host_id: &UserId,
        limit: SelectLimit,
    ) -> error_stack::Result<Vec<Review>, KernelError> {
        PgReviewInternal::find_by_host_id(con, host_id, limit)
            .await
            .convert_error()
    }
}

#[async_trait::async_trait]
impl ReviewModifier<PoolConnection<Postgres>> for PostgresReviewRepository {
    async fn create(
        &self,
        con: &mut PoolConnection<Postgres>,
        review: &Review,
    ) -> error_stack::Result<(), KernelError> {
        PgReviewInternal::create(con, review).await.convert_error()
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: Uuid,
    property_id: Uuid,
    reviewer_id: Uuid,
    overall_rating: i16,
    comment: Option<String>,
    created_at: OffsetDateTime,
}

impl TryFrom<ReviewRow> for Review {
    type Error = DriverError;

    fn try_from(value: ReviewRow) -> Result<Self, Self::Error> {
        let rating = Rating::try_new(value.overall_rating)
            .map_err(|report| DriverError::Conversion(anyhow::anyhow!("{report:?}")))?;
        Ok(Review::new(
            ReviewId::new(value.id),
            PropertyId::new(value.property_id),
            UserId::new(value.reviewer_id),
            rating,
            value.comment,
            CreatedAt::new(value.created_at),
        ))
    }
}

pub(in crate::database) struct PgReviewInternal;

impl PgReviewInternal {
    async fn find_by_property_id(
        con: &mut PgConnection,
        property_id: &PropertyId,
    ) -> Result<Vec<Review>, DriverError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            // language=postgresql
            r#"
            SELECT
                id,
                property_id,
                reviewer_id,
                overall_rating,
                comment,
                created_at
            FROM
                reviews
            WHERE
                property_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(property_id.as_ref())
        .fetch_all(&mut *con)
        .await?;
        rows.into_iter().map(Review::try_from).collect()
    }

    async fn ratings_by_property_id(
        con: &mut PgConnection,
        property_id: &PropertyId,
    ) -> Result<Vec<i16>, DriverError> {
        let ratings = sqlx::query_scalar::<_, i16>(
            // language=postgresql
            r#"
            SELECT overall_rating FROM reviews WHERE property_id = $1
            "#,
        )
        .bind(property_id.as_ref())
        .fetch_all(&mut *con)
        .await?;
        Ok(ratings)
    }

    async fn find_by_host_id(
        con: &mut PgConnection,
        host_id: &UserId,
        limit: SelectLimit,
    ) -> Result<Vec<Review>, DriverError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            // language=postgresql
            r#"
            SELECT
                id,
                property_id,
                reviewer_id,
                overall_rating,
                comment,
                created_at
            FROM
                reviews
            WHERE
                property_id IN (SELECT id FROM properties WHERE host_id = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(host_id.as_ref())
        .bind(i64::from(limit))
        .fetch_all(&mut *con)
        .await?;
        rows.into_iter().map(Review::try_from).collect()
    }

    async fn create(con: &mut PgConnection, review: &Review) -> Result<(), DriverError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO reviews (id, property_id, reviewer_id, overall_rating, comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(review.id().as_ref())
        .bind(review.property_id().as_ref())
        .bind(review.reviewer_id().as_ref())
        .bind(review.rating().as_ref())
        .bind(review.comment().map(|comment| comment.as_str()))
        .bind(review.created_at().as_ref())
        .execute(&mut *con)
        .await?;
        Ok(())
    }
}
