use rust_decimal::Decimal;
use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::{PropertyFilter, PropertyQuery, PropertySort};
use kernel::interface::update::PropertyModifier;
use kernel::prelude::entity::{
    CreatedAt, FeeSchedule, MaxGuests, Property, PropertyId, PropertyTitle, SelectLimit,
    SelectOffset, UpdatedAt, UserId,
};
use kernel::KernelError;

use crate::error::{ConvertError, DriverError};

pub struct PostgresPropertyRepository;

#[async_trait::async_trait]
impl PropertyQuery<PoolConnection<Postgres>> for PostgresPropertyRepository {
    async fn find_by_id(
        &self,
        con: &mut PoolConnection<Postgres>,
        id: &PropertyId,
    ) -> error_stack::Result<Option<Property>, KernelError> {
        PgPropertyInternal::find_by_id(con, id, false)
            .await
            .convert_error()
    }

    async fn find_active_by_id(
        &self,
        con: &mut PoolConnection<Postgres>,
        id: &PropertyId,
    ) -> error_stack::Result<Option<Property>, KernelError> {
        PgPropertyInternal::find_by_id(con, id, true)
            .await
            .convert_error()
    }

    async fn find_by_host_id(
        &self,
        con: &mut PoolConnection<Postgres>,
        host_id: &UserId,
        limit: SelectLimit,
    ) -> error_stack::Result<Vec<Property>, KernelError> {
        PgPropertyInternal::find_by_host_id(con, host_id, limit)
            .await
            .convert_error()
    }

    async fn search(
        &self,
        con: &mut PoolConnection<Postgres>,
        filter: &PropertyFilter,
        limit: SelectLimit,
        offset: SelectOffset,
    ) -> error_stack::Result<Vec<Property>, KernelError> {
        PgPropertyInternal::search(con, filter, limit, offset)
            .await
            .convert_error()
    }

    async fn count(
        &self,
        con: &mut PoolConnection<Postgres>,
        filter: &PropertyFilter,
    ) -> error_stack::Result<i64, KernelError> {
        PgPropertyInternal::count(con, filter).await.convert_error()
    }
}

#[async_trait::async_trait]
impl PropertyModifier<PoolConnection<Postgres>> for PostgresPropertyRepository {
    async fn create(
        &self,
        con: &mut PoolConnection<Postgres>,
        property: &Property,
    ) -> error_stack::Result<(), KernelError> {
        PgPropertyInternal::create(con, property)
            .await
            .convert_error()
    }

    async fn update_rating(
        &self,
        con: &mut PoolConnection<Postgres>,
        id: &PropertyId,
        average_rating: Decimal,
        review_count: i64,
    ) -> error_stack::Result<(), KernelError> {
        PgPropertyInternal::update_rating(con, id, average_rating, review_count)
            .await
            .convert_error()
    }
}

const PROPERTY_COLUMNS: &str = r#"
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
    price_per_night,
    cleaning_fee,
    extra_guest_fee,
    service_fee_percentage,
    min_stay,
    max_stay,
    is_active,
    is_featured,
    average_rating,
    review_count,
    created_at,
    updated_at
"#;

#[derive(sqlx::FromRow)]
struct PropertyRow {
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
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<PropertyRow> for Property {
    fn from(value: PropertyRow) -> Self {
        Property::new(
            PropertyId::new(value.id),
            UserId::new(value.host_id),
            PropertyTitle::new(value.title),
            value.description,
            value.city,
            value.country,
            value.property_type,
            value.bedrooms,
            value.bathrooms,
            MaxGuests::new(value.max_guests),
            FeeSchedule::new(
                value.price_per_night,
                value.cleaning_fee,
                value.extra_guest_fee,
                value.service_fee_percentage,
            ),
            value.min_stay,
            value.max_stay,
            value.is_active,
            value.is_featured,
            value.average_rating,
            value.review_count,
            CreatedAt::new(value.created_at),
            UpdatedAt::new(value.updated_at),
        )
    }
}

pub(in crate::database) struct PgPropertyInternal;

impl PgPropertyInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &PropertyId,
        active_only: bool,
    ) -> Result<Option<Property>, DriverError> {
        let query = if active_only {
            format!("SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = $1 AND is_active = TRUE")
        } else {
            format!("SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = $1")
        };
        let row = sqlx::query_as::<_, PropertyRow>(&query)
            .bind(id.as_ref())
            .fetch_optional(&mut *con)
            .await?;
        Ok(row.map(Property::from))
    }

    async fn find_by_host_id(
        con: &mut PgConnection,
        host_id: &UserId,
        limit: SelectLimit,
    ) -> Result<Vec<Property>, DriverError> {
        let query = format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE host_id = $1 ORDER BY created_at DESC LIMIT $2"
        );
        let rows = sqlx::query_as::<_, PropertyRow>(&query)
            .bind(host_id.as_ref())
            .bind(i64::from(limit))
            .fetch_all(&mut *con)
            .await?;
        Ok(rows.into_iter().map(Property::from).collect())
    }

    fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &PropertyFilter) {
        if let Some(search) = &filter.search {
            let pattern = format!("%{search}%");
            builder.push(" AND (title ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR city ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR country ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }
        if let Some(city) = &filter.city {
            builder.push(" AND city ILIKE ");
            builder.push_bind(format!("%{city}%"));
        }
        if let Some(country) = &filter.country {
            builder.push(" AND country ILIKE ");
            builder.push_bind(format!("%{country}%"));
        }
        if let Some(min_price) = filter.min_price {
            builder.push(" AND price_per_night >= ");
            builder.push_bind(min_price);
        }
        if let Some(max_price) = filter.max_price {
            builder.push(" AND price_per_night <= ");
            builder.push_bind(max_price);
        }
        if let Some(property_type) = &filter.property_type {
            builder.push(" AND property_type = ");
            builder.push_bind(property_type.clone());
        }
        if let Some(guests) = filter.guests {
            builder.push(" AND max_guests >= ");
            builder.push_bind(guests);
        }
    }

    async fn search(
        con: &mut PgConnection,
        filter: &PropertyFilter,
        limit: SelectLimit,
        offset: SelectOffset,
    ) -> Result<Vec<Property>, DriverError> {
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE is_active = TRUE"
        ));
        Self::push_filters(&mut builder, filter);
        builder.push(match filter.sort {
            PropertySort::PriceLow => " ORDER BY price_per_night ASC",
            PropertySort::PriceHigh => " ORDER BY price_per_night DESC",
            PropertySort::Newest => " ORDER BY created_at DESC",
            PropertySort::Rating => " ORDER BY average_rating DESC",
        });
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(limit));
        builder.push(" OFFSET ");
        builder.push_bind(i64::from(offset));

        let rows = builder
            .build_query_as::<PropertyRow>()
            .fetch_all(&mut *con)
            .await?;
        Ok(rows.into_iter().map(Property::from).collect())
    }

    async fn count(con: &mut PgConnection, filter: &PropertyFilter) -> Result<i64, DriverError> {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM properties WHERE is_active = TRUE");
        Self::push_filters(&mut builder, filter);
        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&mut *con)
            .await?;
        Ok(count)
    }

    async fn create(con: &mut PgConnection, property: &Property) -> Result<(), DriverError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO properties (
                id, host_id, title, description, city, country, property_type,
                bedrooms, bathrooms, max_guests, price_per_night, cleaning_fee,
                extra_guest_fee, service_fee_percentage, min_stay, max_stay,
                is_active, is_featured, average_rating, review_count,
                created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, $22
            )
            "#,
        )
        .bind(property.id().as_ref())
        .bind(property.host_id().as_ref())
        .bind(property.title().as_ref())
        .bind(property.description())
        .bind(property.city())
        .bind(property.country())
        .bind(property.property_type())
        .bind(property.bedrooms())
        .bind(property.bathrooms())
        .bind(property.max_guests().as_ref())
        .bind(property.fees().nightly_rate())
        .bind(property.fees().raw_cleaning_fee())
        .bind(property.fees().raw_extra_guest_fee())
        .bind(property.fees().raw_service_fee_percentage())
        .bind(property.min_stay())
        .bind(property.max_stay())
        .bind(property.is_active())
        .bind(property.is_featured())
        .bind(property.average_rating())
        .bind(property.review_count())
        .bind(property.created_at().as_ref())
        .bind(property.updated_at().as_ref())
        .execute(&mut *con)
        .await?;
        Ok(())
    }

    async fn update_rating(
        con: &mut PgConnection,
        id: &PropertyId,
        average_rating: Decimal,
        review_count: i64,
    ) -> Result<(), DriverError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE properties
            SET average_rating = $2, review_count = $3, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .bind(average_rating)
        .bind(review_count)
        .execute(&mut *con)
        .await?;
        Ok(())
    }
}
