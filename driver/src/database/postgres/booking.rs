use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::pool::PoolConnection;
use sqlx::{Connection, PgConnection, Postgres};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use kernel::interface::query::BookingQuery;
use kernel::interface::update::BookingModifier;
use kernel::prelude::entity::{
    Booking, BookingId, BookingStatus, Cancellation, CancelledBy, ChargeBreakdown, CreatedAt,
    GuestBreakdown, PaymentIntentId, PaymentStatus, PropertyId, SelectLimit, StayPeriod,
    UpdatedAt, UserId,
};
use kernel::KernelError;

use crate::error::{ConvertError, DriverError};

pub struct PostgresBookingRepository;

#[async_trait::async_trait]
impl BookingQuery<PoolConnection<Postgres>> for PostgresBookingRepository {
    async fn find_by_id(
        &self,
        con: &mut PoolConnection<Postgres>,
        id: &BookingId,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        PgBookingInternal::find_by_id(con, id).await.convert_error()
    }

    async fn find_by_payment_intent(
        &self,
        con: &mut PoolConnection<Postgres>,
        intent: &PaymentIntentId,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        PgBookingInternal::find_by_payment_intent(con, intent)
            .await
            .convert_error()
    }

    async fn find_blocking_by_property(
        &self,
        con: &mut PoolConnection<Postgres>,
        property_id: &PropertyId,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        PgBookingInternal::find_blocking_by_property(con, property_id)
            .await
            .convert_error()
    }

    async fn find_by_guest_id(
        &self,
        con: &mut PoolConnection<Postgres>,
        guest_id: &UserId,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        PgBookingInternal::find_by_guest_id(con, guest_id)
            .await
            .convert_error()
    }

    async fn find_by_host_id(
        &self,
        con: &mut PoolConnection<Postgres>,
        host_id: &UserId,
        limit: SelectLimit,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        PgBookingInternal::find_by_host_id(con, host_id, limit)
            .await
            .convert_error()
    }
}

#[async_trait::async_trait]
impl BookingModifier<PoolConnection<Postgres>> for PostgresBookingRepository {
    async fn reserve(
        &self,
        con: &mut PoolConnection<Postgres>,
        booking: &Booking,
    ) -> error_stack::Result<(), KernelError> {
        let inserted = PgBookingInternal::reserve(con, booking)
            .await
            .convert_error()?;
        if !inserted {
            return Err(error_stack::Report::new(KernelError::PropertyUnavailable));
        }
        Ok(())
    }

    async fn update(
        &self,
        con: &mut PoolConnection<Postgres>,
        booking: &Booking,
    ) -> error_stack::Result<(), KernelError> {
        PgBookingInternal::update(con, booking).await.convert_error()
    }
}

const BOOKING_COLUMNS: &str = r#"
    id,
    property_id,
    guest_id,
    check_in_date,
    check_out_date,
    guests,
    adults,
    children,
    infants,
    pets,
    base_amount,
    cleaning_fee,
    extra_guest_fee,
    service_fee,
    taxes,
    total_amount,
    status,
    payment_status,
    payment_intent_id,
    special_requests,
    cancelled_by,
    cancellation_reason,
    cancelled_at,
    created_at,
    updated_at
"#;

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    property_id: Uuid,
    guest_id: Uuid,
    check_in_date: Date,
    check_out_date: Date,
    guests: i32,
    adults: i32,
    children: i32,
    infants: i32,
    pets: i32,
    base_amount: Decimal,
    cleaning_fee: Decimal,
    extra_guest_fee: Decimal,
    service_fee: Decimal,
    taxes: Decimal,
    total_amount: Decimal,
    status: String,
    payment_status: String,
    payment_intent_id: Option<String>,
    special_requests: Option<String>,
    cancelled_by: Option<String>,
    cancellation_reason: Option<String>,
    cancelled_at: Option<OffsetDateTime>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<BookingRow> for Booking {
    type Error = DriverError;

    fn try_from(value: BookingRow) -> Result<Self, Self::Error> {
        let stay = StayPeriod::new(value.check_in_date, value.check_out_date)
            .map_err(|report| DriverError::Conversion(anyhow::anyhow!("{report:?}")))?;
        let guests = GuestBreakdown::new(
            value.guests,
            value.adults,
            value.children,
            value.infants,
            value.pets,
        )
        .map_err(|report| DriverError::Conversion(anyhow::anyhow!("{report:?}")))?;
        let status = BookingStatus::from_str(&value.status)
            .map_err(|e| DriverError::Conversion(anyhow::anyhow!(e)))?;
        let payment_status = PaymentStatus::from_str(&value.payment_status)
            .map_err(|e| DriverError::Conversion(anyhow::anyhow!(e)))?;
        let cancellation = match (value.cancelled_by, value.cancelled_at) {
            (Some(by), Some(at)) => {
                let by = CancelledBy::from_str(&by)
                    .map_err(|e| DriverError::Conversion(anyhow::anyhow!(e)))?;
                Some(Cancellation::new(by, value.cancellation_reason, at))
            }
            _ => None,
        };
        Ok(Booking::new(
            BookingId::new(value.id),
            PropertyId::new(value.property_id),
            UserId::new(value.guest_id),
            stay,
            guests,
            ChargeBreakdown::new(
                value.base_amount,
                value.cleaning_fee,
                value.extra_guest_fee,
                value.service_fee,
                value.taxes,
                value.total_amount,
            ),
            status,
            payment_status,
            value.payment_intent_id.map(PaymentIntentId::new),
            value.special_requests,
            cancellation,
            CreatedAt::new(value.created_at),
            UpdatedAt::new(value.updated_at),
        ))
    }
}

fn rows_to_bookings(rows: Vec<BookingRow>) -> Result<Vec<Booking>, DriverError> {
    rows.into_iter().map(Booking::try_from).collect()
}

pub(in crate::database) struct PgBookingInternal;

impl PgBookingInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookingId,
    ) -> Result<Option<Booking>, DriverError> {
        let query = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1");
        let row = sqlx::query_as::<_, BookingRow>(&query)
            .bind(id.as_ref())
            .fetch_optional(&mut *con)
            .await?;
        row.map(Booking::try_from).transpose()
    }

    async fn find_by_payment_intent(
        con: &mut PgConnection,
        intent: &PaymentIntentId,
    ) -> Result<Option<Booking>, DriverError> {
        let query = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE payment_intent_id = $1");
        let row = sqlx::query_as::<_, BookingRow>(&query)
            .bind(intent.as_ref())
            .fetch_optional(&mut *con)
            .await?;
        row.map(Booking::try_from).transpose()
    }

    async fn find_blocking_by_property(
        con: &mut PgConnection,
        property_id: &PropertyId,
    ) -> Result<Vec<Booking>, DriverError> {
        let query = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE property_id = $1 AND status IN ('pending', 'confirmed')"
        );
        let rows = sqlx::query_as::<_, BookingRow>(&query)
            .bind(property_id.as_ref())
            .fetch_all(&mut *con)
            .await?;
        rows_to_bookings(rows)
    }

    async fn find_by_guest_id(
        con: &mut PgConnection,
        guest_id: &UserId,
    ) -> Result<Vec<Booking>, DriverError> {
        let query = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE guest_id = $1 ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, BookingRow>(&query)
            .bind(guest_id.as_ref())
            .fetch_all(&mut *con)
            .await?;
        rows_to_bookings(rows)
    }

    async fn find_by_host_id(
        con: &mut PgConnection,
        host_id: &UserId,
        limit: SelectLimit,
    ) -> Result<Vec<Booking>, DriverError> {
        let query = format!(
            r#"
            SELECT {BOOKING_COLUMNS} FROM bookings
            WHERE property_id IN (SELECT id FROM properties WHERE host_id = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#
        );
        let rows = sqlx::query_as::<_, BookingRow>(&query)
            .bind(host_id.as_ref())
            .bind(i64::from(limit))
            .fetch_all(&mut *con)
            .await?;
        rows_to_bookings(rows)
    }

    /// Availability re-check and insert under one transaction. The
    /// property row is locked first so two concurrent reservations for
    /// the same property serialize; the overlap test uses the same
    /// inclusive-boundary comparison as the calculator.
    async fn reserve(con: &mut PgConnection, booking: &Booking) -> Result<bool, DriverError> {
        let mut tx = con.begin().await?;

        sqlx::query(
            // language=postgresql
            r#"SELECT id FROM properties WHERE id = $1 FOR UPDATE"#,
        )
        .bind(booking.property_id().as_ref())
        .execute(&mut *tx)
        .await?;

        let conflict = sqlx::query_scalar::<_, bool>(
            // language=postgresql
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE property_id = $1
                  AND status IN ('pending', 'confirmed')
                  AND check_in_date <= $3
                  AND check_out_date >= $2
            )
            "#,
        )
        .bind(booking.property_id().as_ref())
        .bind(booking.stay().check_in())
        .bind(booking.stay().check_out())
        .fetch_one(&mut *tx)
        .await?;

        if conflict {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO bookings (
                id, property_id, guest_id, check_in_date, check_out_date, nights,
                guests, adults, children, infants, pets,
                base_amount, cleaning_fee, extra_guest_fee, service_fee, taxes,
                total_amount, status, payment_status, payment_intent_id,
                special_requests, created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, $22, $23
            )
            "#,
        )
        .bind(booking.id().as_ref())
        .bind(booking.property_id().as_ref())
        .bind(booking.guest_id().as_ref())
        .bind(booking.stay().check_in())
        .bind(booking.stay().check_out())
        .bind(booking.stay().nights())
        .bind(booking.guests().total())
        .bind(booking.guests().adults())
        .bind(booking.guests().children())
        .bind(booking.guests().infants())
        .bind(booking.guests().pets())
        .bind(booking.charge().base_amount())
        .bind(booking.charge().cleaning_fee())
        .bind(booking.charge().extra_guest_fee())
        .bind(booking.charge().service_fee())
        .bind(booking.charge().taxes())
        .bind(booking.charge().total_amount())
        .bind(booking.status().as_str())
        .bind(booking.payment_status().as_str())
        .bind(booking.payment_intent_id().map(|intent| intent.as_ref()))
        .bind(booking.special_requests().map(|s| s.as_str()))
        .bind(booking.created_at().as_ref())
        .bind(booking.updated_at().as_ref())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn update(con: &mut PgConnection, booking: &Booking) -> Result<(), DriverError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE bookings
            SET status = $2,
                payment_status = $3,
                cancelled_by = $4,
                cancellation_reason = $5,
                cancelled_at = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(booking.id().as_ref())
        .bind(booking.status().as_str())
        .bind(booking.payment_status().as_str())
        .bind(
            booking
                .cancellation()
                .map(|cancellation| cancellation.cancelled_by().as_str()),
        )
        .bind(
            booking
                .cancellation()
                .and_then(|cancellation| cancellation.reason())
                .map(|reason| reason.as_str()),
        )
        .bind(booking.cancellation().map(|cancellation| *cancellation.cancelled_at()))
        .bind(booking.updated_at().as_ref())
        .execute(&mut *con)
        .await?;
        Ok(())
    }
}
