use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use error_stack::Report;
use rust_decimal::Decimal;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tokio::time::timeout;
use tracing::warn;
use uuid::Uuid;

use kernel::interface::cache::{
    DependOnRateLimiter, DependOnResponseCache, RateLimiter, ResponseCache,
};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{
    BookingQuery, DependOnBookingQuery, DependOnPropertyQuery, DependOnReviewQuery, PropertyQuery,
    ReviewQuery,
};
use kernel::prelude::entity::{Booking, BookingStatus, Property, Review, SelectLimit, UserId};
use kernel::KernelError;

use crate::transfer::{
    BookingStatsDto, BookingSummaryDto, DashboardDto, PropertySummaryDto, ReviewStatsDto,
    ReviewSummaryDto,
};

const CACHE_TTL: Duration = Duration::from_secs(60);
/// Booking/review reads are abandoned past this deadline and the section
/// renders empty instead of failing the page.
const READ_DEADLINE: Duration = Duration::from_secs(8);

const PROPERTY_LIMIT: i64 = 20;
const BOOKING_LIMIT: i64 = 20;
const REVIEW_LIMIT: i64 = 15;
const RECENT_BOOKINGS: usize = 10;
const RECENT_REVIEWS: usize = 8;

/// Booking stats fold over the most recent bookings. Earnings count only
/// completed stays; monthly earnings additionally filter on the calendar
/// month of `now`.
pub fn fold_booking_stats(bookings: &[Booking], now: OffsetDateTime) -> BookingStatsDto {
    let mut stats = BookingStatsDto::default();
    stats.total = bookings.len() as i64;
    for booking in bookings {
        match booking.status() {
            BookingStatus::Pending => stats.pending += 1,
            BookingStatus::Confirmed => stats.confirmed += 1,
            BookingStatus::Cancelled => stats.cancelled += 1,
            BookingStatus::Completed => stats.completed += 1,
            BookingStatus::InProgress => {}
        }
        if booking.status() == &BookingStatus::Completed {
            let amount = booking.charge().total_amount();
            stats.total_earnings += amount;
            let created: &OffsetDateTime = booking.created_at().as_ref();
            if created.month() == now.month() && created.year() == now.year() {
                stats.monthly_earnings += amount;
            }
        }
    }
    stats
}

pub fn fold_review_stats(reviews: &[Review]) -> ReviewStatsDto {
    if reviews.is_empty() {
        return ReviewStatsDto::default();
    }
    let sum: i64 = reviews
        .iter()
        .map(|review| i64::from(*review.rating().as_ref()))
        .sum();
    ReviewStatsDto {
        total: reviews.len() as i64,
        average_rating: Decimal::from(sum) / Decimal::from(reviews.len() as i64),
    }
}

/// Run a dashboard section read against the deadline, degrading to the
/// empty default on timeout or failure.
async fn degraded<T, F>(section: &'static str, read: F) -> T
where
    T: Default,
    F: Future<Output = error_stack::Result<T, KernelError>>,
{
    match timeout(READ_DEADLINE, read).await {
        Ok(Ok(value)) => value,
        Ok(Err(report)) => {
            warn!("dashboard {section} read failed, rendering empty: {report:?}");
            T::default()
        }
        Err(_) => {
            warn!("dashboard {section} read timed out, rendering empty");
            T::default()
        }
    }
}

#[async_trait::async_trait]
pub trait DashboardService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnPropertyQuery<Connection>
    + DependOnBookingQuery<Connection>
    + DependOnReviewQuery<Connection>
    + DependOnResponseCache
    + DependOnRateLimiter
{
    async fn host_dashboard(
        &self,
        host_id: Uuid,
        client_key: &str,
    ) -> error_stack::Result<DashboardDto, KernelError> {
        if !self.rate_limiter().try_acquire(client_key).await? {
            return Err(Report::new(KernelError::RateLimited));
        }

        let cache_key = format!("dashboard:{host_id}");
        if let Some(cached) = self.response_cache().fetch(&cache_key).await? {
            match serde_json::from_str::<DashboardDto>(&cached) {
                Ok(dto) => return Ok(dto),
                Err(error) => warn!("discarding unreadable dashboard cache entry: {error}"),
            }
        }

        let mut con = self.database_connection().transact().await?;
        let host = UserId::new(host_id);

        let properties = self
            .property_query()
            .find_by_host_id(&mut con, &host, SelectLimit::new(PROPERTY_LIMIT))
            .await?;

        let bookings = degraded("booking", async {
            self.booking_query()
                .find_by_host_id(&mut con, &host, SelectLimit::new(BOOKING_LIMIT))
                .await
        })
        .await;

        let mut con = self.database_connection().transact().await?;
        let reviews = degraded("review", async {
            self.review_query()
                .find_by_host_id(&mut con, &host, SelectLimit::new(REVIEW_LIMIT))
                .await
        })
        .await;

        let now = OffsetDateTime::now_utc();
        let titles: HashMap<Uuid, &Property> = properties
            .iter()
            .map(|property| (*property.id().as_ref(), property))
            .collect();

        let dto = DashboardDto {
            booking_stats: fold_booking_stats(&bookings, now),
            recent_bookings: bookings
                .iter()
                .take(RECENT_BOOKINGS)
                .map(|booking| booking_summary(booking, &titles))
                .collect(),
            review_stats: fold_review_stats(&reviews),
            recent_reviews: reviews
                .iter()
                .take(RECENT_REVIEWS)
                .map(|review| review_summary(review, &titles))
                .collect(),
            properties: properties.iter().map(property_summary).collect(),
        };

        match serde_json::to_string(&dto) {
            Ok(serialized) => {
                if let Err(report) = self
                    .response_cache()
                    .store(&cache_key, &serialized, CACHE_TTL)
                    .await
                {
                    warn!("failed to cache dashboard response: {report:?}");
                }
            }
            Err(error) => warn!("failed to serialize dashboard response: {error}"),
        }

        Ok(dto)
    }
}

impl<Connection: 'static + Send, T> DashboardService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnPropertyQuery<Connection>
        + DependOnBookingQuery<Connection>
        + DependOnReviewQuery<Connection>
        + DependOnResponseCache
        + DependOnRateLimiter
{
}

fn property_summary(property: &Property) -> PropertySummaryDto {
    PropertySummaryDto {
        id: *property.id().as_ref(),
        title: property.title().as_ref().to_string(),
        property_type: property.property_type().to_string(),
        bedrooms: property.bedrooms(),
        bathrooms: property.bathrooms(),
        max_guests: *property.max_guests().as_ref(),
        price_per_night: property.fees().nightly_rate(),
        location: format!("{}, {}", property.city(), property.country()),
        average_rating: property.average_rating(),
        review_count: property.review_count(),
        status: if property.is_active() {
            "active".to_string()
        } else {
            "inactive".to_string()
        },
        is_featured: property.is_featured(),
    }
}

fn booking_summary(booking: &Booking, titles: &HashMap<Uuid, &Property>) -> BookingSummaryDto {
    let property = titles.get(booking.property_id().as_ref());
    BookingSummaryDto {
        id: *booking.id().as_ref(),
        property_id: *booking.property_id().as_ref(),
        property_title: property
            .map(|property| property.title().as_ref().to_string())
            .unwrap_or_else(|| "Property".to_string()),
        property_city: property
            .map(|property| property.city().to_string())
            .unwrap_or_default(),
        property_country: property
            .map(|property| property.country().to_string())
            .unwrap_or_default(),
        guest_id: *booking.guest_id().as_ref(),
        check_in_date: booking.stay().check_in().to_string(),
        check_out_date: booking.stay().check_out().to_string(),
        guests: booking.guests().total(),
        adults: booking.guests().adults(),
        children: booking.guests().children(),
        nights: booking.stay().nights(),
        total_amount: booking.charge().total_amount(),
        status: *booking.status(),
        payment_status: *booking.payment_status(),
        created_at: booking
            .created_at()
            .as_ref()
            .format(&Rfc3339)
            .unwrap_or_default(),
    }
}

fn review_summary(review: &Review, titles: &HashMap<Uuid, &Property>) -> ReviewSummaryDto {
    ReviewSummaryDto {
        id: *review.id().as_ref(),
        property_id: *review.property_id().as_ref(),
        property_title: titles
            .get(review.property_id().as_ref())
            .map(|property| property.title().as_ref().to_string())
            .unwrap_or_else(|| "Property".to_string()),
        reviewer_id: *review.reviewer_id().as_ref(),
        overall_rating: *review.rating().as_ref(),
        comment: review.comment().cloned(),
        created_at: review
            .created_at()
            .as_ref()
            .format(&Rfc3339)
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use time::macros::{date, datetime};
    use uuid::Uuid;

    use kernel::prelude::entity::{
        Booking, BookingId, BookingStatus, ChargeBreakdown, CreatedAt, GuestBreakdown,
        PaymentStatus, PropertyId, Rating, Review, ReviewId, StayPeriod, UpdatedAt, UserId,
    };
    use kernel::KernelError;

    use super::{fold_booking_stats, fold_review_stats};
    use crate::service::mock::MockApp;
    use crate::service::DashboardService;

    fn booking(
        status: BookingStatus,
        total: Decimal,
        created_at: time::OffsetDateTime,
    ) -> Booking {
        Booking::new(
            BookingId::new(Uuid::new_v4()),
            PropertyId::new(Uuid::new_v4()),
            UserId::new(Uuid::new_v4()),
            StayPeriod::new(date!(2025 - 06 - 01), date!(2025 - 06 - 05)).unwrap(),
            GuestBreakdown::new(2, 2, 0, 0, 0).unwrap(),
            ChargeBreakdown::new(total, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, total),
            status,
            PaymentStatus::Paid,
            None,
            None,
            None,
            CreatedAt::new(created_at),
            UpdatedAt::new(created_at),
        )
    }

    #[test]
    fn earnings_count_only_completed_bookings() {
        let now = datetime!(2025-06-15 12:00 UTC);
        let bookings = vec![
            booking(BookingStatus::Completed, dec!(500), datetime!(2025-06-02 10:00 UTC)),
            booking(BookingStatus::Completed, dec!(300), datetime!(2025-03-10 10:00 UTC)),
            booking(BookingStatus::Confirmed, dec!(900), datetime!(2025-06-05 10:00 UTC)),
            booking(BookingStatus::Pending, dec!(100), datetime!(2025-06-06 10:00 UTC)),
            booking(BookingStatus::Cancelled, dec!(250), datetime!(2025-06-07 10:00 UTC)),
        ];
        let stats = fold_booking_stats(&bookings, now);

        assert_eq!(stats.total, 5);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.confirmed, 1);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.total_earnings, dec!(800));
        // Only the June completion falls in the current month.
        assert_eq!(stats.monthly_earnings, dec!(500));
    }

    fn review(rating: i16) -> Review {
        Review::new(
            ReviewId::new(Uuid::new_v4()),
            PropertyId::new(Uuid::new_v4()),
            UserId::new(Uuid::new_v4()),
            Rating::try_new(rating).unwrap(),
            None,
            CreatedAt::new(datetime!(2025-06-01 10:00 UTC)),
        )
    }

    #[test]
    fn review_stats_average_is_the_arithmetic_mean() {
        let reviews = vec![review(5), review(4), review(3)];
        let stats = fold_review_stats(&reviews);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.average_rating, dec!(4));
    }

    #[tokio::test]
    async fn dashboard_is_rate_limited_per_client() {
        let app = MockApp::with_property();
        app.limiter.set_budget(2);

        let host = uuid::Uuid::new_v4();
        app.host_dashboard(host, "client-a").await.unwrap();
        app.host_dashboard(host, "client-a").await.unwrap();
        let report = app.host_dashboard(host, "client-a").await.unwrap_err();
        assert!(matches!(report.current_context(), KernelError::RateLimited));
    }

    #[tokio::test]
    async fn dashboard_responses_are_cached() {
        let app = MockApp::with_property();
        let host = uuid::Uuid::new_v4();
        app.host_dashboard(host, "client-a").await.unwrap();
        assert!(app.cache.contains(&format!("dashboard:{host}")));

        // A second call is served from the cache even if the store goes
        // away underneath.
        app.bookings.clear();
        app.host_dashboard(host, "client-b").await.unwrap();
    }
}
