use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;

use driver::database::{
    PostgresBookingRepository, PostgresConnection, PostgresDatabase, PostgresPropertyRepository,
    PostgresReviewRepository, RedisDatabase, RedisRateLimiter, RedisResponseCache,
};
use driver::payment::StripeGateway;
use kernel::interface::cache::{DependOnRateLimiter, DependOnResponseCache};
use kernel::interface::database::DatabaseConnection;
use kernel::interface::payment::DependOnPaymentGateway;
use kernel::interface::query::{
    DependOnBookingQuery, DependOnPropertyQuery, DependOnReviewQuery,
};
use kernel::interface::update::{
    DependOnBookingModifier, DependOnPropertyModifier, DependOnReviewModifier,
};
use kernel::KernelError;

/// Dashboard rate limit: requests per client per window.
const RATE_LIMIT: i64 = 10;
const RATE_WINDOW: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init().await?)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler {
    pgpool: PostgresDatabase,
    cache: RedisResponseCache,
    limiter: RedisRateLimiter,
    gateway: StripeGateway,
}

impl Handler {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let pgpool = PostgresDatabase::new().await?;
        let redis = RedisDatabase::new()?;
        let cache = RedisResponseCache::new(redis.clone());
        let limiter = RedisRateLimiter::new(redis, RATE_LIMIT, RATE_WINDOW);
        let gateway = StripeGateway::new()?;

        Ok(Self {
            pgpool,
            cache,
            limiter,
            gateway,
        })
    }
}

#[async_trait::async_trait]
impl DatabaseConnection<PostgresConnection> for Handler {
    async fn transact(&self) -> error_stack::Result<PostgresConnection, KernelError> {
        self.pgpool.transact().await
    }
}

impl DependOnPropertyQuery<PostgresConnection> for Handler {
    type PropertyQuery = PostgresPropertyRepository;
    fn property_query(&self) -> &Self::PropertyQuery {
        &PostgresPropertyRepository
    }
}

impl DependOnPropertyModifier<PostgresConnection> for Handler {
    type PropertyModifier = PostgresPropertyRepository;
    fn property_modifier(&self) -> &Self::PropertyModifier {
        &PostgresPropertyRepository
    }
}

impl DependOnBookingQuery<PostgresConnection> for Handler {
    type BookingQuery = PostgresBookingRepository;
    fn booking_query(&self) -> &Self::BookingQuery {
        &PostgresBookingRepository
    }
}

impl DependOnBookingModifier<PostgresConnection> for Handler {
    type BookingModifier = PostgresBookingRepository;
    fn booking_modifier(&self) -> &Self::BookingModifier {
        &PostgresBookingRepository
    }
}

impl DependOnReviewQuery<PostgresConnection> for Handler {
    type ReviewQuery = PostgresReviewRepository;
    fn review_query(&self) -> &Self::ReviewQuery {
        &PostgresReviewRepository
    }
}

impl DependOnReviewModifier<PostgresConnection> for Handler {
    type ReviewModifier = PostgresReviewRepository;
    fn review_modifier(&self) -> &Self::ReviewModifier {
        &PostgresReviewRepository
    }
}

impl DependOnPaymentGateway for Handler {
    type PaymentGateway = StripeGateway;
    fn payment_gateway(&self) -> &Self::PaymentGateway {
        &self.gateway
    }
}

impl DependOnResponseCache for Handler {
    type ResponseCache = RedisResponseCache;
    fn response_cache(&self) -> &Self::ResponseCache {
        &self.cache
    }
}

impl DependOnRateLimiter for Handler {
    type RateLimiter = RedisRateLimiter;
    fn rate_limiter(&self) -> &Self::RateLimiter {
        &self.limiter
    }
}
