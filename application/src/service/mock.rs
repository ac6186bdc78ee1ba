use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use rust_decimal::Decimal;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::cache::{
    DependOnRateLimiter, DependOnResponseCache, RateLimiter, ResponseCache,
};
use kernel::interface::database::DatabaseConnection;
use kernel::interface::payment::{
    DependOnPaymentGateway, IntentMetadata, PaymentEvent, PaymentGateway, PaymentIntent,
};
use kernel::interface::query::{
    BookingQuery, DependOnBookingQuery, DependOnPropertyQuery, DependOnReviewQuery,
    PropertyFilter, PropertyQuery, ReviewQuery,
};
use kernel::interface::update::{
    BookingModifier, DependOnBookingModifier, DependOnPropertyModifier, DependOnReviewModifier,
    PropertyModifier, ReviewModifier,
};
use kernel::prelude::entity::{
    Booking, BookingId, CreatedAt, FeeSchedule, MaxGuests, PaymentIntentId, Property, PropertyId,
    PropertyTitle, Review, SelectLimit, SelectOffset, UpdatedAt, UserId,
};
use kernel::prelude::pricing::ranges_overlap;
use kernel::KernelError;

/// In-memory module wired the same way the server module is, so the
/// blanket service impls attach to it.
pub(crate) struct MockApp {
    pub property_id: Uuid,
    pub properties: MockPropertyRepository,
    pub bookings: MockBookingRepository,
    pub reviews: MockReviewRepository,
    pub gateway: MockPaymentGateway,
    pub cache: MockResponseCache,
    pub limiter: MockRateLimiter,
}

impl MockApp {
    pub fn new() -> Self {
        Self {
            property_id: Uuid::new_v4(),
            properties: MockPropertyRepository::default(),
            bookings: MockBookingRepository::default(),
            reviews: MockReviewRepository::default(),
            gateway: MockPaymentGateway::default(),
            cache: MockResponseCache::default(),
            limiter: MockRateLimiter::default(),
        }
    }

    /// A module seeded with one active four-to-six guest property:
    /// nightly 100, cleaning 50, extra-guest 10, default service fee.
    pub fn with_property() -> Self {
        let app = Self::new();
        let now = OffsetDateTime::now_utc();
        app.properties.insert(Property::new(
            PropertyId::new(app.property_id),
            UserId::new(Uuid::new_v4()),
            PropertyTitle::new("Harbour loft"),
            None,
            "Lisbon".to_string(),
            "Portugal".to_string(),
            "apartment".to_string(),
            2,
            1,
            MaxGuests::new(6),
            FeeSchedule::new(
                Decimal::from(100),
                Some(Decimal::from(50)),
                Some(Decimal::from(10)),
                None,
            ),
            None,
            None,
            true,
            false,
            Decimal::ZERO,
            0,
            CreatedAt::new(now),
            UpdatedAt::new(now),
        ));
        app
    }
}

#[async_trait::async_trait]
impl DatabaseConnection<()> for MockApp {
    async fn transact(&self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

impl DependOnPropertyQuery<()> for MockApp {
    type PropertyQuery = MockPropertyRepository;
    fn property_query(&self) -> &Self::PropertyQuery {
        &self.properties
    }
}

impl DependOnPropertyModifier<()> for MockApp {
    type PropertyModifier = MockPropertyRepository;
    fn property_modifier(&self) -> &Self::PropertyModifier {
        &self.properties
    }
}

impl DependOnBookingQuery<()> for MockApp {
    type BookingQuery = MockBookingRepository;
    fn booking_query(&self) -> &Self::BookingQuery {
        &self.bookings
    }
}

impl DependOnBookingModifier<()> for MockApp {
    type BookingModifier = MockBookingRepository;
    fn booking_modifier(&self) -> &Self::BookingModifier {
        &self.bookings
    }
}

impl DependOnReviewQuery<()> for MockApp {
    type ReviewQuery = MockReviewRepository;
    fn review_query(&self) -> &Self::ReviewQuery {
        &self.reviews
    }
}

impl DependOnReviewModifier<()> for MockApp {
    type ReviewModifier = MockReviewRepository;
    fn review_modifier(&self) -> &Self::ReviewModifier {
        &self.reviews
    }
}

impl DependOnPaymentGateway for MockApp {
    type PaymentGateway = MockPaymentGateway;
    fn payment_gateway(&self) -> &Self::PaymentGateway {
        &self.gateway
    }
}

impl DependOnResponseCache for MockApp {
    type ResponseCache = MockResponseCache;
    fn response_cache(&self) -> &Self::ResponseCache {
        &self.cache
    }
}

impl DependOnRateLimiter for MockApp {
    type RateLimiter = MockRateLimiter;
    fn rate_limiter(&self) -> &Self::RateLimiter {
        &self.limiter
    }
}

#[derive(Default)]
pub(crate) struct MockPropertyRepository {
    properties: Mutex<Vec<Property>>,
}

impl MockPropertyRepository {
    pub fn insert(&self, property: Property) {
        self.properties.lock().unwrap().push(property);
    }

    pub fn get(&self, id: &Uuid) -> Option<Property> {
        self.properties
            .lock()
            .unwrap()
            .iter()
            .find(|property| property.id().as_ref() == id)
            .cloned()
    }
}

#[async_trait::async_trait]
impl PropertyQuery<()> for MockPropertyRepository {
    async fn find_by_id(
        &self,
        _con: &mut (),
        id: &PropertyId,
    ) -> error_stack::Result<Option<Property>, KernelError> {
        Ok(self.get(id.as_ref()))
    }

    async fn find_active_by_id(
        &self,
        _con: &mut (),
        id: &PropertyId,
    ) -> error_stack::Result<Option<Property>, KernelError> {
        Ok(self.get(id.as_ref()).filter(Property::is_active))
    }

    async fn find_by_host_id(
        &self,
        _con: &mut (),
        host_id: &UserId,
        limit: SelectLimit,
    ) -> error_stack::Result<Vec<Property>, KernelError> {
        let properties = self.properties.lock().unwrap();
        Ok(properties
            .iter()
            .filter(|property| property.host_id() == host_id)
            .take(i64::from(limit) as usize)
            .cloned()
            .collect())
    }

    async fn search(
        &self,
        _con: &mut (),
        _filter: &PropertyFilter,
        limit: SelectLimit,
        offset: SelectOffset,
    ) -> error_stack::Result<Vec<Property>, KernelError> {
        let properties = self.properties.lock().unwrap();
        Ok(properties
            .iter()
            .filter(|property| property.is_active())
            .skip(i64::from(offset) as usize)
            .take(i64::from(limit) as usize)
            .cloned()
            .collect())
    }

    async fn count(
        &self,
        _con: &mut (),
        _filter: &PropertyFilter,
    ) -> error_stack::Result<i64, KernelError> {
        let properties = self.properties.lock().unwrap();
        Ok(properties
            .iter()
            .filter(|property| property.is_active())
            .count() as i64)
    }
}

#[async_trait::async_trait]
impl PropertyModifier<()> for MockPropertyRepository {
    async fn create(
        &self,
        _con: &mut (),
        property: &Property,
    ) -> error_stack::Result<(), KernelError> {
        self.insert(property.clone());
        Ok(())
    }

    async fn update_rating(
        &self,
        _con: &mut (),
        id: &PropertyId,
        average_rating: Decimal,
        review_count: i64,
    ) -> error_stack::Result<(), KernelError> {
        let mut properties = self.properties.lock().unwrap();
        if let Some(position) = properties
            .iter()
            .position(|property| property.id() == id)
        {
            let old = properties.remove(position);
            let destruct = old.into_destruct();
            properties.push(Property::new(
                destruct.id,
                destruct.host_id,
                destruct.title,
                destruct.description,
                destruct.city,
                destruct.country,
                destruct.property_type,
                destruct.bedrooms,
                destruct.bathrooms,
                destruct.max_guests,
                destruct.fees,
                destruct.min_stay,
                destruct.max_stay,
                destruct.is_active,
                destruct.is_featured,
                average_rating,
                review_count,
                destruct.created_at,
                destruct.updated_at,
            ));
        }
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct MockBookingRepository {
    bookings: Mutex<Vec<Booking>>,
}

impl MockBookingRepository {
    pub fn get(&self, id: &Uuid) -> Option<Booking> {
        self.bookings
            .lock()
            .unwrap()
            .iter()
            .find(|booking| booking.id().as_ref() == id)
            .cloned()
    }

    pub fn clear(&self) {
        self.bookings.lock().unwrap().clear();
    }
}

#[async_trait::async_trait]
impl BookingQuery<()> for MockBookingRepository {
    async fn find_by_id(
        &self,
        _con: &mut (),
        id: &BookingId,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        Ok(self.get(id.as_ref()))
    }

    async fn find_by_payment_intent(
        &self,
        _con: &mut (),
        intent: &PaymentIntentId,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        let bookings = self.bookings.lock().unwrap();
        Ok(bookings
            .iter()
            .find(|booking| booking.payment_intent_id() == Some(intent))
            .cloned())
    }

    async fn find_blocking_by_property(
        &self,
        _con: &mut (),
        property_id: &PropertyId,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        let bookings = self.bookings.lock().unwrap();
        Ok(bookings
            .iter()
            .filter(|booking| {
                booking.property_id() == property_id && booking.status().blocks_availability()
            })
            .cloned()
            .collect())
    }

    async fn find_by_guest_id(
        &self,
        _con: &mut (),
        guest_id: &UserId,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        let bookings = self.bookings.lock().unwrap();
        Ok(bookings
            .iter()
            .filter(|booking| booking.guest_id() == guest_id)
            .cloned()
            .collect())
    }

    async fn find_by_host_id(
        &self,
        _con: &mut (),
        _host_id: &UserId,
        limit: SelectLimit,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        let bookings = self.bookings.lock().unwrap();
        Ok(bookings
            .iter()
            .take(i64::from(limit) as usize)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl BookingModifier<()> for MockBookingRepository {
    async fn reserve(
        &self,
        _con: &mut (),
        booking: &Booking,
    ) -> error_stack::Result<(), KernelError> {
        let mut bookings = self.bookings.lock().unwrap();
        let conflict = bookings.iter().any(|existing| {
            existing.property_id() == booking.property_id()
                && existing.status().blocks_availability()
                && ranges_overlap(existing.stay(), booking.stay())
        });
        if conflict {
            return Err(error_stack::Report::new(KernelError::PropertyUnavailable));
        }
        bookings.push(booking.clone());
        Ok(())
    }

    async fn update(
        &self,
        _con: &mut (),
        booking: &Booking,
    ) -> error_stack::Result<(), KernelError> {
        let mut bookings = self.bookings.lock().unwrap();
        if let Some(existing) = bookings
            .iter_mut()
            .find(|existing| existing.id() == booking.id())
        {
            *existing = booking.clone();
        }
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct MockReviewRepository {
    reviews: Mutex<Vec<Review>>,
}

#[async_trait::async_trait]
impl ReviewQuery<()> for MockReviewRepository {
    async fn find_by_property_id(
        &self,
        _con: &mut (),
        property_id: &PropertyId,
    ) -> error_stack::Result<Vec<Review>, KernelError> {
        let reviews = self.reviews.lock().unwrap();
        Ok(reviews
            .iter()
            .filter(|review| review.property_id() == property_id)
            .cloned()
            .collect())
    }

    async fn ratings_by_property_id(
        &self,
        _con: &mut (),
        property_id: &PropertyId,
    ) -> error_stack::Result<Vec<i16>, KernelError> {
        let reviews = self.reviews.lock().unwrap();
        Ok(reviews
            .iter()
            .filter(|review| review.property_id() == property_id)
            .map(|review| *review.rating().as_ref())
            .collect())
    }

    async fn find_by_host_id(
        &self,
        _con: &mut (),
        _host_id: &UserId,
        limit: SelectLimit,
    ) -> error_stack::Result<Vec<Review>, KernelError> {
        let reviews = self.reviews.lock().unwrap();
        Ok(reviews
            .iter()
            .take(i64::from(limit) as usize)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl ReviewModifier<()> for MockReviewRepository {
    async fn create(&self, _con: &mut (), review: &Review) -> error_stack::Result<(), KernelError> {
        self.reviews.lock().unwrap().push(review.clone());
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct MockPaymentGateway {
    counter: AtomicI64,
}

#[async_trait::async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_intent(
        &self,
        _total: Decimal,
        _metadata: &IntentMetadata,
    ) -> error_stack::Result<PaymentIntent, KernelError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(PaymentIntent {
            id: PaymentIntentId::new(format!("pi_mock_{n}")),
            client_secret: "cs_test_secret".to_string(),
        })
    }

    fn verify_webhook(
        &self,
        _payload: &[u8],
        _signature_header: &str,
    ) -> error_stack::Result<PaymentEvent, KernelError> {
        Ok(PaymentEvent::Ignored)
    }
}

#[derive(Default)]
pub(crate) struct MockResponseCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MockResponseCache {
    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }
}

#[async_trait::async_trait]
impl ResponseCache for MockResponseCache {
    async fn fetch(&self, key: &str) -> error_stack::Result<Option<String>, KernelError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn store(
        &self,
        key: &str,
        value: &str,
        _ttl: Duration,
    ) -> error_stack::Result<(), KernelError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub(crate) struct MockRateLimiter {
    budget: AtomicI64,
}

impl Default for MockRateLimiter {
    fn default() -> Self {
        Self {
            budget: AtomicI64::new(i64::MAX),
        }
    }
}

impl MockRateLimiter {
    pub fn set_budget(&self, budget: i64) {
        self.budget.store(budget, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl RateLimiter for MockRateLimiter {
    async fn try_acquire(&self, _client: &str) -> error_stack::Result<bool, KernelError> {
        Ok(self.budget.fetch_sub(1, Ordering::SeqCst) > 0)
    }
}
