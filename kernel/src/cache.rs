use std::time::Duration;

use crate::KernelError;

/// Keyed response cache with TTL expiry. Backed by shared storage so
/// every instance sees the same entries; nothing lives in process memory.
#[async_trait::async_trait]
pub trait ResponseCache: 'static + Sync + Send {
    async fn fetch(&self, key: &str) -> error_stack::Result<Option<String>, KernelError>;

    async fn store(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnResponseCache: 'static + Sync + Send {
    type ResponseCache: ResponseCache;
    fn response_cache(&self) -> &Self::ResponseCache;
}

/// Windowed request counter. `try_acquire` returns false once the client
/// key has exhausted its allowance for the current window.
#[async_trait::async_trait]
pub trait RateLimiter: 'static + Sync + Send {
    async fn try_acquire(&self, client: &str) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnRateLimiter: 'static + Sync + Send {
    type RateLimiter: RateLimiter;
    fn rate_limiter(&self) -> &Self::RateLimiter;
}
