use std::time::Duration;

use deadpool_redis::redis::AsyncCommands;

use kernel::interface::cache::RateLimiter;
use kernel::KernelError;

use crate::database::redis::RedisDatabase;
use crate::error::ConvertError;

/// Windowed request counter: INCR on a per-client key, EXPIRE set when
/// the window opens. Shared through Redis so rate limiting is consistent
/// across instances.
pub struct RedisRateLimiter {
    database: RedisDatabase,
    limit: i64,
    window: Duration,
}

impl RedisRateLimiter {
    pub fn new(database: RedisDatabase, limit: i64, window: Duration) -> Self {
        Self {
            database,
            limit,
            window,
        }
    }

    fn key(client: &str) -> String {
        format!("rate:{client}")
    }
}

#[async_trait::async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn try_acquire(&self, client: &str) -> error_stack::Result<bool, KernelError> {
        let mut con = self.database.connection().await?;
        let key = Self::key(client);
        let count: i64 = con.incr(&key, 1i64).await.convert_error()?;
        if count == 1 {
            con.expire::<_, ()>(&key, self.window.as_secs() as i64)
                .await
                .convert_error()?;
        }
        Ok(count <= self.limit)
    }
}
