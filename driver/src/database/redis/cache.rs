use std::time::Duration;

use deadpool_redis::redis::AsyncCommands;

use kernel::interface::cache::ResponseCache;
use kernel::KernelError;

use crate::database::redis::RedisDatabase;
use crate::error::ConvertError;

/// Response cache entries share one Redis, so every instance serves the
/// same cached view and expiry is handled by the store itself.
pub struct RedisResponseCache {
    database: RedisDatabase,
}

impl RedisResponseCache {
    pub fn new(database: RedisDatabase) -> Self {
        Self { database }
    }

    fn key(key: &str) -> String {
        format!("cache:{key}")
    }
}

#[async_trait::async_trait]
impl ResponseCache for RedisResponseCache {
    async fn fetch(&self, key: &str) -> error_stack::Result<Option<String>, KernelError> {
        let mut con = self.database.connection().await?;
        let value: Option<String> = con.get(Self::key(key)).await.convert_error()?;
        Ok(value)
    }

    async fn store(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> error_stack::Result<(), KernelError> {
        let mut con = self.database.connection().await?;
        con.set_ex::<_, _, ()>(Self::key(key), value, ttl.as_secs())
            .await
            .convert_error()?;
        Ok(())
    }
}
