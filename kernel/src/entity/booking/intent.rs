use serde::{Deserialize, Serialize};

/// Opaque payment-processor handle correlating asynchronous payment
/// outcomes back to a booking. Must map 1:1 to a booking.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PaymentIntentId(String);

impl PaymentIntentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl AsRef<str> for PaymentIntentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<PaymentIntentId> for String {
    fn from(value: PaymentIntentId) -> Self {
        value.0
    }
}
