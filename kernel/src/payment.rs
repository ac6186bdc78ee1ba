use rust_decimal::Decimal;

use crate::entity::{BookingId, PaymentIntentId, PropertyId, UserId};
use crate::KernelError;

/// Handle returned by the processor for an in-progress charge. The client
/// secret is handed to the browser to complete the payment.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PaymentIntent {
    pub id: PaymentIntentId,
    pub client_secret: String,
}

/// Correlation fields attached to an intent so a human can trace it back
/// from the processor's dashboard.
#[derive(Debug, Clone)]
pub struct IntentMetadata {
    pub booking_id: BookingId,
    pub property_id: PropertyId,
    pub guest_id: UserId,
}

/// An asynchronous payment outcome delivered over the signed webhook.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PaymentEvent {
    Succeeded { intent: PaymentIntentId },
    Failed { intent: PaymentIntentId },
    /// Event types the marketplace does not consume.
    Ignored,
}

#[async_trait::async_trait]
pub trait PaymentGateway: 'static + Sync + Send {
    /// Request a charge for `total` (currency units, already rounded to
    /// 2 dp). No automatic retry; failures surface as `Upstream`.
    async fn create_intent(
        &self,
        total: Decimal,
        metadata: &IntentMetadata,
    ) -> error_stack::Result<PaymentIntent, KernelError>;

    /// Authenticate and decode a webhook callback. The signature check is
    /// mandatory; an invalid signature fails with `SignatureInvalid` and
    /// the payload is never interpreted.
    fn verify_webhook(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> error_stack::Result<PaymentEvent, KernelError>;
}

pub trait DependOnPaymentGateway: 'static + Sync + Send {
    type PaymentGateway: PaymentGateway;
    fn payment_gateway(&self) -> &Self::PaymentGateway;
}
