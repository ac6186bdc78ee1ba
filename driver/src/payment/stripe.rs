use std::time::Duration;

use error_stack::{Report, ResultExt};
use hmac::{Hmac, Mac};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use sha2::Sha256;
use time::OffsetDateTime;

use kernel::interface::payment::{IntentMetadata, PaymentEvent, PaymentGateway, PaymentIntent};
use kernel::prelude::entity::PaymentIntentId;
use kernel::KernelError;

use crate::env;
use crate::error::ConvertError;

const STRIPE_SECRET_KEY: &str = "STRIPE_SECRET_KEY";
const STRIPE_WEBHOOK_SECRET: &str = "STRIPE_WEBHOOK_SECRET";

const API_URL: &str = "https://api.stripe.com/v1/payment_intents";
const EVENT_SUCCEEDED: &str = "payment_intent.succeeded";
const EVENT_FAILED: &str = "payment_intent.payment_failed";

/// Accepted clock drift between the webhook signature timestamp and now.
const SIGNATURE_TOLERANCE_SECS: i64 = 300;

type HmacSha256 = Hmac<Sha256>;

pub struct StripeGateway {
    http: reqwest::Client,
    secret_key: String,
    webhook_secret: String,
}

impl StripeGateway {
    pub fn new() -> error_stack::Result<Self, KernelError> {
        let secret_key = env(STRIPE_SECRET_KEY).convert_error()?;
        let webhook_secret = env(STRIPE_WEBHOOK_SECRET).convert_error()?;
        Ok(Self::with_credentials(secret_key, webhook_secret))
    }

    pub fn with_credentials(
        secret_key: impl Into<String>,
        webhook_secret: impl Into<String>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self {
            http,
            secret_key: secret_key.into(),
            webhook_secret: webhook_secret.into(),
        }
    }

    fn verify_signature(
        &self,
        payload: &[u8],
        signature_header: &str,
        now: OffsetDateTime,
    ) -> error_stack::Result<(), KernelError> {
        let mut timestamp: Option<i64> = None;
        let mut candidates: Vec<&str> = Vec::new();
        for part in signature_header.split(',') {
            match part.trim().split_once('=') {
                Some(("t", value)) => timestamp = value.parse().ok(),
                Some(("v1", value)) => candidates.push(value),
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or_else(|| Report::new(KernelError::SignatureInvalid))?;
        if (now.unix_timestamp() - timestamp).abs() > SIGNATURE_TOLERANCE_SECS {
            return Err(Report::new(KernelError::SignatureInvalid)
                .attach_printable("signature timestamp outside tolerance"));
        }
        if candidates.is_empty() {
            return Err(Report::new(KernelError::SignatureInvalid));
        }

        for candidate in candidates {
            let Ok(expected) = hex::decode(candidate) else {
                continue;
            };
            // HMAC accepts any key length; the error arm is unreachable.
            let mut mac = HmacSha256::new_from_slice(self.webhook_secret.as_bytes())
                .map_err(|_| Report::new(KernelError::Internal))?;
            mac.update(format!("{timestamp}.").as_bytes());
            mac.update(payload);
            if mac.verify_slice(&expected).is_ok() {
                return Ok(());
            }
        }
        Err(Report::new(KernelError::SignatureInvalid))
    }

    fn decode_event(payload: &[u8]) -> error_stack::Result<PaymentEvent, KernelError> {
        let event: WebhookEvent = serde_json::from_slice(payload)
            .change_context_lazy(|| KernelError::validation("Malformed webhook payload"))?;
        let outcome = match event.kind.as_str() {
            EVENT_SUCCEEDED => PaymentEvent::Succeeded {
                intent: PaymentIntentId::new(event.data.object.id),
            },
            EVENT_FAILED => PaymentEvent::Failed {
                intent: PaymentIntentId::new(event.data.object.id),
            },
            other => {
                tracing::debug!("unhandled webhook event type: {other}");
                PaymentEvent::Ignored
            }
        };
        Ok(outcome)
    }
}

#[derive(Debug, Deserialize)]
struct WebhookEvent {
    #[serde(rename = "type")]
    kind: String,
    data: WebhookData,
}

#[derive(Debug, Deserialize)]
struct WebhookData {
    object: WebhookObject,
}

#[derive(Debug, Deserialize)]
struct WebhookObject {
    id: String,
}

#[derive(Debug, Deserialize)]
struct CreatedIntent {
    id: String,
    client_secret: String,
}

#[async_trait::async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_intent(
        &self,
        total: Decimal,
        metadata: &IntentMetadata,
    ) -> error_stack::Result<PaymentIntent, KernelError> {
        // The processor wants minor units.
        let amount = (total * Decimal::from(100))
            .round()
            .to_i64()
            .ok_or_else(|| {
                Report::new(KernelError::validation("Amount exceeds maximum limit"))
            })?;
        if amount <= 0 {
            return Err(Report::new(KernelError::validation(
                "Amount must be a positive number",
            )));
        }

        let form = [
            ("amount", amount.to_string()),
            ("currency", "usd".to_string()),
            ("automatic_payment_methods[enabled]", "true".to_string()),
            (
                "metadata[booking_id]",
                metadata.booking_id.as_ref().to_string(),
            ),
            (
                "metadata[property_id]",
                metadata.property_id.as_ref().to_string(),
            ),
            ("metadata[guest_id]", metadata.guest_id.as_ref().to_string()),
        ];

        let response = self
            .http
            .post(API_URL)
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await
            .change_context_lazy(|| KernelError::Upstream)?
            .error_for_status()
            .change_context_lazy(|| KernelError::Upstream)?;

        let created: CreatedIntent = response
            .json()
            .await
            .change_context_lazy(|| KernelError::Upstream)?;

        Ok(PaymentIntent {
            id: PaymentIntentId::new(created.id),
            client_secret: created.client_secret,
        })
    }

    fn verify_webhook(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> error_stack::Result<PaymentEvent, KernelError> {
        self.verify_signature(payload, signature_header, OffsetDateTime::now_utc())?;
        Self::decode_event(payload)
    }
}

#[cfg(test)]
mod test {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;
    use time::OffsetDateTime;

    use kernel::interface::payment::{PaymentEvent, PaymentGateway};
    use kernel::prelude::entity::PaymentIntentId;
    use kernel::KernelError;

    use super::StripeGateway;

    const SECRET: &str = "whsec_test_secret";

    fn gateway() -> StripeGateway {
        StripeGateway::with_credentials("sk_test_key", SECRET)
    }

    fn sign(payload: &[u8], timestamp: i64) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(format!("{timestamp}.").as_bytes());
        mac.update(payload);
        let digest = hex::encode(mac.finalize().into_bytes());
        format!("t={timestamp},v1={digest}")
    }

    #[test]
    fn valid_signature_decodes_success_event() {
        let payload =
            br#"{"type":"payment_intent.succeeded","data":{"object":{"id":"pi_123"}}}"#;
        let header = sign(payload, OffsetDateTime::now_utc().unix_timestamp());
        let event = gateway().verify_webhook(payload, &header).unwrap();
        assert_eq!(
            event,
            PaymentEvent::Succeeded {
                intent: PaymentIntentId::new("pi_123"),
            }
        );
    }

    #[test]
    fn failed_payment_event_decodes() {
        let payload =
            br#"{"type":"payment_intent.payment_failed","data":{"object":{"id":"pi_9"}}}"#;
        let header = sign(payload, OffsetDateTime::now_utc().unix_timestamp());
        let event = gateway().verify_webhook(payload, &header).unwrap();
        assert_eq!(
            event,
            PaymentEvent::Failed {
                intent: PaymentIntentId::new("pi_9"),
            }
        );
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let payload =
            br#"{"type":"payment_intent.succeeded","data":{"object":{"id":"pi_123"}}}"#;
        let header = sign(payload, OffsetDateTime::now_utc().unix_timestamp());
        let tampered =
            br#"{"type":"payment_intent.succeeded","data":{"object":{"id":"pi_999"}}}"#;
        let report = gateway().verify_webhook(tampered, &header).unwrap_err();
        assert!(matches!(
            report.current_context(),
            KernelError::SignatureInvalid
        ));
    }

    #[test]
    fn stale_timestamp_is_rejected() {
        let payload =
            br#"{"type":"payment_intent.succeeded","data":{"object":{"id":"pi_123"}}}"#;
        let header = sign(payload, OffsetDateTime::now_utc().unix_timestamp() - 4000);
        let report = gateway().verify_webhook(payload, &header).unwrap_err();
        assert!(matches!(
            report.current_context(),
            KernelError::SignatureInvalid
        ));
    }

    #[test]
    fn garbage_header_is_rejected() {
        let payload = br#"{}"#;
        let report = gateway().verify_webhook(payload, "not-a-header").unwrap_err();
        assert!(matches!(
            report.current_context(),
            KernelError::SignatureInvalid
        ));
    }

    #[test]
    fn unconsumed_event_types_are_ignored() {
        let payload = br#"{"type":"charge.refunded","data":{"object":{"id":"ch_1"}}}"#;
        let header = sign(payload, OffsetDateTime::now_utc().unix_timestamp());
        let event = gateway().verify_webhook(payload, &header).unwrap();
        assert_eq!(event, PaymentEvent::Ignored);
    }
}
