use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use error_stack::Report;
use serde_json::json;

use application::service::PaymentEventService;
use kernel::interface::payment::{DependOnPaymentGateway, PaymentGateway};
use kernel::KernelError;

use crate::error::ErrorStatus;
use crate::handler::AppModule;

pub trait WebhookRouter {
    fn route_webhook(self) -> Self;
}

impl WebhookRouter for Router<AppModule> {
    fn route_webhook(self) -> Self {
        self.route(
            "/webhooks/payments",
            post(
                |State(module): State<AppModule>, headers: HeaderMap, body: Bytes| async move {
                    // The signature covers the exact bytes on the wire,
                    // so the body must stay raw until it is verified.
                    let signature = headers
                        .get("stripe-signature")
                        .and_then(|value| value.to_str().ok())
                        .ok_or_else(|| {
                            ErrorStatus::from(Report::new(KernelError::SignatureInvalid))
                        })?;
                    let event = module
                        .payment_gateway()
                        .verify_webhook(&body, signature)
                        .map_err(ErrorStatus::from)?;
                    module
                        .apply_payment_event(event)
                        .await
                        .map_err(ErrorStatus::from)?;
                    Ok::<_, ErrorStatus>(Json(json!({ "received": true })))
                },
            ),
        )
    }
}
