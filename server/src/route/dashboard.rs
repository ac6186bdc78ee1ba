use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use application::service::DashboardService;
use application::transfer::DashboardDto;

use crate::error::ErrorStatus;
use crate::handler::AppModule;

#[derive(Debug, Deserialize)]
pub struct DashboardRequest {
    host_id: Uuid,
}

/// Rate limiting keys off the caller's address when a proxy provides
/// one, falling back to the host id itself.
fn client_key(headers: &HeaderMap, host_id: Uuid) -> String {
    headers
        .get("x-forwarded-for")
        .or_else(|| headers.get("x-real-ip"))
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string)
        .unwrap_or_else(|| host_id.to_string())
}

pub trait DashboardRouter {
    fn route_dashboard(self) -> Self;
}

impl DashboardRouter for Router<AppModule> {
    fn route_dashboard(self) -> Self {
        self.route(
            "/host/dashboard",
            get(
                |State(module): State<AppModule>,
                 headers: HeaderMap,
                 Query(req): Query<DashboardRequest>| async move {
                    let client = client_key(&headers, req.host_id);
                    module
                        .host_dashboard(req.host_id, &client)
                        .await
                        .map(|dto: DashboardDto| Json(dto))
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
