mod request;
mod response;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::Query;
use uuid::Uuid;

use application::service::{CancelBookingService, GetBookingService, ReserveBookingService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::booking::request::{CancelRequest, CreateRequest, ListRequest, Transformer};
use crate::route::booking::response::{BookingPresenter, CreatedPresenter, ListPresenter};

pub trait BookingRouter {
    fn route_booking(self) -> Self;
}

impl BookingRouter for Router<AppModule> {
    fn route_booking(self) -> Self {
        self.route(
            "/bookings",
            get(
                |State(module): State<AppModule>, Query(req): Query<ListRequest>| async move {
                    Controller::new(Transformer, ListPresenter)
                        .try_intake(req)
                        .map_err(ErrorStatus::from)?
                        .handle(|scope| async move { module.list_bookings(scope).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>, Json(req): Json<CreateRequest>| async move {
                    Controller::new(Transformer, CreatedPresenter)
                        .try_intake(req)
                        .map_err(ErrorStatus::from)?
                        .handle(|dto| async move { module.reserve_booking(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/bookings/:id/cancel",
            post(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<CancelRequest>| async move {
                    Controller::new(Transformer, BookingPresenter)
                        .try_intake((id, req))
                        .map_err(ErrorStatus::from)?
                        .handle(|dto| async move { module.cancel_booking(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
