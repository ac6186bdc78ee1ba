mod request;
mod response;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::Query;
use uuid::Uuid;

use application::service::{
    CheckAvailabilityService, CreatePropertyService, GetPropertyService, SearchPropertyService,
};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::property::request::{
    AvailabilityRequest, CreateRequest, GetRequest, SearchRequest, Transformer,
};
use crate::route::property::response::{
    AvailabilityPresenter, CreatedPresenter, PagePresenter, PropertyPresenter,
};

pub trait PropertyRouter {
    fn route_property(self) -> Self;
}

impl PropertyRouter for Router<AppModule> {
    fn route_property(self) -> Self {
        self.route(
            "/properties",
            get(
                |State(module): State<AppModule>, Query(req): Query<SearchRequest>| async move {
                    Controller::new(Transformer, PagePresenter)
                        .intake(req)
                        .handle(|dto| async move { module.search_properties(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>, Json(req): Json<CreateRequest>| async move {
                    Controller::new(Transformer, CreatedPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.create_property(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/properties/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, PropertyPresenter)
                        .intake(GetRequest::new(id))
                        .handle(|id| async move { module.get_property(id).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/properties/:id/availability",
            get(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Query(req): Query<AvailabilityRequest>| async move {
                    Controller::new(Transformer, AvailabilityPresenter)
                        .try_intake((id, req))
                        .map_err(ErrorStatus::from)?
                        .handle(|dto| async move { module.check_availability(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
