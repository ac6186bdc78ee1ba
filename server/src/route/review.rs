mod request;
mod response;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::Query;

use application::service::{GetReviewService, SubmitReviewService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::review::request::{CreateRequest, ListRequest, Transformer};
use crate::route::review::response::{CreatedPresenter, ListPresenter};

pub trait ReviewRouter {
    fn route_review(self) -> Self;
}

impl ReviewRouter for Router<AppModule> {
    fn route_review(self) -> Self {
        self.route(
            "/reviews",
            get(
                |State(module): State<AppModule>, Query(req): Query<ListRequest>| async move {
                    Controller::new(Transformer, ListPresenter)
                        .intake(req)
                        .handle(|property_id| async move {
                            module.list_reviews(property_id).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>, Json(req): Json<CreateRequest>| async move {
                    Controller::new(Transformer, CreatedPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.submit_review(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
