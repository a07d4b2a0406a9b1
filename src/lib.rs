use std::{sync::Arc, time::Duration};

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

pub mod config;
pub mod context;
pub mod domain;
pub mod errors;
pub mod http;
pub mod logging;
pub mod service;

use http::transport::TransportOptions;
use service::ProfileService;

pub struct AppState<S> {
    pub service: Arc<S>,
    pub options: TransportOptions,
    pub request_deadline: Option<Duration>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            options: self.options,
            request_deadline: self.request_deadline,
        }
    }
}

impl<S: ProfileService> AppState<S> {
    pub fn new(service: Arc<S>, options: TransportOptions) -> Self {
        Self {
            service,
            options,
            request_deadline: None,
        }
    }

    /// Attach a caller deadline of `now + budget` to every request.
    pub fn with_request_deadline(mut self, budget: Option<Duration>) -> Self {
        self.request_deadline = budget;
        self
    }
}

pub fn build_app<S: ProfileService>(state: AppState<S>) -> Router {
    let mut router = Router::new()
        .route("/profile", post(http::handlers::post_profile::<S>))
        .route(
            "/profile/{id}",
            get(http::handlers::get_profile::<S>).delete(http::handlers::delete_profile::<S>),
        )
        .layer(DefaultBodyLimit::max(state.options.max_body_bytes));

    if let Some(budget) = state.request_deadline {
        router = router.layer(middleware::from_fn_with_state(
            budget,
            context::attach_deadline,
        ));
    }

    router
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}
