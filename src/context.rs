//! Per-request context threaded through decode, invoke and encode.

use std::{
    convert::Infallible,
    time::{Duration, Instant},
};

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

/// The three bound routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    PostProfile,
    GetProfile,
    DeleteProfile,
}

impl Route {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PostProfile => "POST /profile",
            Self::GetProfile => "GET /profile/{id}",
            Self::DeleteProfile => "DELETE /profile/{id}",
        }
    }
}

/// Point in time by which the caller wants an answer.
///
/// Attached by the host as a request extension and never enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(pub Instant);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    route: Route,
    deadline: Option<Deadline>,
}

impl RequestContext {
    pub fn new(route: Route, deadline: Option<Deadline>) -> Self {
        Self { route, deadline }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn deadline(&self) -> Option<Deadline> {
        self.deadline
    }
}

/// Extractor for the optional [`Deadline`] extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallerDeadline(pub Option<Deadline>);

impl<S> FromRequestParts<S> for CallerDeadline
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<Deadline>().copied()))
    }
}

pub async fn attach_deadline(
    State(budget): State<Duration>,
    mut request: Request,
    next: Next,
) -> Response {
    request
        .extensions_mut()
        .insert(Deadline(Instant::now() + budget));
    next.run(request).await
}
