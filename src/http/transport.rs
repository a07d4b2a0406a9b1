//! Decode and encode steps of the per-route pipeline.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path,
    },
    http::header,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::debug;

use crate::{
    context::RequestContext,
    domain::profile::{DeleteProfileRequest, GetProfileRequest, PostProfileRequest, Profile},
    errors::AppError,
};

/// Path variables bound by the router for a request.
pub type RouteVars = HashMap<String, String>;

pub const ID_VAR: &str = "id";

/// Largest request body buffered before answering 413.
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportOptions {
    /// Echo raw POST bodies at DEBUG level. Bodies carry profile data, keep off in production.
    pub log_request_bodies: bool,
    pub max_body_bytes: usize,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            log_request_bodies: false,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Maps a failed body read (including an exceeded limit) into [`AppError`].
pub fn request_body(extracted: Result<Bytes, BytesRejection>) -> Result<Bytes, AppError> {
    extracted.map_err(AppError::Body)
}

/// Maps a failed path extraction into [`AppError`].
///
/// A route without any bound variables is a routing defect, anything else is a bad client path.
pub fn route_vars(
    ctx: &RequestContext,
    extracted: Result<Path<RouteVars>, PathRejection>,
) -> Result<RouteVars, AppError> {
    match extracted {
        Ok(Path(vars)) => Ok(vars),
        Err(PathRejection::MissingPathParams(_)) => {
            Err(AppError::bad_routing(ctx.route().as_str(), ID_VAR))
        }
        Err(rejection) => Err(AppError::Path(rejection)),
    }
}

pub fn decode_post_profile_request(
    ctx: &RequestContext,
    options: &TransportOptions,
    body: &Bytes,
) -> Result<PostProfileRequest, AppError> {
    let profile: Profile = serde_json::from_slice(body).map_err(AppError::Decode)?;
    if options.log_request_bodies {
        debug!(
            route = ctx.route().as_str(),
            body = %String::from_utf8_lossy(body),
            "decoded request body"
        );
    }
    Ok(PostProfileRequest { profile })
}

pub fn decode_get_profile_request(
    ctx: &RequestContext,
    vars: &RouteVars,
) -> Result<GetProfileRequest, AppError> {
    let id = route_var(ctx, vars, ID_VAR)?;
    Ok(GetProfileRequest { id })
}

pub fn decode_delete_profile_request(
    ctx: &RequestContext,
    vars: &RouteVars,
) -> Result<DeleteProfileRequest, AppError> {
    let id = route_var(ctx, vars, ID_VAR)?;
    Ok(DeleteProfileRequest { id })
}

pub fn encode_response<T: Serialize>(
    _ctx: &RequestContext,
    response: &T,
) -> Result<Response, AppError> {
    let body = serde_json::to_vec(response).map_err(AppError::Encode)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

fn route_var(
    ctx: &RequestContext,
    vars: &RouteVars,
    name: &'static str,
) -> Result<String, AppError> {
    vars.get(name)
        .cloned()
        .ok_or_else(|| AppError::bad_routing(ctx.route().as_str(), name))
}
