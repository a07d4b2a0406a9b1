//! Axum handlers binding the profile routes to a [`ProfileService`]
//!
//! Each handler runs the same staging: decode the request, invoke the service, encode the result.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    response::Response,
};

use crate::{
    context::{CallerDeadline, RequestContext, Route},
    domain::profile::ProfileRequest,
    errors::AppError,
    http::transport::{
        decode_delete_profile_request, decode_get_profile_request, decode_post_profile_request,
        encode_response, request_body, route_vars, RouteVars,
    },
    service::ProfileService,
    AppState,
};

pub async fn post_profile<S: ProfileService>(
    State(state): State<AppState<S>>,
    CallerDeadline(deadline): CallerDeadline,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let ctx = RequestContext::new(Route::PostProfile, deadline);
    let body = request_body(body)?;
    let request = decode_post_profile_request(&ctx, &state.options, &body)?;
    serve(&state, &ctx, request.into()).await
}

pub async fn get_profile<S: ProfileService>(
    State(state): State<AppState<S>>,
    CallerDeadline(deadline): CallerDeadline,
    vars: Result<Path<RouteVars>, PathRejection>,
) -> Result<Response, AppError> {
    let ctx = RequestContext::new(Route::GetProfile, deadline);
    let vars = route_vars(&ctx, vars)?;
    let request = decode_get_profile_request(&ctx, &vars)?;
    serve(&state, &ctx, request.into()).await
}

pub async fn delete_profile<S: ProfileService>(
    State(state): State<AppState<S>>,
    CallerDeadline(deadline): CallerDeadline,
    vars: Result<Path<RouteVars>, PathRejection>,
) -> Result<Response, AppError> {
    let ctx = RequestContext::new(Route::DeleteProfile, deadline);
    let vars = route_vars(&ctx, vars)?;
    let request = decode_delete_profile_request(&ctx, &vars)?;
    serve(&state, &ctx, request.into()).await
}

async fn serve<S: ProfileService>(
    state: &AppState<S>,
    ctx: &RequestContext,
    request: ProfileRequest,
) -> Result<Response, AppError> {
    let response = request.invoke(state.service.as_ref(), ctx).await?;
    encode_response(ctx, &response)
}
