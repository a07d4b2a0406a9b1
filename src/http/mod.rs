//! HTTP transport for the profile service
//!
//! Binds `POST /profile`, `GET /profile/{id}` and `DELETE /profile/{id}` to a [`crate::service::ProfileService`].

pub mod handlers;
pub mod transport;
