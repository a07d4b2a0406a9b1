use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{context::RequestContext, domain::profile::Profile};

/// Error returned by a [`ProfileService`]; the transport only reads its message.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ServiceError {
    message: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[async_trait]
pub trait ProfileService: Send + Sync + 'static {
    type Created: Serialize + Send;
    type Fetched: Serialize + Send;
    type Removed: Serialize + Send;

    async fn create_profile(
        &self,
        ctx: &RequestContext,
        profile: Profile,
    ) -> Result<Self::Created, ServiceError>;

    async fn fetch_profile(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<Self::Fetched, ServiceError>;

    async fn remove_profile(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<Self::Removed, ServiceError>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InMemoryError {
    #[error("already exists")]
    AlreadyExists,
    #[error("not found")]
    NotFound,
}

impl From<InMemoryError> for ServiceError {
    fn from(err: InMemoryError) -> Self {
        Self::new(err.to_string())
    }
}

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct Acknowledged {}

#[derive(Debug, Serialize, PartialEq)]
pub struct FetchedProfile {
    pub profile: Profile,
}

/// Process-local collaborator backing the `profilesvc` binary.
#[derive(Debug, Default)]
pub struct InMemoryProfileService {
    profiles: RwLock<HashMap<String, Profile>>,
}

impl InMemoryProfileService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileService for InMemoryProfileService {
    type Created = Acknowledged;
    type Fetched = FetchedProfile;
    type Removed = Acknowledged;

    async fn create_profile(
        &self,
        ctx: &RequestContext,
        profile: Profile,
    ) -> Result<Acknowledged, ServiceError> {
        let key = profile.id().unwrap_or_default().to_string();
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&key) {
            return Err(InMemoryError::AlreadyExists.into());
        }
        debug!(route = ctx.route().as_str(), id = %key, "storing profile");
        profiles.insert(key, profile);
        Ok(Acknowledged {})
    }

    async fn fetch_profile(
        &self,
        _ctx: &RequestContext,
        id: &str,
    ) -> Result<FetchedProfile, ServiceError> {
        let profiles = self.profiles.read().await;
        let profile = profiles.get(id).cloned().ok_or(InMemoryError::NotFound)?;
        Ok(FetchedProfile { profile })
    }

    async fn remove_profile(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<Acknowledged, ServiceError> {
        let mut profiles = self.profiles.write().await;
        profiles.remove(id).ok_or(InMemoryError::NotFound)?;
        debug!(route = ctx.route().as_str(), id, "removed profile");
        Ok(Acknowledged {})
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::context::Route;

    fn profile(value: serde_json::Value) -> Profile {
        serde_json::from_value(value).expect("valid profile")
    }

    #[tokio::test]
    async fn create_then_fetch_returns_stored_profile() {
        let service = InMemoryProfileService::new();
        let ctx = RequestContext::new(Route::PostProfile, None);
        let stored = profile(json!({"id": "p1", "name": "Ada"}));

        service
            .create_profile(&ctx, stored.clone())
            .await
            .expect("create");
        let fetched = service.fetch_profile(&ctx, "p1").await.expect("fetch");

        assert_eq!(fetched.profile, stored);
    }

    #[tokio::test]
    async fn duplicate_create_is_rejected() {
        let service = InMemoryProfileService::new();
        let ctx = RequestContext::new(Route::PostProfile, None);

        service
            .create_profile(&ctx, profile(json!({"id": "p1"})))
            .await
            .expect("first create");
        let err = service
            .create_profile(&ctx, profile(json!({"id": "p1", "name": "again"})))
            .await
            .expect_err("duplicate id");

        assert_eq!(err.message(), "already exists");
    }

    #[tokio::test]
    async fn remove_deletes_and_second_remove_fails() {
        let service = InMemoryProfileService::new();
        let ctx = RequestContext::new(Route::DeleteProfile, None);
        service
            .create_profile(&ctx, profile(json!({"id": "gone"})))
            .await
            .expect("create");

        service.remove_profile(&ctx, "gone").await.expect("remove");
        let err = service
            .remove_profile(&ctx, "gone")
            .await
            .expect_err("already removed");

        assert_eq!(err.message(), "not found");
        assert!(service.fetch_profile(&ctx, "gone").await.is_err());
    }

    #[tokio::test]
    async fn profile_without_id_is_stored_under_empty_key() {
        let service = InMemoryProfileService::new();
        let ctx = RequestContext::new(Route::PostProfile, None);

        service
            .create_profile(&ctx, profile(json!({"name": "anonymous"})))
            .await
            .expect("create");

        assert!(service.fetch_profile(&ctx, "").await.is_ok());
    }
}
