use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    context::RequestContext,
    service::{ProfileService, ServiceError},
};

pub const ID_MEMBER: &str = "id";

/// A JSON object identified by its `id` member.
///
/// The object is kept as received; `id` may be absent or `null` but is otherwise a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Profile {
    members: Map<String, Value>,
}

#[derive(Debug, Error)]
#[error("profile id must be a string, found {found}")]
pub struct InvalidProfileId {
    found: Value,
}

impl Profile {
    pub fn id(&self) -> Option<&str> {
        self.members.get(ID_MEMBER).and_then(Value::as_str)
    }
}

impl TryFrom<Map<String, Value>> for Profile {
    type Error = InvalidProfileId;

    fn try_from(members: Map<String, Value>) -> Result<Self, Self::Error> {
        match members.get(ID_MEMBER) {
            None | Some(Value::Null) | Some(Value::String(_)) => Ok(Self { members }),
            Some(other) => Err(InvalidProfileId {
                found: other.clone(),
            }),
        }
    }
}

impl From<Profile> for Map<String, Value> {
    fn from(profile: Profile) -> Self {
        profile.members
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostProfileRequest {
    pub profile: Profile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetProfileRequest {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteProfileRequest {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileRequest {
    Post(PostProfileRequest),
    Get(GetProfileRequest),
    Delete(DeleteProfileRequest),
}

impl From<PostProfileRequest> for ProfileRequest {
    fn from(request: PostProfileRequest) -> Self {
        Self::Post(request)
    }
}

impl From<GetProfileRequest> for ProfileRequest {
    fn from(request: GetProfileRequest) -> Self {
        Self::Get(request)
    }
}

impl From<DeleteProfileRequest> for ProfileRequest {
    fn from(request: DeleteProfileRequest) -> Self {
        Self::Delete(request)
    }
}

/// Result of a service call; serializes exactly as the wrapped value.
#[derive(Serialize)]
#[serde(untagged, bound(serialize = ""))]
pub enum ProfileResponse<S: ProfileService> {
    Created(S::Created),
    Fetched(S::Fetched),
    Removed(S::Removed),
}

impl ProfileRequest {
    pub async fn invoke<S: ProfileService>(
        self,
        service: &S,
        ctx: &RequestContext,
    ) -> Result<ProfileResponse<S>, ServiceError> {
        match self {
            Self::Post(PostProfileRequest { profile }) => service
                .create_profile(ctx, profile)
                .await
                .map(ProfileResponse::Created),
            Self::Get(GetProfileRequest { id }) => service
                .fetch_profile(ctx, &id)
                .await
                .map(ProfileResponse::Fetched),
            Self::Delete(DeleteProfileRequest { id }) => service
                .remove_profile(ctx, &id)
                .await
                .map(ProfileResponse::Removed),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn profile_keeps_unknown_members() {
        let raw = json!({
            "id": "1234",
            "name": "Ada",
            "addresses": [{"id": "home", "location": "London"}],
            "active": true
        });

        let profile: Profile = serde_json::from_value(raw.clone()).expect("profile");

        assert_eq!(profile.id(), Some("1234"));
        assert_eq!(serde_json::to_value(&profile).expect("serialize"), raw);
    }

    #[test]
    fn null_id_round_trips() {
        let raw = json!({"id": null, "name": "x"});

        let profile: Profile = serde_json::from_value(raw.clone()).expect("profile");

        assert_eq!(profile.id(), None);
        assert_eq!(serde_json::to_value(&profile).expect("serialize"), raw);
    }

    #[test]
    fn profile_without_id_round_trips() {
        let raw = json!({"name": "nameless"});

        let profile: Profile = serde_json::from_value(raw.clone()).expect("profile");

        assert_eq!(profile.id(), None);
        assert_eq!(serde_json::to_value(&profile).expect("serialize"), raw);
    }

    #[test]
    fn non_object_and_non_string_id_are_rejected() {
        assert!(serde_json::from_value::<Profile>(json!([1, 2])).is_err());
        assert!(serde_json::from_value::<Profile>(json!("profile")).is_err());
        assert!(serde_json::from_value::<Profile>(json!({"id": 7})).is_err());
        assert!(serde_json::from_value::<Profile>(json!({"id": {"nested": true}})).is_err());
        assert!(serde_json::from_value::<Profile>(Value::Null).is_err());
    }
}
