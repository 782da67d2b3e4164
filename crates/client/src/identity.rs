//! Signed-in user lookup for the page views.

use serde::{Deserialize, Serialize};

use meal_planner_core::UserId;

/// The user a view acts on behalf of.
///
/// Serialized the way the sign-in flow stores it: `{"email": ..., "name": ...}`.
/// The email address doubles as the user ID on every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub email: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl UserIdentity {
    /// Identity with only an email address.
    #[must_use]
    pub const fn new(email: UserId) -> Self {
        Self { email, name: None }
    }

    /// Parse a stored identity record. Anything malformed counts as signed out.
    #[must_use]
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw)
            .map_err(|e| tracing::debug!(error = %e, "Ignoring malformed stored identity"))
            .ok()
    }

    /// The ID sent to the API.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.email
    }
}

/// Source of the current user identity.
pub trait IdentityStore: Send + Sync {
    /// The signed-in user, if any.
    fn current_user(&self) -> Option<UserIdentity>;
}

/// Fixed identity, set when the store is built.
#[derive(Debug, Clone, Default)]
pub struct MemoryIdentityStore {
    user: Option<UserIdentity>,
}

impl MemoryIdentityStore {
    #[must_use]
    pub const fn signed_in(user: UserIdentity) -> Self {
        Self { user: Some(user) }
    }

    #[must_use]
    pub const fn signed_out() -> Self {
        Self { user: None }
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn current_user(&self) -> Option<UserIdentity> {
        self.user.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let user = UserIdentity::from_json(r#"{"email": "cook@example.com", "name": "Cook"}"#)
            .unwrap();
        assert_eq!(user.user_id().as_str(), "cook@example.com");
        assert_eq!(user.name.as_deref(), Some("Cook"));

        assert!(UserIdentity::from_json(r#"{"email": "   "}"#).is_none());
        assert!(UserIdentity::from_json("null").is_none());
    }

    #[test]
    fn test_memory_store() {
        let user = UserIdentity::new(UserId::parse("cook@example.com").unwrap());
        assert_eq!(
            MemoryIdentityStore::signed_in(user.clone()).current_user(),
            Some(user)
        );
        assert_eq!(MemoryIdentityStore::signed_out().current_user(), None);
    }
}
