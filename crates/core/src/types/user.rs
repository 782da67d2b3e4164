//! User identifier type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`UserId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UserIdError {
    /// The input is empty or only whitespace.
    #[error("user id cannot be empty")]
    Empty,
}

/// Identifier of the user who owns a meal plan or shopping list, or who
/// created a recipe.
///
/// The web front-end uses the signed-in user's email address, but any
/// non-blank string is accepted. Surrounding whitespace is trimmed.
///
/// ## Examples
///
/// ```
/// use meal_planner_core::UserId;
///
/// assert_eq!(UserId::parse(" cook@example.com ").unwrap().as_str(), "cook@example.com");
/// assert!(UserId::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Parse a `UserId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty.
    pub fn parse(s: &str) -> Result<Self, UserIdError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(UserIdError::Empty);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Parse an optional raw value, treating `None` like an empty string.
    ///
    /// Request payloads carry user ids as optional fields; this collapses
    /// "absent" and "blank" into the same [`UserIdError::Empty`] case.
    ///
    /// # Errors
    ///
    /// Same as [`UserId::parse`].
    pub fn from_optional(s: Option<&str>) -> Result<Self, UserIdError> {
        Self::parse(s.unwrap_or_default())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `UserId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = UserIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for UserId {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for UserId {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for UserId {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let id = UserId::parse("  u1 ").unwrap();
        assert_eq!(id.as_str(), "u1");
    }

    #[test]
    fn test_parse_blank() {
        assert_eq!(UserId::parse(""), Err(UserIdError::Empty));
        assert_eq!(UserId::parse(" \t "), Err(UserIdError::Empty));
    }

    #[test]
    fn test_parse_accepts_long_ids() {
        let long = "é".repeat(300);
        assert_eq!(UserId::parse(&long).unwrap().as_str(), long);
    }

    #[test]
    fn test_from_optional_none_is_empty() {
        assert_eq!(UserId::from_optional(None), Err(UserIdError::Empty));
        assert_eq!(
            UserId::from_optional(Some("cook@example.com")).unwrap().as_str(),
            "cook@example.com"
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: UserId = serde_json::from_str("\"cook@example.com\"").unwrap();
        assert_eq!(ok.as_str(), "cook@example.com");

        let err = serde_json::from_str::<UserId>("\"  \"");
        assert!(err.is_err());
    }
}
