//! User records as exchanged with the users API.
//!
//! The backend serialises timestamps either as RFC 3339 strings or as naive
//! ISO-8601 local date-times. Both are accepted; anything else is treated as
//! an absent timestamp so one odd record cannot fail a whole list fetch.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Opaque user identifier.
///
/// The API hands out numeric ids, but the client never does arithmetic on
/// them, so string ids are accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        value.parse().unwrap_or_else(|never: Infallible| match never {})
    }
}

impl FromStr for UserId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.parse::<i64>() {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Text(trimmed.to_owned()),
        })
    }
}

/// A point in time, normalised to UTC wall-clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    const NAIVE_FORMATS: [&'static str; 3] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];

    /// Parse an RFC 3339 or naive ISO-8601 timestamp.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self(with_offset.naive_utc()));
        }

        Self::NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
            .map(Self)
    }

    /// Calendar date for card display.
    pub fn date_label(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%.f"))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(Timestamp::parse))
}

/// A user record from the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<Timestamp>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<Timestamp>,
}

impl User {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Whether `needle` (already lower-cased) occurs in the name or email.
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
    }

    /// Avatar initials: first letter of up to two words, upper-cased.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

/// Request body for creating or updating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
}

impl UserDraft {
    /// Trim and validate form input.
    pub fn new(name: &str, email: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        let email = email.trim();

        if name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if email.is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail(email.to_owned()));
        }

        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
        })
    }

    /// Draft pre-filled from an existing user, with optional overrides.
    pub fn merged(
        user: &User,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Self::new(
            name.unwrap_or(user.name.as_str()),
            email.unwrap_or(user.email.as_str()),
        )
    }
}

/// `local@domain.tld`: one `@`, no whitespace, and a dot inside the domain
/// with something on either side of it.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_untagged() {
        let numeric: UserId = serde_json::from_str("42").unwrap();
        assert_eq!(numeric, UserId::Number(42));

        let text: UserId = serde_json::from_str("\"u-7\"").unwrap();
        assert_eq!(text, UserId::Text("u-7".to_owned()));

        assert_eq!(UserId::from("17"), UserId::Number(17));
        assert_eq!(UserId::from("abc"), UserId::Text("abc".to_owned()));
        assert_eq!(UserId::Number(3).to_string(), "3");
    }

    #[test]
    fn test_timestamp_accepts_naive_and_rfc3339() {
        let naive = Timestamp::parse("2024-03-01T10:15:30").unwrap();
        let fractional = Timestamp::parse("2024-03-01T10:15:30.123456").unwrap();
        let offset = Timestamp::parse("2024-03-01T12:15:30+02:00").unwrap();

        assert_eq!(naive, offset);
        assert!(fractional > naive);
        assert_eq!(naive.date_label(), "2024-03-01");
        assert!(Timestamp::parse("2024-03-01").is_some());
    }

    #[test]
    fn test_timestamp_rejects_garbage() {
        assert!(Timestamp::parse("").is_none());
        assert!(Timestamp::parse("yesterday").is_none());
    }

    #[test]
    fn test_user_deserializes_api_shape() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Amy Pond",
            "email": "amy@example.com",
            "createdAt": "2024-01-02T03:04:05",
            "updatedAt": "not a date"
        }))
        .unwrap();

        assert_eq!(user.id, UserId::Number(1));
        assert_eq!(user.created_at, Timestamp::parse("2024-01-02T03:04:05"));
        assert!(user.updated_at.is_none());
    }

    #[test]
    fn test_user_deserializes_without_timestamps() {
        let user: User = serde_json::from_str(r#"{"id":"x","name":"Bob","email":"bob@x.com"}"#)
            .unwrap();
        assert!(user.created_at.is_none());
        assert!(user.updated_at.is_none());
    }

    #[test]
    fn test_initials() {
        assert_eq!(User::new(1, "amy pond", "a@b.co").initials(), "AP");
        assert_eq!(User::new(1, "Mary Jane Watson", "a@b.co").initials(), "MJ");
        assert_eq!(User::new(1, "  Bob  ", "a@b.co").initials(), "B");
    }

    #[test]
    fn test_matches_is_case_insensitive_on_name_and_email() {
        let user = User::new(1, "Bob Stone", "Rock@Example.com");
        assert!(user.matches(""));
        assert!(user.matches("bob"));
        assert!(user.matches("rock@"));
        assert!(!user.matches("amy"));
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("bob@x.com"));
        assert!(is_valid_email("a.b@sub.domain.org"));
        assert!(!is_valid_email("bob@x"));
        assert!(!is_valid_email("bob@.com"));
        assert!(!is_valid_email("bob@x."));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("bob@@x.com"));
        assert!(!is_valid_email("bo b@x.com"));
    }

    #[test]
    fn test_draft_trims_and_validates() {
        let draft = UserDraft::new("  Amy  ", " amy@x.com ").unwrap();
        assert_eq!(draft.name, "Amy");
        assert_eq!(draft.email, "amy@x.com");

        assert_eq!(
            UserDraft::new("   ", "amy@x.com"),
            Err(ValidationError::MissingField("name"))
        );
        assert_eq!(
            UserDraft::new("Amy", ""),
            Err(ValidationError::MissingField("email"))
        );
        assert_eq!(
            UserDraft::new("Amy", "amy"),
            Err(ValidationError::InvalidEmail("amy".to_owned()))
        );
    }

    #[test]
    fn test_draft_merged_keeps_unset_fields() {
        let user = User::new(5, "Amy", "amy@x.com");
        let draft = UserDraft::merged(&user, None, Some("amy@y.org")).unwrap();
        assert_eq!(draft.name, "Amy");
        assert_eq!(draft.email, "amy@y.org");
    }
}
