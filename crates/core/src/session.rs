//! # Session Gate
//!
//! The session context owned by the app root. It is replaced wholesale on
//! login and logout, never edited in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether the user is logged in, and as whom
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated {
        name: String,
        email: String,
        since: DateTime<Utc>,
    },
}

impl Session {
    /// A session that started now
    pub fn authenticated(name: impl Into<String>, email: impl Into<String>) -> Self {
        Session::Authenticated {
            name: name.into(),
            email: email.into(),
            since: Utc::now(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    /// Display name of the logged-in user
    pub fn user(&self) -> Option<&str> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated { name, .. } => Some(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_anonymous() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_authenticated_serialization() {
        let session = Session::authenticated("Ada", "ada@example.com");
        assert_eq!(session.user(), Some("Ada"));

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["state"], "authenticated");
        assert_eq!(json["email"], "ada@example.com");
    }
}
