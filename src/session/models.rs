/*!
 * Data models for auth sessions and access levels.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An authenticated user session as issued by the auth service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Auth state change pushed by the auth service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Session),
    TokenRefreshed(Session),
    SignedOut,
}

impl AuthEvent {
    /// Session carried by the event, `None` for sign-out
    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthEvent::SignedIn(session) | AuthEvent::TokenRefreshed(session) => Some(session),
            AuthEvent::SignedOut => None,
        }
    }
}

/// Application role, stored by the datastore as `app_role`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "student" => Ok(Role::Student),
            other => Err(anyhow::anyhow!("Unknown role: {}", other)),
        }
    }
}

/// Resolved access level of the current user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AccessState {
    #[default]
    SignedOut,
    Student(Session),
    Admin(Session),
}

impl AccessState {
    pub fn is_admin(&self) -> bool {
        matches!(self, AccessState::Admin(_))
    }

    pub fn is_signed_in(&self) -> bool {
        !matches!(self, AccessState::SignedOut)
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            AccessState::Student(session) | AccessState::Admin(session) => Some(session),
            AccessState::SignedOut => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            AccessState::Student(_) => Some(Role::Student),
            AccessState::Admin(_) => Some(Role::Admin),
            AccessState::SignedOut => None,
        }
    }
}
