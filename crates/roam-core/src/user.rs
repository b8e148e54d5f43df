//! # User Types
//!
//! Hosts own listings; guests make bookings and leave reviews.
//! Registration and authentication live outside this service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Host,
    Guest,
}

impl Default for Role {
    fn default() -> Self {
        Role::Guest
    }
}

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,

    pub first_name: String,

    pub last_name: String,

    /// Email address used for all notifications
    pub email: String,

    /// Account role
    #[serde(default)]
    pub role: Role,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a generated ID
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            role,
            phone_number: None,
            created_at: Utc::now(),
        }
    }

    /// Builder: set phone number
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone_number = Some(phone.into());
        self
    }

    /// Display name used in emails and gateway customer info
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_host(&self) -> bool {
        matches!(self.role, Role::Host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let user = User::new("Abel", "Tesfaye", "abel@example.com", Role::Guest);
        assert_eq!(user.full_name(), "Abel Tesfaye");
        assert!(!user.is_host());
    }

    #[test]
    fn test_phone_builder() {
        let host = User::new("Sara", "Bekele", "sara@example.com", Role::Host)
            .with_phone("+251911000000");
        assert!(host.is_host());
        assert_eq!(host.phone_number.as_deref(), Some("+251911000000"));
    }
}
