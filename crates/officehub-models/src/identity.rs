//! Identities: the people who sign in.
//!
//! [`Identity`] carries the password hash and therefore never leaves the
//! server. Responses and the request context use [`PublicIdentity`].

use std::fmt;

use chrono::{DateTime, Utc};
use officehub_auth::Role;
use serde::Serialize;
use utoipa::ToSchema;

use crate::ids::ObjectId;

#[derive(Clone, PartialEq)]
pub struct Identity {
    pub id: ObjectId,
    pub name: String,
    /// Stored lowercase.
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("is_active", &self.is_active)
            .field("password_hash", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl Identity {
    pub fn to_public(&self) -> PublicIdentity {
        PublicIdentity {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            department: self.department.clone(),
            designation: self.designation.clone(),
            phone: self.phone.clone(),
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

impl From<Identity> for PublicIdentity {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            name: identity.name,
            email: identity.email,
            role: identity.role,
            department: identity.department,
            designation: identity.designation,
            phone: identity.phone,
            is_active: identity.is_active,
            created_at: identity.created_at,
        }
    }
}

/// An identity as exposed to clients and handlers.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicIdentity {
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields required to insert an identity. The email must already be normalized.
#[derive(Clone)]
pub struct NewIdentity {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub phone: Option<String>,
}

impl fmt::Debug for NewIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewIdentity")
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Partial profile update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub phone: Option<String>,
}

/// Directory listing filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityQuery {
    pub role: Option<Role>,
    /// Case-insensitive substring of name or email.
    pub search: Option<String>,
    pub include_inactive: bool,
    pub limit: i64,
    pub offset: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            id: ObjectId::new(),
            name: "Ada Obi".to_string(),
            email: "ada@officehub.test".to_string(),
            password_hash: "$2b$04$secret-hash".to_string(),
            role: Role::Manager,
            department: Some("Engineering".to_string()),
            designation: None,
            phone: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_debug_redacts_hash() {
        let rendered = format!("{:?}", identity());
        assert!(!rendered.contains("secret-hash"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_public_identity_has_no_hash() {
        let public = identity().to_public();
        let json = serde_json::to_value(&public).unwrap();

        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "Manager");
        assert_eq!(json["isActive"], true);
        assert_eq!(json["email"], "ada@officehub.test");
    }
}
