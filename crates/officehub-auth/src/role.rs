//! Roles and the role authorizer.
//!
//! [`Role`] is a closed set. Route guards declare an allowed-roles slice and
//! [`authorize`] decides; a request without a resolved identity is always
//! denied.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

/// Every role.
pub const ALL_ROLES: &[Role] = &[Role::Admin, Role::Manager, Role::Employee];
/// Admins and managers.
pub const STAFF: &[Role] = &[Role::Admin, Role::Manager];
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::Employee => "Employee",
        }
    }

    /// Position in the hierarchy (higher number = more privileges).
    pub fn rank(self) -> u8 {
        match self {
            Role::Admin => 2,
            Role::Manager => 1,
            Role::Employee => 0,
        }
    }

    pub fn outranks(self, other: Role) -> bool {
        self.rank() > other.rank()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role `{}`", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "employee" => Ok(Role::Employee),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Permit,
    Deny,
}

impl Decision {
    pub fn is_permit(self) -> bool {
        self == Decision::Permit
    }
}

/// Permits iff a role is present and contained in `allowed`.
pub fn authorize(role: Option<Role>, allowed: &[Role]) -> Decision {
    match role {
        Some(role) if allowed.contains(&role) => Decision::Permit,
        Some(_) | None => Decision::Deny,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subsets() -> Vec<Vec<Role>> {
        (0u8..8)
            .map(|mask| {
                ALL_ROLES
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, role)| *role)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_authorize_is_membership_for_every_subset() {
        for allowed in subsets() {
            for role in ALL_ROLES {
                let expected = if allowed.contains(role) {
                    Decision::Permit
                } else {
                    Decision::Deny
                };
                assert_eq!(
                    authorize(Some(*role), &allowed),
                    expected,
                    "role {role} against {allowed:?}"
                );
            }
        }
    }

    #[test]
    fn test_missing_identity_is_always_denied() {
        for allowed in subsets() {
            assert_eq!(authorize(None, &allowed), Decision::Deny);
        }
    }

    #[test]
    fn test_role_sets() {
        assert!(authorize(Some(Role::Employee), ALL_ROLES).is_permit());
        assert!(!authorize(Some(Role::Employee), STAFF).is_permit());
        assert!(authorize(Some(Role::Manager), STAFF).is_permit());
        assert!(!authorize(Some(Role::Manager), ADMIN_ONLY).is_permit());
        assert!(authorize(Some(Role::Admin), ADMIN_ONLY).is_permit());
    }

    #[test]
    fn test_hierarchy() {
        assert!(Role::Admin.outranks(Role::Manager));
        assert!(Role::Manager.outranks(Role::Employee));
        assert!(!Role::Manager.outranks(Role::Manager));
        assert!(!Role::Employee.outranks(Role::Admin));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" Manager ".parse::<Role>(), Ok(Role::Manager));
        assert_eq!("EMPLOYEE".parse::<Role>(), Ok(Role::Employee));
        assert!("intern".parse::<Role>().is_err());

        for role in ALL_ROLES {
            assert_eq!(role.to_string().parse::<Role>(), Ok(*role));
        }
    }

    #[test]
    fn test_serde_uses_variant_names() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""Admin""#);
        assert_eq!(
            serde_json::from_str::<Role>(r#""Employee""#).unwrap(),
            Role::Employee
        );
        assert!(serde_json::from_str::<Role>(r#""employee""#).is_err());
    }
}
