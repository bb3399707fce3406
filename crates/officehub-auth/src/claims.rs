use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::role::Role;

/// JWT payload.
///
/// Carries only the subject id and role; profile data and the password
/// hash are never embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Identity id (24-character hex)
    pub subject_id: String,
    pub role: Role,
    /// Issued-at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let claims = Claims {
            subject_id: "65f1c0ffee0000000000abcd".to_string(),
            role: Role::Manager,
            iat: 1_700_000_000,
            exp: 1_700_086_400,
        };
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "subjectId": "65f1c0ffee0000000000abcd",
                "role": "Manager",
                "iat": 1_700_000_000,
                "exp": 1_700_086_400
            })
        );
    }

    #[test]
    fn test_unknown_role_does_not_deserialize() {
        let result = serde_json::from_str::<Claims>(
            r#"{"subjectId":"x","role":"Superuser","iat":1,"exp":2}"#,
        );
        assert!(result.is_err());
    }
}
