//! Authentication DTOs: registration, login and self-service profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::identity::PublicIdentity;
use crate::schema::{
    Schema, normalize_email, refinement, trim, trim_optional, validate_password_strength,
    validate_phone,
};

/// Public self-registration. Always creates an `Employee`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    #[schema(example = "Ada Obi")]
    pub name: String,
    #[validate(email(message = "Email must be a valid email address"))]
    #[schema(example = "ada@company.com")]
    pub email: String,
    #[validate(
        length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"),
        custom(function = "validate_password_strength")
    )]
    #[schema(example = "s3cretPass")]
    pub password: String,
    #[validate(length(max = 100, message = "Department must be at most 100 characters"))]
    pub department: Option<String>,
    #[validate(length(max = 100, message = "Designation must be at most 100 characters"))]
    pub designation: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
}

impl Schema for RegisterRequest {
    fn normalize(&mut self) {
        trim(&mut self.name);
        normalize_email(&mut self.email);
        trim_optional(&mut self.department);
        trim_optional(&mut self.designation);
        trim_optional(&mut self.phone);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "s3cretPass")]
    pub password: String,
}

impl Schema for LoginRequest {
    fn normalize(&mut self) {
        normalize_email(&mut self.email);
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: PublicIdentity,
}

/// Self-service profile edit. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 100, message = "Department must be at most 100 characters"))]
    pub department: Option<String>,
    #[validate(length(max = 100, message = "Designation must be at most 100 characters"))]
    pub designation: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
}

impl Schema for UpdateProfileRequest {
    fn normalize(&mut self) {
        trim_optional(&mut self.name);
        trim_optional(&mut self.department);
        trim_optional(&mut self.designation);
        trim_optional(&mut self.phone);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[validate(
        length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"),
        custom(function = "validate_password_strength")
    )]
    pub new_password: String,
    #[validate(length(min = 1, message = "Please confirm the new password"))]
    pub confirm_password: String,
}

impl Schema for ChangePasswordRequest {
    fn refine(&self) -> Result<(), ValidationErrors> {
        if self.confirm_password != self.new_password {
            return Err(refinement(
                "confirm_password",
                "password_mismatch",
                "Passwords do not match",
            ));
        }
        if self.new_password == self.current_password {
            return Err(refinement(
                "new_password",
                "password_reuse",
                "New password must be different from the current password",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(current: &str, new: &str, confirm: &str) -> ChangePasswordRequest {
        ChangePasswordRequest {
            current_password: current.to_string(),
            new_password: new.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_register_normalize() {
        let mut request = RegisterRequest {
            name: "  Ada Obi ".to_string(),
            email: " Ada@Company.COM ".to_string(),
            password: "s3cretPass".to_string(),
            department: Some("  ".to_string()),
            designation: None,
            phone: Some(" +2348031234567".to_string()),
        };
        request.normalize();

        assert_eq!(request.name, "Ada Obi");
        assert_eq!(request.email, "ada@company.com");
        assert_eq!(request.department, None);
        assert_eq!(request.phone.as_deref(), Some("+2348031234567"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_weak_password_rejected() {
        let request = RegisterRequest {
            name: "Ada".to_string(),
            email: "ada@company.com".to_string(),
            password: "onlyletters".to_string(),
            department: None,
            designation: None,
            phone: None,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_change_password_refinements() {
        assert!(change("old-pass1", "new-pass1", "new-pass1").refine().is_ok());

        let mismatch = change("old-pass1", "new-pass1", "new-pass2").refine().unwrap_err();
        assert!(mismatch.field_errors().contains_key("confirm_password"));

        let reuse = change("same-pass1", "same-pass1", "same-pass1").refine().unwrap_err();
        assert!(reuse.field_errors().contains_key("new_password"));
    }
}
