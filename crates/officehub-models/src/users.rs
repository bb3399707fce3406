//! Employee directory DTOs.

use officehub_auth::Role;
use officehub_core::PaginationParams;
use officehub_core::serde::deserialize_optional_bool;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::schema::{
    Schema, normalize_email, trim, trim_optional, validate_password_strength, validate_phone,
};

/// Admin-created account with an explicit role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(
        length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"),
        custom(function = "validate_password_strength")
    )]
    pub password: String,
    pub role: Role,
    #[validate(length(max = 100, message = "Department must be at most 100 characters"))]
    pub department: Option<String>,
    #[validate(length(max = 100, message = "Designation must be at most 100 characters"))]
    pub designation: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
}

impl Schema for CreateUserRequest {
    fn normalize(&mut self) {
        trim(&mut self.name);
        normalize_email(&mut self.email);
        trim_optional(&mut self.department);
        trim_optional(&mut self.designation);
        trim_optional(&mut self.phone);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

impl Schema for UpdateRoleRequest {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub is_active: bool,
}

impl Schema for UpdateStatusRequest {}

/// Query parameters for listing the directory.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserFilterParams {
    pub role: Option<Role>,
    /// Case-insensitive match on name or email
    #[validate(length(max = 100, message = "Search must be at most 100 characters"))]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub include_inactive: Option<bool>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

impl Schema for UserFilterParams {
    fn normalize(&mut self) {
        trim_optional(&mut self.search);
    }
}
