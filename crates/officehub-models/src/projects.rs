//! Projects and their membership.

use chrono::{DateTime, NaiveDate, Utc};
use officehub_core::PaginationParams;
use officehub_core::serde::{deserialize_date_lenient, deserialize_optional_date_lenient};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::ids::ObjectId;
use crate::schema::{
    Schema, check_date_order, normalize_ids, normalize_optional_id, trim, trim_optional,
    validate_object_id, validate_object_ids,
};

pub const END_DATE_MESSAGE: &str = "Expected end date must be on or after start date";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "project_status")]
pub enum ProjectStatus {
    #[default]
    Planned,
    Active,
    OnHold,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ObjectId,
    pub name: String,
    pub description: Option<String>,
    pub client_name: Option<String>,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    pub expected_end_date: Option<NaiveDate>,
    pub manager_id: Option<ObjectId>,
    pub member_ids: Vec<ObjectId>,
    pub created_by: ObjectId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[validate(length(min = 2, max = 100, message = "Project name must be between 2 and 100 characters"))]
    #[schema(example = "Payroll revamp")]
    pub name: String,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 100, message = "Client name must be at most 100 characters"))]
    pub client_name: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(deserialize_with = "deserialize_date_lenient")]
    #[schema(value_type = String, format = Date, example = "2024-03-01")]
    pub start_date: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_optional_date_lenient")]
    #[schema(value_type = Option<String>, format = Date, example = "2024-06-30")]
    pub expected_end_date: Option<NaiveDate>,
    #[validate(custom(function = "validate_object_id"))]
    pub manager_id: Option<String>,
    #[serde(default)]
    #[validate(
        length(max = 100, message = "A project can have at most 100 members"),
        custom(function = "validate_object_ids")
    )]
    pub member_ids: Vec<String>,
}

impl Schema for CreateProjectRequest {
    fn normalize(&mut self) {
        trim(&mut self.name);
        trim_optional(&mut self.description);
        trim_optional(&mut self.client_name);
        normalize_optional_id(&mut self.manager_id);
        normalize_ids(&mut self.member_ids);
    }

    fn refine(&self) -> Result<(), ValidationErrors> {
        match self.expected_end_date {
            Some(end) => check_date_order(self.start_date, end, "expected_end_date", END_DATE_MESSAGE),
            None => Ok(()),
        }
    }
}

/// Partial update. Date order is checked here when both dates are sent and
/// again against the stored row by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[validate(length(min = 2, max = 100, message = "Project name must be between 2 and 100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 100, message = "Client name must be at most 100 characters"))]
    pub client_name: Option<String>,
    pub status: Option<ProjectStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_date_lenient")]
    #[schema(value_type = Option<String>, format = Date)]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date_lenient")]
    #[schema(value_type = Option<String>, format = Date)]
    pub expected_end_date: Option<NaiveDate>,
    #[validate(custom(function = "validate_object_id"))]
    pub manager_id: Option<String>,
    #[validate(
        length(max = 100, message = "A project can have at most 100 members"),
        custom(function = "validate_object_ids")
    )]
    pub member_ids: Option<Vec<String>>,
}

impl Schema for UpdateProjectRequest {
    fn normalize(&mut self) {
        trim_optional(&mut self.name);
        trim_optional(&mut self.description);
        trim_optional(&mut self.client_name);
        normalize_optional_id(&mut self.manager_id);
        if let Some(ids) = self.member_ids.as_mut() {
            normalize_ids(ids);
        }
    }

    fn refine(&self) -> Result<(), ValidationErrors> {
        match (self.start_date, self.expected_end_date) {
            (Some(start), Some(end)) => {
                check_date_order(start, end, "expected_end_date", END_DATE_MESSAGE)
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFilterParams {
    pub status: Option<ProjectStatus>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

impl Schema for ProjectFilterParams {}
