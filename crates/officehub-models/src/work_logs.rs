//! Work logs: hours an employee spent, optionally against a project.

use chrono::{DateTime, NaiveDate, Utc};
use officehub_core::PaginationParams;
use officehub_core::serde::{
    deserialize_date_lenient, deserialize_f64_lenient, deserialize_optional_date_lenient,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::ids::ObjectId;
use crate::schema::{
    Schema, check_date_order, normalize_optional_id, trim, validate_object_id,
};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkLog {
    pub id: ObjectId,
    pub employee_id: ObjectId,
    pub project_id: Option<ObjectId>,
    pub work_date: NaiveDate,
    pub hours: f64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkLogRequest {
    #[validate(custom(function = "validate_object_id"))]
    pub project_id: Option<String>,
    #[serde(deserialize_with = "deserialize_date_lenient")]
    #[schema(value_type = String, format = Date, example = "2024-05-06")]
    pub date: NaiveDate,
    /// Accepts numbers or numeric strings
    #[serde(deserialize_with = "deserialize_f64_lenient")]
    #[validate(range(min = 0.25, max = 24.0, message = "Hours must be between 0.25 and 24"))]
    #[schema(example = 7.5)]
    pub hours: f64,
    #[validate(length(min = 3, max = 1000, message = "Description must be between 3 and 1000 characters"))]
    pub description: String,
}

impl Schema for CreateWorkLogRequest {
    fn normalize(&mut self) {
        normalize_optional_id(&mut self.project_id);
        trim(&mut self.description);
        self.hours = (self.hours * 100.0).round() / 100.0;
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogFilterParams {
    #[validate(custom(function = "validate_object_id"))]
    pub employee_id: Option<String>,
    #[validate(custom(function = "validate_object_id"))]
    pub project_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date_lenient")]
    #[schema(value_type = Option<String>, format = Date)]
    pub from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date_lenient")]
    #[schema(value_type = Option<String>, format = Date)]
    pub to: Option<NaiveDate>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

impl Schema for WorkLogFilterParams {
    fn normalize(&mut self) {
        normalize_optional_id(&mut self.employee_id);
        normalize_optional_id(&mut self.project_id);
    }

    fn refine(&self) -> Result<(), ValidationErrors> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => check_date_order(from, to, "to", "to must be on or after from"),
            _ => Ok(()),
        }
    }
}
