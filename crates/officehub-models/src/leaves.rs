//! Leave requests and their review workflow.
//!
//! A request starts `Pending` and is reviewed exactly once, to `Approved` or
//! `Rejected`.

use chrono::{DateTime, NaiveDate, Utc};
use officehub_core::PaginationParams;
use officehub_core::serde::deserialize_date_lenient;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::ids::ObjectId;
use crate::schema::{
    Schema, check_date_order, normalize_optional_id, refinement, trim, trim_optional,
    validate_object_id,
};

pub const MAX_LEAVE_DAYS: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "leave_type")]
pub enum LeaveType {
    Casual,
    Sick,
    Annual,
    Unpaid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "leave_status")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

/// Outcome a reviewer may choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum LeaveDecision {
    Approved,
    Rejected,
}

impl From<LeaveDecision> for LeaveStatus {
    fn from(decision: LeaveDecision) -> Self {
        match decision {
            LeaveDecision::Approved => LeaveStatus::Approved,
            LeaveDecision::Rejected => LeaveStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Leave {
    pub id: ObjectId,
    pub employee_id: ObjectId,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: i32,
    pub reason: String,
    pub status: LeaveStatus,
    pub reviewed_by: Option<ObjectId>,
    pub review_note: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inclusive day count between two dates.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaveRequest {
    pub leave_type: LeaveType,
    #[serde(deserialize_with = "deserialize_date_lenient")]
    #[schema(value_type = String, format = Date, example = "2024-07-01")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_date_lenient")]
    #[schema(value_type = String, format = Date, example = "2024-07-05")]
    pub end_date: NaiveDate,
    #[validate(length(min = 5, max = 500, message = "Reason must be between 5 and 500 characters"))]
    pub reason: String,
}

impl CreateLeaveRequest {
    pub fn days(&self) -> i64 {
        inclusive_days(self.start_date, self.end_date)
    }
}

impl Schema for CreateLeaveRequest {
    fn normalize(&mut self) {
        trim(&mut self.reason);
    }

    fn refine(&self) -> Result<(), ValidationErrors> {
        check_date_order(
            self.start_date,
            self.end_date,
            "end_date",
            "End date must be on or after start date",
        )?;
        if self.days() > MAX_LEAVE_DAYS {
            return Err(refinement(
                "end_date",
                "leave_too_long",
                "A single leave request cannot exceed 90 days",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLeaveRequest {
    pub status: LeaveDecision,
    #[validate(length(max = 500, message = "Review note must be at most 500 characters"))]
    pub review_note: Option<String>,
}

impl Schema for ReviewLeaveRequest {
    fn normalize(&mut self) {
        trim_optional(&mut self.review_note);
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveFilterParams {
    pub status: Option<LeaveStatus>,
    #[validate(custom(function = "validate_object_id"))]
    pub employee_id: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

impl Schema for LeaveFilterParams {
    fn normalize(&mut self) {
        normalize_optional_id(&mut self.employee_id);
    }
}
