//! Daily attendance: one check-in and at most one check-out per employee per UTC day.

use chrono::{DateTime, NaiveDate, Utc};
use officehub_core::serde::deserialize_optional_date_lenient;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::ids::ObjectId;
use crate::schema::{
    Schema, check_date_order, normalize_optional_id, refinement, trim_optional,
    validate_object_id,
};

/// Longest range a single attendance query may cover.
pub const MAX_RANGE_DAYS: i64 = 366;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: ObjectId,
    pub employee_id: ObjectId,
    pub work_date: NaiveDate,
    pub check_in_at: DateTime<Utc>,
    pub check_out_at: Option<DateTime<Utc>>,
    pub worked_minutes: Option<i32>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Whole minutes between check-in and check-out, never negative.
pub fn worked_minutes(check_in_at: DateTime<Utc>, check_out_at: DateTime<Utc>) -> i32 {
    let minutes = (check_out_at - check_in_at).num_minutes().max(0);
    i32::try_from(minutes).unwrap_or(i32::MAX)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CheckInRequest {
    #[validate(length(max = 250, message = "Note must be at most 250 characters"))]
    pub note: Option<String>,
}

impl Schema for CheckInRequest {
    fn normalize(&mut self) {
        trim_optional(&mut self.note);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceQuery {
    #[serde(default, deserialize_with = "deserialize_optional_date_lenient")]
    #[schema(value_type = Option<String>, format = Date)]
    pub from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date_lenient")]
    #[schema(value_type = Option<String>, format = Date)]
    pub to: Option<NaiveDate>,
    /// Only honoured on the staff listing
    #[validate(custom(function = "validate_object_id"))]
    pub employee_id: Option<String>,
}

impl Schema for AttendanceQuery {
    fn normalize(&mut self) {
        normalize_optional_id(&mut self.employee_id);
    }

    fn refine(&self) -> Result<(), ValidationErrors> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            check_date_order(from, to, "to", "to must be on or after from")?;
            if (to - from).num_days() >= MAX_RANGE_DAYS {
                return Err(refinement(
                    "to",
                    "range_too_long",
                    "Date range cannot exceed 366 days",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_worked_minutes() {
        let start = Utc.with_ymd_and_hms(2024, 5, 6, 8, 30, 0).unwrap();
        assert_eq!(worked_minutes(start, start + Duration::minutes(495)), 495);
        assert_eq!(worked_minutes(start, start - Duration::minutes(5)), 0);
    }

    #[test]
    fn test_query_range_refinement() {
        let same_day = AttendanceQuery {
            from: Some(date(2024, 5, 1)),
            to: Some(date(2024, 5, 1)),
            employee_id: None,
        };
        assert!(same_day.refine().is_ok());

        let inverted = AttendanceQuery {
            from: Some(date(2024, 5, 2)),
            to: Some(date(2024, 5, 1)),
            employee_id: None,
        };
        assert!(inverted.refine().unwrap_err().field_errors().contains_key("to"));

        let open_ended = AttendanceQuery {
            from: Some(date(2024, 5, 2)),
            ..Default::default()
        };
        assert!(open_ended.refine().is_ok());
    }
}
