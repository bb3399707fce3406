//! Company-wide public holidays.

use chrono::{DateTime, NaiveDate, Utc};
use officehub_core::serde::{deserialize_date_lenient, deserialize_optional_i64};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::ObjectId;
use crate::schema::{Schema, trim, trim_optional};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub id: ObjectId,
    pub name: String,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateHolidayRequest {
    #[validate(length(min = 2, max = 100, message = "Holiday name must be between 2 and 100 characters"))]
    pub name: String,
    #[serde(deserialize_with = "deserialize_date_lenient")]
    #[schema(value_type = String, format = Date, example = "2024-12-25")]
    pub date: NaiveDate,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

impl Schema for CreateHolidayRequest {
    fn normalize(&mut self) {
        trim(&mut self.name);
        trim_optional(&mut self.description);
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct HolidayFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[validate(range(min = 1970, max = 2100, message = "Year must be between 1970 and 2100"))]
    pub year: Option<i64>,
}

impl Schema for HolidayFilterParams {}
