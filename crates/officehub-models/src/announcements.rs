//! Company announcements, targeted at an audience.

use chrono::{DateTime, NaiveDate, Utc};
use officehub_auth::Role;
use officehub_core::serde::deserialize_optional_date_lenient;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::ObjectId;
use crate::schema::{Schema, trim};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "announcement_audience")]
pub enum Audience {
    #[default]
    All,
    Managers,
    Employees,
}

impl Audience {
    /// Audiences whose announcements `role` may read.
    pub fn visible_to(role: Role) -> &'static [Audience] {
        match role {
            Role::Admin => &[Audience::All, Audience::Managers, Audience::Employees],
            Role::Manager => &[Audience::All, Audience::Managers],
            Role::Employee => &[Audience::All, Audience::Employees],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: ObjectId,
    pub title: String,
    pub content: String,
    pub audience: Audience,
    pub pinned: bool,
    pub expires_on: Option<NaiveDate>,
    pub author_id: ObjectId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnnouncementRequest {
    #[validate(length(min = 3, max = 150, message = "Title must be between 3 and 150 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 5000, message = "Content must be between 1 and 5000 characters"))]
    pub content: String,
    #[serde(default)]
    pub audience: Audience,
    #[serde(default)]
    pub pinned: bool,
    /// Last day the announcement is shown
    #[serde(default, deserialize_with = "deserialize_optional_date_lenient")]
    #[schema(value_type = Option<String>, format = Date)]
    pub expires_on: Option<NaiveDate>,
}

impl Schema for CreateAnnouncementRequest {
    fn normalize(&mut self) {
        trim(&mut self.title);
        trim(&mut self.content);
    }
}
