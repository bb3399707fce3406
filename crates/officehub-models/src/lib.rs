//! # OfficeHub Models
//!
//! Domain models and DTOs for the OfficeHub API.
//!
//! Entity rows map one-to-one onto database tables and serialize in
//! camelCase. Request DTOs implement [`schema::Schema`], which layers
//! normalization and cross-field refinements on top of `validator` rules.
//!
//! - [`ids`]: 24-hex [`ObjectId`] identifiers
//! - [`identity`]: identities and their public projection
//! - [`schema`]: the [`Schema`] trait and reusable field validators
//! - [`auth`], [`users`], [`projects`], [`leaves`], [`attendance`],
//!   [`work_logs`], [`announcements`], [`holidays`]: per-feature DTOs

pub mod announcements;
pub mod attendance;
pub mod auth;
pub mod holidays;
pub mod identity;
pub mod ids;
pub mod leaves;
pub mod projects;
pub mod schema;
pub mod users;
pub mod work_logs;

pub use ids::{InvalidObjectId, ObjectId, is_object_id};
pub use identity::{Identity, IdentityQuery, NewIdentity, ProfileChanges, PublicIdentity};
pub use schema::Schema;

pub use announcements::{Announcement, Audience, CreateAnnouncementRequest};
pub use attendance::{Attendance, AttendanceQuery, CheckInRequest};
pub use auth::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest, UpdateProfileRequest,
};
pub use holidays::{CreateHolidayRequest, Holiday, HolidayFilterParams};
pub use leaves::{
    CreateLeaveRequest, Leave, LeaveDecision, LeaveFilterParams, LeaveStatus, LeaveType,
    ReviewLeaveRequest,
};
pub use projects::{
    CreateProjectRequest, Project, ProjectFilterParams, ProjectStatus, UpdateProjectRequest,
};
pub use users::{CreateUserRequest, UpdateRoleRequest, UpdateStatusRequest, UserFilterParams};
pub use work_logs::{CreateWorkLogRequest, WorkLog, WorkLogFilterParams};
