use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use officehub_auth::Role;
use officehub_core::{FieldError, PaginationMeta, PaginationParams, response::MessageResponse};
use officehub_models::{
    Announcement, Attendance, AttendanceQuery, Audience, ChangePasswordRequest,
    CheckInRequest, CreateAnnouncementRequest, CreateHolidayRequest, CreateLeaveRequest,
    CreateProjectRequest, CreateUserRequest, CreateWorkLogRequest, Holiday, Leave,
    LeaveDecision, LeaveStatus, LeaveType, LoginRequest, LoginResponse, Project, ProjectStatus,
    PublicIdentity, RegisterRequest, ReviewLeaveRequest, UpdateProfileRequest,
    UpdateProjectRequest, UpdateRoleRequest, UpdateStatusRequest, WorkLog,
};

/// Failure envelope rendered by `AppError`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "Validation failed")]
    pub message: String,
    /// Present on validation failures only
    pub errors: Option<Vec<FieldError>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::get_me,
        crate::modules::auth::controller::update_me,
        crate::modules::auth::controller::change_password,
        crate::modules::users::controller::list_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::update_user_role,
        crate::modules::users::controller::update_user_status,
        crate::modules::projects::controller::list_projects,
        crate::modules::projects::controller::get_project,
        crate::modules::projects::controller::create_project,
        crate::modules::projects::controller::update_project,
        crate::modules::projects::controller::delete_project,
        crate::modules::leaves::controller::create_leave,
        crate::modules::leaves::controller::list_my_leaves,
        crate::modules::leaves::controller::list_leaves,
        crate::modules::leaves::controller::review_leave,
        crate::modules::attendance::controller::check_in,
        crate::modules::attendance::controller::check_out,
        crate::modules::attendance::controller::list_my_attendance,
        crate::modules::attendance::controller::list_attendance,
        crate::modules::work_logs::controller::create_work_log,
        crate::modules::work_logs::controller::list_my_work_logs,
        crate::modules::work_logs::controller::list_work_logs,
        crate::modules::announcements::controller::list_announcements,
        crate::modules::announcements::controller::create_announcement,
        crate::modules::announcements::controller::delete_announcement,
        crate::modules::holidays::controller::list_holidays,
        crate::modules::holidays::controller::create_holiday,
        crate::modules::holidays::controller::delete_holiday,
    ),
    components(
        schemas(
            Role,
            PublicIdentity,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            UpdateProfileRequest,
            ChangePasswordRequest,
            CreateUserRequest,
            UpdateRoleRequest,
            UpdateStatusRequest,
            Project,
            ProjectStatus,
            CreateProjectRequest,
            UpdateProjectRequest,
            Leave,
            LeaveType,
            LeaveStatus,
            LeaveDecision,
            CreateLeaveRequest,
            ReviewLeaveRequest,
            Attendance,
            AttendanceQuery,
            CheckInRequest,
            WorkLog,
            CreateWorkLogRequest,
            Announcement,
            Audience,
            CreateAnnouncementRequest,
            Holiday,
            CreateHolidayRequest,
            MessageResponse,
            FieldError,
            ErrorResponse,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and the caller's own profile"),
        (name = "Users", description = "Employee directory"),
        (name = "Projects", description = "Project tracking"),
        (name = "Leaves", description = "Leave requests and approvals"),
        (name = "Attendance", description = "Daily check-in and check-out"),
        (name = "Work Logs", description = "Hours logged against projects"),
        (name = "Announcements", description = "Company announcements"),
        (name = "Holidays", description = "Public holiday calendar")
    ),
    info(
        title = "OfficeHub API",
        version = "0.1.0",
        description = "Back office API for employees, projects, leave, attendance and announcements.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
