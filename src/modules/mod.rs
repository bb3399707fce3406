pub mod announcements;
pub mod attendance;
pub mod auth;
pub mod holidays;
pub mod leaves;
pub mod projects;
pub mod users;
pub mod work_logs;
