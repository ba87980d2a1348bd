pub mod analytics;
pub mod attendance;
pub mod notification;
pub mod user;
