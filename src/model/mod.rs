pub mod attendance;
pub mod notification;
pub mod office;
pub mod role;
pub mod user;
