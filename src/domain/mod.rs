pub mod auth;
pub mod authorization;
pub mod password;
pub mod users;
