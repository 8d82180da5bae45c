//! Data models for the application.

mod role;
mod user;

pub use role::{Role, UnknownRole};
#[cfg(feature = "server")]
pub use user::User;
pub use user::{avatar_for, search_by_name, NewUser, UserInfo};
