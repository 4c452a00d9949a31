//! API handlers

pub mod user;

pub use user::{create_user, delete_user, get_user, update_user};
