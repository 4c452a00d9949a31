//! User API
//!
//! JSON-over-HTTP create/read/update/delete for a single `users` table in
//! PostgreSQL.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod user;
