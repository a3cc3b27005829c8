//! userbase-server: CRUD HTTP API over the `users` table
//!
//! Exposes five routes (list/create/get/update/delete) backed by MySQL,
//! with the connection pool injected through axum state.

pub mod config;
pub mod db;
pub mod http;
