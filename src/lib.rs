//! Pustaka: a library catalog administration service.
//!
//! Layered architecture: HTTP handlers call services, services call
//! repositories, repositories issue diesel-async queries against
//! PostgreSQL. Uploaded cover images live on local disk and are served
//! statically.

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logger;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod server;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use state::AppState;
