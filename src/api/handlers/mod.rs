//! HTTP request handlers, organized by resource.

pub mod auth;
pub mod books;
pub mod categories;
pub mod health;
pub mod upload;
