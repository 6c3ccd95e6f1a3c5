//! Error handling for the catalog service.
//!
//! `AppError` is the application-wide taxonomy; database errors are converted
//! into structured variants by `DatabaseErrorConverter` with help from the
//! Postgres constraint message parser.

mod app_error;
mod constraint_parser;
mod database_converter;

pub use app_error::{AppError, AppResult};
pub use constraint_parser::ConstraintParser;
pub use database_converter::DatabaseErrorConverter;
