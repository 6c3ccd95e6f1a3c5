//! HTTP API layer: handlers, middleware, DTOs and router wiring.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

mod doc;
