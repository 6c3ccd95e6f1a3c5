//! Health check response DTO.

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `"ok"` when the service is up.
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "0.1.0")]
    pub version: String,
    /// `"up"` or `"down"` from a live connectivity probe.
    #[schema(example = "up")]
    pub database: String,
}
