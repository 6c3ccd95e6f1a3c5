//! The uniform response envelope.

use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::PageMeta;

/// Envelope wrapped around every API response, success or error.
///
/// `data` and `meta` are omitted when absent rather than serialized as
/// null.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    /// HTTP status code, mirrored into the body.
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: &str, data: T) -> Self {
        Self {
            success: true,
            status: 200,
            message: message.to_string(),
            data: Some(data),
            meta: None,
        }
    }

    pub fn created(message: &str, data: T) -> Self {
        Self {
            success: true,
            status: 201,
            message: message.to_string(),
            data: Some(data),
            meta: None,
        }
    }

    pub fn with_meta(mut self, meta: PageMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}

impl ApiResponse<()> {
    /// Success without a payload, e.g. after a delete.
    pub fn message(message: &str) -> Self {
        Self {
            success: true,
            status: 200,
            message: message.to_string(),
            data: None,
            meta: None,
        }
    }

    /// Error body; the HTTP status is set alongside by the error handler.
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            success: false,
            status,
            message: message.to_string(),
            data: None,
            meta: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_omits_absent_fields() {
        let body = serde_json::to_value(ApiResponse::ok("Done", 42)).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["status"], 200);
        assert_eq!(body["message"], "Done");
        assert_eq!(body["data"], 42);
        assert!(body.get("meta").is_none());
    }

    #[test]
    fn message_envelope_has_no_data_key() {
        let body = serde_json::to_value(ApiResponse::message("Deleted")).unwrap();
        assert!(body.get("data").is_none());
    }

    #[test]
    fn error_envelope_is_unsuccessful() {
        let body = serde_json::to_value(ApiResponse::error(404, "Book not found")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["status"], 404);
    }
}
