//! Upload response DTO.

use serde::Serialize;
use utoipa::ToSchema;

use crate::services::StoredUpload;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Public URL path of the stored file.
    pub path: String,
    /// Original file name.
    pub name: String,
    /// Generated on-disk file name.
    pub stored_name: String,
}

impl From<StoredUpload> for UploadResponse {
    fn from(upload: StoredUpload) -> Self {
        Self {
            path: upload.path,
            name: upload.name,
            stored_name: upload.stored_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case() {
        let response = UploadResponse::from(StoredUpload {
            path: "/public/1724112000000-a1B2c3.png".to_string(),
            name: "cover.png".to_string(),
            stored_name: "1724112000000-a1B2c3.png".to_string(),
        });
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["storedName"], "1724112000000-a1B2c3.png");
        assert_eq!(value["name"], "cover.png");
    }
}
