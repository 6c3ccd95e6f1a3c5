//! Request extractors that validate payloads before handlers run.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// JSON body extractor that runs `validator` rules after deserialization.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::BadRequest {
                message: rejection.body_text(),
            })?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Query string extractor that runs `validator` rules after deserialization.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| AppError::BadRequest {
                message: rejection.body_text(),
            })?;
        value.validate()?;
        Ok(ValidatedQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct TestPayload {
        #[validate(length(min = 1, message = "Title must not be empty"))]
        title: String,
        #[validate(range(min = 0, message = "Stock must not be negative"))]
        stock: i32,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn valid_json_passes() {
        let request = json_request(r#"{"title":"Laskar Pelangi","stock":3}"#);

        let ValidatedJson(payload) = ValidatedJson::<TestPayload>::from_request(request, &())
            .await
            .unwrap();
        assert_eq!(payload.title, "Laskar Pelangi");
        assert_eq!(payload.stock, 3);
    }

    #[tokio::test]
    async fn empty_title_fails_validation() {
        let request = json_request(r#"{"title":"","stock":3}"#);

        let error = ValidatedJson::<TestPayload>::from_request(request, &())
            .await
            .unwrap_err();
        match error {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "title");
                assert_eq!(reason, "Title must not be empty");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let request = json_request("{not json");

        let error = ValidatedJson::<TestPayload>::from_request(request, &())
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let request = json_request(r#"{"title":"Laskar Pelangi"}"#);

        let error = ValidatedJson::<TestPayload>::from_request(request, &())
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::BadRequest { .. }));
    }

    #[derive(Debug, Deserialize, Validate)]
    struct TestQuery {
        #[validate(range(min = 1, message = "Page must be at least 1"))]
        page: u32,
    }

    #[tokio::test]
    async fn valid_query_passes() {
        let request = Request::builder()
            .uri("/test?page=2")
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let ValidatedQuery(query) =
            ValidatedQuery::<TestQuery>::from_request_parts(&mut parts, &())
                .await
                .unwrap();
        assert_eq!(query.page, 2);
    }

    #[tokio::test]
    async fn out_of_range_query_fails_validation() {
        let request = Request::builder()
            .uri("/test?page=0")
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let error = ValidatedQuery::<TestQuery>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::Validation { .. }));
    }
}
