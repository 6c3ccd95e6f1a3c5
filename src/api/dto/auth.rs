//! Authentication request/response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::User;
use crate::services::TokenPair;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token must not be empty"))]
    pub refresh_token: String,
}

/// Signed-in user identity; never includes the password hash.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthUserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<User> for AuthUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokensResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: AuthUserResponse,
}

impl AuthTokensResponse {
    pub fn new(user: User, tokens: TokenPair) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            user: AuthUserResponse::from(user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn tokens_response_excludes_password_hash() {
        let now = Utc::now().naive_utc();
        let user = User {
            id: 1,
            name: "Admin".to_string(),
            email: "admin@pustaka.test".to_string(),
            password: "$2b$12$hash".to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let response = AuthTokensResponse::new(
            user,
            TokenPair {
                access_token: "a".to_string(),
                refresh_token: "r".to_string(),
            },
        );

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["accessToken"], "a");
        assert_eq!(value["user"]["email"], "admin@pustaka.test");
        assert!(value["user"].get("password").is_none());
    }
}
