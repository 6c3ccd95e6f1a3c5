//! JWT session tokens for the admin gate.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Token type enumeration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Access token for API authentication (short-lived)
    Access,
    /// Refresh token for obtaining new access tokens (long-lived)
    Refresh,
}

/// JWT claims carrying the signed-in user's identity.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User email
    pub email: String,
    /// Display name
    pub name: String,
    /// Token type (access or refresh)
    pub token_type: TokenType,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
}

impl Claims {
    pub fn new(
        user_id: i32,
        email: String,
        name: String,
        token_type: TokenType,
        expiration_hours: i64,
    ) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user_id.to_string(),
            email,
            name,
            token_type,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Parses the subject back into a user id.
    pub fn user_id(&self) -> AppResult<i32> {
        self.sub.parse().map_err(|_| AppError::Unauthorized {
            message: "Invalid token subject".to_string(),
        })
    }
}

/// Generates a signed JWT for a user.
pub fn generate_token(
    user_id: i32,
    email: String,
    name: String,
    token_type: TokenType,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    let claims = Claims::new(user_id, email, name, token_type, expiration_hours);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

/// Generates both access and refresh tokens for a signed-in user.
///
/// # Returns
/// A tuple of (access_token, refresh_token)
pub fn generate_token_pair(
    user_id: i32,
    email: String,
    name: String,
    secret: &str,
    access_expiration_hours: i64,
    refresh_expiration_hours: i64,
) -> AppResult<(String, String)> {
    let access_token = generate_token(
        user_id,
        email.clone(),
        name.clone(),
        TokenType::Access,
        secret,
        access_expiration_hours,
    )?;

    let refresh_token = generate_token(
        user_id,
        email,
        name,
        TokenType::Refresh,
        secret,
        refresh_expiration_hours,
    )?;

    Ok((access_token, refresh_token))
}

/// Validates and decodes a JWT, optionally enforcing the token type.
pub fn validate_token(
    token: &str,
    secret: &str,
    expected_type: Option<TokenType>,
) -> AppResult<Claims> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::Unauthorized {
            message: "Token has expired".to_string(),
        },
        jsonwebtoken::errors::ErrorKind::InvalidToken => AppError::Unauthorized {
            message: "Invalid token".to_string(),
        },
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AppError::Unauthorized {
            message: "Invalid token signature".to_string(),
        },
        _ => AppError::Unauthorized {
            message: format!("Token validation failed: {}", e),
        },
    })?;

    if let Some(expected) = expected_type {
        if claims.token_type != expected {
            return Err(AppError::Unauthorized {
                message: format!(
                    "Invalid token type: expected {:?}, got {:?}",
                    expected, claims.token_type
                ),
            });
        }
    }

    Ok(claims)
}

/// Validates an access token.
pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Access))
}

/// Validates a refresh token.
pub fn validate_refresh_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Refresh))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test_secret_key_for_jwt_testing";

    fn make_token(token_type: TokenType, hours: i64) -> String {
        generate_token(
            1,
            "admin@pustaka.test".to_string(),
            "Admin".to_string(),
            token_type,
            TEST_SECRET,
            hours,
        )
        .unwrap()
    }

    #[test]
    fn generate_and_validate_round_trip() {
        let token = make_token(TokenType::Access, 24);
        let claims = validate_token(&token, TEST_SECRET, None).unwrap();

        assert_eq!(claims.sub, "1");
        assert_eq!(claims.user_id().unwrap(), 1);
        assert_eq!(claims.email, "admin@pustaka.test");
        assert_eq!(claims.name, "Admin");
        assert_eq!(claims.token_type, TokenType::Access);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_pair_yields_distinct_tokens() {
        let (access, refresh) = generate_token_pair(
            7,
            "admin@pustaka.test".to_string(),
            "Admin".to_string(),
            TEST_SECRET,
            1,
            168,
        )
        .unwrap();

        assert_ne!(access, refresh);
        assert_eq!(
            validate_access_token(&access, TEST_SECRET).unwrap().token_type,
            TokenType::Access
        );
        assert_eq!(
            validate_refresh_token(&refresh, TEST_SECRET).unwrap().token_type,
            TokenType::Refresh
        );
    }

    #[test]
    fn rejects_wrong_token_type() {
        let access = make_token(TokenType::Access, 1);

        let result = validate_refresh_token(&access, TEST_SECRET);
        match result {
            Err(AppError::Unauthorized { message }) => {
                assert!(message.contains("Invalid token type"));
            }
            other => panic!("Expected Unauthorized error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = make_token(TokenType::Access, 24);

        let result = validate_token(&token, "wrong_secret", None);
        match result {
            Err(AppError::Unauthorized { message }) => {
                assert!(message.contains("signature"));
            }
            other => panic!("Expected Unauthorized error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_expired_token() {
        let token = make_token(TokenType::Access, -1);

        let result = validate_token(&token, TEST_SECRET, None);
        match result {
            Err(AppError::Unauthorized { message }) => {
                assert!(message.contains("expired"));
            }
            other => panic!("Expected Unauthorized error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_garbage_token() {
        assert!(validate_token("invalid.token.format", TEST_SECRET, None).is_err());
    }

    #[test]
    fn token_type_serializes_lowercase() {
        let claims = Claims::new(
            1,
            "admin@pustaka.test".to_string(),
            "Admin".to_string(),
            TokenType::Refresh,
            168,
        );
        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("\"token_type\":\"refresh\""));
    }
}
