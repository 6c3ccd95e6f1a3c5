//! Credential verification and session token issuance.

use serde::Serialize;

use crate::config::AuthConfig;
use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::repositories::UserRepository;
use crate::utils::jwt::{self, Claims};
use crate::utils::password::verify_password;

/// Access/refresh token pair returned at sign-in and refresh.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(users: UserRepository, config: AuthConfig) -> Self {
        Self { users, config }
    }

    /// Verifies email/password and issues a token pair.
    ///
    /// Unknown email and wrong password produce the same message so the
    /// endpoint does not leak which accounts exist.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(User, TokenPair)> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !verify_password(password, &user.password)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let tokens = self.issue_tokens(&user)?;
        Ok((user, tokens))
    }

    /// Exchanges a valid refresh token for a fresh pair.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<(User, TokenPair)> {
        let claims = jwt::validate_refresh_token(refresh_token, &self.config.jwt_secret)?;
        let user = self
            .users
            .find_by_id(claims.user_id()?)
            .await?
            .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

        let tokens = self.issue_tokens(&user)?;
        Ok((user, tokens))
    }

    /// Validates a bearer access token.
    pub fn verify_access_token(&self, token: &str) -> AppResult<Claims> {
        jwt::validate_access_token(token, &self.config.jwt_secret)
    }

    /// Verifies a Basic credential pair.
    ///
    /// A statically configured pair takes precedence; otherwise the username
    /// is treated as an email and checked against the stored bcrypt hash.
    pub async fn verify_basic(&self, username: &str, password: &str) -> AppResult<bool> {
        if let Some(matches) = static_pair_matches(&self.config, username, password) {
            return Ok(matches);
        }

        match self.users.find_by_email(username).await? {
            Some(user) => verify_password(password, &user.password),
            None => Ok(false),
        }
    }

    fn issue_tokens(&self, user: &User) -> AppResult<TokenPair> {
        let (access_token, refresh_token) = jwt::generate_token_pair(
            user.id,
            user.email.clone(),
            user.name.clone(),
            &self.config.jwt_secret,
            self.config.access_token_expiration,
            self.config.refresh_token_expiration,
        )?;
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}

/// Compares against the statically configured Basic pair, when one is set.
fn static_pair_matches(config: &AuthConfig, username: &str, password: &str) -> Option<bool> {
    match (&config.basic_username, &config.basic_password) {
        (Some(expected_user), Some(expected_pass)) => {
            Some(expected_user == username && expected_pass == password)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_static_pair() -> AuthConfig {
        AuthConfig {
            jwt_secret: "a-secret-that-is-long-enough-for-hs256".to_string(),
            basic_username: Some("admin".to_string()),
            basic_password: Some("rahasia123".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn static_pair_accepts_exact_match() {
        let config = config_with_static_pair();
        assert_eq!(static_pair_matches(&config, "admin", "rahasia123"), Some(true));
    }

    #[test]
    fn static_pair_rejects_wrong_password() {
        let config = config_with_static_pair();
        assert_eq!(static_pair_matches(&config, "admin", "wrong"), Some(false));
        assert_eq!(static_pair_matches(&config, "other", "rahasia123"), Some(false));
    }

    #[test]
    fn absent_static_pair_defers_to_database() {
        let config = AuthConfig::default();
        assert_eq!(static_pair_matches(&config, "admin", "rahasia123"), None);
    }

    #[test]
    fn token_pair_serializes_camel_case() {
        let pair = TokenPair {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
        };
        let json = serde_json::to_value(&pair).unwrap();
        assert!(json.get("accessToken").is_some());
        assert!(json.get("refreshToken").is_some());
    }
}
