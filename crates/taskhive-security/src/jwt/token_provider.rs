//! JWT token provider for creating and validating access tokens.

use super::Claims;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use taskhive_config::SecurityConfig;
use taskhive_core::{TaskhiveError, TaskhiveResult, User};
use tracing::debug;

/// JWT token provider service.
#[derive(Clone)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: Arc<SecurityConfig>,
    validation: Validation,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: Arc<SecurityConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.validate_exp = true;

        Self {
            encoding_key,
            decoding_key,
            config,
            validation,
        }
    }

    /// Generates an access token for a user.
    pub fn generate_token(&self, user: &User) -> TaskhiveResult<String> {
        let expires_at = Utc::now() + Duration::seconds(self.config.jwt_expiration_secs as i64);

        let claims = Claims::new(
            user.id,
            user.username.clone(),
            self.config.jwt_issuer.clone(),
            expires_at,
        );

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TaskhiveError::Internal(format!("Failed to generate token: {}", e)))?;

        debug!("Generated access token for user {}", user.id);
        Ok(token)
    }

    /// Validates an access token and returns its claims.
    pub fn validate_token(&self, token: &str) -> TaskhiveResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TaskhiveError::TokenExpired,
                    _ => TaskhiveError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Returns the configured token lifetime in seconds.
    #[must_use]
    pub fn expires_in_secs(&self) -> u64 {
        self.config.jwt_expiration_secs
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider").finish_non_exhaustive()
    }
}
