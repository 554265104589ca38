//! JWT service for token generation and validation
//!
//! This module signs caller payloads with a shared HS256 secret and checks
//! signature and expiry on the way back in.

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{TokenError, TokenResult};

/// Decoded token contents: the signed payload plus `iat` and `exp`
pub type Claims = Map<String, Value>;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared secret used for signing and verification
    pub secret: String,
    /// Token lifetime in seconds
    pub expiry: u64,
}

/// JWT service
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl TokenService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> TokenResult<Self> {
        if config.secret.is_empty() {
            return Err(TokenError::Configuration(
                "signing secret must not be empty".to_string(),
            ));
        }
        if config.expiry == 0 {
            return Err(TokenError::Configuration(
                "token expiry must be positive".to_string(),
            ));
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(TokenService {
            encoding_key,
            decoding_key,
            validation,
            config,
        })
    }

    /// Sign `payload` as-is. Any `iat`/`exp` keys it carries are overwritten.
    pub fn issue(&self, payload: &Value) -> TokenResult<String> {
        let mut claims = match payload {
            Value::Object(map) => map.clone(),
            Value::Null => return Err(TokenError::InvalidPayload("null")),
            Value::Bool(_) => return Err(TokenError::InvalidPayload("a boolean")),
            Value::Number(_) => return Err(TokenError::InvalidPayload("a number")),
            Value::String(_) => return Err(TokenError::InvalidPayload("a string")),
            Value::Array(_) => return Err(TokenError::InvalidPayload("an array")),
        };

        let now = Utc::now().timestamp();
        claims.insert("iat".to_string(), Value::from(now));
        claims.insert(
            "exp".to_string(),
            Value::from(now.saturating_add_unsigned(self.config.expiry)),
        );

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    /// Validate a token and return the claims
    pub fn validate(&self, token: &str) -> TokenResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid(e),
                }
            })
    }

    /// Get the token expiry time in seconds
    pub fn expiry(&self) -> u64 {
        self.config.expiry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> TokenService {
        TokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            expiry: 3600,
        })
        .unwrap()
    }

    #[test]
    fn issued_token_round_trips_the_payload() {
        let tokens = service();
        let token = tokens.issue(&json!({ "email": "rider@example.com" })).unwrap();

        let claims = tokens.validate(&token).unwrap();
        assert_eq!(claims["email"], "rider@example.com");

        let iat = claims["iat"].as_i64().unwrap();
        let exp = claims["exp"].as_i64().unwrap();
        assert_eq!(exp - iat, 3600);
    }

    #[test]
    fn payload_cannot_choose_its_own_expiry() {
        let tokens = service();
        let token = tokens
            .issue(&json!({ "email": "a@b.c", "exp": 99_999_999_999_i64 }))
            .unwrap();

        let claims = tokens.validate(&token).unwrap();
        assert!(claims["exp"].as_i64().unwrap() < 99_999_999_999);
    }

    #[test]
    fn non_object_payloads_are_rejected() {
        let tokens = service();
        assert!(matches!(
            tokens.issue(&json!("rider@example.com")),
            Err(TokenError::InvalidPayload("a string"))
        ));
        assert!(matches!(
            tokens.issue(&json!([1, 2])),
            Err(TokenError::InvalidPayload("an array"))
        ));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let tokens = service();
        let past = Utc::now().timestamp() - 120;
        let token = encode(
            &Header::new(Algorithm::HS256),
            &json!({ "email": "a@b.c", "iat": past - 3600, "exp": past }),
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(tokens.validate(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn altered_signature_is_invalid() {
        let tokens = service();
        let token = tokens.issue(&json!({ "email": "a@b.c" })).unwrap();

        let (body, signature) = token.rsplit_once('.').unwrap();
        let flipped = if signature.starts_with('A') { 'B' } else { 'A' };
        let forged = format!("{body}.{flipped}{}", &signature[1..]);

        assert!(matches!(
            tokens.validate(&forged),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn token_from_another_secret_is_invalid() {
        let other = TokenService::new(JwtConfig {
            secret: "someone-else".to_string(),
            expiry: 3600,
        })
        .unwrap();
        let token = other.issue(&json!({ "email": "a@b.c" })).unwrap();

        assert!(matches!(
            service().validate(&token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(matches!(
            service().validate(""),
            Err(TokenError::Invalid(_))
        ));
        assert!(matches!(
            service().validate("not.a.jwt"),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn empty_secret_is_a_configuration_error() {
        let result = TokenService::new(JwtConfig {
            secret: String::new(),
            expiry: 3600,
        });
        assert!(matches!(result, Err(TokenError::Configuration(_))));
    }
}
