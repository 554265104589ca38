//! Error types for token issuance and verification

use thiserror::Error;

/// Errors raised while issuing or verifying session tokens
#[derive(Error, Debug)]
pub enum TokenError {
    /// The payload to sign is not a JSON object
    #[error("Token payload must be a JSON object, got {0}")]
    InvalidPayload(&'static str),

    /// The service was constructed with unusable settings
    #[error("Token configuration error: {0}")]
    Configuration(String),

    /// Signing failed
    #[error("Failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// The token was well formed but its expiry has passed
    #[error("Token has expired")]
    Expired,

    /// Signature, algorithm or structure check failed
    #[error("Invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

pub type TokenResult<T> = Result<T, TokenError>;
