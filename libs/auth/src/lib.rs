//! Session tokens for the RideMate backend
//!
//! Tokens are HS256 JWTs that embed whatever identifying payload the client
//! posted, plus `iat`/`exp`. They travel in an HTTP-only cookie; the server
//! keeps no session state, so validity is signature plus expiry.

pub mod cookie;
pub mod error;
pub mod jwt;

pub use cookie::{CookiePolicy, TOKEN_COOKIE};
pub use error::{TokenError, TokenResult};
pub use jwt::{Claims, JwtConfig, TokenService};
