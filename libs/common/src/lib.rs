//! Common library for the RideMate backend
//!
//! This crate provides the pieces shared by every RideMate binary: database
//! configuration and connectivity, collection table bootstrap, and the
//! database error type.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, connect_with_retry, ensure_collection, health_check};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = connect_with_retry(&config).await?;
//!     ensure_collection(&pool, "services").await?;
//!     println!("Database health check: {}", health_check(&pool).await?);
//!     pool.close().await;
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
