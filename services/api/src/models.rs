//! API models for request and response payloads

use serde::Serialize;

pub mod booking;
pub mod service;

/// Plain acknowledgment body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn success() -> Self {
        Self {
            message: "success",
        }
    }
}
