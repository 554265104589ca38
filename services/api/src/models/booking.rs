//! Booking models

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::repositories::{Document, Filter};

pub const USER_EMAIL: &str = "userEmail";
pub const PROVIDER_EMAIL: &str = "serviceProviderEmail";
pub const STATUS: &str = "status";

/// Allowed booking states
///
/// No transition rules apply between them; any allowed value may replace any
/// other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Rejected,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
        BookingStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| {
                let allowed: Vec<&str> = BookingStatus::ALL.iter().map(|s| s.as_str()).collect();
                format!(
                    "Unknown booking status '{}'; expected one of: {}",
                    s,
                    allowed.join(", ")
                )
            })
    }
}

/// Query parameters for booking listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuery {
    pub user_email: Option<String>,
    pub service_provider_email: Option<String>,
}

impl BookingQuery {
    pub fn to_filter(&self) -> Filter {
        Filter::new()
            .eq_opt(USER_EMAIL, self.user_email.as_deref())
            .eq_opt(PROVIDER_EMAIL, self.service_provider_email.as_deref())
    }
}

/// Body of `PATCH /user/bookings/:id`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: Option<String>,
}

impl UpdateBookingStatusRequest {
    pub fn status(&self) -> Result<BookingStatus, String> {
        self.status
            .as_deref()
            .ok_or_else(|| "status is required".to_string())?
            .parse()
    }
}

/// Check a new booking's status, defaulting it to pending. Every other field
/// is kept verbatim.
pub fn prepare_new_booking(mut payload: Document) -> Result<Document, String> {
    let status = match payload.get(STATUS) {
        None | Some(Value::Null) => BookingStatus::default(),
        Some(Value::String(raw)) => raw.parse()?,
        Some(_) => return Err("status must be a string".to_string()),
    };

    payload.insert(STATUS.to_string(), Value::from(status.as_str()));
    Ok(payload)
}
