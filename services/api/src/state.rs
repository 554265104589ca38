//! Application state shared across handlers

use std::sync::Arc;

use auth::{CookiePolicy, TokenService};

use crate::repositories::{BookingRepository, DocumentCollection, ServiceRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service_repository: ServiceRepository,
    pub booking_repository: BookingRepository,
    pub token_service: TokenService,
    pub cookie_policy: CookiePolicy,
}

impl AppState {
    pub fn new(
        services: Arc<dyn DocumentCollection>,
        bookings: Arc<dyn DocumentCollection>,
        token_service: TokenService,
        cookie_policy: CookiePolicy,
    ) -> Self {
        Self {
            service_repository: ServiceRepository::new(services),
            booking_repository: BookingRepository::new(bookings),
            token_service,
            cookie_policy,
        }
    }
}
