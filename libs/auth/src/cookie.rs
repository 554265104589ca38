//! Session cookie construction

use axum_extra::extract::cookie::{Cookie, SameSite};

/// Name of the cookie carrying the session token
pub const TOKEN_COOKIE: &str = "token";

/// Cookie attributes that depend on the deployment mode
///
/// In production the frontend is served from another site, so the cookie must
/// be `Secure; SameSite=None` to travel on credentialed cross-site requests.
/// Locally everything is same-site over plain HTTP.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookiePolicy {
    pub production: bool,
}

impl CookiePolicy {
    pub fn new(production: bool) -> Self {
        Self { production }
    }

    /// Cookie holding a freshly issued token
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        self.base(token)
    }

    /// Cookie that makes the browser drop the session immediately
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = self.base(String::new());
        cookie.make_removal();
        cookie
    }

    fn base(&self, value: String) -> Cookie<'static> {
        let same_site = if self.production {
            SameSite::None
        } else {
            SameSite::Strict
        };

        Cookie::build((TOKEN_COOKIE, value))
            .path("/")
            .http_only(true)
            .secure(self.production)
            .same_site(same_site)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_cookie_is_cross_site_and_secure() {
        let cookie = CookiePolicy::new(true).session_cookie("abc".to_string());

        assert_eq!(cookie.name(), TOKEN_COOKIE);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
    }

    #[test]
    fn development_cookie_is_strict() {
        let cookie = CookiePolicy::default().session_cookie("abc".to_string());

        assert_eq!(cookie.http_only(), Some(true));
        assert_ne!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn removal_cookie_expires_immediately() {
        let cookie = CookiePolicy::new(true).removal_cookie();

        assert_eq!(cookie.name(), TOKEN_COOKIE);
        assert_eq!(cookie.value(), "");
        assert!(cookie.max_age().is_some_and(|age| age.is_zero()));
        assert_eq!(cookie.path(), Some("/"));
    }
}
