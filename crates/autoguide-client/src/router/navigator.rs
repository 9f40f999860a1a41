//! Client-side location state and the single-flight redirect flag.
//!
//! Several in-flight requests can fail with 401 at the same moment; without
//! coordination each would independently force a login navigation. The flag
//! lives here, owned by the navigation component, and is reset when a
//! navigation completes, not by the request pipeline.

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use super::routes;

/// Current location plus the redirect state shared with the request pipeline.
#[derive(Debug)]
pub struct Navigator {
    location: RwLock<String>,
    redirect_in_flight: AtomicBool,
    pending: RwLock<Option<String>>,
}

impl Navigator {
    /// Creates a navigator positioned at the given location path.
    pub fn new(initial_location: impl Into<String>) -> Self {
        Self {
            location: RwLock::new(initial_location.into()),
            redirect_in_flight: AtomicBool::new(false),
            pending: RwLock::new(None),
        }
    }

    /// The current location path (with query, if any).
    pub fn location(&self) -> String {
        self.location
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Whether this location is under `/login` or `/register`.
    pub fn at_auth_location(&self) -> bool {
        routes::is_auth_location(&self.location())
    }

    /// Attempts to start the one-shot redirect to the login route.
    ///
    /// Exactly one caller per navigation cycle wins; losers get `false` and
    /// do nothing. The winner's target carries the interrupted location as
    /// the `next` parameter.
    pub fn begin_login_redirect(&self, next: &str) -> bool {
        if self
            .redirect_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        let target = format!("/login?next={}", urlencoding::encode(next));
        info!(target = %target, "Redirecting to login");
        *self.pending.write().unwrap_or_else(|e| e.into_inner()) = Some(target);
        true
    }

    /// The login redirect started this cycle, if any.
    pub fn pending_redirect(&self) -> Option<String> {
        self.pending
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// True while a login redirect is underway.
    pub fn redirect_in_flight(&self) -> bool {
        self.redirect_in_flight.load(Ordering::Acquire)
    }

    /// Completes a navigation: moves to the new location and re-arms the
    /// redirect flag for the next cycle.
    pub fn complete_navigation(&self, location: impl Into<String>) {
        *self.location.write().unwrap_or_else(|e| e.into_inner()) = location.into();
        *self.pending.write().unwrap_or_else(|e| e.into_inner()) = None;
        self.redirect_in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_first_redirect_wins() {
        let nav = Navigator::new("/bookings");
        assert!(nav.begin_login_redirect("/bookings"));
        assert!(!nav.begin_login_redirect("/bookings"));
        assert!(!nav.begin_login_redirect("/guests"));
        assert_eq!(
            nav.pending_redirect().as_deref(),
            Some("/login?next=%2Fbookings")
        );
    }

    #[test]
    fn completing_navigation_rearms_the_flag() {
        let nav = Navigator::new("/bookings");
        assert!(nav.begin_login_redirect("/bookings"));
        nav.complete_navigation("/login?next=%2Fbookings");

        assert!(!nav.redirect_in_flight());
        assert!(nav.pending_redirect().is_none());
        assert!(nav.at_auth_location());
        assert!(nav.begin_login_redirect("/rooms"));
    }

    #[test]
    fn auth_locations_are_prefix_matched() {
        for path in ["/login", "/login?next=%2F", "/register", "/register/extra"] {
            let nav = Navigator::new(path);
            assert!(nav.at_auth_location(), "path {path:?}");
        }
        assert!(!Navigator::new("/bookings").at_auth_location());
    }
}
