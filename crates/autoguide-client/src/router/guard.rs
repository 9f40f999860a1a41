//! The navigation guard, consulted before every route transition.

use std::sync::Arc;

use tracing::debug;

use autoguide_auth::SessionStore;

use super::routes::RouteName;

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Proceed to the requested route.
    Allow,
    /// Go somewhere else instead. `next` carries the originally intended
    /// destination when the redirect leads to login.
    Redirect {
        /// Where to go instead.
        route: RouteName,
        /// The interrupted destination, preserved for post-login return.
        next: Option<String>,
    },
}

/// Gates route transitions on session state and route metadata.
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    session: Arc<SessionStore>,
    require_auth: bool,
}

impl NavigationGuard {
    /// Creates a guard over the session store and the global auth toggle.
    pub fn new(session: Arc<SessionStore>, require_auth: bool) -> Self {
        Self {
            session,
            require_auth,
        }
    }

    /// Decides whether navigation to `target` may proceed.
    ///
    /// Order matters: the session is synced first so an expired token is
    /// cleared before any gating; an unauthenticated hit on a protected
    /// route goes to login with the destination preserved; a non-staff user
    /// on a back-office route is steered to bookings (soft denial); and an
    /// authenticated user is steered off login/register to the dashboard.
    pub fn check(&self, target: RouteName) -> GuardDecision {
        self.session.sync_session();

        let has_token = self.session.has_token();
        let is_backoffice = self.session.is_backoffice_user();
        let meta = target.meta();

        let needs_auth = meta.always_auth || (self.require_auth && meta.requires_auth);
        if needs_auth && !has_token {
            debug!(route = ?target, "Unauthenticated, redirecting to login");
            return GuardDecision::Redirect {
                route: RouteName::Login,
                next: Some(target.path().to_string()),
            };
        }

        if meta.backoffice_only && !is_backoffice {
            debug!(route = ?target, "No back-office role, redirecting to bookings");
            return GuardDecision::Redirect {
                route: RouteName::Bookings,
                next: None,
            };
        }

        if target.is_auth_route() && has_token {
            return GuardDecision::Redirect {
                route: RouteName::Dashboard,
                next: None,
            };
        }

        GuardDecision::Allow
    }
}
