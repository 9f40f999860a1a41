//! Static route table metadata.
//!
//! The guard only reads these flags; view rendering lives elsewhere.

/// Named routes of the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    /// Landing dashboard, publicly reachable.
    Dashboard,
    /// Guest management (staff only, always authenticated).
    Guests,
    /// Public hotel overview.
    Hotels,
    /// Room management (staff only).
    Rooms,
    /// Booking workflow.
    Bookings,
    /// Login form.
    Login,
    /// Registration hand-off to Keycloak.
    Register,
}

/// Authentication/authorization flags a route declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMeta {
    /// Requires a session when the global auth toggle is on.
    pub requires_auth: bool,
    /// Requires a session regardless of the global toggle.
    pub always_auth: bool,
    /// Restricted to staff roles; others are steered to bookings.
    pub backoffice_only: bool,
}

impl RouteName {
    /// Route path as used in `next` parameters.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Guests => "/guests",
            Self::Hotels => "/hotels",
            Self::Rooms => "/rooms",
            Self::Bookings => "/bookings",
            Self::Login => "/login",
            Self::Register => "/register",
        }
    }

    /// Static metadata for the route.
    pub fn meta(&self) -> RouteMeta {
        match self {
            Self::Guests => RouteMeta {
                requires_auth: true,
                always_auth: true,
                backoffice_only: true,
            },
            Self::Rooms => RouteMeta {
                requires_auth: true,
                always_auth: false,
                backoffice_only: true,
            },
            Self::Bookings => RouteMeta {
                requires_auth: true,
                always_auth: false,
                backoffice_only: false,
            },
            Self::Dashboard | Self::Hotels | Self::Login | Self::Register => RouteMeta {
                requires_auth: false,
                always_auth: false,
                backoffice_only: false,
            },
        }
    }

    /// Login/register, routes an authenticated user is steered away from.
    pub fn is_auth_route(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }
}

/// Whether a location path belongs to an auth-related route.
pub fn is_auth_location(path: &str) -> bool {
    path.starts_with("/login") || path.starts_with("/register")
}
