//! Route metadata, the navigator, and the navigation guard.

pub mod guard;
pub mod navigator;
pub mod routes;

pub use guard::{GuardDecision, NavigationGuard};
pub use navigator::Navigator;
pub use routes::{RouteMeta, RouteName};
