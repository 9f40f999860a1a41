//! Role predicates and back-office permission aggregates.
//!
//! Realm roles arrive as lowercased strings extracted from the bearer token.
//! They stay strings rather than an enum: the realm role set is open-ended,
//! and extraction order/duplicates are observable.

/// Realm role granting full platform administration.
pub const SUPER_ADMIN_ROLE: &str = "super_admin";

/// Realm role granting hotel-level administration.
pub const ADMIN_ROLE: &str = "admin";

/// Realm role for booking operators.
pub const OPERATOR_ROLE: &str = "operator";

/// Checks membership of a single role.
pub fn has_role(roles: &[String], role: &str) -> bool {
    roles.iter().any(|r| r == role)
}

/// Any staff role at all; gates the back-office views.
pub fn is_backoffice_user(roles: &[String]) -> bool {
    has_role(roles, SUPER_ADMIN_ROLE)
        || has_role(roles, ADMIN_ROLE)
        || has_role(roles, OPERATOR_ROLE)
}

/// Guest management is open to admins and super-admins.
pub fn can_manage_guests(roles: &[String]) -> bool {
    has_role(roles, ADMIN_ROLE) || has_role(roles, SUPER_ADMIN_ROLE)
}

/// Room management is admin-only.
pub fn can_manage_rooms(roles: &[String]) -> bool {
    has_role(roles, ADMIN_ROLE)
}

/// Hotel management is super-admin-only.
pub fn can_manage_hotels(roles: &[String]) -> bool {
    has_role(roles, SUPER_ADMIN_ROLE)
}

/// Snapshot of the permission aggregates for a role set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Permissions {
    /// May list and create guests.
    pub manage_guests: bool,
    /// May create, update, and delete rooms.
    pub manage_rooms: bool,
    /// May create, update, and delete hotels.
    pub manage_hotels: bool,
}

impl Permissions {
    /// Derives the aggregates from a role set.
    pub fn from_roles(roles: &[String]) -> Self {
        Self {
            manage_guests: can_manage_guests(roles),
            manage_rooms: can_manage_rooms(roles),
            manage_hotels: can_manage_hotels(roles),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn operator_is_backoffice_but_manages_nothing() {
        let r = roles(&["operator"]);
        assert!(is_backoffice_user(&r));
        assert_eq!(
            Permissions::from_roles(&r),
            Permissions {
                manage_guests: false,
                manage_rooms: false,
                manage_hotels: false,
            }
        );
    }

    #[test]
    fn admin_manages_guests_and_rooms_but_not_hotels() {
        let r = roles(&["admin"]);
        let perms = Permissions::from_roles(&r);
        assert!(perms.manage_guests);
        assert!(perms.manage_rooms);
        assert!(!perms.manage_hotels);
    }

    #[test]
    fn super_admin_manages_guests_and_hotels_but_not_rooms() {
        let r = roles(&["super_admin"]);
        let perms = Permissions::from_roles(&r);
        assert!(perms.manage_guests);
        assert!(!perms.manage_rooms);
        assert!(perms.manage_hotels);
    }

    #[test]
    fn unknown_roles_grant_nothing() {
        let r = roles(&["guest", "receptionist"]);
        assert!(!is_backoffice_user(&r));
        assert!(!can_manage_guests(&r));
    }
}
