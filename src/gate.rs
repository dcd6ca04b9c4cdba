//! Centralized role predicates. Every authorization decision in the API and
//! the ledgers goes through these, never through ad-hoc role comparisons.

use crate::model::role::Role;

/// Managers and admins may finalize any leave application, including ones
/// from outside their own team; approval is intentionally not team-scoped.
pub fn can_approve_leave(actor: Role) -> bool {
    matches!(actor, Role::Manager | Role::Admin)
}

pub fn can_view_admin_dashboard(actor: Role) -> bool {
    actor == Role::Admin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_manager_and_admin_approve() {
        assert!(!can_approve_leave(Role::Employee));
        assert!(can_approve_leave(Role::Manager));
        assert!(can_approve_leave(Role::Admin));
    }

    #[test]
    fn only_admin_views_admin_dashboard() {
        assert!(!can_view_admin_dashboard(Role::Employee));
        assert!(!can_view_admin_dashboard(Role::Manager));
        assert!(can_view_admin_dashboard(Role::Admin));
    }
}
