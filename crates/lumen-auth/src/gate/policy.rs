//! Pure access-resolution policy.
//!
//! The two axes fail differently, as a matter of explicit policy:
//! admin elevation fails **closed** (an error can never grant admin
//! power), while the approval lookup fails **open** by default (a
//! transient read failure must not lock out an approved member). The
//! open fallback grants the plain member view only, never admin.

use serde::{Deserialize, Serialize};

use lumen_core::config::gate::ApprovalFallback;
use lumen_entity::user::ApprovalStatus;

/// Outcome of the admin-membership lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAxis {
    /// The user is a listed admin.
    Granted,
    /// The user is not a listed admin.
    Denied,
    /// The lookup failed. Mapped to `Denied`; admin fails closed.
    Unknown,
}

/// Outcome of the approval-status lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalAxis {
    /// The lookup returned a definite status.
    Known(ApprovalStatus),
    /// The lookup failed; the configured fallback applies.
    Unknown,
}

/// The resolved access level for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// No session. Catalog summaries only; everything else redirects
    /// to sign-in.
    Unauthenticated,
    /// Signed in, awaiting approval. Summaries only.
    Pending,
    /// Signed in, rejected. Confined to the home view with an
    /// "account disabled" notice; enforced at the route level.
    Rejected,
    /// Approved member. Full detail unlocks per-event once their own
    /// registration is approved.
    Approved,
    /// Administrator. Full detail for every event plus all mutations.
    Admin,
}

impl Access {
    /// Whether admin-only mutations are permitted.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether the member surface (registration, own ledger) is open.
    pub fn is_member(&self) -> bool {
        matches!(self, Self::Approved | Self::Admin)
    }

    /// Whether the actor is confined to the home view.
    pub fn is_confined(&self) -> bool {
        matches!(self, Self::Rejected)
    }
}

/// Combine both axes into an access level.
///
/// Admin dominates: a listed admin gets full access regardless of
/// approval status, including a rejected one.
pub fn resolve_access(
    admin: AdminAxis,
    approval: ApprovalAxis,
    fallback: ApprovalFallback,
) -> Access {
    if admin == AdminAxis::Granted {
        return Access::Admin;
    }

    match approval {
        ApprovalAxis::Known(ApprovalStatus::Approved) => Access::Approved,
        ApprovalAxis::Known(ApprovalStatus::Pending) => Access::Pending,
        ApprovalAxis::Known(ApprovalStatus::Rejected) => Access::Rejected,
        ApprovalAxis::Unknown => match fallback {
            ApprovalFallback::FailOpen => Access::Approved,
            ApprovalFallback::FailClosed => Access::Pending,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_overrides_rejected_status() {
        let access = resolve_access(
            AdminAxis::Granted,
            ApprovalAxis::Known(ApprovalStatus::Rejected),
            ApprovalFallback::FailOpen,
        );
        assert_eq!(access, Access::Admin);
    }

    #[test]
    fn admin_without_approved_status_still_gets_full_access() {
        for status in [ApprovalStatus::Pending, ApprovalStatus::Rejected] {
            let access = resolve_access(
                AdminAxis::Granted,
                ApprovalAxis::Known(status),
                ApprovalFallback::FailOpen,
            );
            assert_eq!(access, Access::Admin);
        }
    }

    #[test]
    fn admin_lookup_failure_never_grants_admin() {
        let access = resolve_access(
            AdminAxis::Unknown,
            ApprovalAxis::Known(ApprovalStatus::Approved),
            ApprovalFallback::FailOpen,
        );
        assert_eq!(access, Access::Approved);
        assert!(!access.is_admin());
    }

    #[test]
    fn approval_lookup_failure_fails_open_to_member_view() {
        let access = resolve_access(
            AdminAxis::Denied,
            ApprovalAxis::Unknown,
            ApprovalFallback::FailOpen,
        );
        assert_eq!(access, Access::Approved);
        assert!(!access.is_admin());
    }

    #[test]
    fn approval_lookup_failure_can_be_configured_closed() {
        let access = resolve_access(
            AdminAxis::Denied,
            ApprovalAxis::Unknown,
            ApprovalFallback::FailClosed,
        );
        assert_eq!(access, Access::Pending);
    }

    #[test]
    fn rejected_member_is_confined() {
        let access = resolve_access(
            AdminAxis::Denied,
            ApprovalAxis::Known(ApprovalStatus::Rejected),
            ApprovalFallback::FailOpen,
        );
        assert_eq!(access, Access::Rejected);
        assert!(access.is_confined());
        assert!(!access.is_member());
    }

    #[test]
    fn pending_member_is_not_confined_but_not_member() {
        let access = resolve_access(
            AdminAxis::Denied,
            ApprovalAxis::Known(ApprovalStatus::Pending),
            ApprovalFallback::FailOpen,
        );
        assert_eq!(access, Access::Pending);
        assert!(!access.is_confined());
        assert!(!access.is_member());
    }
}
