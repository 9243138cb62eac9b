//! Request context carrying the authenticated identity and gate decision.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use lumen_auth::gate::Access;
use lumen_core::error::AppError;

/// Context for the current authenticated request.
///
/// Built by middleware from the JWT claims plus a fresh gate
/// resolution, and passed into service methods so every operation
/// knows *who* is acting and with *what* access.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's email (from claims, convenience only).
    pub email: String,
    /// Gate-resolved access level, re-read from the store this request.
    pub access: Access,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, email: String, access: Access) -> Self {
        Self {
            user_id,
            email,
            access,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.access.is_admin()
    }

    /// Require the approved member surface.
    pub fn require_member(&self) -> Result<(), AppError> {
        if self.access.is_member() {
            Ok(())
        } else if self.access.is_confined() {
            Err(AppError::forbidden(
                "Your account has been disabled. Contact an administrator.",
            ))
        } else {
            Err(AppError::forbidden(
                "Your account is awaiting approval by an administrator.",
            ))
        }
    }

    /// Require admin privileges.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("Admin access required"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_checks_follow_access() {
        let approved = RequestContext::new(Uuid::new_v4(), "a@b.c".into(), Access::Approved);
        assert!(approved.require_member().is_ok());
        assert!(approved.require_admin().is_err());

        let admin = RequestContext::new(Uuid::new_v4(), "a@b.c".into(), Access::Admin);
        assert!(admin.require_member().is_ok());
        assert!(admin.require_admin().is_ok());

        let rejected = RequestContext::new(Uuid::new_v4(), "a@b.c".into(), Access::Rejected);
        assert!(rejected.require_member().is_err());

        let pending = RequestContext::new(Uuid::new_v4(), "a@b.c".into(), Access::Pending);
        assert!(pending.require_member().is_err());
    }
}
