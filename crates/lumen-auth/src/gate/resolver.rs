//! Async gate resolution against the record store.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use lumen_core::config::gate::GateConfig;
use lumen_core::error::AppResult;
use lumen_database::repositories::admin::AdminRepository;
use lumen_database::repositories::user::UserRepository;
use lumen_entity::user::User;

use super::policy::{Access, AdminAxis, ApprovalAxis, resolve_access};

/// The gate's decision for one request.
#[derive(Debug, Clone)]
pub struct GateDecision {
    /// Resolved access level.
    pub access: Access,
    /// The user row, when the approval lookup returned one.
    pub user: Option<User>,
}

/// Resolves the current actor's access level.
///
/// Both lookups hit the record store on every protected request; the
/// results are deliberately not cached so that an admin toggling a
/// member's status takes effect on the member's next navigation.
#[derive(Debug, Clone)]
pub struct IdentityGate {
    user_repo: Arc<UserRepository>,
    admin_repo: Arc<AdminRepository>,
    policy: GateConfig,
}

impl IdentityGate {
    /// Creates a new gate.
    pub fn new(
        user_repo: Arc<UserRepository>,
        admin_repo: Arc<AdminRepository>,
        policy: GateConfig,
    ) -> Self {
        Self {
            user_repo,
            admin_repo,
            policy,
        }
    }

    /// Resolve access for an authenticated user id.
    ///
    /// Lookup errors are absorbed into the per-axis outcomes; this
    /// method itself only fails on logic errors, never on store errors.
    pub async fn resolve(&self, user_id: Uuid) -> AppResult<GateDecision> {
        let admin_axis = match self.admin_repo.is_admin(user_id).await {
            Ok(true) => AdminAxis::Granted,
            Ok(false) => AdminAxis::Denied,
            Err(e) => {
                warn!(%user_id, error = %e, "Admin lookup failed; denying admin axis");
                AdminAxis::Unknown
            }
        };

        let (approval_axis, user) = match self.user_repo.find_by_id(user_id).await {
            Ok(Some(user)) => (ApprovalAxis::Known(user.approval_status), Some(user)),
            Ok(None) => {
                warn!(%user_id, "Authenticated user has no profile row");
                (ApprovalAxis::Unknown, None)
            }
            Err(e) => {
                warn!(%user_id, error = %e, "Approval lookup failed; applying fallback");
                (ApprovalAxis::Unknown, None)
            }
        };

        let access = resolve_access(admin_axis, approval_axis, self.policy.approval_fallback);

        Ok(GateDecision { access, user })
    }
}
