//! Per-user approval status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Approval status for a member account.
///
/// Independent of authentication: a signed-in user may still be pending
/// or rejected. Admin membership is a separate marker ([`super::AdminMembership`])
/// and bypasses this status entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "approval_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Account created, awaiting admin review. Confined to the public view.
    Pending,
    /// Account approved by an admin. Full member view available.
    Approved,
    /// Account rejected by an admin. Confined to the home view.
    Rejected,
}

impl ApprovalStatus {
    /// Whether this status grants the full member view.
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = lumen_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(lumen_core::AppError::validation(format!(
                "Invalid approval status: '{s}'. Expected one of: pending, approved, rejected"
            ))),
        }
    }
}
