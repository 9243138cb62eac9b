//! Payment status lifecycle for a registration.
//!
//! The four-state machine at the heart of the platform:
//!
//! ```text
//!         create             submit proof/txn           admin approve
//! pending -------> pending_verification --------------------------> approved
//!    |                          |                    admin reject
//!    |  (card path, webhook)    +------------------------------------> rejected
//!    +---------------------------------------------------------------> approved
//! ```
//!
//! `approved` and `rejected` are terminal. The stored string vocabulary
//! (`pending`, `pending_verification`, `approved`, `rejected`) is load-bearing
//! for existing records and must not change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a registration's payment evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Registration exists, no payment evidence yet.
    Pending,
    /// User submitted a transaction reference and/or a proof upload.
    PendingVerification,
    /// Terminal: admin-confirmed or processor-confirmed.
    Approved,
    /// Terminal: admin-confirmed denial.
    Rejected,
}

impl PaymentStatus {
    /// Whether this state can never be left again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Whether the user may (re)submit payment evidence in this state.
    ///
    /// Resubmission while already under verification replaces the
    /// previous evidence; the state does not change.
    pub fn accepts_proof(&self) -> bool {
        matches!(self, Self::Pending | Self::PendingVerification)
    }

    /// Whether an admin may approve or reject in this state.
    pub fn accepts_review(&self) -> bool {
        !self.is_terminal()
    }

    /// Whether the card-path webhook may approve in this state.
    ///
    /// The card path bypasses manual verification entirely, so a
    /// processor confirmation lands from either non-terminal state.
    pub fn accepts_card_confirmation(&self) -> bool {
        !self.is_terminal()
    }

    /// Return the status as its stored snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::PendingVerification => "pending_verification",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = lumen_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "pending_verification" => Ok(Self::PendingVerification),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(lumen_core::AppError::validation(format!(
                "Invalid payment status: '{s}'. Expected one of: \
                 pending, pending_verification, approved, rejected"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_vocabulary_is_exact() {
        assert_eq!(PaymentStatus::Pending.as_str(), "pending");
        assert_eq!(
            PaymentStatus::PendingVerification.as_str(),
            "pending_verification"
        );
        assert_eq!(PaymentStatus::Approved.as_str(), "approved");
        assert_eq!(PaymentStatus::Rejected.as_str(), "rejected");
    }

    #[test]
    fn serde_round_trips_the_stored_strings() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::PendingVerification,
            PaymentStatus::Approved,
            PaymentStatus::Rejected,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            assert_eq!(status.as_str().parse::<PaymentStatus>().unwrap(), status);
        }
    }

    #[test]
    fn terminal_states_are_monotonic() {
        for terminal in [PaymentStatus::Approved, PaymentStatus::Rejected] {
            assert!(terminal.is_terminal());
            assert!(!terminal.accepts_proof());
            assert!(!terminal.accepts_review());
            assert!(!terminal.accepts_card_confirmation());
        }
    }

    #[test]
    fn proof_submission_allowed_before_terminal() {
        assert!(PaymentStatus::Pending.accepts_proof());
        assert!(PaymentStatus::PendingVerification.accepts_proof());
    }

    #[test]
    fn review_allowed_from_both_non_terminal_states() {
        assert!(PaymentStatus::Pending.accepts_review());
        assert!(PaymentStatus::PendingVerification.accepts_review());
    }

    #[test]
    fn card_confirmation_skips_manual_verification() {
        assert!(PaymentStatus::Pending.accepts_card_confirmation());
        assert!(PaymentStatus::PendingVerification.accepts_card_confirmation());
    }
}
