//! Identity & approval gate policy configuration.
//!
//! The gate resolves two independent axes per request: admin membership
//! and approval status. What happens when a lookup *fails* (as opposed to
//! returning a definite answer) is a named policy here rather than an
//! implicit fallback buried in the lookup code.

use serde::{Deserialize, Serialize};

/// Behavior when an approval-status lookup fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalFallback {
    /// Treat the caller as approved for the non-admin member view.
    ///
    /// A transient read failure must not lock out a legitimately
    /// approved member.
    #[default]
    FailOpen,
    /// Treat the caller as pending (member view withheld).
    FailClosed,
}

/// Gate policy configuration.
///
/// The admin axis is not configurable: admin elevation always fails
/// closed. Only the approval axis fallback is a policy choice.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GateConfig {
    /// Fallback applied when the approval-status lookup fails.
    #[serde(default)]
    pub approval_fallback: ApprovalFallback,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approval_fallback_defaults_to_fail_open() {
        let cfg: GateConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(cfg.approval_fallback, ApprovalFallback::FailOpen);
    }

    #[test]
    fn approval_fallback_parses_snake_case() {
        let cfg: GateConfig =
            serde_json::from_value(serde_json::json!({ "approval_fallback": "fail_closed" }))
                .unwrap();
        assert_eq!(cfg.approval_fallback, ApprovalFallback::FailClosed);
    }
}
