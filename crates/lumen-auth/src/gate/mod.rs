//! Identity & approval gate.
//!
//! Resolves what the current actor may see: two independent lookups
//! (admin membership, approval status) combined by an explicit policy.

pub mod policy;
pub mod resolver;

pub use policy::{Access, AdminAxis, ApprovalAxis, resolve_access};
pub use resolver::{GateDecision, IdentityGate};
