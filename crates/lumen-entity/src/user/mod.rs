//! User entities.

pub mod model;
pub mod status;

pub use model::{AdminMembership, CreateUser, User};
pub use status::ApprovalStatus;
