//! Registration entities: the join between a user and an event.

pub mod model;
pub mod status;

pub use model::{AttendeeInfo, Registration};
pub use status::PaymentStatus;
