//! Card-payment entities.

pub mod model;

pub use model::{CreatePayment, Payment};
