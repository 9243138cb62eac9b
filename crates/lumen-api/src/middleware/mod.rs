//! Tower/Axum middleware layers.

pub mod cors;
pub mod logging;
