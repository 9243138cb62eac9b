//! Event entities.

pub mod category;
pub mod filter;
pub mod model;

pub use category::EventCategory;
pub use filter::EventFilter;
pub use model::{CreateEvent, Event, UpdateEvent};
