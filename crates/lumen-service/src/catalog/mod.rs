//! Event catalog service and gated detail views.

pub mod service;
pub mod view;

pub use service::CatalogService;
pub use view::EventView;
