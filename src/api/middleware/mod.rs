//! API middleware components

pub mod logging;
pub mod model;

pub use logging::logging_middleware;
pub use model::RequireModel;
