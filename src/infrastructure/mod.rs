//! Infrastructure layer - registry backends, job services and logging

pub mod logging;
pub mod registry;
pub mod services;
