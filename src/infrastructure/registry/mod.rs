//! Model registry backends

mod factory;
mod file_store;
mod in_memory;

pub use factory::{RegistryBackend, RegistryFactory, DEFAULT_TRACKING_URI};
pub use file_store::FileModelRegistry;
pub use in_memory::InMemoryModelRegistry;
