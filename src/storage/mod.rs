//! Storage for the reference backend

pub mod in_memory;

pub use in_memory::{CarStore, OrganizationStore};
