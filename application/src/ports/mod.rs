//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.
//! The services in this crate depend only on these traits, so every adapter
//! can be substituted with a fake in tests.

pub mod auth_gateway;
pub mod chat_gateway;
pub mod classifier;
pub mod gateway;
pub mod image_source;
pub mod profile_gateway;
pub mod token_store;
