//! Persistent bearer-token storage.

pub mod file_store;
