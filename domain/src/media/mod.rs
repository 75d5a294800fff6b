//! Encoded-image handling.

pub mod data_uri;
