//! HTTP backend adapter.
//!
//! [`client::ApiClient`] wraps outbound calls to the classification/auth
//! service: base-URL joining, bearer-token attachment, and error-shape
//! normalization. The sibling modules implement the application ports on
//! top of it; [`protocol`] holds the wire types.

pub mod auth;
pub mod chat;
pub mod classifier;
pub mod client;
pub mod error;
pub mod profile;
pub mod protocol;
