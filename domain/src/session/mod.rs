//! Diagnosis session domain.
//!
//! - [`entities::Session`]: one diagnosis conversation
//! - [`entities::Message`]: a single turn within a session
//! - [`entities::Diagnosis`]: structured classification result
//! - [`store::SessionStore`]: the session collection plus the current session

pub mod entities;
pub mod store;
