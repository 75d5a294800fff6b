//! Domain layer for leafscan
//!
//! This crate contains the core entities and state of a diagnosis
//! conversation. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! One diagnosis conversation: an append-only sequence of [`Message`]s plus
//! metadata (thumbnail, creation date). Sessions live in a [`SessionStore`],
//! which also tracks the single "current" session being displayed/edited.
//!
//! ## Diagnosis
//!
//! The structured classification result for a plant image: disease name,
//! symptom list, treatment steps.

pub mod auth;
pub mod core;
pub mod media;
pub mod session;

// Re-export commonly used types
pub use auth::entities::{AuthToken, User};
pub use core::error::DomainError;
pub use media::data_uri::{DataUri, DataUriError};
pub use session::{
    entities::{Diagnosis, Message, Role, Session},
    store::SessionStore,
};
