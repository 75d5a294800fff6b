//! Authentication domain.

pub mod entities;
