//! Domain foundation for the hypnodiary workspace.
//!
//! Holds what every other crate needs and nothing that pulls in I/O:
//! shared id/timestamp aliases, the error taxonomy, and the pure
//! video-link normalizer.

pub mod error;
pub mod links;
pub mod types;
