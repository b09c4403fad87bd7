//! # Gradus Application Library
//!
//! Library portion of the Gradus binary: manifest loading and CLI wiring.
//! Split out so integration tests can exercise the manifest layer directly.

pub mod cli;
pub mod manifest;
