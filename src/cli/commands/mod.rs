//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod categories;
pub mod init;
pub mod keygen;
pub mod scrub;
pub mod validate;
