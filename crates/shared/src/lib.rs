//! Shared types and utilities for the beasiswa client crates.

pub mod models;
pub mod error;

pub use models::*;
pub use error::*;
