//! Common utilities module
//!
//! This module contains shared types used across the light-field pipeline.

pub mod error;

pub use error::{Axis, EpiError, Result};
