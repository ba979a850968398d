//! Application layer orchestrating card creation.
//!
//! This module defines the `CardEngine`, which runs normalization, the
//! optional profile lookup and validation for each card input.

pub mod engine;
