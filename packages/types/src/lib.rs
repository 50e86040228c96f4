//! Shared foundation types for the OrderHub workspace.
//!
//! Every crate in the workspace funnels its fallible signatures through
//! [`Result`] and [`Error`] so error context composes across crate
//! boundaries without bespoke error enums at every layer.

pub use anyhow::{Context, Error, Result, anyhow, bail};

pub use serde_json::Value;

/// Re-exported JSON helpers so downstream crates do not need a direct
/// `serde_json` dependency for the common cases.
pub mod json {
    pub use serde_json::{Map, Value, from_slice, from_str, from_value, json, to_string, to_value};
}

mod utils;
pub use utils::create_id;
