//! Winerank Core Library
//!
//! Loads a fixed-schema wine CSV, normalizes every rating onto the Parker
//! scale and produces the records ranked by descending rating.

pub mod clock;
pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod pipeline;
pub mod rating;
pub mod report;
pub mod validate;
