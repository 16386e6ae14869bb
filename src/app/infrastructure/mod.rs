//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - The host seam (prompts, alerts, file delivery)
//! - Logging setup
//! - Error types

pub mod error;
pub mod host;
pub mod logging;
