//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - Block registry (authoring / preview / export markup per block type)
//! - Sync engine (structured text and live preview)
//! - Export engine (flattened text, static markup)
//! - Background image loading

pub mod export;
pub mod image_loader;
pub mod markup;
pub mod registry;
pub mod sync;
