//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Block types and placed block instances
//! - The structured document (`{"fields": [...]}`)
//! - Application settings
//! - Message types for the event system

pub mod block;
pub mod document;
pub mod messages;
pub mod settings;

pub use block::{BlockId, BlockInstance, BlockType, Control, FieldEdit, ImageControl, RADIO_OPTIONS};
pub use document::{Field, FormDocument};
pub use messages::{DropTarget, Message};
pub use settings::AppSettings;
