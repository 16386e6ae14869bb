//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (blocks, structured document, settings, messages)
//! - `controllers/` - Orchestration (the canvas and its placement/reorder/delete rules)
//! - `services/` - Business operations (block registry, sync, export, image loading)
//! - `infrastructure/` - External integrations (host seam, logging, error)
//! - `state.rs` - Main application coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use controllers::canvas::Canvas;
pub use domain::{
    AppSettings, BlockId, BlockInstance, BlockType, DropTarget, Field, FieldEdit, FormDocument,
    Message,
};
pub use infrastructure::error::{AppError, Result};
pub use infrastructure::host::{DirectorySink, ExportFile, Host};
pub use services::image_loader::ImageLoad;
pub use state::AppState;
