use super::block::{BlockId, BlockType, FieldEdit};
use crate::app::services::image_loader::ImageLoad;

/// Where a dragged block was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// A slot on the canvas; indices past the end append.
    Canvas { index: usize },
    /// Back onto the palette. The canvas keeps the block.
    Palette,
}

/// All messages the front-end can send to the application state.
/// Each control callback sends one of these; the dispatch loop in main handles them.
#[derive(Debug, Clone)]
pub enum Message {
    // Canvas
    PlaceFromPalette(BlockType),
    Dropped { id: BlockId, target: DropTarget },
    Delete(BlockId),
    EditField { id: BlockId, edit: FieldEdit },

    // Background image reads
    ImageLoaded(ImageLoad),

    // Structured text pane
    StructuredTextEdited(String),
    ApplyStructuredText,

    // Preview & export
    Preview,
    DownloadForm,
    ConvertToMarkup,

    Quit,
}
