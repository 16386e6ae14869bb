use crate::app::domain::block::{BlockId, BlockInstance, BlockType, Control, FieldEdit};
use crate::app::domain::document::{Field, FormDocument};
use crate::app::domain::messages::DropTarget;
use crate::app::infrastructure::host::Host;
use crate::app::services::registry::{self, image_authoring, wrap_authoring};

pub const LABEL_PROMPT: &str = "Enter new component name:";

/// The ordered set of blocks the user has placed. Order is visual order and is
/// the order of every projection (structured document, preview, flattened text).
pub struct Canvas {
    blocks: Vec<BlockInstance>,
    next_id: u64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            next_id: 1,
        }
    }

    fn next_block_id(&mut self) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a new block at the end of the canvas.
    pub fn insert(&mut self, kind: BlockType, label: &str) -> BlockId {
        let id = self.next_block_id();
        self.blocks.push(BlockInstance::new(id, kind, label));
        id
    }

    /// Ask the host for a label and append a block of `kind`.
    /// A cancelled prompt or an empty answer creates nothing.
    pub fn place_from_palette(&mut self, kind: BlockType, host: &mut dyn Host) -> Option<BlockId> {
        let label = host.prompt(LABEL_PROMPT)?;
        if label.is_empty() {
            return None;
        }
        let id = self.insert(kind, &label);
        tracing::debug!("Placed {} block {:?} labelled {:?}", kind.tag(), id, label);
        Some(id)
    }

    /// Apply a drop reported by the drag layer. Returns true if the order changed.
    ///
    /// Dropping on the palette leaves the canvas untouched; callers still sync.
    pub fn handle_drop(&mut self, id: BlockId, target: DropTarget) -> bool {
        match target {
            DropTarget::Canvas { index } => self.move_to(id, index),
            DropTarget::Palette => {
                tracing::debug!("Block {:?} dropped on the palette", id);
                false
            }
        }
    }

    /// Move a block to `index`, clamped to the end. Returns true if it moved.
    pub fn move_to(&mut self, id: BlockId, index: usize) -> bool {
        let Some(from) = self.position(id) else {
            return false;
        };
        let block = self.blocks.remove(from);
        let to = index.min(self.blocks.len());
        self.blocks.insert(to, block);
        from != to
    }

    /// Remove a block by id. Other blocks keep their relative order.
    pub fn delete(&mut self, id: BlockId) -> Option<BlockInstance> {
        let idx = self.position(id)?;
        Some(self.blocks.remove(idx))
    }

    /// Apply a user edit to a block's live control.
    pub fn edit(&mut self, id: BlockId, edit: FieldEdit) -> bool {
        match self.block_mut(id) {
            Some(block) => {
                let applied = block.apply_edit(edit);
                if !applied {
                    tracing::warn!("Ignoring edit that doesn't fit {} block {:?}", block.kind.tag(), id);
                }
                applied
            }
            None => false,
        }
    }

    /// Attach loaded image data. Blocks deleted since the read started are
    /// silently skipped, as are reads superseded by a newer file choice.
    pub fn attach_image(&mut self, id: BlockId, path: &std::path::Path, data_uri: String) -> bool {
        let Some(block) = self.block_mut(id) else {
            tracing::debug!("Image read finished for removed block {:?}", id);
            return false;
        };
        match &mut block.control {
            Control::Image(image) if image.file_path.as_deref() == Some(path) => {
                image.data_uri = Some(data_uri);
                true
            }
            _ => false,
        }
    }

    /// Replace the canvas contents with the blocks a structured document describes.
    /// Fields of unknown type are skipped. Returns the number of blocks created.
    pub fn restore(&mut self, document: &FormDocument) -> usize {
        self.blocks.clear();
        for field in &document.fields {
            let Some(kind) = field.block_type() else {
                tracing::debug!("Not restoring field with unsupported type {:?}", field.kind);
                continue;
            };
            let id = self.next_block_id();
            let block = BlockInstance::new(id, kind, field.label.as_str())
                .with_stored_value(&field.value, field.options.clone());
            self.blocks.push(block);
        }
        self.blocks.len()
    }

    /// Project the canvas into the structured document.
    pub fn document(&self) -> FormDocument {
        FormDocument {
            fields: self
                .blocks
                .iter()
                .map(|b| Field::new(b.kind, &b.label, &b.live_value(), &b.options))
                .collect(),
        }
    }

    /// Authoring markup for the whole canvas.
    pub fn render_authoring(&self) -> String {
        self.blocks
            .iter()
            .map(|b| {
                let inner = match &b.control {
                    Control::Image(image) => image_authoring(&b.label, image.data_uri.as_deref()),
                    _ => registry::renderer(b.kind).authoring(&b.label),
                };
                wrap_authoring(b.id, &inner)
            })
            .collect()
    }

    pub fn blocks(&self) -> &[BlockInstance] {
        &self.blocks
    }

    pub fn count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn position(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    pub fn block_mut(&mut self, id: BlockId) -> Option<&mut BlockInstance> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }
}
