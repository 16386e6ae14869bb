use crate::app::controllers::canvas::Canvas;
use crate::app::domain::block::{BlockId, BlockType, FieldEdit};
use crate::app::domain::document::FormDocument;
use crate::app::domain::messages::{DropTarget, Message};
use crate::app::domain::settings::AppSettings;
use crate::app::infrastructure::host::{ExportFile, Host};
use crate::app::services::image_loader::{self, ImageLoad};
use crate::app::services::{export, sync};

/// Application context: the canvas, its two derived views and the host that
/// connects them to the user. Constructed once at startup.
pub struct AppState<H: Host> {
    pub canvas: Canvas,
    pub settings: AppSettings,
    pub host: H,
    /// Structured text pane contents. Rewritten on every sync, may be hand edited in between.
    structured_text: String,
    preview_html: String,
    authoring_html: String,
}

impl<H: Host> AppState<H> {
    pub fn new(host: H, settings: AppSettings) -> Self {
        let mut state = Self {
            canvas: Canvas::new(),
            settings,
            host,
            structured_text: String::new(),
            preview_html: String::new(),
            authoring_html: String::new(),
        };
        state.sync();
        state
    }

    pub fn structured_text(&self) -> &str {
        &self.structured_text
    }

    pub fn preview_html(&self) -> &str {
        &self.preview_html
    }

    /// Canvas-side markup: each block's editable control plus its delete affordance.
    pub fn authoring_html(&self) -> &str {
        &self.authoring_html
    }

    /// Dispatch one front-end message.
    pub fn handle(&mut self, message: Message) {
        match message {
            Message::PlaceFromPalette(kind) => {
                self.place_from_palette(kind);
            }
            Message::Dropped { id, target } => self.handle_drop(id, target),
            Message::Delete(id) => {
                self.delete_block(id);
            }
            Message::EditField { id, edit } => self.edit_field(id, edit),
            Message::ImageLoaded(load) => self.image_loaded(load),
            Message::StructuredTextEdited(text) => self.set_structured_text(text),
            Message::ApplyStructuredText => self.apply_structured_text(),
            Message::Preview => self.preview(),
            Message::DownloadForm => self.download_form(),
            Message::ConvertToMarkup => self.convert_to_markup(),
            Message::Quit => {}
        }
    }

    // --- Canvas operations ---

    pub fn place_from_palette(&mut self, kind: BlockType) -> Option<BlockId> {
        let id = self.canvas.place_from_palette(kind, &mut self.host)?;
        self.sync();
        Some(id)
    }

    /// Sync runs whatever the drop target was.
    pub fn handle_drop(&mut self, id: BlockId, target: DropTarget) {
        self.canvas.handle_drop(id, target);
        self.sync();
    }

    pub fn delete_block(&mut self, id: BlockId) -> bool {
        let removed = self.canvas.delete(id).is_some();
        self.sync();
        removed
    }

    pub fn edit_field(&mut self, id: BlockId, edit: FieldEdit) {
        let image_path = match &edit {
            FieldEdit::ChooseImage(path) => Some(path.clone()),
            _ => None,
        };
        if !self.canvas.edit(id, edit) {
            return;
        }
        if let Some(path) = image_path {
            let callback = self.host.image_callback();
            image_loader::spawn_read(id, path, callback);
        }
        self.sync();
    }

    /// Completion of a background image read. Only the authoring view changes.
    pub fn image_loaded(&mut self, load: ImageLoad) {
        match load.result {
            Ok(data_uri) => {
                if self.canvas.attach_image(load.id, &load.path, data_uri) {
                    self.authoring_html = self.canvas.render_authoring();
                }
            }
            Err(e) => tracing::warn!("Failed to load image {}: {}", load.path.display(), e),
        }
    }

    // --- Structured text ---

    pub fn set_structured_text(&mut self, text: String) {
        self.structured_text = text;
    }

    /// Rebuild the canvas from the structured text pane.
    pub fn apply_structured_text(&mut self) {
        match FormDocument::parse(&self.structured_text) {
            Ok(document) => {
                let restored = self.canvas.restore(&document);
                tracing::info!("Restored {} blocks from structured text", restored);
                self.sync();
            }
            Err(e) => self.host.alert(&e.to_string()),
        }
    }

    // --- Preview & export ---

    pub fn preview(&mut self) {
        self.preview_html = sync::update_preview(&self.canvas);
    }

    pub fn download_form(&mut self) {
        let file = export::registration_form(&self.canvas, &self.settings.text_export_name);
        self.deliver(file);
    }

    /// Regenerate static markup from the structured text pane.
    pub fn convert_to_markup(&mut self) {
        match export::generated_form(&self.structured_text, &self.settings.markup_export_name) {
            Ok(file) => self.deliver(file),
            Err(e) => {
                tracing::warn!("Markup export failed: {}", e);
                self.host.alert(&e.to_string());
            }
        }
    }

    fn deliver(&mut self, file: ExportFile) {
        if let Err(e) = self.host.offer_download(&file) {
            tracing::warn!("Could not deliver {}: {}", file.file_name, e);
            self.host.alert(&e.to_string());
        }
    }

    /// Recompute the derived views. Runs after every canvas mutation.
    fn sync(&mut self) {
        self.authoring_html = self.canvas.render_authoring();
        match sync::sync(&self.canvas) {
            Ok(output) => {
                self.structured_text = output.json;
                self.preview_html = output.preview;
            }
            Err(e) => tracing::error!("Failed to serialize canvas: {}", e),
        }
    }
}
