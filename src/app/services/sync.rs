//! Recomputes the structured text and the live preview from canvas state.
//!
//! Both projections are pure functions of the canvas: calling them again without
//! an intervening mutation yields byte-identical output.

use crate::app::controllers::canvas::Canvas;
use crate::app::domain::block::{BlockInstance, Control};
use crate::app::infrastructure::error::Result;
use crate::app::services::registry::{self, ReadView};

pub const PREVIEW_FORM_OPEN: &str = "<form id=\"registration-form\">";
pub const PREVIEW_FORM_CLOSE: &str = "<button type=\"button\" class=\"btn btn-primary\" onclick=\"downloadRegistrationForm()\">Download Registration Form</button></form>";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncOutput {
    pub json: String,
    pub preview: String,
}

/// Structured text for the canvas, pretty printed.
pub fn update_json(canvas: &Canvas) -> Result<String> {
    canvas.document().to_pretty_json()
}

/// Preview markup for the canvas, wrapped in the registration form.
pub fn update_preview(canvas: &Canvas) -> String {
    let mut html = String::from(PREVIEW_FORM_OPEN);
    for block in canvas.blocks() {
        html.push_str(&preview_block(block));
    }
    html.push_str(PREVIEW_FORM_CLOSE);
    html
}

/// Radio selection comes from the live control; checkbox state comes from the
/// block's stored metadata, not the live toggle.
fn preview_block(block: &BlockInstance) -> String {
    let value = match &block.control {
        Control::Text(text) => text.as_str(),
        Control::Radio(selected) => selected.as_deref().unwrap_or(""),
        Control::Checkbox(_) | Control::Divider | Control::Image(_) => "",
    };
    let view = ReadView {
        label: &block.label,
        value,
        options: &block.options,
        checked: block.stored_checked(),
    };
    registry::renderer(block.kind).preview(&view)
}

pub fn sync(canvas: &Canvas) -> Result<SyncOutput> {
    let output = SyncOutput {
        json: update_json(canvas)?,
        preview: update_preview(canvas),
    };
    tracing::debug!("Synced {} blocks", canvas.count());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::block::{BlockType, FieldEdit};
    use crate::app::domain::document::FormDocument;

    #[test]
    fn test_empty_canvas() {
        let canvas = Canvas::new();
        assert_eq!(update_json(&canvas).unwrap(), "{\n  \"fields\": []\n}");
        assert_eq!(
            update_preview(&canvas),
            format!("{}{}", PREVIEW_FORM_OPEN, PREVIEW_FORM_CLOSE)
        );
    }

    #[test]
    fn test_sync_is_idempotent() {
        let mut canvas = Canvas::new();
        let name = canvas.insert(BlockType::Text, "Name");
        canvas.insert(BlockType::Radio, "Gender");
        canvas.insert(BlockType::Image, "Avatar");
        canvas.edit(name, FieldEdit::SetText("Ada".into()));

        let first = sync(&canvas).unwrap();
        let second = sync(&canvas).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_json_order_follows_canvas() {
        let mut canvas = Canvas::new();
        let a = canvas.insert(BlockType::Text, "First");
        canvas.insert(BlockType::Email, "Second");
        canvas.move_to(a, 1);

        let doc = FormDocument::parse(&update_json(&canvas).unwrap()).unwrap();
        let labels: Vec<_> = doc.fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, ["Second", "First"]);
    }

    #[test]
    fn test_checkbox_never_toggled_is_false() {
        let mut canvas = Canvas::new();
        canvas.insert(BlockType::Checkbox, "Agree");
        let json = update_json(&canvas).unwrap();
        assert!(json.contains("\"value\": \"false\""));
        assert!(!json.contains("\"true\""));
    }

    #[test]
    fn test_preview_checkbox_uses_stored_value() {
        let mut canvas = Canvas::new();
        let id = canvas.insert(BlockType::Checkbox, "Agree");
        canvas.edit(id, FieldEdit::SetChecked(true));

        // Live toggle shows up in the structured text...
        assert!(update_json(&canvas).unwrap().contains("\"value\": \"true\""));
        // ...but the preview reads the block's metadata, which was never set
        assert!(!update_preview(&canvas).contains("checked"));
    }

    #[test]
    fn test_preview_radio_uses_live_selection() {
        let mut canvas = Canvas::new();
        let id = canvas.insert(BlockType::Radio, "Gender");
        assert!(!update_preview(&canvas).contains("checked"));

        canvas.edit(id, FieldEdit::SelectOption("Option 1".into()));
        assert!(update_preview(&canvas).contains("value=\"Option 1\" checked>"));
    }

    #[test]
    fn test_preview_skips_images() {
        let mut canvas = Canvas::new();
        canvas.insert(BlockType::Image, "Avatar");
        canvas.insert(BlockType::HorizontalLine, "Rule");
        assert_eq!(
            update_preview(&canvas),
            format!("{}<hr>{}", PREVIEW_FORM_OPEN, PREVIEW_FORM_CLOSE)
        );
    }

    #[test]
    fn test_preview_emphasis_live_text() {
        let mut canvas = Canvas::new();
        canvas.insert(BlockType::Italic, "Quote");
        assert!(update_preview(&canvas).contains(
            r#"value="Enter Quote text" readonly style="font-style: italic;""#
        ));
    }
}
