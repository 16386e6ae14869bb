//! Block registry: one renderer per block type.
//!
//! Every block has three renderings:
//! - authoring: the interactive control placed on the canvas
//! - preview: the read-only live preview built from canvas state
//! - export: the static markup regenerated from a structured document
//!
//! Renderers are stateless; everything they need arrives in a [`ReadView`].

use crate::app::domain::block::{BlockId, BlockType, RADIO_OPTIONS};
use crate::app::domain::document::Field;
use crate::app::services::markup::{checked_attr, escape_html};

/// Values a read-mode rendering works from.
#[derive(Debug, Clone, Copy)]
pub struct ReadView<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub options: &'a [String],
    /// Checkbox state. Callers decide where it comes from.
    pub checked: bool,
}

impl<'a> ReadView<'a> {
    /// View of a structured-document field; checkboxes are checked by the literal `"true"`.
    pub fn from_field(field: &'a Field) -> Self {
        Self {
            label: &field.label,
            value: &field.value,
            options: &field.options,
            checked: field.value == "true",
        }
    }
}

pub trait BlockRenderer: Sync {
    /// Interactive control shown while building the form.
    fn authoring(&self, label: &str) -> String;

    /// Read-only fragment for the live preview. Empty when the block has none.
    fn preview(&self, view: &ReadView) -> String;

    /// Static fragment for the generated markup file. Empty when unsupported.
    fn export(&self, view: &ReadView) -> String;
}

/// Look up the renderer for a block type
pub fn renderer(kind: BlockType) -> &'static dyn BlockRenderer {
    match kind {
        BlockType::Text => &TextInput::Text,
        BlockType::Email => &TextInput::Email,
        BlockType::Paragraph => &TextInput::Paragraph,
        BlockType::Bold => &Emphasis::Bold,
        BlockType::Italic => &Emphasis::Italic,
        BlockType::Radio => &RadioGroup,
        BlockType::Checkbox => &Checkbox,
        BlockType::HorizontalLine => &Divider,
        BlockType::Image => &ImageUpload,
    }
}

/// Export fragment for a structured-document field. Unknown types render nothing.
pub fn export_field(field: &Field) -> String {
    match field.block_type() {
        Some(kind) => renderer(kind).export(&ReadView::from_field(field)),
        None => {
            tracing::debug!("Skipping field with unsupported type {:?}", field.kind);
            String::new()
        }
    }
}

/// Wrap an authoring control in its canvas container with the delete affordance.
pub fn wrap_authoring(id: BlockId, inner: &str) -> String {
    format!(
        "<div class=\"form-group\" data-block-id=\"{}\">{}<span class=\"delete-button\">&#10006;</span></div>",
        id.0, inner
    )
}

/// Image authoring control, showing the loaded picture once a data URI is available.
pub fn image_authoring(label: &str, data_uri: Option<&str>) -> String {
    let l = escape_html(label);
    let img = match data_uri {
        Some(uri) => format!(
            "<img id=\"preview-{l}\" src=\"{}\" alt=\"Preview\" style=\"max-width: 100%; display: block;\">",
            escape_html(uri)
        ),
        None => format!(
            "<img id=\"preview-{l}\" src=\"#\" alt=\"Preview\" style=\"max-width: 100%; display: none;\">"
        ),
    };
    format!("<label>{l}</label><input type=\"file\" id=\"{l}\" accept=\"image/*\">{img}")
}

fn labelled_readonly_input(label: &str, value: &str, extra: &str) -> String {
    let l = escape_html(label);
    format!(
        "<div class=\"form-group\"><label>{l}</label><input class=\"form-control\" name=\"{l}\" value=\"{}\"{extra}></div>",
        escape_html(value)
    )
}

/// Radio options as `<div class="form-check">` entries.
/// `ids` adds `id="<label>-<n>"` to each input.
fn radio_options<'a>(
    label: &str,
    choices: impl Iterator<Item = (&'a str, &'a str)>,
    selected: &str,
    ids: bool,
) -> String {
    let l = escape_html(label);
    let mut out = String::new();
    for (n, (value, caption)) in choices.enumerate() {
        let n = n + 1;
        let id_attr = if ids { format!(" id=\"{l}-{n}\"") } else { String::new() };
        out.push_str(&format!(
            "<div class=\"form-check\"><input class=\"form-check-input\" type=\"radio\" name=\"{l}\"{id_attr} value=\"{}\"{}><label class=\"form-check-label\" for=\"{l}-{n}\">{}</label></div>",
            escape_html(value),
            checked_attr(!selected.is_empty() && value == selected),
            escape_html(caption),
        ));
    }
    out
}

#[derive(Debug, Clone, Copy)]
enum TextInput {
    Text,
    Email,
    Paragraph,
}

impl BlockRenderer for TextInput {
    fn authoring(&self, label: &str) -> String {
        let l = escape_html(label);
        match self {
            Self::Text => format!(
                "<label>{l}</label><input type=\"text\" class=\"form-control\" placeholder=\"Enter {l}\">"
            ),
            Self::Email => format!(
                "<label>{l}</label><input type=\"email\" class=\"form-control\" placeholder=\"Enter {l}\"><div class=\"invalid-feedback\">Please enter a valid email address.</div>"
            ),
            Self::Paragraph => format!(
                "<label>{l}</label><textarea class=\"form-control\" rows=\"3\" placeholder=\"Enter {l} text\"></textarea>"
            ),
        }
    }

    fn preview(&self, view: &ReadView) -> String {
        labelled_readonly_input(view.label, view.value, " readonly")
    }

    fn export(&self, view: &ReadView) -> String {
        let placeholder = format!(" placeholder=\"Enter {}\" readonly", escape_html(view.label));
        labelled_readonly_input(view.label, view.value, &placeholder)
    }
}

#[derive(Debug, Clone, Copy)]
enum Emphasis {
    Bold,
    Italic,
}

impl Emphasis {
    fn class(&self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
        }
    }

    fn style(&self) -> &'static str {
        match self {
            Self::Bold => "font-weight: bold;",
            Self::Italic => "font-style: italic;",
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            Self::Bold => "b",
            Self::Italic => "i",
        }
    }
}

impl BlockRenderer for Emphasis {
    fn authoring(&self, label: &str) -> String {
        let l = escape_html(label);
        format!(
            "<label>{l}</label><span class=\"{}\" contenteditable=\"true\">Enter {l} text</span>",
            self.class()
        )
    }

    fn preview(&self, view: &ReadView) -> String {
        labelled_readonly_input(view.label, view.value, &format!(" readonly style=\"{}\"", self.style()))
    }

    fn export(&self, view: &ReadView) -> String {
        let tag = self.tag();
        format!(
            "<div class=\"form-group\"><label>{}</label><{tag}>{}</{tag}></div>",
            escape_html(view.label),
            escape_html(view.value)
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct RadioGroup;

impl BlockRenderer for RadioGroup {
    fn authoring(&self, label: &str) -> String {
        format!(
            "<label>{}</label>{}",
            escape_html(label),
            radio_options(label, RADIO_OPTIONS.iter().copied(), "", true)
        )
    }

    /// The fixed two options; `value` is the live selection.
    fn preview(&self, view: &ReadView) -> String {
        format!(
            "<div class=\"form-group\"><label>{}</label>{}</div>",
            escape_html(view.label),
            radio_options(view.label, RADIO_OPTIONS.iter().copied(), view.value, false)
        )
    }

    /// Stored options captioned by their own value, falling back to the two defaults.
    fn export(&self, view: &ReadView) -> String {
        let options = if view.options.is_empty() {
            radio_options(
                view.label,
                RADIO_OPTIONS.iter().map(|(value, _)| (*value, *value)),
                view.value,
                true,
            )
        } else {
            radio_options(
                view.label,
                view.options.iter().map(|o| (o.as_str(), o.as_str())),
                view.value,
                true,
            )
        };
        format!(
            "<div class=\"form-group\"><label>{}</label>{}</div>",
            escape_html(view.label),
            options
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct Checkbox;

impl Checkbox {
    fn read_mode(view: &ReadView) -> String {
        let l = escape_html(view.label);
        format!(
            "<div class=\"form-group\"><div class=\"form-check\"><input class=\"form-check-input\" type=\"checkbox\" id=\"{l}\" name=\"{l}\" value=\"{l}\"{}><label class=\"form-check-label\" for=\"{l}\">{l}</label></div></div>",
            checked_attr(view.checked)
        )
    }
}

impl BlockRenderer for Checkbox {
    fn authoring(&self, label: &str) -> String {
        let l = escape_html(label);
        format!(
            "<div class=\"form-check\"><input class=\"form-check-input\" type=\"checkbox\" id=\"{l}\" value=\"{l}\"><label class=\"form-check-label\" for=\"{l}\">{l}</label></div>"
        )
    }

    fn preview(&self, view: &ReadView) -> String {
        Self::read_mode(view)
    }

    fn export(&self, view: &ReadView) -> String {
        Self::read_mode(view)
    }
}

#[derive(Debug, Clone, Copy)]
struct Divider;

impl BlockRenderer for Divider {
    fn authoring(&self, _label: &str) -> String {
        "<hr>".to_string()
    }

    fn preview(&self, _view: &ReadView) -> String {
        "<hr>".to_string()
    }

    fn export(&self, _view: &ReadView) -> String {
        "<hr>".to_string()
    }
}

#[derive(Debug, Clone, Copy)]
struct ImageUpload;

impl BlockRenderer for ImageUpload {
    fn authoring(&self, label: &str) -> String {
        image_authoring(label, None)
    }

    fn preview(&self, _view: &ReadView) -> String {
        String::new()
    }

    fn export(&self, _view: &ReadView) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view<'a>(label: &'a str, value: &'a str) -> ReadView<'a> {
        ReadView {
            label,
            value,
            options: &[],
            checked: false,
        }
    }

    #[test]
    fn test_text_preview() {
        let html = renderer(BlockType::Text).preview(&view("Name", "Ada"));
        assert_eq!(
            html,
            r#"<div class="form-group"><label>Name</label><input class="form-control" name="Name" value="Ada" readonly></div>"#
        );
    }

    #[test]
    fn test_text_export_has_placeholder() {
        let html = renderer(BlockType::Email).export(&view("Mail", "a@b.c"));
        assert_eq!(
            html,
            r#"<div class="form-group"><label>Mail</label><input class="form-control" name="Mail" value="a@b.c" placeholder="Enter Mail" readonly></div>"#
        );
    }

    #[test]
    fn test_email_authoring_has_format_hint() {
        let html = renderer(BlockType::Email).authoring("Mail");
        assert!(html.contains(r#"type="email""#));
        assert!(html.contains("Please enter a valid email address."));
    }

    #[test]
    fn test_paragraph_authoring_is_textarea() {
        let html = renderer(BlockType::Paragraph).authoring("Bio");
        assert!(html.contains(r#"<textarea class="form-control" rows="3" placeholder="Enter Bio text"></textarea>"#));
    }

    #[test]
    fn test_emphasis_preview_and_export() {
        let bold = renderer(BlockType::Bold);
        assert!(bold.preview(&view("Motto", "Hi")).contains(r#"value="Hi" readonly style="font-weight: bold;""#));
        assert_eq!(
            bold.export(&view("Motto", "Hi")),
            r#"<div class="form-group"><label>Motto</label><b>Hi</b></div>"#
        );

        let italic = renderer(BlockType::Italic);
        assert!(italic.preview(&view("Note", "x")).contains(r#"style="font-style: italic;""#));
        assert!(italic.export(&view("Note", "x")).contains("<i>x</i>"));
        assert!(italic.authoring("Note").contains(r#"<span class="italic" contenteditable="true">Enter Note text</span>"#));
    }

    #[test]
    fn test_radio_authoring_fixed_options() {
        let html = renderer(BlockType::Radio).authoring("Gender");
        assert!(html.contains(r#"id="Gender-1" value="Option 1"><label class="form-check-label" for="Gender-1">Male</label>"#));
        assert!(html.contains(r#"id="Gender-2" value="Option 2"><label class="form-check-label" for="Gender-2">Female</label>"#));
        assert!(!html.contains("checked"));
    }

    #[test]
    fn test_radio_preview_checks_selection() {
        let html = renderer(BlockType::Radio).preview(&view("Gender", "Option 2"));
        assert!(html.contains(r#"value="Option 1"><label"#));
        assert!(html.contains(r#"value="Option 2" checked><label"#));
        assert!(html.contains(">Female</label>"));
    }

    #[test]
    fn test_radio_preview_without_selection() {
        let html = renderer(BlockType::Radio).preview(&view("Gender", ""));
        assert!(!html.contains("checked"));
    }

    #[test]
    fn test_radio_export_uses_stored_options() {
        let options = vec!["Red".to_string(), "Green".to_string(), "Blue".to_string()];
        let v = ReadView {
            label: "Colour",
            value: "Green",
            options: &options,
            checked: false,
        };
        let html = renderer(BlockType::Radio).export(&v);
        assert!(html.contains(r#"id="Colour-3" value="Blue"><label class="form-check-label" for="Colour-3">Blue</label>"#));
        assert!(html.contains(r#"value="Green" checked>"#));
        assert_eq!(html.matches("type=\"radio\"").count(), 3);
    }

    #[test]
    fn test_radio_export_defaults_to_two_options() {
        let html = renderer(BlockType::Radio).export(&view("Gender", "Option 1"));
        assert!(html.contains(r#"value="Option 1" checked><label class="form-check-label" for="Gender-1">Option 1</label>"#));
        assert!(html.contains(">Option 2</label>"));
    }

    #[test]
    fn test_checkbox_read_mode() {
        let mut v = view("Agree", "");
        assert!(!renderer(BlockType::Checkbox).preview(&v).contains("checked"));
        v.checked = true;
        assert!(renderer(BlockType::Checkbox).export(&v).contains(r#"value="Agree" checked>"#));
    }

    #[test]
    fn test_divider_everywhere() {
        let r = renderer(BlockType::HorizontalLine);
        assert_eq!(r.authoring("Line"), "<hr>");
        assert_eq!(r.preview(&view("Line", "")), "<hr>");
        assert_eq!(r.export(&view("Line", "")), "<hr>");
    }

    #[test]
    fn test_image_has_no_read_mode() {
        let r = renderer(BlockType::Image);
        assert_eq!(r.preview(&view("Avatar", "")), "");
        assert_eq!(r.export(&view("Avatar", "")), "");
        assert!(r.authoring("Avatar").contains(r#"<input type="file" id="Avatar" accept="image/*">"#));
        assert!(r.authoring("Avatar").contains("display: none;"));
    }

    #[test]
    fn test_image_authoring_loaded() {
        let html = image_authoring("Avatar", Some("data:image/png;base64,AAAA"));
        assert!(html.contains(r#"src="data:image/png;base64,AAAA""#));
        assert!(html.contains("display: block;"));
    }

    #[test]
    fn test_export_field_skips_unknown() {
        let field = Field {
            kind: "slider".to_string(),
            label: "Volume".to_string(),
            value: "3".to_string(),
            options: Vec::new(),
        };
        assert_eq!(export_field(&field), "");
    }

    #[test]
    fn test_labels_are_escaped() {
        let html = renderer(BlockType::Text).preview(&view("A \"quoted\" <label>", "x"));
        assert!(html.contains("name=\"A &quot;quoted&quot; &lt;label&gt;\""));
    }

    #[test]
    fn test_wrap_authoring_adds_delete_button() {
        let html = wrap_authoring(BlockId(7), "<hr>");
        assert_eq!(
            html,
            r#"<div class="form-group" data-block-id="7"><hr><span class="delete-button">&#10006;</span></div>"#
        );
    }
}
