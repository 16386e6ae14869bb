use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(pub u64);

/// The fixed radio choices offered while authoring: (submitted value, caption).
pub const RADIO_OPTIONS: &[(&str, &str)] = &[("Option 1", "Male"), ("Option 2", "Female")];

/// The component kinds a user can place on the canvas.
/// Serialized with the same tags the structured document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Text,
    Email,
    Radio,
    Checkbox,
    Paragraph,
    Bold,
    Italic,
    HorizontalLine,
    Image,
}

impl BlockType {
    /// Wire tag used in the structured document
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Paragraph => "paragraph",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::HorizontalLine => "horizontal-line",
            Self::Image => "image",
        }
    }

    /// Look up a block type by its wire tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.tag() == tag)
    }

    /// Caption shown on the palette item
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Text => "Text Field",
            Self::Email => "Email",
            Self::Radio => "Radio Button",
            Self::Checkbox => "Checkbox",
            Self::Paragraph => "Paragraph",
            Self::Bold => "Bold Text",
            Self::Italic => "Italic Text",
            Self::HorizontalLine => "Horizontal Line",
            Self::Image => "Image Upload",
        }
    }

    /// All block types, in palette order
    pub fn all() -> &'static [BlockType] {
        &[
            Self::Text,
            Self::Email,
            Self::Radio,
            Self::Checkbox,
            Self::Paragraph,
            Self::Bold,
            Self::Italic,
            Self::HorizontalLine,
            Self::Image,
        ]
    }
}

/// State of a chosen image file. `data_uri` is filled in by the background
/// loader and never leaves the canvas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageControl {
    pub file_path: Option<PathBuf>,
    pub data_uri: Option<String>,
}

impl ImageControl {
    pub fn file_name(&self) -> Option<String> {
        self.file_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().to_string())
    }
}

/// Live state of the interactive control backing a block.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// text, email, paragraph, bold and italic
    Text(String),
    /// Selected option value, if any
    Radio(Option<String>),
    Checkbox(bool),
    Divider,
    Image(ImageControl),
}

/// A user interaction with a block's control.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    SetText(String),
    SelectOption(String),
    SetChecked(bool),
    ChooseImage(PathBuf),
}

/// One placed, labelled block on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockInstance {
    pub id: BlockId,
    pub kind: BlockType,
    pub label: String,
    /// Choices carried over from a restored document; empty for blocks placed from the palette.
    pub options: Vec<String>,
    /// Value recorded in the block's metadata when it was created.
    /// Only restored blocks have one.
    pub stored_value: Option<String>,
    pub control: Control,
}

impl BlockInstance {
    pub fn new(id: BlockId, kind: BlockType, label: impl Into<String>) -> Self {
        let label = label.into();
        let control = match kind {
            BlockType::Text | BlockType::Email | BlockType::Paragraph => Control::Text(String::new()),
            // The editable span starts out holding its prompt text
            BlockType::Bold | BlockType::Italic => Control::Text(format!("Enter {} text", label)),
            BlockType::Radio => Control::Radio(None),
            BlockType::Checkbox => Control::Checkbox(false),
            BlockType::HorizontalLine => Control::Divider,
            BlockType::Image => Control::Image(ImageControl::default()),
        };

        Self {
            id,
            kind,
            label,
            options: Vec::new(),
            stored_value: None,
            control,
        }
    }

    /// Build a block from a stored value, seeding both the metadata and the live control.
    pub fn with_stored_value(mut self, value: &str, options: Vec<String>) -> Self {
        match &mut self.control {
            Control::Text(text) => *text = value.to_string(),
            Control::Radio(selected) => {
                *selected = (!value.is_empty()).then(|| value.to_string());
            }
            Control::Checkbox(checked) => *checked = value == "true",
            Control::Divider | Control::Image(_) => {}
        }
        self.stored_value = Some(value.to_string());
        self.options = options;
        self
    }

    /// Current value as written to the structured document.
    pub fn live_value(&self) -> String {
        match &self.control {
            Control::Text(text) => text.clone(),
            Control::Radio(selected) => selected.clone().unwrap_or_default(),
            Control::Checkbox(checked) => checked.to_string(),
            Control::Divider | Control::Image(_) => String::new(),
        }
    }

    /// Current value as written to the flattened text export.
    /// Images contribute the chosen file's name.
    pub fn flat_value(&self) -> String {
        match &self.control {
            Control::Image(image) => image.file_name().unwrap_or_default(),
            _ => self.live_value(),
        }
    }

    /// Whether the metadata records this block as checked
    pub fn stored_checked(&self) -> bool {
        self.stored_value.as_deref() == Some("true")
    }

    /// Whether `value` names one of this block's radio options. Blocks without
    /// stored options offer the default choices.
    pub fn offers_option(&self, value: &str) -> bool {
        if self.options.is_empty() {
            RADIO_OPTIONS.iter().any(|(option, _)| *option == value)
        } else {
            self.options.iter().any(|option| option == value)
        }
    }

    /// Apply an edit to the live control. Returns false when the edit doesn't
    /// fit the control (e.g. a checkbox toggle sent to a text field, or a radio
    /// selection that isn't one of the options).
    pub fn apply_edit(&mut self, edit: FieldEdit) -> bool {
        if matches!(&edit, FieldEdit::SelectOption(value) if !self.offers_option(value)) {
            return false;
        }
        match (&mut self.control, edit) {
            (Control::Text(text), FieldEdit::SetText(value)) => *text = value,
            (Control::Radio(selected), FieldEdit::SelectOption(value)) => *selected = Some(value),
            (Control::Checkbox(checked), FieldEdit::SetChecked(value)) => *checked = value,
            (Control::Image(image), FieldEdit::ChooseImage(path)) => {
                image.file_path = Some(path);
                image.data_uri = None;
            }
            _ => return false,
        }
        true
    }
}
