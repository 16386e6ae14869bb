use crate::app::controllers::canvas::Canvas;
use crate::app::domain::document::FormDocument;
use crate::app::infrastructure::error::Result;
use crate::app::infrastructure::host::ExportFile;
use crate::app::services::registry;

pub const TEXT_MIME: &str = "text/plain";
pub const MARKUP_MIME: &str = "text/html";

/// One `label: value` line per block, in canvas order. Nothing is escaped, so
/// labels or values containing `:` or newlines read back ambiguously.
pub fn flatten_to_text(canvas: &Canvas) -> String {
    let mut out = String::new();
    for block in canvas.blocks() {
        out.push_str(&format!("{}: {}\n", block.label, block.flat_value()));
    }
    out
}

/// Static markup for every supported field of a structured document.
pub fn document_to_markup(document: &FormDocument) -> String {
    document.fields.iter().map(registry::export_field).collect()
}

/// Parse structured text and regenerate static markup. Fails as a whole on
/// malformed input; no partial markup is returned.
pub fn structured_text_to_markup(text: &str) -> Result<String> {
    let document = FormDocument::parse(text)?;
    Ok(document_to_markup(&document))
}

pub fn registration_form(canvas: &Canvas, file_name: &str) -> ExportFile {
    ExportFile {
        file_name: file_name.to_string(),
        mime: TEXT_MIME,
        contents: flatten_to_text(canvas),
    }
}

pub fn generated_form(text: &str, file_name: &str) -> Result<ExportFile> {
    Ok(ExportFile {
        file_name: file_name.to_string(),
        mime: MARKUP_MIME,
        contents: structured_text_to_markup(text)?,
    })
}
