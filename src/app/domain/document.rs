use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::block::BlockType;
use crate::app::infrastructure::error::{AppError, Result};

/// One entry of the structured document. Field order here is the key order
/// of the serialized output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_value")]
    pub value: String,
    #[serde(default)]
    pub options: Vec<String>,
}

impl Field {
    pub fn new(kind: BlockType, label: &str, value: &str, options: &[String]) -> Self {
        Self {
            kind: kind.tag().to_string(),
            label: label.to_string(),
            value: value.to_string(),
            options: options.to_vec(),
        }
    }

    /// Block type named by this field, or `None` for tags this build doesn't know.
    pub fn block_type(&self) -> Option<BlockType> {
        BlockType::from_tag(&self.kind)
    }
}

/// Hand-edited documents may carry `null`, numbers or booleans as values.
/// `null` reads as empty; other scalars keep their JSON spelling.
fn lenient_value<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// The canonical `{"fields": [...]}` description of a form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDocument {
    pub fields: Vec<Field>,
}

impl FormDocument {
    /// Serialize with two-space indentation.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse structured text, possibly hand edited.
    ///
    /// Syntax errors and a malformed `fields` list are `DocumentParse`;
    /// well-formed JSON without a `fields` entry is `MissingFields`.
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| AppError::DocumentParse(e.to_string()))?;

        match value.get("fields") {
            None | Some(Value::Null) => Err(AppError::MissingFields),
            Some(fields) => {
                let fields = Vec::<Field>::deserialize(fields)
                    .map_err(|e| AppError::DocumentParse(e.to_string()))?;
                Ok(Self { fields })
            }
        }
    }
}
