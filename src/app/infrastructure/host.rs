use std::fs;
use std::path::{Path, PathBuf};

use super::error::Result;
use crate::app::services::image_loader::ImageLoad;

/// Completion callback handed to a background image read.
pub type ImageCallback = Box<dyn FnOnce(ImageLoad) + Send + 'static>;

/// A file produced by an export, ready to hand to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime: &'static str,
    pub contents: String,
}

/// Everything the application needs from the surrounding UI.
///
/// The desktop front-end implements this with native dialogs; tests substitute
/// a recording double.
pub trait Host {
    /// Ask the user for a line of text. `None` when cancelled.
    fn prompt(&mut self, message: &str) -> Option<String>;

    /// Show a blocking failure notice.
    fn alert(&mut self, message: &str);

    /// Deliver an exported file to the user.
    fn offer_download(&mut self, file: &ExportFile) -> Result<()>;

    /// Callback used to feed a finished image read back into the event loop.
    fn image_callback(&self) -> ImageCallback;
}

/// Writes exported files into a directory, optionally opening them afterwards.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    open_after: bool,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>, open_after: bool) -> Self {
        Self {
            dir: dir.into(),
            open_after,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the file, replacing any previous export of the same name.
    pub fn write(&self, file: &ExportFile) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&file.file_name);
        fs::write(&path, &file.contents)?;
        tracing::info!("Exported {} ({}) to {}", file.file_name, file.mime, path.display());

        if self.open_after {
            if let Err(e) = open::that(&path) {
                tracing::warn!("Failed to open {}: {}", path.display(), e);
            }
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("exports"), false);
        let file = ExportFile {
            file_name: "registration_form.txt".to_string(),
            mime: "text/plain",
            contents: "Name: Ada\n".to_string(),
        };

        let path = sink.write(&file).unwrap();
        assert_eq!(path, dir.path().join("exports").join("registration_form.txt"));
        assert_eq!(fs::read_to_string(path).unwrap(), "Name: Ada\n");
    }

    #[test]
    fn test_directory_sink_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path(), false);
        let mut file = ExportFile {
            file_name: "generated_form.html".to_string(),
            mime: "text/html",
            contents: "<hr>".to_string(),
        };
        sink.write(&file).unwrap();
        file.contents = String::new();
        let path = sink.write(&file).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "");
    }
}
