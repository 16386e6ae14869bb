use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::app::domain::block::BlockId;
use crate::app::infrastructure::error::{AppError, Result};

/// Outcome of a background image read, addressed to the block that asked for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageLoad {
    pub id: BlockId,
    pub path: PathBuf,
    /// Data URI on success, error message otherwise
    pub result: std::result::Result<String, String>,
}

/// Guess an image MIME type from the file extension.
pub fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        _ => return None,
    };
    Some(mime)
}

pub fn data_uri(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Read an image file into a data URI. Blocks; use [`spawn_read`] from UI code.
pub fn read_as_data_uri(path: &Path) -> Result<String> {
    let mime = mime_for(path)
        .ok_or_else(|| AppError::Image(format!("unsupported file type: {}", path.display())))?;
    let bytes = fs::read(path)?;
    Ok(data_uri(&bytes, mime))
}

/// Start reading `path` on a background thread. Returns immediately; `on_complete`
/// runs on that thread once the read finishes, in no particular order relative to
/// other reads.
pub fn spawn_read<F>(id: BlockId, path: PathBuf, on_complete: F) -> thread::JoinHandle<()>
where
    F: FnOnce(ImageLoad) + Send + 'static,
{
    thread::spawn(move || {
        let result = read_as_data_uri(&path).map_err(|e| e.to_string());
        on_complete(ImageLoad { id, path, result });
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for(Path::new("a.PNG")), Some("image/png"));
        assert_eq!(mime_for(Path::new("photo.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_for(Path::new("notes.txt")), None);
        assert_eq!(mime_for(Path::new("noext")), None);
    }

    #[test]
    fn test_data_uri() {
        assert_eq!(data_uri(b"hi", "image/png"), "data:image/png;base64,aGk=");
    }

    #[test]
    fn test_spawn_read_delivers_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.gif");
        fs::write(&path, b"GIF89a").unwrap();

        let (tx, rx) = mpsc::channel();
        spawn_read(BlockId(4), path.clone(), move |load| {
            tx.send(load).unwrap();
        })
        .join()
        .unwrap();

        let load = rx.recv().unwrap();
        assert_eq!(load.id, BlockId(4));
        assert_eq!(load.path, path);
        assert_eq!(load.result, Ok("data:image/gif;base64,R0lGODlh".to_string()));
    }

    #[test]
    fn test_spawn_read_reports_missing_file() {
        let (tx, rx) = mpsc::channel();
        spawn_read(BlockId(1), PathBuf::from("/nonexistent/pic.png"), move |load| {
            tx.send(load).unwrap();
        })
        .join()
        .unwrap();

        let load = rx.recv().unwrap();
        assert!(load.result.unwrap_err().starts_with("IO error"));
    }

    #[test]
    fn test_unsupported_type() {
        let err = read_as_data_uri(Path::new("/tmp/readme.md")).unwrap_err();
        assert!(matches!(err, AppError::Image(_)));
    }
}
