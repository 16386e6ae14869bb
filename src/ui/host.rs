use fltk::{app, app::Sender, dialog};

use crate::app::domain::messages::Message;
use crate::app::infrastructure::error::Result;
use crate::app::infrastructure::host::{DirectorySink, ExportFile, Host, ImageCallback};

/// `Host` backed by fltk's modal dialogs and a download directory.
pub struct FltkHost {
    sink: DirectorySink,
    sender: Sender<Message>,
}

impl FltkHost {
    pub fn new(sink: DirectorySink, sender: Sender<Message>) -> Self {
        Self { sink, sender }
    }
}

impl Host for FltkHost {
    fn prompt(&mut self, message: &str) -> Option<String> {
        dialog::input_default(message, "")
    }

    fn alert(&mut self, message: &str) {
        dialog::alert_default(message);
    }

    fn offer_download(&mut self, file: &ExportFile) -> Result<()> {
        let path = self.sink.write(file)?;
        dialog::message_default(&format!("Saved {}", path.display()));
        Ok(())
    }

    /// Reads finish on a worker thread; hand the result to the event loop and wake it.
    fn image_callback(&self) -> ImageCallback {
        let s = self.sender;
        Box::new(move |load| {
            s.send(Message::ImageLoaded(load));
            app::awake();
        })
    }
}
