use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use fltk::{
    app::Sender,
    browser::HoldBrowser,
    button::Button,
    enums::{Align, Color, Font},
    frame::Frame,
    group::{Flex, FlexType},
    input::Input,
    misc::HelpView,
    prelude::*,
    text::{TextBuffer, TextEditor},
    window::Window,
};

use super::file_dialogs::image_open_dialog;
use crate::app::domain::block::{BlockId, BlockType, FieldEdit};
use crate::app::domain::messages::{DropTarget, Message};
use crate::app::domain::settings::AppSettings;
use crate::app::infrastructure::host::Host;
use crate::app::state::AppState;

const ROW_HEIGHT: i32 = 30;

/// Blocks in canvas-list line order (line 1 is index 0).
type LineBlocks = Rc<RefCell<Vec<(BlockId, BlockType)>>>;

pub struct MainWidgets {
    pub wind: Window,
    canvas_list: HoldBrowser,
    authoring_view: HelpView,
    structured_buf: TextBuffer,
    preview_view: HelpView,
    line_blocks: LineBlocks,
    /// Last structured text pushed into the pane, so unsent hand edits survive unrelated refreshes
    last_structured: String,
    preview_enabled: bool,
}

/// Edit implied by the value box for a block of `kind`. Images open a file chooser.
pub fn edit_for(kind: BlockType, value: &str) -> Option<FieldEdit> {
    match kind {
        BlockType::Text
        | BlockType::Email
        | BlockType::Paragraph
        | BlockType::Bold
        | BlockType::Italic => Some(FieldEdit::SetText(value.to_string())),
        BlockType::Radio => Some(FieldEdit::SelectOption(value.trim().to_string())),
        BlockType::Checkbox => Some(FieldEdit::SetChecked(value.trim() == "true")),
        BlockType::HorizontalLine => None,
        BlockType::Image => image_open_dialog().map(|p| FieldEdit::ChooseImage(PathBuf::from(p))),
    }
}

fn selected(list: &HoldBrowser, blocks: &LineBlocks) -> Option<(usize, BlockId, BlockType)> {
    let line = list.value();
    if line < 1 {
        return None;
    }
    let idx = (line - 1) as usize;
    blocks.borrow().get(idx).map(|(id, kind)| (idx, *id, *kind))
}

fn heading(text: &str) -> Frame {
    let mut frame = Frame::default().with_label(text);
    frame.set_label_font(Font::HelveticaBold);
    frame.set_align(Align::Left | Align::Inside);
    frame
}

fn button_row(labels: &[&str]) -> (Flex, Vec<Button>) {
    let mut row = Flex::default();
    row.set_type(FlexType::Row);
    let buttons = labels.iter().map(|l| Button::default().with_label(l)).collect();
    row.end();
    (row, buttons)
}

pub fn build_main_window(settings: &AppSettings, sender: &Sender<Message>) -> MainWidgets {
    let s = *sender;
    let mut wind = Window::new(
        100,
        100,
        settings.window_width,
        settings.window_height,
        "FormForge",
    );
    wind.set_xclass("FormForge");

    let mut root = Flex::new(0, 0, settings.window_width, settings.window_height, None);
    root.set_type(FlexType::Row);
    root.set_margin(6);
    root.set_pad(6);

    // Palette: one button per block type
    let mut palette = Flex::default();
    palette.set_type(FlexType::Column);
    let title = heading("Palette");
    palette.fixed(&title, ROW_HEIGHT);
    for kind in BlockType::all() {
        let mut btn = Button::default().with_label(kind.display_name());
        let kind = *kind;
        btn.set_callback(move |_| s.send(Message::PlaceFromPalette(kind)));
        palette.fixed(&btn, ROW_HEIGHT);
    }
    Frame::default();
    palette.end();
    root.fixed(&palette, 150);

    // Canvas
    let line_blocks: LineBlocks = Rc::new(RefCell::new(Vec::new()));
    let mut canvas_col = Flex::default();
    canvas_col.set_type(FlexType::Column);
    let title = heading("Canvas");
    canvas_col.fixed(&title, ROW_HEIGHT);
    let mut canvas_list = HoldBrowser::default();
    canvas_list.set_tooltip("Select a block to move, delete or edit it");
    let mut authoring_view = HelpView::default();
    authoring_view.set_color(Color::White);

    let (order_row, order_buttons) = button_row(&["Move Up", "Move Down", "To Palette", "Delete"]);
    canvas_col.fixed(&order_row, ROW_HEIGHT);
    let value_input = Input::default();
    canvas_col.fixed(&value_input, ROW_HEIGHT);
    let (edit_row, edit_buttons) = button_row(&["Set Value / Choose Image"]);
    canvas_col.fixed(&edit_row, ROW_HEIGHT);
    canvas_col.end();

    for (n, mut btn) in order_buttons.into_iter().enumerate() {
        let list = canvas_list.clone();
        let blocks = line_blocks.clone();
        btn.set_callback(move |_| {
            let Some((idx, id, _)) = selected(&list, &blocks) else {
                return;
            };
            let msg = match n {
                0 => Message::Dropped {
                    id,
                    target: DropTarget::Canvas { index: idx.saturating_sub(1) },
                },
                1 => Message::Dropped {
                    id,
                    target: DropTarget::Canvas { index: idx + 1 },
                },
                2 => Message::Dropped {
                    id,
                    target: DropTarget::Palette,
                },
                _ => Message::Delete(id),
            };
            s.send(msg);
        });
    }

    for mut btn in edit_buttons {
        let list = canvas_list.clone();
        let blocks = line_blocks.clone();
        let input = value_input.clone();
        btn.set_callback(move |_| {
            let Some((_, id, kind)) = selected(&list, &blocks) else {
                return;
            };
            if let Some(edit) = edit_for(kind, &input.value()) {
                s.send(Message::EditField { id, edit });
            }
        });
    }

    // Structured document + preview
    let mut right = Flex::default();
    right.set_type(FlexType::Column);
    let title = heading("Structured document");
    right.fixed(&title, ROW_HEIGHT);
    let structured_buf = TextBuffer::default();
    let mut editor = TextEditor::default();
    editor.set_buffer(structured_buf.clone());
    editor.set_text_font(Font::Courier);

    let (doc_row, doc_buttons) = button_row(&["Convert to HTML", "Apply to Canvas"]);
    right.fixed(&doc_row, ROW_HEIGHT);
    for (n, mut btn) in doc_buttons.into_iter().enumerate() {
        let buf = structured_buf.clone();
        btn.set_callback(move |_| {
            // Commit the pane's current (possibly hand edited) text first
            s.send(Message::StructuredTextEdited(buf.text()));
            s.send(if n == 0 { Message::ConvertToMarkup } else { Message::ApplyStructuredText });
        });
    }

    let title = heading("Preview");
    right.fixed(&title, ROW_HEIGHT);
    let mut preview_view = HelpView::default();
    preview_view.set_color(Color::White);
    if !settings.preview_enabled {
        preview_view.hide();
    }
    let (preview_row, preview_buttons) = button_row(&["Preview", "Download Registration Form"]);
    right.fixed(&preview_row, ROW_HEIGHT);
    for (n, mut btn) in preview_buttons.into_iter().enumerate() {
        btn.set_callback(move |_| s.send(if n == 0 { Message::Preview } else { Message::DownloadForm }));
    }
    right.end();

    root.end();
    wind.resizable(&root);
    wind.end();

    wind.set_callback(move |_| s.send(Message::Quit));

    MainWidgets {
        wind,
        canvas_list,
        authoring_view,
        structured_buf,
        preview_view,
        line_blocks,
        last_structured: String::new(),
        preview_enabled: settings.preview_enabled,
    }
}

/// Wrap HTML in HelpView-compatible font tags.
pub fn wrap_html_for_helpview(html: &str) -> String {
    format!("<font face=\"Helvetica\" size=\"4\">{}</font>", html)
}

impl MainWidgets {
    /// Mirror application state into the widgets after a message was handled.
    pub fn refresh<H: Host>(&mut self, state: &AppState<H>) {
        let previous = selected(&self.canvas_list, &self.line_blocks).map(|(_, id, _)| id);

        self.canvas_list.clear();
        let mut blocks = self.line_blocks.borrow_mut();
        blocks.clear();
        for block in state.canvas.blocks() {
            self.canvas_list
                .add(&format!("{}: {}", block.kind.display_name(), block.label));
            blocks.push((block.id, block.kind));
        }
        if let Some(line) = previous.and_then(|id| blocks.iter().position(|(b, _)| *b == id)) {
            self.canvas_list.select(line as i32 + 1);
        }
        drop(blocks);
        self.authoring_view
            .set_value(&wrap_html_for_helpview(state.authoring_html()));

        if state.structured_text() != self.last_structured {
            self.last_structured = state.structured_text().to_string();
            self.structured_buf.set_text(&self.last_structured);
        }

        if self.preview_enabled {
            self.preview_view
                .set_value(&wrap_html_for_helpview(state.preview_html()));
        }
        self.wind.redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_for_value_box() {
        assert_eq!(
            edit_for(BlockType::Paragraph, "Hello"),
            Some(FieldEdit::SetText("Hello".to_string()))
        );
        assert_eq!(
            edit_for(BlockType::Radio, " Option 1 "),
            Some(FieldEdit::SelectOption("Option 1".to_string()))
        );
        assert_eq!(edit_for(BlockType::Checkbox, "true"), Some(FieldEdit::SetChecked(true)));
        assert_eq!(edit_for(BlockType::Checkbox, "yes"), Some(FieldEdit::SetChecked(false)));
        assert_eq!(edit_for(BlockType::HorizontalLine, "x"), None);
    }

    #[test]
    fn test_wrap_html_for_helpview() {
        let result = wrap_html_for_helpview("<hr>");
        assert!(result.starts_with("<font face=\"Helvetica\""));
        assert!(result.contains("<hr>"));
    }
}
