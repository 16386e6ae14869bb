//! Desktop front-end (fltk). Compiled with the `gui` feature.

pub mod file_dialogs;
pub mod host;
pub mod main_window;
