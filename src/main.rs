use fltk::{app, prelude::*};

use form_forge::app::infrastructure::logging;
use form_forge::app::{AppSettings, AppState, DirectorySink, Message};
use form_forge::ui::host::FltkHost;
use form_forge::ui::main_window::build_main_window;

fn main() {
    logging::init();

    let app = app::App::default();
    let settings = AppSettings::load();
    let (sender, receiver) = app::channel::<Message>();

    let mut widgets = build_main_window(&settings, &sender);
    let sink = DirectorySink::new(settings.export_dir(), settings.open_after_export);
    tracing::info!("Exports go to {}", sink.dir().display());

    let mut state = AppState::new(FltkHost::new(sink, sender), settings);
    widgets.refresh(&state);
    widgets.wind.show();

    while app.wait() {
        // Drain: some controls send a pair of messages from one click
        while let Some(msg) = receiver.recv() {
            match msg {
                Message::Quit => {
                    state.settings.window_width = widgets.wind.w();
                    state.settings.window_height = widgets.wind.h();
                    if let Err(e) = state.settings.save() {
                        tracing::warn!("Could not save settings: {}", e);
                    }
                    app.quit();
                }
                msg => {
                    state.handle(msg);
                    widgets.refresh(&state);
                }
            }
        }
    }
}
