use editor::{host, EditorSettings, EditorState};
use std::process::ExitCode;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    engine::init_logging();
    info!("Starting scene editor");

    let settings = EditorSettings::load().unwrap_or_else(|e| {
        warn!(error = %e, "Could not read editor settings, using defaults");
        EditorSettings::default()
    });
    let mut state = EditorState::new(settings);
    state.open_initial_scene();

    if let Err(e) = host::run(state) {
        error!(error = %e, "Editor exited with an error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
