use std::fs::File;

// The main application state
pub(crate) struct App {
    // Banner text staged from the bundled assets
    pub banner: String,
    // The overall progress of the installation
    pub progress: f64,
    // The current status line under the progress bar
    pub status: String,
    // Set once the engine has reported an unrecoverable error
    pub failed: bool,
    // The current frame of the loading spinner animation
    pub spinner_idx: usize,
    // An optional handle to the log file for writing logs to disk
    pub log_file: Option<File>,
}

impl App {
    pub(crate) fn new(banner: String, log_file: Option<File>) -> Self {
        Self {
            banner,
            progress: 0.0,
            status: "Warming up...".to_string(),
            failed: false,
            spinner_idx: 0,
            log_file,
        }
    }
}
