use std::io::Write;

use crate::model::App;

use super::channel::ShellMessage;

pub(crate) const LOG_FILE_PATH: &str = "/tmp/harbor-setup.log";

pub(crate) fn handle_message(app: &mut App, msg: ShellMessage) {
    match msg {
        ShellMessage::Progress(fraction) => app.progress = fraction,
        ShellMessage::StatusLabel(text) => {
            append_log_file(&mut app.log_file, &text);
            app.status = text;
        }
        ShellMessage::Error(message) => {
            append_log_file(&mut app.log_file, &format!("ERROR: {}", message));
            app.status = message;
            app.failed = true;
        }
        ShellMessage::Shutdown => {
            append_log_file(&mut app.log_file, "DONE: shutting down");
        }
    }
}

pub(crate) fn append_log_file(log_file: &mut Option<std::fs::File>, line: &str) {
    if let Some(file) = log_file.as_mut() {
        let _ = writeln!(file, "{}", line);
        let _ = file.flush();
    }
}
