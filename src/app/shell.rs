use std::fs::OpenOptions;
use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, Clear, ClearType};
use crossterm::{cursor, execute};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::model::App;
use crate::ui::{draw_ui, SPINNER_LEN};

use super::channel::ShellMessage;
use super::logging::{append_log_file, handle_message, LOG_FILE_PATH};

pub(crate) fn clear_screen() -> Result<()> {
    execute!(io::stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0)).context("clear screen")?;
    Ok(())
}

// The UI loop: draws, drains posted messages one at a time in arrival order,
// and owns every mutation of the App state. Runs until a Shutdown message
// arrives or the user closes the shell with Ctrl+Q; closing mid-install
// abandons the engine rather than unwinding it.
pub(crate) fn run_shell(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    rx: Receiver<ShellMessage>,
    banner: String,
) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(LOG_FILE_PATH)
        .ok();

    let mut app = App::new(banner, log_file);
    if app.log_file.is_some() {
        append_log_file(&mut app.log_file, &format!("Logging to {}", LOG_FILE_PATH));
    }

    terminal.clear().context("clear terminal")?;

    let mut last_tick = Instant::now();
    'shell: loop {
        terminal.draw(|f| draw_ui(f.size(), f, &app))?;

        let timeout = Duration::from_millis(100);
        if event::poll(timeout).context("poll events")? {
            if let Event::Key(key) = event::read().context("read event")? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q')
                            if key.modifiers.contains(KeyModifiers::CONTROL) =>
                        {
                            break 'shell
                        }
                        _ => {}
                    }
                }
            }
        }

        while let Ok(msg) = rx.try_recv() {
            let quit = msg == ShellMessage::Shutdown;
            handle_message(&mut app, msg);
            if quit {
                break 'shell;
            }
        }

        // Update the spinner animation
        if last_tick.elapsed() >= Duration::from_millis(120) {
            app.spinner_idx = (app.spinner_idx + 1) % SPINNER_LEN;
            last_tick = Instant::now();
        }
    }

    // Clean up the terminal before exiting
    disable_raw_mode().context("disable raw mode")?;
    let _ = clear_screen();
    Ok(())
}
