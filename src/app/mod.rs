pub mod channel;
pub mod controller;
mod launch;
mod logging;
mod shell;

use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::terminal::enable_raw_mode;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use setup_core::{CommandEngine, InstallTarget};

use crate::assets::StagedAssets;
use crate::config;

use self::channel::UiChannel;
use self::controller::SetupController;
use self::shell::clear_screen;

pub fn run() -> Result<()> {
    dotenvy::dotenv().ok();

    // Bootstrap failures abort before the terminal is touched so the
    // diagnostic stays readable.
    let target = InstallTarget::per_user(config::APP_NAME)?;
    let engine_path = engine_path()?;
    let assets = StagedAssets::stage()?;
    let banner = assets.load_banner()?;

    enable_raw_mode()?;
    clear_screen()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;

    let (channel, rx) = UiChannel::unbounded();
    let controller = SetupController::new(target, channel.sinks());
    // The run detaches; the shell hears from it only through the channel.
    let _install = controller.install(Box::new(CommandEngine::new(engine_path)));

    // The staged asset dir outlives the loop; it is removed when `assets`
    // drops after the shell returns.
    shell::run_shell(&mut terminal, rx, banner)
}

fn engine_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(config::ENGINE_ENV) {
        return Ok(PathBuf::from(path));
    }
    let exe = std::env::current_exe().context("current_exe")?;
    let dir = exe.parent().context("exe has no parent")?;
    Ok(dir.join(config::ENGINE_BIN))
}
