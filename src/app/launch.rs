use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};

// Start the installed binary as an independent process without waiting for
// it to exit. The child handle is dropped on purpose.
pub(crate) fn spawn_detached(exe: &Path) -> Result<()> {
    Command::new(exe)
        .spawn()
        .with_context(|| format!("launch {}", exe.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_executable_reports_its_path() {
        let err = spawn_detached(Path::new("/nonexistent/harbor")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/harbor"));
    }

    #[cfg(unix)]
    #[test]
    fn spawning_an_existing_binary_succeeds() {
        spawn_detached(Path::new("/bin/true")).unwrap();
    }
}
