use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

// Where one install run writes, resolved once before the engine starts.
// The installed executable is expected at `<dir>/<app_name>` afterwards.
#[derive(Clone, Debug)]
pub struct InstallTarget {
    dir: PathBuf,
    app_name: String,
}

impl InstallTarget {
    // Fixed per-user location: `<home>/.<app_name>`
    pub fn per_user(app_name: &str) -> Result<Self> {
        let home = std::env::var("HOME").context("HOME not set")?;
        Self::from_base(Path::new(&home), app_name)
    }

    pub fn from_base(base: &Path, app_name: &str) -> Result<Self> {
        if app_name.is_empty() {
            bail!("app name is empty");
        }
        Ok(Self {
            dir: base.join(format!(".{app_name}")),
            app_name: app_name.to_string(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn executable(&self) -> PathBuf {
        self.dir.join(&self.app_name)
    }
}
