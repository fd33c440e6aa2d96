use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

// Assets bundled into the setup binary at build time.
const BANNER: (&str, &[u8]) = ("banner.txt", include_bytes!("../assets/banner.txt"));

// Bundled assets written out to a scratch directory at bootstrap. The
// directory belongs to the UI shell for the whole process lifetime and is
// removed when the shell drops it on exit. Staging failures are fatal: the
// shell cannot render without its assets.
pub(crate) struct StagedAssets {
    dir: TempDir,
}

impl StagedAssets {
    pub(crate) fn stage() -> Result<Self> {
        let dir = TempDir::with_prefix("harbor-setup-assets").context("create asset temp dir")?;
        let (name, bytes) = BANNER;
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
        Ok(Self { dir })
    }

    pub(crate) fn banner_path(&self) -> PathBuf {
        self.dir.path().join(BANNER.0)
    }

    pub(crate) fn load_banner(&self) -> Result<String> {
        load_text(&self.banner_path())
    }
}

fn load_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read asset {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staged_banner_matches_the_bundled_bytes() {
        let staged = StagedAssets::stage().unwrap();
        assert!(staged.banner_path().exists());
        let banner = staged.load_banner().unwrap();
        assert_eq!(banner.as_bytes(), BANNER.1);
    }

    #[test]
    fn asset_dir_is_removed_on_drop() {
        let staged = StagedAssets::stage().unwrap();
        let path = staged.banner_path();
        drop(staged);
        assert!(!path.exists());
    }
}
