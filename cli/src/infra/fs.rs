//! Filesystem infrastructure: implements `FileWriter` and `TempDirProvider`.

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::application::ports::{FileWriter, TempDirProvider};

/// Production filesystem implementation of `FileWriter`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl FileWriter for LocalFs {
    fn write(&self, path: &Path, content: &[u8], mode: u32) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(mode);
        }
        let mut file = options
            .open(path)
            .with_context(|| format!("opening {}", path.display()))?;
        file.write_all(content)
            .with_context(|| format!("writing file {}", path.display()))?;

        set_permissions(path, mode)
    }
}

/// `OpenOptions::mode` only applies to newly created files, so tighten an
/// existing file too.
fn set_permissions(path: &Path, _mode: u32) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(_mode))
            .with_context(|| format!("setting permissions on {}", path.display()))?;
    }
    Ok(())
}

/// Temp directories that are removed when the provider is dropped, i.e. at
/// process exit for the instance built in `Cli::run`.
#[derive(Debug, Default)]
pub struct ProcessTempDirs {
    dirs: Mutex<Vec<TempDir>>,
}

impl ProcessTempDirs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TempDirProvider for ProcessTempDirs {
    fn create_temp_dir(&self, prefix: &str) -> Result<PathBuf> {
        let dir = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir()
            .context("creating temporary directory")?;
        let path = dir.path().to_path_buf();
        self.dirs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(dir);
        Ok(path)
    }
}
