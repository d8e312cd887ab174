//! Staged publish via a temp-dir → rename protocol.
use crate::util;
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::{Builder, TempDir};
use tracing::warn;

pub struct Transaction {
    stage: TempDir,
    target: PathBuf,
}

impl Transaction {
    /// Create a fresh staging directory inside the output root.
    ///
    /// Staging next to the target keeps the final rename on one filesystem.
    pub fn begin(root: &Path, target: &Path) -> Result<Self> {
        fs::create_dir_all(root).with_context(|| format!("create {}", root.display()))?;

        let stage = Builder::new()
            .prefix(".stage.")
            .tempdir_in(root)
            .context("create staging dir")?;

        Ok(Self {
            stage,
            target: target.to_path_buf(),
        })
    }

    /// Path callers write rendered files into.
    #[inline]
    pub fn stage(&self) -> &Path {
        self.stage.path()
    }

    /// Replace the target with the staged tree.
    ///
    /// Dropping an uncommitted transaction deletes the stage and leaves the
    /// target untouched. A failed commit restores the previous target and
    /// removes the stage.
    pub fn commit(self) -> Result<PathBuf> {
        let had_target = fs::symlink_metadata(&self.target).is_ok();

        // Everything up to the final rename may fail; the TempDir still owns
        // the stage here, so `?` cleans it up.
        if !had_target {
            if let Some(parent) = self.target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create parent dir {}", parent.display()))?;
            }
        }

        // Previous output is moved aside, not deleted, until the swap succeeds.
        let backup = had_target.then(|| {
            let mut name = self.stage.path().as_os_str().to_owned();
            name.push(".old");
            PathBuf::from(name)
        });
        if let Some(backup) = &backup {
            fs::rename(&self.target, backup).with_context(|| {
                format!("move aside previous output {}", self.target.display())
            })?;
        }

        let stage_path = self.stage.keep();

        if let Err(e) = fs::rename(&stage_path, &self.target) {
            if let Err(cleanup) = util::remove_any(&stage_path) {
                warn!("leaving stage behind: {cleanup:#}");
            }
            if let Some(backup) = &backup {
                if let Err(restore) = fs::rename(backup, &self.target) {
                    warn!(
                        backup = %backup.display(),
                        "previous output could not be restored: {restore}"
                    );
                }
            }
            return Err(e).with_context(|| {
                format!(
                    "rename {} -> {}",
                    stage_path.display(),
                    self.target.display()
                )
            });
        }

        if let Some(backup) = &backup {
            if let Err(e) = util::remove_any(backup) {
                warn!("previous output left at {}: {e:#}", backup.display());
            }
        }

        Ok(self.target)
    }
}
