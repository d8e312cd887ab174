use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const LOCAL_CONFIG: &str = "netfig.toml";

/// Paths and environment facts gathered once at startup.
#[derive(Clone, Debug)]
pub struct Ctx {
    pub cwd: PathBuf,
    pub user_config: Option<PathBuf>,
    /// `$NETFIG_OUTPUT_ROOT`, if set.
    pub root_override: Option<PathBuf>,
}

impl Ctx {
    /// Construct paths from environment variables.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("current directory is not accessible")?;

        let xdg = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config"))
            });

        let root_override = std::env::var_os("NETFIG_OUTPUT_ROOT")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            cwd,
            user_config: xdg.map(|d| d.join("netfig").join("config.toml")),
            root_override,
        })
    }

    /// Config file to load: explicit path, else `./netfig.toml`, else the
    /// user config, else none.
    pub fn config_file(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(p) = explicit {
            return Some(self.absolute(p));
        }
        let local = self.cwd.join(LOCAL_CONFIG);
        if local.is_file() {
            return Some(local);
        }
        self.user_config.clone().filter(|p| p.is_file())
    }

    pub fn absolute(&self, p: &Path) -> PathBuf {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.cwd.join(p)
        }
    }
}
