//! Defaults loaded from `netfig.toml`, overridden later by env and flags.

use crate::outdir::OverwriteMode;
use anyhow::{Context, Result, anyhow, bail};
use std::{fs, path::Path, path::PathBuf};
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Base directory output directory names resolve under.
    pub output_root: PathBuf,
    /// Extension for every output file, without the dot.
    pub extension: String,
    pub overwrite: OverwriteMode,
    pub combined: bool,
    pub combined_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("output"),
            extension: "txt".into(),
            overwrite: OverwriteMode::Ask,
            combined: false,
            combined_prefix: "combined".into(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let src = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_toml(&src).with_context(|| format!("parse {}", path.display()))
    }

    pub fn from_toml(src: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(src).context("invalid TOML")?;
        let mut s = Self::default();

        for (key, value) in &table {
            match key.as_str() {
                "output_root" => s.output_root = PathBuf::from(string(key, value)?),
                "extension" => s.extension = normalize_ext(string(key, value)?)?,
                "overwrite" => {
                    let v = string(key, value)?;
                    s.overwrite = v
                        .parse()
                        .map_err(|e| anyhow!("`overwrite`: {e}"))?;
                }
                "combined" => match value {
                    toml::Value::Boolean(b) => s.combined = *b,
                    _ => bail!("`combined` must be a boolean"),
                },
                "combined_prefix" => s.combined_prefix = string(key, value)?.to_owned(),
                other => warn!(key = other, "ignoring unknown config key"),
            }
        }

        Ok(s)
    }

    /// Name of the combined file for a run started at `stamp`.
    pub fn combined_name(&self, stamp: &str) -> String {
        format!("{}-{stamp}.{}", self.combined_prefix, self.extension)
    }
}

fn string<'a>(key: &str, value: &'a toml::Value) -> Result<&'a str> {
    value
        .as_str()
        .with_context(|| format!("`{key}` must be a string"))
}

/// Accept `txt` or `.txt`; reject anything that would change the directory.
pub fn normalize_ext(raw: &str) -> Result<String> {
    let ext = raw.trim().trim_start_matches('.');
    if ext.is_empty() || ext.contains(['/', '\\']) {
        bail!("invalid output extension {raw:?}");
    }
    Ok(ext.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn reads_all_keys() {
        let s = Settings::from_toml(
            r#"
            output_root = "/srv/configs"
            extension = ".cfg"
            overwrite = "yes"
            combined = true
            combined_prefix = "all"
            "#,
        )
        .unwrap();

        assert_eq!(s.output_root, PathBuf::from("/srv/configs"));
        assert_eq!(s.extension, "cfg");
        assert_eq!(s.overwrite, OverwriteMode::Yes);
        assert!(s.combined);
        assert_eq!(s.combined_name("20240101-000000"), "all-20240101-000000.cfg");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let s = Settings::from_toml("colour = \"blue\"\n").unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn wrong_types_are_errors() {
        assert!(Settings::from_toml("combined = \"yes\"").is_err());
        assert!(Settings::from_toml("extension = 3").is_err());
        assert!(Settings::from_toml("overwrite = \"maybe\"").is_err());
        assert!(Settings::from_toml("extension = \"a/b\"").is_err());
    }
}
