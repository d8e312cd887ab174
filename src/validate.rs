//! Input file checks done before any output I/O.

use crate::error::NetfigError;
use std::path::Path;

pub const TABLE_EXTS: &[&str] = &["csv", "tsv"];
pub const TEMPLATE_EXTS: &[&str] = &["j2", "jinja", "jinja2", "tera", "tpl"];

/// `path` must be an existing file whose extension is one of `allowed`.
pub fn input_file(path: &Path, kind: &str, allowed: &[&str]) -> Result<(), NetfigError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)) {
        return Err(NetfigError::ArgumentValidation(format!(
            "{kind} {} must have one of these extensions: {}",
            path.display(),
            allowed.join(", ")
        )));
    }
    if !path.is_file() {
        return Err(NetfigError::ArgumentValidation(format!(
            "{kind} {} does not exist or is not a file",
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn accepts_existing_file_with_known_extension() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("vars.CSV");
        fs::write(&p, "name\n").unwrap();
        input_file(&p, "table", TABLE_EXTS).unwrap();
    }

    #[test]
    fn rejects_wrong_extension() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("vars.xlsx");
        fs::write(&p, "").unwrap();
        let err = input_file(&p, "table", TABLE_EXTS).unwrap_err();
        assert!(err.to_string().contains("csv, tsv"));
    }

    #[test]
    fn rejects_missing_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert!(input_file(&dir.path().join("nope.j2"), "template", TEMPLATE_EXTS).is_err());

        let d = dir.path().join("dir.j2");
        fs::create_dir(&d).unwrap();
        assert!(input_file(&d, "template", TEMPLATE_EXTS).is_err());
    }
}
