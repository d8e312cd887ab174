//! Output filename derivation from a record's first field.

use crate::error::NetfigError;

/// Characters Windows refuses in file names (a superset of the Unix ones).
const ILLEGAL: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Windows device names, reserved with or without an extension.
const RESERVED: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// `<key>.<ext>` for a first-field value, or why it cannot name a file.
pub fn file_name(raw_key: &str, ext: &str) -> Result<String, NetfigError> {
    let key = raw_key.trim();
    let bad = |reason| NetfigError::InvalidRecordKey {
        key: raw_key.to_owned(),
        reason,
    };

    if key.is_empty() {
        return Err(bad("first column is empty"));
    }
    if key == "." || key == ".." {
        return Err(bad("reserved path component"));
    }
    if key.contains(ILLEGAL) {
        return Err(bad("contains a character not allowed in file names"));
    }
    if key.chars().any(char::is_control) {
        return Err(bad("contains a control character"));
    }
    if is_device_name(key) {
        return Err(bad("reserved device name"));
    }

    Ok(format!("{key}.{ext}"))
}

/// `CON`, `nul.lab`, `Com1 ` and the like: the part before the first dot
/// names a device regardless of case or trailing spaces.
fn is_device_name(key: &str) -> bool {
    let stem = key.split('.').next().unwrap_or(key).trim_end();
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(stem))
}
