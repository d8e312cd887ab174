//! Output directory resolution and the overwrite gate.

use crate::{error::NetfigError, ui::Prompter, util};
use std::{
    path::{Component, Path, PathBuf},
    str::FromStr,
};
use tracing::info;

/// What to do when the output directory already exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OverwriteMode {
    /// Prompt on the terminal.
    #[default]
    Ask,
    /// Replace without asking.
    Yes,
    /// Never replace; abort instead.
    No,
}

impl FromStr for OverwriteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ask" => Ok(Self::Ask),
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            _ => Err(format!("expected ask, yes or no, got {s:?}")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Abort,
    /// Only the user can decide; see [`settle`].
    Ask,
}

pub fn resolve_overwrite(exists: bool, mode: OverwriteMode) -> Decision {
    match (exists, mode) {
        (false, _) | (true, OverwriteMode::Yes) => Decision::Proceed,
        (true, OverwriteMode::No) => Decision::Abort,
        (true, OverwriteMode::Ask) => Decision::Ask,
    }
}

/// Join a user-supplied name onto `root`, refusing anything that escapes it.
pub fn resolve_dir(root: &Path, name: &str) -> Result<PathBuf, NetfigError> {
    let name = name.trim();
    let rel = Path::new(name);
    let invalid =
        |why: &str| NetfigError::ArgumentValidation(format!("output directory {name:?} {why}"));

    if name.is_empty() {
        return Err(invalid("is empty"));
    }
    for c in rel.components() {
        match c {
            Component::Normal(_) => {}
            Component::CurDir => {}
            _ => return Err(invalid("must be a plain relative path inside the output root")),
        }
    }
    if !rel.components().any(|c| matches!(c, Component::Normal(_))) {
        return Err(invalid("must name a directory below the output root"));
    }

    Ok(root.join(rel))
}

/// Apply `mode` to `target`, asking through `prompter` when needed.
pub fn settle(
    target: &Path,
    mode: OverwriteMode,
    prompter: &mut dyn Prompter,
) -> Result<(), NetfigError> {
    let exists = target.exists();

    let proceed = match resolve_overwrite(exists, mode) {
        Decision::Proceed => true,
        Decision::Abort => false,
        Decision::Ask => {
            let question = format!(
                "{} already exists ({} files). Delete it and continue?",
                target.display(),
                util::count_files(target)
            );
            let answer = prompter
                .ask(&format!("{question} [y/N] "))
                .map_err(NetfigError::io("read answer for", target))?;
            is_affirmative(&answer)
        }
    };

    if !proceed {
        return Err(NetfigError::OutputDirConflict(target.to_path_buf()));
    }
    if exists {
        info!(dir = %target.display(), "existing output will be replaced");
    }
    Ok(())
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::tests::Scripted;
    use std::fs;

    #[test]
    fn decision_table() {
        use OverwriteMode::{Ask, No, Yes};
        for mode in [Ask, Yes, No] {
            assert_eq!(resolve_overwrite(false, mode), Decision::Proceed);
        }
        assert_eq!(resolve_overwrite(true, Yes), Decision::Proceed);
        assert_eq!(resolve_overwrite(true, No), Decision::Abort);
        assert_eq!(resolve_overwrite(true, Ask), Decision::Ask);
    }

    #[test]
    fn resolves_under_root() {
        let root = Path::new("/srv/out");
        assert_eq!(resolve_dir(root, "lab").unwrap(), root.join("lab"));
        assert_eq!(resolve_dir(root, "site/a").unwrap(), root.join("site/a"));
        assert_eq!(resolve_dir(root, " lab ").unwrap(), root.join("lab"));
    }

    #[test]
    fn refuses_escapes() {
        let root = Path::new("/srv/out");
        for name in ["", "  ", ".", "..", "../x", "a/../../b", "/etc"] {
            assert!(
                matches!(resolve_dir(root, name), Err(NetfigError::ArgumentValidation(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn affirmative_answers() {
        for a in ["y", "Y", "yes", " YES\n"] {
            assert!(is_affirmative(a), "{a:?}");
        }
        for a in ["", "n", "no", "yep", "sure"] {
            assert!(!is_affirmative(a), "{a:?}");
        }
    }

    #[test]
    fn missing_dir_never_prompts() {
        let root = tempfile::tempdir().unwrap();
        let mut p = Scripted::new(&[]);
        settle(&root.path().join("new"), OverwriteMode::Ask, &mut p).unwrap();
        assert!(p.asked.is_empty());
    }

    #[test]
    fn ask_mode_follows_answer() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("keep.txt"), "x").unwrap();

        let mut p = Scripted::new(&["n"]);
        let err = settle(root.path(), OverwriteMode::Ask, &mut p).unwrap_err();
        assert!(matches!(err, NetfigError::OutputDirConflict(_)));
        assert!(p.asked[0].contains("(1 files)"));

        let mut p = Scripted::new(&["y"]);
        settle(root.path(), OverwriteMode::Ask, &mut p).unwrap();
    }

    #[test]
    fn fixed_modes_skip_prompt() {
        let root = tempfile::tempdir().unwrap();
        let mut p = Scripted::new(&[]);
        settle(root.path(), OverwriteMode::Yes, &mut p).unwrap();
        assert!(settle(root.path(), OverwriteMode::No, &mut p).is_err());
        assert!(p.asked.is_empty());
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("ASK".parse::<OverwriteMode>().unwrap(), OverwriteMode::Ask);
        assert!("always".parse::<OverwriteMode>().is_err());
    }
}
