//! Terminal output and prompts. Nothing here feeds back into the render logic
//! except the answers a [`Prompter`] returns.

use crate::report::BatchReport;
use console::{Term, style};
use std::{
    io::{self, BufRead},
    path::Path,
    time::Duration,
};

/// Source of answers to interactive questions.
pub trait Prompter {
    /// Show `prompt` and return one line of input, without the newline.
    fn ask(&mut self, prompt: &str) -> io::Result<String>;
}

/// Prompts on stderr so stdout stays clean for redirection.
pub struct TermPrompter {
    term: Term,
}

impl TermPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl Prompter for TermPrompter {
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        self.term.write_str(&style(prompt).yellow().to_string())?;

        if self.term.is_term() {
            return self.term.read_line();
        }

        // Piped stdin: read it plainly so `echo y | netfig ...` works.
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        self.term.write_line("")?;
        Ok(line.trim_end_matches(['\r', '\n']).to_owned())
    }
}

pub fn banner() {
    let rule = "-".repeat(60);
    eprintln!("{}", style(&rule).white());
    eprintln!("{}", style("            Network Configlet Generator").cyan());
    eprintln!("{}", style(&rule).white());
}

pub fn summary(report: &BatchReport, elapsed: Duration) {
    let rule = style("─".repeat(50)).dim();
    eprintln!();
    eprintln!("{rule}");
    eprintln!("{}", style("Render Summary").bold());
    eprintln!("{rule}");
    eprintln!("  Output:    {}", style(report.out_dir.display()).cyan());
    eprintln!("  Records:   {}", report.total());
    eprintln!("  Written:   {}", style(report.succeeded()).green());
    if !report.failed.is_empty() {
        eprintln!("  Failed:    {}", style(report.failed.len()).red());
    }
    if !report.skipped.is_empty() {
        eprintln!("  Skipped:   {}", style(report.skipped.len()).yellow());
    }
    if let Some(path) = report.combined_path() {
        eprintln!("  Combined:  {}", style(path.display()).cyan());
    }

    for f in report.failed.iter().chain(&report.skipped) {
        eprintln!(
            "  {} row {} ({:?}): {}",
            style("✗").red(),
            f.row,
            f.key,
            f.error
        );
    }

    eprintln!();
    eprintln!("Total elapsed time: {elapsed:.2?}");
}

pub fn error(err: &anyhow::Error) {
    eprintln!("{} {err:#}", style("error:").red().bold());
}

pub fn note(msg: &str, path: &Path) {
    eprintln!("{} {msg} {}", style("→").blue(), style(path.display()).yellow());
}
