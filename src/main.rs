//! `netfig` — render one config snippet per spreadsheet row.
use anyhow::{Context, Result};
use clap::Parser;
use std::{path::PathBuf, process::ExitCode, time::Instant};
use tracing_subscriber::EnvFilter;

mod clock;
mod config;
mod ctx;
mod error;
mod outdir;
mod render;
mod report;
mod run;
mod table;
mod transaction;
mod ui;
mod util;
mod validate;

use clock::SystemClock;
use config::Settings;
use ctx::Ctx;
use outdir::OverwriteMode;
use report::BatchReport;
use run::RunArgs;

#[derive(Parser)]
#[command(
    name = "netfig",
    version,
    about = "Render a template once per CSV row",
    after_help = "Example: netfig variables.csv jinjatemplate.j2 site-a"
)]
struct Cli {
    /// Variables table (.csv or .tsv); the first column names each output file
    table: PathBuf,

    /// Template (.j2, .jinja, .jinja2, .tera or .tpl)
    template: PathBuf,

    /// Output directory name under the output root (prompted if omitted)
    output: Option<String>,

    /// What to do if the output directory already exists
    #[arg(long, value_enum)]
    overwrite: Option<OverwriteMode>,

    /// Also write every render concatenated into one file
    #[arg(long)]
    combined: bool,

    /// Output root directory
    #[arg(long)]
    root: Option<PathBuf>,

    /// Extension for output files
    #[arg(long)]
    ext: Option<String>,

    /// Config file (default: ./netfig.toml, then $XDG_CONFIG_HOME/netfig/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Exit non-zero if any record failed or was skipped
    #[arg(long)]
    strict: bool,

    /// More log output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

const STRICT_FAILURE: u8 = 6;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let started = Instant::now();
    ui::banner();

    match cmd_render(&cli) {
        Ok(report) => {
            ui::summary(&report, started.elapsed());
            ExitCode::from(exit_status(&report, cli.strict))
        }
        Err(e) => {
            ui::error(&e);
            ExitCode::from(error::exit_code_for(&e))
        }
    }
}

/// Exit code for a run that finished: per-record problems only count under
/// `--strict`.
fn exit_status(report: &BatchReport, strict: bool) -> u8 {
    if strict && !report.is_clean() {
        STRICT_FAILURE
    } else {
        0
    }
}

fn cmd_render(cli: &Cli) -> Result<BatchReport> {
    let ctx = Ctx::new().context("initialise context")?;
    let settings = layered_settings(&ctx, cli)?;

    let args = RunArgs {
        table: ctx.absolute(&cli.table),
        template: ctx.absolute(&cli.template),
        out_name: cli.output.clone(),
        settings,
    };

    run::run(&args, &mut ui::TermPrompter::new(), &SystemClock)
}

/// Defaults → config file → environment → flags.
fn layered_settings(ctx: &Ctx, cli: &Cli) -> Result<Settings> {
    let mut s = match ctx.config_file(cli.config.as_deref()) {
        Some(path) => {
            ui::note("using config", &path);
            Settings::load(&path).context("load config")?
        }
        None => Settings::default(),
    };

    if let Some(root) = &ctx.root_override {
        s.output_root = root.clone();
    }

    if let Some(root) = &cli.root {
        s.output_root = root.clone();
    }
    if let Some(ext) = &cli.ext {
        s.extension = config::normalize_ext(ext)
            .map_err(|e| error::NetfigError::ArgumentValidation(e.to_string()))?;
    }
    if let Some(mode) = cli.overwrite {
        s.overwrite = mode;
    }
    s.combined |= cli.combined;

    s.output_root = ctx.absolute(&s.output_root);
    Ok(s)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
