//! One full render run: validate → resolve output → render → publish.

use crate::{
    clock::Clock,
    config::Settings,
    error::NetfigError,
    outdir,
    render::{self, BatchOptions, engine::Engine},
    report::BatchReport,
    table,
    transaction::Transaction,
    ui::Prompter,
    validate,
};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

pub struct RunArgs {
    pub table: PathBuf,
    pub template: PathBuf,
    /// Output directory name; asked for when `None`.
    pub out_name: Option<String>,
    /// Fully layered settings with an absolute `output_root`.
    pub settings: Settings,
}

pub fn run(args: &RunArgs, prompter: &mut dyn Prompter, clock: &dyn Clock) -> Result<BatchReport> {
    let s = &args.settings;

    validate::input_file(&args.table, "table", validate::TABLE_EXTS)?;
    validate::input_file(&args.template, "template", validate::TEMPLATE_EXTS)?;

    let table = table::read_table(&args.table)?;
    info!(
        rows = table.records.len(),
        columns = table.headers.len(),
        "loaded {}",
        args.table.display()
    );
    let engine = Engine::from_file(&args.template)
        .with_context(|| format!("compile {}", args.template.display()))?;

    let name = match &args.out_name {
        Some(n) => n.clone(),
        None => prompter
            .ask("Output directory name: ")
            .map_err(NetfigError::io("read output directory name from", "stdin"))?,
    };
    let target = outdir::resolve_dir(&s.output_root, &name)?;
    outdir::settle(&target, s.overwrite, prompter)?;

    let txn = Transaction::begin(&s.output_root, &target).context("begin output staging")?;
    let opts = BatchOptions {
        ext: &s.extension,
        combined: s.combined.then(|| s.combined_name(&clock.stamp())),
    };
    let mut report = render::render_batch(&engine, &table.records, txn.stage(), &opts)?;
    report.out_dir = txn.commit().context("publish output")?;

    info!(
        dir = %report.out_dir.display(),
        written = report.succeeded(),
        failed = report.failed.len(),
        skipped = report.skipped.len(),
        "render finished"
    );
    Ok(report)
}
