//! Convert command: load a schedule and write it in another format.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use sched_core::Filter;

use super::util::{SourceArgs, open_schedule, parse_filter};
use crate::Config;

#[derive(Debug, Args)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Destination file; the format follows its extension (`csv`, `json`, `pdf`).
    pub output: PathBuf,

    /// Keep only lectures matching `kind=requirement` (repeatable).
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<Filter>,

    /// Write one dated lecture per day of the validity period instead of the weekly plan.
    #[arg(long)]
    pub expand: bool,
}

pub fn run<W: Write>(writer: &mut W, args: &ConvertArgs, config: &Config) -> Result<()> {
    let dispatcher = sched_io::default_dispatcher();
    let mut schedule = open_schedule(&args.source, config, &dispatcher)?;
    for filter in &args.filters {
        schedule.add_filter(filter.clone());
    }

    let lectures = if args.expand {
        schedule.filtered_occurrences()
    } else {
        schedule.filtered()
    };
    dispatcher
        .write(&lectures, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    writeln!(
        writer,
        "Wrote {} lectures to {}",
        lectures.len(),
        args.output.display()
    )?;
    Ok(())
}
