//! Print command: show the schedule sorted by day and time.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use sched_core::Filter;

use super::util::{SourceArgs, open_schedule, parse_filter};
use crate::Config;

#[derive(Debug, Args)]
pub struct PrintArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Keep only lectures matching `kind=requirement` (repeatable).
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<Filter>,

    /// List every dated occurrence within the validity period.
    #[arg(long)]
    pub expand: bool,
}

pub fn run<W: Write>(writer: &mut W, args: &PrintArgs, config: &Config) -> Result<()> {
    let dispatcher = sched_io::default_dispatcher();
    let mut schedule = open_schedule(&args.source, config, &dispatcher)?;
    for filter in &args.filters {
        schedule.add_filter(filter.clone());
    }
    schedule.sort();

    if args.expand {
        for lecture in schedule.filtered_occurrences() {
            writeln!(writer, "{}  {lecture}", lecture.validity_period.valid_from)?;
        }
    } else {
        for lecture in schedule.filtered() {
            writeln!(writer, "{lecture}")?;
        }
    }
    Ok(())
}
