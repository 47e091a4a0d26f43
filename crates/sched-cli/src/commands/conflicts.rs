//! Conflicts command: report classroom double-bookings.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use super::util::{SourceArgs, open_schedule, write_conflicts};
use crate::Config;

#[derive(Debug, Args)]
pub struct ConflictsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

pub fn run<W: Write>(writer: &mut W, args: &ConflictsArgs, config: &Config) -> Result<()> {
    let dispatcher = sched_io::default_dispatcher();
    let schedule = open_schedule(&args.source, config, &dispatcher)?;

    if schedule.conflicts().is_empty() {
        writeln!(writer, "No classroom conflicts.")?;
        return Ok(());
    }
    let mut report = Vec::new();
    let count = write_conflicts(&mut report, &schedule)?;
    writeln!(writer, "{count} classroom conflicts:")?;
    writer.write_all(&report)?;
    Ok(())
}
