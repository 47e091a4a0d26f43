//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::conflicts::ConflictsArgs;
use crate::commands::convert::ConvertArgs;
use crate::commands::print::PrintArgs;

/// Lecture timetable tool.
///
/// Loads faculty timetables from CSV or JSON, checks them for classroom
/// double-bookings, filters them and writes them back out as CSV, JSON or PDF.
#[derive(Debug, Parser)]
#[command(name = "sched", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the interactive command shell.
    Repl,

    /// Convert a schedule to another format.
    Convert(ConvertArgs),

    /// List lectures that double-book a classroom.
    Conflicts(ConflictsArgs),

    /// Print the schedule sorted by day and time.
    Print(PrintArgs),
}
