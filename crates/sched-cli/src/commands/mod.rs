//! CLI subcommand implementations.

pub mod conflicts;
pub mod convert;
pub mod print;
pub mod repl;
pub mod util;
