//! Interactive command shell.
//!
//! Each input line is one command; the first word picks it:
//!
//! ```text
//! i <schedule> [<classrooms>] [<mapping>]   import a schedule
//! e <path> [--filtered]                     export it
//! f add <kind> <requirement...>             add a filter
//! f remove <name>|*                         remove filters
//! x add <name> <exclusions.json>            add exclusions under a name
//! x remove <name>|*                         remove exclusions
//! s                                         sort by day and time
//! p                                         print the visible lectures
//! h                                         help
//! q                                         quit
//! ```
//!
//! The classroom registry lives as long as the session. The first import
//! that names a classroom file fills it; later imports reuse those rooms.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};

use sched_core::{
    ClassroomRegistry, Dispatcher, Exclusion, Filter, LecturePredicate, Schedule,
};

use super::util::{initialize_registry, write_conflicts};
use crate::Config;

const PROMPT: &str = "#> ";

const HELP: &str = "\
Available commands:
  i <schedule> [<classrooms>] [<mapping>]  Import a schedule (.csv needs a mapping)
  e <path> [--filtered]                    Export to .csv, .json or .pdf
  f add <kind> <requirement>               Add a filter; kinds: subject, professor, group,
                                           classroom-projector, classroom-computer,
                                           classroom-name, classroom-size
  f remove <name>|*                        Remove a filter by name, or all filters
  x add <name> <exclusions.json>           Add the file's exclusions under <name>
  x remove <name>|*                        Remove exclusions by name, or all of them
  s                                        Sort lectures by day and time
  p                                        Print lectures passing filters and exclusions
  h                                        Show this help
  q                                        Quit";

/// Whether the loop keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// State carried between shell commands.
pub struct Session<'a> {
    config: &'a Config,
    dispatcher: Dispatcher,
    registry: ClassroomRegistry,
    schedule: Option<Schedule>,
}

impl<'a> Session<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            dispatcher: sched_io::default_dispatcher(),
            registry: ClassroomRegistry::new(),
            schedule: None,
        }
    }

    pub const fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    /// Runs one command line, writing its output to `writer`.
    pub fn eval<W: Write>(&mut self, line: &str, writer: &mut W) -> Result<Flow> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((command, args)) = words.split_first() else {
            return Ok(Flow::Continue);
        };

        match command.to_lowercase().as_str() {
            "i" => self.import(args, writer)?,
            "e" => self.export(args, writer)?,
            "f" => self.filter(args, writer)?,
            "x" => self.exclude(args, writer)?,
            "s" => {
                let schedule = self.schedule_mut()?;
                schedule.sort();
                writeln!(writer, "Sorted {} lectures", schedule.lectures().len())?;
            }
            "p" => {
                let schedule = self.schedule_ref()?;
                writeln!(writer, "----- Schedule -----")?;
                for lecture in schedule.visible() {
                    writeln!(writer, "{lecture}")?;
                }
                writeln!(writer, "--------------------")?;
            }
            "h" => writeln!(writer, "{HELP}")?,
            "q" => return Ok(Flow::Quit),
            other => bail!("unknown command `{other}`, type `h` for help"),
        }
        Ok(Flow::Continue)
    }

    fn schedule_ref(&self) -> Result<&Schedule> {
        self.schedule.as_ref().ok_or_else(|| anyhow!("no schedule loaded"))
    }

    fn schedule_mut(&mut self) -> Result<&mut Schedule> {
        self.schedule.as_mut().ok_or_else(|| anyhow!("no schedule loaded"))
    }

    fn import<W: Write>(&mut self, args: &[&str], writer: &mut W) -> Result<()> {
        let [source, rest @ ..] = args else {
            bail!("usage: i <schedule> [<classrooms>] [<mapping>]");
        };
        let classrooms = rest
            .first()
            .map(Path::new)
            .or(self.config.classrooms_path.as_deref());
        let mapping = rest.get(1).map(Path::new).or(self.config.mapping_path.as_deref());

        let taken = initialize_registry(&mut self.registry, classrooms)?;
        if classrooms.is_some() && !taken {
            writeln!(writer, "Classrooms already loaded, keeping the first set")?;
        }

        let mut schedule = Schedule::new(self.config.validity_period());
        schedule
            .load_schedule(&self.dispatcher, Path::new(source), mapping, &self.registry)
            .with_context(|| format!("failed to import {source}"))?;
        writeln!(writer, "Imported {} lectures from {source}", schedule.lectures().len())?;

        let mut report = Vec::new();
        let conflicts = write_conflicts(&mut report, &schedule)?;
        if conflicts > 0 {
            writeln!(writer, "warning: {conflicts} classroom conflicts")?;
            writer.write_all(&report)?;
        }

        self.schedule = Some(schedule);
        Ok(())
    }

    fn export<W: Write>(&self, args: &[&str], writer: &mut W) -> Result<()> {
        let filtered = args.contains(&"--filtered");
        let mut paths = args.iter().filter(|arg| **arg != "--filtered");
        let (Some(path), None) = (paths.next(), paths.next()) else {
            bail!("usage: e <path> [--filtered]");
        };
        let schedule = self.schedule_ref()?;

        let result = if filtered {
            schedule.export_filtered_schedule(&self.dispatcher, Path::new(path))
        } else {
            schedule.export_schedule(&self.dispatcher, Path::new(path))
        };
        result.with_context(|| format!("failed to export {path}"))?;
        writeln!(writer, "Exported to {path}")?;
        Ok(())
    }

    fn filter<W: Write>(&mut self, args: &[&str], writer: &mut W) -> Result<()> {
        match args {
            ["add", kind, requirement @ ..] if !requirement.is_empty() => {
                let filter = Filter::of(kind, &requirement.join(" "))?;
                let schedule = self.schedule_mut()?;
                writeln!(writer, "Added filter {}", filter.name())?;
                schedule.add_filter(filter);
            }
            ["remove", "*"] => {
                self.schedule_mut()?.clear_filters();
                writeln!(writer, "Removed all filters")?;
            }
            ["remove", name @ ..] if !name.is_empty() => {
                let name = name.join(" ");
                if self.schedule_mut()?.remove_filter_named(&name) == 0 {
                    bail!("no filter named {name}");
                }
                writeln!(writer, "Removed filter {name}")?;
            }
            _ => bail!("usage: f add <kind> <requirement> | f remove <name>|*"),
        }
        Ok(())
    }

    fn exclude<W: Write>(&mut self, args: &[&str], writer: &mut W) -> Result<()> {
        match args {
            ["add", name, path] => {
                let schedule = self.schedule_mut()?;
                let exclusions = sched_io::load_exclusions(Path::new(path))
                    .with_context(|| format!("failed to read exclusions from {path}"))?;
                let count = exclusions.len();
                for exclusion in exclusions {
                    schedule.add_exclusion(Exclusion::new(*name, exclusion.rule().clone()));
                }
                writeln!(writer, "Added {count} exclusions as {name}")?;
            }
            ["remove", "*"] => {
                self.schedule_mut()?.clear_exclusions();
                writeln!(writer, "Removed all exclusions")?;
            }
            ["remove", name] => {
                if self.schedule_mut()?.remove_exclusion_named(name) == 0 {
                    bail!("no exclusions named {name}");
                }
                writeln!(writer, "Removed exclusions {name}")?;
            }
            _ => bail!("usage: x add <name> <exclusions.json> | x remove <name>|*"),
        }
        Ok(())
    }
}

/// Reads commands from `input` until `q` or end of input.
///
/// A failing command prints an `error:` line; the loop keeps going.
pub fn run<R: BufRead, W: Write>(input: R, writer: &mut W, config: &Config) -> Result<()> {
    let mut session = Session::new(config);
    writeln!(writer, "Lecture timetable shell. Type `h` for help.")?;

    write!(writer, "{PROMPT}")?;
    writer.flush()?;
    for line in input.lines() {
        let line = line.context("failed to read command")?;
        match session.eval(&line, writer) {
            Ok(Flow::Quit) => {
                writeln!(writer, "Exiting...")?;
                return Ok(());
            }
            Ok(Flow::Continue) => {}
            Err(err) => {
                tracing::debug!(command = %line, "command failed");
                writeln!(writer, "error: {err:#}")?;
            }
        }
        write!(writer, "{PROMPT}")?;
        writer.flush()?;
    }
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use chrono::NaiveDate;
    use insta::assert_snapshot;

    use super::*;

    const SCHEDULE: &str = r#"[
        {"Predmet": "Algorithms", "Tip": "LECTURE", "Nastavnik": "Ana Petrović", "Grupe": "101",
         "Dan": "TUESDAY", "Termin": "09:00-11:00", "Učionica": "U1"},
        {"Predmet": "Databases", "Tip": "SEMINAR", "Nastavnik": "Jovan Jović", "Grupe": "201",
         "Dan": "MONDAY", "Termin": "12:00-14:00", "Učionica": "RAF1",
         "validFrom": "2024-10-01", "validTo": "2024-12-20"}
    ]"#;

    struct Fixture {
        _temp: tempfile::TempDir,
        dir: PathBuf,
        config: Config,
    }

    fn fixture() -> Fixture {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().to_path_buf();
        fs::write(dir.join("schedule.json"), SCHEDULE).unwrap();
        fs::write(
            dir.join("rooms.json"),
            r#"[{"classroom": "U1", "projector": true, "no_spaces": 120, "computers": 0},
                {"classroom": "RAF1", "projector": false, "no_spaces": 30, "computers": 30}]"#,
        )
        .unwrap();
        fs::write(
            dir.join("exclusions.json"),
            r#"[{"type": "examExclusion", "name": "winter exams",
                 "active": {"validFrom": "2025-01-20", "validTo": "2025-02-10"}}]"#,
        )
        .unwrap();
        let config = Config {
            classrooms_path: None,
            mapping_path: None,
            valid_from: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
            valid_to: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        };
        Fixture {
            _temp: temp,
            dir,
            config,
        }
    }

    fn eval(session: &mut Session<'_>, line: &str) -> Result<String> {
        let mut out = Vec::new();
        session.eval(line, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn commands_before_import_need_a_schedule() {
        let fx = fixture();
        let mut session = Session::new(&fx.config);
        for line in ["p", "s", "e out.json", "f add group 101", "x remove *"] {
            let err = eval(&mut session, line).unwrap_err();
            assert_eq!(err.to_string(), "no schedule loaded", "{line}");
        }
    }

    #[test]
    fn import_filter_sort_and_print() {
        let fx = fixture();
        let mut session = Session::new(&fx.config);
        let import = format!(
            "i {} {}",
            fx.dir.join("schedule.json").display(),
            fx.dir.join("rooms.json").display()
        );
        assert!(eval(&mut session, &import).unwrap().starts_with("Imported 2 lectures"));

        eval(&mut session, "s").unwrap();
        assert_snapshot!(eval(&mut session, "p").unwrap(), @r"
        ----- Schedule -----
        Monday    12:00-14:00  Databases (SEMINAR) | Jovan Jović | 201 | RAF1
        Tuesday   09:00-11:00  Algorithms (LECTURE) | Ana Petrović | 101 | U1
        --------------------
        ");

        assert_eq!(
            eval(&mut session, "f add professor ana petrović").unwrap(),
            "Added filter professor_ana petrović\n"
        );
        let printed = eval(&mut session, "p").unwrap();
        assert!(printed.contains("Algorithms"));
        assert!(!printed.contains("Databases"));

        eval(&mut session, "f remove professor_ana petrović").unwrap();
        assert!(eval(&mut session, "p").unwrap().contains("Databases"));
    }

    #[test]
    fn exclusions_hide_overlapping_lectures() {
        let fx = fixture();
        let mut session = Session::new(&fx.config);
        eval(&mut session, &format!("i {}", fx.dir.join("schedule.json").display())).unwrap();

        let add = format!("x add exams {}", fx.dir.join("exclusions.json").display());
        assert_eq!(eval(&mut session, &add).unwrap(), "Added 1 exclusions as exams\n");
        let printed = eval(&mut session, "p").unwrap();
        assert!(!printed.contains("Algorithms"));
        assert!(printed.contains("Databases"));

        eval(&mut session, "x remove exams").unwrap();
        assert!(eval(&mut session, "p").unwrap().contains("Algorithms"));
        assert!(eval(&mut session, "x remove exams").is_err());
    }

    #[test]
    fn first_classroom_import_wins() {
        let fx = fixture();
        fs::write(
            fx.dir.join("other-rooms.json"),
            r#"[{"classroom": "U1", "projector": false, "no_spaces": 10, "computers": 0}]"#,
        )
        .unwrap();
        let mut session = Session::new(&fx.config);
        let schedule = fx.dir.join("schedule.json");

        let rooms = fx.dir.join("rooms.json");
        eval(
            &mut session,
            &format!("i {} {}", schedule.display(), rooms.display()),
        )
        .unwrap();
        let output = eval(
            &mut session,
            &format!("i {} {}", schedule.display(), fx.dir.join("other-rooms.json").display()),
        )
        .unwrap();
        assert!(output.starts_with("Classrooms already loaded"));

        let lectures = session.schedule().unwrap().lectures();
        assert_eq!(lectures[0].classroom.as_ref().unwrap().seat_count, 120);
    }

    #[test]
    fn export_writes_filtered_view() {
        let fx = fixture();
        let mut session = Session::new(&fx.config);
        eval(&mut session, &format!("i {}", fx.dir.join("schedule.json").display())).unwrap();
        eval(&mut session, "f add group 201").unwrap();

        let out = fx.dir.join("out.csv");
        eval(&mut session, &format!("e {} --filtered", out.display())).unwrap();
        let written = fs::read_to_string(&out).unwrap();
        assert_eq!(written.lines().count(), 2);
        assert!(written.contains("Databases"));
    }

    #[test]
    fn loop_reports_errors_and_continues() {
        let fx = fixture();
        let input = "bogus\n\nh\nq\np\n";
        let mut out = Vec::new();
        run(input.as_bytes(), &mut out, &fx.config).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Lecture timetable shell. Type `h` for help.\n#> "));
        assert!(text.contains("error: unknown command `bogus`, type `h` for help\n#> "));
        assert!(text.contains("Available commands:"));
        assert!(text.ends_with("Exiting...\n"));
    }

    #[test]
    fn import_warns_about_conflicts() {
        let fx = fixture();
        fs::write(
            fx.dir.join("clash.json"),
            r#"[
            {"Predmet": "Algorithms", "Tip": "LECTURE", "Nastavnik": "A", "Dan": "MONDAY",
             "Termin": "09:00-11:00", "Učionica": "U1"},
            {"Predmet": "Databases", "Tip": "LECTURE", "Nastavnik": "B", "Dan": "MONDAY",
             "Termin": "10:00-12:00", "Učionica": "U1"}
        ]"#,
        )
        .unwrap();
        let mut session = Session::new(&fx.config);
        let output = eval(
            &mut session,
            &format!(
                "i {} {}",
                fx.dir.join("clash.json").display(),
                fx.dir.join("rooms.json").display()
            ),
        )
        .unwrap();

        assert!(output.ends_with(
            "warning: 1 classroom conflicts\n  \
             U1: Algorithms (Monday 09:00-11:00) / Databases (Monday 10:00-12:00)\n"
        ));
    }
}
