//! End-to-end tests driving the `sched` binary.
//!
//! Covers the full pipeline: CSV with mapping → convert → JSON → print,
//! plus the conflict report and the interactive shell over stdin.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn sched_binary() -> String {
    env!("CARGO_BIN_EXE_sched").to_string()
}

const SCHEDULE_CSV: &str = "\
Predmet,Tip,Nastavnik,Grupe,Dan,Termin,Ucionica
Algorithms,P,Ana Petrović,\"101, 102\",PON,9:15-11,U1
Compilers,V,Marko Ilić,103,ČET,13:00-15:00,RAF1
Databases,P,Jovan Jović,201,PON,12:00-14:00,U1
";

const MAPPING: &str = "\
0 Predmet name
1 Tip type
2 Nastavnik professor
3 Grupe groups
4 Dan day
5 Termin timeRange
6 Ucionica classroom
";

const CLASSROOMS: &str = r#"[
    {"classroom": "U1", "projector": true, "no_spaces": 120, "computers": 0},
    {"classroom": "RAF1", "projector": false, "no_spaces": 30, "computers": 30}
]"#;

/// Writes the sample files plus a config pointing at them.
fn setup() -> TempDir {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    fs::write(dir.join("schedule.csv"), SCHEDULE_CSV).unwrap();
    fs::write(dir.join("mapping.txt"), MAPPING).unwrap();
    fs::write(dir.join("classrooms.json"), CLASSROOMS).unwrap();
    fs::write(
        dir.join("config.toml"),
        format!(
            "classrooms_path = {:?}\nmapping_path = {:?}\n\
             valid_from = \"2024-10-01\"\nvalid_to = \"2025-07-01\"\n",
            dir.join("classrooms.json").display().to_string(),
            dir.join("mapping.txt").display().to_string(),
        ),
    )
    .unwrap();
    temp
}

fn sched(dir: &Path, args: &[&str]) -> Output {
    Command::new(sched_binary())
        .current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .arg("--config")
        .arg(dir.join("config.toml"))
        .args(args)
        .output()
        .expect("failed to run sched")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "sched should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_no_subcommand_prints_help() {
    let temp = setup();
    let output = Command::new(sched_binary())
        .env("HOME", temp.path())
        .output()
        .unwrap();
    let text = stdout(&output);
    assert!(text.contains("Usage: sched"));
    assert!(text.contains("convert"));
}

#[test]
fn test_convert_csv_to_json_and_print() {
    let temp = setup();
    let dir = temp.path();

    let output = sched(dir, &["convert", "schedule.csv", "schedule.json"]);
    assert_eq!(stdout(&output), "Wrote 3 lectures to schedule.json\n");

    let json = fs::read_to_string(dir.join("schedule.json")).unwrap();
    assert!(json.contains("\"Dan\": \"THURSDAY\""));
    assert!(json.contains("\"validFrom\": \"2024-10-01\""));

    let output = sched(dir, &["print", "schedule.json", "--filter", "classroom-name=u1"]);
    insta::assert_snapshot!(stdout(&output), @r"
    Monday    09:15-11:00  Algorithms (LECTURE) | Ana Petrović | 101, 102 | U1
    Monday    12:00-14:00  Databases (LECTURE) | Jovan Jović | 201 | U1
    ");
}

#[test]
fn test_convert_to_pdf() {
    let temp = setup();
    let dir = temp.path();

    let output = sched(dir, &["convert", "schedule.csv", "timetable.pdf"]);
    stdout(&output);
    let pdf = fs::read(dir.join("timetable.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    assert!(pdf.ends_with(b"%%EOF\n"));
}

#[test]
fn test_conflicts_report() {
    let temp = setup();
    let output = sched(temp.path(), &["conflicts", "schedule.csv"]);
    insta::assert_snapshot!(stdout(&output), @r"
    1 classroom conflicts:
      U1: Algorithms (Monday 09:15-11:00) / Databases (Monday 12:00-14:00)
    ");
}

#[test]
fn test_missing_input_fails() {
    let temp = setup();
    let output = sched(temp.path(), &["print", "absent.csv"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("file not found"), "{stderr}");
}

#[test]
fn test_repl_session() {
    let temp = setup();
    let dir = temp.path();

    let mut child = Command::new(sched_binary())
        .current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .arg("--config")
        .arg(dir.join("config.toml"))
        .arg("repl")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"p\ni schedule.csv\nf add group 103\np\ne filtered.csv --filtered\nq\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    let text = stdout(&output);

    assert!(text.contains("error: no schedule loaded"));
    assert!(text.contains("Imported 3 lectures from schedule.csv"));
    assert!(text.contains("warning: 1 classroom conflicts"));
    assert!(text.contains("Thursday  13:00-15:00  Compilers (SEMINAR) | Marko Ilić | 103 | RAF1"));
    assert!(text.ends_with("Exiting...\n"));

    let exported = fs::read_to_string(dir.join("filtered.csv")).unwrap();
    assert_eq!(
        exported,
        "name,type,professor,groups,day,timeRange,classroom\n\
         Compilers,V,Marko Ilić,103,ČET,13:00-15:00,RAF1\n"
    );
}
