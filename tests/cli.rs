use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn run_script(script: &str, args: &[&str]) -> Output {
    run_script_in(&std::env::current_dir().unwrap(), script, args)
}

fn run_script_in(dir: &Path, script: &str, args: &[&str]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tinysh"))
        .args(args)
        .current_dir(dir)
        .env("PATH", "/usr/local/bin:/usr/bin:/bin")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn tinysh");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(script.as_bytes())
        .unwrap();
    child.wait_with_output().expect("wait for tinysh")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn test_echoes_input_and_runs_commands() {
    let output = run_script("echo hello\n", &[]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "echo hello\nhello\n\n");
    assert_eq!(stderr_of(&output), "");
}

#[test]
fn test_pipeline_output_precedes_next_line() {
    let output = run_script("printf a\\nb\\nc\\n | wc -l\necho done\n", &[]);
    assert!(output.status.success());

    let out = stdout_of(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], r"printf a\nb\nc\n | wc -l");
    assert_eq!(lines[1].trim(), "3");
    assert_eq!(lines[2], "echo done");
    assert_eq!(lines[3], "done");
}

#[test]
fn test_errors_do_not_stop_the_loop() {
    let script = format!(
        "no-such-command-xyz\n{}\necho {}\nfalse\necho still here\n",
        vec!["w"; 17].join(" "),
        "x".repeat(70)
    );
    let output = run_script(&script, &[]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output).ends_with("still here\n\n"));
    assert_eq!(
        stderr_of(&output),
        "*** ERROR: 'no-such-command-xyz' cannot be executed.\n\n\
         *** ERROR: Too many words.\n\
         *** ERROR: Word too long.\n"
    );
}

#[test]
fn test_long_line_rejected() {
    let script = format!("echo {}\necho ok\n", "z".repeat(100));
    let output = run_script(&script, &[]);
    assert!(output.status.success());
    assert_eq!(stderr_of(&output), "Input line is too long.\n");
    assert!(stdout_of(&output).ends_with("ok\n\n"));
}

#[test]
fn test_limits_from_command_line() {
    let output = run_script("echo a b c\n", &["--max-words", "3"]);
    assert!(output.status.success());
    assert_eq!(stderr_of(&output), "*** ERROR: Too many words.\n");
}

#[test]
fn test_child_reads_rest_of_input() {
    let output = run_script("cat\nhello from stdin\n", &[]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "cat\nhello from stdin\n\n");
    assert_eq!(stderr_of(&output), "");
}

#[test]
fn test_relative_command_path() {
    let tmp = TempDir::new().unwrap();
    let script = tmp.path().join("runme");
    fs::write(&script, "#!/bin/sh\necho ran\n").unwrap();

    fs::set_permissions(&script, fs::Permissions::from_mode(0o644)).unwrap();
    let output = run_script_in(tmp.path(), "./runme\n", &[]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "./runme\n\n");
    assert_eq!(
        stderr_of(&output),
        "*** ERROR: './runme' cannot be executed.\n\n"
    );

    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    let output = run_script_in(tmp.path(), "./runme\n", &[]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "./runme\nran\n\n");
    assert_eq!(stderr_of(&output), "");
}
