use std::{
    env, fs,
    io::Write,
    path::PathBuf,
    process::{Command, Output, Stdio},
};

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

fn sprola(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_sprola")).args(args)
                                                              .stdin(Stdio::piped())
                                                              .stdout(Stdio::piped())
                                                              .stderr(Stdio::piped())
                                                              .spawn()
                                                              .unwrap();
    child.stdin.take().unwrap().write_all(stdin.as_bytes()).unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

/// Writes `source` to a file of its own under the system temp directory.
fn scratch_file(name: &str, source: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("sprola-cli-{}-{name}.sprola", std::process::id()));
    fs::write(&path, source).unwrap();
    path
}

#[test]
fn prints_tokens_then_program() {
    let path = demo("gcd.sprola");
    let output = sprola(&[path.to_str().unwrap()], "");
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(out.starts_with("[Token("), "{out}");

    let mut lines = out.lines();
    let dump = lines.next().unwrap();
    assert!(dump.ends_with(r#"Token(EOF, "")]"#), "{dump}");
    assert_eq!(lines.next(), Some("function gcd(a, b) {"));
    assert!(out.contains("\nfunction entry() {\n    print gcd(48, 18);\n"), "{out}");
    assert!(!out.ends_with("21\n"));
}

#[test]
fn run_prints_output_then_entry_value() {
    let path = demo("gcd.sprola");
    let output = sprola(&["--run", path.to_str().unwrap()], "");

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).ends_with("}\n6\n1\n-1\n0\n1\n21\n"));
}

#[test]
fn run_reads_standard_input() {
    let path = demo("sum.sprola");
    let output = sprola(&["-r", path.to_str().unwrap()], "5\n3 -7 12\n\n40 1\n");

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).ends_with("49\n40\n49\n"));
}

#[test]
fn entry_without_return_prints_null() {
    let path = scratch_file("null", "function entry() { print 5; }");
    let output = sprola(&["--run", path.to_str().unwrap()], "");
    fs::remove_file(&path).unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).ends_with("}\n5\nnull\n"));
}

#[test]
fn wrong_argument_count_is_a_usage_error() {
    let output = sprola(&[], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Usage"), "{}", stderr(&output));

    let gcd = demo("gcd.sprola");
    let sum = demo("sum.sprola");
    let output = sprola(&[gcd.to_str().unwrap(), sum.to_str().unwrap()], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(!stderr(&output).is_empty());
}

#[test]
fn help_and_version_succeed() {
    let output = sprola(&["--help"], "");
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Usage"));

    let output = sprola(&["--version"], "");
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unreadable_file_is_reported() {
    let output = sprola(&["no/such/program.sprola"], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).starts_with("Error: Failed to read 'no/such/program.sprola'"),
            "{}",
            stderr(&output));
}

#[test]
fn parse_errors_exit_with_one() {
    let path = scratch_file("parse", "function entry() {\n    print 1\n}");
    let output = sprola(&[path.to_str().unwrap()], "");
    fs::remove_file(&path).unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with("[Token("));
    assert_eq!(stderr(&output).trim_end(),
               "Error: Error on line 3: Parse error: Expected ';' after print statement. at token '}'");
}

#[test]
fn runtime_errors_exit_with_one() {
    let path = scratch_file("runtime", "function entry() { print 1; print 1 / 0; }");
    let output = sprola(&["--run", path.to_str().unwrap()], "");
    fs::remove_file(&path).unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).ends_with("}\n1\n"));
    assert_eq!(stderr(&output).trim_end(), "Error: Division by zero.");
}

#[test]
fn deep_nesting_is_reported_not_a_crash() {
    let path = scratch_file("nesting",
                            &format!("function entry() {{ return {}1{}; }}",
                                     "(".repeat(3000),
                                     ")".repeat(3000)));
    let output = sprola(&[path.to_str().unwrap()], "");
    fs::remove_file(&path).unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("Error: Error on line 1: Nesting deeper than 256 levels"),
            "{}",
            stderr(&output));
}
