use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};
use toyrobot::runtime::{
    built_ins::register_builtin_words,
    interpreter::{robot_interpreter::RobotInterpreter, CodeManagement},
};

// Helper to get absolute path from manifest dir
fn manifest_path(rel: &str) -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir).join(rel)
}

// Helper to run the interpreter binary with the given arguments and capture stdout.
fn run_binary(arguments: &[&str], stdin: &str) -> (bool, String, String) {
    run_binary_with_bytes(arguments, stdin.as_bytes())
}

fn run_binary_with_bytes(arguments: &[&str], stdin: &[u8]) -> (bool, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_toyrobot"))
        .args(arguments)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run interpreter");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin)
        .expect("Failed to write to interpreter");

    let output = child.wait_with_output().expect("Failed to wait for interpreter");

    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

fn script(name: &str) -> String {
    manifest_path(&format!("tests/scripts/{}", name)).to_string_lossy().to_string()
}

#[test]
fn test_00_walk_the_table() {
    let (success, output, _) = run_binary(&[&script("00_walk_the_table.robot")], "");

    assert!(success);
    assert_eq!(output, "0,2,NORTH\n3,2,EAST\ngoing over the edge\n4,2,EAST\n");
}

#[test]
fn test_01_conditionals() {
    let (success, output, _) = run_binary(&[&script("01_conditionals.robot")], "");

    assert!(success);
    assert_eq!(output, "bigger\n3,4,EAST\n");
}

#[test]
fn test_01_conditionals_lib() {
    let path = script("01_conditionals.robot");
    let source = fs::read_to_string(&path).unwrap();

    let mut interpreter = RobotInterpreter::new();
    register_builtin_words(&mut interpreter);

    let result = interpreter.process_source(&path, &source);
    assert!(result.is_ok(), "Script failed: {:?}", result.err());
}

#[test]
fn bytecode_listing_comes_before_output() {
    let (success, output, _) = run_binary(&["--bytecode"], "TRUE IF \"yes\" . THEN\n");

    assert!(success);
    assert_eq!(
        output,
        "0000  PUSH_VAL   BOOL TRUE\n\
         0003  EXEC_WORD  IF -> 0018\n\
         0009  PUSH_VAL   STRING \"yes\"\n\
         0015  EXEC_WORD  .\n\
         yes\n"
    );
}

#[test]
fn stdin_lines_keep_going_after_errors() {
    let (success, output, errors) =
        run_binary(&[], "0 0 NORTH PLACE\nFOO\nMOVE REPORT\n\nDROP\nREPORT\n");

    assert!(success);
    assert_eq!(output, "0,1,NORTH\n0,1,NORTH\n");
    assert!(errors.contains("<stdin:2>: unknown word FOO"));
    assert!(errors.contains("<stdin:5>: empty stack"));
}

#[test]
fn stdin_lines_that_are_not_utf8_are_skipped() {
    let (success, output, errors) =
        run_binary_with_bytes(&[], b"0 0 NORTH PLACE\n\xff\xfe MOVE\nMOVE REPORT\r\n");

    assert!(success);
    assert_eq!(output, "0,1,NORTH\n");
    assert!(errors.contains("<stdin:2>: line is not valid UTF-8"));
}

#[test]
fn failing_script_sets_the_exit_code() {
    let (success, _, errors) = run_binary(&[&script("missing.robot")], "");

    assert!(!success);
    assert!(errors.starts_with("Error: "));
}

#[test]
fn bad_table_size_is_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_toyrobot"))
        .arg(script("00_walk_the_table.robot"))
        .env("TOYROBOT_TABLE_WIDTH", "zero")
        .output()
        .expect("Failed to run interpreter");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("TOYROBOT_TABLE_WIDTH"));
}
