use std::process::Command;

#[test]
fn cli_smoke_help() {
    let exe = env!("CARGO_BIN_EXE_workload");
    let output = Command::new(exe)
        .arg("--help")
        .output()
        .expect("failed to run workload --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("member"));
    assert!(stdout.contains("team"));
}

#[test]
fn cli_rejects_unknown_subcommand() {
    let exe = env!("CARGO_BIN_EXE_workload");
    let output = Command::new(exe)
        .arg("payroll")
        .output()
        .expect("failed to run workload payroll");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input - "));
}
