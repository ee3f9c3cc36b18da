use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("workload-{nanos}-{file_name}"))
}

#[test]
fn members_json_lists_sorted_members() {
    let exe = env!("CARGO_BIN_EXE_workload");
    let store_path = temp_path("cli-members.json");
    let content = serde_json::json!({
        "schema_version": 1,
        "members": [
            { "id": "m-2", "name": "Grace", "skills": ["Go"], "level": 4, "points": 300 },
            { "id": "m-1", "name": "Ada", "skills": ["Rust", "SQL"], "level": 2, "points": 80 }
        ]
    });
    std::fs::write(&store_path, serde_json::to_string_pretty(&content).unwrap()).unwrap();

    let output = Command::new(exe)
        .args(["--json", "members"])
        .env("WORKLOAD_STORE_PATH", &store_path)
        .env("WORKLOAD_CONFIG_PATH", temp_path("no-config.json"))
        .output()
        .expect("failed to run members command");

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).expect("json output");
    let members = parsed.as_array().expect("json array");
    assert_eq!(members.len(), 2);
    assert_eq!(members[0]["id"], "m-1");
    assert_eq!(members[0]["skills"], serde_json::json!(["Rust", "SQL"]));
    assert_eq!(members[1]["points"], 300);
}

#[test]
fn members_with_missing_store_prints_placeholder() {
    let exe = env!("CARGO_BIN_EXE_workload");
    let store_path = temp_path("cli-members-missing.json");

    let output = Command::new(exe)
        .arg("members")
        .env("WORKLOAD_STORE_PATH", &store_path)
        .env("WORKLOAD_CONFIG_PATH", temp_path("no-config.json"))
        .output()
        .expect("failed to run members command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("no team members"));
}

#[test]
fn members_reports_invalid_store() {
    let exe = env!("CARGO_BIN_EXE_workload");
    let store_path = temp_path("cli-members-invalid.json");
    let content = serde_json::json!({
        "schema_version": 1,
        "members": [{ "id": "m-1", "level": 0 }]
    });
    std::fs::write(&store_path, serde_json::to_string_pretty(&content).unwrap()).unwrap();

    let output = Command::new(exe)
        .arg("members")
        .env("WORKLOAD_STORE_PATH", &store_path)
        .env("WORKLOAD_CONFIG_PATH", temp_path("no-config.json"))
        .output()
        .expect("failed to run members command");

    std::fs::remove_file(&store_path).ok();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_data - member m-1: level must be positive"));
}
