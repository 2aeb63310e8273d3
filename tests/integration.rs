use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn keyclash_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_keyclash"));
    cmd.arg("--no-log-file")
        .env_remove("KEYCLASH_PROJECT_DIR")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    keyclash_cmd()
        .arg(dir.to_str().unwrap())
        .args(args)
        .output()
        .unwrap()
}

fn write_yaml(root: &Path, name: &str, content: &str) {
    let data = root.join("keyboard-config/data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join(name), content).unwrap();
}

fn write_karabiner(root: &Path, key_code: &str, modifiers: &[&str]) {
    let modifiers = modifiers
        .iter()
        .map(|m| format!("\"{m}\""))
        .collect::<Vec<_>>()
        .join(",");
    let json = format!(
        r#"{{"profiles":[{{"complex_modifications":{{"rules":[{{"description":"Remap {key_code}","manipulators":[{{"type":"basic","from":{{"key_code":"{key_code}","modifiers":{{"mandatory":[{modifiers}]}}}}}}]}}]}}}}]}}"#
    );
    fs::write(root.join("karabiner.json"), json).unwrap();
}

const CTRL_K_YAML: &str = r#"
bindings:
  - key: k
    modifiers: [ctrl]
    action: Kill line
    status: implemented
"#;

// ===========================================
// Conflict reporting
// ===========================================

#[test]
fn test_reports_cross_system_conflict() {
    let dir = TempDir::new().unwrap();
    write_yaml(dir.path(), "nav.yaml", CTRL_K_YAML);
    write_karabiner(dir.path(), "k", &["ctrl"]);

    let output = run_in(dir.path(), &[]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Found 1 potential conflicts:"));
    assert!(stdout.contains("Key combination 'ctrl+k' used in:"));
    assert!(stdout.contains("Kill line (implemented)"));
    assert!(stdout.contains("Remap k (Active)"));
}

#[test]
fn test_modifier_order_and_case_are_normalized() {
    let dir = TempDir::new().unwrap();
    write_yaml(
        dir.path(),
        "nav.yaml",
        "bindings:\n  - key: H\n    modifiers: [Shift, control]\n",
    );
    write_karabiner(dir.path(), "h", &["shift", "control"]);

    let output = run_in(dir.path(), &["--quiet"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "control+shift+h\n");
}

#[test]
fn test_no_conflicts_message() {
    let dir = TempDir::new().unwrap();
    write_yaml(dir.path(), "nav.yaml", CTRL_K_YAML);
    write_karabiner(dir.path(), "j", &["ctrl"]);

    let output = run_in(dir.path(), &[]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No conflicts found! Checked 2 bindings."));
}

#[test]
fn test_two_yaml_files_only_conflict_in_file_scope() {
    let dir = TempDir::new().unwrap();
    write_yaml(dir.path(), "horizontal.yaml", CTRL_K_YAML);
    write_yaml(dir.path(), "vertical.yaml", CTRL_K_YAML);

    let family = run_in(dir.path(), &["--quiet"]);
    assert_eq!(String::from_utf8_lossy(&family.stdout), "");

    let file = run_in(dir.path(), &["--quiet", "--scope", "file"]);
    assert_eq!(String::from_utf8_lossy(&file.stdout), "ctrl+k\n");
}

#[test]
fn test_ideavim_line_numbers_in_report() {
    let dir = TempDir::new().unwrap();
    write_yaml(
        dir.path(),
        "vim.yaml",
        "bindings:\n  - key: <c-k>\n    action: Up\n",
    );
    fs::write(
        dir.path().join(".ideavimrc"),
        "set relativenumber\n\nnnoremap <C-k> :action MoveLineUp<CR>\n",
    )
    .unwrap();

    let output = run_in(dir.path(), &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(".ideavimrc:3: :action MoveLineUp<CR> (nnoremap)"));
}

// ===========================================
// Output modes and exit codes
// ===========================================

#[test]
fn test_json_output() {
    let dir = TempDir::new().unwrap();
    write_yaml(dir.path(), "nav.yaml", CTRL_K_YAML);
    write_karabiner(dir.path(), "k", &["ctrl"]);

    let output = run_in(dir.path(), &["--json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total_bindings"], 2);
    assert_eq!(json["conflict_count"], 1);
    assert_eq!(json["conflicts"][0]["bindings"][1]["system"], "karabiner");
}

#[test]
fn test_strict_exits_nonzero_on_conflict() {
    let dir = TempDir::new().unwrap();
    write_yaml(dir.path(), "nav.yaml", CTRL_K_YAML);
    write_karabiner(dir.path(), "k", &["ctrl"]);

    let output = run_in(dir.path(), &["--strict"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_strict_succeeds_without_conflict() {
    let dir = TempDir::new().unwrap();
    write_yaml(dir.path(), "nav.yaml", CTRL_K_YAML);

    let output = run_in(dir.path(), &["--strict"]);
    assert!(output.status.success());
}

#[test]
fn test_no_sources_exits_2() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("README.md"), "# nothing\n").unwrap();

    let output = run_in(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no binding sources found"));
}

#[test]
fn test_missing_path_is_error() {
    let dir = TempDir::new().unwrap();
    let output = run_in(&dir.path().join("missing"), &[]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_project_dir_from_environment() {
    let dir = TempDir::new().unwrap();
    write_yaml(dir.path(), "nav.yaml", CTRL_K_YAML);
    write_karabiner(dir.path(), "k", &["ctrl"]);

    let output = keyclash_cmd()
        .env("KEYCLASH_PROJECT_DIR", dir.path())
        .arg("--quiet")
        .output()
        .unwrap();

    assert_eq!(String::from_utf8_lossy(&output.stdout), "ctrl+k\n");
}

// ===========================================
// Error isolation
// ===========================================

#[test]
fn test_malformed_source_does_not_abort_run() {
    let dir = TempDir::new().unwrap();
    write_yaml(
        dir.path(),
        "nav.yaml",
        "bindings:\n  - key: j\n    modifiers: [ctrl]\n",
    );
    fs::write(dir.path().join("karabiner.json"), "{ broken").unwrap();

    let output = run_in(dir.path(), &[]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Checked 1 bindings."));
    assert!(stdout.contains("Skipped 1 unreadable source(s)"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("karabiner.json"));
}

#[test]
fn test_log_file_records_run() {
    let dir = TempDir::new().unwrap();
    write_yaml(dir.path(), "nav.yaml", CTRL_K_YAML);
    let log_path = dir.path().join("logs/conflict-check.log");

    let output = Command::new(env!("CARGO_BIN_EXE_keyclash"))
        .env_remove("RUST_LOG")
        .arg(dir.path().to_str().unwrap())
        .arg("--log-file")
        .arg(&log_path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("Starting conflict detection"));
    assert!(log.contains("No conflicts in 1 total bindings"));
}

// ===========================================
// Configuration file
// ===========================================

#[test]
fn test_init_creates_config_file() {
    let dir = TempDir::new().unwrap();

    let output = keyclash_cmd()
        .current_dir(dir.path())
        .arg("--init")
        .output()
        .unwrap();
    assert!(output.status.success());

    let content = fs::read_to_string(dir.path().join("keyclash.toml")).unwrap();
    assert!(content.contains("[conflicts]"));
}

#[test]
fn test_init_fails_if_config_exists() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("keyclash.toml"), "existing").unwrap();

    let output = keyclash_cmd()
        .current_dir(dir.path())
        .arg("--init")
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_config_file_sets_data_dir_and_scope() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("keyclash.toml"),
        r#"
[discovery]
data_dir = "bindings"

[conflicts]
scope = "file"
"#,
    )
    .unwrap();
    let bindings = dir.path().join("bindings");
    fs::create_dir(&bindings).unwrap();
    fs::write(bindings.join("a.yaml"), CTRL_K_YAML).unwrap();
    fs::write(bindings.join("b.yaml"), CTRL_K_YAML).unwrap();

    let output = run_in(dir.path(), &["--quiet"]);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "ctrl+k\n");
}

#[test]
fn test_cli_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("keyclash.toml"),
        "[conflicts]\nscope = \"file\"\n",
    )
    .unwrap();
    write_yaml(dir.path(), "a.yaml", CTRL_K_YAML);
    write_yaml(dir.path(), "b.yaml", CTRL_K_YAML);

    let output = run_in(dir.path(), &["--quiet", "--scope", "family"]);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "");
}
