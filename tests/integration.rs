use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn edconf_cmd(cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_edconf"));
    cmd.current_dir(cwd).env_remove("EDCONF_LOG").arg("--no-color");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// root/.editorconfig (root = true) and root/sub/.editorconfig, both setting
/// indent_size for *.rs.
fn nested_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".editorconfig"),
        "root = true\n\n[*.rs]\nindent_size = 8\ncharset = utf-8\n",
    )
    .unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(
        dir.path().join("sub/.editorconfig"),
        "[*.rs]\nindent_size = 4\nend_of_line = lf\n",
    )
    .unwrap();
    dir
}

// ===========================================
// resolve
// ===========================================

#[test]
fn test_resolve_farther_directory_wins() {
    let dir = nested_tree();
    let target = dir.path().join("sub/main.rs");

    let output = edconf_cmd(dir.path())
        .arg("resolve")
        .arg(&target)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("main.rs"));
    assert!(stdout.contains("  indent_size = 8"));
    assert!(stdout.contains("  end_of_line = lf"));
    assert!(stdout.contains("  charset = utf-8"));
    assert!(!stdout.contains("indent_size = 4"));
}

#[test]
fn test_resolve_explicit_root_stops_walk() {
    let dir = nested_tree();
    let sub = dir.path().join("sub");

    let output = edconf_cmd(dir.path())
        .arg("resolve")
        .arg("--root")
        .arg(&sub)
        .arg(sub.join("main.rs"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("  indent_size = 4"));
    assert!(!stdout.contains("charset"));
}

#[test]
fn test_resolve_json_output() {
    let dir = nested_tree();
    let target = dir.path().join("sub/main.rs");

    let output = edconf_cmd(dir.path())
        .arg("resolve")
        .arg("--json")
        .arg(&target)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let properties = &json[target.display().to_string()];
    assert_eq!(properties["indent_size"]["value"], "8");
    assert_eq!(properties["end_of_line"]["value"], "lf");
}

#[test]
fn test_resolve_walks_directories() {
    let dir = nested_tree();
    fs::write(dir.path().join("lib.rs"), "").unwrap();
    fs::write(dir.path().join("sub/main.rs"), "").unwrap();

    let output = edconf_cmd(dir.path())
        .arg("resolve")
        .arg("--json")
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let files = json.as_object().unwrap();
    assert_eq!(files.len(), 2);
    assert!(files.keys().all(|k| k.ends_with(".rs")));
}

#[test]
fn test_resolve_custom_file_name() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".myconfig"),
        "root = true\n[*]\ninsert_final_newline = true\n",
    )
    .unwrap();

    let output = edconf_cmd(dir.path())
        .arg("resolve")
        .arg("--file-name")
        .arg(".myconfig")
        .arg(dir.path().join("notes.txt"))
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(stdout(&output).contains("insert_final_newline = true"));
}

#[test]
fn test_resolve_parse_error_exits_1_and_continues() {
    let dir = TempDir::new().unwrap();
    let broken = dir.path().join("broken");
    let fine = dir.path().join("fine");
    fs::create_dir(&broken).unwrap();
    fs::create_dir(&fine).unwrap();
    fs::write(broken.join(".editorconfig"), "root = true\n[*.rs\n").unwrap();
    fs::write(fine.join(".editorconfig"), "root = true\n[*]\ntab_width = 4\n").unwrap();

    let output = edconf_cmd(dir.path())
        .arg("resolve")
        .arg(broken.join("a.rs"))
        .arg(fine.join("b.rs"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("tab_width = 4"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to parse"));
}

#[test]
fn test_resolve_parent_relative_target() {
    let dir = nested_tree();
    let sub = dir.path().join("sub");

    let output = edconf_cmd(&sub)
        .arg("resolve")
        .arg("../lib.rs")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("  indent_size = 8"));
    assert!(stdout.contains("  charset = utf-8"));
    // sub/.editorconfig is not an ancestor of lib.rs
    assert!(!stdout.contains("end_of_line"));
}

#[test]
fn test_resolve_parent_relative_root() {
    let dir = nested_tree();
    let deep = dir.path().join("sub/deep");
    fs::create_dir(&deep).unwrap();

    let output = edconf_cmd(&deep)
        .arg("resolve")
        .arg("--root")
        .arg("..")
        .arg("./main.rs")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("  indent_size = 4"));
    assert!(!stdout.contains("charset"));
}

// ===========================================
// validate
// ===========================================

#[test]
fn test_validate_clean_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join(".editorconfig");
    fs::write(&file, "root = true\n[*]\nindent_style = space\n").unwrap();

    let output = edconf_cmd(dir.path())
        .arg("validate")
        .arg(&file)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_validate_reports_problems() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join(".editorconfig");
    fs::write(&file, "[*]\nindent_style = wide\n").unwrap();

    let output = edconf_cmd(dir.path())
        .arg("validate")
        .arg(&file)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout(&output);
    assert!(stdout.contains(":2:16: error: "));
    assert!(stdout.contains("[invalid-value]"));
}

#[test]
fn test_validate_warnings_do_not_fail() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join(".editorconfig");
    fs::write(&file, "[*]\nspelling_language = en\n").unwrap();

    let output = edconf_cmd(dir.path())
        .arg("validate")
        .arg(&file)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(stdout(&output).contains("warning"));
}

#[test]
fn test_validate_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    let output = edconf_cmd(dir.path())
        .arg("validate")
        .arg(dir.path().join("nope"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}

// ===========================================
// outline
// ===========================================

#[test]
fn test_outline_lists_sections() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join(".editorconfig");
    fs::write(
        &file,
        "root = true\n\n[*]\nindent_style = space\n\n[*.md]\ntrim_trailing_whitespace = false\n",
    )
    .unwrap();

    let output = edconf_cmd(dir.path())
        .arg("outline")
        .arg(&file)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "root = true\n[*] (line 3)\n  indent_style = space\n[*.md] (line 6)\n  trim_trailing_whitespace = false\n"
    );
}

// ===========================================
// complete
// ===========================================

#[test]
fn test_complete_property_names() {
    let dir = TempDir::new().unwrap();

    let output = edconf_cmd(dir.path())
        .arg("complete")
        .arg("--strategy")
        .arg("prefix")
        .arg("in")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output), "indent_style\nindent_size\ninsert_final_newline\n");
}

#[test]
fn test_complete_values_with_subsequence() {
    let dir = TempDir::new().unwrap();

    let output = edconf_cmd(dir.path())
        .arg("complete")
        .arg("charset = u8b")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output), "utf-8-bom\n");
}

#[test]
fn test_complete_strategy_from_settings_file() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    fs::write(
        dir.path().join("edconf.toml"),
        "[complete]\nstrategy = \"prefix\"\n",
    )
    .unwrap();

    let output = edconf_cmd(dir.path())
        .arg("complete")
        .arg("tw")
        .output()
        .unwrap();

    // "tw" is a subsequence of several names but a prefix of none
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_complete_highlights_match_with_color() {
    let dir = TempDir::new().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_edconf"))
        .current_dir(dir.path())
        .arg("--color")
        .arg("complete")
        .arg("end_of_line = cr")
        .output()
        .unwrap();

    let stdout = stdout(&output);
    assert!(stdout.contains("\x1b[1;32mcr\x1b[0m\n"));
    assert!(stdout.contains("\x1b[1;32mcr\x1b[0mlf\n"));
}

// ===========================================
// settings file and init
// ===========================================

#[test]
fn test_explicit_settings_file_roots() {
    let dir = nested_tree();
    let settings = dir.path().join("settings.toml");
    fs::write(&settings, "[resolve]\nroot_dirs = [\"sub\"]\n").unwrap();

    let output = edconf_cmd(dir.path())
        .arg("--config")
        .arg(&settings)
        .arg("resolve")
        .arg(dir.path().join("sub/main.rs"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("indent_size = 4"));
    assert!(!stdout.contains("charset"));
}

#[test]
fn test_broken_settings_file_is_logged_and_ignored() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    fs::write(dir.path().join("edconf.toml"), "[complete\n").unwrap();

    let output = edconf_cmd(dir.path())
        .arg("complete")
        .arg("--strategy")
        .arg("prefix")
        .arg("root")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output), "root\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load settings file"));

    let silenced = edconf_cmd(dir.path())
        .env("EDCONF_LOG", "off")
        .arg("complete")
        .arg("root")
        .output()
        .unwrap();
    assert!(silenced.status.success());
    assert!(String::from_utf8_lossy(&silenced.stderr).is_empty());
}

#[test]
fn test_init_creates_settings_file() {
    let dir = TempDir::new().unwrap();

    let output = edconf_cmd(dir.path()).arg("init").output().unwrap();

    assert!(output.status.success());
    let content = fs::read_to_string(dir.path().join("edconf.toml")).unwrap();
    assert!(content.contains("[resolve]"));
}

#[test]
fn test_init_fails_if_exists() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("edconf.toml"), "# mine\n").unwrap();

    let output = edconf_cmd(dir.path()).arg("init").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        fs::read_to_string(dir.path().join("edconf.toml")).unwrap(),
        "# mine\n"
    );
}
