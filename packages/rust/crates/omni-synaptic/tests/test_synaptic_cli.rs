//! Integration tests for the `synaptic` CLI binary.

use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn write_file(path: &Path, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

fn synaptic_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_synaptic"))
}

fn sample_vault() -> Result<TempDir, Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    write_file(
        &tmp.path().join("notes/focus.md"),
        "Focus links [[alpha]] and [[beta]] #hub\n\n```SynapticRoute\ntype: chart\nchartType: pie\n```\n",
    )?;
    write_file(&tmp.path().join("notes/alpha.md"), "#rust #cli\n")?;
    write_file(&tmp.path().join("notes/beta.md"), "#rust\n[[focus]]\n")?;
    write_file(&tmp.path().join("other/far.md"), "#python\n")?;
    Ok(tmp)
}

fn stdout_json(output: &std::process::Output) -> Result<Value, Box<dyn std::error::Error>> {
    let stdout = String::from_utf8(output.stdout.clone())?;
    Ok(serde_json::from_str(&stdout)?)
}

#[test]
fn test_synaptic_cloud_returns_ranked_entries() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = sample_vault()?;
    let output = synaptic_cmd()
        .arg("--root")
        .arg(tmp.path())
        .arg("cloud")
        .arg("focus")
        .arg("--block")
        .arg("type: table")
        .output()?;
    assert!(
        output.status.success(),
        "synaptic cloud failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let payload = stdout_json(&output)?;
    assert_eq!(payload.get("status").and_then(Value::as_str), Some("rendered"));
    let entries = payload
        .pointer("/payload/entries")
        .and_then(Value::as_array)
        .ok_or("missing entries")?;
    let first = entries.first().ok_or("no entries")?;
    assert_eq!(first.get("display_name").and_then(Value::as_str), Some("rust"));
    assert_eq!(first.get("score").and_then(Value::as_u64), Some(2));
    assert_eq!(first.get("rank").and_then(Value::as_u64), Some(1));
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|entry| entry.get("display_name") != Some(&Value::from("python"))));
    Ok(())
}

#[test]
fn test_synaptic_cloud_global_includes_whole_vault() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = sample_vault()?;
    let output = synaptic_cmd()
        .arg("--root")
        .arg(tmp.path())
        .arg("cloud")
        .arg("notes/focus.md")
        .arg("--block")
        .arg("global: true")
        .output()?;
    assert!(output.status.success());
    let payload = stdout_json(&output)?;
    let entries = payload
        .pointer("/payload/entries")
        .and_then(Value::as_array)
        .ok_or("missing entries")?;
    assert!(entries.iter().any(|entry| entry.get("label") == Some(&Value::from("python"))));
    Ok(())
}

#[test]
fn test_synaptic_validate_reports_all_errors() -> Result<(), Box<dyn std::error::Error>> {
    let output = synaptic_cmd()
        .arg("validate")
        .arg("--block")
        .arg("foo: bar\\ntype: chart\\ntheme: neon")
        .output()?;
    assert!(!output.status.success());
    let payload = stdout_json(&output)?;
    assert_eq!(payload.get("valid").and_then(Value::as_bool), Some(false));
    let keys: Vec<&str> = payload
        .get("errors")
        .and_then(Value::as_array)
        .ok_or("missing errors")?
        .iter()
        .filter_map(|error| error.get("key").and_then(Value::as_str))
        .collect();
    assert_eq!(keys, vec!["foo", "theme"]);
    Ok(())
}

#[test]
fn test_synaptic_validate_accepts_valid_block() -> Result<(), Box<dyn std::error::Error>> {
    let output = synaptic_cmd()
        .arg("validate")
        .arg("--block")
        .arg("type: chart\\nchartType: polarArea\\nmaxItem: 12")
        .output()?;
    assert!(output.status.success());
    let payload = stdout_json(&output)?;
    assert_eq!(payload.get("valid").and_then(Value::as_bool), Some(true));
    assert_eq!(
        payload.pointer("/options/render/chart").and_then(Value::as_str),
        Some("polarArea")
    );
    assert_eq!(payload.pointer("/options/maxItem").and_then(Value::as_u64), Some(12));
    Ok(())
}

#[test]
fn test_synaptic_render_processes_note_blocks() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = sample_vault()?;
    let output = synaptic_cmd()
        .arg("--root")
        .arg(tmp.path())
        .arg("render")
        .arg("focus")
        .output()?;
    assert!(output.status.success());
    let payload = stdout_json(&output)?;
    assert_eq!(payload.get("note").and_then(Value::as_str), Some("notes/focus.md"));
    assert_eq!(payload.get("blocks").and_then(Value::as_u64), Some(1));
    assert_eq!(
        payload
            .pointer("/outcomes/0/payload/options/render/chart")
            .and_then(Value::as_str),
        Some("pie")
    );
    Ok(())
}

#[test]
fn test_synaptic_neighborhood_and_stats() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = sample_vault()?;
    let output = synaptic_cmd()
        .arg("--root")
        .arg(tmp.path())
        .arg("neighborhood")
        .arg("focus")
        .output()?;
    assert!(output.status.success());
    let payload = stdout_json(&output)?;
    let candidates: Vec<&str> = payload
        .get("candidates")
        .and_then(Value::as_array)
        .ok_or("missing candidates")?
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(candidates, vec!["notes/alpha.md", "notes/beta.md", "notes/focus.md"]);

    let output = synaptic_cmd()
        .arg("--root")
        .arg(tmp.path())
        .arg("stats")
        .output()?;
    assert!(output.status.success());
    let stats = stdout_json(&output)?;
    assert_eq!(stats.get("total_notes").and_then(Value::as_u64), Some(4));
    assert_eq!(stats.get("orphans").and_then(Value::as_u64), Some(1));
    Ok(())
}

#[test]
fn test_synaptic_unknown_focus_fails() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = sample_vault()?;
    let output = synaptic_cmd()
        .arg("--root")
        .arg(tmp.path())
        .arg("cloud")
        .arg("missing-note")
        .output()?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("focus note is not part of the vault"));
    Ok(())
}
