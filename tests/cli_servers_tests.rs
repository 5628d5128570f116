//! Integration tests for the server store commands
//!
//! Each test points KVPN_CONFIG_DIR at a temporary directory so the
//! record store lives in `<tmp>/servers.toml`.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const LISTING: &str = r#"
[[servers]]
country = "Japan"
countryFlagUrl = "http://flags/jp.png"
ip = "219.100.37.1"
sessions = "42 sessions"
upTime = "12 days"
speed = "88.1 Mbps"
config = "cfgblob"
score = 10
expireTime = 0

[[servers]]
country = "Korea"
countryFlagUrl = ""
ip = "121.0.0.9"
sessions = ""
upTime = ""
speed = ""
config = "cfgblob"
score = 90
expireTime = 0

[[servers]]
country = "Germany"
countryFlagUrl = "http://flags/de.png"
ip = "5.6.7.8"
sessions = ""
upTime = ""
speed = ""
config = "cfgblob"
score = 500
expireTime = 100
"#;

fn kvpn(config_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kvpn"))
        .args(args)
        .env("KVPN_CONFIG_DIR", config_dir)
        .env_remove("JOURNAL_STREAM")
        .output()
        .expect("Failed to execute kvpn")
}

fn import_listing(dir: &TempDir) {
    let listing = dir.path().join("listing.toml");
    std::fs::write(&listing, LISTING).unwrap();
    let output = kvpn(dir.path(), &["servers", "import", listing.to_str().unwrap()]);
    assert!(output.status.success(), "import failed: {:?}", output);
}

#[test]
fn test_list_is_ranked_and_hides_expired() {
    let dir = TempDir::new().unwrap();
    import_listing(&dir);

    let output = kvpn(dir.path(), &["servers", "list", "--json"]);
    assert!(output.status.success());

    let servers: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let countries: Vec<&str> = servers
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["country"].as_str().unwrap())
        .collect();
    assert_eq!(countries, vec!["Korea", "Japan"]);
}

#[test]
fn test_list_all_includes_expired() {
    let dir = TempDir::new().unwrap();
    import_listing(&dir);

    let output = kvpn(dir.path(), &["servers", "list", "--json", "--all"]);
    let servers: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(servers.as_array().unwrap().len(), 3);
    assert_eq!(servers[0]["country"], "Germany");
}

#[test]
fn test_prune_removes_expired() {
    let dir = TempDir::new().unwrap();
    import_listing(&dir);

    let output = kvpn(dir.path(), &["servers", "prune"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Removed 1 expired server(s)"));
}

#[test]
fn test_check_reports_usability() {
    let dir = TempDir::new().unwrap();
    import_listing(&dir);

    // Japan (id 1) has every required field
    let usable = kvpn(dir.path(), &["check", "1"]);
    assert!(usable.status.success());
    assert!(String::from_utf8_lossy(&usable.stdout).contains("Connect is available"));

    // Korea (id 2) has no flag URL
    let unusable = kvpn(dir.path(), &["check", "2"]);
    assert!(unusable.status.success());
    assert!(String::from_utf8_lossy(&unusable.stdout).contains("Connect is unavailable"));
}

#[test]
fn test_check_unknown_id_fails() {
    let dir = TempDir::new().unwrap();

    let output = kvpn(dir.path(), &["check", "42"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No server with id 42"));
}

#[test]
fn test_corrupt_store_exits_with_config_code() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("servers.toml"), "servers = 12").unwrap();

    let output = kvpn(dir.path(), &["servers", "list"]);
    assert_eq!(output.status.code(), Some(2));
}
