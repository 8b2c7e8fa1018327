use super::{apply_env, apply_file, load_settings, normalize_base_url, Settings};

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_config(contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("employee_directory_config_{suffix}.toml"));
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn defaults_point_at_local_api() {
    let settings = Settings::default();
    assert_eq!(settings.api_base_url, "http://127.0.0.1:8000");
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        "api_base_url = \"http://hr.internal:9000\"\nlog_filter = \"debug\"\n",
    )
    .expect("parse");
    assert_eq!(settings.api_base_url, "http://hr.internal:9000");
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn partial_file_keeps_other_defaults() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "log_filter = \"warn\"\n").expect("parse");
    assert_eq!(settings.api_base_url, Settings::default().api_base_url);
    assert_eq!(settings.log_filter, "warn");
}

#[test]
fn malformed_file_is_rejected() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "api_base_url = [").is_err());
}

#[test]
fn prefixed_env_wins_over_plain_env() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("DIRECTORY_API_URL", "http://a:1"),
        ("APP__API_BASE_URL", "http://b:2"),
        ("RUST_LOG", "debug"),
    ]);
    let mut settings = Settings::default();

    apply_env(&mut settings, |key| env.get(key).map(|v| v.to_string()));

    assert_eq!(settings.api_base_url, "http://b:2");
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn explicit_config_file_is_loaded() {
    let path = temp_config("api_base_url = \"https://rrhh.example.com/api/\"\n");

    let settings = load_settings(Some(&path)).expect("load");
    fs::remove_file(&path).expect("cleanup");

    // Env overrides may apply on the test host; the file value is the floor.
    if env::var("DIRECTORY_API_URL").is_err() && env::var("APP__API_BASE_URL").is_err() {
        assert_eq!(settings.api_base_url, "https://rrhh.example.com/api/");
    }
}

#[test]
fn missing_explicit_config_file_is_an_error() {
    let path = env::temp_dir().join("employee_directory_config_does_not_exist.toml");
    let err = load_settings(Some(&path)).expect_err("missing file");
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn base_url_is_normalized() {
    assert_eq!(
        normalize_base_url(" http://127.0.0.1:8000/ ").expect("url"),
        "http://127.0.0.1:8000"
    );
    assert_eq!(
        normalize_base_url("https://rrhh.example.com/api/").expect("url"),
        "https://rrhh.example.com/api"
    );
    assert_eq!(
        normalize_base_url("").expect("url"),
        Settings::default().api_base_url
    );
}

#[test]
fn base_url_rejects_non_http_schemes_and_garbage() {
    assert!(normalize_base_url("ftp://files.example.com").is_err());
    assert!(normalize_base_url("not a url").is_err());
    assert!(normalize_base_url("http://host/?page=2").is_err());
}
