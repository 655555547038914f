//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;
use std::io;
use std::sync::{Arc, Mutex};

/// In-memory tracing output for asserting on emitted events.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn clear_env() {
    env::remove_var("PAGESEL_CONFIG");
    env::remove_var("PAGESEL_PAGE_SIZE");
    env::remove_var("PAGESEL_FETCH_DELAY_MS");
}

#[test]
fn default_config_path_contains_pagesel_config_toml() {
    let Some(path) = default_config_path() else {
        return;
    };
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("pagesel") && path_str.ends_with("config.toml"),
        "Path should contain 'pagesel' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_pagesel_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("pagesel.log"),
        "Default log path should end with 'pagesel.log', got: {:?}",
        path
    );
}

#[test]
fn resolved_defaults_match_original_table() {
    let config = ResolvedConfig::default();
    assert_eq!(config.page_size, 12);
    assert_eq!(config.fetch_delay_ms, 0);
    assert_eq!(config.columns.len(), 6);
    assert_eq!(config.columns[0], "title");
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/pagesel.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("pagesel_test_config.toml");
    let toml_content = r#"
page_size = 25
fetch_delay_ms = 300
columns = ["title", "date_end"]
title = "Artworks"
"#;
    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let result = load_config_file(&config_path);
    fs::remove_file(&config_path).ok();

    let config = result
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");
    assert_eq!(config.page_size, Some(25));
    assert_eq!(config.fetch_delay_ms, Some(300));
    assert_eq!(
        config.columns,
        Some(vec!["title".to_string(), "date_end".to_string()])
    );
    assert_eq!(config.title, Some("Artworks".to_string()));
    assert_eq!(config.log_file_path, None);
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("pagesel_test_invalid.toml");
    fs::write(&config_path, "page_size = [unclosed").unwrap();

    let result = load_config_file(&config_path);
    fs::remove_file(&config_path).ok();

    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Invalid TOML should be a parse error, got: {:?}",
        result
    );
}

#[test]
fn load_config_file_rejects_unknown_keys() {
    let config_path = env::temp_dir().join("pagesel_test_unknown_key.toml");
    fs::write(&config_path, "rows_per_page = 10\n").unwrap();

    let result = load_config_file(&config_path);
    fs::remove_file(&config_path).ok();

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
#[serial(pagesel_env)]
fn explicit_path_takes_precedence_over_env_var() {
    let explicit = env::temp_dir().join("pagesel_test_explicit.toml");
    let from_env = env::temp_dir().join("pagesel_test_from_env.toml");
    fs::write(&explicit, "page_size = 5\n").unwrap();
    fs::write(&from_env, "page_size = 50\n").unwrap();
    env::set_var("PAGESEL_CONFIG", &from_env);

    let result = load_config_with_precedence(Some(explicit.clone()));

    clear_env();
    fs::remove_file(&explicit).ok();
    fs::remove_file(&from_env).ok();

    assert_eq!(result.unwrap().unwrap().page_size, Some(5));
}

#[test]
#[serial(pagesel_env)]
fn env_var_path_is_used_without_explicit_path() {
    let from_env = env::temp_dir().join("pagesel_test_env_only.toml");
    fs::write(&from_env, "page_size = 50\n").unwrap();
    env::set_var("PAGESEL_CONFIG", &from_env);

    let result = load_config_with_precedence(None);

    clear_env();
    fs::remove_file(&from_env).ok();

    assert_eq!(result.unwrap().unwrap().page_size, Some(50));
}

#[test]
fn merge_config_without_file_uses_defaults() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_overrides_only_present_fields() {
    let file = ConfigFile {
        page_size: Some(20),
        title: Some("Artworks".to_string()),
        ..ConfigFile::default()
    };
    let merged = merge_config(Some(file));
    assert_eq!(merged.page_size, 20);
    assert_eq!(merged.title, "Artworks");
    assert_eq!(merged.columns, ResolvedConfig::default().columns);
}

#[test]
fn merge_config_raises_zero_page_size_and_ignores_empty_columns() {
    let file = ConfigFile {
        page_size: Some(0),
        columns: Some(Vec::new()),
        ..ConfigFile::default()
    };
    let merged = merge_config(Some(file));
    assert_eq!(merged.page_size, 1);
    assert_eq!(merged.columns, ResolvedConfig::default().columns);
}

#[test]
#[serial(pagesel_env)]
fn env_overrides_apply_numeric_values() {
    env::set_var("PAGESEL_PAGE_SIZE", "30");
    env::set_var("PAGESEL_FETCH_DELAY_MS", "150");

    let config = apply_env_overrides(ResolvedConfig::default());
    clear_env();

    assert_eq!(config.page_size, 30);
    assert_eq!(config.fetch_delay_ms, 150);
}

#[test]
#[serial(pagesel_env)]
fn env_overrides_ignore_unparsable_values() {
    env::set_var("PAGESEL_PAGE_SIZE", "lots");

    let config = apply_env_overrides(ResolvedConfig::default());
    clear_env();

    assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
}

#[test]
#[serial(pagesel_env)]
fn env_overrides_warn_about_each_rejected_variable() {
    env::set_var("PAGESEL_PAGE_SIZE", "lots");
    env::set_var("PAGESEL_FETCH_DELAY_MS", "-5");

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let config = tracing::subscriber::with_default(subscriber, || {
        apply_env_overrides(ResolvedConfig::default())
    });
    clear_env();

    assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(config.fetch_delay_ms, 0);
    let output = logs.contents();
    assert!(output.contains("WARN"), "output: {output}");
    assert!(output.contains("PAGESEL_PAGE_SIZE"), "output: {output}");
    assert!(output.contains("lots"), "output: {output}");
    assert!(output.contains("PAGESEL_FETCH_DELAY_MS"), "output: {output}");
}

#[test]
fn cli_overrides_win_over_everything() {
    let file = ConfigFile {
        page_size: Some(20),
        fetch_delay_ms: Some(100),
        ..ConfigFile::default()
    };
    let config = apply_cli_overrides(
        merge_config(Some(file)),
        CliOverrides {
            page_size: Some(8),
            fetch_delay_ms: None,
        },
    );
    assert_eq!(config.page_size, 8);
    assert_eq!(config.fetch_delay_ms, 100);
}
