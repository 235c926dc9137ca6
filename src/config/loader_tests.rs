//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

/// Path in the temp dir unique to this test process.
fn temp_config(name: &str) -> PathBuf {
    env::temp_dir().join(format!("osq_test_{}_{}.toml", std::process::id(), name))
}

/// RAII guard to ensure environment variable cleanup even under test parallelism.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

// ===== Paths =====

#[test]
fn default_config_path_points_at_osq_config_toml() {
    let Some(path) = default_config_path() else {
        return; // No config dir on this platform.
    };
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("osq") && path_str.ends_with("config.toml"),
        "Path should contain 'osq' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_osq_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("osq.log"),
        "Default log path should end with 'osq.log', got: {:?}",
        path
    );
}

// ===== load_config_file =====

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/osq/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = temp_config("valid");
    let toml_content = r#"
base_url = "https://search.example.org"
page_size = 20
request_timeout_secs = 3
show_scores = true
tagline = "Search the small web"
log_file_path = "/tmp/osq-test.log"
"#;
    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(
        config.base_url.as_deref(),
        Some("https://search.example.org")
    );
    assert_eq!(config.page_size, Some(20));
    assert_eq!(config.request_timeout_secs, Some(3));
    assert_eq!(config.show_scores, Some(true));
    assert_eq!(config.tagline.as_deref(), Some("Search the small web"));
    assert_eq!(
        config.log_file_path,
        Some(PathBuf::from("/tmp/osq-test.log"))
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = temp_config("invalid");
    fs::write(&config_path, "this is not valid TOML ][}{").expect("Failed to write config");

    let result = load_config_file(&config_path);
    match result {
        Err(ConfigError::ParseError { path, reason: _ }) => {
            assert_eq!(path, config_path);
        }
        other => panic!("Expected ParseError, got {:?}", other),
    }

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_handles_partial_config() {
    let config_path = temp_config("partial");
    fs::write(
        &config_path,
        r#"
page_size = 5
# Other fields omitted
"#,
    )
    .expect("Failed to write partial test config");

    let config = load_config_file(&config_path)
        .expect("Should parse partial config")
        .expect("file exists");
    assert_eq!(config.page_size, Some(5));
    assert_eq!(config.base_url, None);

    fs::remove_file(config_path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str(r#"theme = "monokai""#);
    assert!(result.is_err(), "Unknown keys should be rejected");
}

#[test]
fn config_file_rejects_wrong_types() {
    let result: Result<ConfigFile, _> = toml::from_str(r#"page_size = "fifteen""#);
    assert!(result.is_err());
}

// ===== merge_config =====

#[test]
fn resolved_config_default_has_expected_values() {
    let config = ResolvedConfig::default();
    assert_eq!(config.base_url, "http://localhost:8080");
    assert_eq!(config.page_size, 15);
    assert_eq!(config.request_timeout_secs, 10);
    assert!(!config.show_scores);
    assert_eq!(config.tagline, "Search from ~26,000 webpages!");
    assert!(!config.log_file_path.as_os_str().is_empty());
}

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_overrides_with_config_file_values() {
    let file = ConfigFile {
        base_url: Some("http://search.internal:9000".to_string()),
        page_size: Some(30),
        request_timeout_secs: Some(2),
        show_scores: Some(true),
        tagline: Some("hello".to_string()),
        log_file_path: Some(PathBuf::from("/custom/app.log")),
    };

    let resolved = merge_config(Some(file));
    assert_eq!(resolved.base_url, "http://search.internal:9000");
    assert_eq!(resolved.page_size, 30);
    assert_eq!(resolved.request_timeout_secs, 2);
    assert!(resolved.show_scores);
    assert_eq!(resolved.tagline, "hello");
    assert_eq!(resolved.log_file_path, PathBuf::from("/custom/app.log"));
}

#[test]
fn merge_config_uses_defaults_for_none_fields() {
    let file = ConfigFile {
        page_size: Some(7),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(file));
    let defaults = ResolvedConfig::default();
    assert_eq!(resolved.page_size, 7);
    assert_eq!(resolved.base_url, defaults.base_url);
    assert_eq!(resolved.request_timeout_secs, defaults.request_timeout_secs);
    assert_eq!(resolved.log_file_path, defaults.log_file_path);
}

// ===== Environment =====

#[test]
#[serial(osq_base_url)]
fn apply_env_overrides_respects_osq_base_url() {
    let _guard = EnvGuard::new(BASE_URL_ENV_VAR);
    env::set_var(BASE_URL_ENV_VAR, "http://10.0.0.5:8080");

    let result = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(result.base_url, "http://10.0.0.5:8080");
}

#[test]
#[serial(osq_base_url)]
fn apply_env_overrides_ignores_blank_value() {
    let _guard = EnvGuard::new(BASE_URL_ENV_VAR);
    env::set_var(BASE_URL_ENV_VAR, "   ");

    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
#[serial(osq_base_url)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    let _guard = EnvGuard::new(BASE_URL_ENV_VAR);

    let base = ResolvedConfig::default();
    assert_eq!(
        apply_env_overrides(base.clone()),
        base,
        "Config should be unchanged when OSQ_BASE_URL not set"
    );
}

#[test]
#[serial(osq_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);

    let explicit_path = temp_config("explicit");
    fs::write(&explicit_path, "page_size = 11").expect("Failed to write explicit config");

    let env_path = temp_config("env_ignored");
    fs::write(&env_path, "page_size = 22").expect("Failed to write env config");
    env::set_var(CONFIG_ENV_VAR, &env_path);

    let config = load_config_with_precedence(Some(explicit_path.clone()))
        .expect("loads")
        .expect("file exists");
    assert_eq!(
        config.page_size,
        Some(11),
        "Should use explicit path, not OSQ_CONFIG env var"
    );

    fs::remove_file(explicit_path).ok();
    fs::remove_file(env_path).ok();
}

#[test]
#[serial(osq_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);

    let env_path = temp_config("env");
    fs::write(&env_path, "show_scores = true").expect("Failed to write env config");
    env::set_var(CONFIG_ENV_VAR, &env_path);

    let config = load_config_with_precedence(None)
        .expect("loads")
        .expect("file exists");
    assert_eq!(config.show_scores, Some(true));

    fs::remove_file(env_path).ok();
}

// ===== CLI =====

#[test]
fn apply_cli_overrides_replaces_only_given_values() {
    let base = ResolvedConfig::default();
    let result = apply_cli_overrides(base.clone(), None, Some(40), None);

    assert_eq!(result.page_size, 40);
    assert_eq!(result.base_url, base.base_url);
    assert_eq!(result.show_scores, base.show_scores);
}

#[test]
fn apply_cli_overrides_no_overrides() {
    let base = ResolvedConfig::default();
    assert_eq!(apply_cli_overrides(base.clone(), None, None, None), base);
}

#[test]
#[serial(osq_base_url)]
fn precedence_chain_full_defaults_to_cli() {
    let _guard = EnvGuard::new(BASE_URL_ENV_VAR);

    let file = ConfigFile {
        base_url: Some("http://from-file:8080".to_string()),
        page_size: Some(20),
        ..ConfigFile::default()
    };
    let merged = merge_config(Some(file));
    assert_eq!(merged.base_url, "http://from-file:8080");

    env::set_var(BASE_URL_ENV_VAR, "http://from-env:8080");
    let with_env = apply_env_overrides(merged);
    assert_eq!(with_env.base_url, "http://from-env:8080");
    assert_eq!(with_env.page_size, 20);

    let with_cli = apply_cli_overrides(
        with_env,
        Some("http://from-cli:8080".to_string()),
        None,
        Some(true),
    );
    assert_eq!(with_cli.base_url, "http://from-cli:8080");
    assert_eq!(with_cli.page_size, 20, "file value survives when not overridden");
    assert!(with_cli.show_scores);
}

// ===== validate =====

#[test]
fn validate_accepts_defaults() {
    let settings = ResolvedConfig::default()
        .validate()
        .expect("defaults are valid");
    assert_eq!(settings.base_url.as_str(), "http://localhost:8080/");
    assert_eq!(settings.page_size.get(), 15);
    assert_eq!(settings.request_timeout, Duration::from_secs(10));
}

#[test]
fn validate_rejects_zero_page_size() {
    let config = ResolvedConfig {
        page_size: 0,
        ..ResolvedConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue {
            key: "page_size",
            ..
        })
    ));
}

#[test]
fn validate_rejects_zero_timeout() {
    let config = ResolvedConfig {
        request_timeout_secs: 0,
        ..ResolvedConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue {
            key: "request_timeout_secs",
            ..
        })
    ));
}

#[test]
fn parse_base_url_accepts_http_and_https() {
    assert!(parse_base_url("http://localhost:8080").is_ok());
    assert!(parse_base_url("https://search.example.org/api/").is_ok());
    assert!(parse_base_url("  http://localhost:8080  ").is_ok());
}

#[test]
fn parse_base_url_rejects_other_schemes_and_garbage() {
    for raw in ["ftp://example.org", "localhost:8080", "not a url", ""] {
        assert!(
            matches!(
                parse_base_url(raw),
                Err(ConfigError::InvalidValue {
                    key: "base_url",
                    ..
                })
            ),
            "{:?} should be rejected",
            raw
        );
    }
}

#[test]
fn invalid_value_error_names_the_key() {
    let err = ConfigError::InvalidValue {
        key: "page_size",
        reason: "must be at least 1".to_string(),
    };
    assert_eq!(err.to_string(), "Invalid value for page_size: must be at least 1");
}
