use std::env;
use std::fs;
use std::sync::{Mutex, OnceLock};

use serde_json::Value;
use supportcrew_cli::commands::{config, doctor};
use tempfile::TempDir;

#[test]
fn doctor_json_passes_with_a_readable_policy() {
    let dir = TempDir::new().expect("tempdir");
    let policy_path = dir.path().join("policy.md");
    fs::write(&policy_path, "Refunds are processed within 14 days.\n").expect("write policy");
    let policy_path = policy_path.display().to_string();

    with_env(&[("SUPPORTCREW_POLICY_PATH", policy_path.as_str())], || {
        let output = doctor::run(true);
        let payload: Value =
            serde_json::from_str(&output).expect("doctor output should be valid JSON");

        assert_eq!(payload["overall_status"], "pass");
        let checks = payload["checks"].as_array().expect("checks array");
        assert!(checks
            .iter()
            .any(|check| check["name"] == "policy_document" && check["status"] == "pass"));
    });
}

#[test]
fn doctor_fails_when_policy_is_missing() {
    with_env(&[("SUPPORTCREW_POLICY_PATH", "/nonexistent/policy.md")], || {
        let output = doctor::run(true);
        let payload: Value =
            serde_json::from_str(&output).expect("doctor output should be valid JSON");

        assert_eq!(payload["overall_status"], "fail");
        let checks = payload["checks"].as_array().expect("checks array");
        assert!(checks
            .iter()
            .any(|check| check["name"] == "policy_document" && check["status"] == "fail"));
    });
}

#[test]
fn doctor_skips_downstream_checks_when_config_is_invalid() {
    with_env(&[("SUPPORTCREW_LLM_PROVIDER", "openai")], || {
        // openai without an api key fails validation.
        let output = doctor::run(true);
        let payload: Value =
            serde_json::from_str(&output).expect("doctor output should be valid JSON");

        assert_eq!(payload["overall_status"], "fail");
        let checks = payload["checks"].as_array().expect("checks array");
        assert!(checks
            .iter()
            .any(|check| check["name"] == "config_validation" && check["status"] == "fail"));
        assert!(checks
            .iter()
            .any(|check| check["name"] == "policy_document" && check["status"] == "skipped"));
    });
}

#[test]
fn config_reports_env_source_and_redacts_secrets() {
    with_env(
        &[
            ("SUPPORTCREW_LLM_MODEL", "custom-model"),
            ("SUPPORTCREW_LLM_API_KEY", "sk-very-secret"),
        ],
        || {
            let output = config::run();

            assert!(output
                .contains("- llm.model = custom-model (source: env (SUPPORTCREW_LLM_MODEL))"));
            assert!(output
                .contains("- llm.api_key = <redacted> (source: env (SUPPORTCREW_LLM_API_KEY))"));
            assert!(!output.contains("sk-very-secret"));
        },
    );
}

#[test]
fn config_falls_back_to_defaults_without_env() {
    with_env(&[], || {
        let output = config::run();

        assert!(output.contains("- policy.path = policy.md (source: default)"));
        assert!(output.contains("- llm.provider = Ollama (source: default)"));
        assert!(output.contains("- search.base_url = http://localhost:8089 (source: default)"));
    });
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "SUPPORTCREW_POLICY_PATH",
        "SUPPORTCREW_LLM_PROVIDER",
        "SUPPORTCREW_LLM_API_KEY",
        "SUPPORTCREW_LLM_BASE_URL",
        "SUPPORTCREW_LLM_MODEL",
        "SUPPORTCREW_LLM_TIMEOUT_SECS",
        "SUPPORTCREW_SEARCH_BASE_URL",
        "SUPPORTCREW_SEARCH_TIMEOUT_SECS",
        "SUPPORTCREW_SERVER_BIND_ADDRESS",
        "SUPPORTCREW_SERVER_PORT",
        "SUPPORTCREW_LOGGING_LEVEL",
        "SUPPORTCREW_LOGGING_FORMAT",
        "SUPPORTCREW_LOG_LEVEL",
        "SUPPORTCREW_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
