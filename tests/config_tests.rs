use std::io::Write;
use std::time::Duration;

use enrollrush::error::{ConfigError, Error};
use enrollrush::infrastructure::config::settings::Config;
use tempfile::NamedTempFile;

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn empty_config_uses_defaults() {
    let file = write_temp_config("");
    let config = Config::load(file.path()).expect("defaults are valid");

    assert_eq!(
        config.api.base_url,
        "https://api-xcx-qunsou.weiyoubot.cn/xcx/enroll"
    );
    let settings = config.submitter_settings();
    assert_eq!(settings.poll_interval, Duration::from_millis(200));
    assert_eq!(settings.failure_limit, 20);
    assert_eq!(config.submit.max_concurrency, 5);
    assert_eq!(settings.filler.fill(None), "11111111111");
}

#[test]
fn overrides_are_applied() {
    let file = write_temp_config(
        r#"
[api]
base_url = "http://localhost:8080/xcx/enroll"
user_agents = ["agent-a", "agent-b"]

[submit]
poll_interval_ms = 50
failure_limit = 3
max_concurrency = 2
filler = "0"
default_min_length = 4
"#,
    );
    let config = Config::load(file.path()).expect("valid config");

    assert_eq!(config.api.user_agents.len(), 2);
    let settings = config.submitter_settings();
    assert_eq!(settings.poll_interval, Duration::from_millis(50));
    assert_eq!(settings.failure_limit, 3);
    assert_eq!(settings.filler.fill(None), "0000");
    assert_eq!(settings.filler.fill(Some(2)), "00");
}

#[test]
fn rejects_zero_poll_interval() {
    let file = write_temp_config("[submit]\npoll_interval_ms = 0\n");

    match Config::load(file.path()) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "poll_interval_ms",
            ..
        })) => {}
        Err(err) => panic!("expected invalid poll interval, got {err}"),
        Ok(_) => panic!("expected zero poll interval to be rejected"),
    }
}

#[test]
fn rejects_relative_base_url() {
    let file = write_temp_config("[api]\nbase_url = \"/xcx/enroll\"\n");

    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "base_url",
            ..
        }))
    ));
}

#[test]
fn unreadable_file_is_a_read_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("missing.toml");

    assert!(matches!(
        Config::load(&missing),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let file = write_temp_config("[submit\nfailure_limit = ");

    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}
