use super::{
    DEFAULT_CONFIG_FILES, apply_config, find_default_config, load_config_file,
    types::{ConfigFile, DurationValue},
};
use std::time::Duration;
use tempfile::tempdir;

use crate::args::test_support::parse_test_matches;
use crate::args::{HttpMethod, OutputFormat};
use crate::error::{AppError, AppResult, ConfigError};

#[test]
fn parse_toml_config() -> AppResult<()> {
    let dir = tempdir().map_err(|err| AppError::config(format!("tempdir failed: {}", err)))?;
    let path = dir.path().join("benchpro.toml");
    let content = r#"
url = "http://localhost:3000/api"
method = "post"
headers = ["Accept: application/json", "X-Trace: 1"]
requests = 50
users = 5
timeout = "2s"
pacing = 25
output_format = "json"
"#;
    std::fs::write(&path, content)
        .map_err(|err| AppError::config(format!("write failed: {}", err)))?;

    let config = load_config_file(&path)?;
    if config.url.as_deref() != Some("http://localhost:3000/api") {
        return Err(AppError::config("Unexpected url"));
    }
    if config.method != Some(HttpMethod::Post) || config.requests != Some(50) {
        return Err(AppError::config("Unexpected method/requests"));
    }
    if config.headers.as_ref().map(Vec::len) != Some(2) {
        return Err(AppError::config("Unexpected headers"));
    }
    match config.timeout {
        Some(DurationValue::Text(ref text)) if text == "2s" => {}
        Some(DurationValue::Text(_) | DurationValue::Seconds(_)) | None => {
            return Err(AppError::config("Expected textual timeout"));
        }
    }
    match config.pacing {
        Some(DurationValue::Seconds(25)) => {}
        Some(DurationValue::Text(_) | DurationValue::Seconds(_)) | None => {
            return Err(AppError::config("Expected numeric pacing"));
        }
    }
    if config.output_format != Some(OutputFormat::Json) {
        return Err(AppError::config("Unexpected output format"));
    }
    Ok(())
}

#[test]
fn parse_json_config() -> AppResult<()> {
    let dir = tempdir().map_err(|err| AppError::config(format!("tempdir failed: {}", err)))?;
    let path = dir.path().join("benchpro.json");
    let content = r#"{
  "url": "https://example.com",
  "duration": 30,
  "user": "alice",
  "secret": "s3cret",
  "pretty": true
}"#;
    std::fs::write(&path, content)
        .map_err(|err| AppError::config(format!("write failed: {}", err)))?;

    let config = load_config_file(&path)?;
    if config.duration != Some(30) || config.pretty != Some(true) {
        return Err(AppError::config("Unexpected duration/pretty"));
    }
    if config.user.as_deref() != Some("alice") || config.secret.as_deref() != Some("s3cret") {
        return Err(AppError::config("Unexpected credentials"));
    }
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() -> AppResult<()> {
    let dir = tempdir().map_err(|err| AppError::config(format!("tempdir failed: {}", err)))?;
    let path = dir.path().join("benchpro.yaml");
    std::fs::write(&path, "url: x")
        .map_err(|err| AppError::config(format!("write failed: {}", err)))?;
    match load_config_file(&path) {
        Err(AppError::Config(ConfigError::UnsupportedExtension { ext })) if ext == "yaml" => {
            Ok(())
        }
        Err(err) => Err(AppError::config(format!("Unexpected error: {}", err))),
        Ok(_) => Err(AppError::config("Expected unsupported extension error")),
    }
}

#[test]
fn malformed_toml_is_a_parse_error() -> AppResult<()> {
    let dir = tempdir().map_err(|err| AppError::config(format!("tempdir failed: {}", err)))?;
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "url = ")
        .map_err(|err| AppError::config(format!("write failed: {}", err)))?;
    match load_config_file(&path) {
        Err(AppError::Config(ConfigError::ParseToml { .. })) => Ok(()),
        Err(err) => Err(AppError::config(format!("Unexpected error: {}", err))),
        Ok(_) => Err(AppError::config("Expected parse error")),
    }
}

#[test]
fn config_fills_values_not_given_on_cli() -> AppResult<()> {
    let (mut args, matches) = parse_test_matches(["benchpro", "-u", "http://cli.example"])?;
    let config = ConfigFile {
        url: Some("http://config.example".to_owned()),
        method: Some(HttpMethod::Put),
        headers: Some(vec!["X-From: config".to_owned()]),
        requests: Some(40),
        users: Some(4),
        timeout: Some(DurationValue::Text("750ms".to_owned())),
        pacing: Some(DurationValue::Seconds(1)),
        notify_every: Some(10),
        ..ConfigFile::default()
    };
    apply_config(&mut args, &matches, &config)?;

    if args.url.as_deref() != Some("http://cli.example") {
        return Err(AppError::config("CLI url must win"));
    }
    if args.method != HttpMethod::Put || args.requests.get() != 40 || args.users.get() != 4 {
        return Err(AppError::config("Config values were not applied"));
    }
    if args.header_block() != "X-From: config" {
        return Err(AppError::config(format!(
            "Unexpected headers: {:?}",
            args.header_block()
        )));
    }
    if args.timeout != Duration::from_millis(750) || args.pacing != Duration::from_secs(1) {
        return Err(AppError::config("Config durations were not applied"));
    }
    if args.notify_every != 10 {
        return Err(AppError::config("Unexpected notify_every"));
    }
    Ok(())
}

#[test]
fn cli_values_win_over_config() -> AppResult<()> {
    let (mut args, matches) = parse_test_matches([
        "benchpro",
        "-u",
        "http://cli.example",
        "-n",
        "7",
        "--timeout",
        "3s",
        "-d",
        "cli-body",
    ])?;
    let config = ConfigFile {
        requests: Some(99),
        timeout: Some(DurationValue::Seconds(30)),
        data_file: Some("body.json".to_owned()),
        ..ConfigFile::default()
    };
    apply_config(&mut args, &matches, &config)?;

    if args.requests.get() != 7 || args.timeout != Duration::from_secs(3) {
        return Err(AppError::config("CLI values must win"));
    }
    if args.data != "cli-body" || args.data_file.is_some() {
        return Err(AppError::config("CLI body must hide config body file"));
    }
    Ok(())
}

#[test]
fn config_rejects_invalid_values() -> AppResult<()> {
    let cases = [
        ConfigFile {
            requests: Some(0),
            ..ConfigFile::default()
        },
        ConfigFile {
            users: Some(0),
            ..ConfigFile::default()
        },
        ConfigFile {
            timeout: Some(DurationValue::Text("soon".to_owned())),
            ..ConfigFile::default()
        },
        ConfigFile {
            pacing: Some(DurationValue::Seconds(0)),
            ..ConfigFile::default()
        },
        ConfigFile {
            data: Some("inline".to_owned()),
            data_file: Some("body.json".to_owned()),
            ..ConfigFile::default()
        },
        ConfigFile {
            headers: Some(vec!["no delimiter".to_owned()]),
            ..ConfigFile::default()
        },
    ];
    for (idx, config) in cases.iter().enumerate() {
        let (mut args, matches) = parse_test_matches(["benchpro", "-u", "http://localhost"])?;
        match apply_config(&mut args, &matches, config) {
            Err(err) if err.is_configuration() => {}
            Err(err) => {
                return Err(AppError::config(format!("case {}: unexpected error {}", idx, err)));
            }
            Ok(()) => return Err(AppError::config(format!("case {}: expected an error", idx))),
        }
    }
    Ok(())
}

#[test]
fn default_lookup_prefers_toml_over_json() -> AppResult<()> {
    let dir = tempdir().map_err(|err| AppError::config(format!("tempdir failed: {}", err)))?;
    if find_default_config(dir.path()).is_some() {
        return Err(AppError::config("Empty directory must have no default config"));
    }

    for name in DEFAULT_CONFIG_FILES.iter().rev() {
        std::fs::write(dir.path().join(name), "")
            .map_err(|err| AppError::config(format!("write failed: {}", err)))?;
    }
    let found = find_default_config(dir.path());
    if found != Some(dir.path().join("benchpro.toml")) {
        return Err(AppError::config(format!("Unexpected default: {:?}", found)));
    }
    Ok(())
}

#[test]
fn default_lookup_ignores_directories() -> AppResult<()> {
    let dir = tempdir().map_err(|err| AppError::config(format!("tempdir failed: {}", err)))?;
    std::fs::create_dir(dir.path().join("benchpro.toml"))
        .map_err(|err| AppError::config(format!("mkdir failed: {}", err)))?;
    std::fs::write(dir.path().join("benchpro.json"), "{}")
        .map_err(|err| AppError::config(format!("write failed: {}", err)))?;
    let found = find_default_config(dir.path());
    if found != Some(dir.path().join("benchpro.json")) {
        return Err(AppError::config(format!("Unexpected default: {:?}", found)));
    }
    Ok(())
}

#[test]
fn extension_is_checked_before_reading() -> AppResult<()> {
    let dir = tempdir().map_err(|err| AppError::config(format!("tempdir failed: {}", err)))?;
    match load_config_file(&dir.path().join("absent")) {
        Err(AppError::Config(ConfigError::MissingExtension)) => Ok(()),
        Err(err) => Err(AppError::config(format!("Unexpected error: {}", err))),
        Ok(_) => Err(AppError::config("Expected missing extension error")),
    }
}
