// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_REMOTE_TIMEOUT: &str = "10s";
const API_KEY_ENV: &str = "LEADBOOK_API_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Sqlite,
    Remote,
}

impl BackendKind {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "sqlite" => Some(Self::Sqlite),
            "remote" => Some(Self::Remote),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Remote => "remote",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub remote: Remote,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            storage: Storage::default(),
            remote: Remote::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Storage {
    pub backend: Option<String>,
    pub db_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Remote {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("LEADBOOK_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set LEADBOOK_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(leadbook_db::APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let mut config = Self::default();
            config.capture_api_key();
            return Ok(config);
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [storage], [remote], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let mut config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.capture_api_key();
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(raw) = &self.storage.backend
            && BackendKind::parse(raw).is_none()
        {
            bail!(
                "storage.backend in {} must be \"sqlite\" or \"remote\", got {:?}",
                path.display(),
                raw
            );
        }

        if let Some(db_path) = &self.storage.db_path {
            leadbook_db::validate_db_path(db_path)?;
        }

        if let Some(timeout) = &self.remote.timeout {
            let parsed = parse_duration(timeout)?;
            if parsed <= Duration::ZERO {
                bail!(
                    "remote.timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        if self.backend() == BackendKind::Remote {
            if self.remote_url().is_none() {
                bail!(
                    "storage.backend = \"remote\" in {} needs remote.url -- set it to the hosted store's base URL",
                    path.display()
                );
            }
            if self.remote_api_key().is_none() {
                bail!(
                    "storage.backend = \"remote\" in {} needs an API key -- set remote.api_key or {}",
                    path.display(),
                    API_KEY_ENV
                );
            }
        }

        if let Some(level) = &self.log.level {
            tracing_subscriber::EnvFilter::try_new(level).with_context(|| {
                format!("log.level in {} is not a valid filter: {level:?}", path.display())
            })?;
        }

        Ok(())
    }

    pub fn backend(&self) -> BackendKind {
        self.storage
            .backend
            .as_deref()
            .and_then(BackendKind::parse)
            .unwrap_or(BackendKind::Sqlite)
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.storage.db_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => leadbook_db::default_db_path(),
        }
    }

    pub fn remote_url(&self) -> Option<&str> {
        self.remote
            .url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
    }

    // The environment is read once, at load, so validation and the
    // backend see the same key.
    fn capture_api_key(&mut self) {
        let key = self
            .remote
            .api_key
            .take()
            .or_else(|| env::var(API_KEY_ENV).ok())
            .map(|key| key.trim().to_owned())
            .filter(|key| !key.is_empty());
        self.remote.api_key = key;
    }

    /// Config value first, then `LEADBOOK_API_KEY` as it was at load time.
    pub fn remote_api_key(&self) -> Option<&str> {
        self.remote.api_key.as_deref()
    }

    pub fn remote_timeout(&self) -> Result<Duration> {
        parse_duration(
            self.remote
                .timeout
                .as_deref()
                .unwrap_or(DEFAULT_REMOTE_TIMEOUT),
        )
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_file(&self) -> Result<PathBuf> {
        if let Some(path) = &self.log.file {
            return Ok(PathBuf::from(path));
        }

        let data_root = dirs::data_local_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [log].file to a writable path")
        })?;
        let app_dir = data_root.join(leadbook_db::APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create data directory {}", app_dir.display()))?;
        Ok(app_dir.join("leadbook.log"))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# leadbook config\n# Place this file at: {}\n\nversion = 1\n\n[storage]\n# \"sqlite\" keeps data in a local file; \"remote\" talks to a hosted store\nbackend = \"sqlite\"\n# Optional. Default is platform data dir (for example ~/.local/share/leadbook/leadbook.db)\n# db_path = \"/absolute/path/to/leadbook.db\"\n\n[remote]\n# url = \"https://project.example.co\"\n# api_key = \"...\"  # or set {}\ntimeout = \"{}\"\n\n[log]\nlevel = \"{}\"\n# file = \"/absolute/path/to/leadbook.log\"\n",
            path.display(),
            API_KEY_ENV,
            DEFAULT_REMOTE_TIMEOUT,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        let secs = mins
            .checked_mul(60)
            .ok_or_else(|| anyhow!("timeout {raw:?} is too large"))?;
        return Ok(Duration::from_secs(secs));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 10s)")
}

#[cfg(test)]
mod tests {
    use super::{BackendKind, Config, parse_duration};
    use anyhow::Result;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};
    use std::time::Duration;

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_sqlite_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.backend(), BackendKind::Sqlite);
        assert_eq!(config.log_level(), "warn");
        assert_eq!(config.remote_timeout()?, Duration::from_secs(10));
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[storage]\nbackend = \"sqlite\"\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[storage], [remote], and [log]"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn remote_config_parses_and_trims_url() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[storage]\nbackend = \"remote\"\n[remote]\nurl = \"https://project.example.co//\"\napi_key = \"anon\"\ntimeout = \"500ms\"\n[log]\nlevel = \"leadbook=debug\"\n",
        )?;
        let config = Config::load(&path)?;
        assert_eq!(config.backend(), BackendKind::Remote);
        assert_eq!(config.remote_url(), Some("https://project.example.co"));
        assert_eq!(config.remote_api_key(), Some("anon"));
        assert_eq!(config.remote_timeout()?, Duration::from_millis(500));
        assert_eq!(config.log_level(), "leadbook=debug");
        Ok(())
    }

    #[test]
    fn unknown_backend_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[storage]\nbackend = \"mysql\"\n")?;
        let error = Config::load(&path).expect_err("unknown backend should fail");
        let message = error.to_string();
        assert!(message.contains("storage.backend"));
        assert!(message.contains("\"mysql\""));
        Ok(())
    }

    #[test]
    fn remote_backend_requires_url() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[storage]\nbackend = \"remote\"\n[remote]\napi_key = \"anon\"\n",
        )?;
        let error = Config::load(&path).expect_err("missing url should fail");
        assert!(error.to_string().contains("needs remote.url"));
        Ok(())
    }

    #[test]
    fn remote_api_key_falls_back_to_env() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) = write_config(
            "version = 1\n[storage]\nbackend = \"remote\"\n[remote]\nurl = \"https://project.example.co\"\n",
        )?;

        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("LEADBOOK_API_KEY");
        }
        let error = Config::load(&path).expect_err("missing api key should fail");
        assert!(error.to_string().contains("LEADBOOK_API_KEY"));

        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("LEADBOOK_API_KEY", "from-env");
        }
        let loaded = Config::load(&path);
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("LEADBOOK_API_KEY");
        }
        let config = loaded?;
        assert_eq!(config.remote_api_key(), Some("from-env"));
        Ok(())
    }

    #[test]
    fn non_positive_timeout_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[remote]\ntimeout = \"0s\"\n")?;
        let error = Config::load(&path).expect_err("zero timeout should fail");
        assert!(error.to_string().contains("must be positive"));
        Ok(())
    }

    #[test]
    fn parse_duration_accepts_ms_seconds_and_minutes() -> Result<()> {
        assert_eq!(parse_duration("500ms")?, Duration::from_millis(500));
        assert_eq!(parse_duration("5s")?, Duration::from_secs(5));
        assert_eq!(parse_duration("2m")?, Duration::from_secs(120));
        let error = parse_duration("soon").expect_err("invalid duration should fail");
        assert!(error.to_string().contains("invalid"));
        Ok(())
    }

    #[test]
    fn oversized_minute_timeout_is_an_error() -> Result<()> {
        let error = parse_duration("307445734561825861m").expect_err("overflow should fail");
        assert!(error.to_string().contains("too large"));

        let (_temp, path) =
            write_config("version = 1\n[remote]\ntimeout = \"307445734561825861m\"\n")?;
        let error = Config::load(&path).expect_err("oversized timeout should fail");
        assert!(error.to_string().contains("too large"));
        Ok(())
    }

    #[test]
    fn invalid_log_level_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[log]\nlevel = \"leadbook=loud\"\n")?;
        let error = Config::load(&path).expect_err("bad filter should fail");
        assert!(error.to_string().contains("log.level"));
        Ok(())
    }

    #[test]
    fn db_path_rejects_uri_style_storage_value() -> Result<()> {
        let (_temp, path) =
            write_config("version = 1\n[storage]\ndb_path = \"file:leadbook.db?mode=ro\"\n")?;
        assert!(Config::load(&path).is_err());
        Ok(())
    }

    #[test]
    fn db_path_prefers_storage_config_over_env_override() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) =
            write_config("version = 1\n[storage]\ndb_path = \"/explicit/from-config.db\"\n")?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("LEADBOOK_DB_PATH", "/from/env.db");
        }
        let resolved = Config::load(&path).and_then(|config| config.db_path());
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("LEADBOOK_DB_PATH");
        }
        assert_eq!(resolved?, PathBuf::from("/explicit/from-config.db"));
        Ok(())
    }

    #[test]
    fn db_path_uses_env_override_when_storage_db_path_missing() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) = write_config("version = 1\n")?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("LEADBOOK_DB_PATH", "/from/env-only.db");
        }
        let resolved = Config::load(&path).and_then(|config| config.db_path());
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("LEADBOOK_DB_PATH");
        }
        assert_eq!(resolved?, PathBuf::from("/from/env-only.db"));
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("LEADBOOK_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path();
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("LEADBOOK_CONFIG_PATH");
        }
        assert_eq!(resolved?, override_path);
        Ok(())
    }

    #[test]
    fn log_file_prefers_config_value() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[log]\nfile = \"/var/tmp/leadbook.log\"\n")?;
        let config = Config::load(&path)?;
        assert_eq!(config.log_file()?, PathBuf::from("/var/tmp/leadbook.log"));
        Ok(())
    }

    #[test]
    fn example_config_loads_cleanly() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[remote]"));
        std::fs::write(&path, example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.backend(), BackendKind::Sqlite);
        Ok(())
    }
}
