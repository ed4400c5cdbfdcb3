//! Configuration loading and validation.
//!
//! Settings come from an optional `music-finder.toml`, then environment
//! variables, then command-line flags. Every field has a default so the
//! file can be omitted entirely.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "music-finder.toml";

/// Largest page the Spotify search endpoint returns.
pub const MAX_SEARCH_LIMIT: usize = 50;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub spotify: SpotifyConfig,

    #[serde(default)]
    pub mail: MailConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Spotify Web API client-credentials settings
#[derive(Clone, Serialize, Deserialize)]
pub struct SpotifyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// Number of recommended tracks requested
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: u32,
}

/// SendGrid delivery settings
#[derive(Clone, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sendgrid_api_key: Option<String>,

    #[serde(default = "default_mail_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_subject")]
    pub subject: String,

    #[serde(default = "default_attachment_name")]
    pub attachment_name: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory HTML reports are written to
    #[serde(default = "default_report_dir")]
    pub dir: PathBuf,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of search results listed for selection
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,
}

fn default_recommendation_limit() -> u32 {
    20
}
fn default_mail_endpoint() -> String {
    "https://api.sendgrid.com/v3/mail/send".into()
}
fn default_subject() -> String {
    "New Music Recommendations".into()
}
fn default_attachment_name() -> String {
    "Music_Recommendations.html".into()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_report_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_display_limit() -> usize {
    10
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            recommendation_limit: default_recommendation_limit(),
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            sendgrid_api_key: None,
            endpoint: default_mail_endpoint(),
            subject: default_subject(),
            attachment_name: default_attachment_name(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dir: default_report_dir(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            display_limit: default_display_limit(),
        }
    }
}

fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for SpotifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotifyConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &redact(&self.client_secret))
            .field("recommendation_limit", &self.recommendation_limit)
            .finish()
    }
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("sendgrid_api_key", &redact(&self.sendgrid_api_key))
            .field("endpoint", &self.endpoint)
            .field("subject", &self.subject)
            .field("attachment_name", &self.attachment_name)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl AppConfig {
    /// Load from `path` (or `music-finder.toml`) and apply environment overrides.
    ///
    /// Not validated yet: command-line flags are applied on top first.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let mut config = Self::load_from(path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Override settings from environment-style lookups.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(id) = lookup("RSPOTIFY_CLIENT_ID") {
            self.spotify.client_id = Some(id);
        }
        if let Some(secret) = lookup("RSPOTIFY_CLIENT_SECRET") {
            self.spotify.client_secret = Some(secret);
        }
        if let Some(key) = lookup("SENDGRID_API_KEY") {
            self.mail.sendgrid_api_key = Some(key);
        }
        if let Some(dir) = lookup("MUSIC_FINDER_REPORT_DIR") {
            self.report.dir = PathBuf::from(dir);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.spotify.recommendation_limit) {
            return Err(ConfigError::Validation(format!(
                "spotify.recommendation_limit must be between 1 and 100, got {}",
                self.spotify.recommendation_limit
            )));
        }
        if !(1..=MAX_SEARCH_LIMIT).contains(&self.session.display_limit) {
            return Err(ConfigError::Validation(format!(
                "session.display_limit must be between 1 and {MAX_SEARCH_LIMIT}, got {}",
                self.session.display_limit
            )));
        }
        if self.mail.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "mail.timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spotify.recommendation_limit, 20);
        assert_eq!(config.session.display_limit, 10);
        assert_eq!(config.mail.subject, "New Music Recommendations");
        assert_eq!(config.report.dir, PathBuf::from("."));
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/music-finder.toml")).unwrap();
        assert_eq!(config.mail.attachment_name, "Music_Recommendations.html");
    }

    #[test]
    fn partial_toml_keeps_defaults_for_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("music-finder.toml");
        std::fs::write(
            &path,
            r#"
[spotify]
client_id = "abc"
recommendation_limit = 50

[report]
dir = "reports"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.spotify.client_id.as_deref(), Some("abc"));
        assert_eq!(config.spotify.recommendation_limit, 50);
        assert_eq!(config.report.dir, PathBuf::from("reports"));
        assert_eq!(config.session.display_limit, 10);
        assert!(config.mail.sendgrid_api_key.is_none());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("music-finder.toml");
        std::fs::write(&path, "[spotify\nclient_id = ").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn environment_overrides_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("RSPOTIFY_CLIENT_ID", "env-id"),
            ("RSPOTIFY_CLIENT_SECRET", "env-secret"),
            ("SENDGRID_API_KEY", "SG.key"),
            ("MUSIC_FINDER_REPORT_DIR", "/tmp/reports"),
        ]);
        let mut config = AppConfig::default();
        config.spotify.client_id = Some("file-id".into());
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.spotify.client_id.as_deref(), Some("env-id"));
        assert_eq!(config.spotify.client_secret.as_deref(), Some("env-secret"));
        assert_eq!(config.mail.sendgrid_api_key.as_deref(), Some("SG.key"));
        assert_eq!(config.report.dir, PathBuf::from("/tmp/reports"));
    }

    #[test]
    fn out_of_range_limits_are_rejected() {
        let mut config = AppConfig::default();
        config.spotify.recommendation_limit = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.session.display_limit = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn display_limit_is_bounded_by_the_search_page_size() {
        let mut config = AppConfig::default();
        config.session.display_limit = MAX_SEARCH_LIMIT;
        assert!(config.validate().is_ok());

        for limit in [MAX_SEARCH_LIMIT + 1, 500] {
            config.session.display_limit = limit;
            assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
        }
    }

    #[test]
    fn load_leaves_validation_to_the_caller() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("music-finder.toml");
        std::fs::write(&path, "[session]\ndisplay_limit = 0\n").unwrap();

        let mut config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.session.display_limit, 0);
        assert!(config.validate().is_err());

        config.session.display_limit = 5;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn secrets_are_redacted_in_debug_output() {
        let mut config = AppConfig::default();
        config.spotify.client_secret = Some("super-secret".into());
        config.mail.sendgrid_api_key = Some("SG.secret".into());
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("SG.secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
