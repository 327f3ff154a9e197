//! Persisted sync settings.
//!
//! Stored as TOML in the platform config directory. The GitHub token can
//! be overridden per-invocation with the `RETRO_SHELF_GITHUB_TOKEN`
//! environment variable.

use std::path::PathBuf;

use crate::error::SyncError;

pub const TOKEN_ENV_VAR: &str = "RETRO_SHELF_GITHUB_TOKEN";

/// User-configured sync state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSettings {
    /// The pasted share link used for pull (and gist-id extraction for push).
    pub cloud_sync_url: Option<String>,
    /// Personal access token with the gist scope.
    pub github_token: Option<String>,
    /// RFC 3339 time of the last successful pull or push.
    pub last_sync_timestamp: Option<String>,
    /// Message from the most recent failed push, shown on the stats screen
    /// until a sync succeeds.
    pub last_push_error: Option<String>,
}

/// TOML config file format.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    sync: Option<SyncSection>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct SyncSection {
    cloud_sync_url: Option<String>,
    github_token: Option<String>,
    last_sync_timestamp: Option<String>,
    last_push_error: Option<String>,
}

/// Return the path to the sync settings file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("retro-shelf").join("sync.toml"))
}

impl SyncSettings {
    /// Load settings from the config file, applying env overrides.
    ///
    /// A missing file yields defaults; this is not an error.
    pub fn load() -> Self {
        let section = config_path()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|content| toml::from_str::<ConfigFile>(&content).ok())
            .and_then(|config| config.sync)
            .unwrap_or_default();

        let github_token = std::env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|t| !t.is_empty())
            .or(section.github_token);

        Self {
            cloud_sync_url: section.cloud_sync_url,
            github_token,
            last_sync_timestamp: section.last_sync_timestamp,
            last_push_error: section.last_push_error,
        }
    }

    /// Save settings to the config file, creating parent directories as
    /// needed. Returns the path written to.
    pub fn save(&self) -> Result<PathBuf, SyncError> {
        let path = config_path()
            .ok_or_else(|| SyncError::Config("could not determine config directory".to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let config = ConfigFile {
            sync: Some(SyncSection {
                cloud_sync_url: self.cloud_sync_url.clone(),
                github_token: self.github_token.clone(),
                last_sync_timestamp: self.last_sync_timestamp.clone(),
                last_push_error: self.last_push_error.clone(),
            }),
        };

        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| SyncError::Config(format!("failed to serialize settings: {e}")))?;
        std::fs::write(&path, toml_str)?;
        Ok(path)
    }

    /// Record a successful sync: stamps the timestamp, clears any stale
    /// push error, and persists.
    pub fn record_sync_success(&mut self) -> Result<(), SyncError> {
        self.last_sync_timestamp = Some(chrono::Utc::now().to_rfc3339());
        self.last_push_error = None;
        self.save()?;
        Ok(())
    }

    /// Record a failed push so the stats screen can surface it. Saving is
    /// best-effort; a failure here only logs (background syncs must never
    /// interrupt the user).
    pub fn record_push_error(&mut self, message: &str) {
        self.last_push_error = Some(message.to_string());
        if let Err(e) = self.save() {
            log::warn!("could not persist push error: {e}");
        }
    }
}
