//! Dashboard host backed by a JSON file.
//!
//! The configuration is written to a sibling temporary file first and then
//! renamed over the target, so a crash mid-save never leaves a truncated
//! config behind.

use super::{Chrome, DashboardApi, HostError, HostResult, RegisterWidgetApi, WidgetConfig};
use crate::widget::WidgetHooks;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Host that persists the configuration in a JSON file.
#[derive(Debug, Clone)]
pub struct FileDashboard {
    path: PathBuf,
    chrome: Chrome,
}

impl FileDashboard {
    /// A host storing its configuration at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            chrome: Chrome::new(),
        }
    }

    /// The configuration file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Shared handle on the host chrome.
    pub fn chrome(&self) -> Chrome {
        self.chrome.clone()
    }

    /// Deletes the stored configuration, if any.
    pub async fn reset(&self) -> HostResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(HostError::storage(&self.path, e)),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "widget.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl DashboardApi for FileDashboard {
    async fn read_config(&self) -> HostResult<Option<WidgetConfig>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no stored widget configuration");
                return Ok(None);
            }
            Err(e) => return Err(HostError::storage(&self.path, e)),
        };
        let config: WidgetConfig = serde_json::from_str(&raw)?;
        // The title is derived from the stored config, so a fresh host shows
        // it before the next save.
        if self.chrome.title().is_none() {
            self.chrome.set_title(&config.title_for_host());
        }
        Ok(Some(config))
    }

    async fn store_config(&self, config: WidgetConfig) -> HostResult<()> {
        let json = serde_json::to_string_pretty(&config)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| HostError::storage(parent, e))?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| HostError::storage(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| HostError::storage(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), "widget configuration stored");
        self.chrome.set_config_mode(false);
        Ok(())
    }

    fn enter_config_mode(&self) {
        tracing::debug!("host entering configuration mode");
        self.chrome.set_config_mode(true);
    }

    async fn exit_config_mode(&self) -> HostResult<()> {
        tracing::debug!("host leaving configuration mode");
        self.chrome.set_config_mode(false);
        Ok(())
    }

    fn set_title(&self, title: &str) {
        tracing::info!(title, "widget title changed");
        self.chrome.set_title(title);
    }

    fn remove_widget(&self) {
        tracing::info!(path = %self.path.display(), "widget removed from dashboard");
        self.chrome.mark_removed();
    }
}

impl RegisterWidgetApi for FileDashboard {
    fn register(&self, hooks: WidgetHooks) {
        self.chrome.register(hooks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn config() -> WidgetConfig {
        WidgetConfig {
            countdown_date_time: Utc.with_ymd_and_hms(2029, 12, 24, 18, 0, 0).unwrap(),
            countdown_title: "Holidays".to_string(),
            total_diff_ms: Some(3_600_000),
            show_seconds: true,
        }
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_unconfigured() {
        let dir = tempfile::tempdir().unwrap();
        let host = FileDashboard::new(dir.path().join("widget.json"));
        assert_eq!(host.read_config().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_creates_parent_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("widget.json");
        let host = FileDashboard::new(&path);

        host.store_config(config()).await.unwrap();
        assert!(path.exists());
        assert!(!host.temp_path().exists());
        assert_eq!(host.read_config().await.unwrap(), Some(config()));
    }

    #[tokio::test]
    async fn test_restarted_host_restores_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("widget.json");
        FileDashboard::new(&path).store_config(config()).await.unwrap();

        let restarted = FileDashboard::new(&path);
        assert_eq!(restarted.chrome().title(), None);
        restarted.read_config().await.unwrap();
        assert_eq!(
            restarted.chrome().title().as_deref(),
            Some("Time to: Holidays")
        );

        // A title set since then is not overwritten by later reads.
        restarted.set_title("Time to: Other");
        restarted.read_config().await.unwrap();
        assert_eq!(restarted.chrome().title().as_deref(), Some("Time to: Other"));
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("widget.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FileDashboard::new(&path).read_config().await.unwrap_err();
        assert!(matches!(err, HostError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_reset_removes_config() {
        let dir = tempfile::tempdir().unwrap();
        let host = FileDashboard::new(dir.path().join("widget.json"));
        host.store_config(config()).await.unwrap();

        host.reset().await.unwrap();
        assert_eq!(host.read_config().await.unwrap(), None);
        // Resetting twice is fine.
        host.reset().await.unwrap();
    }

    #[test]
    fn test_chrome_tracks_title_and_removal() {
        let host = FileDashboard::new("unused.json");
        host.set_title("Time to: Holidays");
        host.remove_widget();

        let chrome = host.chrome();
        assert_eq!(chrome.title().as_deref(), Some("Time to: Holidays"));
        assert!(chrome.removed());
    }
}
