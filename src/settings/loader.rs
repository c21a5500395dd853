use super::error::{SettingsError, SettingsResult};
use super::schema::Settings;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE_NAME: &str = "countdown.toml";
const SETTINGS_PATH_ENV: &str = "COUNTDOWN_SETTINGS";

const TICK_ENV: &str = "COUNTDOWN_TICK_MS";
const STORAGE_ENV: &str = "COUNTDOWN_STORAGE";
const LOG_ENV: &str = "COUNTDOWN_LOG";

const STORAGE_FILE_NAME: &str = "widget.json";
const LOG_FILE_NAME: &str = "countdown.log";

/// Platform directories for `countdown-widget`, if the platform has any.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "countdown-widget")
}

/// Loaded settings together with the file they came from.
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    /// The file read, or `None` when defaults were used.
    pub path: Option<PathBuf>,
    /// The validated result.
    pub settings: Settings,
}

impl SettingsLoader {
    /// Resolves, reads, overrides from the environment and validates.
    pub fn load(explicit: Option<&Path>) -> SettingsResult<Self> {
        let path = resolve_settings_path(explicit)?;
        let mut settings = match &path {
            Some(path) => load_from_file(path)?,
            None => Settings::default(),
        };
        apply_overrides(&mut settings, |var| std::env::var(var).ok())?;
        validate(&settings)?;

        tracing::debug!(path = ?path, "settings loaded");
        Ok(Self { path, settings })
    }

    /// Reads one file, without environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let path = path.as_ref().to_path_buf();
        let settings = load_from_file(&path)?;
        validate(&settings)?;
        Ok(Self {
            path: Some(path),
            settings,
        })
    }

    /// Built-in defaults, no file.
    pub fn with_defaults() -> Self {
        Self {
            path: None,
            settings: Settings::default(),
        }
    }

    /// The loaded settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Consumes the loader.
    pub fn into_settings(self) -> Settings {
        self.settings
    }

    /// Widget configuration file: the configured path, else the platform
    /// data directory, else the working directory.
    pub fn storage_path(&self) -> PathBuf {
        self.settings
            .storage
            .path
            .clone()
            .unwrap_or_else(|| data_file(STORAGE_FILE_NAME))
    }

    /// Log file: the configured path, else the platform data directory.
    pub fn log_path(&self) -> PathBuf {
        self.settings
            .logging
            .file
            .clone()
            .unwrap_or_else(|| data_file(LOG_FILE_NAME))
    }
}

fn data_file(name: &str) -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.data_dir().join(name),
        None => PathBuf::from(name),
    }
}

/// Picks the settings file to read, if any.
///
/// An explicitly named file must exist; the other locations are skipped
/// when missing.
pub fn resolve_settings_path(explicit: Option<&Path>) -> SettingsResult<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(SettingsError::NotFound(path.to_path_buf()));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let candidates = [
        std::env::var_os(SETTINGS_PATH_ENV).map(PathBuf::from),
        Some(PathBuf::from(SETTINGS_FILE_NAME)),
        project_dirs().map(|dirs| dirs.config_dir().join(SETTINGS_FILE_NAME)),
    ];
    Ok(candidates.into_iter().flatten().find(|p| p.exists()))
}

fn load_from_file(path: &Path) -> SettingsResult<Settings> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

fn apply_overrides<F>(settings: &mut Settings, lookup: F) -> SettingsResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup(TICK_ENV) {
        settings.widget.tick_interval_ms = val
            .trim()
            .parse()
            .map_err(|e| SettingsError::env(TICK_ENV, format!("{e}")))?;
    }
    if let Some(val) = lookup(STORAGE_ENV) {
        settings.storage.path = Some(PathBuf::from(val));
    }
    if let Some(val) = lookup(LOG_ENV) {
        settings.logging.file = Some(PathBuf::from(val));
    }
    Ok(())
}

fn validate(settings: &Settings) -> SettingsResult<()> {
    if settings.widget.tick_interval_ms == 0 {
        return Err(SettingsError::invalid(
            "widget.tick_interval_ms",
            "must be greater than zero",
        ));
    }
    if settings.widget.progress_width == 0 {
        return Err(SettingsError::invalid(
            "widget.progress_width",
            "must be greater than zero",
        ));
    }
    if settings.logging.level.trim().is_empty() {
        return Err(SettingsError::invalid("logging.level", "must not be empty"));
    }
    Ok(())
}
