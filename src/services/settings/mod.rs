//! Settings stored as `agenda.toml` in the platform config directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::AgendaSettings;

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service bound to the platform config location.
    pub fn at_default_location() -> Self {
        Self::new(Self::default_path())
    }

    pub fn default_path() -> PathBuf {
        if let Some(dirs) = ProjectDirs::from("com", "ClinicAgenda", "Agenda") {
            dirs.config_dir().join("agenda.toml")
        } else {
            log::warn!("Unable to resolve project directory; using current dir for settings");
            PathBuf::from("agenda.toml")
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings. A missing file yields defaults; an unreadable or
    /// invalid one is logged and replaced by defaults.
    pub fn load(&self) -> AgendaSettings {
        if !self.path.exists() {
            log::info!(
                "No settings at {}; using defaults",
                self.path.display()
            );
            return AgendaSettings::default();
        }

        match self.read() {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("Failed to load settings: {err:?}");
                AgendaSettings::default()
            }
        }
    }

    /// Strict load used by `load`, surfacing parse and validation errors.
    pub fn read(&self) -> Result<AgendaSettings> {
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read settings from {}", self.path.display()))?;
        let settings: AgendaSettings = toml::from_str(&data)
            .with_context(|| format!("failed to parse settings in {}", self.path.display()))?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", self.path.display(), e))?;
        Ok(settings)
    }

    pub fn save(&self, settings: &AgendaSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }

        let data = toml::to_string_pretty(settings).context("failed to serialize settings")?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write settings to {}", self.path.display()))?;
        log::info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}
