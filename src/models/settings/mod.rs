// Settings module
// User-tunable agenda layout and scheduling policy

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::models::booking::MIN_DURATION_MINUTES;
use crate::models::resource::{default_roster, Resource};
use crate::services::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgendaSettings {
    /// "light" or "dark"
    pub theme: String,
    /// First hour shown at the top of the day canvas
    pub start_hour: u32,
    /// Hour at the bottom edge of the canvas
    pub end_hour: u32,
    pub pixels_per_hour: f32,
    /// Grid step used when snapping pointer positions and durations
    pub snap_minutes: u32,
    /// Duration given to bookings created without an explicit one
    pub default_duration_minutes: u32,
    /// Reject resizes that would overlap another booking on the same resource
    pub resize_conflict_check: bool,
    /// Optional JSON agenda loaded at startup instead of the demo data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixture_path: Option<PathBuf>,
    pub resources: Vec<Resource>,
}

impl Default for AgendaSettings {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            start_hour: 8,
            end_hour: 20,
            pixels_per_hour: 120.0,
            snap_minutes: 15,
            default_duration_minutes: 30,
            resize_conflict_check: true,
            fixture_path: None,
            resources: default_roster(),
        }
    }
}

impl AgendaSettings {
    pub fn is_dark(&self) -> bool {
        self.theme.eq_ignore_ascii_case("dark")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.end_hour <= self.start_hour || self.end_hour > 24 {
            return Err(ConfigError::InvalidWindow {
                start_hour: self.start_hour,
                end_hour: self.end_hour,
            });
        }
        if self.pixels_per_hour.is_nan() || self.pixels_per_hour <= 0.0 {
            return Err(ConfigError::InvalidScale(self.pixels_per_hour));
        }
        if self.snap_minutes == 0 || self.snap_minutes > 60 {
            return Err(ConfigError::InvalidSnap(self.snap_minutes));
        }
        if self.default_duration_minutes < MIN_DURATION_MINUTES {
            return Err(ConfigError::InvalidDefaultDuration(
                self.default_duration_minutes,
            ));
        }
        if self.resources.is_empty() {
            return Err(ConfigError::NoResources);
        }

        let mut seen = HashSet::new();
        for resource in &self.resources {
            resource.validate().map_err(ConfigError::InvalidResource)?;
            if !seen.insert(resource.id) {
                return Err(ConfigError::DuplicateResource(resource.id));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resource::ResourceId;

    #[test]
    fn test_defaults_match_clinic_agenda() {
        let settings = AgendaSettings::default();
        assert_eq!(settings.start_hour, 8);
        assert_eq!(settings.end_hour, 20);
        assert_eq!(settings.pixels_per_hour, 120.0);
        assert_eq!(settings.snap_minutes, 15);
        assert!(settings.resize_conflict_check);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_window() {
        let settings = AgendaSettings {
            start_hour: 20,
            end_hour: 8,
            ..Default::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ConfigError::InvalidWindow {
                start_hour: 20,
                end_hour: 8
            })
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_resource() {
        let mut settings = AgendaSettings::default();
        settings.resources.push(Resource::professional(1, "Dr. Copy"));
        assert_eq!(
            settings.validate(),
            Err(ConfigError::DuplicateResource(ResourceId(1)))
        );
    }

    #[test]
    fn test_validate_rejects_zero_snap_and_scale() {
        let settings = AgendaSettings {
            snap_minutes: 0,
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::InvalidSnap(0)));

        let settings = AgendaSettings {
            pixels_per_hour: 0.0,
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::InvalidScale(0.0)));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: AgendaSettings = toml::from_str("theme = \"dark\"\nend_hour = 18\n").unwrap();
        assert!(settings.is_dark());
        assert_eq!(settings.end_hour, 18);
        assert_eq!(settings.start_hour, 8);
        assert_eq!(settings.resources.len(), 3);
    }
}
