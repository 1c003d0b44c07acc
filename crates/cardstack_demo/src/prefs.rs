//! Demo preferences
//!
//! Stored as `cardstack-demo.toml` next to where the demo runs. Spacing is
//! kept in dp, the unit a user types into the settings card, and converted
//! to pixels only when the stack is configured.

use anyhow::{bail, Context, Result};
use cardstack::config::{
    CARD_GAP_BOTTOM_DEFAULT, CARD_GAP_DEFAULT, PARALLAX_ENABLED_DEFAULT, PARALLAX_SCALE_DEFAULT,
    SHOW_INIT_ANIMATION_DEFAULT,
};
use cardstack::{CardStackConfig, DisplayMetrics};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default preferences file name
pub const PREFS_FILE: &str = "cardstack-demo.toml";

pub const REVERSE_CLICK_ANIMATION_DEFAULT: bool = false;

/// Everything the settings card lets a user change
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoPrefs {
    pub show_init_animation: bool,
    pub parallax_enabled: bool,
    pub parallax_scale: i32,
    /// Resting gap between cards, in dp
    pub card_gap: i32,
    /// Gap between collapsed cards, in dp
    pub card_gap_bottom: i32,
    /// Stack the cards above a selected one at the top instead of the bottom
    pub reverse_click_animation: bool,
}

impl Default for DemoPrefs {
    fn default() -> Self {
        Self {
            show_init_animation: SHOW_INIT_ANIMATION_DEFAULT,
            parallax_enabled: PARALLAX_ENABLED_DEFAULT,
            parallax_scale: PARALLAX_SCALE_DEFAULT,
            card_gap: CARD_GAP_DEFAULT as i32,
            card_gap_bottom: CARD_GAP_BOTTOM_DEFAULT as i32,
            reverse_click_animation: REVERSE_CLICK_ANIMATION_DEFAULT,
        }
    }
}

impl DemoPrefs {
    /// Load preferences, falling back to defaults when the file is missing
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No preferences at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let prefs: DemoPrefs = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        prefs
            .validate()
            .with_context(|| format!("Invalid preferences in {}", path.display()))?;
        Ok(prefs)
    }

    /// Write preferences, replacing the file
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize preferences")?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Overwrite the file with defaults
    pub fn reset_defaults(path: &Path) -> Result<Self> {
        let prefs = Self::default();
        prefs.save(path)?;
        tracing::info!("Preferences reset to defaults");
        Ok(prefs)
    }

    /// Reject values the stack cannot lay out
    pub fn validate(&self) -> Result<()> {
        if self.card_gap < 0 {
            bail!("card_gap must not be negative (got {})", self.card_gap);
        }
        if self.card_gap_bottom < 0 {
            bail!(
                "card_gap_bottom must not be negative (got {})",
                self.card_gap_bottom
            );
        }
        Ok(())
    }

    /// Stack configuration in pixels for a display
    pub fn to_config(&self, metrics: &DisplayMetrics) -> CardStackConfig {
        let mut config = CardStackConfig::default()
            .card_gap(metrics.dp(self.card_gap as f32))
            .card_gap_bottom(metrics.dp(self.card_gap_bottom as f32))
            .show_init_animation(self.show_init_animation);
        config.parallax_enabled = self.parallax_enabled;
        config.parallax_scale = self.parallax_scale;
        config
    }
}
