//! Engine configuration.
//!
//! Every field has a default matching a US-letter sheet at 96 dpi, so an
//! empty JSON object (or no config at all) yields a working engine.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};

// ─── Config ───────────────────────────────────────────────────────────────

/// Layout, pagination, zoom and export parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Sheet width in document units. Default: **816**.
    pub page_width: f32,
    /// Sheet height in document units. Default: **1056**.
    pub page_height: f32,
    /// Distance above the last page's bottom edge at which drawing adds
    /// a page. Default: **200**.
    pub grow_margin: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub zoom_step: f32,
    /// Blank border around the cropped ink in image export. Default: **20**.
    pub export_padding: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_width: 816.0,
            page_height: 1056.0,
            grow_margin: 200.0,
            min_zoom: 0.5,
            max_zoom: 3.0,
            zoom_step: 0.1,
            export_padding: 20.0,
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON config. Missing keys keep defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if !(self.page_width > 0.0 && self.page_height > 0.0) {
            return Err(CoreError::InvalidConfig(format!(
                "page size must be positive, got {}x{}",
                self.page_width, self.page_height
            )));
        }
        if !(self.grow_margin >= 0.0 && self.grow_margin < self.page_height) {
            return Err(CoreError::InvalidConfig(format!(
                "grow margin {} must lie in [0, page height)",
                self.grow_margin
            )));
        }
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom) {
            return Err(CoreError::InvalidConfig(format!(
                "zoom range {}..{} is empty or non-positive",
                self.min_zoom, self.max_zoom
            )));
        }
        Ok(())
    }

    /// Total over any config: an inverted range resolves to `max_zoom`,
    /// NaN bounds are ignored, and a non-positive result falls back to 1.
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        let zoom = zoom.max(self.min_zoom).min(self.max_zoom);
        if zoom.is_finite() && zoom > 0.0 { zoom } else { 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_json_is_default() {
        assert_eq!(EngineConfig::from_json("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn partial_json_overrides() {
        let config = EngineConfig::from_json(r#"{"pageHeight": 800, "growMargin": 100}"#).unwrap();
        assert_eq!(config.page_height, 800.0);
        assert_eq!(config.grow_margin, 100.0);
        assert_eq!(config.page_width, 816.0);
    }

    #[test]
    fn rejects_margin_past_page() {
        let err = EngineConfig::from_json(r#"{"pageHeight": 100, "growMargin": 200}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_bad_json() {
        assert!(matches!(
            EngineConfig::from_json("{pageHeight"),
            Err(CoreError::Json(_))
        ));
    }

    #[test]
    fn zoom_clamped_to_toolbar_range() {
        let config = EngineConfig::default();
        assert_eq!(config.clamp_zoom(0.1), 0.5);
        assert_eq!(config.clamp_zoom(1.7), 1.7);
        assert_eq!(config.clamp_zoom(9.0), 3.0);
    }

    #[test]
    fn clamp_zoom_survives_unvalidated_ranges() {
        let inverted = EngineConfig {
            min_zoom: 3.0,
            max_zoom: 0.5,
            ..EngineConfig::default()
        };
        assert!(inverted.validate().is_err());
        assert_eq!(inverted.clamp_zoom(1.0), 0.5);

        let nan = EngineConfig {
            min_zoom: f32::NAN,
            max_zoom: f32::NAN,
            ..EngineConfig::default()
        };
        assert_eq!(nan.clamp_zoom(2.0), 2.0);
        assert_eq!(nan.clamp_zoom(f32::NAN), 1.0);

        let zero = EngineConfig {
            min_zoom: 0.0,
            max_zoom: 0.0,
            ..EngineConfig::default()
        };
        assert_eq!(zero.clamp_zoom(2.0), 1.0);
    }
}
