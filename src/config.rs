//! Runtime configuration for the zoom gestures.
//!
//! Read once at startup from local storage (`pz_config`, JSON). Anything not
//! present falls back to the defaults below.

use serde::Deserialize;
use thiserror::Error;

use crate::state::AnimationSpec;

pub const CONFIG_STORAGE_KEY: &str = "pz_config";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no browser window available")]
    NoWindow,

    #[error("local storage unavailable: {0}")]
    Storage(String),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How a pan session treats the current zoom level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanPolicy {
    /// Pan moves the content only while zoomed in, for `began` and `changed` alike.
    #[default]
    RequireZoom,
    /// `began` always applies the translation; `changed` requires zoom.
    ReferenceParity,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub pinch_reset: AnimationSpec,
    pub pan_reset: AnimationSpec,
    pub pan_policy: PanPolicy,
    /// Touches beyond this count are ignored by the pan recognizer.
    pub max_pan_touches: u32,
    /// Centroid movement (px) before a pan session begins.
    pub pan_slop_px: f64,
    pub debug_log: bool,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            pinch_reset: AnimationSpec::default(),
            pan_reset: AnimationSpec::default(),
            pan_policy: PanPolicy::RequireZoom,
            max_pan_touches: 2,
            pan_slop_px: 4.0,
            debug_log: false,
        }
    }
}

impl ZoomConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: ZoomConfig = serde_json::from_str(raw)?;
        cfg.validate()
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        for (name, spec) in [("pinch_reset", &self.pinch_reset), ("pan_reset", &self.pan_reset)] {
            if !spec.duration_secs.is_finite() || spec.duration_secs < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name}.duration_secs must be a non-negative number, got {}",
                    spec.duration_secs
                )));
            }
        }
        if self.max_pan_touches == 0 {
            return Err(ConfigError::Invalid("max_pan_touches must be at least 1".into()));
        }
        if !self.pan_slop_px.is_finite() || self.pan_slop_px < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "pan_slop_px must be a non-negative number, got {}",
                self.pan_slop_px
            )));
        }
        Ok(self)
    }

    /// Load from local storage. A missing entry yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let win = web_sys::window().ok_or(ConfigError::NoWindow)?;
        let store = win
            .local_storage()
            .map_err(|e| ConfigError::Storage(format!("{e:?}")))?
            .ok_or_else(|| ConfigError::Storage("localStorage is disabled".into()))?;
        match store
            .get_item(CONFIG_STORAGE_KEY)
            .map_err(|e| ConfigError::Storage(format!("{e:?}")))?
        {
            Some(raw) => Self::from_json(&raw),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::animation::Easing;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = ZoomConfig::from_json("{}").unwrap();
        assert_eq!(cfg, ZoomConfig::default());
        assert_eq!(cfg.pan_policy, PanPolicy::RequireZoom);
        assert_eq!(cfg.max_pan_touches, 2);
    }

    #[test]
    fn partial_override() {
        let cfg = ZoomConfig::from_json(
            r#"{"pan_policy":"reference_parity","pinch_reset":{"duration_secs":0.5,"easing":"linear"}}"#,
        )
        .unwrap();
        assert_eq!(cfg.pan_policy, PanPolicy::ReferenceParity);
        assert_eq!(cfg.pinch_reset.duration_secs, 0.5);
        assert_eq!(cfg.pinch_reset.easing, Easing::Linear);
        assert_eq!(cfg.pan_reset, AnimationSpec::default());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(ZoomConfig::from_json("{nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn rejects_zero_pan_touches() {
        let err = ZoomConfig::from_json(r#"{"max_pan_touches":0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_negative_durations_and_slop() {
        assert!(ZoomConfig::from_json(r#"{"pan_reset":{"duration_secs":-1.0}}"#).is_err());
        assert!(ZoomConfig::from_json(r#"{"pan_slop_px":-2.0}"#).is_err());
    }
}
