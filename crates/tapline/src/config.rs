#![forbid(unsafe_code)]

//! Interaction configuration as data.
//!
//! Captures every tunable of the gesture recognizer and the selection store
//! as a single [`InteractionConfig`] that can be loaded from TOML or JSON at
//! startup.
//!
//! # Loading
//!
//! ```toml
//! # tapline.toml
//! [gesture]
//! touch_slop = 12.0
//! long_press_timeout_ms = 650
//!
//! [selection]
//! search_window = 40
//! ```
//!
//! ```rust,ignore
//! let config = InteractionConfig::from_toml_file("tapline.toml")?.validated()?;
//! let interaction = ListInteraction::new(
//!     config.to_gesture_config(),
//!     config.to_selection_config(),
//! );
//! ```
//!
//! # Defaults
//!
//! Every field defaults to the matching `GestureConfig` / `SelectionConfig`
//! default, so a missing section or key changes nothing.

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use tapline_core::GestureConfig;
use tapline_selection::{DEFAULT_SEARCH_WINDOW, SelectionConfig};

// ---------------------------------------------------------------------------
// Top-level InteractionConfig
// ---------------------------------------------------------------------------

/// Gesture and selection tuning for a list surface.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct InteractionConfig {
    /// Gesture recognizer thresholds and timeouts.
    pub gesture: GesturePolicyConfig,

    /// Selection store tuning.
    pub selection: SelectionPolicyConfig,
}

impl InteractionConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors: Vec<String> = self
            .to_gesture_config()
            .validate()
            .into_iter()
            .map(|e| format!("gesture.{e}"))
            .collect();

        if self.gesture.long_press_enabled && self.gesture.long_press_timeout_ms == 0 {
            errors.push("gesture.long_press_timeout_ms must be > 0 when long press is enabled".into());
        }

        errors
    }

    /// [`validate`](Self::validate), turning problems into an error.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Build the recognizer configuration.
    #[must_use]
    pub fn to_gesture_config(&self) -> GestureConfig {
        let g = &self.gesture;
        GestureConfig {
            touch_slop: g.touch_slop,
            double_tap_slop: g.double_tap_slop,
            tap_timeout: Duration::from_millis(g.tap_timeout_ms),
            long_press_timeout: Duration::from_millis(g.long_press_timeout_ms),
            double_tap_timeout: Duration::from_millis(g.double_tap_timeout_ms),
            min_fling_velocity: g.min_fling_velocity,
            max_fling_velocity: g.max_fling_velocity,
            long_press_enabled: g.long_press_enabled,
            double_tap_enabled: g.double_tap_enabled,
        }
    }

    /// Build the selection store configuration.
    #[must_use]
    pub fn to_selection_config(&self) -> SelectionConfig {
        SelectionConfig {
            search_window: self.selection.search_window,
            notify_all_selected: self.selection.notify_all_selected,
        }
    }

    /// Format as a JSONL line for structured logging.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        format!(
            r#"{{"schema":"interaction-config-v1","touch_slop":{},"double_tap_slop":{},"tap_timeout_ms":{},"long_press_timeout_ms":{},"double_tap_timeout_ms":{},"max_fling_velocity":{},"search_window":{}}}"#,
            self.gesture.touch_slop,
            self.gesture.double_tap_slop,
            self.gesture.tap_timeout_ms,
            self.gesture.long_press_timeout_ms,
            self.gesture.double_tap_timeout_ms,
            self.gesture.max_fling_velocity,
            self.selection.search_window,
        )
    }
}

// ---------------------------------------------------------------------------
// Sub-configs (flat, serde-friendly)
// ---------------------------------------------------------------------------

/// Gesture recognizer parameters. Durations are in milliseconds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct GesturePolicyConfig {
    /// Tap-to-scroll threshold in pixels. Default: 8.
    pub touch_slop: f32,
    /// Maximum distance between double-tap downs in pixels. Default: 100.
    pub double_tap_slop: f32,
    /// Pressed feedback delay. Default: 100.
    pub tap_timeout_ms: u64,
    /// Hold time after the pressed delay before a long press. Default: 500.
    pub long_press_timeout_ms: u64,
    /// Double-tap window. Default: 300.
    pub double_tap_timeout_ms: u64,
    /// Minimum fling speed in pixels/sec. Default: 50.
    pub min_fling_velocity: f32,
    /// Fling speed clamp in pixels/sec. Default: 8000.
    pub max_fling_velocity: f32,
    /// Default: true.
    pub long_press_enabled: bool,
    /// Default: true.
    pub double_tap_enabled: bool,
}

impl Default for GesturePolicyConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            double_tap_slop: 100.0,
            tap_timeout_ms: 100,
            long_press_timeout_ms: 500,
            double_tap_timeout_ms: 300,
            min_fling_velocity: 50.0,
            max_fling_velocity: 8_000.0,
            long_press_enabled: true,
            double_tap_enabled: true,
        }
    }
}

/// Selection store parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SelectionPolicyConfig {
    /// Reconciliation search window in positions. Default: 20.
    pub search_window: usize,
    /// Report "all selected" transitions. Default: true.
    pub notify_all_selected: bool,
}

impl Default for SelectionPolicyConfig {
    fn default() -> Self {
        Self {
            search_window: DEFAULT_SEARCH_WINDOW,
            notify_all_selected: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading an interaction configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
