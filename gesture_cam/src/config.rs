//! Optional JSON config file.
//!
//! ```json
//! {
//!   "classifier": { "ok_distance_threshold": 0.05 },
//!   "actions":    { "thumbs-up": "volume-up", "fist": "volume-mute" }
//! }
//! ```
//!
//! Both sections are optional.  A present `actions` map replaces the default
//! table as a whole.  The threshold is checked when the classifier is built,
//! after any command-line override.

use std::fs;
use std::path::{Path, PathBuf};

use gesture_actions::ActionTable;
use hand_gesture::{ClassifierConfig, GestureClassifier};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Classifier(#[from] hand_gesture::ConfigError),
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,
    pub actions:    ActionTable,
}

impl AppConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&text)
    }

    /// Override the OK threshold (e.g. from the command line).
    pub fn with_threshold(mut self, threshold: f32) -> Result<Self, ConfigError> {
        self.classifier.ok_distance_threshold = threshold;
        self.classifier.validate()?;
        Ok(self)
    }

    pub fn classifier(&self) -> Result<GestureClassifier, ConfigError> {
        Ok(GestureClassifier::new(self.classifier)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_actions::SystemAction;
    use hand_gesture::{GestureLabel, DEFAULT_OK_DISTANCE};

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = AppConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.classifier.ok_distance_threshold, DEFAULT_OK_DISTANCE);
        assert_eq!(cfg.actions, ActionTable::default());
    }

    #[test]
    fn actions_section_replaces_table() {
        let cfg = AppConfig::from_json_str(
            r#"{"classifier": {"ok_distance_threshold": 0.08},
                "actions": {"victory": "confirm-key"}}"#,
        ).unwrap();
        assert_eq!(cfg.classifier.ok_distance_threshold, 0.08);
        assert_eq!(cfg.actions.lookup(GestureLabel::Victory), Some(SystemAction::ConfirmKey));
        assert_eq!(cfg.actions.lookup(GestureLabel::ThumbsUp), None);
    }

    #[test]
    fn negative_threshold_rejected() {
        let cfg = AppConfig::from_json_str(r#"{"classifier": {"ok_distance_threshold": -1.0}}"#)
            .unwrap();
        assert!(matches!(cfg.classifier(), Err(ConfigError::Classifier(_))));
    }

    #[test]
    fn override_replaces_bad_file_threshold() {
        let cfg = AppConfig::from_json_str(r#"{"classifier": {"ok_distance_threshold": -1.0}}"#)
            .unwrap()
            .with_threshold(0.04)
            .unwrap();
        assert_eq!(cfg.classifier().unwrap().config().ok_distance_threshold, 0.04);
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(matches!(
            AppConfig::from_json_str(r#"{"classifer": {}}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn binding_unknown_label_rejected() {
        assert!(AppConfig::from_json_str(r#"{"actions": {"unknown": "volume-up"}}"#).is_err());
    }

    #[test]
    fn threshold_override() {
        let cfg = AppConfig::default().with_threshold(0.02).unwrap();
        assert_eq!(cfg.classifier().unwrap().config().ok_distance_threshold, 0.02);
        assert!(AppConfig::default().with_threshold(f32::NAN).is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AppConfig::load(Path::new("/nonexistent/gesture.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/gesture.json"));
    }
}
