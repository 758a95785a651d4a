//! Ordered-rule gesture classification.
//!
//! [`RULES`] is a priority list: the first rule whose predicate holds decides
//! the label, and [`GestureLabel::Unknown`] is the fallback.  Victory is
//! checked before OK, so a V-sign with the thumb touching the index tip is
//! still a Victory.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::finger::{extract, Finger, FingerState, HandFeatures};
use crate::landmark::HandLandmarks;

/// Default thumb-index distance below which a hand reads as OK.
pub const DEFAULT_OK_DISTANCE: f32 = 0.05;

// ════════════════════════════════════════════════════════════════════════════
// GestureLabel
// ════════════════════════════════════════════════════════════════════════════

/// The closed set of per-frame classification results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GestureLabel {
    Victory,
    Ok,
    Fist,
    OpenPalm,
    ThumbsUp,
    Unknown,
    NoHand,
}

impl GestureLabel {
    pub const ALL: [GestureLabel; 7] = [
        GestureLabel::Victory,
        GestureLabel::Ok,
        GestureLabel::Fist,
        GestureLabel::OpenPalm,
        GestureLabel::ThumbsUp,
        GestureLabel::Unknown,
        GestureLabel::NoHand,
    ];

    /// Stable machine name, identical to the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Victory  => "victory",
            Self::Ok       => "ok",
            Self::Fist     => "fist",
            Self::OpenPalm => "open-palm",
            Self::ThumbsUp => "thumbs-up",
            Self::Unknown  => "unknown",
            Self::NoHand   => "no-hand",
        }
    }

    /// Human-readable name for overlays and logs.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Victory  => "Victory",
            Self::Ok       => "OK",
            Self::Fist     => "Fist",
            Self::OpenPalm => "Open Palm",
            Self::ThumbsUp => "Thumbs Up",
            Self::Unknown  => "Unknown",
            Self::NoHand   => "No Hand Detected",
        }
    }

    /// True for the labels that come out of the rule list proper.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unknown | Self::NoHand)
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ClassifierConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("ok_distance_threshold must be a finite value >= 0, got {0}")]
    InvalidThreshold(f32),
}

/// Tunable classifier constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Strict upper bound on the normalized thumb-index distance for OK.
    pub ok_distance_threshold: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig { ok_distance_threshold: DEFAULT_OK_DISTANCE }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = self.ok_distance_threshold;
        if t.is_finite() && t >= 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidThreshold(t))
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Rules
// ════════════════════════════════════════════════════════════════════════════

/// One entry of the priority list.
#[derive(Clone, Copy)]
pub struct Rule {
    pub label:     GestureLabel,
    pub predicate: fn(&HandFeatures, &ClassifierConfig) -> bool,
}

impl Rule {
    pub fn matches(&self, features: &HandFeatures, config: &ClassifierConfig) -> bool {
        (self.predicate)(features, config)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("label", &self.label).finish_non_exhaustive()
    }
}

fn is_victory(h: &HandFeatures, _: &ClassifierConfig) -> bool {
    let s = &h.fingers;
    s[Finger::Index] && s[Finger::Middle] && !s[Finger::Ring] && !s[Finger::Pinky]
}

// Reads no finger state at all.
fn is_ok(h: &HandFeatures, cfg: &ClassifierConfig) -> bool {
    h.thumb_index_distance < cfg.ok_distance_threshold
}

fn is_fist(h: &HandFeatures, _: &ClassifierConfig) -> bool {
    h.fingers.none_extended()
}

fn is_open_palm(h: &HandFeatures, _: &ClassifierConfig) -> bool {
    h.fingers.all_extended()
}

fn is_thumbs_up(h: &HandFeatures, _: &ClassifierConfig) -> bool {
    h.fingers.only_thumb()
}

/// Evaluated top to bottom, first match wins.
pub const RULES: [Rule; 5] = [
    Rule { label: GestureLabel::Victory,  predicate: is_victory   },
    Rule { label: GestureLabel::Ok,       predicate: is_ok        },
    Rule { label: GestureLabel::Fist,     predicate: is_fist      },
    Rule { label: GestureLabel::OpenPalm, predicate: is_open_palm },
    Rule { label: GestureLabel::ThumbsUp, predicate: is_thumbs_up },
];

// ════════════════════════════════════════════════════════════════════════════
// GestureClassifier
// ════════════════════════════════════════════════════════════════════════════

/// Stateless classifier; holding one only pins the config.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureClassifier {
    config: ClassifierConfig,
}

impl GestureClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(GestureClassifier { config })
    }

    pub fn config(&self) -> &ClassifierConfig { &self.config }

    pub fn classify(&self, fingers: FingerState, thumb_index_distance: f32) -> GestureLabel {
        self.classify_features(&HandFeatures { fingers, thumb_index_distance })
    }

    pub fn classify_features(&self, features: &HandFeatures) -> GestureLabel {
        RULES
            .iter()
            .find(|rule| rule.matches(features, &self.config))
            .map(|rule| rule.label)
            .unwrap_or(GestureLabel::Unknown)
    }

    /// Extract then classify.
    pub fn classify_hand(&self, hand: &HandLandmarks) -> (HandFeatures, GestureLabel) {
        let features = extract(hand);
        (features, self.classify_features(&features))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::*;

    const FAR: f32 = 0.3;

    fn classify(states: [bool; 5], dist: f32) -> GestureLabel {
        GestureClassifier::default().classify(FingerState(states), dist)
    }

    fn rule(label: GestureLabel) -> Rule {
        *RULES.iter().find(|r| r.label == label).unwrap()
    }

    // ── Rule order ───────────────────────────────────────────────────────

    #[test]
    fn rule_order_is_fixed() {
        let order: Vec<_> = RULES.iter().map(|r| r.label).collect();
        assert_eq!(order, [
            GestureLabel::Victory,
            GestureLabel::Ok,
            GestureLabel::Fist,
            GestureLabel::OpenPalm,
            GestureLabel::ThumbsUp,
        ]);
    }

    #[test]
    fn victory_ignores_thumb_and_distance() {
        for thumb in [false, true] {
            for dist in [0.0, 0.01, 0.05, FAR] {
                assert_eq!(classify([thumb, true, true, false, false], dist), GestureLabel::Victory);
            }
        }
    }

    #[test]
    fn victory_beats_ok_when_both_hold() {
        let cfg = ClassifierConfig::default();
        let h = HandFeatures {
            fingers: FingerState([false, true, true, false, false]),
            thumb_index_distance: 0.01,
        };
        assert!(rule(GestureLabel::Victory).matches(&h, &cfg));
        assert!(rule(GestureLabel::Ok).matches(&h, &cfg));
        assert_eq!(GestureClassifier::default().classify_features(&h), GestureLabel::Victory);
    }

    #[test]
    fn ok_for_any_non_victory_pattern() {
        for bits in 0u8..32 {
            let s = [bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0, bits & 16 != 0];
            let victory = s[1] && s[2] && !s[3] && !s[4];
            if !victory {
                assert_eq!(classify(s, 0.049), GestureLabel::Ok, "states {:?}", s);
            }
        }
    }

    #[test]
    fn ok_threshold_is_strict() {
        assert_eq!(classify([false; 5], 0.05), GestureLabel::Fist);
        assert_eq!(classify([true, true, false, false, false], 0.05), GestureLabel::Unknown);
        assert_eq!(classify([true, true, false, false, false], 0.0499), GestureLabel::Ok);
    }

    #[test]
    fn fist_and_open_palm() {
        assert_eq!(classify([false; 5], FAR), GestureLabel::Fist);
        assert_eq!(classify([true; 5],  FAR), GestureLabel::OpenPalm);
    }

    #[test]
    fn thumbs_up_exact_vector() {
        assert_eq!(classify([true, false, false, false, false], FAR), GestureLabel::ThumbsUp);
    }

    #[test]
    fn unmatched_falls_back_to_unknown() {
        assert_eq!(classify([true, true, false, false, false], FAR), GestureLabel::Unknown);
        assert_eq!(classify([false, true, false, false, false], FAR), GestureLabel::Unknown);
        assert_eq!(classify([false, true, true, true, false], FAR), GestureLabel::Unknown);
    }

    #[test]
    fn late_rules_are_mutually_exclusive() {
        let cfg = ClassifierConfig::default();
        let late = [GestureLabel::Fist, GestureLabel::OpenPalm, GestureLabel::ThumbsUp];
        for bits in 0u8..32 {
            let s = [bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0, bits & 16 != 0];
            let h = HandFeatures { fingers: FingerState(s), thumb_index_distance: FAR };
            let hits = late.iter().filter(|&&l| rule(l).matches(&h, &cfg)).count();
            assert!(hits <= 1, "states {:?} matched {} late rules", s, hits);
        }
    }

    #[test]
    fn classify_is_idempotent() {
        let c = GestureClassifier::default();
        let s = FingerState([true, false, true, false, true]);
        assert_eq!(c.classify(s, 0.2), c.classify(s, 0.2));
    }

    // ── Config ───────────────────────────────────────────────────────────

    #[test]
    fn custom_threshold_moves_ok_boundary() {
        let c = GestureClassifier::new(ClassifierConfig { ok_distance_threshold: 0.1 }).unwrap();
        assert_eq!(c.classify(FingerState([false; 5]), 0.08), GestureLabel::Ok);
    }

    #[test]
    fn invalid_thresholds_rejected() {
        for t in [-0.01, f32::NAN, f32::INFINITY] {
            assert!(GestureClassifier::new(ClassifierConfig { ok_distance_threshold: t }).is_err());
        }
    }

    #[test]
    fn config_defaults_from_empty_json() {
        let cfg: ClassifierConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.ok_distance_threshold, DEFAULT_OK_DISTANCE);
    }

    // ── Labels ───────────────────────────────────────────────────────────

    #[test]
    fn label_names_match_serde() {
        for label in GestureLabel::ALL {
            let json = serde_json::to_string(&label).unwrap();
            assert_eq!(json, format!("\"{}\"", label.as_str()));
        }
        assert_eq!(GestureLabel::Ok.to_string(), "OK");
        assert_eq!(GestureLabel::NoHand.to_string(), "No Hand Detected");
    }

    // ── Through landmarks ────────────────────────────────────────────────

    #[test]
    fn classify_hand_thumbs_up() {
        let mut pts = [Landmark::new(0.5, 0.5); LANDMARK_COUNT];
        pts[THUMB_IP]  = Landmark::new(0.5, 0.6);
        pts[THUMB_TIP] = Landmark::new(0.6, 0.6);
        for (tip, pip) in [(INDEX_TIP, INDEX_PIP), (MIDDLE_TIP, MIDDLE_PIP),
                           (RING_TIP, RING_PIP), (PINKY_TIP, PINKY_PIP)] {
            pts[pip] = Landmark::new(0.4, 0.5);
            pts[tip] = Landmark::new(0.4, 0.7);
        }
        let (features, label) = GestureClassifier::default().classify_hand(&HandLandmarks::new(pts));
        assert_eq!(features.fingers, FingerState([true, false, false, false, false]));
        assert_eq!(label, GestureLabel::ThumbsUp);
    }
}
