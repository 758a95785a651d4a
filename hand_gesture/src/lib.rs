//! # hand_gesture
//!
//! Static hand-gesture recognition over one set of 21 normalized landmarks.
//! Each call is independent: nothing is remembered between frames.
//!
//! ## Pipeline
//!
//! ```text
//! HandLandmarks ──extract──▶ HandFeatures { FingerState, distance } ──classify──▶ GestureLabel
//! ```
//!
//! ## Rules (first match wins)
//!
//! | # | Label | Condition |
//! |---|---|---|
//! | 1 | Victory | index ∧ middle ∧ ¬ring ∧ ¬pinky (thumb ignored) |
//! | 2 | OK | thumb-index distance < 0.05 |
//! | 3 | Fist | no finger extended |
//! | 4 | Open Palm | all five extended |
//! | 5 | Thumbs Up | thumb only |
//! | – | Unknown | otherwise |
//!
//! `NoHand` is never produced here; it is the caller's label for a frame in
//! which the detector found nothing.
//!
//! ## Quick start
//!
//! ```rust
//! use hand_gesture::{FingerState, GestureClassifier, GestureLabel};
//!
//! let classifier = GestureClassifier::default();
//! let label = classifier.classify(FingerState([true, false, false, false, false]), 0.3);
//! assert_eq!(label, GestureLabel::ThumbsUp);
//! ```

pub mod landmark;
pub mod finger;
pub mod classify;

pub use landmark::{HandLandmarks, Landmark, LandmarkError, HAND_CONNECTIONS, LANDMARK_COUNT};
pub use finger::{extract, Finger, FingerState, HandFeatures};
pub use classify::{
    ClassifierConfig, ConfigError, GestureClassifier, GestureLabel, Rule, DEFAULT_OK_DISTANCE,
    RULES,
};
