//! Normalized hand landmarks and the standard 21-point hand skeleton.
//!
//! Coordinates are image fractions in `[0, 1] × [0, 1]`, `y` growing
//! downward.  The upstream detector is expected to have mirrored the image
//! horizontally so the view matches the user's own left/right.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ════════════════════════════════════════════════════════════════════════════
// Landmark indices
// ════════════════════════════════════════════════════════════════════════════

/// Number of landmarks per detected hand.
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST:      usize = 0;
pub const THUMB_CMC:  usize = 1;
pub const THUMB_MCP:  usize = 2;
pub const THUMB_IP:   usize = 3;
pub const THUMB_TIP:  usize = 4;
pub const INDEX_MCP:  usize = 5;
pub const INDEX_PIP:  usize = 6;
pub const INDEX_DIP:  usize = 7;
pub const INDEX_TIP:  usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP:   usize = 13;
pub const RING_PIP:   usize = 14;
pub const RING_DIP:   usize = 15;
pub const RING_TIP:   usize = 16;
pub const PINKY_MCP:  usize = 17;
pub const PINKY_PIP:  usize = 18;
pub const PINKY_DIP:  usize = 19;
pub const PINKY_TIP:  usize = 20;

/// Bone connections, for drawing the skeleton.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC),   (THUMB_CMC, THUMB_MCP),   (THUMB_MCP, THUMB_IP),    (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP),   (INDEX_MCP, INDEX_PIP),   (INDEX_PIP, INDEX_DIP),   (INDEX_DIP, INDEX_TIP),
    (INDEX_MCP, MIDDLE_MCP), (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (MIDDLE_MCP, RING_MCP),  (RING_MCP, RING_PIP),     (RING_PIP, RING_DIP),     (RING_DIP, RING_TIP),
    (RING_MCP, PINKY_MCP),   (PINKY_MCP, PINKY_PIP),   (PINKY_PIP, PINKY_DIP),   (PINKY_DIP, PINKY_TIP),
    (WRIST, PINKY_MCP),
];

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

/// One normalized landmark point.  `z` is carried through but never read by
/// the classifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Landmark { x, y, z: 0.0 }
    }

    /// Euclidean distance in the normalized x/y plane.
    pub fn distance_2d(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Both image coordinates are finite numbers.
    pub fn is_finite(&self) -> bool { self.x.is_finite() && self.y.is_finite() }
}

// ════════════════════════════════════════════════════════════════════════════
// HandLandmarks — a validated 21-point set
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LandmarkError {
    /// The caller handed over a landmark set of the wrong size.  This is an
    /// integration bug, never a classification outcome.
    #[error("landmark contract violation: expected {expected} points, got {actual}")]
    ContractViolation { expected: usize, actual: usize },
}

/// Exactly [`LANDMARK_COUNT`] landmarks in standard skeleton order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandLandmarks([Landmark; LANDMARK_COUNT]);

impl HandLandmarks {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        HandLandmarks(points)
    }

    /// Validate an arbitrary slice coming from a detector.
    pub fn from_slice(points: &[Landmark]) -> Result<Self, LandmarkError> {
        let points: [Landmark; LANDMARK_COUNT] =
            points.try_into().map_err(|_| LandmarkError::ContractViolation {
                expected: LANDMARK_COUNT,
                actual:   points.len(),
            })?;
        Ok(HandLandmarks(points))
    }

    pub fn point(&self, index: usize) -> &Landmark { &self.0[index] }
    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] { &self.0 }
    pub fn iter(&self) -> impl Iterator<Item = &Landmark> { self.0.iter() }
}

impl TryFrom<&[Landmark]> for HandLandmarks {
    type Error = LandmarkError;

    fn try_from(points: &[Landmark]) -> Result<Self, Self::Error> {
        HandLandmarks::from_slice(points)
    }
}

impl TryFrom<Vec<Landmark>> for HandLandmarks {
    type Error = LandmarkError;

    fn try_from(points: Vec<Landmark>) -> Result<Self, Self::Error> {
        HandLandmarks::from_slice(&points)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
