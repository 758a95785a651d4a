//! Finger-state extraction.
//!
//! Turns 21 landmarks into a five-way extended/folded vector plus the
//! thumb-tip ↔ index-tip distance.
//!
//! # Geometry
//!
//! * **Thumb**: extended iff `tip.x > ip.x`.  Only the x-axis is compared,
//!   which assumes the mirrored view; a thumb pointing down but displaced to
//!   the right still counts as extended.  This is a coarse approximation and
//!   is kept as such.
//! * **Index, middle, ring, pinky**: extended iff `tip.y < pip.y` (the tip
//!   sits higher on screen than the PIP joint).
//! * **Distance**: measured in normalized coordinates, so it does not depend
//!   on the frame resolution.

use std::ops::Index;

use crate::landmark::{
    HandLandmarks, INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP,
    RING_PIP, RING_TIP, THUMB_IP, THUMB_TIP,
};

// ════════════════════════════════════════════════════════════════════════════
// Finger
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finger { Thumb, Index, Middle, Ring, Pinky }

impl Finger {
    /// Fixed vector order.
    pub const ALL: [Finger; 5] =
        [Finger::Thumb, Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    /// `(tip, reference joint)` landmark indices used for the extended test.
    pub fn joints(self) -> (usize, usize) {
        match self {
            Finger::Thumb  => (THUMB_TIP,  THUMB_IP),
            Finger::Index  => (INDEX_TIP,  INDEX_PIP),
            Finger::Middle => (MIDDLE_TIP, MIDDLE_PIP),
            Finger::Ring   => (RING_TIP,   RING_PIP),
            Finger::Pinky  => (PINKY_TIP,  PINKY_PIP),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FingerState
// ════════════════════════════════════════════════════════════════════════════

/// Extended (`true`) / folded (`false`) per finger, ordered
/// `[thumb, index, middle, ring, pinky]`.  Read single fingers with
/// `state[Finger::Middle]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FingerState(pub [bool; 5]);

impl FingerState {
    pub fn extended_count(&self) -> usize {
        self.0.iter().filter(|&&up| up).count()
    }

    pub fn none_extended(&self) -> bool { self.0.iter().all(|&up| !up) }
    pub fn all_extended(&self)  -> bool { self.0.iter().all(|&up| up) }

    /// Thumb extended, the other four folded.
    pub fn only_thumb(&self) -> bool {
        self[Finger::Thumb] && self.0[1..].iter().all(|&up| !up)
    }
}

impl Index<Finger> for FingerState {
    type Output = bool;

    fn index(&self, finger: Finger) -> &bool {
        &self.0[finger as usize]
    }
}

impl From<[bool; 5]> for FingerState {
    fn from(states: [bool; 5]) -> Self { FingerState(states) }
}

// ════════════════════════════════════════════════════════════════════════════
// HandFeatures + extract
// ════════════════════════════════════════════════════════════════════════════

/// Everything the classifier reads from one hand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandFeatures {
    pub fingers:              FingerState,
    pub thumb_index_distance: f32,
}

/// Compute finger states and the thumb-index distance for one hand.
pub fn extract(hand: &HandLandmarks) -> HandFeatures {
    let mut states = [false; 5];
    for finger in Finger::ALL {
        let (tip, joint) = finger.joints();
        let tip   = hand.point(tip);
        let joint = hand.point(joint);
        states[finger as usize] = match finger {
            Finger::Thumb => tip.x > joint.x,
            _             => tip.y < joint.y,
        };
    }

    let thumb_index_distance = hand.point(THUMB_TIP).distance_2d(hand.point(INDEX_TIP));

    HandFeatures { fingers: FingerState(states), thumb_index_distance }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
