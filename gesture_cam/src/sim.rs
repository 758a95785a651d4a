//! Keyboard-driven simulation source — no camera needed.
//!
//! The overlay window translates number keys into [`SimInput`] events; this
//! source turns the most recent one into a stream of frames carrying a canned
//! hand pose.

use std::sync::mpsc::{Receiver, TryRecvError};

use hand_gesture::landmark::*;
use hand_gesture::GestureLabel;

use crate::source::{FrameSource, LandmarkFrame};

// ════════════════════════════════════════════════════════════════════════════
// SimPose
// ════════════════════════════════════════════════════════════════════════════

/// Canned hand poses, one per gesture plus a deliberately unrecognized one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimPose {
    Fist,
    OpenPalm,
    ThumbsUp,
    Victory,
    Ok,
    /// Thumb and index out ("L" shape).
    Pointing,
}

impl SimPose {
    pub const ALL: [SimPose; 6] = [
        SimPose::Fist, SimPose::OpenPalm, SimPose::ThumbsUp,
        SimPose::Victory, SimPose::Ok, SimPose::Pointing,
    ];

    /// The label this pose is built to produce.
    pub fn expected_label(self) -> GestureLabel {
        match self {
            SimPose::Fist     => GestureLabel::Fist,
            SimPose::OpenPalm => GestureLabel::OpenPalm,
            SimPose::ThumbsUp => GestureLabel::ThumbsUp,
            SimPose::Victory  => GestureLabel::Victory,
            SimPose::Ok       => GestureLabel::Ok,
            SimPose::Pointing => GestureLabel::Unknown,
        }
    }

    pub fn landmarks(self) -> Vec<Landmark> {
        match self {
            SimPose::Fist     => synthetic_hand([false, false, false, false, false]),
            SimPose::OpenPalm => synthetic_hand([true,  true,  true,  true,  true ]),
            SimPose::ThumbsUp => synthetic_hand([true,  false, false, false, false]),
            SimPose::Victory  => synthetic_hand([false, true,  true,  false, false]),
            SimPose::Pointing => synthetic_hand([true,  true,  false, false, false]),
            SimPose::Ok => {
                // Index curled onto the thumb, other three up.
                let mut pts = synthetic_hand([false, false, true, true, true]);
                let index_tip = pts[INDEX_TIP];
                pts[THUMB_TIP] = Landmark::new(index_tip.x + 0.02, index_tip.y + 0.005);
                pts
            }
        }
    }
}

/// Build a plausible mirrored right hand with the given
/// `[thumb, index, middle, ring, pinky]` extension pattern.
///
/// The thumb sits on the right of the image; fingers fan out above the wrist.
pub fn synthetic_hand(extended: [bool; 5]) -> Vec<Landmark> {
    let mut pts = vec![Landmark::default(); LANDMARK_COUNT];

    pts[WRIST]     = Landmark::new(0.50, 0.90);
    pts[THUMB_CMC] = Landmark::new(0.58, 0.84);
    pts[THUMB_MCP] = Landmark::new(0.64, 0.78);
    pts[THUMB_IP]  = Landmark::new(0.69, 0.72);
    pts[THUMB_TIP] = if extended[0] {
        Landmark::new(0.75, 0.66)
    } else {
        Landmark::new(0.63, 0.72)
    };

    // (mcp index, column x, knuckle y)
    let columns = [
        (INDEX_MCP,  0.58, 0.62),
        (MIDDLE_MCP, 0.50, 0.60),
        (RING_MCP,   0.43, 0.62),
        (PINKY_MCP,  0.36, 0.66),
    ];
    for (finger, &(mcp, x, y)) in columns.iter().enumerate() {
        // pip/dip/tip follow the mcp in index order
        let offsets: [f32; 3] = if extended[finger + 1] {
            [-0.08, -0.14, -0.19]
        } else {
            [-0.07, -0.03, 0.01]
        };
        pts[mcp] = Landmark::new(x, y);
        for (k, dy) in offsets.iter().enumerate() {
            pts[mcp + 1 + k] = Landmark::new(x, y + dy);
        }
    }

    pts
}

// ════════════════════════════════════════════════════════════════════════════
// SimFrameSource
// ════════════════════════════════════════════════════════════════════════════

/// Raw input from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimInput {
    Show(SimPose),
    /// Take the hand out of view.
    Hide,
}

/// Emits one frame per pull showing the most recently selected pose.
///
/// Ends when the sending side (the window) goes away.
pub struct SimFrameSource {
    rx:    Option<Receiver<SimInput>>,
    pose:  Option<SimPose>,
    index: u64,
}

impl SimFrameSource {
    pub fn new(rx: Receiver<SimInput>) -> Self {
        SimFrameSource { rx: Some(rx), pose: None, index: 0 }
    }

    pub fn current_pose(&self) -> Option<SimPose> { self.pose }
}

impl FrameSource for SimFrameSource {
    type Frame = LandmarkFrame;

    fn next_frame(&mut self) -> Option<LandmarkFrame> {
        let rx = self.rx.as_ref()?;
        loop {
            match rx.try_recv() {
                Ok(SimInput::Show(p))           => self.pose = Some(p),
                Ok(SimInput::Hide)              => self.pose = None,
                Err(TryRecvError::Empty)        => break,
                Err(TryRecvError::Disconnected) => return None,
            }
        }

        let frame = LandmarkFrame {
            index:     self.index,
            landmarks: self.pose.map(SimPose::landmarks),
        };
        self.index += 1;
        Some(frame)
    }

    fn release(&mut self) {
        self.rx = None;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_gesture::{GestureClassifier, HandLandmarks};
    use std::sync::mpsc;

    #[test]
    fn every_pose_classifies_as_intended() {
        let c = GestureClassifier::default();
        for pose in SimPose::ALL {
            let hand = HandLandmarks::from_slice(&pose.landmarks()).unwrap();
            let (_, label) = c.classify_hand(&hand);
            assert_eq!(label, pose.expected_label(), "{:?}", pose);
        }
    }

    #[test]
    fn synthetic_points_are_normalized() {
        for pose in SimPose::ALL {
            for p in pose.landmarks() {
                assert!((0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y));
            }
        }
    }

    #[test]
    fn source_starts_without_a_hand() {
        let (_tx, rx) = mpsc::channel();
        let mut src = SimFrameSource::new(rx);
        let f = src.next_frame().unwrap();
        assert_eq!(f.index, 0);
        assert!(f.landmarks.is_none());
    }

    #[test]
    fn latest_input_wins() {
        let (tx, rx) = mpsc::channel();
        let mut src = SimFrameSource::new(rx);
        tx.send(SimInput::Show(SimPose::Fist)).unwrap();
        tx.send(SimInput::Show(SimPose::Victory)).unwrap();
        let f = src.next_frame().unwrap();
        assert_eq!(src.current_pose(), Some(SimPose::Victory));
        assert_eq!(f.landmarks, Some(SimPose::Victory.landmarks()));

        // pose persists until changed
        assert!(src.next_frame().unwrap().landmarks.is_some());
        tx.send(SimInput::Hide).unwrap();
        assert!(src.next_frame().unwrap().landmarks.is_none());
    }

    #[test]
    fn ends_when_window_goes_away() {
        let (tx, rx) = mpsc::channel();
        let mut src = SimFrameSource::new(rx);
        drop(tx);
        assert!(src.next_frame().is_none());
    }

    #[test]
    fn released_source_yields_nothing() {
        let (_tx, rx) = mpsc::channel();
        let mut src = SimFrameSource::new(rx);
        src.release();
        src.release();
        assert!(src.next_frame().is_none());
    }
}
