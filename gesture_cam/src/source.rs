//! Frame acquisition and landmark detection seams.
//!
//! The driver only sees [`FrameSource`] and [`LandmarkDetector`]; whether the
//! frames come from the keyboard simulator, a replay file or a real camera is
//! invisible to it.

use hand_gesture::Landmark;

// ════════════════════════════════════════════════════════════════════════════
// FrameSource
// ════════════════════════════════════════════════════════════════════════════

/// Pull-based supplier of frames.
pub trait FrameSource {
    type Frame;

    /// Next frame, or `None` on end of stream / acquisition failure.
    fn next_frame(&mut self) -> Option<Self::Frame>;

    /// Free the underlying device.  Called exactly once when the loop exits
    /// and must tolerate being called on an exhausted source.
    fn release(&mut self) {}
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    type Frame = S::Frame;

    fn next_frame(&mut self) -> Option<Self::Frame> { (**self).next_frame() }
    fn release(&mut self) { (**self).release() }
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkDetector
// ════════════════════════════════════════════════════════════════════════════

/// Long-lived hand detector, built once before the loop and reused.
///
/// Returns the raw point list for at most one hand; the count is validated
/// downstream, so a misbehaving detector surfaces as a contract violation.
pub trait LandmarkDetector<F> {
    fn detect(&mut self, frame: &F) -> Option<Vec<Landmark>>;
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkFrame — frames that already carry their landmarks
// ════════════════════════════════════════════════════════════════════════════

/// A frame whose hand (if any) was located upstream: by the simulator, or by
/// an external detector process whose output is being replayed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandmarkFrame {
    /// 0-based position in the stream.
    pub index:     u64,
    pub landmarks: Option<Vec<Landmark>>,
}

/// Detector for [`LandmarkFrame`]s: hands back the embedded points.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbeddedLandmarks;

impl LandmarkDetector<LandmarkFrame> for EmbeddedLandmarks {
    fn detect(&mut self, frame: &LandmarkFrame) -> Option<Vec<Landmark>> {
        frame.landmarks.clone()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
