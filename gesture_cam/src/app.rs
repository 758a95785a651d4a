//! The per-frame driver.
//!
//! ```text
//! next_frame ─▶ detect ─▶ extract ─▶ classify ─▶ perform ─▶ render
//!      ▲                                                      │
//!      └──────────────── unless stop raised ◀─────────────────┘
//! ```
//!
//! Everything is injected: frame source, detector, classifier, dispatcher and
//! overlay.  Frames are handled strictly one after another on the calling
//! thread, and nothing but the loop counters survives from one frame to the
//! next.

use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gesture_actions::ActionDispatcher;
use hand_gesture::{GestureClassifier, GestureLabel, HandFeatures, HandLandmarks, LandmarkError};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::source::{FrameSource, LandmarkDetector};

// ════════════════════════════════════════════════════════════════════════════
// StopSignal
// ════════════════════════════════════════════════════════════════════════════

/// Cooperative cancellation flag, checked between frames.
#[derive(Clone, Debug, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self { Self::default() }
    pub fn raise(&self) { self.0.store(true, Ordering::SeqCst); }
    pub fn is_raised(&self) -> bool { self.0.load(Ordering::SeqCst) }
}

// ════════════════════════════════════════════════════════════════════════════
// FrameOverlay
// ════════════════════════════════════════════════════════════════════════════

/// Display sink.  Receives every frame with its label; returns nothing to
/// the core.
pub trait FrameOverlay<F> {
    fn render(&mut self, frame: &F, label: GestureLabel, hand: Option<&HandLandmarks>);
}

impl<F, O: FrameOverlay<F> + ?Sized> FrameOverlay<F> for Box<O> {
    fn render(&mut self, frame: &F, label: GestureLabel, hand: Option<&HandLandmarks>) {
        (**self).render(frame, label, hand)
    }
}

/// Headless overlay: logs the label whenever it changes.
#[derive(Debug, Default)]
pub struct LogOverlay {
    last: Option<GestureLabel>,
}

impl<F> FrameOverlay<F> for LogOverlay {
    fn render(&mut self, _: &F, label: GestureLabel, _: Option<&HandLandmarks>) {
        if self.last != Some(label) {
            info!(%label, "gesture");
            self.last = Some(label);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Per-frame classification
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("frame {frame}: {source}")]
    Landmarks {
        frame:  u64,
        #[source]
        source: LandmarkError,
    },
}

/// What one frame amounted to.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameOutcome {
    pub label:    GestureLabel,
    pub hand:     Option<HandLandmarks>,
    pub features: Option<HandFeatures>,
}

/// Detect, validate, extract and classify one frame.
///
/// No hand → [`GestureLabel::NoHand`] without touching the classifier.  A
/// detector that returns the wrong number of points is an error, never
/// `Unknown`.
pub fn classify_frame<F, D>(
    frame:      &F,
    detector:   &mut D,
    classifier: &GestureClassifier,
) -> Result<FrameOutcome, LandmarkError>
where
    D: LandmarkDetector<F> + ?Sized,
{
    let Some(points) = detector.detect(frame) else {
        return Ok(FrameOutcome { label: GestureLabel::NoHand, hand: None, features: None });
    };
    let hand = HandLandmarks::from_slice(&points)?;
    let (features, label) = classifier.classify_hand(&hand);
    Ok(FrameOutcome { label, hand: Some(hand), features: Some(features) })
}

// ════════════════════════════════════════════════════════════════════════════
// run_pipeline
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The stop signal was raised.
    Stopped,
    /// The source ran dry or failed to deliver a frame.
    EndOfStream,
}

/// Loop counters, returned when the loop ends normally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineStats {
    pub frames:            u64,
    pub actions:           u64,
    pub dispatch_failures: u64,
    pub labels:            BTreeMap<GestureLabel, u64>,
    pub reason:            StopReason,
}

impl PipelineStats {
    pub fn count(&self, label: GestureLabel) -> u64 {
        self.labels.get(&label).copied().unwrap_or(0)
    }
}

/// Calls [`FrameSource::release`] when dropped, whichever way the loop ends.
struct ReleaseOnDrop<'a, S: FrameSource + ?Sized>(&'a mut S);

impl<S: FrameSource + ?Sized> Deref for ReleaseOnDrop<'_, S> {
    type Target = S;
    fn deref(&self) -> &S { self.0 }
}

impl<S: FrameSource + ?Sized> DerefMut for ReleaseOnDrop<'_, S> {
    fn deref_mut(&mut self) -> &mut S { self.0 }
}

impl<S: FrameSource + ?Sized> Drop for ReleaseOnDrop<'_, S> {
    fn drop(&mut self) {
        self.0.release();
        debug!("frame source released");
    }
}

/// Run the capture → classify → act → render loop until the stop signal is
/// raised or the source ends.
///
/// The stop signal is only looked at between frames.  A dispatch failure is
/// logged and the loop moves on; a landmark contract violation aborts the
/// loop with an error.  The source is released on every exit path.
pub fn run_pipeline<S, D, A, O>(
    source:     &mut S,
    detector:   &mut D,
    classifier: &GestureClassifier,
    dispatcher: &mut A,
    overlay:    &mut O,
    stop:       &StopSignal,
) -> Result<PipelineStats, PipelineError>
where
    S: FrameSource + ?Sized,
    D: LandmarkDetector<S::Frame> + ?Sized,
    A: ActionDispatcher + ?Sized,
    O: FrameOverlay<S::Frame> + ?Sized,
{
    let mut source = ReleaseOnDrop(source);
    let mut stats = PipelineStats {
        frames:            0,
        actions:           0,
        dispatch_failures: 0,
        labels:            BTreeMap::new(),
        reason:            StopReason::EndOfStream,
    };

    info!(threshold = classifier.config().ok_distance_threshold, "pipeline started");

    loop {
        if stop.is_raised() {
            stats.reason = StopReason::Stopped;
            break;
        }
        let Some(frame) = source.next_frame() else {
            stats.reason = StopReason::EndOfStream;
            break;
        };
        let frame_no = stats.frames;
        stats.frames += 1;

        let outcome = classify_frame(&frame, detector, classifier)
            .map_err(|source| PipelineError::Landmarks { frame: frame_no, source })?;
        let label = outcome.label;
        *stats.labels.entry(label).or_insert(0) += 1;
        debug!(frame = frame_no, %label, fingers = ?outcome.features.map(|f| f.fingers.0), "classified");

        match dispatcher.perform(label) {
            Ok(Some(action)) => {
                stats.actions += 1;
                debug!(frame = frame_no, %action, "dispatched");
            }
            Ok(None) => {}
            Err(e) => {
                stats.dispatch_failures += 1;
                warn!(frame = frame_no, %label, error = %e, "action dispatch failed");
            }
        }

        overlay.render(&frame, label, outcome.hand.as_ref());
    }

    info!(frames = stats.frames, actions = stats.actions, reason = ?stats.reason, "pipeline finished");
    Ok(stats)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
