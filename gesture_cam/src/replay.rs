//! JSON-lines landmark replay.
//!
//! One record per line:
//!
//! ```text
//! {"landmarks": [{"x": 0.51, "y": 0.88, "z": 0.0}, ... 21 points ...]}
//! {"landmarks": null}
//! ```
//!
//! A record whose `x` or `y` is not a finite number (e.g. `1e39`, which
//! overflows `f32`) counts as malformed.
//!
//! This is the shape an external detector process (e.g. a MediaPipe helper
//! script) can write to stdout, so `some_detector | gesture_cam --replay -`
//! works without a camera binding in this crate.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::Path;

use hand_gesture::Landmark;
use serde::Deserialize;
use tracing::warn;

use crate::source::{FrameSource, LandmarkFrame};

#[derive(Debug, Deserialize)]
struct ReplayRecord {
    landmarks: Option<Vec<Landmark>>,
}

impl ReplayRecord {
    fn all_finite(&self) -> bool {
        self.landmarks.iter().flatten().all(Landmark::is_finite)
    }
}

/// Reads [`LandmarkFrame`]s from any buffered reader.
///
/// A read error or a line that does not parse ends the stream.
pub struct ReplaySource<R> {
    lines:   Option<Lines<R>>,
    index:   u64,
    line_no: usize,
}

impl ReplaySource<BufReader<File>> {
    pub fn open(path: &Path) -> io::Result<Self> {
        Ok(ReplaySource::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> ReplaySource<R> {
    pub fn new(reader: R) -> Self {
        ReplaySource { lines: Some(reader.lines()), index: 0, line_no: 0 }
    }

    /// Number of input lines consumed so far.
    pub fn line_no(&self) -> usize { self.line_no }

    fn read_record(&mut self) -> Option<ReplayRecord> {
        let lines = self.lines.as_mut()?;
        loop {
            let next = lines.next()?;
            self.line_no += 1;
            let line = match next {
                Ok(l)  => l,
                Err(e) => {
                    warn!(line = self.line_no, error = %e, "replay read failed, ending stream");
                    return None;
                }
            };
            if line.trim().is_empty() { continue; }

            return match serde_json::from_str::<ReplayRecord>(&line) {
                Ok(rec) if rec.all_finite() => Some(rec),
                Ok(_) => {
                    warn!(line = self.line_no, "non-finite landmark coordinate, ending stream");
                    None
                }
                Err(e) => {
                    warn!(line = self.line_no, error = %e, "malformed replay record, ending stream");
                    None
                }
            };
        }
    }
}

impl<R: BufRead> FrameSource for ReplaySource<R> {
    type Frame = LandmarkFrame;

    fn next_frame(&mut self) -> Option<LandmarkFrame> {
        let Some(record) = self.read_record() else {
            self.lines = None;
            return None;
        };
        let frame = LandmarkFrame { index: self.index, landmarks: record.landmarks };
        self.index += 1;
        Some(frame)
    }

    fn release(&mut self) {
        self.lines = None;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn source(text: &str) -> ReplaySource<Cursor<Vec<u8>>> {
        ReplaySource::new(Cursor::new(text.as_bytes().to_vec()))
    }

    fn hand_line(n: usize) -> String {
        let pts: Vec<String> = (0..n).map(|_| r#"{"x":0.5,"y":0.5}"#.to_string()).collect();
        format!(r#"{{"landmarks":[{}]}}"#, pts.join(","))
    }

    #[test]
    fn reads_hand_and_no_hand_records() {
        let text = format!("{}\n{{\"landmarks\":null}}\n", hand_line(21));
        let mut src = source(&text);

        let f0 = src.next_frame().unwrap();
        assert_eq!(f0.index, 0);
        assert_eq!(f0.landmarks.as_ref().map(Vec::len), Some(21));
        assert_eq!(f0.landmarks.unwrap()[0], Landmark::new(0.5, 0.5));

        let f1 = src.next_frame().unwrap();
        assert_eq!(f1.index, 1);
        assert!(f1.landmarks.is_none());

        assert!(src.next_frame().is_none());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let text = format!("\n   \n{}\n\n", hand_line(21));
        let mut src = source(&text);
        assert!(src.next_frame().is_some());
        assert!(src.next_frame().is_none());
    }

    #[test]
    fn wrong_point_count_is_passed_through() {
        // Counting is the extractor's job, not the reader's.
        let mut src = source(&hand_line(5));
        assert_eq!(src.next_frame().unwrap().landmarks.map(|v| v.len()), Some(5));
    }

    #[test]
    fn malformed_line_ends_stream_for_good() {
        let text = format!("{}\nnot json\n{}\n", hand_line(21), hand_line(21));
        let mut src = source(&text);
        assert!(src.next_frame().is_some());
        assert!(src.next_frame().is_none());
        assert_eq!(src.line_no(), 2);
        assert!(src.next_frame().is_none());
    }

    #[test]
    fn overflowing_coordinate_ends_stream() {
        let mut pts = vec![r#"{"x":0.5,"y":0.5}"#; 20];
        pts.push(r#"{"x":1e39,"y":0.5}"#);
        let text = format!("{}\n{{\"landmarks\":[{}]}}\n{}\n",
                           hand_line(21), pts.join(","), hand_line(21));
        let mut src = source(&text);
        assert!(src.next_frame().is_some());
        assert!(src.next_frame().is_none());
        assert_eq!(src.line_no(), 2);
        assert!(src.next_frame().is_none());
    }

    #[test]
    fn line_count_stops_at_last_line() {
        let mut src = source(&format!("{}\n", hand_line(21)));
        assert!(src.next_frame().is_some());
        assert!(src.next_frame().is_none());
        assert_eq!(src.line_no(), 1);
    }

    #[test]
    fn release_stops_reading() {
        let mut src = source(&hand_line(21));
        src.release();
        assert!(src.next_frame().is_none());
    }
}
