//! # gesture_cam
//!
//! Per-frame hand-gesture controller: pulls frames, finds one hand's
//! landmarks, classifies a static gesture and fires the bound input action.
//!
//! ## Frame sources
//!
//! * (default) — **Simulation**: number keys in the overlay window pick a
//!   canned hand pose; no camera or model needed.
//! * `--replay <file|->` — **Replay**: JSON-lines landmark records, e.g. the
//!   stdout of an external detector process.
//!
//! ### Simulation keys
//!
//! | Key | Pose | Label |
//! |---|---|---|
//! | `1` | fist | Fist |
//! | `2` | open hand | Open Palm |
//! | `3` | thumb out | Thumbs Up |
//! | `4` | V-sign | Victory |
//! | `5` | index on thumb | OK |
//! | `6` | thumb + index ("L") | Unknown |
//! | `0` | hand out of view | No Hand Detected |
//! | `Q` / `Esc` | — | quit |
//!
//! ## Feature flags
//!
//! * `uinput` — enables `--backend uinput` (real key / mouse events on Linux).

pub mod source;
pub mod sim;
pub mod replay;
pub mod app;
pub mod config;
pub mod visualizer;
