//! # gesture_actions
//!
//! Maps a [`GestureLabel`](hand_gesture::GestureLabel) to a synthetic input
//! action and performs it through a pluggable backend.
//!
//! ## Default mapping
//!
//! | Gesture | Action |
//! |---|---|
//! | Thumbs Up | volume up |
//! | Fist | volume mute (toggle) |
//! | Open Palm | secondary (right) click |
//! | Victory | primary (left) click |
//! | OK | confirm (Enter) key |
//! | Unknown / No Hand | — |
//!
//! ## Feature flags
//!
//! * (default) — actions are logged through `tracing` only.
//! * `uinput` — [`UinputBackend`] injects real events on Linux.

pub mod table;
pub mod backend;
pub mod dispatch;

pub use table::{ActionTable, SystemAction, TableError};
pub use backend::{DispatchError, InputBackend, LogBackend, RecordingBackend};
#[cfg(feature = "uinput")]
pub use backend::UinputBackend;
pub use dispatch::{ActionDispatcher, TableDispatcher};
