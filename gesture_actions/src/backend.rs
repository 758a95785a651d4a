//! Input backends — where a [`SystemAction`] actually goes.
//!
//! * [`LogBackend`]       — logs the action, injects nothing (default).
//! * [`RecordingBackend`] — keeps every action in memory, for tests and dry runs.
//! * [`UinputBackend`]    — Linux virtual keyboard/mouse (feature `uinput`).

use thiserror::Error;
use tracing::info;

use crate::table::SystemAction;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("input backend `{backend}` failed: {reason}")]
    Backend { backend: &'static str, reason: String },
}

// ════════════════════════════════════════════════════════════════════════════
// InputBackend
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can perform a synthetic input action.
pub trait InputBackend {
    fn name(&self) -> &'static str;
    fn execute(&mut self, action: SystemAction) -> Result<(), DispatchError>;
}

impl<B: InputBackend + ?Sized> InputBackend for Box<B> {
    fn name(&self) -> &'static str { (**self).name() }
    fn execute(&mut self, action: SystemAction) -> Result<(), DispatchError> {
        (**self).execute(action)
    }
}

// ── log backend ───────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct LogBackend;

impl InputBackend for LogBackend {
    fn name(&self) -> &'static str { "log" }

    fn execute(&mut self, action: SystemAction) -> Result<(), DispatchError> {
        info!(%action, "input action");
        Ok(())
    }
}

// ── recording backend ─────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub performed: Vec<SystemAction>,
}

impl InputBackend for RecordingBackend {
    fn name(&self) -> &'static str { "recording" }

    fn execute(&mut self, action: SystemAction) -> Result<(), DispatchError> {
        self.performed.push(action);
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// UinputBackend — real events (feature = "uinput")
// ════════════════════════════════════════════════════════════════════════════

/// Virtual HID device created through `/dev/uinput`.
#[cfg(feature = "uinput")]
pub struct UinputBackend {
    dev: uinput::device::Device,
}

#[cfg(feature = "uinput")]
impl UinputBackend {
    const NAME: &'static str = "uinput";
    const TAP_HOLD: std::time::Duration = std::time::Duration::from_millis(10);

    pub fn open() -> Result<Self, DispatchError> {
        use uinput::event::controller::{Controller, Mouse};

        let dev = uinput::default()
            .and_then(|b| b.name("hand-gesture-hid"))
            .and_then(|b| b.event(uinput::event::Keyboard::All))
            .and_then(|b| b.event(Controller::Mouse(Mouse::Left)))
            .and_then(|b| b.event(Controller::Mouse(Mouse::Right)))
            .and_then(|b| b.create())
            .map_err(Self::fail)?;

        info!("uinput device created");
        Ok(UinputBackend { dev })
    }

    fn fail(e: uinput::Error) -> DispatchError {
        DispatchError::Backend { backend: Self::NAME, reason: e.to_string() }
    }

    fn tap<T: uinput::event::Press + uinput::event::Release>(
        &mut self,
        event: &T,
    ) -> Result<(), uinput::Error> {
        self.dev.press(event)?;
        self.dev.synchronize()?;
        std::thread::sleep(Self::TAP_HOLD);
        self.dev.release(event)?;
        self.dev.synchronize()
    }
}

#[cfg(feature = "uinput")]
impl InputBackend for UinputBackend {
    fn name(&self) -> &'static str { Self::NAME }

    fn execute(&mut self, action: SystemAction) -> Result<(), DispatchError> {
        use uinput::event::controller::{Controller, Mouse};
        use uinput::event::keyboard::{Key, Keyboard, Misc};

        let result = match action {
            SystemAction::VolumeUp       => self.tap(&Keyboard::Misc(Misc::VolumeUp)),
            SystemAction::VolumeMute     => self.tap(&Keyboard::Misc(Misc::Mute)),
            SystemAction::SecondaryClick => self.tap(&Controller::Mouse(Mouse::Right)),
            SystemAction::PrimaryClick   => self.tap(&Controller::Mouse(Mouse::Left)),
            SystemAction::ConfirmKey     => self.tap(&Keyboard::Key(Key::Enter)),
        };
        result.map_err(Self::fail)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_backend_keeps_order() {
        let mut b = RecordingBackend::default();
        b.execute(SystemAction::PrimaryClick).unwrap();
        b.execute(SystemAction::VolumeUp).unwrap();
        assert_eq!(b.performed, [SystemAction::PrimaryClick, SystemAction::VolumeUp]);
    }

    #[test]
    fn boxed_backend_delegates() {
        let mut b: Box<dyn InputBackend> = Box::new(LogBackend);
        assert_eq!(b.name(), "log");
        assert!(b.execute(SystemAction::ConfirmKey).is_ok());
    }
}
