//! `perform(GestureLabel)` — look the label up, hand the action to a backend.

use hand_gesture::GestureLabel;
use tracing::trace;

use crate::backend::{DispatchError, InputBackend};
use crate::table::{ActionTable, SystemAction};

/// Consumer of one classification result per frame.
pub trait ActionDispatcher {
    /// Perform whatever `label` is bound to.  Returns the action taken, or
    /// `None` when the label has no binding.
    fn perform(&mut self, label: GestureLabel) -> Result<Option<SystemAction>, DispatchError>;
}

impl<D: ActionDispatcher + ?Sized> ActionDispatcher for &mut D {
    fn perform(&mut self, label: GestureLabel) -> Result<Option<SystemAction>, DispatchError> {
        (**self).perform(label)
    }
}

/// Table lookup in front of an [`InputBackend`].
#[derive(Debug)]
pub struct TableDispatcher<B> {
    table:   ActionTable,
    backend: B,
}

impl<B: InputBackend> TableDispatcher<B> {
    pub fn new(table: ActionTable, backend: B) -> Self {
        TableDispatcher { table, backend }
    }

    pub fn table(&self) -> &ActionTable { &self.table }
    pub fn backend(&self) -> &B { &self.backend }
    pub fn into_backend(self) -> B { self.backend }
}

impl<B: InputBackend> ActionDispatcher for TableDispatcher<B> {
    fn perform(&mut self, label: GestureLabel) -> Result<Option<SystemAction>, DispatchError> {
        let Some(action) = self.table.lookup(label) else {
            trace!(%label, "no action bound");
            return Ok(None);
        };
        self.backend.execute(action)?;
        Ok(Some(action))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
