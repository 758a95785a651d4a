//! The gesture → action mapping.  It is plain data and can be replaced
//! wholesale from a config file.

use std::collections::BTreeMap;
use std::fmt;

use hand_gesture::GestureLabel;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ════════════════════════════════════════════════════════════════════════════
// SystemAction
// ════════════════════════════════════════════════════════════════════════════

/// A named synthetic input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemAction {
    VolumeUp,
    /// Toggles mute on most desktops.
    VolumeMute,
    /// Right mouse button click.
    SecondaryClick,
    /// Left mouse button click.
    PrimaryClick,
    /// Enter key.
    ConfirmKey,
}

impl SystemAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VolumeUp       => "volume up",
            Self::VolumeMute     => "volume mute",
            Self::SecondaryClick => "secondary click",
            Self::PrimaryClick   => "primary click",
            Self::ConfirmKey     => "confirm key",
        }
    }
}

impl fmt::Display for SystemAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ActionTable
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("gesture `{0}` cannot be bound to an action")]
    UnmappableLabel(&'static str),
}

/// Which action, if any, each recognized gesture triggers.
///
/// `Unknown` and `NoHand` can never be bound.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<GestureLabel, SystemAction>", into = "BTreeMap<GestureLabel, SystemAction>")]
pub struct ActionTable {
    entries: BTreeMap<GestureLabel, SystemAction>,
}

impl Default for ActionTable {
    fn default() -> Self {
        let entries = BTreeMap::from([
            (GestureLabel::ThumbsUp, SystemAction::VolumeUp),
            (GestureLabel::Fist,     SystemAction::VolumeMute),
            (GestureLabel::OpenPalm, SystemAction::SecondaryClick),
            (GestureLabel::Victory,  SystemAction::PrimaryClick),
            (GestureLabel::Ok,       SystemAction::ConfirmKey),
        ]);
        ActionTable { entries }
    }
}

impl ActionTable {
    /// A table that triggers nothing.
    pub fn empty() -> Self {
        ActionTable { entries: BTreeMap::new() }
    }

    pub fn lookup(&self, label: GestureLabel) -> Option<SystemAction> {
        self.entries.get(&label).copied()
    }

    /// Bind `label` to `action`, returning the previous binding.
    pub fn bind(
        &mut self,
        label: GestureLabel,
        action: SystemAction,
    ) -> Result<Option<SystemAction>, TableError> {
        if !label.is_recognized() {
            return Err(TableError::UnmappableLabel(label.as_str()));
        }
        Ok(self.entries.insert(label, action))
    }

    pub fn unbind(&mut self, label: GestureLabel) -> Option<SystemAction> {
        self.entries.remove(&label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (GestureLabel, SystemAction)> + '_ {
        self.entries.iter().map(|(&l, &a)| (l, a))
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl TryFrom<BTreeMap<GestureLabel, SystemAction>> for ActionTable {
    type Error = TableError;

    fn try_from(map: BTreeMap<GestureLabel, SystemAction>) -> Result<Self, Self::Error> {
        let mut table = ActionTable::empty();
        for (label, action) in map {
            table.bind(label, action)?;
        }
        Ok(table)
    }
}

impl From<ActionTable> for BTreeMap<GestureLabel, SystemAction> {
    fn from(table: ActionTable) -> Self { table.entries }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_gesture_set() {
        let t = ActionTable::default();
        assert_eq!(t.lookup(GestureLabel::ThumbsUp), Some(SystemAction::VolumeUp));
        assert_eq!(t.lookup(GestureLabel::Fist),     Some(SystemAction::VolumeMute));
        assert_eq!(t.lookup(GestureLabel::OpenPalm), Some(SystemAction::SecondaryClick));
        assert_eq!(t.lookup(GestureLabel::Victory),  Some(SystemAction::PrimaryClick));
        assert_eq!(t.lookup(GestureLabel::Ok),       Some(SystemAction::ConfirmKey));
        assert_eq!(t.lookup(GestureLabel::Unknown),  None);
        assert_eq!(t.lookup(GestureLabel::NoHand),   None);
        assert_eq!(t.len(), 5);
    }

    #[test]
    fn unknown_and_no_hand_cannot_be_bound() {
        let mut t = ActionTable::empty();
        assert_eq!(
            t.bind(GestureLabel::Unknown, SystemAction::ConfirmKey),
            Err(TableError::UnmappableLabel("unknown"))
        );
        assert!(t.bind(GestureLabel::NoHand, SystemAction::VolumeUp).is_err());
        assert!(t.is_empty());
    }

    #[test]
    fn rebinding_returns_previous() {
        let mut t = ActionTable::default();
        let prev = t.bind(GestureLabel::Fist, SystemAction::PrimaryClick).unwrap();
        assert_eq!(prev, Some(SystemAction::VolumeMute));
        assert_eq!(t.unbind(GestureLabel::Fist), Some(SystemAction::PrimaryClick));
        assert_eq!(t.lookup(GestureLabel::Fist), None);
    }

    #[test]
    fn table_deserializes_from_kebab_case_map() {
        let t: ActionTable = serde_json::from_str(
            r#"{"thumbs-up": "confirm-key", "open-palm": "volume-up"}"#,
        ).unwrap();
        assert_eq!(t.lookup(GestureLabel::ThumbsUp), Some(SystemAction::ConfirmKey));
        assert_eq!(t.lookup(GestureLabel::OpenPalm), Some(SystemAction::VolumeUp));
        assert_eq!(t.lookup(GestureLabel::Fist), None);
    }

    #[test]
    fn table_deserialize_rejects_no_hand() {
        let r: Result<ActionTable, _> = serde_json::from_str(r#"{"no-hand": "volume-up"}"#);
        assert!(r.is_err());
    }

    #[test]
    fn iter_walks_bindings_in_label_order() {
        let bound: Vec<_> = ActionTable::default().iter().collect();
        assert_eq!(bound, [
            (GestureLabel::Victory,  SystemAction::PrimaryClick),
            (GestureLabel::Ok,       SystemAction::ConfirmKey),
            (GestureLabel::Fist,     SystemAction::VolumeMute),
            (GestureLabel::OpenPalm, SystemAction::SecondaryClick),
            (GestureLabel::ThumbsUp, SystemAction::VolumeUp),
        ]);
        assert_eq!(ActionTable::empty().iter().count(), 0);
    }

    #[test]
    fn action_names() {
        assert_eq!(SystemAction::VolumeUp.to_string(), "volume up");
        assert_eq!(SystemAction::ConfirmKey.as_str(), "confirm key");
    }
}
