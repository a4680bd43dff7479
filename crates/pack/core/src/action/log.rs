//! The reversible action log backing turnwheel rewind.

use tracing::{debug, warn};

use crate::env::Env;
use crate::state::WorldState;

use super::{Action, ActionError, UndoRecord};

/// One committed action with its revert record.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub action: Action,
    pub undo: UndoRecord,
}

/// Log position captured by [`ActionLog::checkpoint`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Checkpoint(pub usize);

/// Ordered record of every committed action.
///
/// Undo is strictly LIFO. Undone actions are kept on a redo stack until a
/// new action is committed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionLog {
    entries: Vec<LogEntry>,
    undone: Vec<Action>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed actions.
    pub fn position(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.entries.len())
    }

    /// Applies `action` and records it. A failed action leaves world and log unchanged.
    pub fn do_action(
        &mut self,
        world: &mut WorldState,
        env: &Env<'_>,
        action: Action,
    ) -> Result<(), ActionError> {
        let undo = action.apply(world, env).inspect_err(|error| {
            warn!(
                target: "pack::action",
                action = action.name(),
                %error,
                "action rejected"
            );
        })?;
        debug!(
            target: "pack::action",
            position = self.entries.len(),
            action = action.name(),
            "action committed"
        );
        self.entries.push(LogEntry { action, undo });
        self.undone.clear();
        Ok(())
    }

    /// Reverts the most recent action, returning it.
    pub fn undo_last(&mut self, world: &mut WorldState) -> Option<Action> {
        let entry = self.entries.pop()?;
        entry.undo.revert(world);
        debug!(
            target: "pack::action",
            position = self.entries.len(),
            action = entry.action.name(),
            "action reverted"
        );
        self.undone.push(entry.action.clone());
        Some(entry.action)
    }

    /// Reverts every action committed after `checkpoint`. Returns how many were reverted.
    pub fn rewind_to(&mut self, world: &mut WorldState, checkpoint: Checkpoint) -> usize {
        let mut reverted = 0;
        while self.entries.len() > checkpoint.0 {
            if self.undo_last(world).is_none() {
                break;
            }
            reverted += 1;
        }
        reverted
    }

    /// Re-applies the most recently undone action.
    ///
    /// Returns `Ok(false)` when there is nothing to redo.
    pub fn redo(&mut self, world: &mut WorldState, env: &Env<'_>) -> Result<bool, ActionError> {
        let Some(action) = self.undone.pop() else {
            return Ok(false);
        };
        let undo = match action.apply(world, env) {
            Ok(undo) => undo,
            Err(error) => {
                self.undone.push(action);
                return Err(error);
            }
        };
        self.entries.push(LogEntry { action, undo });
        Ok(true)
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Committed actions, oldest first.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.entries.iter().map(|entry| &entry.action)
    }

    /// Commitment to the committed actions; see [`super::compute_actions_root`].
    #[cfg(feature = "serde")]
    pub fn actions_root(&self) -> [u8; 32] {
        let actions: Vec<Action> = self.actions().cloned().collect();
        super::compute_actions_root(&actions)
    }
}
