//! Combat-scoped scratch records.
//!
//! Component descriptors are shared and immutable, so anything a component
//! remembers within one combat lives here instead. The arena hands out one
//! record per `(session, attachment)` pair on first use and drops every
//! record of a session when the combat closes. No component clears scratch.

use std::collections::{BTreeMap, BTreeSet};

use crate::state::{ItemUid, SkillUid, UnitId};

/// Identifies one open combat in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionId(pub u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

/// Item or skill instance a component is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttachmentSource {
    Item(ItemUid),
    Skill(SkillUid),
}

/// One component of one item/skill instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttachmentKey {
    pub source: AttachmentSource,
    /// Index of the component within the instance's component set.
    pub index: u16,
}

impl AttachmentKey {
    pub const fn new(source: AttachmentSource, index: u16) -> Self {
        Self { source, index }
    }
}

/// Per-combat memory of one attachment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scratch {
    /// A proc granted its transient skill during the current strike.
    pub did_action: bool,
    /// Units struck by the owner during this combat.
    pub did_hit: BTreeSet<UnitId>,
    /// The owner lost hp to a strike during this combat.
    pub took_damage: bool,
    /// Skill condition recorded at combat start.
    pub condition_at_start: Option<bool>,
}

#[derive(Debug, Default)]
pub struct ScratchArena {
    sessions: BTreeMap<SessionId, BTreeMap<AttachmentKey, Scratch>>,
    next_session: u64,
}

impl ScratchArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a fresh session with no records.
    pub fn open(&mut self) -> SessionId {
        let session = SessionId(self.next_session);
        self.next_session += 1;
        self.sessions.insert(session, BTreeMap::new());
        session
    }

    /// Record for `key`, created empty on first access.
    ///
    /// Accessing a closed session reopens it; callers only do so between
    /// [`open`](Self::open) and [`close`](Self::close).
    pub fn scratch_mut(&mut self, session: SessionId, key: AttachmentKey) -> &mut Scratch {
        self.sessions
            .entry(session)
            .or_default()
            .entry(key)
            .or_default()
    }

    pub fn scratch(&self, session: SessionId, key: AttachmentKey) -> Option<&Scratch> {
        self.sessions.get(&session)?.get(&key)
    }

    /// Drops every record of the session. Returns how many records existed.
    pub fn close(&mut self, session: SessionId) -> usize {
        self.sessions
            .remove(&session)
            .map_or(0, |records| records.len())
    }

    pub fn is_open(&self, session: SessionId) -> bool {
        self.sessions.contains_key(&session)
    }

    /// Number of sessions not yet closed.
    pub fn open_sessions(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(uid: u32) -> AttachmentKey {
        AttachmentKey::new(AttachmentSource::Item(ItemUid(uid)), 0)
    }

    #[test]
    fn close_discards_records() {
        let mut arena = ScratchArena::new();
        let first = arena.open();
        arena.scratch_mut(first, key(1)).did_hit.insert(UnitId(7));
        assert_eq!(arena.close(first), 1);
        assert!(!arena.is_open(first));

        let second = arena.open();
        assert_ne!(first, second);
        assert!(arena.scratch_mut(second, key(1)).did_hit.is_empty());
    }

    #[test]
    fn sessions_are_isolated() {
        let mut arena = ScratchArena::new();
        let a = arena.open();
        let b = arena.open();
        arena.scratch_mut(a, key(1)).took_damage = true;

        assert!(arena.scratch(b, key(1)).is_none());
        assert_eq!(arena.open_sessions(), 2);
    }
}
