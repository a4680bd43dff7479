//! Cosmetic records of resolved sub-events.
//!
//! Playback is append-only during a combat. Game logic may only filter it by
//! [`Playback::nid`] and attacker, never by payload.

use crate::state::{ItemUid, Position, UnitId};

/// Payload of one playback record.
#[derive(Clone, Debug, PartialEq, Eq, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PlaybackKind {
    DamageHit { damage: i32 },
    CritHit { damage: i32 },
    Miss,
    HealHit { amount: i32 },
    StatusHit { skill: String },
    StealHit { item: ItemUid },
    ProcActivated { skill: String },
    Shove { from: Position, to: Position },
    Collision { at: Position },
    Restore { skill: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Playback {
    pub kind: PlaybackKind,
    pub attacker: UnitId,
    pub defender: UnitId,
}

impl Playback {
    pub fn new(kind: PlaybackKind, attacker: UnitId, defender: UnitId) -> Self {
        Self {
            kind,
            attacker,
            defender,
        }
    }

    /// Snake-case record name (`damage_hit`, `status_hit`, ...).
    pub fn nid(&self) -> &str {
        self.kind.as_ref()
    }

    pub fn is_hit(&self) -> bool {
        matches!(
            self.kind,
            PlaybackKind::DamageHit { .. } | PlaybackKind::CritHit { .. }
        )
    }
}

/// Ordered playback for one combat or turn hook run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaybackLog {
    entries: Vec<Playback>,
}

impl PlaybackLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: Playback) {
        self.entries.push(entry);
    }

    pub fn record(&mut self, kind: PlaybackKind, attacker: UnitId, defender: UnitId) {
        self.push(Playback::new(kind, attacker, defender));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Playback> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[Playback] {
        &self.entries
    }

    /// Records with the given nid, in order.
    pub fn with_nid<'a>(&'a self, nid: &'a str) -> impl Iterator<Item = &'a Playback> + 'a {
        self.entries.iter().filter(move |entry| entry.nid() == nid)
    }

    /// True when `attacker` has a damage or crit hit recorded.
    pub fn landed_hit(&self, attacker: UnitId) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.attacker == attacker && entry.is_hit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landed_hit_filters_by_attacker() {
        let mut playback = PlaybackLog::new();
        playback.record(PlaybackKind::Miss, UnitId(1), UnitId(2));
        playback.record(PlaybackKind::CritHit { damage: 9 }, UnitId(2), UnitId(1));

        assert!(!playback.landed_hit(UnitId(1)));
        assert!(playback.landed_hit(UnitId(2)));
        assert_eq!(playback.with_nid("crit_hit").count(), 1);
        assert_eq!(playback.entries()[0].nid(), "miss");
    }
}
