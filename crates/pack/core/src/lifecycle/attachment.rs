use crate::components::Component;
use crate::state::{ComponentSet, ItemUid, UnitId, WorldState};

use super::scratch::{AttachmentKey, AttachmentSource};

/// One component bound to one item or skill instance of a unit.
#[derive(Clone, Debug)]
pub struct Attachment {
    pub key: AttachmentKey,
    pub owner: UnitId,
    components: ComponentSet,
}

impl Attachment {
    pub fn component(&self) -> &Component {
        &self.components[usize::from(self.key.index)]
    }
}

fn expand(
    owner: UnitId,
    source: AttachmentSource,
    components: &ComponentSet,
) -> impl Iterator<Item = Attachment> + '_ {
    (0..components.len()).map(move |index| Attachment {
        key: AttachmentKey::new(source, index as u16),
        owner,
        components: components.clone(),
    })
}

/// Attachments taking part in a combat: the combat item's components, then
/// every skill's components, in inventory order.
pub fn gather_combat(world: &WorldState, unit: UnitId, item: Option<ItemUid>) -> Vec<Attachment> {
    let Some(state) = world.unit(unit) else {
        return Vec::new();
    };
    let mut attachments = Vec::new();
    if let Some(item) = item.and_then(|uid| state.item(uid)) {
        attachments.extend(expand(unit, AttachmentSource::Item(item.uid), &item.components));
    }
    for skill in &state.skills {
        attachments.extend(expand(unit, AttachmentSource::Skill(skill.uid), &skill.components));
    }
    attachments
}

/// Attachments of every item and skill a unit holds, for turn hooks.
pub fn gather_all(world: &WorldState, unit: UnitId) -> Vec<Attachment> {
    let Some(state) = world.unit(unit) else {
        return Vec::new();
    };
    let mut attachments = Vec::new();
    for item in &state.items {
        attachments.extend(expand(unit, AttachmentSource::Item(item.uid), &item.components));
    }
    for skill in &state.skills {
        attachments.extend(expand(unit, AttachmentSource::Skill(skill.uid), &skill.components));
    }
    attachments
}

/// Attachments of a single item.
pub fn gather_item(world: &WorldState, unit: UnitId, item: ItemUid) -> Vec<Attachment> {
    world
        .unit(unit)
        .and_then(|state| state.item(item))
        .map(|instance| expand(unit, AttachmentSource::Item(item), &instance.components).collect())
        .unwrap_or_default()
}
