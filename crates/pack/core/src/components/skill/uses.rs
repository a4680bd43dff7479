//! Skills that spend extra uses of the combat item.

use crate::action::{Action, ObjRef};
use crate::lifecycle::{HookContext, Hooks, QueryContext};

pub const USES: &str = "uses";
pub const LOSE_USES_ON_MISS: &str = "lose_uses_on_miss";

/// Items without a `uses` entry are treated as holding this many.
const UNLIMITED_USES: i64 = 999;

/// Spends `amount` uses per strike instead of one.
///
/// The host still deducts the final use itself, so hooks write one more
/// than the full cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CostUses {
    pub amount: u32,
}

impl Default for CostUses {
    fn default() -> Self {
        Self { amount: 2 }
    }
}

impl CostUses {
    pub const HOOKS: Hooks = Hooks::CONDITION
        .union(Hooks::ON_HIT)
        .union(Hooks::ON_MISS);

    pub fn condition(&self, query: &QueryContext<'_>) -> bool {
        let uses = query
            .item_instance()
            .and_then(|item| item.data.int(USES))
            .unwrap_or(UNLIMITED_USES);
        uses > i64::from(self.amount)
    }

    fn spend(&self, ctx: &mut HookContext<'_>, refund_host_use: bool) {
        let Some(item) = ctx.combat_item() else {
            return;
        };
        let Some(uses) = item.data.int(USES) else {
            return;
        };
        let mut next = uses - i64::from(self.amount);
        if refund_host_use {
            next += 1;
        }
        ctx.push(Action::SetObjData {
            target: ObjRef::Item(item.uid),
            key: USES.to_owned(),
            value: next.max(0).into(),
        });
    }

    pub fn on_hit(&self, ctx: &mut HookContext<'_>) {
        self.spend(ctx, true);
    }

    pub fn on_miss(&self, ctx: &mut HookContext<'_>) {
        let lose_on_miss = ctx
            .combat_item()
            .is_some_and(|item| item.data.flag(LOSE_USES_ON_MISS));
        self.spend(ctx, lose_on_miss);
    }
}
