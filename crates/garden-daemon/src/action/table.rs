use crate::pet::{Gauges, Timestamp};

use super::ActionId;

/// Static description of one care action.
#[derive(Debug)]
pub struct ActionSpec {
    pub id: ActionId,
    pub cooldown_secs: u32,
    pub message: &'static str,
    pub refreshes: Timestamp,
    effect: fn(Gauges) -> Gauges,
}

impl ActionSpec {
    /// Apply the action's deltas. The result is always back in range.
    pub fn apply(&self, gauges: Gauges) -> Gauges {
        (self.effect)(gauges).clamped()
    }
}

// Indexed by `ActionId as usize`; `table_is_keyed_by_declaration_order` guards it.
static ACTIONS: [ActionSpec; 4] = [
    ActionSpec {
        id: ActionId::Feed,
        cooldown_secs: 120,
        message: "🍎 Nom nom! Your pet is happy!",
        refreshes: Timestamp::LastFed,
        effect: |g| Gauges {
            hunger: g.hunger - 30.0,
            health: g.health + 5.0,
            ..g
        },
    },
    ActionSpec {
        id: ActionId::Water,
        cooldown_secs: 240,
        message: "💧 Refreshed! Your garden is thriving!",
        refreshes: Timestamp::LastWatered,
        effect: |g| Gauges {
            health: g.health + 20.0,
            happiness: g.happiness + 10.0,
            ..g
        },
    },
    ActionSpec {
        id: ActionId::Play,
        cooldown_secs: 60,
        message: "🎮 Wheee! Your pet is having fun!",
        refreshes: Timestamp::LastPlayed,
        effect: |g| Gauges {
            happiness: g.happiness + 25.0,
            hunger: g.hunger + 10.0,
            ..g
        },
    },
    ActionSpec {
        id: ActionId::Talk,
        cooldown_secs: 10,
        message: "💬 Your pet feels a little better!",
        refreshes: Timestamp::LastPlayed,
        effect: |g| Gauges {
            happiness: g.happiness + 5.0,
            ..g
        },
    },
];

pub(super) fn lookup(id: ActionId) -> &'static ActionSpec {
    &ACTIONS[id as usize]
}
