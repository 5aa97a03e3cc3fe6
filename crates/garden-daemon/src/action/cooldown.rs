use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ActionId;

/// Remaining cooldown per action, in whole seconds. Missing means ready.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CooldownState {
    remaining: BTreeMap<ActionId, u32>,
}

impl CooldownState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remaining(&self, action: ActionId) -> u32 {
        self.remaining.get(&action).copied().unwrap_or(0)
    }

    pub fn is_ready(&self, action: ActionId) -> bool {
        self.remaining(action) == 0
    }

    pub fn start(&mut self, action: ActionId, seconds: u32) {
        self.remaining.insert(action, seconds);
    }

    /// One second of countdown for every running cooldown.
    pub fn tick(&mut self) {
        for secs in self.remaining.values_mut() {
            *secs = secs.saturating_sub(1);
        }
    }
}
