use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::GardenError, pet::PetState};

use super::{ActionId, CooldownState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub accepted: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_cooldown: Option<u32>,
}

impl ActionResult {
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            accepted: true,
            message: message.into(),
            remaining_cooldown: None,
        }
    }

    pub fn on_cooldown(action: ActionId, remaining: u32) -> Self {
        let reason = GardenError::ActionOnCooldown { action, remaining };
        Self {
            accepted: false,
            message: format!("⏱️ {reason}"),
            remaining_cooldown: Some(remaining),
        }
    }
}

/// Gate `action` on its cooldown and, if ready, apply it.
///
/// A rejected action returns both inputs unchanged.
pub fn perform(
    pet: &PetState,
    cooldowns: &CooldownState,
    action: ActionId,
    now: DateTime<Utc>,
) -> (PetState, CooldownState, ActionResult) {
    let remaining = cooldowns.remaining(action);
    if remaining > 0 {
        return (
            pet.clone(),
            cooldowns.clone(),
            ActionResult::on_cooldown(action, remaining),
        );
    }

    let spec = action.spec();
    let mut pet = pet.clone();
    pet.set_gauges(spec.apply(pet.gauges()));
    pet.touch(spec.refreshes, now);

    let mut cooldowns = cooldowns.clone();
    cooldowns.start(action, spec.cooldown_secs);

    (pet, cooldowns, ActionResult::accepted(spec.message))
}
