mod decay;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    action::{self, ActionId, ActionResult, CooldownState},
    error::GardenError,
    pet::{GrowthStage, PetCondition, PetState},
};

pub use decay::{DecayRates, decay, decay_in_place, hours_since_fed};

pub const WELCOME_MESSAGE: &str = "Welcome to your garden! 🌱";

/// The single owned simulation state: one pet, its cooldowns, and the
/// latest feedback line.
#[derive(Debug, Clone)]
pub struct Garden {
    pet: PetState,
    cooldowns: CooldownState,
    message: String,
}

impl Garden {
    pub fn new(pet_name: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            pet: PetState::new(pet_name, started_at),
            cooldowns: CooldownState::new(),
            message: WELCOME_MESSAGE.into(),
        }
    }

    pub fn pet(&self) -> &PetState {
        &self.pet
    }

    pub fn cooldowns(&self) -> &CooldownState {
        &self.cooldowns
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn get_state(&self) -> GardenSnapshot {
        let gauges = self.pet.gauges();
        GardenSnapshot {
            pet: self.pet.clone(),
            cooldowns: self.cooldowns.clone(),
            stage: GrowthStage::classify(gauges.growth),
            condition: PetCondition::assess(&gauges),
            message: self.message.clone(),
        }
    }

    pub fn dispatch(&mut self, action: ActionId, now: DateTime<Utc>) -> ActionResult {
        let (pet, cooldowns, result) = action::perform(&self.pet, &self.cooldowns, action, now);
        if result.accepted {
            info!(%action, pet = self.pet.name(), "action performed");
        } else {
            debug!(%action, remaining = ?result.remaining_cooldown, "action blocked by cooldown");
        }
        self.pet = pet;
        self.cooldowns = cooldowns;
        self.message.clone_from(&result.message);
        result
    }

    /// Dispatch by wire name. Unknown names are rejected before any state is read.
    pub fn dispatch_named(
        &mut self,
        action: &str,
        now: DateTime<Utc>,
    ) -> Result<ActionResult, GardenError> {
        let action: ActionId = action.parse()?;
        Ok(self.dispatch(action, now))
    }

    pub fn on_tick(&mut self, now: DateTime<Utc>) {
        decay_in_place(&mut self.pet, now);
    }

    pub fn on_cooldown_tick(&mut self) {
        self.cooldowns.tick();
    }
}

/// Read-only view handed to presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GardenSnapshot {
    pub pet: PetState,
    pub cooldowns: CooldownState,
    pub stage: GrowthStage,
    pub condition: PetCondition,
    pub message: String,
}
