use thiserror::Error;

use crate::action::ActionId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GardenError {
    /// The action vocabulary is closed; anything outside it is a caller bug.
    #[error("unknown action `{0}` (expected one of feed, water, play, talk)")]
    UnknownAction(String),
    #[error("{action} is on cooldown for {remaining}s")]
    ActionOnCooldown { action: ActionId, remaining: u32 },
}
