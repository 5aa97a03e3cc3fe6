//! Care actions: the static action table, cooldown bookkeeping, and the
//! controller that gates one against the other.

mod controller;
mod cooldown;
mod table;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::GardenError;

pub use controller::{ActionResult, perform};
pub use cooldown::CooldownState;
pub use table::ActionSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionId {
    Feed,
    Water,
    Play,
    Talk,
}

impl ActionId {
    pub const ALL: [ActionId; 4] = [Self::Feed, Self::Water, Self::Play, Self::Talk];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Water => "water",
            Self::Play => "play",
            Self::Talk => "talk",
        }
    }

    pub fn spec(self) -> &'static ActionSpec {
        table::lookup(self)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionId {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| GardenError::UnknownAction(s.to_string()))
    }
}
