//! Virtual garden pet simulation.
//!
//! The core is a small state machine: gauges that decay with elapsed time,
//! four cooldown-gated care actions, and a growth stage classifier. The
//! [`runtime`] module drives it from two periodic timers and the [`bridge`]
//! module exposes it to an external presentation layer over WebSocket.

pub mod action;
pub mod bridge;
pub mod config;
pub mod daemon;
pub mod error;
pub mod pet;
pub mod runtime;
pub mod simulation;

pub use action::{ActionId, ActionResult, ActionSpec, CooldownState};
pub use error::GardenError;
pub use pet::{Gauges, GrowthStage, PetCondition, PetState};
pub use simulation::{Garden, GardenSnapshot};
