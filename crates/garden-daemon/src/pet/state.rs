use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const GAUGE_MIN: f64 = 0.0;
pub const GAUGE_MAX: f64 = 100.0;

/// Clamp a raw value into the gauge range. NaN collapses to the floor.
pub fn clamp_gauge(value: f64) -> f64 {
    if value.is_nan() {
        return GAUGE_MIN;
    }
    value.clamp(GAUGE_MIN, GAUGE_MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gauges {
    pub health: f64,
    pub hunger: f64,
    pub happiness: f64,
    pub growth: f64,
}

impl Gauges {
    pub const INITIAL: Self = Self {
        health: 70.0,
        hunger: 40.0,
        happiness: 60.0,
        growth: 0.0,
    };

    pub fn clamped(self) -> Self {
        Self {
            health: clamp_gauge(self.health),
            hunger: clamp_gauge(self.hunger),
            happiness: clamp_gauge(self.happiness),
            growth: clamp_gauge(self.growth),
        }
    }

    pub fn is_within_bounds(&self) -> bool {
        [self.health, self.hunger, self.happiness, self.growth]
            .iter()
            .all(|v| (GAUGE_MIN..=GAUGE_MAX).contains(v))
    }
}

impl Default for Gauges {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Which care timestamp an action refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timestamp {
    LastFed,
    LastWatered,
    LastPlayed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetState {
    name: String,
    #[serde(flatten)]
    gauges: Gauges,
    pub last_fed: DateTime<Utc>,
    pub last_watered: DateTime<Utc>,
    pub last_played: DateTime<Utc>,
}

impl PetState {
    pub fn new(name: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            gauges: Gauges::INITIAL,
            last_fed: started_at,
            last_watered: started_at,
            last_played: started_at,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gauges(&self) -> Gauges {
        self.gauges
    }

    /// Every gauge write goes through here, so the range invariant holds
    /// regardless of what the caller computed.
    pub fn set_gauges(&mut self, gauges: Gauges) {
        self.gauges = gauges.clamped();
    }

    pub fn health(&self) -> f64 {
        self.gauges.health
    }

    pub fn hunger(&self) -> f64 {
        self.gauges.hunger
    }

    pub fn happiness(&self) -> f64 {
        self.gauges.happiness
    }

    pub fn growth(&self) -> f64 {
        self.gauges.growth
    }

    pub fn timestamp(&self, field: Timestamp) -> DateTime<Utc> {
        match field {
            Timestamp::LastFed => self.last_fed,
            Timestamp::LastWatered => self.last_watered,
            Timestamp::LastPlayed => self.last_played,
        }
    }

    pub fn touch(&mut self, field: Timestamp, now: DateTime<Utc>) {
        match field {
            Timestamp::LastFed => self.last_fed = now,
            Timestamp::LastWatered => self.last_watered = now,
            Timestamp::LastPlayed => self.last_played = now,
        }
    }
}
