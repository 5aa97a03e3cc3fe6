use chrono::{DateTime, Utc};

use crate::pet::{Gauges, PetState};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Gauge change per hour elapsed since the last feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayRates {
    pub health: f64,
    pub hunger: f64,
    pub happiness: f64,
    pub growth: f64,
}

impl DecayRates {
    pub const STANDARD: Self = Self {
        health: -2.0,
        hunger: 3.0,
        happiness: -1.0,
        growth: 0.5,
    };
}

/// Hours since `last_fed`. A `now` earlier than the reference counts as zero.
pub fn hours_since_fed(pet: &PetState, now: DateTime<Utc>) -> f64 {
    let elapsed = (now - pet.last_fed).num_milliseconds().max(0);
    elapsed as f64 / MILLIS_PER_HOUR
}

/// Decay every gauge by the time elapsed since the last feed.
///
/// `last_fed` is the only elapsed-time reference and it moves only on a feed,
/// so each call reapplies the full time-since-feed; it is not a per-tick delta.
pub fn decay(pet: &PetState, now: DateTime<Utc>) -> PetState {
    let mut next = pet.clone();
    decay_in_place(&mut next, now);
    next
}

pub fn decay_in_place(pet: &mut PetState, now: DateTime<Utc>) {
    let hours = hours_since_fed(pet, now);
    if hours == 0.0 {
        return;
    }
    let rates = DecayRates::STANDARD;
    let g = pet.gauges();
    pet.set_gauges(Gauges {
        health: g.health + hours * rates.health,
        hunger: g.hunger + hours * rates.hunger,
        happiness: g.happiness + hours * rates.happiness,
        growth: g.growth + hours * rates.growth,
    });
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn start() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn one_hour_without_feeding() {
        let pet = PetState::new("Bloom", start());
        let pet = decay(&pet, start() + Duration::seconds(3600));
        assert_eq!(pet.health(), 68.0);
        assert_eq!(pet.hunger(), 43.0);
        assert_eq!(pet.happiness(), 59.0);
        assert_eq!(pet.growth(), 0.5);
    }

    #[test]
    fn tick_at_reference_time_is_a_no_op() {
        let pet = PetState::new("Bloom", start());
        assert_eq!(decay(&pet, start()), pet);
    }

    #[test]
    fn earlier_now_does_not_reverse_decay() {
        let pet = PetState::new("Bloom", start());
        assert_eq!(decay(&pet, start() - Duration::seconds(60)), pet);
    }

    #[test]
    fn repeated_ticks_reapply_time_since_feed() {
        let pet = PetState::new("Bloom", start());
        let now = start() + Duration::seconds(3600);
        let once = decay(&pet, now);
        let twice = decay(&once, now);
        assert_eq!(twice.health(), 66.0);
        assert_eq!(twice.hunger(), 46.0);
    }

    #[test]
    fn long_neglect_pins_gauges_to_bounds() {
        let pet = PetState::new("Bloom", start());
        let pet = decay(&pet, start() + Duration::days(30));
        assert_eq!(pet.health(), 0.0);
        assert_eq!(pet.hunger(), 100.0);
        assert_eq!(pet.happiness(), 0.0);
        assert_eq!(pet.growth(), 100.0);
    }

    #[test]
    fn other_timestamps_do_not_affect_decay() {
        let mut pet = PetState::new("Bloom", start());
        pet.last_watered = start() + Duration::seconds(3000);
        pet.last_played = start() + Duration::seconds(3500);
        let pet = decay(&pet, start() + Duration::seconds(3600));
        assert_eq!(pet.health(), 68.0);
    }
}
