//! Periodic drivers for the simulation.
//!
//! Decay and cooldown countdown run on two independent tokio intervals. Both
//! tasks belong to a [`SimulationTimers`] guard and stop when it is dropped
//! or shut down.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::{
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::{config::SimulationConfig, simulation::Garden};

pub type SharedGarden = Arc<Mutex<Garden>>;
pub type SharedClock = Arc<dyn Clock>;

/// Source of "now" for decay and action timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub fn shared(garden: Garden) -> SharedGarden {
    Arc::new(Mutex::new(garden))
}

pub struct SimulationTimers {
    tasks: Vec<JoinHandle<()>>,
}

impl SimulationTimers {
    pub fn start(garden: SharedGarden, clock: SharedClock, config: &SimulationConfig) -> Self {
        let decay = {
            let garden = garden.clone();
            spawn_every(config.tick_interval(), move || {
                let now = clock.now();
                garden.lock().on_tick(now);
                debug!(%now, "decay tick");
            })
        };
        let cooldown = spawn_every(config.cooldown_interval(), move || {
            garden.lock().on_cooldown_tick();
        });

        info!(
            tick_ms = config.tick_interval_ms,
            cooldown_ms = config.cooldown_interval_ms,
            "simulation timers started"
        );
        Self {
            tasks: vec![decay, cooldown],
        }
    }

    pub fn is_running(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(|task| !task.is_finished())
    }

    /// Stop both timers and wait until neither can touch the garden again.
    pub async fn shutdown(mut self) {
        let tasks = std::mem::take(&mut self.tasks);
        for task in &tasks {
            task.abort();
        }
        for task in tasks {
            let _ = task.await;
        }
        info!("simulation timers stopped");
    }
}

impl Drop for SimulationTimers {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

fn spawn_every<F>(period: Duration, mut on_tick: F) -> JoinHandle<()>
where
    F: FnMut() + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            on_tick();
        }
    })
}

#[cfg(test)]
mod tests {
    use chrono::Duration as ChronoDuration;

    use super::*;
    use crate::action::ActionId;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn start() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn fast_config() -> SimulationConfig {
        SimulationConfig {
            tick_interval_ms: 5,
            cooldown_interval_ms: 5,
            ..SimulationConfig::default()
        }
    }

    #[tokio::test]
    async fn cooldown_timer_counts_down() {
        let garden = shared(Garden::new("Bloom", start()));
        garden.lock().dispatch(ActionId::Talk, start());

        let clock: SharedClock = Arc::new(FixedClock(start()));
        let timers = SimulationTimers::start(garden.clone(), clock, &fast_config());
        assert!(timers.is_running());

        time::sleep(Duration::from_millis(200)).await;
        assert_eq!(garden.lock().cooldowns().remaining(ActionId::Talk), 0);
        timers.shutdown().await;
    }

    #[tokio::test]
    async fn decay_timer_reads_the_clock() {
        let garden = shared(Garden::new("Bloom", start()));
        let clock: SharedClock = Arc::new(FixedClock(start() + ChronoDuration::hours(1)));
        let timers = SimulationTimers::start(garden.clone(), clock, &fast_config());

        time::sleep(Duration::from_millis(50)).await;
        timers.shutdown().await;

        let pet = garden.lock().pet().clone();
        assert!(pet.health() < 70.0);
        assert!(pet.hunger() > 40.0);
        assert!(pet.gauges().is_within_bounds());
    }

    #[tokio::test]
    async fn shutdown_stops_both_timers() {
        let garden = shared(Garden::new("Bloom", start()));
        garden.lock().dispatch(ActionId::Water, start());

        let clock: SharedClock = Arc::new(FixedClock(start() + ChronoDuration::hours(1)));
        let timers = SimulationTimers::start(garden.clone(), clock, &fast_config());
        time::sleep(Duration::from_millis(30)).await;
        timers.shutdown().await;

        let frozen = garden.lock().get_state();
        time::sleep(Duration::from_millis(50)).await;
        assert_eq!(garden.lock().get_state(), frozen);
    }

    #[tokio::test]
    async fn dropping_the_guard_stops_the_timers() {
        let garden = shared(Garden::new("Bloom", start()));
        garden.lock().dispatch(ActionId::Water, start());

        let clock: SharedClock = Arc::new(FixedClock(start()));
        let timers = SimulationTimers::start(garden.clone(), clock, &fast_config());
        drop(timers);

        time::sleep(Duration::from_millis(20)).await;
        let frozen = garden.lock().cooldowns().remaining(ActionId::Water);
        time::sleep(Duration::from_millis(50)).await;
        assert_eq!(garden.lock().cooldowns().remaining(ActionId::Water), frozen);
    }
}
