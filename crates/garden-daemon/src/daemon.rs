use std::{future::Future, time::Duration};

use chrono::Utc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::{
    bridge::{Bridge, BridgeHandle, ClientMessage, DaemonMessage},
    runtime::{SharedClock, SharedGarden},
};

/// Glue between the bridge and the simulation. Owns nothing but handles.
pub struct Daemon {
    garden: SharedGarden,
    clock: SharedClock,
    bridge: Bridge,
    broadcast_interval: Duration,
}

impl Daemon {
    pub fn new(
        garden: SharedGarden,
        clock: SharedClock,
        bridge: Bridge,
        broadcast_interval: Duration,
    ) -> Self {
        Self {
            garden,
            clock,
            bridge,
            broadcast_interval,
        }
    }

    /// Serve until `shutdown` resolves or the bridge closes.
    pub async fn run(mut self, shutdown: impl Future<Output = ()>) {
        let handle = self.bridge.handle();
        let mut render = time::interval_at(
            Instant::now() + self.broadcast_interval,
            self.broadcast_interval,
        );
        render.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                _ = render.tick() => {
                    let snapshot = self.garden.lock().get_state();
                    handle.broadcast(DaemonMessage::State { snapshot });
                }
                next = self.bridge.next_message() => {
                    let Some(msg) = next else { break };
                    handle_client_message(msg, &self.garden, &self.clock, &handle);
                }
            }
        }
    }
}

pub fn handle_client_message(
    message: ClientMessage,
    garden: &SharedGarden,
    clock: &SharedClock,
    bridge: &BridgeHandle,
) {
    match message {
        ClientMessage::Ping { nonce } => {
            bridge.broadcast(DaemonMessage::Pong { nonce });
        }
        ClientMessage::GetState => {
            let snapshot = garden.lock().get_state();
            bridge.broadcast(DaemonMessage::State { snapshot });
        }
        ClientMessage::Dispatch { action } => {
            let now = clock.now();
            let outcome = {
                let mut garden = garden.lock();
                garden
                    .dispatch_named(&action, now)
                    .map(|result| (result, garden.get_state()))
            };
            match outcome {
                Ok((result, snapshot)) => {
                    log_event(bridge, "info", result.message.clone());
                    bridge.broadcast(DaemonMessage::ActionResult { action, result });
                    bridge.broadcast(DaemonMessage::State { snapshot });
                }
                Err(err) => {
                    warn!(%err, "Rejected client dispatch");
                    bridge.broadcast(DaemonMessage::Error {
                        message: err.to_string(),
                    });
                }
            }
        }
    }
}

fn log_event(bridge: &BridgeHandle, level: &str, message: impl Into<String>) {
    bridge.broadcast(DaemonMessage::Log {
        level: level.to_string(),
        message: message.into(),
        timestamp: Utc::now().timestamp(),
    });
}
