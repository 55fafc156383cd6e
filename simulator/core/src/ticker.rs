//! Time Driver
//!
//! A 1 Hz heartbeat task that feeds real elapsed time into the simulator.
//! The heartbeat frequency is deliberately decoupled from the 30-second
//! simulation interval: the accumulator inside
//! [`Simulator::advance_time`](crate::Simulator::advance_time) decides when
//! whole ticks fire, so catch-up is a pure function of elapsed duration.
//!
//! Shutdown is cooperative via a `watch` channel; the task exits on its
//! next wake after the flag flips.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};

use crate::simulator::Simulator;

/// Heartbeat period of the time driver.
pub const HEARTBEAT: Duration = Duration::from_secs(1);

/// Run the heartbeat loop until `shutdown` flips to `true`.
///
/// Each beat measures real elapsed time since the previous one (clamped
/// to zero, never negative) and hands it to the simulator.
pub async fn run(sim: Arc<Simulator>, mut shutdown: watch::Receiver<bool>) {
    let mut heartbeat = tokio::time::interval(HEARTBEAT);
    heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last_beat = Instant::now();
    loop {
        tokio::select! {
            _ = heartbeat.tick() => {
                let now = Instant::now();
                let elapsed = now.saturating_duration_since(last_beat);
                last_beat = now;

                let ticks = sim.advance_time(elapsed);
                if ticks > 0 {
                    tracing::debug!(ticks, "applied simulation ticks");
                }
            }
            changed = shutdown.changed() => {
                // A closed channel also means the owner is gone.
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
    tracing::debug!("time driver stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pet::Pet;
    use crate::tables::ActionTables;
    use chrono::Utc;

    fn fresh_sim() -> Arc<Simulator> {
        Arc::new(Simulator::new(
            Pet::hatch("Ticked", Utc::now()),
            ActionTables::default(),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn test_heartbeats_accumulate_into_ticks() {
        let sim = fresh_sim();
        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(run(sim.clone(), rx));

        // 61 simulated seconds of heartbeats covers two whole ticks.
        tokio::time::sleep(Duration::from_secs(61)).await;
        tx.send(true).expect("ticker alive");
        handle.await.expect("ticker joins");

        let pet = sim.snapshot();
        assert_eq!(pet.hunger, 60);
        assert_eq!(pet.energy, 94);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_promptly() {
        let sim = fresh_sim();
        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(run(sim, rx));

        tx.send(true).expect("ticker alive");
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("ticker should stop on shutdown signal")
            .expect("ticker joins");
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_sender_stops_ticker() {
        let sim = fresh_sim();
        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(run(sim, rx));

        drop(tx);
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("ticker should stop when owner is gone")
            .expect("ticker joins");
    }
}
