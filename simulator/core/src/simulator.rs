//! Simulation Core
//!
//! The [`Simulator`] owns the pet and its tick accumulator behind a state
//! lock, the event log behind an independent lock, and a coalescing
//! refresh signal for renderers.
//!
//! # Concurrency
//!
//! Three kinds of participants share a `Simulator` (usually through an
//! `Arc`):
//!
//! - the ticker task, which calls [`Simulator::advance_time`] once per
//!   heartbeat;
//! - action handlers (feed/play/sleep/restart), one short critical
//!   section per invocation;
//! - renderers, which read [`Simulator::snapshot`] and
//!   [`Simulator::events`] and await [`Simulator::refreshed`].
//!
//! Lock ordering is strict: the events lock is never taken while the
//! state lock is held. Mutations collect their events into a pending list
//! and publish them after the state lock is released, so an observer that
//! sees an event is guaranteed to see the state that produced it.

use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use tokio::sync::Notify;

use crate::events::{EventKind, EventLog, GameEvent};
use crate::pet::{random_name, Pet, Stage};
use crate::tables::{clamp_stat, clamp_weight, ActionTables};

/// One simulation tick covers this much wall-clock time.
pub const UPDATE_INTERVAL: Duration = Duration::from_secs(30);

/// State guarded by the state lock: the pet plus the tick accumulator.
#[derive(Debug)]
struct SimState {
    pet: Pet,
    accumulator: Duration,
}

/// The simulation engine. See the module docs for the locking discipline.
pub struct Simulator {
    tables: ActionTables,
    state: RwLock<SimState>,
    events: Mutex<EventLog>,
    refresh: Notify,
}

impl Simulator {
    /// Create a simulator owning `pet`, with the given action catalog.
    #[must_use]
    pub fn new(pet: Pet, tables: ActionTables) -> Self {
        Self {
            tables,
            state: RwLock::new(SimState {
                pet,
                accumulator: Duration::ZERO,
            }),
            events: Mutex::new(EventLog::new()),
            refresh: Notify::new(),
        }
    }

    /// The action catalog this simulator was built with.
    #[must_use]
    pub fn tables(&self) -> &ActionTables {
        &self.tables
    }

    /// By-value copy of the pet, taken under the state lock.
    #[must_use]
    pub fn snapshot(&self) -> Pet {
        self.state.read().pet.clone()
    }

    /// Copy of the event log in insertion order (oldest first).
    #[must_use]
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.lock().to_vec()
    }

    /// Wait until a state change requests a redraw.
    ///
    /// The signal is single-slot: refreshes requested before anyone waits
    /// are not lost, and a burst of changes wakes the renderer once.
    pub async fn refreshed(&self) {
        self.refresh.notified().await;
    }

    /// Request a redraw without changing state (e.g. after a resize).
    pub fn request_refresh(&self) {
        self.refresh.notify_one();
    }

    /// Accumulate `elapsed` wall-clock time and apply every whole tick it
    /// covers. Returns the number of ticks applied.
    ///
    /// Ticks stop early if the pet dies; the death tick itself counts.
    pub fn advance_time(&self, elapsed: Duration) -> u64 {
        if elapsed.is_zero() {
            return 0;
        }

        let mut pending = Vec::new();
        let mut applied: u64 = 0;
        {
            let mut st = self.state.write();
            st.accumulator += elapsed;
            let interval = UPDATE_INTERVAL.as_millis();
            let ticks = u64::try_from(st.accumulator.as_millis() / interval).unwrap_or(u64::MAX);
            if ticks > 0 {
                let remainder = st.accumulator.as_millis() % interval;
                st.accumulator = Duration::from_millis(u64::try_from(remainder).unwrap_or(0));
                for _ in 0..ticks {
                    Self::tick_pet(&mut st.pet, Utc::now(), &mut pending);
                    applied += 1;
                    if !st.pet.alive {
                        break;
                    }
                }
            }
        }

        if applied > 0 {
            self.publish(pending);
        }
        applied
    }

    /// Replay the wall-clock gap between the previous session and now.
    ///
    /// `last_login` of `None` means there is nothing to catch up on. A
    /// negative gap (clock regression) is clamped to zero. If any ticks
    /// were applied, a single PROGRESS event summarizes the gap.
    pub fn apply_offline_progress(
        &self,
        last_login: Option<DateTime<Utc>>,
        current_login: DateTime<Utc>,
    ) {
        let Some(last) = last_login else { return };
        let elapsed = (current_login - last).to_std().unwrap_or(Duration::ZERO);
        if elapsed.is_zero() {
            return;
        }

        let ticks = self.advance_time(elapsed);
        if ticks > 0 {
            tracing::info!(ticks, gap = %format_offline_gap(elapsed), "applied offline progress");
            self.publish(vec![GameEvent::now(
                EventKind::Progress,
                format!(
                    "Time passed while you were away: {}.",
                    format_offline_gap(elapsed)
                ),
            )]);
        }
    }

    /// Feed the pet the food at `index`. Returns whether anything changed.
    ///
    /// Invalid indices and dead pets are silently ignored.
    pub fn feed(&self, index: usize) -> bool {
        let Some(food) = self.tables.foods.get(index).cloned() else {
            tracing::debug!(index, "feed with out-of-range food index");
            return false;
        };

        let event;
        {
            let mut st = self.state.write();
            let pet = &mut st.pet;
            if !pet.alive {
                return false;
            }

            pet.hunger = clamp_stat(pet.hunger - food.nutrition);
            pet.happiness = clamp_stat(pet.happiness + food.happiness);
            pet.energy = clamp_stat(pet.energy + food.energy);
            pet.weight += food.weight_gain;
            pet.last_fed = Utc::now();

            event = GameEvent::now(
                EventKind::Feed,
                format!(
                    "Fed {}! Hunger -{}, Happiness +{}",
                    food.name, food.nutrition, food.happiness
                ),
            );
        }

        self.publish(vec![event]);
        true
    }

    /// Play the game at `index`. Returns whether anything changed.
    ///
    /// Requires at least 10 energy; declined silently below that, like
    /// invalid indices and dead pets.
    pub fn play(&self, index: usize) -> bool {
        let Some(game) = self.tables.games.get(index).cloned() else {
            tracing::debug!(index, "play with out-of-range game index");
            return false;
        };

        let event;
        {
            let mut st = self.state.write();
            let pet = &mut st.pet;
            if !pet.alive || pet.energy < 10 {
                return false;
            }

            pet.happiness = clamp_stat(pet.happiness + game.happiness);
            pet.energy = clamp_stat(pet.energy + game.energy_delta);
            pet.health = clamp_stat(pet.health + game.health);
            pet.weight = clamp_weight(pet.weight - game.weight_loss);
            pet.last_played = Utc::now();

            event = GameEvent::now(
                EventKind::Play,
                format!(
                    "Played {}! Happiness +{}, Energy {}",
                    game.name, game.happiness, game.energy_delta
                ),
            );
        }

        self.publish(vec![event]);
        true
    }

    /// Put the pet to sleep with the option at `index`. Returns whether
    /// anything changed.
    ///
    /// The option's nominal duration is descriptive; it does not advance
    /// the simulation clock.
    pub fn sleep(&self, index: usize) -> bool {
        let Some(option) = self.tables.sleeps.get(index).cloned() else {
            tracing::debug!(index, "sleep with out-of-range option index");
            return false;
        };

        let event;
        {
            let mut st = self.state.write();
            let pet = &mut st.pet;
            if !pet.alive {
                return false;
            }

            pet.energy = clamp_stat(pet.energy + option.energy_gain);
            pet.health = clamp_stat(pet.health + option.health_gain);
            pet.happiness = clamp_stat(pet.happiness + option.happiness_gain);
            pet.last_slept = Utc::now();

            event = GameEvent::now(
                EventKind::Sleep,
                format!(
                    "Slept for {}! Energy +{}, Health +{}",
                    option.name, option.energy_gain, option.health_gain
                ),
            );
        }

        self.publish(vec![event]);
        true
    }

    /// Replace the pet with a fresh egg named from the roster, reset the
    /// accumulator, and clear the event log. Returns the new pet.
    pub fn restart(&self) -> Pet {
        let name = random_name();
        let pet = Pet::hatch(name, Utc::now());

        {
            let mut st = self.state.write();
            st.pet = pet.clone();
            st.accumulator = Duration::ZERO;
        }
        {
            let mut log = self.events.lock();
            log.clear();
            log.push(GameEvent::now(
                EventKind::Restart,
                format!("Started a new tamagotchi named {name}! 🥚"),
            ));
        }

        tracing::info!(name, "restarted with a new pet");
        self.refresh.notify_one();
        pet
    }

    /// One simulation tick. Must run with the state lock held; emitted
    /// events go into `out` for publication after the lock is released.
    ///
    /// Order matters: stat decay precedes the death check, and death
    /// aborts the age/stage update so a dead pet never evolves.
    fn tick_pet(pet: &mut Pet, now: DateTime<Utc>, out: &mut Vec<GameEvent>) {
        if !pet.alive {
            return;
        }

        pet.hunger = clamp_stat(pet.hunger + 5);
        if pet.hunger > 80 {
            pet.happiness = clamp_stat(pet.happiness - 2);
        }
        pet.energy = clamp_stat(pet.energy - 3);
        if pet.hunger > 90 || pet.happiness < 10 {
            pet.health = clamp_stat(pet.health - 1);
        }

        if pet.health <= 0 {
            pet.alive = false;
            out.push(GameEvent::now(
                EventKind::Death,
                "Your tamagotchi has passed away... 💔",
            ));
            return;
        }

        pet.age_days = pet.age_days_at(now);
        let stage = Stage::for_age_days(pet.age_days);
        if stage != pet.stage {
            pet.stage = stage;
            out.push(GameEvent::now(
                EventKind::Evolution,
                format!("Your tamagotchi evolved to {stage}! 🎉"),
            ));
        }
    }

    /// Append events (outside any state lock) and wake the renderer.
    fn publish(&self, events: Vec<GameEvent>) {
        if !events.is_empty() {
            let mut log = self.events.lock();
            for event in events {
                log.push(event);
            }
        }
        self.refresh.notify_one();
    }
}

/// Human-readable summary of an offline gap: "Xd Yh", "Xh Ym", "Xm Ys",
/// or "Xs" (minimum "1s" for positive sub-second gaps).
#[must_use]
pub fn format_offline_gap(gap: Duration) -> String {
    let secs = gap.as_secs();
    if secs >= 24 * 3600 {
        format!("{}d {}h", secs / (24 * 3600), (secs % (24 * 3600)) / 3600)
    } else if secs >= 3600 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs.max(1))
    }
}
