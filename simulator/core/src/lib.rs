//! Simulator Core - Headless Virtual-Pet Engine for termagotchi
//!
//! This crate holds the entire simulation: the creature state, the
//! discrete tick model that ages it, the care-action transitions, the
//! offline-progress replay, and the concurrency discipline that lets a
//! periodic ticker and user-driven actions safely mutate shared state
//! while a renderer reads it. It is completely independent of any UI
//! framework and can drive a TUI or run headless for testing.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                     UI Surface (tui)                    │
//! │   key events ──► feed/play/sleep/restart                │
//! │   redraws   ◄── snapshot() / events() / refreshed()     │
//! └───────────────────────────┼────────────────────────────┘
//!                             │
//! ┌───────────────────────────┼────────────────────────────┐
//! │                      SIMULATOR CORE                     │
//! │  ┌──────────┐  ┌───────────┐  ┌───────────┐             │
//! │  │ Pet      │  │ Event Log │  │ Action    │             │
//! │  │ (state   │  │ (own lock)│  │ Tables    │             │
//! │  │  lock)   │  └───────────┘  │ (injected)│             │
//! │  └────▲─────┘                 └───────────┘             │
//! │       │ ticks                                           │
//! │  ┌────┴─────┐      ┌──────────────────┐                 │
//! │  │ Ticker   │      │ Persistence      │                 │
//! │  │ (1 Hz)   │      │ (YAML, load/save)│                 │
//! │  └──────────┘      └──────────────────┘                 │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Simulator`]: owns the pet and applies all mutations
//! - [`Pet`] / [`Stage`]: the creature and its life phases
//! - [`ActionTables`]: injected food/game/sleep catalogs
//! - [`GameEvent`] / [`EventLog`]: bounded history of transitions
//! - [`config`]: the persistence adapter
//! - [`ticker`]: the 1 Hz time driver task
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any
//! other UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod events;
pub mod pet;
pub mod simulator;
pub mod tables;
pub mod ticker;

// Re-exports for convenience
pub use config::{AppConfig, Config, ConfigError};
pub use events::{EventKind, EventLog, GameEvent, EVENT_CAPACITY};
pub use pet::{random_name, Pet, Stage, NAME_ROSTER};
pub use simulator::{format_offline_gap, Simulator, UPDATE_INTERVAL};
pub use tables::{
    clamp_stat, clamp_weight, ActionTables, Food, Game, SleepOption, MIN_WEIGHT, STAT_MAX,
    STAT_MIN,
};
