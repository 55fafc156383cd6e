//! Termagotchi TUI - Terminal interface for the virtual pet
//!
//! This crate provides a full-screen terminal UI over the headless
//! `simulator-core` engine.
//!
//! # Architecture
//!
//! - **App**: event loop, keybindings, section switching, restart modal
//! - **Pages**: per-section list content built from pet snapshots
//! - **Theme**: the shared color palette
//!
//! The UI is a thin surface: it reads by-value snapshots and event
//! copies from the simulator and forwards care actions to it. All game
//! rules live in the core.

pub mod app;
pub mod pages;
pub mod theme;

pub use app::App;
