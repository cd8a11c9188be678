//! # Investigation Core
//!
//! The runtime side of a case. This crate reads the static case from
//! `case_rules`, tracks how far the player has got, and drives the three
//! screens of a play-through: the splash screen, the case files, and the
//! investigation board with its accusation form.
//!
//! ## Core Components
//!
//! - **progression**: The single shared store of reading progress and screen mode
//! - **viewer**: Chapter-by-chapter reading, gated by the store
//! - **board**: Free-form canvas of cards, notes and connections
//! - **accusation**: The accusation form and its validator
//! - **timers**: One-shot timers on a virtual clock, owned by mounted screens
//! - **session**: Ties it all together and routes user actions
//!
//! ## Design Notes
//!
//! - **Store-Driven**: Which screen is mounted follows from the progression store alone
//! - **Deterministic Time**: Nothing sleeps; the host advances the session clock

pub mod accusation;
pub mod board;
pub mod config;
pub mod events;
pub mod loading;
pub mod progression;
pub mod session;
pub mod timers;
pub mod viewer;

pub use accusation::*;
pub use board::*;
pub use config::*;
pub use events::*;
pub use loading::*;
pub use progression::*;
pub use session::*;
pub use timers::*;
pub use viewer::*;
