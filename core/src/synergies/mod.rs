//! Synergy registration and activation
//!
//! This module provides:
//! - **Definitions**: immutable synergy records with their effect callables
//! - **Registry**: definitions indexed by required upgrade for O(1) lookup
//! - **Tracker**: held upgrades and per-synergy active / announced flags
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  SynergyDefinition (registry)                    │
//! │   "Lumberjack requires Axe + Shield, applies +10% chop speed"   │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                    GameSignal::UpgradeGranted
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 ActivationTracker (per game)                     │
//! │      "axe, shield held; Lumberjack active, announced"           │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                    Announcement Sequencer
//! ```

mod definition;
mod registry;
mod tracker;


pub use definition::{Effect, SynergyDefinition, SynergyId};
pub use registry::SynergyRegistry;
pub use tracker::{ActivationTracker, SynergyPhase, SynergyState};
