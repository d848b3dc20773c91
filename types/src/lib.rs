//! Shared configuration and display types for the synergy engine.
//!
//! Everything here is plain serde data so it can live in TOML config files
//! and be handed to renderers without pulling in the engine itself.

pub mod announcement;
pub mod color;

pub use announcement::{AnnouncementConfig, OverlapMode};
pub use color::{ColorCycle, RESET_COLOR};
