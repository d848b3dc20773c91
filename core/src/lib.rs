pub mod announce;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod synergies;
pub mod upgrade;

// Re-exports for convenience
pub use announce::{
    Announcement, AnnouncementSequencer, DisplayRequest, DisplaySurface, Emphasis, NullSurface,
    SequenceOutcome,
};
pub use engine::{Engine, HeadlessEngine, SharedEngine, SynergyStatus};
pub use error::{BoxError, DefinitionProblem, EffectPhase, EffectResult, SynergyError};
pub use events::{GameSignal, SignalHandler};
pub use synergies::{
    ActivationTracker, Effect, SynergyDefinition, SynergyId, SynergyPhase, SynergyRegistry,
    SynergyState,
};
pub use upgrade::UpgradeId;
