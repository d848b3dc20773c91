//! Synergy definitions
//!
//! A definition is the immutable half of a synergy: its name, description,
//! the upgrades it needs, and the effect callables the host supplied. The
//! mutable half (active / announced) lives in the activation tracker.

use std::fmt;

use crate::error::EffectResult;
use crate::upgrade::UpgradeId;

type EffectFn = Box<dyn Fn() -> EffectResult + Send + Sync>;

/// Host-supplied gameplay callables of a synergy.
///
/// `apply` runs on activation and again on every poll while the synergy is
/// active, so it must be safe to call repeatedly. `cleanup` runs once when a
/// new game deactivates the synergy.
pub struct Effect {
    apply: EffectFn,
    cleanup: Option<EffectFn>,
}

impl Effect {
    pub fn new<F>(apply: F) -> Self
    where
        F: Fn() -> EffectResult + Send + Sync + 'static,
    {
        Self {
            apply: Box::new(apply),
            cleanup: None,
        }
    }

    pub fn with_cleanup<F>(mut self, cleanup: F) -> Self
    where
        F: Fn() -> EffectResult + Send + Sync + 'static,
    {
        self.cleanup = Some(Box::new(cleanup));
        self
    }

    /// An effect that does nothing (announcement-only synergies)
    pub fn noop() -> Self {
        Self::new(|| Ok(()))
    }

    pub fn has_cleanup(&self) -> bool {
        self.cleanup.is_some()
    }

    pub(crate) fn apply(&self) -> EffectResult {
        (self.apply)()
    }

    pub(crate) fn cleanup(&self) -> EffectResult {
        match &self.cleanup {
            Some(cleanup) => cleanup(),
            None => Ok(()),
        }
    }
}

impl Default for Effect {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Effect")
            .field("cleanup", &self.cleanup.is_some())
            .finish_non_exhaustive()
    }
}

/// Position of a synergy in its registry (registration order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SynergyId(pub(crate) usize);

impl SynergyId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SynergyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
pub struct SynergyDefinition {
    pub(crate) id: SynergyId,
    pub(crate) name: String,
    pub(crate) description: String,
    /// Normalized, deduplicated, in the order supplied
    pub(crate) requirements: Vec<UpgradeId>,
    /// Requirement text as written by the author, parallel to `requirements`
    pub(crate) requirement_labels: Vec<String>,
    pub(crate) effect: Effect,
}

impl SynergyDefinition {
    pub fn id(&self) -> SynergyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn requirements(&self) -> &[UpgradeId] {
        &self.requirements
    }

    pub fn requirement_labels(&self) -> &[String] {
        &self.requirement_labels
    }

    pub fn effect(&self) -> &Effect {
        &self.effect
    }

    /// Whether `upgrade` is one of this synergy's requirements
    pub fn requires(&self, upgrade: &UpgradeId) -> bool {
        self.requirements.contains(upgrade)
    }
}
