//! Activation tracker
//!
//! Holds everything that changes during a game: the set of upgrades granted
//! so far and, per synergy, whether it is active and whether its
//! announcement has been queued. Definitions are read from a
//! [`SynergyRegistry`] passed into every call, so one registry can serve
//! any number of independent trackers.

use std::collections::HashSet;

use crate::announce::Announcement;
use crate::error::{EffectPhase, SynergyError};
use crate::upgrade::UpgradeId;

use super::definition::{SynergyDefinition, SynergyId};
use super::registry::SynergyRegistry;

/// Lifecycle phase of a synergy within one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SynergyPhase {
    #[default]
    Dormant,
    Active,
}

/// Per-synergy mutable flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SynergyState {
    pub active: bool,
    /// Set when the announcement is queued, not when it finishes
    pub announced: bool,
}

impl SynergyState {
    pub fn phase(&self) -> SynergyPhase {
        if self.active {
            SynergyPhase::Active
        } else {
            SynergyPhase::Dormant
        }
    }
}

#[derive(Debug, Default)]
pub struct ActivationTracker {
    /// Normalized upgrades granted since the last reset
    held: HashSet<UpgradeId>,

    /// Flags indexed by `SynergyId`. Grows lazily, so synergies registered
    /// after the tracker was created start out dormant.
    states: Vec<SynergyState>,

    /// Announcements queued by activations, drained by the engine
    announcements: Vec<Announcement>,
}

impl ActivationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an upgrade grant and activate every synergy it completes.
    ///
    /// Returns the synergies activated by this call, in registration order.
    /// An `apply` failure is returned as-is; the failing synergy stays
    /// active and later candidates from the same grant are not evaluated.
    pub fn on_upgrade_granted(
        &mut self,
        registry: &SynergyRegistry,
        upgrade: &str,
    ) -> Result<Vec<SynergyId>, SynergyError> {
        let upgrade = UpgradeId::normalize(upgrade);
        if upgrade.is_empty() {
            tracing::debug!("[SYNERGY] Ignoring grant with empty upgrade id");
            return Ok(Vec::new());
        }

        if !self.held.insert(upgrade.clone()) {
            tracing::debug!("[SYNERGY] '{}' already held", upgrade);
        }

        if !registry.is_indexed(&upgrade) {
            return Ok(Vec::new());
        }

        // Evaluate every candidate against the same held set before touching any flags
        let completed: Vec<&SynergyDefinition> = registry
            .lookup(&upgrade)
            .filter(|def| !self.state(def.id()).active && self.is_satisfied(def))
            .collect();

        let mut activated = Vec::with_capacity(completed.len());
        for def in completed {
            self.state_mut(def.id()).active = true;
            tracing::info!("[SYNERGY] '{}' activated by '{}'", def.name(), upgrade);

            def.effect()
                .apply()
                .map_err(|source| SynergyError::effect(def.name(), EffectPhase::Apply, source))?;

            let state = self.state_mut(def.id());
            if !state.announced {
                state.announced = true;
                self.announcements.push(Announcement::for_synergy(def));
            }
            activated.push(def.id());
        }

        Ok(activated)
    }

    /// Re-run `apply` for every active synergy. Returns how many ran.
    pub fn poll_active(&self, registry: &SynergyRegistry) -> Result<usize, SynergyError> {
        let mut applied = 0;
        for def in registry.iter().filter(|def| self.state(def.id()).active) {
            def.effect()
                .apply()
                .map_err(|source| SynergyError::effect(def.name(), EffectPhase::Apply, source))?;
            applied += 1;
        }
        tracing::debug!("[SYNERGY] Poll applied {} active synergies", applied);
        Ok(applied)
    }

    /// Return every synergy to dormant and forget all held upgrades.
    ///
    /// `cleanup` runs once for each synergy that was active. The reset always
    /// completes; if any cleanup failed the first failure is returned after
    /// all state has been cleared. Returns how many synergies were cleaned up.
    pub fn reset(&mut self, registry: &SynergyRegistry) -> Result<usize, SynergyError> {
        let mut cleaned = 0;
        let mut first_error = None;

        for def in registry.iter().filter(|def| self.state(def.id()).active) {
            if let Err(source) = def.effect().cleanup() {
                tracing::warn!("[SYNERGY] Cleanup of '{}' failed: {}", def.name(), source);
                first_error.get_or_insert_with(|| {
                    SynergyError::effect(def.name(), EffectPhase::Cleanup, source)
                });
            }
            cleaned += 1;
        }

        self.states.fill(SynergyState::default());
        self.held.clear();

        if cleaned > 0 {
            tracing::info!("[SYNERGY] Reset, {} synergies deactivated", cleaned);
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(cleaned),
        }
    }

    /// Drain announcements queued since the last call
    pub fn take_announcements(&mut self) -> Vec<Announcement> {
        std::mem::take(&mut self.announcements)
    }

    pub fn state(&self, id: SynergyId) -> SynergyState {
        self.states.get(id.0).copied().unwrap_or_default()
    }

    pub fn is_active(&self, id: SynergyId) -> bool {
        self.state(id).active
    }

    pub fn holds(&self, upgrade: &UpgradeId) -> bool {
        self.held.contains(upgrade)
    }

    /// Held upgrades, sorted for stable output
    pub fn held_upgrades(&self) -> Vec<&UpgradeId> {
        let mut held: Vec<&UpgradeId> = self.held.iter().collect();
        held.sort();
        held
    }

    /// How many of `def`'s requirements are currently held
    pub fn held_count(&self, def: &SynergyDefinition) -> usize {
        def.requirements()
            .iter()
            .filter(|req| self.held.contains(*req))
            .count()
    }

    fn is_satisfied(&self, def: &SynergyDefinition) -> bool {
        def.requirements().iter().all(|req| self.held.contains(req))
    }

    fn state_mut(&mut self, id: SynergyId) -> &mut SynergyState {
        if self.states.len() <= id.0 {
            self.states.resize(id.0 + 1, SynergyState::default());
        }
        &mut self.states[id.0]
    }
}
