//! Synergy registry
//!
//! Owns every synergy definition and indexes them by the upgrades they
//! require, so an upgrade grant only ever looks at the synergies it can
//! complete. Append-only: definitions are never removed or replaced.

use std::collections::HashMap;

use crate::error::{DefinitionProblem, SynergyError};
use crate::upgrade::{UpgradeId, display_label};

use super::definition::{Effect, SynergyDefinition, SynergyId};

#[derive(Debug, Default)]
pub struct SynergyRegistry {
    /// All definitions, in registration order (indexed by `SynergyId`)
    synergies: Vec<SynergyDefinition>,

    // ─── Indexes for O(1) lookup ─────────────────────────────────────────────
    /// Lowercase name -> synergy (names are case-insensitive)
    name_index: HashMap<String, SynergyId>,
    /// Normalized upgrade -> synergies requiring it, in registration order
    upgrade_index: HashMap<UpgradeId, Vec<SynergyId>>,
}

impl SynergyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a synergy.
    ///
    /// Requirements are normalized and deduplicated (first occurrence wins);
    /// entries that normalize to nothing are dropped. Fails without touching
    /// the registry if no requirement is left or the name is taken.
    pub fn register<I, S>(
        &mut self,
        name: &str,
        description: &str,
        effect: Effect,
        requirements: I,
    ) -> Result<SynergyId, SynergyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name_key = name.trim().to_lowercase();
        if self.name_index.contains_key(&name_key) {
            return Err(SynergyError::invalid(name, DefinitionProblem::DuplicateName));
        }

        let mut normalized: Vec<UpgradeId> = Vec::new();
        let mut labels: Vec<String> = Vec::new();
        for raw in requirements {
            let raw = raw.as_ref();
            let id = UpgradeId::normalize(raw);
            if id.is_empty() || normalized.contains(&id) {
                continue;
            }
            normalized.push(id);
            labels.push(display_label(raw).to_string());
        }

        if normalized.is_empty() {
            return Err(SynergyError::invalid(name, DefinitionProblem::EmptyRequirements));
        }

        let id = SynergyId(self.synergies.len());
        for upgrade in &normalized {
            self.upgrade_index.entry(upgrade.clone()).or_default().push(id);
        }
        self.name_index.insert(name_key, id);

        tracing::info!(
            "[SYNERGY] Registered '{}' ({}) requiring [{}]",
            name,
            id,
            labels.join(", ")
        );

        self.synergies.push(SynergyDefinition {
            id,
            name: name.to_string(),
            description: description.to_string(),
            requirements: normalized,
            requirement_labels: labels,
            effect,
        });

        Ok(id)
    }

    /// Synergies that list `upgrade` as a requirement, in registration order
    pub fn lookup<'a>(
        &'a self,
        upgrade: &UpgradeId,
    ) -> impl Iterator<Item = &'a SynergyDefinition> + use<'a> {
        self.upgrade_index
            .get(upgrade)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|id| &self.synergies[id.0])
    }

    /// Whether any synergy depends on `upgrade`
    pub fn is_indexed(&self, upgrade: &UpgradeId) -> bool {
        self.upgrade_index.contains_key(upgrade)
    }

    pub fn get(&self, id: SynergyId) -> Option<&SynergyDefinition> {
        self.synergies.get(id.0)
    }

    /// Case-insensitive lookup by name
    pub fn find_by_name(&self, name: &str) -> Option<&SynergyDefinition> {
        self.name_index
            .get(&name.trim().to_lowercase())
            .and_then(|id| self.get(*id))
    }

    /// All definitions in registration order
    pub fn iter(&self) -> impl Iterator<Item = &SynergyDefinition> {
        self.synergies.iter()
    }

    pub fn len(&self) -> usize {
        self.synergies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synergies.is_empty()
    }
}
