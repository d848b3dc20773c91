//! Error types for synergy registration and effect invocation.

use std::fmt;

/// Boxed error returned by host-supplied effect callables
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Return type of `apply` / `cleanup` callables
pub type EffectResult = Result<(), BoxError>;

/// Why a synergy definition was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionProblem {
    /// No requirement survived normalization
    EmptyRequirements,
    /// Another synergy already uses this name (case-insensitive)
    DuplicateName,
}

impl fmt::Display for DefinitionProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRequirements => write!(f, "requirement list is empty"),
            Self::DuplicateName => write!(f, "name is already registered"),
        }
    }
}

/// Which callable of a synergy failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectPhase {
    Apply,
    Cleanup,
}

impl fmt::Display for EffectPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Apply => write!(f, "apply"),
            Self::Cleanup => write!(f, "cleanup"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SynergyError {
    /// Malformed registration, reported synchronously to the registering caller
    #[error("invalid synergy definition '{name}': {problem}")]
    InvalidDefinition {
        name: String,
        problem: DefinitionProblem,
    },

    /// A host callable failed. Tracker flags are not rolled back.
    #[error("{phase} callable of synergy '{synergy}' failed: {source}")]
    Effect {
        synergy: String,
        phase: EffectPhase,
        #[source]
        source: BoxError,
    },
}

impl SynergyError {
    pub(crate) fn invalid(name: &str, problem: DefinitionProblem) -> Self {
        Self::InvalidDefinition {
            name: name.to_string(),
            problem,
        }
    }

    pub(crate) fn effect(synergy: &str, phase: EffectPhase, source: BoxError) -> Self {
        Self::Effect {
            synergy: synergy.to_string(),
            phase,
            source,
        }
    }

    /// The definition problem, if this is an `InvalidDefinition`
    pub fn definition_problem(&self) -> Option<DefinitionProblem> {
        match self {
            Self::InvalidDefinition { problem, .. } => Some(*problem),
            Self::Effect { .. } => None,
        }
    }
}
