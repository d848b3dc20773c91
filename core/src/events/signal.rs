/// Signals the host game feeds into the engine.
///
/// These are the only inbound events: the host decides when they fire and
/// the engine never polls the host for state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameSignal {
    /// One stack/instance of an upgrade was added to the player's collection.
    /// The id is the host's display name, normalized by the engine.
    UpgradeGranted { upgrade_id: String },

    /// Sweep that re-applies every active synergy's effect
    /// (e.g. once per upgrade-list application pass)
    Poll,

    /// A fresh game session began
    NewGameStarted,
}

impl GameSignal {
    pub fn upgrade_granted(upgrade_id: impl Into<String>) -> Self {
        Self::UpgradeGranted {
            upgrade_id: upgrade_id.into(),
        }
    }
}
