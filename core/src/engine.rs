//! Synergy engine
//!
//! Owns one registry, one activation tracker and (optionally) an
//! announcement sequencer, and turns game signals into calls on them.
//! Independent engines share nothing, so tests and multiple sessions can
//! run side by side.

use std::sync::{Arc, Mutex};

use crate::announce::{AnnouncementSequencer, DisplaySurface, NullSurface};
use crate::config::{DefinitionSet, EffectBinder};
use crate::error::SynergyError;
use crate::events::{GameSignal, SignalHandler};
use crate::synergies::{
    ActivationTracker, Effect, SynergyDefinition, SynergyId, SynergyPhase, SynergyRegistry,
};
use crate::upgrade::UpgradeId;

/// Engine behind a single lock, for hosts that raise signals from several threads
pub type SharedEngine<S> = Arc<Mutex<Engine<S>>>;

/// Engine that never displays announcements
pub type HeadlessEngine = Engine<NullSurface>;

/// Snapshot of one synergy for status displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynergyStatus {
    pub id: SynergyId,
    pub name: String,
    pub phase: SynergyPhase,
    pub announced: bool,
    pub held: usize,
    pub required: usize,
}

pub struct Engine<S: DisplaySurface> {
    registry: SynergyRegistry,
    tracker: ActivationTracker,
    sequencer: Option<AnnouncementSequencer<S>>,
}

impl<S: DisplaySurface> Default for Engine<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DisplaySurface> Engine<S> {
    /// Engine without announcements; activations are only logged
    pub fn new() -> Self {
        Self {
            registry: SynergyRegistry::new(),
            tracker: ActivationTracker::new(),
            sequencer: None,
        }
    }

    pub fn with_sequencer(sequencer: AnnouncementSequencer<S>) -> Self {
        Self {
            sequencer: Some(sequencer),
            ..Self::new()
        }
    }

    pub fn into_shared(self) -> SharedEngine<S> {
        Arc::new(Mutex::new(self))
    }

    // ─── Registration ───────────────────────────────────────────────────────

    pub fn register<I, R>(
        &mut self,
        name: &str,
        description: &str,
        effect: Effect,
        requirements: I,
    ) -> Result<SynergyId, SynergyError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<str>,
    {
        self.registry.register(name, description, effect, requirements)
    }

    /// Register loaded definitions, binding effects by name. Returns how many
    /// were registered.
    pub fn register_definitions(
        &mut self,
        definitions: &DefinitionSet,
        binder: &mut impl EffectBinder,
    ) -> usize {
        definitions.register_into(&mut self.registry, binder)
    }

    // ─── Boundary events ────────────────────────────────────────────────────

    /// Record a granted upgrade; returns the synergies it activated.
    pub fn on_upgrade_granted(&mut self, upgrade: &str) -> Result<Vec<SynergyId>, SynergyError> {
        tracing::debug!("[SYNERGY] Upgrade granted: '{}'", upgrade);
        let result = self.tracker.on_upgrade_granted(&self.registry, upgrade);
        // Announce whatever activated before a failing apply, too
        self.dispatch_announcements();
        result
    }

    /// Re-apply every active synergy's effect
    pub fn poll_active(&self) -> Result<usize, SynergyError> {
        self.tracker.poll_active(&self.registry)
    }

    /// New game: clean up active synergies and forget all held upgrades
    pub fn on_new_game(&mut self) -> Result<usize, SynergyError> {
        tracing::info!("[SYNERGY] New game, resetting synergy state");
        self.tracker.reset(&self.registry)
    }

    fn dispatch_announcements(&mut self) {
        for announcement in self.tracker.take_announcements() {
            match &self.sequencer {
                Some(sequencer) => {
                    // Fire and forget
                    drop(sequencer.announce(announcement));
                }
                None => {
                    tracing::info!(
                        "[ANNOUNCE] SYNERGY! {} (no renderer attached)",
                        announcement.synergy
                    );
                }
            }
        }
    }

    // ─── Queries ────────────────────────────────────────────────────────────

    /// Whether the synergy called `name` (case-insensitive) is active
    pub fn is_active(&self, name: &str) -> bool {
        self.registry
            .find_by_name(name)
            .is_some_and(|def| self.tracker.is_active(def.id()))
    }

    pub fn status(&self) -> Vec<SynergyStatus> {
        self.registry
            .iter()
            .map(|def| self.status_of(def))
            .collect()
    }

    fn status_of(&self, def: &SynergyDefinition) -> SynergyStatus {
        let state = self.tracker.state(def.id());
        SynergyStatus {
            id: def.id(),
            name: def.name().to_string(),
            phase: state.phase(),
            announced: state.announced,
            held: self.tracker.held_count(def),
            required: def.requirements().len(),
        }
    }

    pub fn held_upgrades(&self) -> Vec<&UpgradeId> {
        self.tracker.held_upgrades()
    }

    pub fn registry(&self) -> &SynergyRegistry {
        &self.registry
    }

    pub fn tracker(&self) -> &ActivationTracker {
        &self.tracker
    }

    pub fn sequencer(&self) -> Option<&AnnouncementSequencer<S>> {
        self.sequencer.as_ref()
    }
}

impl<S: DisplaySurface> SignalHandler for Engine<S> {
    fn handle_signal(&mut self, signal: &GameSignal) -> Result<(), SynergyError> {
        match signal {
            GameSignal::UpgradeGranted { upgrade_id } => {
                self.on_upgrade_granted(upgrade_id)?;
            }
            GameSignal::Poll => {
                self.poll_active()?;
            }
            GameSignal::NewGameStarted => {
                self.on_new_game()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::announce::{DisplayRequest, Emphasis};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use synergy_types::AnnouncementConfig;

    #[derive(Default)]
    struct Lines(Mutex<Vec<String>>);

    impl DisplaySurface for Lines {
        type Anchor = ();
        type Handle = ();

        fn anchor(&self) -> Option<()> {
            Some(())
        }

        fn display(&self, request: DisplayRequest<()>) {
            self.0.lock().unwrap().push(request.text);
        }

        fn attach_emphasis(&self, _handle: &(), _emphasis: Emphasis) {}
    }

    fn counter() -> (Arc<AtomicUsize>, Effect) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&count);
        let effect = Effect::new(move || {
            inner.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        (count, effect)
    }

    #[test]
    fn signals_drive_the_lifecycle() {
        let mut engine = HeadlessEngine::new();
        let (applied, effect) = counter();
        engine
            .register("Lumberjack", "Chop", effect, ["Axe", "Shield"])
            .unwrap();

        engine
            .handle_signals(&[
                GameSignal::upgrade_granted("Axe"),
                GameSignal::upgrade_granted("Shield"),
                GameSignal::Poll,
                GameSignal::Poll,
            ])
            .unwrap();
        assert!(engine.is_active("lumberjack"));
        assert_eq!(applied.load(Ordering::SeqCst), 3);

        engine.handle_signal(&GameSignal::NewGameStarted).unwrap();
        assert!(!engine.is_active("Lumberjack"));
        assert!(engine.held_upgrades().is_empty());

        engine.handle_signal(&GameSignal::Poll).unwrap();
        assert_eq!(applied.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn status_reports_progress() {
        let mut engine = HeadlessEngine::new();
        engine
            .register("Triple", "", Effect::noop(), ["a", "b", "c"])
            .unwrap();
        engine.on_upgrade_granted("b").unwrap();

        let status = engine.status();
        assert_eq!(status.len(), 1);
        assert_eq!(status[0].name, "Triple");
        assert_eq!(status[0].phase, SynergyPhase::Dormant);
        assert_eq!((status[0].held, status[0].required), (1, 3));
        assert!(!status[0].announced);
    }

    #[test]
    fn independent_engines_do_not_share_state() {
        let mut first = HeadlessEngine::new();
        let mut second = HeadlessEngine::new();
        first.register("S", "", Effect::noop(), ["a"]).unwrap();
        second.register("S", "", Effect::noop(), ["a"]).unwrap();

        first.on_upgrade_granted("a").unwrap();
        assert!(first.is_active("S"));
        assert!(!second.is_active("S"));
    }

    #[test]
    fn shared_engine_serializes_grants() {
        let mut engine = HeadlessEngine::new();
        let (applied, effect) = counter();
        engine
            .register("Quad", "", effect, ["a", "b", "c", "d"])
            .unwrap();
        let shared = engine.into_shared();

        let handles: Vec<_> = ["a", "b", "c", "d"]
            .into_iter()
            .map(|upgrade| {
                let shared = Arc::clone(&shared);
                std::thread::spawn(move || {
                    shared.lock().unwrap().on_upgrade_granted(upgrade).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let engine = shared.lock().unwrap();
        assert!(engine.is_active("Quad"));
        assert_eq!(applied.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn announces_once_per_game() {
        let surface = Arc::new(Lines::default());
        let sequencer = AnnouncementSequencer::on_current_runtime(
            Arc::clone(&surface),
            AnnouncementConfig::default(),
        );
        let mut engine = Engine::with_sequencer(sequencer);
        engine
            .register("Lumberjack", "Chop faster", Effect::noop(), ["#Axe", "Shield"])
            .unwrap();

        engine.on_upgrade_granted("axe").unwrap();
        engine.on_upgrade_granted("shield").unwrap();
        engine.on_upgrade_granted("SHIELD").unwrap();
        engine.poll_active().unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(
            *surface.0.lock().unwrap(),
            vec!["SYNERGY!", "Lumberjack: Axe + Shield", "Chop faster"]
        );

        // Next game announces again
        engine.on_new_game().unwrap();
        engine.on_upgrade_granted("axe").unwrap();
        engine.on_upgrade_granted("shield").unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(surface.0.lock().unwrap().len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_does_not_retract_in_flight_announcement() {
        let surface = Arc::new(Lines::default());
        let sequencer = AnnouncementSequencer::on_current_runtime(
            Arc::clone(&surface),
            AnnouncementConfig::default(),
        );
        let mut engine = Engine::with_sequencer(sequencer);
        engine.register("Solo", "Alone", Effect::noop(), ["crown"]).unwrap();

        engine.on_upgrade_granted("crown").unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        engine.on_new_game().unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(surface.0.lock().unwrap().len(), 3);
    }
}
