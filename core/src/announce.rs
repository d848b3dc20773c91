//! Announcement sequencer
//!
//! Runs the three-step "SYNERGY!" announcement on the tokio runtime:
//!
//! ```text
//!  t = 0                 t = first_delay            t = first_delay + second_delay
//!  "SYNERGY!" (emphasis) "{name}: {a} + {b}"        "{description}"
//! ```
//!
//! Sequences are fire-and-forget. The caller that triggered the activation
//! is never blocked, and nothing in the engine waits for a sequence to end.
//! A reset does not retract a sequence already in flight.

use std::sync::Arc;
use std::time::Duration;

use synergy_types::{AnnouncementConfig, ColorCycle, OverlapMode};
use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::synergies::SynergyDefinition;

/// Everything needed to announce one synergy, detached from the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub synergy: String,
    /// Requirement text as the author wrote it, in the original order
    pub requirements: Vec<String>,
    pub description: String,
}

impl Announcement {
    pub fn for_synergy(def: &SynergyDefinition) -> Self {
        Self {
            synergy: def.name().to_string(),
            requirements: def.requirement_labels().to_vec(),
            description: def.description().to_string(),
        }
    }
}

/// A single line of floating text handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRequest<A> {
    pub text: String,
    pub anchor: A,
    /// Whether an emphasis effect will be attached to this line
    pub emphasis: bool,
    pub duration: Duration,
}

/// Colour-cycle effect attached to a displayed line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emphasis {
    pub cycle: ColorCycle,
    pub duration: Duration,
}

/// The rendering collaborator.
///
/// `display` returns a handle to the element it created so the emphasis can
/// be attached to exactly that element.
pub trait DisplaySurface: Send + Sync + 'static {
    /// Where text floats from (e.g. the player's head)
    type Anchor: Clone + Send + Sync + 'static;
    type Handle: Send + 'static;

    /// Current anchor, or `None` when there is nothing to attach text to
    fn anchor(&self) -> Option<Self::Anchor>;

    fn display(&self, request: DisplayRequest<Self::Anchor>) -> Self::Handle;

    fn attach_emphasis(&self, handle: &Self::Handle, emphasis: Emphasis);
}

/// Surface that never has an anchor; every sequence ends immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl DisplaySurface for NullSurface {
    type Anchor = ();
    type Handle = ();

    fn anchor(&self) -> Option<()> {
        None
    }

    fn display(&self, _request: DisplayRequest<()>) {}

    fn attach_emphasis(&self, _handle: &(), _emphasis: Emphasis) {}
}

/// How a sequence ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceOutcome {
    /// All three lines were displayed
    Completed,
    /// No anchor was available; nothing was displayed
    NoAnchor,
}

pub struct AnnouncementSequencer<S: DisplaySurface> {
    surface: Arc<S>,
    config: Arc<AnnouncementConfig>,
    runtime: Handle,
    /// Held for the whole sequence in `OverlapMode::Queued`
    queue: Arc<Mutex<()>>,
}

impl<S: DisplaySurface> AnnouncementSequencer<S> {
    pub fn new(surface: Arc<S>, config: AnnouncementConfig, runtime: Handle) -> Self {
        Self {
            surface,
            config: Arc::new(config),
            runtime,
            queue: Arc::new(Mutex::new(())),
        }
    }

    /// Sequencer on the runtime the caller is currently inside.
    ///
    /// Panics outside a tokio runtime, like [`Handle::current`].
    pub fn on_current_runtime(surface: Arc<S>, config: AnnouncementConfig) -> Self {
        Self::new(surface, config, Handle::current())
    }

    pub fn config(&self) -> &AnnouncementConfig {
        &self.config
    }

    pub fn surface(&self) -> &Arc<S> {
        &self.surface
    }

    /// Start the sequence for `announcement` and return immediately.
    pub fn announce(&self, announcement: Announcement) -> JoinHandle<SequenceOutcome> {
        let surface = Arc::clone(&self.surface);
        let config = Arc::clone(&self.config);
        let queue = Arc::clone(&self.queue);

        self.runtime.spawn(async move {
            let _turn = match config.overlap {
                OverlapMode::Queued => Some(queue.lock_owned().await),
                OverlapMode::Concurrent => None,
            };
            run_sequence(surface.as_ref(), &config, &announcement).await
        })
    }
}

async fn run_sequence<S: DisplaySurface>(
    surface: &S,
    config: &AnnouncementConfig,
    announcement: &Announcement,
) -> SequenceOutcome {
    let Some(anchor) = surface.anchor() else {
        tracing::debug!(
            "[ANNOUNCE] No anchor for '{}', skipping announcement",
            announcement.synergy
        );
        return SequenceOutcome::NoAnchor;
    };
    let duration = secs(config.display_secs);

    let headline = surface.display(DisplayRequest {
        text: config.headline.clone(),
        anchor: anchor.clone(),
        emphasis: true,
        duration,
    });
    surface.attach_emphasis(
        &headline,
        Emphasis {
            cycle: config.emphasis,
            duration: secs(config.emphasis_secs),
        },
    );
    tokio::time::sleep(secs(config.first_delay_secs)).await;

    surface.display(DisplayRequest {
        text: config.requirement_line(&announcement.synergy, &announcement.requirements),
        anchor: anchor.clone(),
        emphasis: false,
        duration,
    });
    tokio::time::sleep(secs(config.second_delay_secs)).await;

    surface.display(DisplayRequest {
        text: announcement.description.clone(),
        anchor,
        emphasis: false,
        duration,
    });

    tracing::debug!("[ANNOUNCE] Finished announcement for '{}'", announcement.synergy);
    SequenceOutcome::Completed
}

/// Config seconds to a `Duration`; negative, NaN or overflowing values become zero
fn secs(value: f32) -> Duration {
    Duration::try_from_secs_f32(value).unwrap_or(Duration::ZERO)
}
