//! Console stand-in for the in-game floating text renderer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use colored::Colorize;
use synergy_core::{DisplayRequest, DisplaySurface, Emphasis};
use synergy_types::RESET_COLOR;

/// Number of colour samples in the emphasis preview bar
const PREVIEW_SAMPLES: u32 = 16;

pub struct ConsoleSurface {
    started: Instant,
    next_handle: AtomicU64,
}

impl Default for ConsoleSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSurface {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            next_handle: AtomicU64::new(0),
        }
    }
}

/// Render the emphasis colour cycle as a bar of coloured blocks
fn emphasis_bar(emphasis: &Emphasis) -> String {
    let secs = emphasis.duration.as_secs_f32();
    let mut bar: String = (0..PREVIEW_SAMPLES)
        .map(|i| {
            let t = secs * i as f32 / PREVIEW_SAMPLES as f32;
            let [r, g, b, _] = emphasis.cycle.color_at(0.0, t);
            "█".truecolor(r, g, b).to_string()
        })
        .collect();
    let [r, g, b, _] = RESET_COLOR;
    bar.push_str(&"█".truecolor(r, g, b).to_string());
    bar
}

impl DisplaySurface for ConsoleSurface {
    type Anchor = &'static str;
    type Handle = u64;

    fn anchor(&self) -> Option<&'static str> {
        Some("player")
    }

    fn display(&self, request: DisplayRequest<&'static str>) -> u64 {
        let handle = self.next_handle.fetch_add(1, Ordering::Relaxed);
        println!(
            "\n[{:>7.2}s @{}] {} ({:.0}s)",
            self.started.elapsed().as_secs_f32(),
            request.anchor,
            request.text,
            request.duration.as_secs_f32()
        );
        handle
    }

    fn attach_emphasis(&self, handle: &u64, emphasis: Emphasis) {
        let secs = emphasis.duration.as_secs_f32();
        println!("    line {handle} emphasis {} for {secs:.1}s", emphasis_bar(&emphasis));
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use synergy_types::ColorCycle;

    use super::*;

    #[test]
    fn test_emphasis_bar_has_sample_per_block_plus_reset() {
        colored::control::set_override(false);
        let emphasis = Emphasis {
            cycle: ColorCycle::default(),
            duration: Duration::from_secs(10),
        };
        let bar = emphasis_bar(&emphasis);
        assert_eq!(bar.chars().count(), PREVIEW_SAMPLES as usize + 1);
        assert!(bar.chars().all(|c| c == '█'));
        colored::control::unset_override();
    }

    #[test]
    fn test_default_surface_anchors_on_player() {
        let surface = ConsoleSurface::default();
        assert_eq!(surface.anchor(), Some("player"));
    }
}
