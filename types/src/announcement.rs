//! Announcement timing and presentation settings.

use serde::{Deserialize, Serialize};

use crate::color::ColorCycle;

/// How announcement sequences that start close together interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapMode {
    /// Every sequence runs on its own; text from two sequences may interleave
    #[default]
    Concurrent,
    /// Sequences wait for each other, one visible sequence at a time
    Queued,
}

/// Settings for the three-step "SYNERGY!" announcement.
///
/// Defaults reproduce the reference pacing: the headline is emphasised for
/// ten seconds and the next two lines follow at 1.5 second intervals, each
/// floating for six seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnouncementConfig {
    /// Text shown in the first step
    pub headline: String,
    /// How long each displayed line stays on screen
    pub display_secs: f32,
    /// How long the colour-cycle emphasis runs on the headline
    pub emphasis_secs: f32,
    /// Pause between the headline and the requirement line
    pub first_delay_secs: f32,
    /// Pause between the requirement line and the description
    pub second_delay_secs: f32,
    /// Joins requirement names in the second line
    pub separator: String,
    pub overlap: OverlapMode,
    pub emphasis: ColorCycle,
}

impl Default for AnnouncementConfig {
    fn default() -> Self {
        Self {
            headline: "SYNERGY!".to_string(),
            display_secs: 6.0,
            emphasis_secs: 10.0,
            first_delay_secs: 1.5,
            second_delay_secs: 1.5,
            separator: " + ".to_string(),
            overlap: OverlapMode::Concurrent,
            emphasis: ColorCycle::default(),
        }
    }
}

impl AnnouncementConfig {
    /// Second-step text: `"{name}: {a} + {b} + ..."`
    pub fn requirement_line<S: AsRef<str>>(&self, name: &str, requirements: &[S]) -> String {
        let items: Vec<&str> = requirements.iter().map(AsRef::as_ref).collect();
        format!("{}: {}", name, items.join(self.separator.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_pacing() {
        let config = AnnouncementConfig::default();
        assert_eq!(config.headline, "SYNERGY!");
        assert_eq!(config.emphasis_secs, 10.0);
        assert_eq!(config.first_delay_secs, 1.5);
        assert_eq!(config.second_delay_secs, 1.5);
        assert_eq!(config.display_secs, 6.0);
        assert_eq!(config.overlap, OverlapMode::Concurrent);
    }

    #[test]
    fn requirement_line_keeps_order() {
        let config = AnnouncementConfig::default();
        assert_eq!(
            config.requirement_line("Lumberjack", &["Axe", "Shield"]),
            "Lumberjack: Axe + Shield"
        );
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: AnnouncementConfig = toml::from_str(
            r#"
headline = "COMBO!"
overlap = "queued"

[emphasis]
speed = 2.0
"#,
        )
        .unwrap();

        assert_eq!(config.headline, "COMBO!");
        assert_eq!(config.overlap, OverlapMode::Queued);
        assert_eq!(config.emphasis.speed, 2.0);
        assert_eq!(config.emphasis.saturation, 1.0);
        assert_eq!(config.first_delay_secs, 1.5);
    }
}
