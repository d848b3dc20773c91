//! Hue-cycling emphasis effect.
//!
//! Renderers attach a [`ColorCycle`] to the headline of an announcement and
//! sample it every frame. When the emphasis window ends the text goes back
//! to [`RESET_COLOR`].

use serde::{Deserialize, Serialize};

/// Colour text returns to once the emphasis window is over
pub const RESET_COLOR: [u8; 4] = [255, 255, 255, 255];

/// Rotates hue at a fixed rate while holding saturation and brightness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorCycle {
    /// Full hue turns per second
    pub speed: f32,
    /// 0.0 - 1.0
    pub saturation: f32,
    /// 0.0 - 1.0
    pub brightness: f32,
}

impl Default for ColorCycle {
    fn default() -> Self {
        Self {
            speed: 1.2,
            saturation: 1.0,
            brightness: 1.0,
        }
    }
}

impl ColorCycle {
    /// Hue (0.0 - 1.0) after `elapsed_secs`, starting from `start_hue`
    pub fn hue_at(&self, start_hue: f32, elapsed_secs: f32) -> f32 {
        (start_hue + elapsed_secs * self.speed).rem_euclid(1.0)
    }

    /// RGBA colour after `elapsed_secs`, starting from `start_hue`
    pub fn color_at(&self, start_hue: f32, elapsed_secs: f32) -> [u8; 4] {
        let [r, g, b] = hsv_to_rgb(
            self.hue_at(start_hue, elapsed_secs),
            self.saturation.clamp(0.0, 1.0),
            self.brightness.clamp(0.0, 1.0),
        );
        [r, g, b, 255]
    }
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [u8; 3] {
    let sector = h * 6.0;
    let i = sector.floor();
    let f = sector - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match i as u32 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    let to_byte = |c: f32| (c * 255.0).round().clamp(0.0, 255.0) as u8;
    [to_byte(r), to_byte(g), to_byte(b)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_red_from_hue_zero() {
        let cycle = ColorCycle::default();
        assert_eq!(cycle.color_at(0.0, 0.0), [255, 0, 0, 255]);
    }

    #[test]
    fn hue_wraps_around() {
        let cycle = ColorCycle {
            speed: 1.0,
            ..ColorCycle::default()
        };
        assert!((cycle.hue_at(0.5, 0.75) - 0.25).abs() < 1e-5);
    }

    #[test]
    fn third_of_a_turn_is_green() {
        let cycle = ColorCycle {
            speed: 1.0,
            ..ColorCycle::default()
        };
        let [r, g, b, a] = cycle.color_at(0.0, 1.0 / 3.0);
        assert_eq!(g, 255);
        assert!(r <= 1 && b <= 1);
        assert_eq!(a, 255);
    }

    #[test]
    fn zero_saturation_is_grey() {
        let cycle = ColorCycle {
            saturation: 0.0,
            brightness: 0.5,
            ..ColorCycle::default()
        };
        let [r, g, b, _] = cycle.color_at(0.3, 2.0);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }
}
