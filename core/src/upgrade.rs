//! Upgrade identifiers and their normalization.
//!
//! Hosts report upgrades by display name, which may carry padding, stray
//! casing, or decoration characters. Everything inside the engine works on
//! the normalized form so `" Shield "`, `"#shield"` and `"SHIELD"` all name
//! the same upgrade.

use std::borrow::Borrow;
use std::fmt;

/// Characters stripped from both ends of an identifier, besides whitespace
pub const DECORATION_CHARS: &[char] = &['#'];

fn is_trimmed(c: char) -> bool {
    c.is_whitespace() || DECORATION_CHARS.contains(&c)
}

/// Identifier text with padding and decoration removed, casing preserved.
///
/// Used for display: announcements show requirements the way the synergy
/// author wrote them.
pub fn display_label(raw: &str) -> &str {
    raw.trim_matches(is_trimmed)
}

/// Normalized (trimmed, decoration-stripped, lowercase) upgrade identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UpgradeId(String);

impl UpgradeId {
    pub fn normalize(raw: &str) -> Self {
        Self(display_label(raw).to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for UpgradeId {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

impl Borrow<str> for UpgradeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UpgradeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UpgradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
