//! UI preference values persisted next to roadmaps.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Color theme preference for presentation shells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses a stored theme string.
    ///
    /// Anything other than `dark` (case-insensitive) reads as `Light`, which
    /// matches how shells treat unknown values.
    pub fn parse_lenient(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("dark") {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Theme;

    #[test]
    fn parse_lenient_falls_back_to_light() {
        assert_eq!(Theme::parse_lenient(" DARK "), Theme::Dark);
        assert_eq!(Theme::parse_lenient("solarized"), Theme::Light);
        assert_eq!(Theme::parse_lenient(""), Theme::Light);
    }

    #[test]
    fn toggled_flips_between_variants() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }
}
