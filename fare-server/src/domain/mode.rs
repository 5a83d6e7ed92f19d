//! Transport modes.

use std::fmt;

/// Error returned when parsing an unknown mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode {0:?}: expected \"rail\" or \"bus\"")]
pub struct InvalidMode(String);

/// A transport mode with its own network and fare scheme.
///
/// Rail prices journeys by fare zone with standard and period tables;
/// bus prices them by fare band, per route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mode {
    Rail,
    Bus,
}

impl Mode {
    /// All modes, in display order.
    pub const ALL: [Mode; 2] = [Mode::Rail, Mode::Bus];

    /// Parse a mode name, ignoring ASCII case.
    pub fn parse(s: &str) -> Result<Self, InvalidMode> {
        if s.eq_ignore_ascii_case("rail") {
            Ok(Mode::Rail)
        } else if s.eq_ignore_ascii_case("bus") {
            Ok(Mode::Bus)
        } else {
            Err(InvalidMode(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Rail => "rail",
            Mode::Bus => "bus",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
