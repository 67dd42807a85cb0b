// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Egviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Debug cursor over the server's saturation history.
//!
//! The position itself lives on the server. The client only knows which direction it last
//! asked for and whether debug mode is on; boundaries are reported back as server messages.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    FastForward,
    FastBackward,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Self::FastBackward, Self::Backward, Self::Forward, Self::FastForward];

    /// Wire name sent as the `/move` payload.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::FastForward => "fastforward",
            Self::FastBackward => "fastbackward",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError {
    value: String,
}

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown move direction '{}'", self.value)
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.as_str() == s)
            .ok_or_else(|| ParseDirectionError { value: s.to_owned() })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugCursor {
    debug_mode: bool,
    last_confirmed: Option<Direction>,
}

impl DebugCursor {
    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn set_debug_mode(&mut self, enabled: bool) {
        self.debug_mode = enabled;
    }

    pub fn toggle_debug_mode(&mut self) -> bool {
        self.debug_mode = !self.debug_mode;
        self.debug_mode
    }

    /// Last move the server accepted. Informational only; never used to derive a position.
    pub fn last_confirmed(&self) -> Option<Direction> {
        self.last_confirmed
    }

    pub(crate) fn confirm_move(&mut self, direction: Direction) {
        self.last_confirmed = Some(direction);
    }
}

#[cfg(test)]
mod tests {
    use super::{DebugCursor, Direction};

    #[test]
    fn direction_wire_names_round_trip_through_from_str() {
        for direction in Direction::ALL {
            assert_eq!(direction.as_str().parse::<Direction>(), Ok(direction));
        }
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn debug_mode_defaults_off() {
        let mut cursor = DebugCursor::default();
        assert!(!cursor.debug_mode());
        assert!(cursor.toggle_debug_mode());
        assert_eq!(cursor.last_confirmed(), None);
    }
}
