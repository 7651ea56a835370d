use core::fmt;

use crate::settings::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    One,
    Two,
}

impl Slot {
    pub fn other(self) -> Self {
        match self {
            Slot::One => Slot::Two,
            Slot::Two => Slot::One,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Slot::One => 0,
            Slot::Two => 1,
        }
    }

    fn default_name(self) -> &'static str {
        match self {
            Slot::One => DEFAULT_PLAYER_ONE,
            Slot::Two => DEFAULT_PLAYER_TWO,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,
    pub total: f64,
}

impl Player {
    /// Blank names fall back to "Player 1" / "Player 2".
    pub fn new(slot: Slot, name: &str) -> Self {
        let name = name.trim();
        let name = if name.is_empty() {
            slot.default_name().to_string()
        } else {
            name.to_string()
        };
        Self { name, total: 0.0 }
    }

    pub fn add_score(&mut self, score: f64) {
        self.total += score;
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.2}", self.name, self.total)
    }
}
