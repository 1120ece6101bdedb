// File: src/core/tone.rs
use std::fmt;

/// A Mandarin tone, independent of the notation it was written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tone {
    First = 1,
    Second = 2,
    Third = 3,
    Fourth = 4,
    /// Unstressed syllable. Also the fallback for any unreadable tone marker.
    #[default]
    Neutral = 5,
}

impl Tone {
    pub const FULL: [Tone; 4] = [Tone::First, Tone::Second, Tone::Third, Tone::Fourth];

    /// Maps `1..=5` to a tone; anything else is `None`.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Tone::First),
            2 => Some(Tone::Second),
            3 => Some(Tone::Third),
            4 => Some(Tone::Fourth),
            5 => Some(Tone::Neutral),
            _ => None,
        }
    }

    /// Reads an ASCII tone digit. Non-tone characters yield `None`.
    pub fn from_digit(c: char) -> Option<Self> {
        c.to_digit(10).and_then(|d| Self::from_number(d as u8))
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    /// Index into the four-entry mark tables, `None` for the neutral tone.
    pub fn mark_index(self) -> Option<usize> {
        match self {
            Tone::Neutral => None,
            full => Some(full as usize - 1),
        }
    }

    pub fn is_full(self) -> bool {
        self != Tone::Neutral
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
