//! Static music-theory lookup tables.

use serde::{Deserialize, Serialize};

/// Map a key spelling to its pitch class (C=0 .. B=11).
///
/// Covers the 21 enharmonic spellings that occur in theorytab files,
/// including the awkward ones (E#, Fb, B#, Cb). Anything else is not a
/// key this format knows about.
pub fn pitch_class(spelling: &str) -> Option<u8> {
    let pc = match spelling {
        "C" | "B#" => 0,
        "C#" | "Db" => 1,
        "D" => 2,
        "D#" | "Eb" => 3,
        "E" | "Fb" => 4,
        "E#" | "F" => 5,
        "F#" | "Gb" => 6,
        "G" => 7,
        "G#" | "Ab" => 8,
        "A" => 9,
        "A#" | "Bb" => 10,
        "B" | "Cb" => 11,
        _ => return None,
    };
    Some(pc)
}

/// A diatonic mode, numbered 1 (Ionian) through 7 (Locrian) as in
/// theorytab files. Serializes as its number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Mode {
    #[default]
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
}

impl Mode {
    /// The mode number used in theorytab files (1-7).
    pub fn number(self) -> u8 {
        match self {
            Mode::Ionian => 1,
            Mode::Dorian => 2,
            Mode::Phrygian => 3,
            Mode::Lydian => 4,
            Mode::Mixolydian => 5,
            Mode::Aeolian => 6,
            Mode::Locrian => 7,
        }
    }

    pub fn from_number(n: u8) -> Option<Mode> {
        match n {
            1 => Some(Mode::Ionian),
            2 => Some(Mode::Dorian),
            3 => Some(Mode::Phrygian),
            4 => Some(Mode::Lydian),
            5 => Some(Mode::Mixolydian),
            6 => Some(Mode::Aeolian),
            7 => Some(Mode::Locrian),
            _ => None,
        }
    }

    /// Conventional name, with the major/minor aliases.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Ionian => "Major/Ionian",
            Mode::Dorian => "Dorian",
            Mode::Phrygian => "Phrygian",
            Mode::Lydian => "Lydian",
            Mode::Mixolydian => "Mixolydian",
            Mode::Aeolian => "Minor/Aeolian",
            Mode::Locrian => "Locrian",
        }
    }
}

impl From<Mode> for u8 {
    fn from(mode: Mode) -> u8 {
        mode.number()
    }
}

impl TryFrom<u8> for Mode {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Mode::from_number(n).ok_or_else(|| format!("mode number out of range: {}", n))
    }
}
