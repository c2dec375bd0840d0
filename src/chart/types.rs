// Chart note types
// Wire-compatible color, direction, and note records for the beatmap format

use serde::{Deserialize, Serialize};

/// Note color. Ordinals follow the beatmap wire format, where 2 is unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorChannel {
    Red,
    Blue,

    /// Present in the wire format; the generator never places bombs.
    Bomb,
}

impl ColorChannel {
    /// Wire ordinal used by the beatmap format.
    pub fn ordinal(self) -> u8 {
        match self {
            ColorChannel::Red => 0,
            ColorChannel::Blue => 1,
            ColorChannel::Bomb => 3,
        }
    }
}

/// Cut direction of a note: eight compass directions plus the "any
/// direction" dot. Declaration order matches the wire ordinals 0..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutDirection {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
    Dot,
}

impl CutDirection {
    /// The eight directional codes, excluding the dot sentinel.
    pub const DIRECTIONAL: [CutDirection; 8] = [
        CutDirection::Up,
        CutDirection::Down,
        CutDirection::Left,
        CutDirection::Right,
        CutDirection::UpLeft,
        CutDirection::UpRight,
        CutDirection::DownLeft,
        CutDirection::DownRight,
    ];

    /// All nine codes.
    pub const ALL: [CutDirection; 9] = [
        CutDirection::Up,
        CutDirection::Down,
        CutDirection::Left,
        CutDirection::Right,
        CutDirection::UpLeft,
        CutDirection::UpRight,
        CutDirection::DownLeft,
        CutDirection::DownRight,
        CutDirection::Dot,
    ];

    /// Wire ordinal used by the beatmap format.
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

/// A single timed, positioned, directional action in the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub color: ColorChannel,

    /// Beat-normalized time: fractional beats from the start of the track.
    pub time: f64,

    /// Vertical layer, 0 (bottom) to 2 (top).
    pub row: u8,

    /// Horizontal lane, 0 (leftmost) to 3 (rightmost).
    pub column: u8,

    pub direction: CutDirection,

    /// The raw onset time in milliseconds this note was placed on, kept for
    /// diagnostics and preview.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_time_ms: Option<f64>,
}
