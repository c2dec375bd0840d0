// Pattern library
// Pre-authored multi-step templates and the gap quantization table

use crate::chart::types::{ColorChannel, CutDirection};

/// Canonical beat unit for a raw inter-peak gap, or `None` when the gap
/// falls outside every quantizable range.
///
/// The ranges assume roughly 100-200 BPM material: a 75-150 ms gap reads as
/// a quarter unit, 150-300 ms as a half, 300-600 ms as a whole. Anything
/// faster or slower is unmatchable and falls back to a single note.
pub fn quantize_gap(gap_ms: f64) -> Option<f64> {
    if (75.0..150.0).contains(&gap_ms) {
        Some(0.25)
    } else if (150.0..300.0).contains(&gap_ms) {
        Some(0.5)
    } else if (300.0..=600.0).contains(&gap_ms) {
        Some(1.0)
    } else {
        None
    }
}

/// One action inside a pattern step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternNote {
    pub color: ColorChannel,
    pub row: u8,
    pub column: u8,
    pub direction: CutDirection,
}

/// Names for the catalogued templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Dance,
    Cross,
    Drumroll,
    RollLeftRight,
    RollRightLeft,
    TapRed,
    TapBlue,
    TapRedHalf,
    TapBlueHalf,
    Hop,
    Wheel,
}

/// A pre-authored spatial/directional template.
///
/// `signatures` are the accepted timing shapes: cumulative beat offsets,
/// one per step, always starting at 0.0. A pattern with several signatures
/// matches the same spatial shape at different speeds.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub kind: PatternKind,
    pub signatures: Vec<Vec<f64>>,
    pub steps: Vec<Vec<PatternNote>>,
}

impl Pattern {
    /// Step count of the longest pattern; bounds the synthesizer's search.
    pub fn max_steps(patterns: &[Pattern]) -> usize {
        patterns.iter().map(|p| p.steps.len()).max().unwrap_or(0)
    }
}

/// The built-in pattern catalogue.
pub fn catalogue() -> Vec<Pattern> {
    use ColorChannel::{Blue, Red};
    use CutDirection::*;

    let note = |color, row, column, direction| PatternNote {
        color,
        row,
        column,
        direction,
    };

    vec![
        // Both hands swap vertically on each beat.
        Pattern {
            kind: PatternKind::Dance,
            signatures: vec![vec![0.0, 1.0], vec![0.0, 0.5]],
            steps: vec![
                vec![note(Red, 1, 0, Down), note(Blue, 2, 2, Up)],
                vec![note(Red, 2, 0, Up), note(Blue, 1, 2, Down)],
            ],
        },
        // Hands cross the center line and swing back out.
        Pattern {
            kind: PatternKind::Cross,
            signatures: vec![vec![0.0, 1.0]],
            steps: vec![
                vec![note(Red, 1, 2, Right), note(Blue, 2, 0, Left)],
                vec![note(Red, 1, 0, Left), note(Blue, 2, 2, Right)],
            ],
        },
        // Fast alternating center strikes; only the opening hit is cued.
        Pattern {
            kind: PatternKind::Drumroll,
            signatures: vec![vec![0.0, 0.25, 0.5, 0.75]],
            steps: vec![
                vec![note(Red, 1, 1, Down)],
                vec![note(Blue, 1, 2, Dot)],
                vec![note(Red, 1, 1, Dot)],
                vec![note(Blue, 1, 2, Dot)],
            ],
        },
        // Sweep across the lanes, left to right.
        Pattern {
            kind: PatternKind::RollLeftRight,
            signatures: vec![vec![0.0, 0.25, 0.5, 0.75]],
            steps: vec![
                vec![note(Red, 1, 0, Down)],
                vec![note(Blue, 1, 1, Up)],
                vec![note(Red, 1, 2, Up)],
                vec![note(Blue, 1, 3, Down)],
            ],
        },
        // The same sweep mirrored.
        Pattern {
            kind: PatternKind::RollRightLeft,
            signatures: vec![vec![0.0, 0.25, 0.5, 0.75]],
            steps: vec![
                vec![note(Blue, 1, 3, Down)],
                vec![note(Red, 1, 2, Up)],
                vec![note(Blue, 1, 1, Up)],
                vec![note(Red, 1, 0, Down)],
            ],
        },
        // Steady one-handed taps on the outer lane.
        Pattern {
            kind: PatternKind::TapRed,
            signatures: vec![vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 0.5, 1.0, 1.5]],
            steps: vec![
                vec![note(Red, 1, 0, Down)],
                vec![note(Red, 1, 0, Down)],
                vec![note(Red, 1, 0, Down)],
                vec![note(Red, 1, 0, Down)],
            ],
        },
        Pattern {
            kind: PatternKind::TapBlue,
            signatures: vec![vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 0.5, 1.0, 1.5]],
            steps: vec![
                vec![note(Blue, 1, 3, Down)],
                vec![note(Blue, 1, 3, Down)],
                vec![note(Blue, 1, 3, Down)],
                vec![note(Blue, 1, 3, Down)],
            ],
        },
        // Two-tap versions for shorter runs.
        Pattern {
            kind: PatternKind::TapRedHalf,
            signatures: vec![vec![0.0, 1.0], vec![0.0, 0.5]],
            steps: vec![
                vec![note(Red, 1, 0, Down)],
                vec![note(Red, 1, 0, Down)],
            ],
        },
        Pattern {
            kind: PatternKind::TapBlueHalf,
            signatures: vec![vec![0.0, 1.0], vec![0.0, 0.5]],
            steps: vec![
                vec![note(Blue, 1, 3, Down)],
                vec![note(Blue, 1, 3, Down)],
            ],
        },
        // One hand hops from the bottom row to the top.
        Pattern {
            kind: PatternKind::Hop,
            signatures: vec![vec![0.0, 0.5]],
            steps: vec![
                vec![note(Red, 0, 1, Down)],
                vec![note(Red, 2, 1, Up)],
            ],
        },
        // One hand traces a circle on the right-hand lane.
        Pattern {
            kind: PatternKind::Wheel,
            signatures: vec![vec![0.0, 0.5, 1.0, 1.5]],
            steps: vec![
                vec![note(Blue, 1, 2, Up)],
                vec![note(Blue, 2, 2, Right)],
                vec![note(Blue, 1, 2, Down)],
                vec![note(Blue, 0, 2, Left)],
            ],
        },
    ]
}
