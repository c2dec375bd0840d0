// Chart synthesis
// Greedy pattern-matching scan over the detected peaks with a randomized
// single-note fallback

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::analysis::segment::Segment;
use crate::chart::directions::transitions;
use crate::chart::patterns::{catalogue, quantize_gap, Pattern};
use crate::chart::types::{ColorChannel, CutDirection, Note};

/// Beat-normalized time for a raw millisecond offset.
pub fn adjusted_time(raw_ms: f64, bpm: f64) -> f64 {
    let beat_ms = 60_000.0 / bpm;
    raw_ms / beat_ms
}

/// Synthesizes the note chart from the detected peaks.
///
/// All randomness flows through one generator seeded at construction and
/// consumed in program order: a pattern hit costs exactly one draw, a
/// fallback note costs four (row, column, color, direction). Identical
/// peaks, BPM, and seed therefore reproduce the chart exactly.
pub struct ChartSynthesizer {
    patterns: Vec<Pattern>,
    rng: ChaCha8Rng,
}

impl ChartSynthesizer {
    pub fn new(seed: u64) -> Self {
        Self::with_patterns(catalogue(), seed)
    }

    /// Use a custom pattern library instead of the built-in catalogue.
    pub fn with_patterns(patterns: Vec<Pattern>, seed: u64) -> Self {
        ChartSynthesizer {
            patterns,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Consume every peak exactly once, preferring catalogued patterns and
    /// falling back to single randomized notes. Consumes the synthesizer:
    /// one seeding, one chart.
    pub fn synthesize(mut self, peaks: &[Segment], bpm: f64) -> Vec<Note> {
        let max_len = Pattern::max_steps(&self.patterns);
        let mut notes: Vec<Note> = Vec::with_capacity(peaks.len());
        let mut i = 0;

        while i < peaks.len() {
            let last = notes.last().copied();
            let options = matching_patterns(&self.patterns, peaks, i, max_len, last);

            if options.is_empty() {
                let note = self.fallback_note(&peaks[i], bpm, last);
                notes.push(note);
                i += 1;
            } else {
                let pick = options[self.rng.gen_range(0..options.len())];
                let pattern = &self.patterns[pick];

                for (step_index, step) in pattern.steps.iter().enumerate() {
                    let peak = &peaks[i + step_index];
                    for action in step {
                        notes.push(Note {
                            color: action.color,
                            time: adjusted_time(peak.time_ms, bpm),
                            row: action.row,
                            column: action.column,
                            direction: action.direction,
                            raw_time_ms: Some(peak.time_ms),
                        });
                    }
                }

                i += pattern.steps.len();
            }
        }

        notes
    }

    /// Single randomized note for a peak no pattern claimed. The draw order
    /// is part of the determinism contract: row, column, color, direction.
    fn fallback_note(&mut self, peak: &Segment, bpm: f64, last: Option<Note>) -> Note {
        let row = self.rng.gen_range(0..3u8);
        let column = self.rng.gen_range(0..4u8);
        let color = if self.rng.gen_range(0..2u8) == 0 {
            ColorChannel::Red
        } else {
            ColorChannel::Blue
        };

        let direction = match last {
            Some(last) => {
                let pool = transitions(last.direction);
                pool[self.rng.gen_range(0..pool.len())]
            }
            None => {
                let pool = &CutDirection::DIRECTIONAL;
                pool[self.rng.gen_range(0..pool.len())]
            }
        };

        Note {
            color,
            time: adjusted_time(peak.time_ms, bpm),
            row,
            column,
            direction,
            raw_time_ms: Some(peak.time_ms),
        }
    }
}

/// Indices of the patterns whose timing signature matches the peak run at
/// `start` and whose opening direction is reachable from the last note.
fn matching_patterns(
    patterns: &[Pattern],
    peaks: &[Segment],
    start: usize,
    max_len: usize,
    last: Option<Note>,
) -> Vec<usize> {
    let mut options = Vec::new();

    for len in 1..=max_len {
        if start + len > peaks.len() {
            break;
        }

        let Some(offsets) = quantized_offsets(&peaks[start..start + len]) else {
            continue;
        };

        for (index, pattern) in patterns.iter().enumerate() {
            if pattern.steps.len() != len {
                continue;
            }
            // Offsets are sums of 0.25/0.5/1.0, all exact binary fractions,
            // so float equality against the signatures is reliable.
            if !pattern.signatures.iter().any(|sig| *sig == offsets) {
                continue;
            }
            if opening_is_compatible(pattern, last) {
                options.push(index);
            }
        }
    }

    options
}

/// Cumulative beat offsets for a run of peaks, or `None` when any gap falls
/// outside the quantization table.
fn quantized_offsets(peaks: &[Segment]) -> Option<Vec<f64>> {
    let mut offsets = Vec::with_capacity(peaks.len());
    offsets.push(0.0);

    let mut acc = 0.0;
    for pair in peaks.windows(2) {
        acc += quantize_gap(pair[1].time_ms - pair[0].time_ms)?;
        offsets.push(acc);
    }

    Some(offsets)
}

/// A pattern is playable after `last` when its first action's direction is
/// in the transition set of the last note's direction. With no last note
/// everything is compatible.
fn opening_is_compatible(pattern: &Pattern, last: Option<Note>) -> bool {
    let Some(last) = last else {
        return true;
    };
    let Some(first) = pattern.steps.first().and_then(|step| step.first()) else {
        return false;
    };

    transitions(last.direction).contains(&first.direction)
}
