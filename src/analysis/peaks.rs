// Peak detection
// Multi-criteria local-maximum scan over the loudness segments

use crate::analysis::segment::Segment;
use crate::audio::{LoudnessSource, SourceError};

/// A neighbour this much quieter than the candidate counts as evidence of a
/// sharp onset rather than a plateau.
const DISTINCT_RATIO: f64 = 0.75;

/// Fraction of the local loudness floor every neighbour must stay above.
const FLOOR_RATIO: f64 = 0.5;

/// Configuration for the peak detector.
#[derive(Debug, Clone)]
pub struct PeakConfig {
    /// How many segments on each side a candidate must dominate.
    pub lookaround: usize,

    /// Minimum time between accepted peaks in milliseconds.
    pub min_gap_ms: f64,

    /// Loudness-floor window: how far before the candidate the reference
    /// query starts.
    pub floor_before_ms: f64,

    /// Loudness-floor window: how far after the candidate the reference
    /// query ends. Asymmetric on purpose, the decay after an onset says
    /// more about the local level than the build-up before it.
    pub floor_after_ms: f64,
}

impl Default for PeakConfig {
    fn default() -> Self {
        PeakConfig {
            lookaround: 6,
            min_gap_ms: 100.0,
            floor_before_ms: 3000.0,
            floor_after_ms: 5000.0,
        }
    }
}

/// Scan the segments for rhythmic onsets.
///
/// A candidate is accepted when it is strictly louder than every segment
/// within `lookaround` on both sides, has at least one clearly quieter
/// neighbour on each side, sits in a neighbourhood above the local loudness
/// floor, and is far enough from the previously accepted peak. The scan is a
/// single forward pass, so the output is ascending by construction.
///
/// Fewer than 3 segments can hold no interior candidate and yield an empty
/// list, never an error.
pub fn detect_peaks<S>(
    source: &S,
    segments: &[Segment],
    config: &PeakConfig,
) -> Result<Vec<Segment>, SourceError>
where
    S: LoudnessSource + ?Sized,
{
    if segments.len() < 3 {
        return Ok(Vec::new());
    }

    let mut peaks = Vec::new();
    let mut last_peak_ms = 0.0;

    for i in 1..segments.len() - 1 {
        let cur = segments[i];
        let left = &segments[i.saturating_sub(config.lookaround)..i];
        let right = &segments[i + 1..(i + 1 + config.lookaround).min(segments.len())];

        // Louder than everything nearby.
        if !left
            .iter()
            .chain(right)
            .all(|s| cur.amplitude > s.amplitude)
        {
            continue;
        }

        // A sharp onset, not a plateau: at least one clearly quieter
        // neighbour on each side.
        let distinct = |s: &Segment| s.amplitude < cur.amplitude * DISTINCT_RATIO;
        if !(left.iter().any(|s| distinct(s)) && right.iter().any(|s| distinct(s))) {
            continue;
        }

        // The whole neighbourhood must sit above the local loudness floor.
        let floor = source
            .loudness(
                cur.time_ms - config.floor_before_ms,
                cur.time_ms + config.floor_after_ms,
            )?
            .abs();
        if !left
            .iter()
            .chain(right)
            .all(|s| s.amplitude > floor * FLOOR_RATIO)
        {
            continue;
        }

        // Keep notes from stacking up too close together.
        if cur.time_ms - last_peak_ms < config.min_gap_ms {
            continue;
        }

        peaks.push(cur);
        last_peak_ms = cur.time_ms;
    }

    Ok(peaks)
}
