// Tempo estimation
// Coarse BPM from the lower-median inter-peak interval

use thiserror::Error;

use crate::analysis::segment::Segment;

#[derive(Debug, Error, PartialEq)]
pub enum TempoError {
    /// Fewer than two peaks leaves no interval to measure. The pipeline
    /// must abort on this rather than substitute a default tempo: an
    /// invented BPM would silently corrupt every note time downstream.
    #[error("cannot estimate tempo from {found} peak(s), need at least 2")]
    InsufficientPeaks { found: usize },
}

/// Estimate BPM from the detected peaks.
///
/// Sorts the consecutive inter-peak deltas and converts the element at
/// `len / 2` to beats per minute, clamped to `[min_bpm, max_bpm]`. For even
/// counts that index picks the upper of the two middle values, not an
/// interpolated median; the choice is load-bearing for reproducibility, so
/// it stays.
pub fn estimate_bpm(peaks: &[Segment], min_bpm: f64, max_bpm: f64) -> Result<f64, TempoError> {
    if peaks.len() < 2 {
        return Err(TempoError::InsufficientPeaks { found: peaks.len() });
    }

    let mut deltas: Vec<f64> = peaks
        .windows(2)
        .map(|pair| pair[1].time_ms - pair[0].time_ms)
        .collect();
    deltas.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let median = deltas[deltas.len() / 2];
    let bpm = 60_000.0 / median;

    Ok(bpm.clamp(min_bpm, max_bpm))
}
