// Windowed loudness measurement
// The queryable dBFS capability the analysis stages read through

use thiserror::Error;

use crate::audio::ingest::AudioClip;

/// Reading reported for silent or empty windows instead of negative
/// infinity, which would poison every downstream comparison.
pub const SILENCE_FLOOR_DB: f64 = -120.0;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("loudness query failed for window {start_ms:.0}..{end_ms:.0} ms: {reason}")]
    Query {
        start_ms: f64,
        end_ms: f64,
        reason: String,
    },
}

/// A track whose average loudness can be sampled over arbitrary windows.
///
/// The production implementation is [`ClipSource`]; tests substitute stubs
/// with hand-built loudness landscapes.
pub trait LoudnessSource {
    /// Average loudness of the window in dBFS (logarithmic, <= 0.0).
    /// Windows are clamped to the track bounds; an implementation decides
    /// what a fully out-of-range window reads as.
    fn loudness(&self, start_ms: f64, end_ms: f64) -> Result<f64, SourceError>;

    /// Total track length in milliseconds.
    fn duration_ms(&self) -> f64;
}

/// Loudness source backed by an in-memory clip, normally the low-passed
/// track.
pub struct ClipSource {
    clip: AudioClip,
}

impl ClipSource {
    pub fn new(clip: AudioClip) -> Self {
        ClipSource { clip }
    }

    pub fn clip(&self) -> &AudioClip {
        &self.clip
    }
}

impl LoudnessSource for ClipSource {
    fn loudness(&self, start_ms: f64, end_ms: f64) -> Result<f64, SourceError> {
        let start = self.clip.index_at_ms(start_ms);
        let end = self.clip.index_at_ms(end_ms);
        if start >= end {
            return Ok(SILENCE_FLOOR_DB);
        }

        let window = &self.clip.samples[start..end];
        let mean_square = window
            .iter()
            .map(|&s| s as f64 * s as f64)
            .sum::<f64>()
            / window.len() as f64;

        if mean_square <= 0.0 {
            return Ok(SILENCE_FLOOR_DB);
        }

        let db = 20.0 * mean_square.sqrt().log10();
        Ok(db.max(SILENCE_FLOOR_DB))
    }

    fn duration_ms(&self) -> f64 {
        self.clip.duration_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip_of(samples: Vec<f32>) -> ClipSource {
        ClipSource::new(AudioClip {
            samples,
            sample_rate: 1000, // 1 sample per millisecond keeps the math readable
        })
    }

    #[test]
    fn test_full_scale_is_zero_dbfs() {
        let source = clip_of(vec![1.0; 1000]);
        let db = source.loudness(0.0, 1000.0).unwrap();
        assert!(db.abs() < 0.001);
    }

    #[test]
    fn test_half_scale_is_minus_six_dbfs() {
        let source = clip_of(vec![0.5; 1000]);
        let db = source.loudness(0.0, 1000.0).unwrap();
        assert!((db + 6.02).abs() < 0.05);
    }

    #[test]
    fn test_silence_reads_floor() {
        let source = clip_of(vec![0.0; 1000]);
        assert_eq!(source.loudness(0.0, 1000.0).unwrap(), SILENCE_FLOOR_DB);
    }

    #[test]
    fn test_out_of_range_window_clamps() {
        let source = clip_of(vec![0.5; 100]);

        // Window straddling the track end clamps to the available samples.
        let db = source.loudness(50.0, 5000.0).unwrap();
        assert!((db + 6.02).abs() < 0.05);

        // Fully past the end reads as silence.
        assert_eq!(source.loudness(500.0, 600.0).unwrap(), SILENCE_FLOOR_DB);

        // Negative start clamps to the beginning.
        let db = source.loudness(-3000.0, 100.0).unwrap();
        assert!((db + 6.02).abs() < 0.05);
    }

    #[test]
    fn test_window_selects_the_right_samples() {
        let mut samples = vec![0.0; 1000];
        for s in samples[200..300].iter_mut() {
            *s = 1.0;
        }
        let source = clip_of(samples);

        assert!(source.loudness(200.0, 300.0).unwrap().abs() < 0.001);
        assert_eq!(source.loudness(0.0, 100.0).unwrap(), SILENCE_FLOOR_DB);
    }
}
