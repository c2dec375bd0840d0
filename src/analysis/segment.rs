// Loudness segmentation
// Slices the loudness source into fixed-width, contiguous time windows

use serde::{Deserialize, Serialize};

use crate::audio::{LoudnessSource, SourceError};

/// A fixed-width time window with its measured loudness magnitude.
///
/// `amplitude` is the absolute value of the window's dBFS reading, so the
/// detector works on non-negative magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Window midpoint in milliseconds from the start of the track.
    pub time_ms: f64,

    /// Non-negative loudness magnitude (`|dBFS|`).
    pub amplitude: f64,
}

/// Partition the source's duration into consecutive windows of `window_ms`
/// and sample the loudness of each. The trailing short window is included
/// with whatever the source reports for it.
pub fn segment_source<S>(source: &S, window_ms: f64) -> Result<Vec<Segment>, SourceError>
where
    S: LoudnessSource + ?Sized,
{
    let duration = source.duration_ms();
    if window_ms <= 0.0 || duration <= 0.0 {
        return Ok(Vec::new());
    }

    let count = (duration / window_ms).ceil() as usize;
    let mut segments = Vec::with_capacity(count);

    for i in 0..count {
        let start = i as f64 * window_ms;
        let end = (start + window_ms).min(duration);
        let loudness = source.loudness(start, end)?;

        segments.push(Segment {
            time_ms: start + window_ms / 2.0,
            amplitude: loudness.abs(),
        });
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Source whose loudness is a linear ramp: -1 dB per second of offset.
    struct RampSource {
        duration_ms: f64,
    }

    impl LoudnessSource for RampSource {
        fn loudness(&self, start_ms: f64, _end_ms: f64) -> Result<f64, SourceError> {
            Ok(-start_ms / 1000.0)
        }

        fn duration_ms(&self) -> f64 {
            self.duration_ms
        }
    }

    #[test]
    fn test_segment_count_and_midpoints() {
        let source = RampSource { duration_ms: 100.0 };
        let segments = segment_source(&source, 10.0).unwrap();

        assert_eq!(segments.len(), 10);
        assert_eq!(segments[0].time_ms, 5.0);
        assert_eq!(segments[9].time_ms, 95.0);
    }

    #[test]
    fn test_short_tail_window_is_included() {
        let source = RampSource { duration_ms: 95.0 };
        let segments = segment_source(&source, 10.0).unwrap();

        // ceil(95 / 10) = 10 windows; the last covers only 90..95 ms but
        // keeps the nominal midpoint.
        assert_eq!(segments.len(), 10);
        assert_eq!(segments[9].time_ms, 95.0);
    }

    #[test]
    fn test_amplitude_is_magnitude() {
        let source = RampSource {
            duration_ms: 3000.0,
        };
        let segments = segment_source(&source, 1000.0).unwrap();

        // Readings of 0, -1, -2 dB become magnitudes 0, 1, 2.
        assert_eq!(segments[0].amplitude, 0.0);
        assert_eq!(segments[1].amplitude, 1.0);
        assert_eq!(segments[2].amplitude, 2.0);
    }

    #[test]
    fn test_degenerate_inputs_yield_empty() {
        let source = RampSource { duration_ms: 0.0 };
        assert!(segment_source(&source, 10.0).unwrap().is_empty());

        let source = RampSource { duration_ms: 100.0 };
        assert!(segment_source(&source, 0.0).unwrap().is_empty());
    }

    #[test]
    fn test_source_failure_propagates() {
        struct FailingSource;

        impl LoudnessSource for FailingSource {
            fn loudness(&self, start_ms: f64, end_ms: f64) -> Result<f64, SourceError> {
                Err(SourceError::Query {
                    start_ms,
                    end_ms,
                    reason: "decode failed".into(),
                })
            }

            fn duration_ms(&self) -> f64 {
                100.0
            }
        }

        assert!(segment_source(&FailingSource, 10.0).is_err());
    }
}
