// One-pole RC low-pass filter
// Isolates the percussive low band before loudness analysis

use std::f32::consts::TAU;

use crate::audio::ingest::AudioClip;

/// Low-pass a clip with a one-pole RC filter: `y += alpha * (x - y)`.
///
/// A first-order filter rolls off at 6 dB/octave, which is enough to make
/// kick and bass hits dominate the loudness envelope the rest of the
/// pipeline reads.
pub fn low_pass(clip: &AudioClip, cutoff_hz: f32) -> AudioClip {
    let rc = 1.0 / (TAU * cutoff_hz);
    let dt = 1.0 / clip.sample_rate as f32;
    let alpha = dt / (rc + dt);

    let mut filtered = Vec::with_capacity(clip.samples.len());
    let mut prev = 0.0f32;
    for &x in &clip.samples {
        prev += alpha * (x - prev);
        filtered.push(prev);
    }

    AudioClip {
        samples: filtered,
        sample_rate: clip.sample_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dc_passes_through() {
        let clip = AudioClip {
            samples: vec![0.8; 44100],
            sample_rate: 44100,
        };

        let filtered = low_pass(&clip, 120.0);

        // After settling, a constant signal comes out unchanged.
        let tail = filtered.samples[44000];
        assert!((tail - 0.8).abs() < 0.01);
    }

    #[test]
    fn test_nyquist_is_attenuated() {
        // Alternating +1/-1 at the sample rate is the highest representable
        // frequency and should be crushed by a 120 Hz cutoff.
        let samples: Vec<f32> = (0..44100)
            .map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let clip = AudioClip {
            samples,
            sample_rate: 44100,
        };

        let filtered = low_pass(&clip, 120.0);

        let peak = filtered.samples[44000..]
            .iter()
            .fold(0.0f32, |acc, &s| acc.max(s.abs()));
        assert!(peak < 0.05, "expected heavy attenuation, got peak {peak}");
    }

    #[test]
    fn test_length_and_rate_preserved() {
        let clip = AudioClip {
            samples: vec![0.1, 0.2, 0.3],
            sample_rate: 48000,
        };

        let filtered = low_pass(&clip, 120.0);
        assert_eq!(filtered.samples.len(), 3);
        assert_eq!(filtered.sample_rate, 48000);
    }
}
