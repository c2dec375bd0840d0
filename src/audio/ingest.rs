// Audio ingestion
// Reads WAV files and normalizes them to mono f32 samples

use hound::{SampleFormat, WavReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to read WAV file: {0}")]
    WavRead(#[from] hound::Error),

    #[error("unsupported audio format: {bits}-bit {format:?}")]
    UnsupportedFormat { bits: u16, format: SampleFormat },

    #[error("audio stream contains no samples")]
    Empty,
}

/// Decoded audio, downmixed to mono with samples normalized to [-1.0, 1.0].
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub samples: Vec<f32>,

    /// Sample rate in Hz (e.g., 44100, 48000)
    pub sample_rate: u32,
}

impl AudioClip {
    /// Total length in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.samples.len() as f64 * 1000.0 / self.sample_rate as f64
    }

    /// Sample index for a millisecond offset, clamped to the clip bounds.
    /// Negative offsets clamp to the start of the clip.
    pub fn index_at_ms(&self, ms: f64) -> usize {
        let index = (ms / 1000.0 * self.sample_rate as f64) as usize;
        index.min(self.samples.len())
    }
}

/// Read a WAV file and downmix it to a mono clip.
pub fn ingest_wav(path: &Path) -> Result<AudioClip, AudioError> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();

    // Normalize samples to f32 [-1.0, 1.0]
    let raw: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / 32768.0))
            .collect::<Result<_, _>>()?,
        (SampleFormat::Int, 24) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as f32 / 8_388_608.0))
            .collect::<Result<_, _>>()?,
        (SampleFormat::Int, 32) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as f32 / 2_147_483_648.0))
            .collect::<Result<_, _>>()?,
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()?,
        (format, bits) => return Err(AudioError::UnsupportedFormat { bits, format }),
    };

    if raw.is_empty() {
        return Err(AudioError::Empty);
    }

    let channels = spec.channels.max(1) as usize;
    let samples = if channels == 1 {
        raw
    } else {
        raw.chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    };

    Ok(AudioClip {
        samples,
        sample_rate: spec.sample_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};

    fn write_test_wav(path: &Path, channels: u16, samples: &[i16]) {
        let spec = WavSpec {
            channels,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_ingest_mono() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.wav");
        write_test_wav(&path, 1, &[0, 16384, -16384, 32767]);

        let clip = ingest_wav(&path).unwrap();
        assert_eq!(clip.samples.len(), 4);
        assert_eq!(clip.sample_rate, 44100);
        assert!((clip.samples[1] - 0.5).abs() < 0.001);
        assert!((clip.samples[2] + 0.5).abs() < 0.001);
    }

    #[test]
    fn test_ingest_stereo_downmix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        // Two frames: (16384, 0) and (-16384, -16384)
        write_test_wav(&path, 2, &[16384, 0, -16384, -16384]);

        let clip = ingest_wav(&path).unwrap();
        assert_eq!(clip.samples.len(), 2);
        assert!((clip.samples[0] - 0.25).abs() < 0.001);
        assert!((clip.samples[1] + 0.5).abs() < 0.001);
    }

    #[test]
    fn test_ingest_empty_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.wav");
        write_test_wav(&path, 1, &[]);

        assert!(matches!(ingest_wav(&path), Err(AudioError::Empty)));
    }

    #[test]
    fn test_duration_and_indexing() {
        let clip = AudioClip {
            samples: vec![0.0; 44100],
            sample_rate: 44100,
        };

        assert!((clip.duration_ms() - 1000.0).abs() < 0.001);
        assert_eq!(clip.index_at_ms(0.0), 0);
        assert_eq!(clip.index_at_ms(500.0), 22050);
        // Past-the-end and negative offsets clamp
        assert_eq!(clip.index_at_ms(2000.0), 44100);
        assert_eq!(clip.index_at_ms(-100.0), 0);
    }
}
