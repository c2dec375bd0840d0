// Song aggregate
// Runs the full analysis pipeline once at construction

use log::{debug, info};
use thiserror::Error;

use crate::analysis::{detect_peaks, estimate_bpm, segment_source, PeakConfig, Segment, TempoError};
use crate::audio::{LoudnessSource, SourceError};
use crate::chart::{ChartSynthesizer, Note};

/// Errors that abort the generation pipeline.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("loudness source failed: {0}")]
    Source(#[from] SourceError),

    #[error("tempo estimation failed: {0}")]
    Tempo(#[from] TempoError),
}

/// Tuning for the whole generation pipeline.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Segmentation window width in milliseconds.
    pub window_width_ms: f64,

    /// Peak detector tuning.
    pub peaks: PeakConfig,

    /// BPM clamp range.
    pub min_bpm: f64,
    pub max_bpm: f64,

    /// Seed for the chart synthesizer's random generator.
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            window_width_ms: 10.0,
            peaks: PeakConfig::default(),
            min_bpm: 50.0,
            max_bpm: 200.0,
            seed: 1,
        }
    }
}

/// A fully analyzed track: loudness segments, accepted peaks, estimated
/// tempo, and the synthesized chart. Everything is computed here once and
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct Song {
    pub name: String,
    pub segments: Vec<Segment>,
    pub peaks: Vec<Segment>,
    pub bpm: f64,
    pub notes: Vec<Note>,
}

impl Song {
    /// Run the pipeline: segment the loudness source, detect peaks,
    /// estimate tempo, synthesize the chart.
    ///
    /// Tempo estimation runs before synthesis, so a track with fewer than
    /// two detected peaks aborts with [`TempoError::InsufficientPeaks`]
    /// instead of producing a chart with an undefined tempo.
    pub fn analyze<S>(
        name: impl Into<String>,
        source: &S,
        config: &GeneratorConfig,
    ) -> Result<Song, ChartError>
    where
        S: LoudnessSource + ?Sized,
    {
        let name = name.into();

        let segments = segment_source(source, config.window_width_ms)?;
        debug!(
            "{}: {} segments at {} ms windows",
            name,
            segments.len(),
            config.window_width_ms
        );

        let peaks = detect_peaks(source, &segments, &config.peaks)?;
        info!("{}: {} peaks detected", name, peaks.len());

        let bpm = estimate_bpm(&peaks, config.min_bpm, config.max_bpm)?;
        info!("{}: estimated {:.1} BPM", name, bpm);

        let notes = ChartSynthesizer::new(config.seed).synthesize(&peaks, bpm);
        info!("{}: {} notes synthesized", name, notes.len());

        Ok(Song {
            name,
            segments,
            peaks,
            bpm,
            notes,
        })
    }
}
