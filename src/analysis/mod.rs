// Signal analysis module
// Segmentation, peak detection, and tempo estimation

pub mod peaks;
pub mod segment;
pub mod tempo;

pub use peaks::{detect_peaks, PeakConfig};
pub use segment::{segment_source, Segment};
pub use tempo::{estimate_bpm, TempoError};
