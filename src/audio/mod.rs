// Audio module
// WAV ingestion, low-pass filtering, and windowed loudness measurement

pub mod filter;
pub mod ingest;
pub mod loudness;

pub use filter::low_pass;
pub use ingest::{ingest_wav, AudioClip, AudioError};
pub use loudness::{ClipSource, LoudnessSource, SourceError};
