// Beatmap export module
// Writes the info and difficulty JSON documents

pub mod beatmap;

pub use beatmap::{export_song, BeatmapDoc, ExportError, InfoDoc};
