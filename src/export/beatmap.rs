// Beatmap document serialization
// v2.0.0 info.dat plus difficulty .dat, the schema the game loader expects

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::chart::Note;
use crate::song::Song;

const DIFFICULTY_NAME: &str = "Expert";
const DIFFICULTY_RANK: u32 = 7;
const NOTE_JUMP_SPEED: u32 = 12;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One note entry in the difficulty document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteEntry {
    #[serde(rename = "_time")]
    pub time: f64,

    #[serde(rename = "_lineIndex")]
    pub line_index: u8,

    #[serde(rename = "_lineLayer")]
    pub line_layer: u8,

    #[serde(rename = "_type")]
    pub note_type: u8,

    #[serde(rename = "_cutDirection")]
    pub cut_direction: u8,
}

impl From<&Note> for NoteEntry {
    fn from(note: &Note) -> Self {
        NoteEntry {
            time: note.time,
            line_index: note.column,
            line_layer: note.row,
            note_type: note.color.ordinal(),
            cut_direction: note.direction.ordinal(),
        }
    }
}

/// The difficulty document. Lighting events and obstacles are part of the
/// schema but stay empty, the generator only places notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeatmapDoc {
    #[serde(rename = "_events")]
    pub events: Vec<serde_json::Value>,

    #[serde(rename = "_notes")]
    pub notes: Vec<NoteEntry>,

    #[serde(rename = "_obstacles")]
    pub obstacles: Vec<serde_json::Value>,
}

impl BeatmapDoc {
    pub fn from_notes(notes: &[Note]) -> Self {
        BeatmapDoc {
            events: Vec::new(),
            notes: notes.iter().map(NoteEntry::from).collect(),
            obstacles: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyEntry {
    #[serde(rename = "_difficulty")]
    pub difficulty: String,

    #[serde(rename = "_difficultyRank")]
    pub difficulty_rank: u32,

    #[serde(rename = "_beatmapFilename")]
    pub beatmap_filename: String,

    #[serde(rename = "_noteJumpMovementSpeed")]
    pub note_jump_movement_speed: u32,

    #[serde(rename = "_noteJumpStartBeatOffset")]
    pub note_jump_start_beat_offset: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeatmapSet {
    #[serde(rename = "_beatmapCharacteristicName")]
    pub characteristic_name: String,

    #[serde(rename = "_difficultyBeatmaps")]
    pub difficulty_beatmaps: Vec<DifficultyEntry>,
}

/// The song metadata document (`info.dat`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoDoc {
    #[serde(rename = "_version")]
    pub version: String,

    #[serde(rename = "_songName")]
    pub song_name: String,

    #[serde(rename = "_songSubName")]
    pub song_sub_name: String,

    #[serde(rename = "_songAuthorName")]
    pub song_author_name: String,

    #[serde(rename = "_levelAuthorName")]
    pub level_author_name: String,

    #[serde(rename = "_beatsPerMinute")]
    pub beats_per_minute: f64,

    #[serde(rename = "_shuffle")]
    pub shuffle: f64,

    #[serde(rename = "_shufflePeriod")]
    pub shuffle_period: f64,

    #[serde(rename = "_previewStartTime")]
    pub preview_start_time: f64,

    #[serde(rename = "_previewDuration")]
    pub preview_duration: f64,

    #[serde(rename = "_songFilename")]
    pub song_filename: String,

    #[serde(rename = "_environmentName")]
    pub environment_name: String,

    #[serde(rename = "_songTimeOffset")]
    pub song_time_offset: f64,

    #[serde(rename = "_difficultyBeatmapSets")]
    pub difficulty_beatmap_sets: Vec<BeatmapSet>,
}

impl InfoDoc {
    pub fn for_song(song: &Song) -> Self {
        InfoDoc {
            version: "2.0.0".to_string(),
            song_name: song.name.clone(),
            song_sub_name: String::new(),
            song_author_name: String::new(),
            level_author_name: "sabergen".to_string(),
            beats_per_minute: song.bpm,
            shuffle: 0.0,
            shuffle_period: 0.5,
            preview_start_time: 0.0,
            preview_duration: 15.0,
            song_filename: format!("{}.wav", song.name),
            environment_name: "BigMirrorEnvironment".to_string(),
            song_time_offset: 0.0,
            difficulty_beatmap_sets: vec![BeatmapSet {
                characteristic_name: "Standard".to_string(),
                difficulty_beatmaps: vec![DifficultyEntry {
                    difficulty: DIFFICULTY_NAME.to_string(),
                    difficulty_rank: DIFFICULTY_RANK,
                    beatmap_filename: format!("{DIFFICULTY_NAME}.dat"),
                    note_jump_movement_speed: NOTE_JUMP_SPEED,
                    note_jump_start_beat_offset: 0.0,
                }],
            }],
        }
    }
}

/// Write `info.dat` and the difficulty document into `<out_dir>/<name>/`.
/// Returns the song directory. The caller is responsible for placing the
/// audio file referenced by the metadata next to them.
pub fn export_song(song: &Song, out_dir: &Path) -> Result<PathBuf, ExportError> {
    let song_dir = out_dir.join(&song.name);
    fs::create_dir_all(&song_dir)?;

    let info = InfoDoc::for_song(song);
    fs::write(
        song_dir.join("info.dat"),
        serde_json::to_vec_pretty(&info)?,
    )?;

    let chart = BeatmapDoc::from_notes(&song.notes);
    fs::write(
        song_dir.join(format!("{DIFFICULTY_NAME}.dat")),
        serde_json::to_vec_pretty(&chart)?,
    )?;

    Ok(song_dir)
}
