// Sabergen CLI
// WAV in, beatmap documents out

use std::env;
use std::path::{Path, PathBuf};

use sabergen::audio::{ingest_wav, low_pass, ClipSource};
use sabergen::export::export_song;
use sabergen::song::{GeneratorConfig, Song};

/// Cutoff for isolating the percussive low band before analysis.
const LOW_PASS_CUTOFF_HZ: f32 = 120.0;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let mut args = env::args().skip(1);
    let input = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: sabergen <input.wav> [out_dir]"))?;
    let out_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("output"));

    let input = Path::new(&input);
    let name = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("song")
        .to_string();

    let clip = ingest_wav(input)?;
    let source = ClipSource::new(low_pass(&clip, LOW_PASS_CUTOFF_HZ));

    let song = Song::analyze(name, &source, &GeneratorConfig::default())?;
    println!(
        "{}: {} peaks, {:.1} BPM, {} notes",
        song.name,
        song.peaks.len(),
        song.bpm,
        song.notes.len()
    );

    let song_dir = export_song(&song, &out_dir)?;
    println!("chart written to {}", song_dir.display());

    Ok(())
}
