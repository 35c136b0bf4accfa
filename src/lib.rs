//! pianoroll — convert music scores into piano rolls and render them.
//!
//! Supports uncompressed MusicXML (.musicxml/.xml), compressed MXL
//! (.mxl), and Standard MIDI Files (.mid).
//!
//! # Example
//! ```no_run
//! use std::path::Path;
//!
//! let mut roll = pianoroll::piano_roll_from_file("path/to/score.musicxml").unwrap();
//! println!("Notes: {}", roll.len());
//! pianoroll::save_piano_roll(&mut roll, "score", Path::new("."), false).unwrap();
//! ```

pub mod midi;
pub mod model;
pub mod mxl;
pub mod parser;
pub mod render;
pub mod roll;

use std::path::Path;

pub use midi::piano_roll_from_midi;
pub use model::*;
pub use mxl::parse_mxl;
pub use parser::parse_musicxml;
pub use render::save_piano_roll;
pub use roll::{flatten, NoteEvent};

/// Parse a MusicXML file from a file path.
/// Automatically detects format based on file extension:
/// - `.musicxml` or `.xml` → uncompressed MusicXML
/// - `.mxl` → compressed MXL (ZIP archive)
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Score, String> {
    let path = path.as_ref();
    let data = std::fs::read(path)
        .map_err(|e| format!("Failed to read file '{}': {e}", path.display()))?;

    parse_bytes(&data, path.extension().and_then(|e| e.to_str()))
}

/// Parse MusicXML from raw bytes with an optional format hint.
/// If `extension` is None, tries to auto-detect the format.
pub fn parse_bytes(data: &[u8], extension: Option<&str>) -> Result<Score, String> {
    match extension {
        Some("mxl") => parse_mxl(data),
        Some("musicxml") | Some("xml") => {
            let xml = std::str::from_utf8(data)
                .map_err(|e| format!("Invalid UTF-8 in MusicXML file: {e}"))?;
            parse_musicxml(xml)
        }
        _ => {
            // Auto-detect: try as XML first, then as MXL
            if let Ok(xml) = std::str::from_utf8(data) {
                if xml.trim_start().starts_with("<?xml") || xml.trim_start().starts_with('<') {
                    return parse_musicxml(xml);
                }
            }
            // Try as MXL (ZIP)
            parse_mxl(data)
        }
    }
}

/// Load any supported score file and flatten it into a piano roll.
///
/// `.mid`/`.midi` files are read directly as note events; everything
/// else goes through the MusicXML parser and the score flattener.
pub fn piano_roll_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<NoteEvent>, String> {
    let path = path.as_ref();
    let data = std::fs::read(path)
        .map_err(|e| format!("Failed to read file '{}': {e}", path.display()))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("mid") | Some("midi") => piano_roll_from_midi(&data),
        ext => {
            let score = parse_bytes(&data, ext)?;
            Ok(flatten(&score))
        }
    }
}

/// Convert a piano roll to a JSON string.
pub fn roll_to_json(roll: &[NoteEvent]) -> Result<String, String> {
    serde_json::to_string_pretty(roll).map_err(|e| format!("JSON serialization error: {e}"))
}
