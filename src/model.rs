//! Data model for a parsed music score.
//!
//! These structures capture the musical information needed to flatten a
//! score into a piano roll: parts, measures, timing attributes, and notes.

use serde::{Deserialize, Serialize};

/// A complete musical score parsed from MusicXML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    /// Title of the piece
    pub title: Option<String>,
    /// Composer name
    pub composer: Option<String>,
    /// MusicXML version (e.g., "3.1", "4.0")
    pub version: Option<String>,
    /// Software that created the file
    pub software: Option<String>,
    /// Musical parts (instruments)
    pub parts: Vec<Part>,
}

/// A musical part (one instrument or voice).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// Part identifier (e.g., "P1")
    pub id: String,
    /// Part name (e.g., "Classical Guitar")
    pub name: String,
    /// MIDI program number
    pub midi_program: Option<i32>,
    /// MIDI channel
    pub midi_channel: Option<i32>,
    /// Ordered list of measures
    pub measures: Vec<Measure>,
}

/// A single measure (bar) of music.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measure {
    /// Measure number
    pub number: i32,
    /// Whether this is an implicit measure (e.g., pickup/anacrusis)
    pub implicit: bool,
    /// Attributes (divisions, key, time) — only present when they change
    pub attributes: Option<Attributes>,
    /// Notes and rests in this measure
    pub notes: Vec<Note>,
}

/// Musical attributes that may change at the start of a measure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attributes {
    /// Divisions per quarter note (determines duration resolution)
    pub divisions: Option<i32>,
    /// Key signature
    pub key: Option<Key>,
    /// Time signature
    pub time: Option<TimeSignature>,
}

/// Key signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Key {
    /// Number of sharps (positive) or flats (negative)
    pub fifths: i32,
    /// Mode (e.g., "major", "minor")
    pub mode: Option<String>,
}

/// Time signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSignature {
    /// Numerator (e.g., 3 in 3/4)
    pub beats: i32,
    /// Denominator (e.g., 4 in 3/4)
    pub beat_type: i32,
}

/// A single note or rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Pitch (None if this is a rest)
    pub pitch: Option<Pitch>,
    /// Duration in divisions
    pub duration: i32,
    /// Voice number (for multi-voice writing)
    pub voice: Option<i32>,
    /// Staff number (1-based; for multi-staff parts like piano)
    pub staff: Option<i32>,
    /// Note type: "whole", "half", "quarter", "eighth", "16th", "32nd"
    pub note_type: Option<String>,
    /// Whether this is a rest
    pub rest: bool,
    /// Whether this note is part of a chord with the previous note
    pub chord: bool,
    /// Whether this is a grace note (takes no time)
    pub grace: bool,
    /// Whether the note has a dot
    pub dot: bool,
    /// Accidental: "sharp", "flat", "natural", "double-sharp", "flat-flat"
    pub accidental: Option<String>,
    /// Tie start (first note of a tie chain)
    pub tie_start: bool,
    /// Tie stop (last note of a tie chain)
    pub tie_stop: bool,
}

/// Pitch of a note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pitch {
    /// Note name: A, B, C, D, E, F, G
    pub step: String,
    /// Octave number (middle C = C4)
    pub octave: i32,
    /// Chromatic alteration: -1.0 = flat, 1.0 = sharp, 0.0 = natural
    pub alter: Option<f64>,
}

impl Score {
    /// Create a new empty score.
    pub fn new() -> Self {
        Self {
            title: None,
            composer: None,
            version: None,
            software: None,
            parts: Vec::new(),
        }
    }

    /// Get the total number of measures across all parts.
    pub fn measure_count(&self) -> usize {
        self.parts.first().map_or(0, |p| p.measures.len())
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Pitch {
    /// Convert pitch to MIDI note number.
    /// Middle C (C4) = 60.
    pub fn to_midi(&self) -> i32 {
        let step_semitone = match self.step.as_str() {
            "C" => 0,
            "D" => 2,
            "E" => 4,
            "F" => 5,
            "G" => 7,
            "A" => 9,
            "B" => 11,
            _ => 0,
        };
        let alter = self.alter.unwrap_or(0.0) as i32;
        (self.octave + 1) * 12 + step_semitone + alter
    }
}
