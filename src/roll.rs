//! Flatten a hierarchical score into a piano roll — a flat list of
//! (pitch, start, end) note events with absolute times in quarter-note
//! beats.  This is the bridge between the score model and the chart
//! renderer: it discards everything except sounding pitches.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::Score;

/// One sounding pitch in the piano roll.
///
/// Chords expand to one event per constituent pitch, all sharing the
/// chord's start and end.  Times are in quarter-note beats from the
/// start of the score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// MIDI note number (middle C = 60)
    pub pitch: i32,
    /// Absolute start time in quarter-note beats
    pub start: f64,
    /// Absolute end time in quarter-note beats
    pub end: f64,
}

/// Default divisions per quarter note.
const DEFAULT_DIVISIONS: i32 = 1;
/// Default time signature.
const DEFAULT_TIME_SIG: (i32, i32) = (4, 4);

/// Flatten a score into a piano roll.
///
/// All parts are overlaid, each starting at beat 0.  Within a measure,
/// a per-(staff, voice) cursor tracks the position in divisions:
/// MusicXML lists each voice's notes sequentially in document order, so
/// separate cursors keep multi-voice timing correct without modeling
/// `<backup>`/`<forward>`.  Rests advance their cursor silently; grace
/// notes take no time and are skipped; chord-flagged notes reuse the
/// onset of the previous note in the same voice.
pub fn flatten(score: &Score) -> Vec<NoteEvent> {
    let mut roll = Vec::new();

    for part in &score.parts {
        let mut divisions = DEFAULT_DIVISIONS;
        let mut time_sig = DEFAULT_TIME_SIG;
        let mut measure_start: f64 = 0.0;

        for measure in &part.measures {
            if let Some(ref attrs) = measure.attributes {
                if let Some(d) = attrs.divisions {
                    divisions = d;
                }
                if let Some(ref ts) = attrs.time {
                    time_sig = (ts.beats, ts.beat_type);
                }
            }
            let div = divisions.max(1) as f64;

            // Per-(staff, voice) position tracking in divisions, plus
            // the last onset per voice so chord notes can share it.
            type VoiceKey = (i32, i32); // (staff, voice)
            let mut voice_positions: HashMap<VoiceKey, f64> = HashMap::new();
            let mut voice_last_onset: HashMap<VoiceKey, f64> = HashMap::new();

            for note in &measure.notes {
                if note.grace {
                    continue;
                }

                let vk: VoiceKey = (note.staff.unwrap_or(1), note.voice.unwrap_or(1));
                let pos_div = voice_positions.entry(vk).or_insert(0.0);

                if note.chord {
                    if !note.rest {
                        if let Some(ref pitch) = note.pitch {
                            let onset = voice_last_onset.get(&vk).copied().unwrap_or(0.0);
                            let start = measure_start + onset / div;
                            let end = start + note.duration as f64 / div;
                            roll.push(NoteEvent {
                                pitch: pitch.to_midi(),
                                start,
                                end,
                            });
                        }
                    }
                    continue;
                }

                if note.rest {
                    *pos_div += note.duration as f64;
                    continue;
                }

                if let Some(ref pitch) = note.pitch {
                    voice_last_onset.insert(vk, *pos_div);
                    let start = measure_start + *pos_div / div;
                    let end = start + note.duration as f64 / div;
                    roll.push(NoteEvent {
                        pitch: pitch.to_midi(),
                        start,
                        end,
                    });
                }

                *pos_div += note.duration as f64;
            }

            // Advance to the next measure.  Nominal length comes from the
            // time signature; a pickup (implicit) measure that is shorter
            // than nominal advances by its actual content instead.
            let nominal_quarters = (time_sig.0 as f64 / time_sig.1 as f64) * 4.0;
            let content_quarters = voice_positions
                .values()
                .fold(0.0f64, |acc, &p| acc.max(p))
                / div;
            let advance = if measure.implicit
                && content_quarters > 0.0
                && content_quarters < nominal_quarters
            {
                content_quarters
            } else {
                nominal_quarters
            };
            measure_start += advance;
        }
    }

    roll
}
