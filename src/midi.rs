//! MIDI importer — reads a Standard MIDI File into a piano roll.
//!
//! Unlike MusicXML, a MIDI file already is a flat event list, so no
//! score model is involved: NoteOn/NoteOff pairs become `NoteEvent`s
//! directly, with tick times converted to quarter-note beats.

use log::warn;
use midly::{Format, MidiMessage, Smf, Timing, TrackEventKind};

use crate::roll::NoteEvent;

/// Parse SMF bytes into a piano roll with times in quarter-note beats.
///
/// Only metrical timing (ticks per quarter note) is supported; SMPTE
/// timecode division has no beat grid to map onto and is rejected.
pub fn piano_roll_from_midi(data: &[u8]) -> Result<Vec<NoteEvent>, String> {
    let smf = Smf::parse(data).map_err(|e| format!("MIDI parse error: {e}"))?;

    let ticks_per_beat = match smf.header.timing {
        Timing::Metrical(tpq) => f64::from(tpq.as_int()),
        Timing::Timecode(..) => {
            return Err("SMPTE timecode timing is not supported".to_string());
        }
    };

    let mut roll = Vec::new();
    let mut time: u64 = 0;

    for track in &smf.tracks {
        if matches!(smf.header.format, Format::Parallel) {
            time = 0;
        }

        // Onset tick of the currently sounding note per pitch.  A second
        // NoteOn for an already-open pitch is ignored rather than stacked.
        let mut open: [Option<u64>; 128] = [None; 128];

        for event in track {
            time += u64::from(event.delta.as_int());

            if let TrackEventKind::Midi { message, .. } = event.kind {
                match message {
                    MidiMessage::NoteOn { key, vel } if vel.as_int() > 0 => {
                        let slot = &mut open[usize::from(key.as_int())];
                        if slot.is_none() {
                            *slot = Some(time);
                        }
                    }
                    // NoteOn with velocity 0 is the wire-level idiom for NoteOff
                    MidiMessage::NoteOn { key, .. } | MidiMessage::NoteOff { key, .. } => {
                        if let Some(start) = open[usize::from(key.as_int())].take() {
                            roll.push(NoteEvent {
                                pitch: i32::from(key.as_int()),
                                start: start as f64 / ticks_per_beat,
                                end: time as f64 / ticks_per_beat,
                            });
                        }
                    }
                    _ => {}
                }
            }
        }

        for (key, slot) in open.iter_mut().enumerate() {
            if let Some(start) = slot.take() {
                warn!("[pianoroll] note {key} has no note-off; closing at end of track");
                roll.push(NoteEvent {
                    pitch: key as i32,
                    start: start as f64 / ticks_per_beat,
                    end: time as f64 / ticks_per_beat,
                });
            }
        }
    }

    Ok(roll)
}
