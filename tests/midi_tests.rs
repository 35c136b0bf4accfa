//! Integration tests — import hand-encoded Standard MIDI Files.

use pretty_assertions::assert_eq;

use pianoroll::{piano_roll_from_midi, NoteEvent};

/// Assemble an SMF from raw track payloads (end-of-track not included).
fn smf(format: u16, division: u16, tracks: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"MThd");
    out.extend_from_slice(&6u32.to_be_bytes());
    out.extend_from_slice(&format.to_be_bytes());
    out.extend_from_slice(&(tracks.len() as u16).to_be_bytes());
    out.extend_from_slice(&division.to_be_bytes());
    for track in tracks {
        let mut data = track.clone();
        data.extend_from_slice(&[0x00, 0xFF, 0x2F, 0x00]); // end of track
        out.extend_from_slice(b"MTrk");
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());
        out.extend_from_slice(&data);
    }
    out
}

#[test]
fn single_note_on_off_pair() {
    // C4 at tick 0, off at tick 480 (one beat at 480 ticks/quarter)
    let track = vec![
        0x00, 0x90, 0x3C, 0x50, // delta 0, note on C4
        0x83, 0x60, 0x80, 0x3C, 0x00, // delta 480, note off C4
    ];
    let roll = piano_roll_from_midi(&smf(0, 480, &[track])).expect("MIDI import failed");

    assert_eq!(
        roll,
        vec![NoteEvent {
            pitch: 60,
            start: 0.0,
            end: 1.0,
        }]
    );
}

#[test]
fn note_on_velocity_zero_is_note_off() {
    let track = vec![
        0x00, 0x90, 0x40, 0x50, // note on E4
        0x60, 0x90, 0x40, 0x00, // delta 96, note on vel 0 == off
    ];
    let roll = piano_roll_from_midi(&smf(0, 96, &[track])).expect("MIDI import failed");

    assert_eq!(roll.len(), 1);
    assert_eq!(roll[0].pitch, 64);
    assert_eq!(roll[0].end, 1.0);
}

#[test]
fn simultaneous_notes_share_times() {
    // C and E both on at tick 0, both off at tick 240
    let track = vec![
        0x00, 0x90, 0x3C, 0x50, // on C4
        0x00, 0x90, 0x40, 0x50, // on E4
        0x81, 0x70, 0x80, 0x3C, 0x00, // delta 240, off C4
        0x00, 0x80, 0x40, 0x00, // off E4
    ];
    let roll = piano_roll_from_midi(&smf(0, 480, &[track])).expect("MIDI import failed");

    assert_eq!(roll.len(), 2);
    for ev in &roll {
        assert_eq!(ev.start, 0.0);
        assert_eq!(ev.end, 0.5);
    }
}

#[test]
fn parallel_tracks_each_start_at_zero() {
    let melody = vec![
        0x00, 0x90, 0x48, 0x50, // on C5
        0x60, 0x80, 0x48, 0x00, // delta 96, off
    ];
    let bass = vec![
        0x00, 0x91, 0x30, 0x50, // on C3, channel 1
        0x60, 0x81, 0x30, 0x00,
    ];
    let roll =
        piano_roll_from_midi(&smf(1, 96, &[melody, bass])).expect("MIDI import failed");

    assert_eq!(roll.len(), 2);
    assert_eq!(roll[0].start, 0.0);
    assert_eq!(roll[1].start, 0.0);
}

#[test]
fn dangling_note_is_closed_at_track_end() {
    let track = vec![
        0x00, 0x90, 0x3C, 0x50, // on C4, never released
        0x83, 0x60, 0xFF, 0x01, 0x00, // delta 480, empty text meta event
    ];
    let roll = piano_roll_from_midi(&smf(0, 480, &[track])).expect("MIDI import failed");

    assert_eq!(roll.len(), 1);
    assert_eq!(roll[0].start, 0.0);
    assert_eq!(roll[0].end, 1.0);
}

#[test]
fn smpte_timecode_is_rejected() {
    // Division with the high bit set: -25 fps, 40 subframes
    let division = u16::from_be_bytes([0xE7, 0x28]);
    let err = piano_roll_from_midi(&smf(0, division, &[vec![]])).unwrap_err();
    assert!(
        err.contains("SMPTE"),
        "Error should mention SMPTE timing, got: {err}"
    );
}

#[test]
fn garbage_bytes_are_an_error() {
    assert!(piano_roll_from_midi(b"not a midi file").is_err());
}
