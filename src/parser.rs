//! MusicXML parser — converts MusicXML XML into the Score data model.

use roxmltree::{Document, Node};

use crate::model::*;

/// Parse a MusicXML XML string into a Score.
pub fn parse_musicxml(xml: &str) -> Result<Score, String> {
    // MusicXML files include a DOCTYPE declaration, so we must allow DTDs
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let doc = Document::parse_with_options(xml, options)
        .map_err(|e| format!("XML parse error: {e}"))?;
    let root = doc.root_element();

    // Verify this is a score-partwise document
    if root.tag_name().name() != "score-partwise" {
        return Err(format!(
            "Unsupported root element: '{}'. Only 'score-partwise' is supported.",
            root.tag_name().name()
        ));
    }

    let mut score = Score::new();
    score.version = root.attribute("version").map(String::from);

    // Parse top-level elements
    for child in root.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "work" => parse_work(&child, &mut score),
            "identification" => parse_identification(&child, &mut score),
            "part-list" => parse_part_list(&child, &mut score),
            "part" => parse_part(&child, &mut score),
            _ => {}
        }
    }

    Ok(score)
}

// ─── Work ────────────────────────────────────────────────────────────

fn parse_work(node: &Node, score: &mut Score) {
    for child in node.children().filter(|n| n.is_element()) {
        if child.tag_name().name() == "work-title" {
            score.title = child.text().map(|t| t.trim().to_string());
        }
    }
}

// ─── Identification ──────────────────────────────────────────────────

fn parse_identification(node: &Node, score: &mut Score) {
    for child in node.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "creator" => {
                if child.attribute("type") == Some("composer") {
                    score.composer = child.text().map(|t| t.trim().to_string());
                }
            }
            "encoding" => {
                for enc_child in child.children().filter(|n| n.is_element()) {
                    if enc_child.tag_name().name() == "software" {
                        score.software = enc_child.text().map(|t| t.trim().to_string());
                    }
                }
            }
            _ => {}
        }
    }
}

// ─── Part List ───────────────────────────────────────────────────────

fn parse_part_list(node: &Node, score: &mut Score) {
    for child in node.children().filter(|n| n.is_element()) {
        if child.tag_name().name() == "score-part" {
            let id = child.attribute("id").unwrap_or("").to_string();
            let mut part = Part {
                id,
                name: String::new(),
                midi_program: None,
                midi_channel: None,
                measures: Vec::new(),
            };

            for sp_child in child.children().filter(|n| n.is_element()) {
                match sp_child.tag_name().name() {
                    "part-name" => {
                        part.name = sp_child.text().unwrap_or("").trim().to_string();
                    }
                    "midi-instrument" => {
                        for midi in sp_child.children().filter(|n| n.is_element()) {
                            match midi.tag_name().name() {
                                "midi-channel" => {
                                    part.midi_channel = parse_i32(&midi);
                                }
                                "midi-program" => {
                                    part.midi_program = parse_i32(&midi);
                                }
                                _ => {}
                            }
                        }
                    }
                    _ => {}
                }
            }

            score.parts.push(part);
        }
    }
}

// ─── Part (measures) ─────────────────────────────────────────────────

fn parse_part(node: &Node, score: &mut Score) {
    let part_id = node.attribute("id").unwrap_or("").to_string();

    // Find the matching part from the part-list
    let part = match score.parts.iter_mut().find(|p| p.id == part_id) {
        Some(p) => p,
        None => return,
    };

    for child in node.children().filter(|n| n.is_element()) {
        if child.tag_name().name() == "measure" {
            part.measures.push(parse_measure(&child));
        }
    }
}

// ─── Measure ─────────────────────────────────────────────────────────

fn parse_measure(node: &Node) -> Measure {
    let number = node
        .attribute("number")
        .and_then(|n| n.parse::<i32>().ok())
        .unwrap_or(0);
    let implicit = node.attribute("implicit") == Some("yes");

    let mut measure = Measure {
        number,
        implicit,
        attributes: None,
        notes: Vec::new(),
    };

    for child in node.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "attributes" => measure.attributes = Some(parse_attributes(&child)),
            "note" => measure.notes.push(parse_note(&child)),
            _ => {}
        }
    }

    measure
}

// ─── Attributes ──────────────────────────────────────────────────────

fn parse_attributes(node: &Node) -> Attributes {
    let mut attrs = Attributes {
        divisions: None,
        key: None,
        time: None,
    };

    for child in node.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "divisions" => attrs.divisions = parse_i32(&child),
            "key" => attrs.key = Some(parse_key(&child)),
            "time" => attrs.time = Some(parse_time(&child)),
            _ => {}
        }
    }

    attrs
}

fn parse_key(node: &Node) -> Key {
    let mut key = Key {
        fifths: 0,
        mode: None,
    };
    for child in node.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "fifths" => key.fifths = parse_i32(&child).unwrap_or(0),
            "mode" => key.mode = child.text().map(|t| t.trim().to_string()),
            _ => {}
        }
    }
    key
}

fn parse_time(node: &Node) -> TimeSignature {
    let mut ts = TimeSignature {
        beats: 4,
        beat_type: 4,
    };
    for child in node.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "beats" => ts.beats = parse_i32(&child).unwrap_or(4),
            "beat-type" => ts.beat_type = parse_i32(&child).unwrap_or(4),
            _ => {}
        }
    }
    ts
}

// ─── Note ────────────────────────────────────────────────────────────

fn parse_note(node: &Node) -> Note {
    let mut note = Note {
        pitch: None,
        duration: 0,
        voice: None,
        staff: None,
        note_type: None,
        rest: false,
        chord: false,
        grace: false,
        dot: false,
        accidental: None,
        tie_start: false,
        tie_stop: false,
    };

    for child in node.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "pitch" => note.pitch = Some(parse_pitch(&child)),
            "duration" => note.duration = parse_i32(&child).unwrap_or(0),
            "voice" => note.voice = parse_i32(&child),
            "staff" => note.staff = parse_i32(&child),
            "type" => {
                note.note_type = child.text().map(|t| t.trim().to_string());
            }
            "rest" => note.rest = true,
            "grace" => note.grace = true,
            "chord" => note.chord = true,
            "dot" => note.dot = true,
            "accidental" => {
                note.accidental = child.text().map(|t| t.trim().to_string());
            }
            "tie" => match child.attribute("type") {
                Some("start") => note.tie_start = true,
                Some("stop") => note.tie_stop = true,
                _ => {}
            },
            _ => {}
        }
    }

    note
}

fn parse_pitch(node: &Node) -> Pitch {
    let mut pitch = Pitch {
        step: "C".to_string(),
        octave: 4,
        alter: None,
    };
    for child in node.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "step" => {
                pitch.step = child.text().unwrap_or("C").trim().to_string();
            }
            "octave" => pitch.octave = parse_i32(&child).unwrap_or(4),
            "alter" => pitch.alter = parse_f64(&child),
            _ => {}
        }
    }
    pitch
}

// ─── Helpers ─────────────────────────────────────────────────────────

fn parse_i32(node: &Node) -> Option<i32> {
    node.text()?.trim().parse().ok()
}

fn parse_f64(node: &Node) -> Option<f64> {
    node.text()?.trim().parse().ok()
}
