//! Piano roll renderer — draws the note events as a PNG chart.
//!
//! Each note is a horizontal segment at its pitch height, colored by
//! pitch class from a fixed 12-color palette.  The y axis is labeled at
//! octave boundaries (`C4-(60)`), and an optional legend lists the pitch
//! classes actually present.

use std::path::Path;

use log::warn;
use plotters::coord::combinators::BindKeyPoints;
use plotters::prelude::*;

use crate::roll::NoteEvent;

/// Chart size in pixels.
const FIGURE_SIZE: (u32, u32) = (1400, 500);

/// One color per pitch class, indexed by `pitch % 12`.
pub const GRAPH_COLORS: [RGBColor; 12] = [
    RGBColor(255, 0, 0),     // red
    RGBColor(0, 128, 0),     // green
    RGBColor(0, 0, 255),     // blue
    RGBColor(255, 255, 0),   // yellow
    RGBColor(128, 0, 128),   // purple
    RGBColor(255, 165, 0),   // orange
    RGBColor(0, 255, 255),   // cyan
    RGBColor(255, 0, 255),   // magenta
    RGBColor(0, 255, 0),     // lime
    RGBColor(255, 192, 203), // pink
    RGBColor(0, 128, 128),   // teal
    RGBColor(230, 230, 250), // lavender
];

/// Chromatic pitch-class names, indexed by `pitch % 12`.
pub const PITCH_CLASSES: [&str; 12] = [
    "C", "C#/Db", "D", "D#/Eb", "E", "F", "F#/Gb", "G", "G#/Ab", "A", "A#/Bb", "B",
];

/// Color for a MIDI pitch.  Pitches an octave apart share a color.
pub fn color_for_pitch(pitch: i32) -> RGBColor {
    GRAPH_COLORS[pitch.rem_euclid(12) as usize]
}

/// Vertical chart bounds: the pitch span rounded out to octave boundaries.
/// `max` is one past the next C at or above `max_pitch`, so that y ticks
/// stepping by 12 from `min` include the top octave line.
pub fn octave_bounds(min_pitch: i32, max_pitch: i32) -> (i32, i32) {
    let min_y = min_pitch - min_pitch.rem_euclid(12);
    let max_y = max_pitch + 13 - max_pitch.rem_euclid(12);
    (min_y, max_y)
}

/// Render a piano roll and save it as `<output_dir>/piano_rolls/<label>.png`.
///
/// The roll is sorted in place by note end time (stable, so simultaneous
/// ends keep their insertion order).  An empty roll still produces a
/// valid chart with x bounds (0, 1).
///
/// A missing output directory is logged and swallowed: no file is
/// written and `Ok(())` is returned.  Any other backend failure is an
/// error.
pub fn save_piano_roll(
    roll: &mut Vec<NoteEvent>,
    label: &str,
    output_dir: &Path,
    show_legend: bool,
) -> Result<(), String> {
    let out_path = output_dir
        .join("piano_rolls")
        .join(format!("{label}.png"));
    if !out_path.parent().map_or(false, Path::is_dir) {
        warn!("[pianoroll] The directory does not exist for saving the piano roll figure.");
        return Ok(());
    }

    let min_pitch = roll.iter().map(|n| n.pitch).min().unwrap_or(60);
    let max_pitch = roll.iter().map(|n| n.pitch).max().unwrap_or(71);
    let (min_y, max_y) = octave_bounds(min_pitch, max_pitch);

    roll.sort_by(|a, b| a.end.total_cmp(&b.end));

    let x_max = roll.last().map_or(1.0, |n| n.end + 0.1);
    let octave_ticks: Vec<i32> = (min_y..max_y).step_by(12).collect();

    let root = BitMapBackend::new(&out_path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| format!("Failed to fill chart background: {e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Piano roll for {label}"), ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..x_max, (min_y..max_y).with_key_points(octave_ticks))
        .map_err(|e| format!("Failed to build chart: {e}"))?;

    chart
        .configure_mesh()
        .x_desc("Time (beats)")
        .y_desc("Pitch")
        .y_label_formatter(&|y: &i32| format!("C{}-({})", y / 12 - 1, y))
        .draw()
        .map_err(|e| format!("Failed to draw chart mesh: {e}"))?;

    let mut classes_present = [false; 12];
    for ev in roll.iter() {
        let pc = ev.pitch.rem_euclid(12) as usize;
        classes_present[pc] = true;
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(ev.start, ev.pitch), (ev.end, ev.pitch)],
                GRAPH_COLORS[pc].stroke_width(3),
            )))
            .map_err(|e| format!("Failed to draw note: {e}"))?;
    }

    if show_legend {
        // One legend entry per pitch class present, in chromatic order.
        // The series themselves are empty; only the labels matter here.
        for (pc, name) in PITCH_CLASSES.iter().enumerate() {
            if !classes_present[pc] {
                continue;
            }
            let color = GRAPH_COLORS[pc];
            chart
                .draw_series(std::iter::empty::<PathElement<(f64, i32)>>())
                .map_err(|e| format!("Failed to add legend entry: {e}"))?
                .label(*name)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
                });
        }
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(|e| format!("Failed to draw legend: {e}"))?;
    }

    root.present()
        .map_err(|e| format!("Failed to write piano roll figure: {e}"))
}
