//! CLI entry point — convert a score file into a piano roll chart.
//!
//! Usage: `pianoroll <score-file>` where the file is `.xml`, `.musicxml`,
//! `.mxl`, or `.mid`.  The chart is written to
//! `./piano_rolls/<score-file>.png`.

use std::path::Path;
use std::process;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let score_path = match args.next() {
        Some(p) => p,
        None => {
            eprintln!("Usage: pianoroll <score-file (.xml, .mxl, .mid)>");
            process::exit(2);
        }
    };

    let mut roll = match pianoroll::piano_roll_from_file(&score_path) {
        Ok(roll) => roll,
        Err(e) => {
            eprintln!("[pianoroll] {e}");
            process::exit(1);
        }
    };

    if let Err(e) = pianoroll::save_piano_roll(&mut roll, &score_path, Path::new("."), false) {
        eprintln!("[pianoroll] {e}");
        process::exit(1);
    }
}
