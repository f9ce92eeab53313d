use crate::lexer::{LetterRun, RunKind};
use crate::parser::Document;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Direction of a single-semitone transposition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Direction for a signed step count; zero has none
    pub fn from_steps(steps: i32) -> Option<Self> {
        match steps.signum() {
            1 => Some(Direction::Up),
            -1 => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Step every chord on one chord line and rebalance the gaps around it.
///
/// Separators are restored to their tokenized text first, so compensation from
/// an earlier pass never accumulates. A chord that grows takes one space from a
/// following gap of two or more spaces; a chord that shrinks pads itself with
/// one space unless it ends the line. Returns the number of chords stepped.
pub fn transpose_line(runs: &mut [LetterRun], direction: Direction) -> usize {
    for run in runs.iter_mut().filter(|run| run.is_separator()) {
        run.restore();
    }

    let mut stepped = 0;
    for index in 0..runs.len() {
        let run = &mut runs[index];
        // N.C. and other empty chords keep their letters
        if run.kind != RunKind::Chord || run.chord.is_empty() {
            continue;
        }

        match direction {
            Direction::Up => run.chord.step_up(),
            Direction::Down => run.chord.step_down(),
        }
        let spelled = run.chord.to_string();
        let written = run.width();
        let width = spelled.chars().count();
        trace!(from = %run.letters, to = %spelled, "stepped chord");

        if width < written && index + 1 < runs.len() {
            runs[index].transposed = Some(format!("{spelled} "));
        } else {
            runs[index].transposed = Some(spelled);
        }

        if width > written {
            if let Some(next) = runs.get_mut(index + 1) {
                if next.is_separator() && next.letters.starts_with("  ") {
                    next.letters.remove(0);
                }
            }
        }
        stepped += 1;
    }
    stepped
}

/// Transpose every chord line of a document by one semitone, in place.
pub fn transpose_document(doc: &mut Document, direction: Direction) {
    let mut stepped = 0;
    for line in doc.chord_lines_mut() {
        stepped += transpose_line(&mut line.runs, direction);
    }
    debug!(?direction, chords = stepped, "transposed document");
}

/// Transpose by a signed number of semitones as repeated single steps.
pub fn transpose_steps(doc: &mut Document, steps: i32) {
    let Some(direction) = Direction::from_steps(steps) else {
        return;
    };
    for _ in 0..steps.unsigned_abs() {
        transpose_document(doc, direction);
    }
}

impl Document {
    pub fn transpose_up(&mut self) {
        transpose_document(self, Direction::Up);
    }

    pub fn transpose_down(&mut self) {
        transpose_document(self, Direction::Down);
    }
}
