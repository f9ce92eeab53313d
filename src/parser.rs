//! # Lead Sheet Parser
//!
//! Turns raw lead sheet text into a [`Document`] of classified lines.
//!
//! ## Pipeline
//! 1. **Import** - split on `\n`, right-trim every line, mark it unclassified
//! 2. **Classify** - assign each line a [`LineKind`]; only chord lines keep their runs
//! 3. **Compact** - drop leading blank lines, collapse blank runs to one,
//!    drop a trailing blank line, renumber from 0
//!
//! Interior spacing is never touched: on a chord line it carries the alignment
//! of chords over the lyric below.
//!
//! ## Classification
//! - `[` as the first non-blank character -> `Section`
//! - no non-blank character -> `Empty`
//! - every run a separator or a real chord (or `N.C.`), with at least one
//!   chord-bearing run -> `Chords`
//! - anything else -> `Lyrics`

use crate::error::LeadSheetError;
use crate::lexer::{tokenize, LetterRun};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Classification of one line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineKind {
    /// Imported but not yet classified
    #[default]
    Unclassified,
    Section,
    Empty,
    Chords,
    Lyrics,
}

/// One line of a lead sheet
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Line {
    /// Position after compaction, contiguous from 0
    pub number: usize,
    /// Original text with trailing whitespace removed
    pub text: String,
    pub kind: LineKind,
    /// Letter runs; non-empty only for chord lines
    pub runs: Vec<LetterRun>,
}

impl Line {
    fn imported(text: &str) -> Self {
        Self {
            text: text.trim_end().to_string(),
            ..Self::default()
        }
    }

    /// Render the line, preferring each run's transposed text on chord lines.
    pub fn render(&self) -> String {
        match self.kind {
            LineKind::Chords => self.runs.iter().map(LetterRun::rendered).collect(),
            _ => self.text.clone(),
        }
    }
}

/// A parsed lead sheet
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    pub lines: Vec<Line>,
}

impl Document {
    /// Render every line in order.
    pub fn render(&self) -> Vec<String> {
        self.lines.iter().map(Line::render).collect()
    }

    /// Chord lines, mutable, in document order
    pub fn chord_lines_mut(&mut self) -> impl Iterator<Item = &mut Line> {
        self.lines
            .iter_mut()
            .filter(|line| line.kind == LineKind::Chords)
    }

    /// Return every chord to its parse-time spelling and drop all renderings.
    pub fn reset(&mut self) {
        for line in self.chord_lines_mut() {
            for run in &mut line.runs {
                run.restore();
                run.chord.reset();
            }
        }
    }
}

/// Classify one line, returning its kind and the runs a chord line keeps.
///
/// # Example
/// ```
/// use leadsheet::{classify_line, LineKind};
///
/// assert_eq!(classify_line("   C   D   E   ").0, LineKind::Chords);
/// assert_eq!(classify_line("Foo lyric lyric").0, LineKind::Lyrics);
/// assert_eq!(classify_line("[Chorus]").0, LineKind::Section);
/// assert_eq!(classify_line("   ").0, LineKind::Empty);
/// ```
pub fn classify_line(text: &str) -> (LineKind, Vec<LetterRun>) {
    match text.chars().find(|c| !c.is_whitespace()) {
        None => return (LineKind::Empty, tokenize("")),
        Some('[') => return (LineKind::Section, tokenize("")),
        Some(_) => {}
    }

    let runs = tokenize(text);
    if is_chord_line(&runs) {
        (LineKind::Chords, runs)
    } else {
        (LineKind::Lyrics, tokenize(""))
    }
}

fn is_chord_bearing(run: &LetterRun) -> bool {
    !run.chord.is_empty() || run.is_no_chord()
}

fn is_chord_line(runs: &[LetterRun]) -> bool {
    runs.iter().all(|run| run.is_separator() || is_chord_bearing(run))
        && runs.iter().any(is_chord_bearing)
}

fn import(content: &str) -> Vec<Line> {
    content.split('\n').map(Line::imported).collect()
}

fn categorize(lines: &mut [Line]) {
    for line in lines.iter_mut() {
        let (kind, runs) = classify_line(&line.text);
        trace!(text = %line.text, ?kind, "classified line");
        line.kind = kind;
        line.runs = runs;
    }
}

fn compact(lines: Vec<Line>) -> Result<Vec<Line>, LeadSheetError> {
    if lines.is_empty() {
        return Err(LeadSheetError::Internal {
            stage: "compact",
            message: "no lines to compact".to_string(),
        });
    }

    let mut last_was_empty = true;
    let mut compacted: Vec<Line> = lines
        .into_iter()
        .filter(|line| {
            let empty = line.kind == LineKind::Empty;
            let keep = !(empty && last_was_empty);
            last_was_empty = empty;
            keep
        })
        .collect();

    if compacted
        .last()
        .is_some_and(|line| line.kind == LineKind::Empty)
    {
        compacted.pop();
    }

    for (number, line) in compacted.iter_mut().enumerate() {
        line.number = number;
    }

    Ok(compacted)
}

/// Parse lead sheet text into a document.
///
/// Fails only if a pipeline stage is handed input it cannot accept, which no
/// input text produces.
pub fn parse(content: &str) -> Result<Document, LeadSheetError> {
    let mut lines = import(content);
    debug!(lines = lines.len(), "imported lines");

    categorize(&mut lines);
    let lines = compact(lines)?;
    debug!(lines = lines.len(), "compacted lines");

    Ok(Document { lines })
}
