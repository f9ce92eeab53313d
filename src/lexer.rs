//! # Letter-Run Lexer
//!
//! Splits one line of a lead sheet into runs of chord-candidate letters, word
//! letters and separators. Every character lands in exactly one run, so
//! concatenating the runs reproduces the line.
//!
//! ## Character Classes
//! - Chord alphabet (`A`-`G`, `#`, `.`, and every character of the quality
//!   vocabulary, any case) -> `RunKind::Chord`
//! - Whitespace and ASCII punctuation outside the chord alphabet -> `RunKind::Separator`
//! - Everything else -> `RunKind::Word`
//!
//! `/` joins whatever run is in progress, which keeps slash chords such as
//! `Bb/D#` in one run. At the very start of a line it opens a separator.
//!
//! A chord-kind run is only a candidate: `.` or `bad` tokenize as chord runs but
//! parse to the empty chord, and the line classifier filters them out.

use crate::chord::{is_chord_char, is_no_chord, Chord};
use serde::{Deserialize, Serialize};
use std::str::Chars;

/// Kind of a letter run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunKind {
    Word,
    Chord,
    Separator,
}

/// A maximal stretch of same-kind characters within one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterRun {
    pub kind: RunKind,
    /// Text as written, case preserved
    pub letters: String,
    /// Parsed chord; only meaningful for `RunKind::Chord`
    pub chord: Chord,
    /// Letters as tokenized, restored before every transpose pass
    pub pristine: String,
    /// Rendering set by a transpose or numeral pass; preferred over `letters`
    pub transposed: Option<String>,
}

impl LetterRun {
    pub fn new(kind: RunKind, letters: String) -> Self {
        let chord = match kind {
            RunKind::Chord => Chord::parse(&letters),
            RunKind::Word | RunKind::Separator => Chord::empty(),
        };
        Self {
            kind,
            pristine: letters.clone(),
            letters,
            chord,
            transposed: None,
        }
    }

    /// The text this run contributes to a rendered line
    pub fn rendered(&self) -> &str {
        self.transposed.as_deref().unwrap_or(&self.letters)
    }

    /// Width of the letters as written, in characters
    pub fn width(&self) -> usize {
        self.letters.chars().count()
    }

    pub fn is_separator(&self) -> bool {
        self.kind == RunKind::Separator
    }

    /// True for the `N.C.` marker
    pub fn is_no_chord(&self) -> bool {
        is_no_chord(&self.letters)
    }

    /// Put the letters back to their tokenized form and drop any rendering.
    pub fn restore(&mut self) {
        self.letters.clone_from(&self.pristine);
        self.transposed = None;
    }
}

/// Scanner state: either between runs or accumulating one
#[derive(Debug)]
enum Accumulator {
    Idle,
    Run { kind: RunKind, letters: String },
}

/// Lexer for splitting one line into letter runs
pub struct Lexer<'a> {
    chars: Chars<'a>,
    state: Accumulator,
    runs: Vec<LetterRun>,
}

impl<'a> Lexer<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            chars: line.chars(),
            state: Accumulator::Idle,
            runs: Vec::new(),
        }
    }

    fn classify(c: char) -> RunKind {
        if is_chord_char(c) {
            RunKind::Chord
        } else if c.is_whitespace() || c.is_ascii_punctuation() {
            RunKind::Separator
        } else {
            RunKind::Word
        }
    }

    fn flush(&mut self) {
        if let Accumulator::Run { kind, letters } =
            std::mem::replace(&mut self.state, Accumulator::Idle)
        {
            self.runs.push(LetterRun::new(kind, letters));
        }
    }

    fn start(&mut self, kind: RunKind, c: char) {
        self.flush();
        self.state = Accumulator::Run {
            kind,
            letters: c.to_string(),
        };
    }

    pub fn tokenize(&mut self) -> Vec<LetterRun> {
        while let Some(c) = self.chars.next() {
            if c == '/' {
                match &mut self.state {
                    Accumulator::Idle => self.start(RunKind::Separator, c),
                    Accumulator::Run { letters, .. } => letters.push(c),
                }
                continue;
            }

            let kind = Self::classify(c);
            match &mut self.state {
                Accumulator::Run {
                    kind: current,
                    letters,
                } if *current == kind => letters.push(c),
                _ => self.start(kind, c),
            }
        }
        self.flush();
        std::mem::take(&mut self.runs)
    }
}

/// Tokenize one line into letter runs.
///
/// # Example
/// ```
/// use leadsheet::{tokenize, RunKind};
///
/// let runs = tokenize("Am7  G/B");
/// let kinds: Vec<_> = runs.iter().map(|r| r.kind).collect();
/// assert_eq!(kinds, vec![RunKind::Chord, RunKind::Separator, RunKind::Chord]);
/// assert_eq!(runs[2].letters, "G/B");
/// ```
pub fn tokenize(line: &str) -> Vec<LetterRun> {
    Lexer::new(line).tokenize()
}
