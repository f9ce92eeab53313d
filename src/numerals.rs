//! # Scale-Degree Numerals
//!
//! Renders chord roots as Nashville-style numerals relative to a key, leaving the
//! stored chords untouched. `G7` in the key of C renders as `57`, `Bb` as `b7`,
//! `D/F#` as `2/#4`.
//!
//! The degree is the letter distance from the key root. An accidental prefix
//! appears when the chord root sits off the key's major scale, one `b` or `#`
//! per semitone of alteration. The quality suffix is kept verbatim.
//!
//! Numerals are written as run renderings only. Gaps are restored to their
//! tokenized text and are not rebalanced for width.

use crate::chord::{Accidental, Chord, NoteName};
use crate::error::LeadSheetError;
use crate::parser::Document;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Semitones above the tonic for each degree of the major scale
const MAJOR_SCALE: [i8; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Reference key for numeral rendering: a root and its accidental
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    pub root: NoteName,
    pub accidental: Accidental,
}

impl Key {
    /// Parse a key such as `G`, `Bb` or `F#`. A quality suffix is accepted and ignored.
    pub fn parse(text: &str) -> Result<Self, LeadSheetError> {
        let chord = Chord::parse(text.trim());
        match chord.root {
            Some(root) => Ok(Self {
                root,
                accidental: chord.accidental,
            }),
            None => Err(LeadSheetError::InvalidKey(text.to_string())),
        }
    }

    fn pitch_class(self) -> i8 {
        (self.root.semitone() as i8 + self.accidental.offset()).rem_euclid(12)
    }

    /// Numeral for a single root in this key
    fn degree(self, root: NoteName, accidental: Accidental) -> String {
        let degree = (root.index() as i8 - self.root.index() as i8).rem_euclid(7);
        let pitch = root.semitone() as i8 + accidental.offset();
        let interval = (pitch - self.pitch_class()).rem_euclid(12);

        let mut alteration = interval - MAJOR_SCALE[degree as usize];
        if alteration > 6 {
            alteration -= 12;
        } else if alteration < -6 {
            alteration += 12;
        }

        let prefix = if alteration < 0 {
            "b".repeat(alteration.unsigned_abs() as usize)
        } else {
            "#".repeat(alteration as usize)
        };
        format!("{}{}", prefix, degree + 1)
    }

    /// Render a chord as a numeral; `None` for the empty chord.
    ///
    /// # Example
    /// ```
    /// use leadsheet::{Chord, Key};
    ///
    /// let key = Key::parse("G")?;
    /// assert_eq!(key.numeral(&Chord::parse("Em7")).as_deref(), Some("6m7"));
    /// assert_eq!(key.numeral(&Chord::parse("D/F#")).as_deref(), Some("5/7"));
    /// assert_eq!(key.numeral(&Chord::parse("F")).as_deref(), Some("b7"));
    /// # Ok::<(), leadsheet::LeadSheetError>(())
    /// ```
    pub fn numeral(self, chord: &Chord) -> Option<String> {
        let root = chord.root?;
        let mut rendered = self.degree(root, chord.accidental);
        rendered.push_str(&chord.quality);
        if let Some(bass) = &chord.bass {
            rendered.push('/');
            if let Some(bass_numeral) = self.numeral(bass) {
                rendered.push_str(&bass_numeral);
            }
        }
        Some(rendered)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.accidental)
    }
}

/// Write numeral renderings for every chord of the document.
pub fn render_numerals(doc: &mut Document, key: Key) {
    let mut rendered = 0;
    for line in doc.chord_lines_mut() {
        for run in &mut line.runs {
            if run.is_separator() {
                run.restore();
            } else if let Some(numeral) = key.numeral(&run.chord) {
                run.transposed = Some(numeral);
                rendered += 1;
            }
        }
    }
    debug!(%key, chords = rendered, "rendered numerals");
}
