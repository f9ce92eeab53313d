//! # Chord Symbols
//!
//! Parsing, serialization and semitone stepping of chord tokens such as `Am7b5`,
//! `Bb/D` or `F#maj9#11`.
//!
//! ## Grammar
//! ```text
//! chord   = root [accidental] quality ["/" chord]
//! root    = "A" .. "G"            (case-insensitive)
//! accidental = "#" | "b"
//! quality = one of QUALITIES      (case-insensitive, stored in canonical case)
//! ```
//!
//! Anything that does not match, along with the `N.C.` marker, parses to the
//! empty chord. The empty chord is an ordinary value that serializes to `""`.
//!
//! ## Stepping
//! Twelve letters form the chromatic cycle. B-C and E-F have no accidental
//! between them; every other neighbouring pair does. Stepping up sharpens a
//! natural, naturalizes a flat and moves a sharp to the next natural letter.
//! Stepping down mirrors that. The quality suffix never changes.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Chord qualities accepted after the root and accidental.
pub const QUALITIES: &[&str] = &[
    "", "m", "7", "5", "dim", "dim7", "aug", "sus", "sus2", "sus4", "maj7", "m7", "7sus4", "maj9",
    "maj11", "maj13", "maj9#11", "maj13#11", "add9", "6add9", "maj7b5", "maj7#5", "m6", "m9",
    "m11", "m13", "madd9", "m6add9", "mmaj7", "mmaj9", "m7b5", "m7#5", "6", "9", "11", "13",
    "7b5", "7#5", "7b9",
];

/// Placeholder marking a beat with no harmony.
pub const NO_CHORD: &str = "N.C.";

static QUALITY_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| QUALITIES.iter().copied().collect());

/// Lowercase characters that can appear inside a chord token.
static CHORD_ALPHABET: Lazy<HashSet<char>> = Lazy::new(|| {
    let mut alphabet: HashSet<char> = "abcdefg#.".chars().collect();
    alphabet.extend(QUALITIES.iter().flat_map(|quality| quality.chars()));
    alphabet.extend(NO_CHORD.to_ascii_lowercase().chars());
    alphabet
});

/// True if `c` (in any case) belongs to the chord alphabet.
pub fn is_chord_char(c: char) -> bool {
    CHORD_ALPHABET.contains(&c.to_ascii_lowercase())
}

/// True if `suffix` is a known chord quality, ignoring case.
pub fn is_quality(suffix: &str) -> bool {
    QUALITY_SET.contains(suffix.to_ascii_lowercase().as_str())
}

/// True if `token` is the no-chord marker, ignoring case.
pub fn is_no_chord(token: &str) -> bool {
    token.eq_ignore_ascii_case(NO_CHORD)
}

/// Note names A through G
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NoteName {
    #[default]
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteName {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(NoteName::C),
            'D' => Some(NoteName::D),
            'E' => Some(NoteName::E),
            'F' => Some(NoteName::F),
            'G' => Some(NoteName::G),
            'A' => Some(NoteName::A),
            'B' => Some(NoteName::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            NoteName::C => 'C',
            NoteName::D => 'D',
            NoteName::E => 'E',
            NoteName::F => 'F',
            NoteName::G => 'G',
            NoteName::A => 'A',
            NoteName::B => 'B',
        }
    }

    /// Position within the letter cycle, C = 0 through B = 6
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Semitones above C
    pub fn semitone(self) -> u8 {
        match self {
            NoteName::C => 0,
            NoteName::D => 2,
            NoteName::E => 4,
            NoteName::F => 5,
            NoteName::G => 7,
            NoteName::A => 9,
            NoteName::B => 11,
        }
    }

    /// Next letter, cycling G -> A
    pub fn next(self) -> Self {
        match self {
            NoteName::C => NoteName::D,
            NoteName::D => NoteName::E,
            NoteName::E => NoteName::F,
            NoteName::F => NoteName::G,
            NoteName::G => NoteName::A,
            NoteName::A => NoteName::B,
            NoteName::B => NoteName::C,
        }
    }

    /// Previous letter, cycling A -> G
    pub fn previous(self) -> Self {
        match self {
            NoteName::C => NoteName::B,
            NoteName::D => NoteName::C,
            NoteName::E => NoteName::D,
            NoteName::F => NoteName::E,
            NoteName::G => NoteName::F,
            NoteName::A => NoteName::G,
            NoteName::B => NoteName::A,
        }
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Accidentals: natural (none written), sharp or flat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp, // #
    Flat,  // b
}

impl Accidental {
    pub const ALL: [Accidental; 3] = [Accidental::Natural, Accidental::Sharp, Accidental::Flat];

    pub fn symbol(self) -> &'static str {
        match self {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        }
    }

    /// Semitone alteration applied to the letter
    pub fn offset(self) -> i8 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }
}

impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A parsed chord symbol.
///
/// The spelling captured at parse time is kept as an anchor so that
/// [`Chord::reset`] can undo any amount of stepping.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Chord {
    /// `None` for the empty chord
    pub root: Option<NoteName>,
    pub accidental: Accidental,
    pub quality: String,
    pub bass: Option<Box<Chord>>,
    original: String,
    original_root: Option<NoteName>,
    original_accidental: Accidental,
}

impl Chord {
    /// The empty chord, meaning "no chord here"
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a chord token. Never fails: unrecognised input gives the empty chord.
    ///
    /// # Examples
    /// ```
    /// use leadsheet::Chord;
    ///
    /// assert_eq!(Chord::parse("A#m7b5").to_string(), "A#m7b5");
    /// assert_eq!(Chord::parse("bbDIM/f#").to_string(), "Bbdim/F#");
    /// assert_eq!(Chord::parse("H7").to_string(), "");
    /// assert_eq!(Chord::parse("n.c.").to_string(), "");
    /// ```
    pub fn parse(token: &str) -> Self {
        if token.is_empty() || is_no_chord(token) {
            return Self::empty();
        }

        let mut parts = token.split('/');
        let head = parts.next().unwrap_or_default();
        let bass_text = parts.next();
        if parts.next().is_some() {
            return Self::empty();
        }

        let mut chars = head.chars();
        let Some(root) = chars.next().and_then(NoteName::from_char) else {
            return Self::empty();
        };
        let rest = chars.as_str();

        let (accidental, suffix) = match rest.chars().next() {
            Some('#') => (Accidental::Sharp, &rest[1..]),
            Some('b') | Some('B') => (Accidental::Flat, &rest[1..]),
            _ => (Accidental::Natural, rest),
        };

        if !is_quality(suffix) {
            return Self::empty();
        }

        let bass = bass_text.map(|text| Box::new(Self::parse(text)));
        Self::new(root, accidental, &suffix.to_ascii_lowercase(), bass)
    }

    /// Build a chord and record its spelling as the original.
    pub fn new(
        root: NoteName,
        accidental: Accidental,
        quality: &str,
        bass: Option<Box<Chord>>,
    ) -> Self {
        let mut chord = Self {
            root: Some(root),
            accidental,
            quality: quality.to_string(),
            bass,
            original: String::new(),
            original_root: Some(root),
            original_accidental: accidental,
        };
        chord.original = chord.to_string();
        chord
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Serialization recorded when the chord was parsed
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn original_accidental(&self) -> Accidental {
        self.original_accidental
    }

    /// True when the current spelling equals the parse-time spelling
    pub fn is_at_original(&self) -> bool {
        self.to_string() == self.original
    }

    /// Pitch class of the root in semitones above C, if any
    pub fn pitch_class(&self) -> Option<u8> {
        self.root
            .map(|root| (root.semitone() as i8 + self.accidental.offset()).rem_euclid(12) as u8)
    }

    /// Raise the chord (and its bass note) by one semitone.
    pub fn step_up(&mut self) {
        if let Some(bass) = self.bass.as_mut() {
            bass.step_up();
        }

        let Some(root) = self.root else {
            return;
        };

        // B# and E# sit on the next natural; step from there
        let (root, accidental) = match (root, self.accidental) {
            (NoteName::B, Accidental::Sharp) => (NoteName::C, Accidental::Natural),
            (NoteName::E, Accidental::Sharp) => (NoteName::F, Accidental::Natural),
            other => other,
        };

        let (root, accidental) = match (root, accidental) {
            (NoteName::B, Accidental::Natural) => (NoteName::C, Accidental::Natural),
            (NoteName::E, Accidental::Natural) => (NoteName::F, Accidental::Natural),
            (letter, Accidental::Natural) => (letter, Accidental::Sharp),
            (letter, Accidental::Flat) => (letter, Accidental::Natural),
            (letter, Accidental::Sharp) => (letter.next(), Accidental::Natural),
        };
        self.root = Some(root);
        self.accidental = accidental;
    }

    /// Lower the chord (and its bass note) by one semitone.
    pub fn step_down(&mut self) {
        if let Some(bass) = self.bass.as_mut() {
            bass.step_down();
        }

        let Some(root) = self.root else {
            return;
        };

        // Cb and Fb sit on the previous natural; step from there
        let (root, accidental) = match (root, self.accidental) {
            (NoteName::C, Accidental::Flat) => (NoteName::B, Accidental::Natural),
            (NoteName::F, Accidental::Flat) => (NoteName::E, Accidental::Natural),
            other => other,
        };

        let (root, accidental) = match (root, accidental) {
            (NoteName::C, Accidental::Natural) => (NoteName::B, Accidental::Natural),
            (NoteName::F, Accidental::Natural) => (NoteName::E, Accidental::Natural),
            (letter, Accidental::Natural) => (letter, Accidental::Flat),
            (letter, Accidental::Sharp) => (letter, Accidental::Natural),
            (letter, Accidental::Flat) => (letter.previous(), Accidental::Natural),
        };
        self.root = Some(root);
        self.accidental = accidental;
    }

    /// Restore the root and accidental recorded at parse time, bass note included.
    pub fn reset(&mut self) {
        self.root = self.original_root;
        self.accidental = self.original_accidental;
        if let Some(bass) = self.bass.as_mut() {
            bass.reset();
        }
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root else {
            return Ok(());
        };
        write!(f, "{}{}{}", root, self.accidental, self.quality)?;
        if let Some(bass) = &self.bass {
            write!(f, "/{}", bass)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    const SHARP_SPELLINGS: &[&str] = &["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
    const FLAT_SPELLINGS: &[&str] = &["C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B"];

    #[rstest]
    #[case("A")]
    #[case("A#")]
    #[case("Ab")]
    #[case("Am")]
    #[case("A#m7b5")]
    #[case("Abm6add9")]
    #[case("Cmaj9#11")]
    #[case("G7sus4")]
    #[case("Bb/D")]
    #[case("F#m7/C#")]
    fn test_chord_creation(#[case] token: &str) {
        assert_eq!(Chord::parse(token).to_string(), token);
    }

    #[test]
    fn test_every_quality_round_trips() {
        for quality in QUALITIES {
            for accidental in Accidental::ALL {
                for bass in ["", "/E", "/Bb", "/F#"] {
                    let token = format!("D{}{}{}", accidental, quality, bass);
                    assert_eq!(Chord::parse(&token).to_string(), token);
                }
            }
        }
    }

    #[rstest]
    #[case("")]
    #[case("N.C.")]
    #[case("n.c.")]
    #[case("H7")]
    #[case("A##")]
    #[case("X")]
    #[case("Cfoo")]
    #[case("C/E/G")]
    #[case("/E")]
    fn test_unparseable_gives_empty_chord(#[case] token: &str) {
        let chord = Chord::parse(token);
        assert!(chord.is_empty());
        assert_eq!(chord.to_string(), "");
    }

    #[test]
    fn test_case_is_normalized() {
        let chord = Chord::parse("cMAJ7");
        assert_eq!(chord.root, Some(NoteName::C));
        assert_eq!(chord.quality, "maj7");
        assert_eq!(chord.to_string(), "Cmaj7");
    }

    #[test]
    fn test_malformed_bass_keeps_outer_chord() {
        let chord = Chord::parse("C/X");
        assert_eq!(chord.root, Some(NoteName::C));
        let bass = chord.bass.as_ref().expect("bass should be present");
        assert!(bass.is_empty());
        assert_eq!(chord.to_string(), "C/");
    }

    #[rstest]
    #[case("Ab", "A")]
    #[case("A", "A#")]
    #[case("A#", "B")]
    #[case("Bb", "B")]
    #[case("B", "C")]
    #[case("C", "C#")]
    #[case("C#", "D")]
    #[case("Db", "D")]
    #[case("D", "D#")]
    #[case("D#", "E")]
    #[case("E", "F")]
    #[case("F", "F#")]
    #[case("F#", "G")]
    #[case("Gb", "G")]
    #[case("G", "G#")]
    #[case("G#", "A")]
    #[case("B#", "C#")]
    #[case("E#", "F#")]
    fn test_chord_step_up(#[case] token: &str, #[case] expected: &str) {
        let mut chord = Chord::parse(token);
        chord.step_up();
        assert_eq!(chord.to_string(), expected);
    }

    #[rstest]
    #[case("Ab", "G")]
    #[case("A", "Ab")]
    #[case("A#", "A")]
    #[case("Bb", "A")]
    #[case("B", "Bb")]
    #[case("C", "B")]
    #[case("C#", "C")]
    #[case("Db", "C")]
    #[case("D", "Db")]
    #[case("D#", "D")]
    #[case("Eb", "D")]
    #[case("E", "Eb")]
    #[case("F", "E")]
    #[case("F#", "F")]
    #[case("Gb", "F")]
    #[case("G", "Gb")]
    #[case("G#", "G")]
    #[case("Cb", "Bb")]
    #[case("Fb", "Eb")]
    fn test_chord_step_down(#[case] token: &str, #[case] expected: &str) {
        let mut chord = Chord::parse(token);
        chord.step_down();
        assert_eq!(chord.to_string(), expected);
    }

    #[test]
    fn test_step_moves_bass_and_keeps_quality() {
        let mut chord = Chord::parse("Am7/G");
        chord.step_up();
        assert_eq!(chord.to_string(), "A#m7/G#");
        chord.step_down();
        chord.step_down();
        assert_eq!(chord.to_string(), "Abm7/Gb");
    }

    #[test]
    fn test_empty_chord_ignores_steps() {
        let mut chord = Chord::empty();
        chord.step_up();
        chord.step_down();
        assert!(chord.is_empty());
    }

    #[test]
    fn test_reset_restores_original_spelling() {
        let mut chord = Chord::parse("Ebmaj7/Bb");
        for _ in 0..5 {
            chord.step_up();
        }
        assert!(!chord.is_at_original());
        chord.reset();
        assert_eq!(chord.to_string(), "Ebmaj7/Bb");
        assert_eq!(chord.original(), "Ebmaj7/Bb");
        assert_eq!(chord.original_accidental(), Accidental::Flat);
    }

    #[test]
    fn test_pitch_class_follows_steps() {
        let mut chord = Chord::parse("Bb");
        assert_eq!(chord.pitch_class(), Some(10));
        chord.step_up();
        chord.step_up();
        assert_eq!(chord.pitch_class(), Some(0));
        assert_eq!(Chord::empty().pitch_class(), None);
    }

    #[test]
    fn test_chord_alphabet() {
        for c in "ABCDEFGabcdefg#.mMajJdimsusaug0123456789nN".chars() {
            if c == '0' || c == '8' {
                continue;
            }
            assert!(is_chord_char(c), "{c} should be a chord character");
        }
        for c in "xyzXYZ -|,!0".chars() {
            assert!(!is_chord_char(c), "{c} should not be a chord character");
        }
    }

    fn spelled_chord(spellings: &'static [&'static str]) -> impl Strategy<Value = String> {
        (
            prop::sample::select(spellings),
            prop::sample::select(QUALITIES),
            prop::option::of(prop::sample::select(spellings)),
        )
            .prop_map(|(root, quality, bass)| match bass {
                Some(bass) => format!("{root}{quality}/{bass}"),
                None => format!("{root}{quality}"),
            })
    }

    fn pitches(chord: &Chord) -> (Option<u8>, Option<u8>) {
        (chord.pitch_class(), chord.bass.as_ref().and_then(|bass| bass.pitch_class()))
    }

    proptest! {
        // Stepping up spells with sharps, so the cycle returns to sharp spellings
        #[test]
        fn test_twelve_steps_up_cycle(token in spelled_chord(SHARP_SPELLINGS)) {
            let mut chord = Chord::parse(&token);
            for _ in 0..12 {
                chord.step_up();
            }
            prop_assert_eq!(chord.to_string(), token);
        }

        #[test]
        fn test_twelve_steps_down_cycle(token in spelled_chord(FLAT_SPELLINGS)) {
            let mut chord = Chord::parse(&token);
            for _ in 0..12 {
                chord.step_down();
            }
            prop_assert_eq!(chord.to_string(), token);
        }

        #[test]
        fn test_up_then_down_restores_pitch(token in spelled_chord(SHARP_SPELLINGS), steps in 1usize..24) {
            let mut chord = Chord::parse(&token);
            let before = pitches(&chord);
            for _ in 0..steps {
                chord.step_up();
            }
            for _ in 0..steps {
                chord.step_down();
            }
            prop_assert_eq!(pitches(&chord), before);
        }

        #[test]
        fn test_down_then_up_restores_spelling(token in spelled_chord(SHARP_SPELLINGS)) {
            let mut chord = Chord::parse(&token);
            chord.step_down();
            chord.step_up();
            prop_assert_eq!(chord.to_string(), token);
        }
    }
}
