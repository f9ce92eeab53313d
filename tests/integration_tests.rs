//! Integration tests for the lead sheet library
//!
//! Tests the full pipeline from lead sheet text through transposition to
//! rendered lines.

use leadsheet::{
    export_text, format_document, parse_content, render, render_numerals, transpose_by,
    transpose_down, transpose_up, Document, LeadSheetError, LineKind, OutputFormat,
};

const SONG: &str = "[Section]\n   C   D   E\nFoo lyric lyric\n";

const FULL_SONG: &str = r#"
[Verse 1]
G        D/F#      Em7     Cmaj7
Walking down the   road at night


   Am7        D7sus4   N.C.
I can see the lights


[Chorus]
  C   G/B   Am   F
La la la la la la
"#;

#[test]
fn test_parse_sections_and_kinds() {
    let doc = parse_content(FULL_SONG).unwrap();
    let kinds: Vec<_> = doc.lines.iter().map(|line| line.kind).collect();
    assert_eq!(
        kinds,
        vec![
            LineKind::Section,
            LineKind::Chords,
            LineKind::Lyrics,
            LineKind::Empty,
            LineKind::Chords,
            LineKind::Lyrics,
            LineKind::Empty,
            LineKind::Section,
            LineKind::Chords,
            LineKind::Lyrics,
        ]
    );
    let numbers: Vec<_> = doc.lines.iter().map(|line| line.number).collect();
    assert_eq!(numbers, (0..10).collect::<Vec<_>>());
}

#[test]
fn test_transpose_up_end_to_end() {
    let doc = transpose_up(parse_content(SONG).unwrap());
    assert_eq!(render(&doc), vec!["[Section]", "   C#  D#  F", "Foo lyric lyric"]);
}

#[test]
fn test_transpose_down_end_to_end() {
    let doc = transpose_down(parse_content(SONG).unwrap());
    assert_eq!(render(&doc)[1], "   B   Db  Eb");
}

#[test]
fn test_up_then_down_restores_document() {
    let doc = transpose_down(transpose_up(parse_content(SONG).unwrap()));
    assert_eq!(render(&doc), vec!["[Section]", "   C   D   E", "Foo lyric lyric"]);
}

#[test]
fn test_many_steps_restore_pitch() {
    let original = parse_content(FULL_SONG).unwrap();
    let pitches = |doc: &Document| -> Vec<Option<u8>> {
        doc.lines
            .iter()
            .flat_map(|line| line.runs.iter())
            .map(|run| run.chord.pitch_class())
            .collect()
    };
    let before = pitches(&original);
    let doc = transpose_by(transpose_by(original, 7), -7);
    assert_eq!(pitches(&doc), before);
}

#[test]
fn test_twelve_steps_up_reproduce_text() {
    let original = parse_content(FULL_SONG).unwrap();
    let expected = render(&original);
    assert_eq!(render(&transpose_by(original, 12)), expected);
}

#[test]
fn test_stepping_down_spells_with_flats() {
    let doc = transpose_down(transpose_up(parse_content("D/F#").unwrap()));
    assert_eq!(render(&doc), vec!["D/Gb"]);
}

#[test]
fn test_no_chord_line_transposes_around_marker() {
    let doc = transpose_up(parse_content(FULL_SONG).unwrap());
    assert_eq!(render(&doc)[4], "   A#m7       D#7sus4  N.C.");
}

#[test]
fn test_reset_after_transposition() {
    let original = parse_content(FULL_SONG).unwrap();
    let mut doc = transpose_by(original.clone(), 5);
    doc.reset();
    assert_eq!(doc, original);
}

#[test]
fn test_numerals_end_to_end() {
    let mut doc = parse_content(FULL_SONG).unwrap();
    render_numerals(&mut doc, "G").unwrap();
    let rendered = render(&doc);
    assert_eq!(rendered[1], "1        5/7      6m7     4maj7");
    assert_eq!(rendered[8], "  4   1/3   2m   b7");
    assert_eq!(doc.lines[1].runs[0].chord.to_string(), "G");
}

#[test]
fn test_numerals_reject_bad_key() {
    let mut doc = parse_content(SONG).unwrap();
    let err = render_numerals(&mut doc, "X").unwrap_err();
    assert!(matches!(err, LeadSheetError::InvalidKey(_)));
}

#[test]
fn test_export_text() {
    let doc = transpose_up(parse_content(SONG).unwrap());
    assert_eq!(export_text(&doc), "[Section]\n   C#  D#  F\nFoo lyric lyric");
}

#[test]
fn test_json_output_round_trips_document() {
    let doc = transpose_up(parse_content(SONG).unwrap());
    let json = format_document(&doc, OutputFormat::Json).unwrap();
    let back: Document = serde_json::from_str(&json).unwrap();
    assert_eq!(back, doc);
    assert_eq!(render(&back)[1], "   C#  D#  F");
}

#[test]
fn test_yaml_output_round_trips_document() {
    let doc = parse_content(SONG).unwrap();
    let yaml = format_document(&doc, OutputFormat::Yaml).unwrap();
    assert!(yaml.contains("Chords"));
    let back: Document = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(back, doc);
}
