//! # Public API
//!
//! Entry points for hosts that load, transpose and display lead sheets.
//!
//! - [`parse_content()`] - Text to classified [`Document`]
//! - [`transpose_up()`] / [`transpose_down()`] - One semitone, alignment preserved
//! - [`transpose_by()`] - Any number of single-semitone steps
//! - [`render_numerals()`] - Chord lines as scale degrees of a key
//! - [`render()`] / [`export_text()`] - Lines back out as text
//!
//! ## Typical Usage
//!
//! ```rust
//! use leadsheet::{parse_content, render, transpose_up};
//!
//! let doc = parse_content("[Verse]\n   C   D   E\nFoo lyric lyric\n")?;
//! let doc = transpose_up(doc);
//! assert_eq!(render(&doc)[1], "   C#  D#  F");
//! # Ok::<(), leadsheet::LeadSheetError>(())
//! ```

use crate::config::OutputFormat;
use crate::error::LeadSheetError;
use crate::numerals::{self, Key};
use crate::parser::{self, Document};
use crate::transpose::{transpose_document, transpose_steps, Direction};

/// Parse lead sheet text into a classified, compacted document.
pub fn parse_content(text: &str) -> Result<Document, LeadSheetError> {
    parser::parse(text)
}

/// Transpose every chord line up one semitone.
pub fn transpose_up(mut doc: Document) -> Document {
    transpose_document(&mut doc, Direction::Up);
    doc
}

/// Transpose every chord line down one semitone.
pub fn transpose_down(mut doc: Document) -> Document {
    transpose_document(&mut doc, Direction::Down);
    doc
}

/// Transpose by a signed number of semitones, one step at a time.
pub fn transpose_by(mut doc: Document, steps: i32) -> Document {
    transpose_steps(&mut doc, steps);
    doc
}

/// Render chord lines as numerals relative to `key` (e.g. `"G"`, `"Bb"`).
///
/// # Errors
/// Returns [`LeadSheetError::InvalidKey`] if `key` has no valid root.
pub fn render_numerals(doc: &mut Document, key: &str) -> Result<(), LeadSheetError> {
    let key = Key::parse(key)?;
    numerals::render_numerals(doc, key);
    Ok(())
}

/// One rendered string per line.
pub fn render(doc: &Document) -> Vec<String> {
    doc.render()
}

/// The rendered document as a single newline-joined string.
pub fn export_text(doc: &Document) -> String {
    doc.render().join("\n")
}

/// Write a document in the given output format.
pub fn format_document(doc: &Document, format: OutputFormat) -> Result<String, LeadSheetError> {
    match format {
        OutputFormat::Text => Ok(export_text(doc)),
        OutputFormat::Json => serde_json::to_string_pretty(doc)
            .map_err(|e| LeadSheetError::Serialization(e.to_string())),
        OutputFormat::Yaml => {
            serde_yaml::to_string(doc).map_err(|e| LeadSheetError::Serialization(e.to_string()))
        }
    }
}
