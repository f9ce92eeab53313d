pub mod api;
pub mod chord;
pub mod config;
pub mod error;
pub mod lexer;
pub mod numerals;
pub mod parser;
pub mod transpose;

pub use api::*;
pub use chord::{Accidental, Chord, NoteName};
pub use config::{Config, OutputFormat};
pub use error::*;
pub use lexer::{tokenize, LetterRun, RunKind};
pub use numerals::Key;
pub use parser::{classify_line, Document, Line, LineKind};
pub use transpose::Direction;
