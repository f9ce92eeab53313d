//! # Error Types
//!
//! This module defines all error types for the lead sheet library.
//!
//! A chord token that does not parse becomes the empty chord and is never
//! reported here.
//!
//! ## Error Types
//! - `Internal` - A pipeline stage was invoked in violation of its contract
//! - `InvalidKey` - A numeral-rendering key that is not a chord root
//! - `Config` - YAML configuration that failed to load or validate
//! - `Serialization` - A document that could not be written as JSON or YAML
//! - `Io` - File access failures in the command-line front end
//!
//! ## Usage
//! ```rust
//! use leadsheet::{render_numerals, parse_content, LeadSheetError};
//!
//! let mut doc = parse_content("C F G")?;
//! match render_numerals(&mut doc, "H") {
//!     Ok(()) => println!("rendered"),
//!     Err(LeadSheetError::InvalidKey(key)) => eprintln!("no such key: {}", key),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # Ok::<(), LeadSheetError>(())
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeadSheetError {
    /// Pipeline contract violation.
    ///
    /// Signals a caller bug (for example compacting an empty line sequence),
    /// not a problem with the input text.
    ///
    /// # Example
    /// ```
    /// # use leadsheet::LeadSheetError;
    /// let err = LeadSheetError::Internal {
    ///     stage: "compact",
    ///     message: "no lines to compact".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Internal error in compact stage: no lines to compact");
    /// ```
    #[error("Internal error in {stage} stage: {message}")]
    Internal {
        stage: &'static str,
        message: String,
    },

    /// The key given for numeral rendering is not a chord root.
    ///
    /// # Example
    /// ```
    /// # use leadsheet::LeadSheetError;
    /// let err = LeadSheetError::InvalidKey("H".to_string());
    /// assert_eq!(err.to_string(), "Invalid key: H");
    /// ```
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A document could not be written in the requested output format.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// File access error with the offending path.
    #[error("I/O error on '{path}': {message}")]
    Io { path: String, message: String },
}
