//! The puzzle-oracle boundary.
//!
//! All puzzle intelligence — generating a puzzle, solving one, producing a
//! pedagogically useful hint, transcribing a photographed grid — is
//! performed by a hosted generative model. This crate owns that boundary:
//! the wire encoding (9x9 integers where 0 means empty), request
//! construction with strict JSON response schemas, reply parsing, and a
//! per-platform transport polled from the UI loop.
//!
//! Each operation is a single request/response exchange with no retry or
//! backoff. Every failure mode — transport error, malformed JSON, schema
//! violation — collapses into "no usable result" for the caller; an
//! oracle failure never crashes the application.
//!
//! # Usage
//!
//! ```no_run
//! use oradoku_oracle::{Difficulty, OracleConfig, OracleRequest, enqueue};
//!
//! let config = OracleConfig::from_env()?;
//! let mut handle = enqueue(
//!     OracleRequest::Generate {
//!         difficulty: Difficulty::Medium,
//!     },
//!     &config,
//! )?;
//!
//! // Poll from the update loop until an outcome arrives.
//! let outcome = handle.poll();
//! # Ok::<(), oradoku_oracle::OracleError>(())
//! ```

use std::fmt::{self, Display};

use oradoku_core::{Digit, DigitGrid, Position};

pub mod config;
mod platform;
pub mod protocol;
pub mod wire;

pub use self::config::OracleConfig;
pub use self::platform::{OracleHandle, enqueue, warm_up};

/// Requested difficulty for a generated puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    /// Many givens, simple logic.
    Easy,
    /// The middle ground.
    Medium,
    /// Few givens.
    Hard,
}

impl Difficulty {
    /// All difficulties, in ascending order.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Returns the lowercase name used in prompts and labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One next logically-derivable cell, as produced by the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    /// The cell to fill.
    pub position: Position,
    /// The digit to place there.
    pub digit: Digit,
    /// Natural-language justification for the placement.
    pub explanation: String,
}

/// A request for the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleRequest {
    /// Generate a new puzzle of the given difficulty.
    Generate {
        /// Requested difficulty.
        difficulty: Difficulty,
    },
    /// Produce a complete solution for a starting grid.
    Solve {
        /// The starting grid.
        grid: DigitGrid,
    },
    /// Produce exactly one next hint for a grid in progress.
    Hint {
        /// The grid in progress.
        grid: DigitGrid,
    },
    /// Transcribe a photographed puzzle into a grid.
    ExtractImage {
        /// Raw image bytes.
        bytes: Vec<u8>,
        /// MIME type of the image (e.g. `image/png`).
        mime_type: String,
    },
}

/// A successful oracle reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleResponse {
    /// A new puzzle, ready to start.
    NewPuzzle(DigitGrid),
    /// A fully-filled solution.
    Solution(DigitGrid),
    /// One hint with its justification.
    Hint(Hint),
    /// A puzzle transcribed from an image.
    ExtractedPuzzle(DigitGrid),
}

/// The outcome of one oracle exchange.
pub type OracleResult = Result<OracleResponse, OracleError>;

/// Errors that can occur on the oracle boundary.
///
/// The taxonomy is flat by design: callers treat every variant as "no
/// usable result" and recover locally. The variants exist for logging
/// only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleError {
    /// No API key was configured.
    MissingApiKey,
    /// The HTTP exchange itself failed.
    Transport,
    /// The reply was not well-formed or contained no text part.
    MalformedResponse,
    /// The reply text did not match the expected payload schema.
    SchemaViolation,
    /// The background transport went away unexpectedly.
    Disconnected,
}

impl Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleError::MissingApiKey => write!(f, "no oracle API key configured"),
            OracleError::Transport => write!(f, "oracle request failed in transit"),
            OracleError::MalformedResponse => write!(f, "oracle reply was malformed"),
            OracleError::SchemaViolation => write!(f, "oracle reply violated the payload schema"),
            OracleError::Disconnected => write!(f, "oracle transport disconnected"),
        }
    }
}

impl std::error::Error for OracleError {}
