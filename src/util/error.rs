use thiserror::Error;

/// Error type for pluscodes-rs operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlusCodeError {
    /// The code is empty or consists of a lone separator.
    #[error("empty code")]
    EmptyCode,
    /// A character outside the code alphabet was found.
    #[error("invalid character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },
    /// The separator is missing, repeated, or at an illegal position.
    #[error("misplaced separator: {0}")]
    MisplacedSeparator(String),
    /// Padding characters are in an illegal position or count.
    #[error("misplaced padding: {0}")]
    MisplacedPadding(String),
    /// The leading digits would decode outside the globe.
    #[error("{0} outside range")]
    OutOfRange(String),
    /// A short code was required but the code is not short.
    #[error("not a short code")]
    NotShort,
    /// A full code was required but the code is short.
    #[error("not a full code")]
    NotFull,
    /// Fewer than two significant digits remain after stripping.
    #[error("code too short")]
    CodeTooShort,
    /// Padded codes carry too few digits to be shortened.
    #[error("cannot shorten padded codes")]
    CannotShortenPadded,
    /// The code has fewer digits than the minimum trimmable length.
    #[error("code length must be at least {min}")]
    CodeTooShortToShorten { min: usize },
    /// File I/O or serialization error.
    #[error("IO error: {0}")]
    IoError(String),
    /// CSV parsing or reading error.
    #[error("CSV error: {0}")]
    CsvError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    #[error("geometry parse error: {0}")]
    GeometryParseError(String),
    /// A conformance fixture row did not produce the expected result.
    #[error("conformance mismatch: {0}")]
    ConformanceMismatch(String),
}

impl PlusCodeError {
    /// Returns `true` for the grammar failures that make a string an invalid code,
    /// as opposed to a valid code of the wrong kind or an I/O problem.
    pub fn is_invalid_code(&self) -> bool {
        matches!(
            self,
            PlusCodeError::EmptyCode
                | PlusCodeError::InvalidCharacter { .. }
                | PlusCodeError::MisplacedSeparator(_)
                | PlusCodeError::MisplacedPadding(_)
                | PlusCodeError::OutOfRange(_)
                | PlusCodeError::NotFull
        )
    }
}

impl From<std::io::Error> for PlusCodeError {
    fn from(e: std::io::Error) -> Self {
        PlusCodeError::IoError(e.to_string())
    }
}

impl From<csv::Error> for PlusCodeError {
    fn from(e: csv::Error) -> Self {
        PlusCodeError::CsvError(e.to_string())
    }
}
