//! Error types for building spellers.

/// Errors that can occur while turning dictionary data into a speller.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SpellerError {
    /// Dictionary payload is not valid UTF-8
    #[error("Dictionary is not valid UTF-8")]
    Encoding(#[source] std::str::Utf8Error),

    /// Personal word list is not valid UTF-8
    #[error("Personal dictionary is not valid UTF-8")]
    PersonalEncoding(#[source] std::str::Utf8Error),

    /// Dictionary holds no words at all
    #[error("Dictionary contains no words")]
    Empty,

    /// Dictionary line could not be read as a word entry
    #[error("Malformed dictionary entry on line {0}: {1:?}")]
    MalformedEntry(usize, String),
}
