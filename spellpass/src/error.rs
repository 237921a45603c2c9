//! Errors raised by a spell-checking session.
use std::sync::Arc;

use crate::speller::SpellerError;

/// Errors in the options a session is created from.
///
/// These are raised synchronously by [`Spell::new`](crate::Spell::new),
/// before any dictionary loading starts.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// No dictionary or dictionary loader was supplied
    #[error("Expected a dictionary or dictionary loader, got none")]
    MissingDictionary,

    /// Options could not be read
    #[error("Failed to read options")]
    Options(#[source] serde_json::Error),
}

/// Errors loading the dictionary of a session.
///
/// A session records at most one of these and hands a clone of it to every
/// check request, queued or new.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The dictionary loader reported a failure
    #[error(transparent)]
    Loader(Arc<dyn std::error::Error + Send + Sync>),

    /// The loaded dictionary could not be turned into a speller
    #[error("Failed to build speller from dictionary")]
    Speller(#[source] Arc<SpellerError>),
}

impl LoadError {
    /// Wraps any loader failure.
    pub fn loader<E>(error: E) -> LoadError
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        LoadError::Loader(Arc::from(error.into()))
    }
}

impl From<SpellerError> for LoadError {
    fn from(error: SpellerError) -> LoadError {
        LoadError::Speller(Arc::new(error))
    }
}
