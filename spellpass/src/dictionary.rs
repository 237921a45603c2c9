//! Dictionary sources and the one-time load that turns them into a speller.
use std::fmt;
use std::sync::Arc;

use crate::error::LoadError;
use crate::speller::{
    PersonalSpeller, PersonalWords, Speller, SpellerConfig, SpellerError, WordListSpeller,
};

/// Speller handed out once a dictionary has loaded.
pub type SharedSpeller = Arc<dyn Speller + Send + Sync>;

/// Outcome reported by a dictionary loader.
pub type LoadResult = Result<Box<dyn Dictionary>, LoadError>;

/// Completion handed to a dictionary loader. Call it exactly once, from any
/// thread, at any point.
pub type LoadCallback = Box<dyn FnOnce(LoadResult) + Send>;

/// Loaded dictionary data, not yet usable for checking.
pub trait Dictionary: Send {
    fn into_speller(self: Box<Self>) -> Result<SharedSpeller, SpellerError>;
}

/// Raw word list bytes, parsed by [`WordListSpeller`].
#[derive(Debug, Clone)]
pub struct WordList {
    bytes: Vec<u8>,
    config: SpellerConfig,
}

impl WordList {
    pub fn new(bytes: impl Into<Vec<u8>>) -> WordList {
        WordList {
            bytes: bytes.into(),
            config: SpellerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SpellerConfig) -> WordList {
        self.config = config;
        self
    }
}

impl Dictionary for WordList {
    fn into_speller(self: Box<Self>) -> Result<SharedSpeller, SpellerError> {
        let speller = WordListSpeller::from_bytes(&self.bytes)?.with_config(self.config);
        Ok(Arc::new(speller))
    }
}

/// An already built speller, shared read-only between sessions.
pub struct Prebuilt(pub SharedSpeller);

impl Dictionary for Prebuilt {
    fn into_speller(self: Box<Self>) -> Result<SharedSpeller, SpellerError> {
        Ok(self.0)
    }
}

/// Where a session gets its dictionary from.
pub enum DictionarySource {
    /// Callback-style loader, invoked once when the session is created
    Loader(Box<dyn FnOnce(LoadCallback) + Send>),
    /// Dictionary available up front
    Dictionary(Box<dyn Dictionary>),
}

impl DictionarySource {
    pub fn loader<F>(load: F) -> DictionarySource
    where
        F: FnOnce(LoadCallback) + Send + 'static,
    {
        DictionarySource::Loader(Box::new(load))
    }

    pub fn dictionary<D>(dictionary: D) -> DictionarySource
    where
        D: Dictionary + 'static,
    {
        DictionarySource::Dictionary(Box::new(dictionary))
    }

    pub fn speller(speller: SharedSpeller) -> DictionarySource {
        DictionarySource::dictionary(Prebuilt(speller))
    }
}

impl fmt::Debug for DictionarySource {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            DictionarySource::Loader(_) => f.write_str("DictionarySource::Loader"),
            DictionarySource::Dictionary(_) => f.write_str("DictionarySource::Dictionary"),
        }
    }
}

/// Runs the dictionary load once and reports the built speller to `done`.
///
/// Loader failures and failures to build a speller (including a malformed
/// personal word list) both arrive at `done` as a [`LoadError`].
pub(crate) fn load<F>(source: DictionarySource, personal: Option<Vec<u8>>, done: F)
where
    F: FnOnce(Result<SharedSpeller, LoadError>) + Send + 'static,
{
    let finish = move |result: LoadResult| {
        done(result.and_then(|dictionary| build(dictionary, personal.as_deref())))
    };

    match source {
        DictionarySource::Loader(load) => load(Box::new(finish)),
        DictionarySource::Dictionary(dictionary) => finish(Ok(dictionary)),
    }
}

fn build(dictionary: Box<dyn Dictionary>, personal: Option<&[u8]>) -> Result<SharedSpeller, LoadError> {
    let speller = dictionary.into_speller()?;

    let personal = match personal {
        Some(bytes) => PersonalWords::from_bytes(bytes)?,
        None => return Ok(speller),
    };

    log::debug!(
        "merging personal dictionary: {} added, {} forbidden",
        personal.added.len(),
        personal.forbidden.len()
    );

    Ok(Arc::new(PersonalSpeller::new(speller, personal)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn collect(
        source: DictionarySource,
        personal: Option<&str>,
    ) -> Arc<Mutex<Option<Result<SharedSpeller, LoadError>>>> {
        let slot = Arc::new(Mutex::new(None));
        let out = Arc::clone(&slot);
        load(source, personal.map(|p| p.as_bytes().to_vec()), move |result| {
            *out.lock() = Some(result);
        });
        slot
    }

    #[test]
    fn immediate_dictionary() {
        let slot = collect(DictionarySource::dictionary(WordList::new("colour\n")), None);
        let speller = slot.lock().take().unwrap().unwrap();

        assert!(speller.is_correct("colour"));
        assert!(!speller.is_correct("color"));
    }

    #[test]
    fn loader_runs_once_and_merges_personal() {
        let calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&calls);
        let source = DictionarySource::loader(move |done| {
            *counter.lock() += 1;
            done(Ok(Box::new(WordList::new("colour\n"))));
        });

        let slot = collect(source, Some("color\n*colour\n"));
        let speller = slot.lock().take().unwrap().unwrap();

        assert_eq!(*calls.lock(), 1);
        assert!(speller.is_correct("color"));
        assert!(!speller.is_correct("colour"));
    }

    #[test]
    fn loader_failure() {
        let source = DictionarySource::loader(|done| done(Err(LoadError::loader("load error"))));
        let slot = collect(source, None);
        let error = slot.lock().take().unwrap().err().unwrap();

        assert_eq!(error.to_string(), "load error");
    }

    #[test]
    fn malformed_dictionary_is_a_load_error() {
        let slot = collect(DictionarySource::dictionary(WordList::new("# empty\n")), None);
        let error = slot.lock().take().unwrap().err().unwrap();

        assert!(matches!(error, LoadError::Speller(_)));
    }

    #[test]
    fn malformed_personal_is_a_load_error() {
        let slot = Arc::new(Mutex::new(None));
        let out = Arc::clone(&slot);
        load(
            DictionarySource::dictionary(WordList::new("colour\n")),
            Some(vec![0xff, 0xfe]),
            move |result| *out.lock() = Some(result),
        );

        let error = slot.lock().take().unwrap().err().unwrap();
        assert!(matches!(error, LoadError::Speller(_)));
    }

    #[test]
    fn prebuilt_is_shared() {
        let speller: SharedSpeller = Arc::new(WordListSpeller::parse("colour\n").unwrap());
        let slot = collect(DictionarySource::speller(Arc::clone(&speller)), None);
        let loaded = slot.lock().take().unwrap().unwrap();

        assert!(Arc::ptr_eq(&speller, &loaded));
    }
}
