//! Memoised suggestions and the per-session cap on looking them up.
use hashbrown::HashMap;
use smol_str::SmolStr;

/// Suggestions already looked up for misspelt words.
///
/// An entry with an empty list means the word was looked up and nothing
/// was found, which is distinct from a word that has no entry at all.
#[derive(Debug, Clone)]
pub struct SuggestionCache {
    entries: HashMap<SmolStr, Vec<SmolStr>>,
    count: usize,
    max: usize,
    overflowed: bool,
}

impl SuggestionCache {
    pub fn new(max: usize) -> SuggestionCache {
        SuggestionCache {
            entries: HashMap::new(),
            count: 0,
            max,
            overflowed: false,
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    pub fn get(&self, word: &str) -> Option<&[SmolStr]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    /// Stores the suggestions looked up for `word`, counting the lookup.
    ///
    /// Callers check [`is_exhausted`](Self::is_exhausted) first; once the
    /// cap is reached nothing more is stored.
    pub fn insert(&mut self, word: impl Into<SmolStr>, suggestions: Vec<SmolStr>) {
        if self.is_exhausted() {
            log::warn!("suggestion cache is full, dropping entry");
            return;
        }

        self.entries.insert(word.into(), suggestions);
        self.count += 1;
    }

    /// Number of suggestion lookups performed so far.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn is_exhausted(&self) -> bool {
        self.count >= self.max
    }

    /// True exactly once: the first time it is asked after the cap is hit.
    pub fn take_overflow_notice(&mut self) -> bool {
        if !self.is_exhausted() || self.overflowed {
            return false;
        }

        self.overflowed = true;
        true
    }
}
