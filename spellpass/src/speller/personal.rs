//! Personal word lists layered over another speller.
use std::sync::Arc;

use hashbrown::HashSet;
use smol_str::SmolStr;

use super::{Speller, SpellerError, Suggestion};

/// Prefix marking a personal entry as forbidden rather than added.
pub const FORBID_MARKER: char = '*';

/// Maximum edit distance at which added words are offered as suggestions.
const PERSONAL_DISTANCE: usize = 2;

/// Words a user added to or forbade from a dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalWords {
    pub added: HashSet<SmolStr>,
    pub forbidden: HashSet<SmolStr>,
}

impl PersonalWords {
    pub fn from_bytes(bytes: &[u8]) -> Result<PersonalWords, SpellerError> {
        let text = std::str::from_utf8(bytes).map_err(SpellerError::PersonalEncoding)?;
        Ok(PersonalWords::parse(text))
    }

    /// One entry per line; `*word` forbids, `word` or `word/model` adds.
    pub fn parse(text: &str) -> PersonalWords {
        let mut personal = PersonalWords::default();

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(word) = line.strip_prefix(FORBID_MARKER) {
                let word = word.trim();
                if !word.is_empty() {
                    personal.added.remove(word);
                    personal.forbidden.insert(word.into());
                }
                continue;
            }

            let word = line.split('/').next().unwrap_or(line).trim();
            if !word.is_empty() {
                personal.forbidden.remove(word);
                personal.added.insert(word.into());
            }
        }

        personal
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.forbidden.is_empty()
    }
}

/// A speller with a personal word list merged on top.
///
/// Forbidden words are never correct and never suggested; added words are
/// always correct and are offered as suggestions for close misspellings.
pub struct PersonalSpeller {
    inner: Arc<dyn Speller + Send + Sync>,
    words: PersonalWords,
}

impl PersonalSpeller {
    pub fn new(inner: Arc<dyn Speller + Send + Sync>, words: PersonalWords) -> PersonalSpeller {
        PersonalSpeller { inner, words }
    }

    pub fn words(&self) -> &PersonalWords {
        &self.words
    }
}

impl Speller for PersonalSpeller {
    fn is_correct(&self, word: &str) -> bool {
        if self.words.forbidden.contains(word) {
            return false;
        }

        self.words.added.contains(word) || self.inner.is_correct(word)
    }

    fn suggest(&self, word: &str) -> Vec<Suggestion> {
        let mut out = self
            .inner
            .suggest(word)
            .into_iter()
            .filter(|s| !self.words.forbidden.contains(s.value()))
            .collect::<Vec<_>>();

        for added in self.words.added.iter() {
            if added == word || out.iter().any(|s| &s.value == added) {
                continue;
            }

            let distance = strsim::damerau_levenshtein(word, added);
            if distance <= PERSONAL_DISTANCE {
                out.push(Suggestion::new(added.clone(), distance as u32));
            }
        }

        out.sort();
        out
    }
}
