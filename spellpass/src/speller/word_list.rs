//! Speller backed by a plain word list.
//!
//! Accepts one entry per line. Blank lines and `#` comments are skipped, a
//! leading line holding only the entry count is ignored, and anything after
//! a `/` (affix flags) or the first whitespace (morphological fields) is
//! dropped. This makes hunspell `.dic` files usable as-is, minus their affix
//! expansion.
use hashbrown::{HashMap, HashSet};
use smol_str::SmolStr;

use super::case_handling::{word_variants, CaseHandler, CaseMutation};
use super::{Speller, SpellerConfig, SpellerError, Suggestion};

#[derive(Debug, Clone)]
pub struct WordListSpeller {
    words: HashSet<SmolStr>,
    config: SpellerConfig,
}

impl WordListSpeller {
    pub fn from_bytes(bytes: &[u8]) -> Result<WordListSpeller, SpellerError> {
        let text = std::str::from_utf8(bytes).map_err(SpellerError::Encoding)?;
        WordListSpeller::parse(text)
    }

    pub fn parse(text: &str) -> Result<WordListSpeller, SpellerError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut words = HashSet::new();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if index == 0 && line.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }

            let entry = line.split_whitespace().next().unwrap_or(line);
            let word = match entry.find('/') {
                Some(0) => return Err(SpellerError::MalformedEntry(index + 1, line.to_string())),
                Some(i) => &entry[..i],
                None => entry,
            };

            words.insert(SmolStr::new(word));
        }

        if words.is_empty() {
            return Err(SpellerError::Empty);
        }

        log::debug!("word list loaded with {} entries", words.len());

        Ok(WordListSpeller {
            words,
            config: SpellerConfig::default(),
        })
    }

    pub fn with_config(mut self, config: SpellerConfig) -> WordListSpeller {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SpellerConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn case_handler(&self, word: &str) -> CaseHandler {
        if self.config.case_handling {
            word_variants(word)
        } else {
            CaseHandler {
                original_input: word.into(),
                mutation: CaseMutation::None,
                words: vec![],
            }
        }
    }

    /// Entries within the configured edit distance of `input`.
    fn candidates<'a>(&'a self, input: &'a str) -> impl Iterator<Item = (&'a SmolStr, usize)> + 'a {
        let max_distance = self.config.max_distance;
        let input_len = input.chars().count();

        self.words.iter().filter_map(move |entry| {
            let entry_len = entry.chars().count();
            if entry_len.max(input_len) - entry_len.min(input_len) > max_distance {
                return None;
            }

            let distance = strsim::damerau_levenshtein(input, entry);
            (distance > 0 && distance <= max_distance).then(|| (entry, distance))
        })
    }
}

impl Speller for WordListSpeller {
    fn is_correct(&self, word: &str) -> bool {
        if word.is_empty() {
            return true;
        }

        if self.words.contains(word) {
            return true;
        }

        self.case_handler(word)
            .words
            .iter()
            .any(|variant| self.words.contains(variant))
    }

    fn suggest(&self, word: &str) -> Vec<Suggestion> {
        if word.is_empty() {
            return vec![];
        }

        let CaseHandler {
            original_input,
            mutation,
            words,
        } = self.case_handler(word);
        let mut best: HashMap<SmolStr, u32> = HashMap::new();

        for input in std::iter::once(&original_input).chain(words.iter()) {
            for (entry, distance) in self.candidates(input) {
                let weight = distance as u32;

                best.entry(mutation.apply(entry))
                    .and_modify(|w| {
                        if *w > weight {
                            *w = weight
                        }
                    })
                    .or_insert(weight);
            }
        }

        best.remove(word);

        let mut out = best
            .into_iter()
            .map(|(value, weight)| Suggestion { value, weight })
            .collect::<Vec<_>>();
        out.sort();
        if let Some(n_best) = self.config.n_best {
            out.truncate(n_best);
        }
        out
    }
}
