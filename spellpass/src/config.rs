//! Options accepted by a spell-checking session.
use std::io::Read;

use hashbrown::HashSet;
use serde::{Deserialize, Deserializer};
use smol_str::SmolStr;

use crate::dictionary::{Dictionary, DictionarySource, LoadCallback};
use crate::error::ConfigError;

/// Default cap on suggestion lookups per session.
pub const DEFAULT_MAX: usize = 30;

/// Options a session is created from.
///
/// Everything but the dictionary can be read from JSON:
///
/// ```json
/// { "ignore": ["spellpass"], "ignoreDigits": false, "max": 10 }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpellOptions {
    /// exact words never reported
    pub ignore: Vec<String>,
    /// skip words used literally, e.g. in quotes
    pub ignore_literal: bool,
    /// skip numbers and clock times
    pub ignore_digits: bool,
    /// treat `’` as `'`
    pub normalize_apostrophes: bool,
    /// maximum number of words suggestions are looked up for
    pub max: usize,
    /// personal word list: `*word` forbids, `word` adds
    #[serde(deserialize_with = "personal_text")]
    pub personal: Option<Vec<u8>>,
    #[serde(skip)]
    pub dictionary: Option<DictionarySource>,
}

fn personal_text<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(String::into_bytes))
}

impl Default for SpellOptions {
    fn default() -> SpellOptions {
        SpellOptions {
            ignore: vec![],
            ignore_literal: true,
            ignore_digits: true,
            normalize_apostrophes: true,
            max: DEFAULT_MAX,
            personal: None,
            dictionary: None,
        }
    }
}

impl SpellOptions {
    pub fn new(dictionary: DictionarySource) -> SpellOptions {
        SpellOptions {
            dictionary: Some(dictionary),
            ..SpellOptions::default()
        }
    }

    /// Options with defaults around a bare callback-style loader.
    pub fn from_loader<F>(load: F) -> SpellOptions
    where
        F: FnOnce(LoadCallback) + Send + 'static,
    {
        SpellOptions::new(DictionarySource::loader(load))
    }

    /// Reads options from JSON. The dictionary still has to be supplied.
    pub fn from_reader<R: Read>(reader: R) -> Result<SpellOptions, ConfigError> {
        serde_json::from_reader(reader).map_err(ConfigError::Options)
    }

    pub fn dictionary(mut self, dictionary: DictionarySource) -> SpellOptions {
        self.dictionary = Some(dictionary);
        self
    }

    pub fn ignore<I, S>(mut self, words: I) -> SpellOptions
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore = words.into_iter().map(Into::into).collect();
        self
    }

    pub fn ignore_literal(mut self, value: bool) -> SpellOptions {
        self.ignore_literal = value;
        self
    }

    pub fn ignore_digits(mut self, value: bool) -> SpellOptions {
        self.ignore_digits = value;
        self
    }

    pub fn normalize_apostrophes(mut self, value: bool) -> SpellOptions {
        self.normalize_apostrophes = value;
        self
    }

    pub fn max(mut self, value: usize) -> SpellOptions {
        self.max = value;
        self
    }

    pub fn personal(mut self, words: impl Into<Vec<u8>>) -> SpellOptions {
        self.personal = Some(words.into());
        self
    }

    /// Validates the options, splitting off what only the dictionary load needs.
    pub(crate) fn into_parts(
        self,
    ) -> Result<(Config, DictionarySource, Option<Vec<u8>>), ConfigError> {
        let dictionary = self.dictionary.ok_or(ConfigError::MissingDictionary)?;

        let config = Config {
            ignore: self.ignore.into_iter().map(SmolStr::from).collect(),
            ignore_literal: self.ignore_literal,
            ignore_digits: self.ignore_digits,
            normalize_apostrophes: self.normalize_apostrophes,
            max: self.max,
        };

        Ok((config, dictionary, self.personal))
    }
}

impl From<DictionarySource> for SpellOptions {
    fn from(dictionary: DictionarySource) -> SpellOptions {
        SpellOptions::new(dictionary)
    }
}

impl<D: Dictionary + 'static> From<Box<D>> for SpellOptions {
    fn from(dictionary: Box<D>) -> SpellOptions {
        SpellOptions::new(DictionarySource::Dictionary(dictionary))
    }
}

/// Checking settings of one session, fixed at creation.
#[derive(Debug, Clone)]
pub struct Config {
    pub ignore: HashSet<SmolStr>,
    pub ignore_literal: bool,
    pub ignore_digits: bool,
    pub normalize_apostrophes: bool,
    pub max: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            ignore: HashSet::new(),
            ignore_literal: true,
            ignore_digits: true,
            normalize_apostrophes: true,
            max: DEFAULT_MAX,
        }
    }
}
