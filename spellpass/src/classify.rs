//! Decides which words are worth checking at all.
use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Config;

const SMART_APOSTROPHE: char = '\u{2019}';
const STRAIGHT_APOSTROPHE: &str = "'";

static CLOCK_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9]{1,2}:[0-9]{2}(?:\s*[ap]\.?\s*m\.?)?$").expect("clock time pattern")
});

pub fn is_digits(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_digit())
}

/// `11:50`, `2:41pm`, `9:05 a.m.` and the like.
pub fn is_clock_time(word: &str) -> bool {
    CLOCK_TIME.is_match(word)
}

/// Text-level filters of one session.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    config: &'a Config,
}

impl<'a> Classifier<'a> {
    pub fn new(config: &'a Config) -> Classifier<'a> {
        Classifier { config }
    }

    /// Whether `word` is never reported: ignored explicitly, or a number or
    /// clock time when digits are ignored.
    pub fn is_irrelevant(&self, word: &str) -> bool {
        if self.config.ignore.contains(word) {
            return true;
        }

        self.config.ignore_digits && (is_digits(word) || is_clock_time(word))
    }

    /// Replaces typographic apostrophes with straight ones when enabled.
    pub fn normalize<'w>(&self, word: &'w str) -> Cow<'w, str> {
        if self.config.normalize_apostrophes && word.contains(SMART_APOSTROPHE) {
            Cow::Owned(word.replace(SMART_APOSTROPHE, STRAIGHT_APOSTROPHE))
        } else {
            Cow::Borrowed(word)
        }
    }
}
