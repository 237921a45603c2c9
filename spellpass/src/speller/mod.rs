//! Spellers answer whether a word is correct and what it could be replaced with.
use serde::{Deserialize, Serialize};

pub mod case_handling;
pub mod error;
pub mod personal;
pub mod suggestion;
pub mod word_list;

pub use self::error::SpellerError;
pub use self::personal::{PersonalSpeller, PersonalWords};
pub use self::suggestion::Suggestion;
pub use self::word_list::WordListSpeller;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpellerConfig {
    /// maximum number of suggestions returned, `None` for all of them
    pub n_best: Option<usize>,
    /// maximum edit distance between a word and its suggestions
    pub max_distance: usize,
    /// also accept and suggest capitalisation variants of the input
    pub case_handling: bool,
}

impl SpellerConfig {
    pub const fn default() -> SpellerConfig {
        SpellerConfig {
            n_best: Some(10),
            max_distance: 2,
            case_handling: true,
        }
    }
}

/// Query interface of a loaded dictionary.
///
/// Implementations must be free of observable side effects: the checking
/// pass may call either method any number of times, in any order.
pub trait Speller {
    fn is_correct(&self, word: &str) -> bool;
    fn suggest(&self, word: &str) -> Vec<Suggestion>;
}

impl<S: Speller + ?Sized> Speller for std::sync::Arc<S> {
    #[inline]
    fn is_correct(&self, word: &str) -> bool {
        (**self).is_correct(word)
    }

    #[inline]
    fn suggest(&self, word: &str) -> Vec<Suggestion> {
        (**self).suggest(word)
    }
}
