/*! Spell-checking pass over natural-language syntax trees.

Visits every word of a document tree, asks a [`Speller`](speller::Speller)
whether it is correct and reports the misspelt ones, with suggestions, as
diagnostics on a [`SourceFile`].

A [`Spell`] session owns one dictionary load. Documents checked while the
dictionary is still loading are queued and checked in order once it is
ready; suggestions looked up for a session are cached and capped.

# Usage examples

```
use spellpass::{SourceFile, Spell, SpellOptions, WordList};
use spellpass::tokenizer::parse;

let options = SpellOptions::from(Box::new(WordList::new("colour\nand\nflavour\n")))
    .ignore(["spellpass"])
    .max(10);
let spell = Spell::new(options).unwrap();

spell.check(parse("spellpass colour and flavor"), SourceFile::new(), |result, file| {
    assert!(result.is_ok());
    assert_eq!(file.messages[0].expected, vec!["flavour"]);
});
```

Dictionaries may also come from a callback-style loader, which can finish
on any thread:

```
use spellpass::{SpellOptions, WordList};

let options = SpellOptions::from_loader(|done| {
    std::thread::spawn(move || done(Ok(Box::new(WordList::new("colour\n")))));
});
```

Further examples can be found in `spellpass-bin` in the same repository.
*/

pub mod cache;
pub mod classify;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod file;
pub mod gate;
pub mod speller;
pub mod tokenizer;
pub mod tree;
pub mod walker;

pub use crate::config::{Config, SpellOptions};
pub use crate::dictionary::{Dictionary, DictionarySource, WordList};
pub use crate::error::{ConfigError, LoadError};
pub use crate::file::{Diagnostic, SourceFile};
pub use crate::gate::{Spell, State};
pub use crate::tree::Node;

/// Sends log records to stderr, filtered by `RUST_LOG`, for embedders
/// without a logger of their own.
#[cfg(feature = "logging")]
pub fn enable_logging() {
    let _ = env_logger::try_init();
}
