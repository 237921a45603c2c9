//! Walks a tree, checks each word and reports misspellings.
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use smol_str::SmolStr;

use crate::cache::SuggestionCache;
use crate::classify::Classifier;
use crate::config::Config;
use crate::file::SourceFile;
use crate::speller::Speller;
use crate::tree::{is_literal, visit_words, Node, NodeKind};

/// Rule of the notice that suggestions stopped being looked up.
pub const OVERFLOW_RULE: &str = "overflow";

pub const OVERFLOW_REASON: &str = "Too many misspellings; no further spell suggestions are given";

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("non-word pattern"));

/// Rule id shared by every occurrence of the same misspelling.
///
/// Letters of any script are kept; each run of other characters becomes
/// one `-`.
pub fn rule_id(word: &str) -> SmolStr {
    SmolStr::new(NON_WORD.replace_all(&word.to_lowercase(), "-"))
}

/// Reason of a misspelling diagnostic.
pub fn reason(word: &str, suggestions: &[SmolStr]) -> String {
    let mut reason = format!("`{}` is misspelt", word);

    if !suggestions.is_empty() {
        reason.push_str(&format!(
            "; did you mean {}?",
            suggestions.iter().map(|s| format!("`{}`", s)).join(", ")
        ));
    }

    reason
}

/// One pass over one tree, sharing the session's suggestion cache.
pub struct Walker<'a> {
    config: &'a Config,
    classifier: Classifier<'a>,
    speller: &'a dyn Speller,
    cache: &'a mut SuggestionCache,
}

impl<'a> Walker<'a> {
    pub fn new(
        config: &'a Config,
        speller: &'a dyn Speller,
        cache: &'a mut SuggestionCache,
    ) -> Walker<'a> {
        Walker {
            config,
            classifier: Classifier::new(config),
            speller,
            cache,
        }
    }

    /// Reports every misspelt word of `tree` on `file`, in document order.
    pub fn run(&mut self, tree: &Node, file: &mut SourceFile) {
        let before = file.messages.len();

        visit_words(tree, &mut |word, parent| self.check_word(word, parent, file));

        log::debug!(
            "checked {}: {} message(s)",
            file.path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<anonymous>".to_string()),
            file.messages.len() - before
        );
    }

    fn check_word(&mut self, node: &Node, parent: Option<(&Node, usize)>, file: &mut SourceFile) {
        // Without a parent there is no context to judge the word in
        let (parent, index) = match parent {
            Some(parent) => parent,
            None => return,
        };

        if self.config.ignore_literal && is_literal(parent, index) {
            return;
        }

        let text = node.to_text();
        let word = self.classifier.normalize(&text);

        if self.classifier.is_irrelevant(&word) {
            return;
        }

        if self.is_correct(node, &word) {
            return;
        }

        log::trace!("misspelt: {}", word);

        let suggestions = self.suggestions(&word, node, file);
        let message = file.message(reason(&word, &suggestions), node, rule_id(&word));
        message.actual = Some(SmolStr::new(&*word));
        message.expected = suggestions;
    }

    /// The whole word is known, or it is a compound whose every relevant
    /// text segment is known.
    fn is_correct(&self, node: &Node, word: &str) -> bool {
        if self.speller.is_correct(word) {
            return true;
        }

        if node.children.len() < 2 {
            return false;
        }

        node.children
            .iter()
            .filter(|child| child.kind == NodeKind::Text)
            .all(|child| {
                let text = child.to_text();
                let segment = self.classifier.normalize(&text);
                self.classifier.is_irrelevant(&segment) || self.speller.is_correct(&segment)
            })
    }

    fn suggestions(&mut self, word: &str, node: &Node, file: &mut SourceFile) -> Vec<SmolStr> {
        if let Some(cached) = self.cache.get(word) {
            return cached.to_vec();
        }

        if self.cache.is_exhausted() {
            if self.cache.take_overflow_notice() {
                log::warn!(
                    "{} suggestion lookups done, not suggesting for further words",
                    self.cache.count()
                );
                file.message(OVERFLOW_REASON, node, OVERFLOW_RULE);
            }

            return vec![];
        }

        let suggestions = self
            .speller
            .suggest(word)
            .into_iter()
            .map(|s| s.value)
            .collect::<Vec<_>>();

        self.cache.insert(word, suggestions.clone());
        suggestions
    }
}
