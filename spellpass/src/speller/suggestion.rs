//! Suggestion for a spelling correction.
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::cmp::Ordering;

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Suggestion for a spelling correction
pub struct Suggestion {
    /// the suggested word-form
    pub value: SmolStr,
    /// penalty of the word-form, lower is better
    pub weight: u32,
}

impl Suggestion {
    /// creates a spelling correction suggestion
    pub fn new(value: impl Into<SmolStr>, weight: u32) -> Suggestion {
        Suggestion {
            value: value.into(),
            weight,
        }
    }

    /// gets the suggested word-form
    pub fn value(&self) -> &str {
        &self.value
    }

    /// gets the penalty weight of the suggestion
    pub fn weight(&self) -> u32 {
        self.weight
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Suggestion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.value.cmp(&other.value))
    }
}

impl PartialEq for Suggestion {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.weight == other.weight
    }
}

impl Eq for Suggestion {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_by_weight_then_value() {
        let mut all = vec![
            Suggestion::new("colour", 1),
            Suggestion::new("colon", 1),
            Suggestion::new("cool", 2),
            Suggestion::new("Colo", 0),
        ];
        all.sort();

        let values = all.iter().map(Suggestion::value).collect::<Vec<_>>();
        assert_eq!(values, vec!["Colo", "colon", "colour", "cool"]);
    }
}
