//! Capitalisation variants a speller also accepts for an input word.
use smol_str::SmolStr;

/// Capitalisation pattern of a word, judged by its cased letters only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// no upper-case letter: `colour`, `don't`, `2024`
    Lower,
    /// only the first cased letter is upper-case: `Colour`
    Capitalised,
    /// no lower-case letter: `COLOUR`
    Upper,
    /// anything else: `McDonald`, `iPhone`
    Mixed,
}

fn shape(word: &str) -> Shape {
    let mut cased = word
        .chars()
        .filter(|c| c.is_uppercase() || c.is_lowercase());

    let first_upper = match cased.next() {
        Some(c) => c.is_uppercase(),
        None => return Shape::Lower,
    };
    let (mut upper, mut lower) = (false, false);
    for c in cased {
        upper |= c.is_uppercase();
        lower |= c.is_lowercase();
    }

    match (first_upper, upper, lower) {
        (false, false, _) => Shape::Lower,
        (true, false, _) => Shape::Capitalised,
        (true, true, false) => Shape::Upper,
        _ => Shape::Mixed,
    }
}

fn upper_first(word: &str) -> SmolStr {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => SmolStr::default(),
    }
}

fn lower_first(word: &str) -> SmolStr {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => SmolStr::default(),
    }
}

/// How suggestions found for a variant are re-cased to match the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMutation {
    FirstCaps,
    AllCaps,
    None,
}

impl CaseMutation {
    pub fn apply(self, word: &str) -> SmolStr {
        match self {
            CaseMutation::FirstCaps => upper_first(word),
            CaseMutation::AllCaps => SmolStr::new(word.to_uppercase()),
            CaseMutation::None => SmolStr::new(word),
        }
    }
}

/// Casing variants of one input word that a speller may also accept.
#[derive(Debug, Clone)]
pub struct CaseHandler {
    pub original_input: SmolStr,
    pub mutation: CaseMutation,
    pub words: Vec<SmolStr>,
}

/// `COLOUR` may be `Colour` or `colour`, `Colour` may be `colour`. A
/// mixed-case word only has its first letter flipped, so `McDonald` is
/// never accepted as `mcdonald`.
pub fn word_variants(word: &str) -> CaseHandler {
    let (mutation, words) = match shape(word) {
        Shape::Lower => (CaseMutation::None, vec![]),
        Shape::Capitalised => (CaseMutation::FirstCaps, vec![SmolStr::new(word.to_lowercase())]),
        Shape::Upper => {
            let lower = word.to_lowercase();
            (CaseMutation::AllCaps, vec![upper_first(&lower), SmolStr::new(lower)])
        }
        Shape::Mixed if word.chars().next().map_or(false, char::is_uppercase) => {
            (CaseMutation::FirstCaps, vec![lower_first(word)])
        }
        Shape::Mixed => {
            let flipped = upper_first(word);
            // `cOLOUR` flipped is all caps, which says nothing about the word
            let words = if shape(&flipped) == Shape::Upper {
                vec![]
            } else {
                vec![flipped]
            };
            (CaseMutation::None, words)
        }
    };

    CaseHandler {
        original_input: word.into(),
        mutation,
        words: words.into_iter().filter(|w| w != word).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variants(word: &str) -> Vec<String> {
        word_variants(word)
            .words
            .into_iter()
            .map(|w| w.to_string())
            .collect()
    }

    #[test]
    fn shapes() {
        assert_eq!(shape("colour"), Shape::Lower);
        assert_eq!(shape("don't"), Shape::Lower);
        assert_eq!(shape("2024"), Shape::Lower);
        assert_eq!(shape("Colour"), Shape::Capitalised);
        assert_eq!(shape("Spellpass-ready"), Shape::Capitalised);
        assert_eq!(shape("COLOUR"), Shape::Upper);
        assert_eq!(shape("I"), Shape::Capitalised);
        assert_eq!(shape("McDonald"), Shape::Mixed);
        assert_eq!(shape("iPhone"), Shape::Mixed);
        assert_eq!(shape("cOLOUR"), Shape::Mixed);
    }

    #[test]
    fn variants_by_shape() {
        assert!(variants("colour").is_empty());
        assert_eq!(variants("Colour"), vec!["colour"]);
        assert_eq!(variants("COLOUR"), vec!["Colour", "colour"]);
        assert_eq!(variants("McDonald"), vec!["mcDonald"]);
        assert_eq!(variants("iPhone"), vec!["IPhone"]);
        assert!(variants("cOLOUR").is_empty());
    }

    #[test]
    fn mutations() {
        assert_eq!(word_variants("colr").mutation, CaseMutation::None);
        assert_eq!(word_variants("Colr").mutation, CaseMutation::FirstCaps);
        assert_eq!(word_variants("COLR").mutation, CaseMutation::AllCaps);

        assert_eq!(CaseMutation::FirstCaps.apply("colour"), "Colour");
        assert_eq!(CaseMutation::AllCaps.apply("colour"), "COLOUR");
        assert_eq!(CaseMutation::None.apply("colour"), "colour");
    }
}
