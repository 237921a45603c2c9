//! Detection of words used literally, such as quoted terms or a word
//! introduced by a dash or colon.
use super::{Node, NodeKind};

/// Delimiters that mark a word at the very start or end of its parent as literal.
const SINGLE: &[&str] = &["-", "\u{2013}", "\u{2014}", ":", ";"];

/// Opening delimiter and the closers it can pair with.
const PAIRS: &[(&str, &[&str])] = &[
    (",", &[","]),
    ("-", &["-"]),
    ("\u{2013}", &["\u{2013}"]),
    ("\u{2014}", &["\u{2014}"]),
    ("\"", &["\""]),
    ("'", &["'"]),
    ("\u{2018}", &["\u{2019}"]),
    ("\u{201A}", &["\u{2019}"]),
    ("\u{2019}", &["\u{2019}", "\u{201A}"]),
    ("\u{201C}", &["\u{201D}"]),
    ("\u{201D}", &["\u{201D}"]),
    ("\u{201E}", &["\u{201D}", "\u{201C}"]),
    ("\u{00AB}", &["\u{00BB}"]),
    ("\u{00BB}", &["\u{00AB}"]),
    ("\u{2039}", &["\u{203A}"]),
    ("\u{203A}", &["\u{2039}"]),
    ("(", &[")"]),
    ("[", &["]"]),
    ("{", &["}"]),
    ("\u{27E8}", &["\u{27E9}"]),
    ("\u{300C}", &["\u{300D}"]),
];

/// Whether the child at `index` of `parent` is used literally.
///
/// An out-of-range `index` is never literal.
pub fn is_literal(parent: &Node, index: usize) -> bool {
    let children = &parent.children;

    if index >= children.len() {
        return false;
    }

    let openers = || PAIRS.iter().map(|(open, _)| *open);

    (!contains_word(&children[..index])
        && sibling_delimiter(children, index, Step::Forward, SINGLE.iter().copied()).is_some())
        || (!contains_word(&children[index + 1..])
            && sibling_delimiter(children, index, Step::Backward, SINGLE.iter().copied())
                .is_some())
        || match sibling_delimiter(children, index, Step::Backward, openers()) {
            Some(open) => {
                let closers = PAIRS
                    .iter()
                    .find(|(o, _)| *o == open)
                    .map(|(_, closers)| *closers)
                    .unwrap_or(&[]);
                sibling_delimiter(children, index, Step::Forward, closers.iter().copied())
                    .is_some()
            }
            None => false,
        }
}

#[derive(Clone, Copy)]
enum Step {
    Forward,
    Backward,
}

fn contains_word(nodes: &[Node]) -> bool {
    nodes.iter().any(Node::is_word)
}

/// Finds the first non-whitespace sibling of `children[index]` in the
/// direction of `step` and returns its text when it is one of `delimiters`.
fn sibling_delimiter<'d, I>(
    children: &[Node],
    index: usize,
    step: Step,
    delimiters: I,
) -> Option<&'d str>
where
    I: IntoIterator<Item = &'d str>,
{
    let sibling = match step {
        Step::Forward => children[index + 1..]
            .iter()
            .find(|node| node.kind != NodeKind::WhiteSpace),
        Step::Backward => children[..index]
            .iter()
            .rev()
            .find(|node| node.kind != NodeKind::WhiteSpace),
    }?;

    if matches!(sibling.kind, NodeKind::Word | NodeKind::Source) {
        return None;
    }

    let text = sibling.to_text();
    delimiters.into_iter().find(|d| *d == text)
}
