//! Builds syntax trees from plain text.
//!
//! Only meant for harnesses and tests: text is split on Unicode word
//! boundaries, sentences end at terminal punctuation and paragraphs at blank
//! lines. Real documents should come from a proper natural-language parser.
use unic_segment::WordBoundIndices;
use unic_ucd_category::GeneralCategory;

use crate::tree::{Node, NodeKind, Point, Position};

const TERMINALS: &[&str] = &[".", "!", "?", "\u{2026}"];

pub trait Tokenize {
    fn word_bound_indices(&self) -> WordBoundIndices;
    fn to_tree(&self) -> Node;
}

impl Tokenize for str {
    fn word_bound_indices(&self) -> WordBoundIndices {
        WordBoundIndices::new(self)
    }

    fn to_tree(&self) -> Node {
        parse(self)
    }
}

/// Parses `text` into root, paragraph, sentence and word nodes, with
/// positions on every node.
pub fn parse(text: &str) -> Node {
    let mut cursor = Cursor::default();
    let mut builder = Builder::default();

    for (_, segment) in text.word_bound_indices() {
        let start = cursor.point();
        cursor.advance(segment);
        let position = Position::new(start, cursor.point());

        if segment.chars().all(char::is_whitespace) {
            builder.space(segment, position);
            continue;
        }

        builder.flush_space();

        if segment.chars().any(char::is_alphanumeric) {
            builder.push_word(word(segment, start));
            continue;
        }

        let kind = match segment.chars().next() {
            Some(ch) if segment.chars().count() == 1 && is_punctuation(ch) => NodeKind::Punctuation,
            _ => NodeKind::Symbol,
        };

        builder
            .sentence
            .push(Node::leaf(kind, segment).with_position(position));

        if kind == NodeKind::Punctuation && TERMINALS.contains(&segment) {
            builder.end_sentence();
        }
    }

    builder.flush_space();
    builder.end_paragraph();

    Node::parent(NodeKind::Root, builder.root)
        .with_position(Position::new(Point::new(1, 1, 0), cursor.point()))
}

fn is_punctuation(ch: char) -> bool {
    GeneralCategory::of(ch).is_punctuation()
}

/// Word node for one word segment. Punctuation inside it (`3.14`, `don't`)
/// becomes separate children between its text runs.
fn word(segment: &str, start: Point) -> Node {
    let mut cursor = Cursor::at(start);
    let mut children = vec![];
    let mut rest = segment;

    while let Some(first) = rest.chars().next() {
        let punctuation = is_punctuation(first);
        let len = rest
            .find(|c: char| is_punctuation(c) != punctuation)
            .unwrap_or(rest.len());
        let (piece, tail) = rest.split_at(len);

        let from = cursor.point();
        cursor.advance(piece);
        let node = if punctuation {
            Node::punctuation(piece)
        } else {
            Node::text(piece)
        };
        children.push(node.with_position(Position::new(from, cursor.point())));

        rest = tail;
    }

    Node::word(children).with_position(Position::new(start, cursor.point()))
}

#[derive(Debug)]
struct Cursor {
    line: usize,
    column: usize,
    offset: usize,
}

impl Default for Cursor {
    fn default() -> Cursor {
        Cursor {
            line: 1,
            column: 1,
            offset: 0,
        }
    }
}

impl Cursor {
    fn at(point: Point) -> Cursor {
        Cursor {
            line: point.line,
            column: point.column,
            offset: point.offset,
        }
    }

    fn point(&self) -> Point {
        Point::new(self.line, self.column, self.offset)
    }

    fn advance(&mut self, segment: &str) {
        for ch in segment.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        self.offset += segment.len();
    }
}

#[derive(Debug, Default)]
struct Builder {
    root: Vec<Node>,
    paragraph: Vec<Node>,
    sentence: Vec<Node>,
    space: Option<(String, Position)>,
}

impl Builder {
    fn space(&mut self, segment: &str, position: Position) {
        match self.space.as_mut() {
            Some((value, span)) => {
                value.push_str(segment);
                span.end = position.end;
            }
            None => self.space = Some((segment.to_string(), position)),
        }
    }

    fn flush_space(&mut self) {
        let (value, position) = match self.space.take() {
            Some(space) => space,
            None => return,
        };

        let node = Node::white_space(value.as_str()).with_position(position);

        if value.matches('\n').count() >= 2 {
            self.end_paragraph();
            self.root.push(node);
        } else if !self.sentence.is_empty() {
            self.sentence.push(node);
        } else if !self.paragraph.is_empty() {
            self.paragraph.push(node);
        } else {
            self.root.push(node);
        }
    }

    /// Pushes a word, joining it to a directly preceding `word-` into one
    /// compound word.
    fn push_word(&mut self, word: Node) {
        let joins = matches!(
            self.sentence.as_slice(),
            [.., previous, hyphen] if previous.is_word() && is_hyphen(hyphen)
        );

        if !joins {
            self.sentence.push(word);
            return;
        }

        let hyphen = self.sentence.pop();
        if let (Some(hyphen), Some(previous)) = (hyphen, self.sentence.last_mut()) {
            previous.children.push(hyphen);
            previous.children.extend(word.children);

            if let (Some(span), Some(end)) = (previous.position.as_mut(), word.position) {
                span.end = end.end;
            }
        }
    }

    fn end_sentence(&mut self) {
        if self.sentence.is_empty() {
            return;
        }

        let children = std::mem::take(&mut self.sentence);
        let position = span(&children);
        let mut sentence = Node::parent(NodeKind::Sentence, children);
        sentence.position = position;
        self.paragraph.push(sentence);
    }

    fn end_paragraph(&mut self) {
        self.end_sentence();

        if self.paragraph.is_empty() {
            return;
        }

        let children = std::mem::take(&mut self.paragraph);
        let position = span(&children);
        let mut paragraph = Node::parent(NodeKind::Paragraph, children);
        paragraph.position = position;
        self.root.push(paragraph);
    }
}

fn is_hyphen(node: &Node) -> bool {
    node.kind == NodeKind::Punctuation && node.value.as_deref() == Some("-")
}

fn span(children: &[Node]) -> Option<Position> {
    let start = children.first()?.position?.start;
    let end = children.last()?.position?.end;
    Some(Position::new(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::visit_words;

    fn words(tree: &Node) -> Vec<(String, String)> {
        let mut out = vec![];
        visit_words(tree, &mut |word, _| {
            out.push((
                word.to_text(),
                word.position.map(|p| p.to_string()).unwrap_or_default(),
            ))
        });
        out
    }

    #[test]
    fn words_with_positions() {
        let tree = parse("colour and utilise");

        assert_eq!(
            words(&tree),
            vec![
                ("colour".to_string(), "1:1-1:7".to_string()),
                ("and".to_string(), "1:8-1:11".to_string()),
                ("utilise".to_string(), "1:12-1:19".to_string()),
            ]
        );
        assert_eq!(tree.to_text(), "colour and utilise");
    }

    #[test]
    fn hyphenated_compound() {
        let tree = parse("a wrongely-spelled-word here");
        let sentence = &tree.children[0].children[0];
        let compound = &sentence.children[2];

        assert!(compound.is_word());
        assert_eq!(compound.to_text(), "wrongely-spelled-word");
        assert_eq!(compound.children.len(), 5);
        assert_eq!(compound.children[1].kind, NodeKind::Punctuation);
        assert_eq!(compound.position.unwrap().to_string(), "1:3-1:24");
    }

    #[test]
    fn spaced_hyphen_does_not_join() {
        let tree = parse("well - known");
        assert_eq!(words(&tree).len(), 2);
    }

    #[test]
    fn apostrophes_stay_in_words() {
        let tree = parse("don\u{2019}t can't");
        let found = words(&tree).into_iter().map(|(w, _)| w).collect::<Vec<_>>();

        assert_eq!(found, vec!["don\u{2019}t", "can't"]);
    }

    #[test]
    fn inner_punctuation_splits_text() {
        let tree = parse("3.14 don't");
        let sentence = &tree.children[0].children[0];

        let number = &sentence.children[0];
        assert!(number.is_word());
        assert_eq!(
            number
                .children
                .iter()
                .map(|n| (n.kind, n.to_text()))
                .collect::<Vec<_>>(),
            vec![
                (NodeKind::Text, "3".to_string()),
                (NodeKind::Punctuation, ".".to_string()),
                (NodeKind::Text, "14".to_string()),
            ]
        );
        assert_eq!(number.children[2].position.unwrap().to_string(), "1:3-1:5");
        assert_eq!(number.position.unwrap().to_string(), "1:1-1:5");

        let contraction = &sentence.children[2];
        assert_eq!(contraction.children.len(), 3);
        assert_eq!(contraction.to_text(), "don't");
        assert_eq!(contraction.children[1].kind, NodeKind::Punctuation);
    }

    #[test]
    fn sentences_and_paragraphs() {
        let tree = parse("One two. Three!\n\nFour\nfive.");

        assert_eq!(tree.kind, NodeKind::Root);
        let paragraphs = tree
            .children
            .iter()
            .filter(|n| n.kind == NodeKind::Paragraph)
            .collect::<Vec<_>>();
        assert_eq!(paragraphs.len(), 2);

        let sentences = paragraphs[0]
            .children
            .iter()
            .filter(|n| n.kind == NodeKind::Sentence)
            .count();
        assert_eq!(sentences, 2);

        let last = words(&tree).pop().unwrap();
        assert_eq!(last, ("five".to_string(), "4:1-4:5".to_string()));
        assert_eq!(tree.to_text(), "One two. Three!\n\nFour\nfive.");
    }

    #[test]
    fn quotes_are_punctuation() {
        let tree = parse("the \u{201C}xyzzy\u{201D}");
        let sentence = &tree.children[0].children[0];

        assert_eq!(sentence.children[2].kind, NodeKind::Punctuation);
        assert_eq!(sentence.children[4].kind, NodeKind::Punctuation);
    }

    #[test]
    fn empty_text() {
        let tree = parse("");
        assert!(tree.children.is_empty());
        assert!(words(&tree).is_empty());
    }
}
