//! Natural-language concrete syntax tree consumed by the spell-checking pass.
//!
//! The shape mirrors what upstream parsers produce: a root holding
//! paragraphs, sentences and finally words, where a word is made of text,
//! punctuation and symbol leaves. Trees (de)serialize to the same JSON
//! layout, with node kinds named `RootNode`, `WordNode` and so on.
use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

pub mod literal;

pub use self::literal::is_literal;

/// Kind of a node in the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "RootNode")]
    Root,
    #[serde(rename = "ParagraphNode")]
    Paragraph,
    #[serde(rename = "SentenceNode")]
    Sentence,
    #[serde(rename = "WordNode")]
    Word,
    #[serde(rename = "TextNode")]
    Text,
    #[serde(rename = "SymbolNode")]
    Symbol,
    #[serde(rename = "PunctuationNode")]
    Punctuation,
    #[serde(rename = "WhiteSpaceNode")]
    WhiteSpace,
    #[serde(rename = "SourceNode")]
    Source,
}

/// One place in the source document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// 1-based line
    pub line: usize,
    /// 1-based column, counted in chars
    pub column: usize,
    /// 0-based byte offset
    pub offset: usize,
}

impl Point {
    pub const fn new(line: usize, column: usize, offset: usize) -> Point {
        Point {
            line,
            column,
            offset,
        }
    }
}

/// Span of a node in the source document; `end` is exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub start: Point,
    pub end: Point,
}

impl Position {
    pub const fn new(start: Point, end: Point) -> Position {
        Position { start, end }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<SmolStr>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Node {
    /// creates a leaf node holding `value`
    pub fn leaf(kind: NodeKind, value: impl Into<SmolStr>) -> Node {
        Node {
            kind,
            value: Some(value.into()),
            children: vec![],
            position: None,
        }
    }

    /// creates a node with children
    pub fn parent(kind: NodeKind, children: Vec<Node>) -> Node {
        Node {
            kind,
            value: None,
            children,
            position: None,
        }
    }

    pub fn text(value: impl Into<SmolStr>) -> Node {
        Node::leaf(NodeKind::Text, value)
    }

    pub fn punctuation(value: impl Into<SmolStr>) -> Node {
        Node::leaf(NodeKind::Punctuation, value)
    }

    pub fn white_space(value: impl Into<SmolStr>) -> Node {
        Node::leaf(NodeKind::WhiteSpace, value)
    }

    pub fn word(children: Vec<Node>) -> Node {
        Node::parent(NodeKind::Word, children)
    }

    pub fn with_position(mut self, position: Position) -> Node {
        self.position = Some(position);
        self
    }

    pub fn is_word(&self) -> bool {
        self.kind == NodeKind::Word
    }

    /// Concatenated value of every leaf below this node.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        if let Some(value) = self.value.as_ref() {
            out.push_str(value);
        }

        for child in self.children.iter() {
            child.push_text(out);
        }
    }
}

/// Calls `visitor` for every word node below (and including) `tree`, depth
/// first, in document order.
///
/// The visitor also receives the word's parent and its index among the
/// parent's children. A word at the root of the walk has neither.
pub fn visit_words<'a, F>(tree: &'a Node, visitor: &mut F)
where
    F: FnMut(&'a Node, Option<(&'a Node, usize)>),
{
    if tree.is_word() {
        visitor(tree, None);
        return;
    }

    visit_children(tree, visitor);
}

fn visit_children<'a, F>(parent: &'a Node, visitor: &mut F)
where
    F: FnMut(&'a Node, Option<(&'a Node, usize)>),
{
    for (index, child) in parent.children.iter().enumerate() {
        if child.is_word() {
            visitor(child, Some((parent, index)));
        } else {
            visit_children(child, visitor);
        }
    }
}
