//! Source files and the diagnostics reported on them.
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use smol_str::SmolStr;

use crate::tree::{Node, Position};

/// Name reported as the origin of every diagnostic.
pub const SOURCE: &str = "spellpass";

/// Documentation for the reported rules.
pub const DOCS_URL: &str = "https://docs.rs/spellpass";

/// A message about one span of a source file.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// human readable description
    pub reason: String,
    /// start line, when the span is known
    pub line: Option<usize>,
    /// start column, when the span is known
    pub column: Option<usize>,
    pub location: Option<Position>,
    /// producer of the message
    pub source: SmolStr,
    /// machine readable category, stable for equal words
    pub rule_id: SmolStr,
    pub fatal: bool,
    /// the flagged text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<SmolStr>,
    /// suggested replacements, possibly none
    pub expected: Vec<SmolStr>,
    pub url: Option<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self.location {
            Some(position) => write!(f, "{}: {}", position, self.reason),
            None => write!(f, "1:1: {}", self.reason),
        }
    }
}

/// A document being checked, collecting diagnostics in report order.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SourceFile {
    pub path: Option<PathBuf>,
    pub messages: Vec<Diagnostic>,
}

impl SourceFile {
    pub fn new() -> SourceFile {
        SourceFile::default()
    }

    pub fn with_path(path: impl Into<PathBuf>) -> SourceFile {
        SourceFile {
            path: Some(path.into()),
            messages: vec![],
        }
    }

    /// Appends a non-fatal diagnostic spanning `node` and returns it for
    /// further decoration.
    pub fn message(
        &mut self,
        reason: impl Into<String>,
        node: &Node,
        rule_id: impl Into<SmolStr>,
    ) -> &mut Diagnostic {
        let location = node.position;

        self.messages.push(Diagnostic {
            reason: reason.into(),
            line: location.map(|p| p.start.line),
            column: location.map(|p| p.start.column),
            location,
            source: SOURCE.into(),
            rule_id: rule_id.into(),
            fatal: false,
            actual: None,
            expected: vec![],
            url: Some(DOCS_URL.to_string()),
        });

        let last = self.messages.len() - 1;
        &mut self.messages[last]
    }

    /// Human readable report, one diagnostic per line, prefixed with the path.
    pub fn report(&self) -> String {
        let name = self
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<stdin>".to_string());

        self.messages
            .iter()
            .map(|m| format!("{}:{}", name, m))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Point;

    #[test]
    fn message_takes_node_span() {
        let node = Node::word(vec![Node::text("color")])
            .with_position(Position::new(Point::new(1, 1, 0), Point::new(1, 6, 5)));
        let mut file = SourceFile::new();

        let message = file.message("`color` is misspelt", &node, "color");
        message.actual = Some("color".into());

        assert_eq!(file.messages.len(), 1);
        assert_eq!(file.messages[0].line, Some(1));
        assert_eq!(file.messages[0].column, Some(1));
        assert_eq!(file.messages[0].to_string(), "1:1-1:6: `color` is misspelt");
        assert_eq!(file.messages[0].actual.as_deref(), Some("color"));
    }

    #[test]
    fn serialized_keys() {
        let node = Node::word(vec![Node::text("x")]);
        let mut file = SourceFile::new();
        file.message("reason", &node, "x");

        let json = serde_json::to_value(&file.messages[0]).unwrap();
        assert_eq!(json["ruleId"], "x");
        assert_eq!(json["source"], "spellpass");
        assert_eq!(json["fatal"], false);
        assert!(json.get("actual").is_none());
    }

    #[test]
    fn report_lines() {
        let node = Node::word(vec![Node::text("x")])
            .with_position(Position::new(Point::new(2, 3, 9), Point::new(2, 4, 10)));
        let mut file = SourceFile::with_path("doc.txt");
        file.message("first", &node, "a");
        file.message("second", &node, "b");

        assert_eq!(file.report(), "doc.txt:2:3-2:4: first\ndoc.txt:2:3-2:4: second");
    }
}
