//! Building a [`SourceFile`] while emitting its text.
//!
//! Modelled on rowan's green-node builder: nodes are opened and closed around
//! the tokens they contain, and every range is computed from the text that was
//! actually appended. Oracle adapters and the in-memory fixture use this so
//! offsets always agree with the source.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::{NodeKind, SourceFile, SyntaxNode};
use crate::base::{FileId, NodeId};

#[derive(Debug)]
pub struct SourceFileBuilder {
    file: FileId,
    path: SmolStr,
    text: String,
    nodes: Vec<SyntaxNode>,
    /// Open nodes; the root stays at the bottom.
    stack: Vec<NodeId>,
    /// Opened nodes that have not seen their first token yet.
    awaiting_token: Vec<NodeId>,
    last_token_end: TextSize,
    pending_doc: Vec<TextRange>,
}

impl SourceFileBuilder {
    pub fn new(file: FileId, path: impl Into<SmolStr>) -> Self {
        let root = SyntaxNode::new(NodeKind::SourceFile, TextRange::empty(TextSize::from(0)));
        Self {
            file,
            path: path.into(),
            text: String::new(),
            nodes: vec![root],
            stack: vec![NodeId::new(0)],
            awaiting_token: Vec::new(),
            last_token_end: TextSize::from(0),
            pending_doc: Vec::new(),
        }
    }

    fn offset(&self) -> TextSize {
        TextSize::of(self.text.as_str())
    }

    /// Open a node; it collects tokens until [`finish_node`](Self::finish_node).
    ///
    /// Doc blocks emitted with [`doc_comment`](Self::doc_comment) since the
    /// last node was opened are attached to this one.
    pub fn start_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        let mut node = SyntaxNode::new(kind, TextRange::empty(self.offset()));
        node.full_start = self.last_token_end;
        node.js_doc = std::mem::take(&mut self.pending_doc);

        let parent = *self.stack.last().unwrap_or(&NodeId::new(0));
        node.parent = Some(parent);
        self.nodes[parent.index()].children.push(id);
        self.nodes.push(node);

        self.stack.push(id);
        self.awaiting_token.push(id);
        id
    }

    /// Close the innermost open node.
    pub fn finish_node(&mut self) -> NodeId {
        if self.stack.len() <= 1 {
            return NodeId::new(0);
        }
        let Some(id) = self.stack.pop() else {
            return NodeId::new(0);
        };
        let end = self.last_token_end;
        let node = &mut self.nodes[id.index()];
        if self.awaiting_token.last() == Some(&id) {
            // never saw a token: empty range at the current position
            self.awaiting_token.pop();
            node.range = TextRange::empty(end);
        } else {
            let start = node.range.start().min(end);
            node.range = TextRange::new(start, end);
        }
        id
    }

    /// Append a token that does not get its own node (keywords, punctuation).
    pub fn keyword(&mut self, text: &str) {
        let start = self.offset();
        self.text.push_str(text);
        for id in self.awaiting_token.drain(..) {
            self.nodes[id.index()].range = TextRange::empty(start);
        }
        self.last_token_end = self.offset();
    }

    /// Append a leaf node (identifier, literal) holding `text`.
    pub fn token(&mut self, kind: NodeKind, text: &str) -> NodeId {
        let id = self.start_node(kind);
        self.keyword(text);
        self.nodes[id.index()].text = Some(SmolStr::new(text));
        self.finish_node()
    }

    /// Append a double-quoted string literal; the node text is unquoted.
    pub fn string_literal(&mut self, value: &str) -> NodeId {
        let id = self.start_node(NodeKind::StringLiteral);
        self.keyword(&format!("\"{value}\""));
        self.nodes[id.index()].text = Some(SmolStr::new(value));
        self.finish_node()
    }

    pub fn space(&mut self) {
        self.text.push(' ');
    }

    pub fn newline(&mut self) {
        self.text.push('\n');
    }

    /// Append raw trivia (whitespace or ordinary comments).
    pub fn trivia(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Append a comment followed by a newline.
    ///
    /// `/** ... */` blocks are also attached to the next opened node.
    pub fn doc_comment(&mut self, comment: &str) {
        let start = self.offset();
        self.text.push_str(comment);
        let range = TextRange::new(start, self.offset());
        self.text.push('\n');
        if comment.starts_with("/**") && comment.ends_with("*/") {
            self.pending_doc.push(range);
        }
    }

    /// Close every open node and produce the file.
    pub fn finish(mut self) -> SourceFile {
        while self.stack.len() > 1 {
            self.finish_node();
        }
        let root = &mut self.nodes[0];
        root.range = TextRange::up_to(TextSize::of(self.text.as_str()));
        root.full_start = TextSize::from(0);
        SourceFile::from_parts(self.file, self.path.as_str(), self.text, self.nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_exclude_leading_trivia() {
        let mut b = SourceFileBuilder::new(FileId::new(0), "a.ts");
        b.doc_comment("/** @deprecated */");
        let decl = b.start_node(NodeKind::FunctionDeclaration);
        b.keyword("function");
        b.space();
        b.token(NodeKind::Identifier, "f");
        b.keyword("() {}");
        b.finish_node();
        let file = b.finish();

        let node = file.node(decl).unwrap();
        assert_eq!(node.full_start, TextSize::from(0));
        assert_eq!(file.source_text(decl), Some("function f() {}"));
        assert_eq!(node.js_doc.len(), 1);
        assert_eq!(
            file.text_of(file.name_of(decl).unwrap()),
            Some("f")
        );
    }

    #[test]
    fn test_full_start_is_previous_token_end() {
        let mut b = SourceFileBuilder::new(FileId::new(0), "a.ts");
        b.keyword("x;");
        b.newline();
        b.trivia("// note\n");
        let second = b.start_node(NodeKind::ExpressionStatement);
        b.token(NodeKind::Identifier, "y");
        b.keyword(";");
        b.finish_node();
        let file = b.finish();

        let node = file.node(second).unwrap();
        assert_eq!(node.full_start, TextSize::from(2));
        assert_eq!(file.source_text(second), Some("y;"));
    }

    #[test]
    fn test_plain_comment_is_not_attached() {
        let mut b = SourceFileBuilder::new(FileId::new(0), "a.ts");
        b.doc_comment("// @deprecated");
        let decl = b.start_node(NodeKind::VariableStatement);
        b.keyword("const x = 1;");
        b.finish_node();
        let file = b.finish();

        assert!(file.node(decl).unwrap().js_doc.is_empty());
    }
}
