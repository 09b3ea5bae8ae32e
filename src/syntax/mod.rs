//! Syntax trees handed over by the parser oracle.
//!
//! The parser itself is not part of this crate. A [`SourceFile`] is the shape
//! the oracle hands back: an arena of nodes with token ranges, parent links
//! and the doc-comment blocks attached to each node. Everything else here is a
//! read-only view over that arena.

mod builder;
mod comments;

use std::sync::Arc;

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use crate::base::{FileId, NodeId};

pub use builder::SourceFileBuilder;
pub use comments::{CommentRange, leading_comment_ranges};

/// The kind of a syntax node.
///
/// Only the shapes the deprecation analysis looks at are distinguished;
/// everything else is [`NodeKind::Other`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    SourceFile,
    // Module syntax
    ImportDeclaration,
    ImportClause,
    NamedImports,
    ImportSpecifier,
    NamespaceImport,
    ExportDeclaration,
    NamedExports,
    ExportSpecifier,
    NamespaceExport,
    ExportAssignment,
    // Declarations
    FunctionDeclaration,
    ClassDeclaration,
    InterfaceDeclaration,
    TypeAliasDeclaration,
    EnumDeclaration,
    ModuleDeclaration,
    VariableStatement,
    VariableDeclarationList,
    VariableDeclaration,
    MethodDeclaration,
    PropertyDeclaration,
    EnumMember,
    // Statements and expressions
    Block,
    ExpressionStatement,
    CallExpression,
    PropertyAccessExpression,
    // Tokens
    Identifier,
    StringLiteral,
    Other,
}

impl NodeKind {
    /// A named construct a symbol can be declared by.
    pub fn is_declaration(self) -> bool {
        matches!(
            self,
            NodeKind::FunctionDeclaration
                | NodeKind::ClassDeclaration
                | NodeKind::InterfaceDeclaration
                | NodeKind::TypeAliasDeclaration
                | NodeKind::EnumDeclaration
                | NodeKind::ModuleDeclaration
                | NodeKind::VariableDeclaration
                | NodeKind::MethodDeclaration
                | NodeKind::PropertyDeclaration
                | NodeKind::EnumMember
                | NodeKind::ImportSpecifier
                | NodeKind::ExportSpecifier
                | NodeKind::NamespaceImport
                | NodeKind::NamespaceExport
                | NodeKind::ImportClause
        )
    }

    /// A declaration whose members share its deprecation.
    pub fn is_member_container(self) -> bool {
        matches!(
            self,
            NodeKind::ClassDeclaration
                | NodeKind::InterfaceDeclaration
                | NodeKind::EnumDeclaration
                | NodeKind::ModuleDeclaration
        )
    }

    /// A declaration whose body holds locals rather than members.
    pub fn is_local_scope(self) -> bool {
        matches!(
            self,
            NodeKind::FunctionDeclaration
                | NodeKind::MethodDeclaration
                | NodeKind::VariableDeclaration
        )
    }

    /// `import ... from` or `export ... from` statements.
    pub fn is_module_statement(self) -> bool {
        matches!(self, NodeKind::ImportDeclaration | NodeKind::ExportDeclaration)
    }

    /// A binding inside `{ ... }` of an import or export.
    pub fn is_named_binding(self) -> bool {
        matches!(self, NodeKind::ImportSpecifier | NodeKind::ExportSpecifier)
    }
}

/// One node in a [`SourceFile`] arena.
#[derive(Clone, Debug)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    /// Token range, without leading trivia.
    pub range: TextRange,
    /// Start of the leading trivia (end of the previous token).
    pub full_start: TextSize,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Identifier text, or the unquoted value of a string literal.
    pub text: Option<SmolStr>,
    /// `/** ... */` blocks attached to this node by the parser.
    pub js_doc: Vec<TextRange>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, range: TextRange) -> Self {
        Self {
            kind,
            range,
            full_start: range.start(),
            parent: None,
            children: Vec::new(),
            text: None,
            js_doc: Vec::new(),
        }
    }
}

/// A parsed module. Node `0` is the [`NodeKind::SourceFile`] root.
#[derive(Clone, Debug)]
pub struct SourceFile {
    file: FileId,
    path: Arc<str>,
    text: Arc<str>,
    nodes: Vec<SyntaxNode>,
}

impl SourceFile {
    /// Assemble a file from an already linked arena.
    ///
    /// Parent/child links must be consistent and node `0` must be the root.
    pub fn from_parts(
        file: FileId,
        path: impl Into<Arc<str>>,
        text: impl Into<Arc<str>>,
        nodes: Vec<SyntaxNode>,
    ) -> Self {
        Self {
            file,
            path: path.into(),
            text: text.into(),
            nodes,
        }
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    pub fn node(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.nodes.get(id.index())
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node(id).map(|n| n.kind)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Strict ancestors of `id`, innermost first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&n| self.parent(n))
    }

    /// `id` and everything below it, in pre-order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    /// Identifier text or unquoted string literal value.
    pub fn text_of(&self, id: NodeId) -> Option<&str> {
        self.node(id)?.text.as_deref()
    }

    /// The source text covered by a node's token range.
    pub fn source_text(&self, id: NodeId) -> Option<&str> {
        let range = self.node(id)?.range;
        self.text
            .get(usize::from(range.start())..usize::from(range.end()))
    }

    fn identifier_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.kind(c) == Some(NodeKind::Identifier))
    }

    /// The name identifier of a declaration or binding.
    ///
    /// For `a as b` specifiers this is `b`, the name the binding introduces.
    pub fn name_of(&self, id: NodeId) -> Option<NodeId> {
        let kind = self.kind(id)?;
        if kind.is_named_binding() {
            self.identifier_children(id).last()
        } else if kind.is_declaration() {
            self.identifier_children(id).next()
        } else {
            None
        }
    }

    /// The `a` of an `a as b` specifier, if the binding is renamed.
    pub fn property_name_of(&self, id: NodeId) -> Option<NodeId> {
        if !self.kind(id)?.is_named_binding() {
            return None;
        }
        let mut idents = self.identifier_children(id);
        let first = idents.next()?;
        idents.next().map(|_| first)
    }

    /// The name a binding refers to on the exporting side.
    pub fn imported_name_of(&self, id: NodeId) -> Option<&str> {
        let node = self.property_name_of(id).or_else(|| self.name_of(id))?;
        self.text_of(node)
    }

    /// The string literal after `from` in an import/export statement.
    pub fn module_specifier(&self, stmt: NodeId) -> Option<NodeId> {
        if !self.kind(stmt)?.is_module_statement() {
            return None;
        }
        self.children(stmt)
            .iter()
            .copied()
            .find(|&c| self.kind(c) == Some(NodeKind::StringLiteral))
    }

    /// Import/export specifiers inside the statement's `{ ... }` list.
    pub fn named_bindings(&self, stmt: NodeId) -> Vec<NodeId> {
        let list_kind = match self.kind(stmt) {
            Some(NodeKind::ImportDeclaration) => NodeKind::NamedImports,
            Some(NodeKind::ExportDeclaration) => NodeKind::NamedExports,
            _ => return Vec::new(),
        };
        self.descendants(stmt)
            .into_iter()
            .filter(|&n| self.kind(n) == Some(list_kind))
            .flat_map(|list| self.children(list).to_vec())
            .filter(|&n| self.kind(n).is_some_and(NodeKind::is_named_binding))
            .collect()
    }

    /// `export * from "..."` (without an `as ns` clause).
    pub fn is_wildcard_export(&self, stmt: NodeId) -> bool {
        self.kind(stmt) == Some(NodeKind::ExportDeclaration)
            && self.module_specifier(stmt).is_some()
            && !self.children(stmt).iter().any(|&c| {
                matches!(
                    self.kind(c),
                    Some(NodeKind::NamedExports | NodeKind::NamespaceExport)
                )
            })
    }

    /// The innermost node whose token range contains `offset`.
    pub fn node_at_offset(&self, offset: TextSize) -> Option<NodeId> {
        let mut current = self.root();
        if !self.node(current)?.range.contains_inclusive(offset) {
            return None;
        }
        'descend: loop {
            for &child in self.children(current) {
                if self.node(child).is_some_and(|n| n.range.contains(offset)) {
                    current = child;
                    continue 'descend;
                }
            }
            return Some(current);
        }
    }
}
