//! A baseline [`LanguageService`] over a [`MemoryProgram`].
//!
//! Stands in for the host: diagnostics are whatever was seeded, hover and
//! navigation resolve aliases to their final target and read its doc block,
//! which is what a checker-backed service shows.

use rustc_hash::FxHashMap;
use text_size::TextSize;

use super::program::MemoryProgram;
use crate::base::{FileId, NodeRef, SymbolId};
use crate::hir::{Diagnostic, Program};
use crate::ide::{
    DefinitionInfo, DisplayPart, HoverInfo, JsDocTagInfo, LanguageService, ReferenceEntry,
};
use crate::syntax::{NodeKind, SourceFile};

#[derive(Debug, Clone)]
pub struct MemoryService {
    program: MemoryProgram,
    semantic: FxHashMap<FileId, Vec<Diagnostic>>,
    suggestions: FxHashMap<FileId, Vec<Diagnostic>>,
    syntactic: FxHashMap<FileId, Vec<Diagnostic>>,
}

impl MemoryService {
    pub fn new(program: MemoryProgram) -> Self {
        Self {
            program,
            semantic: FxHashMap::default(),
            suggestions: FxHashMap::default(),
            syntactic: FxHashMap::default(),
        }
    }

    pub fn with_semantic_diagnostic(mut self, diag: Diagnostic) -> Self {
        self.semantic.entry(diag.file).or_default().push(diag);
        self
    }

    pub fn with_suggestion_diagnostic(mut self, diag: Diagnostic) -> Self {
        self.suggestions.entry(diag.file).or_default().push(diag);
        self
    }

    pub fn with_syntactic_diagnostic(mut self, diag: Diagnostic) -> Self {
        self.syntactic.entry(diag.file).or_default().push(diag);
        self
    }

    /// The identifier at `offset` and the symbol it finally refers to.
    fn target_at(&self, file: FileId, offset: TextSize) -> Option<(NodeRef, SymbolId)> {
        let source = self.program.source_file(file)?;
        let node = source.node_at_offset(offset)?;
        if source.kind(node) != Some(NodeKind::Identifier) {
            return None;
        }
        let symbol = self.program.symbol_at_location(file, node)?;
        Some((NodeRef::new(file, node), self.program.resolve_alias_fully(symbol)))
    }
}

fn kind_name(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::FunctionDeclaration => "function",
        NodeKind::ClassDeclaration => "class",
        NodeKind::InterfaceDeclaration => "interface",
        NodeKind::TypeAliasDeclaration => "type",
        NodeKind::EnumDeclaration => "enum",
        NodeKind::ModuleDeclaration => "module",
        NodeKind::VariableDeclaration => "const",
        NodeKind::MethodDeclaration => "method",
        NodeKind::PropertyDeclaration => "property",
        NodeKind::EnumMember => "enum member",
        NodeKind::SourceFile => "module",
        _ => "alias",
    }
}

/// Split the attached doc blocks of a declaration into text and `@tags`.
fn doc_of(source: &SourceFile, decl: NodeRef) -> (Vec<DisplayPart>, Vec<JsDocTagInfo>) {
    let host = match source.kind(decl.node) {
        Some(NodeKind::VariableDeclaration) => source
            .ancestors(decl.node)
            .find(|&n| source.kind(n) == Some(NodeKind::VariableStatement))
            .unwrap_or(decl.node),
        _ => decl.node,
    };
    let Some(node) = source.node(host) else {
        return (Vec::new(), Vec::new());
    };

    let mut documentation = Vec::new();
    let mut tags: Vec<JsDocTagInfo> = Vec::new();
    for range in &node.js_doc {
        let Some(block) = source
            .text()
            .get(usize::from(range.start())..usize::from(range.end()))
        else {
            continue;
        };
        let body = block.trim_start_matches("/**").trim_end_matches("*/");
        for line in body.lines() {
            let line = line.trim();
            let line = line.strip_prefix('*').unwrap_or(line).trim();
            if line.is_empty() {
                continue;
            }
            if let Some(tag) = line.strip_prefix('@') {
                let (name, text) = tag.split_once(char::is_whitespace).unwrap_or((tag, ""));
                let text = text.trim();
                tags.push(JsDocTagInfo {
                    name: name.to_string(),
                    text: if text.is_empty() {
                        Vec::new()
                    } else {
                        vec![DisplayPart::text(text)]
                    },
                });
            } else if let Some(last) = tags.last_mut() {
                last.text.push(DisplayPart::text(line));
            } else {
                documentation.push(DisplayPart::text(line));
            }
        }
    }
    (documentation, tags)
}

impl LanguageService for MemoryService {
    type Program = MemoryProgram;

    fn program(&self) -> Option<&MemoryProgram> {
        Some(&self.program)
    }

    fn hover(&self, file: FileId, offset: TextSize) -> Option<HoverInfo> {
        let (usage, target) = self.target_at(file, offset)?;
        let source = self.program.source_file(file)?;
        let ident = source.node(usage.node)?;

        let decl = self.program.declarations_of_symbol(target).first().copied();
        let (kind, documentation, tags) = match decl {
            Some(decl) => {
                let decl_source = self.program.source_file(decl.file)?;
                let kind = decl_source.kind(decl.node).map_or("alias", kind_name);
                let (documentation, tags) = doc_of(&decl_source, decl);
                (kind, documentation, tags)
            }
            None => ("alias", Vec::new(), Vec::new()),
        };

        Some(HoverInfo {
            kind: kind.to_string(),
            name: ident.text.as_deref().unwrap_or_default().to_string(),
            text_span: ident.range,
            documentation,
            tags,
        })
    }

    fn semantic_diagnostics(&self, file: FileId) -> Vec<Diagnostic> {
        self.semantic.get(&file).cloned().unwrap_or_default()
    }

    fn suggestion_diagnostics(&self, file: FileId) -> Vec<Diagnostic> {
        self.suggestions.get(&file).cloned().unwrap_or_default()
    }

    fn syntactic_diagnostics(&self, file: FileId) -> Vec<Diagnostic> {
        self.syntactic.get(&file).cloned().unwrap_or_default()
    }

    fn definition_at(&self, file: FileId, offset: TextSize) -> Vec<DefinitionInfo> {
        let Some((_, target)) = self.target_at(file, offset) else {
            return Vec::new();
        };
        self.program
            .declarations_of_symbol(target)
            .into_iter()
            .filter_map(|decl| {
                let source = self.program.source_file(decl.file)?;
                let name = source.name_of(decl.node).unwrap_or(decl.node);
                Some(DefinitionInfo {
                    file: decl.file,
                    text_span: source.node(name)?.range,
                    name: source.text_of(name).unwrap_or_default().to_string(),
                    kind: source.kind(decl.node).map_or("alias", kind_name).to_string(),
                })
            })
            .collect()
    }

    fn references_at(&self, file: FileId, offset: TextSize) -> Vec<ReferenceEntry> {
        let Some((_, target)) = self.target_at(file, offset) else {
            return Vec::new();
        };
        let declared: Vec<NodeRef> = self.program.declarations_of_symbol(target);

        let mut entries = Vec::new();
        for candidate in self.program.files() {
            let Some(source) = self.program.source_file(candidate) else {
                continue;
            };
            for node in source.descendants(source.root()) {
                if source.kind(node) != Some(NodeKind::Identifier) {
                    continue;
                }
                let Some(symbol) = self.program.symbol_at_location(candidate, node) else {
                    continue;
                };
                if self.program.resolve_alias_fully(symbol) != target {
                    continue;
                }
                let is_definition = source
                    .parent(node)
                    .is_some_and(|p| declared.contains(&NodeRef::new(candidate, p)));
                if let Some(n) = source.node(node) {
                    entries.push(ReferenceEntry {
                        file: candidate,
                        text_span: n.range,
                        is_definition,
                    });
                }
            }
        }
        entries
    }
}
