//! Building a [`MemoryProgram`] statement by statement.
//!
//! Every call appends TypeScript source text to a file and records the
//! symbols the statement binds, so offsets in tests always point at real
//! text:
//!
//! ```ignore
//! let mut b = ProgramBuilder::new();
//! let a = b.file("src/a.ts");
//! b.declare(a, Decl::function("f").doc("/** @deprecated Use g instead */").exported());
//! let c = b.file("src/c.ts");
//! b.import(c, "./a", &["f"]);
//! b.call(c, "f");
//! let program = b.finish();
//! ```
//!
//! # Panics
//!
//! Methods taking a [`FileId`] panic when it was not returned by
//! [`ProgramBuilder::file`] on the same builder.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::program::{AliasTarget, Binding, FileData, MemoryProgram, SymbolData, SymbolKind};
use crate::base::{FileId, NodeId, NodeRef, SymbolId};
use crate::hir::{CompilerOptions, WILDCARD_EXPORT_NAME};
use crate::syntax::{NodeKind, SourceFileBuilder};

/// What a [`Decl`] declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclKind {
    Function,
    Class,
    Interface,
    TypeAlias,
    Variable,
    Enum,
    Namespace,
    Method,
    Property,
    EnumMember,
}

/// A declaration to emit.
#[derive(Clone, Debug)]
pub struct Decl {
    kind: DeclKind,
    name: SmolStr,
    docs: Vec<String>,
    exported: bool,
    default_export: bool,
    members: Vec<Decl>,
    uses: Vec<SmolStr>,
}

impl Decl {
    pub fn new(kind: DeclKind, name: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            name: name.into(),
            docs: Vec::new(),
            exported: false,
            default_export: false,
            members: Vec::new(),
            uses: Vec::new(),
        }
    }

    pub fn function(name: impl Into<SmolStr>) -> Self {
        Self::new(DeclKind::Function, name)
    }

    pub fn class(name: impl Into<SmolStr>) -> Self {
        Self::new(DeclKind::Class, name)
    }

    pub fn interface(name: impl Into<SmolStr>) -> Self {
        Self::new(DeclKind::Interface, name)
    }

    pub fn type_alias(name: impl Into<SmolStr>) -> Self {
        Self::new(DeclKind::TypeAlias, name)
    }

    pub fn variable(name: impl Into<SmolStr>) -> Self {
        Self::new(DeclKind::Variable, name)
    }

    pub fn enumeration(name: impl Into<SmolStr>) -> Self {
        Self::new(DeclKind::Enum, name)
    }

    pub fn namespace(name: impl Into<SmolStr>) -> Self {
        Self::new(DeclKind::Namespace, name)
    }

    pub fn method(name: impl Into<SmolStr>) -> Self {
        Self::new(DeclKind::Method, name)
    }

    pub fn property(name: impl Into<SmolStr>) -> Self {
        Self::new(DeclKind::Property, name)
    }

    pub fn enum_member(name: impl Into<SmolStr>) -> Self {
        Self::new(DeclKind::EnumMember, name)
    }

    /// A comment on its own line before the declaration; `/** */` blocks are
    /// also attached as doc comments.
    pub fn doc(mut self, comment: impl Into<String>) -> Self {
        self.docs.push(comment.into());
        self
    }

    pub fn exported(mut self) -> Self {
        self.exported = true;
        self
    }

    /// `export default`; only meaningful for functions and classes.
    pub fn default_export(mut self) -> Self {
        self.exported = true;
        self.default_export = true;
        self
    }

    /// A member, or a local when `self` is a function or method.
    pub fn member(mut self, member: Decl) -> Self {
        self.members.push(member);
        self
    }

    /// A `name;` statement in the body of a function or method, after its
    /// locals. Binds to the local of that name when there is one.
    pub fn uses(mut self, name: impl Into<SmolStr>) -> Self {
        self.uses.push(name.into());
        self
    }

    fn has_body(&self) -> bool {
        match self.kind {
            DeclKind::Class | DeclKind::Interface | DeclKind::Enum | DeclKind::Namespace => true,
            DeclKind::Function | DeclKind::Method => {
                !self.members.is_empty() || !self.uses.is_empty()
            }
            _ => false,
        }
    }
}

struct PendingFile {
    path: SmolStr,
    text: SourceFileBuilder,
    module: SymbolId,
    wildcard: Option<SymbolId>,
    locals: IndexMap<SmolStr, SymbolId>,
    exports: IndexMap<SmolStr, SymbolId>,
    bindings: FxHashMap<NodeId, Binding>,
}

#[derive(Default)]
pub struct ProgramBuilder {
    files: Vec<PendingFile>,
    symbols: Vec<SymbolData>,
    options: CompilerOptions,
}

/// `"a as b"` → (`a`, `Some(b)`), `"a"` → (`a`, `None`).
fn split_rename(spec: &str) -> (&str, Option<&str>) {
    match spec.split_once(" as ") {
        Some((name, alias)) => (name.trim(), Some(alias.trim())),
        None => (spec.trim(), None),
    }
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&mut self, options: CompilerOptions) -> &mut Self {
        self.options = options;
        self
    }

    /// Start a new, empty module.
    pub fn file(&mut self, path: &str) -> FileId {
        let file = FileId::new(self.files.len() as u32);
        let module =
            self.new_symbol(SymbolData::new(format!("\"{path}\""), SymbolKind::Module(file)));
        self.files.push(PendingFile {
            path: SmolStr::new(path),
            text: SourceFileBuilder::new(file, path),
            module,
            wildcard: None,
            locals: IndexMap::new(),
            exports: IndexMap::new(),
            bindings: FxHashMap::default(),
        });
        file
    }

    fn new_symbol(&mut self, data: SymbolData) -> SymbolId {
        let id = SymbolId::new(self.symbols.len() as u32);
        self.symbols.push(data);
        id
    }

    fn pending(&mut self, file: FileId) -> &mut PendingFile {
        &mut self.files[file.index() as usize]
    }

    fn bind(&mut self, file: FileId, node: NodeId, binding: Binding) {
        self.pending(file).bindings.insert(node, binding);
    }

    fn declared_at(&mut self, symbol: SymbolId, file: FileId, node: NodeId) {
        self.symbols[symbol.index()]
            .declarations
            .push(NodeRef::new(file, node));
    }

    /// Append an ordinary comment line.
    pub fn comment(&mut self, file: FileId, text: &str) {
        let t = &mut self.pending(file).text;
        t.trivia(text);
        t.newline();
    }

    /// Append a blank line.
    pub fn blank_line(&mut self, file: FileId) {
        self.pending(file).text.newline();
    }

    // ------------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------------

    /// Emit a module-level declaration; returns its symbol.
    pub fn declare(&mut self, file: FileId, decl: Decl) -> SymbolId {
        let symbol = self.emit_decl(file, &decl, 0);
        let pending = self.pending(file);
        pending.locals.insert(decl.name.clone(), symbol);
        if decl.default_export {
            pending.exports.insert(SmolStr::new_static("default"), symbol);
        } else if decl.exported {
            pending.exports.insert(decl.name.clone(), symbol);
        }
        symbol
    }

    fn emit_decl(&mut self, file: FileId, decl: &Decl, indent: usize) -> SymbolId {
        let symbol = self.new_symbol(SymbolData::new(decl.name.clone(), SymbolKind::Plain));
        let pad = " ".repeat(indent);

        let t = &mut self.pending(file).text;
        for doc in &decl.docs {
            t.trivia(&pad);
            t.doc_comment(doc);
        }
        t.trivia(&pad);

        let (kind, keyword) = match decl.kind {
            DeclKind::Function => (NodeKind::FunctionDeclaration, Some("function")),
            DeclKind::Class => (NodeKind::ClassDeclaration, Some("class")),
            DeclKind::Interface => (NodeKind::InterfaceDeclaration, Some("interface")),
            DeclKind::TypeAlias => (NodeKind::TypeAliasDeclaration, Some("type")),
            DeclKind::Variable => (NodeKind::VariableStatement, Some("const")),
            DeclKind::Enum => (NodeKind::EnumDeclaration, Some("enum")),
            DeclKind::Namespace => (NodeKind::ModuleDeclaration, Some("namespace")),
            DeclKind::Method => (NodeKind::MethodDeclaration, None),
            DeclKind::Property => (NodeKind::PropertyDeclaration, None),
            DeclKind::EnumMember => (NodeKind::EnumMember, None),
        };

        let outer = t.start_node(kind);
        if decl.exported {
            t.keyword("export");
            t.space();
            if decl.default_export {
                t.keyword("default");
                t.space();
            }
        }
        if let Some(keyword) = keyword {
            t.keyword(keyword);
            t.space();
        }

        let declaration = if decl.kind == DeclKind::Variable {
            t.start_node(NodeKind::VariableDeclarationList);
            let node = t.start_node(NodeKind::VariableDeclaration);
            let name = t.token(NodeKind::Identifier, &decl.name);
            t.keyword(" = 1");
            t.finish_node();
            t.finish_node();
            t.keyword(";");
            t.finish_node();
            t.newline();
            self.bind(file, name, Binding::Symbol(symbol));
            node
        } else {
            let name = t.token(NodeKind::Identifier, &decl.name);
            match decl.kind {
                DeclKind::Function | DeclKind::Method if decl.has_body() => t.keyword("()"),
                DeclKind::Function | DeclKind::Method => t.keyword("() {}"),
                DeclKind::TypeAlias => t.keyword(" = number;"),
                DeclKind::Property => t.keyword(": number;"),
                DeclKind::EnumMember => t.keyword(","),
                _ => {}
            }
            self.bind(file, name, Binding::Symbol(symbol));

            if decl.has_body() {
                self.emit_body(file, symbol, decl, indent);
            }
            let t = &mut self.pending(file).text;
            t.finish_node();
            t.newline();
            outer
        };

        self.bind(file, declaration, Binding::Symbol(symbol));
        self.declared_at(symbol, file, declaration);
        symbol
    }

    /// `{ members }` of a container declaration, or `{ locals; uses }` of a
    /// function body.
    fn emit_body(&mut self, file: FileId, container: SymbolId, decl: &Decl, indent: usize) {
        let is_block = matches!(
            decl.kind,
            DeclKind::Namespace | DeclKind::Function | DeclKind::Method
        );
        let t = &mut self.pending(file).text;
        t.space();
        if is_block {
            t.start_node(NodeKind::Block);
        }
        t.keyword("{");
        t.newline();

        for member in &decl.members {
            let symbol = self.emit_decl(file, member, indent + 2);
            self.symbols[container.index()]
                .members
                .insert(member.name.clone(), symbol);
        }
        for used in &decl.uses {
            let t = &mut self.pending(file).text;
            t.trivia(&" ".repeat(indent + 2));
            t.start_node(NodeKind::ExpressionStatement);
            let ident = t.token(NodeKind::Identifier, used);
            t.keyword(";");
            t.finish_node();
            t.newline();
            let binding = match self.symbols[container.index()].members.get(used) {
                Some(&local) => Binding::Symbol(local),
                None => Binding::Local(used.clone()),
            };
            self.bind(file, ident, binding);
        }

        let t = &mut self.pending(file).text;
        t.trivia(&" ".repeat(indent));
        t.keyword("}");
        if is_block {
            t.finish_node();
        }
    }

    // ------------------------------------------------------------------------
    // Module statements
    // ------------------------------------------------------------------------

    /// `import { a, b as c } from "spec"`; one alias per binding.
    pub fn import(&mut self, file: FileId, spec: &str, names: &[&str]) -> Vec<SymbolId> {
        let t = &mut self.pending(file).text;
        t.start_node(NodeKind::ImportDeclaration);
        t.keyword("import");
        t.space();
        t.start_node(NodeKind::ImportClause);
        let aliases = self.named_bindings(file, spec, names, NodeKind::NamedImports, true);
        let t = &mut self.pending(file).text;
        t.finish_node();
        self.finish_from(file, spec);
        aliases
    }

    /// `import name from "spec";`
    pub fn import_default(&mut self, file: FileId, spec: &str, name: &str) -> SymbolId {
        let alias = self.new_symbol(SymbolData::new(
            name,
            SymbolKind::Alias(AliasTarget::Export {
                from: file,
                specifier: spec.into(),
                name: SmolStr::new_static("default"),
            }),
        ));
        let t = &mut self.pending(file).text;
        t.start_node(NodeKind::ImportDeclaration);
        t.keyword("import");
        t.space();
        let clause = t.start_node(NodeKind::ImportClause);
        let ident = t.token(NodeKind::Identifier, name);
        t.finish_node();
        self.finish_from(file, spec);

        self.bind(file, ident, Binding::Symbol(alias));
        self.declared_at(alias, file, clause);
        self.pending(file).locals.insert(name.into(), alias);
        alias
    }

    /// `import * as name from "spec";`
    pub fn import_namespace(&mut self, file: FileId, spec: &str, name: &str) -> SymbolId {
        let alias = self.module_alias(file, spec, name);
        let t = &mut self.pending(file).text;
        t.start_node(NodeKind::ImportDeclaration);
        t.keyword("import");
        t.space();
        t.start_node(NodeKind::ImportClause);
        let node = self.namespace_binding(file, alias, name, NodeKind::NamespaceImport);
        self.pending(file).text.finish_node();
        self.finish_from(file, spec);

        self.declared_at(alias, file, node);
        self.pending(file).locals.insert(name.into(), alias);
        alias
    }

    /// `export { a, b as c } from "spec"`; one alias per binding.
    pub fn export_from(&mut self, file: FileId, spec: &str, names: &[&str]) -> Vec<SymbolId> {
        let t = &mut self.pending(file).text;
        t.start_node(NodeKind::ExportDeclaration);
        t.keyword("export");
        t.space();
        let aliases = self.named_bindings(file, spec, names, NodeKind::NamedExports, false);
        self.finish_from(file, spec);
        aliases
    }

    /// `export * from "spec"`; returns the statement node.
    pub fn export_star(&mut self, file: FileId, spec: &str) -> NodeId {
        let t = &mut self.pending(file).text;
        let stmt = t.start_node(NodeKind::ExportDeclaration);
        t.keyword("export");
        t.space();
        t.keyword("*");
        self.finish_from(file, spec);

        let existing = self.pending(file).wildcard;
        let wildcard = match existing {
            Some(wildcard) => wildcard,
            None => {
                let wildcard =
                    self.new_symbol(SymbolData::new(WILDCARD_EXPORT_NAME, SymbolKind::Wildcard));
                self.pending(file).wildcard = Some(wildcard);
                wildcard
            }
        };
        self.declared_at(wildcard, file, stmt);
        stmt
    }

    /// `export * as name from "spec";`
    pub fn export_star_as(&mut self, file: FileId, spec: &str, name: &str) -> SymbolId {
        let alias = self.module_alias(file, spec, name);
        let t = &mut self.pending(file).text;
        t.start_node(NodeKind::ExportDeclaration);
        t.keyword("export");
        t.space();
        let node = self.namespace_binding(file, alias, name, NodeKind::NamespaceExport);
        self.finish_from(file, spec);

        self.declared_at(alias, file, node);
        self.pending(file).exports.insert(name.into(), alias);
        alias
    }

    /// `export { a, b as c };` of module-level names.
    pub fn export_names(&mut self, file: FileId, names: &[&str]) -> Vec<SymbolId> {
        let t = &mut self.pending(file).text;
        t.start_node(NodeKind::ExportDeclaration);
        t.keyword("export");
        t.space();
        t.start_node(NodeKind::NamedExports);
        t.keyword("{");
        t.space();

        let mut aliases = Vec::new();
        for (i, spec) in names.iter().enumerate() {
            let (name, rename) = split_rename(spec);
            let exported = rename.unwrap_or(name);
            let alias = self.new_symbol(SymbolData::new(
                exported,
                SymbolKind::Alias(AliasTarget::Local {
                    file,
                    name: name.into(),
                }),
            ));
            let (node, local, introduced) =
                self.specifier(file, i, name, rename, NodeKind::ExportSpecifier);
            self.bind(file, local, Binding::Local(name.into()));
            if let Some(introduced) = introduced {
                self.bind(file, introduced, Binding::Symbol(alias));
            }
            self.bind(file, node, Binding::Symbol(alias));
            self.declared_at(alias, file, node);
            self.pending(file).exports.insert(exported.into(), alias);
            aliases.push(alias);
        }

        let t = &mut self.pending(file).text;
        t.space();
        t.keyword("}");
        t.finish_node();
        t.keyword(";");
        t.finish_node();
        t.newline();
        aliases
    }

    fn module_alias(&mut self, file: FileId, spec: &str, name: &str) -> SymbolId {
        self.new_symbol(SymbolData::new(
            name,
            SymbolKind::Alias(AliasTarget::Module {
                from: file,
                specifier: spec.into(),
            }),
        ))
    }

    /// `* as name`, inside an open import clause or export statement.
    fn namespace_binding(
        &mut self,
        file: FileId,
        alias: SymbolId,
        name: &str,
        kind: NodeKind,
    ) -> NodeId {
        let t = &mut self.pending(file).text;
        let node = t.start_node(kind);
        t.keyword("*");
        t.space();
        t.keyword("as");
        t.space();
        let ident = t.token(NodeKind::Identifier, name);
        t.finish_node();
        self.bind(file, ident, Binding::Symbol(alias));
        self.bind(file, node, Binding::Symbol(alias));
        node
    }

    /// `{ a, b as c }` with aliases resolving to exports of `spec`.
    fn named_bindings(
        &mut self,
        file: FileId,
        spec: &str,
        names: &[&str],
        list: NodeKind,
        is_import: bool,
    ) -> Vec<SymbolId> {
        let binding_kind = if is_import {
            NodeKind::ImportSpecifier
        } else {
            NodeKind::ExportSpecifier
        };
        let t = &mut self.pending(file).text;
        t.start_node(list);
        t.keyword("{");
        t.space();

        let mut aliases = Vec::new();
        for (i, entry) in names.iter().enumerate() {
            let (name, rename) = split_rename(entry);
            let local_name = rename.unwrap_or(name);
            let alias = self.new_symbol(SymbolData::new(
                local_name,
                SymbolKind::Alias(AliasTarget::Export {
                    from: file,
                    specifier: spec.into(),
                    name: name.into(),
                }),
            ));
            let (node, first, introduced) = self.specifier(file, i, name, rename, binding_kind);
            match introduced {
                Some(introduced) => {
                    self.bind(file, first, Binding::TargetOf(alias));
                    self.bind(file, introduced, Binding::Symbol(alias));
                }
                None => self.bind(file, first, Binding::Symbol(alias)),
            }
            self.bind(file, node, Binding::Symbol(alias));
            self.declared_at(alias, file, node);

            let pending = self.pending(file);
            if is_import {
                pending.locals.insert(local_name.into(), alias);
            } else {
                pending.exports.insert(local_name.into(), alias);
            }
            aliases.push(alias);
        }

        let t = &mut self.pending(file).text;
        t.space();
        t.keyword("}");
        t.finish_node();
        aliases
    }

    /// One `a` or `a as b` specifier; returns (specifier, `a`, `b`).
    fn specifier(
        &mut self,
        file: FileId,
        position: usize,
        name: &str,
        rename: Option<&str>,
        kind: NodeKind,
    ) -> (NodeId, NodeId, Option<NodeId>) {
        let t = &mut self.pending(file).text;
        if position > 0 {
            t.keyword(",");
            t.space();
        }
        let node = t.start_node(kind);
        let first = t.token(NodeKind::Identifier, name);
        let introduced = rename.map(|rename| {
            t.space();
            t.keyword("as");
            t.space();
            t.token(NodeKind::Identifier, rename)
        });
        t.finish_node();
        (node, first, introduced)
    }

    /// ` from "spec";` and close the statement.
    fn finish_from(&mut self, file: FileId, spec: &str) {
        let t = &mut self.pending(file).text;
        t.space();
        t.keyword("from");
        t.space();
        t.string_literal(spec);
        t.keyword(";");
        t.finish_node();
        t.newline();
    }

    // ------------------------------------------------------------------------
    // Usages
    // ------------------------------------------------------------------------

    /// `callee()`; returns the identifier node.
    pub fn call(&mut self, file: FileId, callee: &str) -> NodeId {
        let t = &mut self.pending(file).text;
        t.start_node(NodeKind::ExpressionStatement);
        t.start_node(NodeKind::CallExpression);
        let ident = t.token(NodeKind::Identifier, callee);
        t.keyword("()");
        t.finish_node();
        t.keyword(";");
        t.finish_node();
        t.newline();
        self.bind(file, ident, Binding::Local(callee.into()));
        ident
    }

    /// `object.member`; returns the identifier node of `member`.
    pub fn member_access(&mut self, file: FileId, object: &str, member: &str) -> NodeId {
        let t = &mut self.pending(file).text;
        t.start_node(NodeKind::ExpressionStatement);
        t.start_node(NodeKind::PropertyAccessExpression);
        let target = t.token(NodeKind::Identifier, object);
        t.keyword(".");
        let ident = t.token(NodeKind::Identifier, member);
        t.finish_node();
        t.keyword(";");
        t.finish_node();
        t.newline();
        self.bind(file, target, Binding::Local(object.into()));
        self.bind(
            file,
            ident,
            Binding::Member {
                object: object.into(),
                member: member.into(),
            },
        );
        ident
    }

    pub fn finish(self) -> MemoryProgram {
        let mut paths = IndexMap::new();
        let files = self
            .files
            .into_iter()
            .map(|pending| {
                let source = Arc::new(pending.text.finish());
                paths.insert(pending.path, source.file());
                FileData {
                    source,
                    module: pending.module,
                    wildcard: pending.wildcard,
                    locals: pending.locals,
                    exports: pending.exports,
                    bindings: pending.bindings,
                }
            })
            .collect();
        MemoryProgram {
            files,
            paths,
            symbols: self.symbols,
            options: self.options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::TextSize;
    use crate::hir::Program;

    fn text(program: &MemoryProgram, file: FileId) -> String {
        program.source_file(file).unwrap().text().to_string()
    }

    #[test]
    fn test_emits_declarations() {
        let mut b = ProgramBuilder::new();
        let a = b.file("src/a.ts");
        b.declare(a, Decl::function("f").doc("/** @deprecated Use g instead */").exported());
        b.declare(
            a,
            Decl::class("C")
                .member(Decl::method("m"))
                .member(Decl::property("p")),
        );
        b.declare(a, Decl::variable("x").exported());
        let program = b.finish();

        assert_eq!(
            text(&program, a),
            "/** @deprecated Use g instead */\n\
             export function f() {}\n\
             class C {\n  m() {}\n  p: number;\n}\n\
             export const x = 1;\n"
        );
    }

    #[test]
    fn test_emits_function_body_with_locals() {
        let mut b = ProgramBuilder::new();
        let a = b.file("src/a.ts");
        let f = b.declare(
            a,
            Decl::function("f")
                .member(Decl::variable("x"))
                .uses("x")
                .uses("g"),
        );
        let program = b.finish();

        assert_eq!(
            text(&program, a),
            "function f() {\n  const x = 1;\n  x;\n  g;\n}\n"
        );
        let x = program.member(f, "x").unwrap();
        let source = program.source_file(a).unwrap();
        let usage = source.node_at_offset(TextSize::from(32)).unwrap();
        assert_eq!(source.text_of(usage), Some("x"));
        assert_eq!(program.symbol_at_location(a, usage), Some(x));
    }

    #[test]
    fn test_emits_module_statements() {
        let mut b = ProgramBuilder::new();
        let c = b.file("src/c.ts");
        b.import(c, "./a", &["f", "g as h"]);
        b.import_default(c, "./d", "d");
        b.import_namespace(c, "./n", "ns");
        b.export_from(c, "./a", &["f as k"]);
        b.export_star(c, "./b");
        b.export_star_as(c, "./b", "bb");
        b.export_names(c, &["h"]);
        b.call(c, "f");
        b.member_access(c, "ns", "x");
        let program = b.finish();

        assert_eq!(
            text(&program, c),
            "import { f, g as h } from \"./a\";\n\
             import d from \"./d\";\n\
             import * as ns from \"./n\";\n\
             export { f as k } from \"./a\";\n\
             export * from \"./b\";\n\
             export * as bb from \"./b\";\n\
             export { h };\n\
             f();\n\
             ns.x;\n"
        );
    }

    #[test]
    fn test_declaration_ranges_match_text() {
        let mut b = ProgramBuilder::new();
        let a = b.file("src/a.ts");
        let e = b.declare(
            a,
            Decl::enumeration("E").exported().member(Decl::enum_member("A")),
        );
        let program = b.finish();
        let source = program.source_file(a).unwrap();

        let decl = program.declarations_of_symbol(e)[0];
        assert_eq!(source.source_text(decl.node), Some("export enum E {\n  A,\n}"));

        let member = program.member(e, "A").unwrap();
        let member_decl = program.declarations_of_symbol(member)[0];
        assert_eq!(source.source_text(member_decl.node), Some("A,"));
    }

    #[test]
    fn test_statement_bindings_resolve() {
        let mut b = ProgramBuilder::new();
        let a = b.file("src/a.ts");
        let f = b.declare(a, Decl::function("f").exported());
        let c = b.file("src/c.ts");
        let imported = b.import(c, "./a", &["f as g"]);
        let usage = b.call(c, "g");
        let program = b.finish();

        assert_eq!(program.symbol_at_location(c, usage), Some(imported[0]));
        assert_eq!(program.aliased_symbol(imported[0]), Some(f));
        assert_eq!(program.local(c, "g"), Some(imported[0]));
    }
}
