//! An in-memory [`Program`].
//!
//! Binds names the way a type-checker would for the handful of constructs
//! [`ProgramBuilder`](super::ProgramBuilder) emits: module-level locals and
//! exports, class/enum/namespace members, import and export aliases, and
//! `export *` forwarding. Alias targets are resolved lazily, one hop per
//! [`Program::aliased_symbol`] call, exactly like a checker's alias symbols.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use text_size::TextSize;

use crate::base::{FileId, NodeId, SymbolId, is_relative_specifier, join_path, parent_dir};
use crate::hir::{CompilerOptions, Declaration, ModuleResolutionKind, Program, ResolvedModule};
use crate::syntax::{CommentRange, SourceFile, leading_comment_ranges};

/// What an alias points at, before resolution.
#[derive(Clone, Debug)]
pub(crate) enum AliasTarget {
    /// `import { name }`, `export { name } from`, `import name` (as `default`).
    Export {
        from: FileId,
        specifier: SmolStr,
        name: SmolStr,
    },
    /// `import * as ns`, `export * as ns from`.
    Module { from: FileId, specifier: SmolStr },
    /// `export { name }` of a module-level local.
    Local { file: FileId, name: SmolStr },
}

#[derive(Clone, Debug)]
pub(crate) enum SymbolKind {
    Plain,
    Module(FileId),
    /// The synthetic `__export` entry of a module.
    Wildcard,
    Alias(AliasTarget),
}

#[derive(Clone, Debug)]
pub(crate) struct SymbolData {
    pub name: SmolStr,
    pub kind: SymbolKind,
    pub declarations: Vec<Declaration>,
    /// Class/interface/enum members and namespace contents.
    pub members: IndexMap<SmolStr, SymbolId>,
}

impl SymbolData {
    pub fn new(name: impl Into<SmolStr>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            kind,
            declarations: Vec::new(),
            members: IndexMap::new(),
        }
    }
}

/// How a node maps to a symbol.
#[derive(Clone, Debug)]
pub(crate) enum Binding {
    Symbol(SymbolId),
    /// The `a` of `a as b`: whatever the alias `b` points at.
    TargetOf(SymbolId),
    /// A use of a module-level name.
    Local(SmolStr),
    /// `object.member`.
    Member { object: SmolStr, member: SmolStr },
}

#[derive(Clone, Debug)]
pub(crate) struct FileData {
    pub source: Arc<SourceFile>,
    pub module: SymbolId,
    pub wildcard: Option<SymbolId>,
    pub locals: IndexMap<SmolStr, SymbolId>,
    pub exports: IndexMap<SmolStr, SymbolId>,
    pub bindings: FxHashMap<NodeId, Binding>,
}

/// A program held entirely in memory. Built with
/// [`ProgramBuilder`](super::ProgramBuilder).
#[derive(Clone, Debug)]
pub struct MemoryProgram {
    pub(crate) files: Vec<FileData>,
    pub(crate) paths: IndexMap<SmolStr, FileId>,
    pub(crate) symbols: Vec<SymbolData>,
    pub(crate) options: CompilerOptions,
}

const RELATIVE_SUFFIXES: &[&str] = &["", ".ts", ".tsx", ".d.ts"];
const INDEX_SUFFIXES: &[&str] = &["/index.ts", "/index.tsx", "/index.d.ts"];
const PACKAGE_SUFFIXES: &[&str] = &[".d.ts", "/index.d.ts", ".ts", "/index.ts"];

impl MemoryProgram {
    fn file(&self, file: FileId) -> Option<&FileData> {
        self.files.get(file.index() as usize)
    }

    fn symbol(&self, symbol: SymbolId) -> Option<&SymbolData> {
        self.symbols.get(symbol.index())
    }

    pub fn files(&self) -> impl Iterator<Item = FileId> + '_ {
        (0..self.files.len() as u32).map(FileId::new)
    }

    pub fn path_of(&self, file: FileId) -> Option<&str> {
        self.file(file).map(|f| f.source.path())
    }

    /// A module-level name of `file`: declaration or import.
    pub fn local(&self, file: FileId, name: &str) -> Option<SymbolId> {
        self.file(file)?.locals.get(name).copied()
    }

    /// A member of a class, interface, enum or namespace.
    pub fn member(&self, container: SymbolId, name: &str) -> Option<SymbolId> {
        self.symbol(container)?.members.get(name).copied()
    }

    /// Follow aliases to the end of the chain.
    pub fn resolve_alias_fully(&self, symbol: SymbolId) -> SymbolId {
        let mut visited = FxHashSet::default();
        let mut current = symbol;
        while visited.insert(current) {
            match self.aliased_symbol(current) {
                Some(next) => current = next,
                None => break,
            }
        }
        current
    }

    /// Export `name` of `file`, looking through `export *` statements.
    fn lookup_export(
        &self,
        file: FileId,
        name: &str,
        visited: &mut FxHashSet<FileId>,
    ) -> Option<SymbolId> {
        if !visited.insert(file) {
            return None;
        }
        let data = self.file(file)?;
        if let Some(&symbol) = data.exports.get(name) {
            return Some(symbol);
        }
        // `export *` never forwards a default export
        if name == "default" {
            return None;
        }
        let wildcard = data.wildcard.and_then(|w| self.symbol(w))?;
        wildcard.declarations.iter().find_map(|decl| {
            let spec = data.source.module_specifier(decl.node)?;
            let spec = data.source.text_of(spec)?;
            let target = self.resolve_module(spec, file)?;
            self.lookup_export(target.file, name, visited)
        })
    }

    fn resolve_binding(&self, file: FileId, binding: &Binding) -> Option<SymbolId> {
        match binding {
            Binding::Symbol(symbol) => Some(*symbol),
            Binding::TargetOf(alias) => self.aliased_symbol(*alias),
            Binding::Local(name) => self.local(file, name),
            Binding::Member { object, member } => {
                let object = self.resolve_alias_fully(self.local(file, object)?);
                match self.symbol(object)?.kind {
                    SymbolKind::Module(module) => {
                        self.lookup_export(module, member, &mut FxHashSet::default())
                    }
                    _ => self.member(object, member),
                }
            }
        }
    }

    fn is_external(path: &str) -> bool {
        path.split('/').any(|segment| segment == "node_modules")
    }
}

impl Program for MemoryProgram {
    fn source_file(&self, file: FileId) -> Option<Arc<SourceFile>> {
        self.file(file).map(|f| f.source.clone())
    }

    fn file_by_path(&self, path: &str) -> Option<FileId> {
        self.paths.get(path).copied()
    }

    fn resolve_module(&self, specifier: &str, containing_file: FileId) -> Option<ResolvedModule> {
        let from = self.file(containing_file)?;
        let node_style = self.options.module_resolution == ModuleResolutionKind::Node;

        if is_relative_specifier(specifier) {
            let joined = join_path(parent_dir(from.source.path()), specifier);
            let index: &[&str] = if node_style { INDEX_SUFFIXES } else { &[] };
            let file = RELATIVE_SUFFIXES
                .iter()
                .chain(index)
                .find_map(|suffix| self.file_by_path(&format!("{joined}{suffix}")))?;
            let path = self.path_of(file)?;
            return Some(ResolvedModule {
                file,
                is_external_library_import: Self::is_external(path),
            });
        }

        if !node_style {
            return None;
        }
        PACKAGE_SUFFIXES.iter().find_map(|suffix| {
            let wanted = format!("node_modules/{specifier}{suffix}");
            self.paths
                .iter()
                .find(|(path, _)| path.as_str() == wanted || path.ends_with(&format!("/{wanted}")))
                .map(|(_, &file)| ResolvedModule::external(file))
        })
    }

    fn module_symbol(&self, file: FileId) -> Option<SymbolId> {
        self.file(file).map(|f| f.module)
    }

    fn symbol_at_location(&self, file: FileId, node: NodeId) -> Option<SymbolId> {
        let binding = self.file(file)?.bindings.get(&node)?;
        self.resolve_binding(file, binding)
    }

    fn exports_of_module(&self, module: SymbolId) -> Vec<SymbolId> {
        let Some(data) = self.symbol(module) else {
            return Vec::new();
        };
        match data.kind {
            SymbolKind::Module(file) => self
                .file(file)
                .map(|f| f.exports.values().copied().chain(f.wildcard).collect())
                .unwrap_or_default(),
            _ => data.members.values().copied().collect(),
        }
    }

    fn aliased_symbol(&self, symbol: SymbolId) -> Option<SymbolId> {
        let SymbolKind::Alias(target) = &self.symbol(symbol)?.kind else {
            return None;
        };
        match target {
            AliasTarget::Export {
                from,
                specifier,
                name,
            } => {
                let module = self.resolve_module(specifier, *from)?;
                self.lookup_export(module.file, name, &mut FxHashSet::default())
            }
            AliasTarget::Module { from, specifier } => {
                let module = self.resolve_module(specifier, *from)?;
                self.module_symbol(module.file)
            }
            AliasTarget::Local { file, name } => self.local(*file, name),
        }
    }

    fn is_alias(&self, symbol: SymbolId) -> bool {
        self.symbol(symbol)
            .is_some_and(|s| matches!(s.kind, SymbolKind::Alias(_)))
    }

    fn symbol_name(&self, symbol: SymbolId) -> Option<SmolStr> {
        self.symbol(symbol).map(|s| s.name.clone())
    }

    fn declarations_of_symbol(&self, symbol: SymbolId) -> Vec<Declaration> {
        self.symbol(symbol)
            .map(|s| s.declarations.clone())
            .unwrap_or_default()
    }

    fn leading_comment_ranges(&self, file: FileId, pos: TextSize) -> Vec<CommentRange> {
        self.file(file)
            .map(|f| leading_comment_ranges(f.source.text(), pos))
            .unwrap_or_default()
    }

    fn compiler_options(&self) -> &CompilerOptions {
        &self.options
    }
}
