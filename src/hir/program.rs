//! The parser/type-checker oracle.
//!
//! Everything this crate knows about source code comes through [`Program`].
//! All queries are pure reads; absence is reported as `None` or an empty
//! vector, never as an error.

use std::sync::Arc;

use smol_str::SmolStr;
use text_size::TextSize;

use crate::base::{FileId, NodeId, NodeRef, SymbolId};
use crate::syntax::{CommentRange, SourceFile};

/// Name of the synthetic export entry that stands for `export * from` forwarding.
pub const WILDCARD_EXPORT_NAME: &str = "__export";

/// A declaring node of a symbol.
pub type Declaration = NodeRef;

/// Outcome of resolving a module specifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedModule {
    pub file: FileId,
    /// The resolver found the module through a package (`node_modules`) lookup.
    pub is_external_library_import: bool,
}

impl ResolvedModule {
    pub fn first_party(file: FileId) -> Self {
        Self {
            file,
            is_external_library_import: false,
        }
    }

    pub fn external(file: FileId) -> Self {
        Self {
            file,
            is_external_library_import: true,
        }
    }
}

/// How bare and relative specifiers are resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModuleResolutionKind {
    /// Relative files only; directories are not resolved to `index` files.
    Classic,
    /// Relative files, directory `index` files and `node_modules` packages.
    #[default]
    Node,
}

/// The subset of compiler options the analysis looks at.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompilerOptions {
    /// When set, modules outside this directory are not first-party.
    pub root_dir: Option<SmolStr>,
    pub module_resolution: ModuleResolutionKind,
}

/// The host's program: parsed files plus the type-checker's symbol queries.
pub trait Program {
    /// Parse result for a file.
    fn source_file(&self, file: FileId) -> Option<Arc<SourceFile>>;

    /// Look a file up by its exact path.
    fn file_by_path(&self, path: &str) -> Option<FileId>;

    /// Resolve `specifier` as written in `containing_file`.
    fn resolve_module(&self, specifier: &str, containing_file: FileId) -> Option<ResolvedModule>;

    /// The symbol standing for a module as a whole.
    fn module_symbol(&self, file: FileId) -> Option<SymbolId>;

    fn symbol_at_location(&self, file: FileId, node: NodeId) -> Option<SymbolId>;

    /// Exported symbols of a module symbol, including the synthetic
    /// [`WILDCARD_EXPORT_NAME`] entry when the module has `export *` statements.
    fn exports_of_module(&self, module: SymbolId) -> Vec<SymbolId>;

    /// The symbol an alias refers to, one hop. `None` for non-aliases.
    fn aliased_symbol(&self, symbol: SymbolId) -> Option<SymbolId>;

    fn is_alias(&self, symbol: SymbolId) -> bool;

    fn symbol_name(&self, symbol: SymbolId) -> Option<SmolStr>;

    /// Declaring nodes, primary declaration first.
    fn declarations_of_symbol(&self, symbol: SymbolId) -> Vec<Declaration>;

    /// Comments in the trivia that starts at `pos`.
    fn leading_comment_ranges(&self, file: FileId, pos: TextSize) -> Vec<CommentRange>;

    fn compiler_options(&self) -> &CompilerOptions;
}
