//! Import/Export Resolution Engine.
//!
//! Resolves the `{ ... }` bindings of `import ... from` and `export ... from`
//! statements to the exporting module's symbols, following `export *`
//! forwarding when the name is not exported directly, and reports bindings
//! whose target (or a container of it) is deprecated. Diagnostics are
//! anchored at the binding in the statement; the deprecated declaration only
//! shows up as related information.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use super::alias_chain::DeprecatedOrigin;
use super::diagnostics::Diagnostic;
use super::pass::DeprecationPass;
use super::program::{Declaration, Program, ResolvedModule, WILDCARD_EXPORT_NAME};
use crate::base::{FileId, NodeId, NodeRef, SymbolId, is_under, join_path, parent_dir};
use crate::syntax::NodeKind;

/// A deprecated binding found in one statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindingHit {
    /// The specifier node in the statement.
    pub anchor: NodeRef,
    /// The name looked up in the exporting module.
    pub name: SmolStr,
    pub origin: DeprecatedOrigin,
}

/// A name found behind `export * from`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct WildcardHit {
    /// The `export *` statement of the queried module the name came through.
    pub declaration: Declaration,
    pub symbol: SymbolId,
}

impl<P: Program + ?Sized> DeprecationPass<'_, P> {
    /// Diagnostics for the named bindings of an import/re-export statement.
    ///
    /// With `target`, only the binding that imports the same name as the
    /// alias `target` is considered. Statements without named bindings
    /// (default, namespace, `export *`) produce nothing.
    pub fn resolve_import_deprecation(
        &mut self,
        stmt: NodeRef,
        target: Option<SymbolId>,
    ) -> Vec<Diagnostic> {
        let hits = self.binding_hits(stmt, target);
        hits.iter()
            .map(|hit| self.usage_diagnostic(hit.anchor, &hit.name, hit.origin.declaration))
            .collect()
    }

    /// Memoized per (statement, target) for the pass.
    pub fn binding_hits(
        &mut self,
        stmt: NodeRef,
        target: Option<SymbolId>,
    ) -> Arc<[BindingHit]> {
        if let Some(hits) = self.statement_hits.get(&(stmt, target)) {
            tracing::trace!(?stmt, ?target, "statement cache hit");
            return hits.clone();
        }
        let hits: Arc<[BindingHit]> = self.resolve_statement(stmt, target).into();
        self.statement_hits.insert((stmt, target), hits.clone());
        hits
    }

    fn resolve_statement(&mut self, stmt: NodeRef, target: Option<SymbolId>) -> Vec<BindingHit> {
        let Some(source) = self.resolver.source_file(stmt.file) else {
            return Vec::new();
        };
        let bindings = source.named_bindings(stmt.node);
        if bindings.is_empty() {
            return Vec::new();
        }
        let Some(specifier) = source
            .module_specifier(stmt.node)
            .and_then(|n| source.text_of(n))
        else {
            return Vec::new();
        };

        let Some(module) = self
            .resolver
            .resolve_module(specifier, stmt.file)
            .and_then(|resolved| self.first_party(resolved))
        else {
            tracing::trace!(specifier, "module skipped");
            return Vec::new();
        };

        let filter = target.and_then(|t| self.filter_name(t));
        let mut hits = Vec::new();
        for binding in bindings {
            let Some(name) = source.imported_name_of(binding).map(SmolStr::new) else {
                continue;
            };
            if filter.as_ref().is_some_and(|f| *f != name) {
                continue;
            }
            let Some(export) = self.find_export(module, &name) else {
                continue;
            };
            let Some(origin) = self.deprecated_origin_with_containers(export) else {
                continue;
            };
            let anchor = if source.node(binding).is_some_and(|n| !n.range.is_empty()) {
                binding
            } else {
                self.specifier_node(stmt, &name).unwrap_or(binding)
            };
            hits.push(BindingHit {
                anchor: NodeRef::new(stmt.file, anchor),
                name,
                origin,
            });
        }
        hits
    }

    /// The name an alias imports, used to pick its binding out of a statement.
    fn filter_name(&mut self, target: SymbolId) -> Option<SmolStr> {
        let decl = self.resolver.primary_declaration(target);
        let imported = decl.and_then(|decl| {
            let source = self.resolver.source_file(decl.file)?;
            source.imported_name_of(decl.node).map(SmolStr::new)
        });
        imported.or_else(|| self.resolver.symbol_name(target))
    }

    /// The export of `module` named `name`, directly or through `export *`.
    pub(crate) fn find_export(&mut self, module: FileId, name: &str) -> Option<SymbolId> {
        if let Some(direct) = self.direct_export(module, name) {
            return Some(direct);
        }
        self.wildcard_export(module, name).map(|hit| hit.symbol)
    }

    fn direct_export(&mut self, module: FileId, name: &str) -> Option<SymbolId> {
        if name == WILDCARD_EXPORT_NAME {
            return None;
        }
        let exports = self.resolver.exports_of_file(module);
        exports
            .iter()
            .copied()
            .find(|&e| self.resolver.symbol_name(e).as_deref() == Some(name))
    }

    /// Search the modules `module` forwards with `export *`.
    ///
    /// Multi-hop chains are followed unless the configuration restricts the
    /// search to one hop. Each module is entered at most once.
    pub(crate) fn wildcard_export(&mut self, module: FileId, name: &str) -> Option<WildcardHit> {
        let key = (module, SmolStr::new(name));
        if let Some(&hit) = self.wildcards.get(&key) {
            return hit;
        }
        let mut visited = FxHashSet::default();
        visited.insert(module);
        let hit = self.search_wildcards(module, name, &mut visited);
        if let Some(hit) = hit {
            tracing::trace!(?module, name, via = ?hit.declaration, "found through export *");
        }
        self.wildcards.insert(key, hit);
        hit
    }

    fn search_wildcards(
        &mut self,
        module: FileId,
        name: &str,
        visited: &mut FxHashSet<FileId>,
    ) -> Option<WildcardHit> {
        let exports = self.resolver.exports_of_file(module);
        let star = exports.iter().copied().find(|&e| {
            self.resolver.symbol_name(e).as_deref() == Some(WILDCARD_EXPORT_NAME)
        })?;

        let forwards = self.resolver.declarations_of(star);
        for &declaration in forwards.iter() {
            let Some(forwarded) = self.resolve_forwarded(declaration) else {
                continue;
            };
            if !visited.insert(forwarded) {
                continue;
            }
            if let Some(symbol) = self.direct_export(forwarded, name) {
                return Some(WildcardHit { declaration, symbol });
            }
            if self.config.transitive_wildcards {
                if let Some(deeper) = self.search_wildcards(forwarded, name, visited) {
                    return Some(WildcardHit {
                        declaration,
                        symbol: deeper.symbol,
                    });
                }
            }
        }
        None
    }

    /// Resolve the specifier of an `export * from` statement.
    ///
    /// Tried in order: the literal text, the text without quotes, trailing
    /// slash or `.js`/`.ts` extension, and finally a path join onto the
    /// directory of the module the statement lives in.
    fn resolve_forwarded(&mut self, declaration: Declaration) -> Option<FileId> {
        let source = self.resolver.source_file(declaration.file)?;
        if !source.is_wildcard_export(declaration.node) {
            return None;
        }
        let spec_node = source.module_specifier(declaration.node)?;
        let literal = source.text_of(spec_node)?;

        if let Some(resolved) = self.resolver.resolve_module(literal, declaration.file) {
            return self.first_party(resolved);
        }

        let raw = source.source_text(spec_node).unwrap_or(literal);
        let normalized = normalize_specifier(raw);
        if normalized != literal {
            if let Some(resolved) = self.resolver.resolve_module(&normalized, declaration.file) {
                return self.first_party(resolved);
            }
        }

        let dir = parent_dir(source.path());
        let joined = join_path(dir, &normalized);
        let program = self.resolver.program();
        let file = std::iter::once(joined.clone())
            .chain(
                self.config
                    .module_extensions
                    .iter()
                    .map(|ext| format!("{joined}{ext}")),
            )
            .find_map(|candidate| program.file_by_path(&candidate))?;
        tracing::trace!(specifier = literal, path = %joined, "forwarded module found by path");
        self.first_party(ResolvedModule::first_party(file))
    }

    /// Keep only modules that belong to the project.
    pub(crate) fn first_party(&mut self, resolved: ResolvedModule) -> Option<FileId> {
        if resolved.is_external_library_import || !self.is_first_party_file(resolved.file) {
            return None;
        }
        Some(resolved.file)
    }

    /// Not vendored, and inside `rootDir` when one is configured.
    pub(crate) fn is_first_party_file(&mut self, file: FileId) -> bool {
        let Some(source) = self.resolver.source_file(file) else {
            return false;
        };
        let path = source.path();
        if self.config.is_vendored_path(path) {
            return false;
        }
        match &self.resolver.program().compiler_options().root_dir {
            Some(root) => is_under(path, root),
            None => true,
        }
    }

    /// The first specifier of `stmt` that imports `name`, for bindings
    /// synthesized without a range; memoized.
    fn specifier_node(&mut self, stmt: NodeRef, name: &str) -> Option<NodeId> {
        let key = (stmt, SmolStr::new(name));
        if let Some(&node) = self.specifier_nodes.get(&key) {
            return node;
        }
        let node = self.resolver.source_file(stmt.file).and_then(|source| {
            source.descendants(stmt.node).into_iter().find(|&n| {
                matches!(
                    source.kind(n),
                    Some(NodeKind::ImportSpecifier | NodeKind::ExportSpecifier)
                ) && source.imported_name_of(n) == Some(name)
            })
        });
        self.specifier_nodes.insert(key, node);
        node
    }
}

/// Strip quotes, a trailing slash and a `.js`/`.ts` extension.
pub(crate) fn normalize_specifier(raw: &str) -> String {
    let mut spec = raw.trim().trim_matches(|c| c == '"' || c == '\'' || c == '`');
    spec = spec.strip_suffix('/').unwrap_or(spec);
    for ext in [".js", ".ts"] {
        if let Some(stripped) = spec.strip_suffix(ext) {
            spec = stripped;
            break;
        }
    }
    spec.to_string()
}
