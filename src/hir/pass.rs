//! One analysis pass.
//!
//! A [`DeprecationPass`] owns every cache the analysis uses. Entry points
//! build a fresh pass and drop it when they return, so nothing learned while
//! analysing one request can leak into the next one.
//!
//! The methods are split by concern: traversal and the deprecation fact live
//! here, the alias walker in `alias_chain`, the import/export engine in
//! `imports`.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use text_size::TextSize;

use super::alias_chain::DeprecatedOrigin;
use super::comments::{comments_of, contains_marker, reason_after_marker};
use super::diagnostics::{Diagnostic, RelatedInformation};
use super::imports::{BindingHit, WildcardHit};
use super::program::{Declaration, Program};
use super::resolver::SymbolResolver;
use crate::base::{FileId, NodeId, NodeRef, SymbolId};
use crate::config::Config;
use crate::error::{AnalysisError, Result};
use crate::syntax::{NodeKind, SourceFile};

/// Deprecation found for the identifier under a position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deprecation {
    /// The symbol the identifier refers to.
    pub symbol: SymbolId,
    pub origin: DeprecatedOrigin,
    /// Text after the marker on the deprecated declaration.
    pub reason: Option<String>,
    /// Name of the deprecated declaration when it is not the symbol's own.
    pub inherited_from: Option<SmolStr>,
}

pub struct DeprecationPass<'p, P: Program + ?Sized> {
    pub(crate) resolver: SymbolResolver<'p, P>,
    pub(crate) config: &'p Config,
    deprecated: FxHashMap<Declaration, bool>,
    pub(crate) statement_hits: FxHashMap<(NodeRef, Option<SymbolId>), Arc<[BindingHit]>>,
    pub(crate) wildcards: FxHashMap<(FileId, SmolStr), Option<WildcardHit>>,
    pub(crate) specifier_nodes: FxHashMap<(NodeRef, SmolStr), Option<NodeId>>,
}

impl<'p, P: Program + ?Sized> DeprecationPass<'p, P> {
    pub fn new(program: &'p P, config: &'p Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            resolver: SymbolResolver::new(program),
            config,
            deprecated: FxHashMap::default(),
            statement_hits: FxHashMap::default(),
            wildcards: FxHashMap::default(),
            specifier_nodes: FxHashMap::default(),
        })
    }

    pub fn resolver(&mut self) -> &mut SymbolResolver<'p, P> {
        &mut self.resolver
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    /// Whether `decl` carries the marker in its own comments; memoized.
    pub fn is_deprecated(&mut self, decl: Declaration) -> bool {
        if let Some(&known) = self.deprecated.get(&decl) {
            return known;
        }
        let comments = comments_of(&mut self.resolver, decl);
        let deprecated = contains_marker(&comments, &self.config.marker);
        self.deprecated.insert(decl, deprecated);
        deprecated
    }

    pub fn deprecation_reason(&mut self, decl: Declaration) -> Option<String> {
        let comments = comments_of(&mut self.resolver, decl);
        reason_after_marker(&comments, &self.config.marker)
    }

    // ------------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------------

    /// Deprecation diagnostics for every usage in `file`, in source order.
    pub fn check_file(&mut self, file: FileId) -> Result<Vec<Diagnostic>> {
        let source = self
            .resolver
            .source_file(file)
            .ok_or(AnalysisError::UnknownFile(file))?;
        self.check_subtree(NodeRef::new(file, source.root()))
    }

    /// Deprecation diagnostics for the usages below (and at) `at`.
    pub fn check_subtree(&mut self, at: NodeRef) -> Result<Vec<Diagnostic>> {
        let source = self
            .resolver
            .source_file(at.file)
            .ok_or(AnalysisError::UnknownFile(at.file))?;
        if source.node(at.node).is_none() {
            return Err(AnalysisError::UnknownNode {
                file: at.file,
                node: at.node,
            });
        }
        tracing::debug!(file = source.path(), "deprecation pass started");

        let diagnostics = self.check_node(&source, at.node, 0);

        let stats = self.resolver.stats();
        tracing::debug!(
            file = source.path(),
            diagnostics = diagnostics.len(),
            cache_hits = stats.hits,
            cache_misses = stats.misses,
            "deprecation pass finished"
        );
        Ok(diagnostics)
    }

    fn check_node(&mut self, source: &SourceFile, node: NodeId, depth: u32) -> Vec<Diagnostic> {
        if depth > self.config.max_traversal_depth {
            tracing::warn!(
                file = source.path(),
                ?node,
                max_depth = self.config.max_traversal_depth,
                "syntax tree too deep, subtree skipped"
            );
            return Vec::new();
        }
        let Some(kind) = source.kind(node) else {
            return Vec::new();
        };

        if kind.is_module_statement() && source.module_specifier(node).is_some() {
            if kind == NodeKind::ImportDeclaration && !self.config.report_import_specifiers {
                return Vec::new();
            }
            return self.resolve_import_deprecation(NodeRef::new(source.file(), node), None);
        }
        if kind == NodeKind::Identifier {
            return self.check_identifier(source, node);
        }

        source
            .children(node)
            .iter()
            .flat_map(|&child| self.check_node(source, child, depth + 1))
            .collect()
    }

    fn check_identifier(&mut self, source: &SourceFile, ident: NodeId) -> Vec<Diagnostic> {
        if is_declaration_name(source, ident) {
            return Vec::new();
        }
        let usage = NodeRef::new(source.file(), ident);
        let Some(name) = source.text_of(ident) else {
            return Vec::new();
        };
        match self.origin_of_usage(usage) {
            Some((_, origin)) => vec![self.usage_diagnostic(usage, name, origin.declaration)],
            None => Vec::new(),
        }
    }

    /// The symbol at `usage` and where its deprecation comes from.
    ///
    /// The alias walk runs first; for import aliases it cannot see through,
    /// the import statement is resolved again for just that binding.
    fn origin_of_usage(&mut self, usage: NodeRef) -> Option<(SymbolId, DeprecatedOrigin)> {
        let symbol = self.resolver.symbol_at(usage)?;
        if let Some(origin) = self.deprecated_origin_with_containers(symbol) {
            return Some((symbol, origin));
        }
        if !self.resolver.is_alias(symbol) {
            return None;
        }
        let stmt = self.binding_statement(symbol)?;
        let hits = self.binding_hits(stmt, Some(symbol));
        hits.first().map(|hit| (symbol, hit.origin))
    }

    /// The import/export statement declaring the alias `symbol`.
    fn binding_statement(&mut self, symbol: SymbolId) -> Option<NodeRef> {
        let decl = self.resolver.primary_declaration(symbol)?;
        let source = self.resolver.source_file(decl.file)?;
        if !source.kind(decl.node)?.is_named_binding() {
            return None;
        }
        source
            .ancestors(decl.node)
            .find(|&n| source.kind(n).is_some_and(NodeKind::is_module_statement))
            .map(|stmt| NodeRef::new(decl.file, stmt))
    }

    /// Deprecation of whatever the identifier at `offset` refers to.
    pub fn deprecation_at(
        &mut self,
        file: FileId,
        offset: TextSize,
    ) -> Result<Option<Deprecation>> {
        let source = self
            .resolver
            .source_file(file)
            .ok_or(AnalysisError::UnknownFile(file))?;
        let Some(node) = source.node_at_offset(offset) else {
            return Ok(None);
        };
        if source.kind(node) != Some(NodeKind::Identifier) {
            return Ok(None);
        }
        let Some((symbol, origin)) = self.origin_of_usage(NodeRef::new(file, node)) else {
            return Ok(None);
        };

        let reason = self
            .deprecation_reason(origin.declaration)
            .filter(|r| !r.is_empty());
        let own = self.resolver.primary_declaration(origin.symbol);
        let inherited_from = if own == Some(origin.declaration) {
            None
        } else {
            self.declaration_name(origin.declaration)
        };
        Ok(Some(Deprecation {
            symbol,
            origin,
            reason,
            inherited_from,
        }))
    }

    // ------------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------------

    /// `'name' is deprecated.` at `usage`, pointing back at `origin`.
    pub(crate) fn usage_diagnostic(
        &mut self,
        usage: NodeRef,
        name: &str,
        origin: Declaration,
    ) -> Diagnostic {
        let range = self
            .resolver
            .source_file(usage.file)
            .and_then(|source| source.node(usage.node).map(|n| n.range))
            .unwrap_or_default();
        let diag = Diagnostic::deprecated_usage(usage.file, range, name);
        match self.related_at(origin) {
            Some(related) => diag.with_related(related),
            None => diag,
        }
    }

    /// Related information at the name of `decl`, or the whole node.
    fn related_at(&mut self, decl: Declaration) -> Option<RelatedInformation> {
        let source = self.resolver.source_file(decl.file)?;
        let target = source.name_of(decl.node).unwrap_or(decl.node);
        let range = source.node(target)?.range;
        Some(RelatedInformation::deprecated_here(decl.file, range))
    }

    fn declaration_name(&mut self, decl: Declaration) -> Option<SmolStr> {
        let source = self.resolver.source_file(decl.file)?;
        let name = source.name_of(decl.node)?;
        source.text_of(name).map(SmolStr::new)
    }
}

/// `ident` is the name a declaration or binding introduces.
fn is_declaration_name(source: &SourceFile, ident: NodeId) -> bool {
    source.parent(ident).is_some_and(|parent| {
        source.kind(parent).is_some_and(NodeKind::is_declaration)
            && source.name_of(parent) == Some(ident)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{Decl, ProgramBuilder};

    #[test]
    fn test_invalid_config_is_rejected() {
        let program = ProgramBuilder::new().finish();
        let config = Config::new().with_marker("");
        assert!(matches!(
            DeprecationPass::new(&program, &config),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unknown_file_and_node() {
        let mut b = ProgramBuilder::new();
        let a = b.file("src/a.ts");
        let program = b.finish();
        let config = Config::default();
        let mut pass = DeprecationPass::new(&program, &config).unwrap();

        assert!(matches!(
            pass.check_file(FileId::new(9)),
            Err(AnalysisError::UnknownFile(_))
        ));
        assert!(matches!(
            pass.check_subtree(NodeRef::new(a, NodeId::new(10_000))),
            Err(AnalysisError::UnknownNode { .. })
        ));
    }

    #[test]
    fn test_deprecation_fact_is_memoized() {
        let mut b = ProgramBuilder::new();
        let a = b.file("src/a.ts");
        let f = b.declare(a, Decl::function("f").doc("/** @deprecated */"));
        let program = b.finish();
        let config = Config::default();
        let mut pass = DeprecationPass::new(&program, &config).unwrap();
        let decl = pass.resolver().primary_declaration(f).unwrap();

        assert!(pass.is_deprecated(decl));
        let before = pass.resolver().stats();
        assert!(pass.is_deprecated(decl));
        assert_eq!(pass.resolver().stats(), before);
    }

    #[test]
    fn test_declaration_names_are_not_usages() {
        let mut b = ProgramBuilder::new();
        let a = b.file("src/a.ts");
        b.declare(a, Decl::function("f").doc("/** @deprecated */"));
        let program = b.finish();
        let config = Config::default();
        let mut pass = DeprecationPass::new(&program, &config).unwrap();

        assert!(pass.check_file(a).unwrap().is_empty());
    }

    #[test]
    fn test_depth_cap_skips_deep_subtrees() {
        let mut b = ProgramBuilder::new();
        let a = b.file("src/a.ts");
        b.declare(a, Decl::function("f").doc("/** @deprecated */"));
        b.call(a, "f");
        let program = b.finish();

        let config = Config::default();
        let mut pass = DeprecationPass::new(&program, &config).unwrap();
        assert_eq!(pass.check_file(a).unwrap().len(), 1);

        // SourceFile > ExpressionStatement > CallExpression > Identifier
        let shallow = Config::new().with_max_traversal_depth(2);
        let mut pass = DeprecationPass::new(&program, &shallow).unwrap();
        assert!(pass.check_file(a).unwrap().is_empty());
    }

    #[test]
    fn test_reason_and_inherited_name_for_hover() {
        let mut b = ProgramBuilder::new();
        let a = b.file("src/a.ts");
        b.declare(
            a,
            Decl::class("Old")
                .doc("/** @deprecated Use New */")
                .member(Decl::method("run")),
        );
        let usage = b.member_access(a, "Old", "run");
        let program = b.finish();
        let config = Config::default();
        let mut pass = DeprecationPass::new(&program, &config).unwrap();

        let offset = program.source_file(a).unwrap().node(usage).unwrap().range.start();
        let found = pass.deprecation_at(a, offset).unwrap().unwrap();

        assert_eq!(found.reason.as_deref(), Some("Use New"));
        assert_eq!(found.inherited_from.as_deref(), Some("Old"));
    }
}
