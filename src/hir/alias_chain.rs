//! Alias-Chain Walker.
//!
//! `import { b } from "./m"` gives `b` an alias symbol; `m` may itself alias
//! `export { a as b } from "./n"`, and so on. The chain is rebuilt hop by hop
//! through the oracle and may cycle, so every walk keeps a visited set.

use rustc_hash::FxHashSet;

use super::pass::DeprecationPass;
use super::program::{Declaration, Program};
use crate::base::{NodeRef, SymbolId};
use crate::syntax::NodeKind;

/// Where a deprecation was found while walking from a usage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeprecatedOrigin {
    /// The symbol of the chain the deprecation was found on.
    pub symbol: SymbolId,
    /// The declaration carrying the marker: the symbol's own, or an
    /// enclosing container's.
    pub declaration: Declaration,
}

impl<P: Program + ?Sized> DeprecationPass<'_, P> {
    /// Walk the alias chain from `symbol`, stopping at the first `Some`.
    ///
    /// Ends on a repeated symbol, a non-alias, a missing target, or a target
    /// identical to the current symbol.
    fn walk_chain<T>(
        &mut self,
        symbol: SymbolId,
        mut visit: impl FnMut(&mut Self, SymbolId) -> Option<T>,
    ) -> Option<T> {
        let mut visited = FxHashSet::default();
        let mut current = symbol;
        loop {
            if !visited.insert(current) {
                tracing::trace!(?symbol, ?current, "alias cycle");
                return None;
            }
            if let Some(found) = visit(self, current) {
                return Some(found);
            }
            if !self.resolver.is_alias(current) {
                return None;
            }
            match self.resolver.alias_target_of(current) {
                Some(next) if next != current => current = next,
                _ => return None,
            }
        }
    }

    /// Symbols visited from `symbol` along its alias chain, in order.
    pub fn alias_chain(&mut self, symbol: SymbolId) -> Vec<SymbolId> {
        let mut chain = Vec::new();
        self.walk_chain(symbol, |_, s| {
            chain.push(s);
            None::<()>
        });
        chain
    }

    /// Whether `symbol`, or anything it aliases, is deprecated.
    pub fn is_deprecated_transitively(&mut self, symbol: SymbolId) -> bool {
        self.deprecated_origin(symbol).is_some()
    }

    /// The first declaration along the alias chain carrying the marker.
    ///
    /// Only primary declarations are consulted; a symbol without any, or one
    /// declared outside the project, is not deprecated.
    pub fn deprecated_origin(&mut self, symbol: SymbolId) -> Option<DeprecatedOrigin> {
        self.walk_chain(symbol, |pass, current| pass.own_deprecation(current))
    }

    /// Like [`deprecated_origin`](Self::deprecated_origin), but a symbol also
    /// counts as deprecated when a declaration enclosing it does.
    pub fn deprecated_origin_with_containers(
        &mut self,
        symbol: SymbolId,
    ) -> Option<DeprecatedOrigin> {
        self.walk_chain(symbol, |pass, current| {
            let decl = pass.resolver.primary_declaration(current)?;
            if !pass.is_first_party_file(decl.file) {
                return None;
            }
            pass.deprecated_container(decl)
                .map(|declaration| DeprecatedOrigin {
                    symbol: current,
                    declaration,
                })
                .or_else(|| pass.own_deprecation(current))
        })
    }

    fn own_deprecation(&mut self, symbol: SymbolId) -> Option<DeprecatedOrigin> {
        let declaration = self.resolver.primary_declaration(symbol)?;
        if !self.is_first_party_file(declaration.file) {
            return None;
        }
        self.is_deprecated(declaration)
            .then_some(DeprecatedOrigin { symbol, declaration })
    }

    /// The innermost enclosing class, interface, enum or namespace of `decl`
    /// that is deprecated.
    ///
    /// Locals of a function, method or variable initializer are not members,
    /// so the search stops at the first such scope.
    pub(crate) fn deprecated_container(&mut self, decl: Declaration) -> Option<Declaration> {
        let source = self.resolver.source_file(decl.file)?;
        let containers: Vec<_> = source
            .ancestors(decl.node)
            .take_while(|&n| !source.kind(n).is_some_and(NodeKind::is_local_scope))
            .filter(|&n| source.kind(n).is_some_and(NodeKind::is_member_container))
            .map(|n| NodeRef::new(decl.file, n))
            .collect();
        containers.into_iter().find(|&c| self.is_deprecated(c))
    }
}
