//! Symbol Resolver — a memoizing façade over the [`Program`] oracle.
//!
//! Every query the analysis makes against the type-checker goes through
//! here. Answers are cached for the lifetime of the resolver, which is one
//! analysis pass; the oracle is pure, so a cached answer is always the answer
//! the oracle would give again.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::program::{Declaration, Program, ResolvedModule};
use crate::base::{FileId, NodeRef, SymbolId};
use crate::syntax::SourceFile;

/// Cache effectiveness counters, reported when a pass ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolverStats {
    pub hits: u32,
    pub misses: u32,
}

pub struct SymbolResolver<'p, P: Program + ?Sized> {
    program: &'p P,
    files: FxHashMap<FileId, Option<Arc<SourceFile>>>,
    symbol_at: FxHashMap<NodeRef, Option<SymbolId>>,
    declarations: FxHashMap<SymbolId, Arc<[Declaration]>>,
    exports: FxHashMap<SymbolId, Arc<[SymbolId]>>,
    alias_targets: FxHashMap<SymbolId, Option<SymbolId>>,
    names: FxHashMap<SymbolId, Option<SmolStr>>,
    modules: FxHashMap<(FileId, SmolStr), Option<ResolvedModule>>,
    stats: ResolverStats,
}

/// Look `key` up in `map`, computing and storing it on a miss.
fn memo<K, V>(
    map: &mut FxHashMap<K, V>,
    stats: &mut ResolverStats,
    key: K,
    compute: impl FnOnce() -> V,
) -> V
where
    K: std::hash::Hash + Eq,
    V: Clone,
{
    if let Some(value) = map.get(&key) {
        stats.hits += 1;
        return value.clone();
    }
    stats.misses += 1;
    let value = compute();
    map.insert(key, value.clone());
    value
}

impl<'p, P: Program + ?Sized> SymbolResolver<'p, P> {
    pub fn new(program: &'p P) -> Self {
        Self {
            program,
            files: FxHashMap::default(),
            symbol_at: FxHashMap::default(),
            declarations: FxHashMap::default(),
            exports: FxHashMap::default(),
            alias_targets: FxHashMap::default(),
            names: FxHashMap::default(),
            modules: FxHashMap::default(),
            stats: ResolverStats::default(),
        }
    }

    pub fn program(&self) -> &'p P {
        self.program
    }

    pub fn stats(&self) -> ResolverStats {
        self.stats
    }

    pub fn source_file(&mut self, file: FileId) -> Option<Arc<SourceFile>> {
        let program = self.program;
        memo(&mut self.files, &mut self.stats, file, || {
            program.source_file(file)
        })
    }

    pub fn symbol_at(&mut self, node: NodeRef) -> Option<SymbolId> {
        let program = self.program;
        memo(&mut self.symbol_at, &mut self.stats, node, || {
            program.symbol_at_location(node.file, node.node)
        })
    }

    /// Declarations of `symbol`; the first one is the primary declaration.
    pub fn declarations_of(&mut self, symbol: SymbolId) -> Arc<[Declaration]> {
        let program = self.program;
        memo(&mut self.declarations, &mut self.stats, symbol, || {
            program.declarations_of_symbol(symbol).into()
        })
    }

    pub fn primary_declaration(&mut self, symbol: SymbolId) -> Option<Declaration> {
        self.declarations_of(symbol).first().copied()
    }

    /// Exports of a module symbol; empty when there is no module symbol.
    pub fn exports_of(&mut self, module: Option<SymbolId>) -> Arc<[SymbolId]> {
        let Some(module) = module else {
            return Arc::from([]);
        };
        let program = self.program;
        memo(&mut self.exports, &mut self.stats, module, || {
            program.exports_of_module(module).into()
        })
    }

    /// Exports of the module a file defines.
    pub fn exports_of_file(&mut self, file: FileId) -> Arc<[SymbolId]> {
        let module = self.program.module_symbol(file);
        self.exports_of(module)
    }

    /// One hop along an alias; `None` when `symbol` is not an alias.
    pub fn alias_target_of(&mut self, symbol: SymbolId) -> Option<SymbolId> {
        let program = self.program;
        memo(&mut self.alias_targets, &mut self.stats, symbol, || {
            if program.is_alias(symbol) {
                program.aliased_symbol(symbol)
            } else {
                None
            }
        })
    }

    pub fn is_alias(&self, symbol: SymbolId) -> bool {
        self.program.is_alias(symbol)
    }

    pub fn symbol_name(&mut self, symbol: SymbolId) -> Option<SmolStr> {
        let program = self.program;
        memo(&mut self.names, &mut self.stats, symbol, || {
            program.symbol_name(symbol)
        })
    }

    pub fn resolve_module(&mut self, specifier: &str, from: FileId) -> Option<ResolvedModule> {
        let program = self.program;
        memo(
            &mut self.modules,
            &mut self.stats,
            (from, SmolStr::new(specifier)),
            || program.resolve_module(specifier, from),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{Decl, ProgramBuilder};

    #[test]
    fn test_queries_are_memoized() {
        let mut b = ProgramBuilder::new();
        let a = b.file("src/a.ts");
        let f = b.declare(a, Decl::function("f").exported());
        let program = b.finish();

        let mut resolver = SymbolResolver::new(&program);
        assert_eq!(resolver.symbol_name(f).as_deref(), Some("f"));
        assert_eq!(resolver.symbol_name(f).as_deref(), Some("f"));

        assert_eq!(resolver.stats(), ResolverStats { hits: 1, misses: 1 });
    }

    #[test]
    fn test_absent_input_is_empty() {
        let program = ProgramBuilder::new().finish();
        let mut resolver = SymbolResolver::new(&program);

        assert!(resolver.exports_of(None).is_empty());
        assert!(resolver.source_file(FileId::new(7)).is_none());
        assert!(resolver.declarations_of(SymbolId::new(99)).is_empty());
        assert!(resolver.primary_declaration(SymbolId::new(99)).is_none());
        assert!(resolver.alias_target_of(SymbolId::new(99)).is_none());
    }

    #[test]
    fn test_alias_target_is_one_hop() {
        let mut b = ProgramBuilder::new();
        let a = b.file("src/a.ts");
        let f = b.declare(a, Decl::function("f").exported());
        let m = b.file("src/b.ts");
        let reexport = b.export_from(m, "./a", &["f as g"]);
        let c = b.file("src/c.ts");
        let import = b.import(c, "./b", &["g"]);
        let program = b.finish();

        let mut resolver = SymbolResolver::new(&program);
        assert_eq!(resolver.alias_target_of(import[0]), Some(reexport[0]));
        assert_eq!(resolver.alias_target_of(reexport[0]), Some(f));
        assert_eq!(resolver.alias_target_of(f), None);
    }
}
