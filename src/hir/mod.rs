//! Semantic layer — deprecation analysis over the program oracle.
//!
//! ## Structure
//!
//! ```text
//! pass          → DeprecationPass: per-request caches + file traversal
//!   ├ imports     → import/export engine (named bindings, `export *`)
//!   ├ alias_chain → alias walker (cycle-safe)
//!   └ comments    → marker detection on declarations
//! resolver      → memoizing façade over Program
//! program       → the oracle trait
//! diagnostics   → Diagnostic, codes, merge/dedup
//! ```

mod alias_chain;
mod comments;
mod diagnostics;
mod imports;
mod pass;
mod program;
mod resolver;

pub use alias_chain::DeprecatedOrigin;
pub use comments::{Comment, comments_of, contains_marker, reason_after_marker};
pub use diagnostics::{
    DedupKey, Diagnostic, DiagnosticCategory, RelatedInformation, codes, format_diagnostic,
    merge, messages,
};
pub use imports::BindingHit;
pub use pass::{Deprecation, DeprecationPass};
pub use program::{
    CompilerOptions, Declaration, ModuleResolutionKind, Program, ResolvedModule,
    WILDCARD_EXPORT_NAME,
};
pub use resolver::{ResolverStats, SymbolResolver};
