//! # sunset-base
//!
//! Deprecation analysis for TypeScript language services.
//!
//! Usages of deprecated symbols are reported even when the deprecation is
//! only visible at the end of an import/export alias chain, behind `export *`
//! forwarding, or on an enclosing class or namespace.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide     → LanguageService decorator (hover, diagnostics)
//!   ↓
//! hir     → Program oracle, resolver, alias walker, import engine, passes
//!   ↓
//! syntax  → Syntax trees handed over by the oracle, comment ranges
//!   ↓
//! base    → Primitives (FileId, NodeId, SymbolId, TextRange, LineIndex)
//! ```
//!
//! `config` and `error` are shared by every layer. Behind the `fixture`
//! feature, `fixture` implements the oracle and the host in memory.

/// Foundation types: ids, ranges, line index, module paths
pub mod base;

/// Syntax tree arena and comment scanning
pub mod syntax;

/// Semantic layer: the deprecation analysis itself
pub mod hir;

/// Host-facing decorator
pub mod ide;

pub mod config;
pub mod error;

/// In-memory Program and LanguageService
#[cfg(any(test, feature = "fixture"))]
pub mod fixture;

// Re-export the types most embedders need
pub use base::{FileId, LineCol, LineIndex, NodeId, SymbolId, TextRange, TextSize};
pub use config::Config;
pub use error::{AnalysisError, ConfigError};
pub use hir::{DedupKey, DeprecationPass, Diagnostic, DiagnosticCategory, Program};
pub use ide::{DeprecationService, HoverInfo, LanguageService};
