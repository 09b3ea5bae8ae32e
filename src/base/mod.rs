//! Foundation types for the sunset analysis.
//!
//! - [`FileId`], [`NodeId`], [`SymbolId`], [`NodeRef`] - oracle handles
//! - [`TextRange`], [`TextSize`] - source positions
//! - [`LineCol`], [`LineIndex`] - line/column conversion
//! - [`join_path`] and friends - module path arithmetic
//!
//! This module has NO dependencies on other sunset modules.

mod ids;
mod paths;
mod span;

pub use ids::{FileId, NodeId, NodeRef, SymbolId};
pub use paths::{is_relative_specifier, is_under, join_path, parent_dir};
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
