//! Diagnostics — deprecation reports and their deduplication.
//!
//! The shape mirrors what the host language service returns so that new
//! diagnostics can be merged into its own lists: offsets instead of line/column,
//! a numeric code, and related information pointing at the declaration that
//! carries the deprecation marker.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use text_size::{TextRange, TextSize};

use crate::base::{FileId, LineIndex};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Category of a diagnostic, as the host numbers them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

impl DiagnosticCategory {
    /// The host's numeric category.
    pub fn to_host(self) -> u32 {
        match self {
            DiagnosticCategory::Warning => 0,
            DiagnosticCategory::Error => 1,
            DiagnosticCategory::Suggestion => 2,
            DiagnosticCategory::Message => 3,
        }
    }

    /// Convert to LSP severity number.
    pub fn to_lsp(self) -> u32 {
        match self {
            DiagnosticCategory::Error => 1,
            DiagnosticCategory::Warning => 2,
            DiagnosticCategory::Message => 3,
            DiagnosticCategory::Suggestion => 4,
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        }
    }
}

/// A secondary location attached to a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RelatedInformation {
    pub file: FileId,
    pub start: TextSize,
    pub length: TextSize,
    pub message: Arc<str>,
    pub category: DiagnosticCategory,
    pub code: u32,
}

impl RelatedInformation {
    /// "The declaration was marked as deprecated here."
    pub fn deprecated_here(file: FileId, range: TextRange) -> Self {
        Self {
            file,
            start: range.start(),
            length: range.len(),
            message: Arc::from(messages::DEPRECATED_DECLARATION_HERE),
            category: DiagnosticCategory::Message,
            code: codes::DEPRECATED_DECLARATION_HERE,
        }
    }

    pub fn range(&self) -> TextRange {
        TextRange::at(self.start, self.length)
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Diagnostic {
    /// The file containing the usage.
    pub file: FileId,
    pub start: TextSize,
    pub length: TextSize,
    pub category: DiagnosticCategory,
    pub code: u32,
    pub message: Arc<str>,
    pub related_information: Vec<RelatedInformation>,
    /// Lets editors render the span struck through.
    pub reports_deprecated: bool,
}

impl Diagnostic {
    pub fn new(
        file: FileId,
        range: TextRange,
        category: DiagnosticCategory,
        code: u32,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            file,
            start: range.start(),
            length: range.len(),
            category,
            code,
            message: message.into(),
            related_information: Vec::new(),
            reports_deprecated: false,
        }
    }

    /// `'name' is deprecated.` at a usage site.
    pub fn deprecated_usage(file: FileId, usage: TextRange, name: &str) -> Self {
        let mut diag = Self::new(
            file,
            usage,
            DiagnosticCategory::Suggestion,
            codes::DEPRECATED_SYMBOL,
            messages::deprecated_symbol(name),
        );
        diag.reports_deprecated = true;
        diag
    }

    /// Reassign the category; the only field the dispatching layer may change.
    pub fn with_category(mut self, category: DiagnosticCategory) -> Self {
        self.category = category;
        self
    }

    /// Add related information.
    pub fn with_related(mut self, info: RelatedInformation) -> Self {
        self.related_information.push(info);
        self
    }

    pub fn range(&self) -> TextRange {
        TextRange::at(self.start, self.length)
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Host diagnostic codes used by the deprecation analysis.
pub mod codes {
    /// `'{0}' is deprecated.`
    pub const DEPRECATED_SYMBOL: u32 = 6385;
    /// `The declaration was marked as deprecated here.`
    pub const DEPRECATED_DECLARATION_HERE: u32 = 2798;
}

pub mod messages {
    pub const DEPRECATED_DECLARATION_HERE: &str = "The declaration was marked as deprecated here.";

    pub fn deprecated_symbol(name: &str) -> String {
        format!("'{name}' is deprecated.")
    }
}

// ============================================================================
// DEDUPLICATION
// ============================================================================

/// Which fields make two diagnostics "the same".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DedupKey {
    /// (start, length, code)
    #[default]
    SpanAndCode,
    /// (start, length, category, file)
    SpanCategoryAndFile,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum Key {
    SpanAndCode(TextSize, TextSize, u32),
    SpanCategoryAndFile(TextSize, TextSize, DiagnosticCategory, FileId),
}

impl DedupKey {
    fn key_of(self, diag: &Diagnostic) -> Key {
        match self {
            DedupKey::SpanAndCode => Key::SpanAndCode(diag.start, diag.length, diag.code),
            DedupKey::SpanCategoryAndFile => {
                Key::SpanCategoryAndFile(diag.start, diag.length, diag.category, diag.file)
            }
        }
    }
}

/// Union of `prior` and `new` without two entries sharing a key.
///
/// `prior` comes first and wins ties; `new` keeps its order. Duplicates within
/// either list collapse as well.
pub fn merge(prior: Vec<Diagnostic>, new: Vec<Diagnostic>, key: DedupKey) -> Vec<Diagnostic> {
    let mut seen = FxHashSet::default();
    prior
        .into_iter()
        .chain(new)
        .filter(|diag| seen.insert(key.key_of(diag)))
        .collect()
}

// ============================================================================
// RENDERING
// ============================================================================

/// `path:line:col - category TS6385: message`, tsc style.
pub fn format_diagnostic(diag: &Diagnostic, path: &str, lines: &LineIndex) -> String {
    format!(
        "{path}:{} - {} TS{}: {}",
        lines.line_col(diag.start),
        diag.category.display(),
        diag.code,
        diag.message
    )
}
