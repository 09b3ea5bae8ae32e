//! Analysis configuration.
//!
//! The host injects nothing but its program; everything tunable about the
//! deprecation analysis itself lives here. `Config::default()` matches the
//! behaviour of the TypeScript language service plugin this crate decorates.

use smol_str::SmolStr;

use crate::error::ConfigError;
use crate::hir::{DedupKey, DiagnosticCategory};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Config {
    /// Case-sensitive text that marks a declaration as deprecated.
    pub marker: SmolStr,
    /// Path segments identifying vendored/third-party modules.
    pub vendored_segments: Vec<SmolStr>,
    /// Suffixes tried when a forwarded `export *` specifier has to be joined
    /// onto the enclosing module's directory by hand.
    pub module_extensions: Vec<SmolStr>,
    /// Follow `export *` chains across any number of modules. `false` only
    /// looks one wildcard hop deep.
    pub transitive_wildcards: bool,
    pub dedup_key: DedupKey,
    /// Category assigned to diagnostics merged into semantic diagnostics.
    pub semantic_category: DiagnosticCategory,
    /// Category assigned to diagnostics merged into suggestion diagnostics.
    pub suggestion_category: DiagnosticCategory,
    /// Subtrees nested deeper than this are not traversed.
    pub max_traversal_depth: u32,
    /// Also flag the `{ name }` specifier of an import that brings in a
    /// deprecated symbol, not only the later usages.
    pub report_import_specifiers: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker: SmolStr::new_static("@deprecated"),
            vendored_segments: vec![SmolStr::new_static("node_modules")],
            module_extensions: [".ts", ".tsx", ".d.ts", "/index.ts", "/index.tsx", "/index.d.ts"]
                .into_iter()
                .map(SmolStr::new_static)
                .collect(),
            transitive_wildcards: true,
            dedup_key: DedupKey::SpanAndCode,
            semantic_category: DiagnosticCategory::Warning,
            suggestion_category: DiagnosticCategory::Suggestion,
            max_traversal_depth: 512,
            report_import_specifiers: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_marker(mut self, marker: impl Into<SmolStr>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn with_vendored_segment(mut self, segment: impl Into<SmolStr>) -> Self {
        self.vendored_segments.push(segment.into());
        self
    }

    pub fn with_transitive_wildcards(mut self, transitive: bool) -> Self {
        self.transitive_wildcards = transitive;
        self
    }

    pub fn with_dedup_key(mut self, key: DedupKey) -> Self {
        self.dedup_key = key;
        self
    }

    pub fn with_max_traversal_depth(mut self, depth: u32) -> Self {
        self.max_traversal_depth = depth;
        self
    }

    pub fn with_import_specifiers(mut self, report: bool) -> Self {
        self.report_import_specifiers = report;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.marker.is_empty() {
            return Err(ConfigError::EmptyMarker);
        }
        if self.max_traversal_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if let Some(bad) = self
            .module_extensions
            .iter()
            .find(|ext| !(ext.starts_with('.') || ext.starts_with('/')))
        {
            return Err(ConfigError::BadExtension(bad.clone()));
        }
        Ok(())
    }

    /// Whether `path` lies under one of the vendored segments.
    pub fn is_vendored_path(&self, path: &str) -> bool {
        path.split(['/', '\\'])
            .any(|part| self.vendored_segments.iter().any(|seg| seg == part))
    }
}
