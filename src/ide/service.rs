//! The language-service decorator.
//!
//! [`DeprecationService`] wraps any [`LanguageService`] and implements the
//! same trait. Every operation is delegated; hover, semantic diagnostics and
//! suggestion diagnostics are augmented with the deprecation analysis. Each
//! augmented call runs its own [`DeprecationPass`], and a failing pass only
//! costs the additions: the wrapped service's answer is always returned.

use text_size::{TextRange, TextSize};

use super::hover::{HoverInfo, with_deprecated_tag};
use crate::base::FileId;
use crate::config::Config;
use crate::error::Result;
use crate::hir::{Deprecation, DeprecationPass, Diagnostic, DiagnosticCategory, Program, merge};

/// Target of a go-to-definition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionInfo {
    pub file: FileId,
    pub text_span: TextRange,
    pub name: String,
    pub kind: String,
}

/// One entry of a find-references result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEntry {
    pub file: FileId,
    pub text_span: TextRange,
    pub is_definition: bool,
}

/// The host's language service, as far as this crate is concerned.
pub trait LanguageService {
    type Program: Program + ?Sized;

    /// The program behind the service; `None` while it is not built yet.
    fn program(&self) -> Option<&Self::Program>;

    fn hover(&self, file: FileId, offset: TextSize) -> Option<HoverInfo>;

    fn semantic_diagnostics(&self, file: FileId) -> Vec<Diagnostic>;

    fn suggestion_diagnostics(&self, file: FileId) -> Vec<Diagnostic>;

    fn syntactic_diagnostics(&self, file: FileId) -> Vec<Diagnostic>;

    fn definition_at(&self, file: FileId, offset: TextSize) -> Vec<DefinitionInfo>;

    fn references_at(&self, file: FileId, offset: TextSize) -> Vec<ReferenceEntry>;
}

/// A [`LanguageService`] that also reports usages of deprecated symbols.
#[derive(Debug, Clone)]
pub struct DeprecationService<S> {
    inner: S,
    config: Config,
}

impl<S: LanguageService> DeprecationService<S> {
    pub fn new(inner: S) -> Self {
        Self::with_config(inner, Config::default())
    }

    pub fn with_config(inner: S, config: Config) -> Self {
        Self { inner, config }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Deprecation diagnostics for `file` from a fresh pass.
    pub fn deprecation_diagnostics(&self, file: FileId) -> Result<Vec<Diagnostic>> {
        let Some(program) = self.inner.program() else {
            return Ok(Vec::new());
        };
        let mut pass = DeprecationPass::new(program, &self.config)?;
        pass.check_file(file)
    }

    /// Deprecation of the identifier at `offset`, from a fresh pass.
    pub fn deprecation_at(&self, file: FileId, offset: TextSize) -> Result<Option<Deprecation>> {
        let Some(program) = self.inner.program() else {
            return Ok(None);
        };
        let mut pass = DeprecationPass::new(program, &self.config)?;
        pass.deprecation_at(file, offset)
    }

    fn augment(
        &self,
        file: FileId,
        baseline: Vec<Diagnostic>,
        category: DiagnosticCategory,
        reports_deprecated: bool,
    ) -> Vec<Diagnostic> {
        match self.deprecation_diagnostics(file) {
            Ok(found) => {
                let found = found
                    .into_iter()
                    .map(|mut diag| {
                        diag.reports_deprecated = reports_deprecated;
                        diag.with_category(category)
                    })
                    .collect();
                merge(baseline, found, self.config.dedup_key)
            }
            Err(err) => {
                tracing::warn!(
                    %err,
                    ?file,
                    "deprecation analysis failed, returning host diagnostics"
                );
                baseline
            }
        }
    }
}

impl<S: LanguageService> LanguageService for DeprecationService<S> {
    type Program = S::Program;

    fn program(&self) -> Option<&Self::Program> {
        self.inner.program()
    }

    fn hover(&self, file: FileId, offset: TextSize) -> Option<HoverInfo> {
        let info = self.inner.hover(file, offset)?;
        match self.deprecation_at(file, offset) {
            Ok(Some(deprecation)) => Some(with_deprecated_tag(info, &deprecation)),
            Ok(None) => Some(info),
            Err(err) => {
                tracing::warn!(%err, ?file, "deprecation analysis failed, returning host hover");
                Some(info)
            }
        }
    }

    fn semantic_diagnostics(&self, file: FileId) -> Vec<Diagnostic> {
        let baseline = self.inner.semantic_diagnostics(file);
        self.augment(file, baseline, self.config.semantic_category, false)
    }

    fn suggestion_diagnostics(&self, file: FileId) -> Vec<Diagnostic> {
        let baseline = self.inner.suggestion_diagnostics(file);
        self.augment(file, baseline, self.config.suggestion_category, true)
    }

    fn syntactic_diagnostics(&self, file: FileId) -> Vec<Diagnostic> {
        self.inner.syntactic_diagnostics(file)
    }

    fn definition_at(&self, file: FileId, offset: TextSize) -> Vec<DefinitionInfo> {
        self.inner.definition_at(file, offset)
    }

    fn references_at(&self, file: FileId, offset: TextSize) -> Vec<ReferenceEntry> {
        self.inner.references_at(file, offset)
    }
}
