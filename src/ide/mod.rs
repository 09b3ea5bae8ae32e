//! IDE features — the host-facing surface.
//!
//! This module connects the deprecation analysis (HIR) to a host language
//! service. Nothing here knows about a wire protocol; results use our own
//! types and the host converts them at its boundary.
//!
//! ## Usage
//!
//! ```ignore
//! use sunset::ide::{DeprecationService, LanguageService};
//!
//! let service = DeprecationService::new(host_service);
//! let diagnostics = service.suggestion_diagnostics(file_id);
//! ```

mod hover;
mod service;

pub use hover::{
    DEPRECATED_TAG, DisplayPart, HoverInfo, JsDocTagInfo, deprecated_tag, with_deprecated_tag,
};
pub use service::{DefinitionInfo, DeprecationService, LanguageService, ReferenceEntry};
