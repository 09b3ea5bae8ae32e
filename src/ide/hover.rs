//! Hover — quick info plus the `deprecated` tag.
//!
//! The host's hover result is kept as it is; a `deprecated` tag is appended
//! when the hovered symbol is deprecated and the host did not already say so
//! (it does when the symbol's own doc block carries the marker).

use text_size::TextRange;

use crate::hir::Deprecation;

/// Tag name the host uses for deprecation notes.
pub const DEPRECATED_TAG: &str = "deprecated";

/// One segment of rendered documentation text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayPart {
    /// `"text"`, `"aliasName"`, ...
    pub kind: String,
    pub text: String,
}

impl DisplayPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: text.into(),
        }
    }

    pub fn alias_name(text: impl Into<String>) -> Self {
        Self {
            kind: "aliasName".to_string(),
            text: text.into(),
        }
    }
}

/// A JSDoc tag as shown in hover.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JsDocTagInfo {
    pub name: String,
    pub text: Vec<DisplayPart>,
}

/// Result of a hover request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HoverInfo {
    /// Symbol kind as the host names it (`function`, `class`, ...).
    pub kind: String,
    pub name: String,
    pub text_span: TextRange,
    pub documentation: Vec<DisplayPart>,
    pub tags: Vec<JsDocTagInfo>,
}

impl HoverInfo {
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }
}

/// The `deprecated` tag for a deprecation found by the analysis.
pub fn deprecated_tag(deprecation: &Deprecation) -> JsDocTagInfo {
    let mut text = Vec::new();
    if let Some(reason) = &deprecation.reason {
        text.push(DisplayPart::text(reason.clone()));
    }
    if let Some(origin) = &deprecation.inherited_from {
        let lead = if text.is_empty() {
            "Deprecated through "
        } else {
            " (deprecated through "
        };
        text.push(DisplayPart::text(lead));
        text.push(DisplayPart::alias_name(origin.as_str()));
        if lead.starts_with(' ') {
            text.push(DisplayPart::text(")"));
        }
    }
    JsDocTagInfo {
        name: DEPRECATED_TAG.to_string(),
        text,
    }
}

/// Append the `deprecated` tag unless the hover already carries one.
pub fn with_deprecated_tag(mut info: HoverInfo, deprecation: &Deprecation) -> HoverInfo {
    if !info.has_tag(DEPRECATED_TAG) {
        info.tags.push(deprecated_tag(deprecation));
    }
    info
}
