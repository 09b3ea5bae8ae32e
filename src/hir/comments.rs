//! Comment/Marker Extractor.
//!
//! A declaration's comments are whatever the oracle reports in the trivia in
//! front of it plus the doc blocks the parser attached to it. Detection is a
//! plain substring test, so any comment above the declaration counts, adjacent
//! or not.

use smol_str::SmolStr;
use text_size::TextRange;

use super::program::{Declaration, Program};
use super::resolver::SymbolResolver;
use crate::base::NodeId;
use crate::syntax::{NodeKind, SourceFile};

/// One comment attached to a declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub range: TextRange,
    pub text: SmolStr,
}

/// The node whose trivia and doc blocks document `node`.
///
/// `const x = 1` is documented on the statement, not on the declaration.
fn doc_host(source: &SourceFile, node: NodeId) -> NodeId {
    if source.kind(node) != Some(NodeKind::VariableDeclaration) {
        return node;
    }
    source
        .ancestors(node)
        .take(2)
        .find(|&n| source.kind(n) == Some(NodeKind::VariableStatement))
        .unwrap_or(node)
}

/// Leading comments and doc blocks of `decl`, in source order, each once.
pub fn comments_of<P: Program + ?Sized>(
    resolver: &mut SymbolResolver<'_, P>,
    decl: Declaration,
) -> Vec<Comment> {
    let Some(source) = resolver.source_file(decl.file) else {
        return Vec::new();
    };
    let Some(node) = source.node(decl.node) else {
        return Vec::new();
    };
    let host = doc_host(&source, decl.node);
    let Some(host_node) = source.node(host) else {
        return Vec::new();
    };

    let mut ranges: Vec<TextRange> = resolver
        .program()
        .leading_comment_ranges(decl.file, host_node.full_start)
        .into_iter()
        .map(|c| c.range)
        .collect();
    ranges.extend(host_node.js_doc.iter().copied());
    if host != decl.node {
        ranges.extend(node.js_doc.iter().copied());
    }
    ranges.sort_by_key(|r| (r.start(), r.end()));
    ranges.dedup();

    ranges
        .into_iter()
        .filter_map(|range| {
            let text = source
                .text()
                .get(usize::from(range.start())..usize::from(range.end()))?;
            Some(Comment {
                range,
                text: SmolStr::new(text),
            })
        })
        .collect()
}

pub fn contains_marker(comments: &[Comment], marker: &str) -> bool {
    comments.iter().any(|c| c.text.contains(marker))
}

/// The text following `marker` in the first comment carrying it.
///
/// Comment delimiters and the `*` gutter of block comments are dropped;
/// `None` if no comment is marked, `Some("")` if the marker stands alone.
pub fn reason_after_marker(comments: &[Comment], marker: &str) -> Option<String> {
    let comment = comments.iter().find(|c| c.text.contains(marker))?;
    let (_, rest) = comment.text.split_once(marker)?;
    let rest = rest.strip_suffix("*/").unwrap_or(rest);

    let mut lines = Vec::new();
    for line in rest.lines() {
        let line = line.trim();
        let line = line.strip_prefix('*').unwrap_or(line).trim();
        // the next tag ends the reason
        if line.starts_with('@') {
            break;
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    Some(lines.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::NodeRef;
    use crate::fixture::{Decl, ProgramBuilder};

    fn comments(text: &str) -> Vec<Comment> {
        vec![Comment {
            range: TextRange::up_to(text.len().try_into().unwrap()),
            text: SmolStr::new(text),
        }]
    }

    #[test]
    fn test_reason_after_marker() {
        assert_eq!(
            reason_after_marker(&comments("/** @deprecated Use g instead */"), "@deprecated"),
            Some("Use g instead".to_string())
        );
        assert_eq!(
            reason_after_marker(&comments("// @deprecated"), "@deprecated"),
            Some(String::new())
        );
        assert_eq!(reason_after_marker(&comments("/** fine */"), "@deprecated"), None);
    }

    #[test]
    fn test_reason_stops_at_next_tag() {
        let text = "/**\n * Old.\n * @deprecated since 2.0\n *   use `g`\n * @see g\n */";
        assert_eq!(
            reason_after_marker(&comments(text), "@deprecated"),
            Some("since 2.0 use `g`".to_string())
        );
    }

    #[test]
    fn test_marker_is_case_sensitive() {
        assert!(!contains_marker(&comments("/** @Deprecated */"), "@deprecated"));
        assert!(contains_marker(&comments("/* x @deprecated y */"), "@deprecated"));
    }

    #[test]
    fn test_comments_of_declaration_returns_each_once() {
        let mut b = ProgramBuilder::new();
        let a = b.file("src/a.ts");
        b.comment(a, "// header");
        let f = b.declare(a, Decl::function("f").doc("/** @deprecated */"));
        let program = b.finish();

        let mut resolver = SymbolResolver::new(&program);
        let decl = resolver.primary_declaration(f).unwrap();
        let found = comments_of(&mut resolver, decl);

        // the doc block is reported by the scanner and attached by the parser
        let texts: Vec<_> = found.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["// header", "/** @deprecated */"]);
    }

    #[test]
    fn test_variable_is_documented_on_its_statement() {
        let mut b = ProgramBuilder::new();
        let a = b.file("src/a.ts");
        let x = b.declare(a, Decl::variable("x").doc("/** @deprecated */").exported());
        let program = b.finish();

        let mut resolver = SymbolResolver::new(&program);
        let decl = resolver.primary_declaration(x).unwrap();
        let source = resolver.source_file(a).unwrap();
        assert_eq!(source.kind(decl.node), Some(NodeKind::VariableDeclaration));

        let found = comments_of(&mut resolver, decl);
        assert!(contains_marker(&found, "@deprecated"));
    }

    #[test]
    fn test_missing_declaration_has_no_comments() {
        let program = ProgramBuilder::new().finish();
        let mut resolver = SymbolResolver::new(&program);
        let missing = NodeRef::new(crate::base::FileId::new(3), NodeId::new(1));
        assert!(comments_of(&mut resolver, missing).is_empty());
    }
}
