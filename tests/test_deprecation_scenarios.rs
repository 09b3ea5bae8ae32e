//! End-to-end deprecation scenarios.
//!
//! Each test builds a small TypeScript program in memory, runs a pass over
//! the importing file and compares the rendered diagnostics, tsc style.

use rstest::rstest;
use sunset::fixture::{Decl, MemoryProgram, ProgramBuilder};
use sunset::hir::{CompilerOptions, ModuleResolutionKind, codes, format_diagnostic, messages};
use sunset::{Config, DeprecationPass, Diagnostic, FileId, LineIndex, Program, TextSize};

// ============================================================================
// HELPERS
// ============================================================================

fn check_with(program: &MemoryProgram, file: FileId, config: &Config) -> Vec<Diagnostic> {
    let mut pass = DeprecationPass::new(program, config).expect("valid config");
    pass.check_file(file).expect("file is part of the program")
}

fn check(program: &MemoryProgram, file: FileId) -> Vec<Diagnostic> {
    check_with(program, file, &Config::default())
}

/// `path:line:col - category TScode: message` per diagnostic.
fn render(program: &MemoryProgram, diags: &[Diagnostic]) -> Vec<String> {
    diags
        .iter()
        .map(|d| {
            let source = program.source_file(d.file).expect("diagnostic file");
            format_diagnostic(d, source.path(), &LineIndex::new(source.text()))
        })
        .collect()
}

/// `path:line:col` of the first related location.
fn related_at(program: &MemoryProgram, diag: &Diagnostic) -> String {
    let info = diag
        .related_information
        .first()
        .expect("deprecation diagnostics point at the declaration");
    let source = program.source_file(info.file).expect("related file");
    let lines = LineIndex::new(source.text());
    format!("{}:{}", source.path(), lines.line_col(info.start))
}

/// `a.ts` exporting a deprecated function `name`.
fn deprecated_function(b: &mut ProgramBuilder, path: &str, name: &str) -> FileId {
    let file = b.file(path);
    b.declare(file, Decl::function(name).doc("/** @deprecated Use g instead */").exported());
    file
}

// ============================================================================
// DIRECT IMPORTS
// ============================================================================

#[test]
fn test_direct_import_flags_specifier_and_call() {
    let mut b = ProgramBuilder::new();
    deprecated_function(&mut b, "src/a.ts", "f");
    let c = b.file("src/c.ts");
    b.import(c, "./a", &["f"]);
    b.call(c, "f");
    let program = b.finish();

    let diags = check(&program, c);

    assert_eq!(
        render(&program, &diags),
        [
            "src/c.ts:1:10 - suggestion TS6385: 'f' is deprecated.",
            "src/c.ts:2:1 - suggestion TS6385: 'f' is deprecated.",
        ]
    );
    for diag in &diags {
        assert!(diag.reports_deprecated);
        assert_eq!(related_at(&program, diag), "src/a.ts:2:17");
        let related = &diag.related_information[0];
        assert_eq!(related.code, codes::DEPRECATED_DECLARATION_HERE);
        assert_eq!(&*related.message, messages::DEPRECATED_DECLARATION_HERE);
    }
}

#[test]
fn test_same_export_imported_twice_flags_each_specifier() {
    let mut b = ProgramBuilder::new();
    deprecated_function(&mut b, "src/a.ts", "f");
    let c = b.file("src/c.ts");
    b.import(c, "./a", &["f", "f as g"]);
    b.call(c, "g");
    let program = b.finish();

    let diags = check(&program, c);

    assert_eq!(
        render(&program, &diags),
        [
            "src/c.ts:1:10 - suggestion TS6385: 'f' is deprecated.",
            "src/c.ts:1:13 - suggestion TS6385: 'f' is deprecated.",
            "src/c.ts:2:1 - suggestion TS6385: 'g' is deprecated.",
        ]
    );
    // `f as g`
    assert_eq!(diags[1].length, TextSize::from(6));
}

#[test]
fn test_import_specifier_can_be_left_unreported() {
    let mut b = ProgramBuilder::new();
    deprecated_function(&mut b, "src/a.ts", "f");
    let c = b.file("src/c.ts");
    b.import(c, "./a", &["f"]);
    b.call(c, "f");
    let program = b.finish();

    let config = Config::new().with_import_specifiers(false);
    let diags = check_with(&program, c, &config);

    assert_eq!(
        render(&program, &diags),
        ["src/c.ts:2:1 - suggestion TS6385: 'f' is deprecated."]
    );
}

#[test]
fn test_non_deprecated_symbol_is_silent() {
    let mut b = ProgramBuilder::new();
    let a = b.file("src/a.ts");
    b.declare(a, Decl::function("f").doc("/** Adds two numbers. */").exported());
    let c = b.file("src/c.ts");
    b.import(c, "./a", &["f"]);
    b.call(c, "f");
    let program = b.finish();

    assert!(check(&program, c).is_empty());
}

#[test]
fn test_line_comment_marker_counts() {
    let mut b = ProgramBuilder::new();
    let a = b.file("src/a.ts");
    b.declare(a, Decl::function("f").doc("// @deprecated kept for v1 callers").exported());
    let c = b.file("src/c.ts");
    b.import(c, "./a", &["f"]);
    b.call(c, "f");
    let program = b.finish();

    assert_eq!(check(&program, c).len(), 2);
}

#[test]
fn test_marker_is_case_sensitive() {
    let mut b = ProgramBuilder::new();
    let a = b.file("src/a.ts");
    b.declare(a, Decl::function("f").doc("/** @Deprecated */").exported());
    let c = b.file("src/c.ts");
    b.import(c, "./a", &["f"]);
    b.call(c, "f");
    let program = b.finish();

    assert!(check(&program, c).is_empty());
}

#[test]
fn test_custom_marker() {
    let mut b = ProgramBuilder::new();
    let a = b.file("src/a.ts");
    b.declare(a, Decl::function("f").doc("/** @obsolete */").exported());
    let c = b.file("src/c.ts");
    b.import(c, "./a", &["f"]);
    b.call(c, "f");
    let program = b.finish();

    assert!(check(&program, c).is_empty());
    let config = Config::new().with_marker("@obsolete");
    assert_eq!(check_with(&program, c, &config).len(), 2);
}

#[rstest]
#[case::function(Decl::function("x"))]
#[case::class(Decl::class("x"))]
#[case::variable(Decl::variable("x"))]
#[case::enumeration(Decl::enumeration("x").member(Decl::enum_member("A")))]
fn test_declaration_kinds(#[case] decl: Decl) {
    let mut b = ProgramBuilder::new();
    let a = b.file("src/a.ts");
    b.declare(a, decl.doc("/** @deprecated */").exported());
    let c = b.file("src/c.ts");
    b.import(c, "./a", &["x"]);
    b.call(c, "x");
    let program = b.finish();

    let diags = check(&program, c);
    assert_eq!(diags.len(), 2, "specifier and call: {:?}", render(&program, &diags));
    assert_eq!(&*diags[1].message, "'x' is deprecated.");
}

#[test]
fn test_default_import() {
    let mut b = ProgramBuilder::new();
    let a = b.file("src/a.ts");
    b.declare(a, Decl::function("f").doc("/** @deprecated */").default_export());
    let c = b.file("src/c.ts");
    b.import_default(c, "./a", "d");
    b.call(c, "d");
    let program = b.finish();

    let diags = check(&program, c);

    assert_eq!(
        render(&program, &diags),
        ["src/c.ts:2:1 - suggestion TS6385: 'd' is deprecated."]
    );
    assert_eq!(related_at(&program, &diags[0]), "src/a.ts:2:25");
}

// ============================================================================
// ALIAS CHAINS
// ============================================================================

#[test]
fn test_renamed_reexport_points_at_original() {
    let mut b = ProgramBuilder::new();
    let a = b.file("src/a.ts");
    b.declare(a, Decl::function("A").doc("/** @deprecated */").exported());
    let m = b.file("src/b.ts");
    b.export_from(m, "./a", &["A as B"]);
    let c = b.file("src/c.ts");
    b.import(c, "./b", &["B"]);
    b.call(c, "B");
    let program = b.finish();

    let diags = check(&program, c);

    assert_eq!(
        render(&program, &diags),
        [
            "src/c.ts:1:10 - suggestion TS6385: 'B' is deprecated.",
            "src/c.ts:2:1 - suggestion TS6385: 'B' is deprecated.",
        ]
    );
    assert_eq!(related_at(&program, &diags[0]), "src/a.ts:2:17");
    assert_eq!(related_at(&program, &diags[1]), "src/a.ts:2:17");
}

#[test]
fn test_local_export_list_alias() {
    let mut b = ProgramBuilder::new();
    let a = b.file("src/a.ts");
    b.declare(a, Decl::function("A").doc("/** @deprecated */"));
    b.export_names(a, &["A as B"]);
    let c = b.file("src/c.ts");
    b.import(c, "./a", &["B"]);
    b.call(c, "B");
    let program = b.finish();

    let diags = check(&program, c);
    assert_eq!(diags.len(), 2);
    assert_eq!(related_at(&program, &diags[1]), "src/a.ts:2:10");
}

#[test]
fn test_alias_cycle_terminates_silently() {
    let mut b = ProgramBuilder::new();
    let a = b.file("src/a.ts");
    let m = b.file("src/b.ts");
    b.export_from(a, "./b", &["x"]);
    b.export_from(m, "./a", &["x"]);
    let c = b.file("src/c.ts");
    b.import(c, "./a", &["x"]);
    b.call(c, "x");
    let program = b.finish();

    assert!(check(&program, c).is_empty());
}

// ============================================================================
// CONTAINERS
// ============================================================================

#[test]
fn test_member_of_deprecated_class_through_reexport() {
    let mut b = ProgramBuilder::new();
    let a = b.file("src/a.ts");
    b.declare(
        a,
        Decl::class("Old")
            .doc("/** @deprecated Use New */")
            .exported()
            .member(Decl::method("run")),
    );
    let m = b.file("src/b.ts");
    b.export_from(m, "./a", &["Old"]);
    let c = b.file("src/c.ts");
    b.import(c, "./b", &["Old"]);
    b.member_access(c, "Old", "run");
    let program = b.finish();

    let diags = check(&program, c);

    assert_eq!(
        render(&program, &diags),
        [
            "src/c.ts:1:10 - suggestion TS6385: 'Old' is deprecated.",
            "src/c.ts:2:1 - suggestion TS6385: 'Old' is deprecated.",
            "src/c.ts:2:5 - suggestion TS6385: 'run' is deprecated.",
        ]
    );
    // the member inherits from the class and points at the class name
    assert_eq!(related_at(&program, &diags[2]), "src/a.ts:2:14");
}

#[test]
fn test_member_of_deprecated_namespace() {
    let mut b = ProgramBuilder::new();
    let a = b.file("src/a.ts");
    b.declare(
        a,
        Decl::namespace("N")
            .doc("/** @deprecated */")
            .exported()
            .member(Decl::function("f").exported()),
    );
    let c = b.file("src/c.ts");
    b.import(c, "./a", &["N"]);
    b.member_access(c, "N", "f");
    let program = b.finish();

    let diags = check(&program, c);
    let messages: Vec<_> = diags.iter().map(|d| &*d.message).collect();
    assert_eq!(messages, ["'N' is deprecated.", "'N' is deprecated.", "'f' is deprecated."]);
}

#[test]
fn test_deprecated_member_of_live_class() {
    let mut b = ProgramBuilder::new();
    let a = b.file("src/a.ts");
    b.declare(
        a,
        Decl::class("Api")
            .exported()
            .member(Decl::method("old").doc("/** @deprecated */"))
            .member(Decl::method("current")),
    );
    let c = b.file("src/c.ts");
    b.import(c, "./a", &["Api"]);
    b.member_access(c, "Api", "old");
    b.member_access(c, "Api", "current");
    let program = b.finish();

    assert_eq!(
        render(&program, &check(&program, c)),
        ["src/c.ts:2:5 - suggestion TS6385: 'old' is deprecated."]
    );
}

#[test]
fn test_locals_of_deprecated_function_are_not_deprecated() {
    let mut b = ProgramBuilder::new();
    let a = b.file("src/a.ts");
    b.declare(
        a,
        Decl::function("f")
            .doc("/** @deprecated */")
            .member(Decl::variable("x"))
            .uses("x"),
    );
    b.call(a, "f");
    let program = b.finish();

    assert_eq!(
        render(&program, &check(&program, a)),
        ["src/a.ts:6:1 - suggestion TS6385: 'f' is deprecated."]
    );
}

#[test]
fn test_locals_of_method_in_deprecated_class_are_not_deprecated() {
    let mut b = ProgramBuilder::new();
    let a = b.file("src/a.ts");
    b.declare(
        a,
        Decl::class("Old")
            .doc("/** @deprecated */")
            .exported()
            .member(Decl::method("run").member(Decl::variable("y")).uses("y")),
    );
    let program = b.finish();

    assert!(check(&program, a).is_empty());
}

#[test]
fn test_namespace_import_member() {
    let mut b = ProgramBuilder::new();
    deprecated_function(&mut b, "src/a.ts", "f");
    let c = b.file("src/c.ts");
    b.import_namespace(c, "./a", "lib");
    b.member_access(c, "lib", "f");
    let program = b.finish();

    assert_eq!(
        render(&program, &check(&program, c)),
        ["src/c.ts:2:5 - suggestion TS6385: 'f' is deprecated."]
    );
}

// ============================================================================
// WILDCARD RE-EXPORTS
// ============================================================================

#[test]
fn test_wildcard_reexport() {
    let mut b = ProgramBuilder::new();
    deprecated_function(&mut b, "src/a.ts", "g");
    let m = b.file("src/b.ts");
    b.export_star(m, "./a");
    let c = b.file("src/c.ts");
    b.import(c, "./b", &["g"]);
    b.call(c, "g");
    let program = b.finish();

    let diags = check(&program, c);

    assert_eq!(
        render(&program, &diags),
        [
            "src/c.ts:1:10 - suggestion TS6385: 'g' is deprecated.",
            "src/c.ts:2:1 - suggestion TS6385: 'g' is deprecated.",
        ]
    );
    assert_eq!(related_at(&program, &diags[0]), "src/a.ts:2:17");
}

#[rstest]
#[case::transitive(true, 2)]
#[case::single_hop(false, 1)]
fn test_multi_hop_wildcards(#[case] transitive: bool, #[case] expected: usize) {
    let mut b = ProgramBuilder::new();
    deprecated_function(&mut b, "src/a.ts", "g");
    let inner = b.file("src/b.ts");
    b.export_star(inner, "./a");
    let outer = b.file("src/m.ts");
    b.export_star(outer, "./b");
    let c = b.file("src/c.ts");
    b.import(c, "./m", &["g"]);
    b.call(c, "g");
    let program = b.finish();

    let config = Config::new().with_transitive_wildcards(transitive);
    let diags = check_with(&program, c, &config);

    // the call is found through the checker's own alias resolution either way
    assert_eq!(diags.len(), expected, "{:?}", render(&program, &diags));
    assert_eq!(
        render(&program, &diags).last().map(String::as_str),
        Some("src/c.ts:2:1 - suggestion TS6385: 'g' is deprecated.")
    );
}

#[test]
fn test_wildcard_cycle_still_finds_export() {
    let mut b = ProgramBuilder::new();
    let a = b.file("src/a.ts");
    let m = b.file("src/b.ts");
    b.export_star(a, "./b");
    b.export_star(m, "./a");
    b.declare(m, Decl::function("g").doc("/** @deprecated */").exported());
    let c = b.file("src/c.ts");
    b.import(c, "./a", &["g", "missing"]);
    b.call(c, "g");
    b.call(c, "missing");
    let program = b.finish();

    let diags = check(&program, c);

    assert_eq!(
        render(&program, &diags),
        [
            "src/c.ts:1:10 - suggestion TS6385: 'g' is deprecated.",
            "src/c.ts:2:1 - suggestion TS6385: 'g' is deprecated.",
        ]
    );
}

#[test]
fn test_wildcard_with_js_extension() {
    let mut b = ProgramBuilder::new();
    deprecated_function(&mut b, "src/a.ts", "g");
    let m = b.file("src/b.ts");
    b.export_star(m, "./a.js");
    let c = b.file("src/c.ts");
    b.import(c, "./b", &["g"]);
    b.call(c, "g");
    let program = b.finish();

    // the host cannot resolve "./a.js"; both sites are found by retrying
    // without the extension
    assert_eq!(check(&program, c).len(), 2);
}

#[test]
fn test_wildcard_directory_under_classic_resolution() {
    let mut b = ProgramBuilder::new();
    b.options(CompilerOptions {
        module_resolution: ModuleResolutionKind::Classic,
        ..CompilerOptions::default()
    });
    deprecated_function(&mut b, "src/lib/index.ts", "g");
    let m = b.file("src/b.ts");
    b.export_star(m, "./lib");
    let c = b.file("src/c.ts");
    b.import(c, "./b", &["g"]);
    b.call(c, "g");
    let program = b.finish();

    let diags = check(&program, c);
    assert_eq!(diags.len(), 2);
    assert_eq!(related_at(&program, &diags[1]), "src/lib/index.ts:2:17");
}

// ============================================================================
// THIRD-PARTY MODULES
// ============================================================================

#[rstest]
#[case::package("legacy")]
#[case::relative_path("../node_modules/legacy/index")]
fn test_vendored_modules_are_skipped(#[case] specifier: &str) {
    let mut b = ProgramBuilder::new();
    deprecated_function(&mut b, "node_modules/legacy/index.d.ts", "old");
    let c = b.file("src/c.ts");
    b.import(c, specifier, &["old"]);
    b.call(c, "old");
    let program = b.finish();

    assert!(check(&program, c).is_empty());
}

#[test]
fn test_modules_outside_root_dir_are_skipped() {
    let mut b = ProgramBuilder::new();
    b.options(CompilerOptions {
        root_dir: Some("src".into()),
        ..CompilerOptions::default()
    });
    deprecated_function(&mut b, "lib/a.ts", "f");
    let c = b.file("src/c.ts");
    b.import(c, "../lib/a", &["f"]);
    b.call(c, "f");
    let program = b.finish();

    assert!(check(&program, c).is_empty());
}

#[test]
fn test_custom_vendored_segment() {
    let mut b = ProgramBuilder::new();
    deprecated_function(&mut b, "src/vendor/a.ts", "f");
    let c = b.file("src/c.ts");
    b.import(c, "./vendor/a", &["f"]);
    b.call(c, "f");
    let program = b.finish();

    assert_eq!(check(&program, c).len(), 2);
    let config = Config::new().with_vendored_segment("vendor");
    assert!(check_with(&program, c, &config).is_empty());
}

// ============================================================================
// TRAVERSAL
// ============================================================================

#[test]
fn test_declaring_file_flags_its_own_usages() {
    let mut b = ProgramBuilder::new();
    let a = deprecated_function(&mut b, "src/a.ts", "f");
    b.call(a, "f");
    let program = b.finish();

    assert_eq!(
        render(&program, &check(&program, a)),
        ["src/a.ts:3:1 - suggestion TS6385: 'f' is deprecated."]
    );
}

#[test]
fn test_passes_are_independent() {
    let mut b = ProgramBuilder::new();
    deprecated_function(&mut b, "src/a.ts", "f");
    let c = b.file("src/c.ts");
    b.import(c, "./a", &["f"]);
    b.call(c, "f");
    let program = b.finish();
    let config = Config::default();

    let first = check_with(&program, c, &config);
    let second = check_with(&program, c, &config);
    assert_eq!(first, second);

    let mut pass = DeprecationPass::new(&program, &config).expect("valid config");
    let once = pass.check_file(c).expect("known file");
    let again = pass.check_file(c).expect("known file");
    assert_eq!(once, again);
    assert!(pass.resolver().stats().hits > 0);
}
