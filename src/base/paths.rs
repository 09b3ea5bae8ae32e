//! `/`-separated module paths.
//!
//! Paths here are the program's own file names, not OS paths: they are never
//! touched on disk, so plain string folding is all that is needed.

/// Everything before the last `/`; `""` for a bare file name.
pub fn parent_dir(path: &str) -> &str {
    path.rfind('/').map_or("", |i| &path[..i])
}

/// Join a relative specifier onto `dir`, folding `.` and `..` segments.
///
/// A specifier starting with `/` replaces `dir`. The result is absolute when
/// either input is.
pub fn join_path(dir: &str, spec: &str) -> String {
    let mut parts: Vec<&str> = if spec.starts_with('/') {
        Vec::new()
    } else {
        dir.split('/').filter(|p| !p.is_empty()).collect()
    };
    for part in spec.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    let joined = parts.join("/");
    if dir.starts_with('/') || spec.starts_with('/') {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Whether `path` is `root` or lies below it, on segment boundaries.
pub fn is_under(path: &str, root: &str) -> bool {
    let root = root.trim_end_matches('/');
    path.strip_prefix(root)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// `./x`, `../x` and `/x`, as opposed to bare package names.
pub fn is_relative_specifier(spec: &str) -> bool {
    matches!(spec, "." | "..")
        || spec.starts_with("./")
        || spec.starts_with("../")
        || spec.starts_with('/')
}
