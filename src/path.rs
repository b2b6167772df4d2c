//! Lexical path helpers for `/`-separated storage paths.
//! These never touch storage: `..` and `.` are resolved purely on the string.

use crate::errors::{FsError, Result};

/// Join segments with exactly one `/` between each.
///
/// Segments are trimmed; the left side loses one trailing `/` and the right side one
/// leading `/`, so a leading `/` on the first segment (absolute path) and a trailing
/// `/` on the last survive.
///
/// ```
/// use fs_manager::path::join;
/// assert_eq!(join(&["a", "b", "c"]).unwrap(), "a/b/c");
/// assert_eq!(join(&["a/b/", "/c/d"]).unwrap(), "a/b/c/d");
/// ```
pub fn join<S: AsRef<str>>(segments: &[S]) -> Result<String> {
    let (first, rest) = segments
        .split_first()
        .ok_or_else(|| FsError::InvalidPath("join needs at least one segment".into()))?;

    let mut joined = first.as_ref().trim().to_string();
    for segment in rest {
        let previous = joined.strip_suffix('/').unwrap_or(&joined);
        let current = segment.as_ref().trim();
        let current = current.strip_prefix('/').unwrap_or(current);
        joined = format!("{previous}/{current}");
    }
    Ok(joined)
}

/// Collapse repeated separators and resolve `.`/`..` lexically.
///
/// A `..` pops the previously kept segment unless that segment is itself `..`;
/// when the kept list is (or becomes) empty the `..` is retained, so paths can
/// climb above the point they were joined to. A trailing `/` is preserved.
///
/// ```
/// use fs_manager::path::normalize;
/// assert_eq!(normalize("a/b/c/../d"), "a/b/d");
/// assert_eq!(normalize("a/b/c/../../../d"), "../d");
/// ```
pub fn normalize(path: &str) -> String {
    let parts: Vec<&str> = path.split('/').collect();
    let last = parts.len() - 1;
    let mut kept: Vec<&str> = Vec::with_capacity(parts.len());

    for (i, part) in parts.into_iter().enumerate() {
        // Empty parts only survive as the leading root or the trailing slash.
        if part.is_empty() && i != 0 && i != last {
            continue;
        }
        match part {
            ".." if kept.last() != Some(&"..") => {
                kept.pop();
                if kept.is_empty() {
                    kept.push("..");
                }
            }
            "." => {}
            _ => kept.push(part),
        }
    }
    kept.join("/")
}

/// Everything before the last `/`; empty when there is none.
pub fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(i) => &path[..i],
        None => "",
    }
}

/// Final `/`-separated segment, optionally without a trailing `.<ext>`.
/// `ext` may be passed with or without its leading dot.
pub fn basename<'a>(path: &'a str, ext: Option<&str>) -> &'a str {
    let base = path.rsplit('/').next().unwrap_or(path);
    let Some(ext) = ext.map(|e| e.strip_prefix('.').unwrap_or(e)) else {
        return base;
    };
    if ext.is_empty() {
        return base;
    }
    base.strip_suffix(ext)
        .and_then(|stem| stem.strip_suffix('.'))
        .unwrap_or(base)
}

/// Extension of the final segment including its dot; a dot in first position
/// (hidden files such as `.index`) does not start an extension.
pub fn extname(path: &str) -> &str {
    let base = basename(path, None);
    match base.rfind('.') {
        Some(i) if i > 0 => &base[i..],
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_single_slash_between_segments() {
        assert_eq!(join(&["a", "b", "c"]).unwrap(), "a/b/c");
        assert_eq!(join(&["a/b", "c/d"]).unwrap(), "a/b/c/d");
        assert_eq!(join(&["a/", "/b"]).unwrap(), "a/b");
        assert_eq!(join(&[" a ", " b "]).unwrap(), "a/b");
        assert_eq!(join(&["/root", "x/"]).unwrap(), "/root/x/");
        assert_eq!(join(&["", "a"]).unwrap(), "/a");
        assert_eq!(join(&["only"]).unwrap(), "only");
    }

    #[test]
    fn join_rejects_empty_list() {
        let empty: [&str; 0] = [];
        let err = join(&empty).unwrap_err();
        assert_eq!(err.kind(), crate::FsErrorKind::InvalidPath);
    }

    #[test]
    fn normalize_resolves_dots() {
        assert_eq!(normalize("a/b/c"), "a/b/c");
        assert_eq!(normalize("a/b/c/"), "a/b/c/");
        assert_eq!(normalize("a/b/c/.."), "a/b");
        assert_eq!(normalize("a/b/c/../d"), "a/b/d");
        assert_eq!(normalize("a/b/c/../../d"), "a/d");
        assert_eq!(normalize("a/b/c/../../../d"), "../d");
        assert_eq!(normalize("a/b/c/../../../d/"), "../d/");
        assert_eq!(normalize("./a/./b"), "a/b");
        assert_eq!(normalize("a//b///c"), "a/b/c");
        assert_eq!(normalize("/abs//path/./x"), "/abs/path/x");
        assert_eq!(normalize("../../a"), "../../a");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("."), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "a/b/c/../../../d",
            "a/b/c/../../../d/",
            "../../x/./y//z/..",
            "/a/b/../c/",
            "./.././a",
            "a/../../b/../..",
            "//",
            "",
            "..",
            "x/.",
        ];
        for p in samples {
            let once = normalize(p);
            assert_eq!(normalize(&once), once, "not idempotent for {p:?}");
        }
    }

    #[test]
    fn dirname_and_basename() {
        assert_eq!(dirname("a/b/c"), "a/b");
        assert_eq!(dirname("a/b/c/"), "a/b/c");
        assert_eq!(dirname("/a"), "");
        assert_eq!(dirname("a"), "");
        assert_eq!(basename("a/b/c/index.html", None), "index.html");
        assert_eq!(basename("a/b/c/index.html", Some(".html")), "index");
        assert_eq!(basename("a/b/c/index.html", Some("html")), "index");
        assert_eq!(basename("a/b/c/index.html", Some("md")), "index.html");
        assert_eq!(basename("a/b/", None), "");
        assert_eq!(basename("plain", None), "plain");
    }

    #[test]
    fn join_of_dirname_and_basename_normalizes_back() {
        let samples = ["a/b/c", "/a", "a/b/../c", "x/./y/z.txt", "a/b/c/../../../d"];
        for p in samples {
            let rebuilt = join(&[dirname(p), basename(p, None)]).unwrap();
            assert_eq!(normalize(&rebuilt), normalize(p), "mismatch for {p:?}");
        }
    }

    #[test]
    fn extname_cases() {
        assert_eq!(extname("index.html"), ".html");
        assert_eq!(extname("index.coffee.md"), ".md");
        assert_eq!(extname("index."), ".");
        assert_eq!(extname("index"), "");
        assert_eq!(extname(".index"), "");
        assert_eq!(extname(".index.md"), ".md");
        assert_eq!(extname("dir.d/file"), "");
        assert_eq!(extname("dir/archive.tar.gz"), ".gz");
    }
}
