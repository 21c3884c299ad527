//! Pure string operations on paths
//!
//! Everything in this module works on forward-slash path strings and never
//! touches the filesystem. Separator unification, segment joining and
//! extension splitting are the building blocks the resolver composes.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::str::FromStr;

use crate::environment::Environment;

/// Policy selecting which dot in a multi-dot filename marks the extension
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtDot {
    /// Split at the first dot after the last separator
    /// (`c.min.coffee` -> `c` + `.min.coffee`)
    #[default]
    First,
    /// Split at the last dot (`c.min.coffee` -> `c.min` + `.coffee`)
    Last,
}

impl FromStr for ExtDot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first" => Ok(ExtDot::First),
            "last" => Ok(ExtDot::Last),
            _ => Err(format!("Unknown extension boundary: {s}")),
        }
    }
}

/// Matches the extension starting at the first dot of the final segment.
static EXT_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\.[^/]*)?$").expect("Failed to compile regex pattern for EXT_FIRST")
});

/// Matches the extension starting at the last dot of the final segment.
static EXT_LAST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\.[^/.]*)?$").expect("Failed to compile regex pattern for EXT_LAST")
});

static SEPARATOR_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new("/{2,}").expect("Failed to compile regex pattern for SEPARATOR_RUN")
});

/// Replace every back-slash with a forward slash.
///
/// Idempotent; does not resolve `.` or `..` segments.
pub fn unify(path: &str) -> String {
    path.replace('\\', "/")
}

/// Join path segments with single forward slashes.
///
/// Empty segments are skipped and redundant separators collapsed, so
/// `join(["a/", "/b"])` is `"a/b"`. A leading slash on the first non-empty
/// segment is preserved. Joining nothing yields the empty string.
pub fn join<'a, I>(segments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut joined = String::new();
    for segment in segments {
        if segment.is_empty() {
            continue;
        }
        if joined.is_empty() {
            joined.push_str(segment);
        } else {
            if !joined.ends_with('/') {
                joined.push('/');
            }
            joined.push_str(segment.trim_start_matches('/'));
        }
    }
    SEPARATOR_RUN.replace_all(&joined, "/").into_owned()
}

/// The final path segment, directory components dropped.
pub fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Split a path into stem and extension at the boundary selected by `mode`.
///
/// The extension keeps its leading dot; a path without any dot in its final
/// segment yields an empty extension.
pub fn split_extension(path: &str, mode: ExtDot) -> (&str, &str) {
    let pattern = match mode {
        ExtDot::First => &EXT_FIRST,
        ExtDot::Last => &EXT_LAST,
    };
    match pattern.find(path) {
        Some(found) if !found.as_str().is_empty() => {
            (&path[..found.start()], &path[found.start()..])
        }
        _ => (path, ""),
    }
}

/// Replace the extension of `path` with `ext`.
///
/// `ext` is normalised to start with a dot unless it is empty; an empty
/// `ext` strips the extension. A bare trailing dot left behind by the
/// replacement is stripped as well.
pub fn replace_extension(path: &str, ext: &str, mode: ExtDot) -> String {
    let normalized = if ext.is_empty() || ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    };

    let (stem, _) = split_extension(path, mode);
    let mut replaced = format!("{stem}{normalized}");
    if replaced.ends_with('.') {
        replaced.pop();
    }
    replaced
}

/// Expand a special leading prefix in a configured directory.
///
/// A leading `~` expands to the environment's home directory, a leading `@`
/// to its global packages root. Expansion happens at most once and never
/// recurses; when the environment cannot resolve the root the input is
/// returned unchanged.
pub fn expand_prefix(dir: &str, environment: &dyn Environment) -> String {
    if dir.starts_with('~') {
        return shellexpand::tilde_with_context(dir, || {
            environment
                .home_dir()
                .map(|home| home.to_string_lossy().into_owned())
        })
        .into_owned();
    }

    if let Some(rest) = dir.strip_prefix('@') {
        if let Some(root) = environment.global_packages_dir() {
            let root = root.to_string_lossy().into_owned();
            let rest = rest.trim_start_matches(['/', '\\']);
            if rest.is_empty() {
                return root;
            }
            return join([root.as_str(), rest]);
        }
    }

    dir.to_string()
}
