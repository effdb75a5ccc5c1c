//! Checks model answers against the files the walk actually saw.

use std::collections::{BTreeSet, HashSet};

use tracing::warn;

/// Outcome of validating a model answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedFiles {
    /// Known paths, normalized, first occurrence order.
    pub accepted: Vec<String>,

    /// Paths the walk never saw, as the model wrote them.
    pub rejected: Vec<String>,
}

/// Normalize a model-written path to the walk's root-relative form.
pub fn normalize_path(path: &str) -> String {
    let mut normalized = path.trim().replace('\\', "/");
    while let Some(rest) = normalized.strip_prefix("./") {
        normalized = rest.to_string();
    }
    normalized
}

/// Drop the tree header `root` from the front of `path`.
///
/// `tree` prints the root argument as its first line, so a model may answer
/// `../app/src/a.ts` for the walk path `src/a.ts`.
fn strip_root<'a>(path: &'a str, root: &str) -> &'a str {
    let root = normalize_path(root);
    let root = root.trim_end_matches('/');
    if root.is_empty() || root == "." {
        return path;
    }
    path.strip_prefix(root)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(path)
}

/// Keep the answer's paths that exist in `known`, dropping duplicates.
///
/// `root` is the root as the directory tree displayed it; paths prefixed
/// with it are accepted in their root-relative form.
pub fn validate_paths(
    answer: &[String],
    known: &BTreeSet<String>,
    root: &str,
) -> ValidatedFiles {
    let mut seen = HashSet::new();
    let mut result = ValidatedFiles::default();

    for raw in answer {
        let mut path = normalize_path(raw);
        if !known.contains(&path) {
            path = strip_root(&path, root).to_string();
        }
        if !known.contains(&path) {
            warn!("Dropping path not present in the repository: {raw}");
            result.rejected.push(raw.clone());
            continue;
        }
        if seen.insert(path.clone()) {
            result.accepted.push(path);
        }
    }

    result
}
