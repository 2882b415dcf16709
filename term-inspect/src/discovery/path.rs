//! Path naming for traversal steps.
//!
//! A mapping step appends `.key` (bare `key` at the root) and a sequence step
//! appends `[i]` directly to the preceding segment, so `items`, `items[0]` and
//! `items[0].id` name successive levels of the same value.

/// Path of the entry `key` below `prefix`, or of a root entry when `prefix` is `None`.
pub fn join_key(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}.{key}"),
        None => key.to_string(),
    }
}

/// Path of element `index` below `prefix`, or of a root element when `prefix` is `None`.
pub fn join_index(prefix: Option<&str>, index: usize) -> String {
    format!("{}[{index}]", prefix.unwrap_or_default())
}

/// Number of traversal steps in `path`.
///
/// Counts separators, so it is exact only when keys contain neither `.` nor
/// `[`. Reports carry the depth observed during traversal instead.
pub fn path_depth(path: &str) -> usize {
    if path.is_empty() {
        return 0;
    }
    let separators = path.chars().filter(|c| *c == '.' || *c == '[').count();
    if path.starts_with('[') {
        separators
    } else {
        separators + 1
    }
}
