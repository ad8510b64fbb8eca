//! Sort keys and ordering of completion results
//!
//! Clients order candidates by `sortText`, so every resolver encodes its
//! ranking into the candidate's sort key:
//! 1. Reference labels: unused (`0-`) before used (`1-`), then by label
//! 2. Math commands: case-insensitive, lowercase before uppercase on ties
//! 3. Paths: `.` sorts before letters and digits, so `name` and its
//!    directory come ahead of `name.ext`
//! 4. Everything else: the label itself

use std::cmp::Ordering;

use super::item::CandidateItem;

/// Sort key grouping never-referenced labels first
pub fn usage_sort_key(label: &str, usage_count: usize) -> String {
    if usage_count == 0 {
        format!("0-{label}")
    } else {
        format!("1-{label}")
    }
}

/// Case-folded sort key for math command labels
///
/// Each lowercase letter becomes `0<c>`, each uppercase letter `1<lower>`.
/// Everything else is kept as is.
pub fn math_sort_key(label: &str) -> String {
    let mut key = String::with_capacity(label.len() * 2);
    for c in label.chars() {
        if c.is_ascii_lowercase() {
            key.push('0');
            key.push(c);
        } else if c.is_ascii_uppercase() {
            key.push('1');
            key.push(c.to_ascii_lowercase());
        } else {
            key.push(c);
        }
    }
    key
}

/// Sort key for relative path labels
pub fn path_sort_key(label: &str) -> String {
    label.replace('.', "!")
}

/// Order candidates by sort key, then label
pub fn sort_candidates(items: &mut [CandidateItem]) {
    items.sort_by(compare_candidates);
}

fn compare_candidates(a: &CandidateItem, b: &CandidateItem) -> Ordering {
    a.sort_key
        .cmp(&b.sort_key)
        .then_with(|| a.label.cmp(&b.label))
}
