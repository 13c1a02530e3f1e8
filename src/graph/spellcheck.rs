// src/graph/spellcheck.rs

//! Bounded edit distance for "did you mean ..." target diagnostics.

/// Levenshtein distance between `s1` and `s2`, computed over bytes.
///
/// With `allow_replacements` a substitution counts as a single edit,
/// otherwise as a deletion plus an insertion. A non-zero
/// `max_edit_distance` short-circuits the computation: once every
/// prefix alignment already exceeds it, `max_edit_distance + 1` is
/// returned immediately.
pub fn edit_distance(
    s1: &str,
    s2: &str,
    allow_replacements: bool,
    max_edit_distance: usize,
) -> usize {
    let a = s1.as_bytes();
    let b = s2.as_bytes();

    // Single-row DP; row[j] holds the distance between a[..i] and b[..j].
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for i in 1..=a.len() {
        let mut prev_diag = row[0];
        row[0] = i;
        let mut best_this_row = row[0];

        for j in 1..=b.len() {
            let prev = row[j];
            row[j] = if allow_replacements {
                let subst = prev_diag + usize::from(a[i - 1] != b[j - 1]);
                subst.min(row[j].min(row[j - 1]) + 1)
            } else if a[i - 1] == b[j - 1] {
                prev_diag
            } else {
                row[j].min(row[j - 1]) + 1
            };
            prev_diag = prev;
            best_this_row = best_this_row.min(row[j]);
        }

        if max_edit_distance != 0 && best_this_row > max_edit_distance {
            return max_edit_distance + 1;
        }
    }

    row[b.len()]
}
