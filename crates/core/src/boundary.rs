//! Boundary extraction from space-delimited hex lines.
//!
//! A dissection line such as `"90 78 EB1B"` is split into its base string
//! (`"9078EB1B"`) and the set of character offsets where a space stood
//! (`{2, 4}`). Offsets count characters of the base string, so offset `n`
//! means "a boundary sits immediately before base character `n`".

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundaryLine {
    pub base: String,
    pub boundaries: BTreeSet<usize>,
}

impl BoundaryLine {
    /// Boundaries at or before `limit`.
    pub fn boundaries_up_to(&self, limit: usize) -> BTreeSet<usize> {
        self.boundaries.range(..=limit).copied().collect()
    }

    /// Re-insert a single space at every boundary offset.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.base.len() + self.boundaries.len());
        for (index, ch) in self.base.chars().enumerate() {
            if index > 0 && self.boundaries.contains(&index) {
                out.push(' ');
            }
            out.push(ch);
        }
        out
    }
}

/// Split `line` into base string and boundary set.
///
/// Trailing newline characters are dropped; any run of whitespace inside the
/// line counts as one boundary. A blank line yields an empty base and no
/// boundaries.
pub fn extract(line: &str) -> BoundaryLine {
    let line = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let mut result = BoundaryLine::default();
    let Some((last, leading)) = tokens.split_last() else {
        return result;
    };

    let mut position = 0;
    for token in leading {
        position += token.chars().count();
        result.boundaries.insert(position);
        result.base.push_str(token);
    }
    result.base.push_str(last);
    result
}
