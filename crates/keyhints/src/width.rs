//! # Display width helpers
//!
//! Terminal cells are measured in columns, not bytes or codepoints: CJK glyphs and most emoji take
//! two columns, while combining marks take none. These helpers measure and cut strings by the
//! number of columns they occupy, and never split a grapheme cluster.
use std::iter::once;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The number of terminal columns needed to show `s`.
#[inline]
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Return the longest prefix of `s` that fits within `budget` columns.
///
/// The cut is chosen by binary searching over grapheme boundaries, comparing the width of each
/// candidate prefix against the budget, so the result always ends on a grapheme boundary.
pub fn longest_prefix_within(s: &str, budget: usize) -> &str {
    if display_width(s) <= budget {
        return s;
    }

    let cuts = UnicodeSegmentation::grapheme_indices(s, true)
        .map(|(i, _)| i)
        .chain(once(s.len()))
        .collect::<Vec<_>>();

    // The empty prefix always fits, so there is at least one cut point on the left side.
    let fits = cuts.partition_point(|&cut| display_width(&s[..cut]) <= budget);
    let end = cuts[fits.saturating_sub(1)];

    return &s[..end];
}
