//! # Hint panel layout
//!
//! ## Overview
//!
//! The hint panel is a grid of fixed-width cells, one for each binding with a description:
//!
//! ```text
//!  _a_ → append^        _n_ → find next^     _<Esc>_ → exit^
//!  _c_ → change^        _q_ → skip^
//! ```
//!
//! Bindings are first put into a stable order with [compare_keys], then rendered into cells
//! [HintLayout::max_hint_length] columns wide (or as wide as the terminal, if that's narrower)
//! with [render_cell], and finally tiled column-major into as many columns as fit in the terminal.
//!
//! Keys are wrapped in `_` in the markup form of a cell so that the overlay can highlight them.
//! Every non-empty cell ends with a `^` marker, which takes up the last column of the cell.
use std::cmp::Ordering;

use serde::Deserialize;

use crate::binding::Binding;
use crate::width::{display_width, longest_prefix_within};

/// Shown after a truncated description.
pub const ELLIPSIS: &str = "... ";

/// Closes every non-empty cell, and occupies its last column.
pub const MARKER: char = '^';

/// Options controlling the built-in hint layout.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct HintLayout {
    /// The width of every cell in the grid, including the trailing marker.
    pub max_hint_length: usize,

    /// A fixed number of columns. When unset (or zero), as many columns as fit are used.
    pub column_count: Option<usize>,

    /// Placed between the key and its description.
    pub hint_separator: String,

    /// Blank lines above the panel, and spaces on either side of each line.
    pub padding: (usize, usize),
}

impl HintLayout {
    /// Blank lines placed above the panel. One more is placed below it.
    pub fn vertical_padding(&self) -> usize {
        self.padding.0
    }

    /// Spaces placed on each side of every line.
    pub fn horizontal_padding(&self) -> usize {
        self.padding.1
    }
}

impl Default for HintLayout {
    fn default() -> Self {
        HintLayout {
            max_hint_length: 25,
            column_count: None,
            hint_separator: String::from("→"),
            padding: (0, 1),
        }
    }
}

fn is_alphanumeric(key: &str) -> bool {
    !key.is_empty() && key.chars().all(char::is_alphanumeric)
}

/// Lowercase characters rank before everything else at the first position where two keys that
/// are equal ignoring case differ.
fn case_rank(c: char) -> (bool, char) {
    (!c.is_lowercase(), c)
}

/// Compare two key labels for display in the hint panel.
///
/// Keys are ordered by:
///
/// * Display width, narrowest first
/// * Alphanumeric labels before labels with other characters
/// * Case-insensitive lexicographic order
/// * At the first character where two case-insensitively equal keys differ, the lowercase one
/// * Byte-wise order
///
/// So `a` comes before `A`, which comes before `b`, and all single-column keys come before `<Esc>`.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    let wa = display_width(a);
    let wb = display_width(b);

    wa.cmp(&wb)
        .then_with(|| is_alphanumeric(b).cmp(&is_alphanumeric(a)))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.chars().map(case_rank).cmp(b.chars().map(case_rank)))
        .then_with(|| a.cmp(b))
}

/// Sort bindings into the order they're shown in the hint panel.
pub fn sort_bindings<H>(bindings: &mut [Binding<H>]) {
    bindings.sort_by(|a, b| compare_keys(&a.key, &b.key));
}

/// The number of columns to use for the given terminal width.
///
/// Unless fixed by [HintLayout::column_count], this is the largest `n` such that `n` cells and
/// the `n - 1` single-space gaps between them fit inside the horizontally padded terminal width.
/// There is always at least one column.
pub fn column_count(layout: &HintLayout, terminal_width: usize) -> usize {
    if let Some(n) = layout.column_count.filter(|n| *n > 0) {
        return n;
    }

    let available = usable_width(layout, terminal_width);
    let per_column = layout.max_hint_length.saturating_add(1);

    return (available.saturating_add(1) / per_column).max(1);
}

fn usable_width(layout: &HintLayout, terminal_width: usize) -> usize {
    terminal_width.saturating_sub(layout.horizontal_padding().saturating_mul(2))
}

/// The width each cell is rendered at: [HintLayout::max_hint_length], but never wider than the
/// horizontally padded terminal.
pub fn cell_width(layout: &HintLayout, terminal_width: usize) -> usize {
    layout.max_hint_length.min(usable_width(layout, terminal_width).max(1))
}

/// A single rendered cell of the hint panel.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HintCell {
    /// The cell with key emphasis markup, as handed to the overlay.
    pub markup: String,

    /// The cell as it appears on screen.
    pub plain: String,
}

impl HintCell {
    /// Whether this cell takes up no space in the panel.
    pub fn is_empty(&self) -> bool {
        self.plain.is_empty()
    }

    /// The number of columns this cell occupies on screen.
    pub fn width(&self) -> usize {
        display_width(&self.plain)
    }
}

/// Render a single binding into a cell `width` columns wide.
///
/// Bindings without a description produce an empty cell. Long descriptions are cut at the widest
/// prefix that still leaves room for [ELLIPSIS]; if not even the ellipsis fits, the description is
/// left out entirely. Every other cell is padded with spaces out to `width`.
///
/// The key and separator are always kept whole, so when they alone are wider than `width` the
/// cell comes out wider than `width` too.
pub fn render_cell(key: &str, desc: &str, width: usize, separator: &str) -> HintCell {
    if desc.is_empty() {
        return HintCell::default();
    }

    let left = format!("{key} {separator} ");
    let left_markup = format!("_{key}_ {separator} ");

    let available = width.saturating_sub(1).saturating_sub(display_width(&left));

    let (body, ellipsis) = if display_width(desc) <= available {
        (desc, "")
    } else if display_width(ELLIPSIS) <= available {
        let target = available - display_width(ELLIPSIS);

        (longest_prefix_within(desc, target), ELLIPSIS)
    } else {
        ("", "")
    };

    let mut plain = format!("{left}{body}{ellipsis}{MARKER}");
    let mut markup = format!("{left_markup}{body}{ellipsis}{MARKER}");

    let padding = " ".repeat(width.saturating_sub(display_width(&plain)));
    plain.push_str(&padding);
    markup.push_str(&padding);

    return HintCell { markup, plain };
}

/// The rendered hint panel, in both its markup and on-screen forms.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HintGrid {
    /// Lines with key emphasis markup.
    pub markup: Vec<String>,

    /// Lines as they appear on screen.
    pub plain: Vec<String>,
}

impl HintGrid {
    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.plain.is_empty()
    }

    /// The markup form of the panel, joined into a single string.
    pub fn markup_text(&self) -> String {
        self.markup.join("\n")
    }

    /// The on-screen form of the panel, joined into a single string.
    pub fn plain_text(&self) -> String {
        self.plain.join("\n")
    }
}

fn join_row<'a, I>(cells: I) -> String
where
    I: Iterator<Item = &'a str>,
{
    cells.filter(|c| !c.is_empty()).collect::<Vec<_>>().join(" ")
}

fn pad_vertical(lines: &mut Vec<String>, n: usize) {
    let mut padded = vec![String::new(); n];
    padded.append(lines);
    padded.resize(padded.len() + n + 1, String::new());

    *lines = padded;
}

/// Lay out bindings into the hint panel grid.
///
/// The bindings are sorted with [compare_keys] first, and then placed column-major: the binding
/// at sorted position `p` goes into column `p / rows` of row `p % rows`. Cells within a row are
/// separated by a single space, and rows with no visible cells are dropped. Cells are rendered at
/// [cell_width], so no cell is wider than the terminal.
pub fn render_grid<H>(
    layout: &HintLayout,
    bindings: &[Binding<H>],
    terminal_width: usize,
) -> HintGrid {
    let mut sorted = bindings.iter().collect::<Vec<_>>();
    sorted.sort_by(|a, b| compare_keys(&a.key, &b.key));

    let width = cell_width(layout, terminal_width);
    let cells = sorted
        .into_iter()
        .map(|b| render_cell(&b.key, b.desc(), width, &layout.hint_separator))
        .collect::<Vec<_>>();

    if cells.iter().all(HintCell::is_empty) {
        return HintGrid::default();
    }

    let columns = column_count(layout, terminal_width);
    let rows = cells.len().div_ceil(columns);

    tracing::trace!(cells = cells.len(), columns, rows, "laying out hint panel");

    let pad = " ".repeat(layout.horizontal_padding());
    let mut grid = HintGrid::default();

    for row in 0..rows {
        let members = (0..columns)
            .filter_map(|col| cells.get(col * rows + row))
            .collect::<Vec<_>>();

        let plain = join_row(members.iter().map(|c| c.plain.as_str()));

        if plain.is_empty() {
            continue;
        }

        let markup = join_row(members.iter().map(|c| c.markup.as_str()));

        grid.plain.push(format!("{pad}{plain}{pad}"));
        grid.markup.push(format!("{pad}{markup}{pad}"));
    }

    let vertical = layout.vertical_padding();

    if vertical > 0 && !grid.is_empty() {
        pad_vertical(&mut grid.plain, vertical);
        pad_vertical(&mut grid.markup, vertical);
    }

    return grid;
}

/// Render the hint panel text handed to the overlay.
pub fn render_hints<H>(layout: &HintLayout, bindings: &[Binding<H>], terminal_width: usize) -> String {
    render_grid(layout, bindings, terminal_width).markup_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::BindingOptions;
    use rand::seq::SliceRandom;

    fn binding(key: &str, desc: &str) -> Binding<()> {
        let desc = (!desc.is_empty()).then(|| desc.to_string());
        let options = BindingOptions { desc, exit: false, nowait: true };

        Binding::new(key, Some(()), options)
    }

    fn layout(max_hint_length: usize, column_count: Option<usize>) -> HintLayout {
        HintLayout {
            max_hint_length,
            column_count,
            hint_separator: String::from(":"),
            padding: (0, 0),
        }
    }

    #[test]
    fn test_compare_width_first() {
        assert_eq!(compare_keys("z", "aa"), Ordering::Less);
        assert_eq!(compare_keys("<Esc>", "a"), Ordering::Greater);
        assert_eq!(compare_keys("ab", "日"), Ordering::Less);
    }

    #[test]
    fn test_compare_alphanumeric_first() {
        assert_eq!(compare_keys("z", "."), Ordering::Less);
        assert_eq!(compare_keys("9", "]"), Ordering::Less);
        assert_eq!(compare_keys("gg", "g]"), Ordering::Less);
        assert_eq!(compare_keys("]", "a"), Ordering::Greater);
    }

    #[test]
    fn test_compare_case() {
        assert_eq!(compare_keys("a", "A"), Ordering::Less);
        assert_eq!(compare_keys("A", "b"), Ordering::Less);
        assert_eq!(compare_keys("B", "a"), Ordering::Greater);
        assert_eq!(compare_keys("aB", "Ab"), Ordering::Less);
        assert_eq!(compare_keys("ab", "aB"), Ordering::Less);
        assert_eq!(compare_keys("a", "a"), Ordering::Equal);
    }

    #[test]
    fn test_sort_bindings() {
        let mut bindings = ["<Esc>", "N", "]", "n", "b", "gg", "A", "a"]
            .into_iter()
            .map(|k| binding(k, "x"))
            .collect::<Vec<_>>();

        sort_bindings(&mut bindings);

        let keys = bindings.iter().map(|b| b.key.as_str()).collect::<Vec<_>>();
        assert_eq!(keys, vec!["a", "A", "b", "n", "N", "]", "gg", "<Esc>"]);
    }

    #[test]
    fn test_sort_total_order() {
        let keys = [
            "a", "A", "b", "B", "ab", "aB", "Ab", "AB", "]", "[", "<Esc>", "<C-n>", "<c-n>", "1",
            "日", "gg", "gG", "\\", "é", "É", "e\u{301}",
        ];

        let mut expected = keys.to_vec();
        expected.sort_by(|a, b| compare_keys(a, b));

        // Irreflexive and consistent in both directions.
        for a in keys.iter() {
            assert_eq!(compare_keys(a, a), Ordering::Equal);

            for b in keys.iter() {
                assert_eq!(compare_keys(a, b), compare_keys(b, a).reverse(), "{a} vs {b}");

                if a != b {
                    assert_ne!(compare_keys(a, b), Ordering::Equal, "{a} vs {b}");
                }
            }
        }

        // Sorted order is strictly increasing, and doesn't depend on the input order.
        for pair in expected.windows(2) {
            assert_eq!(compare_keys(pair[0], pair[1]), Ordering::Less);
        }

        let mut rng = rand::thread_rng();

        for _ in 0..50 {
            let mut shuffled = keys.to_vec();
            shuffled.shuffle(&mut rng);
            shuffled.sort_by(|a, b| compare_keys(a, b));
            assert_eq!(shuffled, expected);
        }
    }

    #[test]
    fn test_column_count() {
        // 3 * 20 + 2 gaps = 62 fits in 64, 4 * 20 + 3 = 83 doesn't.
        assert_eq!(column_count(&layout(20, None), 64), 3);
        assert_eq!(column_count(&layout(20, None), 62), 3);
        assert_eq!(column_count(&layout(20, None), 61), 2);

        // Padding is removed from both sides.
        let mut padded = layout(20, None);
        padded.padding = (0, 1);
        assert_eq!(column_count(&padded, 62), 2);
        assert_eq!(column_count(&padded, 64), 3);

        // Always at least one column.
        assert_eq!(column_count(&layout(20, None), 5), 1);
        assert_eq!(column_count(&layout(20, None), 0), 1);

        // Fixed column counts are used as-is.
        assert_eq!(column_count(&layout(20, Some(5)), 10), 5);
        assert_eq!(column_count(&layout(20, Some(0)), 64), 3);

        // Oversized values degrade to a single column.
        assert_eq!(column_count(&layout(usize::MAX, None), 80), 1);

        let mut padded = layout(20, None);
        padded.padding = (0, usize::MAX);
        assert_eq!(column_count(&padded, 80), 1);
    }

    #[test]
    fn test_cell_width() {
        assert_eq!(cell_width(&layout(20, None), 80), 20);
        assert_eq!(cell_width(&layout(20, None), 12), 12);
        assert_eq!(cell_width(&layout(usize::MAX, Some(3)), 80), 80);
        assert_eq!(cell_width(&layout(20, None), 0), 1);

        let mut padded = layout(20, None);
        padded.padding = (0, 5);
        assert_eq!(cell_width(&padded, 20), 10);
    }

    #[test]
    fn test_grid_huge_cells() {
        let huge: HintLayout =
            serde_json::from_str(r#"{"max_hint_length": 18446744073709551615, "padding": [0, 0]}"#)
                .unwrap();
        assert_eq!(huge.max_hint_length, usize::MAX);

        // Cells shrink to the terminal instead of overflowing.
        let bindings = vec![binding("a", "A"), binding("b", "B")];
        let grid = render_grid(&huge, &bindings, 10);
        assert_eq!(grid.plain, vec!["a → A^    ", "b → B^    "]);

        let mut fixed = huge.clone();
        fixed.column_count = Some(2);
        let grid = render_grid(&fixed, &bindings, 10);
        assert_eq!(grid.plain, vec!["a → A^     b → B^    "]);
    }

    #[test]
    fn test_render_cell_wide_key() {
        // The key and separator are kept whole even when they don't fit.
        let cell = render_cell("<C-S-Right>", "word", 10, "→");
        assert_eq!(cell.plain, "<C-S-Right> → ^");
        assert_eq!(cell.width(), 15);
    }

    #[test]
    fn test_render_cell_fits() {
        let cell = render_cell("a", "select next", 20, "→");
        assert_eq!(cell.plain, "a → select next^    ");
        assert_eq!(cell.markup, "_a_ → select next^    ");
        assert_eq!(cell.width(), 20);
    }

    #[test]
    fn test_render_cell_truncated() {
        // 20 - 1 for the marker - 4 for "a → " leaves 15 columns, and 11 after the ellipsis.
        let cell = render_cell("a", "select next match", 20, "→");
        assert_eq!(cell.plain, "a → select next... ^");
        assert_eq!(cell.markup, "_a_ → select next... ^");
        assert_eq!(cell.width(), 20);

        // Exactly fitting descriptions aren't truncated.
        let cell = render_cell("a", "select next abc", 20, "→");
        assert_eq!(cell.plain, "a → select next abc^");
    }

    #[test]
    fn test_render_cell_wide_glyphs() {
        // 12 - 1 - 4 = 7 available; 3 after the ellipsis, which fits only one wide glyph.
        let cell = render_cell("x", "日本語です", 12, ":");
        assert_eq!(cell.plain, "x : 日... ^ ");
        assert_eq!(cell.width(), 12);
    }

    #[test]
    fn test_render_cell_empty_desc() {
        let cell = render_cell("b", "", 20, "→");
        assert!(cell.is_empty());
        assert_eq!(cell.markup, "");
    }

    #[test]
    fn test_render_cell_narrow() {
        // Nothing left for the description, and the ellipsis doesn't fit either.
        let cell = render_cell("a", "select", 5, "→");
        assert_eq!(cell.plain, "a → ^");
        assert_eq!(cell.width(), 5);

        // Only the ellipsis fits.
        let cell = render_cell("a", "select", 9, "→");
        assert_eq!(cell.plain, "a → ... ^");
        assert_eq!(cell.width(), 9);
    }

    #[test]
    fn test_render_cell_width_invariant() {
        let descs = ["", "a", "find", "select next match", "日本語です", "e\u{301}e\u{301}e\u{301}"];

        for width in 5..30 {
            for desc in descs {
                let cell = render_cell("n", desc, width, "→");

                if desc.is_empty() {
                    assert!(cell.is_empty());
                } else {
                    assert_eq!(cell.width(), width, "{desc:?} in {width}");
                    assert!(cell.plain.ends_with(MARKER) || cell.plain.ends_with(' '));
                }
            }
        }
    }

    #[test]
    fn test_grid_column_major() {
        let bindings = vec![binding("c", "C"), binding("a", "A"), binding("b", "B")];
        let grid = render_grid(&layout(6, Some(2)), &bindings, 80);

        // rows = 2, so "c" (the third key) lands in column 2 of row 0.
        assert_eq!(grid.plain, vec!["a : A^ c : C^", "b : B^"]);
        assert_eq!(grid.markup, vec!["_a_ : A^ _c_ : C^", "_b_ : B^"]);
    }

    #[test]
    fn test_grid_auto_columns() {
        let bindings = ["a", "b", "c", "d", "e"].map(|k| binding(k, "x"));

        // Two 6-column cells and a gap fit in 13 columns, three don't.
        let grid = render_grid(&layout(6, None), &bindings, 13);
        assert_eq!(grid.plain, vec!["a : x^ d : x^", "b : x^ e : x^", "c : x^"]);
    }

    #[test]
    fn test_grid_gap_suppression() {
        let bindings = vec![binding("a", "A"), binding("b", "B"), binding("c", ""), binding("d", "")];
        let grid = render_grid(&layout(6, Some(2)), &bindings, 80);

        // No gap is left behind for the empty cells in the second column.
        assert_eq!(grid.plain, vec!["a : A^", "b : B^"]);
    }

    #[test]
    fn test_grid_skips_empty_rows() {
        let bindings = vec![binding("a", ""), binding("b", "B"), binding("c", ""), binding("d", "")];
        let grid = render_grid(&layout(6, Some(2)), &bindings, 80);

        assert_eq!(grid.plain, vec!["b : B^"]);
    }

    #[test]
    fn test_grid_empty() {
        let grid = render_grid::<()>(&HintLayout::default(), &[], 80);
        assert!(grid.is_empty());
        assert_eq!(grid.markup_text(), "");

        let bindings = vec![binding("a", ""), binding("b", "")];
        assert_eq!(render_hints(&HintLayout::default(), &bindings, 80), "");
    }

    #[test]
    fn test_grid_padding() {
        let bindings = vec![binding("a", "A")];

        let mut layout = layout(6, None);
        layout.padding = (2, 3);

        let grid = render_grid(&layout, &bindings, 80);
        assert_eq!(grid.plain, vec!["", "", "   a : A^   ", "", "", ""]);
        assert_eq!(grid.plain_text(), "\n\n   a : A^   \n\n\n");
    }

    #[test]
    fn test_layout_deserialize() {
        let layout: HintLayout = serde_json::from_str(
            r#"{"max_hint_length": 30, "hint_separator": "=", "padding": [1, 2]}"#,
        )
        .unwrap();

        assert_eq!(layout.max_hint_length, 30);
        assert_eq!(layout.column_count, None);
        assert_eq!(layout.hint_separator, "=");
        assert_eq!(layout.vertical_padding(), 1);
        assert_eq!(layout.horizontal_padding(), 2);

        let layout: HintLayout = serde_json::from_str(r#"{"column_count": 4}"#).unwrap();
        assert_eq!(layout.column_count, Some(4));
        assert_eq!(layout.max_hint_length, HintLayout::default().max_hint_length);
    }
}
