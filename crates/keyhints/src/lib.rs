//! # keyhints
//!
//! ## Overview
//!
//! This crate provides environment-agnostic helpers for describing the keys available in a modal
//! input layer, and for generating a compact, width-accurate cheat sheet of them.
//!
//! Consumers describe a mode as a map of key labels to [Action] values, which [normalize] turns
//! into a list of [Binding] triples. A [HintSource] then decides what text to show for the mode:
//! a fixed label, a user-supplied string or function, or a grid built by the [layout] engine.
//!
//! All width calculations are done in terminal columns (see [width]), so descriptions containing
//! wide glyphs are truncated and padded correctly.
//!
//! ## Example
//!
//! ```
//! use keyhints::{normalize, Action, ActionOptions, HintLayout, HintSource};
//!
//! let actions = vec![
//!     ("n", Action::new((), ActionOptions::desc("find next"))),
//!     ("q", Action::new((), ActionOptions::desc("skip"))),
//!     ("N", Action::Disabled),
//! ];
//!
//! let bindings = normalize(actions, true);
//! assert_eq!(bindings.len(), 2);
//!
//! let layout = HintLayout {
//!     max_hint_length: 16,
//!     column_count: None,
//!     hint_separator: String::from(":"),
//!     padding: (0, 0),
//! };
//!
//! let hint = HintSource::Auto.render(&layout, &bindings, "demo", 33);
//! assert_eq!(hint, "_n_ : find next^   _q_ : skip^       ");
//! ```

// Require docs for public APIs, and disable the more annoying clippy lints.
#![deny(missing_docs)]
#![allow(clippy::bool_to_int_with_if)]
#![allow(clippy::field_reassign_with_default)]
#![allow(clippy::len_without_is_empty)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::match_like_matches_macro)]
#![allow(clippy::needless_return)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::type_complexity)]

pub mod binding;
pub mod layout;
pub mod source;
pub mod width;

pub use self::binding::{normalize, Action, ActionOptions, Binding, BindingOptions};
pub use self::layout::{
    cell_width,
    column_count,
    compare_keys,
    render_cell,
    render_grid,
    render_hints,
    sort_bindings,
    HintCell,
    HintGrid,
    HintLayout,
};
pub use self::source::{HintFn, HintSetting, HintSource};
pub use self::width::{display_width, longest_prefix_within};
