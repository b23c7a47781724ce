//! # Configuration
//!
//! ## Overview
//!
//! [Config] holds everything the layers are built from: the keys of each mode, which keys enter
//! the other layers from Normal, where each mode's hint text comes from, and how it's laid out and
//! displayed. Reading and merging configuration files is left to the host; the plain-data parts
//! ([LayerKeys], [HintDisplay], and [keyhints::HintLayout]) can be deserialized with serde.
use std::collections::HashMap;
use std::fmt;

use keyhints::{Action, HintLayout, HintSource};
use serde::Deserialize;

use crate::overlay::Callback;

/// The keys of a single mode.
pub type KeyMap = HashMap<String, Action<Callback>>;

/// Keys that Normal uses to exit the session or switch to another layer.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct LayerKeys {
    /// Ends the multi-cursor session.
    pub exit: String,

    /// Inserts text before each cursor.
    pub insert: String,

    /// Replaces each selection.
    pub change: String,

    /// Inserts text after each cursor.
    pub append: String,

    /// Extends each selection.
    pub extend: String,
}

impl Default for LayerKeys {
    fn default() -> Self {
        LayerKeys {
            exit: String::from("<Esc>"),
            insert: String::from("i"),
            change: String::from("c"),
            append: String::from("a"),
            extend: String::from("e"),
        }
    }
}

/// Where the hint text of each mode comes from.
#[derive(Clone, Debug, Default)]
pub struct ModeHints {
    /// Hint source for Normal.
    pub normal: HintSource<Callback>,

    /// Hint source for Insert.
    pub insert: HintSource<Callback>,

    /// Hint source for Extend.
    pub extend: HintSource<Callback>,
}

/// What kind of window the hint panel is shown in.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HintKind {
    /// A dedicated window at the edge of the screen.
    Window,

    /// The command line.
    Cmdline,

    /// The status line.
    Statusline,
}

/// Where on screen the hint panel is placed.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum HintPosition {
    /// Bottom edge, centered.
    Bottom,

    /// Bottom left corner.
    BottomLeft,

    /// Bottom right corner.
    BottomRight,

    /// Top edge, centered.
    Top,

    /// Middle of the screen.
    Middle,
}

/// Options for floating hint windows.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct FloatOptions {
    /// Border style, such as `"none"` or `"rounded"`.
    pub border: Option<String>,

    /// Window transparency, from 0 to 100.
    pub winblend: Option<u8>,
}

impl FloatOptions {
    /// Fill in any unset options from `defaults`.
    pub fn merge(self, defaults: &FloatOptions) -> FloatOptions {
        FloatOptions {
            border: self.border.or_else(|| defaults.border.clone()),
            winblend: self.winblend.or(defaults.winblend),
        }
    }
}

/// How the overlay shows the hint panel.
///
/// Every field is optional, so that user-provided options can be layered over the defaults with
/// [HintDisplay::merge].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct HintDisplay {
    /// What kind of window to show the panel in.
    #[serde(rename = "type")]
    pub kind: Option<HintKind>,

    /// Where to place the panel.
    pub position: Option<HintPosition>,

    /// Lines between the panel and the edge of the screen.
    pub offset: Option<u16>,

    /// Whether to show the layer name along with the panel.
    pub show_name: Option<bool>,

    /// Options for floating windows.
    pub float_opts: Option<FloatOptions>,
}

impl HintDisplay {
    /// The display options used when the user hasn't set any.
    pub fn defaults() -> HintDisplay {
        HintDisplay {
            kind: Some(HintKind::Window),
            position: Some(HintPosition::Bottom),
            offset: Some(0),
            show_name: Some(true),
            float_opts: Some(FloatOptions { border: Some(String::from("none")), winblend: None }),
        }
    }

    /// Fill in any unset options from `defaults`, recursing into nested options.
    ///
    /// Values already set in `self` are always kept.
    pub fn merge(self, defaults: &HintDisplay) -> HintDisplay {
        let float_opts = match (self.float_opts, &defaults.float_opts) {
            (Some(mine), Some(theirs)) => Some(mine.merge(theirs)),
            (Some(mine), None) => Some(mine),
            (None, theirs) => theirs.clone(),
        };

        HintDisplay {
            kind: self.kind.or(defaults.kind),
            position: self.position.or(defaults.position),
            offset: self.offset.or(defaults.offset),
            show_name: self.show_name.or(defaults.show_name),
            float_opts,
        }
    }
}

/// Everything needed to build the multi-cursor layers.
#[derive(Clone)]
pub struct Config {
    /// Keys available in Normal, in addition to those named by [Config::layer_keys].
    pub normal_keys: KeyMap,

    /// Keys available in Insert.
    pub insert_keys: KeyMap,

    /// Keys available in Extend.
    pub extend_keys: KeyMap,

    /// Whether keys fire without waiting for a disambiguating timeout, unless a key says
    /// otherwise.
    pub nowait: bool,

    /// Keys that Normal uses to leave the session or switch layers.
    pub layer_keys: LayerKeys,

    /// Where each mode's hint text comes from.
    pub generate_hints: ModeHints,

    /// The built-in hint layout.
    pub hint_layout: HintLayout,

    /// How the overlay shows the hint panel.
    pub hint_config: HintDisplay,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn keys(map: &KeyMap) -> Vec<&str> {
            let mut keys = map.keys().map(String::as_str).collect::<Vec<_>>();
            keys.sort_unstable();
            keys
        }

        f.debug_struct("Config")
            .field("normal_keys", &keys(&self.normal_keys))
            .field("insert_keys", &keys(&self.insert_keys))
            .field("extend_keys", &keys(&self.extend_keys))
            .field("nowait", &self.nowait)
            .field("layer_keys", &self.layer_keys)
            .field("generate_hints", &self.generate_hints)
            .field("hint_layout", &self.hint_layout)
            .field("hint_config", &self.hint_config)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            normal_keys: KeyMap::new(),
            insert_keys: KeyMap::new(),
            extend_keys: KeyMap::new(),
            nowait: true,
            layer_keys: LayerKeys::default(),
            generate_hints: ModeHints::default(),
            hint_layout: HintLayout::default(),
            hint_config: HintDisplay::default(),
        }
    }
}
