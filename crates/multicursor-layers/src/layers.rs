//! # Layer construction
//!
//! ## Overview
//!
//! Each of the three [Mode] layers is built from its key map in [Config]. Normal additionally gets
//! a binding for leaving the session and one for each of the other layers, which are named by
//! [LayerKeys](crate::config::LayerKeys).
//!
//! All layers use [LayerColor::Pink], so that bound keys fire immediately and the layer stays
//! active until one of its `exit` bindings runs.
use std::fmt;

use keyhints::{normalize, Binding, BindingOptions, HintSource};

use crate::config::{Config, HintDisplay, KeyMap};
use crate::overlay::{Callback, Head, HostMode, LayerColor, LayerConfig, LayerSpec};

/// Prefixed to layer names and the plain mode labels.
pub const PRODUCT: &str = "MultiCursor";

/// The multi-cursor modes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Mode {
    /// Move between and manipulate the cursors.
    Normal,

    /// Type text at every cursor.
    Insert,

    /// Grow or shrink every selection.
    Extend,
}

impl Mode {
    /// The lowercase name of the mode, as used in hint labels.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Insert => "insert",
            Mode::Extend => "extend",
        }
    }

    /// The name given to this mode's layer.
    pub fn layer_name(&self) -> String {
        format!("{PRODUCT} {self}")
    }

    /// The editor mode this layer's keys are mapped in.
    pub fn host_mode(&self) -> HostMode {
        match self {
            Mode::Normal | Mode::Extend => HostMode::Normal,
            Mode::Insert => HostMode::Insert,
        }
    }

    /// The keys configured for this mode.
    pub fn keys<'a>(&self, config: &'a Config) -> &'a KeyMap {
        match self {
            Mode::Normal => &config.normal_keys,
            Mode::Insert => &config.insert_keys,
            Mode::Extend => &config.extend_keys,
        }
    }

    /// Where this mode's hint text comes from.
    pub fn hint_source<'a>(&self, config: &'a Config) -> &'a HintSource<Callback> {
        match self {
            Mode::Normal => &config.generate_hints.normal,
            Mode::Insert => &config.generate_hints.insert,
            Mode::Extend => &config.generate_hints.extend,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Normal => write!(f, "Normal"),
            Mode::Insert => write!(f, "Insert"),
            Mode::Extend => write!(f, "Extend"),
        }
    }
}

/// Handlers for the bindings that Normal adds on top of its configured keys.
#[derive(Clone)]
pub struct Transitions {
    /// Switch to Insert, inserting before each cursor.
    pub insert: Callback,

    /// Switch to Insert, replacing each selection.
    pub change: Callback,

    /// Switch to Insert, inserting after each cursor.
    pub append: Callback,

    /// Switch to Extend.
    pub extend: Callback,
}

/// The bindings configured for a mode, without any of Normal's added bindings.
pub fn configured_heads(config: &Config, mode: Mode) -> Vec<Head> {
    let actions = mode.keys(config).iter().map(|(k, a)| (k.clone(), a.clone()));

    normalize(actions, config.nowait)
}

fn transition(key: &str, desc: &str, handler: Callback, nowait: bool) -> Head {
    let options = BindingOptions { desc: Some(desc.to_string()), exit: true, nowait };

    Binding::new(key, Some(handler), options)
}

/// The bindings for Normal: its configured keys, followed by a binding that exits the session
/// and one for each of the [Transitions].
pub fn normal_heads(config: &Config, transitions: &Transitions) -> Vec<Head> {
    let keys = &config.layer_keys;
    let nowait = config.nowait;

    let mut heads = configured_heads(config, Mode::Normal);
    heads.push(Binding::exit(keys.exit.as_str(), Some(String::from("exit")), nowait));
    heads.push(transition(&keys.insert, "insert mode", transitions.insert.clone(), nowait));
    heads.push(transition(&keys.change, "change mode", transitions.change.clone(), nowait));
    heads.push(transition(&keys.append, "append mode", transitions.append.clone(), nowait));
    heads.push(transition(&keys.extend, "extend mode", transitions.extend.clone(), nowait));

    return heads;
}

/// Produce the hint text for a mode's layer.
pub fn hint_text(config: &Config, mode: Mode, heads: &[Head], terminal_width: usize) -> String {
    let name = format!("{PRODUCT} {}", mode.name());

    mode.hint_source(config)
        .render(&config.hint_layout, heads, &name, terminal_width)
}

/// Assemble the full description of a mode's layer.
pub fn layer_spec(
    config: &Config,
    mode: Mode,
    heads: Vec<Head>,
    on_enter: Callback,
    on_exit: Callback,
    terminal_width: usize,
) -> LayerSpec {
    let hint = hint_text(config, mode, &heads, terminal_width);
    let display = config.hint_config.clone().merge(&HintDisplay::defaults());

    LayerSpec {
        name: mode.layer_name(),
        mode: mode.host_mode(),
        heads,
        hint,
        config: LayerConfig {
            buffer: true,
            on_enter: Some(on_enter),
            on_exit: Some(on_exit),
            color: LayerColor::Pink,
            hint: display,
        },
    }
}
