//! # Hint sources
//!
//! Each mode decides once, when its configuration is resolved, where its hint text comes from.
use std::fmt;
use std::rc::Rc;

use serde::Deserialize;

use crate::binding::Binding;
use crate::layout::{render_hints, HintLayout};

/// A user-supplied function that builds hint text from a mode's bindings.
pub type HintFn<H> = Rc<dyn Fn(&[Binding<H>]) -> String>;

/// Where a mode's hint text comes from.
pub enum HintSource<H> {
    /// Lay out the bindings with the built-in [HintLayout] engine.
    Auto,

    /// Show only a one-line label naming the mode.
    Disabled,

    /// Show this text as-is.
    Fixed(String),

    /// Hand the bindings to a function and show whatever it returns.
    Custom(HintFn<H>),
}

impl<H> HintSource<H> {
    /// Wrap a function that builds hint text from a list of bindings.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&[Binding<H>]) -> String + 'static,
    {
        HintSource::Custom(Rc::new(f))
    }

    /// Produce the hint text for a mode.
    ///
    /// `name` identifies the mode, such as `"MultiCursor normal"`, and is only used for the
    /// [Disabled](HintSource::Disabled) label.
    pub fn render(
        &self,
        layout: &HintLayout,
        bindings: &[Binding<H>],
        name: &str,
        terminal_width: usize,
    ) -> String {
        match self {
            HintSource::Auto => render_hints(layout, bindings, terminal_width),
            HintSource::Disabled => format!("{name} mode"),
            HintSource::Fixed(text) => text.clone(),
            HintSource::Custom(f) => f(bindings),
        }
    }
}

impl<H> Clone for HintSource<H> {
    fn clone(&self) -> Self {
        match self {
            HintSource::Auto => HintSource::Auto,
            HintSource::Disabled => HintSource::Disabled,
            HintSource::Fixed(text) => HintSource::Fixed(text.clone()),
            HintSource::Custom(f) => HintSource::Custom(Rc::clone(f)),
        }
    }
}

impl<H> Default for HintSource<H> {
    fn default() -> Self {
        HintSource::Auto
    }
}

impl<H> fmt::Debug for HintSource<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HintSource::Auto => write!(f, "Auto"),
            HintSource::Disabled => write!(f, "Disabled"),
            HintSource::Fixed(text) => f.debug_tuple("Fixed").field(text).finish(),
            HintSource::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl<H> From<bool> for HintSource<H> {
    fn from(enabled: bool) -> Self {
        if enabled {
            HintSource::Auto
        } else {
            HintSource::Disabled
        }
    }
}

impl<H> From<&str> for HintSource<H> {
    fn from(text: &str) -> Self {
        HintSource::Fixed(text.to_string())
    }
}

impl<H> From<String> for HintSource<H> {
    fn from(text: String) -> Self {
        HintSource::Fixed(text)
    }
}

/// The serializable subset of [HintSource], as found in configuration files.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(untagged)]
pub enum HintSetting {
    /// `true` uses the built-in layout, `false` shows the mode label.
    Enabled(bool),

    /// Show this text as-is.
    Text(String),
}

impl<H> From<HintSetting> for HintSource<H> {
    fn from(setting: HintSetting) -> Self {
        match setting {
            HintSetting::Enabled(enabled) => HintSource::from(enabled),
            HintSetting::Text(text) => HintSource::Fixed(text),
        }
    }
}
