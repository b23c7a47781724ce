//! # Bindings
//!
//! ## Overview
//!
//! Consumers describe each mode as a map from key labels to [Action] values. Before a mode is
//! handed to an overlay, [normalize] flattens that map into a list of [Binding] triples, dropping
//! anything that has been [disabled](Action::Disabled) and resolving each binding's no-wait
//! policy against the mode-wide default.
//!
//! The order of the returned bindings is unspecified; the hint layout sorts them itself.
use serde::Deserialize;

/// Options attached to an enabled [Action], as written by the consumer.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct ActionOptions {
    /// Label shown in the hint panel. Bindings without one are left out of the panel.
    pub desc: Option<String>,

    /// Whether running this binding ends the current mode.
    pub exit: bool,

    /// Override for the mode-wide no-wait default.
    pub nowait: Option<bool>,
}

impl ActionOptions {
    /// Create options with the given description.
    pub fn desc<T: Into<String>>(desc: T) -> Self {
        ActionOptions { desc: Some(desc.into()), ..Default::default() }
    }

    /// Mark this binding as ending the current mode.
    pub fn exit(mut self, exit: bool) -> Self {
        self.exit = exit;
        self
    }

    /// Explicitly set whether this binding fires without waiting for further keys.
    pub fn nowait(mut self, nowait: bool) -> Self {
        self.nowait = Some(nowait);
        self
    }
}

/// What a key does within a mode.
#[derive(Clone, Debug)]
pub enum Action<H> {
    /// A placeholder that removes the key from the mode entirely.
    Disabled,

    /// Run `method` when the key is pressed.
    Run {
        /// The handler to invoke.
        method: H,

        /// Options controlling how the binding is shown and dispatched.
        opts: ActionOptions,
    },
}

impl<H> Action<H> {
    /// Create a new enabled action.
    pub fn new(method: H, opts: ActionOptions) -> Self {
        Action::Run { method, opts }
    }
}

/// Options on a [Binding] after normalization.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BindingOptions {
    /// Label shown in the hint panel.
    pub desc: Option<String>,

    /// Whether running this binding ends the current mode.
    pub exit: bool,

    /// Whether the binding fires without waiting for a disambiguating timeout.
    pub nowait: bool,
}

/// A single key binding as consumed by an overlay.
#[derive(Clone, Debug)]
pub struct Binding<H> {
    /// The key label, in whatever notation the overlay understands (e.g. `<Esc>`).
    pub key: String,

    /// The handler to run, if any. Bindings without a handler only exist to exit the mode.
    pub handler: Option<H>,

    /// Resolved options for this binding.
    pub options: BindingOptions,
}

impl<H> Binding<H> {
    /// Create a new binding.
    pub fn new<K: Into<String>>(key: K, handler: Option<H>, options: BindingOptions) -> Self {
        Binding { key: key.into(), handler, options }
    }

    /// Create a binding with no handler that ends the current mode.
    pub fn exit<K: Into<String>>(key: K, desc: Option<String>, nowait: bool) -> Self {
        let options = BindingOptions { desc, exit: true, nowait };

        Binding::new(key, None, options)
    }

    /// The description to show for this binding, or the empty string.
    pub fn desc(&self) -> &str {
        self.options.desc.as_deref().unwrap_or_default()
    }
}

/// Convert a map of key labels to actions into a list of [Binding] values.
///
/// Disabled actions are skipped. An explicit `nowait` on an action always wins, even when it is
/// `false`; otherwise `default_nowait` is used.
pub fn normalize<K, H, I>(actions: I, default_nowait: bool) -> Vec<Binding<H>>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Action<H>)>,
{
    actions
        .into_iter()
        .filter_map(|(key, action)| {
            match action {
                Action::Disabled => None,
                Action::Run { method, opts } => {
                    let options = BindingOptions {
                        desc: opts.desc,
                        exit: opts.exit,
                        nowait: opts.nowait.unwrap_or(default_nowait),
                    };

                    Some(Binding::new(key, Some(method), options))
                },
            }
        })
        .collect()
}
