//! # Overlay interface
//!
//! ## Overview
//!
//! The overlay is the host's modal input primitive: given a [LayerSpec], it builds a layer that
//! can later take over key dispatch with [LayerHandle::activate]. While a layer is active, the
//! overlay runs the handler of each pressed binding, and ends the layer after any binding marked
//! with `exit`.
//!
//! Implementations are expected to:
//!
//! * Run `on_enter` before dispatching any keys to a newly activated layer
//! * End the currently active layer (running its `on_exit`) before activating another one
//! * Treat activating the layer that is already active as a no-op
use std::fmt;
use std::rc::Rc;

use keyhints::Binding;

use crate::config::HintDisplay;

/// A callback run by the overlay.
pub type Callback = Rc<dyn Fn()>;

/// A binding as handed to the overlay.
pub type Head = Binding<Callback>;

/// The editor mode that a layer's keys are mapped in.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum HostMode {
    /// The editor's own Normal mode.
    Normal,

    /// The editor's own Insert mode.
    Insert,
}

/// How a layer treats keys that aren't bound in it.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum LayerColor {
    /// Bound keys fire immediately, unbound keys pass through to the editor, and the layer stays
    /// active until a binding exits it.
    #[default]
    Pink,
}

/// Layer-wide options.
#[derive(Clone, Default)]
pub struct LayerConfig {
    /// Only capture keys in the current buffer.
    pub buffer: bool,

    /// Run when the layer becomes active.
    pub on_enter: Option<Callback>,

    /// Run when the layer stops being active.
    pub on_exit: Option<Callback>,

    /// How unbound keys are treated.
    pub color: LayerColor,

    /// How the hint panel is shown.
    pub hint: HintDisplay,
}

impl fmt::Debug for LayerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerConfig")
            .field("buffer", &self.buffer)
            .field("on_enter", &self.on_enter.is_some())
            .field("on_exit", &self.on_exit.is_some())
            .field("color", &self.color)
            .field("hint", &self.hint)
            .finish()
    }
}

/// Everything the overlay needs to build a layer.
#[derive(Clone)]
pub struct LayerSpec {
    /// A unique, human-readable name for the layer.
    pub name: String,

    /// The editor mode in which the layer's keys are mapped.
    pub mode: HostMode,

    /// The layer's bindings.
    pub heads: Vec<Head>,

    /// The hint panel text.
    pub hint: String,

    /// Layer-wide options.
    pub config: LayerConfig,
}

impl fmt::Debug for LayerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys = self.heads.iter().map(|h| h.key.as_str()).collect::<Vec<_>>();

        f.debug_struct("LayerSpec")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .field("heads", &keys)
            .field("hint", &self.hint)
            .field("config", &self.config)
            .finish()
    }
}

/// A layer built by an [Overlay].
pub trait LayerHandle {
    /// Start capturing keys with this layer.
    fn activate(&self);
}

/// The host's modal input primitive.
pub trait Overlay {
    /// The handle to a built layer.
    type Handle: LayerHandle;

    /// Why a layer couldn't be built.
    type Error: fmt::Display;

    /// Build a new layer.
    fn build(&self, spec: LayerSpec) -> Result<Self::Handle, Self::Error>;
}
