//! # multicursor-layers
//!
//! ## Overview
//!
//! This crate drives the modal layers of a multi-cursor editing session. A session has three
//! layers, each with its own keys and hint panel:
//!
//! * **Normal**, where the cursors are moved and manipulated, and from which the other two
//!   layers are entered
//! * **Insert**, where text is typed at every cursor
//! * **Extend**, where every selection is grown or shrunk
//!
//! The layers themselves are provided by the host editor through the [Overlay] trait. This crate
//! decides which bindings each layer gets and what hint text it shows (using [keyhints]), and
//! keeps track of the transitions between layers with a [LayerController].
//!
//! ## Example
//!
//! ```
//! use std::convert::Infallible;
//! use std::rc::Rc;
//!
//! use multicursor_layers::{
//!     Collaborators,
//!     Config,
//!     Editing,
//!     Host,
//!     LayerController,
//!     LayerHandle,
//!     LayerSpec,
//!     Mode,
//!     Overlay,
//!     TimerQueue,
//! };
//!
//! struct Terminal;
//!
//! impl Host for Terminal {
//!     fn terminal_width(&self) -> usize {
//!         80
//!     }
//!
//!     fn redraw(&self) {}
//! }
//!
//! struct Cursors;
//!
//! impl Editing for Cursors {
//!     fn insert_mode(&self, _: &Config) {}
//!     fn change_mode(&self, _: &Config) {}
//!     fn append_mode(&self, _: &Config) {}
//!     fn exit_insert_mode(&self, _: &Config) {}
//!     fn exit_session(&self, _: &Config) {}
//! }
//!
//! // A layer that only runs its `on_enter` callback when activated.
//! struct Layer(LayerSpec);
//!
//! impl LayerHandle for Layer {
//!     fn activate(&self) {
//!         if let Some(on_enter) = &self.0.config.on_enter {
//!             on_enter();
//!         }
//!     }
//! }
//!
//! struct Layers;
//!
//! impl Overlay for Layers {
//!     type Handle = Layer;
//!     type Error = Infallible;
//!
//!     fn build(&self, spec: LayerSpec) -> Result<Layer, Infallible> {
//!         Ok(Layer(spec))
//!     }
//! }
//!
//! let collaborators = Collaborators {
//!     host: Rc::new(Terminal),
//!     editing: Rc::new(Cursors),
//!     scheduler: Rc::new(TimerQueue::new()),
//! };
//!
//! let controller = LayerController::new(Config::default(), Layers, collaborators);
//! controller.start()?;
//!
//! assert_eq!(controller.active(), Some(Mode::Normal));
//! assert!(controller.is_built(Mode::Normal));
//! assert!(!controller.is_built(Mode::Insert));
//! # Ok::<(), multicursor_layers::LayerError>(())
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

pub mod config;
pub mod controller;
pub mod errors;
pub mod host;
pub mod layers;
pub mod overlay;
pub mod scheduler;

#[cfg(test)]
mod testing;

pub use self::config::{
    Config,
    FloatOptions,
    HintDisplay,
    HintKind,
    HintPosition,
    KeyMap,
    LayerKeys,
    ModeHints,
};
pub use self::controller::{Collaborators, LayerController, SessionFlags};
pub use self::errors::{LayerError, LayerResult};
pub use self::host::{terminal_columns, Editing, Host, DEFAULT_COLUMNS};
pub use self::layers::{Mode, Transitions, PRODUCT};
pub use self::overlay::{
    Callback,
    Head,
    HostMode,
    LayerColor,
    LayerConfig,
    LayerHandle,
    LayerSpec,
    Overlay,
};
pub use self::scheduler::{Deferred, Scheduler, TimerQueue, REACTIVATE_DELAY};
