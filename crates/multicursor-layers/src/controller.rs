//! # Layer controller
//!
//! ## Overview
//!
//! [LayerController] owns a multi-cursor session: the three layer handles, which are built the
//! first time each mode is entered and reused afterwards, and the [SessionFlags] shared between
//! their callbacks.
//!
//! Transitions only ever happen from inside the layers themselves:
//!
//! * Normal's insert, change and append bindings switch to Insert, and its extend binding switches
//!   to Extend. The [TRANSITION](SessionFlags::TRANSITION) flag is raised first, so that Normal
//!   exiting on the way out doesn't end the session.
//! * When Insert or Extend exits, the flag is lowered and Normal is reactivated after
//!   [REACTIVATE_DELAY], once the editor has settled.
//! * When Normal exits without the flag raised, the session is over: the [Editing] collaborator
//!   tears it down, and the controller forgets its layers.
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use bitflags::bitflags;

use crate::config::Config;
use crate::errors::{LayerError, LayerResult};
use crate::host::{Editing, Host};
use crate::layers::{configured_heads, layer_spec, normal_heads, Mode, Transitions};
use crate::overlay::{Callback, LayerHandle, LayerSpec, Overlay};
use crate::scheduler::{Scheduler, REACTIVATE_DELAY};

bitflags! {
    /// State shared between the callbacks of a session's layers.
    #[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
    pub struct SessionFlags: u8 {
        /// A binding is switching from Normal to another layer.
        const TRANSITION = 0b00000001;

        /// Normal has been entered, and the selection anchor should be kept.
        const ANCHOR = 0b00000010;
    }
}

/// The ways of switching from Normal to Insert.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum InsertKind {
    Insert,
    Change,
    Append,
}

/// The host-side collaborators of a session.
#[derive(Clone)]
pub struct Collaborators {
    /// The host editor.
    pub host: Rc<dyn Host>,

    /// The multi-cursor editing commands.
    pub editing: Rc<dyn Editing>,

    /// Used to defer reactivating Normal.
    pub scheduler: Rc<dyn Scheduler>,
}

struct Session<O: Overlay> {
    this: Weak<Session<O>>,
    config: Config,
    overlay: O,
    host: Rc<dyn Host>,
    editing: Rc<dyn Editing>,
    scheduler: Rc<dyn Scheduler>,

    flags: Cell<SessionFlags>,
    active: Cell<Option<Mode>>,

    normal: RefCell<Option<Rc<O::Handle>>>,
    insert: RefCell<Option<Rc<O::Handle>>>,
    extend: RefCell<Option<Rc<O::Handle>>>,
}

impl<O> Session<O>
where
    O: Overlay + 'static,
{
    fn slot(&self, mode: Mode) -> &RefCell<Option<Rc<O::Handle>>> {
        match mode {
            Mode::Normal => &self.normal,
            Mode::Insert => &self.insert,
            Mode::Extend => &self.extend,
        }
    }

    fn set_flag(&self, flag: SessionFlags, value: bool) {
        let mut flags = self.flags.get();
        flags.set(flag, value);
        self.flags.set(flags);
    }

    /// Wrap a method as a layer callback that does nothing once the session is dropped.
    fn callback(&self, f: fn(&Session<O>)) -> Callback {
        let session = self.this.clone();

        Rc::new(move || {
            if let Some(session) = session.upgrade() {
                f(&session);
            }
        })
    }

    fn transitions(&self) -> Transitions {
        Transitions {
            insert: self.callback(|s| s.enter_insert(InsertKind::Insert)),
            change: self.callback(|s| s.enter_insert(InsertKind::Change)),
            append: self.callback(|s| s.enter_insert(InsertKind::Append)),
            extend: self.callback(Session::enter_extend),
        }
    }

    fn spec(&self, mode: Mode) -> LayerSpec {
        let heads = match mode {
            Mode::Normal => normal_heads(&self.config, &self.transitions()),
            Mode::Insert | Mode::Extend => configured_heads(&self.config, mode),
        };

        let on_enter = match mode {
            Mode::Normal => self.callback(Session::normal_enter),
            Mode::Insert => self.callback(Session::insert_enter),
            Mode::Extend => self.callback(Session::extend_enter),
        };

        let on_exit = match mode {
            Mode::Normal => self.callback(Session::normal_exit),
            Mode::Insert => self.callback(Session::insert_exit),
            Mode::Extend => self.callback(Session::extend_exit),
        };

        let width = self.host.terminal_width();

        layer_spec(&self.config, mode, heads, on_enter, on_exit, width)
    }

    /// Fetch the layer for a mode, building it if this is the first time it's needed.
    fn create(&self, mode: Mode) -> LayerResult<Rc<O::Handle>> {
        let existing = self.slot(mode).borrow().clone();

        if let Some(handle) = existing {
            return Ok(handle);
        }

        tracing::debug!(layer = %mode, "building layer");

        let spec = self.spec(mode);
        let handle = self
            .overlay
            .build(spec)
            .map_err(|e| LayerError::Build { layer: mode, reason: e.to_string() })?;
        let handle = Rc::new(handle);

        *self.slot(mode).borrow_mut() = Some(handle.clone());

        return Ok(handle);
    }

    fn enter_insert(&self, kind: InsertKind) {
        self.set_flag(SessionFlags::TRANSITION, true);

        let layer = match self.create(Mode::Insert) {
            Ok(layer) => layer,
            Err(e) => {
                tracing::error!(error = %e, "cannot switch to insert layer");
                self.set_flag(SessionFlags::TRANSITION, false);
                return;
            },
        };

        tracing::debug!(?kind, "switching to insert layer");
        layer.activate();

        match kind {
            InsertKind::Insert => self.editing.insert_mode(&self.config),
            InsertKind::Change => self.editing.change_mode(&self.config),
            InsertKind::Append => self.editing.append_mode(&self.config),
        }
    }

    fn enter_extend(&self) {
        self.set_flag(SessionFlags::TRANSITION, true);

        match self.create(Mode::Extend) {
            Ok(layer) => {
                tracing::debug!("switching to extend layer");
                layer.activate();
            },
            Err(e) => {
                tracing::error!(error = %e, "cannot switch to extend layer");
                self.set_flag(SessionFlags::TRANSITION, false);
            },
        }
    }

    fn entered(&self, mode: Mode) {
        tracing::debug!(layer = %mode, "layer entered");
        self.active.set(Some(mode));
    }

    fn exited(&self, mode: Mode) {
        tracing::debug!(layer = %mode, "layer exited");

        if self.active.get() == Some(mode) {
            self.active.set(None);
        }
    }

    fn normal_enter(&self) {
        self.entered(Mode::Normal);
        self.set_flag(SessionFlags::ANCHOR, true);
    }

    fn normal_exit(&self) {
        self.exited(Mode::Normal);

        if !self.flags.get().contains(SessionFlags::TRANSITION) {
            self.end_session();
        }
    }

    fn insert_enter(&self) {
        self.entered(Mode::Insert);
    }

    fn insert_exit(&self) {
        self.exited(Mode::Insert);
        self.editing.exit_insert_mode(&self.config);
        self.set_flag(SessionFlags::TRANSITION, false);
        self.defer_normal();
    }

    fn extend_enter(&self) {
        self.entered(Mode::Extend);
        self.host.redraw();
    }

    fn extend_exit(&self) {
        self.exited(Mode::Extend);
        self.set_flag(SessionFlags::TRANSITION, false);
        self.defer_normal();
    }

    fn defer_normal(&self) {
        let session = self.this.clone();

        self.scheduler.after(
            REACTIVATE_DELAY,
            Box::new(move || {
                if let Some(session) = session.upgrade() {
                    session.reactivate_normal();
                }
            }),
        );
    }

    fn reactivate_normal(&self) {
        if self.active.get() == Some(Mode::Normal) {
            tracing::debug!("normal layer already active");
            return;
        }

        let normal = self.normal.borrow().clone();

        match normal {
            Some(layer) => {
                tracing::debug!("reactivating normal layer");
                layer.activate();
            },
            None => {
                tracing::debug!("session ended before normal layer could be reactivated");
            },
        }
    }

    fn end_session(&self) {
        tracing::debug!("ending multi-cursor session");

        self.editing.exit_session(&self.config);

        self.flags.set(SessionFlags::empty());
        self.active.set(None);

        for mode in [Mode::Normal, Mode::Insert, Mode::Extend] {
            self.slot(mode).borrow_mut().take();
        }
    }
}

/// Drives the Normal, Insert and Extend layers of a multi-cursor session.
pub struct LayerController<O: Overlay> {
    session: Rc<Session<O>>,
}

impl<O> LayerController<O>
where
    O: Overlay + 'static,
{
    /// Create a new controller. No layers are built until [LayerController::start] is called.
    pub fn new(config: Config, overlay: O, collaborators: Collaborators) -> Self {
        let Collaborators { host, editing, scheduler } = collaborators;

        let session = Rc::new_cyclic(|this| {
            Session {
                this: this.clone(),
                config,
                overlay,
                host,
                editing,
                scheduler,
                flags: Cell::new(SessionFlags::empty()),
                active: Cell::new(None),
                normal: RefCell::new(None),
                insert: RefCell::new(None),
                extend: RefCell::new(None),
            }
        });

        LayerController { session }
    }

    /// Begin the session by building and activating Normal.
    pub fn start(&self) -> LayerResult<()> {
        let normal = self.session.create(Mode::Normal)?;

        tracing::debug!("starting multi-cursor session");
        normal.activate();

        Ok(())
    }

    /// The mode currently receiving input, if any.
    pub fn active(&self) -> Option<Mode> {
        self.session.active.get()
    }

    /// The current session flags.
    pub fn flags(&self) -> SessionFlags {
        self.session.flags.get()
    }

    /// Whether the layer for `mode` has been built during the current session.
    pub fn is_built(&self, mode: Mode) -> bool {
        self.session.slot(mode).borrow().is_some()
    }

    /// The configuration the layers are built from.
    pub fn config(&self) -> &Config {
        &self.session.config
    }

    /// The overlay the layers are handed to.
    pub fn overlay(&self) -> &O {
        &self.session.overlay
    }
}

impl<O: Overlay> Clone for LayerController<O> {
    fn clone(&self) -> Self {
        LayerController { session: Rc::clone(&self.session) }
    }
}
