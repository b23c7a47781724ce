//! Recording stand-ins for the overlay and the host editor.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::Config;
use crate::host::{Editing, Host};
use crate::overlay::{Callback, LayerHandle, LayerSpec, Overlay};

pub(crate) type Log = Rc<RefCell<Vec<String>>>;

#[derive(Default)]
struct OverlayState {
    layers: Vec<LayerSpec>,
    active: Option<usize>,
    fail: bool,
}

/// An overlay that records layers and dispatches keys the way the real one does: handlers run
/// first, and `exit` bindings end their layer afterwards if it's still the active one.
#[derive(Clone, Default)]
pub(crate) struct MockOverlay {
    state: Rc<RefCell<OverlayState>>,
    probe: Rc<RefCell<Option<Box<dyn Fn(&str)>>>>,
    log: Log,
}

pub(crate) struct MockHandle {
    id: usize,
    overlay: MockOverlay,
}

impl LayerHandle for MockHandle {
    fn activate(&self) {
        self.overlay.activate(self.id);
    }
}

impl Overlay for MockOverlay {
    type Handle = MockHandle;
    type Error = String;

    fn build(&self, spec: LayerSpec) -> Result<MockHandle, String> {
        let mut state = self.state.borrow_mut();

        if state.fail {
            return Err(String::from("overlay unavailable"));
        }

        self.log.borrow_mut().push(format!("build {}", spec.name));
        state.layers.push(spec);

        Ok(MockHandle { id: state.layers.len() - 1, overlay: self.clone() })
    }
}

impl MockOverlay {
    pub fn new(log: Log) -> Self {
        MockOverlay { log, ..Default::default() }
    }

    pub fn set_fail(&self, fail: bool) {
        self.state.borrow_mut().fail = fail;
    }

    /// Call `f` with the layer name whenever a layer is entered, before its `on_enter`.
    pub fn set_probe<F: Fn(&str) + 'static>(&self, f: F) {
        *self.probe.borrow_mut() = Some(Box::new(f));
    }

    fn activate(&self, id: usize) {
        let prev = self.state.borrow().active;

        if prev == Some(id) {
            return;
        }

        if prev.is_some() {
            self.exit();
        }

        self.state.borrow_mut().active = Some(id);

        let (name, on_enter) = {
            let state = self.state.borrow();
            let spec = &state.layers[id];
            (spec.name.clone(), spec.config.on_enter.clone())
        };

        if let Some(probe) = self.probe.borrow().as_ref() {
            probe(&name);
        }

        self.log.borrow_mut().push(format!("enter {name}"));

        if let Some(f) = on_enter {
            f();
        }
    }

    /// End the active layer, as if the user had left it some other way.
    pub fn exit(&self) {
        let id = match self.state.borrow_mut().active.take() {
            Some(id) => id,
            None => return,
        };

        let (name, on_exit) = {
            let state = self.state.borrow();
            let spec = &state.layers[id];
            (spec.name.clone(), spec.config.on_exit.clone())
        };

        self.log.borrow_mut().push(format!("exit {name}"));

        if let Some(f) = on_exit {
            f();
        }
    }

    /// Press a key in the active layer. Returns whether it was bound.
    pub fn press(&self, key: &str) -> bool {
        let found = {
            let state = self.state.borrow();

            state.active.and_then(|id| {
                state.layers[id]
                    .heads
                    .iter()
                    .find(|h| h.key == key)
                    .map(|h| (id, h.handler.clone(), h.options.exit))
            })
        };

        let Some((id, handler, exit)) = found else {
            return false;
        };

        self.log.borrow_mut().push(format!("press {key}"));

        if let Some(f) = handler {
            f();
        }

        if exit && self.state.borrow().active == Some(id) {
            self.exit();
        }

        return true;
    }

    pub fn active_name(&self) -> Option<String> {
        let state = self.state.borrow();
        state.active.map(|id| state.layers[id].name.clone())
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.state.borrow().layers.iter().position(|l| l.name == name)
    }

    pub fn hint(&self, name: &str) -> Option<String> {
        let id = self.find(name)?;
        Some(self.state.borrow().layers[id].hint.clone())
    }

    pub fn on_exit(&self, name: &str) -> Option<Callback> {
        let id = self.find(name)?;
        self.state.borrow().layers[id].config.on_exit.clone()
    }

    pub fn built(&self, name: &str) -> usize {
        self.state.borrow().layers.iter().filter(|l| l.name == name).count()
    }
}

pub(crate) struct MockHost {
    pub width: usize,
    pub log: Log,
}

impl Host for MockHost {
    fn terminal_width(&self) -> usize {
        self.width
    }

    fn redraw(&self) {
        self.log.borrow_mut().push(String::from("redraw"));
    }
}

#[derive(Default)]
pub(crate) struct MockEditing {
    pub log: Log,
    pub sessions_ended: Cell<usize>,
}

impl MockEditing {
    fn record(&self, event: &str) {
        self.log.borrow_mut().push(String::from(event));
    }
}

impl Editing for MockEditing {
    fn insert_mode(&self, _: &Config) {
        self.record("insert_mode");
    }

    fn change_mode(&self, _: &Config) {
        self.record("change_mode");
    }

    fn append_mode(&self, _: &Config) {
        self.record("append_mode");
    }

    fn exit_insert_mode(&self, _: &Config) {
        self.record("exit_insert_mode");
    }

    fn exit_session(&self, _: &Config) {
        self.sessions_ended.set(self.sessions_ended.get() + 1);
        self.record("exit_session");
    }
}
