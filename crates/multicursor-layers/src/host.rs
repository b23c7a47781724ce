//! # Host collaborators
//!
//! ## Overview
//!
//! The layers never touch buffers or cursors themselves. Instead they call out to the host
//! editor through [Host], and to the multi-cursor editing commands through [Editing].
use crate::config::Config;

/// Used when the terminal size can't be queried.
pub const DEFAULT_COLUMNS: usize = 80;

/// Query the width of the controlling terminal.
pub fn terminal_columns() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(DEFAULT_COLUMNS)
}

/// The host editor environment.
pub trait Host {
    /// The number of columns available for the hint panel.
    fn terminal_width(&self) -> usize {
        terminal_columns()
    }

    /// Redraw the screen right away, before processing any further input.
    fn redraw(&self);
}

/// Multi-cursor editing commands invoked by the layers.
pub trait Editing {
    /// Start inserting text at every cursor.
    fn insert_mode(&self, config: &Config);

    /// Delete every selection and start inserting text in its place.
    fn change_mode(&self, config: &Config);

    /// Start inserting text after every cursor.
    fn append_mode(&self, config: &Config);

    /// Stop inserting text at the cursors.
    fn exit_insert_mode(&self, config: &Config);

    /// Tear down the whole multi-cursor session, clearing any cursors and selections.
    fn exit_session(&self, config: &Config);
}
