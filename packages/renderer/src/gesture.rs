//! # Gestures
//!
//! Rendered nodes do not hold closures. An element carries a [`Gesture`]
//! binding, and the host resolves a click on the virtual tree into the
//! deepest bound gesture and routes it with [`dispatch`]. Editor renders
//! bind `Select`. Static renders bind `Navigate` on buttons.

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    /// Make this block the current selection.
    Select(String),
    /// Click landed on the canvas outside any block.
    ClearSelection,
    /// Follow a raw link target (page slug or URL, uninterpreted).
    Navigate(String),
}

/// Receiver for selection gestures.
pub trait GestureSink {
    fn select(&mut self, block_id: &str);
    fn clear_selection(&mut self);
}

/// Navigation collaborator. The renderer never interprets link targets.
pub trait Navigator {
    fn navigate(&mut self, target: &str);
}

impl<F: FnMut(&str)> Navigator for F {
    fn navigate(&mut self, target: &str) {
        self(target)
    }
}

/// Sink for views with nothing to select.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSelection;

impl GestureSink for NoSelection {
    fn select(&mut self, _block_id: &str) {}
    fn clear_selection(&mut self) {}
}

/// Navigator that drops every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoNavigation;

impl Navigator for NoNavigation {
    fn navigate(&mut self, _target: &str) {}
}

pub fn dispatch(gesture: &Gesture, sink: &mut dyn GestureSink, navigator: &mut dyn Navigator) {
    debug!(?gesture, "Dispatching gesture");

    match gesture {
        Gesture::Select(block_id) => sink.select(block_id),
        Gesture::ClearSelection => sink.clear_selection(),
        Gesture::Navigate(target) => navigator.navigate(target),
    }
}
