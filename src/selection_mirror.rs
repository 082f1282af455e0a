//! Selection mirror: republishes the editor's selection to UI observers
//!
//! The mirror is attached to an editor's change notifications and keeps the
//! last published selection. Observers only hear about structural changes,
//! so a commit that leaves the selection where it was stays silent.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::editor::{Editor, ListenerId};
use crate::model::Selection;

type Observer = Box<dyn FnMut(Option<&Selection>)>;

#[derive(Default)]
struct MirrorState {
    selection: Option<Selection>,
    observers: Vec<Observer>,
    publications: usize,
}

/// Shared handle; clones observe the same state
#[derive(Clone, Default)]
pub struct SelectionMirror {
    state: Rc<RefCell<MirrorState>>,
    listener: Option<ListenerId>,
}

impl SelectionMirror {
    /// A detached mirror with no selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mirror seeded with the editor's selection and subscribed to
    /// its change notifications
    pub fn attach(editor: &mut Editor) -> Self {
        let mut mirror = Self::new();
        mirror.state.borrow_mut().selection = editor.selection().cloned();

        let handle = mirror.clone();
        let id = editor.on_change(move |change| {
            handle.set_selection(change.selection.cloned());
        });
        mirror.listener = Some(id);
        tracing::debug!(?id, "selection mirror attached");
        mirror
    }

    /// Unsubscribe from the editor. The last published selection stays
    /// readable.
    pub fn detach(&mut self, editor: &mut Editor) {
        if let Some(id) = self.listener.take() {
            editor.remove_listener(id);
            tracing::debug!(?id, "selection mirror detached");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.state.borrow().selection.clone()
    }

    /// Publish `selection` if it differs from the current value.
    ///
    /// Returns whether observers were notified.
    pub fn set_selection(&self, selection: Option<Selection>) -> bool {
        let mut observers = {
            let mut state = self.state.borrow_mut();
            if state.selection == selection {
                return false;
            }
            state.selection = selection.clone();
            state.publications += 1;
            std::mem::take(&mut state.observers)
        };

        // Observers run without the borrow held so they may read the mirror
        for observer in observers.iter_mut() {
            observer(selection.as_ref());
        }

        let mut state = self.state.borrow_mut();
        observers.append(&mut state.observers);
        state.observers = observers;
        true
    }

    /// Register an observer called with each newly published selection
    pub fn subscribe(&self, observer: impl FnMut(Option<&Selection>) + 'static) {
        self.state.borrow_mut().observers.push(Box::new(observer));
    }

    /// Number of publications so far
    pub fn publications(&self) -> usize {
        self.state.borrow().publications
    }
}

impl fmt::Debug for SelectionMirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("SelectionMirror")
            .field("selection", &state.selection)
            .field("observers", &state.observers.len())
            .field("publications", &state.publications)
            .field("listener", &self.listener)
            .finish()
    }
}
