use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::domain::workspace::ChartId;

/// Registry of externally-owned chart handles (rendering-surface
/// controllers), keyed by chart id.
///
/// Deliberately outside the reactive stores - a documented escape hatch:
/// replacing or resetting store state never invalidates a handle, and
/// registering one notifies no subscriber. The owning chart's lifetime
/// governs a handle's validity, but cleanup on chart removal is the
/// registering collaborator's job; the core never drops entries itself.
#[derive(Default)]
pub struct ChartRefRegistry {
    refs: RefCell<HashMap<ChartId, Rc<dyn Any>>>,
}

impl ChartRefRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the handle for a chart.
    pub fn set(&self, id: ChartId, handle: Rc<dyn Any>) {
        self.refs.borrow_mut().insert(id, handle);
    }

    pub fn get(&self, id: ChartId) -> Option<Rc<dyn Any>> {
        self.refs.borrow().get(&id).cloned()
    }

    /// Handle downcast to its concrete type, for collaborators that know it.
    pub fn get_as<H: Any>(&self, id: ChartId) -> Option<Rc<H>> {
        self.get(id).and_then(|handle| handle.downcast::<H>().ok())
    }

    /// Drop a handle. Exposed for the registering collaborator's cleanup on
    /// chart removal; never called by the core itself.
    pub fn remove(&self, id: ChartId) -> Option<Rc<dyn Any>> {
        self.refs.borrow_mut().remove(&id)
    }

    pub fn contains(&self, id: ChartId) -> bool {
        self.refs.borrow().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.refs.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.borrow().is_empty()
    }
}
