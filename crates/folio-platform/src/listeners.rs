//! Listener registry keyed by target identity.

use serde::{Deserialize, Serialize};

use crate::document::ElementId;

/// Identity of a component instance that owns listeners, observers and
/// frame requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

/// What a listener is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListenerTarget {
    Window,
    Document,
    Element(ElementId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    PointerMove,
    PointerEnter,
    PointerLeave,
    Resize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub id: ListenerId,
    pub owner: OwnerId,
    pub target: ListenerTarget,
    pub kind: EventKind,
}

/// All registered listeners, kept in registration order (which is also
/// dispatch order).
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    entries: Vec<Listener>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, owner: OwnerId, target: ListenerTarget, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Listener {
            id,
            owner,
            target,
            kind,
        });
        id
    }

    /// Remove one listener. Returns whether it was registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|l| l.id != id);
        before != self.entries.len()
    }

    /// Remove every listener owned by `owner`. Returns how many were removed.
    pub fn remove_owner(&mut self, owner: OwnerId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|l| l.owner != owner);
        before - self.entries.len()
    }

    /// Remove every listener attached to `target`.
    pub fn remove_target(&mut self, target: ListenerTarget) -> usize {
        let before = self.entries.len();
        self.entries.retain(|l| l.target != target);
        before - self.entries.len()
    }

    pub fn get(&self, id: ListenerId) -> Option<&Listener> {
        self.entries.iter().find(|l| l.id == id)
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.get(id).is_some()
    }

    /// Listeners for `kind` on `target`, in registration order.
    pub fn subscribers(&self, target: ListenerTarget, kind: EventKind) -> Vec<Listener> {
        self.entries
            .iter()
            .filter(|l| l.target == target && l.kind == kind)
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_for_target(&self, target: ListenerTarget) -> usize {
        self.entries.iter().filter(|l| l.target == target).count()
    }

    pub fn count_for_owner(&self, owner: OwnerId) -> usize {
        self.entries.iter().filter(|l| l.owner == owner).count()
    }
}
