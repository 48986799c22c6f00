//! Element tree with structural-change observers.
//!
//! Elements are identified by [`ElementId`]s that are never reused, so a
//! stale id can always be detected instead of silently aliasing a newer
//! element.

use std::collections::HashMap;

use folio_common::{PlatformError, Point, Rect, Size, SurfaceId};
use serde::{Deserialize, Serialize};

use crate::listeners::OwnerId;

/// Stable identity of an element in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u64);

/// What an element is. Drives both layout and the hover predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    Body,
    Section,
    Container,
    Link,
    Button,
    Text,
}

/// Everything needed to create an element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSpec {
    pub kind: ElementKind,
    pub label: String,
    pub href: Option<String>,
    /// Explicit "treat as interactive" marker for non-link elements.
    pub hoverable: bool,
    pub rect: Rect,
}

impl ElementSpec {
    pub fn new(kind: ElementKind, rect: Rect) -> Self {
        Self {
            kind,
            label: String::new(),
            href: None,
            hoverable: false,
            rect,
        }
    }

    pub fn link(label: impl Into<String>, href: impl Into<String>, rect: Rect) -> Self {
        Self {
            label: label.into(),
            href: Some(href.into()),
            ..Self::new(ElementKind::Link, rect)
        }
    }

    pub fn button(label: impl Into<String>, rect: Rect) -> Self {
        Self {
            label: label.into(),
            ..Self::new(ElementKind::Button, rect)
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn hoverable(mut self) -> Self {
        self.hoverable = true;
        self
    }
}

/// A node in the document.
#[derive(Debug, Clone)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    pub label: String,
    pub href: Option<String>,
    pub hoverable: bool,
    pub rect: Rect,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
    pub surface: Option<SurfaceId>,
}

/// Handle returned by [`Document::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u64);

/// A single structural change.
///
/// Removing a subtree produces one `Removed` record per element, in
/// document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Added(ElementId),
    Removed(ElementId),
}

/// Pending records for one observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationBatch {
    pub observer: ObserverId,
    pub owner: OwnerId,
    pub records: Vec<Mutation>,
}

#[derive(Debug, Clone)]
struct Observer {
    id: ObserverId,
    owner: OwnerId,
    target: ElementId,
    subtree: bool,
    pending: Vec<Mutation>,
}

/// The element tree.
#[derive(Debug)]
pub struct Document {
    elements: HashMap<ElementId, Element>,
    body: ElementId,
    next_id: u64,
    observers: Vec<Observer>,
    next_observer: u64,
}

impl Document {
    /// Create a document containing only a body of the given size.
    pub fn new(viewport: Size) -> Self {
        let body = ElementId(0);
        let mut elements = HashMap::new();
        elements.insert(
            body,
            Element {
                id: body,
                kind: ElementKind::Body,
                label: String::new(),
                href: None,
                hoverable: false,
                rect: Rect::new(0.0, 0.0, viewport.width, viewport.height),
                parent: None,
                children: Vec::new(),
                surface: None,
            },
        );
        Self {
            elements,
            body,
            next_id: 1,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn get(&self, id: ElementId) -> Result<&Element, PlatformError> {
        self.elements
            .get(&id)
            .ok_or(PlatformError::ElementNotFound(id.0))
    }

    fn get_mut(&mut self, id: ElementId) -> Result<&mut Element, PlatformError> {
        self.elements
            .get_mut(&id)
            .ok_or(PlatformError::ElementNotFound(id.0))
    }

    /// Append a new element as the last child of `parent`.
    pub fn append(&mut self, parent: ElementId, spec: ElementSpec) -> Result<ElementId, PlatformError> {
        if !self.elements.contains_key(&parent) {
            return Err(PlatformError::InvalidParent(parent.0));
        }

        let id = ElementId(self.next_id);
        self.next_id += 1;

        self.elements.insert(
            id,
            Element {
                id,
                kind: spec.kind,
                label: spec.label,
                href: spec.href,
                hoverable: spec.hoverable,
                rect: spec.rect,
                parent: Some(parent),
                children: Vec::new(),
                surface: None,
            },
        );
        self.get_mut(parent)?.children.push(id);

        self.notify(parent, Mutation::Added(id));
        Ok(id)
    }

    /// Remove `id` and its whole subtree. Returns the removed ids in
    /// document order.
    pub fn remove(&mut self, id: ElementId) -> Result<Vec<ElementId>, PlatformError> {
        if id == self.body {
            return Err(PlatformError::NotSupported("removing the body".into()));
        }
        let parent = self.get(id)?.parent;

        let removed = self.subtree(id);
        // Observers are matched against the tree as it was before removal.
        for &gone in &removed {
            if let Some(parent) = parent {
                self.notify(parent, Mutation::Removed(gone));
            }
        }

        if let Some(parent) = parent {
            self.get_mut(parent)?.children.retain(|c| *c != id);
        }
        for gone in &removed {
            self.elements.remove(gone);
        }
        self.observers.retain(|o| !removed.contains(&o.target));

        Ok(removed)
    }

    /// Update an element's layout rectangle.
    pub fn set_rect(&mut self, id: ElementId, rect: Rect) -> Result<(), PlatformError> {
        self.get_mut(id)?.rect = rect;
        Ok(())
    }

    /// Measured size of an element in logical pixels.
    pub fn client_size(&self, id: ElementId) -> Result<Size, PlatformError> {
        Ok(self.get(id)?.rect.size())
    }

    /// All elements matching `predicate`, in document order.
    pub fn query<F>(&self, predicate: F) -> Vec<ElementId>
    where
        F: Fn(&Element) -> bool,
    {
        self.subtree(self.body)
            .into_iter()
            .filter(|id| self.elements.get(id).is_some_and(&predicate))
            .collect()
    }

    /// Topmost element (last in document order) whose rectangle contains
    /// `point`.
    pub fn hit_test(&self, point: Point) -> Option<ElementId> {
        self.subtree(self.body)
            .into_iter()
            .rev()
            .find(|id| self.elements.get(id).is_some_and(|e| e.rect.contains(point)))
    }

    /// `id` followed by each of its ancestors up to the body.
    pub fn ancestors(&self, id: ElementId) -> Vec<ElementId> {
        let mut chain = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            match self.elements.get(&current) {
                Some(element) => {
                    chain.push(current);
                    cursor = element.parent;
                }
                None => break,
            }
        }
        chain
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: ElementId, id: ElementId) -> bool {
        self.ancestors(id).contains(&ancestor)
    }

    pub fn attach_surface(&mut self, id: ElementId, surface: SurfaceId) -> Result<(), PlatformError> {
        self.get_mut(id)?.surface = Some(surface);
        Ok(())
    }

    /// Detach and return the surface attached to `id`, if any.
    pub fn detach_surface(&mut self, id: ElementId) -> Result<Option<SurfaceId>, PlatformError> {
        Ok(self.get_mut(id)?.surface.take())
    }

    pub fn surface_of(&self, id: ElementId) -> Option<SurfaceId> {
        self.elements.get(&id).and_then(|e| e.surface)
    }

    /// Every attached surface with its container rectangle, in document order.
    pub fn surfaces(&self) -> Vec<(ElementId, SurfaceId, Rect)> {
        self.subtree(self.body)
            .into_iter()
            .filter_map(|id| {
                let element = self.elements.get(&id)?;
                element.surface.map(|s| (id, s, element.rect))
            })
            .collect()
    }

    // -- observers ----------------------------------------------------------

    /// Watch `target` for child additions/removals (and its whole subtree
    /// when `subtree` is set).
    pub fn observe(&mut self, owner: OwnerId, target: ElementId, subtree: bool) -> Result<ObserverId, PlatformError> {
        self.get(target)?;
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push(Observer {
            id,
            owner,
            target,
            subtree,
            pending: Vec::new(),
        });
        Ok(id)
    }

    /// Stop an observer. Pending records are discarded. Returns whether the
    /// observer was still connected.
    pub fn disconnect(&mut self, observer: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| o.id != observer);
        before != self.observers.len()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn observer_count_for_owner(&self, owner: OwnerId) -> usize {
        self.observers.iter().filter(|o| o.owner == owner).count()
    }

    /// Hand over every non-empty pending batch.
    pub fn drain_notifications(&mut self) -> Vec<MutationBatch> {
        self.observers
            .iter_mut()
            .filter(|o| !o.pending.is_empty())
            .map(|o| MutationBatch {
                observer: o.id,
                owner: o.owner,
                records: std::mem::take(&mut o.pending),
            })
            .collect()
    }

    fn notify(&mut self, parent: ElementId, record: Mutation) {
        let chain = self.ancestors(parent);
        for observer in &mut self.observers {
            let watched = if observer.subtree {
                chain.contains(&observer.target)
            } else {
                observer.target == parent
            };
            if watched {
                observer.pending.push(record);
            }
        }
    }

    /// Pre-order walk from `root` (inclusive).
    fn subtree(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(element) = self.elements.get(&id) {
                out.push(id);
                stack.extend(element.children.iter().rev().copied());
            }
        }
        out
    }
}
