//! The platform bundle and event dispatch.
//!
//! Raw input from the windowing layer enters through the `pointer_*` and
//! `resized` methods, which return the listener invocations it produces.
//! The host routes each [`Dispatch`] to the component that owns it.

use folio_common::{PlatformError, Point, Rect, Size};
use tracing::debug;

use crate::document::{Document, ElementId, ElementSpec, MutationBatch};
use crate::frames::FrameScheduler;
use crate::hover::{HoverChange, HoverTracker};
use crate::listeners::{EventKind, ListenerId, ListenerRegistry, ListenerTarget, OwnerId};
use crate::pointer::PointerCapability;

/// Event payload delivered to a listener.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    PointerMove { position: Point },
    PointerEnter,
    PointerLeave,
    Resize { size: Size },
}

/// One listener invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dispatch {
    pub owner: OwnerId,
    pub listener: ListenerId,
    pub target: ListenerTarget,
    pub event: Event,
}

/// Host services shared by every mounted component.
#[derive(Debug)]
pub struct Platform {
    pub document: Document,
    pub listeners: ListenerRegistry,
    pub frames: FrameScheduler,
    hover: HoverTracker,
    viewport: Size,
    device_pixel_ratio: f64,
    pointer: PointerCapability,
    pointer_position: Option<Point>,
    next_owner: u64,
}

impl Platform {
    pub fn new(viewport: Size, device_pixel_ratio: f64, pointer: PointerCapability) -> Self {
        Self {
            document: Document::new(viewport),
            listeners: ListenerRegistry::new(),
            frames: FrameScheduler::new(),
            hover: HoverTracker::new(),
            viewport,
            device_pixel_ratio,
            pointer,
            pointer_position: None,
            next_owner: 1,
        }
    }

    /// Allocate an identity for a new component instance.
    pub fn new_owner(&mut self) -> OwnerId {
        let id = OwnerId(self.next_owner);
        self.next_owner += 1;
        id
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    pub fn set_device_pixel_ratio(&mut self, ratio: f64) {
        self.device_pixel_ratio = ratio;
    }

    /// The primary pointer type.
    pub fn pointer(&self) -> PointerCapability {
        self.pointer
    }

    /// Last known pointer position, `None` while outside the viewport.
    pub fn pointer_position(&self) -> Option<Point> {
        self.pointer_position
    }

    pub fn is_hovered(&self, id: ElementId) -> bool {
        self.hover.is_hovered(id)
    }

    /// Register a listener. Element targets must exist.
    pub fn add_listener(
        &mut self,
        owner: OwnerId,
        target: ListenerTarget,
        kind: EventKind,
    ) -> Result<ListenerId, PlatformError> {
        if let ListenerTarget::Element(id) = target {
            if !self.document.contains(id) {
                return Err(PlatformError::StaleTarget(id.0));
            }
        }
        Ok(self.listeners.add(owner, target, kind))
    }

    pub fn append(&mut self, parent: ElementId, spec: ElementSpec) -> Result<ElementId, PlatformError> {
        self.document.append(parent, spec)
    }

    /// Remove an element subtree. Listeners targeting removed elements go
    /// with them, and they silently drop out of the hovered chain.
    pub fn remove_element(&mut self, id: ElementId) -> Result<Vec<ElementId>, PlatformError> {
        let removed = self.document.remove(id)?;
        for gone in &removed {
            self.listeners.remove_target(ListenerTarget::Element(*gone));
        }
        self.hover.forget(&removed);
        Ok(removed)
    }

    /// Pending structural-change records, grouped per observer.
    pub fn take_mutations(&mut self) -> Vec<MutationBatch> {
        self.document.drain_notifications()
    }

    // -- input --------------------------------------------------------------

    /// Pointer moved to `position` (logical px). Element leave/enter
    /// dispatches come first, then window `PointerMove`.
    pub fn pointer_moved(&mut self, position: Point) -> Vec<Dispatch> {
        self.pointer_position = Some(position);

        let chain = self
            .document
            .hit_test(position)
            .map(|leaf| self.document.ancestors(leaf))
            .unwrap_or_default();
        let change = self.hover.update(chain);
        let mut out = self.hover_dispatches(change);

        self.collect(
            &mut out,
            ListenerTarget::Window,
            EventKind::PointerMove,
            Event::PointerMove { position },
        );
        out
    }

    pub fn pointer_entered_viewport(&mut self) -> Vec<Dispatch> {
        let mut out = Vec::new();
        self.collect(&mut out, ListenerTarget::Document, EventKind::PointerEnter, Event::PointerEnter);
        out
    }

    /// Pointer left the viewport: every hovered element is left, then
    /// document listeners hear `PointerLeave`.
    pub fn pointer_left_viewport(&mut self) -> Vec<Dispatch> {
        self.pointer_position = None;
        let change = self.hover.clear();
        let mut out = self.hover_dispatches(change);
        self.collect(&mut out, ListenerTarget::Document, EventKind::PointerLeave, Event::PointerLeave);
        out
    }

    /// Viewport resized (logical px). The body tracks the viewport.
    pub fn resized(&mut self, size: Size) -> Vec<Dispatch> {
        self.viewport = size;
        let body = self.document.body();
        if let Err(e) = self
            .document
            .set_rect(body, Rect::new(0.0, 0.0, size.width, size.height))
        {
            debug!("body resize skipped: {e}");
        }

        let mut out = Vec::new();
        self.collect(&mut out, ListenerTarget::Window, EventKind::Resize, Event::Resize { size });
        out
    }

    fn hover_dispatches(&self, change: HoverChange) -> Vec<Dispatch> {
        let mut out = Vec::new();
        for id in change.left {
            self.collect(&mut out, ListenerTarget::Element(id), EventKind::PointerLeave, Event::PointerLeave);
        }
        for id in change.entered {
            self.collect(&mut out, ListenerTarget::Element(id), EventKind::PointerEnter, Event::PointerEnter);
        }
        out
    }

    fn collect(&self, out: &mut Vec<Dispatch>, target: ListenerTarget, kind: EventKind, event: Event) {
        out.extend(
            self.listeners
                .subscribers(target, kind)
                .into_iter()
                .map(|l| Dispatch {
                    owner: l.owner,
                    listener: l.id,
                    target,
                    event,
                }),
        );
    }
}

/// Run `handler` for each dispatch. A failing handler never stops the
/// remaining dispatches; its error is logged and dropped.
pub fn deliver<F, E>(dispatches: &[Dispatch], mut handler: F)
where
    F: FnMut(&Dispatch) -> Result<(), E>,
    E: std::fmt::Display,
{
    for dispatch in dispatches {
        if let Err(e) = handler(dispatch) {
            debug!(listener = dispatch.listener.0, "listener error ignored: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ElementKind;

    fn platform() -> Platform {
        Platform::new(Size::new(800.0, 600.0), 1.0, PointerCapability::Fine)
    }

    #[test]
    fn owners_are_unique() {
        let mut p = platform();
        assert_ne!(p.new_owner(), p.new_owner());
    }

    #[test]
    fn listener_on_missing_element_is_stale() {
        let mut p = platform();
        let owner = p.new_owner();
        let err = p
            .add_listener(owner, ListenerTarget::Element(ElementId(42)), EventKind::PointerEnter)
            .unwrap_err();
        assert!(matches!(err, PlatformError::StaleTarget(42)));
    }

    #[test]
    fn pointer_move_reaches_window_listeners() {
        let mut p = platform();
        let owner = p.new_owner();
        let id = p
            .add_listener(owner, ListenerTarget::Window, EventKind::PointerMove)
            .unwrap();

        let out = p.pointer_moved(Point::new(10.0, 20.0));
        assert_eq!(
            out,
            vec![Dispatch {
                owner,
                listener: id,
                target: ListenerTarget::Window,
                event: Event::PointerMove {
                    position: Point::new(10.0, 20.0)
                },
            }]
        );
        assert_eq!(p.pointer_position(), Some(Point::new(10.0, 20.0)));
    }

    #[test]
    fn element_enter_and_leave_fire_once_each() {
        let mut p = platform();
        let body = p.document.body();
        let button = p
            .append(body, ElementSpec::button("go", Rect::new(100.0, 100.0, 50.0, 20.0)))
            .unwrap();
        let owner = p.new_owner();
        let enter = p
            .add_listener(owner, ListenerTarget::Element(button), EventKind::PointerEnter)
            .unwrap();
        let leave = p
            .add_listener(owner, ListenerTarget::Element(button), EventKind::PointerLeave)
            .unwrap();

        let out = p.pointer_moved(Point::new(110.0, 105.0));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].listener, enter);
        assert!(p.is_hovered(button));

        // Moving within the element is not another enter
        assert!(p.pointer_moved(Point::new(120.0, 110.0)).is_empty());

        let out = p.pointer_moved(Point::new(5.0, 5.0));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].listener, leave);
        assert_eq!(out[0].event, Event::PointerLeave);
    }

    #[test]
    fn leaving_viewport_leaves_hovered_elements_then_document() {
        let mut p = platform();
        let body = p.document.body();
        let button = p
            .append(body, ElementSpec::button("go", Rect::new(0.0, 0.0, 50.0, 20.0)))
            .unwrap();
        let owner = p.new_owner();
        let el_leave = p
            .add_listener(owner, ListenerTarget::Element(button), EventKind::PointerLeave)
            .unwrap();
        let doc_leave = p
            .add_listener(owner, ListenerTarget::Document, EventKind::PointerLeave)
            .unwrap();

        p.pointer_moved(Point::new(1.0, 1.0));
        let out = p.pointer_left_viewport();
        let ids: Vec<_> = out.iter().map(|d| d.listener).collect();
        assert_eq!(ids, vec![el_leave, doc_leave]);
        assert_eq!(p.pointer_position(), None);
        assert!(!p.is_hovered(button));
        assert!(!p.is_hovered(body));
    }

    #[test]
    fn entering_viewport_reaches_document_listeners() {
        let mut p = platform();
        let owner = p.new_owner();
        p.add_listener(owner, ListenerTarget::Document, EventKind::PointerEnter)
            .unwrap();
        let out = p.pointer_entered_viewport();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].event, Event::PointerEnter);
    }

    #[test]
    fn resize_updates_viewport_and_body() {
        let mut p = platform();
        let owner = p.new_owner();
        p.add_listener(owner, ListenerTarget::Window, EventKind::Resize)
            .unwrap();

        let out = p.resized(Size::new(1024.0, 768.0));
        assert_eq!(out[0].event, Event::Resize { size: Size::new(1024.0, 768.0) });
        assert_eq!(p.viewport(), Size::new(1024.0, 768.0));
        let body = p.document.body();
        assert_eq!(p.document.client_size(body).unwrap(), Size::new(1024.0, 768.0));
    }

    #[test]
    fn removing_element_drops_its_listeners_and_hover() {
        let mut p = platform();
        let body = p.document.body();
        let section = p
            .append(body, ElementSpec::new(ElementKind::Section, Rect::new(0.0, 0.0, 400.0, 400.0)))
            .unwrap();
        let link = p
            .append(section, ElementSpec::link("x", "/x", Rect::new(0.0, 0.0, 40.0, 40.0)))
            .unwrap();
        let owner = p.new_owner();
        p.add_listener(owner, ListenerTarget::Element(link), EventKind::PointerLeave)
            .unwrap();
        p.pointer_moved(Point::new(10.0, 10.0));

        let removed = p.remove_element(section).unwrap();
        assert_eq!(removed, vec![section, link]);
        assert_eq!(p.listeners.count_for_target(ListenerTarget::Element(link)), 0);
        assert!(!p.is_hovered(link));
        // No leave fires for an element that no longer exists
        assert!(p.pointer_moved(Point::new(500.0, 500.0)).is_empty());
    }

    #[test]
    fn deliver_continues_after_handler_error() {
        let mut p = platform();
        let owner = p.new_owner();
        p.add_listener(owner, ListenerTarget::Window, EventKind::Resize)
            .unwrap();
        p.add_listener(owner, ListenerTarget::Window, EventKind::Resize)
            .unwrap();
        let out = p.resized(Size::new(10.0, 10.0));

        let mut calls = 0;
        deliver(&out, |_| -> Result<(), PlatformError> {
            calls += 1;
            Err(PlatformError::StaleTarget(1))
        });
        assert_eq!(calls, 2);
    }
}
