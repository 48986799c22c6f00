//! PointerOverlay: document-wide pointer tracking with hover detection on
//! interactive elements, including ones inserted after activation.

use std::collections::HashMap;
use std::time::Duration;

use folio_common::{PlatformError, Point};
use folio_config::schema::CursorConfig;
use folio_platform::{
    Dispatch, Element, ElementId, ElementKind, Event, EventKind, FrameHandle, FrameTick, ListenerId,
    ListenerTarget, Mutation, MutationBatch, ObserverId, OwnerId, Platform,
};
use tracing::debug;

use super::layers::{AnimatedLayer, CursorLayer, LayerKind};
use crate::motion::SpringParams;

/// Frame interval assumed for the first tick of an animation run.
const FIRST_FRAME_DT: f64 = 1.0 / 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlaySettings {
    pub dot: SpringParams,
    pub ring: SpringParams,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            dot: SpringParams::DOT,
            ring: SpringParams::RING,
        }
    }
}

impl OverlaySettings {
    pub fn from_config(config: &CursorConfig) -> Self {
        Self {
            dot: config.dot.into(),
            ring: config.ring.into(),
        }
    }
}

/// Links, buttons, and anything tagged hoverable.
pub fn is_interactive(element: &Element) -> bool {
    matches!(element.kind, ElementKind::Link | ElementKind::Button) || element.hoverable
}

#[derive(Debug)]
pub struct PointerOverlay {
    owner: OwnerId,
    active: bool,
    suppressed: bool,
    position: Point,
    visible: bool,
    hovering: bool,
    /// Elements with hover listeners: (enter, leave).
    wired: HashMap<ElementId, (ListenerId, ListenerId)>,
    observer: Option<ObserverId>,
    frame: Option<FrameHandle>,
    last_tick: Option<Duration>,
    dot: AnimatedLayer,
    ring: AnimatedLayer,
}

impl PointerOverlay {
    /// Register listeners and the body observer. On a coarse pointer
    /// nothing is registered and the overlay stays suppressed.
    pub fn activate(platform: &mut Platform, settings: OverlaySettings) -> Result<Self, PlatformError> {
        let owner = platform.new_owner();
        let mut overlay = Self {
            owner,
            active: false,
            suppressed: false,
            position: Point::default(),
            visible: false,
            hovering: false,
            wired: HashMap::new(),
            observer: None,
            frame: None,
            last_tick: None,
            dot: AnimatedLayer::new(LayerKind::Dot, settings.dot),
            ring: AnimatedLayer::new(LayerKind::Ring, settings.ring),
        };

        if platform.pointer().is_coarse() {
            debug!("coarse pointer, cursor overlay suppressed");
            overlay.suppressed = true;
            return Ok(overlay);
        }

        platform.add_listener(owner, ListenerTarget::Window, EventKind::PointerMove)?;
        platform.add_listener(owner, ListenerTarget::Document, EventKind::PointerEnter)?;
        platform.add_listener(owner, ListenerTarget::Document, EventKind::PointerLeave)?;

        let body = platform.document.body();
        overlay.observer = Some(platform.document.observe(owner, body, true)?);
        overlay.active = true;

        for id in platform.document.query(is_interactive) {
            overlay.wire(platform, id)?;
        }
        debug!(wired = overlay.wired.len(), "cursor overlay active");
        Ok(overlay)
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn is_wired(&self, id: ElementId) -> bool {
        self.wired.contains_key(&id)
    }

    pub fn wired_count(&self) -> usize {
        self.wired.len()
    }

    pub fn observer(&self) -> Option<ObserverId> {
        self.observer
    }

    pub fn is_animating(&self) -> bool {
        self.frame.is_some()
    }

    /// Current dot and ring, or `None` when the overlay draws nothing.
    pub fn layers(&self) -> Option<[CursorLayer; 2]> {
        if !self.active {
            return None;
        }
        Some([self.dot.snapshot(), self.ring.snapshot()])
    }

    /// Attach enter/leave listeners to `id` unless already wired.
    fn wire(&mut self, platform: &mut Platform, id: ElementId) -> Result<(), PlatformError> {
        if self.wired.contains_key(&id) {
            return Ok(());
        }
        let target = ListenerTarget::Element(id);
        let enter = platform.add_listener(self.owner, target, EventKind::PointerEnter)?;
        let leave = platform.add_listener(self.owner, target, EventKind::PointerLeave)?;
        self.wired.insert(id, (enter, leave));
        Ok(())
    }

    fn unwire(&mut self, platform: &mut Platform, id: ElementId) {
        if let Some((enter, leave)) = self.wired.remove(&id) {
            // Usually already gone with the element.
            platform.listeners.remove(enter);
            platform.listeners.remove(leave);
        }
        let hovering = self.over_wired(platform);
        if hovering != self.hovering {
            self.hovering = hovering;
            self.retarget(platform);
        }
    }

    /// Whether the pointer is inside any wired element right now. Nested
    /// targets mean one leave does not end the hover.
    fn over_wired(&self, platform: &Platform) -> bool {
        self.wired.keys().any(|&id| platform.is_hovered(id))
    }

    /// Handle a listener dispatch owned by this overlay.
    pub fn handle_event(&mut self, platform: &mut Platform, dispatch: &Dispatch) -> Result<(), PlatformError> {
        if !self.active || dispatch.owner != self.owner {
            return Ok(());
        }

        match (dispatch.target, dispatch.event) {
            (ListenerTarget::Window, Event::PointerMove { position }) => {
                self.position = position;
                self.visible = true;
            }
            (ListenerTarget::Document, Event::PointerEnter) => self.visible = true,
            (ListenerTarget::Document, Event::PointerLeave) => self.visible = false,
            (ListenerTarget::Element(id), event) => {
                if !self.wired.contains_key(&id) {
                    return Err(PlatformError::StaleTarget(id.0));
                }
                match event {
                    Event::PointerEnter => self.hovering = true,
                    Event::PointerLeave => self.hovering = self.over_wired(platform),
                    _ => return Ok(()),
                }
            }
            _ => return Ok(()),
        }

        self.retarget(platform);
        Ok(())
    }

    /// Wire newly inserted interactive elements and forget removed ones.
    pub fn handle_mutations(&mut self, platform: &mut Platform, batch: &MutationBatch) -> Result<(), PlatformError> {
        if !self.active || batch.owner != self.owner || Some(batch.observer) != self.observer {
            return Ok(());
        }

        for record in &batch.records {
            match *record {
                Mutation::Added(id) => {
                    // A later record in the batch may have removed it again.
                    let interactive = platform.document.get(id).map(is_interactive).unwrap_or(false);
                    if interactive {
                        self.wire(platform, id)?;
                    }
                }
                Mutation::Removed(id) => self.unwire(platform, id),
            }
        }
        Ok(())
    }

    /// Advance the springs for `tick`; keeps requesting frames until every
    /// layer settles.
    pub fn handle_frame(&mut self, platform: &mut Platform, tick: &FrameTick) {
        if self.frame != Some(tick.handle) {
            return;
        }

        let dt = self
            .last_tick
            .map(|last| tick.timestamp.saturating_sub(last).as_secs_f64())
            .unwrap_or(FIRST_FRAME_DT);
        self.last_tick = Some(tick.timestamp);

        self.dot.step(dt);
        self.ring.step(dt);

        if self.dot.is_settled() && self.ring.is_settled() {
            self.frame = None;
            self.last_tick = None;
        } else {
            self.frame = Some(platform.frames.request(self.owner));
        }
    }

    fn retarget(&mut self, platform: &mut Platform) {
        self.dot.retarget(self.position, self.hovering, self.visible);
        self.ring.retarget(self.position, self.hovering, self.visible);
        if self.frame.is_none() && !(self.dot.is_settled() && self.ring.is_settled()) {
            self.frame = Some(platform.frames.request(self.owner));
        }
    }

    /// Remove every listener and the observer. Safe to call repeatedly.
    pub fn deactivate(&mut self, platform: &mut Platform) {
        if !self.active {
            return;
        }
        if let Some(frame) = self.frame.take() {
            platform.frames.cancel(frame);
        }
        let removed = platform.listeners.remove_owner(self.owner);
        if let Some(observer) = self.observer.take() {
            platform.document.disconnect(observer);
        }
        self.wired.clear();
        self.active = false;
        debug!(listeners = removed, "cursor overlay deactivated");
    }
}
