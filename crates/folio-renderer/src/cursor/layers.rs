//! The two cursor layers and their spring-driven properties.

use folio_common::Point;

use crate::motion::{Spring, SpringParams};

pub const DOT_DIAMETER: f64 = 12.0;
pub const RING_DIAMETER: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Dot,
    Ring,
}

impl LayerKind {
    pub fn diameter(self) -> f64 {
        match self {
            LayerKind::Dot => DOT_DIAMETER,
            LayerKind::Ring => RING_DIAMETER,
        }
    }

    /// Target `(scale, opacity)` for the given overlay state.
    pub fn targets(self, hovering: bool, visible: bool) -> (f64, f64) {
        match self {
            LayerKind::Dot => (
                if hovering { 0.5 } else { 1.0 },
                if visible { 1.0 } else { 0.0 },
            ),
            LayerKind::Ring => (
                if hovering { 1.5 } else { 1.0 },
                if visible { 0.6 } else { 0.0 },
            ),
        }
    }
}

/// A layer snapshot ready to draw: a disc (dot) or outline (ring) of
/// `diameter * scale` logical px centred on `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorLayer {
    pub kind: LayerKind,
    pub center: Point,
    pub diameter: f64,
    pub scale: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone)]
pub(crate) struct AnimatedLayer {
    kind: LayerKind,
    x: Spring,
    y: Spring,
    scale: Spring,
    opacity: Spring,
}

impl AnimatedLayer {
    /// At the origin, unscaled and invisible.
    pub fn new(kind: LayerKind, params: SpringParams) -> Self {
        let (scale, opacity) = kind.targets(false, false);
        Self {
            kind,
            x: Spring::new(0.0, params),
            y: Spring::new(0.0, params),
            scale: Spring::new(scale, params),
            opacity: Spring::new(opacity, params),
        }
    }

    pub fn retarget(&mut self, position: Point, hovering: bool, visible: bool) {
        let (scale, opacity) = self.kind.targets(hovering, visible);
        self.x.set_target(position.x);
        self.y.set_target(position.y);
        self.scale.set_target(scale);
        self.opacity.set_target(opacity);
    }

    pub fn step(&mut self, dt: f64) {
        self.x.step(dt);
        self.y.step(dt);
        self.scale.step(dt);
        self.opacity.step(dt);
    }

    pub fn is_settled(&self) -> bool {
        self.x.is_settled()
            && self.y.is_settled()
            && self.scale.is_settled()
            && self.opacity.is_settled()
    }

    pub fn snapshot(&self) -> CursorLayer {
        CursorLayer {
            kind: self.kind,
            center: Point::new(self.x.value, self.y.value),
            diameter: self.kind.diameter(),
            scale: self.scale.value,
            opacity: self.opacity.value.clamp(0.0, 1.0),
        }
    }
}
