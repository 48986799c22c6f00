//! What a window frame shows, in logical pixels.

use folio_common::{Color, Rect, SurfaceId};

use crate::cursor::{CursorLayer, LayerKind};
use crate::quad::QuadInstance;

/// Ring outline thickness, logical px.
pub const RING_THICKNESS: f32 = 2.0;

/// One window frame: background, scene surfaces, then shapes in order.
#[derive(Debug, Clone)]
pub struct Composition {
    pub clear: Color,
    /// Scene surfaces and the container rects they fill.
    pub surfaces: Vec<(SurfaceId, Rect)>,
    /// Drawn after the surfaces, in order.
    pub quads: Vec<QuadInstance>,
}

impl Composition {
    pub fn new(clear: Color) -> Self {
        Self {
            clear,
            surfaces: Vec::new(),
            quads: Vec::new(),
        }
    }

    pub fn push(&mut self, quad: QuadInstance) {
        self.quads.push(quad);
    }

    /// Static gradient shown in place of a failed scene.
    pub fn push_fallback(&mut self, rect: Rect, primary: Color, accent: Color) {
        self.quads.push(QuadInstance::gradient(
            rect,
            primary.to_rgba_f32(0.25),
            accent.to_rgba_f32(0.25),
        ));
    }

    /// Cursor layers, dot first. Invisible layers are skipped.
    pub fn push_cursor(&mut self, layers: &[CursorLayer], color: Color) {
        for layer in layers {
            if layer.opacity <= 0.0 {
                continue;
            }
            let diameter = layer.diameter * layer.scale;
            let rgba = color.to_rgba_f32(layer.opacity as f32);
            self.quads.push(match layer.kind {
                LayerKind::Dot => QuadInstance::disc(layer.center, diameter, rgba),
                LayerKind::Ring => QuadInstance::ring(layer.center, diameter, RING_THICKNESS, rgba),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quad::QuadShape;
    use folio_common::Point;

    fn layer(kind: LayerKind, scale: f64, opacity: f64) -> CursorLayer {
        CursorLayer {
            kind,
            center: Point::new(50.0, 50.0),
            diameter: kind.diameter(),
            scale,
            opacity,
        }
    }

    #[test]
    fn cursor_layers_become_disc_and_ring() {
        let mut c = Composition::new(Color::from_rgba(0, 0, 0, 255));
        c.push_cursor(
            &[layer(LayerKind::Dot, 0.5, 1.0), layer(LayerKind::Ring, 1.5, 0.6)],
            Color::from_rgba(255, 255, 255, 255),
        );
        assert_eq!(c.quads.len(), 2);
        assert_eq!(c.quads[0].shape(), QuadShape::Disc);
        assert_eq!(c.quads[0].rect[2], 6.0);
        assert_eq!(c.quads[1].shape(), QuadShape::Ring);
        assert_eq!(c.quads[1].rect[2], 60.0);
        assert!((c.quads[1].color[3] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn invisible_layers_are_skipped() {
        let mut c = Composition::new(Color::from_rgba(0, 0, 0, 255));
        c.push_cursor(
            &[layer(LayerKind::Dot, 1.0, 0.0), layer(LayerKind::Ring, 1.0, 0.0)],
            Color::from_rgba(255, 255, 255, 255),
        );
        assert!(c.quads.is_empty());
    }

    #[test]
    fn fallback_is_a_gradient() {
        let mut c = Composition::new(Color::from_rgba(10, 10, 18, 255));
        let primary = Color::from_rgba(176, 38, 255, 255);
        let accent = Color::from_rgba(0, 212, 255, 255);
        c.push_fallback(Rect::new(0.0, 0.0, 100.0, 50.0), primary, accent);
        assert_eq!(c.quads[0].shape(), QuadShape::Gradient);
        assert_eq!(c.quads[0].rect, [0.0, 0.0, 100.0, 50.0]);
    }
}
