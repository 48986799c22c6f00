//! Instanced 2D shapes for everything drawn on top of the scene surfaces:
//! page chrome, the fallback gradient, and the cursor layers.

mod pipeline;
mod renderer;
mod types;

pub use renderer::QuadRenderer;
pub use types::{QuadInstance, QuadShape};

#[cfg(test)]
mod tests {
    use folio_common::{Point, Rect};

    use super::types::*;

    #[test]
    fn quad_instance_size() {
        assert_eq!(std::mem::size_of::<QuadInstance>(), 64);
    }

    #[test]
    fn capacity_grows_to_power_of_two() {
        assert_eq!(grown_capacity(INITIAL_CAPACITY, 10), INITIAL_CAPACITY);
        assert_eq!(grown_capacity(64, 65), 128);
        assert_eq!(grown_capacity(64, 300), 512);
        assert_eq!(grown_capacity(512, 300), 512);
    }

    #[test]
    fn disc_is_centered_square() {
        let q = QuadInstance::disc(Point::new(100.0, 50.0), 12.0, [1.0; 4]);
        assert_eq!(q.rect, [94.0, 44.0, 12.0, 12.0]);
        assert_eq!(q.shape(), QuadShape::Disc);
    }

    #[test]
    fn ring_keeps_thickness() {
        let q = QuadInstance::ring(Point::new(0.0, 0.0), 40.0, 2.0, [1.0; 4]);
        assert_eq!(q.shape(), QuadShape::Ring);
        assert_eq!(q.params[1], 2.0);
    }

    #[test]
    fn scaled_scales_rect_and_thickness() {
        let q = QuadInstance::ring(Point::new(20.0, 20.0), 40.0, 2.0, [1.0; 4]).scaled(2.0);
        assert_eq!(q.rect, [0.0, 0.0, 80.0, 80.0]);
        assert_eq!(q.params[1], 4.0);
    }

    #[test]
    fn gradient_carries_both_colors() {
        let q = QuadInstance::gradient(Rect::new(0.0, 0.0, 10.0, 10.0), [1.0, 0.0, 0.0, 1.0], [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(q.shape(), QuadShape::Gradient);
        assert_ne!(q.color, q.color2);
        assert_eq!(QuadInstance::rect(Rect::default(), [0.0; 4]).shape(), QuadShape::Rect);
    }
}
