use folio_common::{Point, Rect};

/// How a quad's fragment shader fills its rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum QuadShape {
    /// Solid fill.
    Rect = 0,
    /// Filled circle inscribed in the rect.
    Disc = 1,
    /// Circle outline, `params[1]` px thick.
    Ring = 2,
    /// Diagonal blend from `color` (top-left) to `color2` (bottom-right).
    Gradient = 3,
}

/// A single shape to draw.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct QuadInstance {
    /// Position and size in pixels: [x, y, width, height].
    pub rect: [f32; 4],
    /// RGBA color, each component 0.0..=1.0.
    pub color: [f32; 4],
    /// Second colour, gradients only.
    pub color2: [f32; 4],
    /// x: shape, y: ring thickness in px.
    pub params: [f32; 4],
}

impl QuadInstance {
    fn new(rect: Rect, shape: QuadShape, color: [f32; 4], color2: [f32; 4], thickness: f32) -> Self {
        Self {
            rect: [rect.x as f32, rect.y as f32, rect.width as f32, rect.height as f32],
            color,
            color2,
            params: [shape as u32 as f32, thickness, 0.0, 0.0],
        }
    }

    pub fn rect(rect: Rect, color: [f32; 4]) -> Self {
        Self::new(rect, QuadShape::Rect, color, color, 0.0)
    }

    pub fn disc(center: Point, diameter: f64, color: [f32; 4]) -> Self {
        Self::new(square(center, diameter), QuadShape::Disc, color, color, 0.0)
    }

    pub fn ring(center: Point, diameter: f64, thickness: f32, color: [f32; 4]) -> Self {
        Self::new(square(center, diameter), QuadShape::Ring, color, color, thickness)
    }

    pub fn gradient(rect: Rect, from: [f32; 4], to: [f32; 4]) -> Self {
        Self::new(rect, QuadShape::Gradient, from, to, 0.0)
    }

    pub fn shape(&self) -> QuadShape {
        match self.params[0] as u32 {
            1 => QuadShape::Disc,
            2 => QuadShape::Ring,
            3 => QuadShape::Gradient,
            _ => QuadShape::Rect,
        }
    }

    /// Same shape with the rect scaled by `factor` (logical to physical px).
    pub fn scaled(mut self, factor: f32) -> Self {
        for v in &mut self.rect {
            *v *= factor;
        }
        self.params[1] *= factor;
        self
    }
}

fn square(center: Point, diameter: f64) -> Rect {
    Rect::new(
        center.x - diameter / 2.0,
        center.y - diameter / 2.0,
        diameter,
        diameter,
    )
}

/// Viewport size in physical px, for pixel to clip-space conversion.
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub(crate) struct ViewportUniforms {
    pub resolution: [f32; 2],
    pub _pad: [f32; 2],
}

/// Instance slots allocated up front.
pub(crate) const INITIAL_CAPACITY: usize = 64;

/// Next power of two that holds `needed`, never shrinking.
pub(crate) fn grown_capacity(current: usize, needed: usize) -> usize {
    if needed <= current {
        current
    } else {
        needed.next_power_of_two()
    }
}
