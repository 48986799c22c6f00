//! Perspective camera with pointer parallax.

use super::types::{CAMERA_EASE, PARALLAX_GAIN};
use crate::matrix::{look_at, perspective, Mat4, Vec3};
use crate::motion::approach;

pub const FOV_DEGREES: f32 = 75.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 1000.0;
/// Starting distance back along +z.
pub const START_DISTANCE: f32 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    aspect: f32,
    projection: Mat4,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: [0.0, 0.0, START_DISTANCE],
            aspect,
            projection: perspective(FOV_DEGREES.to_radians(), aspect, NEAR, FAR),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Update the aspect ratio and recompute the projection.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.projection = perspective(FOV_DEGREES.to_radians(), aspect, NEAR, FAR);
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// View matrix looking at the origin.
    pub fn view(&self) -> Mat4 {
        look_at(self.position, [0.0, 0.0, 0.0], [0.0, 1.0, 0.0])
    }

    /// Ease toward the parallax target for a pointer at `pointer`
    /// (normalized, -1..1 on both axes).
    pub fn follow(&mut self, pointer: [f32; 2]) {
        let target = parallax_target(pointer);
        self.position[0] = approach(self.position[0], target[0], CAMERA_EASE);
        self.position[1] = approach(self.position[1], target[1], CAMERA_EASE);
    }
}

pub fn parallax_target(pointer: [f32; 2]) -> [f32; 2] {
    [pointer[0] * PARALLAX_GAIN[0], pointer[1] * PARALLAX_GAIN[1]]
}
