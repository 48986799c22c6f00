//! Motion toward a moving target.
//!
//! Two flavours: [`approach`] moves a fixed fraction of the remaining
//! distance per step (the scene camera), and [`Spring`] integrates a
//! damped spring (the cursor layers).

use folio_config::schema::SpringConfig;

/// Move `current` toward `target` by `fraction` of the remaining distance.
///
/// For `fraction` in `(0, 1]` the result never passes the target.
pub fn approach(current: f32, target: f32, fraction: f32) -> f32 {
    current + (target - current) * fraction
}

/// Largest integration sub-step, in seconds.
const MAX_SUBSTEP: f64 = 1.0 / 480.0;
/// Longer frame gaps (a stalled window) are clamped to this many seconds.
const MAX_FRAME_DT: f64 = 0.1;
const REST_DELTA: f64 = 0.01;
const REST_SPEED: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringParams {
    /// Tight, fast tracking for the cursor dot.
    pub const DOT: Self = Self {
        stiffness: 500.0,
        damping: 28.0,
        mass: 0.5,
    };

    /// Softer spring; the ring visibly trails the dot.
    pub const RING: Self = Self {
        stiffness: 150.0,
        damping: 15.0,
        mass: 0.1,
    };
}

impl From<SpringConfig> for SpringParams {
    fn from(c: SpringConfig) -> Self {
        Self {
            stiffness: c.stiffness,
            damping: c.damping,
            mass: c.mass,
        }
    }
}

/// A one-dimensional damped spring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub value: f64,
    pub velocity: f64,
    pub target: f64,
    pub params: SpringParams,
}

impl Spring {
    /// A spring at rest on `value`.
    pub fn new(value: f64, params: SpringParams) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            params,
        }
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Advance by `dt` seconds (semi-implicit Euler on fixed sub-steps).
    pub fn step(&mut self, dt: f64) {
        if self.is_settled() {
            return;
        }

        let total = dt.clamp(0.0, MAX_FRAME_DT);
        let steps = (total / MAX_SUBSTEP).ceil().max(1.0) as u32;
        let h = total / f64::from(steps);
        let SpringParams {
            stiffness,
            damping,
            mass,
        } = self.params;

        for _ in 0..steps {
            let force = -stiffness * (self.value - self.target) - damping * self.velocity;
            self.velocity += force / mass * h;
            self.value += self.velocity * h;
        }

        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    /// Close enough to the target and slow enough to stop animating.
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_DELTA && self.velocity.abs() < REST_SPEED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    fn run(spring: &mut Spring, frames: usize) {
        for _ in 0..frames {
            spring.step(FRAME);
        }
    }

    #[test]
    fn approach_moves_fraction_of_distance() {
        assert!((approach(0.0, 10.0, 0.02) - 0.2).abs() < 1e-6);
        assert!((approach(10.0, 10.0, 0.02) - 10.0).abs() < 1e-6);
        assert!((approach(5.0, -5.0, 1.0) - -5.0).abs() < 1e-6);
    }

    #[test]
    fn approach_converges_without_overshoot() {
        let mut x = 0.0f32;
        let mut previous_gap = f32::MAX;
        for _ in 0..1000 {
            x = approach(x, 3.0, 0.02);
            assert!(x <= 3.0);
            let gap = 3.0 - x;
            assert!(gap <= previous_gap);
            previous_gap = gap;
        }
        assert!((x - 3.0).abs() < 1e-3);
    }

    #[test]
    fn spring_at_rest_stays_put() {
        let mut s = Spring::new(4.0, SpringParams::DOT);
        assert!(s.is_settled());
        s.step(FRAME);
        assert_eq!(s.value, 4.0);
    }

    #[test]
    fn spring_reaches_target_and_snaps() {
        for params in [SpringParams::DOT, SpringParams::RING] {
            let mut s = Spring::new(0.0, params);
            s.set_target(100.0);
            run(&mut s, 300);
            assert!(s.is_settled());
            assert_eq!(s.value, 100.0);
            assert_eq!(s.velocity, 0.0);
        }
    }

    #[test]
    fn dot_leads_ring() {
        let mut dot = Spring::new(0.0, SpringParams::DOT);
        let mut ring = Spring::new(0.0, SpringParams::RING);
        dot.set_target(100.0);
        ring.set_target(100.0);
        run(&mut dot, 3);
        run(&mut ring, 3);
        assert!(dot.value > ring.value);
    }

    #[test]
    fn huge_dt_is_clamped() {
        let mut a = Spring::new(0.0, SpringParams::DOT);
        let mut b = a;
        a.set_target(50.0);
        b.set_target(50.0);
        a.step(10.0);
        b.step(MAX_FRAME_DT);
        assert_eq!(a.value, b.value);
        assert!(a.value.is_finite());
    }

    #[test]
    fn params_from_config() {
        let params: SpringParams = SpringConfig::RING.into();
        assert_eq!(params, SpringParams::RING);
    }
}
