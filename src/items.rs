use crate::error::{Error, Result};
use crate::library::*;

/// Mass per unit of radius. Every ball gets `mass = radius * MASS_PER_RADIUS`.
pub const MASS_PER_RADIUS: f64 = 10.0;
pub const DEFAULT_RADIUS: f64 = 10.0;

/// RGBA display colour. The physics never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    /// White at 75% opacity.
    pub const GHOST: Color = Color::rgba(255, 255, 255, 191);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }
}

/// Symmetric-or-not bounds applied to each velocity component after a collision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityLimits {
    pub min: f64,
    pub max: f64,
}

impl VelocityLimits {
    pub const UNBOUNDED: VelocityLimits = VelocityLimits {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    pub fn symmetric(limit: f64) -> VelocityLimits {
        VelocityLimits {
            min: -limit.abs(),
            max: limit.abs(),
        }
    }

    pub fn clamp(&self, vel: [f64; 2]) -> [f64; 2] {
        [vel[0].clamp(self.min, self.max), vel[1].clamp(self.min, self.max)]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub id: usize,
    pub position: [f64; 2],
    pub velocity: [f64; 2],
    pub color: Color,
    radius: f64,
    mass: f64,
}

impl Ball {
    pub fn new(
        position: [f64; 2],
        velocity: Option<[f64; 2]>,
        radius: Option<f64>,
        color: Option<Color>,
    ) -> Result<Ball> {
        let radius = radius.unwrap_or(DEFAULT_RADIUS);
        let velocity = velocity.unwrap_or([0.0, 0.0]);
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "radius must be finite and > 0, got {radius}"
            )));
        }
        if !position.iter().chain(velocity.iter()).all(|c| c.is_finite()) {
            return Err(Error::InvalidConfiguration(
                "position and velocity must be finite".into(),
            ));
        }
        Ok(Ball {
            id: 0,
            position,
            velocity,
            color: color.unwrap_or(Color::GHOST),
            radius,
            mass: radius * MASS_PER_RADIUS,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn momentum(&self) -> [f64; 2] {
        [self.velocity[0] * self.mass, self.velocity[1] * self.mass]
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * dot(self.velocity, self.velocity)
    }

    /// True when the discs touch or interpenetrate.
    pub fn collides(&self, other: &Ball) -> bool {
        let min_dist = self.radius + other.radius;
        squared_distance(self.position, other.position) <= min_dist * min_dist
    }

    /// Pushes both balls apart along the line of centers until they are tangent.
    ///
    /// `distance` is the current center distance. A single pass: with several
    /// simultaneous contacts some overlap may remain after one step.
    pub fn resolve_overlap(&mut self, other: &mut Ball, distance: f64) -> Result<()> {
        if distance <= 0.0 || !distance.is_finite() {
            return Err(Error::InvalidGeometry);
        }
        let delta = find_vector(other.position, self.position);
        let half_overlap = (distance - self.radius - other.radius) / 2.0;
        let shift = [
            delta[0] / distance * half_overlap,
            delta[1] / distance * half_overlap,
        ];
        self.position = [self.position[0] - shift[0], self.position[1] - shift[1]];
        other.position = [other.position[0] + shift[0], other.position[1] + shift[1]];
        Ok(())
    }

    /// Post-collision velocities of `self` and `other` for a 2-D elastic collision.
    ///
    /// Tangential components pass through, normal components are exchanged
    /// according to momentum conservation, then every component is clamped
    /// into `limits`. Neither ball is modified.
    pub fn solve_velocities(
        &self,
        other: &Ball,
        distance: f64,
        limits: VelocityLimits,
    ) -> Result<([f64; 2], [f64; 2])> {
        if distance <= 0.0 || !distance.is_finite() {
            return Err(Error::InvalidGeometry);
        }
        let vec = find_vector(self.position, other.position);
        let nv = [vec[0] / distance, vec[1] / distance];
        let tv = [-nv[1], nv[0]];

        let t_vel_self = dot(self.velocity, tv);
        let t_vel_other = dot(other.velocity, tv);
        let n_vel_self = dot(self.velocity, nv);
        let n_vel_other = dot(other.velocity, nv);

        let (m1, m2) = (self.mass, other.mass);
        let total = m1 + m2;
        let n_self = (n_vel_self * (m1 - m2) + 2.0 * m2 * n_vel_other) / total;
        let n_other = (n_vel_other * (m2 - m1) + 2.0 * m1 * n_vel_self) / total;

        let v_self = [
            tv[0] * t_vel_self + nv[0] * n_self,
            tv[1] * t_vel_self + nv[1] * n_self,
        ];
        let v_other = [
            tv[0] * t_vel_other + nv[0] * n_other,
            tv[1] * t_vel_other + nv[1] * n_other,
        ];
        Ok((limits.clamp(v_self), limits.clamp(v_other)))
    }

    /// Negates each velocity component that carries the ball's edge out of
    /// `[0, extent]` on that axis, now or after this tick's move.
    ///
    /// Returns true if any axis was reflected.
    pub fn wall_collision(&mut self, extent: [f64; 2]) -> bool {
        let mut reflected = false;
        for axis in 0..2 {
            let vel = self.velocity[axis];
            let low = self.position[axis] - self.radius;
            let high = self.position[axis] + self.radius;
            let leaving_low = vel < 0.0 && (low < 0.0 || low + vel < 0.0);
            let leaving_high = vel > 0.0 && (high > extent[axis] || high + vel > extent[axis]);
            if leaving_low || leaving_high {
                self.velocity[axis] = -vel;
                reflected = true;
            }
        }
        reflected
    }

    /// One fixed tick of Euler integration.
    pub fn move_ball(&mut self) {
        self.position = [
            self.position[0] + self.velocity[0],
            self.position[1] + self.velocity[1],
        ];
    }
}
