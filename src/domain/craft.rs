//! Steerable craft constrained to a spherical shell around the origin.

use std::{slice::Iter, time::Duration};

use nalgebra::Vector3;
use thiserror::Error;

use super::{Angle, BoundingSphere, HasCollision, Point3, Spherical};

#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct Craft {
    position: Point3,
    config: CraftConfig,
}

impl Craft {
    /// Creates the craft at the shell's north pole.
    pub fn new(config: CraftConfig) -> Self {
        let position = Point3::new(0.0, config.shell_radius, 0.0);
        Self { position, config }
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn set_position(&mut self, position: Point3) {
        self.position = position;
    }

    pub fn config(&self) -> &CraftConfig {
        &self.config
    }

    /// Returns the craft back to the shell's north pole.
    pub fn reset(&mut self) {
        self.position = Point3::new(0.0, self.config.shell_radius, 0.0);
    }

    /// Returns the craft translated along the shell in the requested directions.
    ///
    /// Each direction perturbs one angular coordinate by the steering step scaled with elapsed
    /// time; the chords from the current position to the perturbed shell points are summed and
    /// the sum is capped at one length unit. Opposing directions therefore cancel to a
    /// second-order residual instead of a full step, and an empty direction set (or a zero time
    /// step) leaves the position untouched. The result is not re-projected onto the shell, so a
    /// small radial drift accumulates with large time steps.
    pub fn steered(&self, directions: &[Direction], dt: Duration) -> Craft {
        let radius = self.config.shell_radius;
        let here = Spherical::from_cartesian(self.position, radius);
        let step = self.config.steering_step * dt.as_secs_f64();

        let movement = directions
            .iter()
            .map(|direction| {
                let target = match direction {
                    Direction::Up => Spherical::new(here.theta(), here.phi() - step),
                    Direction::Down => Spherical::new(here.theta(), here.phi() + step),
                    Direction::Left => Spherical::new(here.theta() - step, here.phi()),
                    Direction::Right => Spherical::new(here.theta() + step, here.phi()),
                };
                Vector3::from(target.to_cartesian(radius)) - Vector3::from(self.position)
            })
            .fold(Vector3::zeros(), |total, chord| total + chord)
            .cap_magnitude(1.0);

        let mut craft = self.clone();
        craft.set_position(self.position + Point3::from(movement));
        craft
    }
}

impl HasCollision for Craft {
    fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.position, self.config.collision_radius())
    }
}

#[derive(Error, Debug)]
pub enum CraftError {
    #[error("shell radius must be positive, got {0}")]
    InvalidShellRadius(f64),
    #[error("hull extents must not be negative, got {0}x{1}")]
    InvalidHullExtents(f64, f64),
}

/// The shell the craft is bound to, the angular steering speed and the hull extents. The hull is
/// a capsule; its half-length plus cap radius doubles as the craft's collision radius.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct CraftConfig {
    shell_radius: f64,
    steering_step: Angle,
    hull_length: f64,
    hull_radius: f64,
}

impl CraftConfig {
    pub fn new(
        shell_radius: f64,
        steering_step: Angle,
        hull_length: f64,
        hull_radius: f64,
    ) -> Result<Self, CraftError> {
        if !(shell_radius > 0.0) {
            return Err(CraftError::InvalidShellRadius(shell_radius));
        }
        if !(hull_length >= 0.0 && hull_radius >= 0.0) {
            return Err(CraftError::InvalidHullExtents(hull_length, hull_radius));
        }
        Ok(Self {
            shell_radius,
            steering_step,
            hull_length,
            hull_radius,
        })
    }

    pub fn shell_radius(&self) -> f64 {
        self.shell_radius
    }

    pub fn steering_step(&self) -> Angle {
        self.steering_step
    }

    pub fn hull_length(&self) -> f64 {
        self.hull_length
    }

    pub fn hull_radius(&self) -> f64 {
        self.hull_radius
    }

    pub fn collision_radius(&self) -> f64 {
        self.hull_length / 2.0 + self.hull_radius
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn iter() -> Iter<'static, Direction> {
        static DIRECTIONS: [Direction; 4] = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        DIRECTIONS.iter()
    }
}
