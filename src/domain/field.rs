//! Debris field scattered over a spherical shell.
//!
//! Placement is rejection sampling: candidates overlapping already accepted debris are redrawn
//! up to a bounded number of attempts, so an accepted field never contains an overlapping pair.
//! Each accepted debris is bucketed once by the signs of its x and z coordinates; collision
//! queries scan only the bucket matching the probe, which assumes debris never migrates across
//! the coordinate planes.

use rand::Rng;
use thiserror::Error;

use super::{BoundingSphere, HasCollision, Point3};

const MAX_PLACEMENT_ATTEMPTS: usize = 100;

#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct DebrisField {
    shell_radius: f64,
    debris: Vec<Debris>,
    next_id: u32,
}

impl DebrisField {
    pub fn new(shell_radius: f64) -> Result<Self, FieldError> {
        if !(shell_radius > 0.0) {
            return Err(FieldError::InvalidShellRadius(shell_radius));
        }
        Ok(Self {
            shell_radius,
            debris: Vec::new(),
            next_id: 0,
        })
    }

    pub fn shell_radius(&self) -> f64 {
        self.shell_radius
    }

    pub fn debris(&self) -> &[Debris] {
        &self.debris
    }

    pub fn get(&self, id: DebrisId) -> Option<&Debris> {
        self.debris.iter().find(|d| d.id == id)
    }

    pub fn contains(&self, id: DebrisId) -> bool {
        self.get(id).is_some()
    }

    /// Scatters one debris onto the shell without overlapping any existing debris.
    ///
    /// Candidates are drawn by sampling x and y uniformly over the shell's extent and deriving z
    /// from the shell equation, with the hemisphere chosen by a coin flip. A candidate whose
    /// radicand is negative or that touches existing debris consumes one attempt; after 100
    /// failed attempts the placement fails.
    pub fn scatter(
        &mut self,
        collision_radius: f64,
        rng: &mut impl Rng,
    ) -> Result<DebrisId, FieldError> {
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let x = rng.random_range(-self.shell_radius..=self.shell_radius);
            let y = rng.random_range(-self.shell_radius..=self.shell_radius);
            let radicand = self.shell_radius.powi(2) - x.powi(2) - y.powi(2);
            if radicand < 0.0 {
                continue;
            }

            let z = if rng.random_bool(0.5) {
                radicand.sqrt()
            } else {
                -radicand.sqrt()
            };
            let position = Point3::new(x, y, z);

            let candidate = BoundingSphere::new(position, collision_radius);
            if self
                .debris
                .iter()
                .any(|d| d.bounding_sphere().intersects(&candidate))
            {
                continue;
            }

            return Ok(self.insert(position, collision_radius));
        }

        Err(FieldError::PlacementExhausted {
            attempts: MAX_PLACEMENT_ATTEMPTS,
        })
    }

    /// Adds debris at a fixed position, bypassing the overlap check. Scripted scenes and tests
    /// use this; procedural placement goes through [`Self::scatter`].
    pub fn insert(&mut self, position: Point3, collision_radius: f64) -> DebrisId {
        let id = DebrisId(self.next_id);
        self.next_id += 1;
        self.debris.push(Debris {
            id,
            position,
            collision_radius,
            quadrant: Quadrant::from_position(position),
        });
        id
    }

    /// Reports all debris in the probe's quadrant bucket that touch or overlap the probe. The
    /// caller decides what happens to the reported debris; the field itself is not modified.
    pub fn collisions(&self, probe: &dyn HasCollision) -> Vec<DebrisId> {
        let sphere = probe.bounding_sphere();
        let quadrant = Quadrant::from_position(sphere.position());
        self.debris
            .iter()
            .filter(|d| d.quadrant == quadrant && d.bounding_sphere().intersects(&sphere))
            .map(|d| d.id)
            .collect()
    }

    pub fn remove(&mut self, id: DebrisId) -> Option<Debris> {
        let idx = self.debris.iter().position(|d| d.id == id)?;
        Some(self.debris.remove(idx))
    }
}

#[derive(Error, Debug)]
pub enum FieldError {
    #[error("shell radius must be positive, got {0}")]
    InvalidShellRadius(f64),
    #[error("no free placement found after {attempts} attempts")]
    PlacementExhausted { attempts: usize },
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct DebrisId(u32);

#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct Debris {
    id: DebrisId,
    position: Point3,
    collision_radius: f64,
    quadrant: Quadrant,
}

impl Debris {
    pub fn id(&self) -> DebrisId {
        self.id
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn collision_radius(&self) -> f64 {
        self.collision_radius
    }

    pub fn quadrant(&self) -> Quadrant {
        self.quadrant
    }
}

impl HasCollision for Debris {
    fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.position, self.collision_radius)
    }
}

/// Bucket keyed by the signs of the x and z coordinates, zero counting as positive. Assigned
/// once at placement and never revisited.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Quadrant {
    PosPos,
    NegPos,
    PosNeg,
    NegNeg,
}

impl Quadrant {
    pub fn from_position(position: Point3) -> Self {
        match (position.x() >= 0.0, position.z() >= 0.0) {
            (true, true) => Quadrant::PosPos,
            (false, true) => Quadrant::NegPos,
            (true, false) => Quadrant::PosNeg,
            (false, false) => Quadrant::NegNeg,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    use super::super::{Angle, Craft, CraftConfig};
    use super::*;

    const SHELL_RADIUS: f64 = 70.0;
    const RNG_SEED: u64 = 7;

    #[rstest]
    #[case(0.0)]
    #[case(-5.0)]
    fn test_field_rejects_degenerate_shell(#[case] shell_radius: f64) {
        let error = DebrisField::new(shell_radius).unwrap_err();
        assert!(matches!(error, FieldError::InvalidShellRadius(_)));
    }

    #[test]
    fn test_field_error_display() {
        let error = DebrisField::new(-5.0).unwrap_err();
        insta::assert_snapshot!(error, @"shell radius must be positive, got -5");
    }

    #[rstest]
    #[case(Point3::new(5.0, 1.0, 3.0), Quadrant::PosPos)]
    #[case(Point3::new(-5.0, 1.0, 3.0), Quadrant::NegPos)]
    #[case(Point3::new(5.0, 1.0, -3.0), Quadrant::PosNeg)]
    #[case(Point3::new(-5.0, 1.0, -3.0), Quadrant::NegNeg)]
    #[case::zero_is_positive(Point3::new(0.0, 1.0, 0.0), Quadrant::PosPos)]
    #[case::zero_is_positive_x(Point3::new(0.0, 1.0, -3.0), Quadrant::PosNeg)]
    fn test_quadrant_from_position(#[case] position: Point3, #[case] expected: Quadrant) {
        assert_eq!(Quadrant::from_position(position), expected);
    }

    #[test]
    fn test_scatter_places_on_shell() {
        let mut field = DebrisField::new(SHELL_RADIUS).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(RNG_SEED);

        for _ in 0..20 {
            if let Ok(id) = field.scatter(5.0, &mut rng) {
                let debris = field.get(id).unwrap();
                assert_abs_diff_eq!(debris.position().length(), SHELL_RADIUS, epsilon = 1e-9);
                assert_eq!(debris.quadrant(), Quadrant::from_position(debris.position()));
            }
        }
    }

    #[test]
    fn test_scatter_never_accepts_overlap() {
        let mut field = DebrisField::new(SHELL_RADIUS).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(RNG_SEED);

        for _ in 0..20 {
            match field.scatter(5.0, &mut rng) {
                Ok(_) => {}
                Err(error) => {
                    assert!(matches!(error, FieldError::PlacementExhausted { .. }));
                }
            }
        }

        for (i, a) in field.debris().iter().enumerate() {
            for b in field.debris().iter().skip(i + 1) {
                assert!(
                    a.position().distance(b.position())
                        > a.collision_radius() + b.collision_radius()
                );
            }
        }
    }

    #[test]
    fn test_scatter_exhausts_on_crowded_shell() {
        // Any two points on a unit shell are closer than two huge collision radii, so the second
        // placement can never succeed.
        let mut field = DebrisField::new(1.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(RNG_SEED);

        field.scatter(10.0, &mut rng).unwrap();
        let error = field.scatter(10.0, &mut rng).unwrap_err();
        insta::assert_snapshot!(error, @"no free placement found after 100 attempts");
    }

    #[test]
    fn test_collisions_reports_touching_debris() {
        let mut field = DebrisField::new(SHELL_RADIUS).unwrap();
        let near = field.insert(Point3::new(2.0, 0.0, 2.0), 1.0);
        let far = field.insert(Point3::new(40.0, 0.0, 40.0), 1.0);

        let struck = field.collisions(&probe_at(Point3::new(1.0, 0.0, 1.0)));
        assert_eq!(struck, vec![near]);
        assert!(field.contains(far));
    }

    #[test]
    fn test_collisions_scans_only_probe_quadrant() {
        let mut field = DebrisField::new(SHELL_RADIUS).unwrap();
        // Overlaps the probe but sits in the neighbouring bucket across the x=0 plane.
        field.insert(Point3::new(-0.5, 0.0, 1.0), 5.0);

        let struck = field.collisions(&probe_at(Point3::new(1.0, 0.0, 1.0)));
        assert_eq!(struck, vec![]);
    }

    #[test]
    fn test_remove() {
        let mut field = DebrisField::new(SHELL_RADIUS).unwrap();
        let id = field.insert(Point3::new(2.0, 0.0, 2.0), 1.0);

        let removed = field.remove(id).unwrap();
        assert_eq!(removed.id(), id);
        assert!(!field.contains(id));
        assert!(field.debris().is_empty());
        assert!(field.remove(id).is_none());
    }

    fn probe_at(position: Point3) -> Craft {
        let config = CraftConfig::new(SHELL_RADIUS, Angle::new(2.0), 6.0, 2.0).unwrap();
        let mut craft = Craft::new(config);
        craft.set_position(position);
        craft
    }
}
