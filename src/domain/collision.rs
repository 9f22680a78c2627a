//! Collision detection based on bounding spheres.

use super::Point3;

pub trait HasCollision {
    fn has_collision(&self, other: &dyn HasCollision) -> bool {
        self.bounding_sphere().intersects(&other.bounding_sphere())
    }

    fn bounding_sphere(&self) -> BoundingSphere;
}

/// Position plus a non-negative radius approximating an object's extents. Two spheres that merely
/// touch already count as intersecting.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct BoundingSphere {
    position: Point3,
    radius: f64,
}

impl BoundingSphere {
    pub const fn new(position: Point3, radius: f64) -> Self {
        Self { position, radius }
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        self.position.distance(other.position) <= self.radius + other.radius
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::overlapping(Point3::new(0.0, 0.0, 0.0), 2.0, Point3::new(3.0, 0.0, 0.0), 2.0, true)]
    #[case::touching(Point3::new(0.0, 0.0, 0.0), 2.0, Point3::new(4.0, 0.0, 0.0), 2.0, true)]
    #[case::separate(Point3::new(0.0, 0.0, 0.0), 2.0, Point3::new(4.1, 0.0, 0.0), 2.0, false)]
    #[case::contained(Point3::new(0.0, 0.0, 0.0), 5.0, Point3::new(1.0, 1.0, 1.0), 0.5, true)]
    #[case::point_sized(Point3::new(0.0, 0.0, 0.0), 0.0, Point3::new(0.0, 1.0, 0.0), 0.0, false)]
    fn test_intersects(
        #[case] a_position: Point3,
        #[case] a_radius: f64,
        #[case] b_position: Point3,
        #[case] b_radius: f64,
        #[case] expected: bool,
    ) {
        let a = BoundingSphere::new(a_position, a_radius);
        let b = BoundingSphere::new(b_position, b_radius);
        assert_eq!(a.intersects(&b), expected);
        assert_eq!(b.intersects(&a), expected);
    }
}
