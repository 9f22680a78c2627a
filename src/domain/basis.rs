//! Basic building blocks.

use std::{
    f64::consts::PI,
    ops::{Add, Mul, Neg, Sub},
};

use nalgebra::Vector3;

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Point3 {
    x: f64,
    y: f64,
    z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn distance(&self, point: Self) -> f64 {
        ((self.x - point.x).powi(2) + (self.y - point.y).powi(2) + (self.z - point.z).powi(2))
            .sqrt()
    }

    /// Distance to the origin.
    pub fn length(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt()
    }
}

impl From<Point3> for (f32, f32, f32) {
    fn from(value: Point3) -> Self {
        (value.x as f32, value.y as f32, value.z as f32)
    }
}

impl From<Point3> for Vector3<f64> {
    fn from(value: Point3) -> Self {
        Vector3::new(value.x, value.y, value.z)
    }
}

impl From<Vector3<f64>> for Point3 {
    fn from(value: Vector3<f64>) -> Self {
        Point3::new(value.x, value.y, value.z)
    }
}

impl Add for Point3 {
    type Output = Point3;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle(f64);

impl Angle {
    pub const fn new(radians: f64) -> Self {
        Self(radians)
    }

    pub fn from_deg(degree: f64) -> Self {
        Self(degree * PI / 180.0)
    }

    pub fn to_deg(self) -> f64 {
        (self.0 * (180.0 / PI) + 360.0) % 360.0
    }
}

impl Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Angle(-self.0)
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl From<Angle> for f64 {
    fn from(value: Angle) -> Self {
        value.0
    }
}

impl From<Angle> for f32 {
    fn from(value: Angle) -> Self {
        value.0 as f32
    }
}

/// Angular coordinates on a shell centered at the origin. `theta` is the azimuth around the
/// y-axis, `phi` the inclination measured from the positive y-axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Spherical {
    theta: Angle,
    phi: Angle,
}

impl Spherical {
    pub const fn new(theta: Angle, phi: Angle) -> Self {
        Self { theta, phi }
    }

    /// Recovers the angular coordinates of a point relative to a shell of the given radius. The
    /// inclination input is clamped, so points slightly off the shell map onto it.
    pub fn from_cartesian(point: Point3, radius: f64) -> Self {
        Self {
            theta: Angle::new(point.x().atan2(point.z())),
            phi: Angle::new((point.y() / radius).clamp(-1.0, 1.0).acos()),
        }
    }

    pub fn to_cartesian(&self, radius: f64) -> Point3 {
        let theta: f64 = self.theta.into();
        let phi: f64 = self.phi.into();
        Point3::new(
            phi.sin() * radius * theta.sin(),
            phi.cos() * radius,
            phi.sin() * radius * theta.cos(),
        )
    }

    pub fn theta(&self) -> Angle {
        self.theta
    }

    pub fn phi(&self) -> Angle {
        self.phi
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::{assert_abs_diff_eq, AbsDiffEq};
    use rstest::rstest;

    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_point() {
        let point = Point3::new(1.0, 2.0, 3.0);
        assert_abs_diff_eq!(point.x(), 1.0);
        assert_abs_diff_eq!(point.y(), 2.0);
        assert_abs_diff_eq!(point.z(), 3.0);
    }

    #[rstest]
    #[case(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 3.0, 6.0), 7.0)]
    #[case(Point3::new(1.0, 1.0, 1.0), Point3::new(1.0, 1.0, 1.0), 0.0)]
    #[case(Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), 2.0)]
    fn test_point_distance(#[case] a: Point3, #[case] b: Point3, #[case] expected: f64) {
        assert_abs_diff_eq!(a.distance(b), expected);
        assert_abs_diff_eq!(b.distance(a), expected);
    }

    #[test]
    fn test_point_length() {
        assert_abs_diff_eq!(Point3::new(2.0, 3.0, 6.0).length(), 7.0);
    }

    #[rstest]
    #[case(Angle::new(0.0), 0.0)]
    #[case(Angle::new(0.5 * PI), 90.0)]
    #[case(Angle::new(1.0 * PI), 180.0)]
    #[case(Angle::new(1.5 * PI), 270.0)]
    #[case(Angle::new(2.0 * PI), 0.0)]
    fn test_angle_to_deg(#[case] angle: Angle, #[case] expected: f64) {
        assert_abs_diff_eq!(angle.to_deg(), expected);
    }

    #[rstest]
    #[case(0.0, Angle::new(0.0))]
    #[case(90.0, Angle::new(0.5 * PI))]
    #[case(-45.0, Angle::new(-0.25 * PI))]
    fn test_angle_from_deg(#[case] degree: f64, #[case] expected: Angle) {
        assert_abs_diff_eq!(Angle::from_deg(degree), expected);
    }

    #[test]
    fn test_angle_arithmetic() {
        assert_abs_diff_eq!(Angle::new(1.0) + Angle::new(0.5), Angle::new(1.5));
        assert_abs_diff_eq!(Angle::new(1.0) - Angle::new(0.5), Angle::new(0.5));
        assert_abs_diff_eq!(Angle::new(0.5) * 3.0, Angle::new(1.5));
        assert_abs_diff_eq!(-Angle::new(0.5), Angle::new(-0.5));
    }

    #[rstest]
    #[case::north_pole(Point3::new(0.0, 70.0, 0.0))]
    #[case::south_pole(Point3::new(0.0, -70.0, 0.0))]
    #[case::equator_front(Point3::new(0.0, 0.0, 70.0))]
    #[case::equator_side(Point3::new(70.0, 0.0, 0.0))]
    #[case::mid_latitude(Point3::new(35.0, 49.49747468305833, 35.0))]
    fn test_spherical_round_trip(#[case] point: Point3) {
        let spherical = Spherical::from_cartesian(point, 70.0);
        assert_abs_diff_eq!(spherical.to_cartesian(70.0), point, epsilon = 1e-9);
    }

    #[test]
    fn test_spherical_clamps_inclination() {
        // A point above the pole still maps to inclination zero instead of a NaN.
        let spherical = Spherical::from_cartesian(Point3::new(0.0, 77.0, 0.0), 70.0);
        assert_abs_diff_eq!(f64::from(spherical.phi()), 0.0);
    }

    impl AbsDiffEq for Point3 {
        type Epsilon = f64;

        fn default_epsilon() -> f64 {
            EPSILON
        }

        fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
            f64::abs_diff_eq(&self.x, &other.x, epsilon)
                && f64::abs_diff_eq(&self.y, &other.y, epsilon)
                && f64::abs_diff_eq(&self.z, &other.z, epsilon)
        }
    }

    impl AbsDiffEq for Angle {
        type Epsilon = f64;

        fn default_epsilon() -> f64 {
            EPSILON
        }

        fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
            f64::abs_diff_eq(&self.0, &other.0, epsilon)
        }
    }
}
