use std::f64::consts::TAU;

use crate::types::{Point, Value, Vector};

/// Axis-aligned plane an ellipse is drawn in, named by its two in-plane axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Plane {
    Yz,
    Xz,
    Xy,
    /// Not exactly one zero radius: only the center is emitted.
    Degenerate,
}

impl Plane {
    fn of(radius: &Vector) -> Self {
        let zeros = radius.iter().filter(|r| **r == 0.0).count();
        if zeros != 1 {
            Plane::Degenerate
        } else if radius.x == 0.0 {
            Plane::Yz
        } else if radius.y == 0.0 {
            Plane::Xz
        } else {
            Plane::Xy
        }
    }
}

/// Points around an axis-aligned ellipse, roughly `gap` apart.
///
/// Exactly one component of `radius` must be zero; the ellipse lies in the plane
/// orthogonal to that axis. The angular step is derived from the largest radius:
///
/// ```text
/// delta = gap / (2π · max(|rx|, |ry|, |rz|))      (fraction of a turn)
/// θ     = 0, delta, 2·delta, ...  while θ < 1
/// ```
///
/// so highly eccentric ellipses are sampled more sparsely along their minor axis. The
/// turn is open: the start point is not repeated at the end.
///
/// A point ellipse (all radii zero) or a radius with more or less than one zero component
/// yields the center alone. A `gap` that is not positive and finite yields nothing.
pub fn ellipse_points(center: Point, radius: Vector, gap: Value) -> impl Iterator<Item = Point> {
    let valid_gap = gap.is_finite() && gap > 0.0;
    let largest_radius = radius.abs().max();
    let plane = Plane::of(&radius);

    let delta = if plane == Plane::Degenerate || !(largest_radius > 0.0) {
        // a single step covers the whole turn
        1.0
    } else {
        gap / (TAU * largest_radius)
    };

    (0_u64..)
        .take(if valid_gap && delta > 0.0 { usize::MAX } else { 0 })
        .map(move |i| i as Value * delta)
        .take_while(|theta| *theta < 1.0)
        .map(move |theta| point_at(center, &radius, plane, theta * TAU))
}

/// Collects [`ellipse_points`] into a vector.
pub fn sample_ellipse(center: Point, radius: Vector, gap: Value) -> Vec<Point> {
    ellipse_points(center, radius, gap).collect()
}

#[inline]
fn point_at(center: Point, radius: &Vector, plane: Plane, angle: Value) -> Point {
    let (sin, cos) = angle.sin_cos();
    match plane {
        Plane::Yz => Point::new(
            center.x,
            center.y + cos * radius.y,
            center.z + sin * radius.z,
        ),
        Plane::Xz => Point::new(
            center.x + cos * radius.x,
            center.y,
            center.z + sin * radius.z,
        ),
        Plane::Xy => Point::new(
            center.x + cos * radius.x,
            center.y + sin * radius.y,
            center.z,
        ),
        Plane::Degenerate => center,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: Value = 1e-9;

    #[test]
    fn test_unit_circle_point_count() {
        // delta = 0.5 / 2π ≈ 0.0796, ceil(1 / delta) = 13
        let points = sample_ellipse(Point::origin(), Vector::new(0.0, 1.0, 1.0), 0.5);
        assert_eq!(points.len(), 13);
        assert!((points[0] - Point::new(0.0, 1.0, 0.0)).norm() < EPS);
    }

    #[test]
    fn test_circle_points_on_radius() {
        let center = Point::new(4.0, -2.0, 7.5);
        let r = 3.5;
        let points = sample_ellipse(center, Vector::new(0.0, r, r), 0.2);
        assert!(points.len() > 100);
        for p in &points {
            assert!((p.x - center.x).abs() < EPS);
            assert!((nalgebra::distance(p, &center) - r).abs() < EPS);
        }
    }

    #[test]
    fn test_ellipse_stays_in_plane() {
        let center = Point::new(1.0, 2.0, 3.0);

        let xz = sample_ellipse(center, Vector::new(4.0, 0.0, 2.0), 0.5);
        assert!(xz.iter().all(|p| p.y == center.y));
        assert!((xz[0] - Point::new(5.0, 2.0, 3.0)).norm() < EPS);

        let xy = sample_ellipse(center, Vector::new(4.0, 2.0, 0.0), 0.5);
        assert!(xy.iter().all(|p| p.z == center.z));

        // every point satisfies (dx/rx)² + (dz/rz)² = 1
        for p in &xz {
            let dx = (p.x - center.x) / 4.0;
            let dz = (p.z - center.z) / 2.0;
            assert!((dx * dx + dz * dz - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_start_point_not_repeated() {
        let points = sample_ellipse(Point::origin(), Vector::new(1.0, 0.0, 1.0), 0.5);
        let first = points[0];
        assert!(points[1..].iter().all(|p| (p - first).norm() > 1e-6));
    }

    #[test]
    fn test_degenerate_radii() {
        let center = Point::new(1.0, 1.0, 1.0);
        assert_eq!(sample_ellipse(center, Vector::zeros(), 0.5), vec![center]);
        assert_eq!(
            sample_ellipse(center, Vector::new(0.0, 0.0, 2.0), 0.5),
            vec![center]
        );
        assert_eq!(
            sample_ellipse(center, Vector::new(1.0, 2.0, 3.0), 0.5),
            vec![center]
        );
    }

    #[test]
    fn test_invalid_gap_is_empty() {
        let radius = Vector::new(1.0, 0.0, 1.0);
        assert_eq!(ellipse_points(Point::origin(), radius, 0.0).count(), 0);
        assert_eq!(ellipse_points(Point::origin(), radius, -0.5).count(), 0);
    }
}
