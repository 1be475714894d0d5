use crate::types::{Point, Value, Vector};

/// Evenly spaced points from `p1` towards `p2`, roughly `gap` apart.
///
/// ```text
/// count = floor(|p2 - p1| / gap) + 1
/// step  = |p2 - p1| / (count - 1)
///
/// p1 ●-----●-----●-----● p2      (count = 4)
///       step
/// ```
///
/// The first point is always `p1`. When `count >= 2` the last point lands on `p2` up to
/// rounding; a segment shorter than `gap` yields `p1` alone. A `gap` that is not positive
/// and finite yields nothing.
///
/// The iterator reports its exact length, so collecting it reserves every point up front.
/// Feed it through a capped [`Outline`](crate::outline::Outline) when `gap` may be tiny
/// relative to the segment.
pub fn line_points(p1: Point, p2: Point, gap: Value) -> impl ExactSizeIterator<Item = Point> {
    let length = nalgebra::distance(&p1, &p2);
    let count = point_count(length, gap);

    let step = if count > 1 {
        (p2 - p1).normalize() * (length / (count - 1) as Value)
    } else {
        Vector::zeros()
    };

    (0..count).map(move |i| p1 + step * i as Value)
}

/// Collects [`line_points`] into a vector.
///
/// # Panics
/// Panics with a capacity overflow when the point count does not fit in memory, e.g. a
/// `gap` of `1e-300` over a unit segment.
pub fn sample_line(p1: Point, p2: Point, gap: Value) -> Vec<Point> {
    line_points(p1, p2, gap).collect()
}

#[inline]
fn point_count(length: Value, gap: Value) -> usize {
    if !(gap.is_finite() && gap > 0.0) || !length.is_finite() {
        return 0;
    }
    // Float-to-int casts saturate, so a huge ratio cannot wrap.
    ((length / gap) as usize).saturating_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: Value = 1e-9;

    #[test]
    fn test_zero_length_line() {
        let p = Point::new(1.5, -2.0, 3.25);
        for gap in [0.1, 0.5, 1.0, 10.0] {
            assert_eq!(sample_line(p, p, gap), vec![p]);
        }
    }

    #[test]
    fn test_short_line_is_start_only() {
        let p1 = Point::new(0.0, 0.0, 0.0);
        let p2 = Point::new(0.4, 0.0, 0.0);
        assert_eq!(sample_line(p1, p2, 0.5), vec![p1]);
    }

    #[test]
    fn test_even_spacing_and_endpoints() {
        let p1 = Point::new(0.0, 0.0, 0.0);
        let p2 = Point::new(3.0, 4.0, 0.0);
        let points = sample_line(p1, p2, 1.2);

        // floor(5 / 1.2) + 1
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], p1);
        assert!(nalgebra::distance(points.last().unwrap(), &p2) < EPS);

        for pair in points.windows(2) {
            assert!((nalgebra::distance(&pair[0], &pair[1]) - 1.25).abs() < EPS);
        }
    }

    #[test]
    fn test_last_point_within_gap_of_end() {
        let p1 = Point::new(-1.0, 2.0, 0.5);
        let p2 = Point::new(7.3, -4.1, 2.9);
        for gap in [0.05, 0.3, 1.0, 2.7, 100.0] {
            let points = sample_line(p1, p2, gap);
            assert_eq!(points[0], p1);
            assert!(nalgebra::distance(points.last().unwrap(), &p2) < gap);
        }
    }

    #[test]
    fn test_tiny_gap_saturates_count() {
        let points = line_points(Point::origin(), Point::new(1.0, 0.0, 0.0), 1e-300);
        assert_eq!(points.len(), usize::MAX);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn test_tiny_gap_cannot_be_collected() {
        sample_line(Point::origin(), Point::new(1.0, 0.0, 0.0), 1e-300);
    }

    #[test]
    fn test_invalid_gap_is_empty() {
        let p1 = Point::origin();
        let p2 = Point::new(1.0, 0.0, 0.0);
        assert_eq!(line_points(p1, p2, 0.0).len(), 0);
        assert_eq!(line_points(p1, p2, -1.0).len(), 0);
        assert_eq!(line_points(p1, p2, Value::NAN).len(), 0);
    }
}
