use crate::types::{Point, Value, Vector};

/// Offset that moves an integer grid coordinate to the center of its cell.
pub const CELL_CENTER: Value = 0.5;

/// Returns the 4 bottom corners (on the `min.y` plane) of the box spanned by `min` and `max`.
///
/// Corners go round the footprint in a fixed cyclic order:
/// ```text
///   3 ---- 2        Z
///   |      |        |
///   |      |        *-- X
///   0 ---- 1
///
///  0 = (min.x, min.z)    2 = (max.x, max.z)
///  1 = (max.x, min.z)    3 = (min.x, max.z)
/// ```
#[inline]
pub fn box_bottom_corners(min: Point, max: Point) -> [Point; 4] {
    [
        Point::new(min.x, min.y, min.z),
        Point::new(max.x, min.y, min.z),
        Point::new(max.x, min.y, max.z),
        Point::new(min.x, min.y, max.z),
    ]
}

/// Returns the bottom-center points of the 4 side faces of the box spanned by `min` and `max`.
///
/// Ordered `-Z`, `+Z`, `-X`, `+X`.
#[inline]
pub fn box_side_midpoints(min: Point, max: Point) -> [Point; 4] {
    let mid_x = (min.x + max.x) / 2.0;
    let mid_z = (min.z + max.z) / 2.0;
    [
        Point::new(mid_x, min.y, min.z),
        Point::new(mid_x, min.y, max.z),
        Point::new(min.x, min.y, mid_z),
        Point::new(max.x, min.y, mid_z),
    ]
}

/// Pairs every corner with the next one, wrapping the last back to the first.
///
/// A single corner pairs with itself; no corners yield no pairs.
pub fn cyclic_pairs(corners: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    corners
        .iter()
        .zip(corners.iter().cycle().skip(1))
        .map(|(a, b)| (*a, *b))
}

/// Heights of the contour rings strictly between `0` and `limit`:
/// `gap, 2·gap, 3·gap, ...` while below `limit`.
///
/// Yields nothing for a `gap` that is not positive and finite.
pub fn ring_offsets(gap: Value, limit: Value) -> impl Iterator<Item = Value> {
    let valid = gap.is_finite() && gap > 0.0;
    (1_u64..)
        .take(if valid { usize::MAX } else { 0 })
        .map(move |k| k as Value * gap)
        .take_while(move |offset| *offset < limit)
}

/// Moves `p` up by `dy`.
#[inline]
pub fn lifted(p: Point, dy: Value) -> Point {
    p + Vector::y() * dy
}

/// Moves `p` to the center of its grid cell.
#[inline]
pub fn cell_center(p: Point) -> Point {
    p + Vector::repeat(CELL_CENTER)
}
