use crate::{
    ellipse::ellipse_points,
    line::line_points,
    types::{Point, Value, Vector},
};

/// Point buffer an outline is accumulated into.
///
/// Points are stored in generation order. When a ceiling is set, points past it are
/// dropped and the outline is marked as [`clipped`](Outline::is_clipped); generators feeding
/// the buffer are lazy, so nothing past the ceiling is ever computed beyond one probe.
#[derive(Debug, Clone, Default)]
pub struct Outline {
    points: Vec<Point>,
    max_points: Option<usize>,
    clipped: bool,
}

impl Outline {
    /// Creates an empty outline, optionally capped at `max_points`.
    pub fn new(max_points: Option<usize>) -> Self {
        Self {
            points: Vec::new(),
            max_points,
            clipped: false,
        }
    }

    /// Appends points until the ceiling is reached.
    pub fn extend<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = Point>,
    {
        let mut points = points.into_iter();
        match self.max_points {
            None => self.points.extend(points),
            Some(max) => {
                let room = max.saturating_sub(self.points.len());
                self.points.extend(points.by_ref().take(room));
                if points.next().is_some() {
                    self.clipped = true;
                }
            }
        }
    }

    /// Appends the points of the segment `p1 → p2`.
    pub fn line(&mut self, p1: Point, p2: Point, gap: Value) {
        self.extend(line_points(p1, p2, gap));
    }

    /// Appends the points of an axis-aligned ellipse.
    pub fn ellipse(&mut self, center: Point, radius: Vector, gap: Value) {
        self.extend(ellipse_points(center, radius, gap));
    }

    /// `true` once any point was dropped because of the ceiling.
    pub fn is_clipped(&self) -> bool {
        self.clipped
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consumes the outline, returning the points.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded() {
        let mut outline = Outline::new(None);
        outline.line(Point::origin(), Point::new(10.0, 0.0, 0.0), 1.0);
        outline.line(Point::origin(), Point::new(0.0, 10.0, 0.0), 1.0);
        assert_eq!(outline.len(), 22);
        assert!(!outline.is_clipped());
    }

    #[test]
    fn test_ceiling_clips_in_order() {
        let mut outline = Outline::new(Some(15));
        outline.line(Point::origin(), Point::new(10.0, 0.0, 0.0), 1.0);
        assert!(!outline.is_clipped());
        outline.line(Point::origin(), Point::new(0.0, 10.0, 0.0), 1.0);

        assert_eq!(outline.len(), 15);
        assert!(outline.is_clipped());
        assert_eq!(outline.points()[11], Point::origin());
        assert_eq!(outline.points()[14], Point::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn test_ceiling_bounds_tiny_gap() {
        let mut outline = Outline::new(Some(10));
        outline.line(Point::origin(), Point::new(1.0, 0.0, 0.0), 1e-300);
        assert_eq!(outline.len(), 10);
        assert!(outline.is_clipped());
        assert_eq!(outline.points()[0], Point::origin());
    }

    #[test]
    fn test_exact_fit_is_not_clipped() {
        let mut outline = Outline::new(Some(11));
        outline.line(Point::origin(), Point::new(10.0, 0.0, 0.0), 1.0);
        assert_eq!(outline.len(), 11);
        assert!(!outline.is_clipped());

        outline.extend(std::iter::empty());
        assert!(!outline.is_clipped());
    }
}
