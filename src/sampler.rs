#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, warn};

use crate::{
    config::DensityConfig,
    ellipse::ellipse_points,
    error::Result,
    outline::Outline,
    region::{Region, Shape, Triangle},
    types::{Point, Value, Vector},
    utils::{
        CELL_CENTER, box_bottom_corners, box_side_midpoints, cell_center, cyclic_pairs, lifted,
        ring_offsets,
    },
};

/// Maps a region's world tag to the world it denotes in the caller's registry.
///
/// Any `Fn(&W) -> Option<R>` closure is a resolver:
///
/// ```rust,ignore
/// let worlds: HashMap<String, WorldHandle> = load_worlds();
/// let points = sampler.sample_resolved(&region, &|name: &String| worlds.get(name).cloned());
/// ```
pub trait WorldResolver<W> {
    type World;

    /// Returns `None` when `world` is not known.
    fn resolve(&self, world: &W) -> Option<Self::World>;
}

impl<W, R, F> WorldResolver<W> for F
where
    F: Fn(&W) -> Option<R>,
{
    type World = R;

    fn resolve(&self, world: &W) -> Option<R> {
        self(world)
    }
}

/// Sampled outline of one region: points in generation order, each tagged with the
/// region's world.
///
/// Points shared by adjacent edges appear once per edge.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSequence<W> {
    points: Vec<(Point, W)>,
    clipped: bool,
}

impl<W> Default for PointSequence<W> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<W> PointSequence<W> {
    pub fn empty() -> Self {
        Self {
            points: Vec::new(),
            clipped: false,
        }
    }

    fn tagged(outline: Outline, world: W) -> Self
    where
        W: Clone,
    {
        let clipped = outline.is_clipped();
        let points = outline
            .into_points()
            .into_iter()
            .map(|p| (p, world.clone()))
            .collect();
        Self { points, clipped }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `true` if the point ceiling cut the outline short.
    pub fn is_clipped(&self) -> bool {
        self.clipped
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (Point, W)> {
        self.points.iter()
    }

    /// Iterates over the positions, ignoring the world tags.
    pub fn positions(&self) -> impl Iterator<Item = &Point> {
        self.points.iter().map(|(p, _)| p)
    }

    pub fn into_vec(self) -> Vec<(Point, W)> {
        self.points
    }
}

impl<W> IntoIterator for PointSequence<W> {
    type Item = (Point, W);
    type IntoIter = std::vec::IntoIter<(Point, W)>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

/// Turns regions into wireframe point sets.
///
/// Holds a validated [`DensityConfig`] and no other state, so one sampler can be shared
/// freely between threads:
///
/// ```rust,ignore
/// let sampler = OutlineSampler::new(DensityConfig::default())?;
/// let region = Region::cuboid(Point::new(0., 0., 0.), Point::new(4., 3., 4.)).with_world("world");
///
/// for (point, world) in sampler.sample(&region) {
///     spawn_particle(world, point);
/// }
/// ```
///
/// ```text
/// Region ──▶ skeleton (corners / centers / radii)
///               ├─▶ line_points     ─┐
///               └─▶ ellipse_points  ─┴─▶ Outline ──▶ PointSequence (tagged with world)
/// ```
#[derive(Debug, Clone)]
pub struct OutlineSampler {
    config: DensityConfig,
}

impl OutlineSampler {
    /// Creates a sampler, rejecting configurations that fail [`DensityConfig::validate`].
    pub fn new(config: DensityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DensityConfig {
        &self.config
    }

    /// Samples `region`, tagging every point with its world.
    ///
    /// A region without a world yields an empty sequence.
    pub fn sample<W: Clone>(&self, region: &Region<W>) -> PointSequence<W> {
        let Some(world) = region.world.as_ref() else {
            debug!(kind = region.shape.kind_name(), "region has no world, skipping");
            return PointSequence::empty();
        };
        PointSequence::tagged(self.outline(&region.shape), world.clone())
    }

    /// Samples `region`, tagging every point with the world `resolver` maps its tag to.
    ///
    /// A region whose world is missing or cannot be resolved yields an empty sequence.
    pub fn sample_resolved<W, R>(&self, region: &Region<W>, resolver: &R) -> PointSequence<R::World>
    where
        R: WorldResolver<W> + ?Sized,
        R::World: Clone,
    {
        let Some(world) = region.world.as_ref().and_then(|w| resolver.resolve(w)) else {
            debug!(kind = region.shape.kind_name(), "region world did not resolve, skipping");
            return PointSequence::empty();
        };
        PointSequence::tagged(self.outline(&region.shape), world)
    }

    /// Samples every region, preserving order.
    ///
    /// Regions are processed in parallel with Rayon when the `parallel` feature is enabled.
    pub fn sample_many<W>(&self, regions: &[Region<W>]) -> Vec<PointSequence<W>>
    where
        W: Clone + Send + Sync,
    {
        #[cfg(feature = "parallel")]
        let sequences = regions.par_iter().map(|r| self.sample(r)).collect();
        #[cfg(not(feature = "parallel"))]
        let sequences = regions.iter().map(|r| self.sample(r)).collect();
        sequences
    }

    /// Computes the untagged outline of `shape`.
    pub fn outline(&self, shape: &Shape) -> Outline {
        let config = &self.config;
        let mut outline = Outline::new(config.max_points);

        match shape {
            Shape::Cuboid { min, max } => {
                let corners = box_bottom_corners(*min, *max);
                let height = max.y - min.y;
                self.prism(&mut outline, &corners, height, config.cuboid_lines_enabled);
            }
            Shape::PolygonalPrism {
                base_points,
                min_y,
                height,
            } => {
                let corners: Vec<Point> = base_points
                    .iter()
                    .map(|[x, z]| Point::new(x + CELL_CENTER, *min_y, z + CELL_CENTER))
                    .collect();
                self.prism(&mut outline, &corners, *height, config.polygon_lines_enabled);
            }
            Shape::Cylinder {
                center,
                radius_x,
                radius_z,
                min_y,
                height,
            } => self.cylinder(&mut outline, *center, *radius_x, *radius_z, *min_y, *height),
            Shape::Ellipsoid { center, radius } => self.ellipsoid(&mut outline, *center, *radius),
            Shape::ConvexPolyhedron { triangles } => {
                self.convex_polyhedron(&mut outline, triangles)
            }
            Shape::Unsupported => {
                debug!("unsupported region shape, producing no points");
            }
        }

        debug!(
            kind = shape.kind_name(),
            points = outline.len(),
            clipped = outline.is_clipped(),
            "sampled region outline"
        );
        outline
    }

    /// Outlines a vertical prism over `corners`: bottom, top and vertical edges for each
    /// corner pair, plus one contour edge per ring height when `rings` is set.
    fn prism(&self, outline: &mut Outline, corners: &[Point], height: Value, rings: bool) {
        let gap = self.config.gap_between_points;

        for (p1, p2) in cyclic_pairs(corners) {
            let p3 = lifted(p1, height);
            let p4 = lifted(p2, height);

            outline.line(p1, p2, gap);
            outline.line(p3, p4, gap);
            outline.line(p1, p3, gap);

            if !rings {
                continue;
            }

            for offset in ring_offsets(self.config.vertical_gap, height) {
                if outline.is_clipped() {
                    return;
                }
                outline.line(lifted(p1, offset), lifted(p2, offset), gap);
            }
        }
    }

    /// Bottom and top rings, four axis edges on the side midpoints, and optional contour
    /// rings repeating the bottom ring at every ring height.
    ///
    /// The rings are centered on the cell center of `center`; the axis edges run from
    /// `min_y` up by `height`.
    fn cylinder(
        &self,
        outline: &mut Outline,
        center: Point,
        radius_x: Value,
        radius_z: Value,
        min_y: Value,
        height: Value,
    ) {
        let gap = self.config.gap_between_points;

        // footprint spans 2r + 1 whole cells on each axis
        let width = 2.0 * radius_x + 1.0;
        let length = 2.0 * radius_z + 1.0;
        let ring_center = cell_center(center);
        let radius = Vector::new(width / 2.0, 0.0, length / 2.0);

        let cap = self.config.max_points.map_or(usize::MAX, |m| m.saturating_add(1));
        let bottom: Vec<Point> = ellipse_points(ring_center, radius, gap).take(cap).collect();

        outline.extend(bottom.iter().copied());
        outline.extend(bottom.iter().map(|p| lifted(*p, height)));

        let min = Point::new(center.x - radius_x, min_y, center.z - radius_z);
        let max = Point::new(
            center.x + radius_x + 1.0,
            min_y + height,
            center.z + radius_z + 1.0,
        );
        for p in box_side_midpoints(min, max) {
            outline.line(p, lifted(p, height), gap);
        }

        if !self.config.cylinder_lines_enabled {
            return;
        }
        for offset in ring_offsets(self.config.vertical_gap, height) {
            if outline.is_clipped() {
                return;
            }
            outline.extend(bottom.iter().map(|p| lifted(*p, offset)));
        }
    }

    /// Three orthogonal great ellipses, plus latitude rings above and below the equator.
    fn ellipsoid(&self, outline: &mut Outline, center: Point, radius: Vector) {
        let gap = self.config.gap_between_points;
        let center = cell_center(center);
        let radius = radius.add_scalar(CELL_CENTER);

        outline.ellipse(center, Vector::new(0.0, radius.y, radius.z), gap);
        outline.ellipse(center, Vector::new(radius.x, 0.0, radius.z), gap);
        outline.ellipse(center, Vector::new(radius.x, radius.y, 0.0), gap);

        if !self.config.ellipsoid_lines_enabled {
            return;
        }
        for offset in ring_offsets(self.config.vertical_gap, radius.y) {
            if outline.is_clipped() {
                return;
            }
            // cross-section of an ellipsoid at height `offset` from its center
            let ratio = (offset / radius.y).asin().cos();
            let ring_radius = Vector::new(radius.x * ratio, 0.0, radius.z * ratio);
            outline.ellipse(lifted(center, -offset), ring_radius, gap);
            outline.ellipse(lifted(center, offset), ring_radius, gap);
        }
    }

    /// Joins all triangle vertices, in order, into one closed polyline.
    ///
    /// This does not trace the hull's true edges; it is a cheap approximation of them.
    fn convex_polyhedron(&self, outline: &mut Outline, triangles: &[Triangle]) {
        let gap = self.config.gap_between_points;
        let corners: Vec<Point> = triangles
            .iter()
            .flat_map(|t| t.vertices)
            .map(cell_center)
            .collect();

        for (p1, p2) in cyclic_pairs(&corners) {
            if outline.is_clipped() {
                return;
            }
            outline.line(p1, p2, gap);
        }
    }
}

/// Samples `region` with `config` in one call.
///
/// An invalid `config` yields an empty sequence (and a warning) instead of an error; use
/// [`OutlineSampler::new`] to reject it up front.
pub fn sample<W: Clone>(region: &Region<W>, config: &DensityConfig) -> PointSequence<W> {
    match OutlineSampler::new(config.clone()) {
        Ok(sampler) => sampler.sample(region),
        Err(err) => {
            warn!(%err, "invalid density configuration, producing no points");
            PointSequence::empty()
        }
    }
}
