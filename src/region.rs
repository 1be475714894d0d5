use serde::{Deserialize, Serialize};

use crate::types::{Point, Value, Vector};

/// A triangular face of a convex polyhedron, stored as its three vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Triangle {
    pub vertices: [Point; 3],
}

impl Triangle {
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Returns vertex `i`, or `None` if `i` is not in `0..3`.
    pub fn vertex(&self, i: usize) -> Option<Point> {
        self.vertices.get(i).copied()
    }
}

/// Geometry of a volume to outline.
///
/// Coordinates are in block-grid units. Shapes are tagged by `kind` when loaded from
/// JSON; any kind the sampler does not know deserializes to [`Shape::Unsupported`]:
///
/// ```json
/// { "kind": "cuboid", "min": [0, 0, 0], "max": [2, 2, 2] }
/// { "kind": "cylinder", "center": [5, 64, 5], "radiusX": 3, "radiusZ": 2, "minY": 64, "height": 4 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Shape {
    /// Axis-aligned box. `max` is expected to already include the `+1` cell padding,
    /// so the outline encloses the whole cells between the two corners.
    Cuboid { min: Point, max: Point },

    /// Vertical prism over an `(x, z)` polygon, `height` cells tall starting at `min_y`.
    #[serde(rename = "polygon")]
    PolygonalPrism {
        base_points: Vec<[Value; 2]>,
        min_y: Value,
        height: Value,
    },

    /// Vertical elliptic cylinder, `height` cells tall starting at `min_y`.
    Cylinder {
        center: Point,
        radius_x: Value,
        radius_z: Value,
        min_y: Value,
        height: Value,
    },

    /// Axis-aligned ellipsoid.
    Ellipsoid { center: Point, radius: Vector },

    /// Convex polyhedron given by its triangulated hull.
    ConvexPolyhedron { triangles: Vec<Triangle> },

    /// A shape kind this crate cannot outline. Samples to nothing.
    #[serde(other)]
    Unsupported,
}

impl Shape {
    /// Short name of the shape kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Cuboid { .. } => "cuboid",
            Shape::PolygonalPrism { .. } => "polygon",
            Shape::Cylinder { .. } => "cylinder",
            Shape::Ellipsoid { .. } => "ellipsoid",
            Shape::ConvexPolyhedron { .. } => "convexPolyhedron",
            Shape::Unsupported => "unsupported",
        }
    }
}

/// A [`Shape`] tagged with the world it lives in.
///
/// `W` is opaque to the sampler: it is only cloned onto output points. A region without
/// a world produces no points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region<W> {
    pub shape: Shape,
    pub world: Option<W>,
}

impl<W> Region<W> {
    /// Creates a region with no world attached. Use [`with_world`](Region::with_world) to tag it.
    pub fn new(shape: Shape) -> Self {
        Self { shape, world: None }
    }

    pub fn cuboid(min: Point, max: Point) -> Self {
        Self::new(Shape::Cuboid { min, max })
    }

    pub fn polygon(base_points: Vec<[Value; 2]>, min_y: Value, height: Value) -> Self {
        Self::new(Shape::PolygonalPrism {
            base_points,
            min_y,
            height,
        })
    }

    pub fn cylinder(
        center: Point,
        radius_x: Value,
        radius_z: Value,
        min_y: Value,
        height: Value,
    ) -> Self {
        Self::new(Shape::Cylinder {
            center,
            radius_x,
            radius_z,
            min_y,
            height,
        })
    }

    pub fn ellipsoid(center: Point, radius: Vector) -> Self {
        Self::new(Shape::Ellipsoid { center, radius })
    }

    pub fn convex_polyhedron(triangles: Vec<Triangle>) -> Self {
        Self::new(Shape::ConvexPolyhedron { triangles })
    }

    /// Tags the region with `world`.
    pub fn with_world(mut self, world: W) -> Self {
        self.world = Some(world);
        self
    }
}
