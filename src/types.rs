use nalgebra::{Point3, Vector3};

/// Coordinate value used throughout the sampler.
pub type Value = f64;

/// A 3D point with [`Value`] components.
pub type Point = Point3<Value>;

/// A 3D vector with [`Value`] components.
pub type Vector = Vector3<Value>;
