//! Face and vertex normal computation.

pub mod serial;
pub mod traits;

#[cfg(feature = "parallel")]
pub mod parallel;

// Re-export core types
pub use traits::{NormalOps, Normals};

pub use serial::SerialNormalOps;

#[cfg(feature = "parallel")]
pub use parallel::ParallelNormalOps;

/// Engine used by [`TriangleMesh::compute_normals`](crate::mesh::TriangleMesh::compute_normals).
#[cfg(not(feature = "parallel"))]
pub type DefaultNormalOps = SerialNormalOps;

/// Engine used by [`TriangleMesh::compute_normals`](crate::mesh::TriangleMesh::compute_normals).
#[cfg(feature = "parallel")]
pub type DefaultNormalOps = ParallelNormalOps;

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// Unnormalized normal of the triangle `(v0, v1, v2)`.
///
/// ```text
/// n = (v1 - v0) × (v2 - v1)
/// ```
///
/// Its length is twice the triangle's area, and it points outward for
/// counter-clockwise winding.
#[inline]
pub fn face_normal(v0: &Point3<Real>, v1: &Point3<Real>, v2: &Point3<Real>) -> Vector3<Real> {
    (v1 - v0).cross(&(v2 - v1))
}

/// Normalize `v`, or return the zero vector if `v` has zero length.
#[inline]
pub fn normalize_or_zero(v: Vector3<Real>) -> Vector3<Real> {
    v.try_normalize(0.0).unwrap_or_else(Vector3::zeros)
}
