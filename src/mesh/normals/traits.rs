//! Traits for normal computation.

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// Output of a [`NormalOps`] engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Normals {
    /// One normalized normal per face, in face order.
    pub face_normals: Vec<Vector3<Real>>,
    /// One normalized normal per vertex, in vertex order.
    pub vertex_normals: Vec<Vector3<Real>>,
}

/// Trait for engines computing face and vertex normals.
pub trait NormalOps {
    /// Compute face and vertex normals of the triangles `faces` over `vertices`.
    ///
    /// Every index in `faces` must be below `vertices.len()`.
    /// Zero-area faces and vertices with no (or cancelling) adjacent faces
    /// get the zero vector.
    fn compute(&self, vertices: &[Point3<Real>], faces: &[[usize; 3]]) -> Normals;
}
