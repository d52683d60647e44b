//! Serial implementation of normal computation.

use super::traits::{NormalOps, Normals};
use super::{face_normal, normalize_or_zero};
use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// Serial implementation of `NormalOps`.
///
/// Accumulates vertex normals in face order; this is the reference result
/// other engines are compared against.
pub struct SerialNormalOps;

impl Default for SerialNormalOps {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialNormalOps {
    pub const fn new() -> Self {
        Self
    }
}

impl NormalOps for SerialNormalOps {
    fn compute(&self, vertices: &[Point3<Real>], faces: &[[usize; 3]]) -> Normals {
        let mut vertex_normals = vec![Vector3::zeros(); vertices.len()];
        let mut face_normals = Vec::with_capacity(faces.len());

        for &[i0, i1, i2] in faces {
            let normal = face_normal(&vertices[i0], &vertices[i1], &vertices[i2]);

            // unnormalized, so each face weighs by its area
            vertex_normals[i0] += normal;
            vertex_normals[i1] += normal;
            vertex_normals[i2] += normal;

            face_normals.push(normalize_or_zero(normal));
        }

        for normal in &mut vertex_normals {
            *normal = normalize_or_zero(*normal);
        }

        Normals {
            face_normals,
            vertex_normals,
        }
    }
}
