//! Parallel implementation of normal computation.

use super::traits::{NormalOps, Normals};
use super::{face_normal, normalize_or_zero};
use crate::float_types::Real;
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

/// Parallel implementation of `NormalOps`.
///
/// Face normals are independent and computed in parallel. Vertex normals are
/// accumulated into per-thread buffers which are then summed, so the order
/// of floating-point additions differs from [`SerialNormalOps`](super::SerialNormalOps)
/// and results agree with it within rounding, not bit for bit.
pub struct ParallelNormalOps;

impl Default for ParallelNormalOps {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallelNormalOps {
    pub const fn new() -> Self {
        Self
    }
}

impl NormalOps for ParallelNormalOps {
    fn compute(&self, vertices: &[Point3<Real>], faces: &[[usize; 3]]) -> Normals {
        let num_vertices = vertices.len();

        let raw: Vec<Vector3<Real>> = faces
            .par_iter()
            .map(|&[i0, i1, i2]| face_normal(&vertices[i0], &vertices[i1], &vertices[i2]))
            .collect();

        let accumulated = faces
            .par_iter()
            .zip(raw.par_iter())
            .fold(
                || vec![Vector3::<Real>::zeros(); num_vertices],
                |mut acc, (&[i0, i1, i2], normal)| {
                    acc[i0] += normal;
                    acc[i1] += normal;
                    acc[i2] += normal;
                    acc
                },
            )
            .reduce(
                || vec![Vector3::zeros(); num_vertices],
                |mut a, b| {
                    for (sum, partial) in a.iter_mut().zip(b) {
                        *sum += partial;
                    }
                    a
                },
            );

        Normals {
            face_normals: raw.into_par_iter().map(normalize_or_zero).collect(),
            vertex_normals: accumulated.into_par_iter().map(normalize_or_zero).collect(),
        }
    }
}
