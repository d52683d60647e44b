//! Test support library
//! Provides various helper functions & utilities for tests.

#![allow(dead_code)]

use mesh_normals::{TriangleMesh, float_types::Real};
use nalgebra::{Point3, Vector3};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Whether `v` has unit length within `eps`.
pub fn is_unit(v: &Vector3<Real>, eps: Real) -> bool {
    approx_eq(v.norm(), 1.0, eps)
}

/// The triangle (0,0,0), (1,0,0), (0,1,0), scaled by `scale`, wound counter-clockwise about +Z.
pub fn single_face(scale: Real) -> TriangleMesh {
    TriangleMesh::new(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(scale, 0.0, 0.0),
            Point3::new(0.0, scale, 0.0),
        ],
        vec![[0, 1, 2]],
    )
    .unwrap()
}

/// Axis-aligned cube of side `size` centered at the origin, 12 outward-wound triangles.
pub fn cube(size: Real) -> TriangleMesh {
    let h = size / 2.0;
    let vertices = vec![
        Point3::new(-h, -h, -h),
        Point3::new(h, -h, -h),
        Point3::new(h, h, -h),
        Point3::new(-h, h, -h),
        Point3::new(-h, -h, h),
        Point3::new(h, -h, h),
        Point3::new(h, h, h),
        Point3::new(-h, h, h),
    ];
    let faces = vec![
        // bottom (-Z)
        [0, 2, 1],
        [0, 3, 2],
        // top (+Z)
        [4, 5, 6],
        [4, 6, 7],
        // front (-Y)
        [0, 1, 5],
        [0, 5, 4],
        // back (+Y)
        [3, 7, 6],
        [3, 6, 2],
        // left (-X)
        [0, 4, 7],
        [0, 7, 3],
        // right (+X)
        [1, 2, 6],
        [1, 6, 5],
    ];
    TriangleMesh::new(vertices, faces).unwrap()
}

/// UV sphere of radius `radius` centered at the origin, wound outward.
pub fn uv_sphere(radius: Real, segments: usize, stacks: usize) -> TriangleMesh {
    use mesh_normals::float_types::PI;

    let mut vertices = vec![Point3::new(0.0, 0.0, radius), Point3::new(0.0, 0.0, -radius)];
    for stack in 1..stacks {
        let phi = PI * stack as Real / stacks as Real;
        for segment in 0..segments {
            let theta = 2.0 * PI * segment as Real / segments as Real;
            vertices.push(Point3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
            ));
        }
    }

    let ring = |stack: usize, segment: usize| 2 + (stack - 1) * segments + segment % segments;
    let mut faces = Vec::new();
    for segment in 0..segments {
        faces.push([0, ring(1, segment), ring(1, segment + 1)]);
        faces.push([1, ring(stacks - 1, segment + 1), ring(stacks - 1, segment)]);
    }
    for stack in 1..stacks - 1 {
        for segment in 0..segments {
            let a = ring(stack, segment);
            let b = ring(stack, segment + 1);
            let c = ring(stack + 1, segment + 1);
            let d = ring(stack + 1, segment);
            faces.push([a, d, c]);
            faces.push([a, c, b]);
        }
    }

    TriangleMesh::new(vertices, faces).unwrap()
}
