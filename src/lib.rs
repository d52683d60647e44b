//! Face and vertex **normals** for triangle meshes in the face-vertex representation,
//! with NumPy `.npy` array file I/O to move vertices, faces and normals to and from disk.
//!
//! ```
//! use mesh_normals::mesh::TriangleMesh;
//! use nalgebra::{Point3, Vector3};
//!
//! let mut mesh = TriangleMesh::new(
//!     vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
//!     vec![[0, 1, 2]],
//! )?;
//! mesh.compute_normals();
//! assert_eq!(mesh.vertex_normals(), &[Vector3::z(); 3]);
//! # Ok::<(), mesh_normals::errors::MeshError>(())
//! ```
//!
//! # Features
//! #### Optional
//! - **parallel**: use rayon to compute normals on multiple threads

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod io;
pub mod mesh;

pub use errors::{MeshError, MeshResult};
pub use mesh::TriangleMesh;
