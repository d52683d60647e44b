//! Object orientation relative to the +Z reference axis.
//!
//! A mesh is modelled in a reference frame whose "up" is +Z. Its
//! orientation is the unit vector that +Z is carried onto in world space.
//! The rotation taking reference coordinates to world coordinates is
//!
//! ```text
//! angle = acos(orientation · ẑ)
//! axis  = normalize(ẑ × orientation)
//! ```
//!
//! Positive `axis` means the rotation maps ẑ onto `orientation` (reference
//! to world). The degenerate axes are resolved in
//! [`TriangleMesh::world_rotation`]: parallel is the identity, anti-parallel
//! is a half turn about +X.

use super::TriangleMesh;
use crate::errors::{MeshError, MeshResult};
use crate::float_types::{PI, Real, tolerance};
use nalgebra::{Point3, Rotation3, Unit, Vector3};
use std::borrow::Cow;
use tracing::debug;

impl TriangleMesh {
    /// The fixed axis orientations are measured against.
    pub fn default_orientation() -> Unit<Vector3<Real>> {
        Vector3::z_axis()
    }

    /// Current orientation (unit length).
    pub const fn orientation(&self) -> &Unit<Vector3<Real>> {
        &self.orientation
    }

    /// Whether the orientation is exactly the reference axis.
    pub fn has_default_orientation(&self) -> bool {
        *self.orientation == *Self::default_orientation()
    }

    /// Set the orientation; `orientation` need not be unit length.
    ///
    /// Normals are **not** recomputed; call
    /// [`compute_normals`](Self::compute_normals) afterwards.
    ///
    /// # Errors
    ///
    /// Fails with [`MeshError::DegenerateVector`] if `orientation` is the
    /// zero vector or is not finite. Any other length is accepted.
    pub fn set_orientation(&mut self, orientation: Vector3<Real>) -> MeshResult<()> {
        if !orientation.iter().all(|c| c.is_finite()) {
            return Err(MeshError::DegenerateVector("orientation"));
        }
        let largest = orientation.amax();
        if largest == 0.0 {
            return Err(MeshError::DegenerateVector("orientation"));
        }
        // scale to a largest component of 1 so the norm cannot under- or overflow
        self.orientation = Unit::new_normalize(orientation / largest);
        debug!(
            x = self.orientation.x,
            y = self.orientation.y,
            z = self.orientation.z,
            "orientation set"
        );
        Ok(())
    }

    /// Angle in radians, within `[0, π]`, between the orientation and +Z.
    pub fn object_angle(&self) -> Real {
        self.orientation
            .dot(&Self::default_orientation().into_inner())
            .clamp(-1.0, 1.0)
            .acos()
    }

    /// Unit axis `normalize(ẑ × orientation)` about which the mesh is rotated.
    ///
    /// # Errors
    ///
    /// Fails with [`MeshError::DegenerateVector`] when the orientation is
    /// parallel or anti-parallel to +Z, where the cross product vanishes.
    pub fn rotation_axis(&self) -> MeshResult<Unit<Vector3<Real>>> {
        let axis = Self::default_orientation().cross(&*self.orientation);
        Unit::try_new(axis, tolerance()).ok_or(MeshError::DegenerateVector("rotation axis"))
    }

    /// Rotation taking reference coordinates to world coordinates.
    ///
    /// Rotates by [`object_angle`](Self::object_angle) about
    /// [`rotation_axis`](Self::rotation_axis). When the axis is undefined the
    /// result is the identity (orientation along +Z) or a half turn about +X
    /// (orientation along -Z).
    pub fn world_rotation(&self) -> Rotation3<Real> {
        match self.rotation_axis() {
            Ok(axis) => Rotation3::from_axis_angle(&axis, self.object_angle()),
            Err(_) if self.orientation.z > 0.0 => Rotation3::identity(),
            Err(_) => Rotation3::from_axis_angle(&Vector3::x_axis(), PI),
        }
    }

    /// Map a point from the reference frame into the frame of the current
    /// orientation.
    pub fn match_object_orientation(&self, point: &Point3<Real>) -> Point3<Real> {
        self.world_rotation() * point
    }

    /// Vertex positions in world space.
    ///
    /// Under the default orientation the stored vertices are returned as-is,
    /// without going through an identity rotation.
    pub fn vertices_into_world(&self) -> Cow<'_, [Point3<Real>]> {
        if self.has_default_orientation() {
            return Cow::Borrowed(&self.vertices);
        }

        let rotation = self.world_rotation();
        Cow::Owned(self.vertices.iter().map(|p| rotation * p).collect())
    }
}
