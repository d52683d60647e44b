// Array files carry `f8` elements, so the scalar type stays f64.
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Length below which a rotation axis counts as undefined, and the slack
/// allowed when checking that a normal has unit length.
///
/// `1e-9` unless `MESH_NORMALS_TOLERANCE` was set when the crate was built
/// or [`set_tolerance`] ran first.
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

const DEFAULT_TOLERANCE: Real = 1e-9;

pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        option_env!("MESH_NORMALS_TOLERANCE")
            .and_then(|raw| Real::from_str(raw).ok())
            .map_or(DEFAULT_TOLERANCE, |value| value.max(Real::EPSILON))
    })
}

/// Fix the tolerance before its first use. Later calls have no effect.
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

pub const PI: Real = core::f64::consts::PI;

pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;
