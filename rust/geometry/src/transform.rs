// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transform cascade: placement matrices from cartesian transformations
//!
//! Matrices map local coordinates to parent coordinates. A child placement is
//! applied as `parent * local`, so a chain of placements composes into one
//! matrix regardless of how it is grouped.

use crate::error::{Error, Result};
use cadbridge_core::{CartesianTransformation, Location};
use nalgebra::{Matrix4, Vector3};

/// Build the matrix of a cartesian transformation
///
/// Columns are `X * sx`, `Y * sy` and `Z * sz` with `Z = X × Y` (negated when
/// the transformation is mirrored), followed by the origin. Axes are used as
/// supplied, without normalization.
pub fn cartesian_matrix(transformation: &CartesianTransformation) -> Matrix4<f64> {
    let [sx, sy, sz] = transformation.scale;
    let x_axis = Vector3::from(transformation.x_axis);
    let y_axis = Vector3::from(transformation.y_axis);
    let mut z_axis = x_axis.cross(&y_axis);
    if transformation.mirror {
        z_axis = -z_axis;
    }

    let x_axis = x_axis * sx;
    let y_axis = y_axis * sy;
    let z_axis = z_axis * sz;
    let origin = transformation.origin;

    let mut transform = Matrix4::identity();
    transform[(0, 0)] = x_axis.x;
    transform[(1, 0)] = x_axis.y;
    transform[(2, 0)] = x_axis.z;
    transform[(0, 1)] = y_axis.x;
    transform[(1, 1)] = y_axis.y;
    transform[(2, 1)] = y_axis.z;
    transform[(0, 2)] = z_axis.x;
    transform[(1, 2)] = z_axis.y;
    transform[(2, 2)] = z_axis.z;
    transform[(0, 3)] = origin[0];
    transform[(1, 3)] = origin[1];
    transform[(2, 3)] = origin[2];
    transform
}

/// Local matrix of a location
///
/// General transformations are not supported.
pub fn location_matrix(location: &Location) -> Result<Matrix4<f64>> {
    match location {
        Location::Cartesian(transformation) => Ok(cartesian_matrix(transformation)),
        Location::General { .. } => Err(Error::UnsupportedTransformation(location.type_name())),
    }
}

/// Compose a node's location onto its parent's matrix
#[inline]
pub fn compose(parent: &Matrix4<f64>, location: &Location) -> Result<Matrix4<f64>> {
    Ok(parent * location_matrix(location)?)
}

/// The 16 matrix entries in column-major order (translation at 12..15)
pub fn matrix_to_array(matrix: &Matrix4<f64>) -> [f64; 16] {
    let mut out = [0.0; 16];
    out.copy_from_slice(matrix.as_slice());
    out
}
