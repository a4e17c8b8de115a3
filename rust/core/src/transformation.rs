// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement data carried by occurrences and representation items.

use serde::{Deserialize, Serialize};

/// A cartesian transformation: origin, two axis directions, per-axis scale
/// and a mirror flag. The third axis is implied by `x_axis × y_axis`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartesianTransformation {
    pub origin: [f64; 3],
    pub x_axis: [f64; 3],
    pub y_axis: [f64; 3],
    #[serde(default = "unit_scale")]
    pub scale: [f64; 3],
    #[serde(default)]
    pub mirror: bool,
}

fn unit_scale() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

impl CartesianTransformation {
    /// Identity placement.
    pub fn identity() -> Self {
        Self {
            origin: [0.0, 0.0, 0.0],
            x_axis: [1.0, 0.0, 0.0],
            y_axis: [0.0, 1.0, 0.0],
            scale: unit_scale(),
            mirror: false,
        }
    }

    /// Pure translation.
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            origin: [x, y, z],
            ..Self::identity()
        }
    }

    pub fn with_axes(mut self, x_axis: [f64; 3], y_axis: [f64; 3]) -> Self {
        self.x_axis = x_axis;
        self.y_axis = y_axis;
        self
    }

    pub fn with_scale(mut self, sx: f64, sy: f64, sz: f64) -> Self {
        self.scale = [sx, sy, sz];
        self
    }

    pub fn mirrored(mut self) -> Self {
        self.mirror = true;
        self
    }
}

impl Default for CartesianTransformation {
    fn default() -> Self {
        Self::identity()
    }
}

/// Location of an occurrence or coordinate system of a representation item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Location {
    Cartesian(CartesianTransformation),
    /// Arbitrary 4x4 matrix, column-major. Not supported by the bridge.
    General { matrix: [f64; 16] },
}

impl Location {
    pub fn type_name(&self) -> &'static str {
        match self {
            Location::Cartesian(_) => "CartesianTransformation",
            Location::General { .. } => "GeneralTransformation",
        }
    }
}

impl From<CartesianTransformation> for Location {
    fn from(transformation: CartesianTransformation) -> Self {
        Location::Cartesian(transformation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_defaults_to_unit() {
        let json = r#"{"kind":"cartesian","origin":[1,2,3],"x_axis":[1,0,0],"y_axis":[0,1,0]}"#;
        let location: Location = serde_json::from_str(json).unwrap();
        match location {
            Location::Cartesian(t) => {
                assert_eq!(t.origin, [1.0, 2.0, 3.0]);
                assert_eq!(t.scale, [1.0, 1.0, 1.0]);
                assert!(!t.mirror);
            }
            other => panic!("unexpected location {other:?}"),
        }
    }

    #[test]
    fn general_location_type_name() {
        let location = Location::General {
            matrix: [0.0; 16],
        };
        assert_eq!(location.type_name(), "GeneralTransformation");
    }
}
