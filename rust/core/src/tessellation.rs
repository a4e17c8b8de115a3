// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pre-tessellated mesh data carried by Brep / PolyBrep representation items.
//!
//! A record holds one shared, interleaved index buffer for all of its faces.
//! Each face declares which triangle encodings it uses through a 16-bit flag
//! set and, for every declared encoding, a run of size words (triangle count,
//! or fan/strip count followed by one point count per fan/strip). Indices in
//! the buffer are offsets into the flat `coordinates` / `normals` arrays, so
//! they are multiples of three.

use serde::{Deserialize, Serialize};

/// Flag set describing the triangle encodings present in a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TessFaceFlags(pub u16);

impl TessFaceFlags {
    pub const POLYFACE: Self = Self(0x0001);
    pub const TRIANGLE: Self = Self(0x0002);
    pub const TRIANGLE_FAN: Self = Self(0x0004);
    pub const TRIANGLE_STRIPE: Self = Self(0x0008);
    pub const POLYFACE_ONE_NORMAL: Self = Self(0x0010);
    pub const TRIANGLE_ONE_NORMAL: Self = Self(0x0020);
    pub const TRIANGLE_FAN_ONE_NORMAL: Self = Self(0x0040);
    pub const TRIANGLE_STRIPE_ONE_NORMAL: Self = Self(0x0080);
    pub const POLYFACE_TEXTURED: Self = Self(0x0100);
    pub const TRIANGLE_TEXTURED: Self = Self(0x0200);
    pub const TRIANGLE_FAN_TEXTURED: Self = Self(0x0400);
    pub const TRIANGLE_STRIPE_TEXTURED: Self = Self(0x0800);
    pub const POLYFACE_ONE_NORMAL_TEXTURED: Self = Self(0x1000);
    pub const TRIANGLE_ONE_NORMAL_TEXTURED: Self = Self(0x2000);
    pub const TRIANGLE_FAN_ONE_NORMAL_TEXTURED: Self = Self(0x4000);
    pub const TRIANGLE_STRIPE_ONE_NORMAL_TEXTURED: Self = Self(0x8000);

    /// Marks a fan/strip point count whose points share a single normal.
    pub const NORMAL_SINGLE: u32 = 0x8000_0000;
    /// Mask extracting the point count from a one-normal fan/strip size word.
    pub const NORMAL_MASK: u32 = 0x7FFF_FFFF;

    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[inline]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Name of a single-bit flag, for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::POLYFACE => "Polyface",
            Self::TRIANGLE => "Triangle",
            Self::TRIANGLE_FAN => "TriangleFan",
            Self::TRIANGLE_STRIPE => "TriangleStripe",
            Self::POLYFACE_ONE_NORMAL => "PolyfaceOneNormal",
            Self::TRIANGLE_ONE_NORMAL => "TriangleOneNormal",
            Self::TRIANGLE_FAN_ONE_NORMAL => "TriangleFanOneNormal",
            Self::TRIANGLE_STRIPE_ONE_NORMAL => "TriangleStripeOneNormal",
            Self::POLYFACE_TEXTURED => "PolyfaceTextured",
            Self::TRIANGLE_TEXTURED => "TriangleTextured",
            Self::TRIANGLE_FAN_TEXTURED => "TriangleFanTextured",
            Self::TRIANGLE_STRIPE_TEXTURED => "TriangleStripeTextured",
            Self::POLYFACE_ONE_NORMAL_TEXTURED => "PolyfaceOneNormalTextured",
            Self::TRIANGLE_ONE_NORMAL_TEXTURED => "TriangleOneNormalTextured",
            Self::TRIANGLE_FAN_ONE_NORMAL_TEXTURED => "TriangleFanOneNormalTextured",
            Self::TRIANGLE_STRIPE_ONE_NORMAL_TEXTURED => "TriangleStripeOneNormalTextured",
            _ => "Combined",
        }
    }
}

impl std::ops::BitOr for TessFaceFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl std::fmt::Display for TessFaceFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// Per-face entry of a tessellation record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TessFace {
    /// Encodings present in this face.
    pub used_entities: TessFaceFlags,
    /// Offset of this face's first word in the shared index buffer.
    #[serde(default)]
    pub start_triangulated: u32,
    /// Size words, one run per present encoding, in flag order.
    #[serde(default)]
    pub sizes_triangulated: Vec<u32>,
    /// Texture coordinate words per corner (only meaningful for textured data).
    #[serde(default)]
    pub texture_coord_indexes_size: u32,
}

/// A complete tessellation: coordinates, normals, shared index buffer, faces.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TessellationRecord {
    /// Flat `x, y, z` vertex coordinates.
    pub coordinates: Vec<f64>,
    /// Flat `x, y, z` normal vectors.
    #[serde(default)]
    pub normals: Vec<f64>,
    /// Interleaved normal / vertex offsets for every face of the record.
    pub triangulated_indexes: Vec<u32>,
    pub faces: Vec<TessFace>,
}

impl TessellationRecord {
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.coordinates.len() / 3
    }

    #[inline]
    pub fn normal_count(&self) -> usize {
        self.normals.len() / 3
    }
}
