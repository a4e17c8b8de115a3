// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for engine operations.

use crate::keys::EngineKey;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during engine operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A referenced engine object does not exist (or was destroyed).
    #[error("{0} not found")]
    NotFound(EngineKey),

    /// The mesh has no triangles.
    #[error("mesh has no triangles")]
    EmptyMesh,

    /// An index array length is not a multiple of three.
    #[error("{name} length {len} is not a multiple of 3")]
    IndexCount { name: &'static str, len: usize },

    /// A vertex index points past the coordinate array.
    #[error("vertex index {index} out of range ({count} points)")]
    VertexIndexOutOfRange { index: u32, count: usize },

    /// A normal index points past the normal array.
    #[error("normal index {index} out of range ({count} normals)")]
    NormalIndexOutOfRange { index: u32, count: usize },

    /// The per-triangle app data does not match the triangle count.
    #[error("app data has {len} entries for {triangles} triangles")]
    AppDataLength { len: usize, triangles: usize },
}
