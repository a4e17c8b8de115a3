// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use cadbridge_core::{EntityType, TessFaceFlags};
use thiserror::Error;

use crate::logging::LogLevel;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while decoding one tessellation record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("face {face}: cannot decode textured triangle data {flags}")]
    TexturedVariant { face: usize, flags: TessFaceFlags },

    #[error("face {face}: could not understand triangle data flags {flags}")]
    UnknownFlags { face: usize, flags: TessFaceFlags },

    #[error("face {face}: triangle index {position} is past the end of the index buffer ({len} words)")]
    IndexOverrun {
        face: usize,
        position: usize,
        len: usize,
    },

    #[error("face {face}: size block {position} is missing ({len} size words)")]
    SizeOverrun {
        face: usize,
        position: usize,
        len: usize,
    },

    #[error("decoding consumed {consumed} triangle index words, the record holds {len}")]
    ConsumptionMismatch { consumed: usize, len: usize },
}

/// Errors that can occur while converting a scene
#[derive(Error, Debug)]
pub enum Error {
    #[error("Tessellation decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Representation item type not implemented: {0}")]
    InvalidRepresentationItem(EntityType),

    #[error("Representation item carries no tessellation")]
    MissingTessellation,

    #[error("Invalid face provenance tag {tag}: expected {offset}..{end}")]
    InvalidProvenance { tag: i64, offset: usize, end: usize },

    #[error("Unsupported transformation type: {0}")]
    UnsupportedTransformation(&'static str),

    #[error("Scene nesting exceeds {0} levels")]
    DepthLimit(usize),

    #[error("Textured material {0} has no flat colour")]
    TexturedMaterial(u32),

    #[error("Scene model error: {0}")]
    Model(#[from] cadbridge_core::Error),

    #[error("Geometry engine error: {0}")]
    Engine(#[from] cadbridge_engine::Error),
}

impl Error {
    /// Malformed input aborts the leaf being built.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Error::Decode(
                DecodeError::UnknownFlags { .. }
                    | DecodeError::IndexOverrun { .. }
                    | DecodeError::SizeOverrun { .. }
                    | DecodeError::ConsumptionMismatch { .. }
            ) | Error::InvalidProvenance { .. }
        )
    }

    /// Input the converter knowingly does not handle.
    pub fn is_unsupported_input(&self) -> bool {
        matches!(
            self,
            Error::Decode(DecodeError::TexturedVariant { .. })
                | Error::InvalidRepresentationItem(_)
                | Error::UnsupportedTransformation(_)
                | Error::TexturedMaterial(_)
        )
    }

    /// Severity the error is reported with.
    pub fn severity(&self) -> LogLevel {
        match self {
            Error::InvalidRepresentationItem(_) => LogLevel::Warning,
            _ => LogLevel::Error,
        }
    }
}
