// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for scene model access.

use crate::keys::{EntityType, NodeKey};

/// Result type alias for scene model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the scene model.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A referenced node does not exist in the model.
    #[error("scene node not found: {0:?}")]
    NodeNotFound(NodeKey),

    /// A node was accessed as the wrong type.
    #[error("expected {expected} node, found {found}")]
    WrongKind {
        expected: &'static str,
        found: EntityType,
    },

    /// A colour table index is out of range.
    #[error("colour index {0} out of range")]
    ColourIndex(u32),

    /// A material table index is out of range.
    #[error("material index {0} out of range")]
    MaterialIndex(u32),

    /// The scene description is malformed.
    #[error("scene description error: {0}")]
    Serialization(String),
}
