// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # CadBridge Geometry
//!
//! Converts a CAD scene graph whose representation items carry
//! pre-tessellated meshes into placed, styled solids of a geometry engine.
//!
//! ## Overview
//!
//! - [`tessellation`]: decodes the packed triangle formats of a
//!   [`TessellationRecord`](cadbridge_core::TessellationRecord)
//! - [`transform`]: local frames to 4×4 matrices and their cascade
//! - [`attributes`]: graphics styles to RGB colours
//! - [`solid`] and [`registry`]: one engine solid per representation item,
//!   faces grouped by source face
//! - [`style_cache`]: one render style per distinct colour
//! - [`traversal`]: the scene walk that ties everything together
//! - [`bridge`]: conversion results and teardown
//!
//! ## Quick Start
//!
//! ```rust
//! use cadbridge_core::{PartDefinition, NodeKind, SceneModel, SceneNode};
//! use cadbridge_engine::{EngineArena, GeometryEngine};
//! use cadbridge_geometry::{convert_model, BridgeData, BridgeLogger, ConversionOptions};
//!
//! let mut model = SceneModel::new();
//! let root = model.add_node(SceneNode::new(NodeKind::PartDefinition(PartDefinition::default())));
//! model.add_root(root);
//!
//! let mut engine = EngineArena::new();
//! let mut data = BridgeData::new(engine.create_world());
//! let summary = convert_model(
//!     &model,
//!     &mut engine,
//!     &mut data,
//!     &ConversionOptions::default(),
//!     &BridgeLogger::new(),
//! );
//! assert_eq!(summary.instances, 0);
//! ```

pub mod attributes;
pub mod bridge;
pub mod error;
pub mod logging;
pub mod options;
pub mod registry;
pub mod solid;
pub mod style_cache;
pub mod tessellation;
pub mod transform;
pub mod traversal;

#[cfg(test)]
mod test_support;

pub use attributes::{attributes_colour, resolve_colour};
pub use bridge::{AssemblyPath, BridgeData};
pub use error::{DecodeError, Error, Result};
pub use logging::{BridgeLogger, LogLevel, LogSink};
pub use options::ConversionOptions;
pub use registry::{FaceProvenance, SolidRegistry};
pub use solid::{build_solid, BuiltSolid};
pub use style_cache::{ColourKey, StyleCache};
pub use tessellation::{decode_face, decode_tessellation, TriangleBuffers};
pub use transform::{cartesian_matrix, compose, location_matrix};
pub use traversal::{convert_model, convert_node, ConversionSummary};
