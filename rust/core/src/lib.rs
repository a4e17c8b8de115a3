// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # CadBridge Core
//!
//! In-memory representation of a loaded CAD model: a scene graph of product
//! occurrences, part definitions and representation items, together with the
//! global colour and material tables and the pre-tessellated mesh records
//! carried by Brep / PolyBrep items.
//!
//! ## Overview
//!
//! - **Scene graph**: [`SceneModel`] stores nodes in a slot map addressed by
//!   [`NodeKey`]; nodes may be shared between several parents
//! - **Read seam**: consumers read through the [`CadModel`] trait
//! - **Graphics**: per-node styles and the [`CascadedAttributes`] rule that
//!   pushes them down a scene path
//! - **Scene descriptions**: JSON loading and saving via
//!   [`SceneModel::from_json`] / [`SceneModel::to_json`]
//!
//! ## Quick Start
//!
//! ```rust
//! use cadbridge_core::{CadModel, NodeKind, PartDefinition, ProductOccurrence, SceneModel, SceneNode};
//!
//! let mut model = SceneModel::new();
//! let part = model.add_node(SceneNode::new(NodeKind::PartDefinition(PartDefinition::default())));
//! let occurrence = model.add_node(
//!     SceneNode::new(NodeKind::ProductOccurrence(ProductOccurrence {
//!         part: Some(part),
//!         ..Default::default()
//!     }))
//!     .named("Bracket"),
//! );
//! model.add_root(occurrence);
//!
//! assert_eq!(model.roots().len(), 1);
//! assert_eq!(model.name(occurrence), Some("Bracket"));
//! ```

pub mod error;
pub mod graphics;
pub mod keys;
pub mod model;
pub mod node;
pub mod serialization;
pub mod tessellation;
pub mod transformation;

pub use error::{Error, Result};
pub use graphics::{CascadedAttributes, ColourRef, GraphicsStyle, Material, NodeGraphics, Rgb};
pub use keys::{EntityType, NodeKey};
pub use model::{CadModel, SceneModel};
pub use node::{MeshItem, NodeKind, PartDefinition, ProductOccurrence, SceneNode};
pub use serialization::SceneSnapshot;
pub use tessellation::{TessFace, TessFaceFlags, TessellationRecord};
pub use transformation::{CartesianTransformation, Location};
