// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene node variants.

use crate::graphics::NodeGraphics;
use crate::keys::{EntityType, NodeKey};
use crate::tessellation::TessellationRecord;
use crate::transformation::Location;

/// A placed instance of a part or sub-assembly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductOccurrence {
    pub location: Option<Location>,
    /// Occurrence whose content is transparently substituted for this one.
    pub prototype: Option<NodeKey>,
    /// Externally referenced occurrence, used when there is no prototype.
    pub external_data: Option<NodeKey>,
    pub children: Vec<NodeKey>,
    pub part: Option<NodeKey>,
}

/// The geometric content of a part: a list of representation items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartDefinition {
    pub items: Vec<NodeKey>,
}

/// A leaf geometry item carrying a pre-tessellated mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshItem {
    /// Local coordinate system, composed onto the incoming placement.
    pub coordinate_system: Option<Location>,
    /// Missing when the model was loaded without tessellation.
    pub tessellation: Option<TessellationRecord>,
}

/// Node payload, one variant per scene node type.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    ProductOccurrence(ProductOccurrence),
    PartDefinition(PartDefinition),
    /// Grouping representation item.
    Set { items: Vec<NodeKey> },
    BrepModel(MeshItem),
    PolyBrepModel(MeshItem),
    /// Any other representation item type; carries no usable mesh.
    OtherItem(EntityType),
}

impl NodeKind {
    pub fn entity_type(&self) -> EntityType {
        match self {
            NodeKind::ProductOccurrence(_) => EntityType::ProductOccurrence,
            NodeKind::PartDefinition(_) => EntityType::PartDefinition,
            NodeKind::Set { .. } => EntityType::RiSet,
            NodeKind::BrepModel(_) => EntityType::RiBrepModel,
            NodeKind::PolyBrepModel(_) => EntityType::RiPolyBrepModel,
            NodeKind::OtherItem(entity_type) => *entity_type,
        }
    }

    /// Mesh payload of Brep / PolyBrep items.
    pub fn mesh_item(&self) -> Option<&MeshItem> {
        match self {
            NodeKind::BrepModel(item) | NodeKind::PolyBrepModel(item) => Some(item),
            _ => None,
        }
    }

    /// Nodes directly referenced by this node, in traversal order.
    pub fn references(&self) -> Vec<NodeKey> {
        match self {
            NodeKind::ProductOccurrence(occurrence) => occurrence
                .prototype
                .iter()
                .chain(occurrence.external_data.iter())
                .chain(occurrence.children.iter())
                .chain(occurrence.part.iter())
                .copied()
                .collect(),
            NodeKind::PartDefinition(part) => part.items.clone(),
            NodeKind::Set { items } => items.clone(),
            _ => Vec::new(),
        }
    }
}

/// A scene node: optional name and graphics, plus its typed payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: Option<String>,
    pub graphics: Option<NodeGraphics>,
    pub kind: NodeKind,
}

impl SceneNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            name: None,
            graphics: None,
            kind,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_graphics(mut self, graphics: NodeGraphics) -> Self {
        self.graphics = Some(graphics);
        self
    }

    #[inline]
    pub fn entity_type(&self) -> EntityType {
        self.kind.entity_type()
    }
}
