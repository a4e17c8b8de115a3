// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Handle types for scene nodes.
//!
//! Every node of a [`SceneModel`](crate::SceneModel) is addressed by a
//! generational [`NodeKey`]. Keys stay valid for the lifetime of the model and
//! are never reused for a different node, so caches keyed by them cannot dangle.

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Key for a scene node (occurrence, part definition or representation item).
    pub struct NodeKey;
}

/// Discriminant for scene node types, used for diagnostics and dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityType {
    ProductOccurrence,
    PartDefinition,
    RiSet,
    RiBrepModel,
    RiPolyBrepModel,
    RiPointSet,
    RiCurve,
    RiPolyWire,
    RiPlane,
    RiDirection,
    RiCoordinateSystem,
}

impl EntityType {
    /// Returns the type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::ProductOccurrence => "ProductOccurrence",
            EntityType::PartDefinition => "PartDefinition",
            EntityType::RiSet => "RiSet",
            EntityType::RiBrepModel => "RiBrepModel",
            EntityType::RiPolyBrepModel => "RiPolyBrepModel",
            EntityType::RiPointSet => "RiPointSet",
            EntityType::RiCurve => "RiCurve",
            EntityType::RiPolyWire => "RiPolyWire",
            EntityType::RiPlane => "RiPlane",
            EntityType::RiDirection => "RiDirection",
            EntityType::RiCoordinateSystem => "RiCoordinateSystem",
        }
    }

    /// Returns `true` for representation item types (sets and leaves).
    pub fn is_representation_item(&self) -> bool {
        !matches!(
            self,
            EntityType::ProductOccurrence | EntityType::PartDefinition
        )
    }

    /// Returns `true` for the leaf types that carry a tessellated mesh.
    pub fn carries_tessellation(&self) -> bool {
        matches!(self, EntityType::RiBrepModel | EntityType::RiPolyBrepModel)
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_type_names() {
        assert_eq!(EntityType::ProductOccurrence.as_str(), "ProductOccurrence");
        assert_eq!(EntityType::RiPolyBrepModel.to_string(), "RiPolyBrepModel");
    }

    #[test]
    fn representation_item_classification() {
        assert!(!EntityType::ProductOccurrence.is_representation_item());
        assert!(!EntityType::PartDefinition.is_representation_item());
        assert!(EntityType::RiSet.is_representation_item());
        assert!(EntityType::RiCurve.is_representation_item());

        assert!(EntityType::RiBrepModel.carries_tessellation());
        assert!(EntityType::RiPolyBrepModel.carries_tessellation());
        assert!(!EntityType::RiSet.carries_tessellation());
    }
}
