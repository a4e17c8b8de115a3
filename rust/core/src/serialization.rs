// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON scene descriptions.
//!
//! A scene description lists every node with an integer `id`; references
//! between nodes (children, prototypes, parts, items) use those ids. Loading
//! maps each id to a fresh [`NodeKey`], so the file format stays independent
//! of slot map internals.
//!
//! ```json
//! {
//!   "colours": [{ "r": 1.0, "g": 0.0, "b": 0.0 }],
//!   "roots": [0],
//!   "nodes": [
//!     { "id": 0, "name": "Assembly", "kind": { "type": "product_occurrence", "part": 1 } },
//!     { "id": 1, "kind": { "type": "part_definition", "items": [] } }
//!   ]
//! }
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graphics::{Material, NodeGraphics, Rgb};
use crate::keys::{EntityType, NodeKey};
use crate::model::{CadModel, SceneModel};
use crate::node::{MeshItem, NodeKind, PartDefinition, ProductOccurrence, SceneNode};
use crate::tessellation::TessellationRecord;
use crate::transformation::Location;

/// Serializable representation of a whole scene model.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SceneSnapshot {
    #[serde(default)]
    pub colours: Vec<Rgb>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub roots: Vec<usize>,
    pub nodes: Vec<NodeSnapshot>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphics: Option<NodeGraphics>,
    pub kind: KindSnapshot,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KindSnapshot {
    ProductOccurrence {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prototype: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        external_data: Option<usize>,
        #[serde(default)]
        children: Vec<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        part: Option<usize>,
    },
    PartDefinition {
        #[serde(default)]
        items: Vec<usize>,
    },
    Set {
        #[serde(default)]
        items: Vec<usize>,
    },
    BrepModel(MeshSnapshot),
    PolyBrepModel(MeshSnapshot),
    Other {
        entity_type: EntityType,
    },
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MeshSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate_system: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tessellation: Option<TessellationRecord>,
}

impl SceneModel {
    /// Loads a model from a JSON scene description.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: SceneSnapshot =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        Self::from_snapshot(snapshot)
    }

    /// Serializes the model to a JSON scene description.
    pub fn to_json(&self) -> Result<String> {
        let snapshot = self.to_snapshot()?;
        serde_json::to_string_pretty(&snapshot).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Builds a model from a snapshot.
    ///
    /// Every node is allocated first so that references may point forwards.
    pub fn from_snapshot(snapshot: SceneSnapshot) -> Result<Self> {
        let mut model = SceneModel::new();
        let mut keys: FxHashMap<usize, NodeKey> = FxHashMap::default();

        for node in &snapshot.nodes {
            let key = model.add_node(SceneNode::new(NodeKind::Set { items: Vec::new() }));
            if keys.insert(node.id, key).is_some() {
                return Err(Error::Serialization(format!("duplicate node id {}", node.id)));
            }
        }

        let resolve = |id: usize| -> Result<NodeKey> {
            keys.get(&id)
                .copied()
                .ok_or_else(|| Error::Serialization(format!("unknown node id {id}")))
        };
        let resolve_all = |ids: &[usize]| -> Result<Vec<NodeKey>> {
            ids.iter().map(|&id| resolve(id)).collect()
        };

        for node in snapshot.nodes {
            let kind = match node.kind {
                KindSnapshot::ProductOccurrence {
                    location,
                    prototype,
                    external_data,
                    children,
                    part,
                } => NodeKind::ProductOccurrence(ProductOccurrence {
                    location,
                    prototype: prototype.map(resolve).transpose()?,
                    external_data: external_data.map(resolve).transpose()?,
                    children: resolve_all(&children)?,
                    part: part.map(resolve).transpose()?,
                }),
                KindSnapshot::PartDefinition { items } => {
                    NodeKind::PartDefinition(PartDefinition {
                        items: resolve_all(&items)?,
                    })
                }
                KindSnapshot::Set { items } => NodeKind::Set {
                    items: resolve_all(&items)?,
                },
                KindSnapshot::BrepModel(mesh) => NodeKind::BrepModel(mesh.into()),
                KindSnapshot::PolyBrepModel(mesh) => NodeKind::PolyBrepModel(mesh.into()),
                KindSnapshot::Other { entity_type } => {
                    if !entity_type.is_representation_item()
                        || entity_type == EntityType::RiSet
                        || entity_type.carries_tessellation()
                    {
                        return Err(Error::Serialization(format!(
                            "node {}: {entity_type} cannot be declared as an other item",
                            node.id
                        )));
                    }
                    NodeKind::OtherItem(entity_type)
                }
            };

            let key = resolve(node.id)?;
            let target = model.node_mut(key)?;
            target.name = node.name;
            target.graphics = node.graphics;
            target.kind = kind;
        }

        for id in snapshot.roots {
            let key = resolve(id)?;
            model.add_root(key);
        }
        for colour in snapshot.colours {
            model.add_colour(colour);
        }
        for material in snapshot.materials {
            model.add_material(material);
        }

        Ok(model)
    }

    /// Creates a serializable snapshot of the model.
    ///
    /// SlotMap keys are mapped to sequential integer IDs. A reference to a
    /// node outside this model fails with [`Error::NodeNotFound`].
    pub fn to_snapshot(&self) -> Result<SceneSnapshot> {
        let ids: FxHashMap<NodeKey, usize> = self
            .iter()
            .enumerate()
            .map(|(i, (key, _))| (key, i))
            .collect();
        let id_of = |key: NodeKey| -> Result<usize> {
            ids.get(&key).copied().ok_or(Error::NodeNotFound(key))
        };
        let ids_of = |keys: &[NodeKey]| -> Result<Vec<usize>> {
            keys.iter().map(|&key| id_of(key)).collect()
        };

        let nodes = self
            .iter()
            .map(|(key, node)| -> Result<NodeSnapshot> {
                let kind = match &node.kind {
                    NodeKind::ProductOccurrence(occurrence) => KindSnapshot::ProductOccurrence {
                        location: occurrence.location,
                        prototype: occurrence.prototype.map(id_of).transpose()?,
                        external_data: occurrence.external_data.map(id_of).transpose()?,
                        children: ids_of(&occurrence.children)?,
                        part: occurrence.part.map(id_of).transpose()?,
                    },
                    NodeKind::PartDefinition(part) => KindSnapshot::PartDefinition {
                        items: ids_of(&part.items)?,
                    },
                    NodeKind::Set { items } => KindSnapshot::Set {
                        items: ids_of(items)?,
                    },
                    NodeKind::BrepModel(mesh) => KindSnapshot::BrepModel(mesh.into()),
                    NodeKind::PolyBrepModel(mesh) => KindSnapshot::PolyBrepModel(mesh.into()),
                    NodeKind::OtherItem(entity_type) => KindSnapshot::Other {
                        entity_type: *entity_type,
                    },
                };
                Ok(NodeSnapshot {
                    id: id_of(key)?,
                    name: node.name.clone(),
                    graphics: node.graphics,
                    kind,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SceneSnapshot {
            colours: (0..self.colour_count() as u32)
                .filter_map(|i| self.colour(i).ok())
                .collect(),
            materials: (0..self.material_count() as u32)
                .filter_map(|i| self.material(i).ok().cloned())
                .collect(),
            roots: ids_of(self.roots())?,
            nodes,
        })
    }
}

impl From<MeshSnapshot> for MeshItem {
    fn from(mesh: MeshSnapshot) -> Self {
        MeshItem {
            coordinate_system: mesh.coordinate_system,
            tessellation: mesh.tessellation,
        }
    }
}

impl From<&MeshItem> for MeshSnapshot {
    fn from(mesh: &MeshItem) -> Self {
        MeshSnapshot {
            coordinate_system: mesh.coordinate_system,
            tessellation: mesh.tessellation.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::ColourRef;

    const SCENE: &str = r#"{
        "colours": [{ "r": 1.0, "g": 0.0, "b": 0.0 }],
        "roots": [10],
        "nodes": [
            {
                "id": 10,
                "name": "Assembly",
                "graphics": { "style": { "colour": { "kind": "rgb", "index": 0 } } },
                "kind": { "type": "product_occurrence", "children": [11] }
            },
            {
                "id": 11,
                "kind": {
                    "type": "product_occurrence",
                    "location": { "kind": "cartesian", "origin": [1.0, 0.0, 0.0],
                                  "x_axis": [1.0, 0.0, 0.0], "y_axis": [0.0, 1.0, 0.0] },
                    "part": 12
                }
            },
            { "id": 12, "kind": { "type": "part_definition", "items": [13, 14] } },
            {
                "id": 13,
                "kind": {
                    "type": "poly_brep_model",
                    "tessellation": {
                        "coordinates": [0, 0, 0, 1, 0, 0, 0, 1, 0],
                        "normals": [0, 0, 1],
                        "triangulated_indexes": [0, 0, 0, 3, 0, 6],
                        "faces": [{ "used_entities": 2, "sizes_triangulated": [1] }]
                    }
                }
            },
            { "id": 14, "kind": { "type": "other", "entity_type": "RiCurve" } }
        ]
    }"#;

    #[test]
    fn load_scene_description() {
        let model = SceneModel::from_json(SCENE).unwrap();
        assert_eq!(model.node_count(), 5);
        assert_eq!(model.colour_count(), 1);

        let root = model.roots()[0];
        let node = model.node(root).unwrap();
        assert_eq!(node.name.as_deref(), Some("Assembly"));
        let style = node.graphics.and_then(|g| g.style).unwrap();
        assert_eq!(style.colour, ColourRef::Rgb(0));

        let NodeKind::ProductOccurrence(occurrence) = &node.kind else {
            panic!("expected occurrence");
        };
        let child = model.node(occurrence.children[0]).unwrap();
        let NodeKind::ProductOccurrence(child) = &child.kind else {
            panic!("expected occurrence");
        };
        assert!(matches!(child.location, Some(Location::Cartesian(_))));

        let part = model.node(child.part.unwrap()).unwrap();
        let items = part.kind.references();
        assert_eq!(items.len(), 2);

        let mesh = model.node(items[0]).unwrap().kind.mesh_item().unwrap();
        let tess = mesh.tessellation.as_ref().unwrap();
        assert_eq!(tess.point_count(), 3);
        assert_eq!(tess.faces[0].start_triangulated, 0);

        assert_eq!(
            model.node(items[1]).unwrap().entity_type(),
            EntityType::RiCurve
        );
    }

    #[test]
    fn unknown_reference_is_rejected() {
        let json = r#"{ "roots": [0], "nodes": [
            { "id": 0, "kind": { "type": "part_definition", "items": [7] } }
        ] }"#;
        let err = SceneModel::from_json(json).unwrap_err();
        assert!(err.to_string().contains("unknown node id 7"));
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let json = r#"{ "nodes": [
            { "id": 0, "kind": { "type": "set" } },
            { "id": 0, "kind": { "type": "set" } }
        ] }"#;
        assert!(matches!(
            SceneModel::from_json(json),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn structural_types_are_not_other_items() {
        let json = r#"{ "nodes": [
            { "id": 0, "kind": { "type": "other", "entity_type": "RiPolyBrepModel" } }
        ] }"#;
        assert!(SceneModel::from_json(json).is_err());
    }

    #[test]
    fn snapshot_preserves_structure() {
        let model = SceneModel::from_json(SCENE).unwrap();
        let json = model.to_json().unwrap();
        let reloaded = SceneModel::from_json(&json).unwrap();

        assert_eq!(reloaded.node_count(), model.node_count());
        assert_eq!(reloaded.roots().len(), 1);
        let root = reloaded.node(reloaded.roots()[0]).unwrap();
        assert_eq!(root.name.as_deref(), Some("Assembly"));
        assert_eq!(root.kind.references().len(), 1);
    }

    #[test]
    fn dangling_reference_fails_to_serialize() {
        let mut other = SceneModel::new();
        let foreign = (0..3)
            .map(|_| other.add_node(SceneNode::new(NodeKind::Set { items: Vec::new() })))
            .last()
            .unwrap();

        let mut model = SceneModel::new();
        let part = model.add_node(SceneNode::new(NodeKind::PartDefinition(PartDefinition {
            items: vec![foreign],
        })));
        model.add_root(part);

        let err = model.to_json().unwrap_err();
        assert!(matches!(err, Error::NodeNotFound(key) if key == foreign));
        assert!(model.to_snapshot().is_err());
    }
}
