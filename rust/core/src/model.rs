// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based storage for a CAD scene graph.
//!
//! The [`SceneModel`] owns every node of a loaded model together with the
//! global colour and material tables. Nodes reference each other through
//! [`NodeKey`]s, so one representation item can be shared by several part
//! definitions or occurrences without being copied.

use slotmap::SlotMap;

use crate::error::{Error, Result};
use crate::graphics::{Material, Rgb};
use crate::keys::NodeKey;
use crate::node::{NodeKind, SceneNode};

/// Read-only access to a loaded CAD model.
///
/// This is the seam the bridge reads through; [`SceneModel`] is the in-memory
/// implementation.
pub trait CadModel {
    /// Top-level nodes of the model, usually product occurrences.
    fn roots(&self) -> &[NodeKey];

    /// Looks up a node.
    fn node(&self, key: NodeKey) -> Result<&SceneNode>;

    /// Looks up an entry of the global colour table.
    fn colour(&self, index: u32) -> Result<Rgb>;

    /// Looks up an entry of the global material table.
    fn material(&self, index: u32) -> Result<&Material>;
}

/// In-memory scene graph.
///
/// # Example
///
/// ```
/// use cadbridge_core::{CadModel, NodeKind, PartDefinition, SceneModel, SceneNode};
///
/// let mut model = SceneModel::new();
/// let part = model.add_node(SceneNode::new(NodeKind::PartDefinition(PartDefinition::default())));
/// model.add_root(part);
///
/// assert_eq!(model.node_count(), 1);
/// assert_eq!(model.roots(), &[part]);
/// ```
#[derive(Debug, Default)]
pub struct SceneModel {
    nodes: SlotMap<NodeKey, SceneNode>,
    roots: Vec<NodeKey>,
    colours: Vec<Rgb>,
    materials: Vec<Material>,
}

impl SceneModel {
    /// Creates a new, empty model.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Nodes ---

    /// Adds a node and returns its key.
    pub fn add_node(&mut self, node: SceneNode) -> NodeKey {
        self.nodes.insert(node)
    }

    /// Registers a node as a model root.
    pub fn add_root(&mut self, key: NodeKey) {
        self.roots.push(key);
    }

    /// Mutable access to a node, for building models incrementally.
    pub fn node_mut(&mut self, key: NodeKey) -> Result<&mut SceneNode> {
        self.nodes.get_mut(key).ok_or(Error::NodeNotFound(key))
    }

    /// Returns the number of nodes in the model.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the key references a node of this model.
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Iterates over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &SceneNode)> {
        self.nodes.iter()
    }

    /// Name of a node, if it has one.
    pub fn name(&self, key: NodeKey) -> Option<&str> {
        self.nodes.get(key).and_then(|node| node.name.as_deref())
    }

    /// Appends a child to an occurrence, a part definition or a set.
    ///
    /// The child must already be a node of this model.
    pub fn add_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<()> {
        if !self.nodes.contains_key(child) {
            return Err(Error::NodeNotFound(child));
        }
        let node = self.node_mut(parent)?;
        match &mut node.kind {
            NodeKind::ProductOccurrence(occurrence) => {
                occurrence.children.push(child);
                Ok(())
            }
            NodeKind::PartDefinition(part) => {
                part.items.push(child);
                Ok(())
            }
            NodeKind::Set { items } => {
                items.push(child);
                Ok(())
            }
            other => Err(Error::WrongKind {
                expected: "container",
                found: other.entity_type(),
            }),
        }
    }

    // --- Global tables ---

    /// Appends a colour to the global colour table and returns its index.
    pub fn add_colour(&mut self, colour: Rgb) -> u32 {
        self.colours.push(colour);
        (self.colours.len() - 1) as u32
    }

    /// Appends a material to the global material table and returns its index.
    pub fn add_material(&mut self, material: Material) -> u32 {
        self.materials.push(material);
        (self.materials.len() - 1) as u32
    }

    pub fn colour_count(&self) -> usize {
        self.colours.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}

impl CadModel for SceneModel {
    fn roots(&self) -> &[NodeKey] {
        &self.roots
    }

    fn node(&self, key: NodeKey) -> Result<&SceneNode> {
        self.nodes.get(key).ok_or(Error::NodeNotFound(key))
    }

    fn colour(&self, index: u32) -> Result<Rgb> {
        self.colours
            .get(index as usize)
            .copied()
            .ok_or(Error::ColourIndex(index))
    }

    fn material(&self, index: u32) -> Result<&Material> {
        self.materials
            .get(index as usize)
            .ok_or(Error::MaterialIndex(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::EntityType;
    use crate::node::{PartDefinition, ProductOccurrence};

    #[test]
    fn add_and_lookup_nodes() {
        let mut model = SceneModel::new();
        let occurrence = model.add_node(
            SceneNode::new(NodeKind::ProductOccurrence(ProductOccurrence::default()))
                .named("Assembly"),
        );
        model.add_root(occurrence);

        let node = model.node(occurrence).unwrap();
        assert_eq!(node.entity_type(), EntityType::ProductOccurrence);
        assert_eq!(model.name(occurrence), Some("Assembly"));
        assert_eq!(model.roots(), &[occurrence]);
    }

    #[test]
    fn add_child_to_containers_only() {
        let mut model = SceneModel::new();
        let part = model.add_node(SceneNode::new(NodeKind::PartDefinition(
            PartDefinition::default(),
        )));
        let item = model.add_node(SceneNode::new(NodeKind::OtherItem(EntityType::RiCurve)));

        model.add_child(part, item).unwrap();
        assert_eq!(model.node(part).unwrap().kind.references(), vec![item]);

        let err = model.add_child(item, part).unwrap_err();
        assert!(matches!(err, Error::WrongKind { found: EntityType::RiCurve, .. }));
    }

    #[test]
    fn add_child_rejects_foreign_keys() {
        let mut other = SceneModel::new();
        let foreign = (0..3)
            .map(|_| other.add_node(SceneNode::new(NodeKind::Set { items: Vec::new() })))
            .last()
            .unwrap();

        let mut model = SceneModel::new();
        let part = model.add_node(SceneNode::new(NodeKind::PartDefinition(
            PartDefinition::default(),
        )));

        let err = model.add_child(part, foreign).unwrap_err();
        assert!(matches!(err, Error::NodeNotFound(key) if key == foreign));
        assert!(model.node(part).unwrap().kind.references().is_empty());
    }

    #[test]
    fn global_tables_are_index_checked() {
        let mut model = SceneModel::new();
        let red = model.add_colour(Rgb::new(1.0, 0.0, 0.0));
        let wood = model.add_material(Material::Texture {
            image: "wood.png".into(),
        });

        assert_eq!(model.colour(red).unwrap(), Rgb::new(1.0, 0.0, 0.0));
        assert!(model.material(wood).unwrap().is_texture());
        assert!(matches!(model.colour(5), Err(Error::ColourIndex(5))));
        assert!(matches!(model.material(1), Err(Error::MaterialIndex(1))));
    }

    #[test]
    fn missing_node_is_reported() {
        let mut model = SceneModel::new();
        let key = model.add_node(SceneNode::new(NodeKind::Set { items: Vec::new() }));
        let mut other = SceneModel::new();
        assert!(matches!(other.node(key), Err(Error::NodeNotFound(_))));
        assert!(other.node_mut(key).is_err());
    }
}
