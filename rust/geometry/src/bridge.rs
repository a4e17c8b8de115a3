// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion results and their teardown.
//!
//! [`BridgeData`] accumulates everything conversions create in the engine:
//! solids (through the [`SolidRegistry`]), placed world entities with their
//! assembly paths, render styles and per-source-face groups. Several
//! conversions may share one `BridgeData`; provenance tags keep increasing
//! across them.
//!
//! Teardown comes in two flavours. [`BridgeData::destroy_world_entities`] and
//! [`BridgeData::destroy_solids`] release engine objects the caller may still
//! want to keep, [`BridgeData::destroy_data`] drops the bookkeeping (and the
//! styles and groups only this data refers to). [`BridgeData::destroy_all`]
//! does both.

use cadbridge_core::{CadModel, NodeKey};
use cadbridge_engine::{FaceKey, GeometryEngine, GroupKey, WorldEntityKey, WorldKey};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::Result;
use crate::registry::SolidRegistry;
use crate::style_cache::StyleCache;

/// Root-to-leaf chain of occurrences and part definitions.
pub type AssemblyPath = SmallVec<[NodeKey; 8]>;

#[derive(Debug)]
pub struct BridgeData {
    world: WorldKey,
    pub registry: SolidRegistry,
    pub styles: StyleCache,
    entities: Vec<WorldEntityKey>,
    paths: FxHashMap<WorldEntityKey, AssemblyPath>,
    topo_face_count: usize,
}

impl BridgeData {
    /// Empty results placing entities into `world`.
    ///
    /// The world itself is not owned and is never destroyed by teardown.
    pub fn new(world: WorldKey) -> Self {
        Self {
            world,
            registry: SolidRegistry::new(),
            styles: StyleCache::new(),
            entities: Vec::new(),
            paths: FxHashMap::default(),
            topo_face_count: 0,
        }
    }

    #[inline]
    pub fn world(&self) -> WorldKey {
        self.world
    }

    /// Placed world entities, in placement order.
    pub fn entities(&self) -> &[WorldEntityKey] {
        &self.entities
    }

    pub fn path(&self, entity: WorldEntityKey) -> Option<&AssemblyPath> {
        self.paths.get(&entity)
    }

    pub fn paths(&self) -> impl Iterator<Item = (WorldEntityKey, &AssemblyPath)> + '_ {
        self.paths.iter().map(|(&k, v)| (k, v))
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Source faces processed so far; the tag offset of the next solid.
    #[inline]
    pub fn topo_face_count(&self) -> usize {
        self.topo_face_count
    }

    pub(crate) fn advance_topo_faces(&mut self, faces: usize) {
        self.topo_face_count += faces;
    }

    pub(crate) fn record_instance(&mut self, entity: WorldEntityKey, path: AssemblyPath) {
        self.entities.push(entity);
        self.paths.insert(entity, path);
    }

    /// The group of faces sharing a face's source face.
    pub fn region_for_face(&self, face: FaceKey) -> Option<GroupKey> {
        self.registry.region_for_face(face)
    }

    /// Names along an entity's assembly path.
    ///
    /// Unnamed nodes are listed by their type name.
    pub fn path_names<M: CadModel + ?Sized>(
        &self,
        model: &M,
        entity: WorldEntityKey,
    ) -> Option<Vec<String>> {
        let path = self.paths.get(&entity)?;
        Some(
            path.iter()
                .map(|&key| match model.node(key) {
                    Ok(node) => node
                        .name
                        .clone()
                        .unwrap_or_else(|| node.entity_type().to_string()),
                    Err(_) => format!("{key:?}"),
                })
                .collect(),
        )
    }

    // --- Teardown ---

    /// Removes every placed entity from the world.
    pub fn destroy_world_entities<E: GeometryEngine + ?Sized>(
        &mut self,
        engine: &mut E,
    ) -> Result<()> {
        release(self.entities.drain(..), |entity| {
            engine.destroy_world_entity(entity)
        })
    }

    /// Destroys every built solid and forgets the item → solid entries.
    pub fn destroy_solids<E: GeometryEngine + ?Sized>(&mut self, engine: &mut E) -> Result<()> {
        release(self.registry.take_solids(), |solid| engine.destroy_solid(solid))
    }

    /// Drops all bookkeeping without destroying solids or world entities.
    ///
    /// Render styles and face groups are destroyed in the engine, as nothing
    /// but this data refers to them. The provenance tag offset is kept.
    pub fn destroy_data<E: GeometryEngine + ?Sized>(&mut self, engine: &mut E) -> Result<()> {
        self.registry.take_solids();
        self.entities.clear();
        self.paths.clear();
        let styles = release(self.styles.drain(), |style| {
            engine.destroy_render_style(style)
        });
        let groups = release(self.registry.take_groups(), |group| {
            engine.destroy_group(group)
        });
        styles.and(groups)
    }

    /// Destroys world entities and solids, then all bookkeeping.
    pub fn destroy_all<E: GeometryEngine + ?Sized>(&mut self, engine: &mut E) -> Result<()> {
        let entities = self.destroy_world_entities(engine);
        let solids = self.destroy_solids(engine);
        let data = self.destroy_data(engine);
        entities.and(solids).and(data)
    }
}

/// Releases every handle, reporting the first failure.
fn release<T>(
    handles: impl IntoIterator<Item = T>,
    mut destroy: impl FnMut(T) -> cadbridge_engine::Result<()>,
) -> Result<()> {
    let mut first = None;
    for handle in handles {
        if let Err(err) = destroy(handle) {
            first.get_or_insert(err);
        }
    }
    match first {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
