// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The engine operations a scene converter needs, as a trait.

use nalgebra::Matrix4;

use crate::arena::{EngineArena, GroupData, RenderStyleDesc, WorldData, WorldEntityData};
use crate::error::{Error, Result};
use crate::keys::*;
use crate::mesh::MeshSolidInput;

/// Geometry engine collaborator.
///
/// Every call is synchronous. Handles returned by one engine are only
/// meaningful to that engine.
pub trait GeometryEngine {
    // --- Solids ---

    /// Builds a solid from an indexed triangle mesh.
    fn create_solid_from_mesh(&mut self, input: &MeshSolidInput<'_>) -> Result<SolidKey>;

    /// Faces of a solid, in build order.
    fn solid_faces(&self, solid: SolidKey) -> Result<Vec<FaceKey>>;

    /// Application tag of a face.
    fn face_app_data(&self, face: FaceKey) -> Result<i64>;

    fn set_face_app_data(&mut self, face: FaceKey, value: i64) -> Result<()>;

    /// Destroys a solid and its faces.
    fn destroy_solid(&mut self, solid: SolidKey) -> Result<()>;

    // --- Entity groups ---

    fn create_group(&mut self) -> GroupKey;

    /// Adds a face to a group. Adding a face twice is a no-op.
    fn group_add_face(&mut self, group: GroupKey, face: FaceKey) -> Result<()>;

    fn destroy_group(&mut self, group: GroupKey) -> Result<()>;

    // --- Render styles ---

    fn create_render_style(&mut self, style: &RenderStyleDesc) -> StyleKey;

    fn destroy_render_style(&mut self, style: StyleKey) -> Result<()>;

    // --- Worlds ---

    fn create_world(&mut self) -> WorldKey;

    /// Places a solid in a world with an identity transform and no style.
    fn world_add_solid(&mut self, world: WorldKey, solid: SolidKey) -> Result<WorldEntityKey>;

    fn set_entity_transform(&mut self, entity: WorldEntityKey, transform: &Matrix4<f64>)
        -> Result<()>;

    fn set_entity_style(&mut self, entity: WorldEntityKey, style: StyleKey) -> Result<()>;

    /// Removes an entity from its world and destroys it.
    fn destroy_world_entity(&mut self, entity: WorldEntityKey) -> Result<()>;
}

impl GeometryEngine for EngineArena {
    fn create_solid_from_mesh(&mut self, input: &MeshSolidInput<'_>) -> Result<SolidKey> {
        self.build_mesh_solid(input)
    }

    fn solid_faces(&self, solid: SolidKey) -> Result<Vec<FaceKey>> {
        Ok(self.solid(solid)?.faces.clone())
    }

    fn face_app_data(&self, face: FaceKey) -> Result<i64> {
        Ok(self.face(face)?.app_data)
    }

    fn set_face_app_data(&mut self, face: FaceKey, value: i64) -> Result<()> {
        let data = self
            .faces
            .get_mut(face)
            .ok_or(Error::NotFound(EngineKey::Face(face)))?;
        data.app_data = value;
        Ok(())
    }

    fn destroy_solid(&mut self, solid: SolidKey) -> Result<()> {
        let data = self
            .solids
            .remove(solid)
            .ok_or(Error::NotFound(EngineKey::Solid(solid)))?;
        for face in data.faces {
            self.faces.remove(face);
        }
        Ok(())
    }

    fn create_group(&mut self) -> GroupKey {
        self.groups.insert(GroupData::default())
    }

    fn group_add_face(&mut self, group: GroupKey, face: FaceKey) -> Result<()> {
        if !self.faces.contains_key(face) {
            return Err(Error::NotFound(EngineKey::Face(face)));
        }
        let data = self
            .groups
            .get_mut(group)
            .ok_or(Error::NotFound(EngineKey::Group(group)))?;
        if data.members.insert(face) {
            data.faces.push(face);
        }
        Ok(())
    }

    fn destroy_group(&mut self, group: GroupKey) -> Result<()> {
        self.groups
            .remove(group)
            .map(|_| ())
            .ok_or(Error::NotFound(EngineKey::Group(group)))
    }

    fn create_render_style(&mut self, style: &RenderStyleDesc) -> StyleKey {
        self.styles.insert(*style)
    }

    fn destroy_render_style(&mut self, style: StyleKey) -> Result<()> {
        self.styles
            .remove(style)
            .map(|_| ())
            .ok_or(Error::NotFound(EngineKey::Style(style)))
    }

    fn create_world(&mut self) -> WorldKey {
        self.worlds.insert(WorldData::default())
    }

    fn world_add_solid(&mut self, world: WorldKey, solid: SolidKey) -> Result<WorldEntityKey> {
        if !self.solids.contains_key(solid) {
            return Err(Error::NotFound(EngineKey::Solid(solid)));
        }
        if !self.worlds.contains_key(world) {
            return Err(Error::NotFound(EngineKey::World(world)));
        }
        let entity = self.world_entities.insert(WorldEntityData {
            world,
            solid,
            transform: Matrix4::identity(),
            style: None,
        });
        if let Some(data) = self.worlds.get_mut(world) {
            data.entities.push(entity);
        }
        Ok(entity)
    }

    fn set_entity_transform(
        &mut self,
        entity: WorldEntityKey,
        transform: &Matrix4<f64>,
    ) -> Result<()> {
        let data = self
            .world_entities
            .get_mut(entity)
            .ok_or(Error::NotFound(EngineKey::WorldEntity(entity)))?;
        data.transform = *transform;
        Ok(())
    }

    fn set_entity_style(&mut self, entity: WorldEntityKey, style: StyleKey) -> Result<()> {
        if !self.styles.contains_key(style) {
            return Err(Error::NotFound(EngineKey::Style(style)));
        }
        let data = self
            .world_entities
            .get_mut(entity)
            .ok_or(Error::NotFound(EngineKey::WorldEntity(entity)))?;
        data.style = Some(style);
        Ok(())
    }

    fn destroy_world_entity(&mut self, entity: WorldEntityKey) -> Result<()> {
        let data = self
            .world_entities
            .remove(entity)
            .ok_or(Error::NotFound(EngineKey::WorldEntity(entity)))?;
        if let Some(world) = self.worlds.get_mut(data.world) {
            world.entities.retain(|&e| e != entity);
        }
        Ok(())
    }
}
