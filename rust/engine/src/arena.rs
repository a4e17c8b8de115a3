// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based storage for engine objects.
//!
//! The [`EngineArena`] owns every solid, face, entity group, render style,
//! world and world entity. Objects reference each other through generational
//! keys, so destroying an object never invalidates unrelated handles.

use nalgebra::{Matrix4, Point3, Vector3};
use rustc_hash::FxHashSet;
use slotmap::SlotMap;

use crate::error::{Error, Result};
use crate::keys::*;

/// Data stored for a solid: the faces it was built from.
#[derive(Debug, Clone, Default)]
pub struct SolidData {
    pub faces: Vec<FaceKey>,
}

/// Data stored for a face: one triangle of a solid.
#[derive(Debug, Clone)]
pub struct FaceData {
    pub solid: SolidKey,
    pub points: [Point3<f64>; 3],
    /// Per-corner normals; zero when the mesh carried none.
    pub normals: [Vector3<f64>; 3],
    /// Application tag copied from the builder input.
    pub app_data: i64,
}

/// Data stored for an entity group: an unordered set of faces.
#[derive(Debug, Clone, Default)]
pub struct GroupData {
    pub faces: Vec<FaceKey>,
    pub(crate) members: FxHashSet<FaceKey>,
}

/// Appearance of a world entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyleDesc {
    pub colour: [f64; 3],
    pub back_colour: [f64; 3],
    /// 0 is opaque, 1 fully transparent.
    pub transparency: f64,
    /// Edge colour; `None` leaves edges undrawn.
    pub edge_colour: Option<[f64; 3]>,
}

impl RenderStyleDesc {
    /// Opaque style with the same colour on both sides and no edges.
    pub fn solid_colour(colour: [f64; 3]) -> Self {
        Self {
            colour,
            back_colour: colour,
            transparency: 0.0,
            edge_colour: None,
        }
    }
}

/// Data stored for a world: its placed entities in insertion order.
#[derive(Debug, Clone, Default)]
pub struct WorldData {
    pub entities: Vec<WorldEntityKey>,
}

/// Data stored for a world entity: a solid placed with a transform and style.
#[derive(Debug, Clone)]
pub struct WorldEntityData {
    pub world: WorldKey,
    pub solid: SolidKey,
    pub transform: Matrix4<f64>,
    pub style: Option<StyleKey>,
}

/// The in-memory geometry engine.
///
/// # Example
///
/// ```
/// use cadbridge_engine::{EngineArena, GeometryEngine, MeshSolidInput};
///
/// let mut engine = EngineArena::new();
/// let coordinates = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
/// let solid = engine
///     .create_solid_from_mesh(&MeshSolidInput {
///         vertex_indices: &[0, 1, 2],
///         coordinates: &coordinates,
///         normal_indices: &[],
///         normals: &[],
///         app_data: &[7],
///     })
///     .unwrap();
///
/// let faces = engine.solid_faces(solid).unwrap();
/// assert_eq!(faces.len(), 1);
/// assert_eq!(engine.face_app_data(faces[0]).unwrap(), 7);
/// ```
#[derive(Debug, Default)]
pub struct EngineArena {
    pub(crate) solids: SlotMap<SolidKey, SolidData>,
    pub(crate) faces: SlotMap<FaceKey, FaceData>,
    pub(crate) groups: SlotMap<GroupKey, GroupData>,
    pub(crate) styles: SlotMap<StyleKey, RenderStyleDesc>,
    pub(crate) worlds: SlotMap<WorldKey, WorldData>,
    pub(crate) world_entities: SlotMap<WorldEntityKey, WorldEntityData>,
}

impl EngineArena {
    /// Creates a new, empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Lookups ---

    pub fn solid(&self, key: SolidKey) -> Result<&SolidData> {
        self.solids
            .get(key)
            .ok_or(Error::NotFound(EngineKey::Solid(key)))
    }

    pub fn face(&self, key: FaceKey) -> Result<&FaceData> {
        self.faces
            .get(key)
            .ok_or(Error::NotFound(EngineKey::Face(key)))
    }

    pub fn group(&self, key: GroupKey) -> Result<&GroupData> {
        self.groups
            .get(key)
            .ok_or(Error::NotFound(EngineKey::Group(key)))
    }

    pub fn render_style(&self, key: StyleKey) -> Result<&RenderStyleDesc> {
        self.styles
            .get(key)
            .ok_or(Error::NotFound(EngineKey::Style(key)))
    }

    pub fn world(&self, key: WorldKey) -> Result<&WorldData> {
        self.worlds
            .get(key)
            .ok_or(Error::NotFound(EngineKey::World(key)))
    }

    pub fn world_entity(&self, key: WorldEntityKey) -> Result<&WorldEntityData> {
        self.world_entities
            .get(key)
            .ok_or(Error::NotFound(EngineKey::WorldEntity(key)))
    }

    // --- Counts ---

    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn style_count(&self) -> usize {
        self.styles.len()
    }

    pub fn world_entity_count(&self) -> usize {
        self.world_entities.len()
    }

    /// World-space corner positions of a face as placed by a world entity.
    pub fn placed_face_points(
        &self,
        entity: WorldEntityKey,
        face: FaceKey,
    ) -> Result<[Point3<f64>; 3]> {
        let entity = self.world_entity(entity)?;
        let face = self.face(face)?;
        Ok(face.points.map(|p| entity.transform.transform_point(&p)))
    }
}
