// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixtures shared by the unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use cadbridge_core::{
    GraphicsStyle, MeshItem, NodeGraphics, NodeKey, NodeKind, PartDefinition, ProductOccurrence,
    SceneModel, SceneNode, TessFace, TessFaceFlags, TessellationRecord,
};
use cadbridge_engine::{
    EngineArena, EngineKey, FaceKey, GeometryEngine, GroupKey, MeshSolidInput, RenderStyleDesc,
    SolidKey, StyleKey, WorldEntityKey, WorldKey,
};
use nalgebra::Matrix4;

use crate::logging::{BridgeLogger, LogLevel};

/// Unit square in z = 0 as two source faces of one triangle each.
pub(crate) fn quad_tessellation() -> TessellationRecord {
    TessellationRecord {
        coordinates: vec![
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            1.0, 1.0, 0.0, //
            0.0, 1.0, 0.0,
        ],
        normals: vec![0.0, 0.0, 1.0],
        triangulated_indexes: vec![0, 0, 0, 3, 0, 6, 0, 0, 0, 6, 0, 9],
        faces: vec![
            TessFace {
                used_entities: TessFaceFlags::TRIANGLE,
                start_triangulated: 0,
                sizes_triangulated: vec![1],
                texture_coord_indexes_size: 0,
            },
            TessFace {
                used_entities: TessFaceFlags::TRIANGLE,
                start_triangulated: 6,
                sizes_triangulated: vec![1],
                texture_coord_indexes_size: 0,
            },
        ],
    }
}

pub(crate) fn poly_brep(
    model: &mut SceneModel,
    tessellation: Option<TessellationRecord>,
    graphics: Option<NodeGraphics>,
) -> NodeKey {
    let node = SceneNode {
        name: None,
        graphics,
        kind: NodeKind::PolyBrepModel(MeshItem {
            coordinate_system: None,
            tessellation,
        }),
    };
    model.add_node(node)
}

pub(crate) fn part(model: &mut SceneModel, name: &str, items: Vec<NodeKey>) -> NodeKey {
    model.add_node(
        SceneNode::new(NodeKind::PartDefinition(PartDefinition { items })).named(name),
    )
}

pub(crate) fn occurrence(
    model: &mut SceneModel,
    name: &str,
    occurrence: ProductOccurrence,
) -> NodeKey {
    model.add_node(SceneNode::new(NodeKind::ProductOccurrence(occurrence)).named(name))
}

/// Graphics selecting an entry of the colour table.
pub(crate) fn coloured(index: u32) -> NodeGraphics {
    NodeGraphics::with_style(GraphicsStyle::rgb(index))
}

pub(crate) type LogRecord = Rc<RefCell<Vec<(String, LogLevel)>>>;

/// Logger that keeps every message for inspection.
pub(crate) fn recording_logger() -> (BridgeLogger, LogRecord) {
    let record = LogRecord::default();
    let sink = Rc::clone(&record);
    let logger = BridgeLogger::with_sink(move |message, level| {
        sink.borrow_mut().push((message.to_string(), level));
    });
    (logger, record)
}

/// Engine wrapper with injectable faults: it can shift every face tag after
/// building a solid, as an engine that loses application data would, and it
/// can reject entity transforms.
pub(crate) struct FaultyEngine {
    pub inner: EngineArena,
    tag_shift: i64,
    reject_transforms: bool,
}

impl FaultyEngine {
    pub(crate) fn shifting_tags(shift: i64) -> Self {
        Self {
            inner: EngineArena::new(),
            tag_shift: shift,
            reject_transforms: false,
        }
    }

    pub(crate) fn rejecting_transforms() -> Self {
        Self {
            inner: EngineArena::new(),
            tag_shift: 0,
            reject_transforms: true,
        }
    }
}

impl GeometryEngine for FaultyEngine {
    fn create_solid_from_mesh(
        &mut self,
        input: &MeshSolidInput<'_>,
    ) -> cadbridge_engine::Result<SolidKey> {
        let solid = self.inner.create_solid_from_mesh(input)?;
        if self.tag_shift != 0 {
            for face in self.inner.solid_faces(solid)? {
                let tag = self.inner.face_app_data(face)?;
                self.inner.set_face_app_data(face, tag + self.tag_shift)?;
            }
        }
        Ok(solid)
    }

    fn solid_faces(&self, solid: SolidKey) -> cadbridge_engine::Result<Vec<FaceKey>> {
        self.inner.solid_faces(solid)
    }

    fn face_app_data(&self, face: FaceKey) -> cadbridge_engine::Result<i64> {
        self.inner.face_app_data(face)
    }

    fn set_face_app_data(&mut self, face: FaceKey, value: i64) -> cadbridge_engine::Result<()> {
        self.inner.set_face_app_data(face, value)
    }

    fn destroy_solid(&mut self, solid: SolidKey) -> cadbridge_engine::Result<()> {
        self.inner.destroy_solid(solid)
    }

    fn create_group(&mut self) -> GroupKey {
        self.inner.create_group()
    }

    fn group_add_face(&mut self, group: GroupKey, face: FaceKey) -> cadbridge_engine::Result<()> {
        self.inner.group_add_face(group, face)
    }

    fn destroy_group(&mut self, group: GroupKey) -> cadbridge_engine::Result<()> {
        self.inner.destroy_group(group)
    }

    fn create_render_style(&mut self, style: &RenderStyleDesc) -> StyleKey {
        self.inner.create_render_style(style)
    }

    fn destroy_render_style(&mut self, style: StyleKey) -> cadbridge_engine::Result<()> {
        self.inner.destroy_render_style(style)
    }

    fn create_world(&mut self) -> WorldKey {
        self.inner.create_world()
    }

    fn world_add_solid(
        &mut self,
        world: WorldKey,
        solid: SolidKey,
    ) -> cadbridge_engine::Result<WorldEntityKey> {
        self.inner.world_add_solid(world, solid)
    }

    fn set_entity_transform(
        &mut self,
        entity: WorldEntityKey,
        transform: &Matrix4<f64>,
    ) -> cadbridge_engine::Result<()> {
        if self.reject_transforms {
            return Err(cadbridge_engine::Error::NotFound(EngineKey::WorldEntity(entity)));
        }
        self.inner.set_entity_transform(entity, transform)
    }

    fn set_entity_style(
        &mut self,
        entity: WorldEntityKey,
        style: StyleKey,
    ) -> cadbridge_engine::Result<()> {
        self.inner.set_entity_style(entity, style)
    }

    fn destroy_world_entity(&mut self, entity: WorldEntityKey) -> cadbridge_engine::Result<()> {
        self.inner.destroy_world_entity(entity)
    }
}
