// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Synthetic scenes and tessellations shared by the integration tests.

#![allow(dead_code)]

use cadbridge_core::{
    GraphicsStyle, MeshItem, NodeGraphics, NodeKey, NodeKind, PartDefinition, ProductOccurrence,
    SceneModel, SceneNode, TessFace, TessFaceFlags, TessellationRecord,
};
use cadbridge_engine::{EngineArena, GeometryEngine};
use cadbridge_geometry::BridgeData;

/// Six points on the unit circle in z = 0, with a single +z normal.
pub fn hexagon_points() -> (Vec<f64>, Vec<f64>) {
    let coordinates = (0..6)
        .flat_map(|i| {
            let angle = i as f64 * std::f64::consts::FRAC_PI_3;
            [angle.cos(), angle.sin(), 0.0]
        })
        .collect();
    (coordinates, vec![0.0, 0.0, 1.0])
}

/// Offset of point `i` in the flat coordinate array.
pub fn p(i: u32) -> u32 {
    i * 3
}

/// Appends one unit of every encoding in `flags` and returns the face plus
/// the number of triangles it encodes.
///
/// Units: one triangle, one 4-point fan, one 5-point strip, one one-normal
/// triangle, one 4-point one-normal fan, one 5-point one-normal strip.
pub fn encode_face(flags: TessFaceFlags, indexes: &mut Vec<u32>) -> (TessFace, usize) {
    let start = indexes.len() as u32;
    let mut sizes = Vec::new();
    let mut triangles = 0;

    if flags.contains(TessFaceFlags::TRIANGLE) {
        sizes.push(1);
        indexes.extend([0, p(0), 0, p(1), 0, p(2)]);
        triangles += 1;
    }
    if flags.contains(TessFaceFlags::TRIANGLE_FAN) {
        sizes.extend([1, 4]);
        indexes.extend((0..4).flat_map(|i| [0, p(i)]));
        triangles += 2;
    }
    if flags.contains(TessFaceFlags::TRIANGLE_STRIPE) {
        sizes.extend([1, 5]);
        indexes.extend((0..5).flat_map(|i| [0, p(i)]));
        triangles += 3;
    }
    if flags.contains(TessFaceFlags::TRIANGLE_ONE_NORMAL) {
        sizes.push(1);
        indexes.extend([0, p(3), p(4), p(5)]);
        triangles += 1;
    }
    if flags.contains(TessFaceFlags::TRIANGLE_FAN_ONE_NORMAL) {
        sizes.extend([1, 4 | TessFaceFlags::NORMAL_SINGLE]);
        indexes.push(0);
        indexes.extend((2..6).map(p));
        triangles += 2;
    }
    if flags.contains(TessFaceFlags::TRIANGLE_STRIPE_ONE_NORMAL) {
        sizes.extend([1, 5 | TessFaceFlags::NORMAL_SINGLE]);
        indexes.push(0);
        indexes.extend((1..6).map(p));
        triangles += 3;
    }

    let face = TessFace {
        used_entities: flags,
        start_triangulated: start,
        sizes_triangulated: sizes,
        texture_coord_indexes_size: 0,
    };
    (face, triangles)
}

/// A hexagon tessellation with one face per flag set.
pub fn tessellation_with_faces(face_flags: &[TessFaceFlags]) -> (TessellationRecord, usize) {
    let (coordinates, normals) = hexagon_points();
    let mut indexes = Vec::new();
    let mut faces = Vec::new();
    let mut triangles = 0;
    for &flags in face_flags {
        let (face, count) = encode_face(flags, &mut indexes);
        faces.push(face);
        triangles += count;
    }
    let record = TessellationRecord {
        coordinates,
        normals,
        triangulated_indexes: indexes,
        faces,
    };
    (record, triangles)
}

/// The hexagon as a single fan face.
pub fn hexagon_tessellation() -> TessellationRecord {
    let (coordinates, normals) = hexagon_points();
    TessellationRecord {
        coordinates,
        normals,
        triangulated_indexes: (0..6).flat_map(|i| [0, p(i)]).collect(),
        faces: vec![TessFace {
            used_entities: TessFaceFlags::TRIANGLE_FAN,
            start_triangulated: 0,
            sizes_triangulated: vec![1, 6],
            texture_coord_indexes_size: 0,
        }],
    }
}

pub fn poly_brep(model: &mut SceneModel, tessellation: TessellationRecord) -> NodeKey {
    model.add_node(SceneNode::new(NodeKind::PolyBrepModel(MeshItem {
        coordinate_system: None,
        tessellation: Some(tessellation),
    })))
}

pub fn part(model: &mut SceneModel, name: &str, items: Vec<NodeKey>) -> NodeKey {
    model.add_node(
        SceneNode::new(NodeKind::PartDefinition(PartDefinition { items })).named(name),
    )
}

pub fn occurrence(model: &mut SceneModel, name: &str, occurrence: ProductOccurrence) -> NodeKey {
    model.add_node(SceneNode::new(NodeKind::ProductOccurrence(occurrence)).named(name))
}

pub fn coloured_set(model: &mut SceneModel, colour: u32, items: Vec<NodeKey>) -> NodeKey {
    model.add_node(
        SceneNode::new(NodeKind::Set { items })
            .with_graphics(NodeGraphics::with_style(GraphicsStyle::rgb(colour))),
    )
}

/// A fresh engine with one world and empty bridge data placing into it.
pub fn engine_and_data() -> (EngineArena, BridgeData) {
    let mut engine = EngineArena::new();
    let world = engine.create_world();
    (engine, BridgeData::new(world))
}
