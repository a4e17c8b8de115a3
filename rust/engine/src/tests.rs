// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use approx::assert_relative_eq;
use nalgebra::{Matrix4, Point3, Vector3};

use super::*;

const QUAD: [f64; 12] = [
    0.0, 0.0, 0.0, //
    1.0, 0.0, 0.0, //
    1.0, 1.0, 0.0, //
    0.0, 1.0, 0.0,
];
const UP: [f64; 3] = [0.0, 0.0, 1.0];

fn quad_solid(engine: &mut EngineArena) -> SolidKey {
    engine
        .create_solid_from_mesh(&MeshSolidInput {
            vertex_indices: &[0, 1, 2, 0, 2, 3],
            coordinates: &QUAD,
            normal_indices: &[0, 0, 0, 0, 0, 0],
            normals: &UP,
            app_data: &[10, 11],
        })
        .unwrap()
}

#[test]
fn build_solid_one_face_per_triangle() {
    let mut engine = EngineArena::new();
    let solid = quad_solid(&mut engine);

    let faces = engine.solid_faces(solid).unwrap();
    assert_eq!(faces.len(), 2);
    assert_eq!(engine.face_app_data(faces[0]).unwrap(), 10);
    assert_eq!(engine.face_app_data(faces[1]).unwrap(), 11);

    let face = engine.face(faces[1]).unwrap();
    assert_eq!(face.solid, solid);
    assert_eq!(face.points[2], Point3::new(0.0, 1.0, 0.0));
    assert_eq!(face.normals[0], Vector3::new(0.0, 0.0, 1.0));
}

#[test]
fn degenerate_triangles_are_dropped() {
    let mut engine = EngineArena::new();
    let solid = engine
        .create_solid_from_mesh(&MeshSolidInput {
            vertex_indices: &[0, 1, 1, 0, 1, 2],
            coordinates: &QUAD,
            normal_indices: &[],
            normals: &[],
            app_data: &[0, 1],
        })
        .unwrap();

    let faces = engine.solid_faces(solid).unwrap();
    assert_eq!(faces.len(), 1);
    assert_eq!(engine.face_app_data(faces[0]).unwrap(), 1);
    assert_eq!(engine.face(faces[0]).unwrap().normals[1], Vector3::zeros());
}

#[test]
fn invalid_meshes_are_rejected() {
    let mut engine = EngineArena::new();
    let base = MeshSolidInput {
        vertex_indices: &[0, 1, 2],
        coordinates: &QUAD,
        normal_indices: &[],
        normals: &[],
        app_data: &[0],
    };

    let empty = MeshSolidInput {
        vertex_indices: &[],
        app_data: &[],
        ..base
    };
    assert!(matches!(
        engine.create_solid_from_mesh(&empty),
        Err(Error::EmptyMesh)
    ));

    let ragged = MeshSolidInput {
        vertex_indices: &[0, 1],
        ..base
    };
    assert!(matches!(
        engine.create_solid_from_mesh(&ragged),
        Err(Error::IndexCount { .. })
    ));

    let far = MeshSolidInput {
        vertex_indices: &[0, 1, 4],
        ..base
    };
    assert!(matches!(
        engine.create_solid_from_mesh(&far),
        Err(Error::VertexIndexOutOfRange { index: 4, count: 4 })
    ));

    let bad_normal = MeshSolidInput {
        normal_indices: &[0, 0, 1],
        normals: &UP,
        ..base
    };
    assert!(matches!(
        engine.create_solid_from_mesh(&bad_normal),
        Err(Error::NormalIndexOutOfRange { index: 1, count: 1 })
    ));

    let tags = MeshSolidInput {
        app_data: &[0, 1],
        ..base
    };
    assert!(matches!(
        engine.create_solid_from_mesh(&tags),
        Err(Error::AppDataLength {
            len: 2,
            triangles: 1
        })
    ));

    assert_eq!(engine.solid_count(), 0);
    assert_eq!(engine.face_count(), 0);
}

#[test]
fn destroy_solid_removes_faces() {
    let mut engine = EngineArena::new();
    let solid = quad_solid(&mut engine);
    let faces = engine.solid_faces(solid).unwrap();

    engine.destroy_solid(solid).unwrap();
    assert_eq!(engine.face_count(), 0);
    assert!(engine.face(faces[0]).is_err());
    assert!(matches!(
        engine.destroy_solid(solid),
        Err(Error::NotFound(EngineKey::Solid(_)))
    ));
}

#[test]
fn groups_collect_faces_once() {
    let mut engine = EngineArena::new();
    let solid = quad_solid(&mut engine);
    let faces = engine.solid_faces(solid).unwrap();

    let group = engine.create_group();
    engine.group_add_face(group, faces[0]).unwrap();
    engine.group_add_face(group, faces[1]).unwrap();
    engine.group_add_face(group, faces[0]).unwrap();
    assert_eq!(engine.group(group).unwrap().faces, faces);

    engine.destroy_group(group).unwrap();
    assert!(engine.group_add_face(group, faces[0]).is_err());
    assert_eq!(engine.group_count(), 0);
}

#[test]
fn world_entities_carry_transform_and_style() {
    let mut engine = EngineArena::new();
    let solid = quad_solid(&mut engine);
    let world = engine.create_world();

    let entity = engine.world_add_solid(world, solid).unwrap();
    let style = engine.create_render_style(&RenderStyleDesc::solid_colour([1.0, 0.0, 0.0]));
    engine
        .set_entity_transform(entity, &Matrix4::new_translation(&Vector3::new(5.0, 0.0, 0.0)))
        .unwrap();
    engine.set_entity_style(entity, style).unwrap();

    let data = engine.world_entity(entity).unwrap();
    assert_eq!(data.solid, solid);
    assert_eq!(data.style, Some(style));
    assert_eq!(engine.world(world).unwrap().entities, vec![entity]);

    let face = engine.solid_faces(solid).unwrap()[0];
    let points = engine.placed_face_points(entity, face).unwrap();
    assert_relative_eq!(points[1].x, 6.0);

    let desc = engine.render_style(style).unwrap();
    assert_eq!(desc.back_colour, [1.0, 0.0, 0.0]);
    assert_eq!(desc.edge_colour, None);

    engine.destroy_world_entity(entity).unwrap();
    assert!(engine.world(world).unwrap().entities.is_empty());
    assert_eq!(engine.world_entity_count(), 0);
}

#[test]
fn unknown_handles_are_reported() {
    let mut engine = EngineArena::new();
    let solid = quad_solid(&mut engine);
    let world = engine.create_world();
    let entity = engine.world_add_solid(world, solid).unwrap();

    let style = engine.create_render_style(&RenderStyleDesc::solid_colour([0.5; 3]));
    engine.destroy_render_style(style).unwrap();
    assert!(matches!(
        engine.set_entity_style(entity, style),
        Err(Error::NotFound(EngineKey::Style(_)))
    ));

    engine.destroy_solid(solid).unwrap();
    assert!(engine.world_add_solid(world, solid).is_err());
}
