// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solid construction from a tessellation record.
//!
//! Triangles are tagged with `tag_offset + source face index` before they are
//! handed to the engine. Once the solid exists its faces are read back and
//! sorted into one entity group per source face; a face whose tag falls
//! outside the record's range means the engine did not preserve the tags,
//! and the whole solid is discarded.

use cadbridge_core::TessellationRecord;
use cadbridge_engine::{FaceKey, GeometryEngine, GroupKey, MeshSolidInput, SolidKey};

use crate::error::{Error, Result};
use crate::tessellation::{decode_tessellation, TriangleBuffers};

/// A solid together with its per-source-face bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltSolid {
    pub solid: SolidKey,
    /// One group per source face, indexed by source face.
    pub groups: Vec<GroupKey>,
    /// Source face of every engine face of the solid.
    pub provenance: Vec<(FaceKey, usize)>,
}

impl BuiltSolid {
    #[inline]
    pub fn source_face_count(&self) -> usize {
        self.groups.len()
    }
}

/// Decodes a tessellation and builds an engine solid from it.
pub fn build_solid<E: GeometryEngine + ?Sized>(
    engine: &mut E,
    tessellation: &TessellationRecord,
    tag_offset: usize,
) -> Result<BuiltSolid> {
    let mut triangles = TriangleBuffers::new();
    decode_tessellation(tessellation, &mut triangles)?;

    // Buffer words are offsets into flat xyz arrays
    let vertex_indices: Vec<u32> = triangles.vertex_indices.iter().map(|i| i / 3).collect();
    let normal_indices: Vec<u32> = if tessellation.normals.is_empty() {
        Vec::new()
    } else {
        triangles.normal_indices.iter().map(|i| i / 3).collect()
    };
    let app_data: Vec<i64> = triangles
        .face_tags
        .iter()
        .map(|&face| (tag_offset + face) as i64)
        .collect();

    let solid = engine.create_solid_from_mesh(&MeshSolidInput {
        vertex_indices: &vertex_indices,
        coordinates: &tessellation.coordinates,
        normal_indices: &normal_indices,
        normals: &tessellation.normals,
        app_data: &app_data,
    })?;

    let face_count = tessellation.face_count();
    let mut groups = Vec::with_capacity(face_count);
    match assign_groups(engine, solid, tag_offset, face_count, &mut groups) {
        Ok(provenance) => Ok(BuiltSolid {
            solid,
            groups,
            provenance,
        }),
        Err(err) => {
            discard(engine, solid, &groups);
            Err(err)
        }
    }
}

fn assign_groups<E: GeometryEngine + ?Sized>(
    engine: &mut E,
    solid: SolidKey,
    tag_offset: usize,
    face_count: usize,
    groups: &mut Vec<GroupKey>,
) -> Result<Vec<(FaceKey, usize)>> {
    for _ in 0..face_count {
        groups.push(engine.create_group());
    }

    let faces = engine.solid_faces(solid)?;
    let mut provenance = Vec::with_capacity(faces.len());
    for face in faces {
        let tag = engine.face_app_data(face)?;
        let source = tag
            .checked_sub(tag_offset as i64)
            .filter(|&local| local >= 0 && (local as usize) < face_count)
            .ok_or(Error::InvalidProvenance {
                tag,
                offset: tag_offset,
                end: tag_offset + face_count,
            })? as usize;
        engine.group_add_face(groups[source], face)?;
        provenance.push((face, source));
    }
    Ok(provenance)
}

/// Releases a partially built solid. Failures are ignored; the handles are
/// dropped either way.
fn discard<E: GeometryEngine + ?Sized>(engine: &mut E, solid: SolidKey, groups: &[GroupKey]) {
    for &group in groups {
        engine.destroy_group(group).ok();
    }
    engine.destroy_solid(solid).ok();
}
