// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solid construction from indexed triangle meshes.

use nalgebra::{Point3, Vector3};

use crate::arena::{EngineArena, FaceData, SolidData};
use crate::error::{Error, Result};
use crate::keys::SolidKey;

/// Input of the mesh-from-indexed-triangles builder.
///
/// `vertex_indices` and `normal_indices` hold three entries per triangle and
/// index points / normals (not flat array offsets). `normal_indices` may be
/// empty, in which case faces carry zero normals. `app_data` holds one tag per
/// triangle and is copied onto the face built from it.
#[derive(Debug, Clone, Copy)]
pub struct MeshSolidInput<'a> {
    pub vertex_indices: &'a [u32],
    pub coordinates: &'a [f64],
    pub normal_indices: &'a [u32],
    pub normals: &'a [f64],
    pub app_data: &'a [i64],
}

impl MeshSolidInput<'_> {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertex_indices.len() / 3
    }

    fn validate(&self) -> Result<()> {
        if self.vertex_indices.len() % 3 != 0 {
            return Err(Error::IndexCount {
                name: "vertex index array",
                len: self.vertex_indices.len(),
            });
        }
        let triangles = self.triangle_count();
        if triangles == 0 {
            return Err(Error::EmptyMesh);
        }
        if !self.normal_indices.is_empty() && self.normal_indices.len() != self.vertex_indices.len()
        {
            return Err(Error::IndexCount {
                name: "normal index array",
                len: self.normal_indices.len(),
            });
        }
        if self.app_data.len() != triangles {
            return Err(Error::AppDataLength {
                len: self.app_data.len(),
                triangles,
            });
        }

        let point_count = self.coordinates.len() / 3;
        if let Some(&index) = self
            .vertex_indices
            .iter()
            .find(|&&i| i as usize >= point_count)
        {
            return Err(Error::VertexIndexOutOfRange {
                index,
                count: point_count,
            });
        }
        let normal_count = self.normals.len() / 3;
        if let Some(&index) = self
            .normal_indices
            .iter()
            .find(|&&i| i as usize >= normal_count)
        {
            return Err(Error::NormalIndexOutOfRange {
                index,
                count: normal_count,
            });
        }
        Ok(())
    }
}

#[inline]
fn point_at(coordinates: &[f64], index: u32) -> Point3<f64> {
    let i = index as usize * 3;
    Point3::new(coordinates[i], coordinates[i + 1], coordinates[i + 2])
}

#[inline]
fn normal_at(normals: &[f64], index: u32) -> Vector3<f64> {
    let i = index as usize * 3;
    Vector3::new(normals[i], normals[i + 1], normals[i + 2])
}

impl EngineArena {
    /// Builds a solid with one face per non-degenerate triangle.
    ///
    /// Triangles repeating a vertex index are dropped, so a solid may end up
    /// with fewer faces than the input has triangles.
    pub(crate) fn build_mesh_solid(&mut self, input: &MeshSolidInput<'_>) -> Result<SolidKey> {
        input.validate()?;

        let solid = self.solids.insert(SolidData::default());
        let mut faces = Vec::with_capacity(input.triangle_count());

        for (t, corners) in input.vertex_indices.chunks_exact(3).enumerate() {
            let [a, b, c] = [corners[0], corners[1], corners[2]];
            if a == b || b == c || a == c {
                continue;
            }

            let normals = if input.normal_indices.is_empty() {
                [Vector3::zeros(); 3]
            } else {
                let n = &input.normal_indices[t * 3..t * 3 + 3];
                [
                    normal_at(input.normals, n[0]),
                    normal_at(input.normals, n[1]),
                    normal_at(input.normals, n[2]),
                ]
            };

            faces.push(self.faces.insert(FaceData {
                solid,
                points: [
                    point_at(input.coordinates, a),
                    point_at(input.coordinates, b),
                    point_at(input.coordinates, c),
                ],
                normals,
                app_data: input.app_data[t],
            }));
        }

        if let Some(data) = self.solids.get_mut(solid) {
            data.faces = faces;
        }
        Ok(solid)
    }
}
