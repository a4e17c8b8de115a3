// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tessellation decoding: triangles, fans and strips to flat triangle lists.
//!
//! Each face of a [`TessellationRecord`] starts reading the shared index
//! buffer at its `start_triangulated` offset and walks the encodings named by
//! its flag set in a fixed order:
//!
//! | encoding           | size words              | index words per unit |
//! |--------------------|-------------------------|----------------------|
//! | triangle           | `T`                     | 6 per triangle `[n v n v n v]` |
//! | fan / strip        | `F`, then `N` per fan   | `2N` (`[n v]` per point) |
//! | one-normal triangle| `T`                     | 4 per triangle `[n v v v]` |
//! | one-normal fan / strip | `F`, then `N` per fan (high bit masked) | `1 + N` (`[n v v ...]`) |
//!
//! Size words are consumed in that same order across encodings. Textured
//! encodings are rejected, as is any flag bit left over once the supported
//! encodings are stripped. After the last face the read position must sit
//! exactly at the end of the index buffer.

use cadbridge_core::{TessFace, TessFaceFlags, TessellationRecord};

use crate::error::DecodeError;

type Result<T> = std::result::Result<T, DecodeError>;

/// Encodings the decoder understands.
pub const SUPPORTED_FLAGS: TessFaceFlags = TessFaceFlags(
    TessFaceFlags::TRIANGLE.bits()
        | TessFaceFlags::TRIANGLE_FAN.bits()
        | TessFaceFlags::TRIANGLE_STRIPE.bits()
        | TessFaceFlags::TRIANGLE_ONE_NORMAL.bits()
        | TessFaceFlags::TRIANGLE_FAN_ONE_NORMAL.bits()
        | TessFaceFlags::TRIANGLE_STRIPE_ONE_NORMAL.bits(),
);

/// Every textured encoding.
pub const TEXTURED_FLAGS: TessFaceFlags = TessFaceFlags(
    TessFaceFlags::POLYFACE_TEXTURED.bits()
        | TessFaceFlags::TRIANGLE_TEXTURED.bits()
        | TessFaceFlags::TRIANGLE_FAN_TEXTURED.bits()
        | TessFaceFlags::TRIANGLE_STRIPE_TEXTURED.bits()
        | TessFaceFlags::POLYFACE_ONE_NORMAL_TEXTURED.bits()
        | TessFaceFlags::TRIANGLE_ONE_NORMAL_TEXTURED.bits()
        | TessFaceFlags::TRIANGLE_FAN_ONE_NORMAL_TEXTURED.bits()
        | TessFaceFlags::TRIANGLE_STRIPE_ONE_NORMAL_TEXTURED.bits(),
);

/// Flat triangle lists produced by the decoder.
///
/// Indices are the raw words of the index buffer, i.e. offsets into the flat
/// coordinate / normal arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriangleBuffers {
    /// Three vertex offsets per triangle.
    pub vertex_indices: Vec<u32>,
    /// Three normal offsets per triangle.
    pub normal_indices: Vec<u32>,
    /// Index of the source face each triangle was decoded from.
    pub face_tags: Vec<usize>,
}

impl TriangleBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.face_tags.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.face_tags.is_empty()
    }

    #[inline]
    fn push(&mut self, normals: [u32; 3], vertices: [u32; 3], face: usize) {
        self.normal_indices.extend_from_slice(&normals);
        self.vertex_indices.extend_from_slice(&vertices);
        self.face_tags.push(face);
    }

    /// Vertex offsets of triangle `i`.
    pub fn vertices(&self, i: usize) -> Option<[u32; 3]> {
        let v = self.vertex_indices.get(i * 3..i * 3 + 3)?;
        Some([v[0], v[1], v[2]])
    }

    /// Normal offsets of triangle `i`.
    pub fn normals(&self, i: usize) -> Option<[u32; 3]> {
        let n = self.normal_indices.get(i * 3..i * 3 + 3)?;
        Some([n[0], n[1], n[2]])
    }
}

/// Bounds-checked reader over the shared index buffer.
struct IndexCursor<'a> {
    words: &'a [u32],
    position: usize,
    face: usize,
}

impl<'a> IndexCursor<'a> {
    #[inline]
    fn take(&mut self, count: usize) -> Result<&'a [u32]> {
        let end = self
            .position
            .checked_add(count)
            .filter(|&end| end <= self.words.len())
            .ok_or(DecodeError::IndexOverrun {
                face: self.face,
                position: self.position.saturating_add(count),
                len: self.words.len(),
            })?;
        let slice = &self.words[self.position..end];
        self.position = end;
        Ok(slice)
    }
}

/// Reader over one face's size words.
struct SizeReader<'a> {
    sizes: &'a [u32],
    position: usize,
    face: usize,
}

impl SizeReader<'_> {
    #[inline]
    fn next(&mut self) -> Result<usize> {
        let value = self
            .sizes
            .get(self.position)
            .copied()
            .ok_or(DecodeError::SizeOverrun {
                face: self.face,
                position: self.position,
                len: self.sizes.len(),
            })?;
        self.position += 1;
        Ok(value as usize)
    }

    /// Point count of a one-normal fan or strip.
    #[inline]
    fn next_masked(&mut self) -> Result<usize> {
        Ok(self.next()? & TessFaceFlags::NORMAL_MASK as usize)
    }
}

/// Corner order of triangle `step` of a strip, as point offsets from the
/// step's first point.
#[inline]
fn strip_corners(step: usize) -> [usize; 3] {
    if step % 2 == 0 {
        [step, step + 1, step + 2]
    } else {
        [step, step + 2, step + 1]
    }
}

/// Decodes one face, appending its triangles to `out`.
///
/// Returns the read position in the index buffer once the face is done.
/// Faces without size words emit nothing and return their start offset.
pub fn decode_face(
    record: &TessellationRecord,
    face_index: usize,
    out: &mut TriangleBuffers,
) -> std::result::Result<usize, DecodeError> {
    let face: &TessFace = match record.faces.get(face_index) {
        Some(face) => face,
        None => {
            return Err(DecodeError::SizeOverrun {
                face: face_index,
                position: 0,
                len: 0,
            })
        }
    };
    let start = face.start_triangulated as usize;
    if face.sizes_triangulated.is_empty() {
        return Ok(start);
    }

    let flags = face.used_entities;
    let textured = flags.intersection(TEXTURED_FLAGS);
    if !textured.is_empty() {
        return Err(DecodeError::TexturedVariant {
            face: face_index,
            flags: textured,
        });
    }
    let unknown = flags.difference(SUPPORTED_FLAGS);
    if !unknown.is_empty() {
        return Err(DecodeError::UnknownFlags {
            face: face_index,
            flags: unknown,
        });
    }

    let mut cursor = IndexCursor {
        words: &record.triangulated_indexes,
        position: start,
        face: face_index,
    };
    let mut sizes = SizeReader {
        sizes: &face.sizes_triangulated,
        position: 0,
        face: face_index,
    };

    if flags.contains(TessFaceFlags::TRIANGLE) {
        for _ in 0..sizes.next()? {
            let w = cursor.take(6)?;
            out.push([w[0], w[2], w[4]], [w[1], w[3], w[5]], face_index);
        }
    }

    if flags.contains(TessFaceFlags::TRIANGLE_FAN) {
        for _ in 0..sizes.next()? {
            let points = sizes.next()?;
            let w = cursor.take(points.saturating_mul(2))?;
            for i in 1..points.saturating_sub(1) {
                out.push(
                    [w[0], w[2 * i], w[2 * i + 2]],
                    [w[1], w[2 * i + 1], w[2 * i + 3]],
                    face_index,
                );
            }
        }
    }

    if flags.contains(TessFaceFlags::TRIANGLE_STRIPE) {
        for _ in 0..sizes.next()? {
            let points = sizes.next()?;
            let w = cursor.take(points.saturating_mul(2))?;
            for step in 0..points.saturating_sub(2) {
                let [a, b, c] = strip_corners(step);
                out.push(
                    [w[2 * a], w[2 * b], w[2 * c]],
                    [w[2 * a + 1], w[2 * b + 1], w[2 * c + 1]],
                    face_index,
                );
            }
        }
    }

    if flags.contains(TessFaceFlags::TRIANGLE_ONE_NORMAL) {
        for _ in 0..sizes.next()? {
            let w = cursor.take(4)?;
            out.push([w[0]; 3], [w[1], w[2], w[3]], face_index);
        }
    }

    if flags.contains(TessFaceFlags::TRIANGLE_FAN_ONE_NORMAL) {
        for _ in 0..sizes.next()? {
            let points = sizes.next_masked()?;
            let w = cursor.take(points.saturating_add(1))?;
            let (normal, v) = (w[0], &w[1..]);
            for i in 1..points.saturating_sub(1) {
                out.push([normal; 3], [v[0], v[i], v[i + 1]], face_index);
            }
        }
    }

    if flags.contains(TessFaceFlags::TRIANGLE_STRIPE_ONE_NORMAL) {
        for _ in 0..sizes.next()? {
            let points = sizes.next_masked()?;
            let w = cursor.take(points.saturating_add(1))?;
            let (normal, v) = (w[0], &w[1..]);
            for step in 0..points.saturating_sub(2) {
                let [a, b, c] = strip_corners(step);
                out.push([normal; 3], [v[a], v[b], v[c]], face_index);
            }
        }
    }

    Ok(cursor.position)
}

/// Decodes every face of a record.
///
/// On error `out` may hold the triangles of the faces decoded so far.
pub fn decode_tessellation(
    record: &TessellationRecord,
    out: &mut TriangleBuffers,
) -> std::result::Result<(), DecodeError> {
    let last = record.faces.len().saturating_sub(1);
    for (face_index, face) in record.faces.iter().enumerate() {
        if face.sizes_triangulated.is_empty() {
            continue;
        }
        let end = decode_face(record, face_index, out)?;
        if face_index == last && end != record.triangulated_indexes.len() {
            return Err(DecodeError::ConsumptionMismatch {
                consumed: end,
                len: record.triangulated_indexes.len(),
            });
        }
    }
    Ok(())
}
