// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solid registry: representation item → built solid, plus face bookkeeping.
//!
//! Items are keyed by node identity, never by geometry content, so two
//! distinct items with identical tessellation each get their own solid.

use cadbridge_core::NodeKey;
use cadbridge_engine::{FaceKey, GroupKey, SolidKey};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::solid::BuiltSolid;

/// Where an engine face came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceProvenance {
    pub solid: SolidKey,
    /// Index of the source face within its tessellation record.
    pub source_face: usize,
}

#[derive(Debug, Default)]
pub struct SolidRegistry {
    solids: FxHashMap<NodeKey, SolidKey>,
    /// Items whose build failed; they are not rebuilt.
    failed: FxHashSet<NodeKey>,
    /// Per-source-face groups of every solid, indexed by source face.
    face_groups: FxHashMap<SolidKey, Vec<GroupKey>>,
    provenance: FxHashMap<FaceKey, FaceProvenance>,
}

impl SolidRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, item: NodeKey) -> Option<SolidKey> {
        self.solids.get(&item).copied()
    }

    #[inline]
    pub fn is_failed(&self, item: NodeKey) -> bool {
        self.failed.contains(&item)
    }

    /// Records a successful build.
    pub fn insert(&mut self, item: NodeKey, built: BuiltSolid) {
        for (face, source_face) in built.provenance {
            self.provenance.insert(
                face,
                FaceProvenance {
                    solid: built.solid,
                    source_face,
                },
            );
        }
        self.face_groups.insert(built.solid, built.groups);
        self.solids.insert(item, built.solid);
    }

    pub fn mark_failed(&mut self, item: NodeKey) {
        self.failed.insert(item);
    }

    pub fn face_groups(&self, solid: SolidKey) -> Option<&[GroupKey]> {
        self.face_groups.get(&solid).map(Vec::as_slice)
    }

    pub fn provenance(&self, face: FaceKey) -> Option<FaceProvenance> {
        self.provenance.get(&face).copied()
    }

    /// The group holding every face built from the same source face.
    pub fn region_for_face(&self, face: FaceKey) -> Option<GroupKey> {
        let provenance = self.provenance(face)?;
        self.face_groups
            .get(&provenance.solid)?
            .get(provenance.source_face)
            .copied()
    }

    /// Built solids, keyed by representation item.
    pub fn solids(&self) -> impl Iterator<Item = (NodeKey, SolidKey)> + '_ {
        self.solids.iter().map(|(&k, &v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.solids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    pub fn group_count(&self) -> usize {
        self.face_groups.values().map(Vec::len).sum()
    }

    /// Forgets every item → solid entry and the failure memo.
    ///
    /// Returns the solids that were registered.
    pub(crate) fn take_solids(&mut self) -> Vec<SolidKey> {
        self.failed.clear();
        self.provenance.clear();
        self.solids.drain().map(|(_, solid)| solid).collect()
    }

    /// Forgets every face group, returning the groups.
    pub(crate) fn take_groups(&mut self) -> Vec<GroupKey> {
        self.provenance.clear();
        self.face_groups
            .drain()
            .flat_map(|(_, groups)| groups)
            .collect()
    }
}
