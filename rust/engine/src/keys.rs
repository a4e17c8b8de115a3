// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Handle types for engine-owned objects.
//!
//! Keys are created by `slotmap::SlotMap` and are generational: a key of a
//! destroyed object never aliases a later one.

use slotmap::new_key_type;

new_key_type! {
    /// Key for a built solid.
    pub struct SolidKey;

    /// Key for one face of a built solid.
    pub struct FaceKey;

    /// Key for an entity group (a set of faces).
    pub struct GroupKey;

    /// Key for a render style.
    pub struct StyleKey;

    /// Key for a world.
    pub struct WorldKey;

    /// Key for a placed instance of a solid inside a world.
    pub struct WorldEntityKey;
}

/// A key that can reference any engine object, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKey {
    Solid(SolidKey),
    Face(FaceKey),
    Group(GroupKey),
    Style(StyleKey),
    World(WorldKey),
    WorldEntity(WorldEntityKey),
}

impl EngineKey {
    /// Returns the object kind name.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineKey::Solid(_) => "solid",
            EngineKey::Face(_) => "face",
            EngineKey::Group(_) => "group",
            EngineKey::Style(_) => "render style",
            EngineKey::World(_) => "world",
            EngineKey::WorldEntity(_) => "world entity",
        }
    }
}

impl std::fmt::Display for EngineKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineKey::Solid(k) => write!(f, "{} {:?}", self.kind(), k),
            EngineKey::Face(k) => write!(f, "{} {:?}", self.kind(), k),
            EngineKey::Group(k) => write!(f, "{} {:?}", self.kind(), k),
            EngineKey::Style(k) => write!(f, "{} {:?}", self.kind(), k),
            EngineKey::World(k) => write!(f, "{} {:?}", self.kind(), k),
            EngineKey::WorldEntity(k) => write!(f, "{} {:?}", self.kind(), k),
        }
    }
}
