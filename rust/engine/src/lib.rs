// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # CadBridge Engine
//!
//! A small in-memory geometry engine. Solids are built from indexed triangle
//! meshes (one face per triangle, each face carrying an application tag),
//! faces can be collected into entity groups, and solids are placed into
//! worlds as entities with a 4×4 transform and a render style.
//!
//! The [`GeometryEngine`] trait is the surface a scene converter drives;
//! [`EngineArena`] implements it on top of slot maps.

pub mod arena;
pub mod engine;
pub mod error;
pub mod keys;
pub mod mesh;

pub use arena::{
    EngineArena, FaceData, GroupData, RenderStyleDesc, SolidData, WorldData, WorldEntityData,
};
pub use engine::GeometryEngine;
pub use error::{Error, Result};
pub use keys::{EngineKey, FaceKey, GroupKey, SolidKey, StyleKey, WorldEntityKey, WorldKey};
pub use mesh::MeshSolidInput;

#[cfg(test)]
mod tests;
