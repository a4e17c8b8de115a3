// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Colour resolution for cascaded graphics styles.
//!
//! A style either indexes the global colour table directly or names a
//! material, in which case the material's diffuse colour index is used.
//! Texture materials have no flat colour and fail to resolve.

use cadbridge_core::{CadModel, CascadedAttributes, ColourRef, GraphicsStyle, Material, Rgb};

use crate::error::{Error, Result};

/// Resolves a style to an RGB colour.
pub fn resolve_colour<M: CadModel + ?Sized>(model: &M, style: &GraphicsStyle) -> Result<Rgb> {
    let index = match style.colour {
        ColourRef::Rgb(index) => index,
        ColourRef::Material(material) => match model.material(material)? {
            Material::Texture { .. } => return Err(Error::TexturedMaterial(material)),
            Material::Surface { diffuse, .. } => *diffuse,
        },
    };
    Ok(model.colour(index)?)
}

/// Colour of the node the attributes were computed for.
///
/// Nodes without any inherited style get `fallback` (no error).
pub fn attributes_colour<M: CadModel + ?Sized>(
    model: &M,
    attributes: &CascadedAttributes,
    fallback: Rgb,
) -> Result<Rgb> {
    match &attributes.style {
        Some(style) => resolve_colour(model, style),
        None => Ok(fallback),
    }
}
