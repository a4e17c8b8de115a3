// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Graphics data: colour table entries, materials, per-node styles and the
//! cascaded attribute record computed along a scene path.

use serde::{Deserialize, Serialize};

/// An RGB colour with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }
}

/// Entry of the global material table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Material {
    /// Plain surface material; `diffuse` indexes the global colour table.
    Surface {
        diffuse: u32,
        #[serde(default)]
        specular: Option<u32>,
        #[serde(default)]
        shininess: f64,
    },
    /// Texture-backed material. Never resolved to a flat colour.
    Texture { image: String },
}

impl Material {
    #[inline]
    pub fn is_texture(&self) -> bool {
        matches!(self, Material::Texture { .. })
    }
}

/// What a graphics style's colour slot refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum ColourRef {
    /// Index into the global colour table.
    Rgb(u32),
    /// Index into the global material table.
    Material(u32),
}

/// A resolved graphics style: colour reference plus transparency (0 = opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphicsStyle {
    pub colour: ColourRef,
    #[serde(default)]
    pub transparency: u8,
}

impl GraphicsStyle {
    pub fn rgb(index: u32) -> Self {
        Self {
            colour: ColourRef::Rgb(index),
            transparency: 0,
        }
    }

    pub fn material(index: u32) -> Self {
        Self {
            colour: ColourRef::Material(index),
            transparency: 0,
        }
    }
}

/// Graphics data attached to a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeGraphics {
    /// The node's own style, if it overrides the inherited one.
    #[serde(default)]
    pub style: Option<GraphicsStyle>,
    #[serde(default = "default_show")]
    pub show: bool,
    /// When set, this node's resolved style is imposed on every descendant,
    /// whatever they declare themselves.
    #[serde(default)]
    pub father_herit_colour: bool,
}

fn default_show() -> bool {
    true
}

impl Default for NodeGraphics {
    fn default() -> Self {
        Self {
            style: None,
            show: true,
            father_herit_colour: false,
        }
    }
}

impl NodeGraphics {
    pub fn with_style(style: GraphicsStyle) -> Self {
        Self {
            style: Some(style),
            ..Self::default()
        }
    }
}

/// Attributes resolved for one level of a scene path.
///
/// A record only depends on its parent record and the node's own graphics,
/// so a traversal keeps them on a stack that grows and shrinks with depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadedAttributes {
    pub style: Option<GraphicsStyle>,
    pub show: bool,
    colour_locked: bool,
}

impl CascadedAttributes {
    /// Attributes above the model roots: no style, visible.
    pub fn root() -> Self {
        Self {
            style: None,
            show: true,
            colour_locked: false,
        }
    }

    /// Computes the attributes of a child node from this (parent) record.
    pub fn push(&self, node: Option<&NodeGraphics>) -> Self {
        let Some(graphics) = node else {
            return *self;
        };

        let (style, colour_locked) = if self.colour_locked {
            (self.style, true)
        } else {
            (
                graphics.style.or(self.style),
                graphics.father_herit_colour,
            )
        };

        Self {
            style,
            show: self.show && graphics.show,
            colour_locked,
        }
    }

    /// Returns `true` if an ancestor imposes its colour on this subtree.
    #[inline]
    pub fn is_colour_locked(&self) -> bool {
        self.colour_locked
    }
}

impl Default for CascadedAttributes {
    fn default() -> Self {
        Self::root()
    }
}
