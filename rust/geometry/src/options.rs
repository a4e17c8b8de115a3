// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion settings.

use cadbridge_core::Rgb;

/// Options controlling one scene conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionOptions {
    /// Colour used when a node has no style or its colour cannot be resolved.
    pub default_colour: Rgb,
    /// Skip nodes whose cascaded visibility is off.
    pub skip_hidden: bool,
    /// Maximum number of nested nodes entered; deeper branches are abandoned.
    pub max_depth: usize,
    /// Edge colour for created render styles; `None` leaves edges undrawn.
    pub edge_colour: Option<Rgb>,
}

impl ConversionOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 100;

    pub fn with_default_colour(mut self, colour: Rgb) -> Self {
        self.default_colour = colour;
        self
    }

    pub fn with_skip_hidden(mut self, skip_hidden: bool) -> Self {
        self.skip_hidden = skip_hidden;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_edge_colour(mut self, colour: Option<Rgb>) -> Self {
        self.edge_colour = colour;
        self
    }
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            default_colour: Rgb::new(0.75, 0.75, 0.75),
            skip_hidden: false,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            edge_colour: None,
        }
    }
}
