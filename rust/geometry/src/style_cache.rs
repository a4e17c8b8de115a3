// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Render style cache keyed by quantized colour.

use cadbridge_core::Rgb;
use cadbridge_engine::{GeometryEngine, RenderStyleDesc, StyleKey};
use rustc_hash::FxHashMap;

/// An RGB colour quantized to 8 bits per channel, packed as `r | g << 8 | b << 16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColourKey(pub u32);

impl ColourKey {
    #[inline]
    fn quantize(channel: f64) -> u32 {
        // `as` saturates: negatives and NaN map to 0
        ((channel * 255.0 + 0.5) as u32).min(255)
    }

    pub fn from_rgb(colour: Rgb) -> Self {
        let r = Self::quantize(colour.r);
        let g = Self::quantize(colour.g);
        let b = Self::quantize(colour.b);
        Self(r + (g << 8) + (b << 16))
    }

    pub fn channels(self) -> [u8; 3] {
        [
            (self.0 & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            ((self.0 >> 16) & 0xFF) as u8,
        ]
    }

    /// Channels back in `[0, 1]`.
    pub fn to_array(self) -> [f64; 3] {
        self.channels().map(|c| f64::from(c) / 255.0)
    }
}

impl std::fmt::Display for ColourKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b] = self.channels();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

/// Colour → render style memo.
#[derive(Debug, Default)]
pub struct StyleCache {
    styles: FxHashMap<ColourKey, StyleKey>,
}

impl StyleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the style for a colour, creating it on first use.
    ///
    /// Created styles are opaque, use the colour on both sides and take the
    /// given edge colour.
    pub fn get_or_create<E: GeometryEngine + ?Sized>(
        &mut self,
        engine: &mut E,
        colour: Rgb,
        edge_colour: Option<Rgb>,
    ) -> StyleKey {
        let key = ColourKey::from_rgb(colour);
        *self.styles.entry(key).or_insert_with(|| {
            let rgb = key.to_array();
            engine.create_render_style(&RenderStyleDesc {
                colour: rgb,
                back_colour: rgb,
                transparency: 0.0,
                edge_colour: edge_colour.map(Rgb::to_array),
            })
        })
    }

    pub fn get(&self, colour: Rgb) -> Option<StyleKey> {
        self.styles.get(&ColourKey::from_rgb(colour)).copied()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColourKey, StyleKey)> + '_ {
        self.styles.iter().map(|(&k, &v)| (k, v))
    }

    /// Empties the cache, returning the styles it held.
    pub fn drain(&mut self) -> Vec<StyleKey> {
        self.styles.drain().map(|(_, style)| style).collect()
    }
}
