// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command line configuration with environment fallbacks.

use std::path::PathBuf;

use cadbridge_core::Rgb;
use cadbridge_geometry::ConversionOptions;
use clap::builder::BoolishValueParser;
use clap::Parser;

/// Converts a JSON scene description into engine solids and prints the
/// assembly path of every placed instance.
#[derive(Parser, Debug, Clone)]
#[command(name = "cadbridge")]
#[command(about = "Convert a CAD scene description into placed engine solids", long_about = None)]
#[command(version)]
pub struct CliConfig {
    /// JSON scene description to convert
    #[arg(value_name = "SCENE")]
    pub scene: PathBuf,

    /// Maximum number of nested nodes entered
    #[arg(long, env = "CADBRIDGE_MAX_DEPTH", default_value_t = ConversionOptions::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Skip nodes whose cascaded visibility is off
    #[arg(long, env = "CADBRIDGE_SKIP_HIDDEN", value_parser = BoolishValueParser::new())]
    pub skip_hidden: bool,

    /// Edge colour for render styles, as `R,G,B` with channels in 0..=1
    #[arg(long, value_parser = parse_colour)]
    pub edge_colour: Option<Rgb>,

    /// Skip teardown before exiting
    #[arg(long)]
    pub keep: bool,
}

impl CliConfig {
    pub fn conversion_options(&self) -> ConversionOptions {
        ConversionOptions::default()
            .with_max_depth(self.max_depth)
            .with_skip_hidden(self.skip_hidden)
            .with_edge_colour(self.edge_colour)
    }
}

/// Parses `r,g,b`.
fn parse_colour(value: &str) -> Result<Rgb, String> {
    let channels = value
        .split(',')
        .map(|c| c.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid colour '{value}': {e}"))?;
    match channels.as_slice() {
        &[r, g, b] => Ok(Rgb::new(r, g, b)),
        _ => Err(format!("colour '{value}' needs three channels")),
    }
}
