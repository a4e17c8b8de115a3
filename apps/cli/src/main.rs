// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CadBridge CLI - converts a JSON scene description into engine solids.
//!
//! Prints one line per placed world entity listing the product occurrences
//! on its assembly path, then a conversion summary.

mod config;

use anyhow::{Context, Result};
use cadbridge_core::{CadModel, EntityType, SceneModel};
use cadbridge_engine::{EngineArena, GeometryEngine, WorldEntityKey};
use cadbridge_geometry::{convert_model, BridgeData, BridgeLogger};
use clap::Parser;

use config::CliConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::parse();
    let json = std::fs::read_to_string(&config.scene)
        .with_context(|| format!("failed to read {}", config.scene.display()))?;
    let model = SceneModel::from_json(&json)
        .with_context(|| format!("failed to load {}", config.scene.display()))?;

    tracing::info!(
        scene = %config.scene.display(),
        nodes = model.node_count(),
        roots = model.roots().len(),
        max_depth = config.max_depth,
        skip_hidden = config.skip_hidden,
        "Converting scene"
    );

    let mut engine = EngineArena::new();
    let world = engine.create_world();
    let mut data = BridgeData::new(world);
    let summary = convert_model(
        &model,
        &mut engine,
        &mut data,
        &config.conversion_options(),
        &BridgeLogger::new(),
    );

    for &entity in data.entities() {
        println!("{}", occurrence_path(&model, &data, entity));
    }

    println!(
        "{} instances, {} solids ({} faces), {} styles, {} cache hits, {} skipped, {} warnings, {} errors",
        summary.instances,
        engine.solid_count(),
        engine.face_count(),
        data.styles.len(),
        summary.cache_hits,
        summary.skipped,
        summary.warnings,
        summary.errors
    );

    if !config.keep {
        data.destroy_all(&mut engine)
            .context("failed to release engine objects")?;
    }
    Ok(())
}

/// Names of the product occurrences on an entity's path, each followed by
/// `" | "`.
fn occurrence_path(model: &SceneModel, data: &BridgeData, entity: WorldEntityKey) -> String {
    let Some(path) = data.path(entity) else {
        return String::new();
    };
    path.iter()
        .filter_map(|&key| model.node(key).ok())
        .filter(|node| node.entity_type() == EntityType::ProductOccurrence)
        .map(|node| format!("{} | ", node.name.as_deref().unwrap_or("")))
        .collect()
}
