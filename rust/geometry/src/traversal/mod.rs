// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene traversal - walks the scene graph and places solids in the world
//!
//! Every node entered pushes its cascaded attributes; occurrences (unless
//! reached as a prototype) and part definitions also push themselves onto the
//! assembly path. Both are popped by the [`Frame`] guard when the node is
//! left, whichever way that happens. Errors are reported through the logger
//! and end the failing node only; siblings are still visited.

mod state;


use cadbridge_core::{CadModel, Location, MeshItem, NodeKey, NodeKind, PartDefinition, ProductOccurrence};
use cadbridge_engine::{GeometryEngine, SolidKey};
use nalgebra::Matrix4;

use crate::attributes::attributes_colour;
use crate::bridge::BridgeData;
use crate::error::{Error, Result};
use crate::logging::{BridgeLogger, LogLevel};
use crate::options::ConversionOptions;
use crate::solid::build_solid;
use crate::transform::compose;

pub(crate) use state::{Frame, TraversalState};

/// Counters describing one conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    /// World entities placed.
    pub instances: usize,
    /// Solids built from tessellation.
    pub solids_built: usize,
    /// Leaves placed with an already built solid.
    pub cache_hits: usize,
    /// Leaves whose solid could not be built.
    pub failed_builds: usize,
    /// Nodes not converted: hidden, or items that failed earlier.
    pub skipped: usize,
    pub warnings: usize,
    pub errors: usize,
}

impl ConversionSummary {
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.warnings == 0 && self.errors == 0
    }
}

/// Converts every root of a model.
pub fn convert_model<M, E>(
    model: &M,
    engine: &mut E,
    data: &mut BridgeData,
    options: &ConversionOptions,
    logger: &BridgeLogger,
) -> ConversionSummary
where
    M: CadModel + ?Sized,
    E: GeometryEngine + ?Sized,
{
    let mut converter = SceneConverter::new(model, engine, data, options, logger);
    let mut state = TraversalState::new();
    for &root in model.roots() {
        converter.visit(&mut state, root, &Matrix4::identity(), false);
    }
    converter.finish()
}

/// Converts a single node, of any kind, as if it were a model root.
pub fn convert_node<M, E>(
    model: &M,
    engine: &mut E,
    data: &mut BridgeData,
    options: &ConversionOptions,
    logger: &BridgeLogger,
    node: NodeKey,
) -> ConversionSummary
where
    M: CadModel + ?Sized,
    E: GeometryEngine + ?Sized,
{
    let mut converter = SceneConverter::new(model, engine, data, options, logger);
    let mut state = TraversalState::new();
    converter.visit(&mut state, node, &Matrix4::identity(), false);
    converter.finish()
}

/// One conversion in progress.
pub(crate) struct SceneConverter<'a, M: ?Sized, E: ?Sized> {
    model: &'a M,
    engine: &'a mut E,
    data: &'a mut BridgeData,
    options: &'a ConversionOptions,
    logger: &'a BridgeLogger,
    summary: ConversionSummary,
}

impl<'a, M, E> SceneConverter<'a, M, E>
where
    M: CadModel + ?Sized,
    E: GeometryEngine + ?Sized,
{
    pub(crate) fn new(
        model: &'a M,
        engine: &'a mut E,
        data: &'a mut BridgeData,
        options: &'a ConversionOptions,
        logger: &'a BridgeLogger,
    ) -> Self {
        Self {
            model,
            engine,
            data,
            options,
            logger,
            summary: ConversionSummary::default(),
        }
    }

    pub(crate) fn finish(self) -> ConversionSummary {
        let summary = self.summary;
        tracing::info!(
            target: "cadbridge",
            instances = summary.instances,
            solids_built = summary.solids_built,
            cache_hits = summary.cache_hits,
            errors = summary.errors,
            "Scene conversion complete"
        );
        summary
    }

    fn report(&mut self, error: &Error, operation: &str) {
        let level = error.severity();
        match level {
            LogLevel::Warning => self.summary.warnings += 1,
            LogLevel::Error => self.summary.errors += 1,
            LogLevel::Info => {}
        }
        self.logger.failure(error, operation, level);
    }

    /// Composes a location onto `transform`; unsupported locations are
    /// reported and leave the transform unchanged.
    fn compose_location(
        &mut self,
        transform: &Matrix4<f64>,
        location: &Location,
        operation: &str,
    ) -> Matrix4<f64> {
        match compose(transform, location) {
            Ok(composed) => composed,
            Err(err) => {
                self.report(&err, operation);
                *transform
            }
        }
    }

    /// Visits any node. `prototype` marks an occurrence reached through a
    /// prototype or external data link; it is not recorded on the path.
    pub(crate) fn visit(
        &mut self,
        state: &mut TraversalState,
        key: NodeKey,
        transform: &Matrix4<f64>,
        prototype: bool,
    ) {
        if state.depth() >= self.options.max_depth {
            self.report(&Error::DepthLimit(self.options.max_depth), "visit");
            return;
        }

        let model = self.model;
        let node = match model.node(key) {
            Ok(node) => node,
            Err(err) => {
                self.report(&Error::from(err), "visit");
                return;
            }
        };

        let mut frame = state.enter(node.graphics.as_ref());
        if self.options.skip_hidden && !frame.current().show {
            self.summary.skipped += 1;
            return;
        }

        match &node.kind {
            NodeKind::ProductOccurrence(occurrence) => {
                self.visit_occurrence(&mut frame, key, occurrence, transform, prototype)
            }
            NodeKind::PartDefinition(part) => {
                self.visit_part(&mut frame, key, part, transform)
            }
            NodeKind::Set { items } => {
                for &item in items {
                    self.visit(&mut frame, item, transform, false);
                }
            }
            NodeKind::BrepModel(item) | NodeKind::PolyBrepModel(item) => {
                if let Err(err) = self.visit_leaf(&frame, key, item, transform) {
                    self.report(&err, "visit_leaf");
                }
            }
            NodeKind::OtherItem(entity_type) => {
                self.report(
                    &Error::InvalidRepresentationItem(*entity_type),
                    "visit_representation_item",
                );
            }
        }
    }

    fn visit_occurrence(
        &mut self,
        frame: &mut Frame<'_>,
        key: NodeKey,
        occurrence: &ProductOccurrence,
        transform: &Matrix4<f64>,
        prototype: bool,
    ) {
        let local = match &occurrence.location {
            Some(location) => self.compose_location(transform, location, "visit_occurrence"),
            None => *transform,
        };

        if !prototype {
            frame.push_path(key);
        }

        if let Some(target) = occurrence.prototype.or(occurrence.external_data) {
            self.visit(frame, target, &local, true);
        } else {
            for &child in &occurrence.children {
                self.visit(frame, child, &local, false);
            }
        }

        if let Some(part) = occurrence.part {
            self.visit(frame, part, &local, false);
        }
    }

    fn visit_part(
        &mut self,
        frame: &mut Frame<'_>,
        key: NodeKey,
        part: &PartDefinition,
        transform: &Matrix4<f64>,
    ) {
        frame.push_path(key);
        for &item in &part.items {
            self.visit(frame, item, transform, false);
        }
    }

    fn visit_leaf(
        &mut self,
        state: &TraversalState,
        key: NodeKey,
        item: &MeshItem,
        transform: &Matrix4<f64>,
    ) -> Result<()> {
        let transform = match &item.coordinate_system {
            Some(location) => self.compose_location(transform, location, "visit_leaf"),
            None => *transform,
        };

        let Some(solid) = self.solid_for(key, item)? else {
            return Ok(());
        };

        let colour = match attributes_colour(self.model, state.current(), self.options.default_colour)
        {
            Ok(colour) => colour,
            Err(err) => {
                self.report(&err, "resolve_colour");
                self.options.default_colour
            }
        };

        let entity = self.engine.world_add_solid(self.data.world(), solid)?;
        if let Err(err) = self.engine.set_entity_transform(entity, &transform) {
            self.report(&Error::from(err), "set_entity_transform");
        }
        let style = self
            .data
            .styles
            .get_or_create(self.engine, colour, self.options.edge_colour);
        self.engine.set_entity_style(entity, style)?;

        self.data.record_instance(entity, state.path().clone());
        self.summary.instances += 1;
        Ok(())
    }

    /// The solid of a leaf, built on first use.
    ///
    /// `None` for items whose build already failed.
    fn solid_for(&mut self, key: NodeKey, item: &MeshItem) -> Result<Option<SolidKey>> {
        if let Some(solid) = self.data.registry.get(key) {
            self.summary.cache_hits += 1;
            return Ok(Some(solid));
        }
        if self.data.registry.is_failed(key) {
            self.summary.skipped += 1;
            return Ok(None);
        }

        let built = item
            .tessellation
            .as_ref()
            .ok_or(Error::MissingTessellation)
            .and_then(|tess| build_solid(self.engine, tess, self.data.topo_face_count()));

        match built {
            Ok(built) => {
                let solid = built.solid;
                self.data.advance_topo_faces(built.source_face_count());
                self.data.registry.insert(key, built);
                self.summary.solids_built += 1;
                Ok(Some(solid))
            }
            Err(err) => {
                self.data.registry.mark_failed(key);
                self.summary.failed_builds += 1;
                Err(err)
            }
        }
    }
}
