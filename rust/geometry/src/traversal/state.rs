// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute and path stacks of a running traversal.

use std::ops::{Deref, DerefMut};

use cadbridge_core::{CascadedAttributes, NodeGraphics, NodeKey};

use crate::bridge::AssemblyPath;

#[derive(Debug)]
pub(crate) struct TraversalState {
    attributes: Vec<CascadedAttributes>,
    path: AssemblyPath,
}

impl TraversalState {
    pub(crate) fn new() -> Self {
        Self {
            attributes: vec![CascadedAttributes::root()],
            path: AssemblyPath::new(),
        }
    }

    /// Attributes of the innermost node entered.
    pub(crate) fn current(&self) -> &CascadedAttributes {
        // The root record is never popped.
        &self.attributes[self.attributes.len() - 1]
    }

    pub(crate) fn path(&self) -> &AssemblyPath {
        &self.path
    }

    pub(crate) fn depth(&self) -> usize {
        self.attributes.len() - 1
    }

    /// Enters a node: pushes its cascaded attributes until the frame drops.
    pub(crate) fn enter(&mut self, graphics: Option<&NodeGraphics>) -> Frame<'_> {
        let attributes = self.current().push(graphics);
        self.attributes.push(attributes);
        Frame {
            state: self,
            on_path: false,
        }
    }
}

/// Scope of one visited node.
///
/// Dropping the frame restores both stacks to what they were when the node
/// was entered.
pub(crate) struct Frame<'s> {
    state: &'s mut TraversalState,
    on_path: bool,
}

impl Frame<'_> {
    /// Records the node on the assembly path for the rest of its scope.
    pub(crate) fn push_path(&mut self, key: NodeKey) {
        if !self.on_path {
            self.state.path.push(key);
            self.on_path = true;
        }
    }
}

impl Deref for Frame<'_> {
    type Target = TraversalState;

    fn deref(&self) -> &TraversalState {
        self.state
    }
}

impl DerefMut for Frame<'_> {
    fn deref_mut(&mut self) -> &mut TraversalState {
        self.state
    }
}

impl Drop for Frame<'_> {
    fn drop(&mut self) {
        if self.on_path {
            self.state.path.pop();
        }
        self.state.attributes.pop();
    }
}
