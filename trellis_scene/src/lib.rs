// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_scene --heading-base-level=0

//! Trellis Scene: a Kurbo-native retained visual tree.
//!
//! Trellis Scene is the document layer that rendering peers build into: a
//! hierarchy of visual nodes with offsets, sizes, stacking order, opacity,
//! and fill images, plus the structural operations peers need (append,
//! detach, subtree removal, deep cloning) and point hit testing.
//!
//! - Nodes are addressed by generational [`NodeId`] handles; operations on
//!   stale handles are harmless no-ops.
//! - [`Scene::new`] creates the **stage**, a viewport-sized root node that
//!   plays the role of the document body: global listeners attach to it and
//!   top-layer overlays are appended onto it.
//! - [`Scene::clone_subtree`] deep-copies a node and its descendants with
//!   fresh identities. Event listeners are keyed by `NodeId` in higher
//!   layers, so clones never inherit the original's listeners.
//! - [`Scene::hit_test`] resolves the topmost solid node under a point,
//!   honoring `z_index`, document order, and the input-sink rules below.
//!
//! ## Not a layout engine
//!
//! This crate does not measure or arrange anything. Upstream code decides
//! offsets and sizes and writes them into the tree; [`Scene::screen_bounds`]
//! only folds those decisions into world-space rectangles.
//!
//! ## Input sinks and fills
//!
//! Embedded content (the equivalent of a browser frame) swallows pointer
//! input before the application sees it. Such nodes carry
//! [`NodeFlags::INPUT_SINK`]. A node stacked above a sink shields it only
//! where the node is actually painted, so an overlay that must capture
//! input over embedded content needs a [`FillImage`], even a fully
//! transparent one. [`Hit::sunk`] reports when a sink won.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use trellis_scene::{Scene, Visual};
//!
//! let mut scene = Scene::new(Size::new(800.0, 600.0));
//! let panel = scene.create_node(Visual {
//!     offset: Point::new(100.0, 100.0),
//!     size: Some(Size::new(50.0, 20.0)),
//!     ..Visual::default()
//! });
//! scene.append_child(scene.stage(), panel);
//!
//! assert_eq!(
//!     scene.screen_bounds(panel),
//!     Some(Rect::new(100.0, 100.0, 150.0, 120.0)),
//! );
//! let hit = scene.hit_test(Point::new(110.0, 105.0)).unwrap();
//! assert_eq!(hit.node, panel);
//! assert!(!hit.sunk);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod scene;
mod types;

pub use scene::{Hit, Scene};
pub use types::{FillImage, NodeFlags, NodeId, OpacitySupport, PositionMode, Visual};
