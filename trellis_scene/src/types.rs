// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: node identifiers, flags, and per-node visuals.

use alloc::string::String;
use kurbo::{Point, Size};

/// Identifier for a node in the scene.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// ### Liveness
///
/// Use [`Scene::is_alive`](crate::Scene::is_alive) to check whether a `NodeId` still refers to a
/// live node. Stale `NodeId`s never alias a different live node because the generation must match.
///
/// ### Notes
///
/// - The generation increments on slot reuse and never decreases.
/// - `u32` is ample for practical lifetimes; behavior on generation overflow is unspecified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility, picking, and input sinking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible (participates in hit testing together with its subtree).
        const VISIBLE = 0b0000_0001;
        /// Node is pickable (can itself be the result of a hit test).
        const PICKABLE = 0b0000_0010;
        /// Node hosts embedded content that swallows pointer input.
        ///
        /// A hit on a sink is reported as [`Hit::sunk`](crate::Hit::sunk) unless a
        /// painted node is stacked above it. See the crate docs for the shielding rule.
        const INPUT_SINK = 0b0000_0100;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// How a node's offset relates to the surrounding content flow.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PositionMode {
    /// In-flow: the node contributes to the shrink-wrapped bounds of a
    /// size-less parent.
    #[default]
    Flow,
    /// Out-of-flow: positioned against the parent origin without contributing
    /// to the parent's shrink-wrapped bounds. Overlays and drag ghosts use this.
    Absolute,
}

/// A fill image resolved to a concrete resource URL.
///
/// The scene stores the URL verbatim; resolution from a logical resource name
/// happens upstream. A fill marks the node as painted for hit testing even
/// when the image itself is fully transparent.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FillImage {
    /// Resolved resource URL of the image.
    pub url: String,
}

impl FillImage {
    /// Create a fill from a resolved URL.
    pub const fn new(url: String) -> Self {
        Self { url }
    }
}

/// Which opacity mechanism the presentation environment supports.
///
/// Both variants express the same visual intent; they differ only in which
/// [`Visual`] field carries the value. [`Scene::effective_opacity`](crate::Scene::effective_opacity)
/// folds either mechanism back into one number.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum OpacitySupport {
    /// The environment honors [`Visual::opacity`] directly.
    #[default]
    Native,
    /// The environment needs the legacy percentage filter in
    /// [`Visual::alpha_filter`]; [`Visual::opacity`] is ignored there.
    AlphaFilter,
}

/// Per-node visual data.
#[derive(Clone, Debug, PartialEq)]
pub struct Visual {
    /// Offset of the node origin relative to the parent origin.
    pub offset: Point,
    /// Explicit size. `None` shrink-wraps the in-flow children.
    pub size: Option<Size>,
    /// Z-order within the parent. Higher stacks on top; later siblings win ties.
    pub z_index: i32,
    /// Flow or out-of-flow placement.
    pub position: PositionMode,
    /// Native opacity in `0.0..=1.0`.
    pub opacity: f64,
    /// Legacy opacity as a percentage in `0..=100`, for environments without
    /// native opacity. Takes precedence over [`Self::opacity`] when set.
    pub alpha_filter: Option<u8>,
    /// Optional fill image. A filled node is painted across its whole rect.
    pub fill: Option<FillImage>,
    /// Visibility, picking, and sink flags.
    pub flags: NodeFlags,
}

impl Default for Visual {
    fn default() -> Self {
        Self {
            offset: Point::ZERO,
            size: None,
            z_index: 0,
            position: PositionMode::Flow,
            opacity: 1.0,
            alpha_filter: None,
            fill: None,
            flags: NodeFlags::default(),
        }
    }
}
