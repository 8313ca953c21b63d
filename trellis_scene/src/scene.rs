// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene container: structure operations, measurement, and hit testing.

use alloc::vec;
use alloc::vec::Vec;
use kurbo::{Point, Rect, Size};

use crate::types::{FillImage, NodeFlags, NodeId, PositionMode, Visual};

#[derive(Clone, Debug)]
struct Node {
    visual: Visual,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Result of [`Scene::hit_test`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Hit {
    /// The node that won the hit.
    pub node: NodeId,
    /// `true` when the winner hosts embedded content that swallows the
    /// event, so it must not be routed to application listeners.
    pub sunk: bool,
}

/// A retained tree of visual nodes rooted at the stage.
///
/// The stage is created by [`Scene::new`] and lives as long as the scene.
/// All other nodes are created detached and spliced in with
/// [`Scene::append_child`]. Structure operations on stale [`NodeId`]s are
/// no-ops that report `false` (or `None`), never errors.
#[derive(Clone, Debug)]
pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<u32>,
    stage: NodeId,
}

impl Scene {
    /// Create a scene whose stage has the given viewport size.
    pub fn new(viewport: Size) -> Self {
        let mut scene = Self {
            slots: Vec::new(),
            free: Vec::new(),
            stage: NodeId::new(0, 0),
        };
        scene.stage = scene.create_node(Visual {
            size: Some(viewport),
            ..Visual::default()
        });
        scene
    }

    /// The root node. Global listeners attach here; overlays append here.
    pub fn stage(&self) -> NodeId {
        self.stage
    }

    /// The stage size given to [`Scene::new`].
    pub fn viewport(&self) -> Size {
        self.node(self.stage)
            .and_then(|n| n.visual.size)
            .unwrap_or(Size::ZERO)
    }

    /// Number of live nodes, including the stage.
    pub fn node_count(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    /// Whether `id` still refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Create a detached node with the given visual.
    pub fn create_node(&mut self, visual: Visual) -> NodeId {
        let node = Node {
            visual,
            parent: None,
            children: Vec::new(),
        };
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation += 1;
            slot.node = Some(node);
            NodeId::new(idx, slot.generation)
        } else {
            let idx = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
            self.slots.push(Slot {
                generation: 1,
                node: Some(node),
            });
            NodeId::new(idx, 1)
        }
    }

    /// Append `child` as the last child of `parent`, detaching it from any
    /// current parent first.
    ///
    /// Returns `false` without changes when either id is stale, `child` is
    /// the stage, or `parent` lies inside `child`'s subtree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.is_alive(parent) || !self.is_alive(child) || child == self.stage {
            return false;
        }
        // Reparenting under a descendant would loop the tree.
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return false;
            }
            cursor = self.parent(id);
        }
        self.detach(child);
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        true
    }

    /// Remove `node` from its parent's children, keeping it alive.
    ///
    /// Returns `false` when `node` is stale or already detached.
    pub fn detach(&mut self, node: NodeId) -> bool {
        let Some(parent) = self.node(node).and_then(|n| n.parent) else {
            return false;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|&c| c != node);
        }
        if let Some(n) = self.node_mut(node) {
            n.parent = None;
        }
        true
    }

    /// Detach `node` and free it together with all of its descendants.
    ///
    /// Tolerates nodes that were already removed: a stale id returns `false`
    /// with no other effect. The stage cannot be removed.
    pub fn remove_subtree(&mut self, node: NodeId) -> bool {
        if node == self.stage || !self.is_alive(node) {
            return false;
        }
        self.detach(node);
        let mut pending = vec![node];
        while let Some(id) = pending.pop() {
            let Some(n) = self.node_mut(id) else { continue };
            pending.extend(n.children.drain(..));
            self.slots[id.idx()].node = None;
            self.free.push(id.0);
        }
        true
    }

    /// Deep-copy `node` and its descendants, returning the detached copy.
    ///
    /// The copies have fresh identities, so listener registrations keyed by
    /// the original ids never apply to them.
    pub fn clone_subtree(&mut self, node: NodeId) -> Option<NodeId> {
        let (visual, children) = {
            let n = self.node(node)?;
            (n.visual.clone(), n.children.clone())
        };
        let copy = self.create_node(visual);
        for child in children {
            if let Some(child_copy) = self.clone_subtree(child) {
                self.append_child(copy, child_copy);
            }
        }
        Some(copy)
    }

    /// Parent of `node`, or `None` for roots and stale ids.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    /// Children of `node` in document order. Empty for stale ids.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        match self.node(node) {
            Some(n) => &n.children,
            None => &[],
        }
    }

    /// Path from the node's root (normally the stage) down to `node`,
    /// inclusive. Empty for stale ids.
    pub fn path_from_root(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        if !self.is_alive(node) {
            return path;
        }
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            path.push(id);
            cursor = self.parent(id);
        }
        path.reverse();
        path
    }

    /// The node's visual, or `None` for stale ids.
    pub fn visual(&self, node: NodeId) -> Option<&Visual> {
        self.node(node).map(|n| &n.visual)
    }

    /// Set the offset relative to the parent origin.
    pub fn set_offset(&mut self, node: NodeId, offset: Point) -> bool {
        self.with_visual(node, |v| v.offset = offset)
    }

    /// Set or clear the explicit size.
    pub fn set_size(&mut self, node: NodeId, size: Option<Size>) -> bool {
        self.with_visual(node, |v| v.size = size)
    }

    /// Set the stacking order within the parent.
    pub fn set_z_index(&mut self, node: NodeId, z_index: i32) -> bool {
        self.with_visual(node, |v| v.z_index = z_index)
    }

    /// Set flow or out-of-flow placement.
    pub fn set_position(&mut self, node: NodeId, position: PositionMode) -> bool {
        self.with_visual(node, |v| v.position = position)
    }

    /// Set the native opacity.
    pub fn set_opacity(&mut self, node: NodeId, opacity: f64) -> bool {
        self.with_visual(node, |v| v.opacity = opacity)
    }

    /// Set or clear the legacy percentage opacity filter.
    pub fn set_alpha_filter(&mut self, node: NodeId, percent: Option<u8>) -> bool {
        self.with_visual(node, |v| v.alpha_filter = percent)
    }

    /// Set or clear the fill image.
    pub fn set_fill(&mut self, node: NodeId, fill: Option<FillImage>) -> bool {
        self.with_visual(node, |v| v.fill = fill)
    }

    /// Replace the node flags.
    pub fn set_flags(&mut self, node: NodeId, flags: NodeFlags) -> bool {
        self.with_visual(node, |v| v.flags = flags)
    }

    /// The opacity the node presents, whichever mechanism carries it.
    ///
    /// The legacy filter takes precedence when set, mirroring how a
    /// filter-only environment would ignore the native value.
    pub fn effective_opacity(&self, node: NodeId) -> Option<f64> {
        let visual = self.visual(node)?;
        Some(match visual.alpha_filter {
            Some(percent) => f64::from(percent) / 100.0,
            None => visual.opacity,
        })
    }

    /// World-space origin of `node`: the sum of offsets along its root path.
    pub fn world_origin(&self, node: NodeId) -> Option<Point> {
        let mut origin = self.visual(node)?.offset;
        let mut cursor = self.parent(node);
        while let Some(id) = cursor {
            if let Some(v) = self.visual(id) {
                origin += v.offset.to_vec2();
            }
            cursor = self.parent(id);
        }
        Some(origin)
    }

    /// World-space bounds of `node`.
    ///
    /// A sized node spans its own rect. A size-less node shrink-wraps its
    /// in-flow children; out-of-flow children do not contribute. A size-less
    /// node with no contributing children has zero-sized bounds at its origin.
    pub fn screen_bounds(&self, node: NodeId) -> Option<Rect> {
        let origin = self.world_origin(node)?;
        self.bounds_at(node, origin)
    }

    fn bounds_at(&self, node: NodeId, origin: Point) -> Option<Rect> {
        let n = self.node(node)?;
        if let Some(size) = n.visual.size {
            return Some(Rect::from_origin_size(origin, size));
        }
        let mut acc: Option<Rect> = None;
        for &child in &n.children {
            let Some(v) = self.visual(child) else { continue };
            if v.position == PositionMode::Absolute {
                continue;
            }
            let child_origin = origin + v.offset.to_vec2();
            if let Some(r) = self.bounds_at(child, child_origin) {
                acc = Some(match acc {
                    Some(a) => a.union(r),
                    None => r,
                });
            }
        }
        Some(acc.unwrap_or_else(|| Rect::from_origin_size(origin, Size::ZERO)))
    }

    /// Topmost node under `point`, honoring stacking and input sinking.
    ///
    /// Stacking follows document order refined by `z_index`: a candidate is
    /// compared by the `(z_index, sibling index)` pairs along its root path,
    /// so higher z wins, later siblings break ties, and children stack above
    /// their parent. A node can win only when it is visible, pickable, and
    /// sized to contain the point.
    ///
    /// Input sinks win greedily: a sink under the point is shielded only by
    /// a *painted* node (one with a fill) stacked above it. When a sink wins,
    /// the hit is reported with [`Hit::sunk`] set and the event must not be
    /// routed.
    pub fn hit_test(&self, point: Point) -> Option<Hit> {
        let mut cursor = HitCursor::default();
        let mut key = Vec::new();
        self.hit_walk(self.stage, Point::ZERO, point, &mut key, &mut cursor);

        if let Some((sink_key, sink)) = &cursor.best_sink {
            let shielded = cursor
                .best_painted
                .as_ref()
                .is_some_and(|painted_key| painted_key > sink_key);
            if !shielded {
                return Some(Hit {
                    node: *sink,
                    sunk: true,
                });
            }
        }
        cursor.best.map(|(_, node)| Hit { node, sunk: false })
    }

    fn hit_walk(
        &self,
        id: NodeId,
        parent_origin: Point,
        point: Point,
        key: &mut Vec<(i32, u32)>,
        cursor: &mut HitCursor,
    ) {
        let Some(node) = self.node(id) else { return };
        if !node.visual.flags.contains(NodeFlags::VISIBLE) {
            return;
        }
        let origin = parent_origin + node.visual.offset.to_vec2();
        if let Some(size) = node.visual.size {
            if Rect::from_origin_size(origin, size).contains(point) {
                if node.visual.fill.is_some() {
                    cursor.note_painted(key);
                }
                if node.visual.flags.contains(NodeFlags::INPUT_SINK) {
                    cursor.note_sink(key, id);
                } else if node.visual.flags.contains(NodeFlags::PICKABLE) {
                    cursor.note_target(key, id);
                }
            }
        }
        for (index, &child) in node.children.iter().enumerate() {
            let Some(v) = self.visual(child) else { continue };
            key.push((v.z_index, u32::try_from(index).unwrap_or(u32::MAX)));
            self.hit_walk(child, origin, point, key, cursor);
            key.pop();
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.node.as_ref()
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.node.as_mut()
    }

    fn with_visual(&mut self, id: NodeId, f: impl FnOnce(&mut Visual)) -> bool {
        match self.node_mut(id) {
            Some(n) => {
                f(&mut n.visual);
                true
            }
            None => false,
        }
    }
}

/// Running maxima for a hit-test walk, keyed by stacking order.
#[derive(Default)]
struct HitCursor {
    best: Option<(Vec<(i32, u32)>, NodeId)>,
    best_sink: Option<(Vec<(i32, u32)>, NodeId)>,
    best_painted: Option<Vec<(i32, u32)>>,
}

impl HitCursor {
    fn note_target(&mut self, key: &[(i32, u32)], id: NodeId) {
        if self.best.as_ref().is_none_or(|(k, _)| key > k.as_slice()) {
            self.best = Some((key.to_vec(), id));
        }
    }

    fn note_sink(&mut self, key: &[(i32, u32)], id: NodeId) {
        if self
            .best_sink
            .as_ref()
            .is_none_or(|(k, _)| key > k.as_slice())
        {
            self.best_sink = Some((key.to_vec(), id));
        }
    }

    fn note_painted(&mut self, key: &[(i32, u32)]) {
        if self
            .best_painted
            .as_ref()
            .is_none_or(|k| key > k.as_slice())
        {
            self.best_painted = Some(key.to_vec());
        }
    }
}
