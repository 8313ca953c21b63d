// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag-source rendering peer.

use alloc::boxed::Box;

use trellis_component::{
    ClientContext, ComponentId, ComponentKind, HostCtx, PeerId, PeerRegistry, RenderPeer,
};
use trellis_pointer::{Delivery, PointerEvent, PointerEventKind, Subscription};
use trellis_scene::{FillImage, NodeId, OpacitySupport, PositionMode, Visual};

use crate::options::DragSourceOptions;

/// Component kind rendered by [`DragSourcePeer`].
pub const DRAG_SOURCE_KIND: ComponentKind = ComponentKind("DragSource");

/// Renders a component whose content can be "picked up" with the pointer.
///
/// While idle the peer is a plain container around the component's first
/// child, with one press listener on it. A press suppresses the default
/// action, asks the client whether input is allowed, and then enters the
/// dragging state:
///
/// - a viewport-sized overlay node is stacked above everything at
///   [`overlay_z`](DragSourceOptions::overlay_z) and given a transparent
///   image fill so it shields embedded content from the gesture,
/// - a clone of the source subtree floats inside the overlay at the
///   source's screen position, faded per the host's
///   [`OpacitySupport`],
/// - move and release listeners are registered on the stage in the capture
///   phase, so the rest of the gesture arrives regardless of what is under
///   the pointer.
///
/// Release tears all of that down again. The ghost never follows the
/// pointer; it marks where the drag began.
#[derive(Debug)]
pub struct DragSourcePeer {
    options: DragSourceOptions,
    source: Option<NodeId>,
    child: Option<ComponentId>,
    down_sub: Option<Subscription>,
    move_sub: Option<Subscription>,
    up_sub: Option<Subscription>,
    overlay: Option<NodeId>,
    ghost: Option<NodeId>,
}

impl Default for DragSourcePeer {
    fn default() -> Self {
        Self::new()
    }
}

impl DragSourcePeer {
    /// Create a peer with [`DragSourceOptions::default`].
    pub fn new() -> Self {
        Self::with_options(DragSourceOptions::default())
    }

    /// Create a peer with explicit options.
    pub fn with_options(options: DragSourceOptions) -> Self {
        Self {
            options,
            source: None,
            child: None,
            down_sub: None,
            move_sub: None,
            up_sub: None,
            overlay: None,
            ghost: None,
        }
    }

    /// The peer's configuration.
    pub fn options(&self) -> &DragSourceOptions {
        &self.options
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.overlay.is_some()
    }

    fn start_drag(&mut self, ctx: &mut HostCtx<'_>, peer: PeerId) {
        // Any drag already in progress is stopped before building state.
        self.stop_drag(ctx);
        let Some(source) = self.source else {
            return;
        };
        let Some(origin) = ctx.scene.screen_bounds(source) else {
            return;
        };
        let stage = ctx.scene.stage();

        let overlay = ctx.scene.create_node(Visual {
            size: Some(ctx.scene.viewport()),
            z_index: self.options.overlay_z,
            position: PositionMode::Absolute,
            fill: Some(FillImage::new(self.options.fill_url(ctx.client))),
            ..Visual::default()
        });

        let Some(ghost) = ctx.scene.clone_subtree(source) else {
            ctx.scene.remove_subtree(overlay);
            return;
        };
        ctx.scene.set_position(ghost, PositionMode::Absolute);
        ctx.scene.set_offset(ghost, origin.origin());
        match ctx.env.opacity {
            OpacitySupport::Native => {
                ctx.scene.set_opacity(ghost, self.options.ghost_opacity);
            }
            OpacitySupport::AlphaFilter => {
                ctx.scene
                    .set_alpha_filter(ghost, Some(self.options.ghost_alpha_percent()));
            }
        }

        ctx.scene.append_child(overlay, ghost);
        ctx.scene.append_child(stage, overlay);

        self.move_sub = Some(ctx.listeners.add(stage, PointerEventKind::Move, true, peer));
        self.up_sub = Some(ctx.listeners.add(stage, PointerEventKind::Up, true, peer));
        self.overlay = Some(overlay);
        self.ghost = Some(ghost);
        log::debug!("drag started from {source:?}: ghost {ghost:?} on overlay {overlay:?}");
    }

    fn stop_drag(&mut self, ctx: &mut HostCtx<'_>) {
        let was_dragging = self.overlay.is_some();
        if let Some(sub) = self.move_sub.take() {
            ctx.listeners.cancel(sub);
        }
        if let Some(sub) = self.up_sub.take() {
            ctx.listeners.cancel(sub);
        }
        if let Some(overlay) = self.overlay.take() {
            // Tolerates an overlay something else already removed.
            ctx.scene.remove_subtree(overlay);
        }
        self.ghost = None;
        if was_dragging {
            log::debug!("drag stopped");
        }
    }
}

impl RenderPeer for DragSourcePeer {
    fn mount(
        &mut self,
        ctx: &mut HostCtx<'_>,
        peer: PeerId,
        component: ComponentId,
        container: NodeId,
    ) {
        let visual = match ctx.components.frame(component) {
            Some(frame) => Visual {
                offset: frame.origin(),
                size: Some(frame.size()),
                ..Visual::default()
            },
            None => Visual::default(),
        };
        let source = ctx.scene.create_node(visual);
        // Only the first component child is rendered; a drag source wraps
        // exactly one piece of content.
        if let Some(child) = ctx.components.first_child(component) {
            ctx.render_child_add(child, source);
            self.child = Some(child);
        }
        self.down_sub = Some(ctx.listeners.add(source, PointerEventKind::Down, false, peer));
        ctx.scene.append_child(container, source);
        self.source = Some(source);
    }

    fn update(&mut self, ctx: &mut HostCtx<'_>, peer: PeerId, component: ComponentId) {
        // Full rebuild: drop the subtree and mount again into the same
        // container.
        let container = self.source.and_then(|n| ctx.scene.parent(n));
        self.dispose(ctx, peer, component);
        if let Some(container) = container {
            self.mount(ctx, peer, component, container);
        }
    }

    fn dispose(&mut self, ctx: &mut HostCtx<'_>, _peer: PeerId, _component: ComponentId) {
        self.stop_drag(ctx);
        if let Some(sub) = self.down_sub.take() {
            ctx.listeners.cancel(sub);
        }
        if let Some(child) = self.child.take() {
            ctx.render_child_dispose(child);
        }
        if let Some(source) = self.source.take() {
            ctx.listeners.remove_all(source);
            ctx.scene.remove_subtree(source);
        }
    }

    fn pointer_event(
        &mut self,
        ctx: &mut HostCtx<'_>,
        peer: PeerId,
        component: ComponentId,
        event: &mut PointerEvent<NodeId>,
        _delivery: &Delivery<NodeId, PeerId>,
    ) {
        match event.kind {
            PointerEventKind::Down => {
                // The default action is suppressed even when the input gate
                // rejects the press below.
                event.prevent_default();
                if !ctx.client.verify_input(ctx.components, component) {
                    return;
                }
                self.start_drag(ctx, peer);
            }
            PointerEventKind::Move => {
                // The ghost keeps its press-time placement; move deliveries
                // update nothing.
            }
            PointerEventKind::Up => {
                self.stop_drag(ctx);
            }
        }
    }

    fn root(&self) -> Option<NodeId> {
        self.source
    }
}

/// Register [`DragSourcePeer`] for [`DRAG_SOURCE_KIND`].
pub fn register_drag_source(registry: &mut PeerRegistry) {
    registry.register(DRAG_SOURCE_KIND, || Box::new(DragSourcePeer::new()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_peer_is_idle() {
        let peer = DragSourcePeer::new();
        assert!(!peer.is_dragging());
        assert_eq!(peer.root(), None);
        assert_eq!(peer.options().ghost_opacity, 0.2);
    }

    #[test]
    fn with_options_keeps_the_overrides() {
        let peer = DragSourcePeer::with_options(DragSourceOptions {
            ghost_opacity: 0.5,
            ..DragSourceOptions::default()
        });
        assert_eq!(peer.options().ghost_opacity, 0.5);
        assert_eq!(peer.options().overlay_z, 32_767);
    }

    #[test]
    fn registration_covers_the_kind() {
        let mut registry = PeerRegistry::new();
        register_drag_source(&mut registry);
        assert!(registry.is_registered(DRAG_SOURCE_KIND));
        assert!(registry.instantiate(DRAG_SOURCE_KIND).is_some());
    }
}
