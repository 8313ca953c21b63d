// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal content peer: one solid node per component.
//!
//! `BlockPeer` is the plain building block hosts use for inert content:
//! it renders the component as a single sized node (from the component's
//! frame) and renders all component children inside it. It registers no
//! listeners of its own.

use alloc::boxed::Box;
use alloc::vec::Vec;

use trellis_scene::{NodeId, Visual};

use crate::component::{ComponentId, ComponentKind};
use crate::host::HostCtx;
use crate::peer::{PeerId, PeerRegistry, RenderPeer};

/// Component kind rendered by [`BlockPeer`].
pub const BLOCK_KIND: ComponentKind = ComponentKind("Block");

/// Renders a component as one solid node sized by its frame.
#[derive(Debug, Default)]
pub struct BlockPeer {
    root: Option<NodeId>,
}

impl RenderPeer for BlockPeer {
    fn mount(
        &mut self,
        ctx: &mut HostCtx<'_>,
        _peer: PeerId,
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
        let node = ctx.scene.create_node(visual);
        ctx.scene.append_child(container, node);
        self.root = Some(node);

        let children: Vec<ComponentId> = ctx.components.children(component).to_vec();
        for child in children {
            ctx.render_child_add(child, node);
        }
    }

    fn update(&mut self, ctx: &mut HostCtx<'_>, peer: PeerId, component: ComponentId) {
        // Full rebuild: drop the subtree and mount again into the same
        // container.
        let container = self.root.and_then(|n| ctx.scene.parent(n));
        self.dispose(ctx, peer, component);
        if let Some(container) = container {
            self.mount(ctx, peer, component, container);
        }
    }

    fn dispose(&mut self, ctx: &mut HostCtx<'_>, _peer: PeerId, component: ComponentId) {
        let children: Vec<ComponentId> = ctx.components.children(component).to_vec();
        for child in children {
            ctx.render_child_dispose(child);
        }
        if let Some(node) = self.root.take() {
            ctx.listeners.remove_all(node);
            ctx.scene.remove_subtree(node);
        }
    }

    fn root(&self) -> Option<NodeId> {
        self.root
    }
}

/// Register [`BlockPeer`] for [`BLOCK_KIND`].
pub fn register_block(registry: &mut PeerRegistry) {
    registry.register(BLOCK_KIND, || Box::new(BlockPeer::default()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{EnvProfile, StaticClient};
    use crate::host::RenderHost;
    use kurbo::{Rect, Size};

    fn host() -> RenderHost {
        let mut registry = PeerRegistry::new();
        register_block(&mut registry);
        RenderHost::new(
            Size::new(800.0, 600.0),
            registry,
            Box::new(StaticClient::default()),
            EnvProfile::default(),
        )
    }

    #[test]
    fn mounts_a_sized_node_from_the_frame() {
        let mut host = host();
        let c = host.components_mut().add(BLOCK_KIND);
        host.components_mut()
            .set_frame(c, Some(Rect::new(100.0, 100.0, 150.0, 120.0)));

        let pid = host.render_root(c).unwrap();
        let root = host.peer_root(pid).unwrap();
        assert_eq!(
            host.scene().screen_bounds(root),
            Some(Rect::new(100.0, 100.0, 150.0, 120.0))
        );
    }

    #[test]
    fn renders_nested_children() {
        let mut host = host();
        let outer = host.components_mut().add(BLOCK_KIND);
        let inner = host.components_mut().add(BLOCK_KIND);
        host.components_mut().append_child(outer, inner);
        host.components_mut()
            .set_frame(outer, Some(Rect::new(10.0, 10.0, 110.0, 60.0)));
        host.components_mut()
            .set_frame(inner, Some(Rect::new(5.0, 5.0, 25.0, 15.0)));

        let pid = host.render_root(outer).unwrap();
        let root = host.peer_root(pid).unwrap();
        let children = host.scene().children(root).to_vec();
        assert_eq!(children.len(), 1);
        assert_eq!(
            host.scene().screen_bounds(children[0]),
            Some(Rect::new(15.0, 15.0, 35.0, 25.0))
        );
        assert_eq!(host.peer_count(), 2);
    }

    #[test]
    fn dispose_releases_the_whole_subtree() {
        let mut host = host();
        let outer = host.components_mut().add(BLOCK_KIND);
        let inner = host.components_mut().add(BLOCK_KIND);
        host.components_mut().append_child(outer, inner);

        let pid = host.render_root(outer).unwrap();
        let root = host.peer_root(pid).unwrap();
        assert_eq!(host.peer_count(), 2);

        assert!(host.dispose_component(outer));
        assert!(!host.scene().is_alive(root));
        assert_eq!(host.peer_count(), 0);
        assert_eq!(host.scene().node_count(), 1);
    }

    #[test]
    fn update_rebuilds_with_fresh_nodes() {
        let mut host = host();
        let c = host.components_mut().add(BLOCK_KIND);
        host.components_mut()
            .set_frame(c, Some(Rect::new(10.0, 10.0, 60.0, 30.0)));
        let pid = host.render_root(c).unwrap();
        let old_root = host.peer_root(pid).unwrap();

        host.components_mut()
            .set_frame(c, Some(Rect::new(20.0, 20.0, 70.0, 40.0)));
        assert!(host.update_component(c));

        let new_root = host.peer_root(pid).unwrap();
        assert_ne!(new_root, old_root);
        assert!(!host.scene().is_alive(old_root));
        assert_eq!(
            host.scene().screen_bounds(new_root),
            Some(Rect::new(20.0, 20.0, 70.0, 40.0))
        );
        assert_eq!(host.scene().parent(new_root), Some(host.scene().stage()));
    }
}
