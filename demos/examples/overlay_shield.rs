// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Why the drag overlay carries a transparent fill.
//!
//! Mounts event-swallowing embedded content next to a drag source and shows
//! the same pointer position sinking while idle but routing to the gesture
//! while a drag is in progress.
//!
//! Run:
//! - `cargo run -p trellis_demos --example overlay_shield`

use kurbo::{Point, Rect, Size};
use trellis_component::{
    ComponentId, ComponentKind, EnvProfile, HostCtx, PeerId, PeerRegistry, RenderHost, RenderPeer,
    StaticClient,
};
use trellis_drag_source::{DRAG_SOURCE_KIND, register_drag_source};
use trellis_pointer::PointerEventKind;
use trellis_scene::{NodeFlags, NodeId, Visual};

const EMBED: ComponentKind = ComponentKind("Embed");

/// Embedded content that swallows pointer input over its rect.
#[derive(Debug, Default)]
struct EmbedPeer {
    root: Option<NodeId>,
}

impl RenderPeer for EmbedPeer {
    fn mount(
        &mut self,
        ctx: &mut HostCtx<'_>,
        _peer: PeerId,
        component: ComponentId,
        container: NodeId,
    ) {
        let frame = ctx.components.frame(component).unwrap_or_default();
        let node = ctx.scene.create_node(Visual {
            offset: frame.origin(),
            size: Some(frame.size()),
            flags: NodeFlags::default() | NodeFlags::INPUT_SINK,
            ..Visual::default()
        });
        ctx.scene.append_child(container, node);
        self.root = Some(node);
    }

    fn update(&mut self, _ctx: &mut HostCtx<'_>, _peer: PeerId, _component: ComponentId) {}

    fn dispose(&mut self, ctx: &mut HostCtx<'_>, _peer: PeerId, _component: ComponentId) {
        if let Some(node) = self.root.take() {
            ctx.scene.remove_subtree(node);
        }
    }

    fn root(&self) -> Option<NodeId> {
        self.root
    }
}

fn probe(host: &mut RenderHost, label: &str) {
    let outcome = host.pointer_input(PointerEventKind::Move, Point::new(300.0, 300.0));
    println!(
        "{label}: sunk={} delivered={} target={:?}",
        outcome.sunk, outcome.delivered, outcome.target
    );
}

fn main() {
    let mut registry = PeerRegistry::new();
    register_drag_source(&mut registry);
    registry.register(EMBED, || Box::new(EmbedPeer::default()));
    let mut host = RenderHost::new(
        Size::new(800.0, 600.0),
        registry,
        Box::new(StaticClient::default()),
        EnvProfile::default(),
    );

    let drag = host.components_mut().add(DRAG_SOURCE_KIND);
    host.components_mut()
        .set_frame(drag, Some(Rect::new(100.0, 100.0, 150.0, 120.0)));
    host.render_root(drag).expect("drag source kind is registered");

    let embed = host.components_mut().add(EMBED);
    host.components_mut()
        .set_frame(embed, Some(Rect::new(200.0, 200.0, 500.0, 450.0)));
    host.render_root(embed).expect("embed kind is registered");

    // Idle: the embed swallows the probe.
    probe(&mut host, "idle      ");

    // Dragging: the filled overlay shields the same spot.
    host.pointer_input(PointerEventKind::Down, Point::new(110.0, 105.0));
    probe(&mut host, "dragging  ");

    // Released: the embed swallows again.
    host.pointer_input(PointerEventKind::Up, Point::new(300.0, 300.0));
    probe(&mut host, "released  ");
}
