// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `trellis_drag_source` crate.
//!
//! These drive full gestures through a [`RenderHost`]: press, move, and
//! release as pointer input, with assertions on the scene and the listener
//! registry after each step. The standard fixture is a drag source framed
//! at (100, 100)..(150, 120) wrapping a 50x20 block child, on an 800x600
//! stage.

use kurbo::{Point, Rect, Size};
use trellis_component::{
    BLOCK_KIND, ComponentId, ComponentKind, DispatchOutcome, EnvProfile, HostCtx, PeerId,
    PeerRegistry, RenderHost, RenderPeer, StaticClient, register_block,
};
use trellis_drag_source::{
    DRAG_SOURCE_KIND, DragSourceOptions, DragSourcePeer, OVERLAY_Z, register_drag_source,
};
use trellis_pointer::PointerEventKind;
use trellis_scene::{NodeFlags, NodeId, OpacitySupport, Visual};

const EMBED: ComponentKind = ComponentKind("Embed");

/// Renders embedded content that swallows pointer input, like a plugin or
/// a nested browsing context would.
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

fn registry() -> PeerRegistry {
    let mut registry = PeerRegistry::new();
    register_drag_source(&mut registry);
    register_block(&mut registry);
    registry.register(EMBED, || Box::new(EmbedPeer::default()));
    registry
}

fn host_with_env(env: EnvProfile) -> (RenderHost, ComponentId) {
    let mut host = RenderHost::new(
        Size::new(800.0, 600.0),
        registry(),
        Box::new(StaticClient::default()),
        env,
    );
    let drag = host.components_mut().add(DRAG_SOURCE_KIND);
    host.components_mut()
        .set_frame(drag, Some(Rect::new(100.0, 100.0, 150.0, 120.0)));
    let child = host.components_mut().add(BLOCK_KIND);
    host.components_mut()
        .set_frame(child, Some(Rect::new(0.0, 0.0, 50.0, 20.0)));
    host.components_mut().append_child(drag, child);
    host.render_root(drag).unwrap();
    (host, drag)
}

fn drag_host() -> (RenderHost, ComponentId) {
    host_with_env(EnvProfile::default())
}

/// The overlay is the stage child carrying the drag stacking value.
fn overlay_node(host: &RenderHost) -> Option<NodeId> {
    let scene = host.scene();
    scene
        .children(scene.stage())
        .iter()
        .copied()
        .find(|&n| scene.visual(n).is_some_and(|v| v.z_index >= OVERLAY_Z))
}

fn press(host: &mut RenderHost) -> DispatchOutcome {
    host.pointer_input(PointerEventKind::Down, Point::new(110.0, 105.0))
}

fn release(host: &mut RenderHost, at: Point) -> DispatchOutcome {
    host.pointer_input(PointerEventKind::Up, at)
}

#[test]
fn press_floats_a_ghost_under_a_capture_overlay() {
    let (mut host, drag) = drag_host();
    let source = host.peer_root(host.peer_of(drag).unwrap()).unwrap();

    let outcome = press(&mut host);
    // The press lands on the wrapped content and bubbles to the source.
    assert_ne!(outcome.target, Some(source));
    assert!(outcome.default_prevented);
    assert_eq!(outcome.delivered, 1);
    assert!(!outcome.sunk);

    let overlay = overlay_node(&host).expect("press should build an overlay");
    let visual = host.scene().visual(overlay).unwrap();
    assert_eq!(visual.z_index, OVERLAY_Z);
    assert_eq!(visual.size, Some(Size::new(800.0, 600.0)));
    assert_eq!(
        visual.fill.as_ref().map(|f| f.url.as_str()),
        Some("res:/trellis/resource/transparent.png")
    );

    // One ghost inside the overlay, parked at the source's screen position.
    let ghosts = host.scene().children(overlay);
    assert_eq!(ghosts.len(), 1);
    let ghost = ghosts[0];
    assert_eq!(
        host.scene().screen_bounds(ghost),
        Some(Rect::new(100.0, 100.0, 150.0, 120.0))
    );
    assert_eq!(host.scene().effective_opacity(ghost), Some(0.2));
    assert_eq!(host.scene().children(ghost).len(), 1);

    // Gesture listeners sit on the stage while dragging.
    assert_eq!(host.listeners().count_for(host.scene().stage()), 2);
}

#[test]
fn the_ghost_is_a_fresh_clone_and_the_source_stays_put() {
    let (mut host, drag) = drag_host();
    let source = host.peer_root(host.peer_of(drag).unwrap()).unwrap();
    let child = host.scene().children(source)[0];

    press(&mut host);
    let overlay = overlay_node(&host).unwrap();
    let ghost = host.scene().children(overlay)[0];
    let ghost_child = host.scene().children(ghost)[0];

    assert_ne!(ghost, source);
    assert_ne!(ghost_child, child);
    assert!(host.scene().is_alive(source));
    assert_eq!(
        host.scene().screen_bounds(source),
        Some(Rect::new(100.0, 100.0, 150.0, 120.0))
    );
    // The clone carries no listeners; only the live source reacts to presses.
    assert_eq!(host.listeners().count_for(ghost), 0);
    assert_eq!(host.listeners().count_for(source), 1);
}

#[test]
fn release_anywhere_tears_the_gesture_down() {
    let (mut host, _) = drag_host();
    press(&mut host);
    let overlay = overlay_node(&host).unwrap();
    let ghost = host.scene().children(overlay)[0];
    assert_eq!(host.scene().node_count(), 6);

    let outcome = release(&mut host, Point::new(300.0, 300.0));
    assert_eq!(outcome.delivered, 1);
    assert!(overlay_node(&host).is_none());
    assert!(!host.scene().is_alive(overlay));
    assert!(!host.scene().is_alive(ghost));
    assert_eq!(host.scene().node_count(), 3);
    assert_eq!(host.listeners().count_for(host.scene().stage()), 0);
    assert_eq!(host.listeners().len(), 1);
}

#[test]
fn release_over_the_ghost_also_ends_the_drag() {
    let (mut host, _) = drag_host();
    press(&mut host);

    // Release without moving: the pointer is over the ghost's clone.
    let outcome = release(&mut host, Point::new(110.0, 105.0));
    assert_eq!(outcome.delivered, 1);
    assert!(overlay_node(&host).is_none());
    assert_eq!(host.scene().node_count(), 3);
}

#[test]
fn a_second_press_lands_on_the_overlay_not_the_source() {
    let (mut host, _) = drag_host();
    press(&mut host);
    let overlay = overlay_node(&host).unwrap();
    let ghost = host.scene().children(overlay)[0];

    // The overlay covers the viewport, so the source is unreachable and the
    // press reaches no listener at all.
    let outcome = press(&mut host);
    assert_eq!(outcome.delivered, 0);
    assert!(!outcome.default_prevented);

    // Still exactly one overlay and one ghost.
    assert_eq!(overlay_node(&host), Some(overlay));
    assert_eq!(host.scene().children(overlay), &[ghost]);
    assert_eq!(host.scene().node_count(), 6);
    assert_eq!(host.listeners().count_for(host.scene().stage()), 2);
}

#[test]
fn a_second_release_is_a_quiet_no_op() {
    let (mut host, _) = drag_host();
    press(&mut host);
    release(&mut host, Point::new(300.0, 300.0));

    let outcome = release(&mut host, Point::new(300.0, 300.0));
    assert_eq!(outcome.delivered, 0);
    assert_eq!(host.scene().node_count(), 3);
    assert_eq!(host.listeners().len(), 1);
}

#[test]
fn repeated_cycles_leak_neither_nodes_nor_listeners() {
    let (mut host, _) = drag_host();
    for _ in 0..5 {
        press(&mut host);
        assert_eq!(host.scene().node_count(), 6);
        release(&mut host, Point::new(300.0, 300.0));
    }
    assert_eq!(host.scene().node_count(), 3);
    assert_eq!(host.listeners().len(), 1);
    assert_eq!(host.listeners().count_for(host.scene().stage()), 0);
}

#[test]
fn rejected_input_still_prevents_the_default_action() {
    let (mut host, drag) = drag_host();
    host.components_mut().set_enabled(drag, false);

    let outcome = press(&mut host);
    // The handler runs and suppresses the default action before the input
    // gate turns the press away.
    assert_eq!(outcome.delivered, 1);
    assert!(outcome.default_prevented);
    assert!(overlay_node(&host).is_none());
    assert_eq!(host.scene().node_count(), 3);
    assert_eq!(host.listeners().count_for(host.scene().stage()), 0);

    // Re-enabling restores the gesture without a remount.
    host.components_mut().set_enabled(drag, true);
    press(&mut host);
    assert!(overlay_node(&host).is_some());
}

#[test]
fn dispose_mid_drag_removes_overlay_and_listeners() {
    let (mut host, drag) = drag_host();
    press(&mut host);
    assert_eq!(host.peer_count(), 2);

    assert!(host.dispose_component(drag));
    assert_eq!(host.scene().node_count(), 1);
    assert!(host.listeners().is_empty());
    assert_eq!(host.peer_count(), 0);
}

#[test]
fn update_rebuilds_the_subtree_with_fresh_nodes() {
    let (mut host, drag) = drag_host();
    let pid = host.peer_of(drag).unwrap();
    let old_root = host.peer_root(pid).unwrap();

    host.components_mut()
        .set_frame(drag, Some(Rect::new(200.0, 50.0, 250.0, 70.0)));
    assert!(host.update_component(drag));

    // Same peer, new nodes, new geometry.
    assert_eq!(host.peer_of(drag), Some(pid));
    let new_root = host.peer_root(pid).unwrap();
    assert_ne!(new_root, old_root);
    assert!(!host.scene().is_alive(old_root));
    assert_eq!(
        host.scene().screen_bounds(new_root),
        Some(Rect::new(200.0, 50.0, 250.0, 70.0))
    );
    assert_eq!(host.scene().children(new_root).len(), 1);
    assert_eq!(host.listeners().len(), 1);
    assert_eq!(host.peer_count(), 2);

    // The rebuilt source still starts drags.
    host.pointer_input(PointerEventKind::Down, Point::new(210.0, 55.0));
    assert!(overlay_node(&host).is_some());
}

#[test]
fn update_mid_drag_stops_the_gesture() {
    let (mut host, drag) = drag_host();
    press(&mut host);

    assert!(host.update_component(drag));
    assert!(overlay_node(&host).is_none());
    assert_eq!(host.listeners().count_for(host.scene().stage()), 0);
    assert_eq!(host.listeners().len(), 1);
    assert_eq!(host.scene().node_count(), 3);
}

#[test]
fn moves_during_the_gesture_leave_the_ghost_parked() {
    let (mut host, _) = drag_host();
    press(&mut host);
    let overlay = overlay_node(&host).unwrap();
    let ghost = host.scene().children(overlay)[0];

    for position in [Point::new(400.0, 350.0), Point::new(10.0, 10.0)] {
        let outcome = host.pointer_input(PointerEventKind::Move, position);
        assert_eq!(outcome.delivered, 1);
    }
    assert_eq!(overlay_node(&host), Some(overlay));
    assert_eq!(
        host.scene().screen_bounds(ghost),
        Some(Rect::new(100.0, 100.0, 150.0, 120.0))
    );
}

#[test]
fn overlay_shields_embedded_content_during_the_gesture() {
    let (mut host, _) = drag_host();
    let embed = host.components_mut().add(EMBED);
    host.components_mut()
        .set_frame(embed, Some(Rect::new(200.0, 200.0, 400.0, 400.0)));
    host.render_root(embed).unwrap();

    // Idle: the embedded content swallows pointer input over its rect.
    let outcome = host.pointer_input(PointerEventKind::Move, Point::new(250.0, 250.0));
    assert!(outcome.sunk);
    assert_eq!(outcome.delivered, 0);

    press(&mut host);
    let overlay = overlay_node(&host).unwrap();

    // Dragging: the filled overlay wins the same spot and the move routes
    // to the stage capture listener.
    let outcome = host.pointer_input(PointerEventKind::Move, Point::new(250.0, 250.0));
    assert!(!outcome.sunk);
    assert_eq!(outcome.target, Some(overlay));
    assert_eq!(outcome.delivered, 1);

    // Releasing over the embed ends the drag, after which it sinks again.
    let outcome = release(&mut host, Point::new(250.0, 250.0));
    assert_eq!(outcome.delivered, 1);
    let outcome = host.pointer_input(PointerEventKind::Move, Point::new(250.0, 250.0));
    assert!(outcome.sunk);
}

#[test]
fn alpha_filter_hosts_fade_the_ghost_by_percentage() {
    let (mut host, _) = host_with_env(EnvProfile {
        opacity: OpacitySupport::AlphaFilter,
    });
    press(&mut host);

    let overlay = overlay_node(&host).unwrap();
    let ghost = host.scene().children(overlay)[0];
    let visual = host.scene().visual(ghost).unwrap();
    assert_eq!(visual.alpha_filter, Some(20));
    assert_eq!(visual.opacity, 1.0);
    // Both mechanisms resolve to the same effective fade.
    assert_eq!(host.scene().effective_opacity(ghost), Some(0.2));
}

#[test]
fn custom_options_flow_into_the_overlay_and_ghost() {
    let mut registry = registry();
    registry.register(DRAG_SOURCE_KIND, || {
        Box::new(DragSourcePeer::with_options(DragSourceOptions {
            ghost_opacity: 0.5,
            overlay_z: 40_000,
            fill_namespace: "app",
            fill_path: "shield.png",
        }))
    });
    let mut host = RenderHost::new(
        Size::new(800.0, 600.0),
        registry,
        Box::new(StaticClient::default()),
        EnvProfile::default(),
    );
    let drag = host.components_mut().add(DRAG_SOURCE_KIND);
    host.components_mut()
        .set_frame(drag, Some(Rect::new(100.0, 100.0, 150.0, 120.0)));
    host.render_root(drag).unwrap();

    press(&mut host);
    let overlay = overlay_node(&host).unwrap();
    let visual = host.scene().visual(overlay).unwrap();
    assert_eq!(visual.z_index, 40_000);
    assert_eq!(
        visual.fill.as_ref().map(|f| f.url.as_str()),
        Some("res:/app/shield.png")
    );
    let ghost = host.scene().children(overlay)[0];
    assert_eq!(host.scene().effective_opacity(ghost), Some(0.5));
}

#[test]
fn restarting_a_drag_replaces_the_overlay_and_ghost() {
    // An overlay stacked below the content leaves the source pressable
    // while a drag is already in progress, so a second press restarts the
    // gesture instead of going to the overlay.
    let mut registry = registry();
    registry.register(DRAG_SOURCE_KIND, || {
        Box::new(DragSourcePeer::with_options(DragSourceOptions {
            overlay_z: -1,
            ..DragSourceOptions::default()
        }))
    });
    let mut host = RenderHost::new(
        Size::new(800.0, 600.0),
        registry,
        Box::new(StaticClient::default()),
        EnvProfile::default(),
    );
    let drag = host.components_mut().add(DRAG_SOURCE_KIND);
    host.components_mut()
        .set_frame(drag, Some(Rect::new(100.0, 100.0, 150.0, 120.0)));
    host.render_root(drag).unwrap();
    let source = host.peer_root(host.peer_of(drag).unwrap()).unwrap();

    press(&mut host);
    let stage = host.scene().stage();
    let first_overlay = *host
        .scene()
        .children(stage)
        .iter()
        .find(|&&n| n != source)
        .unwrap();

    // The old pair is torn down before the new one is built: exactly one
    // overlay and ghost afterwards, and no extra stage listeners.
    let outcome = press(&mut host);
    assert_eq!(outcome.delivered, 1);
    assert!(!host.scene().is_alive(first_overlay));
    let overlays: Vec<_> = host
        .scene()
        .children(stage)
        .iter()
        .copied()
        .filter(|&n| n != source)
        .collect();
    assert_eq!(overlays.len(), 1);
    assert_eq!(host.scene().children(overlays[0]).len(), 1);
    assert_eq!(host.scene().node_count(), 4);
    assert_eq!(host.listeners().count_for(stage), 2);
}

#[test]
fn a_bare_drag_source_without_child_still_drags() {
    let mut host = RenderHost::new(
        Size::new(800.0, 600.0),
        registry(),
        Box::new(StaticClient::default()),
        EnvProfile::default(),
    );
    let drag = host.components_mut().add(DRAG_SOURCE_KIND);
    host.components_mut()
        .set_frame(drag, Some(Rect::new(100.0, 100.0, 150.0, 120.0)));
    host.render_root(drag).unwrap();
    assert_eq!(host.peer_count(), 1);

    let outcome = press(&mut host);
    assert_eq!(outcome.delivered, 1);
    let overlay = overlay_node(&host).expect("childless source should still drag");
    // The ghost is a clone of the bare source node.
    let ghost = host.scene().children(overlay)[0];
    assert_eq!(host.scene().children(ghost).len(), 0);
    assert_eq!(
        host.scene().screen_bounds(ghost),
        Some(Rect::new(100.0, 100.0, 150.0, 120.0))
    );
}
