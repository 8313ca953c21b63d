// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A full drag gesture, headless.
//!
//! Builds a host with one drag source wrapping a block, presses it, moves
//! the pointer around, and releases, printing the scene around each step.
//!
//! Run:
//! - `cargo run -p trellis_demos --example drag_ghost`

use kurbo::{Point, Rect, Size};
use trellis_component::{
    BLOCK_KIND, EnvProfile, PeerRegistry, RenderHost, StaticClient, register_block,
};
use trellis_drag_source::{DRAG_SOURCE_KIND, register_drag_source};
use trellis_pointer::PointerEventKind;

fn print_stage(label: &str, host: &RenderHost) {
    let scene = host.scene();
    let stage = scene.stage();
    println!("== {label} ==");
    println!(
        "  nodes={}  stage.listeners={}",
        scene.node_count(),
        host.listeners().count_for(stage)
    );
    for &child in scene.children(stage) {
        let visual = scene.visual(child).expect("stage children are alive");
        println!(
            "  {child:?}  z={}  bounds={:?}  opacity={:?}  fill={:?}",
            visual.z_index,
            scene.screen_bounds(child),
            scene.effective_opacity(child),
            visual.fill.as_ref().map(|f| f.url.as_str()),
        );
        for &grandchild in scene.children(child) {
            println!(
                "    {grandchild:?}  bounds={:?}  opacity={:?}",
                scene.screen_bounds(grandchild),
                scene.effective_opacity(grandchild),
            );
        }
    }
}

fn main() {
    let mut registry = PeerRegistry::new();
    register_drag_source(&mut registry);
    register_block(&mut registry);
    let mut host = RenderHost::new(
        Size::new(800.0, 600.0),
        registry,
        Box::new(StaticClient::default()),
        EnvProfile::default(),
    );

    // A drag source framed at (100, 100) wrapping a 50x20 block.
    let drag = host.components_mut().add(DRAG_SOURCE_KIND);
    host.components_mut()
        .set_frame(drag, Some(Rect::new(100.0, 100.0, 150.0, 120.0)));
    let child = host.components_mut().add(BLOCK_KIND);
    host.components_mut()
        .set_frame(child, Some(Rect::new(0.0, 0.0, 50.0, 20.0)));
    host.components_mut().append_child(drag, child);
    host.render_root(drag).expect("drag source kind is registered");

    print_stage("mounted", &host);

    let press = host.pointer_input(PointerEventKind::Down, Point::new(110.0, 105.0));
    println!(
        "press: delivered={} default_prevented={}",
        press.delivered, press.default_prevented
    );
    print_stage("dragging", &host);

    for position in [Point::new(260.0, 240.0), Point::new(420.0, 380.0)] {
        let moved = host.pointer_input(PointerEventKind::Move, position);
        println!("move to {position:?}: delivered={}", moved.delivered);
    }
    print_stage("after moves (ghost parked)", &host);

    let release = host.pointer_input(PointerEventKind::Up, Point::new(420.0, 380.0));
    println!("release: delivered={}", release.delivered);
    print_stage("released", &host);

    assert!(press.default_prevented);
    assert_eq!(host.scene().node_count(), 3);
    assert_eq!(host.listeners().count_for(host.scene().stage()), 0);
}
