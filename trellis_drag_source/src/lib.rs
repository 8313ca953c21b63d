// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_drag_source --heading-base-level=0

//! Trellis Drag Source: press a component's content to float a
//! semi-transparent clone of it over a viewport-wide overlay.
//!
//! [`DragSourcePeer`] renders a component that wraps one child and makes it
//! draggable. The interesting part is what a press builds:
//!
//! - an **overlay** node covering the whole viewport, stacked at
//!   [`OVERLAY_Z`] above the application and filled with a transparent
//!   image, so every later pointer event lands on it instead of whatever
//!   embedded, event-swallowing content sits underneath;
//! - a **ghost**, a clone of the source subtree, floated inside the overlay
//!   at the source's screen position and faded to
//!   [`GHOST_OPACITY`] (or a legacy alpha-filter percentage, depending on
//!   the host's [`OpacitySupport`](trellis_scene::OpacitySupport));
//! - capture-phase move and release listeners on the stage, so the gesture
//!   finishes no matter where the pointer goes.
//!
//! Releasing the pointer removes all three. The ghost stays at the press
//! position for the whole gesture; it marks where the drag began rather
//! than tracking the pointer.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use trellis_component::{
//!     BLOCK_KIND, EnvProfile, PeerRegistry, RenderHost, StaticClient, register_block,
//! };
//! use trellis_drag_source::{DRAG_SOURCE_KIND, register_drag_source};
//! use trellis_pointer::PointerEventKind;
//!
//! let mut registry = PeerRegistry::new();
//! register_drag_source(&mut registry);
//! register_block(&mut registry);
//! let mut host = RenderHost::new(
//!     Size::new(800.0, 600.0),
//!     registry,
//!     Box::new(StaticClient::default()),
//!     EnvProfile::default(),
//! );
//!
//! // A drag source framed at (100, 100), wrapping a 50x20 child.
//! let drag = host.components_mut().add(DRAG_SOURCE_KIND);
//! host.components_mut()
//!     .set_frame(drag, Some(Rect::new(100.0, 100.0, 150.0, 120.0)));
//! let child = host.components_mut().add(BLOCK_KIND);
//! host.components_mut()
//!     .set_frame(child, Some(Rect::new(0.0, 0.0, 50.0, 20.0)));
//! host.components_mut().append_child(drag, child);
//! host.render_root(drag).unwrap();
//!
//! let stage = host.scene().stage();
//! assert_eq!(host.scene().children(stage).len(), 1);
//!
//! // Pressing the content builds the overlay and the ghost.
//! let press = host.pointer_input(PointerEventKind::Down, Point::new(110.0, 105.0));
//! assert!(press.default_prevented);
//! assert_eq!(host.scene().children(stage).len(), 2);
//!
//! // Releasing anywhere tears them down again.
//! host.pointer_input(PointerEventKind::Up, Point::new(300.0, 300.0));
//! assert_eq!(host.scene().children(stage).len(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod options;
mod peer;

pub use options::{DragSourceOptions, GHOST_OPACITY, OVERLAY_Z};
pub use peer::{DRAG_SOURCE_KIND, DragSourcePeer, register_drag_source};
