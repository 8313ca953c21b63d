// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_component --heading-base-level=0

//! Trellis Component: the host seam between application components and
//! rendered scenes.
//!
//! Applications describe *what* exists as a tree of [`Components`]; how each
//! component kind turns into scene nodes is the job of a rendering peer.
//! This crate supplies the contract and the machinery around it:
//!
//! - [`RenderPeer`] is the peer contract: mount, update, dispose, and
//!   pointer-event entry points, with the host driving every call. Peers are
//!   looked up by component kind in a [`PeerRegistry`], a plain factory
//!   table rather than an inheritance hierarchy.
//! - [`RenderHost`] is the stateful composition point. It owns the
//!   [`Scene`](trellis_scene::Scene), the listener registry, the component
//!   tree, and the mounted peers, and exposes the host event-loop entry
//!   [`RenderHost::pointer_input`].
//! - [`HostCtx`] is what peers see during a call: the scene, the listeners,
//!   the (read-only) components, the [`ClientContext`], the [`EnvProfile`],
//!   and delegation entry points for rendering child components.
//! - [`ClientContext`] carries the application services peers consult:
//!   input gating ([`ClientContext::verify_input`], a silent gate, not an
//!   error path) and resource URL resolution.
//! - [`BlockPeer`] is a minimal content peer for inert children.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use trellis_component::{
//!     BLOCK_KIND, EnvProfile, PeerRegistry, RenderHost, StaticClient, register_block,
//! };
//! use trellis_pointer::PointerEventKind;
//!
//! let mut registry = PeerRegistry::new();
//! register_block(&mut registry);
//! let mut host = RenderHost::new(
//!     Size::new(800.0, 600.0),
//!     registry,
//!     Box::new(StaticClient::default()),
//!     EnvProfile::default(),
//! );
//!
//! let block = host.components_mut().add(BLOCK_KIND);
//! host.components_mut()
//!     .set_frame(block, Some(Rect::new(10.0, 10.0, 60.0, 30.0)));
//! let peer = host.render_root(block).unwrap();
//!
//! let outcome = host.pointer_input(PointerEventKind::Down, Point::new(20.0, 20.0));
//! assert_eq!(outcome.target, host.peer_root(peer));
//! assert_eq!(outcome.delivered, 0); // blocks register no listeners
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod block;
mod client;
mod component;
mod host;
mod peer;

pub use block::{BLOCK_KIND, BlockPeer, register_block};
pub use client::{ClientContext, EnvProfile, StaticClient};
pub use component::{ComponentId, ComponentKind, Components};
pub use host::{DispatchOutcome, HostCtx, RenderHost};
pub use peer::{PeerFactory, PeerId, PeerRegistry, RenderPeer};
