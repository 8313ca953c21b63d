// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_pointer --heading-base-level=0

//! Trellis Pointer: deterministic pointer event routing with explicit subscriptions.
//!
//! This crate owns the listener bookkeeping and the propagation order for
//! pointer input over a retained node tree. It is generic over the node key
//! and over an application routing token, so it carries no scene or widget
//! dependencies of its own.
//!
//! - [`Listeners`] is the registry. [`Listeners::add`] returns a
//!   [`Subscription`], a first-class handle that is the only way to release
//!   the registration again. Handles have stable generational identity:
//!   releasing is a single [`Listeners::cancel`] call, idempotent and
//!   harmless on stale handles, with none of the pitfalls of
//!   remove-by-callback-identity registries.
//! - [`route`] folds a root→target path into the capture → target → bubble
//!   delivery sequence. The caller owns execution and is expected to
//!   re-check [`Listeners::is_alive`] before each delivery, so listeners
//!   cancelled mid-dispatch never fire.
//! - [`PointerEvent`] carries the pointer payload and a
//!   [`PointerEvent::prevent_default`] flag the caller inspects after
//!   dispatch.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use trellis_pointer::{Listeners, Phase, PointerEventKind, route};
//!
//! #[derive(Copy, Clone, Debug, PartialEq, Eq)]
//! struct Node(u32);
//!
//! let mut listeners: Listeners<Node, &'static str> = Listeners::new();
//! let root_sub = listeners.add(Node(1), PointerEventKind::Down, true, "root-capture");
//! let leaf_sub = listeners.add(Node(3), PointerEventKind::Down, false, "leaf");
//!
//! // Route a press along the path root → … → target.
//! let path = [Node(1), Node(2), Node(3)];
//! let deliveries = route(&listeners, &path, PointerEventKind::Down);
//! let order: Vec<_> = deliveries.iter().map(|d| (d.phase, d.token)).collect();
//! assert_eq!(order, vec![(Phase::Capture, "root-capture"), (Phase::Target, "leaf")]);
//!
//! // Subscriptions release exactly what they registered.
//! listeners.cancel(root_sub);
//! listeners.cancel(leaf_sub);
//! assert!(listeners.is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod event;
mod listeners;
mod route;

pub use event::{PointerEvent, PointerEventKind};
pub use listeners::{ListenerId, Listeners, Subscription};
pub use route::{Delivery, Phase, route};
