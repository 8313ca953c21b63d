// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Routing: fold a root→target path into a delivery sequence.
//!
//! The ordering is the classic three-sweep model:
//!
//! 1. Capture: capture listeners fire on every path node, root → target.
//! 2. Target: non-capture listeners on the target.
//! 3. Bubble: non-capture listeners on the proper ancestors, target → root.
//!
//! Within one node and sweep, listeners fire in registration order. The
//! route is a plain value; executing it is the caller's job, which keeps
//! this crate free of callbacks and lets the caller re-validate liveness
//! (via [`Listeners::is_alive`]) immediately before each delivery, so a
//! listener cancelled by an earlier delivery never fires.

use alloc::vec::Vec;

use crate::event::PointerEventKind;
use crate::listeners::{ListenerId, Listeners};

/// Propagation phase of one delivery.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Root→target sweep of capture listeners.
    Capture,
    /// Non-capture listeners on the target itself.
    Target,
    /// Target→root sweep of non-capture listeners on proper ancestors.
    Bubble,
}

/// One pending listener invocation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Delivery<N, T> {
    /// Registration to re-validate before invoking.
    pub listener: ListenerId,
    /// Phase the listener fires in.
    pub phase: Phase,
    /// Node the listener is registered on.
    pub node: N,
    /// Routing token supplied at registration.
    pub token: T,
}

/// Compute the delivery sequence for a `kind` event along `path`.
///
/// `path` runs from the root to the target, both inclusive; an empty path
/// yields no deliveries.
pub fn route<N: Copy + PartialEq, T: Copy>(
    listeners: &Listeners<N, T>,
    path: &[N],
    kind: PointerEventKind,
) -> Vec<Delivery<N, T>> {
    let mut out = Vec::new();
    let Some(&target) = path.last() else {
        return out;
    };

    let mut collect = |node: N, capture: bool, phase: Phase, out: &mut Vec<Delivery<N, T>>| {
        for &id in listeners.order() {
            let Some(record) = listeners.record(id) else {
                continue;
            };
            if record.node == node && record.kind == kind && record.capture == capture {
                out.push(Delivery {
                    listener: id,
                    phase,
                    node,
                    token: record.token,
                });
            }
        }
    };

    for &node in path {
        collect(node, true, Phase::Capture, &mut out);
    }
    collect(target, false, Phase::Target, &mut out);
    for &node in path[..path.len() - 1].iter().rev() {
        collect(node, false, Phase::Bubble, &mut out);
    }
    out
}
