// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registry with explicit subscription handles.

use alloc::vec::Vec;

use crate::event::PointerEventKind;

/// Identifier of one live listener registration.
///
/// Like node ids, listener ids are generational: a slot index plus a
/// generation counter. Cancelling a registration frees its slot; a later
/// registration may reuse the slot with a bumped generation, so a stale id
/// never aliases a live registration.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ListenerId(pub(crate) u32, pub(crate) u32);

impl ListenerId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Handle returned by [`Listeners::add`]; the way to release a registration.
///
/// The handle's identity is stable for the registration's whole lifetime, so
/// the add/release pair always refers to the same listener, no matter where
/// the handle traveled in between. Cancelling through a clone of a handle
/// that was already spent is a harmless no-op.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Subscription {
    id: ListenerId,
}

impl Subscription {
    /// The id of the registration this handle releases.
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Record<N, T> {
    pub(crate) node: N,
    pub(crate) kind: PointerEventKind,
    pub(crate) capture: bool,
    pub(crate) token: T,
}

#[derive(Clone, Debug)]
struct Slot<N, T> {
    generation: u32,
    record: Option<Record<N, T>>,
}

/// Registry of pointer listeners keyed by node.
///
/// `N` is the node key of the host tree; `T` is an application routing token
/// carried back in [`Delivery`](crate::Delivery) entries (typically the id
/// of the peer that registered the listener).
///
/// Listeners fire in registration order within a node and phase; the
/// registry keeps that order stable across unrelated cancellations.
#[derive(Clone, Debug)]
pub struct Listeners<N, T> {
    slots: Vec<Slot<N, T>>,
    free: Vec<u32>,
    order: Vec<ListenerId>,
    revision: u64,
}

impl<N, T> Default for Listeners<N, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, T> Listeners<N, T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
            revision: 0,
        }
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry has no live registrations.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Counter that increments on every successful add or cancel.
    ///
    /// Lets hosts detect registry changes between dispatches without
    /// comparing contents.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether `id` still refers to a live registration.
    pub fn is_alive(&self, id: ListenerId) -> bool {
        self.record(id).is_some()
    }

    /// Register a listener for `kind` events on `node`.
    ///
    /// `capture` selects the capture phase (ancestors intercept on the way
    /// down); otherwise the listener fires at the target and during bubble.
    /// Returns the [`Subscription`] that releases the registration.
    pub fn add(
        &mut self,
        node: N,
        kind: PointerEventKind,
        capture: bool,
        token: T,
    ) -> Subscription {
        let record = Record {
            node,
            kind,
            capture,
            token,
        };
        let id = if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation += 1;
            slot.record = Some(record);
            ListenerId::new(idx, slot.generation)
        } else {
            let idx = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
            self.slots.push(Slot {
                generation: 1,
                record: Some(record),
            });
            ListenerId::new(idx, 1)
        };
        self.order.push(id);
        self.revision += 1;
        Subscription { id }
    }

    /// Release the registration behind `sub`.
    ///
    /// Returns `false` when the handle was already spent; nothing changes in
    /// that case.
    pub fn cancel(&mut self, sub: Subscription) -> bool {
        self.cancel_id(sub.id)
    }

    fn cancel_id(&mut self, id: ListenerId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        self.slots[id.idx()].record = None;
        self.free.push(id.0);
        self.order.retain(|&o| o != id);
        self.revision += 1;
        true
    }

    pub(crate) fn record(&self, id: ListenerId) -> Option<&Record<N, T>> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.record.as_ref()
    }

    pub(crate) fn order(&self) -> &[ListenerId] {
        &self.order
    }
}

impl<N: Copy + PartialEq, T> Listeners<N, T> {
    /// Number of live registrations on `node`.
    pub fn count_for(&self, node: N) -> usize {
        self.order
            .iter()
            .filter_map(|&id| self.record(id))
            .filter(|r| r.node == node)
            .count()
    }

    /// Release every registration on `node`, returning how many there were.
    ///
    /// This is the disposal sweep: it needs no handles, so it also catches
    /// registrations whose subscriptions were lost.
    pub fn remove_all(&mut self, node: N) -> usize {
        let stale: Vec<ListenerId> = self
            .order
            .iter()
            .copied()
            .filter(|&id| self.record(id).is_some_and(|r| r.node == node))
            .collect();
        let mut removed = 0;
        for id in stale {
            if self.cancel_id(id) {
                removed += 1;
            }
        }
        removed
    }
}
