// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering-peer contract and the kind → factory registry.

use alloc::boxed::Box;
use core::fmt;

use hashbrown::HashMap;
use trellis_pointer::{Delivery, PointerEvent};
use trellis_scene::NodeId;

use crate::component::{ComponentId, ComponentKind};
use crate::host::HostCtx;

/// Identifier for a mounted peer instance.
///
/// Generational like node ids; doubles as the routing token on listener
/// registrations, so deliveries come back addressed to the peer that
/// registered them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PeerId(pub(crate) u32, pub(crate) u32);

impl PeerId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Contract between the host and one component's renderer.
///
/// A peer owns the scene nodes it creates for its component and the listener
/// subscriptions it registers. The host drives the lifecycle:
///
/// - [`mount`](Self::mount) builds the peer's subtree into a container node.
/// - [`update`](Self::update) reconciles after the component changed
///   structurally; peers are free to rebuild from scratch.
/// - [`dispose`](Self::dispose) tears everything down; it must be safe to
///   call in any state, including mid-gesture.
/// - [`pointer_event`](Self::pointer_event) receives the deliveries routed
///   to this peer's subscriptions.
///
/// Peers are plain trait objects made by registered factories; there is no
/// base-class hierarchy to inherit from.
pub trait RenderPeer: fmt::Debug {
    /// Build the component's visuals under `container` and register any
    /// listeners.
    fn mount(
        &mut self,
        ctx: &mut HostCtx<'_>,
        peer: PeerId,
        component: ComponentId,
        container: NodeId,
    );

    /// Reconcile after a structural change to the component.
    fn update(&mut self, ctx: &mut HostCtx<'_>, peer: PeerId, component: ComponentId);

    /// Tear down nodes, listeners, and any in-flight interaction.
    fn dispose(&mut self, ctx: &mut HostCtx<'_>, peer: PeerId, component: ComponentId);

    /// Handle one routed delivery. The default implementation ignores it.
    fn pointer_event(
        &mut self,
        ctx: &mut HostCtx<'_>,
        peer: PeerId,
        component: ComponentId,
        event: &mut PointerEvent<NodeId>,
        delivery: &Delivery<NodeId, PeerId>,
    ) {
        let _ = (ctx, peer, component, event, delivery);
    }

    /// The root node of the peer's subtree, while mounted.
    fn root(&self) -> Option<NodeId>;
}

/// Factory producing a fresh, unmounted peer.
pub type PeerFactory = fn() -> Box<dyn RenderPeer>;

/// Maps component kinds to peer factories.
///
/// Registration is a lookup-table write; rendering a component of an
/// unregistered kind is a no-op the host reports back.
#[derive(Clone, Debug, Default)]
pub struct PeerRegistry {
    factories: HashMap<ComponentKind, PeerFactory>,
}

impl PeerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` for `kind`, replacing any previous registration.
    pub fn register(&mut self, kind: ComponentKind, factory: PeerFactory) {
        self.factories.insert(kind, factory);
    }

    /// Whether a factory is registered for `kind`.
    pub fn is_registered(&self, kind: ComponentKind) -> bool {
        self.factories.contains_key(&kind)
    }

    /// Produce a fresh peer for `kind`.
    pub fn instantiate(&self, kind: ComponentKind) -> Option<Box<dyn RenderPeer>> {
        self.factories.get(&kind).map(|factory| factory())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct NullPeer;

    impl RenderPeer for NullPeer {
        fn mount(
            &mut self,
            _ctx: &mut HostCtx<'_>,
            _peer: PeerId,
            _component: ComponentId,
            _container: NodeId,
        ) {
        }

        fn update(&mut self, _ctx: &mut HostCtx<'_>, _peer: PeerId, _component: ComponentId) {}

        fn dispose(&mut self, _ctx: &mut HostCtx<'_>, _peer: PeerId, _component: ComponentId) {}

        fn root(&self) -> Option<NodeId> {
            None
        }
    }

    #[test]
    fn registry_instantiates_registered_kinds_only() {
        let mut registry = PeerRegistry::new();
        let kind = ComponentKind("Null");
        assert!(!registry.is_registered(kind));
        assert!(registry.instantiate(kind).is_none());

        registry.register(kind, || Box::new(NullPeer));
        assert!(registry.is_registered(kind));
        assert!(registry.instantiate(kind).is_some());
    }
}
