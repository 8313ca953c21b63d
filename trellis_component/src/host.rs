// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render host: owns the scene, the listener registry, and the mounted
//! peers, and drives lifecycle and input dispatch.

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Size};
use trellis_pointer::{Listeners, PointerEvent, PointerEventKind, route};
use trellis_scene::{NodeId, Scene};

use crate::client::{ClientContext, EnvProfile};
use crate::component::{ComponentId, Components};
use crate::peer::{PeerId, PeerRegistry, RenderPeer};

#[derive(Debug)]
struct PeerEntry {
    component: ComponentId,
    // None while the host has the peer checked out for a call.
    peer: Option<Box<dyn RenderPeer>>,
}

#[derive(Debug)]
struct PeerSlot {
    generation: u32,
    entry: Option<PeerEntry>,
}

/// Storage for mounted peers, addressed by generational [`PeerId`].
///
/// Peers are checked out of their slot for the duration of a call so the
/// host can hand them a context that borrows everything else. A peer that
/// re-enters the host can never obtain itself a second time: its own slot
/// reads as checked out.
#[derive(Debug, Default)]
pub(crate) struct PeerArena {
    slots: Vec<PeerSlot>,
    free: Vec<u32>,
    by_component: HashMap<ComponentId, PeerId>,
}

impl PeerArena {
    fn reserve(&mut self, component: ComponentId) -> PeerId {
        debug_assert!(
            !self.by_component.contains_key(&component),
            "component already has a mounted peer"
        );
        let entry = PeerEntry {
            component,
            peer: None,
        };
        let pid = if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation += 1;
            slot.entry = Some(entry);
            PeerId::new(idx, slot.generation)
        } else {
            let idx = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
            self.slots.push(PeerSlot {
                generation: 1,
                entry: Some(entry),
            });
            PeerId::new(idx, 1)
        };
        self.by_component.insert(component, pid);
        pid
    }

    fn put(&mut self, pid: PeerId, peer: Box<dyn RenderPeer>) {
        if let Some(entry) = self.entry_mut(pid) {
            entry.peer = Some(peer);
        }
    }

    fn take(&mut self, pid: PeerId) -> Option<Box<dyn RenderPeer>> {
        self.entry_mut(pid).and_then(|e| e.peer.take())
    }

    fn release(&mut self, pid: PeerId) -> bool {
        let Some(entry) = self.entry_mut(pid) else {
            return false;
        };
        let component = entry.component;
        self.slots[pid.idx()].entry = None;
        self.free.push(pid.0);
        self.by_component.remove(&component);
        true
    }

    fn component_of(&self, pid: PeerId) -> Option<ComponentId> {
        self.entry(pid).map(|e| e.component)
    }

    fn peer_of(&self, component: ComponentId) -> Option<PeerId> {
        let pid = *self.by_component.get(&component)?;
        self.entry(pid).map(|_| pid)
    }

    fn root_of(&self, pid: PeerId) -> Option<NodeId> {
        self.entry(pid)?.peer.as_ref()?.root()
    }

    fn len(&self) -> usize {
        self.by_component.len()
    }

    fn entry(&self, pid: PeerId) -> Option<&PeerEntry> {
        let slot = self.slots.get(pid.idx())?;
        if slot.generation != pid.1 {
            return None;
        }
        slot.entry.as_ref()
    }

    fn entry_mut(&mut self, pid: PeerId) -> Option<&mut PeerEntry> {
        let slot = self.slots.get_mut(pid.idx())?;
        if slot.generation != pid.1 {
            return None;
        }
        slot.entry.as_mut()
    }
}

/// Everything a peer may touch during a host call.
///
/// The first five fields are the peer-facing surface; the registry and the
/// peer storage stay internal and are reached only through
/// [`HostCtx::render_child_add`] and [`HostCtx::render_child_dispose`].
#[derive(Debug)]
pub struct HostCtx<'a> {
    /// The retained scene peers build into.
    pub scene: &'a mut Scene,
    /// Listener registry; registrations are keyed by scene node and carry
    /// the registering [`PeerId`] as routing token.
    pub listeners: &'a mut Listeners<NodeId, PeerId>,
    /// The component tree, read-only from inside peers.
    pub components: &'a Components,
    /// The application client seam.
    pub client: &'a dyn ClientContext,
    /// Environment capabilities.
    pub env: EnvProfile,
    registry: &'a PeerRegistry,
    peers: &'a mut PeerArena,
}

impl HostCtx<'_> {
    /// Instantiate and mount the peer for `component` under `container`.
    ///
    /// Returns `None` when the component is stale or its kind has no
    /// registered factory.
    pub fn render_child_add(
        &mut self,
        component: ComponentId,
        container: NodeId,
    ) -> Option<PeerId> {
        let kind = self.components.kind(component)?;
        let Some(mut peer) = self.registry.instantiate(kind) else {
            log::debug!("no peer factory for {kind:?}");
            return None;
        };
        let pid = self.peers.reserve(component);
        log::trace!("mount {kind:?} component {component:?} as {pid:?}");
        peer.mount(self, pid, component, container);
        self.peers.put(pid, peer);
        Some(pid)
    }

    /// Dispose the peer mounted for `component`, if any.
    pub fn render_child_dispose(&mut self, component: ComponentId) -> bool {
        let Some(pid) = self.peers.peer_of(component) else {
            return false;
        };
        let Some(mut peer) = self.peers.take(pid) else {
            return false;
        };
        log::trace!("dispose component {component:?} ({pid:?})");
        peer.dispose(self, pid, component);
        self.peers.release(pid);
        true
    }
}

/// Result of one [`RenderHost::pointer_input`] round.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// The node the event was targeted at, when anything was hit.
    pub target: Option<NodeId>,
    /// Number of listener invocations that actually ran.
    pub delivered: usize,
    /// Whether some handler suppressed the default action.
    pub default_prevented: bool,
    /// Whether embedded content swallowed the event before routing.
    pub sunk: bool,
}

impl DispatchOutcome {
    const MISS: Self = Self {
        target: None,
        delivered: 0,
        default_prevented: false,
        sunk: false,
    };
}

/// The stateful composition point: scene, listeners, components, registry,
/// peers, client, and environment, with the host event-loop entry
/// [`RenderHost::pointer_input`].
#[derive(Debug)]
pub struct RenderHost {
    scene: Scene,
    listeners: Listeners<NodeId, PeerId>,
    components: Components,
    registry: PeerRegistry,
    peers: PeerArena,
    client: Box<dyn ClientContext>,
    env: EnvProfile,
}

impl RenderHost {
    /// Create a host with an empty component tree and a stage of the given
    /// viewport size.
    pub fn new(
        viewport: Size,
        registry: PeerRegistry,
        client: Box<dyn ClientContext>,
        env: EnvProfile,
    ) -> Self {
        Self {
            scene: Scene::new(viewport),
            listeners: Listeners::new(),
            components: Components::new(),
            registry,
            peers: PeerArena::default(),
            client,
            env,
        }
    }

    /// The scene, for inspection.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The listener registry, for inspection.
    pub fn listeners(&self) -> &Listeners<NodeId, PeerId> {
        &self.listeners
    }

    /// The component tree.
    pub fn components(&self) -> &Components {
        &self.components
    }

    /// The component tree, for the application to build and change.
    pub fn components_mut(&mut self) -> &mut Components {
        &mut self.components
    }

    /// The client seam.
    pub fn client(&self) -> &dyn ClientContext {
        self.client.as_ref()
    }

    /// Environment capabilities.
    pub fn env(&self) -> EnvProfile {
        self.env
    }

    /// Number of mounted peers.
    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    /// The peer mounted for `component`, if any.
    pub fn peer_of(&self, component: ComponentId) -> Option<PeerId> {
        self.peers.peer_of(component)
    }

    /// Root node of a mounted peer's subtree.
    pub fn peer_root(&self, peer: PeerId) -> Option<NodeId> {
        self.peers.root_of(peer)
    }

    /// Mount the peer for `component` onto the stage.
    pub fn render_root(&mut self, component: ComponentId) -> Option<PeerId> {
        let stage = self.scene.stage();
        self.ctx().render_child_add(component, stage)
    }

    /// Drive the peer's reconciliation after `component` changed
    /// structurally.
    pub fn update_component(&mut self, component: ComponentId) -> bool {
        let Some(pid) = self.peers.peer_of(component) else {
            return false;
        };
        let Some(mut peer) = self.peers.take(pid) else {
            return false;
        };
        log::trace!("update component {component:?} ({pid:?})");
        let mut ctx = self.ctx();
        peer.update(&mut ctx, pid, component);
        self.peers.put(pid, peer);
        true
    }

    /// Dispose the peer mounted for `component`.
    pub fn dispose_component(&mut self, component: ComponentId) -> bool {
        self.ctx().render_child_dispose(component)
    }

    /// Hit-test `position` and deliver a `kind` event along the resulting
    /// path.
    ///
    /// Deliveries re-validate listener liveness immediately before each
    /// invocation, so a listener cancelled by an earlier handler in the same
    /// dispatch never fires. Events hitting embedded content are sunk:
    /// nothing is routed and the outcome records it.
    pub fn pointer_input(&mut self, kind: PointerEventKind, position: Point) -> DispatchOutcome {
        let Some(hit) = self.scene.hit_test(position) else {
            return DispatchOutcome::MISS;
        };
        if hit.sunk {
            log::trace!("{kind:?} at {position:?} swallowed by embedded content");
            return DispatchOutcome {
                target: Some(hit.node),
                delivered: 0,
                default_prevented: false,
                sunk: true,
            };
        }

        let path = self.scene.path_from_root(hit.node);
        let deliveries = route(&self.listeners, &path, kind);
        let mut event = PointerEvent::new(kind, position, hit.node);
        let mut delivered = 0;
        for delivery in &deliveries {
            if !self.listeners.is_alive(delivery.listener) {
                continue;
            }
            let Some(component) = self.peers.component_of(delivery.token) else {
                continue;
            };
            let Some(mut peer) = self.peers.take(delivery.token) else {
                continue;
            };
            let mut ctx = self.ctx();
            peer.pointer_event(&mut ctx, delivery.token, component, &mut event, delivery);
            self.peers.put(delivery.token, peer);
            delivered += 1;
        }

        DispatchOutcome {
            target: Some(hit.node),
            delivered,
            default_prevented: event.default_prevented,
            sunk: false,
        }
    }

    fn ctx(&mut self) -> HostCtx<'_> {
        HostCtx {
            scene: &mut self.scene,
            listeners: &mut self.listeners,
            components: &self.components,
            client: self.client.as_ref(),
            env: self.env,
            registry: &self.registry,
            peers: &mut self.peers,
        }
    }
}
