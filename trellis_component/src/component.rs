// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The component tree: application-facing structure that peers render.

use alloc::vec::Vec;
use kurbo::Rect;

/// Names a component kind; the registry maps kinds to peer factories.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComponentKind(pub &'static str);

/// Identifier for a component.
///
/// Generational like node ids: stale ids never alias a live component.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ComponentId(pub(crate) u32, pub(crate) u32);

impl ComponentId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Component {
    kind: ComponentKind,
    enabled: bool,
    frame: Option<Rect>,
    parent: Option<ComponentId>,
    children: Vec<ComponentId>,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    component: Option<Component>,
}

/// Arena of components.
///
/// Components carry what the application decided: a kind, an enabled flag,
/// an optional placement frame, and children. Layout happens upstream; the
/// frame is the result peers consume, not a layout input.
///
/// Operations on stale [`ComponentId`]s are no-ops reporting `false` or
/// `None`.
#[derive(Clone, Debug, Default)]
pub struct Components {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl Components {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live components.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.component.is_some()).count()
    }

    /// Whether the tree has no components.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `id` still refers to a live component.
    pub fn is_alive(&self, id: ComponentId) -> bool {
        self.get(id).is_some()
    }

    /// Create a component of `kind`, enabled, unframed, with no parent.
    pub fn add(&mut self, kind: ComponentKind) -> ComponentId {
        let component = Component {
            kind,
            enabled: true,
            frame: None,
            parent: None,
            children: Vec::new(),
        };
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation += 1;
            slot.component = Some(component);
            ComponentId::new(idx, slot.generation)
        } else {
            let idx = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
            self.slots.push(Slot {
                generation: 1,
                component: Some(component),
            });
            ComponentId::new(idx, 1)
        }
    }

    /// Append `child` under `parent`.
    ///
    /// Returns `false` when either id is stale, `child` already has a
    /// parent, or `parent` lies inside `child`'s subtree.
    pub fn append_child(&mut self, parent: ComponentId, child: ComponentId) -> bool {
        if !self.is_alive(parent) || !self.is_alive(child) {
            return false;
        }
        if self.parent(child).is_some() {
            return false;
        }
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return false;
            }
            cursor = self.parent(id);
        }
        if let Some(c) = self.get_mut(parent) {
            c.children.push(child);
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = Some(parent);
        }
        true
    }

    /// The component's kind.
    pub fn kind(&self, id: ComponentId) -> Option<ComponentKind> {
        self.get(id).map(|c| c.kind)
    }

    /// The component's placement frame, when the application set one.
    pub fn frame(&self, id: ComponentId) -> Option<Rect> {
        self.get(id).and_then(|c| c.frame)
    }

    /// Set or clear the placement frame.
    pub fn set_frame(&mut self, id: ComponentId, frame: Option<Rect>) -> bool {
        match self.get_mut(id) {
            Some(c) => {
                c.frame = frame;
                true
            }
            None => false,
        }
    }

    /// Whether the component itself is enabled. Stale ids read as disabled.
    pub fn is_enabled(&self, id: ComponentId) -> bool {
        self.get(id).is_some_and(|c| c.enabled)
    }

    /// Enable or disable the component.
    pub fn set_enabled(&mut self, id: ComponentId, enabled: bool) -> bool {
        match self.get_mut(id) {
            Some(c) => {
                c.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Whether the component and all of its ancestors are enabled.
    ///
    /// This is the input gate: a disabled ancestor silences the whole
    /// subtree.
    pub fn is_interactable(&self, id: ComponentId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let mut cursor = Some(id);
        while let Some(c) = cursor {
            if !self.is_enabled(c) {
                return false;
            }
            cursor = self.parent(c);
        }
        true
    }

    /// Parent of `id`, or `None` for roots and stale ids.
    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.get(id).and_then(|c| c.parent)
    }

    /// Children of `id` in document order. Empty for stale ids.
    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        match self.get(id) {
            Some(c) => &c.children,
            None => &[],
        }
    }

    /// First child of `id`, when it has one.
    pub fn first_child(&self, id: ComponentId) -> Option<ComponentId> {
        self.children(id).first().copied()
    }

    fn get(&self, id: ComponentId) -> Option<&Component> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.component.as_ref()
    }

    fn get_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.component.as_mut()
    }
}
