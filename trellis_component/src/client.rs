// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The client seam: input gating, resource resolution, and environment
//! capabilities.

use alloc::format;
use alloc::string::String;
use core::fmt;

use trellis_scene::OpacitySupport;

use crate::component::{ComponentId, Components};

/// Application services peers consult while rendering.
///
/// Mirrors the two questions peers actually ask of their client: "may this
/// component act on input right now?" and "where does this named resource
/// live?".
pub trait ClientContext: fmt::Debug {
    /// Whether `component` may act on the input it just received.
    ///
    /// Peers call this before starting any input-driven behavior and stay
    /// silent when it answers `false`; a denied gesture is not an error.
    fn verify_input(&self, components: &Components, component: ComponentId) -> bool;

    /// Resolve a namespaced resource path to a concrete URL.
    fn resource_url(&self, namespace: &str, path: &str) -> String;
}

/// A [`ClientContext`] with fixed answers; enough for tests, demos, and
/// hosts without an application shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticClient {
    /// Global input switch; `false` denies every [`ClientContext::verify_input`] call.
    pub input_enabled: bool,
    /// Prefix for resolved resource URLs.
    pub base_url: String,
}

impl Default for StaticClient {
    fn default() -> Self {
        Self {
            input_enabled: true,
            base_url: String::from("res:"),
        }
    }
}

impl ClientContext for StaticClient {
    fn verify_input(&self, components: &Components, component: ComponentId) -> bool {
        self.input_enabled && components.is_interactable(component)
    }

    fn resource_url(&self, namespace: &str, path: &str) -> String {
        format!("{}/{namespace}/{path}", self.base_url)
    }
}

/// Capabilities of the presentation environment.
///
/// Peers branch on these flags instead of sniffing the environment
/// themselves, so one peer body serves every environment.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvProfile {
    /// Which opacity mechanism the environment honors.
    pub opacity: OpacitySupport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentKind;

    #[test]
    fn static_client_resolves_namespaced_urls() {
        let client = StaticClient::default();
        assert_eq!(
            client.resource_url("trellis", "resource/transparent.png"),
            "res:/trellis/resource/transparent.png"
        );
    }

    #[test]
    fn verify_input_requires_client_and_component_consent() {
        let mut components = Components::new();
        let outer = components.add(ComponentKind("Panel"));
        let inner = components.add(ComponentKind("Label"));
        components.append_child(outer, inner);

        let mut client = StaticClient::default();
        assert!(client.verify_input(&components, inner));

        components.set_enabled(outer, false);
        assert!(!client.verify_input(&components, inner));
        components.set_enabled(outer, true);

        client.input_enabled = false;
        assert!(!client.verify_input(&components, inner));
    }
}
