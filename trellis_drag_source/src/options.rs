// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for the drag-source peer.

use alloc::string::String;

use trellis_component::ClientContext;

/// Opacity applied to the drag ghost on hosts with native opacity support.
pub const GHOST_OPACITY: f64 = 0.2;

/// Stacking value for the capture overlay.
///
/// High enough to sit above every application node; the overlay must win
/// hit-testing for the whole viewport while a drag is in progress.
pub const OVERLAY_Z: i32 = 32_767;

/// Configuration for [`DragSourcePeer`](crate::DragSourcePeer).
///
/// The defaults reproduce the classic behavior (a 20% ghost under a
/// viewport-sized overlay) and are what [`DragSourcePeer::new`] uses.
/// Construct via [`DragSourcePeer::with_options`] to override.
///
/// [`DragSourcePeer::new`]: crate::DragSourcePeer::new
/// [`DragSourcePeer::with_options`]: crate::DragSourcePeer::with_options
#[derive(Clone, Debug, PartialEq)]
pub struct DragSourceOptions {
    /// Opacity of the floating clone while a drag is in progress.
    ///
    /// Values outside `0.0..=1.0` are clamped where they are applied.
    pub ghost_opacity: f64,
    /// `z_index` assigned to the capture overlay node.
    pub overlay_z: i32,
    /// Resource namespace for the overlay's transparent fill.
    pub fill_namespace: &'static str,
    /// Resource path for the overlay's transparent fill.
    pub fill_path: &'static str,
}

impl Default for DragSourceOptions {
    fn default() -> Self {
        Self {
            ghost_opacity: GHOST_OPACITY,
            overlay_z: OVERLAY_Z,
            fill_namespace: "trellis",
            fill_path: "resource/transparent.png",
        }
    }
}

impl DragSourceOptions {
    /// Ghost opacity expressed as the whole-number percentage used by
    /// hosts that only support legacy alpha filters.
    ///
    /// The default `0.2` maps to `20`.
    pub fn ghost_alpha_percent(&self) -> u8 {
        let clamped = self.ghost_opacity.clamp(0.0, 1.0) * 100.0;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "clamped into 0.0..=100.0 before the cast"
        )]
        {
            (clamped + 0.5) as u8
        }
    }

    /// Resolves the overlay fill URL through the client's resource mapper.
    pub fn fill_url(&self, client: &dyn ClientContext) -> String {
        client.resource_url(self.fill_namespace, self.fill_path)
    }
}
