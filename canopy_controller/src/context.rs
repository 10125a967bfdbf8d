// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared tooltip context.

use canopy_popup::{AttachQueue, PopupId, Surface};
use canopy_registry::Registry;
use canopy_visibility::VisibilityState;

/// Host-owned shared state for every controller in a process (or any
/// host-chosen scope).
///
/// The sharing is intentional — one context, many controllers — so that
/// independent tooltip groups can resolve each other's references. Ownership
/// stays explicit rather than global: the host constructs the context,
/// passes it by reference, and can [`reset`](TooltipContext::reset) it
/// wholesale (for tests, or between host screens).
#[derive(Debug)]
pub struct TooltipContext<K> {
    /// The shared popup surface (the document-body analogue).
    pub surface: Surface,
    /// The shared anchor ↔ popup registry.
    pub registry: Registry<K>,
    /// Per-popup visibility state and show timers.
    pub visibility: VisibilityState<PopupId>,
    /// Positioning-engine attachments awaiting the next flush.
    pub attach: AttachQueue<K>,
}

impl<K: Copy + Eq + core::hash::Hash> TooltipContext<K> {
    /// Create an empty context.
    pub fn new() -> Self {
        Self {
            surface: Surface::new(),
            registry: Registry::new(),
            visibility: VisibilityState::new(),
            attach: AttachQueue::new(),
        }
    }

    /// Drop every popup, reference, marker, and timer.
    pub fn reset(&mut self) {
        self.surface.clear();
        self.registry.reset();
        self.visibility.clear();
        self.attach = AttachQueue::new();
    }
}

impl<K: Copy + Eq + core::hash::Hash> Default for TooltipContext<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_popup::{factory, Config};
    use canopy_registry::Reference;
    use canopy_trigger::TriggerSet;

    #[test]
    fn reset_clears_every_part() {
        let mut cx: TooltipContext<u32> = TooltipContext::new();
        let popup = cx.surface.push(factory::create("x", &Config::default()));
        cx.registry
            .register(Reference::new(1, popup, TriggerSet::default()))
            .unwrap();
        cx.visibility.show(popup, None, 0);
        cx.attach
            .push(1, popup, Config::default().placement_options());

        cx.reset();

        assert!(cx.surface.is_empty());
        assert!(cx.registry.is_empty());
        assert!(!cx.visibility.is_shown(popup));
        assert!(cx.attach.is_empty());
    }
}
