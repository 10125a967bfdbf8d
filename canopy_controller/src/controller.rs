// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The controller: one tooltip group and its behavior.

use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

use canopy_popup::{factory, AnimationClass, Config, PopupId, PositionEngine};
use canopy_registry::{LookupError, Reference};
use canopy_trigger::{action_for, InputEvent, TriggerAction};
use canopy_visibility::{HideOutcome, VisibilityEvent};

use crate::context::TooltipContext;
use crate::host::HostDocument;

/// A side effect the host applies after a controller call.
///
/// The controller mutates only Canopy-owned state (popups, registry,
/// visibility); anything touching the host's world is reported as an effect.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect<K> {
    /// Move input focus to the popup.
    FocusPopup(PopupId),
    /// The anchor became active (its popup is showing); style accordingly.
    AnchorActivated(K),
    /// The anchor became inactive (its popup is hiding).
    AnchorDeactivated(K),
}

/// Effect list returned from controller calls. Usually zero to two entries.
pub type Effects<K> = SmallVec<[Effect<K>; 4]>;

/// One tooltip group: a selector and the configuration applied to every
/// tooltip the group creates.
///
/// Controllers are cheap and hold no element state; everything shared lives
/// in the [`TooltipContext`]. Several controllers with different selectors
/// and configs can drive the same context, which is how independent tooltip
/// groups still resolve cross-references.
#[derive(Clone, Debug)]
pub struct Controller {
    selector: String,
    config: Config,
}

impl Controller {
    /// Create a controller for the elements matching `selector`.
    pub fn new(selector: impl Into<String>, config: Config) -> Self {
        Self {
            selector: selector.into(),
            config,
        }
    }

    /// The selector this group scans for.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// The group's configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scan the host for matching elements and create their tooltips.
    ///
    /// For each element, in document order: consume its title; skip it when
    /// the title is missing or empty (unless `config.html` is set, which
    /// admits title-less elements); skip it when it is already tracked, so
    /// repeated scans never double-create. Otherwise build the popup, append
    /// it to the surface, queue the positioning-engine attachment, and
    /// register the reference.
    ///
    /// Returns the number of tooltips created.
    pub fn init<K, H>(&self, host: &mut H, cx: &mut TooltipContext<K>) -> usize
    where
        K: Copy + Eq + core::hash::Hash,
        H: HostDocument<K>,
    {
        let mut created = 0;
        for el in host.select(&self.selector) {
            if cx.registry.find_by_anchor(&el).is_some() {
                continue;
            }
            let title = host.take_title(&el).unwrap_or_default();
            if title.is_empty() && !self.config.html {
                continue;
            }

            let popup = cx
                .surface
                .push(factory::create_for_group(&title, &self.config, &self.selector));
            cx.attach.push(el, popup, self.config.placement_options());
            if cx
                .registry
                .register(Reference::new(el, popup, self.config.trigger))
                .is_ok()
            {
                created += 1;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(created, "tooltip group initialized");

        created
    }

    /// Handle an input event delivered for `anchor`.
    ///
    /// Untracked anchors and events outside the anchor's trigger set are
    /// silent no-ops — this runs inside event dispatch, where failing loudly
    /// would abort unrelated propagation. Show actions honor `config.delay`;
    /// hide actions cancel a pending delayed show before anything else.
    pub fn handle_event<K>(
        &self,
        cx: &mut TooltipContext<K>,
        anchor: K,
        event: InputEvent,
        now: u64,
    ) -> Effects<K>
    where
        K: Copy + Eq + core::hash::Hash,
    {
        let Some(reference) = cx.registry.find_by_anchor(&anchor) else {
            return Effects::new();
        };
        let popup = reference.popup;
        let triggers = reference.triggers;

        match action_for(triggers, event, cx.visibility.is_shown(popup)) {
            Some(TriggerAction::Show) => {
                if self.config.delay > 0 {
                    // Defer; the stored deadline is the cancellable timer.
                    cx.visibility.schedule_show(
                        popup,
                        now + self.config.delay,
                        Some(self.config.duration),
                    );
                    Effects::new()
                } else {
                    self.apply_show(cx, anchor, popup, now)
                }
            }
            Some(TriggerAction::Hide) => self.apply_hide(cx, anchor, popup, now),
            None => Effects::new(),
        }
    }

    /// Show a tracked popup immediately (the `manual` path, also usable
    /// programmatically). No delay is applied. Unknown popups are a no-op.
    pub fn show_popup<K>(&self, cx: &mut TooltipContext<K>, popup: PopupId, now: u64) -> Effects<K>
    where
        K: Copy + Eq + core::hash::Hash,
    {
        let Some(reference) = cx.registry.find_by_popup(popup) else {
            return Effects::new();
        };
        let anchor = reference.anchor;
        self.apply_show(cx, anchor, popup, now)
    }

    /// Hide a tracked popup (the `manual` path). Unknown popups are a no-op.
    pub fn hide_popup<K>(&self, cx: &mut TooltipContext<K>, popup: PopupId, now: u64) -> Effects<K>
    where
        K: Copy + Eq + core::hash::Hash,
    {
        let Some(reference) = cx.registry.find_by_popup(popup) else {
            return Effects::new();
        };
        let anchor = reference.anchor;
        self.apply_hide(cx, anchor, popup, now)
    }

    /// Resolve the popup for an anchor, for public callers.
    ///
    /// Unlike the internal silent lookups this raises descriptive errors:
    /// [`LookupError::NotATooltipped`] when the element was never processed,
    /// [`LookupError::UnknownElement`] when it is marked but unregistered.
    pub fn popup_for<K>(&self, cx: &TooltipContext<K>, anchor: &K) -> Result<PopupId, LookupError>
    where
        K: Copy + Eq + core::hash::Hash,
    {
        cx.registry.lookup(anchor).map(|r| r.popup)
    }

    /// Pump timers: fire due delayed shows and complete running transitions.
    ///
    /// Call with a monotonic millisecond timestamp whenever the host ticks.
    pub fn tick<K>(&self, cx: &mut TooltipContext<K>, now: u64) -> Effects<K>
    where
        K: Copy + Eq + core::hash::Hash,
    {
        let mut effects = Effects::new();
        for event in cx.visibility.tick(now) {
            match event {
                VisibilityEvent::ShowFired(popup, duration) => {
                    // The machine has transitioned; apply the popup-side show
                    // effects the controller owns.
                    if let Some(node) = cx.surface.get_mut(popup) {
                        if let Some(d) = duration {
                            node.tooltip.transition.set(d);
                        }
                        node.tooltip.animation_class = AnimationClass::Enter;
                    }
                    if let Some(reference) = cx.registry.find_by_popup(popup) {
                        let anchor = reference.anchor;
                        cx.registry.set_active(&anchor, true);
                        effects.push(Effect::AnchorActivated(anchor));
                    }
                    effects.push(Effect::FocusPopup(popup));
                }
                // Transition completions settle state inside the machine.
                // LeaveComplete is the hook point for future teardown.
                VisibilityEvent::EnterComplete(_) | VisibilityEvent::LeaveComplete(_) => {}
            }
        }
        effects
    }

    /// Drain queued positioning-engine attachments, in creation order.
    ///
    /// Live updates are enabled on every handle; the handles are returned to
    /// the host, which owns their lifetime. Canopy never cancels tracking.
    pub fn flush_attach<K, E>(&self, cx: &mut TooltipContext<K>, engine: &mut E) -> Vec<E::Handle>
    where
        K: Copy + Eq + core::hash::Hash,
        E: PositionEngine<K>,
    {
        cx.attach.flush(engine)
    }

    fn apply_show<K>(
        &self,
        cx: &mut TooltipContext<K>,
        anchor: K,
        popup: PopupId,
        now: u64,
    ) -> Effects<K>
    where
        K: Copy + Eq + core::hash::Hash,
    {
        let mut effects = Effects::new();
        if !cx
            .visibility
            .show(popup, Some(self.config.duration), now)
        {
            return effects;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(?popup, "show");

        if let Some(node) = cx.surface.get_mut(popup) {
            node.tooltip.transition.set(self.config.duration);
            node.tooltip.animation_class = AnimationClass::Enter;
        }
        cx.registry.set_active(&anchor, true);
        effects.push(Effect::AnchorActivated(anchor));
        effects.push(Effect::FocusPopup(popup));
        effects
    }

    fn apply_hide<K>(
        &self,
        cx: &mut TooltipContext<K>,
        anchor: K,
        popup: PopupId,
        now: u64,
    ) -> Effects<K>
    where
        K: Copy + Eq + core::hash::Hash,
    {
        // The leave duration comes from the popup's recorded transition
        // timing (primary, then legacy); unset resolves to a synchronous hide.
        let duration = cx
            .surface
            .get(popup)
            .and_then(|node| node.tooltip.transition.resolve());

        let mut effects = Effects::new();
        if cx.visibility.hide(popup, duration, now) != HideOutcome::DidHide {
            return effects;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(?popup, "hide");

        if let Some(node) = cx.surface.get_mut(popup) {
            node.tooltip.animation_class = AnimationClass::Leave;
        }
        cx.registry.set_active(&anchor, false);
        effects.push(Effect::AnchorDeactivated(anchor));
        effects
    }
}
