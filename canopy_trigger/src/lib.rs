// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Trigger: trigger-mode configuration and event-to-action mapping.
//!
//! A tooltip is shown and hidden in response to input events on its anchor
//! element. Which events matter is configured as a set of *trigger modes*,
//! written in host configuration as a space-delimited string such as
//! `"mouseenter focus"`. This crate owns:
//!
//! - [`TriggerSet`]: the parsed, deduplicated set of trigger modes.
//! - [`TriggerSet::parse`]: the strict parser for the configuration string.
//! - [`bindings`]: the listener table — which [`InputEvent`]s a host must
//!   deliver for a given set.
//! - [`action_for`]: the pure mapping from one delivered event to a
//!   [`TriggerAction`] (show or hide), including click-toggle semantics.
//!
//! The crate computes; the host (or a higher-level controller) executes.
//! Nothing here touches timers, popups, or visibility state — the mapping is
//! a total function of `(set, event, currently shown)` so it can be tested
//! exhaustively in isolation.
//!
//! ## Minimal example
//!
//! ```
//! use canopy_trigger::{action_for, bindings, InputEvent, TriggerAction, TriggerSet};
//!
//! let triggers = TriggerSet::parse("mouseenter focus").unwrap();
//!
//! // The host must deliver these four events for this set.
//! assert_eq!(bindings(triggers).len(), 4);
//!
//! // Pointer enter shows; pointer leave hides.
//! assert_eq!(
//!     action_for(triggers, InputEvent::PointerEnter, false),
//!     Some(TriggerAction::Show)
//! );
//! assert_eq!(
//!     action_for(triggers, InputEvent::PointerLeave, true),
//!     Some(TriggerAction::Hide)
//! );
//!
//! // Click is not part of this set.
//! assert_eq!(action_for(triggers, InputEvent::Click, false), None);
//! ```
//!
//! ## Manual mode
//!
//! The `manual` mode reserves a no-listener path: [`bindings`] returns an
//! empty list and [`action_for`] never produces an action. Showing and hiding
//! then happens exclusively through the controller's public entry points.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::{String, ToString};
use smallvec::SmallVec;

bitflags::bitflags! {
    /// Set of trigger modes controlling which input events show or hide a tooltip.
    ///
    /// Parsed once from the space-delimited configuration string; see
    /// [`TriggerSet::parse`] for the accepted tokens.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TriggerSet: u8 {
        /// Token `mouseenter`: show when the pointer enters the anchor, hide when it leaves.
        const POINTER_ENTER = 0b0000_0001;
        /// Token `focus`: show when the anchor gains input focus, hide when it loses it.
        const FOCUS         = 0b0000_0010;
        /// Token `click`: toggle on click (hide if currently shown, else show).
        const CLICK         = 0b0000_0100;
        /// Token `manual`: bind nothing; show/hide only through explicit calls.
        const MANUAL        = 0b0000_1000;
    }
}

impl Default for TriggerSet {
    fn default() -> Self {
        Self::POINTER_ENTER | Self::FOCUS
    }
}

/// Error parsing a trigger configuration string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TriggerParseError {
    /// The string contained no tokens at all.
    Empty,
    /// A token did not name a known trigger mode.
    ///
    /// Carries the offending token. Unknown tokens are rejected rather than
    /// bound as arbitrary event names; the accepted set is closed.
    UnknownMode(String),
}

impl core::fmt::Display for TriggerParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Empty => write!(f, "trigger string contains no modes"),
            Self::UnknownMode(token) => write!(f, "unknown trigger mode `{token}`"),
        }
    }
}

impl core::error::Error for TriggerParseError {}

impl TriggerSet {
    /// Parse a space-delimited trigger string such as `"mouseenter focus"`.
    ///
    /// Accepted tokens: `mouseenter`, `focus`, `click`, `manual`. Tokens may
    /// repeat (the set deduplicates) and surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// [`TriggerParseError::Empty`] when no token is present, and
    /// [`TriggerParseError::UnknownMode`] for any unrecognized token.
    pub fn parse(s: &str) -> Result<Self, TriggerParseError> {
        let mut set = Self::empty();
        let mut seen_any = false;
        for token in s.split_ascii_whitespace() {
            seen_any = true;
            match token {
                "mouseenter" => set |= Self::POINTER_ENTER,
                "focus" => set |= Self::FOCUS,
                "click" => set |= Self::CLICK,
                "manual" => set |= Self::MANUAL,
                other => return Err(TriggerParseError::UnknownMode(other.to_string())),
            }
        }
        if !seen_any {
            return Err(TriggerParseError::Empty);
        }
        Ok(set)
    }
}

/// An input event delivered by the host for a tracked anchor element.
///
/// The host maps its native events onto these (for example DOM `mouseenter`
/// to [`InputEvent::PointerEnter`], `blur` to [`InputEvent::FocusLost`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// The pointer entered the anchor.
    PointerEnter,
    /// The pointer left the anchor.
    PointerLeave,
    /// The anchor gained input focus.
    FocusGained,
    /// The anchor lost input focus.
    FocusLost,
    /// The anchor was clicked.
    Click,
}

/// Action a delivered event maps to for some trigger set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriggerAction {
    /// Show the popup (possibly deferred by a configured delay).
    Show,
    /// Hide the popup.
    Hide,
}

/// Events the host must deliver for the given trigger set.
///
/// Each show-capable mode contributes its paired leave event as well:
/// `mouseenter` contributes pointer enter *and* leave, `focus` contributes
/// focus gained *and* lost. `click` contributes only the click event (it
/// toggles), and `manual` contributes nothing.
///
/// The returned list is in a fixed mode order and free of duplicates, so a
/// host can iterate it to install listeners exactly once.
pub fn bindings(set: TriggerSet) -> SmallVec<[InputEvent; 5]> {
    let mut out = SmallVec::new();
    if set.contains(TriggerSet::POINTER_ENTER) {
        out.push(InputEvent::PointerEnter);
        out.push(InputEvent::PointerLeave);
    }
    if set.contains(TriggerSet::FOCUS) {
        out.push(InputEvent::FocusGained);
        out.push(InputEvent::FocusLost);
    }
    if set.contains(TriggerSet::CLICK) {
        out.push(InputEvent::Click);
    }
    out
}

/// Map one delivered event to an action for the given trigger set.
///
/// `currently_shown` is consulted only for click-toggle: a click hides a
/// shown popup and shows a hidden one. Events whose mode is absent from the
/// set map to `None`; callers treat that as "not our event" and do nothing.
pub fn action_for(
    set: TriggerSet,
    event: InputEvent,
    currently_shown: bool,
) -> Option<TriggerAction> {
    match event {
        InputEvent::PointerEnter if set.contains(TriggerSet::POINTER_ENTER) => {
            Some(TriggerAction::Show)
        }
        InputEvent::PointerLeave if set.contains(TriggerSet::POINTER_ENTER) => {
            Some(TriggerAction::Hide)
        }
        InputEvent::FocusGained if set.contains(TriggerSet::FOCUS) => Some(TriggerAction::Show),
        InputEvent::FocusLost if set.contains(TriggerSet::FOCUS) => Some(TriggerAction::Hide),
        InputEvent::Click if set.contains(TriggerSet::CLICK) => {
            if currently_shown {
                Some(TriggerAction::Hide)
            } else {
                Some(TriggerAction::Show)
            }
        }
        _ => None,
    }
}
