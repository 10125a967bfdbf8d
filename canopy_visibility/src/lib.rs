// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Visibility: the per-popup show/hide state machine.
//!
//! Visibility is an explicit field per popup — `Hidden → Entering → Visible`
//! on show, `Visible → Leaving → Hidden` on hide — never inferred from
//! rendered style. The machine is generic over the popup key `P` and driven
//! entirely by caller-supplied millisecond timestamps, so every transition
//! (including timer-based ones) is deterministic and testable without a
//! rendering environment or a clock.
//!
//! Time-dependent behavior is expressed as deadlines:
//!
//! - A *delayed show* is a stored [`PendingShow`] deadline. Storing another
//!   one overwrites it (last-writer-wins), so there is at most one pending
//!   show per popup, and [`VisibilityState::hide`] cancels it before it can
//!   fire. This is the whole cancellation semantic of the system.
//! - Enter/leave transitions carry a completion deadline when a duration is
//!   known. A missing or zero duration completes synchronously.
//!
//! The host pumps [`VisibilityState::tick`] with the current time; due
//! deadlines fire in key order and are reported as [`VisibilityEvent`]s so a
//! higher layer can apply side effects (class swaps, focus moves, anchor
//! activation) it owns.
//!
//! ## Minimal example
//!
//! ```
//! use canopy_visibility::{HideOutcome, Visibility, VisibilityState};
//!
//! let mut vis: VisibilityState<u32> = VisibilityState::new();
//!
//! // Schedule a delayed show for popup 1 at t=300.
//! vis.schedule_show(1, 300, Some(400));
//!
//! // A hide at t=100 cancels the pending show before it fires.
//! assert_eq!(vis.hide(1, None, 100), HideOutcome::AlreadyHidden);
//! assert!(vis.tick(1_000).is_empty());
//! assert_eq!(vis.visibility(1), Visibility::Hidden);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

/// Visibility of one popup.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    /// Not shown. The initial state.
    #[default]
    Hidden,
    /// Show started; the enter transition is running.
    Entering,
    /// Fully shown.
    Visible,
    /// Hide started; the leave transition is running.
    Leaving,
}

impl Visibility {
    /// Whether this state counts as shown for trigger purposes
    /// (click-toggle, repeat-show suppression).
    pub const fn is_shown(self) -> bool {
        matches!(self, Self::Entering | Self::Visible)
    }
}

/// A stored delayed show: fire time plus the transition duration to show with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PendingShow {
    /// Absolute time (milliseconds) the show fires at.
    pub fire_at: u64,
    /// Transition duration to apply when it fires.
    pub duration: Option<u64>,
}

/// Outcome of a [`VisibilityState::hide`] call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HideOutcome {
    /// The popup was shown (or entering) and is now leaving or hidden.
    /// The caller applies its side of the transition: class swap, anchor
    /// deactivation.
    DidHide,
    /// The popup was already hidden; nothing changed. Any pending delayed
    /// show was still cancelled.
    AlreadyHidden,
}

/// Timer-driven transition reported by [`VisibilityState::tick`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VisibilityEvent<P> {
    /// A pending delayed show came due and the popup is now showing.
    /// Carries the duration the show was scheduled with so the caller can
    /// apply the side effects it owns.
    ShowFired(P, Option<u64>),
    /// An enter transition completed; the popup settled `Visible`.
    EnterComplete(P),
    /// A leave transition completed; the popup settled `Hidden`.
    /// Hook point for future teardown; carries no further mutation.
    LeaveComplete(P),
}

#[derive(Clone, Debug, Default)]
struct Record {
    visibility: Visibility,
    /// Completion deadline for a running enter/leave transition.
    deadline: Option<u64>,
    pending_show: Option<PendingShow>,
}

/// Show/hide state for any number of popups, keyed by `P`.
///
/// Absent keys are `Hidden`; records are created lazily on first use, so the
/// machine needs no registration step.
#[derive(Clone, Debug)]
pub struct VisibilityState<P> {
    records: BTreeMap<P, Record>,
}

impl<P: Ord + Copy> VisibilityState<P> {
    /// Create an empty machine; every popup starts `Hidden`.
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Current visibility of `popup`.
    pub fn visibility(&self, popup: P) -> Visibility {
        self.records
            .get(&popup)
            .map(|r| r.visibility)
            .unwrap_or_default()
    }

    /// Whether `popup` counts as shown (entering or visible).
    pub fn is_shown(&self, popup: P) -> bool {
        self.visibility(popup).is_shown()
    }

    /// The pending delayed show for `popup`, if any.
    pub fn pending_show(&self, popup: P) -> Option<PendingShow> {
        self.records.get(&popup).and_then(|r| r.pending_show)
    }

    /// Store a delayed show firing at `fire_at`.
    ///
    /// Overwrites any earlier pending show — last writer wins, so at most one
    /// show timer exists per popup.
    pub fn schedule_show(&mut self, popup: P, fire_at: u64, duration: Option<u64>) {
        self.records.entry(popup).or_default().pending_show =
            Some(PendingShow { fire_at, duration });
    }

    /// Cancel a pending delayed show. Returns whether one was pending.
    pub fn cancel_pending_show(&mut self, popup: P) -> bool {
        self.records
            .get_mut(&popup)
            .and_then(|r| r.pending_show.take())
            .is_some()
    }

    /// Show `popup` now.
    ///
    /// Returns `true` when a transition started: `Entering` with a completion
    /// deadline for a nonzero `duration`, `Visible` immediately otherwise.
    /// Showing an already-shown popup is a no-op returning `false` (the
    /// running transition keeps its deadline). Either way any pending delayed
    /// show is superseded and cleared.
    pub fn show(&mut self, popup: P, duration: Option<u64>, now: u64) -> bool {
        let record = self.records.entry(popup).or_default();
        record.pending_show = None;

        if record.visibility.is_shown() {
            return false;
        }

        match duration {
            Some(d) if d > 0 => {
                record.visibility = Visibility::Entering;
                record.deadline = Some(now + d);
            }
            _ => {
                record.visibility = Visibility::Visible;
                record.deadline = None;
            }
        }
        true
    }

    /// Hide `popup` now.
    ///
    /// Always cancels a pending delayed show first — a hide racing a delay
    /// timer must win. Hiding an already-hidden popup is otherwise a no-op
    /// ([`HideOutcome::AlreadyHidden`]): no state change, no event, nothing
    /// for the caller to apply.
    ///
    /// A nonzero `duration` enters `Leaving` with a completion deadline; a
    /// missing or zero duration completes the hide synchronously.
    pub fn hide(&mut self, popup: P, duration: Option<u64>, now: u64) -> HideOutcome {
        let record = self.records.entry(popup).or_default();
        record.pending_show = None;

        if !record.visibility.is_shown() {
            // Hidden, or a leave is already running with its own deadline.
            return HideOutcome::AlreadyHidden;
        }

        match duration {
            Some(d) if d > 0 => {
                record.visibility = Visibility::Leaving;
                record.deadline = Some(now + d);
            }
            _ => {
                record.visibility = Visibility::Hidden;
                record.deadline = None;
            }
        }
        HideOutcome::DidHide
    }

    /// Fire everything due at `now`: pending shows first, then transition
    /// completions. Events are reported in key order.
    pub fn tick(&mut self, now: u64) -> Vec<VisibilityEvent<P>> {
        let mut events = Vec::new();

        // Collect due pending shows first; firing one may start an enter
        // transition whose deadline is checked on a later tick, not this one.
        let due: Vec<P> = self
            .records
            .iter()
            .filter(|(_, r)| r.pending_show.is_some_and(|p| p.fire_at <= now))
            .map(|(&popup, _)| popup)
            .collect();
        for popup in due {
            let pending = self.records.get_mut(&popup).and_then(|r| r.pending_show.take());
            if let Some(pending) = pending
                && self.show(popup, pending.duration, now)
            {
                events.push(VisibilityEvent::ShowFired(popup, pending.duration));
            }
        }

        for (&popup, record) in self.records.iter_mut() {
            let Some(deadline) = record.deadline else {
                continue;
            };
            if deadline > now {
                continue;
            }
            match record.visibility {
                Visibility::Entering => {
                    record.visibility = Visibility::Visible;
                    record.deadline = None;
                    events.push(VisibilityEvent::EnterComplete(popup));
                }
                Visibility::Leaving => {
                    record.visibility = Visibility::Hidden;
                    record.deadline = None;
                    events.push(VisibilityEvent::LeaveComplete(popup));
                }
                // A deadline only accompanies a running transition.
                Visibility::Hidden | Visibility::Visible => {
                    record.deadline = None;
                }
            }
        }

        events
    }

    /// Drop all state; every popup reads `Hidden` again.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<P: Ord + Copy> Default for VisibilityState<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_hidden() {
        let vis: VisibilityState<u32> = VisibilityState::new();
        assert_eq!(vis.visibility(1), Visibility::Hidden);
        assert!(!vis.is_shown(1));
    }

    #[test]
    fn show_with_duration_enters_then_completes() {
        let mut vis: VisibilityState<u32> = VisibilityState::new();
        assert!(vis.show(1, Some(400), 1_000));
        assert_eq!(vis.visibility(1), Visibility::Entering);
        assert!(vis.is_shown(1));

        // Not due yet.
        assert!(vis.tick(1_399).is_empty());
        assert_eq!(vis.visibility(1), Visibility::Entering);

        let events = vis.tick(1_400);
        assert_eq!(events, alloc::vec![VisibilityEvent::EnterComplete(1)]);
        assert_eq!(vis.visibility(1), Visibility::Visible);
    }

    #[test]
    fn show_without_duration_is_visible_immediately() {
        let mut vis: VisibilityState<u32> = VisibilityState::new();
        assert!(vis.show(1, None, 0));
        assert_eq!(vis.visibility(1), Visibility::Visible);
        assert!(vis.tick(10_000).is_empty());
    }

    #[test]
    fn show_with_zero_duration_is_visible_immediately() {
        let mut vis: VisibilityState<u32> = VisibilityState::new();
        assert!(vis.show(1, Some(0), 0));
        assert_eq!(vis.visibility(1), Visibility::Visible);
    }

    #[test]
    fn repeat_show_is_a_noop() {
        let mut vis: VisibilityState<u32> = VisibilityState::new();
        assert!(vis.show(1, Some(400), 0));
        assert!(!vis.show(1, Some(400), 100));
        // The original deadline is preserved, not restarted.
        assert!(vis.tick(399).is_empty());
        assert_eq!(vis.tick(400), alloc::vec![VisibilityEvent::EnterComplete(1)]);
        assert!(!vis.show(1, Some(400), 500));
        assert_eq!(vis.visibility(1), Visibility::Visible);
    }

    #[test]
    fn hide_with_duration_leaves_then_completes() {
        let mut vis: VisibilityState<u32> = VisibilityState::new();
        vis.show(1, None, 0);
        assert_eq!(vis.hide(1, Some(400), 1_000), HideOutcome::DidHide);
        assert_eq!(vis.visibility(1), Visibility::Leaving);
        assert!(!vis.is_shown(1));

        let events = vis.tick(1_400);
        assert_eq!(events, alloc::vec![VisibilityEvent::LeaveComplete(1)]);
        assert_eq!(vis.visibility(1), Visibility::Hidden);
    }

    #[test]
    fn hide_without_duration_completes_synchronously() {
        let mut vis: VisibilityState<u32> = VisibilityState::new();
        vis.show(1, None, 0);
        assert_eq!(vis.hide(1, None, 0), HideOutcome::DidHide);
        assert_eq!(vis.visibility(1), Visibility::Hidden);
        assert!(vis.tick(10_000).is_empty());
    }

    #[test]
    fn hide_when_already_hidden_is_a_noop() {
        let mut vis: VisibilityState<u32> = VisibilityState::new();
        assert_eq!(vis.hide(1, Some(400), 0), HideOutcome::AlreadyHidden);
        assert_eq!(vis.visibility(1), Visibility::Hidden);
        assert!(vis.tick(10_000).is_empty());
    }

    #[test]
    fn hide_during_leave_keeps_the_running_transition() {
        let mut vis: VisibilityState<u32> = VisibilityState::new();
        vis.show(1, None, 0);
        assert_eq!(vis.hide(1, Some(400), 1_000), HideOutcome::DidHide);
        // Second hide while leaving: no restart, original deadline stands.
        assert_eq!(vis.hide(1, Some(400), 1_200), HideOutcome::AlreadyHidden);
        assert_eq!(vis.tick(1_400), alloc::vec![VisibilityEvent::LeaveComplete(1)]);
    }

    #[test]
    fn hide_during_enter_transitions_to_leaving() {
        let mut vis: VisibilityState<u32> = VisibilityState::new();
        vis.show(1, Some(400), 0);
        assert_eq!(vis.visibility(1), Visibility::Entering);
        assert_eq!(vis.hide(1, Some(400), 100), HideOutcome::DidHide);
        assert_eq!(vis.visibility(1), Visibility::Leaving);
        // Only the leave completion fires; the abandoned enter deadline is gone.
        assert_eq!(vis.tick(1_000), alloc::vec![VisibilityEvent::LeaveComplete(1)]);
        assert_eq!(vis.visibility(1), Visibility::Hidden);
    }

    #[test]
    fn scheduled_show_fires_on_tick() {
        let mut vis: VisibilityState<u32> = VisibilityState::new();
        vis.schedule_show(1, 300, Some(400));
        assert_eq!(
            vis.pending_show(1),
            Some(PendingShow {
                fire_at: 300,
                duration: Some(400),
            })
        );

        assert!(vis.tick(299).is_empty());
        assert_eq!(vis.visibility(1), Visibility::Hidden);

        let events = vis.tick(300);
        assert_eq!(events, alloc::vec![VisibilityEvent::ShowFired(1, Some(400))]);
        assert_eq!(vis.visibility(1), Visibility::Entering);
        assert!(vis.pending_show(1).is_none());
    }

    #[test]
    fn scheduled_show_fires_only_once() {
        let mut vis: VisibilityState<u32> = VisibilityState::new();
        vis.schedule_show(1, 300, None);
        assert_eq!(vis.tick(300), alloc::vec![VisibilityEvent::ShowFired(1, None)]);
        assert!(vis.tick(400).is_empty());
    }

    #[test]
    fn rescheduling_overwrites_the_pending_show() {
        let mut vis: VisibilityState<u32> = VisibilityState::new();
        vis.schedule_show(1, 300, None);
        vis.schedule_show(1, 500, None);

        // Only the most recent deadline exists: nothing fires at the first.
        assert!(vis.tick(300).is_empty());
        assert_eq!(vis.visibility(1), Visibility::Hidden);

        assert_eq!(vis.tick(500), alloc::vec![VisibilityEvent::ShowFired(1, None)]);
    }

    #[test]
    fn hide_cancels_a_pending_show_before_it_fires() {
        let mut vis: VisibilityState<u32> = VisibilityState::new();
        // Enter at t=0 with delay 300; leave at t=100.
        vis.schedule_show(1, 300, Some(400));
        assert_eq!(vis.hide(1, None, 100), HideOutcome::AlreadyHidden);
        assert!(vis.pending_show(1).is_none());

        // The popup never shows.
        assert!(vis.tick(300).is_empty());
        assert!(vis.tick(10_000).is_empty());
        assert_eq!(vis.visibility(1), Visibility::Hidden);
    }

    #[test]
    fn direct_show_supersedes_a_pending_show() {
        let mut vis: VisibilityState<u32> = VisibilityState::new();
        vis.schedule_show(1, 300, None);
        assert!(vis.show(1, None, 100));
        assert!(vis.pending_show(1).is_none());
        // Nothing re-fires at the old deadline.
        assert!(vis.tick(300).is_empty());
        assert_eq!(vis.visibility(1), Visibility::Visible);
    }

    #[test]
    fn cancel_pending_show_reports_whether_one_existed() {
        let mut vis: VisibilityState<u32> = VisibilityState::new();
        assert!(!vis.cancel_pending_show(1));
        vis.schedule_show(1, 300, None);
        assert!(vis.cancel_pending_show(1));
        assert!(!vis.cancel_pending_show(1));
    }

    #[test]
    fn pending_show_firing_while_shown_emits_nothing() {
        let mut vis: VisibilityState<u32> = VisibilityState::new();
        vis.show(1, None, 0);
        vis.schedule_show(1, 100, None);
        // Already visible when the deadline passes: the fire is a no-op.
        assert!(vis.tick(100).is_empty());
        assert_eq!(vis.visibility(1), Visibility::Visible);
    }

    #[test]
    fn popups_are_tracked_independently() {
        let mut vis: VisibilityState<u32> = VisibilityState::new();
        vis.show(1, Some(400), 0);
        vis.schedule_show(2, 300, None);
        vis.show(3, None, 0);
        vis.hide(3, Some(200), 50);

        let events = vis.tick(400);
        assert_eq!(
            events,
            alloc::vec![
                VisibilityEvent::ShowFired(2, None),
                VisibilityEvent::EnterComplete(1),
                VisibilityEvent::LeaveComplete(3),
            ]
        );
        assert_eq!(vis.visibility(1), Visibility::Visible);
        assert_eq!(vis.visibility(2), Visibility::Visible);
        assert_eq!(vis.visibility(3), Visibility::Hidden);
    }

    #[test]
    fn show_then_immediate_hide_ends_hidden_regardless_of_delay() {
        let mut vis: VisibilityState<u32> = VisibilityState::new();
        for delay in [0_u64, 100, 300, 1_000] {
            vis.clear();
            if delay == 0 {
                vis.show(1, Some(400), 0);
            } else {
                vis.schedule_show(1, delay, Some(400));
            }
            vis.hide(1, None, 0);
            vis.tick(delay + 10_000);
            assert_eq!(vis.visibility(1), Visibility::Hidden);
        }
    }

    #[test]
    fn clear_resets_everything_to_hidden() {
        let mut vis: VisibilityState<u32> = VisibilityState::new();
        vis.show(1, Some(400), 0);
        vis.schedule_show(2, 300, None);
        vis.clear();
        assert_eq!(vis.visibility(1), Visibility::Hidden);
        assert!(vis.pending_show(2).is_none());
        assert!(vis.tick(10_000).is_empty());
    }
}
