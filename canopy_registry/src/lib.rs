// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Registry: the shared anchor ↔ popup reference registry.
//!
//! ## Overview
//!
//! Every tooltipped element owns exactly one [`Reference`]: the anchor key,
//! the popup created for it, and the trigger modes it was wired with. The
//! [`Registry`] stores these references and resolves them by *either* key in
//! O(1) amortized time (hash maps on both sides — never a linear scan, and
//! no cache rebuilds after batch insertions).
//!
//! One registry instance is intentionally shared across all controller
//! instances in a process so independent tooltip groups can still resolve
//! cross-references. It is an explicit, host-owned service — constructed with
//! [`Registry::new`], passed by reference, reset with [`Registry::reset`] —
//! not implicit global state, which keeps tests and multi-surface hosts
//! honest.
//!
//! ## Lookup tiers
//!
//! Hot paths (event handlers) use [`Registry::find_by_anchor`] /
//! [`Registry::find_by_popup`], which fail silently with `None`: an unknown
//! key means "not a tracked tooltip" and must never panic mid-dispatch.
//! The public accessor tier, [`Registry::lookup`], raises descriptive
//! [`LookupError`]s instead, distinguishing an element that was never
//! processed ([`LookupError::NotATooltipped`]) from a marked element whose
//! reference has gone missing ([`LookupError::UnknownElement`] — a
//! desynchronized registry).
//!
//! ## Minimal example
//!
//! ```
//! use canopy_popup::{factory, Config, Surface};
//! use canopy_registry::{Reference, Registry};
//! use canopy_trigger::TriggerSet;
//!
//! let mut surface = Surface::new();
//! let mut registry: Registry<u32> = Registry::new();
//!
//! let popup = surface.push(factory::create("Hello", &Config::default()));
//! registry
//!     .register(Reference::new(7, popup, TriggerSet::default()))
//!     .unwrap();
//!
//! // Inverse lookups agree.
//! assert_eq!(registry.find_by_anchor(&7).unwrap().popup, popup);
//! assert_eq!(registry.find_by_popup(popup).unwrap().anchor, 7);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};

use canopy_popup::PopupId;
use canopy_trigger::TriggerSet;

/// One registry entry: a tooltipped element paired with its popup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference<K> {
    /// Identity of the anchor element. Externally owned; the registry only
    /// stores the key.
    pub anchor: K,
    /// The popup created for this anchor, owned by the shared surface.
    pub popup: PopupId,
    /// Trigger modes this anchor was wired with, parsed once at creation.
    pub triggers: TriggerSet,
    /// Whether the anchor is currently marked active (shown popup).
    pub active: bool,
}

impl<K> Reference<K> {
    /// Create a reference in the initial (inactive) state.
    pub fn new(anchor: K, popup: PopupId, triggers: TriggerSet) -> Self {
        Self {
            anchor,
            popup,
            triggers,
            active: false,
        }
    }
}

/// Error registering a reference.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RegisterError {
    /// The anchor already has a reference; at most one per element.
    DuplicateAnchor,
    /// The popup is already paired with another anchor.
    DuplicatePopup,
}

impl core::fmt::Display for RegisterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DuplicateAnchor => write!(f, "anchor already has a registered reference"),
            Self::DuplicatePopup => write!(f, "popup is already paired with another anchor"),
        }
    }
}

impl core::error::Error for RegisterError {}

/// Error from the public accessor tier ([`Registry::lookup`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LookupError {
    /// The element lacks the tracking marker: it was never processed as a
    /// tooltipped element.
    NotATooltipped,
    /// The element carries the tracking marker but has no registered popup —
    /// the registry is desynchronized.
    UnknownElement,
}

impl core::fmt::Display for LookupError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotATooltipped => {
                write!(f, "element is not a tooltipped element (no tracking marker)")
            }
            Self::UnknownElement => write!(
                f,
                "element is marked as tooltipped but has no registered popup"
            ),
        }
    }
}

impl core::error::Error for LookupError {}

/// The shared reference registry.
///
/// Generic over the anchor key `K` — any small, copyable, hashable handle the
/// host uses for element identity.
#[derive(Clone, Debug)]
pub struct Registry<K> {
    refs: Vec<Reference<K>>,
    by_anchor: HashMap<K, usize>,
    by_popup: HashMap<PopupId, usize>,
    /// Tracking markers: anchors that have been processed as tooltipped.
    marked: HashSet<K>,
}

impl<K: Copy + Eq + core::hash::Hash> Registry<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            refs: Vec::new(),
            by_anchor: HashMap::new(),
            by_popup: HashMap::new(),
            marked: HashSet::new(),
        }
    }

    /// Apply the tracking marker to an anchor without registering it.
    ///
    /// [`Registry::register`] marks implicitly; this exists for hosts that
    /// mark ahead of registration (and for exercising the desync error path
    /// in tests).
    pub fn mark(&mut self, anchor: K) {
        self.marked.insert(anchor);
    }

    /// Whether the anchor carries the tracking marker.
    pub fn is_marked(&self, anchor: &K) -> bool {
        self.marked.contains(anchor)
    }

    /// Register a reference, marking its anchor.
    ///
    /// # Errors
    ///
    /// Rejects a second reference for the same anchor or the same popup;
    /// both mappings are bijective.
    pub fn register(&mut self, reference: Reference<K>) -> Result<(), RegisterError> {
        if self.by_anchor.contains_key(&reference.anchor) {
            return Err(RegisterError::DuplicateAnchor);
        }
        if self.by_popup.contains_key(&reference.popup) {
            return Err(RegisterError::DuplicatePopup);
        }
        let slot = self.refs.len();
        self.by_anchor.insert(reference.anchor, slot);
        self.by_popup.insert(reference.popup, slot);
        self.marked.insert(reference.anchor);
        self.refs.push(reference);
        Ok(())
    }

    /// Find the reference for an anchor. `None` means "not a tracked tooltip".
    pub fn find_by_anchor(&self, anchor: &K) -> Option<&Reference<K>> {
        self.by_anchor.get(anchor).map(|&slot| &self.refs[slot])
    }

    /// Find the reference owning a popup. `None` means "not a tracked tooltip".
    pub fn find_by_popup(&self, popup: PopupId) -> Option<&Reference<K>> {
        self.by_popup.get(&popup).map(|&slot| &self.refs[slot])
    }

    /// Resolve an anchor for a public caller, raising descriptive errors.
    ///
    /// Unlike the silent finders, this distinguishes the two failure modes a
    /// caller can act on: the argument was never a tooltipped element, or it
    /// is marked as one but the registry has no popup for it.
    pub fn lookup(&self, anchor: &K) -> Result<&Reference<K>, LookupError> {
        if !self.is_marked(anchor) {
            return Err(LookupError::NotATooltipped);
        }
        self.find_by_anchor(anchor)
            .ok_or(LookupError::UnknownElement)
    }

    /// Set the anchor-active marker. Returns `false` for untracked anchors.
    pub fn set_active(&mut self, anchor: &K, active: bool) -> bool {
        match self.by_anchor.get(anchor) {
            Some(&slot) => {
                self.refs[slot].active = active;
                true
            }
            None => false,
        }
    }

    /// Whether the anchor is currently marked active.
    pub fn is_active(&self, anchor: &K) -> bool {
        self.find_by_anchor(anchor).is_some_and(|r| r.active)
    }

    /// Number of registered references.
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// Whether the registry holds no references.
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Iterate over all references in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Reference<K>> {
        self.refs.iter()
    }

    /// Drop every reference and marker, returning the registry to its
    /// freshly-constructed state.
    pub fn reset(&mut self) {
        self.refs.clear();
        self.by_anchor.clear();
        self.by_popup.clear();
        self.marked.clear();
    }
}

impl<K: Copy + Eq + core::hash::Hash> Default for Registry<K> {
    fn default() -> Self {
        Self::new()
    }
}
