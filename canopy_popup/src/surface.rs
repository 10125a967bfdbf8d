// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared popup surface: a generational arena of popup nodes.

use alloc::vec::Vec;

use kurbo::Point;

use crate::types::Popup;

/// Generational handle for popups on a [`Surface`].
///
/// Slots are reused after removal with a bumped generation, so stale handles
/// miss instead of aliasing a newer popup. The `Ord` impl is arbitrary but
/// stable, so ids can key ordered maps.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PopupId(u32, u32);

impl PopupId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Popup ids are intentionally 32-bit; higher bits are truncated by design."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// One arena slot. The generation outlives the popup so reuse after removal
/// always bumps past every handle ever issued for the slot.
#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    popup: Option<Popup>,
}

/// The shared container all popups are appended to.
///
/// The document-body analogue: one global container per process (or per
/// host-chosen scope), shared across all controller instances, with no
/// per-anchor nesting. Popups live here until
/// teardown; the controller never removes them, but [`Surface::remove`] and
/// [`Surface::clear`] exist as primitives for hosts that build their own
/// teardown path.
#[derive(Debug, Default)]
pub struct Surface {
    slots: Vec<Slot>,
    free_list: Vec<usize>,
    len: usize,
}

impl Surface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a popup, returning its stable handle.
    pub fn push(&mut self, popup: Popup) -> PopupId {
        self.len += 1;
        if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx];
            slot.generation += 1;
            slot.popup = Some(popup);
            PopupId::new(idx, slot.generation)
        } else {
            self.slots.push(Slot {
                generation: 1,
                popup: Some(popup),
            });
            PopupId::new(self.slots.len() - 1, 1)
        }
    }

    /// Get a popup by handle. Stale or foreign handles return `None`.
    pub fn get(&self, id: PopupId) -> Option<&Popup> {
        self.slots
            .get(id.idx())
            .filter(|slot| slot.generation == id.1)
            .and_then(|slot| slot.popup.as_ref())
    }

    /// Get a mutable popup by handle.
    pub fn get_mut(&mut self, id: PopupId) -> Option<&mut Popup> {
        self.slots
            .get_mut(id.idx())
            .filter(|slot| slot.generation == id.1)
            .and_then(|slot| slot.popup.as_mut())
    }

    /// Whether the handle refers to a live popup.
    pub fn contains(&self, id: PopupId) -> bool {
        self.get(id).is_some()
    }

    /// Remove a popup, returning it. Stale handles return `None`.
    ///
    /// The slot is recycled with a bumped generation on the next push.
    pub fn remove(&mut self, id: PopupId) -> Option<Popup> {
        let slot = self
            .slots
            .get_mut(id.idx())
            .filter(|slot| slot.generation == id.1)?;
        let popup = slot.popup.take()?;
        self.free_list.push(id.idx());
        self.len -= 1;
        Some(popup)
    }

    /// Remove every popup and reset all slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.len = 0;
    }

    /// Number of live popups.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the surface holds no popups.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over live popups with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (PopupId, &Popup)> {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.popup
                .as_ref()
                .map(|popup| (PopupId::new(idx, slot.generation), popup))
        })
    }

    /// Record the screen position the positioning engine computed for a popup.
    ///
    /// Silent no-op for stale handles; the engine may report late.
    pub fn set_position(&mut self, id: PopupId, position: Point) {
        if let Some(popup) = self.get_mut(id) {
            popup.position = Some(position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::factory;

    fn popup(title: &str) -> Popup {
        factory::create(title, &Config::default())
    }

    #[test]
    fn push_then_get_round_trips() {
        let mut surface = Surface::new();
        let id = surface.push(popup("a"));
        assert_eq!(surface.get(id).unwrap().tooltip.content.as_str(), "a");
        assert_eq!(surface.len(), 1);
        assert!(!surface.is_empty());
    }

    #[test]
    fn ids_are_distinct_per_push() {
        let mut surface = Surface::new();
        let a = surface.push(popup("a"));
        let b = surface.push(popup("b"));
        assert_ne!(a, b);
        assert_eq!(surface.len(), 2);
    }

    #[test]
    fn removed_slot_is_reused_with_new_generation() {
        let mut surface = Surface::new();
        let a = surface.push(popup("a"));
        let removed = surface.remove(a).unwrap();
        assert_eq!(removed.tooltip.content.as_str(), "a");
        assert!(surface.is_empty());

        let b = surface.push(popup("b"));
        // Same slot, bumped generation: the stale handle misses.
        assert!(surface.get(a).is_none());
        assert_eq!(surface.get(b).unwrap().tooltip.content.as_str(), "b");
        assert_ne!(a, b);
    }

    #[test]
    fn generations_never_repeat_across_reuse_cycles() {
        let mut surface = Surface::new();
        let a = surface.push(popup("a"));
        surface.remove(a);
        let b = surface.push(popup("b"));
        surface.remove(b);
        let c = surface.push(popup("c"));
        // Two full remove/push cycles on one slot: every older handle misses.
        assert!(surface.get(a).is_none());
        assert!(surface.get(b).is_none());
        assert_eq!(surface.get(c).unwrap().tooltip.content.as_str(), "c");
    }

    #[test]
    fn remove_with_stale_handle_is_none() {
        let mut surface = Surface::new();
        let a = surface.push(popup("a"));
        assert!(surface.remove(a).is_some());
        assert!(surface.remove(a).is_none());
    }

    #[test]
    fn clear_empties_everything() {
        let mut surface = Surface::new();
        let a = surface.push(popup("a"));
        surface.push(popup("b"));
        surface.clear();
        assert!(surface.is_empty());
        assert!(surface.get(a).is_none());
    }

    #[test]
    fn iter_visits_live_popups_with_matching_ids() {
        let mut surface = Surface::new();
        let a = surface.push(popup("a"));
        let b = surface.push(popup("b"));
        surface.remove(a);

        let visited: Vec<_> = surface
            .iter()
            .map(|(id, p)| (id, p.tooltip.content.as_str()))
            .collect();
        assert_eq!(visited, alloc::vec![(b, "b")]);
    }

    #[test]
    fn set_position_writes_through() {
        let mut surface = Surface::new();
        let id = surface.push(popup("a"));
        surface.set_position(id, Point::new(10.0, 20.0));
        assert_eq!(
            surface.get(id).unwrap().position,
            Some(Point::new(10.0, 20.0))
        );
    }

    #[test]
    fn set_position_on_stale_handle_is_a_noop() {
        let mut surface = Surface::new();
        let id = surface.push(popup("a"));
        surface.remove(id);
        surface.set_position(id, Point::new(1.0, 1.0));
        assert!(surface.get(id).is_none());
    }
}
