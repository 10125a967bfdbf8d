// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The positioning-engine seam and the deferred attach queue.
//!
//! Placement math — flipping, boundary detection, offset computation — is
//! the job of an external collaborator. This module only defines the shape
//! of that collaboration:
//!
//! - [`PositionEngine::attach`] pairs an anchor with a popup under a
//!   [`PlacementOptions`] hint and returns a handle.
//! - [`AttachHandle::enable_live_updates`] starts continuous tracking. Canopy
//!   never stops it; handles are returned to the host, which owns their
//!   lifetime.
//! - Engines report computed coordinates by writing
//!   [`Surface::set_position`](crate::Surface::set_position).
//!
//! Attachment is deliberately not synchronous with popup creation: engines
//! typically measure layout, which is only meaningful after the host has
//! actually inserted the popup. Creation therefore records an
//! [`AttachRequest`] on an [`AttachQueue`], and the host flushes the queue on
//! its next tick.

use alloc::vec::Vec;

use crate::surface::PopupId;
use crate::types::PlacementOptions;

/// External positioning collaborator.
///
/// Generic over the host's anchor key `K`, like every Canopy seam. Engines
/// resolve `K` to real geometry themselves; Canopy hands over identities and
/// hints only.
pub trait PositionEngine<K> {
    /// Live attachment produced by [`attach`](Self::attach).
    type Handle: AttachHandle;

    /// Pair `anchor` and `popup` and prepare position tracking.
    fn attach(&mut self, anchor: K, popup: PopupId, options: &PlacementOptions) -> Self::Handle;
}

/// A live anchor-popup attachment.
pub trait AttachHandle {
    /// Begin continuous position updates for this attachment.
    fn enable_live_updates(&mut self);
}

/// A recorded attachment request awaiting the next flush.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttachRequest<K> {
    /// Anchor element to attach to.
    pub anchor: K,
    /// Popup to position.
    pub popup: PopupId,
    /// Placement hint for the engine.
    pub options: PlacementOptions,
}

/// Queue of attachment requests, flushed on the host's next tick.
///
/// Requests flush in creation order. Flushing enables live updates on every
/// handle before returning them, so a host that simply drops the result gets
/// tracking popups and a host that keeps them gets the handles.
#[derive(Debug)]
pub struct AttachQueue<K> {
    requests: Vec<AttachRequest<K>>,
}

impl<K> Default for AttachQueue<K> {
    fn default() -> Self {
        Self {
            requests: Vec::new(),
        }
    }
}

impl<K> AttachQueue<K> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an attachment request.
    pub fn push(&mut self, anchor: K, popup: PopupId, options: PlacementOptions) {
        self.requests.push(AttachRequest {
            anchor,
            popup,
            options,
        });
    }

    /// Number of pending requests.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether no requests are pending.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Drain every pending request into `engine`, in order.
    ///
    /// Live updates are enabled on each returned handle. The handles are
    /// handed back to the caller; Canopy keeps nothing and never cancels
    /// tracking.
    pub fn flush<E: PositionEngine<K>>(&mut self, engine: &mut E) -> Vec<E::Handle> {
        self.requests
            .drain(..)
            .map(|req| {
                let mut handle = engine.attach(req.anchor, req.popup, &req.options);
                handle.enable_live_updates();
                handle
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Placement;
    use alloc::vec;

    #[derive(Default)]
    struct RecordingEngine {
        attached: Vec<(u32, PopupId, PlacementOptions)>,
    }

    struct RecordingHandle {
        live: bool,
    }

    impl AttachHandle for RecordingHandle {
        fn enable_live_updates(&mut self) {
            self.live = true;
        }
    }

    impl PositionEngine<u32> for RecordingEngine {
        type Handle = RecordingHandle;

        fn attach(
            &mut self,
            anchor: u32,
            popup: PopupId,
            options: &PlacementOptions,
        ) -> Self::Handle {
            self.attached.push((anchor, popup, *options));
            RecordingHandle { live: false }
        }
    }

    fn options(offset: i32) -> PlacementOptions {
        PlacementOptions {
            placement: Placement::Top,
            offset,
        }
    }

    fn popup_ids() -> (PopupId, PopupId) {
        use crate::config::Config;
        use crate::factory;
        use crate::surface::Surface;

        let mut surface = Surface::new();
        let a = surface.push(factory::create("a", &Config::default()));
        let b = surface.push(factory::create("b", &Config::default()));
        (a, b)
    }

    #[test]
    fn requests_queue_until_flushed() {
        let (a, _) = popup_ids();
        let mut queue: AttachQueue<u32> = AttachQueue::new();
        assert!(queue.is_empty());

        queue.push(1, a, options(0));
        assert_eq!(queue.len(), 1);

        let mut engine = RecordingEngine::default();
        assert!(engine.attached.is_empty());
    }

    #[test]
    fn flush_attaches_in_creation_order() {
        let (a, b) = popup_ids();
        let mut queue: AttachQueue<u32> = AttachQueue::new();
        queue.push(1, a, options(0));
        queue.push(2, b, options(5));

        let mut engine = RecordingEngine::default();
        let handles = queue.flush(&mut engine);

        assert_eq!(handles.len(), 2);
        assert_eq!(
            engine.attached,
            vec![(1, a, options(0)), (2, b, options(5))]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn flush_enables_live_updates_on_every_handle() {
        let (a, b) = popup_ids();
        let mut queue: AttachQueue<u32> = AttachQueue::new();
        queue.push(1, a, options(0));
        queue.push(2, b, options(0));

        let mut engine = RecordingEngine::default();
        let handles = queue.flush(&mut engine);
        assert!(handles.iter().all(|h| h.live));
    }

    #[test]
    fn flush_on_empty_queue_is_a_noop() {
        let mut queue: AttachQueue<u32> = AttachQueue::new();
        let mut engine = RecordingEngine::default();
        let handles = queue.flush(&mut engine);
        assert!(handles.is_empty());
        assert!(engine.attached.is_empty());
    }
}
