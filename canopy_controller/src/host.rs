// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host markup contract.

use alloc::string::String;
use alloc::vec::Vec;

/// What a controller needs from the host's document model.
///
/// Generic over the element key `K` — any small, copyable handle the host
/// uses for element identity (a node id, a slot index, an interned pointer).
pub trait HostDocument<K> {
    /// Elements matching `selector`, in document order.
    fn select(&self, selector: &str) -> Vec<K>;

    /// Consume the element's native title text.
    ///
    /// Returns `None` when the element has no title. Consuming is one-way:
    /// the host must remove the native title (stashing it under an
    /// original-title attribute or equivalent) so its own built-in tooltip
    /// stays suppressed from here on.
    fn take_title(&mut self, el: &K) -> Option<String>;
}
