// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Controller: the tooltip coordination layer.
//!
//! ## Overview
//!
//! This crate ties the Canopy pieces into the behavior a host actually wants:
//! scan the document for tooltipped elements, build a popup per element, keep
//! the anchor ↔ popup registry, translate input events into show/hide
//! transitions (with cancellable show delays), and hand attachment requests
//! to the positioning engine.
//!
//! - [`Controller`]: one tooltip group — a selector plus a [`Config`].
//!   Several controllers may coexist; they share one [`TooltipContext`].
//! - [`TooltipContext`]: the host-owned shared state — popup surface,
//!   reference registry, visibility machine, attach queue. Explicitly
//!   constructed and resettable; nothing global, nothing lazy.
//! - [`HostDocument`]: the host markup contract — element enumeration and
//!   title consumption.
//! - [`Effect`]: side effects the host applies (focus the popup, style the
//!   anchor active/inactive). The controller computes; the host executes.
//!
//! ## Workflow
//!
//! 1) Build a [`TooltipContext`] once and a [`Controller`] per tooltip group.
//! 2) Call [`Controller::init`] with your [`HostDocument`]; it creates
//!    popups, registers references, and queues engine attachments.
//! 3) After inserting the popups, flush attachments with
//!    [`Controller::flush_attach`] on your next tick.
//! 4) Deliver input events through [`Controller::handle_event`] and pump
//!    timers with [`Controller::tick`]; apply the returned effects.
//!
//! ```
//! use canopy_controller::{Controller, HostDocument, TooltipContext};
//! use canopy_popup::Config;
//! use canopy_trigger::InputEvent;
//!
//! # struct OneButton;
//! # impl HostDocument<u32> for OneButton {
//! #     fn select(&self, _selector: &str) -> Vec<u32> { vec![7] }
//! #     fn take_title(&mut self, _el: &u32) -> Option<String> { Some("Hello".into()) }
//! # }
//! let mut cx: TooltipContext<u32> = TooltipContext::new();
//! let controller = Controller::new("[data-tip]", Config::default());
//!
//! let created = controller.init(&mut OneButton, &mut cx);
//! assert_eq!(created, 1);
//!
//! // Hovering the element starts the enter transition.
//! let popup = controller.popup_for(&cx, &7).unwrap();
//! controller.handle_event(&mut cx, 7, InputEvent::PointerEnter, 0);
//! assert!(cx.visibility.is_shown(popup));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod context;
mod controller;
mod host;

pub use canopy_popup::Config;
pub use canopy_registry::LookupError;
pub use context::TooltipContext;
pub use controller::{Controller, Effect, Effects};
pub use host::HostDocument;
