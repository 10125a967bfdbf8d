// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Popup: popup nodes, the shared popup surface, and the positioning seam.
//!
//! ## Overview
//!
//! A tooltip popup is a small node tree — container, inner tooltip box,
//! content — built once per tooltipped element and appended to a shared
//! [`Surface`] (the analogue of a document body: one global container, no
//! per-anchor nesting). This crate owns:
//!
//! - [`Popup`] / [`TooltipBox`] / [`Content`]: the headless node model. Theme,
//!   animation family, placement, and decoration flags are carried as typed
//!   fields; the host maps them to whatever class names or attributes its
//!   styling layer wants.
//! - [`factory::create`]: builds a fresh popup from a title and a [`Config`].
//! - [`Surface`]: an arena of popups with generational [`PopupId`] handles.
//! - [`PositionEngine`] / [`AttachHandle`]: the seam to the external
//!   positioning collaborator. Canopy never computes placement geometry; it
//!   hands the engine an anchor, a popup, and a [`PlacementOptions`] hint,
//!   then records whatever screen position the engine reports back.
//! - [`AttachQueue`]: attachment requests are queued at creation time and
//!   flushed on the host's next tick, decoupling engine setup (which usually
//!   measures layout) from popup insertion.
//!
//! ## Minimal example
//!
//! ```
//! use canopy_popup::{factory, Config, Content, Surface};
//!
//! let config = Config::default();
//! let mut surface = Surface::new();
//!
//! let id = surface.push(factory::create("Hello", &config));
//! let popup = surface.get(id).unwrap();
//! assert_eq!(popup.tooltip.content, Content::Text("Hello".into()));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod types;

pub mod engine;
pub mod factory;
pub mod surface;

pub use config::Config;
pub use engine::{AttachHandle, AttachQueue, AttachRequest, PositionEngine};
pub use surface::{PopupId, Surface};
pub use types::{
    AnimationClass, Content, Placement, PlacementOptions, PlacementParseError, Popup, TooltipBox,
    TransitionStyle,
};
