// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tooltip configuration surface.

use alloc::string::String;

use canopy_trigger::TriggerSet;

use crate::types::{Placement, PlacementOptions};

/// Configuration for one tooltip group.
///
/// One `Config` is held per controller and applied to every tooltip that
/// controller creates. All fields have the stock defaults; use the
/// builder-style setters to adjust individual options:
///
/// ```
/// use canopy_popup::{Config, Placement};
///
/// let config = Config::default()
///     .position(Placement::Bottom)
///     .delay(300)
///     .arrow(true);
/// assert_eq!(config.delay, 300);
/// ```
///
/// The stringly-typed options parse through [`TriggerSet::parse`] and
/// [`Placement::from_str`](core::str::FromStr); both reject unknown tokens
/// with descriptive errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Treat titles as raw markup instead of plain text.
    pub html: bool,
    /// Preferred placement hint for the positioning engine.
    pub position: Placement,
    /// Animation family name the styling layer selects on.
    pub animation: String,
    /// Enable the backdrop fill effect.
    pub animate_fill: bool,
    /// Render a decorative arrow toward the anchor.
    pub arrow: bool,
    /// Delay before a triggered show, in milliseconds. Zero shows immediately.
    pub delay: u64,
    /// Trigger modes wired for each tooltip.
    pub trigger: TriggerSet,
    /// Enter/leave transition duration in milliseconds.
    pub duration: u64,
    /// Theme variant name.
    pub theme: String,
    /// Signed pixel offset along the placement axis.
    pub offset: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            html: false,
            position: Placement::Top,
            animation: String::from("shift"),
            animate_fill: true,
            arrow: false,
            delay: 0,
            trigger: TriggerSet::default(),
            duration: 400,
            theme: String::from("dark"),
            offset: 0,
        }
    }
}

impl Config {
    /// Treat titles as raw markup.
    #[must_use]
    pub fn html(mut self, html: bool) -> Self {
        self.html = html;
        self
    }

    /// Set the placement hint.
    #[must_use]
    pub fn position(mut self, position: Placement) -> Self {
        self.position = position;
        self
    }

    /// Set the animation family name.
    #[must_use]
    pub fn animation(mut self, animation: impl Into<String>) -> Self {
        self.animation = animation.into();
        self
    }

    /// Enable or disable the backdrop fill effect.
    #[must_use]
    pub fn animate_fill(mut self, animate_fill: bool) -> Self {
        self.animate_fill = animate_fill;
        self
    }

    /// Enable or disable the decorative arrow.
    #[must_use]
    pub fn arrow(mut self, arrow: bool) -> Self {
        self.arrow = arrow;
        self
    }

    /// Set the show delay in milliseconds.
    #[must_use]
    pub fn delay(mut self, delay: u64) -> Self {
        self.delay = delay;
        self
    }

    /// Set the trigger modes.
    #[must_use]
    pub fn trigger(mut self, trigger: TriggerSet) -> Self {
        self.trigger = trigger;
        self
    }

    /// Set the transition duration in milliseconds.
    #[must_use]
    pub fn duration(mut self, duration: u64) -> Self {
        self.duration = duration;
        self
    }

    /// Set the theme variant name.
    #[must_use]
    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    /// Set the signed pixel offset.
    #[must_use]
    pub fn offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }

    /// The placement hint handed to the positioning engine at attach time.
    pub fn placement_options(&self) -> PlacementOptions {
        PlacementOptions {
            placement: self.position,
            offset: self.offset,
        }
    }
}
