// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popup node types and placement vocabulary.

use alloc::string::String;

use kurbo::Point;

/// Side of the anchor a popup prefers to appear on.
///
/// This is a *hint* passed to the positioning engine; the engine is free to
/// flip or shift the popup when the preferred side lacks space. Parsed from
/// the configuration strings `"top"`, `"bottom"`, `"left"`, `"right"`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Placement {
    /// Above the anchor.
    #[default]
    Top,
    /// Below the anchor.
    Bottom,
    /// To the left of the anchor.
    Left,
    /// To the right of the anchor.
    Right,
}

impl Placement {
    /// The configuration token for this placement.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Error parsing a placement name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementParseError(pub String);

impl core::fmt::Display for PlacementParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "unknown placement `{}`", self.0)
    }
}

impl core::error::Error for PlacementParseError {}

impl core::str::FromStr for Placement {
    type Err = PlacementParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(PlacementParseError(String::from(other))),
        }
    }
}

/// The complete placement hint handed to the positioning engine at attach time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlacementOptions {
    /// Preferred side of the anchor.
    pub placement: Placement,
    /// Signed offset in pixels along the placement axis.
    pub offset: i32,
}

/// Animation class currently applied to a tooltip box.
///
/// Mirrors the enter/leave class pair a CSS transition layer selects on.
/// Show swaps `Leave → Enter`; hide swaps `Enter → Leave`. A freshly built
/// popup starts in `Leave`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AnimationClass {
    /// The popup is entering (or settled visible).
    Enter,
    /// The popup is leaving (or settled hidden).
    Leave,
}

/// Tooltip content.
///
/// `Text` is plain text and must be escaped by the host's document model
/// before display; `Markup` is raw markup, produced only when the `html`
/// configuration flag is set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    /// Plain text (host escapes).
    Text(String),
    /// Raw markup (host inserts verbatim).
    Markup(String),
}

impl Content {
    /// The underlying string, regardless of kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::Markup(s) => s,
        }
    }
}

/// Transition timing recorded on a popup.
///
/// `duration` is the primary transition duration; `legacy_duration` is the
/// compatibility fallback some styling layers populate instead. Both are
/// unset on a fresh popup and stamped when a show starts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionStyle {
    /// Primary transition duration in milliseconds.
    pub duration: Option<u64>,
    /// Fallback duration consulted when `duration` is unset.
    pub legacy_duration: Option<u64>,
}

impl TransitionStyle {
    /// Resolve the effective transition duration.
    ///
    /// Primary wins over the legacy fallback. `None` means no duration is
    /// recorded anywhere, in which case transitions complete synchronously.
    pub fn resolve(&self) -> Option<u64> {
        self.duration.or(self.legacy_duration)
    }

    /// Stamp both duration fields, as a styling layer writing the prefixed
    /// and unprefixed properties together would.
    pub fn set(&mut self, ms: u64) {
        self.duration = Some(ms);
        self.legacy_duration = Some(ms);
    }
}

/// The inner tooltip box of a popup: styling knobs plus the content node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TooltipBox {
    /// Placement hint recorded for the styling layer (`data-position` analogue).
    pub placement: Placement,
    /// Animation family name (`data-animation` analogue), e.g. `"shift"`.
    pub animation: String,
    /// Current enter/leave animation class.
    pub animation_class: AnimationClass,
    /// Whether the backdrop fill effect is enabled.
    pub animate_fill: bool,
    /// Whether a decorative arrow is rendered toward the anchor.
    pub arrow: bool,
    /// Theme variant name, e.g. `"dark"`.
    pub theme: String,
    /// Transition timing, stamped at show time.
    pub transition: TransitionStyle,
    /// The content node.
    pub content: Content,
}

/// One tooltip popup: container plus inner tooltip box.
///
/// Popups are owned by the [`Surface`](crate::Surface) they are pushed onto
/// and addressed by [`PopupId`](crate::PopupId). The `position` field is
/// written by the positioning engine once live updates begin; this library
/// never computes it.
#[derive(Clone, Debug, PartialEq)]
pub struct Popup {
    /// Selector of the controller group that created this popup.
    ///
    /// Lets independent tooltip groups sharing one surface tell their popups
    /// apart (the container-marker analogue).
    pub origin_selector: String,
    /// The inner tooltip box.
    pub tooltip: TooltipBox,
    /// Last screen position reported by the positioning engine.
    pub position: Option<Point>,
}
