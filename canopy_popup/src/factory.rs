// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popup construction.

use alloc::string::String;

use crate::config::Config;
use crate::types::{AnimationClass, Content, Popup, TooltipBox, TransitionStyle};

/// Build a fresh popup node for `title` under `config`.
///
/// Always creates a new node; callers append it to a
/// [`Surface`](crate::Surface) themselves. The popup starts with the `Leave`
/// animation class and no recorded transition timing — show stamps both.
///
/// `title` becomes [`Content::Markup`] when `config.html` is set, otherwise
/// [`Content::Text`] (plain text the host's document model escapes).
///
/// `origin_selector` is the selector of the creating controller group,
/// recorded on the container so groups sharing one surface can identify
/// their popups.
pub fn create(title: &str, config: &Config) -> Popup {
    create_for_group(title, config, "")
}

/// [`create`], recording the originating group selector on the container.
pub fn create_for_group(title: &str, config: &Config, origin_selector: &str) -> Popup {
    let content = if config.html {
        Content::Markup(String::from(title))
    } else {
        Content::Text(String::from(title))
    };

    Popup {
        origin_selector: String::from(origin_selector),
        tooltip: TooltipBox {
            placement: config.position,
            animation: config.animation.clone(),
            animation_class: AnimationClass::Leave,
            animate_fill: config.animate_fill,
            arrow: config.arrow,
            theme: config.theme.clone(),
            transition: TransitionStyle::default(),
            content,
        },
        position: None,
    }
}
