// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tooltip session: a mock host document + a toy positioning engine.
//!
//! This example wires the full stack together:
//! - `canopy_controller` scans a fake document for titled elements,
//! - `canopy_popup` builds the popups and queues engine attachments,
//! - a toy `PositionEngine` computes naive below-the-anchor coordinates,
//! - input events and a millisecond clock drive show/hide transitions.
//!
//! Run:
//! - `cargo run -p canopy_demos --example hover_session`

use std::collections::HashMap;

use kurbo::{Point, Rect};

use canopy_controller::{Controller, Effect, HostDocument, TooltipContext};
use canopy_popup::{
    AttachHandle, Config, Placement, PlacementOptions, PopupId, PositionEngine,
};
use canopy_trigger::InputEvent;
use canopy_visibility::Visibility;

/// A fake document: element keys with names, bounds, and optional titles.
struct FakeDocument {
    order: Vec<u32>,
    names: HashMap<u32, &'static str>,
    bounds: HashMap<u32, Rect>,
    titles: HashMap<u32, String>,
    /// Consumed titles, stashed the way a real host would under an
    /// original-title attribute.
    original_titles: HashMap<u32, String>,
}

impl FakeDocument {
    fn new() -> Self {
        let mut doc = Self {
            order: Vec::new(),
            names: HashMap::new(),
            bounds: HashMap::new(),
            titles: HashMap::new(),
            original_titles: HashMap::new(),
        };
        doc.insert(1, "save-button", Rect::new(10.0, 10.0, 90.0, 34.0), Some("Save changes"));
        doc.insert(2, "spacer", Rect::new(90.0, 10.0, 120.0, 34.0), None);
        doc.insert(3, "delete-button", Rect::new(120.0, 10.0, 200.0, 34.0), Some("Delete forever"));
        doc
    }

    fn insert(&mut self, el: u32, name: &'static str, bounds: Rect, title: Option<&str>) {
        self.order.push(el);
        self.names.insert(el, name);
        self.bounds.insert(el, bounds);
        if let Some(title) = title {
            self.titles.insert(el, title.to_string());
        }
    }
}

impl HostDocument<u32> for FakeDocument {
    fn select(&self, _selector: &str) -> Vec<u32> {
        self.order.clone()
    }

    fn take_title(&mut self, el: &u32) -> Option<String> {
        let title = self.titles.remove(el)?;
        self.original_titles.insert(*el, title.clone());
        Some(title)
    }
}

/// A toy positioning engine: centers the popup on the placement side of the
/// anchor, shifted by the configured pixel offset. A real engine would also
/// flip on viewport collisions and keep tracking layout changes.
struct ToyEngine<'a> {
    bounds: &'a HashMap<u32, Rect>,
    computed: Vec<(PopupId, Point)>,
}

struct ToyHandle {
    live: bool,
}

impl AttachHandle for ToyHandle {
    fn enable_live_updates(&mut self) {
        self.live = true;
    }
}

impl PositionEngine<u32> for ToyEngine<'_> {
    type Handle = ToyHandle;

    fn attach(&mut self, anchor: u32, popup: PopupId, options: &PlacementOptions) -> Self::Handle {
        if let Some(rect) = self.bounds.get(&anchor) {
            let offset = f64::from(options.offset);
            let gap = 6.0;
            let point = match options.placement {
                Placement::Top => Point::new(rect.center().x + offset, rect.y0 - gap),
                Placement::Bottom => Point::new(rect.center().x + offset, rect.y1 + gap),
                Placement::Left => Point::new(rect.x0 - gap, rect.center().y + offset),
                Placement::Right => Point::new(rect.x1 + gap, rect.center().y + offset),
            };
            self.computed.push((popup, point));
        }
        ToyHandle { live: false }
    }
}

fn describe(effects: &[Effect<u32>]) {
    for effect in effects {
        match effect {
            Effect::FocusPopup(popup) => println!("    -> host: focus popup {popup:?}"),
            Effect::AnchorActivated(el) => println!("    -> host: mark element {el} active"),
            Effect::AnchorDeactivated(el) => println!("    -> host: mark element {el} inactive"),
        }
    }
}

fn main() {
    let mut doc = FakeDocument::new();
    let mut cx: TooltipContext<u32> = TooltipContext::new();

    // One tooltip group: bottom placement, 200ms delay, 250ms transitions.
    let controller = Controller::new(
        "[title]",
        Config::default()
            .position(Placement::Bottom)
            .delay(200)
            .duration(250)
            .offset(4),
    );

    let created = controller.init(&mut doc, &mut cx);
    println!("created {created} tooltips for {} elements", doc.order.len());
    for (id, popup) in cx.surface.iter() {
        println!(
            "  popup {id:?}: {:?} (theme {}, animation {})",
            popup.tooltip.content, popup.tooltip.theme, popup.tooltip.animation
        );
    }

    // Next tick: hand queued attachments to the positioning engine.
    let mut engine = ToyEngine {
        bounds: &doc.bounds,
        computed: Vec::new(),
    };
    let handles = controller.flush_attach(&mut cx, &mut engine);
    println!("\nattached {} popups (live: {})", handles.len(), handles.iter().all(|h| h.live));
    for (popup, point) in engine.computed {
        cx.surface.set_position(popup, point);
        println!("  engine placed {popup:?} at ({:.0}, {:.0})", point.x, point.y);
    }

    let save = controller.popup_for(&cx, &1).expect("element 1 is tooltipped");

    // Hover the save button; the 200ms delay defers the show.
    println!("\n[t=0] pointer enters save-button");
    describe(&controller.handle_event(&mut cx, 1, InputEvent::PointerEnter, 0));
    println!("  visibility: {:?}", cx.visibility.visibility(save));

    println!("[t=200] delay elapses");
    describe(&controller.tick(&mut cx, 200));
    println!("  visibility: {:?}", cx.visibility.visibility(save));

    println!("[t=450] enter transition completes");
    controller.tick(&mut cx, 450);
    println!("  visibility: {:?}", cx.visibility.visibility(save));

    println!("[t=800] pointer leaves");
    describe(&controller.handle_event(&mut cx, 1, InputEvent::PointerLeave, 800));
    println!("  visibility: {:?}", cx.visibility.visibility(save));

    println!("[t=1050] leave transition completes");
    controller.tick(&mut cx, 1_050);
    println!("  visibility: {:?}", cx.visibility.visibility(save));
    assert_eq!(cx.visibility.visibility(save), Visibility::Hidden);

    // A quick hover that leaves before the delay never shows the popup.
    println!("\n[t=2000] pointer enters delete-button, leaves at t=2100");
    controller.handle_event(&mut cx, 3, InputEvent::PointerEnter, 2_000);
    controller.handle_event(&mut cx, 3, InputEvent::PointerLeave, 2_100);
    let fired = controller.tick(&mut cx, 3_000);
    let delete = controller.popup_for(&cx, &3).expect("element 3 is tooltipped");
    println!(
        "  after the would-be deadline: {:?} ({} effects)",
        cx.visibility.visibility(delete),
        fired.len()
    );

    // The spacer was never tooltipped; the public accessor says so.
    println!("\nlookup for the untitled spacer: {:?}", controller.popup_for(&cx, &2));
}
