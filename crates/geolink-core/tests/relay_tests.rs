// Host-side tests for relaying graph input to the map.

mod common;

use common::*;
use geolink_core::*;

fn kinds(fx: &Fixture) -> Vec<&'static str> {
    fx.map.dispatched.borrow().iter().map(|e| e.kind).collect()
}

#[test]
fn wheel_is_forwarded_and_default_prevented() {
    let mut fx = build(three_nodes(), &[("a", A)], |o| o);
    let ev = FakeEvent::new("wheel");

    let outcome = fx.handler.on_wheel(&ev);

    assert_eq!(outcome, RelayOutcome::Forwarded);
    assert!(ev.prevented.get());
    assert_eq!(kinds(&fx), vec!["wheel"]);
    assert!(fx.map.dispatched.borrow()[0].in_map);
}

#[test]
fn wheel_over_map_is_not_forwarded_again() {
    let mut fx = build(three_nodes(), &[("a", A)], |o| o);
    let ev = FakeEvent::new("wheel").inside_map();

    assert_eq!(fx.handler.on_wheel(&ev), RelayOutcome::OwnTarget);
    assert!(fx.map.dispatched.borrow().is_empty());
}

#[test]
fn background_drag_pans_the_map() {
    let mut fx = build(three_nodes(), &[("a", A)], |o| o);

    let down = fx
        .handler
        .on_pointer_down(&FakeEvent::new("mousedown"), PointerTarget::Background);
    assert!(down.forwarded());
    assert!(fx.handler.mode().panning);
    assert!(fx.graph().interaction.auto_ungrabify);

    assert!(fx.handler.on_pointer_move(&FakeEvent::new("mousemove")).forwarded());
    assert!(fx.handler.on_pointer_up(&FakeEvent::new("mouseup")).forwarded());

    assert!(!fx.handler.mode().panning);
    assert!(!fx.graph().interaction.auto_ungrabify);
    assert_eq!(fx.graph().unselect_suppressed, 1);
    assert_eq!(kinds(&fx), vec!["mousedown", "mousemove", "mouseup"]);
}

#[test]
fn gestures_on_elements_stay_with_the_graph() {
    let mut fx = build(three_nodes(), &[("a", A)], |o| o);

    let down = fx
        .handler
        .on_pointer_down(&FakeEvent::new("mousedown"), PointerTarget::Element);
    let moved = fx.handler.on_pointer_move(&FakeEvent::new("mousemove"));
    let up = fx.handler.on_pointer_up(&FakeEvent::new("mouseup"));

    assert_eq!(down, RelayOutcome::Ignored);
    assert_eq!(moved, RelayOutcome::Ignored);
    assert_eq!(up, RelayOutcome::Ignored);
    assert_eq!(fx.graph().unselect_suppressed, 0);
    assert!(kinds(&fx).is_empty());
}

#[test]
fn selection_chords_and_secondary_buttons_are_ignored() {
    let mut fx = build(three_nodes(), &[("a", A)], |o| o);

    let shift = fx
        .handler
        .on_pointer_down(&FakeEvent::new("mousedown").shift(), PointerTarget::Background);
    let right = fx
        .handler
        .on_pointer_down(&FakeEvent::new("mousedown").secondary(), PointerTarget::Background);

    assert_eq!(shift, RelayOutcome::Ignored);
    assert_eq!(right, RelayOutcome::Ignored);
    assert!(!fx.handler.mode().panning);
    assert!(kinds(&fx).is_empty());
}

#[test]
fn press_inside_map_does_not_start_a_pan() {
    let mut fx = build(three_nodes(), &[("a", A)], |o| o);

    let outcome = fx.handler.on_pointer_down(
        &FakeEvent::new("mousedown").inside_map(),
        PointerTarget::Background,
    );

    assert_eq!(outcome, RelayOutcome::OwnTarget);
    assert!(!fx.handler.mode().panning);
}

#[test]
fn nothing_is_relayed_after_destroy() {
    let mut fx = build(three_nodes(), &[("a", A)], |o| o);
    fx.handler.destroy();
    let ev = FakeEvent::new("wheel");

    assert_eq!(fx.handler.on_wheel(&ev), RelayOutcome::Ignored);
    assert!(!ev.prevented.get());
    assert_eq!(
        fx.handler
            .on_pointer_down(&FakeEvent::new("mousedown"), PointerTarget::Background),
        RelayOutcome::Ignored
    );
    assert!(kinds(&fx).is_empty());
}

#[test]
fn destroy_mid_pan_restores_grab_flag() {
    let mut fx = build(three_nodes(), &[("a", A)], |o| o);
    fx.handler
        .on_pointer_down(&FakeEvent::new("mousedown"), PointerTarget::Background);

    fx.handler.destroy();

    assert!(!fx.graph().interaction.auto_ungrabify);
    assert!(!fx.handler.mode().panning);
}

#[test]
fn undeliverable_press_does_not_start_a_pan() {
    let map = FakeMapConfig {
        reject_dispatch: true,
        ..FakeMapConfig::default()
    };
    let mut fx = build_with_map(three_nodes(), &[("a", A)], map, |o| o);

    let down = fx
        .handler
        .on_pointer_down(&FakeEvent::new("touchstart"), PointerTarget::Background);

    assert_eq!(down, RelayOutcome::Ignored);
    assert!(!fx.handler.mode().panning);
    assert!(!fx.graph().interaction.auto_ungrabify);
    assert_eq!(
        fx.handler.on_pointer_move(&FakeEvent::new("touchmove")),
        RelayOutcome::Ignored
    );
}
