use std::time::Duration;

use folio_common::{PlatformError, Point, Rect, Size};
use folio_platform::{
    Dispatch, ElementId, ElementKind, ElementSpec, Event, ListenerId, ListenerTarget, Mutation,
    MutationBatch, Platform, PointerCapability,
};

use super::*;

fn platform(pointer: PointerCapability) -> Platform {
    Platform::new(Size::new(800.0, 600.0), 1.0, pointer)
}

fn route(platform: &mut Platform, overlay: &mut PointerOverlay, dispatches: Vec<Dispatch>) {
    for d in &dispatches {
        overlay.handle_event(platform, d).unwrap();
    }
}

fn sync(platform: &mut Platform, overlay: &mut PointerOverlay) {
    for batch in platform.take_mutations() {
        overlay.handle_mutations(platform, &batch).unwrap();
    }
}

fn settle(platform: &mut Platform, overlay: &mut PointerOverlay) {
    for i in 0..2000 {
        let ticks = platform.frames.take_due(Duration::from_millis(16 * i));
        if ticks.is_empty() {
            return;
        }
        for tick in &ticks {
            overlay.handle_frame(platform, tick);
        }
    }
    panic!("cursor never settled");
}

fn move_to(platform: &mut Platform, overlay: &mut PointerOverlay, x: f64, y: f64) {
    let dispatches = platform.pointer_moved(Point::new(x, y));
    route(platform, overlay, dispatches);
}

#[test]
fn coarse_pointer_suppresses_everything() {
    let mut p = platform(PointerCapability::Coarse);
    let overlay = PointerOverlay::activate(&mut p, OverlaySettings::default()).unwrap();

    assert!(overlay.is_suppressed());
    assert!(!overlay.is_active());
    assert!(overlay.layers().is_none());
    assert!(p.listeners.is_empty());
    assert_eq!(p.document.observer_count(), 0);
    assert!(p.pointer_moved(Point::new(10.0, 10.0)).is_empty());
}

#[test]
fn activation_registers_document_listeners_and_wires_existing_targets() {
    let mut p = platform(PointerCapability::Fine);
    let body = p.document.body();
    let link = p
        .append(body, ElementSpec::link("About", "/about", Rect::new(10.0, 10.0, 80.0, 30.0)))
        .unwrap();
    let card = p
        .append(
            body,
            ElementSpec::new(ElementKind::Section, Rect::new(0.0, 100.0, 300.0, 200.0)).hoverable(),
        )
        .unwrap();
    let text = p
        .append(body, ElementSpec::new(ElementKind::Text, Rect::new(0.0, 400.0, 300.0, 20.0)))
        .unwrap();

    let overlay = PointerOverlay::activate(&mut p, OverlaySettings::default()).unwrap();

    assert!(overlay.is_active());
    assert!(!overlay.is_visible());
    assert_eq!(p.listeners.count_for_target(ListenerTarget::Window), 1);
    assert_eq!(p.listeners.count_for_target(ListenerTarget::Document), 2);
    assert!(overlay.is_wired(link));
    assert!(overlay.is_wired(card));
    assert!(!overlay.is_wired(text));
    assert_eq!(p.document.observer_count_for_owner(overlay.owner()), 1);
}

#[test]
fn pointer_move_shows_cursor_and_springs_to_position() {
    let mut p = platform(PointerCapability::Fine);
    let mut overlay = PointerOverlay::activate(&mut p, OverlaySettings::default()).unwrap();
    assert!(!overlay.is_animating());

    move_to(&mut p, &mut overlay, 300.0, 200.0);
    assert!(overlay.is_visible());
    assert_eq!(overlay.position(), Point::new(300.0, 200.0));
    assert!(overlay.is_animating());

    settle(&mut p, &mut overlay);
    let [dot, ring] = overlay.layers().unwrap();
    assert_eq!(dot.kind, LayerKind::Dot);
    assert_eq!(dot.center, Point::new(300.0, 200.0));
    assert_eq!(dot.opacity, 1.0);
    assert_eq!(dot.scale, 1.0);
    assert_eq!(ring.center, Point::new(300.0, 200.0));
    assert_eq!(ring.opacity, 0.6);
    assert!(!overlay.is_animating());
    assert_eq!(p.frames.pending_for_owner(overlay.owner()), 0);
}

#[test]
fn viewport_leave_and_enter_toggle_visibility() {
    let mut p = platform(PointerCapability::Fine);
    let mut overlay = PointerOverlay::activate(&mut p, OverlaySettings::default()).unwrap();
    move_to(&mut p, &mut overlay, 100.0, 100.0);

    let leave = p.pointer_left_viewport();
    route(&mut p, &mut overlay, leave);
    assert!(!overlay.is_visible());
    settle(&mut p, &mut overlay);
    let [dot, ring] = overlay.layers().unwrap();
    assert_eq!(dot.opacity, 0.0);
    assert_eq!(ring.opacity, 0.0);

    let enter = p.pointer_entered_viewport();
    route(&mut p, &mut overlay, enter);
    assert!(overlay.is_visible());
}

#[test]
fn dot_leads_ring() {
    let mut p = platform(PointerCapability::Fine);
    let mut overlay = PointerOverlay::activate(&mut p, OverlaySettings::default()).unwrap();
    move_to(&mut p, &mut overlay, 400.0, 300.0);

    for i in 0..3 {
        let ticks = p.frames.take_due(Duration::from_millis(16 * i));
        for tick in &ticks {
            overlay.handle_frame(&mut p, tick);
        }
    }
    let [dot, ring] = overlay.layers().unwrap();
    assert!(dot.center.x > ring.center.x);
    assert!(dot.center.x < 400.0);
}

#[test]
fn hovering_interactive_element_scales_layers() {
    let mut p = platform(PointerCapability::Fine);
    let body = p.document.body();
    p.append(body, ElementSpec::button("Contact Me", Rect::new(100.0, 100.0, 120.0, 40.0)))
        .unwrap();
    let mut overlay = PointerOverlay::activate(&mut p, OverlaySettings::default()).unwrap();

    move_to(&mut p, &mut overlay, 150.0, 120.0);
    assert!(overlay.is_hovering());
    settle(&mut p, &mut overlay);
    let [dot, ring] = overlay.layers().unwrap();
    assert_eq!(dot.scale, 0.5);
    assert_eq!(ring.scale, 1.5);

    move_to(&mut p, &mut overlay, 500.0, 500.0);
    assert!(!overlay.is_hovering());
}

#[test]
fn inserted_element_is_wired_once() {
    let mut p = platform(PointerCapability::Fine);
    let body = p.document.body();
    let mut overlay = PointerOverlay::activate(&mut p, OverlaySettings::default()).unwrap();
    let spec = ElementSpec::button("Send", Rect::new(200.0, 200.0, 100.0, 40.0));

    let button = p.append(body, spec.clone()).unwrap();
    sync(&mut p, &mut overlay);
    assert!(overlay.is_wired(button));

    move_to(&mut p, &mut overlay, 250.0, 220.0);
    assert!(overlay.is_hovering());
    move_to(&mut p, &mut overlay, 500.0, 500.0);
    assert!(!overlay.is_hovering());

    // Remove and insert an identical element.
    p.remove_element(button).unwrap();
    sync(&mut p, &mut overlay);
    assert!(!overlay.is_wired(button));
    assert_eq!(overlay.wired_count(), 0);

    let again = p.append(body, spec).unwrap();
    sync(&mut p, &mut overlay);
    assert_eq!(overlay.wired_count(), 1);
    assert_eq!(p.listeners.count_for_target(ListenerTarget::Element(again)), 2);

    // A repeated notification for the same element adds nothing.
    let repeat = MutationBatch {
        observer: overlay.observer().unwrap(),
        owner: overlay.owner(),
        records: vec![Mutation::Added(again), Mutation::Added(again)],
    };
    overlay.handle_mutations(&mut p, &repeat).unwrap();
    assert_eq!(p.listeners.count_for_target(ListenerTarget::Element(again)), 2);

    // Still a plain flag after repeated hovers.
    for _ in 0..3 {
        move_to(&mut p, &mut overlay, 250.0, 220.0);
        assert!(overlay.is_hovering());
        move_to(&mut p, &mut overlay, 500.0, 500.0);
        assert!(!overlay.is_hovering());
    }
}

#[test]
fn nested_inserted_elements_are_wired() {
    let mut p = platform(PointerCapability::Fine);
    let body = p.document.body();
    let mut overlay = PointerOverlay::activate(&mut p, OverlaySettings::default()).unwrap();

    let page = p
        .append(body, ElementSpec::new(ElementKind::Section, Rect::new(0.0, 0.0, 800.0, 600.0)))
        .unwrap();
    let link = p
        .append(page, ElementSpec::link("GitHub", "https://github.com", Rect::new(10.0, 10.0, 60.0, 20.0)))
        .unwrap();
    sync(&mut p, &mut overlay);

    assert!(!overlay.is_wired(page));
    assert!(overlay.is_wired(link));
}

#[test]
fn removing_hovered_element_clears_hover() {
    let mut p = platform(PointerCapability::Fine);
    let body = p.document.body();
    let button = p
        .append(body, ElementSpec::button("Go", Rect::new(0.0, 0.0, 100.0, 100.0)))
        .unwrap();
    let mut overlay = PointerOverlay::activate(&mut p, OverlaySettings::default()).unwrap();

    move_to(&mut p, &mut overlay, 50.0, 50.0);
    assert!(overlay.is_hovering());

    p.remove_element(button).unwrap();
    sync(&mut p, &mut overlay);
    assert!(!overlay.is_hovering());
}

#[test]
fn removing_inner_target_keeps_hover_on_enclosing_card() {
    let mut p = platform(PointerCapability::Fine);
    let body = p.document.body();
    let card = p
        .append(
            body,
            ElementSpec::new(ElementKind::Section, Rect::new(0.0, 0.0, 400.0, 300.0)).hoverable(),
        )
        .unwrap();
    let link = p
        .append(card, ElementSpec::link("Demo", "/demo", Rect::new(20.0, 20.0, 100.0, 30.0)))
        .unwrap();
    let mut overlay = PointerOverlay::activate(&mut p, OverlaySettings::default()).unwrap();

    move_to(&mut p, &mut overlay, 50.0, 30.0);
    assert!(p.is_hovered(link));
    assert!(overlay.is_hovering());

    p.remove_element(link).unwrap();
    sync(&mut p, &mut overlay);
    move_to(&mut p, &mut overlay, 200.0, 200.0);
    assert!(p.is_hovered(card));
    assert!(overlay.is_hovering());

    move_to(&mut p, &mut overlay, 600.0, 500.0);
    assert!(!overlay.is_hovering());
}

#[test]
fn leaving_inner_target_keeps_hover_on_enclosing_card() {
    let mut p = platform(PointerCapability::Fine);
    let body = p.document.body();
    let card = p
        .append(
            body,
            ElementSpec::new(ElementKind::Section, Rect::new(0.0, 0.0, 400.0, 300.0)).hoverable(),
        )
        .unwrap();
    p.append(card, ElementSpec::button("Open", Rect::new(20.0, 20.0, 100.0, 30.0)))
        .unwrap();
    let mut overlay = PointerOverlay::activate(&mut p, OverlaySettings::default()).unwrap();

    move_to(&mut p, &mut overlay, 50.0, 30.0);
    assert!(overlay.is_hovering());
    move_to(&mut p, &mut overlay, 200.0, 200.0);
    assert!(overlay.is_hovering());
    move_to(&mut p, &mut overlay, 600.0, 500.0);
    assert!(!overlay.is_hovering());
}

#[test]
fn dispatch_for_unwired_element_is_stale() {
    let mut p = platform(PointerCapability::Fine);
    let mut overlay = PointerOverlay::activate(&mut p, OverlaySettings::default()).unwrap();

    let dispatch = Dispatch {
        owner: overlay.owner(),
        listener: ListenerId(999),
        target: ListenerTarget::Element(ElementId(77)),
        event: Event::PointerEnter,
    };
    let err = overlay.handle_event(&mut p, &dispatch).unwrap_err();
    assert!(matches!(err, PlatformError::StaleTarget(77)));
    assert!(!overlay.is_hovering());
}

#[test]
fn deactivate_removes_everything() {
    let mut p = platform(PointerCapability::Fine);
    let body = p.document.body();
    p.append(body, ElementSpec::button("A", Rect::new(0.0, 0.0, 50.0, 50.0)))
        .unwrap();
    let mut overlay = PointerOverlay::activate(&mut p, OverlaySettings::default()).unwrap();
    move_to(&mut p, &mut overlay, 300.0, 300.0);
    assert!(p.listeners.count_for_owner(overlay.owner()) > 0);

    overlay.deactivate(&mut p);
    assert_eq!(p.listeners.count_for_owner(overlay.owner()), 0);
    assert_eq!(p.document.observer_count_for_owner(overlay.owner()), 0);
    assert_eq!(p.frames.pending_for_owner(overlay.owner()), 0);
    assert!(overlay.layers().is_none());
    assert!(p.pointer_moved(Point::new(10.0, 10.0)).is_empty());

    overlay.deactivate(&mut p);
    assert!(!overlay.is_active());
}

#[test]
fn settings_from_config() {
    let config = folio_config::schema::CursorConfig::default();
    let settings = OverlaySettings::from_config(&config);
    assert_eq!(settings, OverlaySettings::default());
}
