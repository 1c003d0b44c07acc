//! Interaction scenarios for the card stack
//!
//! Each test binds a small adapter and drives the stack through touches and
//! frame ticks the way a host would.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::prelude::*;

const SCREEN: f32 = 1000.0;
const PADDING: f32 = 12.0;

struct Titles {
    count: usize,
    missing: Option<usize>,
    created: Rc<Cell<usize>>,
}

impl Titles {
    fn new(count: usize) -> Self {
        Self {
            count,
            missing: None,
            created: Rc::new(Cell::new(0)),
        }
    }
}

impl AnimatorProvider for Titles {
    type View = String;
}

impl CardStackAdapter for Titles {
    fn count(&self) -> usize {
        self.count
    }

    fn create_view(&mut self, position: usize, _container: &CardContainer) -> Option<String> {
        if self.missing == Some(position) {
            return None;
        }
        self.created.set(self.created.get() + 1);
        Some(format!("card {position}"))
    }
}

fn config() -> CardStackConfig {
    CardStackConfig::default()
        .card_gap(10.0)
        .card_gap_bottom(20.0)
        .show_init_animation(false)
}

fn metrics() -> DisplayMetrics {
    DisplayMetrics::new(SCREEN, 1.0).padding_top(PADDING)
}

fn stack(config: CardStackConfig, metrics: DisplayMetrics) -> CardStackLayout<String> {
    let mut stack = CardStackLayout::new(config, metrics);
    stack.bind(Titles::new(5)).unwrap();
    stack
}

fn tap(stack: &mut CardStackLayout<String>, position: usize, y: f32) {
    assert!(stack.on_card_touch(position, &TouchEvent::down(y)));
    assert!(stack.on_card_touch(position, &TouchEvent::up(y)));
}

fn settle(stack: &mut CardStackLayout<String>) {
    let mut frames = 0;
    while stack.tick(16.0) {
        frames += 1;
        assert!(frames < 1000, "stack never settled");
    }
}

fn collapsed(i: usize) -> f32 {
    SCREEN - 30.0 - (5 - i) as f32 * 20.0
}

#[test]
fn test_select_then_restore_end_to_end() {
    let mut stack = stack(config(), metrics());
    let opened = Rc::new(RefCell::new(Vec::new()));
    let sink = opened.clone();
    stack.set_on_card_selected(move |view: &String, index| {
        sink.borrow_mut().push((view.clone(), index));
    });

    assert_eq!(stack.card_y(3), Some(PADDING + 30.0));
    assert!(stack.is_screen_touchable());

    tap(&mut stack, 3, 400.0);
    assert!(stack.is_animating());
    assert!(!stack.is_screen_touchable());
    assert!(stack.is_scroll_locked());

    settle(&mut stack);
    assert_eq!(stack.selected_card_position(), Some(3));
    assert!(stack.is_screen_touchable());
    assert!(stack.is_scroll_locked());
    assert!(!stack.viewport().is_scrolling_enabled());
    assert_eq!(stack.card_y(3), Some(PADDING));
    for i in [0, 1, 2, 4] {
        assert_eq!(stack.card_y(i), Some(collapsed(i)), "card {i}");
    }
    assert_eq!(*opened.borrow(), vec![("card 3".to_string(), 3)]);

    tap(&mut stack, 3, 20.0);
    settle(&mut stack);
    assert!(!stack.is_card_selected());
    assert!(!stack.is_scroll_locked());
    assert!(stack.viewport().is_scrolling_enabled());
    for i in 0..5 {
        assert_eq!(stack.card_y(i), Some(PADDING + 10.0 * i as f32));
    }
    assert_eq!(opened.borrow().len(), 1);
}

#[test]
fn test_tap_on_other_card_restores_when_selected() {
    let mut stack = stack(config(), metrics());
    assert!(stack.select_card(1));
    settle(&mut stack);

    tap(&mut stack, 4, collapsed(4) + 5.0);
    settle(&mut stack);
    assert_eq!(stack.selected_card_position(), None);
}

#[test]
fn test_restore_twice_is_noop() {
    let mut stack = stack(config(), metrics());
    stack.select_card(2);
    settle(&mut stack);

    let calls = Rc::new(Cell::new(0));
    let first = calls.clone();
    let second = calls.clone();
    assert!(stack.restore(Some(Box::new(move || first.set(first.get() + 1)))));
    assert!(!stack.restore(Some(Box::new(move || second.set(second.get() + 10)))));

    settle(&mut stack);
    assert_eq!(calls.get(), 1);
    assert!(!stack.is_card_selected());
}

#[test]
fn test_restore_without_adapter_is_noop() {
    let mut stack: CardStackLayout<String> = CardStackLayout::new(config(), metrics());
    assert!(!stack.restore(None));
    assert!(!stack.select_card(0));
}

#[test]
fn test_drag_moves_touched_card_and_those_in_front() {
    let mut stack = stack(config(), metrics());
    stack.on_card_touch(1, &TouchEvent::down(100.0));
    stack.on_card_touch(1, &TouchEvent::move_to(130.0));

    // 30 / 8 * (5 * 2 + 1)
    let offset = 41.25;
    assert_eq!(stack.card_y(0), Some(PADDING));
    for i in 1..5 {
        assert_eq!(stack.card_y(i), Some(PADDING + 10.0 * i as f32 + offset));
    }

    stack.on_card_touch(1, &TouchEvent::up(130.0));
    assert!(!stack.is_card_selected());
    assert!(!stack.is_animating());
    assert!(!stack.is_scroll_locked());
}

#[test]
fn test_upward_drag_leaves_cards_alone() {
    let mut stack = stack(config(), metrics());
    let before = stack.positions();
    stack.on_card_touch(2, &TouchEvent::down(300.0));
    stack.on_card_touch(2, &TouchEvent::move_to(250.0));
    assert_eq!(stack.positions(), before);
    stack.on_card_touch(2, &TouchEvent::up(250.0));
    assert!(!stack.is_card_selected());
}

#[test]
fn test_settle_after_drag_returns_to_rest() {
    let mut stack = stack(config().settle_after_drag(true), metrics());
    stack.on_card_touch(0, &TouchEvent::down(100.0));
    stack.on_card_touch(0, &TouchEvent::move_to(180.0));
    stack.on_card_touch(0, &TouchEvent::up(180.0));
    assert!(stack.is_animating());

    settle(&mut stack);
    assert!(!stack.is_card_selected());
    for i in 0..5 {
        assert_eq!(stack.card_y(i), Some(PADDING + 10.0 * i as f32));
    }
}

#[test]
fn test_touches_ignored_while_animating() {
    let mut stack = stack(config(), metrics());
    assert!(stack.select_card(0));

    assert!(!stack.on_card_touch(2, &TouchEvent::down(300.0)));
    assert!(!stack.on_card_touch(2, &TouchEvent::up(300.0)));
    assert!(!stack.select_card(2));

    settle(&mut stack);
    assert_eq!(stack.selected_card_position(), Some(0));
}

#[test]
fn test_init_animation_slides_cards_to_rest() {
    let mut stack = stack(config().show_init_animation(true), metrics());
    for i in 0..5 {
        assert_eq!(stack.card_y(i), Some(collapsed(i)));
    }
    assert!(!stack.is_screen_touchable());
    assert!(!stack.select_card(0));

    assert!(stack.tick(499.0));
    assert!(!stack.is_animating());
    assert!(stack.tick(1.0));
    assert!(stack.is_animating());

    settle(&mut stack);
    assert!(stack.is_screen_touchable());
    assert!(!stack.is_card_selected());
    assert_eq!(stack.card_y(4), Some(PADDING + 40.0));
    assert!(stack.select_card(4));
}

#[test]
fn test_select_follows_scroll_offset() {
    let mut stack = stack(config(), metrics().viewport_height(500.0));
    assert!(stack.is_scrollable());
    stack.scroll_to(100.0);
    assert_eq!(stack.scroll_y(), 100.0);

    stack.select_card(2);
    settle(&mut stack);
    assert_eq!(stack.card_y(2), Some(100.0 + PADDING));
    assert_eq!(stack.card_y(0), Some(100.0 + collapsed(0)));
    assert!(!stack.is_scrollable());
}

#[test]
fn test_dispatch_routes_to_topmost_card() {
    let mut stack = stack(config(), metrics());
    // Cards sit at 12, 22, 32, 42 and 52; only cards 0-3 cover y = 45
    assert!(stack.dispatch_touch(&TouchEvent::down(45.0)));
    assert!(stack.dispatch_touch(&TouchEvent::up(45.0)));
    settle(&mut stack);
    assert_eq!(stack.selected_card_position(), Some(3));
}

#[test]
fn test_viewport_takes_over_long_vertical_drag() {
    let mut stack = stack(config(), metrics().viewport_height(500.0));
    assert!(stack.dispatch_touch(&TouchEvent::down(45.0)));
    assert!(stack.dispatch_touch(&TouchEvent::move_to(20.0)));
    assert_eq!(stack.scroll_y(), 25.0);
    assert!(stack.dispatch_touch(&TouchEvent::move_to(0.0)));
    assert!(stack.dispatch_touch(&TouchEvent::up(0.0)));

    assert_eq!(stack.scroll_y(), 45.0);
    assert!(!stack.is_card_selected());
    assert!(!stack.is_animating());
    assert_eq!(stack.card_y(3), Some(PADDING + 30.0));
}

#[test]
fn test_viewport_takeover_does_not_settle() {
    let mut stack = stack(
        config().settle_after_drag(true),
        metrics().viewport_height(500.0),
    );
    assert!(stack.dispatch_touch(&TouchEvent::down(45.0)));
    assert!(stack.dispatch_touch(&TouchEvent::move_to(20.0)));
    assert!(!stack.is_animating());
    assert!(stack.viewport().is_scrolling_enabled());

    assert!(stack.dispatch_touch(&TouchEvent::move_to(0.0)));
    assert!(stack.dispatch_touch(&TouchEvent::up(0.0)));
    assert_eq!(stack.scroll_y(), 45.0);
    assert!(!stack.is_animating());
    assert!(!stack.is_card_selected());
    assert!(stack.is_screen_touchable());
}

#[test]
fn test_selected_stack_does_not_scroll() {
    let mut stack = stack(config(), metrics().viewport_height(500.0));
    stack.select_card(0);
    settle(&mut stack);

    stack.dispatch_touch(&TouchEvent::down(300.0));
    stack.dispatch_touch(&TouchEvent::move_to(100.0));
    stack.dispatch_touch(&TouchEvent::cancel());
    assert_eq!(stack.scroll_y(), 0.0);
    assert!(stack.is_card_selected());
}

#[test]
fn test_missing_view_fails_bind() {
    let mut stack: CardStackLayout<String> = CardStackLayout::new(config(), metrics());
    let mut adapter = Titles::new(4);
    adapter.missing = Some(2);

    assert_eq!(
        stack.bind(adapter),
        Err(CardStackError::MissingView { position: 2 })
    );
    assert!(!stack.is_bound());
    assert_eq!(stack.card_count(), 0);
}

#[test]
fn test_views_created_once_per_bind() {
    let mut stack: CardStackLayout<String> = CardStackLayout::new(config(), metrics());
    let adapter = Titles::new(6);
    let created = adapter.created.clone();

    stack.bind(adapter).unwrap();
    assert_eq!(created.get(), 6);
    stack.select_card(5);
    settle(&mut stack);
    stack.restore(None);
    settle(&mut stack);
    assert_eq!(created.get(), 6);
    assert_eq!(stack.card_view(5).map(String::as_str), Some("card 5"));
}

#[test]
fn test_second_bind_is_rejected() {
    let mut stack = stack(config(), metrics());
    assert_eq!(stack.bind(Titles::new(2)), Err(CardStackError::AlreadyBound));
    assert_eq!(stack.set_config(config().card_gap(1.0)), Err(CardStackError::AlreadyBound));
    assert_eq!(stack.card_count(), 5);
}

#[test]
fn test_unbind_keeps_config_and_drops_listener() {
    let mut stack = stack(config(), metrics());
    let calls = Rc::new(Cell::new(0));
    let sink = calls.clone();
    stack.set_on_card_selected(move |_: &String, _| sink.set(sink.get() + 1));

    stack.unbind();
    assert!(!stack.is_bound());
    assert_eq!(stack.card_count(), 0);
    assert_eq!(stack.config().card_gap, 10.0);

    stack.bind(Titles::new(3)).unwrap();
    stack.select_card(1);
    settle(&mut stack);
    assert_eq!(calls.get(), 0);
    assert_eq!(stack.card_y(1), Some(PADDING));
}

#[test]
fn test_empty_adapter_binds() {
    let mut stack: CardStackLayout<String> =
        CardStackLayout::new(config().show_init_animation(true), metrics());
    stack.bind(Titles::new(0)).unwrap();
    settle(&mut stack);
    assert_eq!(stack.card_count(), 0);
    assert!(stack.is_screen_touchable());
    assert!(!stack.select_card(0));
}

struct Fanned;

impl AnimatorProvider for Fanned {
    type View = u32;

    /// Pushes unselected cards down by 500 plus a tenth of their view's value
    fn animator_for(
        &self,
        view: &u32,
        ctx: &AnimatorContext<'_>,
        current: usize,
        selected: usize,
    ) -> CardAnimation {
        if current == selected {
            CardAnimation::to(ctx.scroll_offset)
        } else {
            CardAnimation::to(ctx.current_y + 500.0 + *view as f32 / 10.0).easing(Easing::Linear)
        }
    }
}

impl CardStackAdapter for Fanned {
    fn count(&self) -> usize {
        3
    }

    fn create_view(&mut self, position: usize, container: &CardContainer) -> Option<u32> {
        assert_eq!(container.count, 3);
        Some(position as u32 * 100)
    }
}

#[test]
fn test_adapter_animator_drives_select() {
    let mut stack = CardStackLayout::new(config(), metrics());
    stack.bind(Fanned).unwrap();
    assert!(stack.select_card(1));
    while stack.tick(16.0) {}
    // Card 2 rests at PADDING + 20 and its view holds 200
    assert_eq!(stack.positions(), vec![PADDING + 500.0, 0.0, PADDING + 540.0]);
}
