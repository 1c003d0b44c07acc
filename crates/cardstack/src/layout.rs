//! Card stack container
//!
//! [`CardStackLayout`] ties the pieces together. It owns the scroll
//! viewport, the frame of card slots, the bound adapter, and the animation
//! scheduler, and it routes raw pointer events between the viewport and the
//! cards.
//!
//! The host drives it with three calls:
//!
//! - [`dispatch_touch`](CardStackLayout::dispatch_touch) for every pointer event
//! - [`tick`](CardStackLayout::tick) once per frame while it returns true
//! - [`card_y`](CardStackLayout::card_y) (or [`positions`](CardStackLayout::positions))
//!   to place the card views it owns through the adapter
//!
//! ```ignore
//! let mut stack = CardStackLayout::new(CardStackConfig::default(), metrics);
//! stack.set_on_card_selected(|view, index| println!("opened {index}"));
//! stack.bind(adapter)?;
//!
//! while stack.tick(16.0) {
//!     render(stack.positions());
//! }
//! ```

use cardstack_animation::{AnimationScheduler, TimerId};
use cardstack_platform::TouchEvent;

use crate::adapter::{CardContainer, CardStackAdapter};
use crate::choreographer::{Choreographer, Completion, CompletionCallback};
use crate::config::{
    CardStackConfig, DisplayMetrics, TransitionTiming, CLICK_DISTANCE_DP, TOUCH_SLOP_DP,
};
use crate::error::{CardStackError, Result};
use crate::geometry::CardGeometry;
use crate::gesture::{GestureOutcome, GestureTracker, TouchGate};
use crate::scroll::ScrollViewport;
use crate::slot::{CardFrame, CardSlot};

/// Called with the selected card's view and position once its select
/// transition completes
pub type CardSelectedListener<V> = Box<dyn FnMut(&V, usize)>;

/// Receiver of the pointer sequence in progress
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
enum TouchRoute {
    #[default]
    None,
    Card(usize),
    Scroll,
}

/// A scrollable stack of cards with select and restore transitions
pub struct CardStackLayout<V> {
    config: CardStackConfig,
    metrics: DisplayMetrics,
    geometry: CardGeometry,
    adapter: Option<Box<dyn CardStackAdapter<View = V>>>,
    frame: CardFrame<V>,
    viewport: ScrollViewport,
    tracker: GestureTracker,
    choreographer: Choreographer,
    scheduler: AnimationScheduler<usize>,
    init_timer: Option<TimerId>,
    route: TouchRoute,
    on_card_selected: Option<CardSelectedListener<V>>,
}

impl<V> CardStackLayout<V> {
    pub fn new(config: CardStackConfig, metrics: DisplayMetrics) -> Self {
        Self {
            geometry: CardGeometry::new(&config, &metrics),
            viewport: ScrollViewport::new(metrics.viewport_height, metrics.dp(TOUCH_SLOP_DP)),
            tracker: GestureTracker::new(metrics.dp(CLICK_DISTANCE_DP)),
            choreographer: Choreographer::new(TransitionTiming::default()),
            config,
            metrics,
            adapter: None,
            frame: CardFrame::new(),
            scheduler: AnimationScheduler::new(),
            init_timer: None,
            route: TouchRoute::None,
            on_card_selected: None,
        }
    }

    /// Replace the transition timing (builder pattern)
    pub fn with_timing(mut self, timing: TransitionTiming) -> Self {
        self.choreographer = Choreographer::new(timing);
        self
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    pub fn config(&self) -> &CardStackConfig {
        &self.config
    }

    pub fn metrics(&self) -> &DisplayMetrics {
        &self.metrics
    }

    /// Geometry of the current bind
    pub fn geometry(&self) -> &CardGeometry {
        &self.geometry
    }

    /// Replace the configuration. Only allowed while unbound.
    pub fn set_config(&mut self, config: CardStackConfig) -> Result<()> {
        if self.adapter.is_some() {
            return Err(CardStackError::AlreadyBound);
        }
        self.config = config;
        self.geometry = CardGeometry::new(&self.config, &self.metrics);
        Ok(())
    }

    /// Replace the display metrics. Only allowed while unbound.
    pub fn set_display_metrics(&mut self, metrics: DisplayMetrics) -> Result<()> {
        if self.adapter.is_some() {
            return Err(CardStackError::AlreadyBound);
        }
        self.metrics = metrics;
        self.geometry = CardGeometry::new(&self.config, &self.metrics);
        self.viewport = ScrollViewport::new(metrics.viewport_height, metrics.dp(TOUCH_SLOP_DP));
        self.tracker = GestureTracker::new(metrics.dp(CLICK_DISTANCE_DP));
        Ok(())
    }

    /// Set the listener told about every completed select
    pub fn set_on_card_selected<F>(&mut self, listener: F)
    where
        F: FnMut(&V, usize) + 'static,
    {
        self.on_card_selected = Some(Box::new(listener));
    }

    // ========================================================================
    // Adapter binding
    // ========================================================================

    /// Bind an adapter and build every card
    ///
    /// Reads the count once and creates each view exactly once. With the init
    /// transition enabled the cards start collapsed at the bottom and slide to
    /// rest after the init delay; otherwise they start at rest and the stack
    /// is touchable immediately.
    ///
    /// Fails without side effects if an adapter is already bound or the
    /// adapter returns no view for some position.
    pub fn bind<A>(&mut self, adapter: A) -> Result<()>
    where
        A: CardStackAdapter<View = V> + 'static,
    {
        if self.adapter.is_some() {
            return Err(CardStackError::AlreadyBound);
        }

        let mut adapter: Box<dyn CardStackAdapter<View = V>> = Box::new(adapter);
        let count = adapter.count();
        let geometry = CardGeometry::new(&self.config, &self.metrics)
            .with_card_padding(adapter.card_padding_top());
        let container = CardContainer {
            card_height: geometry.full_card_height(count),
            frame_height: geometry.frame_height(count),
            count,
        };
        let animate_in = self.config.show_init_animation;

        let mut slots = Vec::with_capacity(count);
        for position in 0..count {
            let view = adapter
                .create_view(position, &container)
                .ok_or(CardStackError::MissingView { position })?;
            let resting_y = geometry.resting_y(position);
            let y = if animate_in {
                geometry.collapsed_y(position, count)
            } else {
                resting_y
            };
            // Every card stays focusable and touchable for the whole bind
            slots.push(CardSlot::new(view, position, y, resting_y));
        }

        self.geometry = geometry;
        self.frame.install(slots, container.card_height, container.frame_height);
        self.viewport.set_content_height(container.frame_height);
        self.adapter = Some(adapter);
        self.tracker.reset();
        self.route = TouchRoute::None;
        self.choreographer.reset();

        if animate_in {
            let delay = self.choreographer.timing().init_delay_ms;
            self.init_timer = Some(self.scheduler.schedule(delay));
        } else {
            self.choreographer.set_screen_touchable(true);
        }
        self.sync_scroll_gate();

        tracing::debug!(
            count,
            animate_in,
            card_height = container.card_height,
            "adapter bound"
        );
        Ok(())
    }

    /// Release every card, the adapter, and the selection listener
    ///
    /// Configuration is kept. Running transitions are dropped without
    /// completing, and their callbacks never run.
    pub fn unbind(&mut self) {
        if self.adapter.is_none() {
            return;
        }
        self.scheduler.clear();
        self.init_timer = None;
        self.frame.remove_all();
        self.adapter = None;
        self.on_card_selected = None;
        self.choreographer.reset();
        self.tracker.reset();
        self.route = TouchRoute::None;
        self.viewport.set_content_height(0.0);
        self.sync_scroll_gate();
        tracing::debug!("adapter unbound");
    }

    pub fn is_bound(&self) -> bool {
        self.adapter.is_some()
    }

    /// The bound adapter
    pub fn adapter(&self) -> Option<&(dyn CardStackAdapter<View = V> + 'static)> {
        self.adapter.as_deref()
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Move every card back to its resting Y and clear the selection
    ///
    /// `on_complete` runs once the transition finishes. Returns false, and
    /// drops the callback, when nothing is bound or a transition is running.
    pub fn restore(&mut self, on_complete: Option<CompletionCallback>) -> bool {
        if self.adapter.is_none() {
            return false;
        }
        let positions = self.frame.positions();
        let started = self
            .choreographer
            .restore(&positions, &self.geometry, &mut self.scheduler, on_complete)
            .is_some();
        if started {
            if let Some(timer) = self.init_timer.take() {
                self.scheduler.cancel_timer(timer);
            }
        }
        self.sync_scroll_gate();
        started
    }

    /// Select card `position` as if it had been tapped
    ///
    /// Returns false when the request is rejected: nothing bound, position
    /// out of range, screen not touchable, or a card already selected.
    pub fn select_card(&mut self, position: usize) -> bool {
        let Some(adapter) = self.adapter.as_deref() else {
            return false;
        };
        let started = self
            .choreographer
            .select(
                position,
                &self.frame,
                adapter,
                &self.geometry,
                self.viewport.scroll_y(),
                &mut self.scheduler,
            )
            .is_some();
        self.sync_scroll_gate();
        started
    }

    /// Advance animations and timers by `dt_ms`
    ///
    /// Completed transitions update the selection state before any listener
    /// or callback runs. Returns true while further ticks are needed.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let update = self.scheduler.tick(dt_ms);

        for &(position, y) in &update.values {
            if let Some(slot) = self.frame.get_mut(position) {
                slot.set_y(y);
            }
        }

        let completions: Vec<Completion> = update
            .finished
            .iter()
            .filter_map(|&group| self.choreographer.finish(group))
            .collect();

        if let Some(timer) = self.init_timer {
            if update.fired.contains(&timer) {
                self.init_timer = None;
                tracing::debug!("init transition due");
                self.restore(None);
            }
        }
        self.sync_scroll_gate();

        for completion in completions {
            match completion {
                Completion::Selected { index } => {
                    let slot = self.frame.get(index);
                    if let (Some(listener), Some(slot)) = (self.on_card_selected.as_mut(), slot) {
                        listener(slot.view(), index);
                    }
                }
                Completion::Restored { callback } => {
                    if let Some(callback) = callback {
                        callback();
                    }
                }
            }
        }

        self.scheduler.needs_tick()
    }

    /// True while animations or timers are pending
    pub fn needs_tick(&self) -> bool {
        self.scheduler.needs_tick()
    }

    // ========================================================================
    // Touch handling
    // ========================================================================

    /// Route a raw pointer event from the host
    ///
    /// A pointer-down goes to the topmost card under it. The viewport watches
    /// the sequence and takes it over once the pointer passes the touch slop,
    /// in which case the card's session is dropped. A pointer-down that no card
    /// accepts goes to the viewport directly. Returns true if consumed.
    pub fn dispatch_touch(&mut self, event: &TouchEvent) -> bool {
        match *event {
            TouchEvent::Started { y, .. } => {
                self.route = TouchRoute::None;
                self.viewport.on_intercept_touch(event);
                let frame_y = y + self.viewport.scroll_y();
                if let Some(position) = self.frame.hit_test(frame_y) {
                    if self.on_card_touch(position, event) {
                        self.route = TouchRoute::Card(position);
                        return true;
                    }
                }
                if self.viewport.on_touch_event(event) {
                    self.route = TouchRoute::Scroll;
                    return true;
                }
                false
            }
            _ => {
                let handled = match self.route {
                    TouchRoute::Card(position) => {
                        if self.viewport.on_intercept_touch(event) {
                            // The card's session ends silently: no tap, no settle.
                            tracing::trace!(position, "viewport took over touch");
                            self.tracker.reset();
                            self.route = TouchRoute::Scroll;
                            return true;
                        }
                        self.on_card_touch(position, event)
                    }
                    TouchRoute::Scroll => self.viewport.on_touch_event(event),
                    TouchRoute::None => false,
                };
                if event.is_terminal() {
                    self.route = TouchRoute::None;
                }
                handled
            }
        }
    }

    /// Feed an event that a card view received directly
    ///
    /// Drags move the touched card and every card in front of it. A tap
    /// selects the card when nothing is selected and restores otherwise.
    pub fn on_card_touch(&mut self, position: usize, event: &TouchEvent) -> bool {
        if self.frame.get(position).is_none() {
            return false;
        }
        let gate = TouchGate {
            screen_touchable: self.choreographer.is_screen_touchable(),
            card_selected: self.choreographer.is_card_selected(),
        };

        let outcome = self.tracker.handle(position, event, gate);
        match outcome {
            GestureOutcome::Drag { target, delta } => {
                let count = self.frame.len();
                for (index, y) in self.geometry.drag_positions(delta, target, count) {
                    if let Some(slot) = self.frame.get_mut(index) {
                        slot.set_y(y);
                    }
                }
            }
            GestureOutcome::Tap { target } => {
                if self.choreographer.is_card_selected() {
                    self.restore(None);
                } else {
                    self.select_card(target);
                }
            }
            GestureOutcome::Released { .. } => {
                if self.config.settle_after_drag && !self.choreographer.is_card_selected() {
                    self.restore(None);
                }
            }
            GestureOutcome::Ignored | GestureOutcome::Tracking => {}
        }
        outcome.is_consumed()
    }

    // ========================================================================
    // Scrolling
    // ========================================================================

    /// Scroll the viewport to `y`, clamped to the content
    pub fn scroll_to(&mut self, y: f32) {
        self.viewport.scroll_to(y);
    }

    pub fn scroll_y(&self) -> f32 {
        self.viewport.scroll_y()
    }

    /// True if the outer viewport would scroll right now
    pub fn is_scrollable(&self) -> bool {
        self.viewport.is_scrollable()
    }

    /// True exactly while a card is selected or a transition runs
    pub fn is_scroll_locked(&self) -> bool {
        self.choreographer.scroll_locked()
    }

    pub fn viewport(&self) -> &ScrollViewport {
        &self.viewport
    }

    fn sync_scroll_gate(&mut self) {
        self.viewport.set_scrolling_enabled(!self.choreographer.scroll_locked());
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn is_card_selected(&self) -> bool {
        self.choreographer.is_card_selected()
    }

    /// Position of the selected card
    pub fn selected_card_position(&self) -> Option<usize> {
        self.choreographer.selected()
    }

    /// False while a transition runs or the init transition is pending
    pub fn is_screen_touchable(&self) -> bool {
        self.choreographer.is_screen_touchable()
    }

    pub fn is_animating(&self) -> bool {
        self.choreographer.is_animating()
    }

    /// Number of bound cards
    pub fn card_count(&self) -> usize {
        self.frame.len()
    }

    pub fn card_view(&self, position: usize) -> Option<&V> {
        self.frame.get(position).map(CardSlot::view)
    }

    pub fn card_view_mut(&mut self, position: usize) -> Option<&mut V> {
        self.frame.get_mut(position).map(CardSlot::view_mut)
    }

    /// Current Y of card `position` in frame coordinates
    pub fn card_y(&self, position: usize) -> Option<f32> {
        self.frame.get(position).map(CardSlot::y)
    }

    /// Current Y of every card, by position
    pub fn positions(&self) -> Vec<f32> {
        self.frame.positions()
    }

    pub fn frame(&self) -> &CardFrame<V> {
        &self.frame
    }
}

impl<V> std::fmt::Debug for CardStackLayout<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardStackLayout")
            .field("config", &self.config)
            .field("cards", &self.frame.len())
            .field("bound", &self.adapter.is_some())
            .field("choreographer", &self.choreographer)
            .field("scroll_y", &self.viewport.scroll_y())
            .field("route", &self.route)
            .finish()
    }
}
