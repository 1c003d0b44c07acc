//! Select and restore transitions
//!
//! The choreographer decides whether a transition may start, builds its
//! animation group, and owns the state that changes around it: the
//! touchable gate and the selected card. It never touches card positions
//! directly; the layout applies the scheduler's frame values and hands
//! finished groups back through [`Choreographer::finish`].
//!
//! At most one group is active. A request made while one runs is dropped,
//! and a running group always completes before the selection changes.

use cardstack_animation::{AnimationGroup, AnimationScheduler, GroupId};

use crate::adapter::{AnimatorContext, AnimatorProvider};
use crate::config::TransitionTiming;
use crate::geometry::CardGeometry;
use crate::slot::CardFrame;

/// Runs once after a restore transition completes
pub type CompletionCallback = Box<dyn FnOnce()>;

/// Which transition a group plays
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    Select { index: usize },
    Restore,
}

/// Follow-up work for the layout once a group completes
pub enum Completion {
    /// Card `index` finished moving into the selected position
    Selected { index: usize },
    /// The deck is back at rest
    Restored { callback: Option<CompletionCallback> },
}

impl std::fmt::Debug for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Completion::Selected { index } => {
                f.debug_struct("Selected").field("index", index).finish()
            }
            Completion::Restored { callback } => f
                .debug_struct("Restored")
                .field("callback", &callback.is_some())
                .finish(),
        }
    }
}

struct ActiveTransition {
    group: GroupId,
    kind: TransitionKind,
    on_complete: Option<CompletionCallback>,
}

/// Owner of the touchable gate and the selection
pub struct Choreographer {
    timing: TransitionTiming,
    screen_touchable: bool,
    selected: Option<usize>,
    active: Option<ActiveTransition>,
}

impl Choreographer {
    /// Starts untouchable; the layout opens the gate once cards are in place
    pub fn new(timing: TransitionTiming) -> Self {
        Self {
            timing,
            screen_touchable: false,
            selected: None,
            active: None,
        }
    }

    pub fn timing(&self) -> &TransitionTiming {
        &self.timing
    }

    /// False while a group runs or the init transition is pending
    pub fn is_screen_touchable(&self) -> bool {
        self.screen_touchable
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_card_selected(&self) -> bool {
        self.selected.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Kind of the running transition, if any
    pub fn active_kind(&self) -> Option<TransitionKind> {
        self.active.as_ref().map(|a| a.kind)
    }

    /// True exactly while a card is selected or a group runs
    pub fn scroll_locked(&self) -> bool {
        self.selected.is_some() || self.active.is_some()
    }

    pub(crate) fn set_screen_touchable(&mut self, touchable: bool) {
        self.screen_touchable = touchable;
    }

    /// Start the select transition for card `index`
    ///
    /// Each card's destination comes from the provider's animator hook, given
    /// the card's view and current Y. Returns `None` when the request is
    /// rejected: screen not touchable, a card already selected, a group
    /// running, or `index` out of range.
    pub fn select<P>(
        &mut self,
        index: usize,
        frame: &CardFrame<P::View>,
        provider: &P,
        geometry: &CardGeometry,
        scroll_offset: f32,
        scheduler: &mut AnimationScheduler<usize>,
    ) -> Option<GroupId>
    where
        P: AnimatorProvider + ?Sized,
    {
        if !self.screen_touchable || self.selected.is_some() || self.active.is_some() {
            tracing::debug!(index, "select rejected");
            return None;
        }
        let count = frame.len();
        if index >= count {
            tracing::warn!(index, count, "select out of range");
            return None;
        }

        let mut group = AnimationGroup::new(self.timing.duration_ms, self.timing.easing);
        for slot in frame.iter() {
            let ctx = AnimatorContext {
                geometry,
                scroll_offset,
                count,
                current_y: slot.y(),
            };
            let anim = provider.animator_for(slot.view(), &ctx, slot.position(), index);
            group.push(slot.position(), slot.y(), anim.to, anim.easing);
        }

        self.screen_touchable = false;
        self.selected = Some(index);
        let id = scheduler.start(group);
        self.active = Some(ActiveTransition {
            group: id,
            kind: TransitionKind::Select { index },
            on_complete: None,
        });
        tracing::debug!(index, scroll_offset, "select transition started");
        Some(id)
    }

    /// Start the restore transition, moving every card to its resting Y
    ///
    /// Allowed whenever no group runs, so it also serves the init transition
    /// and a settle after drag. `on_complete` runs after the selection has
    /// been cleared. Returns `None` if a group is already running; the
    /// callback is dropped without being called.
    pub fn restore(
        &mut self,
        positions: &[f32],
        geometry: &CardGeometry,
        scheduler: &mut AnimationScheduler<usize>,
        on_complete: Option<CompletionCallback>,
    ) -> Option<GroupId> {
        if self.active.is_some() {
            tracing::debug!("restore rejected, transition in progress");
            return None;
        }

        let mut group = AnimationGroup::new(self.timing.duration_ms, self.timing.easing);
        for (index, &current_y) in positions.iter().enumerate() {
            group.push(index, current_y, geometry.resting_y(index), None);
        }

        self.screen_touchable = false;
        let id = scheduler.start(group);
        self.active = Some(ActiveTransition {
            group: id,
            kind: TransitionKind::Restore,
            on_complete,
        });
        tracing::debug!(cards = positions.len(), "restore transition started");
        Some(id)
    }

    /// Settle state after `group` completed
    ///
    /// Returns `None` for groups this choreographer did not start.
    pub fn finish(&mut self, group: GroupId) -> Option<Completion> {
        if self.active.as_ref().map(|a| a.group) != Some(group) {
            return None;
        }
        let active = self.active.take()?;
        self.screen_touchable = true;

        match active.kind {
            TransitionKind::Select { index } => {
                tracing::debug!(index, "select transition finished");
                Some(Completion::Selected { index })
            }
            TransitionKind::Restore => {
                self.selected = None;
                tracing::debug!("restore transition finished");
                Some(Completion::Restored {
                    callback: active.on_complete,
                })
            }
        }
    }

    /// Forget every transition and the selection
    pub(crate) fn reset(&mut self) {
        self.screen_touchable = false;
        self.selected = None;
        self.active = None;
    }
}

impl std::fmt::Debug for Choreographer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Choreographer")
            .field("timing", &self.timing)
            .field("screen_touchable", &self.screen_touchable)
            .field("selected", &self.selected)
            .field("active", &self.active_kind())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::CardAnimation;
    use crate::config::{CardStackConfig, DisplayMetrics};
    use crate::slot::CardSlot;

    use cardstack_animation::Easing;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Stock;

    impl AnimatorProvider for Stock {
        type View = ();
    }

    struct Pinned(f32);

    impl AnimatorProvider for Pinned {
        type View = ();

        fn animator_for(
            &self,
            _: &(),
            _: &AnimatorContext<'_>,
            _: usize,
            _: usize,
        ) -> CardAnimation {
            CardAnimation::to(self.0)
        }
    }

    fn frame(positions: &[f32]) -> CardFrame<()> {
        let mut frame = CardFrame::new();
        let slots = positions
            .iter()
            .enumerate()
            .map(|(i, &y)| CardSlot::new((), i, y, y))
            .collect();
        frame.install(slots, 100.0, 1000.0);
        frame
    }

    fn geometry() -> CardGeometry {
        let config = CardStackConfig::default().card_gap(10.0).card_gap_bottom(20.0);
        CardGeometry::new(&config, &DisplayMetrics::new(1000.0, 1.0))
    }

    fn touchable() -> Choreographer {
        let mut c = Choreographer::new(TransitionTiming::default());
        c.set_screen_touchable(true);
        c
    }

    fn run(scheduler: &mut AnimationScheduler<usize>) -> (Vec<(usize, f32)>, GroupId) {
        let update = scheduler.tick(1000.0);
        (update.values, update.finished[0])
    }

    #[test]
    fn test_select_locks_until_finished() {
        let g = geometry();
        let mut scheduler = AnimationScheduler::new();
        let mut c = touchable();

        let id = c
            .select(1, &frame(&[0.0, 10.0, 20.0]), &Stock, &g, 0.0, &mut scheduler)
            .unwrap();
        assert_eq!(c.selected(), Some(1));
        assert!(!c.is_screen_touchable());
        assert!(c.scroll_locked());

        let (values, finished) = run(&mut scheduler);
        assert_eq!(finished, id);
        assert_eq!(values, vec![(0, 910.0), (1, 0.0), (2, 950.0)]);

        assert!(matches!(c.finish(id), Some(Completion::Selected { index: 1 })));
        assert!(c.is_screen_touchable());
        assert!(c.scroll_locked());
    }

    #[test]
    fn test_select_uses_provider() {
        let g = geometry();
        let mut scheduler = AnimationScheduler::new();
        let mut c = touchable();
        c.select(0, &frame(&[0.0, 10.0]), &Pinned(77.0), &g, 0.0, &mut scheduler);
        let (values, _) = run(&mut scheduler);
        assert_eq!(values, vec![(0, 77.0), (1, 77.0)]);
    }

    #[test]
    fn test_second_request_is_dropped() {
        let g = geometry();
        let mut scheduler = AnimationScheduler::new();
        let mut c = touchable();
        let positions = [0.0, 10.0, 20.0];
        let cards = frame(&positions);

        assert!(c.select(0, &cards, &Stock, &g, 0.0, &mut scheduler).is_some());
        assert!(c.restore(&positions, &g, &mut scheduler, None).is_none());
        assert!(c.select(2, &cards, &Stock, &g, 0.0, &mut scheduler).is_none());
        assert_eq!(scheduler.group_count(), 1);
        assert_eq!(c.selected(), Some(0));
    }

    #[test]
    fn test_restore_clears_selection_then_calls_back() {
        let g = geometry();
        let mut scheduler = AnimationScheduler::new();
        let mut c = touchable();
        let id = c
            .select(2, &frame(&[0.0, 10.0, 20.0]), &Stock, &g, 0.0, &mut scheduler)
            .unwrap();
        scheduler.tick(1000.0);
        c.finish(id);

        let called = Rc::new(Cell::new(false));
        let flag = called.clone();
        let id = c
            .restore(
                &[910.0, 930.0, 0.0],
                &g,
                &mut scheduler,
                Some(Box::new(move || flag.set(true))),
            )
            .unwrap();
        assert_eq!(c.selected(), Some(2));

        let (values, _) = run(&mut scheduler);
        assert_eq!(values, vec![(0, 0.0), (1, 10.0), (2, 20.0)]);
        match c.finish(id) {
            Some(Completion::Restored { callback: Some(callback) }) => callback(),
            other => panic!("unexpected completion: {other:?}"),
        }
        assert!(called.get());
        assert_eq!(c.selected(), None);
        assert!(!c.scroll_locked());
    }

    #[test]
    fn test_untouchable_rejects_select_but_not_restore() {
        let g = geometry();
        let mut scheduler = AnimationScheduler::new();
        let mut c = Choreographer::new(TransitionTiming::default());
        assert!(c.select(0, &frame(&[0.0]), &Stock, &g, 0.0, &mut scheduler).is_none());
        assert!(c.restore(&[900.0], &g, &mut scheduler, None).is_some());
    }

    #[test]
    fn test_foreign_group_is_ignored() {
        let mut scheduler: AnimationScheduler<usize> = AnimationScheduler::new();
        let foreign = scheduler.start(AnimationGroup::new(10, Easing::Linear));
        let mut c = touchable();
        assert!(c.finish(foreign).is_none());
    }
}
