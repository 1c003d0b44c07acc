//! Animation scheduler
//!
//! Owns every running animation group and pending timer, and advances them
//! when the host's frame clock ticks. Everything runs on the UI thread; the
//! scheduler never spawns threads or reads the wall clock, so a host (or a
//! test) decides exactly how much time passes per frame.
//!
//! - `AnimationGroup` - Tweens that play together and finish together
//! - Timers - One-shot delays on the same clock, for "run this in 500ms"

use crate::easing::Easing;
use crate::values::FloatTween;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a running animation group
    pub struct GroupId;
    /// Handle to a pending timer
    pub struct TimerId;
}

struct GroupMember<K> {
    target: K,
    tween: FloatTween,
}

/// A set of float tweens played together
///
/// Every member shares the group's duration. Members use the group easing
/// unless they were added with their own. The group completes when its last
/// member finishes, which for equal durations is the same frame for all.
pub struct AnimationGroup<K> {
    members: SmallVec<[GroupMember<K>; 8]>,
    duration_ms: u32,
    easing: Easing,
}

impl<K: Copy> AnimationGroup<K> {
    /// Create an empty group
    pub fn new(duration_ms: u32, easing: Easing) -> Self {
        Self {
            members: SmallVec::new(),
            duration_ms,
            easing,
        }
    }

    /// Animate `target` from `from` to `to` with the group easing (builder pattern)
    pub fn animate(mut self, target: K, from: f32, to: f32) -> Self {
        self.push(target, from, to, None);
        self
    }

    /// Add a member, optionally overriding the group easing
    pub fn push(&mut self, target: K, from: f32, to: f32, easing: Option<Easing>) {
        let tween =
            FloatTween::new(from, to, self.duration_ms).easing(easing.unwrap_or(self.easing));
        self.members.push(GroupMember { target, tween });
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if the group has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Shared duration in milliseconds
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Destination of every member, in insertion order
    pub fn targets(&self) -> impl Iterator<Item = (K, f32)> + '_ {
        self.members.iter().map(|m| (m.target, *m.tween.to()))
    }

    fn tick(&mut self, dt_ms: f32, out: &mut Vec<(K, f32)>) -> bool {
        let mut finished = true;
        for member in &mut self.members {
            finished &= member.tween.tick(dt_ms);
            out.push((member.target, member.tween.value()));
        }
        finished
    }
}

impl<K> std::fmt::Debug for AnimationGroup<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationGroup")
            .field("members", &self.members.len())
            .field("duration_ms", &self.duration_ms)
            .field("easing", &self.easing)
            .finish()
    }
}

#[derive(Clone, Copy, Debug)]
struct Timer {
    remaining_ms: f32,
}

/// Everything that happened during one [`AnimationScheduler::tick`]
#[derive(Debug)]
pub struct FrameUpdate<K> {
    /// New value for each animated target, in group order
    pub values: Vec<(K, f32)>,
    /// Groups whose members all finished this frame (already removed)
    pub finished: SmallVec<[GroupId; 2]>,
    /// Timers that expired this frame (already removed)
    pub fired: SmallVec<[TimerId; 2]>,
}

impl<K> FrameUpdate<K> {
    /// True if the frame changed nothing
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.finished.is_empty() && self.fired.is_empty()
    }
}

/// The scheduler that ticks all active groups and timers
pub struct AnimationScheduler<K> {
    groups: SlotMap<GroupId, AnimationGroup<K>>,
    timers: SlotMap<TimerId, Timer>,
}

impl<K: Copy> AnimationScheduler<K> {
    pub fn new() -> Self {
        Self {
            groups: SlotMap::with_key(),
            timers: SlotMap::with_key(),
        }
    }

    /// Start playing a group on the next tick
    pub fn start(&mut self, group: AnimationGroup<K>) -> GroupId {
        let members = group.len();
        let duration_ms = group.duration_ms();
        let id = self.groups.insert(group);
        tracing::trace!(?id, members, duration_ms, "animation group started");
        id
    }

    /// Fire a timer once `delay_ms` of frame time has elapsed
    pub fn schedule(&mut self, delay_ms: u32) -> TimerId {
        self.timers.insert(Timer {
            remaining_ms: delay_ms as f32,
        })
    }

    /// Drop a pending timer. Returns false if it already fired.
    pub fn cancel_timer(&mut self, id: TimerId) -> bool {
        self.timers.remove(id).is_some()
    }

    /// Check if a group is still playing
    pub fn is_running(&self, id: GroupId) -> bool {
        self.groups.contains_key(id)
    }

    /// Check if a timer is still pending
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Check if there are any running groups
    pub fn has_active_animations(&self) -> bool {
        !self.groups.is_empty()
    }

    /// True while anything needs further ticks
    pub fn needs_tick(&self) -> bool {
        !self.groups.is_empty() || !self.timers.is_empty()
    }

    /// Get the number of running groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Get the number of pending timers
    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    /// Drop every group and timer without completing them
    pub fn clear(&mut self) {
        self.groups.clear();
        self.timers.clear();
    }

    /// Advance all groups and timers by `dt_ms` milliseconds
    ///
    /// Finished groups and fired timers are removed before this returns, so a
    /// caller reacting to them may immediately start new work.
    pub fn tick(&mut self, dt_ms: f32) -> FrameUpdate<K> {
        let mut update = FrameUpdate {
            values: Vec::new(),
            finished: SmallVec::new(),
            fired: SmallVec::new(),
        };

        for (id, group) in &mut self.groups {
            if group.tick(dt_ms, &mut update.values) {
                update.finished.push(id);
            }
        }
        for id in &update.finished {
            self.groups.remove(*id);
        }

        for (id, timer) in &mut self.timers {
            timer.remaining_ms -= dt_ms;
            if timer.remaining_ms <= 0.0 {
                update.fired.push(id);
            }
        }
        for id in &update.fired {
            self.timers.remove(*id);
        }

        update
    }
}

impl<K: Copy> Default for AnimationScheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> std::fmt::Debug for AnimationScheduler<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationScheduler")
            .field("groups", &self.groups.len())
            .field("timers", &self.timers.len())
            .finish()
    }
}
