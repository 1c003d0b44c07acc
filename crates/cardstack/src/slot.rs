//! Card slots and the frame holding them
//!
//! A slot owns one adapter view for the lifetime of a bind. Its position in
//! the frame is its identity: slot 3 always holds the view created for
//! position 3, and views are never moved between slots.

/// One card in the stack
#[derive(Debug)]
pub struct CardSlot<V> {
    view: V,
    position: usize,
    y: f32,
    resting_y: f32,
}

impl<V> CardSlot<V> {
    /// Wrap a freshly created view, tagged with its position
    pub(crate) fn new(view: V, position: usize, y: f32, resting_y: f32) -> Self {
        Self {
            view,
            position,
            y,
            resting_y,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Adapter position this slot was created for
    pub fn position(&self) -> usize {
        self.position
    }

    /// Current Y in frame coordinates
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Cached resting Y
    pub fn resting_y(&self) -> f32 {
        self.resting_y
    }

    /// True if the card sits at its resting Y
    pub fn is_at_rest(&self) -> bool {
        (self.y - self.resting_y).abs() < 0.5
    }

    pub(crate) fn set_y(&mut self, y: f32) {
        self.y = y;
    }
}

/// Unbounded-height frame inside the scroll viewport
///
/// Children are drawn in order, so later cards sit on top of earlier ones.
#[derive(Debug)]
pub struct CardFrame<V> {
    slots: Vec<CardSlot<V>>,
    measured_height: f32,
    card_height: f32,
}

impl<V> CardFrame<V> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            measured_height: 0.0,
            card_height: 0.0,
        }
    }

    /// Install a complete set of slots, replacing none: the frame must be empty
    pub(crate) fn install(&mut self, slots: Vec<CardSlot<V>>, card_height: f32, height: f32) {
        debug_assert!(self.slots.is_empty(), "frame already holds cards");
        self.slots = slots;
        self.card_height = card_height;
        self.measured_height = height;
    }

    /// Release every slot together
    pub(crate) fn remove_all(&mut self) {
        self.slots.clear();
        self.measured_height = 0.0;
        self.card_height = 0.0;
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&CardSlot<V>> {
        self.slots.get(position)
    }

    pub(crate) fn get_mut(&mut self, position: usize) -> Option<&mut CardSlot<V>> {
        self.slots.get_mut(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardSlot<V>> {
        self.slots.iter()
    }

    /// Current Y of every card, by position
    pub fn positions(&self) -> Vec<f32> {
        self.slots.iter().map(CardSlot::y).collect()
    }

    /// Height the frame measures to, which sets the scroll range
    pub fn measured_height(&self) -> f32 {
        self.measured_height
    }

    /// Height of each card view
    pub fn card_height(&self) -> f32 {
        self.card_height
    }

    /// Topmost card containing frame coordinate `y`
    pub fn hit_test(&self, y: f32) -> Option<usize> {
        self.slots
            .iter()
            .rev()
            .find(|slot| y >= slot.y && y < slot.y + self.card_height)
            .map(CardSlot::position)
    }
}

impl<V> Default for CardFrame<V> {
    fn default() -> Self {
        Self::new()
    }
}
