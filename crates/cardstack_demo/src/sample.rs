//! Sample adapter
//!
//! Fourteen coloured cards. The first one is the settings card showing the
//! current preferences; the rest carry a title and a background colour.

use cardstack::prelude::*;
use cardstack::default_animator;

use crate::prefs::DemoPrefs;

const CARD_COLORS: [u32; 14] = [
    0xF44336, 0xE91E63, 0x9C27B0, 0x673AB7, 0x3F51B5, 0x2196F3, 0x03A9F4, 0x00BCD4, 0x009688,
    0x4CAF50, 0x8BC34A, 0xCDDC39, 0xF44336, 0xE91E63,
];

const SETTINGS_COLOR: u32 = 0xECEFF1;

/// What a card shows
#[derive(Clone, Debug, PartialEq)]
pub enum CardContent {
    /// Preference summary, one line per setting
    Settings(Vec<String>),
    Title(String),
}

/// View built by [`SampleAdapter`]
#[derive(Clone, Debug, PartialEq)]
pub struct SampleCard {
    pub content: CardContent,
    /// Background as 0xRRGGBB
    pub background: u32,
    pub height: f32,
}

impl SampleCard {
    pub fn label(&self) -> &str {
        match &self.content {
            CardContent::Settings(_) => "Settings",
            CardContent::Title(title) => title,
        }
    }
}

pub struct SampleAdapter {
    prefs: DemoPrefs,
}

impl SampleAdapter {
    pub fn new(prefs: DemoPrefs) -> Self {
        Self { prefs }
    }

    fn settings_lines(&self) -> Vec<String> {
        let p = &self.prefs;
        vec![
            format!("show init animation: {}", p.show_init_animation),
            format!("parallax: {} (scale {})", p.parallax_enabled, p.parallax_scale),
            format!("reverse click animation: {}", p.reverse_click_animation),
            format!("card gap: {}dp", p.card_gap),
            format!("card gap bottom: {}dp", p.card_gap_bottom),
        ]
    }
}

impl AnimatorProvider for SampleAdapter {
    type View = SampleCard;

    fn animator_for(
        &self,
        _card: &SampleCard,
        ctx: &AnimatorContext<'_>,
        current: usize,
        selected: usize,
    ) -> CardAnimation {
        if !self.prefs.reverse_click_animation {
            return default_animator(ctx, current, selected);
        }

        let g = ctx.geometry;
        if current > selected {
            CardAnimation::to(ctx.scroll_offset + g.collapsed_y(current, ctx.count))
        } else {
            CardAnimation::to(
                ctx.scroll_offset + g.resting_y(0) + current as f32 * g.card_gap_bottom,
            )
        }
    }
}

impl CardStackAdapter for SampleAdapter {
    fn count(&self) -> usize {
        CARD_COLORS.len()
    }

    fn create_view(&mut self, position: usize, container: &CardContainer) -> Option<SampleCard> {
        if position == 0 {
            return Some(SampleCard {
                content: CardContent::Settings(self.settings_lines()),
                background: SETTINGS_COLOR,
                height: container.card_height,
            });
        }
        let background = *CARD_COLORS.get(position)?;
        Some(SampleCard {
            content: CardContent::Title(format!("Card {position}")),
            background,
            height: container.card_height,
        })
    }
}
