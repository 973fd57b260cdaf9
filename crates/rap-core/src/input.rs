//! Pure input helpers: key names to actions and pointer positions to term
//! values. Event wiring lives in the front-ends.

use glam::Vec2;

use crate::config::RapConfig;
use crate::range::Range;
use crate::term::RatioTerm;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Increase,
    Decrease,
    PageUp,
    PageDown,
    Home,
    End,
}

/// Where a key action moves a term from `current`. Home/End jump to the range
/// edges.
pub fn proposed_value(
    action: KeyAction,
    current: f64,
    use_shift_step: bool,
    config: &RapConfig,
    range: Range,
) -> f64 {
    let step = if use_shift_step {
        config.shift_step()
    } else {
        config.keyboard_step
    };
    let value = match action {
        KeyAction::Increase => current + step,
        KeyAction::Decrease => current - step,
        KeyAction::PageUp => current + config.page_step,
        KeyAction::PageDown => current - config.page_step,
        KeyAction::Home => range.min,
        KeyAction::End => range.max,
    };
    range.constrain(value)
}

/// Single-hand keys, for a focused hand.
#[inline]
pub fn key_action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        "ArrowUp" | "ArrowRight" => Some(KeyAction::Increase),
        "ArrowDown" | "ArrowLeft" => Some(KeyAction::Decrease),
        "PageUp" => Some(KeyAction::PageUp),
        "PageDown" => Some(KeyAction::PageDown),
        "Home" => Some(KeyAction::Home),
        "End" => Some(KeyAction::End),
        _ => None,
    }
}

/// Both-hands keys: W/S move the left hand, the arrows move the right.
#[inline]
pub fn both_hands_key(key: &str) -> Option<(RatioTerm, KeyAction)> {
    match key {
        "w" | "W" => Some((RatioTerm::Antecedent, KeyAction::Increase)),
        "s" | "S" => Some((RatioTerm::Antecedent, KeyAction::Decrease)),
        "ArrowUp" => Some((RatioTerm::Consequent, KeyAction::Increase)),
        "ArrowDown" => Some((RatioTerm::Consequent, KeyAction::Decrease)),
        _ => None,
    }
}

/// Digit keys jump both hands to a tick mark.
#[inline]
pub fn tick_mark_for_digit(key: &str) -> Option<u32> {
    match key {
        "0" => Some(0),
        "1" => Some(1),
        "2" => Some(2),
        "3" => Some(3),
        "4" => Some(4),
        "5" => Some(5),
        "6" => Some(6),
        "7" => Some(7),
        "8" => Some(8),
        "9" => Some(9),
        _ => None,
    }
}

/// Screen-space rectangle a hand is dragged within.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragBounds {
    pub top_left: Vec2,
    pub size: Vec2,
}

impl DragBounds {
    pub fn new(top_left: Vec2, size: Vec2) -> Self {
        Self { top_left, size }
    }

    /// Term value for a pointer at `point`. Screen y grows downward while the
    /// term grows upward; points outside the bounds clamp to the edges.
    pub fn value_for_point(&self, point: Vec2, range: Range) -> f64 {
        if self.size.y <= 0.0 {
            return range.min;
        }
        let v = ((point.y - self.top_left.y) / self.size.y).clamp(0.0, 1.0);
        range.expand(1.0 - v as f64)
    }

    /// Inverse of [`DragBounds::value_for_point`], x centred.
    pub fn point_for_value(&self, value: f64, range: Range) -> Vec2 {
        let v = 1.0 - range.normalize(range.constrain(value)) as f32;
        Vec2::new(
            self.top_left.x + self.size.x * 0.5,
            self.top_left.y + v * self.size.y,
        )
    }
}
