//! Frame-counted cooldowns for discrete actions.
//!
//! Clicks and scroll bursts fire when a gesture is recognized, then stay
//! blocked for a fixed number of frames even if the pose is held.

/// Frames a click blocks further clicks.
pub const CLICK_COOLDOWN_FRAMES: u32 = 20;

/// Frames a scroll burst blocks further scroll bursts.
pub const SCROLL_COOLDOWN_FRAMES: u32 = 10;

/// Independent click and scroll timers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CooldownController {
    click: u32,
    scroll: u32,
    click_reset: u32,
    scroll_reset: u32,
}

impl Default for CooldownController {
    fn default() -> Self {
        Self::new(CLICK_COOLDOWN_FRAMES, SCROLL_COOLDOWN_FRAMES)
    }
}

impl CooldownController {
    /// Create a controller with both timers at zero.
    pub fn new(click_reset: u32, scroll_reset: u32) -> Self {
        Self {
            click: 0,
            scroll: 0,
            click_reset,
            scroll_reset,
        }
    }

    pub fn can_fire_click(&self) -> bool {
        self.click == 0
    }

    pub fn can_fire_scroll(&self) -> bool {
        self.scroll == 0
    }

    /// Arm the click timer. Only valid while `can_fire_click()` holds.
    pub fn fire_click(&mut self) {
        debug_assert!(self.can_fire_click(), "click fired during cooldown");
        self.click = self.click_reset;
    }

    /// Arm the scroll timer. Only valid while `can_fire_scroll()` holds.
    pub fn fire_scroll(&mut self) {
        debug_assert!(self.can_fire_scroll(), "scroll fired during cooldown");
        self.scroll = self.scroll_reset;
    }

    /// Advance one frame. Called exactly once per frame.
    pub fn tick(&mut self) {
        self.click = self.click.saturating_sub(1);
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Clear both timers.
    pub fn reset(&mut self) {
        self.click = 0;
        self.scroll = 0;
    }

    pub fn click_remaining(&self) -> u32 {
        self.click
    }

    pub fn scroll_remaining(&self) -> u32 {
        self.scroll
    }
}
