//! Per-frame pipeline: landmarks → fingers → gesture → pointer action.
//!
//! `FrameOrchestrator` owns all state that lives across frames (smoothed
//! cursor and cooldown timers). Each call to `process` runs one full
//! classify/resolve/act/tick cycle and reports what happened.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::cooldown::CooldownController;
use crate::gesture::{Gesture, Rgb};
use crate::hand::{FingerState, HandLandmark, HandLandmarks, Landmark};
use crate::motion::{ActiveRegion, CursorSmoother, RegionMapping, ScreenPoint, Size};
use crate::output::{Button, PointerCommand, PointerSink};
use crate::source::LandmarkFrame;

/// Scroll ticks emitted per burst.
pub const SCROLL_TICKS: u32 = 4;

/// Scroll units per tick.
pub const SCROLL_MAGNITUDE: i32 = 30;

/// Blocking pause after each scroll tick so the OS registers them apart.
pub const SCROLL_TICK_PAUSE: Duration = Duration::from_millis(10);

// ── Types ──────────────────────────────────────────────────

/// Whether a hand was present this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackingState {
    #[default]
    Idle,
    Tracking,
}

impl TrackingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Tracking => "tracking",
        }
    }
}

/// Shape of a scroll burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollBurst {
    pub ticks: u32,
    pub magnitude: i32,
    pub pause: Duration,
}

impl Default for ScrollBurst {
    fn default() -> Self {
        Self {
            ticks: SCROLL_TICKS,
            magnitude: SCROLL_MAGNITUDE,
            pause: SCROLL_TICK_PAUSE,
        }
    }
}

/// Outcome of one frame, for overlays and logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    /// 1-based frame number within the session.
    pub frame: u64,
    pub tracking: TrackingState,
    pub fingers: Option<FingerState>,
    pub gesture: Gesture,
    /// The gesture produced a side effect (not suppressed by cooldown).
    pub fired: bool,
    /// Smoothed cursor position after this frame.
    pub cursor: ScreenPoint,
    /// Active region as left, top, right, bottom frame pixels.
    pub region: (i64, i64, i64, i64),
    /// Index fingertip lies inside the active region.
    pub in_region: bool,
    /// Extended fingertips, thumb first.
    pub tips: Vec<Landmark>,
}

impl FrameReport {
    /// Label and colour to draw, or `None` when nothing fired.
    pub fn overlay_label(&self) -> Option<(&'static str, Rgb)> {
        if self.fired {
            Some((self.gesture.label(), self.gesture.color()))
        } else {
            None
        }
    }
}

/// Running totals over a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActionCounts {
    pub frames: u64,
    pub hand_frames: u64,
    pub moves: u64,
    pub left_clicks: u64,
    pub right_clicks: u64,
    pub scroll_ups: u64,
    pub scroll_downs: u64,
    /// Discrete gestures blocked by a cooldown.
    pub suppressed: u64,
    /// Pointer commands the backend rejected.
    pub sink_errors: u64,
}

// ── Orchestrator ───────────────────────────────────────────

/// Single-hand gesture-to-pointer state machine.
pub struct FrameOrchestrator {
    screen: Size,
    mapping: RegionMapping,
    smoother: CursorSmoother,
    cooldown: CooldownController,
    scroll: ScrollBurst,
    tracking: TrackingState,
    frame: u64,
    counts: ActionCounts,
}

impl FrameOrchestrator {
    /// Create an orchestrator in the idle state with the cursor at the
    /// origin and both timers cleared.
    pub fn new(screen: Size) -> Self {
        Self {
            screen,
            mapping: RegionMapping::default(),
            smoother: CursorSmoother::default(),
            cooldown: CooldownController::default(),
            scroll: ScrollBurst::default(),
            tracking: TrackingState::Idle,
            frame: 0,
            counts: ActionCounts::default(),
        }
    }

    pub fn with_mapping(mut self, mapping: RegionMapping) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn with_scroll_burst(mut self, scroll: ScrollBurst) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn screen(&self) -> Size {
        self.screen
    }

    pub fn cursor(&self) -> ScreenPoint {
        self.smoother.position()
    }

    pub fn cooldown(&self) -> &CooldownController {
        &self.cooldown
    }

    pub fn tracking(&self) -> TrackingState {
        self.tracking
    }

    pub fn counts(&self) -> &ActionCounts {
        &self.counts
    }

    /// Run one cycle for a frame from a source. Only the first hand is
    /// tracked.
    pub fn process_frame(&mut self, frame: &LandmarkFrame, sink: &mut dyn PointerSink) -> FrameReport {
        if frame.hands.len() > 1 {
            trace!("ignoring {} extra hand(s)", frame.hands.len() - 1);
        }
        self.process(frame.size, frame.primary_hand(), sink)
    }

    /// Run one cycle: classify, resolve, act, tick.
    pub fn process(
        &mut self,
        frame_size: Size,
        hand: Option<&HandLandmarks>,
        sink: &mut dyn PointerSink,
    ) -> FrameReport {
        self.frame += 1;
        self.counts.frames += 1;
        self.update_tracking(hand.is_some());

        let fingers = hand.map(FingerState::classify);
        let gesture = Gesture::resolve_opt(fingers);

        let fired = match (gesture, hand) {
            (Gesture::Move, Some(hand)) => {
                self.move_pointer(frame_size, hand, sink);
                true
            }
            (Gesture::LeftClick, _) => self.click(Button::Left, sink),
            (Gesture::RightClick, _) => self.click(Button::Right, sink),
            (Gesture::ScrollUp, _) => self.scroll(1, sink),
            (Gesture::ScrollDown, _) => self.scroll(-1, sink),
            _ => false,
        };

        if gesture.is_discrete() && !fired {
            self.counts.suppressed += 1;
            trace!("{} suppressed by cooldown", gesture.as_str());
        }

        self.cooldown.tick();

        let region = ActiveRegion::for_frame(frame_size);
        let (in_region, tips) = match (hand, fingers) {
            (Some(hand), Some(fingers)) => (
                region.contains(hand.get(HandLandmark::IndexTip)),
                extended_tips(hand, fingers),
            ),
            _ => (false, Vec::new()),
        };

        FrameReport {
            frame: self.frame,
            tracking: self.tracking,
            fingers,
            gesture,
            fired,
            cursor: self.smoother.position(),
            region: region.bounds(),
            in_region,
            tips,
        }
    }

    fn update_tracking(&mut self, hand_present: bool) {
        let next = if hand_present {
            TrackingState::Tracking
        } else {
            TrackingState::Idle
        };
        if next != self.tracking {
            debug!(
                "frame {}: {} -> {}",
                self.frame,
                self.tracking.as_str(),
                next.as_str()
            );
            self.tracking = next;
        }
        if hand_present {
            self.counts.hand_frames += 1;
        }
    }

    fn move_pointer(&mut self, frame_size: Size, hand: &HandLandmarks, sink: &mut dyn PointerSink) {
        let region = ActiveRegion::for_frame(frame_size);
        let target = region.map(hand.get(HandLandmark::IndexTip), self.screen, self.mapping);
        let current = self.smoother.smooth(target);
        let (x, y) = current.to_pixel();
        self.emit(sink, PointerCommand::MoveTo { x, y });
        self.cooldown.reset();
        self.counts.moves += 1;
    }

    fn click(&mut self, button: Button, sink: &mut dyn PointerSink) -> bool {
        if !self.cooldown.can_fire_click() {
            return false;
        }
        debug!("frame {}: {} click", self.frame, button.as_str());
        self.emit(sink, PointerCommand::Click { button });
        self.cooldown.fire_click();
        match button {
            Button::Left => self.counts.left_clicks += 1,
            Button::Right => self.counts.right_clicks += 1,
        }
        true
    }

    /// `direction` is +1 for up, -1 for down.
    fn scroll(&mut self, direction: i32, sink: &mut dyn PointerSink) -> bool {
        if !self.cooldown.can_fire_scroll() {
            return false;
        }
        let amount = self.scroll.magnitude * direction;
        debug!(
            "frame {}: scroll burst {} x {:+}",
            self.frame, self.scroll.ticks, amount
        );
        for _ in 0..self.scroll.ticks {
            self.emit(sink, PointerCommand::Scroll { amount });
            if !self.scroll.pause.is_zero() {
                std::thread::sleep(self.scroll.pause);
            }
        }
        self.cooldown.fire_scroll();
        if direction > 0 {
            self.counts.scroll_ups += 1;
        } else {
            self.counts.scroll_downs += 1;
        }
        true
    }

    fn emit(&mut self, sink: &mut dyn PointerSink, command: PointerCommand) {
        if let Err(e) = sink.send(command) {
            self.counts.sink_errors += 1;
            warn!(
                "frame {}: {} backend rejected {:?}: {}",
                self.frame,
                sink.name(),
                command,
                e
            );
        }
    }
}

fn extended_tips(hand: &HandLandmarks, fingers: FingerState) -> Vec<Landmark> {
    HandLandmark::fingertips()
        .iter()
        .zip(fingers.as_array())
        .filter(|(_, up)| *up)
        .map(|(tip, _)| hand.get(*tip))
        .collect()
}

// ── Tests ──────────────────────────────────────────────────
