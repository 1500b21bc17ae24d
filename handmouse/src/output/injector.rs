//! OS pointer injection through `enigo`.

use enigo::{Axis, Coordinate, Direction, Enigo, Mouse, Settings};
use tracing::info;

use super::{Button, PointerSink};
use crate::motion::Size;
use crate::Error;

/// Injects pointer events into the running desktop session.
pub struct EnigoSink {
    enigo: Enigo,
}

impl EnigoSink {
    /// Connect to the platform input layer.
    pub fn new() -> crate::Result<Self> {
        let enigo = Enigo::new(&Settings::default()).map_err(|e| Error::Output(e.to_string()))?;
        info!("enigo pointer backend connected");
        Ok(Self { enigo })
    }
}

impl PointerSink for EnigoSink {
    fn move_to(&mut self, x: i32, y: i32) -> crate::Result<()> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| Error::Output(e.to_string()))
    }

    fn click(&mut self, button: Button) -> crate::Result<()> {
        let button = match button {
            Button::Left => enigo::Button::Left,
            Button::Right => enigo::Button::Right,
        };
        self.enigo
            .button(button, Direction::Click)
            .map_err(|e| Error::Output(e.to_string()))
    }

    fn scroll(&mut self, amount: i32) -> crate::Result<()> {
        // enigo scrolls down for positive lengths.
        self.enigo
            .scroll(-amount, Axis::Vertical)
            .map_err(|e| Error::Output(e.to_string()))
    }

    fn screen_size(&mut self) -> Option<Size> {
        let (w, h) = self.enigo.main_display().ok()?;
        if w > 0 && h > 0 {
            Some(Size::new(w as u32, h as u32))
        } else {
            None
        }
    }

    fn name(&self) -> &'static str {
        "enigo"
    }
}
