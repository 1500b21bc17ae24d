//! Pointer output — the OS-level move/click/scroll primitives.
//!
//! The orchestrator only talks to `PointerSink`. Backends:
//! - `LogSink`: dry run, logs every command
//! - `RecordingSink`: keeps commands in memory
//! - `EnigoSink`: real injection (gated behind the `enigo` feature)

#[cfg(feature = "enigo")]
pub mod injector;

#[cfg(feature = "enigo")]
pub use injector::EnigoSink;

use serde::Serialize;
use tracing::{info, trace};

use crate::motion::Size;

/// Mouse button for click commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Button {
    Left,
    Right,
}

impl Button {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// A single emitted side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PointerCommand {
    MoveTo { x: i32, y: i32 },
    Click { button: Button },
    /// Positive scrolls up.
    Scroll { amount: i32 },
}

/// Blocking pointer primitives.
pub trait PointerSink {
    /// Move the pointer to an absolute screen position.
    fn move_to(&mut self, x: i32, y: i32) -> crate::Result<()>;

    fn click(&mut self, button: Button) -> crate::Result<()>;

    /// Scroll vertically; positive is up.
    fn scroll(&mut self, amount: i32) -> crate::Result<()>;

    /// Screen size, if the backend can query it.
    fn screen_size(&mut self) -> Option<Size> {
        None
    }

    /// Backend name for logs.
    fn name(&self) -> &'static str;

    /// Dispatch a command to the matching primitive.
    fn send(&mut self, command: PointerCommand) -> crate::Result<()> {
        match command {
            PointerCommand::MoveTo { x, y } => self.move_to(x, y),
            PointerCommand::Click { button } => self.click(button),
            PointerCommand::Scroll { amount } => self.scroll(amount),
        }
    }
}

// ── Dry run ────────────────────────────────────────────────

/// Logs commands instead of injecting them.
#[derive(Debug, Default)]
pub struct LogSink {
    moves: u64,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PointerSink for LogSink {
    fn move_to(&mut self, x: i32, y: i32) -> crate::Result<()> {
        self.moves += 1;
        // Moves arrive every frame; keep them out of the default log level.
        trace!("move_to ({}, {}) [#{}]", x, y, self.moves);
        Ok(())
    }

    fn click(&mut self, button: Button) -> crate::Result<()> {
        info!("click {}", button.as_str());
        Ok(())
    }

    fn scroll(&mut self, amount: i32) -> crate::Result<()> {
        info!("scroll {:+}", amount);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

// ── Recording ──────────────────────────────────────────────

/// Keeps every command in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub commands: Vec<PointerCommand>,
    pub screen: Option<Size>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_screen(screen: Size) -> Self {
        Self {
            commands: Vec::new(),
            screen: Some(screen),
        }
    }

    pub fn clicks(&self) -> impl Iterator<Item = Button> + '_ {
        self.commands.iter().filter_map(|c| match c {
            PointerCommand::Click { button } => Some(*button),
            _ => None,
        })
    }

    pub fn scrolls(&self) -> impl Iterator<Item = i32> + '_ {
        self.commands.iter().filter_map(|c| match c {
            PointerCommand::Scroll { amount } => Some(*amount),
            _ => None,
        })
    }

    pub fn moves(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            PointerCommand::MoveTo { x, y } => Some((*x, *y)),
            _ => None,
        })
    }
}

impl PointerSink for RecordingSink {
    fn move_to(&mut self, x: i32, y: i32) -> crate::Result<()> {
        self.commands.push(PointerCommand::MoveTo { x, y });
        Ok(())
    }

    fn click(&mut self, button: Button) -> crate::Result<()> {
        self.commands.push(PointerCommand::Click { button });
        Ok(())
    }

    fn scroll(&mut self, amount: i32) -> crate::Result<()> {
        self.commands.push(PointerCommand::Scroll { amount });
        Ok(())
    }

    fn screen_size(&mut self) -> Option<Size> {
        self.screen
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
