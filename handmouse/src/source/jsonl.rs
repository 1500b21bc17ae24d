//! JSON-lines landmark stream, one object per camera frame.
//!
//! ```text
//! {"width":640,"height":480,"hands":[[[0.51,0.62],[0.49,0.55], ...21 points]]}
//! {"width":640,"height":480,"hands":[]}
//! {"width":640,"height":480,"quit":true}
//! ```
//!
//! Points are normalized `[x, y]` pairs; they are scaled to pixels here.

use std::io::BufRead;

use serde::Deserialize;
use tracing::trace;

use super::{LandmarkFrame, LandmarkSource};
use crate::hand::{HandLandmarks, LANDMARK_COUNT};
use crate::motion::Size;
use crate::Error;

#[derive(Debug, Deserialize)]
struct RawFrame {
    width: u32,
    height: u32,
    #[serde(default)]
    hands: Vec<Vec<[f32; 2]>>,
    #[serde(default)]
    quit: bool,
}

/// Reads frames from any buffered reader (stdin, a file, a pipe).
pub struct JsonLinesSource<R> {
    reader: R,
    line: String,
    frames_read: u64,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            frames_read: 0,
        }
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    fn decode(&self, raw: RawFrame) -> crate::Result<LandmarkFrame> {
        // Frames are numbered from 1; this one has not been counted yet.
        let frame = self.frames_read + 1;
        if raw.width == 0 || raw.height == 0 {
            return Err(Error::MalformedFrame {
                frame,
                reason: format!("frame size {}x{}", raw.width, raw.height),
            });
        }
        let size = Size::new(raw.width, raw.height);
        let hands = raw
            .hands
            .iter()
            .enumerate()
            .map(|(i, points)| {
                HandLandmarks::from_normalized(points, size.width, size.height).ok_or_else(|| {
                    Error::MalformedFrame {
                        frame,
                        reason: format!(
                            "hand {} has {} landmarks, expected {}",
                            i,
                            points.len(),
                            LANDMARK_COUNT
                        ),
                    }
                })
            })
            .collect::<crate::Result<Vec<_>>>()?;

        Ok(LandmarkFrame {
            size,
            hands,
            quit: raw.quit,
        })
    }
}

impl<R: BufRead> LandmarkSource for JsonLinesSource<R> {
    fn next_frame(&mut self) -> crate::Result<Option<LandmarkFrame>> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            if self.line.trim().is_empty() {
                continue;
            }
            let raw: RawFrame = serde_json::from_str(self.line.trim())?;
            let frame = self.decode(raw)?;
            self.frames_read += 1;
            trace!(
                "frame {}: {} hand(s){}",
                self.frames_read,
                frame.hands.len(),
                if frame.quit { ", quit" } else { "" }
            );
            return Ok(Some(frame));
        }
    }
}
