//! Session loop — drives the orchestrator from a frame source until a
//! stop condition holds.
//!
//! Stop conditions are checked between frames: end of stream, a quit
//! forwarded by the display side, SIGINT/SIGTERM, a frame limit or a
//! time limit. Failing to read a frame ends the session with an error.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info};

use crate::frame_timing::{FrameTiming, FrameTimingStats};
use crate::orchestrator::{ActionCounts, FrameOrchestrator};
use crate::output::PointerSink;
use crate::source::LandmarkSource;

/// Global flag set by SIGTERM/SIGINT handlers.
static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Install signal handlers for graceful shutdown (SIGTERM, SIGINT) and
/// return the flag they set.
pub fn install_signal_handlers() -> &'static AtomicBool {
    unsafe {
        libc::signal(libc::SIGTERM, signal_handler as libc::sighandler_t);
        libc::signal(libc::SIGINT, signal_handler as libc::sighandler_t);
    }
    &SHUTDOWN_REQUESTED
}

extern "C" fn signal_handler(_sig: libc::c_int) {
    SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopReason {
    /// The frame source ran dry.
    EndOfStream,
    /// The display side forwarded a quit key.
    QuitRequested,
    /// SIGINT/SIGTERM (or an embedding caller) raised the stop flag.
    Signal,
    FrameLimit,
    TimeLimit,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EndOfStream => "end of stream",
            Self::QuitRequested => "quit requested",
            Self::Signal => "signal",
            Self::FrameLimit => "frame limit",
            Self::TimeLimit => "time limit",
        }
    }
}

/// Session limits and reporting cadence.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub max_frames: Option<u64>,
    pub exit_after: Option<Duration>,
    /// Interval between status log lines; `None` disables them.
    pub status_interval: Option<Duration>,
}

/// Final report of a session.
#[derive(Debug, Clone)]
pub struct SessionStats {
    pub stop: StopReason,
    pub counts: ActionCounts,
    pub timing: FrameTimingStats,
    pub elapsed: Duration,
}

/// One run of the frame loop.
pub struct Session<'a> {
    orchestrator: FrameOrchestrator,
    options: SessionOptions,
    stop_flag: &'a AtomicBool,
    overlay: Option<Box<dyn Write + 'a>>,
    timing: FrameTiming,
}

impl<'a> Session<'a> {
    pub fn new(orchestrator: FrameOrchestrator, options: SessionOptions, stop_flag: &'a AtomicBool) -> Self {
        Self {
            orchestrator,
            options,
            stop_flag,
            overlay: None,
            timing: FrameTiming::default(),
        }
    }

    /// Write each frame's report as a JSON line to `writer`.
    pub fn with_overlay(mut self, writer: Box<dyn Write + 'a>) -> Self {
        self.overlay = Some(writer);
        self
    }

    pub fn orchestrator(&self) -> &FrameOrchestrator {
        &self.orchestrator
    }

    /// Run until a stop condition holds.
    pub fn run(
        &mut self,
        source: &mut dyn LandmarkSource,
        sink: &mut dyn PointerSink,
    ) -> crate::Result<SessionStats> {
        let start = Instant::now();
        let mut last_status = Instant::now();
        info!(
            "session started: screen {}, backend {}",
            self.orchestrator.screen(),
            sink.name()
        );

        let stop = loop {
            if let Some(reason) = self.check_limits(start) {
                break reason;
            }

            let frame = match source.next_frame()? {
                Some(frame) => frame,
                None => break StopReason::EndOfStream,
            };

            let began = Instant::now();
            let report = self.orchestrator.process_frame(&frame, sink);
            self.timing.record_frame(began.elapsed().as_secs_f64() * 1000.0);

            if let Some(out) = self.overlay.as_mut() {
                serde_json::to_writer(&mut *out, &report)?;
                out.write_all(b"\n")?;
            }

            if frame.quit {
                break StopReason::QuitRequested;
            }

            if let Some(interval) = self.options.status_interval {
                if last_status.elapsed() >= interval {
                    self.log_status();
                    last_status = Instant::now();
                }
            }
        };

        if let Some(out) = self.overlay.as_mut() {
            out.flush()?;
        }

        let stats = SessionStats {
            stop,
            counts: self.orchestrator.counts().clone(),
            timing: self.timing.stats(),
            elapsed: start.elapsed(),
        };
        info!(
            "session ended ({}) after {:.1}s: {} frame(s), {} click(s), {} scroll burst(s)",
            stop.as_str(),
            stats.elapsed.as_secs_f64(),
            stats.counts.frames,
            stats.counts.left_clicks + stats.counts.right_clicks,
            stats.counts.scroll_ups + stats.counts.scroll_downs,
        );
        info!("frame timing: {}", self.timing.summary());
        Ok(stats)
    }

    fn check_limits(&self, start: Instant) -> Option<StopReason> {
        if self.stop_flag.load(Ordering::SeqCst) {
            info!("Shutdown signal received, exiting");
            return Some(StopReason::Signal);
        }
        if let Some(max) = self.options.max_frames {
            if self.orchestrator.counts().frames >= max {
                debug!("frame limit {} reached", max);
                return Some(StopReason::FrameLimit);
            }
        }
        if let Some(limit) = self.options.exit_after {
            if start.elapsed() >= limit {
                info!("exit timer fired after {}s", limit.as_secs());
                return Some(StopReason::TimeLimit);
            }
        }
        None
    }

    fn log_status(&self) {
        let c = self.orchestrator.counts();
        info!(
            "status: {} frame(s), hand in {}, {} move(s), {}/{} click(s) L/R, {}/{} scroll(s) U/D, {} suppressed, {} backend error(s); {}",
            c.frames,
            c.hand_frames,
            c.moves,
            c.left_clicks,
            c.right_clicks,
            c.scroll_ups,
            c.scroll_downs,
            c.suppressed,
            c.sink_errors,
            self.timing.summary(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::{make_hand, FingerState, HandLandmarks};
    use crate::motion::Size;
    use crate::orchestrator::ScrollBurst;
    use crate::output::{Button, RecordingSink};
    use crate::source::{JsonLinesSource, LandmarkFrame, VecSource};
    use std::io::Cursor;

    const FRAME: Size = Size {
        width: 640,
        height: 480,
    };

    fn orchestrator() -> FrameOrchestrator {
        FrameOrchestrator::new(Size::new(1920, 1080)).with_scroll_burst(ScrollBurst {
            pause: Duration::ZERO,
            ..ScrollBurst::default()
        })
    }

    fn hand(f: [bool; 5]) -> HandLandmarks {
        make_hand(FingerState::from(f), (320, 240))
    }

    fn frames(f: [bool; 5], n: usize) -> Vec<LandmarkFrame> {
        (0..n).map(|_| LandmarkFrame::new(FRAME, vec![hand(f)])).collect()
    }

    /// Source whose reads always fail.
    struct BrokenCamera;

    impl LandmarkSource for BrokenCamera {
        fn next_frame(&mut self) -> crate::Result<Option<LandmarkFrame>> {
            Err(crate::Error::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "camera unplugged",
            )))
        }
    }

    #[test]
    fn test_runs_to_end_of_stream() {
        let flag = AtomicBool::new(false);
        let mut session = Session::new(orchestrator(), SessionOptions::default(), &flag);
        let mut source = VecSource::new(frames([false, true, true, false, false], 30));
        let mut sink = RecordingSink::new();

        let stats = session.run(&mut source, &mut sink).unwrap();
        assert_eq!(stats.stop, StopReason::EndOfStream);
        assert_eq!(stats.counts.frames, 30);
        assert_eq!(stats.counts.left_clicks, 2);
        assert_eq!(stats.timing.total_frames, 30);
        assert_eq!(sink.clicks().collect::<Vec<_>>(), vec![Button::Left, Button::Left]);
    }

    #[test]
    fn test_frame_limit() {
        let flag = AtomicBool::new(false);
        let options = SessionOptions {
            max_frames: Some(5),
            ..SessionOptions::default()
        };
        let mut session = Session::new(orchestrator(), options, &flag);
        let mut source = VecSource::new(frames([false, true, false, false, false], 20));
        let mut sink = RecordingSink::new();

        let stats = session.run(&mut source, &mut sink).unwrap();
        assert_eq!(stats.stop, StopReason::FrameLimit);
        assert_eq!(stats.counts.frames, 5);
        assert_eq!(source.remaining(), 15);
    }

    #[test]
    fn test_stop_flag_checked_before_each_frame() {
        let flag = AtomicBool::new(true);
        let mut session = Session::new(orchestrator(), SessionOptions::default(), &flag);
        let mut source = VecSource::new(frames([false, true, true, false, false], 3));
        let mut sink = RecordingSink::new();

        let stats = session.run(&mut source, &mut sink).unwrap();
        assert_eq!(stats.stop, StopReason::Signal);
        assert_eq!(stats.counts.frames, 0);
        assert!(sink.commands.is_empty());
    }

    #[test]
    fn test_time_limit() {
        let flag = AtomicBool::new(false);
        let options = SessionOptions {
            exit_after: Some(Duration::ZERO),
            ..SessionOptions::default()
        };
        let mut session = Session::new(orchestrator(), options, &flag);
        let mut source = VecSource::new(frames([false, false, false, false, false], 3));
        let stats = session.run(&mut source, &mut RecordingSink::new()).unwrap();
        assert_eq!(stats.stop, StopReason::TimeLimit);
    }

    #[test]
    fn test_quit_frame_is_processed_then_stops() {
        let flag = AtomicBool::new(false);
        let mut session = Session::new(orchestrator(), SessionOptions::default(), &flag);
        let mut script = frames([false, true, true, false, false], 3);
        script[1].quit = true;
        let mut source = VecSource::new(script);
        let mut sink = RecordingSink::new();

        let stats = session.run(&mut source, &mut sink).unwrap();
        assert_eq!(stats.stop, StopReason::QuitRequested);
        assert_eq!(stats.counts.frames, 2);
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn test_source_failure_is_fatal() {
        let flag = AtomicBool::new(false);
        let mut session = Session::new(orchestrator(), SessionOptions::default(), &flag);
        let result = session.run(&mut BrokenCamera, &mut RecordingSink::new());
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }

    #[test]
    fn test_overlay_reports_written_per_frame() {
        let flag = AtomicBool::new(false);
        let mut buf: Vec<u8> = Vec::new();
        {
            let mut session = Session::new(orchestrator(), SessionOptions::default(), &flag)
                .with_overlay(Box::new(&mut buf));
            let mut source = VecSource::new(vec![
                LandmarkFrame::empty(FRAME),
                LandmarkFrame::new(FRAME, vec![hand([false, true, true, false, false])]),
            ]);
            session.run(&mut source, &mut RecordingSink::new()).unwrap();
        }

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["tracking"], "idle");
        assert_eq!(lines[0]["gesture"], "none");
        assert_eq!(lines[1]["gesture"], "left-click");
        assert_eq!(lines[1]["fired"], true);
        assert_eq!(lines[1]["fingers"]["middle"], true);
        assert_eq!(lines[1]["region"], serde_json::json!([100, 100, 540, 380]));
        assert_eq!(lines[1]["tips"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_jsonl_source_end_to_end() {
        let mut points = vec![[0.5_f32, 0.5_f32]; 21];
        // Index extended: tip above PIP, everything else level.
        points[8] = [0.5, 0.3];
        let line = format!(
            "{{\"width\":640,\"height\":480,\"hands\":[{}]}}\n",
            serde_json::to_string(&points).unwrap()
        );
        let input = line.repeat(3);

        let flag = AtomicBool::new(false);
        let mut session = Session::new(orchestrator(), SessionOptions::default(), &flag);
        let mut source = JsonLinesSource::new(Cursor::new(input));
        let mut sink = RecordingSink::new();
        let stats = session.run(&mut source, &mut sink).unwrap();

        assert_eq!(stats.counts.moves, 3);
        assert_eq!(sink.moves().count(), 3);
        assert_eq!(session.orchestrator().counts().frames, 3);
    }
}
