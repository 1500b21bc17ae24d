//! Frame timing instrumentation.
//!
//! Tracks how long each frame's classify/act/tick cycle takes and keeps
//! rolling statistics for the periodic status log.

/// Rolling per-frame processing time statistics.
#[derive(Debug)]
pub struct FrameTiming {
    /// Per-frame processing time in milliseconds.
    pub process_times: Vec<f64>,
    /// Maximum number of samples to keep.
    pub window_size: usize,
    /// Total frames recorded.
    pub total_frames: u64,
    /// Frames that exceeded the budget.
    pub slow_frames: u64,
    /// Frame budget in milliseconds (33.3 for a 30 fps camera).
    pub budget_ms: f64,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new(600, 33.3)
    }
}

impl FrameTiming {
    pub fn new(window_size: usize, budget_ms: f64) -> Self {
        Self {
            process_times: Vec::with_capacity(window_size),
            window_size: window_size.max(1),
            total_frames: 0,
            slow_frames: 0,
            budget_ms,
        }
    }

    /// Record one frame's processing time.
    pub fn record_frame(&mut self, process_ms: f64) {
        self.process_times.push(process_ms);
        if self.process_times.len() > self.window_size {
            self.process_times.remove(0);
        }

        self.total_frames += 1;
        if process_ms > self.budget_ms {
            self.slow_frames += 1;
        }
    }

    /// Compute percentile from a sorted slice.
    fn percentile(sorted: &[f64], p: f64) -> f64 {
        if sorted.is_empty() {
            return 0.0;
        }
        let idx = ((sorted.len() as f64 - 1.0) * p / 100.0).round() as usize;
        sorted[idx.min(sorted.len() - 1)]
    }

    /// Get timing statistics over the current window.
    pub fn stats(&self) -> FrameTimingStats {
        let mut sorted = self.process_times.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        FrameTimingStats {
            p50_ms: Self::percentile(&sorted, 50.0),
            p95_ms: Self::percentile(&sorted, 95.0),
            p99_ms: Self::percentile(&sorted, 99.0),
            max_ms: sorted.last().copied().unwrap_or(0.0),
            slow_pct: if self.total_frames > 0 {
                (self.slow_frames as f64 / self.total_frames as f64) * 100.0
            } else {
                0.0
            },
            total_frames: self.total_frames,
            slow_frames: self.slow_frames,
        }
    }

    /// One-line summary for logs.
    pub fn summary(&self) -> String {
        let s = self.stats();
        format!(
            "p50 {:.2}ms p99 {:.2}ms max {:.2}ms, {} frame(s), {} over budget ({:.1}%)",
            s.p50_ms, s.p99_ms, s.max_ms, s.total_frames, s.slow_frames, s.slow_pct,
        )
    }
}

/// Computed frame timing statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameTimingStats {
    pub p50_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub max_ms: f64,
    pub slow_pct: f64,
    pub total_frames: u64,
    pub slow_frames: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let ft = FrameTiming::new(100, 33.3);
        let stats = ft.stats();
        assert_eq!(stats.total_frames, 0);
        assert_eq!(stats.slow_frames, 0);
        assert_eq!(stats.p50_ms, 0.0);
        assert_eq!(stats.slow_pct, 0.0);
    }

    #[test]
    fn test_record_frame() {
        let mut ft = FrameTiming::new(100, 33.3);
        ft.record_frame(1.5);
        assert_eq!(ft.total_frames, 1);
        assert_eq!(ft.slow_frames, 0);
        assert!((ft.stats().p50_ms - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_slow_frame_detection() {
        let mut ft = FrameTiming::new(100, 33.3);
        ft.record_frame(41.0); // scroll burst with pauses
        assert_eq!(ft.slow_frames, 1);
        ft.record_frame(0.4);
        assert_eq!(ft.slow_frames, 1);
        assert_eq!(ft.total_frames, 2);
        assert!((ft.stats().slow_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_size_trim() {
        let mut ft = FrameTiming::new(5, 33.3);
        for i in 0..10 {
            ft.record_frame(i as f64);
        }
        assert_eq!(ft.process_times.len(), 5);
        assert_eq!(ft.total_frames, 10);
        assert_eq!(ft.stats().max_ms, 9.0);
    }

    #[test]
    fn test_summary_format() {
        let mut ft = FrameTiming::new(100, 33.3);
        ft.record_frame(2.0);
        let s = ft.summary();
        assert!(s.starts_with("p50 2.00ms"));
        assert!(s.contains("1 frame(s)"));
    }
}
