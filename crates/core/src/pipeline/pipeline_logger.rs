use std::collections::BTreeMap;
use std::time::Instant;

/// Observer for labeling-loop events.
///
/// Keeps the use case free of any particular output mechanism; the CLI
/// logs through the `log` facade, tests discard everything.
pub trait PipelineLogger: Send {
    /// Called once per processed frame with the running frame count.
    fn progress(&mut self, frames_processed: usize);

    /// Record how long a named stage took for one frame or face.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time value (face count, identity count).
    fn metric(&mut self, name: &str, value: f64);

    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _frames_processed: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Running count, sum and peak of one series.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aggregate {
    pub count: usize,
    pub total: f64,
    pub max: f64,
}

impl Aggregate {
    fn push(&mut self, value: f64) {
        if self.count == 0 || value > self.max {
            self.max = value;
        }
        self.count += 1;
        self.total += value;
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }
}

/// Logger backed by the `log` crate.
///
/// Progress lines are emitted every `throttle_frames` frames; timings and
/// metrics are aggregated for the end-of-run summary.
pub struct LogPipelineLogger {
    throttle_frames: usize,
    timings: BTreeMap<String, Aggregate>,
    metrics: BTreeMap<String, Aggregate>,
    start_time: Instant,
    frames: usize,
}

impl LogPipelineLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: BTreeMap::new(),
            metrics: BTreeMap::new(),
            start_time: Instant::now(),
            frames: 0,
        }
    }

    pub fn timing_for(&self, stage: &str) -> Option<&Aggregate> {
        self.timings.get(stage)
    }

    pub fn metric_for(&self, name: &str) -> Option<&Aggregate> {
        self.metrics.get(name)
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    /// The summary report, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.frames == 0 && self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_s = self.start_time.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Labeling summary ({} frames, {elapsed_s:.1}s):",
            self.frames
        )];
        for (stage, agg) in &self.timings {
            lines.push(format!(
                "  {stage:10}: avg {:6.2}ms  max {:6.2}ms  calls {}",
                agg.mean(),
                agg.max,
                agg.count
            ));
        }
        for (name, agg) in &self.metrics {
            lines.push(format!("  {name}: avg {:.1}  max {:.0}", agg.mean(), agg.max));
        }
        if self.frames > 0 && elapsed_s > 0.0 {
            lines.push(format!("  Throughput: {:.1} fps", self.frames as f64 / elapsed_s));
        }
        Some(lines.join("\n"))
    }
}

impl Default for LogPipelineLogger {
    fn default() -> Self {
        Self::new(30)
    }
}

impl PipelineLogger for LogPipelineLogger {
    fn progress(&mut self, frames_processed: usize) {
        self.frames = frames_processed;
        if frames_processed % self.throttle_frames == 0 {
            log::info!("Processed {frames_processed} frames");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics.entry(name.to_string()).or_default().push(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n{text}");
        }
    }
}
