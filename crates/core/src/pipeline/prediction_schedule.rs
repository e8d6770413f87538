/// Decides which frames run the classifier.
///
/// Frames are counted from 1; frame `n` is a prediction frame when
/// `n % interval == 0`. Skipped predictions are dropped, never queued.
#[derive(Clone, Debug)]
pub struct PredictionSchedule {
    interval: usize,
    frame_count: usize,
}

impl PredictionSchedule {
    pub fn new(interval: usize) -> Result<Self, &'static str> {
        if interval < 1 {
            return Err("prediction interval must be >= 1");
        }
        Ok(Self {
            interval,
            frame_count: 0,
        })
    }

    /// Advances to the next frame and reports whether it should be classified.
    pub fn tick(&mut self) -> bool {
        self.frame_count += 1;
        self.frame_count % self.interval == 0
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn interval(&self) -> usize {
        self.interval
    }
}
