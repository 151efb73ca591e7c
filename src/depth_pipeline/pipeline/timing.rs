use std::time::{Duration, Instant};

/// One stage checkpoint: elapsed wall time since the tick started.
#[derive(Debug, Clone)]
pub struct StageMark {
    pub name: String,
    pub elapsed: Duration,
}

/// Stage checkpoints for a single tick.
///
/// Marks carry time since tick start rather than per-stage durations; the
/// host displays them as a cumulative profile.
#[derive(Debug)]
pub struct TickTimings {
    started: Instant,
    marks: Vec<StageMark>,
}

impl TickTimings {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            marks: Vec::new(),
        }
    }

    pub fn mark(&mut self, name: impl Into<String>) {
        self.marks.push(StageMark {
            name: name.into(),
            elapsed: self.started.elapsed(),
        });
    }

    pub fn marks(&self) -> &[StageMark] {
        &self.marks
    }

    pub fn total_elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Human-readable diagnostic lines, one per checkpoint.
    pub fn lines(&self) -> Vec<String> {
        self.marks
            .iter()
            .map(|mark| {
                format!(
                    "{}: {:.2} ms",
                    mark.name,
                    mark.elapsed.as_secs_f64() * 1000.0
                )
            })
            .collect()
    }
}
