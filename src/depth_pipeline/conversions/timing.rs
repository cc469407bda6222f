use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::info;

#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: String,
    pub duration: Duration,
}

/// Wall-clock durations of the steps of one conversion, in execution order.
#[derive(Debug, Default)]
pub struct PipelineTimings {
    steps: Vec<StepTiming>,
    totals: HashMap<String, Duration>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, name: impl Into<String>, duration: Duration) {
        let name = name.into();
        *self.totals.entry(name.clone()).or_insert(Duration::ZERO) += duration;
        self.steps.push(StepTiming { name, duration });
    }

    /// Runs `f` and records how long it took under `name`.
    pub fn measure<T>(&mut self, name: &str, f: impl FnOnce() -> T) -> T {
        let timer = Timer::start(name);
        let value = f();
        let (name, duration) = timer.stop();
        self.add_step(name, duration);
        value
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    pub fn get_step(&self, name: &str) -> Option<Duration> {
        self.totals.get(name).copied()
    }

    pub fn steps(&self) -> &[StepTiming] {
        &self.steps
    }

    /// Logs every step with its share of the total.
    pub fn log_summary(&self) {
        let total = self.total_duration().as_secs_f64();
        for step in &self.steps {
            let share = if total > 0.0 {
                step.duration.as_secs_f64() / total * 100.0
            } else {
                0.0
            };
            info!(
                "{:<24} {:>10.3}ms ({:>5.1}%)",
                step.name,
                step.duration.as_secs_f64() * 1000.0,
                share
            );
        }
        info!("{:<24} {:>10.3}ms", "total", total * 1000.0);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    pub fn stop(self) -> (String, Duration) {
        (self.name, self.start.elapsed())
    }
}
