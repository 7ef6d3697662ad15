//! Latency sketches used by verseg when the `profiler` feature is enabled
#![deny(missing_docs)]
#![forbid(unsafe_code)]

use minstant::Instant;
use parking_lot::Mutex;
use sketches_ddsketch::{Config, DDSketch};
use std::sync::Arc;

/// Computes a fixed set of percentiles from a [DDSketch]
pub fn sketch_percentiles(sketch: &DDSketch) -> Percentiles {
    let quantile = |q: f64| sketch.quantile(q).ok().flatten().unwrap_or(0.0);
    Percentiles {
        count: sketch.count(),
        min: sketch.min().unwrap_or(0.0),
        p50: quantile(0.5),
        p99: quantile(0.99),
        p99_9: quantile(0.999),
        p99_99: quantile(0.9999),
        p99_999: quantile(0.99999),
        max: sketch.max().unwrap_or(0.0),
    }
}

/// Percentiles (in nanoseconds) of a recorded latency distribution
#[derive(Default, Clone, Copy)]
pub struct Percentiles {
    /// Number of recorded samples
    pub count: usize,
    /// Smallest sample
    pub min: f64,
    /// Median
    pub p50: f64,
    /// 99th percentile
    pub p99: f64,
    /// 99.9th percentile
    pub p99_9: f64,
    /// 99.99th percentile
    pub p99_99: f64,
    /// 99.999th percentile
    pub p99_999: f64,
    /// Largest sample
    pub max: f64,
}

impl std::fmt::Debug for Percentiles {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Percentiles")
            .field("count", &self.count)
            .field("min", &format_args!("{:.2}ns", self.min))
            .field("p50", &format_args!("{:.2}ns", self.p50))
            .field("p99", &format_args!("{:.2}ns", self.p99))
            .field("p99.9", &format_args!("{:.2}ns", self.p99_9))
            .field("p99.99", &format_args!("{:.2}ns", self.p99_99))
            .field("p99.999", &format_args!("{:.2}ns", self.p99_999))
            .field("max", &format_args!("{:.2}ns", self.max))
            .finish()
    }
}

/// A shareable latency sketch
///
/// Clones point to the same underlying sketch, and the sketch may be recorded to from
/// multiple threads.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone)]
pub struct Sketch {
    inner: Arc<Mutex<DDSketch>>,
}

impl Default for Sketch {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(DDSketch::new(Config::new(0.01, 2048, 1.0e-9)))),
        }
    }
}

impl Sketch {
    /// Records a single sample
    #[inline]
    pub fn add(&self, data: f64) {
        self.inner.lock().add(data)
    }
    /// Returns the number of recorded samples
    pub fn count(&self) -> usize {
        self.inner.lock().count()
    }
    /// Returns the percentiles of the recorded samples
    pub fn percentiles(&self) -> Percentiles {
        sketch_percentiles(&self.inner.lock())
    }
}

/// Timing guard that records the elapsed time into a [Sketch] once dropped
// Inspired by https://github.com/spacejam/sled/blob/main/src/metrics.rs
pub struct Measure {
    start: Instant,
    sketch: Sketch,
}

impl Measure {
    /// Starts a new measurement
    #[inline]
    pub fn new(sketch: &Sketch) -> Measure {
        Measure {
            sketch: sketch.clone(),
            start: Instant::now(),
        }
    }
}

impl Drop for Measure {
    #[inline]
    fn drop(&mut self) {
        self.sketch.add(self.start.elapsed().as_nanos() as f64);
    }
}

/// Measures the remainder of the enclosing scope into the given [Sketch]
#[macro_export]
macro_rules! profile_scope {
    ($sketch:expr) => {
        let _measure_guard = $crate::Measure::new($sketch);
    };
}
