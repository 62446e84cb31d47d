//! Portable high-resolution monotonic timer used by the benchmark runner.
//!
//! `std::time::Instant` is monotonic on every supported platform, so no
//! per-OS clock selection is needed.

use std::time::Instant;

/// Nanosecond duration.
pub type DurationNs = u64;

/// Opaque timestamp.  Only differences between two timestamps are meaningful.
#[derive(Clone, Copy)]
pub struct TimeT {
    t: Instant,
}

/// Returns the current monotonic timestamp.
pub fn get_time() -> TimeT {
    TimeT { t: Instant::now() }
}

/// Nanoseconds between `start` and `end`.
pub fn span_ns(start: TimeT, end: TimeT) -> DurationNs {
    end.t.duration_since(start.t).as_nanos() as DurationNs
}

/// Nanoseconds elapsed since `start`.
pub fn clock_span_ns(start: TimeT) -> DurationNs {
    start.t.elapsed().as_nanos() as DurationNs
}

/// Throughput in MiB/s for `bytes` processed in `ns` nanoseconds.
pub fn mib_per_sec(bytes: u64, ns: DurationNs) -> f64 {
    if ns == 0 {
        return f64::INFINITY;
    }
    (bytes as f64 / (1024.0 * 1024.0)) / (ns as f64 / 1_000_000_000.0)
}
