//! Shared Hann analysis/synthesis window table.
//!
//! The table is computed once per process and shared read-only by every
//! [`PitchShifter`](crate::PitchShifter) instance. Concurrent first access is
//! safe; later reads are plain shared reads.

use std::f64::consts::PI;
use std::sync::OnceLock;

use crate::WINDOW_SIZE;

static HANN: OnceLock<Vec<f32>> = OnceLock::new();

/// Returns the process-wide Hann window of [`WINDOW_SIZE`] samples,
/// computing it on first use.
pub fn hann_window() -> &'static [f32] {
    HANN.get_or_init(|| {
        let n = WINDOW_SIZE as f64;
        (0..WINDOW_SIZE)
            .map(|i| {
                let x = 2.0 * PI * i as f64 / (n - 1.0);
                (0.5 - 0.5 * x.cos()) as f32
            })
            .collect()
    })
}
