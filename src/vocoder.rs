//! Phase-vocoder analysis and synthesis.
//!
//! [`analyze`] turns a Hermitian-packed spectrum into magnitude /
//! instantaneous-frequency pairs, unwrapping each bin's phase against the
//! value measured one analysis hop earlier. [`synthesize`] inverts it at an
//! independent hop size: each bin's phase accumulator advances by
//! `synthesis_hop * frequency`, so resynthesizing with a hop different from
//! the analysis hop time-scales the signal without moving its frequency
//! content — the step that actually performs the pitch shift once the output
//! is resampled back to the fixed block rate.

use std::f32::consts::PI;

/// Magnitudes below this (scaled by the window size) are treated as silence:
/// phase is forced to zero instead of unwrapping measurement noise.
pub const EPSILON: f32 = 1e-6;

const TWO_PI: f32 = 2.0 * PI;

/// Extracts magnitude/frequency pairs from a Hermitian-packed spectrum.
///
/// `spectrum` holds `2 * (bins - 1)` floats in packed layout (bin 0 and the
/// Nyquist bin share the first complex slot, real parts only), where
/// `bins == last_phase.len()`. `pairs` receives `2 * bins` floats: magnitude
/// at even indices, instantaneous angular frequency (radians per sample) at
/// odd indices. `last_phase` is updated in place with each bin's raw measured
/// phase; it is the continuity state linking consecutive analysis hops.
pub fn analyze(spectrum: &[f32], pairs: &mut [f32], analysis_hop: usize, last_phase: &mut [f32]) {
    let bins = last_phase.len();
    let half = bins - 1;
    let n = half << 1;
    assert_eq!(spectrum.len(), n, "spectrum must hold {} floats", n);
    assert_eq!(pairs.len(), 2 * bins, "pairs must hold {} floats", 2 * bins);

    let hop = analysis_hop as f32;
    for i in 0..bins {
        let re = i << 1;
        let im = re + 1;
        let a = if i == half { spectrum[1] } else { spectrum[re] };
        let b = if i == 0 || i == half { 0.0 } else { spectrum[im] };

        let mag = a.hypot(b);
        pairs[re] = mag;

        // Nominal angular frequency of this bin's center, radians per sample.
        let omega = TWO_PI * i as f32 / n as f32;

        let phase_diff;
        if mag * (n as f32) < EPSILON {
            // Silence: define phase as zero rather than unwrapping noise.
            phase_diff = -last_phase[i];
            last_phase[i] = 0.0;
        } else {
            let phase = if b.abs() < EPSILON {
                if a < 0.0 {
                    PI
                } else {
                    0.0
                }
            } else {
                -b.atan2(a)
            };
            let mut diff = phase - last_phase[i];
            last_phase[i] = phase;

            // Subtract the expected advance for this bin over one analysis
            // hop and wrap the residual into (-pi, pi].
            diff -= hop * omega;
            diff = if diff > 0.0 {
                (diff + PI) % TWO_PI - PI
            } else {
                let wrapped = (diff - PI) % TWO_PI + PI;
                if wrapped == PI {
                    -PI
                } else {
                    wrapped
                }
            };
            phase_diff = diff;
        }

        pairs[im] = omega + phase_diff / hop;
    }
}

/// Rebuilds a Hermitian-packed spectrum from magnitude/frequency pairs.
///
/// Each bin's entry in `accum_phase` advances by `synthesis_hop * frequency`
/// before the complex sample is reconstructed from magnitude and accumulated
/// phase. Bin 0 and the Nyquist bin have no imaginary part; the Nyquist real
/// part lands in the packed slot at index 1.
pub fn synthesize(
    pairs: &[f32],
    spectrum: &mut [f32],
    synthesis_hop: usize,
    accum_phase: &mut [f32],
) {
    let bins = accum_phase.len();
    let half = bins - 1;
    let n = half << 1;
    assert_eq!(spectrum.len(), n, "spectrum must hold {} floats", n);
    assert_eq!(pairs.len(), 2 * bins, "pairs must hold {} floats", 2 * bins);

    let hop = synthesis_hop as f32;
    for i in 0..bins {
        let idx = i << 1;
        let re = if i == half { 1 } else { idx };
        let mag = pairs[idx];
        accum_phase[i] += hop * pairs[idx + 1];
        let phase = accum_phase[i];
        spectrum[re] = mag * phase.cos();
        if i != half {
            spectrum[idx + 1] = -mag * phase.sin();
        }
    }
}
