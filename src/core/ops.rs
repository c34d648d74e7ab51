//! Allocation-free elementwise primitives: windowing, overlap-add, and
//! linear-interpolation resampling over fixed-length sample buffers.

/// Multiplies `input` by `window` elementwise into `output`, applying `scale`.
#[inline]
pub fn windowed_product(input: &[f32], window: &[f32], output: &mut [f32], scale: f32) {
    debug_assert_eq!(input.len(), window.len());
    debug_assert_eq!(input.len(), output.len());
    for ((out, &a), &w) in output.iter_mut().zip(input.iter()).zip(window.iter()) {
        *out = a * w * scale;
    }
}

/// Multiplies `buf` by `window` in place, applying `scale`.
#[inline]
pub fn apply_window(buf: &mut [f32], window: &[f32], scale: f32) {
    debug_assert_eq!(buf.len(), window.len());
    for (sample, &w) in buf.iter_mut().zip(window.iter()) {
        *sample *= w * scale;
    }
}

/// Adds `frame` into the front of `accum` sample by sample.
#[inline]
pub fn overlap_add(frame: &[f32], accum: &mut [f32]) {
    debug_assert!(frame.len() <= accum.len());
    for (acc, &s) in accum.iter_mut().zip(frame.iter()) {
        *acc += s;
    }
}

/// Resamples the first `span` samples of `input` into `output` by linear
/// interpolation.
///
/// Reads one guard sample past the span (`input[span]` at most), so `input`
/// must hold at least `span + 1` samples. With `span == output.len()` this is
/// an exact copy.
pub fn interpolate(input: &[f32], output: &mut [f32], span: usize) {
    assert!(span >= 1, "interpolation span must be at least 1");
    assert!(
        span < input.len(),
        "interpolation needs {} input samples plus a guard sample, got {}",
        span,
        input.len()
    );

    let ratio = span as f32 / output.len() as f32;
    for (i, out) in output.iter_mut().enumerate() {
        let frac_index = i as f32 * ratio;
        let prev_index = frac_index as usize;
        let prev = input[prev_index];
        let next = input[prev_index + 1];
        *out = prev + (next - prev) * (frac_index - prev_index as f32);
    }
}
