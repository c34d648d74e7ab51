//! In-place radix-2 FFT over interleaved real/imaginary `f32` buffers.
//!
//! The complex transform is classic decimation-in-time: bit-reversal
//! permutation followed by `log2(n)` butterfly stages, with twiddle factors
//! advanced incrementally (Chebyshev recurrence) instead of calling
//! sin/cos per butterfly. The forward transform scales by `1/n`, the inverse
//! by `2`, so a forward/inverse round trip is the identity.
//!
//! The real transform packs `n` real samples into `n/2` complex slots, runs
//! the half-size complex FFT, and applies the standard Hermitian fold: the
//! packed spectrum stores bins `0..=n/2`, with bin 0's and the Nyquist bin's
//! real parts sharing the first complex slot (neither has an imaginary
//! component).
//!
//! Sizes must be powers of two; this is asserted rather than silently
//! producing garbage indexing.

use std::f32::consts::PI;

/// Forward complex FFT of `buf.len() / 2` interleaved complex samples.
pub fn complex_forward(buf: &mut [f32]) {
    complex_fft(buf, true);
}

/// Inverse complex FFT of `buf.len() / 2` interleaved complex samples.
pub fn complex_inverse(buf: &mut [f32]) {
    complex_fft(buf, false);
}

/// Forward FFT of `buf.len()` real samples, leaving the Hermitian-packed
/// spectrum in the same storage.
pub fn real_forward(buf: &mut [f32]) {
    real_fft(buf, true);
}

/// Inverse of [`real_forward`]: consumes a Hermitian-packed spectrum and
/// leaves `buf.len()` real samples.
pub fn real_inverse(buf: &mut [f32]) {
    real_fft(buf, false);
}

/// Permutes complex sample pairs into bit-reversed order.
fn bit_reverse(x: &mut [f32]) {
    let n = x.len();
    let mut j = 0;
    let mut i = 0;
    while i < n {
        if j > i {
            x.swap(j, i);
            x.swap(j + 1, i + 1);
        }
        let mut m = n >> 1;
        while m >= 2 && j >= m {
            j -= m;
            m >>= 1;
        }
        j += m;
        i += 2;
    }
}

fn complex_fft(x: &mut [f32], forward: bool) {
    let nd = x.len();
    let pairs = nd / 2;
    assert!(
        pairs.is_power_of_two() && nd % 2 == 0,
        "complex FFT size must be a power of two, got {} pairs",
        pairs
    );

    bit_reverse(x);

    let mut mmax = 2;
    while mmax < nd {
        let delta = mmax << 1;
        let theta = 2.0 * PI / if forward { mmax as f32 } else { -(mmax as f32) };
        let wpr = -2.0 * (0.5 * theta).sin().powi(2);
        let wpi = theta.sin();
        let mut wr = 1.0f32;
        let mut wi = 0.0f32;
        for m in (0..mmax).step_by(2) {
            let mut i = m;
            while i < nd {
                let j = i + mmax;
                let rtemp = wr * x[j] - wi * x[j + 1];
                let itemp = wr * x[j + 1] + wi * x[j];
                x[j] = x[i] - rtemp;
                x[j + 1] = x[i + 1] - itemp;
                x[i] += rtemp;
                x[i + 1] += itemp;
                i += delta;
            }
            let temp = wr;
            wr = temp * wpr - wi * wpi + wr;
            wi = wi * wpr + temp * wpi + wi;
        }
        mmax = delta;
    }

    let scale = if forward { 1.0 / nd as f32 } else { 2.0 };
    for v in x.iter_mut() {
        *v *= scale;
    }
}

fn real_fft(x: &mut [f32], forward: bool) {
    let half = x.len() / 2;
    assert!(
        half.is_power_of_two() && x.len() % 2 == 0,
        "real FFT size must be a power of two, got {} samples",
        x.len()
    );

    let mut theta = PI / half as f32;
    let c1 = 0.5f32;
    let c2;
    let mut xr;
    let mut xi;

    if forward {
        c2 = -0.5;
        complex_fft(x, true);
        xr = x[0];
        xi = x[1];
    } else {
        c2 = 0.5;
        theta = -theta;
        xr = x[1];
        xi = 0.0;
        x[1] = 0.0;
    }

    let wpr = -2.0 * (0.5 * theta).sin().powi(2);
    let wpi = theta.sin();
    let mut wr = 1.0f32;
    let mut wi = 0.0f32;
    let n2p1 = (half << 1) + 1;

    for i in 0..=(half >> 1) {
        let i1 = i << 1;
        let i2 = i1 + 1;
        let i3 = n2p1 - i2;
        let i4 = i3 + 1;
        if i == 0 {
            let h1r = c1 * (x[i1] + xr);
            let h1i = c1 * (x[i2] - xi);
            let h2r = -c2 * (x[i2] + xi);
            let h2i = c2 * (x[i1] - xr);
            x[i1] = h1r + wr * h2r - wi * h2i;
            x[i2] = h1i + wr * h2i + wi * h2r;
            xr = h1r - wr * h2r + wi * h2i;
            xi = -h1i + wr * h2i + wi * h2r;
        } else {
            let h1r = c1 * (x[i1] + x[i3]);
            let h1i = c1 * (x[i2] - x[i4]);
            let h2r = -c2 * (x[i2] + x[i4]);
            let h2i = c2 * (x[i1] - x[i3]);
            x[i1] = h1r + wr * h2r - wi * h2i;
            x[i2] = h1i + wr * h2i + wi * h2r;
            x[i3] = h1r - wr * h2r + wi * h2i;
            x[i4] = -h1i + wr * h2i + wi * h2r;
        }
        let temp = wr;
        wr = temp * wpr - wi * wpi + wr;
        wi = wi * wpr + temp * wpi + wi;
    }

    if forward {
        x[1] = xr;
    } else {
        complex_fft(x, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_signal(n: usize) -> Vec<f32> {
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                (2.0 * PI * 3.0 * t).sin() + 0.5 * (2.0 * PI * 17.0 * t).cos() + 0.1
            })
            .collect()
    }

    #[test]
    fn test_complex_round_trip() {
        let mut buf = test_signal(512); // 256 complex pairs
        let original = buf.clone();
        complex_forward(&mut buf);
        complex_inverse(&mut buf);
        for (a, b) in buf.iter().zip(original.iter()) {
            assert!((a - b).abs() < 1e-4, "round trip mismatch: {} vs {}", a, b);
        }
    }

    #[test]
    fn test_real_round_trip() {
        let mut buf = test_signal(1024);
        let original = buf.clone();
        real_forward(&mut buf);
        real_inverse(&mut buf);
        for (a, b) in buf.iter().zip(original.iter()) {
            assert!((a - b).abs() < 1e-4, "round trip mismatch: {} vs {}", a, b);
        }
    }

    #[test]
    fn test_real_forward_impulse_is_flat() {
        // The spectrum of an impulse has the same magnitude in every bin.
        let n = 256;
        let mut buf = vec![0.0f32; n];
        buf[0] = 1.0;
        real_forward(&mut buf);

        let reference = buf[0].abs();
        assert!(reference > 0.0);
        // Bin 0 and Nyquist real parts share the first complex slot.
        assert!((buf[1].abs() - reference).abs() < 1e-5);
        for bin in 1..n / 2 {
            let mag = (buf[2 * bin].powi(2) + buf[2 * bin + 1].powi(2)).sqrt();
            assert!(
                (mag - reference).abs() < 1e-5,
                "bin {} magnitude {} differs from {}",
                bin,
                mag,
                reference
            );
        }
    }

    #[test]
    fn test_real_forward_dc_concentrates_in_bin_zero() {
        let n = 512;
        let mut buf = vec![0.25f32; n];
        real_forward(&mut buf);
        assert!(buf[0].abs() > 1e-3);
        assert!(buf[1].abs() < 1e-5); // no energy at Nyquist
        for bin in 1..n / 2 {
            let mag = (buf[2 * bin].powi(2) + buf[2 * bin + 1].powi(2)).sqrt();
            assert!(mag < 1e-5, "bin {} leaked {}", bin, mag);
        }
    }

    #[test]
    fn test_real_forward_sine_peaks_at_its_bin() {
        let n = 1024;
        let cycles = 40;
        let mut buf: Vec<f32> = (0..n)
            .map(|i| (2.0 * PI * cycles as f32 * i as f32 / n as f32).sin())
            .collect();
        real_forward(&mut buf);

        let mut peak_bin = 0;
        let mut peak_mag = 0.0f32;
        for bin in 1..n / 2 {
            let mag = (buf[2 * bin].powi(2) + buf[2 * bin + 1].powi(2)).sqrt();
            if mag > peak_mag {
                peak_mag = mag;
                peak_bin = bin;
            }
        }
        assert_eq!(peak_bin, cycles);
    }

    #[test]
    #[should_panic(expected = "power of two")]
    fn test_rejects_non_power_of_two() {
        let mut buf = vec![0.0f32; 300];
        real_forward(&mut buf);
    }
}
