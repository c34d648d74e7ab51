#![allow(dead_code)]

use std::f32::consts::PI;

/// Generates a mono sine wave.
pub fn sine_wave(freq: f32, sample_rate: u32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| (2.0 * PI * freq * i as f32 / sample_rate as f32).sin())
        .collect()
}

/// Computes the RMS of a signal.
pub fn rms(signal: &[f32]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }
    (signal.iter().map(|x| x * x).sum::<f32>() / signal.len() as f32).sqrt()
}

/// Computes spectral energy at a target frequency using a single DFT bin.
pub fn spectral_energy_at_freq(signal: &[f32], sample_rate: u32, target_freq: f32) -> f32 {
    let n = signal.len();
    if n == 0 {
        return 0.0;
    }
    let two_pi = 2.0 * PI;
    let mut real = 0.0f64;
    let mut imag = 0.0f64;
    for (i, &s) in signal.iter().enumerate() {
        let angle = two_pi * target_freq * i as f32 / sample_rate as f32;
        real += s as f64 * angle.cos() as f64;
        imag += s as f64 * angle.sin() as f64;
    }
    ((real * real + imag * imag) / n as f64).sqrt() as f32
}

/// Scans a frequency range and returns the frequency with the most energy.
pub fn dominant_frequency(signal: &[f32], sample_rate: u32, lo: f32, hi: f32, step: f32) -> f32 {
    let mut best_freq = lo;
    let mut best_energy = 0.0f32;
    let mut f = lo;
    while f <= hi {
        let e = spectral_energy_at_freq(signal, sample_rate, f);
        if e > best_energy {
            best_energy = e;
            best_freq = f;
        }
        f += step;
    }
    best_freq
}

/// Normalized cross-correlation between two equal-length slices.
pub fn normalized_correlation(a: &[f32], b: &[f32]) -> f32 {
    let len = a.len().min(b.len());
    if len == 0 {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut na = 0.0f64;
    let mut nb = 0.0f64;
    for i in 0..len {
        dot += a[i] as f64 * b[i] as f64;
        na += a[i] as f64 * a[i] as f64;
        nb += b[i] as f64 * b[i] as f64;
    }
    if na < 1e-20 || nb < 1e-20 {
        return 0.0;
    }
    (dot / (na.sqrt() * nb.sqrt())) as f32
}
