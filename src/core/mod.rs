//! FFT engine, window table, and elementwise DSP primitives.

pub mod fft;
pub mod ops;
pub mod window;
