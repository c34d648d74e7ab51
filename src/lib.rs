#![forbid(unsafe_code)]
//! Real-time phase-vocoder pitch shifting for fixed-size audio blocks.
//!
//! `repitch` shifts the pitch of an audio stream without changing its
//! duration or block rate. Each call to [`PitchShifter::process_block`]
//! consumes exactly [`HOP_SIZE`] input samples and produces exactly
//! [`HOP_SIZE`] output samples, pitched by a per-call factor — the shape an
//! audio render callback wants. Internally it is a classic phase vocoder:
//! Hann-windowed short-time FFT, per-bin magnitude and unwrapped
//! instantaneous frequency, resynthesis at a factor-dependent hop, and
//! linear resampling back to the fixed block length.
//!
//! # Quick start
//!
//! ```
//! use repitch::{PitchShifter, HOP_SIZE};
//!
//! let mut shifter = PitchShifter::new();
//! let input = [0.0f32; HOP_SIZE]; // one block from the audio callback
//! let mut output = [0.0f32; HOP_SIZE];
//!
//! // Shift up a fifth (factor 1.5); the factor may change every block.
//! shifter.process_block(&input, &mut output, 1.5).unwrap();
//! ```
//!
//! For offline use, [`pitch_shift`] drives a fresh instance over a whole
//! buffer:
//!
//! ```
//! let input: Vec<f32> = (0..44100)
//!     .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 44100.0).sin())
//!     .collect();
//!
//! let output = repitch::pitch_shift(&input, 2.0).unwrap(); // up one octave
//! assert_eq!(output.len(), input.len());
//! ```
//!
//! One channel per instance; for multi-channel audio, run one `PitchShifter`
//! per channel.

pub mod core;
pub mod error;
pub mod shifter;
pub mod vocoder;

pub use error::ShiftError;
pub use shifter::PitchShifter;

/// Analysis window length in samples. Power of two; fixed at compile time.
pub const WINDOW_SIZE: usize = 1024;

/// Input/output block length in samples — the unit in which the host feeds
/// and receives audio. `WINDOW_SIZE / HOP_SIZE` is the overlap factor (8).
pub const HOP_SIZE: usize = 128;

/// Number of frequency bins in the half spectrum, `WINDOW_SIZE / 2 + 1`.
pub const BINS: usize = WINDOW_SIZE / 2 + 1;

/// Smallest accepted pitch factor (synthesis hop of one sample).
pub const FACTOR_MIN: f32 = 1.0 / HOP_SIZE as f32;

/// Largest accepted pitch factor (synthesis hop of `WINDOW_SIZE - 1`).
pub const FACTOR_MAX: f32 = (WINDOW_SIZE - 1) as f32 / HOP_SIZE as f32;

/// Populates the shared Hann window table ahead of the first audio block.
///
/// Optional and idempotent: the table is also computed on first use. Calling
/// this during setup keeps the one-time cost off the render thread.
pub fn init() {
    core::window::hann_window();
}

/// Converts a shift in semitones to a pitch factor (`2^(semitones / 12)`).
///
/// # Example
///
/// ```
/// assert!((repitch::semitones_to_factor(12.0) - 2.0).abs() < 1e-6);
/// assert!((repitch::semitones_to_factor(0.0) - 1.0).abs() < 1e-6);
/// ```
#[inline]
pub fn semitones_to_factor(semitones: f32) -> f32 {
    (semitones / 12.0).exp2()
}

/// Pitch-shifts a whole mono buffer by `factor`, preserving its length.
///
/// Drives a fresh [`PitchShifter`] block by block; a final partial block is
/// zero-padded. The output is delayed by `WINDOW_SIZE - HOP_SIZE` samples of
/// pipeline latency, like any streaming use of the shifter.
///
/// # Errors
///
/// Returns [`ShiftError::InvalidFactor`] if `factor` is out of range.
pub fn pitch_shift(input: &[f32], factor: f32) -> Result<Vec<f32>, ShiftError> {
    let mut shifter = PitchShifter::new();
    let mut output = vec![0.0f32; input.len()];
    let mut block_in = [0.0f32; HOP_SIZE];
    let mut block_out = [0.0f32; HOP_SIZE];

    for (chunk_in, chunk_out) in input.chunks(HOP_SIZE).zip(output.chunks_mut(HOP_SIZE)) {
        block_in[..chunk_in.len()].copy_from_slice(chunk_in);
        block_in[chunk_in.len()..].fill(0.0);
        shifter.process_block(&block_in, &mut block_out, factor)?;
        chunk_out.copy_from_slice(&block_out[..chunk_out.len()]);
    }

    Ok(output)
}

/// Pitch-shifts a whole mono buffer by a number of semitones.
///
/// Convenience wrapper around [`pitch_shift`] using
/// [`semitones_to_factor`].
pub fn pitch_shift_semitones(input: &[f32], semitones: f32) -> Result<Vec<f32>, ShiftError> {
    pitch_shift(input, semitones_to_factor(semitones))
}
