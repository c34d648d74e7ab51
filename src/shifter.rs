//! Streaming block processor: owns all per-instance state and drives the
//! window / FFT / vocoder / overlap-add pipeline once per input block.

use log::{debug, trace};

use crate::core::{fft, ops, window};
use crate::error::ShiftError;
use crate::vocoder;
use crate::{BINS, HOP_SIZE, WINDOW_SIZE};

/// Real-time pitch shifter for one audio channel.
///
/// Feed exactly [`HOP_SIZE`] fresh input samples per call and receive exactly
/// [`HOP_SIZE`] output samples, pitched by the per-call factor. Calls on one
/// instance must be strictly sequential and in block order: the vocoder's
/// phase state is history-dependent, and replaying the same input sequence on
/// a fresh instance reproduces the same output. Instances are fully
/// independent; the only shared resource is the read-only Hann table.
///
/// Worst-case work per call is one [`WINDOW_SIZE`]-point FFT pair plus
/// `O(WINDOW_SIZE)` elementwise operations, with no allocation, blocking, or
/// I/O — suitable for an audio render thread.
pub struct PitchShifter {
    /// The most recent `WINDOW_SIZE` input samples, oldest first.
    input_window: Vec<f32>,
    /// Not-yet-emitted synthesized samples, position 0 = next due out.
    overlapped: Vec<f32>,
    /// Last measured phase per bin, for analysis unwrapping.
    last_phase: Vec<f32>,
    /// Running synthesis phase per bin.
    accum_phase: Vec<f32>,
    /// Scratch: windowed frame / packed spectrum.
    frame: Vec<f32>,
    /// Scratch: magnitude/frequency pairs.
    pairs: Vec<f32>,
}

impl PitchShifter {
    /// Creates a pitch shifter with zeroed state.
    ///
    /// The first `WINDOW_SIZE / HOP_SIZE - 1` output blocks are transient
    /// while the analysis window fills.
    pub fn new() -> Self {
        // Populate the shared table outside the real-time path.
        window::hann_window();
        debug!(
            "created pitch shifter: window {} samples, hop {} samples",
            WINDOW_SIZE, HOP_SIZE
        );
        Self {
            input_window: vec![0.0; WINDOW_SIZE],
            overlapped: vec![0.0; WINDOW_SIZE],
            last_phase: vec![0.0; BINS],
            accum_phase: vec![0.0; BINS],
            frame: vec![0.0; WINDOW_SIZE],
            pairs: vec![0.0; WINDOW_SIZE + 2],
        }
    }

    /// Processes one block: consumes `input`, writes `output`, both exactly
    /// [`HOP_SIZE`] samples.
    ///
    /// `factor` is the pitch ratio for this block: 2.0 shifts up one octave,
    /// 0.5 down one octave. It may change freely between calls.
    ///
    /// # Errors
    ///
    /// [`ShiftError::BlockSizeMismatch`] if either buffer is not exactly
    /// [`HOP_SIZE`] samples, [`ShiftError::InvalidFactor`] if `factor` is
    /// non-finite or drives the synthesis hop outside
    /// `[1, WINDOW_SIZE - 1]`. A failed call mutates no state.
    pub fn process_block(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        factor: f32,
    ) -> Result<(), ShiftError> {
        if input.len() != HOP_SIZE {
            return Err(ShiftError::BlockSizeMismatch {
                provided: input.len(),
                expected: HOP_SIZE,
            });
        }
        if output.len() != HOP_SIZE {
            return Err(ShiftError::BlockSizeMismatch {
                provided: output.len(),
                expected: HOP_SIZE,
            });
        }
        let hop_out = synthesis_hop(factor)?;

        // Slide the analysis window forward by one block.
        self.input_window.copy_within(HOP_SIZE.., 0);
        self.input_window[WINDOW_SIZE - HOP_SIZE..].copy_from_slice(input);

        let hann = window::hann_window();
        ops::windowed_product(&self.input_window, hann, &mut self.frame, 1.0);
        fft::real_forward(&mut self.frame);
        vocoder::analyze(&self.frame, &mut self.pairs, HOP_SIZE, &mut self.last_phase);
        vocoder::synthesize(&self.pairs, &mut self.frame, hop_out, &mut self.accum_phase);
        fft::real_inverse(&mut self.frame);

        // Re-window and normalize energy for the current overlap ratio.
        let scale = 1.0 / (WINDOW_SIZE as f32 / hop_out as f32 / 2.0).sqrt();
        ops::apply_window(&mut self.frame, hann, scale);
        ops::overlap_add(&self.frame, &mut self.overlapped);

        // Emit one synthesis hop's worth of accumulated samples, resampled to
        // the fixed block length, then advance the accumulator.
        ops::interpolate(&self.overlapped, output, hop_out);
        self.overlapped.copy_within(hop_out.., 0);
        self.overlapped[WINDOW_SIZE - hop_out..].fill(0.0);

        Ok(())
    }

    /// Clears all state, starting a new stream on the same allocation.
    ///
    /// Never call this mid-stream: the phase state encodes the vocoder's
    /// continuity, and dropping it produces an audible discontinuity.
    pub fn reset(&mut self) {
        trace!("pitch shifter reset");
        self.input_window.fill(0.0);
        self.overlapped.fill(0.0);
        self.last_phase.fill(0.0);
        self.accum_phase.fill(0.0);
    }

    /// Latency between a sample entering and leaving the shifter, in samples.
    pub fn latency_samples(&self) -> usize {
        WINDOW_SIZE - HOP_SIZE
    }
}

impl Default for PitchShifter {
    fn default() -> Self {
        Self::new()
    }
}

/// Derives the synthesis hop from the pitch factor, validating that it stays
/// within the bounds the accumulation and interpolation buffers support.
fn synthesis_hop(factor: f32) -> Result<usize, ShiftError> {
    if !factor.is_finite() {
        return Err(ShiftError::InvalidFactor { factor });
    }
    let hop_out = (factor * HOP_SIZE as f32).round();
    // Interpolation needs a guard sample past the hop, so the hop must stay
    // strictly inside the window.
    if hop_out < 1.0 || hop_out > (WINDOW_SIZE - 1) as f32 {
        return Err(ShiftError::InvalidFactor { factor });
    }
    Ok(hop_out as usize)
}
