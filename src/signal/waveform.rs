//! Synthetic EEG waveform generation
//!
//! A waveform is `sin(2π·f·t) + N(0, σ²)` sampled on a normalized time axis
//! `t ∈ [0, 1]` (both endpoints included): 100 samples of a 10-cycle sine
//! with σ = 0.1 noise. The length is part of the export format, so the
//! parameters are constants rather than configuration.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

use crate::error::CalibrationError;

/// Samples per waveform
pub const WAVEFORM_LEN: usize = 100;

/// Sine cycles over the normalized time axis
pub const EEG_FREQUENCY_HZ: f64 = 10.0;

/// Standard deviation of the additive noise
pub const NOISE_STD: f64 = 0.1;

/// Immutable fixed-length sample sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f64>,
}

impl Waveform {
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// True when no sample is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.samples.iter().all(|s| s.is_finite())
    }

    /// Peak absolute amplitude (0.0 for an empty waveform)
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()))
    }
}

/// Produces one waveform per capture
///
/// Implementations stand in for a sensor read. A failure is reported by the
/// sequencer and the run continues without a sample for that action.
pub trait WaveformSource {
    fn generate(&mut self) -> Result<Waveform, CalibrationError>;
}

/// Generate one synthetic EEG waveform
///
/// # Arguments
/// * `rng` - Noise source; each call draws fresh noise
///
/// # Returns
/// A waveform of exactly [`WAVEFORM_LEN`] finite samples
pub fn generate_eeg_waveform<R: Rng + ?Sized>(rng: &mut R) -> Waveform {
    synthesize(rng, WAVEFORM_LEN, EEG_FREQUENCY_HZ, NOISE_STD)
}

fn synthesize<R: Rng + ?Sized>(
    rng: &mut R,
    sample_count: usize,
    frequency_hz: f64,
    noise_std: f64,
) -> Waveform {
    let denom = sample_count.saturating_sub(1).max(1) as f64;
    let samples = (0..sample_count)
        .map(|i| {
            let t = i as f64 / denom;
            (2.0 * PI * frequency_hz * t).sin() + standard_normal(rng) * noise_std
        })
        .collect();
    Waveform::new(samples)
}

/// Box-Muller transform over the uniform source
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // u1 in (0, 1] keeps ln() finite
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Default waveform source backed by a pseudo-random generator
pub struct SyntheticEegSource {
    rng: StdRng,
}

impl SyntheticEegSource {
    /// Create a source seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a reproducible source
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SyntheticEegSource {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveformSource for SyntheticEegSource {
    fn generate(&mut self) -> Result<Waveform, CalibrationError> {
        Ok(generate_eeg_waveform(&mut self.rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waveform_length_and_finite() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let wave = generate_eeg_waveform(&mut rng);
            assert_eq!(wave.len(), WAVEFORM_LEN);
            assert!(wave.is_finite());
        }
    }

    #[test]
    fn test_noise_free_waveform_is_pure_sine() {
        let mut rng = StdRng::seed_from_u64(1);
        let wave = synthesize(&mut rng, 100, 10.0, 0.0);

        // Endpoints of linspace(0, 1): sin(0) and sin(20π) are both ~0
        assert!(wave.samples()[0].abs() < 1e-12);
        assert!(wave.samples()[99].abs() < 1e-9);
        assert!(wave.peak() <= 1.0 + 1e-12);
    }

    #[test]
    fn test_noise_is_small() {
        let mut rng = StdRng::seed_from_u64(99);
        let wave = generate_eeg_waveform(&mut rng);
        let clean = synthesize(&mut rng, 100, 10.0, 0.0);

        let residual: Vec<f64> = wave
            .samples()
            .iter()
            .zip(clean.samples())
            .map(|(a, b)| a - b)
            .collect();
        let mean = residual.iter().sum::<f64>() / residual.len() as f64;
        let var = residual.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / residual.len() as f64;

        // σ = 0.1, generous bounds for 100 draws
        assert!(mean.abs() < 0.05, "noise mean {}", mean);
        assert!(var.sqrt() > 0.05 && var.sqrt() < 0.2, "noise std {}", var.sqrt());
    }

    #[test]
    fn test_calls_are_independent() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = generate_eeg_waveform(&mut rng);
        let b = generate_eeg_waveform(&mut rng);
        assert_ne!(a, b);
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let mut first = SyntheticEegSource::with_seed(42);
        let mut second = SyntheticEegSource::with_seed(42);
        assert_eq!(first.generate().unwrap(), second.generate().unwrap());
    }

    #[test]
    fn test_source_always_yields_fixed_length() {
        let mut source = SyntheticEegSource::new();
        for _ in 0..20 {
            let wave = source.generate().unwrap();
            assert_eq!(wave.len(), WAVEFORM_LEN);
            assert!(wave.is_finite());
        }
    }

    #[test]
    fn test_single_sample_waveform() {
        let mut rng = StdRng::seed_from_u64(5);
        let wave = synthesize(&mut rng, 1, 10.0, 0.0);
        assert_eq!(wave.len(), 1);
        assert!(wave.samples()[0].abs() < 1e-12);
    }
}
