// Signal module - synthetic EEG waveforms
//
// There is no acquisition hardware. Each capture is stood in for by a
// fixed-length noisy sinusoid, and the sequencer reads it through the
// WaveformSource trait so tests can inject seeded or failing sources.

pub mod waveform;

pub use waveform::{generate_eeg_waveform, SyntheticEegSource, Waveform, WaveformSource};
