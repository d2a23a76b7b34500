//! Reference tone synthesis.

use std::f64::consts::TAU;

/// A phase-accumulating sine synthesizer, used to sound the reference
/// pitch. Frequency and amplitude can change between calls without phase
/// discontinuities. Allocation-free.
pub struct ToneGenerator {
    frequency: f64,
    amplitude: f64,
    phase: f64,
}

impl ToneGenerator {
    pub fn new(frequency: f64) -> Self {
        ToneGenerator {
            frequency,
            amplitude: 1.0,
            phase: 0.0,
        }
    }

    /// Sets the output frequency in Hz, effective from the next generated
    /// sample.
    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
    }

    /// Returns the output frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Sets the output amplitude, clamped to `[0, 1]`.
    pub fn set_amplitude(&mut self, amplitude: f64) {
        self.amplitude = amplitude.clamp(0.0, 1.0);
    }

    /// Returns the output amplitude.
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Rewinds the phase accumulator to zero.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Fills `buffer` with sine samples at the given sample rate,
    /// continuing from the phase where the previous call left off.
    pub fn generate(&mut self, buffer: &mut [f32], sample_rate: f64) {
        let phase_increment = TAU * self.frequency / sample_rate;
        for sample in buffer.iter_mut() {
            self.phase = (self.phase + phase_increment) % TAU;
            *sample = (self.amplitude * self.phase.sin()) as f32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mpm::PitchDetector;

    #[test]
    fn test_generated_tone_frequency() {
        let sample_rate = 44100.0;
        let mut generator = ToneGenerator::new(440.0);
        let mut buffer = vec![0.0_f32; 4096];
        generator.generate(&mut buffer, sample_rate);

        let mut detector = PitchDetector::new(sample_rate, buffer.len());
        let result = detector.detect(&buffer);
        assert!(result.valid);
        assert!((result.frequency - 440.0).abs() <= 0.1);
    }

    #[test]
    fn test_phase_continuity_across_calls() {
        let sample_rate = 48000.0;

        let mut reference = ToneGenerator::new(261.63);
        let mut whole = vec![0.0_f32; 512];
        reference.generate(&mut whole, sample_rate);

        let mut split = ToneGenerator::new(261.63);
        let mut first = vec![0.0_f32; 200];
        let mut second = vec![0.0_f32; 312];
        split.generate(&mut first, sample_rate);
        split.generate(&mut second, sample_rate);

        for (i, sample) in first.iter().chain(second.iter()).enumerate() {
            assert!((sample - whole[i]).abs() <= 1e-6);
        }
    }

    #[test]
    fn test_amplitude_clamp() {
        let mut generator = ToneGenerator::new(440.0);
        generator.set_amplitude(1.5);
        assert_eq!(generator.amplitude(), 1.0);
        generator.set_amplitude(-0.1);
        assert_eq!(generator.amplitude(), 0.0);

        let mut buffer = vec![0.0_f32; 64];
        generator.generate(&mut buffer, 44100.0);
        assert!(buffer.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_reset() {
        let sample_rate = 44100.0;
        let mut generator = ToneGenerator::new(440.0);
        let mut first = vec![0.0_f32; 128];
        let mut second = vec![0.0_f32; 128];
        generator.generate(&mut first, sample_rate);
        generator.reset();
        generator.generate(&mut second, sample_rate);
        assert_eq!(first, second);
    }
}
