use crate::mpm::{DetectionResult, PitchDetector};

/// One latency / frequency-floor trade-off in the tiered cascade: a
/// detector configured for a fixed window size, the hop that schedules it
/// and a dedicated scratch buffer for linearizing its window out of the
/// accumulation ring.
pub struct DetectionTier {
    detector: PitchDetector,
    hop_size: usize,
    scratch: Box<[f32]>,
}

impl DetectionTier {
    pub(crate) fn new(
        sample_rate: f64,
        buffer_size: usize,
        hop_size: usize,
        min_frequency: f64,
    ) -> Self {
        if hop_size == 0 || hop_size > buffer_size {
            panic!("Hop size must be > 0 and <= the tier buffer size")
        }
        let mut detector = PitchDetector::new(sample_rate, buffer_size);
        detector.set_min_frequency(min_frequency);
        DetectionTier {
            detector,
            hop_size,
            scratch: vec![0.0; buffer_size].into_boxed_slice(),
        }
    }

    /// Returns the number of samples in this tier's analysis window.
    pub fn buffer_size(&self) -> usize {
        self.scratch.len()
    }

    /// Returns the number of samples between this tier's scheduled
    /// detections.
    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Returns the lowest frequency this tier can resolve.
    pub fn min_frequency(&self) -> f64 {
        self.detector.min_frequency()
    }

    /// True when a reading sits at the very bottom of this tier's lag
    /// range. A tone below the range surfaces there as a boundary artifact
    /// (the NSDF rises into the cut-off peak), so a tier with a deeper
    /// neighbor shouldn't publish such a reading.
    pub(crate) fn is_floor_reading(&self, frequency: f64) -> bool {
        let boundary_lag = (self.detector.max_lag() - 1).max(1);
        frequency < self.detector.sample_rate() / (boundary_lag as f64)
    }

    /// Copies the newest `buffer_size()` samples out of the ring into this
    /// tier's scratch, oldest first, and analyzes them. `write_index` is
    /// the ring position the next sample would be written to.
    pub(crate) fn detect_latest(&mut self, ring: &[f32], write_index: usize) -> DetectionResult {
        self.linearize(ring, write_index);
        self.detector.detect(&self.scratch)
    }

    fn linearize(&mut self, ring: &[f32], write_index: usize) {
        let ring_size = ring.len();
        let window_size = self.scratch.len();
        let start = (write_index + ring_size - window_size) % ring_size;
        for (offset, sample) in self.scratch.iter_mut().enumerate() {
            *sample = ring[(start + offset) % ring_size];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linearization_order() {
        // Ring filled with a ramp 0..16 written twice around; the write
        // index sits mid-buffer.
        let ring_size = 16;
        let mut ring = vec![0.0_f32; ring_size];
        let mut write_index = 0;
        for value in 0..24 {
            ring[write_index] = value as f32;
            write_index = (write_index + 1) % ring_size;
        }

        let mut tier = DetectionTier::new(44100.0, 8, 4, 86.0);
        tier.linearize(&ring, write_index);
        // The newest 8 samples in source order are 16..24.
        for (offset, sample) in tier.scratch.iter().enumerate() {
            assert_eq!(*sample, (16 + offset) as f32);
        }
    }

    #[test]
    fn test_linearization_wraps_around_ring_end() {
        let ring: Vec<f32> = (0..8).map(|v| v as f32).collect();
        let mut tier = DetectionTier::new(44100.0, 4, 4, 86.0);
        // Next write at index 2, so the newest four samples are 6, 7, 0, 1.
        tier.linearize(&ring, 2);
        assert_eq!(&tier.scratch[..], &[6.0, 7.0, 0.0, 1.0]);
    }

    #[test]
    #[should_panic]
    fn test_zero_hop() {
        DetectionTier::new(44100.0, 512, 0, 86.0);
    }

    #[test]
    #[should_panic]
    fn test_hop_exceeding_window() {
        DetectionTier::new(44100.0, 512, 513, 86.0);
    }
}
