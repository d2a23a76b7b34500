//! Note onset detection based on short-term energy jumps.

use crate::common::SampleLevelExt;

const DEFAULT_ENERGY_RATIO: f64 = 3.0;

/// Flags the start of a note as a jump in block energy: an incoming block
/// whose mean squared level exceeds the previous block's by more than a
/// fixed ratio counts as an onset. Crude next to spectral novelty methods,
/// but allocation-free and cheap enough to run on every block of the audio
/// callback.
pub struct OnsetDetector {
    energy_ratio: f64,
    previous_energy: Option<f64>,
}

impl OnsetDetector {
    pub fn new() -> Self {
        OnsetDetector::from_options(DEFAULT_ENERGY_RATIO)
    }

    /// Creates a detector firing when block energy grows by more than
    /// `energy_ratio` between consecutive blocks.
    pub fn from_options(energy_ratio: f64) -> Self {
        if energy_ratio <= 1.0 {
            panic!("Energy ratio must be greater than 1")
        }
        OnsetDetector {
            energy_ratio,
            previous_energy: None,
        }
    }

    /// Processes one block of samples and returns true if it starts an
    /// onset. The first block never does; there is nothing to compare it to.
    pub fn process(&mut self, block: &[f32]) -> bool {
        if block.is_empty() {
            return false;
        }
        let energy = block.mean_square();
        let onset = match self.previous_energy {
            Some(previous) => energy > self.energy_ratio * previous,
            None => false,
        };
        self.previous_energy = Some(energy);
        onset
    }

    pub fn reset(&mut self) {
        self.previous_energy = None;
    }
}

impl Default for OnsetDetector {
    fn default() -> Self {
        OnsetDetector::new()
    }
}
