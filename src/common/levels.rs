//! `[f32]` level measurements.

/// `[f32]` level measurement extensions. Sums are accumulated in `f64`
/// so that long windows don't lose precision.
pub trait SampleLevelExt {
    /// Returns the maximum absolute value.
    fn peak_level(&self) -> f64;
    /// Returns the mean squared value, i.e the signal energy per sample.
    fn mean_square(&self) -> f64;
    /// Returns the [root mean square](https://en.wikipedia.org/wiki/Root_mean_square)
    /// level.
    fn rms_level(&self) -> f64;
    /// Returns the [root mean square](https://en.wikipedia.org/wiki/Root_mean_square)
    /// level in dB relative to 1, i.e 0 dB corresponds to a level of 1.
    fn rms_level_db(&self) -> f64;
}

impl SampleLevelExt for [f32] {
    fn peak_level(&self) -> f64 {
        let mut max: f64 = 0.0;
        for sample in self.iter() {
            let value = (*sample as f64).abs();
            if value > max {
                max = value
            }
        }
        max
    }

    fn mean_square(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let mut sum: f64 = 0.0;
        for sample in self.iter() {
            let value = *sample as f64;
            sum += value * value
        }
        sum / (self.len() as f64)
    }

    fn rms_level(&self) -> f64 {
        self.mean_square().sqrt()
    }

    fn rms_level_db(&self) -> f64 {
        20. * self.rms_level().log10()
    }
}

#[cfg(test)]
mod tests {
    use super::SampleLevelExt;

    #[test]
    fn test_empty_window() {
        let window: [f32; 0] = [];
        assert!(window.rms_level() == 0.0);
        assert!(window.peak_level() == 0.0);
    }

    #[test]
    fn test_full_scale_square() {
        let window: [f32; 8] = [1., -1., 1., -1., 1., -1., 1., -1.];
        assert!((window.rms_level() - 1.0).abs() <= f64::EPSILON);
        assert!((window.rms_level_db() - 0.0).abs() <= 1e-12);
        assert!((window.peak_level() - 1.0).abs() <= f64::EPSILON);
    }

    #[test]
    fn test_sine_rms() {
        let sample_count = 44100;
        let mut window: Vec<f32> = vec![0.0; sample_count];
        for (i, sample) in window.iter_mut().enumerate() {
            *sample = (2.0 * std::f32::consts::PI * 100.0 * (i as f32) / 44100.0).sin();
        }
        // A full-scale sine has an RMS level of 1/sqrt(2).
        assert!((window.rms_level() - std::f64::consts::FRAC_1_SQRT_2).abs() <= 1e-4);
    }
}
