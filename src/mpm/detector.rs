use crate::common::{fill_window, SampleLevelExt, WindowFunction};
use crate::mpm::result::DetectionResult;

const DEFAULT_THRESHOLD_DB: f64 = -40.0;
const DEFAULT_MIN_FREQUENCY: f64 = 32.7; // C1
const DEFAULT_MAX_FREQUENCY: f64 = 4186.0; // C8
const DEFAULT_BASE_CLARITY: f64 = 0.01;
/// Numerical stability floor for NSDF denominators and parabola curvatures.
const EPSILON: f64 = 1e-10;

/// Detects the fundamental frequency of a single window of samples using
/// the MPM algorithm. All scratch buffers are allocated on construction;
/// [detect](PitchDetector::detect) itself does not allocate, lock or log
/// and is safe to call from a real-time audio thread.
pub struct PitchDetector {
    sample_rate: f64,
    buffer_size: usize,
    threshold_db: f64,
    min_frequency: f64,
    max_frequency: f64,
    base_clarity: f64,
    window_function: WindowFunction,
    /// Smallest lag to search, `max(floor(sample_rate / max_frequency), 1)`.
    min_lag: usize,
    /// Largest lag to search, `min(floor(sample_rate / min_frequency), buffer_size - 1)`.
    max_lag: usize,
    nsdf: Box<[f64]>,
    autocorr: Box<[f64]>,
    square_sum: Box<[f64]>,
    window: Box<[f64]>,
    working: Box<[f64]>,
}

impl PitchDetector {
    /// Creates a detector for windows of up to `buffer_size` samples at the
    /// given sample rate.
    pub fn new(sample_rate: f64, buffer_size: usize) -> Self {
        if buffer_size == 0 {
            panic!("Buffer size must be greater than 0")
        }
        if sample_rate <= 0.0 {
            panic!("Sample rate must be greater than 0")
        }

        let mut detector = PitchDetector {
            sample_rate,
            buffer_size,
            threshold_db: DEFAULT_THRESHOLD_DB,
            min_frequency: DEFAULT_MIN_FREQUENCY,
            max_frequency: DEFAULT_MAX_FREQUENCY,
            base_clarity: DEFAULT_BASE_CLARITY,
            window_function: WindowFunction::Rectangular,
            min_lag: 1,
            max_lag: buffer_size - 1,
            // The lag range moves when the frequency limits change, so the
            // lag indexed scratch covers every lag the buffer can express.
            nsdf: vec![0.0; buffer_size].into_boxed_slice(),
            autocorr: vec![0.0; buffer_size].into_boxed_slice(),
            square_sum: vec![0.0; buffer_size].into_boxed_slice(),
            window: vec![0.0; buffer_size].into_boxed_slice(),
            working: vec![0.0; buffer_size].into_boxed_slice(),
        };
        detector.update_lag_range();
        fill_window(detector.window_function, &mut detector.window);
        detector
    }

    /// Analyzes one window of samples. Returns an invalid result if the
    /// window is empty, the signal is below the level threshold or no NSDF
    /// peak clears the clarity floor. At most `buffer_size` samples are
    /// used; any excess is ignored.
    pub fn detect(&mut self, samples: &[f32]) -> DetectionResult {
        if samples.is_empty() {
            return DetectionResult::invalid();
        }
        if samples.rms_level() < Self::db_to_linear(self.threshold_db) {
            return DetectionResult::invalid();
        }

        let used = self.preprocess(samples);
        let max_lag = self.compute_nsdf(used);

        let peak_index = match self.pick_peak(max_lag) {
            Some(index) => index,
            None => return DetectionResult::invalid(),
        };

        let refined_lag = self.interpolate_peak(peak_index, max_lag);
        let frequency = self.sample_rate / refined_lag;
        // Confidence is the raw NSDF peak value; interpolation only refines
        // the lag.
        let confidence = self.nsdf[peak_index].clamp(0.0, 1.0);

        DetectionResult::detected(frequency, confidence)
    }

    /// Simple variant of [detect](PitchDetector::detect) returning just the
    /// frequency, or 0.0 when no pitch was detected.
    pub fn detect_frequency(&mut self, samples: &[f32]) -> f64 {
        self.detect(samples).frequency
    }

    /// Sets the signal level gate in dB relative to full scale.
    pub fn set_threshold_db(&mut self, threshold_db: f64) {
        self.threshold_db = threshold_db;
    }

    /// Sets the lowest detectable frequency in Hz and recomputes the lag
    /// search range.
    pub fn set_min_frequency(&mut self, min_frequency: f64) {
        self.min_frequency = min_frequency;
        self.update_lag_range();
    }

    /// Sets the highest detectable frequency in Hz and recomputes the lag
    /// search range.
    pub fn set_max_frequency(&mut self, max_frequency: f64) {
        self.max_frequency = max_frequency;
        self.update_lag_range();
    }

    /// Selects the analysis window function and recomputes the window table.
    pub fn set_window_function(&mut self, window_function: WindowFunction) {
        if self.window_function != window_function {
            self.window_function = window_function;
            fill_window(self.window_function, &mut self.window);
        }
    }

    /// Sets the base clarity used to derive the frequency dependent NSDF
    /// peak floor.
    pub fn set_base_clarity(&mut self, base_clarity: f64) {
        self.base_clarity = base_clarity;
    }

    /// Returns the lowest detectable frequency in Hz.
    pub fn min_frequency(&self) -> f64 {
        self.min_frequency
    }

    /// Returns the highest detectable frequency in Hz.
    pub fn max_frequency(&self) -> f64 {
        self.max_frequency
    }

    /// Returns the sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Returns the fixed number of samples in a full analysis window.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Returns the largest lag searched for a full window.
    pub(crate) fn max_lag(&self) -> usize {
        self.max_lag
    }

    fn db_to_linear(db: f64) -> f64 {
        10.0_f64.powf(db / 20.0)
    }

    fn update_lag_range(&mut self) {
        let max_lag = (self.sample_rate / self.min_frequency) as usize;
        let min_lag = (self.sample_rate / self.max_frequency) as usize;
        self.max_lag = max_lag.min(self.buffer_size - 1);
        self.min_lag = min_lag.max(1);
    }

    /// Copies up to `buffer_size` samples into the working buffer, removes
    /// the DC offset and applies the window table. Returns the number of
    /// samples used.
    fn preprocess(&mut self, samples: &[f32]) -> usize {
        let used = samples.len().min(self.buffer_size);

        let mut mean = 0.0;
        for (dst, src) in self.working[..used].iter_mut().zip(samples) {
            *dst = *src as f64;
            mean += *dst;
        }
        mean /= used as f64;

        for (value, coefficient) in self.working[..used].iter_mut().zip(self.window.iter()) {
            *value = (*value - mean) * coefficient;
        }

        used
    }

    /// Computes the NSDF over lags `0..=max_lag` from the working buffer,
    /// where `max_lag` is additionally limited by the window length.
    /// Returns the largest computed lag.
    fn compute_nsdf(&mut self, num_samples: usize) -> usize {
        let max_lag = self.max_lag.min(num_samples - 1);
        let x = &self.working[..num_samples];

        for lag in 0..=max_lag {
            let mut r = 0.0;
            let mut m = 0.0;
            for i in 0..(num_samples - lag) {
                let x_i = x[i];
                let x_i_lag = x[i + lag];
                r += x_i * x_i_lag;
                m += x_i * x_i + x_i_lag * x_i_lag;
            }
            self.autocorr[lag] = r;
            self.square_sum[lag] = m;
        }

        for lag in 0..=max_lag {
            self.nsdf[lag] = if self.square_sum[lag] > EPSILON {
                2.0 * self.autocorr[lag] / self.square_sum[lag]
            } else {
                0.0
            };
        }

        max_lag
    }

    /// The NSDF peak floor at a given lag. Low frequencies complete fewer
    /// cycles per window and peak lower, so the floor relaxes with the
    /// frequency the lag corresponds to.
    fn clarity_floor(&self, lag: usize) -> f64 {
        self.base_clarity / (self.sample_rate / (lag as f64)).max(1.0).sqrt()
    }

    /// MPM peak picking: the first local NSDF maximum at or above the
    /// clarity floor wins, which is what suppresses octave errors on
    /// harmonic signals. If no local maximum qualifies (the true period can
    /// sit at the edge of the lag range), falls back to the highest NSDF
    /// value that still clears the floor.
    ///
    /// Candidates are only considered from the first positive-going zero
    /// crossing onwards. The NSDF decays from 1 at lag zero on any signal,
    /// and on tones whose period exceeds the lag range that plateau would
    /// otherwise win the fallback scan with near-perfect confidence.
    fn pick_peak(&self, max_lag: usize) -> Option<usize> {
        let crossing = (1..=max_lag)
            .find(|&lag| self.nsdf[lag - 1] <= 0.0 && self.nsdf[lag] > 0.0)?;
        let start_lag = crossing.max(self.min_lag).max(1);
        let end_lag = max_lag;

        for lag in start_lag..end_lag {
            let is_local_maximum =
                self.nsdf[lag] > self.nsdf[lag - 1] && self.nsdf[lag] > self.nsdf[lag + 1];
            if is_local_maximum && self.nsdf[lag] >= self.clarity_floor(lag) {
                return Some(lag);
            }
        }

        let mut best_lag = None;
        let mut best_value = f64::MIN;
        for lag in start_lag..=end_lag {
            if self.nsdf[lag] >= self.clarity_floor(lag) && self.nsdf[lag] > best_value {
                best_value = self.nsdf[lag];
                best_lag = Some(lag);
            }
        }
        best_lag
    }

    /// Refines the peak lag to sub-sample accuracy by fitting a parabola
    /// through the peak and its neighbors. Peaks at the edge of the computed
    /// range are returned verbatim.
    fn interpolate_peak(&self, peak_index: usize, max_lag: usize) -> f64 {
        if peak_index == 0 || peak_index >= max_lag {
            return peak_index as f64;
        }

        let alpha = self.nsdf[peak_index - 1];
        let beta = self.nsdf[peak_index];
        let gamma = self.nsdf[peak_index + 1];

        let denominator = 2.0 * (alpha - 2.0 * beta + gamma);
        if denominator.abs() < EPSILON {
            return peak_index as f64;
        }

        (peak_index as f64) + (alpha - gamma) / denominator
    }
}
