/// The outcome of analyzing one window of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionResult {
    /// The estimated fundamental frequency in Hz.
    pub frequency: f64,
    /// The value of the NSDF at the maximum corresponding to the pitch
    /// period. Between 0 and 1 (inclusive). Values close to 1 indicate pure
    /// tones and values close to 0 indicate lack of a discernable pitch.
    pub confidence: f64,
    /// Indicates if the result holds a usable pitch estimate. When false,
    /// `frequency` and `confidence` are both zero.
    pub valid: bool,
}

impl DetectionResult {
    pub(crate) fn detected(frequency: f64, confidence: f64) -> Self {
        DetectionResult {
            frequency,
            confidence,
            valid: true,
        }
    }

    pub(crate) fn invalid() -> Self {
        DetectionResult {
            frequency: 0.0,
            confidence: 0.0,
            valid: false,
        }
    }
}
