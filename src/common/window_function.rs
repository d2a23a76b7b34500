use std::f64::consts::PI;

/// Analysis window functions offered by the pitch detector.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WindowFunction {
    /// No shaping. The detector default: the NSDF normalization already
    /// compensates for the shrinking overlap at large lags.
    Rectangular,
    /// <https://en.wikipedia.org/wiki/Window_function#Hann_and_Hamming_windows>
    Hann,
    /// <https://en.wikipedia.org/wiki/Window_function#Hann_and_Hamming_windows>
    Hamming,
}

/// Fills `table` with the coefficients of the given window function.
pub fn fill_window(window_function: WindowFunction, table: &mut [f64]) {
    let n = table.len();
    if n == 0 {
        return;
    }
    if n == 1 {
        table[0] = 1.0;
        return;
    }
    for (i, value) in table.iter_mut().enumerate() {
        let phase = 2.0 * PI * (i as f64) / ((n - 1) as f64);
        *value = match window_function {
            WindowFunction::Rectangular => 1.0,
            WindowFunction::Hann => 0.5 * (1.0 - phase.cos()),
            WindowFunction::Hamming => 0.54 - 0.46 * phase.cos(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::{fill_window, WindowFunction};

    #[test]
    fn test_rectangular_window() {
        let mut table = [0.0; 512];
        fill_window(WindowFunction::Rectangular, &mut table);
        assert!(table.iter().all(|v| *v == 1.0));
    }

    #[test]
    fn test_hann_window() {
        let mut table = [0.0; 1025];
        fill_window(WindowFunction::Hann, &mut table);
        assert!(table[0].abs() <= 1e-12);
        assert!(table[1024].abs() <= 1e-12);
        assert!((table[512] - 1.0).abs() <= 1e-12);
    }

    #[test]
    fn test_hamming_window() {
        let mut table = [0.0; 1025];
        fill_window(WindowFunction::Hamming, &mut table);
        // Hamming endpoints sit at 0.08, not zero.
        assert!((table[0] - 0.08).abs() <= 1e-12);
        assert!((table[1024] - 0.08).abs() <= 1e-12);
        assert!((table[512] - 1.0).abs() <= 1e-12);
    }
}
