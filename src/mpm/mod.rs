//! A rust implementation of the MPM [pitch](https://en.wikipedia.org/wiki/Pitch_%28music%29) detection algorithm,
//! described in the paper [A smarter way to find pitch](http://www.cs.otago.ac.nz/tartini/papers/A_Smarter_Way_to_Find_Pitch.pdf)
//! by Philip McLeod and Geoff Wyvill, tuned for instrument tuning. The
//! algorithm estimates the pitch of monophonic, primarily musical, sounds.
//! It cannot be used to detect multiple pitches at once, like in a musical
//! chord.
//!
//! The implementation is suitable for real time use:
//! * No memory is allocated apart from a modest amount on initialization.
//! * The NSDF is computed directly in the time domain with `f64`
//!   accumulation, keeping results bit-exact and reproducible.
//! * Peak picking takes the first NSDF maximum above a frequency dependent
//!   clarity floor, the MPM convention that suppresses octave errors on
//!   harmonic signals.
//!
//! # Example
//! ```
//! use tuner_engine::mpm::PitchDetector;
//!
//! // Create an input window containing a pure tone at 440 Hz.
//! let sample_rate = 44100.0;
//! let sine_frequency = 440.0;
//! let window_size = 4096;
//! let mut window: Vec<f32> = vec![0.0; window_size];
//! for (i, sample) in window.iter_mut().enumerate() {
//!     let angle = 2.0 * std::f64::consts::PI * sine_frequency * (i as f64) / sample_rate;
//!     *sample = angle.sin() as f32;
//! }
//!
//! // Analyze the window.
//! let mut detector = PitchDetector::new(sample_rate, window_size);
//! let result = detector.detect(&window);
//! assert!(result.valid);
//! assert!((result.frequency - sine_frequency).abs() <= 0.01);
//! assert!(result.confidence > 0.8);
//! ```
//!
//! # A note on confidence and false positives
//! The confidence value is the NSDF peak value at the selected pitch
//! period, a number between zero and one indicating to what degree the
//! input window is periodic. Unpitched input may still give rise to
//! occasional qualifying peaks, which is why the surrounding engine gates
//! readings on a confidence threshold before publishing them.

mod detector;
mod result;

pub use detector::PitchDetector;
pub use result::DetectionResult;
