//! A real-time instrument tuner engine.
//!
//! The crate turns a pushed stream of mono `f32` samples into a stream of
//! `(frequency, confidence)` readings suitable for driving a tuner display:
//!
//! * [mpm] — the MPM pitch detector operating on single analysis windows.
//! * [engine] — the multi-tier dispatcher racing detectors of increasing
//!   window size over an accumulation ring, publishing the latest reading
//!   through a lock-free slot.
//! * [tuning] — equal temperament math (MIDI notes, cents, note names)
//!   under a configurable A4 reference.
//! * [tone] — a phase-accumulating sine generator for sounding the
//!   reference pitch.
//! * [onset] — the block-energy onset detector that shortens attack
//!   latency.
//! * [config] — user settings over a keyed storage capability.
//! * [platform] — traits for the audio and permission collaborators the
//!   embedding application provides.
//!
//! # Example
//! ```
//! use tuner_engine::{FrequencyCalculator, PitchEngine};
//!
//! let sample_rate = 44100.0;
//! let mut engine = PitchEngine::new(4096, sample_rate);
//! let reader = engine.reader();
//!
//! // Push a second's worth of an A4 tone in audio-callback sized blocks.
//! let mut n = 0_usize;
//! let mut block = [0.0_f32; 256];
//! while n < 44100 {
//!     for sample in block.iter_mut() {
//!         *sample = (2.0 * std::f64::consts::PI * 440.0 * (n as f64) / sample_rate).sin() as f32;
//!         n += 1;
//!     }
//!     engine.push_audio(&block);
//! }
//!
//! let (frequency, _confidence) = reader.read_latest().unwrap();
//! let reading = FrequencyCalculator::new().describe(frequency);
//! assert_eq!((reading.name, reading.octave), ("A", 4));
//! assert!(reading.cents.abs() < 1.0);
//! ```

pub mod common;
pub mod config;
pub mod engine;
pub mod mpm;
pub mod onset;
pub mod platform;
pub mod tone;
pub mod tuning;

pub use engine::{PitchEngine, ResultReader};
pub use mpm::{DetectionResult, PitchDetector};
pub use tone::ToneGenerator;
pub use tuning::{FrequencyCalculator, NoteReading};
