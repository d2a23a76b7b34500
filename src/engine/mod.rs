//! The real-time analysis engine: an accumulation ring fed by the audio
//! thread, a tiered cascade of MPM detectors racing from shortest window to
//! longest, and a lock-free slot publishing the latest reading to the
//! display side.
//!
//! # Example
//! ```
//! use tuner_engine::engine::PitchEngine;
//!
//! let sample_rate = 48000.0;
//! let mut engine = PitchEngine::new(4096, sample_rate);
//! let reader = engine.reader();
//!
//! // The audio thread pushes blocks as they arrive...
//! let mut block = vec![0.0_f32; 256];
//! let block_len = block.len();
//! for chunk in 0..16 {
//!     for (i, sample) in block.iter_mut().enumerate() {
//!         let n = (chunk * block_len + i) as f64;
//!         *sample = (2.0 * std::f64::consts::PI * 440.0 * n / sample_rate).sin() as f32;
//!     }
//!     engine.push_audio(&block);
//! }
//!
//! // ...and the display thread polls the latest reading.
//! let (frequency, confidence) = reader.read_latest().unwrap();
//! assert!((frequency - 440.0).abs() < 1.0);
//! assert!(confidence >= 0.5);
//! ```

mod result_slot;
mod tier;

pub use tier::DetectionTier;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use log::debug;

use crate::engine::result_slot::{AtomicF64, ResultSlot};
use crate::onset::OnsetDetector;

/// The default accumulation ring capacity in samples.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;
const MIN_BUFFER_SIZE: usize = 2048;
const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.5;

// The short tiers trade frequency floor for latency and cost; the full
// tier covers the bottom of the range down to C1.
const FAST_TIER: (usize, usize, f64) = (512, 128, 86.0);
const MEDIUM_TIER: (usize, usize, f64) = (1024, 256, 43.0);
const FULL_TIER_HOP: usize = 1024;
const FULL_TIER_MIN_FREQUENCY: f64 = 32.7;

/// State shared between the producer-side engine and its reader handles.
struct EngineShared {
    slot: ResultSlot,
    confidence_threshold: AtomicF64,
}

/// The producer side of the pitch engine. Owned and driven by the audio
/// thread: [push_audio](PitchEngine::push_audio) performs no allocation,
/// takes no locks and never blocks. Readings surface on the
/// [ResultReader] handles.
pub struct PitchEngine {
    buffer: Box<[f32]>,
    write_index: usize,
    tiers: [DetectionTier; 3],
    onset: OnsetDetector,
    samples_since_detection: usize,
    /// Allows at most one onset-triggered detection pass per hop interval.
    /// Rearmed by every scheduled pass.
    onset_armed: bool,
    detection_pass_count: usize,
    shared: Arc<EngineShared>,
}

impl PitchEngine {
    /// Creates an engine with an accumulation ring of `buffer_size` samples
    /// (the full tier's window size) at the given sample rate.
    /// `buffer_size` must be at least 2048 so the full tier stays distinct
    /// from the medium one.
    pub fn new(buffer_size: usize, sample_rate: f64) -> Self {
        if buffer_size < MIN_BUFFER_SIZE {
            panic!("Engine buffer size must be at least {}", MIN_BUFFER_SIZE)
        }

        let tiers = [
            DetectionTier::new(sample_rate, FAST_TIER.0, FAST_TIER.1, FAST_TIER.2),
            DetectionTier::new(sample_rate, MEDIUM_TIER.0, MEDIUM_TIER.1, MEDIUM_TIER.2),
            DetectionTier::new(
                sample_rate,
                buffer_size,
                FULL_TIER_HOP,
                FULL_TIER_MIN_FREQUENCY,
            ),
        ];
        for tier in tiers.iter() {
            debug!(
                "detection tier: {} samples, hop {}, floor {} Hz",
                tier.buffer_size(),
                tier.hop_size(),
                tier.min_frequency()
            );
        }

        PitchEngine {
            buffer: vec![0.0; buffer_size].into_boxed_slice(),
            write_index: 0,
            tiers,
            onset: OnsetDetector::new(),
            samples_since_detection: 0,
            onset_armed: true,
            detection_pass_count: 0,
            shared: Arc::new(EngineShared {
                slot: ResultSlot::new(),
                confidence_threshold: AtomicF64::new(DEFAULT_CONFIDENCE_THRESHOLD),
            }),
        }
    }

    /// Returns a consumer-side handle for polling readings and adjusting
    /// the confidence threshold. Handles stay valid for the lifetime of the
    /// shared state, independent of the engine.
    pub fn reader(&self) -> ResultReader {
        ResultReader {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Accepts one block of mono samples from the producer. Detection runs
    /// when the accumulated sample count reaches the fast tier's hop, or
    /// early when the block starts a note onset.
    pub fn push_audio(&mut self, samples: &[f32]) {
        if samples.is_empty() {
            return;
        }

        let ring_size = self.buffer.len();
        for sample in samples {
            self.buffer[self.write_index] = *sample;
            self.write_index = (self.write_index + 1) % ring_size;
        }
        self.samples_since_detection += samples.len();

        let onset = self.onset.process(samples);
        let scheduled = self.samples_since_detection >= self.tiers[0].hop_size();

        if scheduled {
            self.onset_armed = true;
            self.samples_since_detection = 0;
            self.run_detection_pass();
        } else if onset && self.onset_armed {
            self.onset_armed = false;
            self.samples_since_detection = 0;
            self.run_detection_pass();
        }
    }

    /// Returns the number of detection passes run so far.
    pub fn detection_pass_count(&self) -> usize {
        self.detection_pass_count
    }

    /// Returns the sample capacity of the accumulation ring.
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the detection tiers, fastest first.
    pub fn tiers(&self) -> &[DetectionTier] {
        &self.tiers
    }

    /// Runs the detectors from the shortest window to the longest and
    /// publishes the first reading that clears the confidence threshold.
    /// Short windows can't resolve low fundamentals but cost a fraction of
    /// the full window, so most detections never reach the expensive tier.
    /// When every tier comes up short the previous reading is withdrawn.
    fn run_detection_pass(&mut self) {
        self.detection_pass_count += 1;
        let threshold = self.shared.confidence_threshold.load(Ordering::Relaxed);

        let buffer = &self.buffer;
        let tier_count = self.tiers.len();
        for (index, tier) in self.tiers.iter_mut().enumerate() {
            let result = tier.detect_latest(buffer, self.write_index);
            if !result.valid || result.confidence < threshold {
                continue;
            }
            // A reading pinned to the bottom of a tier's range usually
            // means the tone's period doesn't fit its window; a deeper
            // tier resolves it properly.
            let has_deeper_tier = index + 1 < tier_count;
            if has_deeper_tier && tier.is_floor_reading(result.frequency) {
                continue;
            }
            self.shared.slot.publish(result.frequency, result.confidence);
            return;
        }
        self.shared.slot.invalidate();
    }
}

/// The consumer side of the pitch engine: polls the latest reading and
/// holds the tuning knobs that belong to the display side. Cheap to clone.
#[derive(Clone)]
pub struct ResultReader {
    shared: Arc<EngineShared>,
}

impl ResultReader {
    /// Returns the latest published `(frequency, confidence)` reading, or
    /// `None` while no pitch is being detected.
    pub fn read_latest(&self) -> Option<(f64, f64)> {
        self.shared.slot.read()
    }

    /// Sets the confidence a tier's reading must reach to be published,
    /// clamped to `[0, 1]`.
    pub fn set_confidence_threshold(&self, threshold: f64) {
        let clamped = threshold.clamp(0.0, 1.0);
        if clamped != threshold {
            debug!(
                "confidence threshold {} out of range, using {}",
                threshold, clamped
            );
        }
        self.shared
            .confidence_threshold
            .store(clamped, Ordering::Relaxed);
    }

    /// Returns the current confidence threshold.
    pub fn confidence_threshold(&self) -> f64 {
        self.shared.confidence_threshold.load(Ordering::Relaxed)
    }
}
