use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// An `f64` cell with atomic load/store, stored as raw bits.
pub(crate) struct AtomicF64 {
    bits: AtomicU64,
}

impl AtomicF64 {
    pub(crate) fn new(value: f64) -> Self {
        AtomicF64 {
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    pub(crate) fn store(&self, value: f64, ordering: Ordering) {
        self.bits.store(value.to_bits(), ordering);
    }

    pub(crate) fn load(&self, ordering: Ordering) -> f64 {
        f64::from_bits(self.bits.load(ordering))
    }
}

/// Single-producer single-consumer handoff of the latest pitch reading.
/// The writer publishes frequency, then confidence, then the valid flag,
/// each with release ordering; the reader checks the valid flag with
/// acquire ordering before touching the values. A reader racing a publish
/// can pair a fresh valid flag with the previous reading, which is
/// acceptable for a display polled at tens of hertz; what the ordering
/// rules out is observing values from after the flag it saw.
pub(crate) struct ResultSlot {
    frequency: AtomicF64,
    confidence: AtomicF64,
    valid: AtomicBool,
}

impl ResultSlot {
    pub(crate) fn new() -> Self {
        ResultSlot {
            frequency: AtomicF64::new(0.0),
            confidence: AtomicF64::new(0.0),
            valid: AtomicBool::new(false),
        }
    }

    pub(crate) fn publish(&self, frequency: f64, confidence: f64) {
        self.frequency.store(frequency, Ordering::Release);
        self.confidence.store(confidence, Ordering::Release);
        self.valid.store(true, Ordering::Release);
    }

    pub(crate) fn invalidate(&self) {
        self.valid.store(false, Ordering::Release);
    }

    pub(crate) fn read(&self) -> Option<(f64, f64)> {
        if !self.valid.load(Ordering::Acquire) {
            return None;
        }
        Some((
            self.frequency.load(Ordering::Acquire),
            self.confidence.load(Ordering::Acquire),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_invalid() {
        assert_eq!(ResultSlot::new().read(), None);
    }

    #[test]
    fn test_publish_and_read() {
        let slot = ResultSlot::new();
        slot.publish(440.0, 0.97);
        assert_eq!(slot.read(), Some((440.0, 0.97)));
        // The latest publication wins.
        slot.publish(220.0, 0.8);
        assert_eq!(slot.read(), Some((220.0, 0.8)));
    }

    #[test]
    fn test_invalidate() {
        let slot = ResultSlot::new();
        slot.publish(440.0, 0.97);
        slot.invalidate();
        assert_eq!(slot.read(), None);
    }

    #[test]
    fn test_atomic_f64_round_trip() {
        let cell = AtomicF64::new(0.0);
        for value in [0.0, -0.0, 32.7, 4186.01, f64::MAX] {
            cell.store(value, Ordering::Release);
            assert_eq!(cell.load(Ordering::Acquire).to_bits(), value.to_bits());
        }
    }

    #[test]
    fn test_cross_thread_visibility() {
        use std::sync::Arc;

        let slot = Arc::new(ResultSlot::new());
        let writer_slot = Arc::clone(&slot);
        let writer = std::thread::spawn(move || {
            for i in 1..=1000_u32 {
                writer_slot.publish(f64::from(i), 1.0);
            }
        });

        // Reads may interleave anywhere in the writer's sequence but must
        // only ever observe published values.
        for _ in 0..1000 {
            if let Some((frequency, confidence)) = slot.read() {
                assert!((1.0..=1000.0).contains(&frequency));
                assert_eq!(confidence, 1.0);
            }
        }
        writer.join().unwrap();
        assert_eq!(slot.read(), Some((1000.0, 1.0)));
    }
}
