//! Tuner configuration over a keyed double-value storage capability.
//!
//! The storage backend itself (platform preferences, a file, a registry) is
//! a collaborator injected through [ConfigStorage]; this layer owns the
//! defaults and the validation.

use std::collections::HashMap;

use log::debug;

pub const REFERENCE_PITCH_KEY: &str = "reference_pitch";
pub const DEFAULT_REFERENCE_PITCH: f64 = 440.0;
pub const MIN_REFERENCE_PITCH: f64 = 410.0;
pub const MAX_REFERENCE_PITCH: f64 = 480.0;

/// Keyed double-value storage capability. Implementations are expected to
/// be infallible in-memory or best-effort persistent stores; `set_double`
/// and `remove` report success.
pub trait ConfigStorage {
    fn set_double(&mut self, key: &str, value: f64) -> bool;
    fn get_double(&self, key: &str) -> Option<f64>;
    fn remove(&mut self, key: &str) -> bool;
    fn clear(&mut self);
}

/// In-memory [ConfigStorage] used by tests and demos.
#[derive(Default)]
pub struct MemoryConfigStorage {
    values: HashMap<String, f64>,
}

impl MemoryConfigStorage {
    pub fn new() -> Self {
        MemoryConfigStorage::default()
    }
}

impl ConfigStorage for MemoryConfigStorage {
    fn set_double(&mut self, key: &str, value: f64) -> bool {
        self.values.insert(key.to_string(), value);
        true
    }

    fn get_double(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    fn remove(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    fn clear(&mut self) {
        self.values.clear();
    }
}

/// Owns the tuner's user-facing settings. Out-of-range values are silently
/// clamped on both read and write, so a corrupted store can't push the
/// engine outside its tolerated range.
pub struct ConfigManager {
    storage: Box<dyn ConfigStorage>,
}

impl ConfigManager {
    pub fn new(storage: Box<dyn ConfigStorage>) -> Self {
        ConfigManager { storage }
    }

    /// Returns the stored A4 reference pitch in Hz, clamped to the
    /// tolerated range, or the default when nothing is stored.
    pub fn reference_pitch(&self) -> f64 {
        match self.storage.get_double(REFERENCE_PITCH_KEY) {
            Some(stored) => stored.clamp(MIN_REFERENCE_PITCH, MAX_REFERENCE_PITCH),
            None => DEFAULT_REFERENCE_PITCH,
        }
    }

    /// Stores the A4 reference pitch in Hz, clamped to the tolerated range.
    pub fn set_reference_pitch(&mut self, frequency_hz: f64) -> bool {
        let clamped = frequency_hz.clamp(MIN_REFERENCE_PITCH, MAX_REFERENCE_PITCH);
        if clamped != frequency_hz {
            debug!(
                "reference pitch {} Hz out of range, storing {} Hz",
                frequency_hz, clamped
            );
        }
        self.storage.set_double(REFERENCE_PITCH_KEY, clamped)
    }

    /// Restores the default A4 reference pitch.
    pub fn reset_reference_pitch(&mut self) -> bool {
        self.storage
            .set_double(REFERENCE_PITCH_KEY, DEFAULT_REFERENCE_PITCH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ConfigManager {
        ConfigManager::new(Box::new(MemoryConfigStorage::new()))
    }

    #[test]
    fn test_default_reference_pitch() {
        assert_eq!(manager().reference_pitch(), 440.0);
    }

    #[test]
    fn test_set_and_get() {
        let mut config = manager();
        assert!(config.set_reference_pitch(442.0));
        assert_eq!(config.reference_pitch(), 442.0);
    }

    #[test]
    fn test_write_clamp() {
        let mut config = manager();
        config.set_reference_pitch(500.0);
        assert_eq!(config.reference_pitch(), 480.0);
        config.set_reference_pitch(300.0);
        assert_eq!(config.reference_pitch(), 410.0);
    }

    #[test]
    fn test_read_clamp_protects_against_corruption() {
        let mut storage = MemoryConfigStorage::new();
        storage.set_double(REFERENCE_PITCH_KEY, 1000.0);
        let config = ConfigManager::new(Box::new(storage));
        assert_eq!(config.reference_pitch(), 480.0);
    }

    #[test]
    fn test_reset() {
        let mut config = manager();
        config.set_reference_pitch(466.0);
        assert!(config.reset_reference_pitch());
        assert_eq!(config.reference_pitch(), 440.0);
    }

    #[test]
    fn test_memory_storage_contract() {
        let mut storage = MemoryConfigStorage::new();
        assert_eq!(storage.get_double("missing"), None);
        assert!(storage.set_double("a", 1.5));
        assert_eq!(storage.get_double("a"), Some(1.5));
        assert!(storage.remove("a"));
        assert!(!storage.remove("a"));
        storage.set_double("b", 2.0);
        storage.clear();
        assert_eq!(storage.get_double("b"), None);
    }
}
