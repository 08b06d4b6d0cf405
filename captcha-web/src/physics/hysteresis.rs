//! Bounded hysteresis counter
//!
//! Rises by a step on good frames, decays on bad ones, floored at 0 and
//! capped at a maximum so a long good streak cannot bank unlimited credit.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HysteresisCounter {
    value: u32,
    max: u32,
}

impl HysteresisCounter {
    pub fn new(max: u32) -> Self {
        Self { value: 0, max }
    }

    pub fn rise(&mut self, step: u32) {
        self.value = self.value.saturating_add(step).min(self.max);
    }

    pub fn decay(&mut self, step: u32) {
        self.value = self.value.saturating_sub(step);
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Strictly greater than `threshold`
    pub fn exceeds(&self, threshold: u32) -> bool {
        self.value > threshold
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_and_cap() {
        let mut c = HysteresisCounter::new(3);
        c.decay(2);
        assert_eq!(c.value(), 0);
        for _ in 0..10 {
            c.rise(1);
        }
        assert_eq!(c.value(), 3);
        c.decay(2);
        assert_eq!(c.value(), 1);
        assert!(c.exceeds(0));
        assert!(!c.exceeds(1));
    }
}
