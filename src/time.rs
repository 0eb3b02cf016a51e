//! Logical time for the simulation.
//!
//! Represents a point on the simulation's virtual timeline with no
//! dependency on `std::time`. Time advances only when the fetch-execute
//! cycle pops an event, never from wall-clock observation.

/// A logical tick on the simulation timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SimTime(u64);

impl SimTime {
    /// The zero-point of simulation time.
    pub const ZERO: SimTime = SimTime(0);

    /// Create a new `SimTime` from a raw tick value.
    #[inline]
    pub fn new(ticks: u64) -> Self {
        SimTime(ticks)
    }

    /// Return the raw tick value.
    #[inline]
    pub fn ticks(self) -> u64 {
        self.0
    }

    /// The absolute time `delay` ticks after `self`.
    /// Returns `None` on overflow (should never happen in practice).
    #[inline]
    pub fn plus(self, delay: u64) -> Option<SimTime> {
        self.0.checked_add(delay).map(SimTime)
    }

    /// Returns `true` if `self` is strictly after `other`.
    #[inline]
    pub fn is_after(self, other: SimTime) -> bool {
        self.0 > other.0
    }
}

impl std::fmt::Display for SimTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "T={}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(SimTime::ZERO.ticks(), 0);
    }

    #[test]
    fn test_ordering() {
        let t1 = SimTime::new(10);
        let t2 = SimTime::new(20);
        assert!(t1 < t2);
        assert!(t2.is_after(t1));
        assert!(!t1.is_after(t2));
    }

    #[test]
    fn test_plus() {
        let t = SimTime::new(100);
        assert_eq!(t.plus(50).unwrap().ticks(), 150);
    }

    #[test]
    fn test_plus_overflow() {
        let t = SimTime::new(u64::MAX);
        assert!(t.plus(1).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", SimTime::new(42)), "T=42");
    }
}
