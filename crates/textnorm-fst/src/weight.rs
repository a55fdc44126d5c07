// Tropical semiring weights: plus is min, times is addition.

use std::cmp::Ordering;

/// A weight in the tropical semiring.
///
/// Lower is better. [`Weight::ZERO`] (`+inf`) marks an unreachable or
/// non-final state; [`Weight::ONE`] (`0.0`) is the neutral path weight.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    /// The semiring zero (`+inf`): no path.
    pub const ZERO: Weight = Weight(f32::INFINITY);

    /// The semiring one (`0.0`): free path.
    pub const ONE: Weight = Weight(0.0);

    pub fn new(value: f32) -> Self {
        Self(value)
    }

    pub fn value(self) -> f32 {
        self.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == f32::INFINITY
    }

    /// Semiring addition: the better of two weights.
    #[inline]
    pub fn plus(self, other: Weight) -> Weight {
        if self.0 <= other.0 { self } else { other }
    }

    /// Semiring multiplication: path extension.
    #[inline]
    pub fn times(self, other: Weight) -> Weight {
        if self.is_zero() || other.is_zero() {
            Weight::ZERO
        } else {
            Weight(self.0 + other.0)
        }
    }

    /// Bit pattern used as a hash/equality key. `-0.0` folds onto `0.0`.
    #[inline]
    pub fn to_bits(self) -> u32 {
        if self.0 == 0.0 { 0 } else { self.0.to_bits() }
    }

    /// Total order suitable for priority queues.
    #[inline]
    pub fn total_cmp(&self, other: &Weight) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Default for Weight {
    fn default() -> Self {
        Weight::ONE
    }
}

impl From<f32> for Weight {
    fn from(value: f32) -> Self {
        Weight(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_is_min() {
        assert_eq!(Weight::new(1.5).plus(Weight::new(0.5)), Weight::new(0.5));
        assert_eq!(Weight::ZERO.plus(Weight::new(3.0)), Weight::new(3.0));
    }

    #[test]
    fn times_is_sum_and_zero_absorbs() {
        assert_eq!(Weight::new(1.0).times(Weight::new(2.0)), Weight::new(3.0));
        assert!(Weight::ZERO.times(Weight::new(2.0)).is_zero());
        assert_eq!(Weight::ONE.times(Weight::new(2.0)), Weight::new(2.0));
    }

    #[test]
    fn negative_zero_has_same_key() {
        assert_eq!(Weight::new(-0.0).to_bits(), Weight::ONE.to_bits());
    }
}
