//! Compare flags

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Flags register: `00000LGE`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flags(u8);

impl Flags {
    pub const EQUAL: u8 = 0b0000_0001;
    pub const GREATER: u8 = 0b0000_0010;
    pub const LESS: u8 = 0b0000_0100;

    /// Outcome of comparing `a` against `b`. Exactly one bit is set.
    pub fn compare(a: u8, b: u8) -> Self {
        match a.cmp(&b) {
            Ordering::Less => Flags(Self::LESS),
            Ordering::Greater => Flags(Self::GREATER),
            Ordering::Equal => Flags(Self::EQUAL),
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_equal(self) -> bool {
        self.0 & Self::EQUAL != 0
    }

    #[inline]
    pub const fn is_greater(self) -> bool {
        self.0 & Self::GREATER != 0
    }

    #[inline]
    pub const fn is_less(self) -> bool {
        self.0 & Self::LESS != 0
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08b}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_sets_one_bit() {
        let lt = Flags::compare(1, 2);
        assert!(lt.is_less() && !lt.is_greater() && !lt.is_equal());

        let gt = Flags::compare(9, 2);
        assert!(gt.is_greater() && !gt.is_less() && !gt.is_equal());

        let eq = Flags::compare(7, 7);
        assert!(eq.is_equal());
        assert_eq!(eq.bits(), Flags::EQUAL);

        for f in [lt, gt, eq] {
            assert_eq!(f.bits().count_ones(), 1);
        }
    }

    #[test]
    fn test_default_is_clear() {
        let flags = Flags::default();
        assert_eq!(flags.bits(), 0);
        assert!(!flags.is_equal());
    }

    #[test]
    fn test_display() {
        assert_eq!(Flags::compare(0, 1).to_string(), "00000100");
    }
}
