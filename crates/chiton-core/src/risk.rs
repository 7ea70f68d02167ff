//! The [`Risk`] type: the cost of entering a single cell.

use std::fmt;

/// Cost of entering a cell, always in `1..=9`.
///
/// A `Risk` can only be obtained through the checked constructors, so every
/// stored value is strictly positive. The shortest-path search relies on this
/// to finalize a cell the first time it is discovered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Risk(u8);

impl Risk {
    /// Smallest representable risk.
    pub const MIN: Self = Self(1);
    /// Largest representable risk.
    pub const MAX: Self = Self(9);

    /// Create a risk from an integer in `1..=9`.
    #[inline]
    pub const fn new(v: u8) -> Option<Self> {
        if v >= Self::MIN.0 && v <= Self::MAX.0 {
            Some(Self(v))
        } else {
            None
        }
    }

    /// Create a risk from an ASCII digit `'1'..='9'`.
    #[inline]
    pub fn from_digit(ch: char) -> Option<Self> {
        let d = ch.to_digit(10)?;
        Self::new(d as u8)
    }

    /// The underlying value.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Increase by `offset`, wrapping from 9 back to 1.
    ///
    /// Computes `((v - 1 + offset) mod 9) + 1`.
    #[inline]
    pub const fn wrapping_add(self, offset: usize) -> Self {
        let span = (Self::MAX.0 - Self::MIN.0 + 1) as usize;
        let v = (self.0 as usize - 1 + offset % span) % span + 1;
        Self(v as u8)
    }
}

impl From<Risk> for u32 {
    #[inline]
    fn from(r: Risk) -> u32 {
        r.0 as u32
    }
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
