//! Single binary values. Negation is `1 - bit`.

use std::fmt::{Debug, Display, Formatter};
use std::ops::Not;

use crate::error::Error;

/// A single binary value.
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Bit {
    #[default]
    Zero,
    One,
}

// Constructors
impl Bit {
    pub const fn from_u8_lossy(value: u8) -> Self {
        if value & 1 == 0 {
            Bit::Zero
        } else {
            Bit::One
        }
    }
}

// Getters
impl Bit {
    pub const fn as_u8(self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }

    pub const fn is_one(self) -> bool {
        matches!(self, Bit::One)
    }

    pub const fn is_zero(self) -> bool {
        matches!(self, Bit::Zero)
    }
}

impl Bit {
    /// Complement: `1 - bit`.
    pub const fn negate(self) -> Self {
        Self::from_u8_lossy(1 - self.as_u8())
    }
}

impl From<bool> for Bit {
    fn from(b: bool) -> Self {
        if b {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

impl From<Bit> for bool {
    fn from(bit: Bit) -> Self {
        bit.is_one()
    }
}

impl From<Bit> for u8 {
    fn from(bit: Bit) -> Self {
        bit.as_u8()
    }
}

impl TryFrom<u8> for Bit {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Bit::Zero),
            1 => Ok(Bit::One),
            _ => Err(Error::InvalidBit { value }),
        }
    }
}

impl Not for Bit {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl Not for &Bit {
    type Output = Bit;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl Display for Bit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl Debug for Bit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
