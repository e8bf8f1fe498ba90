//! Values of number literals.
//!
//! Literals may denote any value below 2^256, which no primitive integer
//! holds, so they are folded into four 64-bit limbs.

use std::fmt::Display;

/// Unsigned 256-bit value, least significant limb first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct U256([u64; 4]);

impl U256 {
    pub const ZERO: U256 = U256([0; 4]);
    pub const MAX: U256 = U256([u64::MAX; 4]);

    pub fn from_u64(value: u64) -> Self {
        U256([value, 0, 0, 0])
    }

    /// Parses a decimal or `0x`-prefixed hexadecimal literal.
    ///
    /// Returns `None` for anything else and for values of 2^256 or more.
    pub fn from_literal(text: &str) -> Option<U256> {
        let (digits, radix) = match text.strip_prefix("0x") {
            Some(hex) => (hex, 16),
            None => (text, 10),
        };

        if digits.is_empty() {
            return None;
        }

        let mut value = U256::ZERO;
        for ch in digits.chars() {
            let digit = ch.to_digit(radix)?;
            if !value.mul_add(radix as u64, digit as u64) {
                return None;
            }
        }

        Some(value)
    }

    /// `self = self * factor + addend`; false on overflow.
    fn mul_add(&mut self, factor: u64, addend: u64) -> bool {
        let mut carry = addend as u128;
        for limb in self.0.iter_mut() {
            let wide = (*limb as u128) * (factor as u128) + carry;
            *limb = wide as u64;
            carry = wide >> 64;
        }
        carry == 0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|x| *x == 0)
    }
}

impl Display for U256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x")?;
        let mut started = false;
        for limb in self.0.iter().rev() {
            if started {
                write!(f, "{:016x}", limb)?;
            } else if *limb != 0 {
                write!(f, "{:x}", limb)?;
                started = true;
            }
        }
        if !started {
            write!(f, "0")?;
        }
        Ok(())
    }
}
