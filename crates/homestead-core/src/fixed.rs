use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits. Used for market
/// values and ledger totals so two runs of the same day credit identical
/// amounts on every platform.
pub type Fixed64 = I32F32;

/// Days are the atomic unit of simulation time.
pub type Days = u32;

/// Checked multiplication for Fixed64 that returns None on overflow. The
/// credit paths saturate on None instead of panicking mid-day.
#[inline]
pub fn checked_mul_64(a: Fixed64, b: Fixed64) -> Option<Fixed64> {
    a.checked_mul(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed64_basic_arithmetic() {
        let a = Fixed64::from_num(1.5);
        let b = Fixed64::from_num(2.0);
        assert_eq!(a + b, Fixed64::from_num(3.5));
        assert_eq!(a * b, Fixed64::from_num(3.0));
    }

    #[test]
    fn fixed64_checked_mul_overflow() {
        let big = Fixed64::MAX;
        let two = Fixed64::from_num(2.0);
        assert!(checked_mul_64(big, two).is_none());
        assert_eq!(checked_mul_64(two, two), Some(Fixed64::from_num(4.0)));
    }

    #[test]
    fn fixed64_saturates_out_of_range_integers() {
        assert_eq!(Fixed64::saturating_from_num(u32::MAX), Fixed64::MAX);
        assert_eq!(Fixed64::saturating_from_num(7u32), Fixed64::from_num(7));
    }

    #[test]
    fn fixed64_determinism() {
        let third = Fixed64::from_num(1.0 / 3.0);
        let again = Fixed64::from_num(1.0 / 3.0);
        assert_eq!(third, again);
        assert_eq!(third * Fixed64::from_num(3.0), again * Fixed64::from_num(3.0));
    }
}
