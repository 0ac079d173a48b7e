//! Long division of magnitudes.
//!
//! The general case is Knuth's Algorithm D over base-2^32 limbs: both
//! operands are scaled by a single-limb normalization factor so the
//! divisor's top limb is at least 2^31, each quotient digit is estimated
//! from the leading limbs and corrected, and the remainder is unscaled at
//! the end with one short division.

use crate::biguint::{truncate, BigUint};
use std::cmp::Ordering;

const BASE: u64 = 1 << 32;

/// Quotient and remainder of two magnitudes. Panics on a zero divisor:
/// that is a caller bug, not a recoverable condition.
pub(crate) fn div_rem(dividend: &BigUint, divisor: &BigUint) -> (BigUint, BigUint) {
    assert!(!divisor.is_zero(), "division by zero");
    if dividend.cmp_mag(divisor) == Ordering::Less {
        return (BigUint::zero(), dividend.clone());
    }
    if divisor.len() == 1 {
        let mut quotient = dividend.clone();
        let rem = quotient.div_assign_limb(divisor.limb(0));
        return (quotient, BigUint::from_digit(rem));
    }

    // Normalize: scale both operands by 2^32 / (top + 1). This multiplies
    // the divisor's top limb to at least 2^31, which bounds the error of
    // the per-digit estimate below. Scaling the divisor never grows it by
    // a limb.
    let top = divisor.top_limb();
    let scale = if top == u32::MAX {
        1
    } else {
        truncate(BASE / (u64::from(top) + 1))
    };
    let mut rem = dividend.mul_limb(scale);
    let divisor = divisor.mul_limb(scale);
    debug_assert!(divisor.len() >= 2);
    debug_assert!(divisor.top_limb() >= 1 << 31);

    let n = divisor.len();
    let positions = rem.len() - n;
    // One extra limb so every window has a (possibly zero) limb above it.
    rem.push_limb(0);

    let mut quotient = BigUint::empty();
    for j in (0..=positions).rev() {
        let estimate = trial_digit(&rem, &divisor, j);
        let mut digit = estimate;
        let mut went_negative = sub_mul_window(&mut rem, j, &divisor, estimate);
        // The estimate can exceed the true digit; back out one divisor at
        // a time until the window is non-negative again. Normalization
        // keeps this to a single pass in practice.
        while went_negative {
            digit -= 1;
            went_negative = !add_back_window(&mut rem, j, &divisor);
        }
        quotient.push_limb(digit);
    }
    // Digits were produced most-significant first.
    quotient.reverse_limbs();
    quotient.trim();

    // What is left under the lowest window is the scaled remainder.
    while rem.len() > n {
        rem.pop_limb();
    }
    rem.trim();
    let leftover = rem.div_assign_limb(scale);
    debug_assert_eq!(leftover, 0);
    (quotient, rem)
}

/// Estimate the quotient digit for the window at `j` from the top two
/// remainder limbs, then refine it against the third limb to disambiguate.
/// The result is at most one above the true digit.
fn trial_digit(rem: &BigUint, divisor: &BigUint, j: usize) -> u32 {
    let n = divisor.len();
    let top = u64::from(divisor.limb(n - 1));
    let next = u64::from(divisor.limb(n - 2));
    let head = u64::from(rem.limb(j + n)) << 32 | u64::from(rem.limb(j + n - 1));
    let third = u64::from(rem.limb(j + n - 2));

    let mut q = head / top;
    let mut r = head % top;
    if q >= BASE {
        q = BASE - 1;
        r = head - q * top;
    }
    while r < BASE && q * next > (r << 32 | third) {
        q -= 1;
        r += top;
    }
    truncate(q)
}

/// Subtract `digit * divisor` from the window `rem[j ..= j + n]` in place.
/// Returns true when the window went negative, i.e. the digit was one too
/// large and the caller must add the divisor back.
fn sub_mul_window(rem: &mut BigUint, j: usize, divisor: &BigUint, digit: u32) -> bool {
    let n = divisor.len();
    let mut borrow = 0;
    for i in 0..n {
        let product = u64::from(digit) * u64::from(divisor.limb(i));
        let t = i64::from(rem.limb(j + i)) - borrow - i64::from(truncate(product));
        rem.set_limb(j + i, low_limb(t));
        borrow = i64::from(truncate(product >> 32)) - (t >> 32);
    }
    let t = i64::from(rem.limb(j + n)) - borrow;
    rem.set_limb(j + n, low_limb(t));
    t < 0
}

/// Add the divisor back into the window at `j`. Returns true when the
/// addition carried out of the window's top limb, cancelling a previous
/// borrow.
fn add_back_window(rem: &mut BigUint, j: usize, divisor: &BigUint) -> bool {
    let n = divisor.len();
    let mut carry = 0;
    for i in 0..n {
        let sum = u64::from(rem.limb(j + i)) + u64::from(divisor.limb(i)) + carry;
        rem.set_limb(j + i, truncate(sum));
        carry = sum >> 32;
    }
    let sum = u64::from(rem.limb(j + n)) + carry;
    rem.set_limb(j + n, truncate(sum));
    sum >> 32 != 0
}

#[allow(clippy::as_conversions, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn low_limb(t: i64) -> u32 {
    t as u32
}

#[cfg(test)]
mod tests {
    use super::div_rem;
    use crate::biguint::BigUint;
    use std::cmp::Ordering;

    fn from_limbs(limbs: &[u32]) -> BigUint {
        let mut result = BigUint::empty();
        for &limb in limbs {
            result.push_limb(limb);
        }
        result.trim();
        result
    }

    #[track_caller]
    fn check(dividend: &BigUint, divisor: &BigUint) -> (BigUint, BigUint) {
        let (q, r) = div_rem(dividend, divisor);
        assert_eq!(r.cmp_mag(divisor), Ordering::Less);
        let mut reconstructed = q.mul(divisor);
        reconstructed.add_assign(&r);
        assert_eq!(&reconstructed, dividend);
        (q, r)
    }

    #[test]
    fn test_dividend_smaller_than_divisor() {
        let (q, r) = check(&BigUint::from_u64(5), &BigUint::from_u64(1 << 40));
        assert!(q.is_zero());
        assert_eq!(r, BigUint::from_u64(5));
    }

    #[test]
    fn test_single_limb_divisor() {
        let (q, r) = check(&from_limbs(&[1, 2, 3, 4]), &BigUint::from_digit(10));
        assert!(!q.is_zero());
        assert!(r.len() == 1);
    }

    #[test]
    fn test_equal_operands() {
        let a = from_limbs(&[7, 8, 9]);
        let (q, r) = check(&a, &a);
        assert_eq!(q, BigUint::from_digit(1));
        assert!(r.is_zero());
    }

    #[test]
    fn test_equal_lengths() {
        let (q, _) = check(
            &from_limbs(&[0, 0, 0x8000_0000]),
            &from_limbs(&[1, 0, 0x4000_0000]),
        );
        assert_eq!(q, BigUint::from_digit(1));
    }

    #[test]
    fn test_much_smaller_divisor() {
        let dividend = from_limbs(&[u32::MAX; 7]);
        let divisor = from_limbs(&[0x1234_5678, 0x9abc_def0]);
        check(&dividend, &divisor);
    }

    #[test]
    fn test_trial_digit_overestimate_is_corrected() {
        // 2^95 + 3 over 2^63 + 1: the two-limb estimate overshoots and the
        // add-back pass has to fire.
        let dividend = from_limbs(&[3, 0, 0x8000_0000]);
        let divisor = from_limbs(&[1, 0x8000_0000]);
        let (q, _) = check(&dividend, &divisor);
        assert_eq!(q, BigUint::from_u64(0xffff_ffff));
    }

    #[test]
    fn test_top_limb_already_normalized() {
        let dividend = from_limbs(&[5, 6, 7, u32::MAX]);
        let divisor = from_limbs(&[9, u32::MAX]);
        check(&dividend, &divisor);
    }

    #[test]
    fn test_remainder_denormalizes_exactly() {
        let dividend = from_limbs(&[0xdead_beef, 0x0123_4567, 0x89ab_cdef, 0x1fff]);
        let divisor = from_limbs(&[0x0000_ffff, 0x3]);
        let (_, r) = check(&dividend, &divisor);
        assert_eq!(r.cmp_mag(&divisor), Ordering::Less);
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn test_zero_divisor_panics() {
        div_rem(&BigUint::from_digit(1), &BigUint::zero());
    }
}
