use crate::biguint::{truncate, BigUint, DIGITS};
use crate::divide;
use crate::error::{ParseBigIntError, TryFromBigIntError};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div, DivAssign,
    Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
};
use std::str::FromStr;

/// A signed integer of unbounded magnitude.
///
/// Values behave like the built-in integer types: they support the full
/// arithmetic, comparison, shift and bitwise operator set with exact
/// semantics, and convert to and from decimal strings. Division truncates
/// toward zero and the remainder takes the dividend's sign, matching `i64`.
///
/// Cloning is cheap: clones share limb storage until one of them is
/// mutated. The storage is reference-counted without atomics, so `BigInt`
/// is not `Send` or `Sync`; each value belongs to a single thread.
///
/// Division by zero panics, as it does for the built-in integer types.
#[derive(Clone)]
pub struct BigInt {
    negative: bool,
    mag: BigUint,
}

impl BigInt {
    fn from_parts(negative: bool, mag: BigUint) -> Self {
        // Zero always carries a positive sign, no matter how it was made.
        Self {
            negative: negative && !mag.is_zero(),
            mag,
        }
    }

    fn zero() -> Self {
        Self {
            negative: false,
            mag: BigUint::zero(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.mag.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// The absolute value.
    pub fn abs(&self) -> Self {
        Self {
            negative: false,
            mag: self.mag.clone(),
        }
    }

    /// Quotient and remainder in one pass. The quotient truncates toward
    /// zero; the remainder is zero or takes the dividend's sign.
    ///
    /// Panics when `divisor` is zero.
    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        let (quotient, remainder) = divide::div_rem(&self.mag, &divisor.mag);
        (
            Self::from_parts(self.negative != divisor.negative, quotient),
            Self::from_parts(self.negative, remainder),
        )
    }

    /// Parse a decimal string, ignoring every character that is not an
    /// ASCII digit. The result is negative when the *first* character of
    /// the input is `-`. `parse_lenient("12a34")` is 1234 and
    /// `parse_lenient("x")` is 0; use [`str::parse`] for validating input
    /// instead.
    pub fn parse_lenient(input: &str) -> Self {
        let mut mag = BigUint::zero();
        for ch in input.chars() {
            if let Some(digit) = ch.to_digit(10) {
                mag = mag.mul(&DIGITS[10]);
                mag.add_assign(&DIGITS[digit as usize]);
            }
        }
        Self::from_parts(input.starts_with('-'), mag)
    }

    /// Apply a limb-wise bitwise operator under integer semantics.
    ///
    /// Matching signs operate on the magnitudes directly and keep the
    /// shared sign. Differing signs are translated to two's complement at
    /// a common width (one limb wider than either operand, so the top bit
    /// is a sign bit), combined, and translated back.
    fn bit_op(&self, other: &Self, op: fn(u32, u32) -> u32) -> Self {
        if self.negative == other.negative {
            let mut mag = BigUint::empty();
            for i in 0..self.mag.len().max(other.mag.len()) {
                mag.push_limb(op(self.mag.limb(i), other.mag.limb(i)));
            }
            mag.trim();
            return Self::from_parts(self.negative, mag);
        }
        let width = self.mag.len().max(other.mag.len()) + 1;
        let a = twos_complement(&self.mag, self.negative, width);
        let b = twos_complement(&other.mag, other.negative, width);
        let mut combined = BigUint::empty();
        for i in 0..width {
            combined.push_limb(op(a.limb(i), b.limb(i)));
        }
        let negative = combined.limb(width - 1) >> 31 != 0;
        let mut mag = if negative {
            from_twos_complement(combined)
        } else {
            combined
        };
        mag.trim();
        Self::from_parts(negative, mag)
    }
}

/// `mag` (negated if `negative`) as exactly `width` limbs of two's
/// complement: bitwise NOT of every limb, then plus one, with the sign
/// extending through the top limb.
fn twos_complement(mag: &BigUint, negative: bool, width: usize) -> BigUint {
    let mut out = BigUint::filled(width, 0);
    if negative {
        let mut carry = 1;
        for i in 0..width {
            let limb = u64::from(!mag.limb(i)) + carry;
            out.set_limb(i, truncate(limb));
            carry = limb >> 32;
        }
    } else {
        for i in 0..mag.len() {
            out.set_limb(i, mag.limb(i));
        }
    }
    out
}

/// Undo [`twos_complement`]: recover the magnitude of a negative value.
fn from_twos_complement(mut repr: BigUint) -> BigUint {
    let mut carry = 1;
    for i in 0..repr.len() {
        let limb = u64::from(!repr.limb(i)) + carry;
        repr.set_limb(i, truncate(limb));
        carry = limb >> 32;
    }
    repr.trim();
    repr
}

impl Default for BigInt {
    fn default() -> Self {
        Self::zero()
    }
}

impl PartialEq for BigInt {
    fn eq(&self, other: &Self) -> bool {
        self.mag == other.mag && (self.negative == other.negative || self.mag.is_zero())
    }
}

impl Eq for BigInt {}

impl Hash for BigInt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.negative.hash(state);
        self.mag.limbs().hash(state);
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        if self == other {
            return Ordering::Equal;
        }
        if self.negative != other.negative {
            return if self.negative {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }
        let by_magnitude = self.mag.cmp_mag(&other.mag);
        if self.negative {
            by_magnitude.reverse()
        } else {
            by_magnitude
        }
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<i32> for BigInt {
    fn from(value: i32) -> Self {
        Self::from_parts(value < 0, BigUint::from_digit(value.unsigned_abs()))
    }
}

impl From<u32> for BigInt {
    fn from(value: u32) -> Self {
        Self::from_parts(false, BigUint::from_digit(value))
    }
}

impl From<i64> for BigInt {
    fn from(value: i64) -> Self {
        Self::from_parts(value < 0, BigUint::from_u64(value.unsigned_abs()))
    }
}

impl From<u64> for BigInt {
    fn from(value: u64) -> Self {
        Self::from_parts(false, BigUint::from_u64(value))
    }
}

impl TryFrom<&BigInt> for u64 {
    type Error = TryFromBigIntError;

    fn try_from(value: &BigInt) -> Result<Self, Self::Error> {
        if value.negative || value.mag.len() > 2 {
            return Err(TryFromBigIntError {});
        }
        Ok(value.mag.as_u64())
    }
}

impl TryFrom<BigInt> for u64 {
    type Error = TryFromBigIntError;

    fn try_from(value: BigInt) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

impl TryFrom<&BigInt> for i64 {
    type Error = TryFromBigIntError;

    fn try_from(value: &BigInt) -> Result<Self, Self::Error> {
        if value.mag.len() > 2 {
            return Err(TryFromBigIntError {});
        }
        let mag = value.mag.as_u64();
        if value.negative {
            if mag > 1 << 63 {
                return Err(TryFromBigIntError {});
            }
            #[allow(clippy::as_conversions, clippy::cast_possible_wrap)]
            let negated = mag.wrapping_neg() as i64;
            Ok(negated)
        } else {
            i64::try_from(mag).map_err(|_| TryFromBigIntError {})
        }
    }
}

impl TryFrom<BigInt> for i64 {
    type Error = TryFromBigIntError;

    fn try_from(value: BigInt) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

impl FromStr for BigInt {
    type Err = ParseBigIntError;

    /// Strict decimal parsing: an optional leading `-` followed by one or
    /// more ASCII digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if digits.is_empty() {
            return Err(ParseBigIntError::Empty);
        }
        let mut mag = BigUint::zero();
        for ch in digits.chars() {
            let digit = ch.to_digit(10).ok_or(ParseBigIntError::InvalidDigit(ch))?;
            mag = mag.mul(&DIGITS[10]);
            mag.add_assign(&DIGITS[digit as usize]);
        }
        Ok(Self::from_parts(negative, mag))
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        if self.mag.len() <= 2 {
            let mut buffer = itoa::Buffer::new();
            return f.write_str(buffer.format(self.mag.as_u64()));
        }
        let mut digits = Vec::new();
        let mut value = self.mag.clone();
        while !value.is_zero() {
            let digit = value.div_assign_limb(10);
            #[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
            digits.push(b'0' + digit as u8);
        }
        let mut rendered = String::with_capacity(digits.len());
        for &byte in digits.iter().rev() {
            rendered.push(char::from(byte));
        }
        f.write_str(&rendered)
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Neg for BigInt {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_parts(!self.negative, self.mag)
    }
}

impl Not for BigInt {
    type Output = Self;

    fn not(self) -> Self {
        // !a == -a - 1, as for the built-in integers.
        -(self + Self::from(1))
    }
}

impl AddAssign<&BigInt> for BigInt {
    fn add_assign(&mut self, other: &Self) {
        if self.negative == other.negative {
            self.mag.add_assign(&other.mag);
            return;
        }
        // Signs differ: subtract the smaller magnitude from the larger and
        // keep the larger side's sign.
        match self.mag.cmp_mag(&other.mag) {
            Ordering::Greater => self.mag.sub_assign(&other.mag),
            Ordering::Less => {
                let mut mag = other.mag.clone();
                mag.sub_assign(&self.mag);
                self.mag = mag;
                self.negative = other.negative;
            }
            Ordering::Equal => *self = Self::zero(),
        }
    }
}

impl SubAssign<&BigInt> for BigInt {
    fn sub_assign(&mut self, other: &Self) {
        // a - b == a + (-b); the magnitude clone is O(1) under sharing.
        let negated = Self::from_parts(!other.negative, other.mag.clone());
        *self += &negated;
    }
}

impl MulAssign<&BigInt> for BigInt {
    fn mul_assign(&mut self, other: &Self) {
        let mag = self.mag.mul(&other.mag);
        *self = Self::from_parts(self.negative != other.negative, mag);
    }
}

impl DivAssign<&BigInt> for BigInt {
    fn div_assign(&mut self, other: &Self) {
        *self = self.div_rem(other).0;
    }
}

impl RemAssign<&BigInt> for BigInt {
    fn rem_assign(&mut self, other: &Self) {
        *self = self.div_rem(other).1;
    }
}

impl BitAndAssign<&BigInt> for BigInt {
    fn bitand_assign(&mut self, other: &Self) {
        *self = self.bit_op(other, |a, b| a & b);
    }
}

impl BitOrAssign<&BigInt> for BigInt {
    fn bitor_assign(&mut self, other: &Self) {
        *self = self.bit_op(other, |a, b| a | b);
    }
}

impl BitXorAssign<&BigInt> for BigInt {
    fn bitxor_assign(&mut self, other: &Self) {
        *self = self.bit_op(other, |a, b| a ^ b);
    }
}

impl ShlAssign<u32> for BigInt {
    fn shl_assign(&mut self, bits: u32) {
        self.mag.shl_assign(bits);
    }
}

impl ShrAssign<u32> for BigInt {
    fn shr_assign(&mut self, bits: u32) {
        let lost = self.mag.shr_assign(bits);
        if self.negative && lost {
            // The magnitude shift truncated toward zero; floor semantics
            // round a negative value the other way.
            self.mag.add_assign(&DIGITS[1]);
        }
        if self.mag.is_zero() {
            self.negative = false;
        }
    }
}

macro_rules! impl_binary_op {
    ($op:ident, $method:ident, $assign_op:ident, $assign_method:ident) => {
        impl $op for BigInt {
            type Output = BigInt;

            fn $method(mut self, other: BigInt) -> BigInt {
                $assign_op::$assign_method(&mut self, &other);
                self
            }
        }

        impl $assign_op<BigInt> for BigInt {
            fn $assign_method(&mut self, other: BigInt) {
                $assign_op::$assign_method(self, &other);
            }
        }
    };
}

impl_binary_op!(Add, add, AddAssign, add_assign);
impl_binary_op!(Sub, sub, SubAssign, sub_assign);
impl_binary_op!(Mul, mul, MulAssign, mul_assign);
impl_binary_op!(Div, div, DivAssign, div_assign);
impl_binary_op!(Rem, rem, RemAssign, rem_assign);
impl_binary_op!(BitAnd, bitand, BitAndAssign, bitand_assign);
impl_binary_op!(BitOr, bitor, BitOrAssign, bitor_assign);
impl_binary_op!(BitXor, bitxor, BitXorAssign, bitxor_assign);

impl Shl<u32> for BigInt {
    type Output = Self;

    fn shl(mut self, bits: u32) -> Self {
        self <<= bits;
        self
    }
}

impl Shr<u32> for BigInt {
    type Output = Self;

    fn shr(mut self, bits: u32) -> Self {
        self >>= bits;
        self
    }
}
