//! Sign-magnitude arithmetic over growable limb sequences.
//!
//! Magnitude helpers (`mag_*`) ignore the sign flag and operate on the
//! limb sequences alone; the public operations layer the sign rules on
//! top. Multiplication is schoolbook, division restores digit by digit
//! from the most significant end. Division by zero yields zero for both
//! quotient and remainder.

use std::cmp::Ordering;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Shl, ShlAssign, Shr,
    ShrAssign, Sub, SubAssign,
};

use crate::limb::{Limb, Wide};

use super::BigInt;

impl<const BASE: u32, const SIGNED: bool> BigInt<BASE, SIGNED> {
    /// Compare magnitudes, ignoring signs. Both values are canonical so
    /// a longer limb sequence is always larger.
    pub(crate) fn mag_cmp(&self, rhs: &Self) -> Ordering {
        match self.limbs.len().cmp(&rhs.limbs.len()) {
            Ordering::Equal => {}
            order => return order,
        }
        for (l, r) in self.limbs.iter().rev().zip(rhs.limbs.iter().rev()) {
            match l.cmp(r) {
                Ordering::Equal => {}
                order => return order,
            }
        }
        Ordering::Equal
    }

    /// self += rhs over magnitudes. May append a carry limb.
    fn mag_add_assign(&mut self, rhs: &Self) {
        if rhs.limbs.len() > self.limbs.len() {
            self.limbs.resize(rhs.limbs.len(), 0);
        }
        let mut carry: Wide = 0;
        for (i, limb) in self.limbs.iter_mut().enumerate() {
            let sum = *limb as Wide + rhs.limbs.get(i).copied().unwrap_or(0) as Wide + carry;
            if sum >= Self::RADIX {
                *limb = (sum - Self::RADIX) as Limb;
                carry = 1;
            } else {
                *limb = sum as Limb;
                carry = 0;
            }
        }
        if carry > 0 {
            self.limbs.push(1);
        }
    }

    /// self -= rhs over magnitudes. Requires |self| >= |rhs|.
    fn mag_sub_assign(&mut self, rhs: &Self) {
        debug_assert!(self.mag_cmp(rhs) != Ordering::Less);
        let mut borrow: Wide = 0;
        for (i, limb) in self.limbs.iter_mut().enumerate() {
            let sub = rhs.limbs.get(i).copied().unwrap_or(0) as Wide + borrow;
            let cur = *limb as Wide;
            if cur < sub {
                *limb = (cur + Self::RADIX - sub) as Limb;
                borrow = 1;
            } else {
                *limb = (cur - sub) as Limb;
                borrow = 0;
            }
        }
        debug_assert_eq!(borrow, 0);
        self.remove_empty_back();
    }

    /// magnitude = magnitude * mul + add. `mul` is at most 2^32 and
    /// `add` less than `mul`, keeping every intermediate below 2^64.
    pub(crate) fn mag_mul_small(&mut self, mul: Wide, add: Wide) {
        debug_assert!(mul <= 1 << 32 && add < mul);
        let mut carry = add;
        for limb in self.limbs.iter_mut() {
            let wide = *limb as Wide * mul + carry;
            *limb = (wide % Self::RADIX) as Limb;
            carry = wide / Self::RADIX;
        }
        while carry > 0 {
            self.limbs.push((carry % Self::RADIX) as Limb);
            carry /= Self::RADIX;
        }
        self.remove_empty_back();
    }

    /// Sign-magnitude addition: equal signs add magnitudes, opposite
    /// signs subtract the smaller magnitude from the larger and keep
    /// the larger operand's sign.
    fn add_value(&mut self, rhs: &Self) {
        if self.negative == rhs.negative {
            self.mag_add_assign(rhs);
        } else {
            match self.mag_cmp(rhs) {
                Ordering::Greater => self.mag_sub_assign(rhs),
                Ordering::Less => {
                    let mut out = rhs.clone();
                    out.mag_sub_assign(self);
                    *self = out;
                }
                Ordering::Equal => {
                    self.limbs.clear();
                    self.limbs.push(0);
                }
            }
        }
        self.normalize();
    }

    /// Sign-magnitude subtraction: opposite signs add magnitudes and
    /// keep the minuend's sign; equal signs subtract the smaller
    /// magnitude from the larger, flipping the sign when the
    /// subtrahend's magnitude wins. Unsigned subtraction saturates at
    /// zero instead of flipping.
    fn sub_value(&mut self, rhs: &Self) {
        if self.negative != rhs.negative {
            self.mag_add_assign(rhs);
        } else {
            match self.mag_cmp(rhs) {
                Ordering::Greater => self.mag_sub_assign(rhs),
                Ordering::Less => {
                    if SIGNED {
                        let mut out = rhs.clone();
                        out.mag_sub_assign(self);
                        out.negative = !rhs.negative;
                        *self = out;
                    } else {
                        self.limbs.clear();
                        self.limbs.push(0);
                    }
                }
                Ordering::Equal => {
                    self.limbs.clear();
                    self.limbs.push(0);
                }
            }
        }
        self.normalize();
    }

    /// Schoolbook multiplication. The product of two nonzero values is
    /// negative exactly when the operand signs differ.
    fn mul_value(&mut self, rhs: &Self) {
        if self.is_zero() || rhs.is_zero() {
            self.limbs.clear();
            self.limbs.push(0);
            self.negative = false;
            return;
        }
        let mut out = vec![0; self.limbs.len() + rhs.limbs.len()];
        for (i, &r) in rhs.limbs.iter().enumerate() {
            if r == 0 {
                continue;
            }
            let mut carry: Wide = 0;
            for (j, &l) in self.limbs.iter().enumerate() {
                let wide = l as Wide * r as Wide + out[i + j] as Wide + carry;
                out[i + j] = (wide % Self::RADIX) as Limb;
                carry = wide / Self::RADIX;
            }
            for slot in out[i + self.limbs.len()..].iter_mut() {
                if carry == 0 {
                    break;
                }
                let wide = *slot as Wide + carry;
                *slot = (wide % Self::RADIX) as Limb;
                carry = wide / Self::RADIX;
            }
            debug_assert_eq!(carry, 0);
        }
        self.limbs = out;
        self.negative = SIGNED && (self.negative != rhs.negative);
        self.normalize();
    }

    /// Quotient and remainder in one pass, truncating toward zero: the
    /// quotient is negative when the operand signs differ and the
    /// remainder takes the dividend's sign. Division by zero returns
    /// zero for both.
    pub fn divmod(&self, rhs: &Self) -> (Self, Self) {
        let mut quotient = Self::new();
        let mut remainder = Self::new();
        if rhs.is_zero() {
            return (quotient, remainder);
        }

        // restore digits from the most significant end: shift one
        // dividend digit into the remainder, then subtract the divisor
        // magnitude out of it (at most BASE - 1 times)
        quotient.limbs.resize(self.limbs.len(), 0);
        for i in (0..self.digit_count()).rev() {
            remainder.mag_mul_small(BASE as Wide, self.digit(i) as Wide);
            let mut digit = 0;
            while remainder.mag_cmp(rhs) != Ordering::Less {
                remainder.mag_sub_assign(rhs);
                digit += 1;
            }
            debug_assert!(digit < BASE);
            if digit > 0 {
                Self::set_digit_raw(&mut quotient.limbs, i, digit);
            }
        }

        quotient.negative = SIGNED && (self.negative != rhs.negative);
        remainder.negative = SIGNED && self.negative;
        quotient.normalize();
        remainder.normalize();
        (quotient, remainder)
    }

    fn div_value(&mut self, rhs: &Self) {
        *self = self.divmod(rhs).0;
    }

    fn rem_value(&mut self, rhs: &Self) {
        *self = self.divmod(rhs).1;
    }

    /// Shift `count` whole digits in from the least significant end.
    pub fn shift_digits_left(&mut self, count: usize) {
        if self.is_zero() || count == 0 {
            return;
        }
        let digits = self.digit_count();
        let mut out = vec![0; (digits + count).div_ceil(Self::DIGITS_PER_LIMB)];
        for i in 0..digits {
            Self::set_digit_raw(&mut out, i + count, self.digit(i));
        }
        self.limbs = out;
        self.normalize();
    }

    /// Drop the `count` least significant digits.
    pub fn shift_digits_right(&mut self, count: usize) {
        let digits = self.digit_count();
        if count >= digits {
            self.limbs.clear();
            self.limbs.push(0);
            self.negative = false;
            return;
        }
        if count == 0 {
            return;
        }
        let mut out = vec![0; (digits - count).div_ceil(Self::DIGITS_PER_LIMB)];
        for i in count..digits {
            Self::set_digit_raw(&mut out, i - count, self.digit(i));
        }
        self.limbs = out;
        self.normalize();
    }
}

impl<const BASE: u32, const SIGNED: bool> Ord for BigInt<BASE, SIGNED> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.mag_cmp(other),
            (true, true) => other.mag_cmp(self),
        }
    }
}

impl<const BASE: u32, const SIGNED: bool> PartialOrd for BigInt<BASE, SIGNED> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const BASE: u32, const SIGNED: bool> Neg for BigInt<BASE, SIGNED> {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.negate();
        self
    }
}

impl<const BASE: u32, const SIGNED: bool> Neg for &BigInt<BASE, SIGNED> {
    type Output = BigInt<BASE, SIGNED>;

    fn neg(self) -> BigInt<BASE, SIGNED> {
        -self.clone()
    }
}

/// Generate the owned/borrowed/assigning operator impls around one
/// in-place method.
macro_rules! bigint_arith_impls {
    ($trait:ident, $op:ident, $trait_assign:ident, $op_assign:ident, $method:ident) => {
        impl<const BASE: u32, const SIGNED: bool> $trait for BigInt<BASE, SIGNED> {
            type Output = Self;

            fn $op(mut self, rhs: Self) -> Self {
                self.$method(&rhs);
                self
            }
        }

        impl<const BASE: u32, const SIGNED: bool> $trait<&Self> for BigInt<BASE, SIGNED> {
            type Output = Self;

            fn $op(mut self, rhs: &Self) -> Self {
                self.$method(rhs);
                self
            }
        }

        impl<const BASE: u32, const SIGNED: bool> $trait<BigInt<BASE, SIGNED>>
            for &BigInt<BASE, SIGNED>
        {
            type Output = BigInt<BASE, SIGNED>;

            fn $op(self, rhs: BigInt<BASE, SIGNED>) -> BigInt<BASE, SIGNED> {
                let mut out = self.clone();
                out.$method(&rhs);
                out
            }
        }

        impl<const BASE: u32, const SIGNED: bool> $trait<&BigInt<BASE, SIGNED>>
            for &BigInt<BASE, SIGNED>
        {
            type Output = BigInt<BASE, SIGNED>;

            fn $op(self, rhs: &BigInt<BASE, SIGNED>) -> BigInt<BASE, SIGNED> {
                let mut out = self.clone();
                out.$method(rhs);
                out
            }
        }

        impl<const BASE: u32, const SIGNED: bool> $trait_assign for BigInt<BASE, SIGNED> {
            fn $op_assign(&mut self, rhs: Self) {
                self.$method(&rhs);
            }
        }

        impl<const BASE: u32, const SIGNED: bool> $trait_assign<&Self> for BigInt<BASE, SIGNED> {
            fn $op_assign(&mut self, rhs: &Self) {
                self.$method(rhs);
            }
        }

        impl<const BASE: u32, const SIGNED: bool> $trait<Limb> for BigInt<BASE, SIGNED> {
            type Output = Self;

            fn $op(mut self, rhs: Limb) -> Self {
                self.$method(&Self::from(rhs));
                self
            }
        }

        impl<const BASE: u32, const SIGNED: bool> $trait_assign<Limb> for BigInt<BASE, SIGNED> {
            fn $op_assign(&mut self, rhs: Limb) {
                self.$method(&Self::from(rhs));
            }
        }
    };
}

bigint_arith_impls!(Add, add, AddAssign, add_assign, add_value);
bigint_arith_impls!(Sub, sub, SubAssign, sub_assign, sub_value);
bigint_arith_impls!(Mul, mul, MulAssign, mul_assign, mul_value);
bigint_arith_impls!(Div, div, DivAssign, div_assign, div_value);
bigint_arith_impls!(Rem, rem, RemAssign, rem_assign, rem_value);

macro_rules! bigint_shift_impls {
    ($trait:ident, $op:ident, $trait_assign:ident, $op_assign:ident, $method:ident) => {
        impl<const BASE: u32, const SIGNED: bool> $trait<usize> for BigInt<BASE, SIGNED> {
            type Output = Self;

            fn $op(mut self, count: usize) -> Self {
                self.$method(count);
                self
            }
        }

        impl<const BASE: u32, const SIGNED: bool> $trait<usize> for &BigInt<BASE, SIGNED> {
            type Output = BigInt<BASE, SIGNED>;

            fn $op(self, count: usize) -> BigInt<BASE, SIGNED> {
                let mut out = self.clone();
                out.$method(count);
                out
            }
        }

        impl<const BASE: u32, const SIGNED: bool> $trait_assign<usize> for BigInt<BASE, SIGNED> {
            fn $op_assign(&mut self, count: usize) {
                self.$method(count);
            }
        }
    };
}

bigint_shift_impls!(Shl, shl, ShlAssign, shl_assign, shift_digits_left);
bigint_shift_impls!(Shr, shr, ShrAssign, shr_assign, shift_digits_right);
