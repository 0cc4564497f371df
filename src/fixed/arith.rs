use std::cmp::Ordering;
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div, DivAssign,
    Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
};

use crate::limb::{borrowing_sub, carrying_add, carrying_mul, significant_bit, Limb, LIMB_BITS};

use super::FixedInt;

impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> FixedInt<BITS, LIMBS, SIGNED> {
    /// Ripple-carry addition, wrapping at `BITS`. Returns the carry out
    /// of bit `BITS` (for signed types: whether the signed result
    /// overflowed).
    pub fn overflowing_add(&mut self, rhs: &Self) -> bool {
        let lhs_negative = self.is_negative();
        let rhs_negative = rhs.is_negative();

        let mut carry = false;
        for (l, r) in self.limbs.iter_mut().zip(rhs.limbs.iter()) {
            let (sum, overflow) = carrying_add(*l, *r, carry);
            *l = sum;
            carry = overflow;
        }

        let overflow = if SIGNED {
            // same-sign operands whose sum lands on the other side
            let top = self.limbs[LIMBS - 1] & Self::TOP_MASK;
            let sum_negative = top >> (Self::TOP_BITS - 1) == 1;
            lhs_negative == rhs_negative && sum_negative != lhs_negative
        } else if Self::TOP_BITS == LIMB_BITS as u32 {
            carry
        } else {
            self.limbs[LIMBS - 1] >> Self::TOP_BITS & 1 == 1
        };
        self.canonicalize();
        overflow
    }

    pub fn wrapping_add(&mut self, rhs: &Self) {
        self.overflowing_add(rhs);
    }

    /// Borrow-propagating subtraction, wrapping at `BITS`. Returns the
    /// borrow out of bit `BITS` (signed: whether the result overflowed).
    pub fn overflowing_sub(&mut self, rhs: &Self) -> bool {
        let lhs_negative = self.is_negative();
        let rhs_negative = rhs.is_negative();

        let mut borrow = false;
        for (l, r) in self.limbs.iter_mut().zip(rhs.limbs.iter()) {
            let (diff, underflow) = borrowing_sub(*l, *r, borrow);
            *l = diff;
            borrow = underflow;
        }

        let overflow = if SIGNED {
            // differing-sign operands whose difference lands on the
            // subtrahend's side
            let top = self.limbs[LIMBS - 1] & Self::TOP_MASK;
            let diff_negative = top >> (Self::TOP_BITS - 1) == 1;
            lhs_negative != rhs_negative && diff_negative != lhs_negative
        } else {
            borrow
        };
        self.canonicalize();
        overflow
    }

    pub fn wrapping_sub(&mut self, rhs: &Self) {
        self.overflowing_sub(rhs);
    }

    /// Two's-complement negation in place.
    pub fn negate(&mut self) {
        let mut carry = true;
        for l in self.limbs.iter_mut() {
            let (sum, overflow) = carrying_add(!*l, 0, carry);
            *l = sum;
            carry = overflow;
        }
        self.canonicalize();
    }

    /// Schoolbook long multiplication truncated to `BITS`, which is
    /// exactly two's-complement wrapping for signed operands too.
    pub fn wrapping_mul(&mut self, rhs: &Self) {
        let mut out: [Limb; LIMBS] = [0; LIMBS];

        for (i, r) in rhs.limbs.iter().enumerate() {
            let mut carry = 0;
            for (l, o) in self.limbs.iter().zip(out.iter_mut().skip(i)) {
                let (prod, next_carry) = carrying_mul(*r, *l, carry);
                let (new_limb, add_carry) = o.overflowing_add(prod);
                carry = next_carry + Limb::from(add_carry);
                *o = new_limb;
            }
        }

        self.limbs = out;
        self.canonicalize();
    }

    /// Quotient and remainder by digit-skipping restoring division.
    ///
    /// Signs follow C-style truncation toward zero: the quotient is
    /// negative when operand signs differ, the remainder takes the
    /// dividend's sign. A zero divisor yields `(ZERO, ZERO)` rather
    /// than panicking.
    pub fn divmod(&self, rhs: &Self) -> (Self, Self) {
        self.divmod_with(rhs, udivmod_quick_raw)
    }

    /// The canonical bit-by-bit restoring division.
    ///
    /// Same contract as [`divmod`]; kept as the oracle the optimized
    /// variant is verified against.
    ///
    /// [`divmod`]: Self::divmod
    pub fn divmod_reference(&self, rhs: &Self) -> (Self, Self) {
        self.divmod_with(rhs, udivmod_raw)
    }

    #[allow(clippy::type_complexity)]
    fn divmod_with(
        &self,
        rhs: &Self,
        udivmod: fn(&[Limb; LIMBS], &[Limb; LIMBS]) -> ([Limb; LIMBS], [Limb; LIMBS]),
    ) -> (Self, Self) {
        if rhs.is_zero() {
            return (Self::ZERO, Self::ZERO);
        }

        let quotient_negative = self.is_negative() != rhs.is_negative();
        let remainder_negative = self.is_negative();

        let (q_raw, r_raw) = udivmod(&self.magnitude_limbs(), &rhs.magnitude_limbs());

        let mut quotient = Self { limbs: q_raw };
        quotient.canonicalize();
        if quotient_negative {
            quotient.negate();
        }

        let mut remainder = Self { limbs: r_raw };
        remainder.canonicalize();
        if remainder_negative {
            remainder.negate();
        }

        (quotient, remainder)
    }

    /// Left shift by an arbitrary bit count; shifting by `BITS` or more
    /// clears the value.
    pub fn shift_left(&mut self, n: u32) {
        if n as usize >= BITS {
            *self = Self::ZERO;
            return;
        }

        let limb_shift = n as usize / LIMB_BITS;
        let bit_shift = n % LIMB_BITS as u32;

        // word aligned shifts are a straight copy
        if bit_shift == 0 {
            self.limbs.copy_within(0..LIMBS - limb_shift, limb_shift);
        } else {
            for i in (limb_shift + 1..LIMBS).rev() {
                let upper = self.limbs[i - limb_shift] << bit_shift;
                let lower = self.limbs[i - limb_shift - 1] >> (LIMB_BITS as u32 - bit_shift);
                self.limbs[i] = upper | lower;
            }
            self.limbs[limb_shift] = self.limbs[0] << bit_shift;
        }

        for l in self.limbs.iter_mut().take(limb_shift) {
            *l = 0;
        }
        self.canonicalize();
    }

    /// Right shift by an arbitrary bit count; signed types sign-extend
    /// the vacated high bits. Shifting by `BITS` or more leaves zero
    /// (or minus one for a negative signed value).
    pub fn shift_right(&mut self, n: u32) {
        let fill = if self.is_negative() { Limb::MAX } else { 0 };

        if n as usize >= BITS {
            self.limbs.fill(fill);
            self.canonicalize();
            return;
        }

        let limb_shift = n as usize / LIMB_BITS;
        let bit_shift = n % LIMB_BITS as u32;

        if bit_shift == 0 {
            self.limbs.copy_within(limb_shift..LIMBS, 0);
        } else {
            for i in 0..(LIMBS - limb_shift - 1) {
                let upper = self.limbs[limb_shift + i + 1] << (LIMB_BITS as u32 - bit_shift);
                let lower = self.limbs[limb_shift + i] >> bit_shift;
                self.limbs[i] = upper | lower;
            }

            let upper = fill << (LIMB_BITS as u32 - bit_shift);
            let lower = self.limbs[LIMBS - 1] >> bit_shift;
            self.limbs[LIMBS - limb_shift - 1] = upper | lower;
        }

        for i in 0..limb_shift {
            self.limbs[LIMBS - i - 1] = fill;
        }
        self.canonicalize();
    }

    /// Right shift without sign fill, used for magnitude bit windows.
    pub(crate) fn logical_shr(&mut self, n: u32) {
        if n as usize >= BITS {
            *self = Self::ZERO;
            return;
        }

        let limb_shift = n as usize / LIMB_BITS;
        let bit_shift = n % LIMB_BITS as u32;

        if bit_shift == 0 {
            self.limbs.copy_within(limb_shift..LIMBS, 0);
        } else {
            for i in 0..(LIMBS - limb_shift - 1) {
                let upper = self.limbs[limb_shift + i + 1] << (LIMB_BITS as u32 - bit_shift);
                let lower = self.limbs[limb_shift + i] >> bit_shift;
                self.limbs[i] = upper | lower;
            }
            self.limbs[LIMBS - limb_shift - 1] = self.limbs[LIMBS - 1] >> bit_shift;
        }

        for i in 0..limb_shift {
            self.limbs[LIMBS - i - 1] = 0;
        }
    }

    pub(crate) fn bitwise_and(&mut self, rhs: &Self) {
        for (l, r) in self.limbs.iter_mut().zip(rhs.limbs.iter()) {
            *l &= *r;
        }
    }

    pub(crate) fn bitwise_or(&mut self, rhs: &Self) {
        for (l, r) in self.limbs.iter_mut().zip(rhs.limbs.iter()) {
            *l |= *r;
        }
    }

    pub(crate) fn bitwise_xor(&mut self, rhs: &Self) {
        for (l, r) in self.limbs.iter_mut().zip(rhs.limbs.iter()) {
            *l ^= *r;
        }
    }

    fn quotient_assign(&mut self, rhs: &Self) {
        *self = self.divmod(rhs).0;
    }

    fn remainder_assign(&mut self, rhs: &Self) {
        *self = self.divmod(rhs).1;
    }
}

/// One-based index of the highest set bit of a raw magnitude.
fn raw_bit_length<const L: usize>(a: &[Limb; L]) -> u32 {
    for (i, limb) in a.iter().enumerate().rev() {
        if *limb != 0 {
            return i as u32 * LIMB_BITS as u32 + significant_bit(*limb);
        }
    }
    0
}

fn raw_cmp<const L: usize>(a: &[Limb; L], b: &[Limb; L]) -> Ordering {
    a.iter()
        .zip(b.iter())
        .rev()
        .map(|(x, y)| x.cmp(y))
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

fn raw_test_bit<const L: usize>(a: &[Limb; L], index: u32) -> bool {
    a[index as usize / LIMB_BITS] >> (index as usize % LIMB_BITS) & 1 == 1
}

fn raw_set_bit<const L: usize>(a: &mut [Limb; L], index: u32) {
    a[index as usize / LIMB_BITS] |= 1 << (index as usize % LIMB_BITS);
}

/// Shift left one bit, returning the carry out of the array.
fn raw_shl1<const L: usize>(a: &mut [Limb; L]) -> bool {
    let mut carry = false;
    for limb in a.iter_mut() {
        let out = *limb >> (LIMB_BITS - 1) == 1;
        *limb = (*limb << 1) | carry as Limb;
        carry = out;
    }
    carry
}

/// Shift left by up to an array's width of bits. Callers guarantee no
/// bits are lost.
fn raw_shl<const L: usize>(a: &mut [Limb; L], n: u32) {
    let limb_shift = n as usize / LIMB_BITS;
    let bit_shift = n % LIMB_BITS as u32;
    if limb_shift >= L {
        a.fill(0);
        return;
    }

    if bit_shift == 0 {
        a.copy_within(0..L - limb_shift, limb_shift);
    } else {
        for i in (limb_shift + 1..L).rev() {
            let upper = a[i - limb_shift] << bit_shift;
            let lower = a[i - limb_shift - 1] >> (LIMB_BITS as u32 - bit_shift);
            a[i] = upper | lower;
        }
        a[limb_shift] = a[0] << bit_shift;
    }

    for l in a.iter_mut().take(limb_shift) {
        *l = 0;
    }
}

/// Wrapping subtraction of raw magnitudes; the final borrow is dropped
/// deliberately (see the overflow note in the division loop).
fn raw_sub_assign<const L: usize>(a: &mut [Limb; L], b: &[Limb; L]) {
    let mut borrow = false;
    for (l, r) in a.iter_mut().zip(b.iter()) {
        let (diff, underflow) = borrowing_sub(*l, *r, borrow);
        *l = diff;
        borrow = underflow;
    }
}

/// Canonical bit-by-bit restoring division of raw magnitudes.
///
/// Scans the dividend from its most significant bit, shifting the bit
/// into a running remainder and subtracting the divisor whenever the
/// remainder reaches it. The divisor must be non-zero.
///
/// The remainder accumulator can momentarily exceed the array width by
/// exactly one bit (when the divisor occupies the full width); that
/// carry-out always means "remainder >= divisor", and the wrapped
/// subtraction still produces the exact in-range difference.
fn udivmod_raw<const L: usize>(a: &[Limb; L], b: &[Limb; L]) -> ([Limb; L], [Limb; L]) {
    let mut quotient = [0; L];
    let mut remainder = [0; L];

    let dividend_bits = raw_bit_length(a);
    let divisor_bits = raw_bit_length(b);
    debug_assert_ne!(divisor_bits, 0);
    if dividend_bits < divisor_bits {
        return (quotient, *a);
    }

    for i in (0..dividend_bits).rev() {
        let carry = raw_shl1(&mut remainder);
        if raw_test_bit(a, i) {
            remainder[0] |= 1;
        }
        if carry || raw_cmp(&remainder, b) != Ordering::Less {
            raw_sub_assign(&mut remainder, b);
            raw_set_bit(&mut quotient, i);
        }
    }

    (quotient, remainder)
}

/// Digit-skipping restoring division, externally identical to
/// [`udivmod_raw`].
///
/// Whenever the running remainder is short enough that shifting in the
/// next `k` dividend bits cannot reach the divisor, the block of source
/// bits is copied in directly and the compare/subtract steps for those
/// positions are skipped (their quotient bits are zero by construction).
fn udivmod_quick_raw<const L: usize>(a: &[Limb; L], b: &[Limb; L]) -> ([Limb; L], [Limb; L]) {
    let mut quotient = [0; L];
    let mut remainder = [0; L];

    let dividend_bits = raw_bit_length(a);
    let divisor_bits = raw_bit_length(b);
    debug_assert_ne!(divisor_bits, 0);
    if dividend_bits < divisor_bits {
        return (quotient, *a);
    }

    let mut i = dividend_bits;
    while i > 0 {
        let gap = (divisor_bits - 1).saturating_sub(raw_bit_length(&remainder));
        if gap > 0 {
            // remainder * 2^step + anything < divisor: copy the block
            let step = gap.min(i);
            raw_shl(&mut remainder, step);
            for k in 0..step {
                if raw_test_bit(a, i - 1 - k) {
                    raw_set_bit(&mut remainder, step - 1 - k);
                }
            }
            i -= step;
            continue;
        }

        i -= 1;
        let carry = raw_shl1(&mut remainder);
        if raw_test_bit(a, i) {
            remainder[0] |= 1;
        }
        if carry || raw_cmp(&remainder, b) != Ordering::Less {
            raw_sub_assign(&mut remainder, b);
            raw_set_bit(&mut quotient, i);
        }
    }

    (quotient, remainder)
}

impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> PartialOrd
    for FixedInt<BITS, LIMBS, SIGNED>
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> Ord
    for FixedInt<BITS, LIMBS, SIGNED>
{
    fn cmp(&self, other: &Self) -> Ordering {
        // sign first; equal signs compare as unsigned limbs thanks to
        // the canonical sign extension
        match (self.is_negative(), other.is_negative()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => raw_cmp(&self.limbs, &other.limbs),
        }
    }
}

impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> Neg
    for FixedInt<BITS, LIMBS, SIGNED>
{
    type Output = Self;
    fn neg(mut self) -> Self::Output {
        self.negate();
        self
    }
}

impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> Neg
    for &FixedInt<BITS, LIMBS, SIGNED>
{
    type Output = FixedInt<BITS, LIMBS, SIGNED>;
    fn neg(self) -> Self::Output {
        -*self
    }
}

impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> Not
    for FixedInt<BITS, LIMBS, SIGNED>
{
    type Output = Self;
    fn not(self) -> Self::Output {
        let mut out = self;
        for l in out.limbs.iter_mut() {
            *l = !*l;
        }
        out.canonicalize();
        out
    }
}

macro_rules! fixed_arith_impls {
    ($trait:ident, $op:ident, $trait_assign:ident, $op_assign:ident, $method:ident) => {
        impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> $trait
            for FixedInt<BITS, LIMBS, SIGNED>
        {
            type Output = Self;

            fn $op(self, rhs: Self) -> Self::Output {
                let mut out = self;
                out.$method(&rhs);
                out
            }
        }

        impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> $trait<&Self>
            for FixedInt<BITS, LIMBS, SIGNED>
        {
            type Output = Self;

            fn $op(self, rhs: &Self) -> Self::Output {
                let mut out = self;
                out.$method(rhs);
                out
            }
        }

        impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool>
            $trait<FixedInt<BITS, LIMBS, SIGNED>> for &FixedInt<BITS, LIMBS, SIGNED>
        {
            type Output = FixedInt<BITS, LIMBS, SIGNED>;

            fn $op(self, rhs: FixedInt<BITS, LIMBS, SIGNED>) -> Self::Output {
                let mut out = *self;
                out.$method(&rhs);
                out
            }
        }

        impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool>
            $trait<&FixedInt<BITS, LIMBS, SIGNED>> for &FixedInt<BITS, LIMBS, SIGNED>
        {
            type Output = FixedInt<BITS, LIMBS, SIGNED>;

            fn $op(self, rhs: &FixedInt<BITS, LIMBS, SIGNED>) -> Self::Output {
                let mut out = *self;
                out.$method(rhs);
                out
            }
        }

        impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> $trait_assign
            for FixedInt<BITS, LIMBS, SIGNED>
        {
            fn $op_assign(&mut self, rhs: Self) {
                self.$method(&rhs);
            }
        }

        impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> $trait_assign<&Self>
            for FixedInt<BITS, LIMBS, SIGNED>
        {
            fn $op_assign(&mut self, rhs: &Self) {
                self.$method(rhs);
            }
        }

        impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> $trait<Limb>
            for FixedInt<BITS, LIMBS, SIGNED>
        {
            type Output = Self;

            fn $op(self, rhs: Limb) -> Self::Output {
                let mut out = self;
                out.$method(&Self::from(rhs));
                out
            }
        }

        impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> $trait_assign<Limb>
            for FixedInt<BITS, LIMBS, SIGNED>
        {
            fn $op_assign(&mut self, rhs: Limb) {
                self.$method(&Self::from(rhs));
            }
        }
    };
}

macro_rules! fixed_shift_impls {
    ($trait:ident, $op:ident, $trait_assign:ident, $op_assign:ident, $method:ident) => {
        impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> $trait<u32>
            for FixedInt<BITS, LIMBS, SIGNED>
        {
            type Output = Self;

            fn $op(self, rhs: u32) -> Self::Output {
                let mut out = self;
                out.$method(rhs);
                out
            }
        }

        impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> $trait<u32>
            for &FixedInt<BITS, LIMBS, SIGNED>
        {
            type Output = FixedInt<BITS, LIMBS, SIGNED>;

            fn $op(self, rhs: u32) -> Self::Output {
                let mut out = *self;
                out.$method(rhs);
                out
            }
        }

        impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> $trait_assign<u32>
            for FixedInt<BITS, LIMBS, SIGNED>
        {
            fn $op_assign(&mut self, rhs: u32) {
                self.$method(rhs);
            }
        }
    };
}

fixed_arith_impls!(Add, add, AddAssign, add_assign, wrapping_add);
fixed_arith_impls!(Sub, sub, SubAssign, sub_assign, wrapping_sub);
fixed_arith_impls!(Mul, mul, MulAssign, mul_assign, wrapping_mul);
fixed_arith_impls!(Div, div, DivAssign, div_assign, quotient_assign);
fixed_arith_impls!(Rem, rem, RemAssign, rem_assign, remainder_assign);
fixed_arith_impls!(BitAnd, bitand, BitAndAssign, bitand_assign, bitwise_and);
fixed_arith_impls!(BitOr, bitor, BitOrAssign, bitor_assign, bitwise_or);
fixed_arith_impls!(BitXor, bitxor, BitXorAssign, bitxor_assign, bitwise_xor);
fixed_shift_impls!(Shl, shl, ShlAssign, shl_assign, shift_left);
fixed_shift_impls!(Shr, shr, ShrAssign, shr_assign, shift_right);
