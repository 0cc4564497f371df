use crate::dynamic::BigInt;
use crate::limb::{Limb, LIMB_BITS};

use super::FixedInt;

macro_rules! impl_from_unsigned {
    ($($uX:ty),*) => {$(
        impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> From<$uX>
            for FixedInt<BITS, LIMBS, SIGNED>
        {
            fn from(value: $uX) -> Self {
                let mut out = Self::ZERO;
                let mut value = value as u128;
                for limb in out.limbs.iter_mut() {
                    *limb = value as Limb;
                    value >>= LIMB_BITS;
                }
                out.canonicalize();
                out
            }
        }
    )*};
}

macro_rules! impl_from_signed {
    ($($iX:ty),*) => {$(
        impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> From<$iX>
            for FixedInt<BITS, LIMBS, SIGNED>
        {
            fn from(value: $iX) -> Self {
                let mut out = Self::ZERO;
                // arithmetic shift keeps the sign extension flowing
                let mut value = value as i128;
                for limb in out.limbs.iter_mut() {
                    *limb = value as Limb;
                    value >>= LIMB_BITS;
                }
                out.canonicalize();
                out
            }
        }
    )*};
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);
impl_from_signed!(i8, i16, i32, i64, i128, isize);

impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> FixedInt<BITS, LIMBS, SIGNED> {
    /// Truncate to 128 bits; narrower negative values arrive
    /// sign-extended, matching native `as` casts.
    pub fn to_u128(&self) -> u128 {
        let mut out = 0u128;
        for (i, limb) in self.limbs.iter().take(128 / LIMB_BITS).enumerate() {
            out |= (*limb as u128) << (i * LIMB_BITS);
        }
        if self.is_negative() && LIMBS * LIMB_BITS < 128 {
            out |= u128::MAX << (LIMBS * LIMB_BITS);
        }
        out
    }

    pub fn to_i128(&self) -> i128 {
        self.to_u128() as i128
    }

    pub fn to_u64(&self) -> u64 {
        self.to_u128() as u64
    }

    pub fn to_i64(&self) -> i64 {
        self.to_u128() as i64
    }

    pub fn to_u32(&self) -> u32 {
        self.to_u128() as u32
    }

    pub fn to_i32(&self) -> i32 {
        self.to_u128() as i32
    }

    /// Cast to another width/signedness: truncates downward, sign- or
    /// zero-extends upward. Mixed-width arithmetic is written as a
    /// `resize` to the wider operand followed by the same-width
    /// operation.
    pub fn resize<const B2: usize, const L2: usize, const S2: bool>(
        &self,
    ) -> FixedInt<B2, L2, S2> {
        let fill = if self.is_negative() { Limb::MAX } else { 0 };
        let mut out = FixedInt::<B2, L2, S2>::ZERO;
        for (i, limb) in out.limbs.iter_mut().enumerate() {
            *limb = self.limbs.get(i).copied().unwrap_or(fill);
        }
        out.canonicalize();
        out
    }
}

impl<
        const BITS: usize,
        const LIMBS: usize,
        const SIGNED: bool,
        const BASE: u32,
        const BSIGNED: bool,
    > From<&BigInt<BASE, BSIGNED>> for FixedInt<BITS, LIMBS, SIGNED>
{
    /// Re-express a dynamic integer as a fixed-width one, truncating at
    /// `BITS`. Goes through the binary-word form of the magnitude, so
    /// any source base is accepted.
    fn from(value: &BigInt<BASE, BSIGNED>) -> Self {
        let words = value.to_binary_words();
        let mut out = Self::ZERO;
        for (limb, word) in out.limbs.iter_mut().zip(words.iter()) {
            *limb = *word;
        }
        out.canonicalize();
        if value.is_negative() {
            out.negate();
        }
        out
    }
}

impl<
        const BITS: usize,
        const LIMBS: usize,
        const SIGNED: bool,
        const BASE: u32,
        const BSIGNED: bool,
    > From<BigInt<BASE, BSIGNED>> for FixedInt<BITS, LIMBS, SIGNED>
{
    fn from(value: BigInt<BASE, BSIGNED>) -> Self {
        Self::from(&value)
    }
}
