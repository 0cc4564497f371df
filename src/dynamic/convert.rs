//! Conversions in and out of [`BigInt`]: native integers, fixed-width
//! values, other bases.
//!
//! Everything funnels through the binary-word form of the magnitude
//! (32-bit words, least significant first). For packed bases that form
//! is the limb sequence itself; for super-digit bases it is produced
//! and consumed by Horner evaluation, one limb per multiply-and-add.

use crate::fixed::FixedInt;
use crate::limb::{is_packed_base, Limb, Wide, LIMB_BITS};

use super::BigInt;

macro_rules! impl_from_unsigned {
    ($($uX:ty),*) => {$(
        impl<const BASE: u32, const SIGNED: bool> From<$uX> for BigInt<BASE, SIGNED> {
            fn from(value: $uX) -> Self {
                let mut out = Self::new();
                out.limbs.clear();
                let mut value = value as u128;
                loop {
                    out.limbs.push((value % Self::RADIX as u128) as Limb);
                    value /= Self::RADIX as u128;
                    if value == 0 {
                        break;
                    }
                }
                out
            }
        }
    )*};
}

macro_rules! impl_from_signed {
    ($($iX:ty),*) => {$(
        impl<const BASE: u32, const SIGNED: bool> From<$iX> for BigInt<BASE, SIGNED> {
            fn from(value: $iX) -> Self {
                let mut out = Self::from(value.unsigned_abs() as u128);
                if value < 0 {
                    out.negate();
                }
                out
            }
        }
    )*};
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);
impl_from_signed!(i8, i16, i32, i64, i128, isize);

impl<const BASE: u32, const SIGNED: bool> BigInt<BASE, SIGNED> {
    /// The magnitude as binary words. A straight copy for packed bases,
    /// Horner evaluation of the limbs otherwise.
    pub(crate) fn to_binary_words(&self) -> Vec<Limb> {
        if is_packed_base(BASE) {
            return self.limbs.clone();
        }
        let mut words = BigInt::<16, false>::new();
        for &limb in self.limbs.iter().rev() {
            words.mag_mul_small(Self::RADIX, limb as Wide);
        }
        words.limbs
    }

    /// Rebuild a magnitude from binary words; the inverse of
    /// [`Self::to_binary_words`]. The result is non-negative.
    pub(crate) fn from_binary_words(words: &[Limb]) -> Self {
        let mut out = Self::new();
        if is_packed_base(BASE) {
            out.limbs.clear();
            out.limbs.extend_from_slice(words);
            if out.limbs.is_empty() {
                out.limbs.push(0);
            }
            out.remove_empty_back();
            return out;
        }
        for &word in words.iter().rev() {
            out.mag_mul_small(1 << LIMB_BITS, word as Wide);
        }
        out
    }

    /// Re-express the same value in another base. Limbs copy straight
    /// across when the limb radices match; otherwise the source limbs
    /// are folded most significant first, each step one multiply by the
    /// source limb radix.
    pub fn rebase<const B2: u32, const S2: bool>(&self) -> BigInt<B2, S2> {
        let mut out = BigInt::<B2, S2>::new();
        if Self::RADIX == BigInt::<B2, S2>::RADIX {
            out.limbs = self.limbs.clone();
        } else {
            for &limb in self.limbs.iter().rev() {
                out.mag_mul_small(Self::RADIX, limb as Wide);
            }
        }
        if self.negative {
            out.negate();
        }
        out.normalize();
        out
    }
}

impl<
        const BASE: u32,
        const SIGNED: bool,
        const BITS: usize,
        const LIMBS: usize,
        const FSIGNED: bool,
    > From<&FixedInt<BITS, LIMBS, FSIGNED>> for BigInt<BASE, SIGNED>
{
    fn from(value: &FixedInt<BITS, LIMBS, FSIGNED>) -> Self {
        let mut out = Self::from_binary_words(&value.magnitude_limbs());
        if value.is_negative() {
            out.negate();
        }
        out
    }
}

impl<
        const BASE: u32,
        const SIGNED: bool,
        const BITS: usize,
        const LIMBS: usize,
        const FSIGNED: bool,
    > From<FixedInt<BITS, LIMBS, FSIGNED>> for BigInt<BASE, SIGNED>
{
    fn from(value: FixedInt<BITS, LIMBS, FSIGNED>) -> Self {
        Self::from(&value)
    }
}

#[cfg(test)]
mod tests {
    use crate::dynamic::BigInt;
    use crate::fixed::{I64, U64};

    type Decimal = BigInt<10, true>;
    type Hex = BigInt<16, false>;

    #[test]
    fn test_from_native() {
        assert_eq!(Decimal::from(0u32).limbs(), &[0]);
        assert_eq!(Decimal::from(123u32).limbs(), &[123]);
        assert_eq!(Decimal::from(1_000_000_000u64).limbs(), &[0, 1]);
        assert_eq!(Decimal::from(-42i32).to_string(), "-42");
        assert_eq!(Hex::from(u64::MAX).limbs(), &[u32::MAX, u32::MAX]);
        assert_eq!(
            Decimal::from(u128::MAX).to_string(),
            "340282366920938463463374607431768211455"
        );
    }

    #[test]
    fn test_binary_words_round_trip() {
        let x: Decimal = "123456789012345678901".parse().unwrap();
        let words = x.to_binary_words();
        let back = Decimal::from_binary_words(&words);
        assert_eq!(back.to_string(), "123456789012345678901");

        // packed bases pass limbs straight through
        let h: Hex = "0xdeadbeef12345678".parse().unwrap();
        assert_eq!(h.to_binary_words(), vec![0x1234_5678, 0xdead_beef]);
    }

    #[test]
    fn test_rebase() {
        let d: Decimal = "255".parse().unwrap();
        let h: Hex = d.rebase();
        assert_eq!(h.hex_string(), "0xff");
        assert_eq!(h, "0xFF".parse().unwrap());

        let back: Decimal = h.rebase();
        assert_eq!(back.to_string(), "255");

        // sign carries over, or drops into an unsigned target
        let n: Decimal = "-1000".parse().unwrap();
        let b2: BigInt<2, true> = n.rebase();
        assert_eq!(b2.binary_string(), "-0b1111101000");
        let u: BigInt<16, false> = n.rebase();
        assert!(!u.is_negative());

        // both packed: straight limb copy
        let h2: BigInt<2, false> = "0b101".parse().unwrap();
        let h16: BigInt<16, false> = h2.rebase();
        assert_eq!(h16.to_string(), "5");
    }

    #[test]
    fn test_rebase_large_round_trip() {
        let src: Decimal = "987654321098765432109876543210".parse().unwrap();
        let via: BigInt<7, true> = src.rebase();
        let back: Decimal = via.rebase();
        assert_eq!(back, src);
    }

    #[test]
    fn test_from_fixed() {
        let x = U64::from(0xdead_beefu64);
        let h = Hex::from(&x);
        assert_eq!(h.hex_string(), "0xdeadbeef");

        let n = I64::from(-12345i64);
        let d = Decimal::from(&n);
        assert_eq!(d.to_string(), "-12345");

        // unsigned target keeps the magnitude only
        let u = Hex::from(&n);
        assert_eq!(u.to_string(), "12345");
    }
}
