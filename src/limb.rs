//! Limb-level primitives shared by both integer types.
//!
//! A limb is one 32-bit storage word; the widening arithmetic goes
//! through 64 bits to capture carries.

/// One storage word of a multi-precision integer.
pub type Limb = u32;

/// The widening type used for per-limb carry arithmetic.
pub type Wide = u64;

/// Number of bits in a limb.
pub const LIMB_BITS: usize = Limb::BITS as usize;

// stable polyfills for the carrying/borrowing intrinsics
#[inline]
pub const fn carrying_add(x: Limb, y: Limb, carry: bool) -> (Limb, bool) {
    let (a, b) = x.overflowing_add(y);
    let (c, d) = a.overflowing_add(carry as Limb);
    (c, b != d)
}

#[inline]
pub const fn borrowing_sub(x: Limb, y: Limb, borrow: bool) -> (Limb, bool) {
    let (a, b) = x.overflowing_sub(y);
    let (c, d) = a.overflowing_sub(borrow as Limb);
    (c, b != d)
}

#[inline]
pub const fn carrying_mul(x: Limb, y: Limb, carry: Limb) -> (Limb, Limb) {
    // x * y + carry never overflows: (2^32-1)^2 + (2^32-1) < 2^64
    let wide = x as Wide * y as Wide + carry as Wide;
    (wide as Limb, (wide >> LIMB_BITS) as Limb)
}

/// The largest power of `base` that fits in a single limb.
///
/// Returns 0 when `base` is a power of two whose powers exactly fill a
/// limb (2, 4, 16, 256, 65536): the sentinel for pure binary packing,
/// where the effective limb radix is 2^32.
pub const fn base_max(base: u32) -> Limb {
    let mut power: Wide = 1;
    loop {
        let next = power * base as Wide;
        if next == 1 << LIMB_BITS {
            return 0;
        }
        if next > 1 << LIMB_BITS {
            return power as Limb;
        }
        power = next;
    }
}

/// How many base-`base` digits fit in a single limb.
pub const fn base_max_log(base: u32) -> u32 {
    let mut power: Wide = 1;
    let mut digits = 0;
    loop {
        let next = power * base as Wide;
        if next > 1 << LIMB_BITS {
            return digits;
        }
        digits += 1;
        if next == 1 << LIMB_BITS {
            return digits;
        }
        power = next;
    }
}

/// Whether `base` packs binary: a power of two that exactly fills a limb.
pub const fn is_packed_base(base: u32) -> bool {
    base_max(base) == 0
}

/// The value of one full limb in base `base`, widened.
///
/// 2^32 for packed bases, `base^base_max_log(base)` otherwise.
pub const fn limb_radix(base: u32) -> Wide {
    if is_packed_base(base) {
        1 << LIMB_BITS
    } else {
        base_max(base) as Wide
    }
}

/// One-based index of the highest set bit; 0 for a zero word.
///
/// Callers must special-case true zero separately from "one significant
/// bit".
pub const fn significant_bit(word: Limb) -> u32 {
    Limb::BITS - word.leading_zeros()
}
