//! Multi-precision integers over 32-bit limbs, with no bignum dependency.
//!
//! Two sibling value types share one algorithmic vocabulary:
//! - [`FixedInt`]: a compile-time fixed-width two's-complement integer.
//! - [`BigInt`]: a growable sign-magnitude integer in an arbitrary digit
//!   base from 2 to 64.

pub mod codec;
pub mod dynamic;
pub mod fixed;
pub mod limb;
pub mod rand;

pub use dynamic::BigInt;
pub use fixed::FixedInt;
