//! Scalar abstraction for the orbit engine.
//!
//! The subdivider is written once against [`Real`] and instantiated for
//! whichever native float the target handles best. Everything else uses
//! standard Rust operators.

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Native floating point type usable by the interpolator and the subdivider.
pub trait Real:
    Copy
    + Debug
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;

    /// Convert from f64 (may round for narrower types)
    fn from_f64(value: f64) -> Self;

    /// Convert to f64 for statistics and comparisons against f64 limits
    fn to_f64(self) -> f64;

    fn abs(self) -> Self;

    fn is_finite(self) -> bool;
}

macro_rules! impl_real {
    ($t:ty) => {
        impl Real for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn abs(self) -> Self {
                <$t>::abs(self)
            }

            #[inline]
            fn is_finite(self) -> bool {
                <$t>::is_finite(self)
            }
        }
    };
}

impl_real!(f32);
impl_real!(f64);
