//! Minimal complex number over any [`Real`].

use crate::Real;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Complex value: either a plane coordinate or an iterated orbit value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T: Real> Complex<T> {
    #[inline]
    pub fn new(re: T, im: T) -> Self {
        Self { re, im }
    }

    /// Additive identity
    #[inline]
    pub fn zero() -> Self {
        Self::new(T::ZERO, T::ZERO)
    }

    #[inline]
    pub fn from_f64_pair(re: f64, im: f64) -> Self {
        Self::new(T::from_f64(re), T::from_f64(im))
    }

    #[inline]
    pub fn to_f64_pair(&self) -> (f64, f64) {
        (self.re.to_f64(), self.im.to_f64())
    }

    /// |z|² without the square root.
    #[inline]
    pub fn norm_sq(&self) -> T {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    pub fn square(&self) -> Self {
        let re = self.re * self.re - self.im * self.im;
        let im = (self.re + self.re) * self.im;
        Self { re, im }
    }

    #[inline]
    pub fn scale(&self, factor: T) -> Self {
        Self::new(self.re * factor, self.im * factor)
    }

    pub fn is_finite(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

impl<T: Real> Add for Complex<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl<T: Real> Sub for Complex<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl<T: Real> Mul for Complex<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}
