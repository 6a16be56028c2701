//! Big-number coordinates for viewport corners.
//!
//! The subdivider never sees these: corners are resolved here and converted
//! to native floats exactly once per render.

use crate::CoreError;
use dashu_base::Approximation;
use dashu_float::{DBig, FBig};
use serde::{Deserialize, Serialize};

/// Above this many mantissa bits the value is held as an `FBig`.
pub const NATIVE_PRECISION_BITS: usize = 64;

/// Floating point value with an explicit precision.
///
/// Stays an `f64` while `precision_bits <= 64`, switches to `FBig` beyond.
#[derive(Clone, Debug)]
pub struct BigFloat {
    repr: Repr,
    precision_bits: usize,
}

#[derive(Clone, Debug)]
enum Repr {
    Native(f64),
    Wide(FBig),
}

impl BigFloat {
    /// Create from f64 with explicit precision. Non-finite input becomes zero
    /// in wide mode.
    pub fn with_precision(value: f64, precision_bits: usize) -> Self {
        let repr = if precision_bits <= NATIVE_PRECISION_BITS {
            Repr::Native(value)
        } else {
            Repr::Wide(widen(value, precision_bits))
        };
        Self {
            repr,
            precision_bits,
        }
    }

    pub fn zero(precision_bits: usize) -> Self {
        Self::with_precision(0.0, precision_bits)
    }

    /// Parse a decimal string (e.g. `"-0.743643887037151"` or `"1e-400"`).
    pub fn from_string(text: &str, precision_bits: usize) -> Result<Self, CoreError> {
        let parse_error = |reason: String| CoreError::Parse {
            input: text.to_string(),
            reason,
        };

        if precision_bits <= NATIVE_PRECISION_BITS {
            let value = text
                .trim()
                .parse::<f64>()
                .map_err(|e| parse_error(e.to_string()))?;
            return Ok(Self::with_precision(value, precision_bits));
        }

        let decimal = text
            .trim()
            .parse::<DBig>()
            .map_err(|e| parse_error(e.to_string()))?;
        let binary = match decimal.with_base_and_precision::<2>(precision_bits) {
            Approximation::Exact(v) => v,
            Approximation::Inexact(v, _) => v,
        };
        Ok(Self {
            repr: Repr::Wide(binary.with_rounding::<dashu_float::round::mode::Zero>()),
            precision_bits,
        })
    }

    pub fn precision_bits(&self) -> usize {
        self.precision_bits
    }

    /// True when the value is held in arbitrary precision.
    pub fn is_wide(&self) -> bool {
        matches!(self.repr, Repr::Wide(_))
    }

    /// Round to the nearest f64.
    pub fn to_f64(&self) -> f64 {
        match &self.repr {
            Repr::Native(v) => *v,
            Repr::Wide(v) => v.to_f64().value(),
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a + b, |a, b| a + b)
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a - b, |a, b| a - b)
    }

    pub fn mul(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a * b, |a, b| a * b)
    }

    pub fn div(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a / b, |a, b| a / b)
    }

    /// Half of this value, same precision.
    pub fn half(&self) -> Self {
        self.div(&Self::with_precision(2.0, self.precision_bits))
    }

    fn combine(
        &self,
        other: &Self,
        native: impl Fn(f64, f64) -> f64,
        wide: impl Fn(&FBig, &FBig) -> FBig,
    ) -> Self {
        let precision_bits = self.precision_bits.max(other.precision_bits);
        let repr = match (&self.repr, &other.repr) {
            (Repr::Native(a), Repr::Native(b)) if precision_bits <= NATIVE_PRECISION_BITS => {
                Repr::Native(native(*a, *b))
            }
            _ => Repr::Wide(wide(
                &self.to_fbig(precision_bits),
                &other.to_fbig(precision_bits),
            )),
        };
        Self {
            repr,
            precision_bits,
        }
    }

    fn to_fbig(&self, precision_bits: usize) -> FBig {
        match &self.repr {
            Repr::Native(v) => widen(*v, precision_bits),
            Repr::Wide(v) => v.clone(),
        }
    }
}

fn widen(value: f64, precision_bits: usize) -> FBig {
    FBig::try_from(value)
        .unwrap_or(FBig::ZERO)
        .with_precision(precision_bits)
        .value()
}

impl PartialEq for BigFloat {
    fn eq(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Native(a), Repr::Native(b)) => a == b,
            _ => {
                let bits = self.precision_bits.max(other.precision_bits);
                self.to_fbig(bits) == other.to_fbig(bits)
            }
        }
    }
}

impl std::fmt::Display for BigFloat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.repr {
            Repr::Native(v) => write!(f, "{v}"),
            Repr::Wide(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct BigFloatWire {
    value: String,
    precision_bits: usize,
}

impl Serialize for BigFloat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        BigFloatWire {
            value: self.to_string(),
            precision_bits: self.precision_bits,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BigFloat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wire = BigFloatWire::deserialize(deserializer)?;
        let repr = if wire.precision_bits <= NATIVE_PRECISION_BITS {
            Repr::Native(wire.value.parse::<f64>().map_err(serde::de::Error::custom)?)
        } else {
            Repr::Wide(wire.value.parse::<FBig>().map_err(serde::de::Error::custom)?)
        };
        Ok(Self {
            repr,
            precision_bits: wire.precision_bits,
        })
    }
}
