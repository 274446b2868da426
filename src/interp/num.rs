use crate::common::*;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Scalar produced by evaluation. Rolled results stay integral; average
/// mode introduces fractional values.
#[derive(Debug, Copy, Clone)]
pub enum Number {
    Int(Int),
    Float(Float),
}

impl Number {
    pub(crate) const ZERO: Self = Self::Int(0);

    pub fn as_int(self) -> Int {
        match self {
            Self::Int(x) => x,
            Self::Float(x) => x as Int,
        }
    }

    pub fn as_float(self) -> Float {
        match self {
            Self::Int(x) => x as Float,
            Self::Float(x) => x,
        }
    }

    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    pub(crate) fn is_truthy(self) -> bool {
        !self.is_zero()
    }

    /// Truncating division: plain `/` on two ints, `trunc` of the float
    /// quotient otherwise. The caller guards against a zero divisor.
    pub(crate) fn div_trunc(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Int(x), Self::Int(y)) => Self::Int(x / y),
            (x, y) => Self::Float((x.as_float() / y.as_float()).trunc()),
        }
    }
}

impl Neg for Number {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Int(x) => Self::Int(-x),
            Self::Float(x) => Self::Float(-x),
        }
    }
}

macro_rules! num_impl_bin_op {
    ($Name:ident, $fn_name:ident) => {
        impl $Name for Number {
            type Output = Self;

            fn $fn_name(self, rhs: Self) -> Self::Output {
                match (self, rhs) {
                    (Self::Int(x), Self::Int(y)) => Self::Int(x.$fn_name(y)),
                    (x, y) => Self::Float(x.as_float().$fn_name(y.as_float())),
                }
            }
        }
    };
}

num_impl_bin_op!(Add, add);
num_impl_bin_op!(Sub, sub);
num_impl_bin_op!(Mul, mul);

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.as_float().eq(&other.as_float())
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.as_float().partial_cmp(&other.as_float())
    }
}

impl From<Int> for Number {
    fn from(x: Int) -> Self {
        Self::Int(x)
    }
}

impl From<i32> for Number {
    fn from(x: i32) -> Self {
        Self::Int(x.into())
    }
}

impl From<Float> for Number {
    fn from(x: Float) -> Self {
        Self::Float(x)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(x) => fmt::Display::fmt(x, f),
            Self::Float(x) => fmt::Debug::fmt(x, f),
        }
    }
}
