//! Representation of numbers.
//!
//! Only two widths exist: `i64` integers and `f64` floats. Integer
//! arithmetic is checked; any operation mixing the two promotes to Float.

use std::cmp::Ordering;
use std::convert::TryFrom;
use std::{fmt, str};

use self::Number::*;
use super::Primitive;
use crate::sexp::Sexp;


#[derive(Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

#[derive(Debug)]
pub struct ParseNumberError(String);


macro_rules! checked_binop {
    ($name:ident, $checked:ident, $op:tt) => {
        /// Returns None on integer overflow.
        pub fn $name(self, other: Number) -> Option<Number> {
            match (self, other) {
                (Integer(a), Integer(b)) => a.$checked(b).map(Integer),
                (a, b) => Some(Float(a.as_float() $op b.as_float())),
            }
        }
    };
}

impl Number {
    checked_binop!(checked_add, checked_add, +);
    checked_binop!(checked_sub, checked_sub, -);
    checked_binop!(checked_mul, checked_mul, *);

    /// Division always produces a Float. Returns None when dividing by zero.
    pub fn checked_div(self, other: Number) -> Option<Number> {
        if other.is_zero() {
            return None;
        }
        Some(Float(self.as_float() / other.as_float()))
    }

    pub fn checked_neg(self) -> Option<Number> {
        match self {
            Integer(i) => i.checked_neg().map(Integer),
            Float(f) => Some(Float(-f)),
        }
    }

    pub fn checked_abs(self) -> Option<Number> {
        match self {
            Integer(i) => i.checked_abs().map(Integer),
            Float(f) => Some(Float(f.abs())),
        }
    }

    pub fn as_float(self) -> f64 {
        match self {
            Integer(i) => i as f64,
            Float(f) => f,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Integer(i) => i == 0,
            Float(f) => f == 0.0,
        }
    }

    /// Numeric comparison across variants; None only when a NaN is involved.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Integer(a), Integer(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_float().partial_cmp(&b.as_float()),
        }
    }

    /// Numeric equality, so that `1` equals `1.0`.
    pub fn num_eq(self, other: Number) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}


impl Default for Number {
    fn default() -> Self {
        Integer(0)
    }
}

impl str::FromStr for Number {
    type Err = ParseNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let integer = s.parse::<i64>();
        if let Ok(int) = integer {
            return Ok(Integer(int));
        }

        let float = s.parse::<f64>();
        if let Ok(f) = float {
            return Ok(Float(f));
        }

        Err(ParseNumberError(s.to_string()))
    }
}


impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integer(val) => write!(f, "{}", val),
            // Debug keeps the fractional part (2.0 rather than 2), which keeps
            // printed floats classifying as floats when read back.
            Float(val) => write!(f, "{:?}", val),
        }
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integer(val) => write!(f, "{}i64", val),
            Float(val) => write!(f, "{:?}f64", val),
        }
    }
}

impl fmt::Display for ParseNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Not a number: \"{}\"", self.0)
    }
}


impl From<i64> for Number {
    fn from(elem: i64) -> Self {
        Integer(elem)
    }
}

impl From<f64> for Number {
    fn from(elem: f64) -> Self {
        Float(elem)
    }
}

impl From<Number> for Sexp {
    fn from(elem: Number) -> Self {
        Sexp::Primitive(Primitive::Number(elem))
    }
}

impl From<i64> for Sexp {
    fn from(elem: i64) -> Self {
        Number::Integer(elem).into()
    }
}

impl From<f64> for Sexp {
    fn from(elem: f64) -> Self {
        Number::Float(elem).into()
    }
}

impl<'a> TryFrom<&'a Sexp> for Number {
    type Error = &'a Sexp;

    fn try_from(value: &'a Sexp) -> Result<Self, Self::Error> {
        if let Sexp::Primitive(Primitive::Number(num)) = value {
            Ok(*num)
        } else {
            Err(value)
        }
    }
}
