//! Exact problem answers
//!
//! Division problems are not forced to divide evenly (7 ÷ 3 is a legal
//! problem), so answers are stored as reduced fractions and compared exactly.

use std::fmt;

use serde::{Serialize, Serializer};

/// An exact rational answer, always reduced with a positive denominator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Answer {
    numer: i32,
    denom: i32,
}

impl Answer {
    /// A whole-number answer
    pub const fn whole(value: i32) -> Self {
        Self {
            numer: value,
            denom: 1,
        }
    }

    /// `numer / denom` in lowest terms, or `None` for a zero denominator
    pub fn ratio(numer: i32, denom: i32) -> Option<Self> {
        if denom == 0 {
            return None;
        }
        let g = gcd(numer.unsigned_abs(), denom.unsigned_abs()).max(1) as i32;
        let sign = if denom < 0 { -1 } else { 1 };
        Some(Self {
            numer: sign * numer / g,
            denom: sign * denom / g,
        })
    }

    pub fn numer(&self) -> i32 {
        self.numer
    }

    pub fn denom(&self) -> i32 {
        self.denom
    }

    pub fn is_whole(&self) -> bool {
        self.denom == 1
    }

    /// The integer value, if this answer is whole
    pub fn as_whole(&self) -> Option<i32> {
        self.is_whole().then_some(self.numer)
    }

    pub fn as_f64(&self) -> f64 {
        self.numer as f64 / self.denom as f64
    }
}

impl From<i32> for Answer {
    fn from(value: i32) -> Self {
        Self::whole(value)
    }
}

/// Whole answers print as integers; others as the shortest decimal that
/// round-trips the quotient (`7 ÷ 3` prints `2.3333333333333335`).
impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_whole() {
            Some(n) => write!(f, "{}", n),
            None => write!(f, "{}", self.as_f64()),
        }
    }
}

/// Serialized as a plain JSON number so web hosts can read it directly
impl Serialize for Answer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_whole() {
            Some(n) => serializer.serialize_i32(n),
            None => serializer.serialize_f64(self.as_f64()),
        }
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}
