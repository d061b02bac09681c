use crate::error::FractionError;
use crate::matrix::matrix_gen::FieldElement;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Float, One, Signed, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::ops;
use std::str::FromStr;

/// Default tolerance of [`Fraction::from_f64`].
pub const DEFAULT_TOLERANCE: f64 = 0.00000000001;

/// Exact rational number over big integers.
///
/// Always reduced to lowest terms with a positive denominator, so two equal
/// values have the same representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fraction {
    num: BigInt,
    den: BigInt,
}

impl Fraction {
    /// # Panics
    ///
    /// If `den` is zero. Use [`Fraction::try_new`] for a fallible version.
    pub fn new(num: BigInt, den: BigInt) -> Self {
        match Fraction::try_new(num, den) {
            Ok(fraction) => fraction,
            Err(_) => panic!("Denominator cannot be zero"),
        }
    }

    pub fn try_new(num: BigInt, den: BigInt) -> Result<Self, FractionError> {
        if den.is_zero() {
            return Err(FractionError::ZeroDenominator);
        }

        let g = num.gcd(&den);
        let num = num / &g;
        let den = den / &g;

        if den.is_negative() {
            return Ok(Self {
                num: -num,
                den: -den,
            });
        }
        Ok(Self { num, den })
    }

    pub fn numer(&self) -> &BigInt {
        &self.num
    }

    pub fn denom(&self) -> &BigInt {
        &self.den
    }

    /// True when the denominator is one.
    pub fn is_integer(&self) -> bool {
        self.den.is_one()
    }

    /// Largest integer lower or equal to the fraction.
    pub fn floor(&self) -> BigInt {
        self.num.div_floor(&self.den)
    }

    /// `None` instead of a panic when `rhs` is zero.
    pub fn checked_div(self, rhs: Fraction) -> Option<Fraction> {
        if rhs.is_zero() {
            return None;
        }
        Some(self / rhs)
    }

    /// Closest simple fraction to `x`, see [`Fraction::from_f64_with_tolerance`].
    pub fn from_f64(x: f64) -> Result<Self, FractionError> {
        Fraction::from_f64_with_tolerance(x, DEFAULT_TOLERANCE)
    }

    /// Find the fraction with the smallest denominator within `tolerance` of `x`,
    /// by binary search in the Stern-Brocot tree.
    pub fn from_f64_with_tolerance(x: f64, tolerance: f64) -> Result<Self, FractionError> {
        if !x.is_finite() {
            return Err(FractionError::NonFinite(x));
        }
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(FractionError::InvalidTolerance(tolerance));
        }

        let x = Fraction::exact_from_f64(x);
        let error = Fraction::exact_from_f64(tolerance);

        let integer = x.floor();
        let decimal = x - Fraction::from(integer.clone());

        if decimal < error {
            // Close enough to an integer
            return Ok(Fraction::from(integer));
        }
        if decimal > Fraction::one() - error.clone() {
            // Close enough to the next integer
            return Ok(Fraction::from(integer + 1));
        }

        let lower = decimal.clone() - error.clone();
        let upper = decimal + error;
        let (num, den) = stern_brocot_search(&lower, &upper);

        Ok(Fraction::new(integer * &den + num, den))
    }

    // every finite f64 is `mantissa * 2^exponent`
    fn exact_from_f64(x: f64) -> Fraction {
        let (mantissa, exponent, sign) = x.integer_decode();
        let mantissa = BigInt::from(mantissa) * BigInt::from(sign);

        if exponent >= 0 {
            return Fraction::from(mantissa << exponent as usize);
        }
        Fraction::new(mantissa, BigInt::one() << exponent.unsigned_abs() as usize)
    }
}

// Mediant search between 0/1 and 1/1 for the first fraction inside
// `[lower, upper]`. Consecutive moves in the same direction are merged:
// after `j` moves right the mediant is `(ln + j*un) / (ld + j*ud)`, so the
// number of moves is the number of `j` keeping it below `lower`.
fn stern_brocot_search(lower: &Fraction, upper: &Fraction) -> (BigInt, BigInt) {
    let (mut ln, mut ld) = (BigInt::zero(), BigInt::one());
    let (mut un, mut ud) = (BigInt::one(), BigInt::one());

    loop {
        let steps = run_length(
            &(&lower.num * &ld - &lower.den * &ln),
            &(&lower.den * &un - &lower.num * &ud),
        );
        if !steps.is_zero() {
            ln += &steps * &un;
            ld += &steps * &ud;
            continue;
        }

        let steps = run_length(
            &(&upper.den * &un - &upper.num * &ud),
            &(&upper.num * &ld - &upper.den * &ln),
        );
        if !steps.is_zero() {
            un += &steps * &ln;
            ud += &steps * &ld;
            continue;
        }

        return (ln + un, ld + ud);
    }
}

// Number of `j >= 1` with `j * step < gap`.
fn run_length(gap: &BigInt, step: &BigInt) -> BigInt {
    if !gap.is_positive() || !step.is_positive() {
        return BigInt::zero();
    }
    (gap - 1) / step
}

impl From<BigInt> for Fraction {
    fn from(num: BigInt) -> Fraction {
        Fraction {
            num,
            den: BigInt::one(),
        }
    }
}

impl From<i64> for Fraction {
    fn from(num: i64) -> Fraction {
        Fraction::from(BigInt::from(num))
    }
}

impl FromStr for Fraction {
    type Err = FractionError;

    fn from_str(s: &str) -> Result<Self, FractionError> {
        let (num, den) = s.split_once('/').unwrap_or((s, "1"));
        Fraction::try_new(BigInt::from_str(num.trim())?, BigInt::from_str(den.trim())?)
    }
}

impl ops::Add for Fraction {
    type Output = Fraction;

    fn add(self, rhs: Fraction) -> Fraction {
        if self.den == rhs.den {
            return Fraction::new(self.num + rhs.num, self.den);
        }

        Fraction::new(
            &self.num * &rhs.den + &rhs.num * &self.den,
            &self.den * &rhs.den,
        )
    }
}

impl ops::Sub for Fraction {
    type Output = Fraction;

    fn sub(self, rhs: Fraction) -> Fraction {
        self + (-rhs)
    }
}

impl ops::Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction {
            num: -self.num,
            den: self.den,
        }
    }
}

impl ops::Div for Fraction {
    type Output = Fraction;

    fn div(self, rhs: Fraction) -> Fraction {
        Fraction::new(self.num * rhs.den, self.den * rhs.num)
    }
}

impl ops::Mul for Fraction {
    type Output = Fraction;

    fn mul(self, rhs: Fraction) -> Fraction {
        Fraction::new(self.num * rhs.num, self.den * rhs.den)
    }
}

impl One for Fraction {
    fn one() -> Fraction {
        Fraction::from(BigInt::one())
    }
}

impl Zero for Fraction {
    fn zero() -> Fraction {
        Fraction::from(BigInt::zero())
    }

    fn is_zero(&self) -> bool {
        self.num.is_zero()
    }
}

impl Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den.is_one() {
            return write!(f, "{}", self.num);
        }
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl PartialEq<i64> for Fraction {
    fn eq(&self, rhs: &i64) -> bool {
        self.den.is_one() && self.num == BigInt::from(*rhs)
    }
}

impl PartialOrd<Fraction> for Fraction {
    fn partial_cmp(&self, rhs: &Fraction) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}

impl Ord for Fraction {
    fn cmp(&self, rhs: &Fraction) -> Ordering {
        // denominators are positive
        (&self.num * &rhs.den).cmp(&(&rhs.num * &self.den))
    }
}

impl FieldElement for Fraction {}

impl std::iter::Sum<Fraction> for Fraction {
    fn sum<I: Iterator<Item = Fraction>>(iter: I) -> Fraction {
        iter.fold(Fraction::zero(), |acc, f| acc + f)
    }
}

impl std::iter::Product<Fraction> for Fraction {
    fn product<I: Iterator<Item = Fraction>>(iter: I) -> Fraction {
        iter.fold(Fraction::one(), |acc, f| acc * f)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
