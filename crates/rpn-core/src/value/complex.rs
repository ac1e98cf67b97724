use super::float::Float;
use crate::error::{CalcError, CalcResult};

/// A complex number with Float components.
#[derive(Clone, Debug, PartialEq)]
pub struct Complex {
    pub re: Float,
    pub im: Float,
}

impl Complex {
    pub fn new(re: Float, im: Float) -> Self {
        Self { re, im }
    }

    /// A real number as a complex with zero imaginary part.
    pub fn from_real(re: Float) -> Self {
        let im = Float::zero(re.digits());
        Self { re, im }
    }

    /// Build from polar coordinates (angle in radians).
    pub fn from_polar(magnitude: &Float, angle: &Float) -> CalcResult<Self> {
        Ok(Self {
            re: magnitude.mul(&angle.cos()?)?,
            im: magnitude.mul(&angle.sin()?)?,
        })
    }

    pub fn digits(&self) -> u32 {
        self.re.digits().max(self.im.digits())
    }

    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    pub fn is_real(&self) -> bool {
        self.im.is_zero()
    }

    fn i(digits: u32) -> CalcResult<Complex> {
        Ok(Complex::new(Float::zero(digits), Float::from_i64(1, digits)?))
    }

    fn real(n: i64, digits: u32) -> CalcResult<Complex> {
        Ok(Complex::from_real(Float::from_i64(n, digits)?))
    }

    pub fn add(&self, other: &Complex) -> CalcResult<Complex> {
        Ok(Complex::new(self.re.add(&other.re)?, self.im.add(&other.im)?))
    }

    pub fn sub(&self, other: &Complex) -> CalcResult<Complex> {
        Ok(Complex::new(self.re.sub(&other.re)?, self.im.sub(&other.im)?))
    }

    pub fn mul(&self, other: &Complex) -> CalcResult<Complex> {
        let re = self.re.mul(&other.re)?.sub(&self.im.mul(&other.im)?)?;
        let im = self.re.mul(&other.im)?.add(&self.im.mul(&other.re)?)?;
        Ok(Complex::new(re, im))
    }

    pub fn div(&self, other: &Complex) -> CalcResult<Complex> {
        if other.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        let denom = other.re.mul(&other.re)?.add(&other.im.mul(&other.im)?)?;
        let re = self.re.mul(&other.re)?.add(&self.im.mul(&other.im)?)?;
        let im = self.im.mul(&other.re)?.sub(&self.re.mul(&other.im)?)?;
        Ok(Complex::new(re.div(&denom)?, im.div(&denom)?))
    }

    pub fn neg(&self) -> Complex {
        Complex::new(self.re.neg(), self.im.neg())
    }

    pub fn conj(&self) -> Complex {
        Complex::new(self.re.clone(), self.im.neg())
    }

    /// Magnitude `|z|`.
    pub fn abs(&self) -> CalcResult<Float> {
        self.re.mul(&self.re)?.add(&self.im.mul(&self.im)?)?.sqrt()
    }

    /// Argument in radians, in `(-π, π]`.
    pub fn arg(&self) -> CalcResult<Float> {
        Float::atan2(&self.im, &self.re)
    }

    /// Principal square root.
    pub fn sqrt(&self) -> CalcResult<Complex> {
        if self.is_zero() {
            return Ok(self.clone());
        }
        let d = self.digits();
        let two = Float::from_i64(2, d)?;
        let magnitude = self.abs()?;
        let re = magnitude.add(&self.re)?.div(&two)?.sqrt()?;
        let mut im = magnitude.sub(&self.re)?.div(&two)?.sqrt()?;
        if self.im.is_negative() {
            im = im.neg();
        }
        Ok(Complex::new(re, im))
    }

    pub fn exp(&self) -> CalcResult<Complex> {
        let scale = self.re.exp()?;
        Ok(Complex::new(
            scale.mul(&self.im.cos()?)?,
            scale.mul(&self.im.sin()?)?,
        ))
    }

    /// Principal logarithm.
    pub fn ln(&self) -> CalcResult<Complex> {
        if self.is_zero() {
            return Err(CalcError::domain("logarithm of zero"));
        }
        Ok(Complex::new(self.abs()?.ln()?, self.arg()?))
    }

    /// `sin z = (e^{iz} - e^{-iz}) / 2i`
    pub fn sin(&self) -> CalcResult<Complex> {
        let d = self.digits();
        let i = Complex::i(d)?;
        let iz = i.mul(self)?;
        let num = iz.exp()?.sub(&iz.neg().exp()?)?;
        num.div(&Complex::real(2, d)?.mul(&i)?)
    }

    /// `cos z = (e^{iz} + e^{-iz}) / 2`
    pub fn cos(&self) -> CalcResult<Complex> {
        let d = self.digits();
        let iz = Complex::i(d)?.mul(self)?;
        let num = iz.exp()?.add(&iz.neg().exp()?)?;
        num.div(&Complex::real(2, d)?)
    }

    pub fn tan(&self) -> CalcResult<Complex> {
        self.sin()?.div(&self.cos()?)
    }

    /// `atan z = (i/2) ln((i + z) / (i - z))`
    pub fn atan(&self) -> CalcResult<Complex> {
        let d = self.digits();
        let i = Complex::i(d)?;
        let ratio = i.add(self)?.div(&i.sub(self)?)?;
        let half_i = i.div(&Complex::real(2, d)?)?;
        half_i.mul(&ratio.ln()?)
    }

    /// `z^w = e^{w ln z}`; `0^w` is 0 for non-zero `w`.
    pub fn pow(&self, exponent: &Complex) -> CalcResult<Complex> {
        if self.is_zero() {
            if exponent.is_zero() {
                return Complex::real(1, self.digits());
            }
            return Ok(self.clone());
        }
        exponent.mul(&self.ln()?)?.exp()
    }
}
