//! Rectangular matrices of scalars.
//!
//! Cells are stored row-major. Arithmetic goes through [`crate::arith`], so
//! an Integer matrix keeps exact results (its determinant is an Integer and
//! its inverse has Rational cells).

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};

use super::Value;
use crate::arith;
use crate::error::{CalcError, CalcResult};

#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    cells: Vec<Value>,
}

impl Matrix {
    /// Build a matrix from row-major cells. Every cell must be a scalar.
    pub fn new(rows: usize, cols: usize, cells: Vec<Value>) -> CalcResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(CalcError::invalid("matrix must not be empty"));
        }
        if cells.len() != rows * cols {
            return Err(CalcError::invalid(format!(
                "expected {} cells for a {}x{} matrix, got {}",
                rows * cols,
                rows,
                cols,
                cells.len()
            )));
        }
        if let Some(bad) = cells.iter().find(|c| !c.kind().is_scalar()) {
            return Err(CalcError::mismatch("matrix", format!("{} cell", bad.kind())));
        }
        Ok(Self { rows, cols, cells })
    }

    /// Build from a list of rows of equal length.
    pub fn from_rows(rows: Vec<Vec<Value>>) -> CalcResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != width) {
            return Err(CalcError::invalid("matrix rows differ in length"));
        }
        Matrix::new(height, width, rows.into_iter().flatten().collect())
    }

    pub(crate) fn from_parts(rows: usize, cols: usize, cells: Vec<Value>) -> Self {
        Self { rows, cols, cells }
    }

    /// The `n`x`n` identity matrix with Integer cells.
    pub fn identity(n: usize) -> CalcResult<Self> {
        let cells = (0..n * n)
            .map(|i| Value::integer(i64::from(i / n == i % n)))
            .collect();
        Matrix::new(n, n, cells)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> &[Value] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Value> {
        self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> &Value {
        &self.cells[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[Value] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub(crate) fn map_cells(self, f: impl FnMut(Value) -> Value) -> Matrix {
        let cells = self.cells.into_iter().map(f).collect();
        Matrix::from_parts(self.rows, self.cols, cells)
    }

    fn try_map(&self, f: impl FnMut(&Value) -> CalcResult<Value>) -> CalcResult<Matrix> {
        let cells = self.cells.iter().map(f).collect::<CalcResult<Vec<_>>>()?;
        Ok(Matrix::from_parts(self.rows, self.cols, cells))
    }

    fn require_same_shape(&self, other: &Matrix) -> CalcResult<()> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(CalcError::invalid(format!(
                "dimension mismatch: {}x{} vs {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }
        Ok(())
    }

    fn require_square(&self, op: &str) -> CalcResult<()> {
        if !self.is_square() {
            return Err(CalcError::invalid(format!(
                "{}: matrix must be square, got {}x{}",
                op, self.rows, self.cols
            )));
        }
        Ok(())
    }

    pub fn transpose(&self) -> Matrix {
        let mut cells = Vec::with_capacity(self.cells.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                cells.push(self.get(r, c).clone());
            }
        }
        Matrix::from_parts(self.cols, self.rows, cells)
    }

    pub fn add(&self, other: &Matrix, digits: u32) -> CalcResult<Matrix> {
        self.require_same_shape(other)?;
        let cells = self
            .cells
            .iter()
            .zip(&other.cells)
            .map(|(a, b)| arith::add(a, b, digits))
            .collect::<CalcResult<Vec<_>>>()?;
        Ok(Matrix::from_parts(self.rows, self.cols, cells))
    }

    pub fn sub(&self, other: &Matrix, digits: u32) -> CalcResult<Matrix> {
        self.require_same_shape(other)?;
        let cells = self
            .cells
            .iter()
            .zip(&other.cells)
            .map(|(a, b)| arith::sub(a, b, digits))
            .collect::<CalcResult<Vec<_>>>()?;
        Ok(Matrix::from_parts(self.rows, self.cols, cells))
    }

    pub fn neg(&self) -> CalcResult<Matrix> {
        self.try_map(arith::neg)
    }

    /// Matrix product.
    pub fn mul(&self, other: &Matrix, digits: u32) -> CalcResult<Matrix> {
        if self.cols != other.rows {
            return Err(CalcError::invalid(format!(
                "cannot multiply {}x{} by {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }
        let mut cells = Vec::with_capacity(self.rows * other.cols);
        for r in 0..self.rows {
            for c in 0..other.cols {
                let mut acc = Value::integer(0);
                for k in 0..self.cols {
                    let term = arith::mul(self.get(r, k), other.get(k, c), digits)?;
                    acc = arith::add(&acc, &term, digits)?;
                }
                cells.push(acc);
            }
        }
        Ok(Matrix::from_parts(self.rows, other.cols, cells))
    }

    /// Multiply every cell by a scalar.
    pub fn scale(&self, factor: &Value, digits: u32) -> CalcResult<Matrix> {
        self.try_map(|c| arith::mul(factor, c, digits))
    }

    /// Divide every cell by a scalar.
    pub fn div_scalar(&self, divisor: &Value, digits: u32) -> CalcResult<Matrix> {
        self.try_map(|c| arith::div(c, divisor, digits))
    }

    /// Determinant by Gaussian elimination with first-non-zero pivoting.
    pub fn det(&self, digits: u32) -> CalcResult<Value> {
        self.require_square("det")?;
        let n = self.rows;
        let mut work = self.cells.clone();
        let mut det = Value::integer(1);
        for col in 0..n {
            let Some(pivot) = (col..n).find(|&r| !work[r * n + col].is_zero()) else {
                return Ok(Value::integer(0));
            };
            if pivot != col {
                for k in 0..n {
                    work.swap(pivot * n + k, col * n + k);
                }
                det = arith::neg(&det)?;
            }
            let p = work[col * n + col].clone();
            det = arith::mul(&det, &p, digits)?;
            for r in col + 1..n {
                let factor = arith::div(&work[r * n + col], &p, digits)?;
                if factor.is_zero() {
                    continue;
                }
                for k in col..n {
                    let delta = arith::mul(&factor, &work[col * n + k], digits)?;
                    work[r * n + k] = arith::sub(&work[r * n + k], &delta, digits)?;
                }
            }
        }
        Ok(det)
    }

    /// Inverse by Gauss-Jordan elimination.
    pub fn inverse(&self, digits: u32) -> CalcResult<Matrix> {
        self.require_square("inv")?;
        let n = self.rows;
        let mut left = self.cells.clone();
        let mut right = Matrix::identity(n)?.cells;
        for col in 0..n {
            let pivot = (col..n)
                .find(|&r| !left[r * n + col].is_zero())
                .ok_or_else(|| CalcError::domain("matrix is singular"))?;
            if pivot != col {
                for k in 0..n {
                    left.swap(pivot * n + k, col * n + k);
                    right.swap(pivot * n + k, col * n + k);
                }
            }
            let p = left[col * n + col].clone();
            for k in 0..n {
                left[col * n + k] = arith::div(&left[col * n + k], &p, digits)?;
                right[col * n + k] = arith::div(&right[col * n + k], &p, digits)?;
            }
            for r in 0..n {
                if r == col {
                    continue;
                }
                let factor = left[r * n + col].clone();
                if factor.is_zero() {
                    continue;
                }
                for k in 0..n {
                    let dl = arith::mul(&factor, &left[col * n + k], digits)?;
                    left[r * n + k] = arith::sub(&left[r * n + k], &dl, digits)?;
                    let dr = arith::mul(&factor, &right[col * n + k], digits)?;
                    right[r * n + k] = arith::sub(&right[r * n + k], &dr, digits)?;
                }
            }
        }
        Ok(Matrix::from_parts(n, n, right))
    }

    /// Integer power of a square matrix; negative powers invert first.
    pub fn pow(&self, exp: &BigInt, digits: u32) -> CalcResult<Matrix> {
        self.require_square("^")?;
        let base = if exp.is_negative() {
            self.inverse(digits)?
        } else {
            self.clone()
        };
        let mut e = exp
            .abs()
            .to_u64()
            .ok_or_else(|| CalcError::domain("exponent too large"))?;
        let cell_bits = base
            .cells
            .iter()
            .map(arith::exact_bits)
            .try_fold(0u64, |widest, bits| bits.map(|b| widest.max(b)));
        if let Some(bits) = cell_bits {
            // Each product adds at most log2(n) bits per cell.
            let growth = u64::from(usize::BITS - self.rows.leading_zeros());
            arith::check_pow_size("^", bits + growth, e)?;
        }
        let mut result = Matrix::identity(self.rows)?;
        let mut square = base;
        while e > 0 {
            if e & 1 == 1 {
                result = result.mul(&square, digits)?;
            }
            e >>= 1;
            if e > 0 {
                square = square.mul(&square, digits)?;
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const D: u32 = 16;

    fn m(rows: Vec<Vec<i64>>) -> Matrix {
        Matrix::from_rows(
            rows.into_iter()
                .map(|r| r.into_iter().map(Value::integer).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn shape_is_validated() {
        assert!(Matrix::new(2, 2, vec![Value::integer(1)]).is_err());
        assert!(Matrix::new(0, 0, Vec::new()).is_err());
        assert!(Matrix::from_rows(vec![vec![Value::integer(1)], vec![]]).is_err());
    }

    #[test]
    fn determinant_is_exact() {
        assert_eq!(m(vec![vec![1, 2], vec![3, 4]]).det(D).unwrap(), Value::integer(-2));
        assert_eq!(
            m(vec![vec![2, 0, 1], vec![1, 3, 2], vec![1, 1, 2]]).det(D).unwrap(),
            Value::integer(6)
        );
        assert_eq!(m(vec![vec![1, 2], vec![2, 4]]).det(D).unwrap(), Value::integer(0));
    }

    #[test]
    fn determinant_needs_row_swap() {
        assert_eq!(m(vec![vec![0, 1], vec![1, 0]]).det(D).unwrap(), Value::integer(-1));
    }

    #[test]
    fn inverse_has_rational_cells() {
        let inv = m(vec![vec![1, 2], vec![3, 4]]).inverse(D).unwrap();
        assert_eq!(inv.get(0, 0), &Value::integer(-2));
        assert_eq!(inv.get(0, 1), &Value::integer(1));
        assert_eq!(inv.get(1, 0), &Value::rational(3, 2).unwrap());
        assert_eq!(inv.get(1, 1), &Value::rational(-1, 2).unwrap());
        assert!(matches!(
            m(vec![vec![1, 2], vec![2, 4]]).inverse(D),
            Err(CalcError::Domain(_))
        ));
    }

    #[test]
    fn product_and_power() {
        let a = m(vec![vec![1, 1], vec![1, 0]]);
        assert_eq!(a.pow(&BigInt::from(5), D).unwrap(), m(vec![vec![8, 5], vec![5, 3]]));
        assert_eq!(a.pow(&BigInt::from(0), D).unwrap(), Matrix::identity(2).unwrap());
        let b = m(vec![vec![1, 2, 3]]);
        assert!(b.mul(&b, D).is_err());
        assert_eq!(b.transpose().rows(), 3);
    }

    #[test]
    fn oversized_power_is_rejected() {
        let a = m(vec![vec![1, 1], vec![1, 0]]);
        let err = a.pow(&BigInt::from(1_000_000_000_000u64), D).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Domain);
        let err = a.pow(&BigInt::from(10).pow(30), D).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Domain);
    }
}
